//! Field rules for the subscription form

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Minimum number of characters in the trimmed name
pub const NAME_MIN_CHARS: usize = 2;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Failed to compile email regex")
});

/// A violated form rule. The display text is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Nome deve ter pelo menos 2 caracteres")]
    NameTooShort,
    #[error("Email inválido")]
    InvalidEmail,
}

/// Every rule the form currently violates, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors().iter().map(ToString::to_string).collect()
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

fn name_is_long_enough(name: &str) -> bool {
    name.trim().chars().count() >= NAME_MIN_CHARS
}

/// Check both fields and collect all violations
pub fn validate(name: &str, email: &str) -> ValidationResult {
    let mut errors = Vec::new();
    if !name_is_long_enough(name) {
        errors.push(ValidationError::NameTooShort);
    }
    if !is_valid_email(email.trim()) {
        errors.push(ValidationError::InvalidEmail);
    }
    ValidationResult { errors }
}

/// Rule applied when the name field loses focus. An empty field is left alone.
pub fn check_name_field(value: &str) -> Option<ValidationError> {
    let name = value.trim();
    (!name.is_empty() && !name_is_long_enough(name)).then_some(ValidationError::NameTooShort)
}

/// Rule applied when the email field loses focus. An empty field is left alone.
pub fn check_email_field(value: &str) -> Option<ValidationError> {
    let email = value.trim();
    (!email.is_empty() && !is_valid_email(email)).then_some(ValidationError::InvalidEmail)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod validate {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_valid_inputs_produce_no_errors() {
            for (name, email) in [
                ("Jo", "jo@site.example"),
                ("  Ana Souza ", "ana.souza@uol.com.br"),
                ("Zé", " ze@x.io "),
            ] {
                let result = validate(name, email);
                assert!(result.is_valid(), "{name:?} / {email:?}: {result:?}");
            }
        }

        #[test]
        fn test_short_names_are_rejected() {
            for name in ["", "A", "  B  ", "   "] {
                let result = validate(name, "ok@site.example");
                assert_eq!(result.errors(), &[ValidationError::NameTooShort]);
            }
        }

        #[test]
        fn test_malformed_emails_are_rejected() {
            for email in ["", "no-at-sign", "user@nodot", "@site.example", "a b@site.example"] {
                let result = validate("Ana", email);
                assert_eq!(result.errors(), &[ValidationError::InvalidEmail], "{email:?}");
            }
        }

        #[test]
        fn test_both_errors_are_reported_together() {
            let result = validate("A", "broken");
            assert_eq!(
                result.messages(),
                vec![
                    "Nome deve ter pelo menos 2 caracteres".to_string(),
                    "Email inválido".to_string(),
                ]
            );
        }

        #[test]
        fn test_name_length_counts_characters_not_bytes() {
            // "É" is two bytes but one character
            assert!(!validate("É", "a@b.co").is_valid());
            assert!(validate("Éa", "a@b.co").is_valid());
        }
    }

    mod field_checks {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_empty_fields_are_not_flagged_on_blur() {
            assert_eq!(check_name_field("  "), None);
            assert_eq!(check_email_field(""), None);
        }

        #[test]
        fn test_invalid_fields_are_flagged_on_blur() {
            assert_eq!(check_name_field("J"), Some(ValidationError::NameTooShort));
            assert_eq!(
                check_email_field("jane@gma"),
                Some(ValidationError::InvalidEmail)
            );
        }

        #[test]
        fn test_valid_fields_pass_on_blur() {
            assert_eq!(check_name_field("Jane"), None);
            assert_eq!(check_email_field("jane@gmail.com"), None);
        }
    }
}
