//! Email domain completion

/// Domains offered as completions, checked in order
pub const COMMON_DOMAINS: [&str; 5] = [
    "gmail.com",
    "hotmail.com",
    "yahoo.com",
    "outlook.com",
    "uol.com.br",
];

/// A completed address offered to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailSuggestion {
    pub domain: &'static str,
    pub suggested_email: String,
}

/// Suggest a completion when the text after `@` is a strict prefix of exactly
/// one common domain.
pub fn suggest_domain(email: &str) -> Option<EmailSuggestion> {
    let at = email.find('@')?;
    if at == 0 {
        return None;
    }
    let fragment = &email[at + 1..];
    if fragment.is_empty() {
        return None;
    }

    let fragment = fragment.to_lowercase();
    let mut candidates = COMMON_DOMAINS.iter().filter(|d| d.starts_with(&fragment));
    let domain = *candidates.next()?;
    if candidates.next().is_some() || fragment.len() >= domain.len() {
        return None;
    }

    Some(EmailSuggestion {
        domain,
        suggested_email: format!("{}{domain}", &email[..=at]),
    })
}
