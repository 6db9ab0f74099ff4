//! Interpretation of the subscription endpoint's reply
//!
//! The site answers a form post with either a structured JSON reply or the
//! rendered subscribe page. JSON is preferred; for HTML the alert classes in
//! the markup are the only signal, so they are matched as a fallback.

use super::html;
use serde::Deserialize;

/// Class present in the page when the subscription was accepted
pub const SUCCESS_MARKER: &str = "alert-success";
/// Class present in the page when the subscription was refused
pub const ERROR_MARKER: &str = "alert-danger";
/// Shown when a refusal carries no readable message
pub const DEFAULT_REJECTION: &str = "Erro ao processar inscrição";

/// What a successful HTTP exchange says about the subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Subscribed,
    Rejected(String),
    /// Neither accepted nor refused; the page should be reloaded
    Unrecognized,
}

#[derive(Debug, Deserialize)]
struct StructuredReply {
    success: Option<bool>,
    status: Option<String>,
    message: Option<String>,
}

impl StructuredReply {
    fn outcome(self) -> SubmissionOutcome {
        let accepted = self
            .success
            .or_else(|| match self.status.as_deref() {
                Some("success" | "ok") => Some(true),
                Some("error" | "fail" | "failure") => Some(false),
                _ => None,
            });
        match accepted {
            Some(true) => SubmissionOutcome::Subscribed,
            Some(false) => SubmissionOutcome::Rejected(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
            ),
            None => SubmissionOutcome::Unrecognized,
        }
    }
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| {
        ct.split(';')
            .next()
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
    })
}

/// Classify a 2xx reply body
pub fn classify(content_type: Option<&str>, body: &str) -> SubmissionOutcome {
    if is_json(content_type) {
        match serde_json::from_str::<StructuredReply>(body) {
            Ok(reply) => return reply.outcome(),
            Err(e) => tracing::debug!("JSON reply could not be decoded, sniffing markup: {e}"),
        }
    }
    classify_markup(body)
}

fn classify_markup(body: &str) -> SubmissionOutcome {
    if body.contains(SUCCESS_MARKER) {
        SubmissionOutcome::Subscribed
    } else if body.contains(ERROR_MARKER) {
        let message = html::text_by_class(body, ERROR_MARKER)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION.to_string());
        SubmissionOutcome::Rejected(message)
    } else {
        SubmissionOutcome::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod markup {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_success_marker_means_subscribed() {
            let body = r#"<div class="alert alert-success">Inscrição realizada com sucesso!</div>"#;
            assert_eq!(classify(Some("text/html"), body), SubmissionOutcome::Subscribed);
        }

        #[test]
        fn test_error_marker_extracts_message() {
            let body = r#"<div class="alert alert-danger"><i class="fas"></i> Erro ao realizar inscrição. Tente novamente.</div>"#;
            assert_eq!(
                classify(Some("text/html; charset=UTF-8"), body),
                SubmissionOutcome::Rejected("Erro ao realizar inscrição. Tente novamente.".into())
            );
        }

        #[test]
        fn test_error_message_spans_nested_elements() {
            let body = r#"<div class="alert alert-danger"><div class="d-flex">Erro:</div> Email já cadastrado</div>"#;
            assert_eq!(
                classify(Some("text/html"), body),
                SubmissionOutcome::Rejected("Erro: Email já cadastrado".into())
            );
        }

        #[test]
        fn test_error_marker_without_element_uses_default() {
            let body = "<script>const cls = 'alert-danger';</script>";
            assert_eq!(
                classify(None, body),
                SubmissionOutcome::Rejected(DEFAULT_REJECTION.into())
            );
        }

        #[test]
        fn test_no_marker_is_unrecognized() {
            assert_eq!(
                classify(Some("text/html"), "<html><body>Newsletter</body></html>"),
                SubmissionOutcome::Unrecognized
            );
        }
    }

    mod structured {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_success_flag() {
            assert_eq!(
                classify(Some("application/json"), r#"{"success": true}"#),
                SubmissionOutcome::Subscribed
            );
        }

        #[test]
        fn test_error_status_with_message() {
            assert_eq!(
                classify(
                    Some("application/json;charset=UTF-8"),
                    r#"{"status": "error", "message": "Email já cadastrado"}"#
                ),
                SubmissionOutcome::Rejected("Email já cadastrado".into())
            );
        }

        #[test]
        fn test_failure_without_message_uses_default() {
            assert_eq!(
                classify(Some("application/json"), r#"{"success": false, "message": " "}"#),
                SubmissionOutcome::Rejected(DEFAULT_REJECTION.into())
            );
        }

        #[test]
        fn test_json_without_signal_is_unrecognized() {
            assert_eq!(
                classify(Some("application/json"), r#"{"count": 3}"#),
                SubmissionOutcome::Unrecognized
            );
        }

        #[test]
        fn test_undecodable_json_falls_back_to_markup() {
            assert_eq!(
                classify(Some("application/json"), "<p class=\"alert-success\">ok</p>"),
                SubmissionOutcome::Subscribed
            );
        }
    }
}
