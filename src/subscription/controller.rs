//! Newsletter subscription form controller
//!
//! Owns the form, its feedback (inline errors, the validation list, the single
//! dynamic toast, the email suggestion) and the subscriber counter. Network
//! work is done elsewhere: `begin_submit` hands out the request to post and
//! `finish_submit` applies whatever came back.

use super::counter::SubscriberCounter;
use super::suggestion::{suggest_domain, EmailSuggestion};
use super::validation::{check_email_field, check_name_field, is_valid_email, validate};
use crate::site::{Category, SiteError, SubmissionOutcome, SubscriptionRequest};
use crate::state::{CategoryOption, Focus, Severity, SubscriptionForm, Toast, ToastSlot};
use std::time::{Duration, Instant};

pub const SUCCESS_MESSAGE: &str = "Inscrição realizada com sucesso! Verifique seu email.";
pub const FAILURE_MESSAGE: &str = "Erro ao processar inscrição. Tente novamente.";
pub const ALREADY_SUBSCRIBED_HINT: &str = "Email já cadastrado";

const SUCCESS_LIFETIME: Duration = Duration::from_secs(5);

/// What the host has to do after a submission result was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    None,
    /// The response was neither accepted nor refused, load the page data again
    ReloadPage,
}

#[derive(Debug, Default)]
pub struct SubscriptionController {
    form: SubscriptionForm,
    validation_errors: Option<Vec<String>>,
    toast: ToastSlot,
    suggestion: Option<EmailSuggestion>,
    counter: Option<SubscriberCounter>,
    loading: bool,
    scroll_requested: bool,
    pending_email_check: Option<String>,
}

impl SubscriptionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &SubscriptionForm {
        &self.form
    }

    pub fn validation_errors(&self) -> Option<&[String]> {
        self.validation_errors.as_deref()
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.current()
    }

    pub fn suggestion(&self) -> Option<&EmailSuggestion> {
        self.suggestion.as_ref()
    }

    pub fn counter(&self) -> Option<&SubscriberCounter> {
        self.counter.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the view should scroll the feedback above the form into sight.
    /// Reading the request consumes it.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    /// Email that became valid on blur and should be checked against the site
    pub fn take_email_check(&mut self) -> Option<String> {
        self.pending_email_check.take()
    }

    pub fn set_categories(&mut self, categories: &[Category]) {
        let options = categories
            .iter()
            .map(|c| CategoryOption::new(c.id, c.name.clone()))
            .collect();
        self.form.set_categories(options);
    }

    /// Install the counter read from the page. `None` removes it.
    pub fn set_subscriber_count(&mut self, count: Option<u64>) {
        self.counter = count.map(SubscriberCounter::new);
    }

    pub fn focus_next(&mut self) {
        let target = self.form.next_focus();
        self.move_focus(target);
    }

    pub fn focus_prev(&mut self) {
        let target = self.form.prev_focus();
        self.move_focus(target);
    }

    /// Move focus, validating the text field being left
    pub fn move_focus(&mut self, target: Focus) {
        if target != self.form.focus {
            self.blur();
        }
        self.form.focus = target;
    }

    fn blur(&mut self) {
        match self.form.focus {
            Focus::Name => {
                let field = &mut self.form.full_name;
                match check_name_field(&field.value) {
                    Some(error) => field.mark_invalid(error.to_string()),
                    None => field.mark_valid(),
                }
            }
            Focus::Email => {
                let field = &mut self.form.email;
                match check_email_field(&field.value) {
                    Some(error) => field.mark_invalid(error.to_string()),
                    None => {
                        field.mark_valid();
                        let email = field.trimmed();
                        if is_valid_email(email) {
                            self.pending_email_check = Some(email.to_string());
                        }
                    }
                }
            }
            Focus::Category(_) | Focus::Submit => {}
        }
    }

    /// Type into the focused text field. Returns false when focus is elsewhere.
    pub fn input_char(&mut self, c: char) -> bool {
        let Some(field) = self.form.active_field_mut() else {
            return false;
        };
        field.push_char(c);
        self.after_edit();
        true
    }

    pub fn backspace(&mut self) -> bool {
        let Some(field) = self.form.active_field_mut() else {
            return false;
        };
        field.pop_char();
        self.after_edit();
        true
    }

    fn after_edit(&mut self) {
        if self.form.focus == Focus::Email {
            self.form.email.hint = None;
            self.suggestion = suggest_domain(&self.form.email.value);
        }
    }

    /// Replace the email with the suggested address. Returns false when none is shown.
    pub fn accept_suggestion(&mut self) -> bool {
        let Some(suggestion) = self.suggestion.take() else {
            return false;
        };
        self.form.email.set_text(suggestion.suggested_email);
        self.form.email.hint = None;
        self.form.focus = Focus::Email;
        true
    }

    pub fn toggle_category(&mut self) -> bool {
        self.form.toggle_focused_category()
    }

    /// Validate the whole form and, when it passes, enter the loading state and
    /// return the request to post. Returns `None` while a submission is in flight.
    pub fn begin_submit(&mut self) -> Option<SubscriptionRequest> {
        if self.loading {
            tracing::debug!("Submission already in flight, ignoring");
            return None;
        }

        let result = validate(&self.form.full_name.value, &self.form.email.value);
        if !result.is_valid() {
            self.validation_errors = Some(result.messages());
            self.scroll_requested = true;
            return None;
        }

        self.loading = true;
        Some(SubscriptionRequest {
            name: self.form.full_name.trimmed().to_string(),
            email: self.form.email.trimmed().to_string(),
            category_ids: self.form.selected_category_ids(),
        })
    }

    /// Apply the result of a submission started with `begin_submit`
    pub fn finish_submit(
        &mut self,
        result: Result<SubmissionOutcome, SiteError>,
        now: Instant,
    ) -> FollowUp {
        self.loading = false;

        match result {
            Ok(SubmissionOutcome::Subscribed) => {
                tracing::info!("Subscription accepted");
                self.show_toast(SUCCESS_MESSAGE, Severity::Success, now);
                self.form.reset();
                self.suggestion = None;
                if let Some(counter) = self.counter.as_mut() {
                    counter.increment(now);
                }
                FollowUp::None
            }
            Ok(SubmissionOutcome::Rejected(message)) => {
                tracing::info!(%message, "Subscription rejected");
                self.show_toast(message, Severity::Error, now);
                FollowUp::None
            }
            Ok(SubmissionOutcome::Unrecognized) => {
                tracing::info!("Unrecognized subscription response, reloading page data");
                FollowUp::ReloadPage
            }
            Err(e) => {
                tracing::warn!("Subscription failed: {e}");
                self.show_toast(FAILURE_MESSAGE, Severity::Error, now);
                FollowUp::None
            }
        }
    }

    /// Apply the answer of the already-subscribed check, if the email is unchanged
    pub fn apply_email_check(&mut self, email: &str, taken: bool) {
        if self.form.email.trimmed() != email {
            return;
        }
        self.form.email.hint = taken.then(|| ALREADY_SUBSCRIBED_HINT.to_string());
    }

    /// Show the single dynamic toast, replacing the validation list and any previous toast
    fn show_toast(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        let lifetime = (severity == Severity::Success).then_some(SUCCESS_LIFETIME);
        self.validation_errors = None;
        self.toast.show(Toast::new(message, severity, now, lifetime));
        self.scroll_requested = true;
    }

    /// Close whatever sits above the form. Returns false when nothing was shown.
    pub fn dismiss(&mut self) -> bool {
        if self.toast.dismiss().is_some() {
            return true;
        }
        self.validation_errors.take().is_some()
    }

    /// Advance timers. Returns true while an animation needs frames.
    pub fn tick(&mut self, now: Instant) -> bool {
        let toast_pending = self.toast.tick(now);
        let counting = self
            .counter
            .as_mut()
            .is_some_and(|counter| counter.tick(now));
        toast_pending || counting
    }
}
