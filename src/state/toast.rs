//! Transient notifications and the single-slot holder that owns them

use std::time::{Duration, Instant};

/// Severity of a notification, drives its colour and icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✔",
            Self::Error => "✖",
            Self::Info => "ℹ",
        }
    }
}

/// Where a toast is in its lifetime at a given instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastPhase {
    /// Fully shown
    Visible,
    /// Sliding out, progress runs from 0.0 to 1.0
    Leaving(f32),
    /// Past its lifetime, should be removed
    Expired,
}

/// A notification with a message, a severity and an optional lifetime.
///
/// Toasts without a lifetime stay until dismissed.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    shown_at: Instant,
    lifetime: Option<Duration>,
    exit_transition: Duration,
}

impl Toast {
    pub fn new(
        message: impl Into<String>,
        severity: Severity,
        shown_at: Instant,
        lifetime: Option<Duration>,
    ) -> Self {
        Self {
            message: message.into(),
            severity,
            shown_at,
            lifetime,
            exit_transition: Duration::ZERO,
        }
    }

    /// Add a slide-out transition that runs after the lifetime elapses
    pub fn with_exit_transition(mut self, transition: Duration) -> Self {
        self.exit_transition = transition;
        self
    }

    /// Whether the toast only goes away when the user dismisses it
    pub fn is_sticky(&self) -> bool {
        self.lifetime.is_none()
    }

    pub fn phase(&self, now: Instant) -> ToastPhase {
        let Some(lifetime) = self.lifetime else {
            return ToastPhase::Visible;
        };
        let elapsed = now.saturating_duration_since(self.shown_at);
        if elapsed < lifetime {
            return ToastPhase::Visible;
        }
        let leaving = elapsed - lifetime;
        if leaving < self.exit_transition {
            ToastPhase::Leaving(leaving.as_secs_f32() / self.exit_transition.as_secs_f32())
        } else {
            ToastPhase::Expired
        }
    }
}

/// Holds at most one toast. Showing a new one replaces the previous one.
#[derive(Debug, Default)]
pub struct ToastSlot {
    current: Option<Toast>,
}

impl ToastSlot {
    pub fn show(&mut self, toast: Toast) {
        self.current = Some(toast);
    }

    pub fn dismiss(&mut self) -> Option<Toast> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Drop an expired toast. Returns true while a timed toast is still pending.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.current.as_ref().map(|toast| toast.phase(now)) {
            Some(ToastPhase::Expired) => {
                self.current = None;
                false
            }
            Some(ToastPhase::Leaving(_)) => true,
            Some(ToastPhase::Visible) => self.current.as_ref().is_some_and(|t| !t.is_sticky()),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, millis: u64) -> Instant {
        base + Duration::from_millis(millis)
    }

    mod toast {
        use super::*;

        #[test]
        fn test_sticky_toast_never_expires() {
            let start = Instant::now();
            let toast = Toast::new("erro", Severity::Error, start, None);
            assert!(toast.is_sticky());
            assert_eq!(toast.phase(at(start, 3_600_000)), ToastPhase::Visible);
        }

        #[test]
        fn test_timed_toast_expires_after_lifetime() {
            let start = Instant::now();
            let toast = Toast::new("ok", Severity::Success, start, Some(Duration::from_secs(5)));
            assert_eq!(toast.phase(at(start, 4_999)), ToastPhase::Visible);
            assert_eq!(toast.phase(at(start, 5_000)), ToastPhase::Expired);
        }

        #[test]
        fn test_exit_transition_reports_progress() {
            let start = Instant::now();
            let toast = Toast::new("copiado", Severity::Success, start, Some(Duration::from_secs(3)))
                .with_exit_transition(Duration::from_millis(300));

            match toast.phase(at(start, 3_150)) {
                ToastPhase::Leaving(progress) => assert!((progress - 0.5).abs() < 0.01),
                other => panic!("expected leaving phase, got {other:?}"),
            }
            assert_eq!(toast.phase(at(start, 3_300)), ToastPhase::Expired);
        }
    }

    mod toast_slot {
        use super::*;

        #[test]
        fn test_show_replaces_previous_toast() {
            let now = Instant::now();
            let mut slot = ToastSlot::default();
            slot.show(Toast::new("first", Severity::Info, now, None));
            slot.show(Toast::new("second", Severity::Error, now, None));

            let current = slot.current().unwrap();
            assert_eq!(current.message, "second");
            assert_eq!(current.severity, Severity::Error);
        }

        #[test]
        fn test_tick_removes_expired_toast() {
            let start = Instant::now();
            let mut slot = ToastSlot::default();
            slot.show(Toast::new("ok", Severity::Success, start, Some(Duration::from_secs(5))));

            assert!(slot.tick(at(start, 1_000)));
            assert!(!slot.tick(at(start, 5_001)));
            assert!(slot.current().is_none());
        }

        #[test]
        fn test_tick_keeps_sticky_toast_without_requesting_frames() {
            let start = Instant::now();
            let mut slot = ToastSlot::default();
            slot.show(Toast::new("erro", Severity::Error, start, None));

            assert!(!slot.tick(at(start, 60_000)));
            assert!(slot.current().is_some());
        }

        #[test]
        fn test_dismiss_empties_slot() {
            let mut slot = ToastSlot::default();
            slot.show(Toast::new("erro", Severity::Error, Instant::now(), None));
            assert!(slot.dismiss().is_some());
            assert!(slot.dismiss().is_none());
        }
    }
}
