//! Subscriber counter shown above the form, with its count-up animation

use std::time::{Duration, Instant};

/// Eased interpolation between two counts
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    from: u64,
    to: u64,
    started: Instant,
}

impl CounterAnimation {
    /// Length of the count-up
    pub const DURATION: Duration = Duration::from_millis(1000);

    pub fn new(from: u64, to: u64, started: Instant) -> Self {
        Self {
            from,
            to: to.max(from),
            started,
        }
    }

    fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / Self::DURATION.as_secs_f32()).min(1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Value to display at `now`; lands exactly on the target once finished
    pub fn value_at(&self, now: Instant) -> u64 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        let eased = simple_easing::cubic_out(progress).clamp(0.0, 1.0);
        let span = (self.to - self.from) as f64;
        let step = (span * f64::from(eased)).floor() as u64;
        (self.from + step).min(self.to)
    }
}

/// The on-page subscriber count
#[derive(Debug, Clone)]
pub struct SubscriberCounter {
    value: u64,
    animation: Option<CounterAnimation>,
}

impl SubscriberCounter {
    pub fn new(value: u64) -> Self {
        Self {
            value,
            animation: None,
        }
    }

    /// Settled value, already including any increment still animating
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn displayed(&self, now: Instant) -> u64 {
        self.animation
            .as_ref()
            .map_or(self.value, |animation| animation.value_at(now))
    }

    /// Count one more subscriber, animating from what is on screen now
    pub fn increment(&mut self, now: Instant) {
        let from = self.displayed(now);
        self.value += 1;
        self.animation = Some(CounterAnimation::new(from, self.value, now));
    }

    /// Returns true while the animation needs more frames
    pub fn tick(&mut self, now: Instant) -> bool {
        match &self.animation {
            Some(animation) if animation.is_finished(now) => {
                self.animation = None;
                false
            }
            Some(_) => true,
            None => false,
        }
    }
}

/// Parse a displayed count, ignoring separators and other non-digits
pub fn parse_count(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Format a count with `.` thousands separators
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}
