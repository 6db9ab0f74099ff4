//! Form field value objects

/// A single-line text input with its inline feedback
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
    /// Inline validation message; its presence is the invalid marker
    pub error: Option<String>,
    /// Informational note shown under the field, never blocks submission
    pub hint: Option<String>,
}

impl FormField {
    /// Create a new text field
    pub fn text(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            error: None,
            hint: None,
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Value with surrounding whitespace removed, as validated and submitted
    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn set_text(&mut self, value: String) {
        self.value = value;
    }

    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    pub fn is_invalid(&self) -> bool {
        self.error.is_some()
    }

    pub fn mark_invalid(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn mark_valid(&mut self) {
        self.error = None;
    }

    /// Clear value and all feedback
    pub fn clear(&mut self) {
        self.value.clear();
        self.error = None;
        self.hint = None;
    }
}

/// A newsletter category offered as a checkbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: i64,
    pub label: String,
    pub checked: bool,
}

impl CategoryOption {
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            checked: false,
        }
    }

    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }
}
