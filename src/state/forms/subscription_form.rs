//! Subscription form fields and focus handling

use super::field::{CategoryOption, FormField};

/// Focusable controls of the subscription form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Name,
    Email,
    Category(usize),
    Submit,
}

/// Subscription form: full name, email, category checkboxes and a submit button
#[derive(Debug, Clone)]
pub struct SubscriptionForm {
    pub full_name: FormField,
    pub email: FormField,
    pub categories: Vec<CategoryOption>,
    pub focus: Focus,
}

impl SubscriptionForm {
    pub fn new() -> Self {
        Self {
            full_name: FormField::text("Nome completo"),
            email: FormField::text("Email"),
            categories: Vec::new(),
            focus: Focus::Name,
        }
    }

    /// Replace the offered categories, keeping focus in range
    pub fn set_categories(&mut self, categories: Vec<CategoryOption>) {
        self.categories = categories;
        if let Focus::Category(index) = self.focus {
            if index >= self.categories.len() {
                self.focus = Focus::Submit;
            }
        }
    }

    fn focus_count(&self) -> usize {
        // name, email, categories..., submit
        self.categories.len() + 3
    }

    fn focus_index(&self) -> usize {
        match self.focus {
            Focus::Name => 0,
            Focus::Email => 1,
            Focus::Category(index) => index + 2,
            Focus::Submit => self.focus_count() - 1,
        }
    }

    fn focus_at(&self, index: usize) -> Focus {
        match index {
            0 => Focus::Name,
            1 => Focus::Email,
            i if i < self.categories.len() + 2 => Focus::Category(i - 2),
            _ => Focus::Submit,
        }
    }

    /// Control that follows the focused one (wraps around)
    pub fn next_focus(&self) -> Focus {
        self.focus_at((self.focus_index() + 1) % self.focus_count())
    }

    /// Control that precedes the focused one (wraps around)
    pub fn prev_focus(&self) -> Focus {
        let current = self.focus_index();
        if current == 0 {
            self.focus_at(self.focus_count() - 1)
        } else {
            self.focus_at(current - 1)
        }
    }

    pub fn field(&self, focus: Focus) -> Option<&FormField> {
        match focus {
            Focus::Name => Some(&self.full_name),
            Focus::Email => Some(&self.email),
            Focus::Category(_) | Focus::Submit => None,
        }
    }

    pub fn field_mut(&mut self, focus: Focus) -> Option<&mut FormField> {
        match focus {
            Focus::Name => Some(&mut self.full_name),
            Focus::Email => Some(&mut self.email),
            Focus::Category(_) | Focus::Submit => None,
        }
    }

    /// Text field under focus, if the focus is on one
    pub fn active_field_mut(&mut self) -> Option<&mut FormField> {
        self.field_mut(self.focus)
    }

    /// Toggle the focused checkbox. Returns false when focus is elsewhere.
    pub fn toggle_focused_category(&mut self) -> bool {
        if let Focus::Category(index) = self.focus {
            if let Some(category) = self.categories.get_mut(index) {
                category.toggle();
                return true;
            }
        }
        false
    }

    /// Identifiers of the checked categories, in display order
    pub fn selected_category_ids(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter(|c| c.checked)
            .map(|c| c.id.to_string())
            .collect()
    }

    /// Empty every control and return focus to the first field
    pub fn reset(&mut self) {
        self.full_name.clear();
        self.email.clear();
        for category in &mut self.categories {
            category.checked = false;
        }
        self.focus = Focus::Name;
    }
}

impl Default for SubscriptionForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn form_with_categories(count: usize) -> SubscriptionForm {
        let mut form = SubscriptionForm::new();
        form.set_categories(
            (0..count)
                .map(|i| CategoryOption::new(i as i64 + 1, format!("Categoria {i}")))
                .collect(),
        );
        form
    }

    mod focus_order {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_next_focus_walks_through_all_controls() {
            let mut form = form_with_categories(2);
            let mut visited = vec![form.focus];
            for _ in 0..5 {
                form.focus = form.next_focus();
                visited.push(form.focus);
            }
            assert_eq!(
                visited,
                vec![
                    Focus::Name,
                    Focus::Email,
                    Focus::Category(0),
                    Focus::Category(1),
                    Focus::Submit,
                    Focus::Name,
                ]
            );
        }

        #[test]
        fn test_prev_focus_wraps_to_submit() {
            let form = form_with_categories(1);
            assert_eq!(form.prev_focus(), Focus::Submit);
        }

        #[test]
        fn test_without_categories_email_is_followed_by_submit() {
            let mut form = SubscriptionForm::new();
            form.focus = Focus::Email;
            assert_eq!(form.next_focus(), Focus::Submit);
        }

        #[test]
        fn test_shrinking_categories_clamps_focus() {
            let mut form = form_with_categories(3);
            form.focus = Focus::Category(2);
            form.set_categories(vec![CategoryOption::new(1, "IA")]);
            assert_eq!(form.focus, Focus::Submit);
        }
    }

    mod categories {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_toggle_only_applies_to_focused_checkbox() {
            let mut form = form_with_categories(2);
            assert!(!form.toggle_focused_category());

            form.focus = Focus::Category(1);
            assert!(form.toggle_focused_category());
            assert!(!form.categories[0].checked);
            assert!(form.categories[1].checked);
        }

        #[test]
        fn test_selected_category_ids_keeps_display_order() {
            let mut form = form_with_categories(3);
            form.categories[2].checked = true;
            form.categories[0].checked = true;
            assert_eq!(form.selected_category_ids(), vec!["1", "3"]);
        }
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = form_with_categories(2);
        form.full_name.set_text("Ana".to_string());
        form.email.set_text("ana@gmail.com".to_string());
        form.email.mark_invalid("Email inválido");
        form.categories[1].checked = true;
        form.focus = Focus::Submit;

        form.reset();

        assert_eq!(form.full_name.as_text(), "");
        assert_eq!(form.email.as_text(), "");
        assert!(!form.email.is_invalid());
        assert!(form.selected_category_ids().is_empty());
        assert_eq!(form.focus, Focus::Name);
    }

    #[test]
    fn test_active_field_mut_is_none_on_checkbox() {
        let mut form = form_with_categories(1);
        form.focus = Focus::Category(0);
        assert!(form.active_field_mut().is_none());
        form.focus = Focus::Email;
        assert_eq!(form.active_field_mut().unwrap().label, "Email");
    }
}
