//! Application state definitions

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Newsletter subscription form
    #[default]
    Subscribe,
    /// Article page with its share triggers
    Article,
}

impl View {
    /// Views in tab order
    pub const ALL: [Self; 2] = [Self::Subscribe, Self::Article];

    pub fn title(self) -> &'static str {
        match self {
            Self::Subscribe => "Newsletter",
            Self::Article => "Artigo",
        }
    }

    /// Function key that switches to the view
    pub fn function_key(self) -> u8 {
        match self {
            Self::Subscribe => 1,
            Self::Article => 2,
        }
    }

    pub fn from_function_key(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.function_key() == n)
    }
}

/// Where the article page stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArticleStatus {
    /// No article was given
    #[default]
    NotRequested,
    Loading,
    Loaded,
    Failed(String),
}

/// Host-level state shared by both views
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,

    // Data
    pub article_status: ArticleStatus,

    // UI state
    /// One-line message in the status bar
    pub status_message: Option<String>,
    /// Vertical scroll of the subscribe view
    pub form_scroll: u16,
    /// Terminal size (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl AppState {
    /// Switch view, clearing the status line
    pub fn show_view(&mut self, view: View) {
        if self.current_view != view {
            self.current_view = view;
            self.status_message = None;
        }
    }

    pub fn article_is_loading(&self) -> bool {
        self.article_status == ArticleStatus::Loading
    }
}
