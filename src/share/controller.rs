//! Share controller: turns share triggers into popups, clipboard copies and notices

use super::analytics::{AnalyticsSink, ShareEvent};
use super::clipboard::{ClipboardBackend, ClipboardError};
use super::intent::{self, ShareAction};
use super::page::SharePage;
use super::popup::{PopupFeatures, WindowOpener};
use super::target::SharePlatform;
use crate::state::{Severity, Toast, ToastSlot};
use std::time::{Duration, Instant};

pub const COPY_SUCCESS: &str = "Link copiado para a área de transferência!";
pub const COPY_FAILURE: &str = "Erro ao copiar o link. Tente novamente.";

const NOTICE_LIFETIME: Duration = Duration::from_secs(3);
const NOTICE_EXIT: Duration = Duration::from_millis(300);

/// Which clipboard ended up holding the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    Primary,
    Fallback,
}

/// Collaborators the controller drives
pub struct ShareEnvironment {
    pub opener: Box<dyn WindowOpener>,
    pub clipboard: Box<dyn ClipboardBackend>,
    pub fallback_clipboard: Box<dyn ClipboardBackend>,
    /// When false the primary clipboard is skipped entirely
    pub use_primary_clipboard: bool,
    pub analytics: Option<Box<dyn AnalyticsSink>>,
    /// Screen size used to centre popups
    pub screen: (u32, u32),
}

pub struct ShareController {
    env: ShareEnvironment,
    page: SharePage,
    notice: ToastSlot,
    /// Index into `SharePlatform::ALL` of the highlighted trigger
    selected: usize,
}

impl ShareController {
    pub fn new(env: ShareEnvironment, page: SharePage) -> Self {
        Self {
            env,
            page,
            notice: ToastSlot::default(),
            selected: 0,
        }
    }

    pub fn page(&self) -> &SharePage {
        &self.page
    }

    pub fn set_page(&mut self, page: SharePage) {
        self.page = page;
    }

    pub fn notice(&self) -> Option<&Toast> {
        self.notice.current()
    }

    pub fn selected_platform(&self) -> SharePlatform {
        SharePlatform::ALL[self.selected % SharePlatform::ALL.len()]
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % SharePlatform::ALL.len();
    }

    pub fn select_prev(&mut self) {
        let count = SharePlatform::ALL.len();
        self.selected = (self.selected + count - 1) % count;
    }

    /// Activate the highlighted trigger
    pub fn activate_selected(&mut self, now: Instant) {
        let tag = self.selected_platform().tag();
        self.dispatch(tag, now);
    }

    /// Handle a share trigger by its tag. Unknown tags are logged and ignored.
    pub fn dispatch(&mut self, tag: &str, now: Instant) -> Option<SharePlatform> {
        match tag.parse::<SharePlatform>() {
            Ok(platform) => {
                self.share(platform, now);
                Some(platform)
            }
            Err(e) => {
                tracing::warn!("{e}");
                None
            }
        }
    }

    pub fn share(&mut self, platform: SharePlatform, now: Instant) {
        match intent::resolve(platform, &self.page) {
            ShareAction::Popup { url, window_name } => {
                let features = PopupFeatures::centered(self.env.screen);
                if let Err(e) = self.env.opener.open(&url, &window_name, &features) {
                    tracing::error!("Failed to open share window: {e:#}");
                }
            }
            ShareAction::CopyLink(link) => {
                self.copy_link(&link, now);
            }
        }
        self.track(platform);
    }

    /// Copy the current page link without going through a share trigger
    pub fn copy_page_link(&mut self, now: Instant) -> Option<CopyPath> {
        let link = self.page.url.clone();
        self.copy_link(&link, now)
    }

    fn copy_link(&mut self, link: &str, now: Instant) -> Option<CopyPath> {
        match self.write_clipboard(link) {
            Ok(path) => {
                tracing::debug!(?path, "Link copied");
                self.notify(COPY_SUCCESS, Severity::Success, now);
                Some(path)
            }
            Err(e) => {
                tracing::error!("Erro ao copiar: {e}");
                self.notify(COPY_FAILURE, Severity::Error, now);
                None
            }
        }
    }

    fn write_clipboard(&mut self, text: &str) -> Result<CopyPath, ClipboardError> {
        if self.env.use_primary_clipboard {
            match self.env.clipboard.write_text(text) {
                Ok(()) => return Ok(CopyPath::Primary),
                Err(e) => tracing::warn!(
                    backend = self.env.clipboard.name(),
                    "Copy failed, using {} fallback: {e}",
                    self.env.fallback_clipboard.name()
                ),
            }
        }
        self.env
            .fallback_clipboard
            .write_text(text)
            .map(|()| CopyPath::Fallback)
    }

    fn notify(&mut self, message: &str, severity: Severity, now: Instant) {
        self.notice.show(
            Toast::new(message, severity, now, Some(NOTICE_LIFETIME))
                .with_exit_transition(NOTICE_EXIT),
        );
    }

    fn track(&mut self, platform: SharePlatform) {
        tracing::info!(platform = platform.tag(), "Share performed");
        let event = ShareEvent::article(platform.tag(), self.page.article_id());
        if let Some(sink) = self.env.analytics.as_mut() {
            if let Err(e) = sink.record(&event) {
                tracing::warn!("Failed to record share event: {e:#}");
            }
        }
    }

    /// Expire the notice. Returns true while it still needs frames.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notice.tick(now)
    }
}
