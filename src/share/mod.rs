//! Social sharing of the current article

mod analytics;
mod clipboard;
mod controller;
mod intent;
mod page;
mod popup;
mod target;

pub use analytics::{AnalyticsSink, JsonLinesSink};
pub use clipboard::{SystemClipboard, TerminalClipboard};
pub use controller::{ShareController, ShareEnvironment};
pub use page::SharePage;
pub use popup::SystemBrowser;
pub use target::SharePlatform;

#[cfg(test)]
pub use clipboard::MockClipboardBackend;
#[cfg(test)]
pub use controller::COPY_SUCCESS;
#[cfg(test)]
pub use popup::MockWindowOpener;
