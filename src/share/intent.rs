//! Share-intent URLs for each platform

use super::page::SharePage;
use super::target::SharePlatform;
use urlencoding::encode;

/// What sharing to a platform amounts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareAction {
    /// Open the platform's composer in a popup window
    Popup { url: String, window_name: String },
    /// Copy the page link
    CopyLink(String),
}

fn popup(platform: SharePlatform, url: String) -> ShareAction {
    ShareAction::Popup {
        url,
        window_name: format!("share-{}", platform.label()),
    }
}

/// Build the action for `platform`. All interpolated values are percent-encoded.
pub fn resolve(platform: SharePlatform, page: &SharePage) -> ShareAction {
    let link = encode(&page.url);
    let title_and_link = format!("{} {}", page.title, page.url);
    match platform {
        SharePlatform::Facebook => popup(
            platform,
            format!("https://www.facebook.com/sharer/sharer.php?u={link}"),
        ),
        SharePlatform::Twitter => popup(
            platform,
            format!(
                "https://twitter.com/intent/tweet?text={}",
                encode(&title_and_link)
            ),
        ),
        SharePlatform::LinkedIn => popup(
            platform,
            format!("https://www.linkedin.com/sharing/share-offsite/?url={link}"),
        ),
        SharePlatform::WhatsApp => popup(
            platform,
            format!("https://wa.me/?text={}", encode(&title_and_link)),
        ),
        SharePlatform::Telegram => popup(
            platform,
            format!(
                "https://t.me/share/url?url={link}&text={}",
                encode(&page.title)
            ),
        ),
        SharePlatform::Copy => ShareAction::CopyLink(page.url.clone()),
    }
}
