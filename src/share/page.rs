//! The page being shared: link, title and description

use crate::site::{html, ArticleDocument};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Title used when the page offers none
pub const FALLBACK_TITLE: &str = "TechNews";
/// Description used when the page offers none
pub const FALLBACK_DESCRIPTION: &str = "Confira este artigo interessante no TechNews!";
/// Content id reported when the link carries no article number
pub const UNKNOWN_ARTICLE: &str = "unknown";

static ARTICLE_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/articles?/(\d+)").expect("Failed to compile article id regex"));

/// Everything a share action needs to know about the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePage {
    pub url: String,
    pub title: String,
    pub description: String,
}

impl SharePage {
    /// A page with only a link; title and description fall back
    pub fn placeholder(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: FALLBACK_TITLE.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
        }
    }

    /// Resolve title and description from the article markup
    pub fn from_document(document: &ArticleDocument) -> Self {
        Self {
            url: document.url.clone(),
            title: article_title(&document.html),
            description: article_description(&document.html),
        }
    }

    /// Article number from the link path, or `"unknown"`
    pub fn article_id(&self) -> String {
        let path = Url::parse(&self.url)
            .map(|url| url.path().to_string())
            .unwrap_or_else(|_| self.url.clone());
        ARTICLE_ID_REGEX
            .captures(&path)
            .and_then(|caps| caps.get(1))
            .map_or_else(|| UNKNOWN_ARTICLE.to_string(), |m| m.as_str().to_string())
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

fn article_title(page: &str) -> String {
    non_empty(html::text_by_tag_and_class(page, "h1", "article-title"))
        .or_else(|| non_empty(html::text_by_class(page, "article-title")))
        .or_else(|| non_empty(html::text_by_tag(page, "h1")))
        .or_else(|| non_empty(html::text_by_tag(page, "title")))
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

fn article_description(page: &str) -> String {
    non_empty(html::text_by_class(page, "article-summary"))
        .or_else(|| non_empty(html::text_by_class(page, "article-description")))
        .or_else(|| non_empty(html::meta_content(page, "description")))
        .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string())
}
