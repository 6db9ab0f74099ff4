//! Trait abstraction for the site client to enable mocking in tests

use super::error::SiteError;
use super::models::{ArticleDocument, Category, SubscribePage, SubscriptionRequest};
use super::response::SubmissionOutcome;
use async_trait::async_trait;

/// Operations the front end needs from the TechNews site
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SiteApi: Send + Sync {
    /// Post the subscription form. Non-2xx answers are errors.
    async fn subscribe(&self, request: &SubscriptionRequest)
        -> Result<SubmissionOutcome, SiteError>;

    /// Load the subscribe page (subscriber counter)
    async fn fetch_subscribe_page(&self) -> Result<SubscribePage, SiteError>;

    /// List the active newsletter categories
    async fn list_categories(&self) -> Result<Vec<Category>, SiteError>;

    /// Ask whether an address is already subscribed
    async fn check_email(&self, email: &str) -> Result<bool, SiteError>;

    /// Fetch an article page by id, site path or absolute URL
    async fn fetch_article(&self, reference: &str) -> Result<ArticleDocument, SiteError>;
}
