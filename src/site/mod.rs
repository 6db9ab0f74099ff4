//! Site client module for HTTP communication with the TechNews site

mod client;
mod error;
pub mod html;
mod models;
mod response;
mod traits;

pub use client::SiteClient;
pub use error::SiteError;
pub use models::{ArticleDocument, Category, SubscribePage, SubscriptionRequest};
pub use response::SubmissionOutcome;
pub use traits::SiteApi;

#[cfg(test)]
pub use traits::MockSiteApi;
