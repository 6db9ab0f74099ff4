//! Data exchanged with the TechNews site

use serde::Deserialize;

/// Fields posted to the subscription endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionRequest {
    pub name: String,
    pub email: String,
    pub category_ids: Vec<String>,
}

impl SubscriptionRequest {
    /// Form-encoded pairs; `categoryIds` repeats once per selected category
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("name", self.name.clone()), ("email", self.email.clone())];
        fields.extend(
            self.category_ids
                .iter()
                .map(|id| ("categoryIds", id.clone())),
        );
        fields
    }
}

/// A newsletter category as listed by the site
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Envelope of `GET /api/categories/all`
#[derive(Debug, Deserialize)]
pub(super) struct CategoriesEnvelope {
    pub success: bool,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub message: Option<String>,
}

/// What the client reads from the subscribe page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscribePage {
    pub subscriber_count: Option<u64>,
}

/// A fetched article page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDocument {
    /// Final URL after redirects
    pub url: String,
    pub html: String,
}
