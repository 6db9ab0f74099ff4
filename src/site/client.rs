//! HTTP client for the TechNews site
//!
//! Owns transport details only: endpoint resolution, form encoding, status
//! mapping and decoding into the types the controllers consume.

use super::error::SiteError;
use super::html;
use super::models::{
    ArticleDocument, CategoriesEnvelope, Category, SubscribePage, SubscriptionRequest,
};
use super::response::{self, SubmissionOutcome};
use super::traits::SiteApi;
use crate::subscription::parse_count;
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use url::Url;

const USER_AGENT: &str = concat!("technews-tui/", env!("CARGO_PKG_VERSION"));

/// Header value marking a request as programmatic rather than a page navigation
const REQUESTED_WITH: &str = "XMLHttpRequest";

const SUBSCRIBE_PATH: &str = "newsletter/subscribe";
const CHECK_EMAIL_PATH: &str = "newsletter/api/check-email";
const CATEGORIES_PATH: &str = "api/categories/all";
const ARTICLES_PATH: &str = "articles";

/// Client for the site's form and page endpoints
pub struct SiteClient {
    client: Client,
    base: Url,
}

impl SiteClient {
    /// Create a client rooted at `base`. No request timeout is applied.
    pub fn new(base: Url) -> Result<Self, SiteError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base: with_trailing_slash(base),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, SiteError> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    /// Resolve an article reference: absolute URL, numeric id or site path
    fn article_url(&self, reference: &str) -> Result<Url, SiteError> {
        let reference = reference.trim();
        if let Ok(url) = Url::parse(reference) {
            if matches!(url.scheme(), "http" | "https") {
                return Ok(url);
            }
        }
        if !reference.is_empty() && reference.chars().all(|c| c.is_ascii_digit()) {
            return self.endpoint(&format!("{ARTICLES_PATH}/{reference}"));
        }
        self.endpoint(reference)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn ensure_success(response: Response) -> Result<Response, SiteError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(SiteError::Status(status))
    }
}

#[async_trait]
impl SiteApi for SiteClient {
    async fn subscribe(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<SubmissionOutcome, SiteError> {
        let url = self.endpoint(SUBSCRIBE_PATH)?;
        tracing::debug!(%url, categories = request.category_ids.len(), "Posting subscription");

        let response = self
            .client
            .post(url)
            .header("X-Requested-With", REQUESTED_WITH)
            .form(&request.form_fields())
            .send()
            .await?;
        let response = ensure_success(response)?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;
        Ok(response::classify(content_type.as_deref(), &body))
    }

    async fn fetch_subscribe_page(&self) -> Result<SubscribePage, SiteError> {
        let response = self
            .client
            .get(self.endpoint(SUBSCRIBE_PATH)?)
            .send()
            .await?;
        let body = ensure_success(response)?.text().await?;

        let subscriber_count =
            html::text_by_class(&body, "stat-number").and_then(|text| parse_count(&text));
        Ok(SubscribePage { subscriber_count })
    }

    async fn list_categories(&self) -> Result<Vec<Category>, SiteError> {
        let response = self
            .client
            .get(self.endpoint(CATEGORIES_PATH)?)
            .send()
            .await?;
        let status = response.status();

        let envelope: CategoriesEnvelope = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => return Err(SiteError::Status(status)),
        };
        if envelope.success {
            Ok(envelope.categories)
        } else {
            Err(SiteError::Decode(envelope.message.unwrap_or_else(|| {
                format!("category listing failed with status {status}")
            })))
        }
    }

    async fn check_email(&self, email: &str) -> Result<bool, SiteError> {
        let response = self
            .client
            .get(self.endpoint(CHECK_EMAIL_PATH)?)
            .query(&[("email", email)])
            .send()
            .await?;
        Ok(ensure_success(response)?.json::<bool>().await?)
    }

    async fn fetch_article(&self, reference: &str) -> Result<ArticleDocument, SiteError> {
        let url = self.article_url(reference)?;
        tracing::debug!(%url, "Fetching article");

        let response = ensure_success(self.client.get(url).send().await?)?;
        let url = response.url().to_string();
        let html = response.text().await?;
        Ok(ArticleDocument { url, html })
    }
}
