//! Remote text classifier behind the [`Categorizer`] seam.

use std::time::Duration;

use pim_pipeline::{parse_category_reply, Categories, CategorizeError, Categorizer};
use reqwest::{Client, Url};

use crate::error::ClientError;

/// Posts `{"productName": ...}` to a classification endpoint.
///
/// The endpoint may answer with a JSON object carrying `productCategory` /
/// `productSubcategory`, or with the plain-text reply format understood by
/// [`parse_category_reply`]. Failures are not retried: the pipeline already
/// falls back to `unknown` for that row.
#[derive(Debug, Clone)]
pub struct HttpCategorizer {
    client: Client,
    url: Url,
}

impl HttpCategorizer {
    /// # Errors
    ///
    /// - [`ClientError::InvalidBaseUrl`] if `url` does not parse.
    /// - [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let url = Url::parse(url).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: url.to_owned(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, url })
    }
}

impl Categorizer for HttpCategorizer {
    async fn categorize(&self, product_name: &str) -> Result<Categories, CategorizeError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(&serde_json::json!({ "productName": product_name }))
            .send()
            .await
            .map_err(|e| CategorizeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CategorizeError::Request(format!(
                "HTTP {} from {}",
                status.as_u16(),
                self.url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CategorizeError::Request(e.to_string()))?;
        parse_body(&body)
    }
}

fn parse_body(body: &str) -> Result<Categories, CategorizeError> {
    if body.trim().is_empty() {
        return Err(CategorizeError::Reply("empty body".to_owned()));
    }
    if let Ok(categories) = serde_json::from_str::<Categories>(body) {
        return Ok(categories);
    }
    Ok(parse_category_reply(body))
}
