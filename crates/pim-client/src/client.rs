//! HTTP client for the PIM approvals and products REST resources.

use std::time::Duration;

use pim_core::{AppConfig, ApprovalRecord, ProductPayload, SheetRow};
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::retry::retry_with_backoff;

/// Header the backend reads the acting user from.
const USER_EMAIL_HEADER: &str = "user-email";

/// Shorter search terms list everything instead of filtering.
const SEARCH_MIN_CHARS: usize = 3;

/// Client for the PIM backend.
///
/// Use [`PimClient::new`] with the loaded [`AppConfig`], or
/// [`PimClient::with_base_url`] to point at a mock server in tests.
pub struct PimClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl PimClient {
    /// # Errors
    ///
    /// See [`PimClient::with_base_url`].
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// Creates a client rooted at `base_url`. A path on the base is kept, so
    /// `https://host/pim` resolves approvals to `https://host/pim/api/v1/approvals`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidBaseUrl`] if `base_url` is not an absolute
    ///   `http`/`https` URL.
    /// - [`ClientError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(invalid("expected an http(s) URL".to_owned()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Lists approvals, optionally filtered by a product-name search.
    ///
    /// `search` is only sent when it has at least three characters after
    /// trimming.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, a non-2xx status, or an
    /// unparseable body.
    pub async fn list_approvals(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<ApprovalRecord>, ClientError> {
        let mut url = self.endpoint(&["api", "v1", "approvals"]);
        if let Some(term) = search.map(str::trim) {
            if term.chars().count() >= SEARCH_MIN_CHARS {
                url.query_pairs_mut().append_pair("search", term);
            }
        }

        let body = self.execute(|| self.client.get(url.clone())).await?;
        let records: Vec<ApprovalRecord> = decode(&body, "approval list")?;
        tracing::debug!(count = records.len(), "fetched approvals");
        Ok(records)
    }

    /// Submits cleaned rows to the approval queue.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn submit_approvals(&self, rows: &[SheetRow]) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "v1", "approvals"]);
        self.execute(|| self.client.post(url.clone()).json(rows))
            .await?;
        tracing::info!(rows = rows.len(), "submitted rows for approval");
        Ok(())
    }

    /// Replaces an approval with `record`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingId`] if the record was never stored.
    /// - [`ClientError`] on transport failure or a non-2xx status.
    pub async fn update_approval(
        &self,
        record: &ApprovalRecord,
        user_email: &str,
    ) -> Result<(), ClientError> {
        let id = record
            .id
            .as_deref()
            .ok_or_else(|| ClientError::MissingId(record.product_name.clone()))?;
        let url = self.endpoint(&["api", "v1", "approvals", id]);
        self.execute(|| {
            self.client
                .put(url.clone())
                .header(USER_EMAIL_HEADER, user_email)
                .json(record)
        })
        .await?;
        tracing::debug!(id, status = %record.status, "updated approval");
        Ok(())
    }

    /// Deletes a single approval.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn delete_approval(&self, id: &str) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "v1", "approvals", id]);
        self.execute(|| self.client.delete(url.clone())).await?;
        Ok(())
    }

    /// Deletes approvals in bulk. An empty `ids` makes no request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn delete_approvals(&self, ids: &[String], user_email: &str) -> Result<(), ClientError> {
        if ids.is_empty() {
            return Ok(());
        }
        let url = self.endpoint(&["api", "v1", "approvals", "delete-duplicates"]);
        let body = serde_json::json!({ "ids": ids });
        self.execute(|| {
            self.client
                .post(url.clone())
                .header(USER_EMAIL_HEADER, user_email)
                .json(&body)
        })
        .await?;
        tracing::info!(count = ids.len(), "deleted approvals");
        Ok(())
    }

    /// Asks the product catalog which of `products` already exist. Returns the
    /// product names that are duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, a non-2xx status, or an
    /// unparseable body.
    pub async fn check_duplicates(
        &self,
        products: &[ApprovalRecord],
    ) -> Result<Vec<String>, ClientError> {
        let url = self.endpoint(&["api", "v1", "products", "check-duplicates"]);
        let body = self
            .execute(|| self.client.post(url.clone()).json(products))
            .await?;
        decode(&body, "duplicate check")
    }

    /// Creates products in the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or a non-2xx status.
    pub async fn bulk_create_products(
        &self,
        products: &[ProductPayload],
        user_email: &str,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "v1", "products", "bulk"]);
        self.execute(|| {
            self.client
                .post(url.clone())
                .header(USER_EMAIL_HEADER, user_email)
                .json(products)
        })
        .await?;
        tracing::info!(count = products.len(), "created products");
        Ok(())
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in the constructor: the base is never cannot-be-a-base.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends the request built by `build`, retrying transient failures, and
    /// returns the response body of a 2xx reply.
    async fn execute<F>(&self, build: F) -> Result<String, ClientError>
    where
        F: Fn() -> RequestBuilder,
    {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let request = build();
            async move {
                let response = request.send().await?;
                let status = response.status();
                let url = response.url().to_string();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(0);
                    return Err(ClientError::RateLimited {
                        url,
                        retry_after_secs,
                    });
                }

                if status == StatusCode::NOT_FOUND {
                    return Err(ClientError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(ClientError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }
}

fn decode<T: DeserializeOwned>(body: &str, context: &str) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|source| ClientError::Deserialize {
        context: context.to_owned(),
        source,
    })
}
