//! Client for the lead-generation scrape-and-send API.
//!
//! Posts an organization list plus an email address; the service scrapes
//! contacts asynchronously and mails the results.
//!
//! # Example
//!
//! ```rust,ignore
//! use leadgen_client::LeadGenClient;
//! use org_import::Session;
//!
//! let client = LeadGenClient::new("https://api.example.org")?.with_token("anonymous");
//! let body = session.prepare_submission()?;
//! let accepted = client.scrape_and_send(&body).await?;
//! println!("{}", accepted.message);
//! ```

pub mod error;
pub mod retry;
pub mod types;

pub use error::{Result, SubmissionError};
pub use retry::{default_retryable_status, RetryError, RetryPolicy};
pub use types::{ApiMessage, SubmitResponse, DEFAULT_SUCCESS_MESSAGE};

use org_import::{is_valid_link, Submission};
use secrecy::{ExposeSecret, SecretString};

/// Path of the submission endpoint, relative to the base URL.
pub const SCRAPE_AND_SEND_PATH: &str = "/lead-generation/scrape-and-send";

/// Application identifier sent in `X-App-Id` unless overridden.
pub const DEFAULT_APP_ID: &str = "local-lead-app";

/// A response that reached us, successful or not.
struct Delivered {
    status: u16,
    body: String,
}

pub struct LeadGenClient {
    client: reqwest::Client,
    base_url: String,
    app_id: Option<String>,
    token: Option<SecretString>,
    retry: RetryPolicy,
}

impl LeadGenClient {
    /// Create a client for the service at `base_url` with the default retry policy.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !is_valid_link(&base_url) {
            return Err(SubmissionError::Config(format!(
                "API base URL must start with http:// or https:// (got {base_url:?})"
            )));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            app_id: None,
            token: None,
            retry: RetryPolicy::default(),
        })
    }

    /// Send an `X-App-Id` header.
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Send an `Authorization: Bearer` header.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Full URL of the submission endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, SCRAPE_AND_SEND_PATH)
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Submit an organization list for scraping.
    ///
    /// Transport failures and retryable statuses are retried per the policy;
    /// non-retryable failures (400/404 by default) come back as
    /// [`SubmissionError::Rejected`] carrying the service's `error` message.
    pub async fn scrape_and_send(&self, submission: &Submission) -> Result<SubmitResponse> {
        let url = self.endpoint();
        tracing::info!(
            url = %url,
            organizations = submission.data.len(),
            designations = ?submission.designations,
            "Submitting organizations"
        );

        let mut attempts = 0;
        let delivered = self
            .retry
            .execute(|attempt| {
                attempts = attempt;
                self.send_once(&url, submission)
            })
            .await
            .map_err(|e| SubmissionError::RetriesExhausted {
                attempts: e.attempts,
                last_error: Box::new(e.last_error),
            })?;

        let parsed = parse_body(&delivered.body);

        if (200..300).contains(&delivered.status) {
            let api = parsed?;
            let message = api
                .message
                .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
            tracing::info!(status = delivered.status, attempts, "Submission accepted");
            return Ok(SubmitResponse {
                status: delivered.status,
                message,
                attempts,
            });
        }

        // An unreadable error body still reports the status.
        let message = parsed.ok().and_then(|api| api.error).unwrap_or_else(|| {
            format!("Submission failed with status: {}", delivered.status)
        });
        tracing::warn!(status = delivered.status, %message, "Submission rejected");
        Err(SubmissionError::Rejected {
            status: delivered.status,
            message,
        })
    }

    /// One POST. `Ok` for anything the caller must see as-is, `Err` for
    /// anything worth retrying.
    async fn send_once(&self, url: &str, submission: &Submission) -> Result<Delivered> {
        let mut request = self.client.post(url).json(submission);
        if let Some(app_id) = &self.app_id {
            request = request.header("X-App-Id", app_id);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let resp = request.send().await?;
        let status = resp.status().as_u16();

        if !resp.status().is_success() && self.retry.is_retryable_status(status) {
            return Err(SubmissionError::Status { status });
        }

        let body = resp.text().await?;
        Ok(Delivered { status, body })
    }
}

/// Parse a response body. An empty body carries no message.
fn parse_body(body: &str) -> Result<ApiMessage> {
    if body.trim().is_empty() {
        return Ok(ApiMessage::default());
    }
    Ok(serde_json::from_str(body)?)
}
