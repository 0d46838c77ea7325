//! Verification service client

use crate::config::ClientConfig;
use crate::models::{parse_response, VerificationResult, VerifyRequest};
use crate::{CoreError, CoreResult};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

/// Longest error body kept on a status error
const MAX_ERROR_BODY: usize = 512;

/// Something that can turn free text into a credibility report
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait VerificationService {
    async fn verify(&self, text: &str) -> CoreResult<VerificationResult>;
}

/// Verification service reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    client: reqwest::Client,
    verify_url: Url,
}

impl HttpVerifier {
    pub fn new(config: &ClientConfig) -> CoreResult<Self> {
        let verify_url = config.verify_url()?;
        let client = build_client(config)?;
        Ok(Self { client, verify_url })
    }

    pub fn verify_url(&self) -> &Url {
        &self.verify_url
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(config: &ClientConfig) -> CoreResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(&config.user_agent);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

// The browser owns the user agent and has no per-client timeout.
#[cfg(target_arch = "wasm32")]
fn build_client(_config: &ClientConfig) -> CoreResult<reqwest::Client> {
    Ok(reqwest::Client::builder().build()?)
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl VerificationService for HttpVerifier {
    async fn verify(&self, text: &str) -> CoreResult<VerificationResult> {
        let request_id = Uuid::new_v4();
        debug!(
            %request_id,
            url = %self.verify_url,
            chars = text.chars().count(),
            "Submitting text for verification"
        );

        let response = self
            .client
            .post(self.verify_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&VerifyRequest::new(text))
            .send()
            .await
            .map_err(|e| {
                warn!(%request_id, "Verification request failed: {}", e);
                CoreError::Http(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(%request_id, status = status.as_u16(), "Verification service returned an error status");
            return Err(CoreError::Status {
                status: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let result = parse_response(&body).map_err(|e| {
            warn!(%request_id, "Rejected verification response: {}", e);
            e
        })?;

        info!(
            %request_id,
            score = result.credibility_score,
            badge = %result.badge,
            claims = result.claims.len(),
            "Verification result received"
        );

        Ok(result)
    }
}

fn truncate(body: &str, max_chars: usize) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
