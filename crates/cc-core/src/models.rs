//! Wire model of the verification service

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

/// Request body sent to the verification route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub text: String,
}

impl VerifyRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Credibility report returned by the service
///
/// Score range and the badge vocabulary are owned by the service; both are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub credibility_score: f64,
    pub badge: String,
    pub explanation: String,
    pub claims: Vec<Claim>,
}

/// A single assertion extracted from the submitted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub claim: String,
    pub status: String,
    pub explanation: String,
    pub sources: Vec<Source>,
}

/// A reference cited for a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub link: String,
    pub summary: String,
}

/// Parse and validate a service response body
///
/// Every field is required. Unknown fields are ignored.
pub fn parse_response(body: &str) -> CoreResult<VerificationResult> {
    let result: VerificationResult = serde_json::from_str(body)?;
    result.validate()?;
    Ok(result)
}

impl VerificationResult {
    fn validate(&self) -> CoreResult<()> {
        if !self.credibility_score.is_finite() {
            return Err(CoreError::Schema(format!(
                "credibility_score is not a finite number: {}",
                self.credibility_score
            )));
        }
        Ok(())
    }

    /// Style selector for the badge, matched case-insensitively
    pub fn badge_class(&self) -> String {
        style_key(&self.badge)
    }

    pub fn source_count(&self) -> usize {
        self.claims.iter().map(|c| c.sources.len()).sum()
    }

    /// Number of claims per (lower-cased) status
    pub fn status_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for claim in &self.claims {
            *counts.entry(claim.status_class()).or_insert(0) += 1;
        }
        counts
    }
}

impl Claim {
    /// Style selector for the status, matched case-insensitively
    pub fn status_class(&self) -> String {
        style_key(&self.status)
    }
}

impl Source {
    /// The link as a URL, if it is safe to use as a hyperlink target
    pub fn href(&self) -> Option<Url> {
        let url = Url::parse(self.link.trim()).ok()?;
        match url.scheme() {
            "http" | "https" => Some(url),
            _ => None,
        }
    }
}

fn style_key(label: &str) -> String {
    label.trim().to_lowercase()
}
