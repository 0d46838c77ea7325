//! Report generation

pub mod html;
pub mod json;
pub mod markdown;
pub mod text;

use crate::models::{Claim, Source, VerificationResult};
use crate::{CoreError, CoreResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Markdown,
    Html,
    Json,
}

impl FromStr for ReportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            other => Err(CoreError::Config(format!("unknown report format: {}", other))),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Generate report in specified format
pub fn generate_report(result: &VerificationResult, format: ReportFormat) -> CoreResult<String> {
    let view = ReportView::from(result);
    match format {
        ReportFormat::Text => Ok(text::generate(&view)),
        ReportFormat::Markdown => Ok(markdown::generate(&view)),
        ReportFormat::Html => Ok(html::generate(&view)),
        ReportFormat::Json => json::generate(result),
    }
}

/// Display-ready form of a [`VerificationResult`]
///
/// Every renderer, including the browser client, goes through this so the
/// heading text and style selectors are computed in one place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub heading: String,
    pub score: String,
    pub badge: String,
    /// `badge <lower-cased badge>`
    pub badge_class: String,
    pub explanation: String,
    pub claims: Vec<ClaimView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimView {
    pub claim: String,
    pub status: String,
    /// `status <lower-cased status>`
    pub status_class: String,
    pub explanation: String,
    pub sources: Vec<SourceView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceView {
    pub title: String,
    /// The link as given, absent when it is not an http(s) URL
    pub href: Option<String>,
    pub summary: String,
}

impl From<&VerificationResult> for ReportView {
    fn from(result: &VerificationResult) -> Self {
        let score = format_score(result.credibility_score);
        Self {
            heading: format!("Credibility Score: {} ({})", score, result.badge),
            score,
            badge: result.badge.clone(),
            badge_class: format!("badge {}", result.badge_class()),
            explanation: result.explanation.clone(),
            claims: result.claims.iter().map(ClaimView::from).collect(),
        }
    }
}

impl From<&Claim> for ClaimView {
    fn from(claim: &Claim) -> Self {
        Self {
            claim: claim.claim.clone(),
            status: claim.status.clone(),
            status_class: format!("status {}", claim.status_class()),
            explanation: claim.explanation.clone(),
            sources: claim.sources.iter().map(SourceView::from).collect(),
        }
    }
}

impl From<&Source> for SourceView {
    fn from(source: &Source) -> Self {
        Self {
            title: source.title.clone(),
            href: source.href().map(|_| source.link.clone()),
            summary: source.summary.clone(),
        }
    }
}

impl SourceView {
    /// Serialized form of the link, with `<`, `>` and spaces percent-encoded
    ///
    /// Plain text formats wrap links in angle brackets, so they need this
    /// rather than the link as given.
    pub fn encoded_href(&self) -> Option<String> {
        let href = self.href.as_deref()?;
        Url::parse(href.trim()).ok().map(|url| url.to_string())
    }
}

impl ReportView {
    pub fn to_html(&self) -> String {
        html::generate(self)
    }
}

/// Shortest decimal form; integral scores print without a fraction
pub fn format_score(score: f64) -> String {
    format!("{}", score)
}
