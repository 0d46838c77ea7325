//! JSON report generation

use crate::models::VerificationResult;
use crate::{CoreError, CoreResult};

pub fn generate(result: &VerificationResult) -> CoreResult<String> {
    serde_json::to_string_pretty(result)
        .map_err(|e| CoreError::Render(format!("JSON serialization failed: {}", e)))
}
