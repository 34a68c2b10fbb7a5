//! Structural validation for call-flow documents
//!
//! Checks only the two load-bearing top-level keys (`version` and
//! `sections.main`). Semantic faults like dangling `execute` targets are
//! detected by the platform at upload time, not here.

use serde_json::Value;

use crate::document::CallFlowDocument;

/// Result of a structural check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Validate a raw document value. Collects every violation rather than
/// short-circuiting, and never panics.
pub fn validate_value(document: &Value) -> ValidationReport {
    let mut errors = Vec::new();

    if document.get("version").is_none() {
        errors.push("missing required field: version".to_string());
    }

    let has_main = document
        .get("sections")
        .and_then(|s| s.get("main"))
        .is_some();
    if !has_main {
        errors.push("missing required section: main".to_string());
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// Validate a typed document
pub fn validate(document: &CallFlowDocument) -> ValidationReport {
    match serde_json::to_value(document) {
        Ok(value) => validate_value(&value),
        Err(e) => ValidationReport {
            valid: false,
            errors: vec![format!("document is not serializable: {}", e)],
        },
    }
}
