//! Deterministic document serialization
//!
//! Output is byte-identical for identical documents: sorted section keys,
//! fixed struct field order, no timestamps or generated identifiers.

use thiserror::Error;

use crate::document::CallFlowDocument;

#[derive(Debug, Error)]
pub enum CallFlowError {
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Serialize a document to its wire form. `pretty` produces 2-space-indented
/// output; otherwise the most compact form is emitted.
pub fn serialize(document: &CallFlowDocument, pretty: bool) -> Result<String, CallFlowError> {
    let text = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(text)
}

/// Parse a wire-form document back into the typed model
pub fn deserialize(text: &str) -> Result<CallFlowDocument, CallFlowError> {
    Ok(serde_json::from_str(text)?)
}
