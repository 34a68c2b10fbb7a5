//! Flow registry
//!
//! Maps archetype requests to generated call-flow documents and tracks which
//! document is assigned to each phone number.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use voxline_callflow_sdk::{
    ai_receptionist, call_queue, forward_call, ivr_menu, serialize, validate, voicemail,
    AiReceptionistParams, CallFlowDocument, CallQueueParams, ForwardCallParams, IvrMenuParams,
    VoicemailParams,
};
use voxline_core::{Result, VoxlineError};

/// A flow-generation request, tagged by archetype
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "archetype", content = "params", rename_all = "snake_case")]
pub enum FlowRequest {
    AiReceptionist(AiReceptionistParams),
    IvrMenu(IvrMenuParams),
    CallQueue(CallQueueParams),
    Voicemail(VoicemailParams),
    ForwardCall(ForwardCallParams),
}

impl FlowRequest {
    pub fn archetype(&self) -> &'static str {
        match self {
            Self::AiReceptionist(_) => "ai_receptionist",
            Self::IvrMenu(_) => "ivr_menu",
            Self::CallQueue(_) => "call_queue",
            Self::Voicemail(_) => "voicemail",
            Self::ForwardCall(_) => "forward_call",
        }
    }

    /// Fill in platform-invoked webhook URLs the caller left unset
    pub fn with_webhook_defaults(mut self, base_url: &str) -> Self {
        if let Self::Voicemail(params) = &mut self {
            if params.transcribe && params.webhook_url.is_none() {
                params.webhook_url = Some(format!("{}/api/webhooks/voicemail", base_url));
            }
        }
        self
    }

    /// Generate the call-flow document for this request
    pub fn generate(self) -> CallFlowDocument {
        match self {
            Self::AiReceptionist(params) => ai_receptionist(params),
            Self::IvrMenu(params) => ivr_menu(params),
            Self::CallQueue(params) => call_queue(params),
            Self::Voicemail(params) => voicemail(params),
            Self::ForwardCall(params) => forward_call(params),
        }
    }
}

/// A generated flow assigned to a phone number
#[derive(Debug, Clone, Serialize)]
pub struct StoredFlow {
    pub id: Uuid,
    pub number: String,
    pub archetype: String,
    pub document: CallFlowDocument,
    pub serialized: String,
    pub updated_at: DateTime<Utc>,
}

/// In-memory registry of per-number flow assignments
#[derive(Clone)]
pub struct FlowRegistry {
    flows: Arc<DashMap<String, StoredFlow>>,
}

impl FlowRegistry {
    pub fn new() -> Self {
        Self {
            flows: Arc::new(DashMap::new()),
        }
    }

    /// Generate, validate and serialize a document without storing it
    pub fn build(&self, request: FlowRequest) -> Result<(CallFlowDocument, String)> {
        let archetype = request.archetype();
        let document = request.generate();

        let report = validate(&document);
        if !report.valid {
            return Err(VoxlineError::Validation(report.errors.join("; ")));
        }

        let serialized = serialize(&document, false)
            .map_err(|e| VoxlineError::Serialization(e.to_string()))?;

        tracing::debug!(
            archetype = archetype,
            bytes = serialized.len(),
            "Generated call-flow document"
        );

        Ok((document, serialized))
    }

    /// Generate a document and record it as the flow for a number
    pub fn assign(&self, number: &str, request: FlowRequest) -> Result<StoredFlow> {
        let archetype = request.archetype().to_string();
        let (document, serialized) = self.build(request)?;

        let stored = StoredFlow {
            id: Uuid::new_v4(),
            number: number.to_string(),
            archetype,
            document,
            serialized,
            updated_at: Utc::now(),
        };
        self.flows.insert(number.to_string(), stored.clone());

        Ok(stored)
    }

    /// The flow currently assigned to a number
    pub fn get(&self, number: &str) -> Option<StoredFlow> {
        self.flows.get(number).map(|f| f.value().clone())
    }

    /// All assigned flows
    pub fn list(&self) -> Vec<StoredFlow> {
        self.flows.iter().map(|f| f.value().clone()).collect()
    }

    /// Remove a number's flow assignment
    pub fn remove(&self, number: &str) -> bool {
        self.flows.remove(number).is_some()
    }
}

impl Default for FlowRegistry {
    fn default() -> Self {
        Self::new()
    }
}
