//! HTTP handlers for the call orchestrator API

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use voxline_sms_sdk::{normalize_to_e164, segment_info, validate_e164, SegmentEncoding};

use crate::error::{Error, Result};
use crate::flows::{FlowRequest, StoredFlow};
use crate::AppState;

// ============================================
// Health Handlers
// ============================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "call-orchestrator".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub platform: bool,
}

pub async fn ready_check(State(state): State<AppState>) -> Json<ReadyResponse> {
    let platform_ok = state.client.health_check().await.is_ok();

    Json(ReadyResponse {
        ready: true,
        platform: platform_ok,
    })
}

// ============================================
// Flow Handlers
// ============================================

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Serialize)]
pub struct FlowPreview {
    pub archetype: String,
    pub document: String,
}

/// Generate a document without assigning it to a number
pub async fn preview_flow(
    Query(query): Query<PreviewQuery>,
    Json(request): Json<FlowRequest>,
) -> Result<Json<FlowPreview>> {
    let archetype = request.archetype().to_string();
    let document = request.generate();

    let serialized = voxline_callflow_sdk::serialize(&document, query.pretty)
        .map_err(|e| Error::Internal(e.to_string()))?;

    Ok(Json(FlowPreview {
        archetype,
        document: serialized,
    }))
}

#[derive(Serialize)]
pub struct FlowAssignment {
    pub number: String,
    pub archetype: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<&StoredFlow> for FlowAssignment {
    fn from(flow: &StoredFlow) -> Self {
        Self {
            number: flow.number.clone(),
            archetype: flow.archetype.clone(),
            updated_at: flow.updated_at,
        }
    }
}

/// Generate a flow, store it, and push it to the platform as the number's
/// answer script
pub async fn assign_flow(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<FlowRequest>,
) -> Result<(StatusCode, Json<FlowAssignment>)> {
    let normalized = normalize_to_e164(&number);
    if !validate_e164(&normalized) {
        return Err(Error::InvalidPhoneNumber(number));
    }

    let request = request.with_webhook_defaults(&state.config.webhook_base_url);
    let stored = state.registry.assign(&normalized, request)?;
    state
        .client
        .update_number_flow(&normalized, &stored.serialized)
        .await?;

    tracing::info!(
        number = %normalized,
        archetype = %stored.archetype,
        "Assigned call flow to number"
    );

    Ok((StatusCode::CREATED, Json(FlowAssignment::from(&stored))))
}

/// The flow currently assigned to a number
pub async fn get_flow(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<StoredFlow>> {
    let normalized = normalize_to_e164(&number);
    state
        .registry
        .get(&normalized)
        .map(Json)
        .ok_or(Error::FlowNotFound(normalized))
}

/// List all flow assignments
pub async fn list_flows(State(state): State<AppState>) -> Json<Vec<FlowAssignment>> {
    let flows = state.registry.list();
    Json(flows.iter().map(FlowAssignment::from).collect())
}

/// Remove a number's flow assignment
pub async fn delete_flow(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<StatusCode> {
    let normalized = normalize_to_e164(&number);
    if state.registry.remove(&normalized) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::FlowNotFound(normalized))
    }
}

// ============================================
// Call Handlers
// ============================================

#[derive(Debug, Deserialize)]
pub struct OutboundCall {
    pub to: String,
    pub from: String,

    #[serde(flatten)]
    pub flow: FlowRequest,
}

#[derive(Serialize)]
pub struct CallResponse {
    pub id: String,
    pub status: String,
}

/// Place an outbound call driven by a generated call-flow document
pub async fn create_call(
    State(state): State<AppState>,
    Json(request): Json<OutboundCall>,
) -> Result<(StatusCode, Json<CallResponse>)> {
    let to = normalize_to_e164(&request.to);
    if !validate_e164(&to) {
        return Err(Error::InvalidPhoneNumber(request.to));
    }
    let from = normalize_to_e164(&request.from);
    if !validate_e164(&from) {
        return Err(Error::InvalidPhoneNumber(request.from));
    }

    let flow = request
        .flow
        .with_webhook_defaults(&state.config.webhook_base_url);
    let (_, serialized) = state.registry.build(flow)?;
    let status = state.client.create_call(&to, &from, &serialized).await?;

    tracing::info!(to = %to, call_id = %status.id, "Outbound call created");

    Ok((
        StatusCode::CREATED,
        Json(CallResponse {
            id: status.id,
            status: status.status,
        }),
    ))
}

// ============================================
// SMS Handlers
// ============================================

#[derive(Debug, Deserialize, Validate)]
pub struct OutboundSms {
    pub to: String,
    pub from: String,

    #[validate(length(min = 1, max = 1600))]
    pub body: String,
}

#[derive(Serialize)]
pub struct SmsSendResponse {
    pub id: String,
    pub status: String,
    pub segments: u32,
    pub encoding: SegmentEncoding,
}

/// Normalize both numbers, compute billing segments, and send via the
/// platform
pub async fn send_sms(
    State(state): State<AppState>,
    Json(request): Json<OutboundSms>,
) -> Result<(StatusCode, Json<SmsSendResponse>)> {
    request
        .validate()
        .map_err(|e| Error::InvalidRequest(e.to_string()))?;

    let to = normalize_to_e164(&request.to);
    if !validate_e164(&to) {
        return Err(Error::InvalidPhoneNumber(request.to));
    }
    let from = normalize_to_e164(&request.from);
    if !validate_e164(&from) {
        return Err(Error::InvalidPhoneNumber(request.from));
    }

    let info = segment_info(&request.body);
    let status = state.client.send_sms(&to, &from, &request.body).await?;

    tracing::info!(
        to = %to,
        segments = info.segments,
        message_id = %status.id,
        "SMS sent"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(SmsSendResponse {
            id: status.id,
            status: status.status,
            segments: info.segments,
            encoding: info.encoding,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct SmsEstimateRequest {
    pub body: String,
}

/// Segment/cost estimation without sending
pub async fn estimate_sms(
    Json(request): Json<SmsEstimateRequest>,
) -> Json<voxline_sms_sdk::SegmentInfo> {
    Json(segment_info(&request.body))
}
