//! Telephony platform API client
//!
//! Thin HTTP wrapper around the external telephony platform. The platform
//! stores a serialized call-flow document as the answer script for a phone
//! number or call, and sends outbound SMS; everything past this boundary is
//! opaque to the orchestrator.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::OrchestratorConfig;

#[derive(Debug, Error)]
pub enum TelephonyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Unauthorized")]
    Unauthorized,
}

pub type Result<T> = std::result::Result<T, TelephonyError>;

/// Telephony platform API client. Constructed once at startup and injected
/// into whatever needs it.
pub struct TelephonyClient {
    client: Client,
    base_url: String,
    project_id: String,
    api_token: String,
}

#[derive(Debug, Serialize)]
struct UpdateNumberRequest<'a> {
    answer_script: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateCallRequest<'a> {
    to: &'a str,
    from: &'a str,
    answer_script: &'a str,
}

#[derive(Debug, Serialize)]
struct SendSmsRequest<'a> {
    to: &'a str,
    from: &'a str,
    body: &'a str,
}

/// Status record returned when a number's answer script is replaced
#[derive(Debug, Clone, Deserialize)]
pub struct NumberStatus {
    pub number: String,
    pub status: String,
}

/// Status record for an outbound call
#[derive(Debug, Clone, Deserialize)]
pub struct CallStatus {
    pub id: String,
    pub status: String,
}

/// Status record for an outbound message
#[derive(Debug, Clone, Deserialize)]
pub struct MessageStatus {
    pub id: String,
    pub status: String,
}

impl TelephonyClient {
    pub fn new(config: &OrchestratorConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.platform_base_url.clone(),
            project_id: config.platform_project_id.clone(),
            api_token: config.platform_api_token.clone(),
        }
    }

    /// Health check for the platform connection
    pub async fn health_check(&self) -> Result<()> {
        if self.api_token.is_empty() {
            return Err(TelephonyError::Unauthorized);
        }
        Ok(())
    }

    /// Replace the answer script executed when the number receives a call
    pub async fn update_number_flow(&self, number: &str, document: &str) -> Result<NumberStatus> {
        let url = format!("{}/v1/phone_numbers/{}", self.base_url, number);

        info!(number = %number, "Updating answer script on platform");

        let response = self
            .client
            .put(&url)
            .basic_auth(&self.project_id, Some(&self.api_token))
            .json(&UpdateNumberRequest {
                answer_script: document,
            })
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Place an outbound call driven by the given call-flow document
    pub async fn create_call(&self, to: &str, from: &str, document: &str) -> Result<CallStatus> {
        let url = format!("{}/v1/calls", self.base_url);

        debug!(to = %to, from = %from, "Creating outbound call");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.project_id, Some(&self.api_token))
            .json(&CreateCallRequest {
                to,
                from,
                answer_script: document,
            })
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Send an outbound SMS
    pub async fn send_sms(&self, to: &str, from: &str, body: &str) -> Result<MessageStatus> {
        let url = format!("{}/v1/messages", self.base_url);

        debug!(to = %to, "Sending SMS via platform");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.project_id, Some(&self.api_token))
            .json(&SendSmsRequest { to, from, body })
            .send()
            .await?;

        Self::parse(response).await
    }

    async fn parse<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else if response.status().as_u16() == 401 {
            Err(TelephonyError::Unauthorized)
        } else if response.status().as_u16() == 429 {
            Err(TelephonyError::RateLimited)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(TelephonyError::Api(error_text))
        }
    }
}
