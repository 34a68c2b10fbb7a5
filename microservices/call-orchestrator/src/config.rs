//! Call orchestrator configuration

use voxline_core::{Result, VoxlineError};

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub http_bind_address: String,
    pub platform_base_url: String,
    pub platform_project_id: String,
    pub platform_api_token: String,
    /// Public base URL where the platform reaches our webhooks
    pub webhook_base_url: String,
    pub request_timeout_secs: u64,
}

impl OrchestratorConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_bind_address: std::env::var("HTTP_BIND")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            platform_base_url: std::env::var("PLATFORM_BASE_URL")
                .unwrap_or_else(|_| "https://voxline.signalwire.com/api".to_string()),
            platform_project_id: std::env::var("PLATFORM_PROJECT_ID").unwrap_or_default(),
            platform_api_token: std::env::var("PLATFORM_API_TOKEN").unwrap_or_default(),
            webhook_base_url: std::env::var("WEBHOOK_BASE_URL")
                .unwrap_or_else(|_| "https://app.voxline.io".to_string()),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|e| VoxlineError::Config(format!("Invalid REQUEST_TIMEOUT_SECS: {}", e)))?,
        })
    }
}
