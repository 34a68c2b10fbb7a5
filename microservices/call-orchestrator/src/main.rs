//! Call Orchestrator Microservice
//!
//! Translates tenant call-handling configuration (AI receptionist, IVR menus,
//! call queues, voicemail, forwarding) into call-flow documents, assigns them
//! to phone numbers on the telephony platform, and sends outbound SMS with
//! segment-accurate billing counts.

use std::sync::Arc;

use voxline_core::{
    DependencyStatus, HealthStatus, MicroserviceRuntime, ReadinessStatus, Result, VoxlineService,
};
use tracing::info;

mod client;
mod config;
mod error;
mod flows;
mod handlers;

pub use client::TelephonyClient;
pub use config::OrchestratorConfig;
pub use flows::{FlowRegistry, FlowRequest};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: FlowRegistry,
    pub client: Arc<TelephonyClient>,
    pub config: Arc<OrchestratorConfig>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("call_orchestrator=debug".parse().unwrap()),
        )
        .json()
        .init();

    info!("Starting call-orchestrator microservice");

    let service = Arc::new(CallOrchestratorService::new()?);
    MicroserviceRuntime::run(service).await
}

/// Call Orchestrator service implementation
pub struct CallOrchestratorService {
    state: AppState,
    start_time: std::time::Instant,
}

impl CallOrchestratorService {
    pub fn new() -> Result<Self> {
        let config = OrchestratorConfig::from_env()?;

        info!(
            platform_base_url = %config.platform_base_url,
            "Initializing call orchestrator"
        );

        let client = Arc::new(TelephonyClient::new(&config));
        let state = AppState {
            registry: FlowRegistry::new(),
            client,
            config: Arc::new(config),
        };

        Ok(Self {
            state,
            start_time: std::time::Instant::now(),
        })
    }

    fn router(&self) -> axum::Router {
        use axum::routing::{get, post, put};

        axum::Router::new()
            // Health endpoints
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::ready_check))
            // Flow endpoints
            .route("/api/v1/flows/preview", post(handlers::preview_flow))
            .route("/api/v1/numbers", get(handlers::list_flows))
            .route(
                "/api/v1/numbers/{number}/flow",
                put(handlers::assign_flow)
                    .get(handlers::get_flow)
                    .delete(handlers::delete_flow),
            )
            // Call endpoints
            .route("/api/v1/calls", post(handlers::create_call))
            // SMS endpoints
            .route("/api/v1/sms", post(handlers::send_sms))
            .route("/api/v1/sms/estimate", post(handlers::estimate_sms))
            .with_state(self.state.clone())
    }
}

#[async_trait::async_trait]
impl VoxlineService for CallOrchestratorService {
    fn service_id(&self) -> &'static str {
        "call-orchestrator"
    }

    async fn health(&self) -> HealthStatus {
        HealthStatus {
            healthy: true,
            service_id: self.service_id().to_string(),
            version: self.version().to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    async fn ready(&self) -> ReadinessStatus {
        ReadinessStatus {
            ready: true,
            dependencies: vec![DependencyStatus {
                name: "telephony_platform".to_string(),
                available: self.state.client.health_check().await.is_ok(),
                latency_ms: None,
            }],
        }
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Shutting down call orchestrator");
        Ok(())
    }

    async fn start(&self) -> Result<()> {
        info!(
            http_addr = %self.state.config.http_bind_address,
            "Starting call orchestrator HTTP server"
        );

        let app = self.router();
        let listener =
            tokio::net::TcpListener::bind(&self.state.config.http_bind_address).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
