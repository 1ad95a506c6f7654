// MindCare - Triage Server Module
// HTTP daemon serving many independent conversations

mod handlers;
mod session;

pub use handlers::{
    create_router, health_check, metrics_endpoint, CreatedSession, HealthStatus, Resources,
    TurnRequest, TurnResponse,
};
pub use session::{SessionEntry, SessionManager, SharedEntry};

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::trace::TraceLayer;

use crate::config::{Config, ServerConfig};
use crate::metrics::TriageMetrics;
use crate::providers::ReplyGenerator;
use crate::triage::TriageEngine;

/// Main triage server structure
pub struct TriageServer {
    /// Stateless pipeline (shared across sessions)
    engine: Arc<TriageEngine>,
    /// Optional generative collaborator (shared)
    generator: Option<Arc<dyn ReplyGenerator>>,
    /// Session manager
    session_manager: Arc<SessionManager>,
    metrics: Arc<TriageMetrics>,
    /// Server configuration
    config: ServerConfig,
    started_at: Instant,
}

impl TriageServer {
    /// Create a new triage server. Must be called inside a tokio runtime.
    pub fn new(
        config: &Config,
        engine: TriageEngine,
        generator: Option<Box<dyn ReplyGenerator>>,
    ) -> Result<Self> {
        let server_config = config.server.clone();
        let session_manager = SessionManager::new(
            server_config.max_sessions,
            server_config.session_timeout_minutes,
            config.seed,
        );

        Ok(Self {
            engine: Arc::new(engine),
            generator: generator.map(Arc::from),
            session_manager: Arc::new(session_manager),
            metrics: Arc::new(TriageMetrics::new()?),
            config: server_config,
            started_at: Instant::now(),
        })
    }

    /// Start the HTTP server
    pub async fn serve(self) -> Result<()> {
        let addr: SocketAddr = self
            .config
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.config.bind_address))?;

        // Create application state
        let app_state = Arc::new(self);

        // Build router
        let app = create_router(app_state).layer(TraceLayer::new_for_http());

        tracing::info!("Starting MindCare triage server on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    pub fn engine(&self) -> &TriageEngine {
        &self.engine
    }

    pub fn generator(&self) -> Option<&Arc<dyn ReplyGenerator>> {
        self.generator.as_ref()
    }

    /// Get reference to session manager
    pub fn session_manager(&self) -> &Arc<SessionManager> {
        &self.session_manager
    }

    pub fn metrics(&self) -> &Arc<TriageMetrics> {
        &self.metrics
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    fn refresh_session_gauge(&self) {
        self.metrics
            .set_active_sessions(self.session_manager.active_count());
    }
}
