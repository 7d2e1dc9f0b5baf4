use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use novi_agent::{AgentRuntime, AgentRuntimeClient, AgentRuntimeConfig};
use novi_core::{MemoryPqrStore, NoviConfig, PqrStore};

use crate::{apis, envelope};

/// Configuration for the HTTP server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Server bind address (e.g., "127.0.0.1:8080")
    pub address: String,
    /// Process-wide runtime configuration
    pub runtime: NoviConfig,
}

impl ServerConfig {
    pub fn new(address: String, runtime: NoviConfig) -> Self {
        Self { address, runtime }
    }
}

/// Server state holding the read-only configuration and the collaborators.
/// Both seams are trait objects so tests substitute scripted doubles.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<NoviConfig>,
    pub agent: Arc<dyn AgentRuntime>,
    pub store: Arc<dyn PqrStore>,
}

/// Build the gateway router. Pre-flight is answered per route with the exact
/// 204 + CORS contract; `/actions` is only ever called by the agent
/// provider, which sends no pre-flight.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route(
            "/agent",
            post(apis::agent::handle_converse).options(envelope::preflight),
        )
        .route(
            "/pqr",
            post(apis::pqr::handle_create).options(envelope::preflight),
        )
        .route(
            "/pqr/{pqr_id}",
            get(apis::pqr::handle_check).options(envelope::preflight),
        )
        .route("/actions", post(apis::actions::handle_action))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP gateway with the default collaborators: the streaming
/// agent runtime client and the in-process record store.
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let agent = AgentRuntimeClient::new(AgentRuntimeConfig::new(
        config.runtime.agent_endpoint.clone(),
    ))?;

    let state = ServerState {
        config: Arc::new(config.runtime),
        agent: Arc::new(agent),
        store: Arc::new(MemoryPqrStore::new()),
    };

    if state.config.agent_identity().is_none() {
        info!("Agent id/alias not configured; /agent will answer 500 until they are set");
    }

    let listener = tokio::net::TcpListener::bind(&config.address).await?;

    println!("Server starting on \x1b[1mhttp://{}\x1b[0m", config.address);
    println!("\nAvailable endpoints:");
    println!("  \x1b[1mPOST /agent\x1b[0m            - Converse with the Novi agent");
    println!("  \x1b[1mPOST /pqr\x1b[0m              - Create a PQR record");
    println!("  \x1b[1mGET  /pqr/:pqr_id\x1b[0m      - Look up a PQR record");
    println!("  \x1b[1mPOST /actions\x1b[0m          - Agent action-group callback");
    println!("\nPress Ctrl+C to stop\n");

    info!("HTTP gateway listening on {}", config.address);

    // Expose the socket peer so session derivation still works for clients
    // that reach the gateway without a front door.
    axum::serve(
        listener,
        router(state).into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;
    Ok(())
}
