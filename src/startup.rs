//! Application startup and lifecycle management.

use crate::config::TicketConfig;
use crate::error::AppError;
use crate::handlers::{health, poll, setup, tickets};
use crate::middleware::{http_metrics_middleware, request_id_middleware};
use crate::services::{get_metrics, Database, SlackClient};
use axum::{
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: TicketConfig,
    pub db: Database,
    pub slack: SlackClient,
}

/// Prometheus metrics endpoint.
async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration: connect the
    /// pool, set up the Slack client, bind the listener (port 0 = random
    /// port for testing).
    pub async fn build(config: TicketConfig) -> Result<Self, AppError> {
        let db = Database::new(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            e
        })?;

        let slack = SlackClient::new(config.slack.clone());
        if slack.is_configured() {
            tracing::info!("Slack client initialized");
        } else {
            tracing::warn!("SLACK_USER_TOKEN not set - /poll-slack will fail until it is");
        }

        let state = AppState {
            config: config.clone(),
            db,
            slack,
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %addr, "Failed to bind listener");
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, "Ticket service listener bound");

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &Database {
        &self.state.db
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = Router::new()
            .route("/health", get(health::health_check))
            .route("/ready", get(health::readiness_check))
            .route("/metrics", get(metrics_endpoint))
            .route("/setup", post(setup::setup_tables))
            .route(
                "/api/tickets",
                post(tickets::create_ticket).get(tickets::list_tickets),
            )
            .route("/poll-slack", get(poll::poll_slack))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(http_metrics_middleware))
            .layer(middleware::from_fn(request_id_middleware))
            .with_state(self.state);

        tracing::info!(
            service = "ticket-service",
            version = env!("CARGO_PKG_VERSION"),
            port = self.port,
            "Service ready to accept connections"
        );

        axum::serve(self.listener, router).await.map_err(|e| {
            tracing::error!(error = %e, "HTTP server error");
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}
