//! Database service for ticket-service.

use crate::error::AppError;
use crate::models::{NewTicket, Ticket};
use crate::services::metrics::DB_QUERY_DURATION;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "ticket-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health by borrowing a connection for a trivial query.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["health_check"])
            .start_timer();

        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;

        timer.observe_duration();
        Ok(())
    }

    /// Create the `tickets` table if it does not exist. Safe to call
    /// repeatedly.
    #[instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["ensure_schema"])
            .start_timer();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tickets (
                id SERIAL PRIMARY KEY,
                ticket_number VARCHAR(20) UNIQUE NOT NULL,
                title VARCHAR(255) NOT NULL,
                description TEXT,
                status VARCHAR(50) DEFAULT 'new',
                priority VARCHAR(20) DEFAULT 'medium',
                source VARCHAR(50),
                source_identifier VARCHAR(255),
                created_by VARCHAR(255),
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                metadata JSONB DEFAULT '{}'
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to create tickets table: {}", e))
        })?;

        timer.observe_duration();
        info!("Tickets table ensured");

        Ok(())
    }

    /// Insert a ticket and return the stored row. A `ticket_number` minted
    /// in the same millisecond as an existing one violates the UNIQUE
    /// constraint and fails the insert; there is no retry.
    #[instrument(skip(self, input), fields(ticket_number = %input.ticket_number, source = %input.source))]
    pub async fn insert_ticket(&self, input: &NewTicket) -> Result<Ticket, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["insert_ticket"])
            .start_timer();

        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (ticket_number, title, description, source, source_identifier, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, ticket_number, title, description, status, priority, source, source_identifier, created_by, created_at, updated_at, metadata
            "#,
        )
        .bind(&input.ticket_number)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.source)
        .bind(&input.source_identifier)
        .bind(&input.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to insert ticket: {}", e)))?;

        timer.observe_duration();
        info!(id = ticket.id, "Ticket stored");

        Ok(ticket)
    }

    /// All tickets, newest first. No pagination or limit.
    #[instrument(skip(self))]
    pub async fn list_tickets(&self) -> Result<Vec<Ticket>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_tickets"])
            .start_timer();

        let tickets = sqlx::query_as::<_, Ticket>(
            r#"
            SELECT id, ticket_number, title, description, status, priority, source, source_identifier, created_by, created_at, updated_at, metadata
            FROM tickets
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list tickets: {}", e)))?;

        timer.observe_duration();

        Ok(tickets)
    }
}
