//! Ticket creation and listing endpoints.

use axum::{extract::State, Json};

use crate::error::AppError;
use crate::models::{mint_ticket_number, CreateTicketRequest, NewTicket, Ticket, SOURCE_MANUAL};
use crate::services::metrics;
use crate::startup::AppState;

/// Create a ticket from a request body. `source` defaults to "manual"; no
/// validation beyond the typed body — the schema's constraints are the only
/// gate.
#[tracing::instrument(skip(state, request))]
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(request): Json<CreateTicketRequest>,
) -> Result<Json<Ticket>, AppError> {
    let input = NewTicket {
        ticket_number: mint_ticket_number(),
        title: request.title,
        description: request.description,
        source: request.source.unwrap_or_else(|| SOURCE_MANUAL.to_string()),
        source_identifier: None,
        created_by: None,
    };

    let ticket = state.db.insert_ticket(&input).await?;
    metrics::record_ticket_created(&input.source);

    tracing::info!(
        ticket_number = %ticket.ticket_number,
        source = %input.source,
        "Ticket created"
    );

    Ok(Json(ticket))
}

/// All tickets, newest first. Unbounded.
#[tracing::instrument(skip(state))]
pub async fn list_tickets(State(state): State<AppState>) -> Result<Json<Vec<Ticket>>, AppError> {
    let tickets = state.db.list_tickets().await?;
    Ok(Json(tickets))
}
