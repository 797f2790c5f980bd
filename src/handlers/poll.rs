//! Slack DM ingestion endpoint.
//!
//! On-demand scan: list conversations, keep direct messages, read recent
//! history, and create a ticket for every message containing the trigger
//! phrase. Nothing tracks which messages were already seen, so repeated
//! polls re-create tickets for every still-present match. TODO: persist a
//! per-conversation high-water mark if dedup is ever wanted.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppError;
use crate::models::{
    contains_trigger, mint_ticket_number, truncate_title, NewTicket, SOURCE_SLACK_DM,
};
use crate::services::metrics;
use crate::startup::AppState;

/// At most this many DM conversations are scanned per poll.
const DM_SCAN_LIMIT: usize = 3;
/// Messages fetched per conversation.
const HISTORY_FETCH_LIMIT: u32 = 10;

/// Poll result. `scanned` counts all DM conversations found, including any
/// beyond the scan cap.
#[derive(Debug, Serialize)]
pub struct PollSummary {
    pub scanned: usize,
    #[serde(rename = "newTickets")]
    pub new_tickets: usize,
}

#[tracing::instrument(skip(state))]
pub async fn poll_slack(State(state): State<AppState>) -> Result<Json<PollSummary>, AppError> {
    match scan_direct_messages(&state).await {
        Ok(summary) => {
            metrics::record_slack_poll("completed");
            tracing::info!(
                scanned = summary.scanned,
                new_tickets = summary.new_tickets,
                "Slack poll completed"
            );
            Ok(Json(summary))
        }
        Err(e) => {
            metrics::record_slack_poll("failed");
            Err(e)
        }
    }
}

/// Sequential scan; any failure aborts the whole poll and tickets already
/// inserted stay in place.
async fn scan_direct_messages(state: &AppState) -> Result<PollSummary, AppError> {
    let conversations = state
        .slack
        .list_conversations()
        .await
        .map_err(AppError::SlackError)?;

    let dms: Vec<_> = conversations.into_iter().filter(|c| c.is_im).collect();
    let scanned = dms.len();
    let mut new_tickets = 0;

    for dm in dms.iter().take(DM_SCAN_LIMIT) {
        let messages = state
            .slack
            .conversation_history(&dm.id, HISTORY_FETCH_LIMIT)
            .await
            .map_err(AppError::SlackError)?;

        for message in &messages {
            let Some(text) = message.text.as_deref() else {
                continue;
            };
            if !contains_trigger(text) {
                continue;
            }

            let input = NewTicket {
                ticket_number: mint_ticket_number(),
                title: truncate_title(text),
                description: Some(text.to_string()),
                source: SOURCE_SLACK_DM.to_string(),
                source_identifier: dm.name.clone(),
                created_by: message.user.clone(),
            };

            let ticket = state.db.insert_ticket(&input).await?;
            metrics::record_ticket_created(SOURCE_SLACK_DM);
            new_tickets += 1;

            tracing::info!(
                ticket_number = %ticket.ticket_number,
                channel = %dm.id,
                "Ticket created from Slack DM"
            );
        }
    }

    Ok(PollSummary {
        scanned,
        new_tickets,
    })
}
