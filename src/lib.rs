//! Ticket-tracking backend: HTTP API over a Postgres `tickets` table plus an
//! on-demand Slack DM poller that turns trigger-phrase messages into tickets.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
