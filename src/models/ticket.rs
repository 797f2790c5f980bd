//! Ticket row type, request DTOs, and the small helpers around ticket
//! numbering and Slack message matching.

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Origin tag for tickets created through the API.
pub const SOURCE_MANUAL: &str = "manual";
/// Origin tag for tickets created by the Slack DM poller.
pub const SOURCE_SLACK_DM: &str = "slack-dm";

/// Case-insensitive phrase that turns a DM into a ticket.
pub const TRIGGER_PHRASE: &str = "new task";

/// Titles synthesized from messages are cut to this many characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// A row in the `tickets` table. Columns with schema defaults are nullable
/// at the storage level, hence the Options.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: i32,
    pub ticket_number: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub source: Option<String>,
    pub source_identifier: Option<String>,
    pub created_by: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub metadata: Option<serde_json::Value>,
}

/// Request body for POST /api/tickets.
#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub title: String,
    pub description: Option<String>,
    pub source: Option<String>,
}

/// Input for inserting a ticket row.
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub ticket_number: String,
    pub title: String,
    pub description: Option<String>,
    pub source: String,
    pub source_identifier: Option<String>,
    pub created_by: Option<String>,
}

/// Mint a human-facing ticket number: `TK-` plus the current Unix time in
/// milliseconds. Two mints within the same millisecond collide; the UNIQUE
/// constraint on the column rejects the second insert.
pub fn mint_ticket_number() -> String {
    format!("TK-{}", Utc::now().timestamp_millis())
}

/// True when the text contains the trigger phrase, case-insensitively.
pub fn contains_trigger(text: &str) -> bool {
    text.to_lowercase().contains(TRIGGER_PHRASE)
}

/// First [`TITLE_MAX_CHARS`] characters of the text, for use as a title.
pub fn truncate_title(text: &str) -> String {
    text.chars().take(TITLE_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_number_is_prefix_plus_digits() {
        let number = mint_ticket_number();
        assert!(number.starts_with("TK-"));
        assert!(number[3..].chars().all(|c| c.is_ascii_digit()));
        assert!(number[3..].len() >= 13);
    }

    #[test]
    fn trigger_matches_case_insensitively() {
        assert!(contains_trigger("new task"));
        assert!(contains_trigger("please file a NEW TASK for this"));
        assert!(contains_trigger("New Task: fix the login page"));
    }

    #[test]
    fn trigger_is_a_plain_substring_match() {
        // "new tasks" contains "new task"; matching is substring-based.
        assert!(contains_trigger("new tasks are piling up"));
        assert!(!contains_trigger("newtask"));
        assert!(!contains_trigger("nothing to see here"));
        assert!(!contains_trigger(""));
    }

    #[test]
    fn short_titles_pass_through_untouched() {
        assert_eq!(truncate_title("fix the build"), "fix the build");
        assert_eq!(truncate_title(""), "");
    }

    #[test]
    fn long_titles_are_cut_to_the_limit() {
        let text = "x".repeat(250);
        let title = truncate_title(&text);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS);
        assert_eq!(title, "x".repeat(TITLE_MAX_CHARS));
    }

    #[test]
    fn truncation_never_splits_a_code_point() {
        let text = "é".repeat(150);
        let title = truncate_title(&text);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS);
        assert_eq!(title, "é".repeat(TITLE_MAX_CHARS));
    }
}
