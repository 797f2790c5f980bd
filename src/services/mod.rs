pub mod database;
pub mod metrics;
pub mod slack;

pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
pub use slack::SlackClient;
