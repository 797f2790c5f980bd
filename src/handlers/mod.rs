pub mod health;
pub mod poll;
pub mod setup;
pub mod tickets;
