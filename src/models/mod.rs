pub mod ticket;

pub use ticket::{
    contains_trigger, mint_ticket_number, truncate_title, CreateTicketRequest, NewTicket, Ticket,
    SOURCE_MANUAL, SOURCE_SLACK_DM,
};
