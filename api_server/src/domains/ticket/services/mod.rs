// Ticket domain services
pub mod ticket_service;
pub mod state;

pub use ticket_service::*;
pub use state::*;
