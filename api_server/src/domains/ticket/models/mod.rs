// Ticket domain models
pub mod ticket;
pub mod filter;
pub mod statistics;

pub use ticket::*;
pub use filter::*;
pub use statistics::*;
