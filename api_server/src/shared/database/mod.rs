// Database module
pub mod connection;
pub mod constraint;
pub mod repositories;

pub use connection::*;
pub use constraint::*;
pub use repositories::*;
