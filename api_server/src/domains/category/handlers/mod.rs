// Category domain handlers
pub mod category_handler;

pub use category_handler::*;
