// Shared errors
pub mod error_code;
pub mod auth_error;
pub mod member_error;
pub mod category_error;
pub mod image_error;
pub mod ticket_error;

pub use error_code::*;
pub use auth_error::*;
pub use member_error::*;
pub use category_error::*;
pub use image_error::*;
pub use ticket_error::*;
