// Shared services
pub mod app_state;
pub mod image_service;

pub use app_state::*;
pub use image_service::*;
