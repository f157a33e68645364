//! Ticket API: social login onboarding, member/category directory and ticket queries

pub mod config;
pub mod domains;
pub mod routes;
pub mod shared;

pub use config::Config;
pub use routes::create_router;
pub use shared::services::AppState;
