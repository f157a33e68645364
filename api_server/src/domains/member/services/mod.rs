// Member domain services
pub mod member_service;
pub mod onboarding_service;
pub mod state;

pub use member_service::*;
pub use onboarding_service::*;
pub use state::*;
