// Member repositories
pub mod member_repository;
pub mod onboarding_repository;

pub use member_repository::*;
pub use onboarding_repository::*;
