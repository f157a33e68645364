// Member domain models
pub mod member;

pub use member::*;
