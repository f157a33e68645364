// Shared utilities
pub mod multipart;

pub use multipart::*;
