// Domain modules
pub mod auth;
pub mod member;
pub mod category;
pub mod ticket;
