//! Business logic services.

pub mod auth;
pub mod chat;
pub mod sync;
