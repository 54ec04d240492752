//! Domain models for the SmartBuy API.
//!
//! Row types derive `sqlx::FromRow` and are never serialized to clients
//! directly; the route modules define separate request/response DTOs.

pub mod card;
pub mod chat;
pub mod customer;
pub mod order;
pub mod payment;
pub mod product;
pub mod review;
pub mod session;
pub mod shipment;
pub mod wishlist;

pub use session::{CurrentCustomer, keys as session_keys};
