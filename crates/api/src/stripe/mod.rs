//! Stripe integration for payments.
//!
//! This module provides:
//! - [`StripeClient`] for creating `PaymentIntent`s
//! - Webhook signature verification
//! - The minimal API types the service reads
//!
//! # Flow
//!
//! 1. The frontend requests a `PaymentIntent` for a placed order
//! 2. The intent is recorded in the `payment` table and the
//!    `client_secret` is returned to the frontend
//! 3. The customer confirms the payment with Stripe directly
//! 4. Stripe calls the webhook; the handler verifies the signature and
//!    marks the payment and order as paid

mod client;
mod error;
mod types;

pub use client::StripeClient;
pub use error::StripeError;
pub use types::{EventObject, PaymentIntent, WebhookEvent, WebhookEventData};
