//! Stripe-related errors.

use thiserror::Error;

/// Errors that can occur when interacting with Stripe.
#[derive(Debug, Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("Stripe request failed: {0}")]
    Request(String),

    /// Failed to parse response.
    #[error("Stripe response error: {0}")]
    Response(String),

    /// Stripe API returned an error.
    #[error("Stripe API error: {message}")]
    Api {
        /// Human-readable message from Stripe.
        message: String,
        /// Machine-readable error code, when present.
        code: Option<String>,
    },

    /// Invalid webhook signature.
    #[error("invalid Stripe signature: {0}")]
    InvalidSignature(String),
}
