//! Stripe API client.
//!
//! Provides `PaymentIntent` creation and webhook signature verification.

use hmac::{Hmac, Mac};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use tracing::{debug, error, instrument};
use uuid::Uuid;

use smartbuy_core::OrderId;

use super::error::StripeError;
use super::types::{ErrorResponse, PaymentIntent};

/// Stripe API base URL.
const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Maximum age of a webhook timestamp before it is rejected.
const SIGNATURE_TOLERANCE_SECS: i64 = 300;

/// Stripe API client.
#[derive(Clone)]
pub struct StripeClient {
    /// HTTP client.
    client: Client,
    /// Secret API key for authentication.
    secret_key: SecretString,
    /// Signing secret for verifying webhooks.
    webhook_secret: SecretString,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("secret_key", &"[REDACTED]")
            .field("webhook_secret", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl StripeClient {
    /// Create a new Stripe client.
    #[must_use]
    pub fn new(secret_key: SecretString, webhook_secret: SecretString) -> Self {
        Self {
            client: Client::new(),
            secret_key,
            webhook_secret,
        }
    }

    /// Create a `PaymentIntent` for an order.
    ///
    /// `amount_cents` is in the currency's minor unit, per the Stripe API.
    /// The order ID is attached as metadata so the intent can be traced
    /// back from the Stripe dashboard.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or Stripe returns an error.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn create_payment_intent(
        &self,
        amount_cents: i64,
        currency: &str,
        order_id: OrderId,
    ) -> Result<PaymentIntent, StripeError> {
        let params = [
            ("amount", amount_cents.to_string()),
            ("currency", currency.to_string()),
            ("metadata[order_id]", order_id.to_string()),
        ];

        let response = self
            .client
            .post(format!("{STRIPE_API_BASE}/payment_intents"))
            .bearer_auth(self.secret_key.expose_secret())
            .header("Idempotency-Key", Uuid::new_v4().to_string())
            .form(&params)
            .send()
            .await
            .map_err(|e| StripeError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body: ErrorResponse = response
                .json()
                .await
                .map_err(|e| StripeError::Response(e.to_string()))?;

            error!(
                status = %status,
                code = ?body.error.code,
                "Stripe API error creating payment intent"
            );
            return Err(StripeError::Api {
                message: body
                    .error
                    .message
                    .unwrap_or_else(|| "unknown error".to_string()),
                code: body.error.code,
            });
        }

        let intent: PaymentIntent = response
            .json()
            .await
            .map_err(|e| StripeError::Response(e.to_string()))?;

        debug!(intent = %intent.id, status = %intent.status, "payment intent created");

        Ok(intent)
    }

    /// Verify a Stripe webhook signature.
    ///
    /// This implements Stripe's signature verification:
    /// <https://docs.stripe.com/webhooks/signatures>
    ///
    /// # Arguments
    ///
    /// * `header` - The `Stripe-Signature` header value
    /// * `payload` - The raw request body
    ///
    /// # Errors
    ///
    /// Returns error if signature verification fails.
    #[instrument(skip(self, header, payload))]
    pub fn verify_signature(&self, header: &str, payload: &str) -> Result<(), StripeError> {
        let mut timestamp: Option<&str> = None;
        let mut candidates: Vec<&str> = Vec::new();

        // Header format: t=<unix>,v1=<hex>[,v1=<hex>...]
        for part in header.split(',') {
            if let Some((key, value)) = part.trim().split_once('=') {
                match key {
                    "t" => timestamp = Some(value),
                    "v1" => candidates.push(value),
                    _ => {}
                }
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| StripeError::InvalidSignature("missing timestamp".to_string()))?;

        if candidates.is_empty() {
            return Err(StripeError::InvalidSignature(
                "missing v1 signature".to_string(),
            ));
        }

        // Check timestamp to prevent replay attacks
        let ts: i64 = timestamp
            .parse()
            .map_err(|_| StripeError::InvalidSignature("invalid timestamp".to_string()))?;

        let now_secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_err(|e| StripeError::InvalidSignature(e.to_string()))?
            .as_secs();

        let now = i64::try_from(now_secs)
            .map_err(|_| StripeError::InvalidSignature("system time overflow".to_string()))?;

        if (now - ts).abs() > SIGNATURE_TOLERANCE_SECS {
            return Err(StripeError::InvalidSignature(
                "request timestamp too old".to_string(),
            ));
        }

        // Compute expected signature over "<timestamp>.<payload>"
        let signed_payload = format!("{timestamp}.{payload}");

        let mut mac = Hmac::<Sha256>::new_from_slice(self.webhook_secret.expose_secret().as_bytes())
            .map_err(|e| StripeError::InvalidSignature(e.to_string()))?;

        mac.update(signed_payload.as_bytes());

        let expected = hex::encode(mac.finalize().into_bytes());

        // Any matching v1 candidate accepts the payload
        if !candidates
            .iter()
            .any(|candidate| constant_time_compare(&expected, candidate))
        {
            return Err(StripeError::InvalidSignature(
                "signature mismatch".to_string(),
            ));
        }

        debug!("Stripe signature verified");

        Ok(())
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}
