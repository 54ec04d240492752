//! Stripe API types.
//!
//! Only the fields this service reads are modeled; Stripe responses carry
//! many more, which serde ignores.

use serde::Deserialize;

/// A `PaymentIntent` as returned by the Stripe API.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    /// Intent identifier (`pi_...`).
    pub id: String,
    /// Secret handed to the frontend to confirm the payment.
    pub client_secret: String,
    /// Intent status as reported by Stripe.
    pub status: String,
}

/// Error envelope returned by the Stripe API on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ApiErrorBody,
}

/// The `error` object inside a Stripe error response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
    pub code: Option<String>,
}

/// A webhook event envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Event identifier (`evt_...`).
    pub id: String,
    /// Event type, e.g. `payment_intent.succeeded`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event payload.
    pub data: WebhookEventData,
}

/// The `data` member of a webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventData {
    /// The API object the event describes, left untyped because each
    /// event type carries a different object.
    pub object: serde_json::Value,
}

/// The subset of an event object shared by all Stripe resources.
#[derive(Debug, Clone, Deserialize)]
pub struct EventObject {
    /// Resource identifier.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_payment_intent() {
        let json = r#"{
            "id": "pi_123",
            "client_secret": "pi_123_secret_456",
            "status": "requires_payment_method",
            "amount": 1999,
            "currency": "usd"
        }"#;

        let intent: PaymentIntent = serde_json::from_str(json).expect("deserialize");
        assert_eq!(intent.id, "pi_123");
        assert_eq!(intent.client_secret, "pi_123_secret_456");
        assert_eq!(intent.status, "requires_payment_method");
    }

    #[test]
    fn test_deserialize_webhook_event() {
        let json = r#"{
            "id": "evt_1",
            "type": "payment_intent.succeeded",
            "data": { "object": { "id": "pi_123", "status": "succeeded" } }
        }"#;

        let event: WebhookEvent = serde_json::from_str(json).expect("deserialize");
        assert_eq!(event.event_type, "payment_intent.succeeded");

        let object: EventObject =
            serde_json::from_value(event.data.object).expect("event object");
        assert_eq!(object.id, "pi_123");
    }
}
