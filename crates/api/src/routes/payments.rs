//! Payment handlers: intent creation and the Stripe webhook.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use smartbuy_core::{CurrencyCode, OrderId, OrderStatus, PaymentStatus, Price};

use crate::db::orders::OrderRepository;
use crate::db::payments::PaymentRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::RequireAuth;
use crate::state::AppState;
use crate::stripe::{EventObject, WebhookEvent};

/// Request body for creating a payment intent.
#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub order_id: OrderId,
}

/// Response carrying the client secret the SPA hands to Stripe.js.
#[derive(Debug, Serialize)]
pub struct IntentResponse {
    pub payment_intent_id: String,
    pub client_secret: String,
    pub status: String,
}

/// Create a Stripe `PaymentIntent` for one of the customer's orders.
///
/// Records a `payment` row in `requires_payment` and returns the client
/// secret. The order total must already be set, so this is normally
/// called after checkout.
pub async fn create_intent(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Json(req): Json<CreateIntentRequest>,
) -> Result<(StatusCode, Json<IntentResponse>)> {
    let pool = state.pool();
    let order = OrderRepository::new(pool)
        .get_for_customer(req.order_id, customer.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {}", req.order_id)))?;

    let price = Price::new(order.total, CurrencyCode::USD);
    let amount_cents = price
        .to_cents()
        .map_err(|err| AppError::BadRequest(format!("order total not chargeable: {err}")))?;
    if amount_cents == 0 {
        return Err(AppError::BadRequest(
            "order total must be greater than zero".to_string(),
        ));
    }

    let currency = price.currency_code.as_lowercase();
    let intent = state
        .stripe()
        .create_payment_intent(amount_cents, currency, order.id)
        .await?;

    PaymentRepository::new(pool)
        .create(order.id, &intent.id, order.total, currency)
        .await?;

    add_breadcrumb(
        "payments",
        "Created payment intent",
        Some(&[("order_id", &order.id.to_string())]),
    );

    Ok((
        StatusCode::CREATED,
        Json(IntentResponse {
            payment_intent_id: intent.id,
            client_secret: intent.client_secret,
            status: intent.status,
        }),
    ))
}

/// Handle a Stripe webhook delivery.
///
/// The raw body is needed for signature verification, so this handler
/// takes the payload as a `String` rather than deserializing up front.
/// On `payment_intent.succeeded` the payment row is marked succeeded and
/// its order paid; every other event type is acknowledged and ignored.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: String,
) -> Result<StatusCode> {
    let signature = headers
        .get("Stripe-Signature")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("missing Stripe-Signature header".to_string()))?;

    state.stripe().verify_signature(signature, &payload)?;

    let event: WebhookEvent = serde_json::from_str(&payload)
        .map_err(|err| AppError::BadRequest(format!("malformed webhook payload: {err}")))?;

    match event.event_type.as_str() {
        "payment_intent.succeeded" => {
            let object: EventObject = serde_json::from_value(event.data.object)
                .map_err(|err| AppError::BadRequest(format!("malformed event object: {err}")))?;

            let payment = PaymentRepository::new(state.pool())
                .set_status_by_intent(&object.id, PaymentStatus::Succeeded)
                .await?;
            OrderRepository::new(state.pool())
                .set_status(payment.order_id, OrderStatus::Paid)
                .await?;

            info!(
                order_id = %payment.order_id,
                payment_intent = %object.id,
                "Payment succeeded"
            );
        }
        other => {
            debug!(event_type = other, event_id = %event.id, "Ignoring webhook event");
        }
    }

    Ok(StatusCode::OK)
}
