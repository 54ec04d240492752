//! Session authentication handlers.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use smartbuy_core::CustomerId;

use crate::error::{AppError, Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_customer, set_current_customer};
use crate::models::CurrentCustomer;
use crate::models::customer::Customer;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Customer details returned after register/login.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: CustomerId,
    pub email: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            email: customer.email.into_inner(),
            full_name: customer.full_name,
            created_at: customer.created_at,
        }
    }
}

/// Handle registration: create the account and log the customer in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<CustomerResponse>)> {
    let auth = AuthService::new(state.pool());
    let customer = auth
        .register(&req.email, &req.password, &req.full_name)
        .await?;

    establish_session(&session, &customer).await?;
    add_breadcrumb("auth", "Customer registered", None);

    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Handle login: verify credentials and establish the session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> Result<Json<CustomerResponse>> {
    let auth = AuthService::new(state.pool());
    let customer = auth.login(&req.email, &req.password).await?;

    establish_session(&session, &customer).await?;
    add_breadcrumb("auth", "Customer logged in", None);

    Ok(Json(customer.into()))
}

/// Handle logout: drop the session.
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_customer(&session)
        .await
        .map_err(|err| AppError::Internal(err.to_string()))?;
    session
        .flush()
        .await
        .map_err(|err| AppError::Internal(err.to_string()))?;

    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}

async fn establish_session(session: &Session, customer: &Customer) -> Result<()> {
    let current = CurrentCustomer {
        id: customer.id,
        email: customer.email.clone(),
    };
    set_current_customer(session, &current)
        .await
        .map_err(|err| AppError::Internal(err.to_string()))?;

    set_sentry_user(&customer.id, Some(customer.email.as_str()));

    Ok(())
}
