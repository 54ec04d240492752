//! Customer account management.

use secrecy::SecretString;
use tracing::info;

use smartbuy_api::db;
use smartbuy_api::services::auth::AuthService;

fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    std::env::var("SMARTBUY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "SMARTBUY_DATABASE_URL not set".into())
}

/// Create a customer account.
///
/// The password is hashed with the same Argon2id settings the API uses,
/// so accounts created here can log in through `/login`.
///
/// # Errors
///
/// Returns an error if environment variables are missing, validation
/// fails, or the email is already registered.
pub async fn create(
    email: &str,
    full_name: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let customer = AuthService::new(&pool)
        .register(email, password, full_name)
        .await?;

    info!(id = %customer.id, email = %customer.email, "Customer created");

    Ok(())
}
