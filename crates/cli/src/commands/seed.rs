//! Seed the database with a demo catalog.
//!
//! Inserts a small set of products across a few categories so a fresh
//! install has something to browse. Running it twice inserts the
//! catalog twice; it does not check for existing rows.

use rust_decimal::Decimal;
use secrecy::SecretString;
use tracing::info;

use smartbuy_api::db;
use smartbuy_api::db::products::{NewProduct, ProductRepository};

fn database_url() -> Result<SecretString, Box<dyn std::error::Error>> {
    std::env::var("SMARTBUY_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "SMARTBUY_DATABASE_URL not set".into())
}

/// Seed the demo catalog.
///
/// # Errors
///
/// Returns an error if environment variables are missing or database
/// operations fail.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let repo = ProductRepository::new(&pool);
    let catalog = demo_catalog();
    let count = catalog.len();

    for new in &catalog {
        let product = repo.create(new).await?;
        info!(id = %product.id, name = %product.name, "Inserted product");
    }

    info!("Seeding complete!");
    info!("  Products inserted: {count}");

    Ok(())
}

/// The demo catalog inserted by `seed`.
///
/// Prices are in whole currency units with two decimal places.
fn demo_catalog() -> Vec<NewProduct> {
    fn product(
        name: &str,
        description: &str,
        cents: i64,
        stock: i32,
        category: &str,
    ) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: Some(description.to_string()),
            price: Decimal::new(cents, 2),
            currency: "usd".to_string(),
            stock,
            image_url: None,
            category: Some(category.to_string()),
        }
    }

    vec![
        product(
            "Wireless Headphones",
            "Over-ear Bluetooth headphones with 30-hour battery life.",
            7999,
            40,
            "electronics",
        ),
        product(
            "Mechanical Keyboard",
            "Tenkeyless keyboard with hot-swappable switches.",
            12950,
            25,
            "electronics",
        ),
        product(
            "4K Webcam",
            "Ultra HD webcam with autofocus and a privacy shutter.",
            9900,
            30,
            "electronics",
        ),
        product(
            "Espresso Grinder",
            "Conical burr grinder with 40 grind settings.",
            18500,
            15,
            "kitchen",
        ),
        product(
            "Cast Iron Skillet",
            "Pre-seasoned 12-inch skillet, oven safe to 260C.",
            3499,
            60,
            "kitchen",
        ),
        product(
            "Trail Running Shoes",
            "Lightweight trail shoes with a rock plate and 6mm lugs.",
            11000,
            35,
            "sports",
        ),
        product(
            "Yoga Mat",
            "6mm non-slip mat with alignment markings.",
            2799,
            80,
            "sports",
        ),
        product(
            "Hardcover Notebook",
            "A5 dotted notebook, 192 pages of 120gsm paper.",
            1650,
            120,
            "stationery",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::demo_catalog;

    #[test]
    fn demo_catalog_has_valid_products() {
        let catalog = demo_catalog();
        assert!(!catalog.is_empty());

        for product in &catalog {
            assert!(!product.name.is_empty());
            assert!(product.price > rust_decimal::Decimal::ZERO);
            assert!(product.stock > 0);
            assert_eq!(product.currency, "usd");
        }
    }

    #[test]
    fn demo_catalog_spans_multiple_categories() {
        let catalog = demo_catalog();
        let categories: std::collections::HashSet<_> =
            catalog.iter().filter_map(|p| p.category.as_deref()).collect();
        assert!(categories.len() > 1);
    }
}
