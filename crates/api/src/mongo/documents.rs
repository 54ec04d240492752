//! BSON document builders for the mirror collections.
//!
//! Every document is keyed by the Postgres integer primary key as `_id`.
//! Decimals are rendered as strings to keep their exact value; timestamps
//! are rendered as RFC 3339 strings.

use mongodb::bson::{Document, doc};

use crate::models::order::{Order, OrderItem};
use crate::models::product::Product;
use crate::models::review::Review;
use crate::models::shipment::Shipment;

/// Build the mirror document for a product.
#[must_use]
pub fn product(product: &Product) -> Document {
    doc! {
        "_id": product.id.as_i32(),
        "name": &product.name,
        "description": product.description.as_deref(),
        "price": product.price.to_string(),
        "currency": &product.currency,
        "stock": product.stock,
        "image_url": product.image_url.as_deref(),
        "category": product.category.as_deref(),
        "created_at": product.created_at.to_rfc3339(),
        "updated_at": product.updated_at.to_rfc3339(),
    }
}

/// Build the mirror document for an order with its items embedded.
#[must_use]
pub fn order(order: &Order, items: &[OrderItem]) -> Document {
    let items: Vec<Document> = items
        .iter()
        .map(|item| {
            doc! {
                "id": item.id.as_i32(),
                "product_id": item.product_id.as_i32(),
                "quantity": item.quantity,
                "unit_price": item.unit_price.to_string(),
            }
        })
        .collect();

    doc! {
        "_id": order.id.as_i32(),
        "customer_id": order.customer_id.as_i32(),
        "status": order.status.to_string(),
        "total": order.total.to_string(),
        "items": items,
        "created_at": order.created_at.to_rfc3339(),
        "updated_at": order.updated_at.to_rfc3339(),
    }
}

/// Build the mirror document for a review.
#[must_use]
pub fn review(review: &Review) -> Document {
    doc! {
        "_id": review.id.as_i32(),
        "product_id": review.product_id.as_i32(),
        "customer_id": review.customer_id.as_i32(),
        "rating": review.rating,
        "comment": review.comment.as_deref(),
        "created_at": review.created_at.to_rfc3339(),
        "updated_at": review.updated_at.to_rfc3339(),
    }
}

/// Build the mirror document for a shipment.
#[must_use]
pub fn shipment(shipment: &Shipment) -> Document {
    doc! {
        "_id": shipment.id.as_i32(),
        "order_id": shipment.order_id.as_i32(),
        "address": &shipment.address,
        "city": &shipment.city,
        "country": &shipment.country,
        "postal_code": &shipment.postal_code,
        "status": shipment.status.to_string(),
        "shipped_at": shipment.shipped_at.map(|t| t.to_rfc3339()),
        "created_at": shipment.created_at.to_rfc3339(),
        "updated_at": shipment.updated_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use smartbuy_core::{CustomerId, OrderId, OrderItemId, OrderStatus, ProductId};

    use super::*;

    #[test]
    fn test_product_document_keyed_by_id() {
        let now = Utc::now();
        let p = Product {
            id: ProductId::new(7),
            name: "Widget".to_string(),
            description: None,
            price: Decimal::new(1999, 2),
            currency: "usd".to_string(),
            stock: 3,
            image_url: None,
            category: Some("tools".to_string()),
            created_at: now,
            updated_at: now,
        };

        let document = product(&p);
        assert_eq!(document.get_i32("_id").expect("_id"), 7);
        assert_eq!(document.get_str("price").expect("price"), "19.99");
        assert!(document.get("description").expect("description").as_null().is_some());
    }

    #[test]
    fn test_order_document_embeds_items() {
        let now = Utc::now();
        let o = Order {
            id: OrderId::new(1),
            customer_id: CustomerId::new(2),
            status: OrderStatus::Placed,
            total: Decimal::new(500, 2),
            created_at: now,
            updated_at: now,
        };
        let items = vec![OrderItem {
            id: OrderItemId::new(10),
            order_id: o.id,
            product_id: ProductId::new(7),
            quantity: 1,
            unit_price: Decimal::new(500, 2),
        }];

        let document = order(&o, &items);
        assert_eq!(document.get_str("status").expect("status"), "placed");
        assert_eq!(document.get_array("items").expect("items").len(), 1);
    }
}
