// Cart data models and DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::cart::pricing;

/// Cart database model, one row per user
#[derive(Debug, Clone, FromRow)]
pub struct Cart {
    pub id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Cart line item database model
#[derive(Debug, Clone, FromRow)]
pub struct CartItem {
    pub id: i32,
    pub cart_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Line item response with its computed line total
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub product_id: i32,
    pub quantity: i32,
    #[schema(value_type = f64)]
    pub unit_price: Decimal,
    #[schema(value_type = f64)]
    pub line_total: Decimal,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        let line_total = pricing::line_total(item.unit_price, item.quantity);
        Self {
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total,
        }
    }
}

/// Cart response with line items and the computed total
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    #[schema(value_type = f64)]
    pub total: Decimal,
}

impl CartResponse {
    /// Build the response from raw line items, computing the total
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let total = pricing::cart_total(&items);
        Self {
            items: items.into_iter().map(CartItemResponse::from).collect(),
            total,
        }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Decimal::ZERO,
        }
    }
}
