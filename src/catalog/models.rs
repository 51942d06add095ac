// Catalog data models and DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Category database model
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Category response including the ids of its products
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub products: Vec<i32>,
    pub created_at: DateTime<Utc>,
}

impl CategoryResponse {
    pub fn new(category: Category, products: Vec<i32>) -> Self {
        Self {
            id: category.id,
            name: category.name,
            products,
            created_at: category.created_at,
        }
    }
}

/// Request DTO for creating a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 2, message = "Category name must be at least 2 characters"))]
    pub name: String,
}

/// Product database model
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub description: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub image_url: String,
    pub category_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Fields of a new product parsed from the multipart form
#[derive(Debug)]
pub struct NewProduct {
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
}
