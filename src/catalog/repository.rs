// Database repositories for categories and products

use sqlx::PgPool;

use crate::catalog::models::{Category, NewProduct, Product};
use crate::error::ApiError;

const PRODUCT_COLUMNS: &str = "id, description, price, image_url, category_id, created_at";

/// Repository for category operations
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a category; duplicate names surface as a conflict
    pub async fn create(&self, name: &str) -> Result<Category, ApiError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return ApiError::Conflict {
                        message: format!("Category with name '{}' already exists", name),
                    };
                }
            }
            ApiError::DatabaseError(e)
        })?;

        Ok(category)
    }

    pub async fn find_all(&self) -> Result<Vec<Category>, ApiError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Category>, ApiError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Ids of the products belonging to a category
    pub async fn product_ids(&self, category_id: i32) -> Result<Vec<i32>, ApiError> {
        let ids: Vec<i32> =
            sqlx::query_scalar("SELECT id FROM products WHERE category_id = $1 ORDER BY id")
                .bind(category_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(ids)
    }
}

/// Repository for product operations
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a product under an existing category
    pub async fn create(
        &self,
        category_id: i32,
        new_product: &NewProduct,
    ) -> Result<Product, ApiError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (description, price, image_url, category_id) \
             VALUES ($1, $2, $3, $4) RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&new_product.description)
        .bind(new_product.price)
        .bind(&new_product.image_url)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn find_all(&self) -> Result<Vec<Product>, ApiError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn find_by_category(&self, category_id: i32) -> Result<Vec<Product>, ApiError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE category_id = $1 ORDER BY id"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Delete a product, scoped to the category it was created under.
    /// Returns false when no matching row existed.
    pub async fn delete(&self, product_id: i32, category_id: i32) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1 AND category_id = $2")
            .bind(product_id)
            .bind(category_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
