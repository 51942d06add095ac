// Database repository for per-user carts

use sqlx::PgPool;

use crate::cart::{
    error::CartError,
    models::{Cart, CartItem},
    pricing,
};
use crate::catalog::models::Product;

const ITEM_COLUMNS: &str = "id, cart_id, product_id, quantity, unit_price";

/// Repository for cart operations, all scoped to one user's cart
#[derive(Clone)]
pub struct CartRepository {
    pool: PgPool,
}

impl CartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up a product for cart operations
    pub async fn find_product(&self, product_id: i32) -> Result<Option<Product>, CartError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, description, price, image_url, category_id, created_at \
             FROM products WHERE id = $1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Find a user's cart
    pub async fn find_cart(&self, user_id: i32) -> Result<Option<Cart>, CartError> {
        let cart =
            sqlx::query_as::<_, Cart>("SELECT id, user_id, created_at FROM carts WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(cart)
    }

    /// All line items in a user's cart; empty when no cart exists yet
    pub async fn find_items(&self, user_id: i32) -> Result<Vec<CartItem>, CartError> {
        let items = sqlx::query_as::<_, CartItem>(
            "SELECT ci.id, ci.cart_id, ci.product_id, ci.quantity, ci.unit_price \
             FROM cart_items ci \
             JOIN carts c ON c.id = ci.cart_id \
             WHERE c.user_id = $1 ORDER BY ci.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Add a product to the user's cart, creating the cart lazily.
    /// The upsert makes concurrent adds of the same product serialize into a
    /// single line item instead of racing a select-then-insert.
    pub async fn add_product(&self, user_id: i32, product: &Product) -> Result<Vec<CartItem>, CartError> {
        let mut tx = self.pool.begin().await?;

        let cart = sqlx::query_as::<_, Cart>(
            "INSERT INTO carts (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING id, user_id, created_at",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO cart_items (cart_id, product_id, quantity, unit_price) \
             VALUES ($1, $2, 1, $3) \
             ON CONFLICT (cart_id, product_id) \
             DO UPDATE SET quantity = cart_items.quantity + 1",
        )
        .bind(cart.id)
        .bind(product.id)
        .bind(product.price)
        .execute(&mut *tx)
        .await?;

        let items = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM cart_items WHERE cart_id = $1 ORDER BY id"
        ))
        .bind(cart.id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(items)
    }

    /// Reduce a line item's quantity by one, removing it at zero
    pub async fn reduce_product(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<Vec<CartItem>, CartError> {
        let mut tx = self.pool.begin().await?;

        let cart = sqlx::query_as::<_, Cart>(
            "SELECT id, user_id, created_at FROM carts WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CartError::CartNotFound)?;

        let item = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM cart_items \
             WHERE cart_id = $1 AND product_id = $2 FOR UPDATE"
        ))
        .bind(cart.id)
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CartError::ItemNotFound(product_id))?;

        match pricing::reduce_quantity(item.quantity) {
            Some(quantity) => {
                sqlx::query("UPDATE cart_items SET quantity = $1 WHERE id = $2")
                    .bind(quantity)
                    .bind(item.id)
                    .execute(&mut *tx)
                    .await?;
            }
            None => {
                sqlx::query("DELETE FROM cart_items WHERE id = $1")
                    .bind(item.id)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        let items = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM cart_items WHERE cart_id = $1 ORDER BY id"
        ))
        .bind(cart.id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(items)
    }

    /// Remove one line item entirely
    pub async fn remove_product(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<Vec<CartItem>, CartError> {
        let cart = self.find_cart(user_id).await?.ok_or(CartError::CartNotFound)?;

        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart.id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CartError::ItemNotFound(product_id));
        }

        let items = sqlx::query_as::<_, CartItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM cart_items WHERE cart_id = $1 ORDER BY id"
        ))
        .bind(cart.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Remove every line item from the user's cart
    pub async fn clear(&self, user_id: i32) -> Result<(), CartError> {
        let cart = self.find_cart(user_id).await?.ok_or(CartError::CartNotFound)?;

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
