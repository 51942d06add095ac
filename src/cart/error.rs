use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for cart operations
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cart not found")]
    CartNotFound,

    #[error("Product not found: {0}")]
    ProductNotFound(i32),

    #[error("Product {0} is not in the cart")]
    ItemNotFound(i32),
}

impl From<sqlx::Error> for CartError {
    fn from(err: sqlx::Error) -> Self {
        CartError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            CartError::DatabaseError(msg) => {
                tracing::error!("Database error in cart: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            CartError::CartNotFound => (StatusCode::NOT_FOUND, "Cart not found".to_string()),
            CartError::ProductNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Product with id {} not found", id),
            ),
            CartError::ItemNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Product with id {} is not in the cart", id),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
