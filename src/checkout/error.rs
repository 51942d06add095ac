use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for payment initialization and checkout
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cart not found")]
    CartNotFound,

    #[error("Cart is empty")]
    CartEmpty,

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    #[error("Cart total cannot be charged")]
    InvalidAmount,

    #[error("Payment gateway error: {0}")]
    Gateway(#[from] crate::checkout::gateway::GatewayError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(err: sqlx::Error) -> Self {
        CheckoutError::DatabaseError(err.to_string())
    }
}

impl From<crate::cart::CartError> for CheckoutError {
    fn from(err: crate::cart::CartError) -> Self {
        match err {
            crate::cart::CartError::CartNotFound => CheckoutError::CartNotFound,
            crate::cart::CartError::DatabaseError(msg) => CheckoutError::DatabaseError(msg),
            other => CheckoutError::DatabaseError(other.to_string()),
        }
    }
}

impl IntoResponse for CheckoutError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            CheckoutError::DatabaseError(msg) => {
                tracing::error!("Database error in checkout: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            CheckoutError::CartNotFound => (StatusCode::NOT_FOUND, "Cart not found".to_string()),
            CheckoutError::CartEmpty => (
                StatusCode::BAD_REQUEST,
                "Cart is empty, nothing to pay for".to_string(),
            ),
            CheckoutError::TransactionNotFound(reference) => (
                StatusCode::NOT_FOUND,
                format!("No transaction found for reference {}", reference),
            ),
            CheckoutError::InvalidAmount => (
                StatusCode::BAD_REQUEST,
                "Cart total cannot be charged".to_string(),
            ),
            CheckoutError::Gateway(err) => {
                tracing::error!("Payment gateway error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Payment provider is unavailable".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
