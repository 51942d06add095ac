// HTTP handlers for cart endpoints, all scoped to the authenticated user

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::auth::middleware::AuthenticatedUser;
use crate::cart::{error::CartError, models::CartResponse, repository::CartRepository};

/// Add a product to the caller's cart
#[utoipa::path(
    post,
    path = "/api/v1/cart/{productId}",
    params(("productId" = i32, Path, description = "Product to add")),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Product added to cart", body = CartResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "cart"
)]
pub async fn add_to_cart(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(product_id): Path<i32>,
) -> Result<(StatusCode, Json<CartResponse>), CartError> {
    let repo = CartRepository::new(state.db.clone());

    let product = repo
        .find_product(product_id)
        .await?
        .ok_or(CartError::ProductNotFound(product_id))?;

    let items = repo.add_product(user.user_id, &product).await?;

    tracing::info!(
        "Added product {} to cart for user {}",
        product_id,
        user.user_id
    );
    Ok((StatusCode::CREATED, Json(CartResponse::from_items(items))))
}

/// Get the caller's cart contents and total
#[utoipa::path(
    get,
    path = "/api/v1/allCart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart contents", body = CartResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Internal server error")
    ),
    tag = "cart"
)]
pub async fn get_cart(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
) -> Result<Json<CartResponse>, CartError> {
    let items = CartRepository::new(state.db.clone())
        .find_items(user.user_id)
        .await?;

    Ok(Json(CartResponse::from_items(items)))
}

/// Reduce a line item's quantity by one; the item disappears at zero
#[utoipa::path(
    patch,
    path = "/api/v1/cart/reduce/{productId}",
    params(("productId" = i32, Path, description = "Product to reduce")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Quantity reduced", body = CartResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Cart or line item not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "cart"
)]
pub async fn reduce_product_quantity(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(product_id): Path<i32>,
) -> Result<Json<CartResponse>, CartError> {
    let items = CartRepository::new(state.db.clone())
        .reduce_product(user.user_id, product_id)
        .await?;

    Ok(Json(CartResponse::from_items(items)))
}

/// Remove one line item from the caller's cart
#[utoipa::path(
    delete,
    path = "/api/v1/cart/delete/{productId}",
    params(("productId" = i32, Path, description = "Product to remove")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Line item removed", body = CartResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Cart or line item not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "cart"
)]
pub async fn delete_product_from_cart(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Path(product_id): Path<i32>,
) -> Result<Json<CartResponse>, CartError> {
    let items = CartRepository::new(state.db.clone())
        .remove_product(user.user_id, product_id)
        .await?;

    Ok(Json(CartResponse::from_items(items)))
}

/// Remove every line item from the caller's cart
#[utoipa::path(
    delete,
    path = "/api/v1/clearCart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart cleared", body = CartResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Cart not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "cart"
)]
pub async fn clear_cart(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
) -> Result<Json<CartResponse>, CartError> {
    CartRepository::new(state.db.clone())
        .clear(user.user_id)
        .await?;

    tracing::info!("Cleared cart for user {}", user.user_id);
    Ok(Json(CartResponse::empty()))
}
