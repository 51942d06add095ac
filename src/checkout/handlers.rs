// HTTP handlers for payment initialization and checkout verification

use axum::{
    extract::{Query, State},
    Json,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::auth::middleware::AuthenticatedUser;
use crate::cart::{pricing, CartRepository};
use crate::checkout::{
    error::CheckoutError,
    models::{
        settlement_action, CheckoutResponse, InitializePaymentResponse, SettlementAction,
        TransactionStatus,
    },
    repository::TransactionRepository,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CheckoutQuery {
    /// Reference handed out when the payment was initialized
    pub reference: String,
}

/// Convert a cart total to the gateway's integer subunit amount
fn to_subunits(total: Decimal) -> Result<i64, CheckoutError> {
    (total * Decimal::from(100))
        .to_i64()
        .filter(|amount| *amount > 0)
        .ok_or(CheckoutError::InvalidAmount)
}

/// Start a payment for the caller's current cart total
#[utoipa::path(
    post,
    path = "/payment/initialize",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Payment initialized", body = InitializePaymentResponse),
        (status = 400, description = "Cart is empty"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Cart not found"),
        (status = 500, description = "Gateway or internal error")
    ),
    tag = "checkout"
)]
pub async fn initialize_payment(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
) -> Result<Json<InitializePaymentResponse>, CheckoutError> {
    let cart_repo = CartRepository::new(state.db.clone());

    cart_repo
        .find_cart(user.user_id)
        .await?
        .ok_or(CheckoutError::CartNotFound)?;

    let items = cart_repo.find_items(user.user_id).await?;
    if items.is_empty() {
        return Err(CheckoutError::CartEmpty);
    }

    let total = pricing::cart_total(&items);
    let amount_subunits = to_subunits(total)?;

    let payment = state
        .gateway
        .initialize(&user.email, amount_subunits)
        .await?;

    TransactionRepository::new(state.db.clone())
        .create(&payment.reference, user.user_id, &user.email, total)
        .await?;

    tracing::info!(
        "Initialized payment {} for user {}",
        payment.reference,
        user.user_id
    );

    Ok(Json(InitializePaymentResponse {
        authorization_url: payment.authorization_url,
        reference: payment.reference,
        amount: total,
    }))
}

/// Verify a payment with the gateway and settle the caller's cart
#[utoipa::path(
    post,
    path = "/checkout",
    params(CheckoutQuery),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Verification outcome", body = CheckoutResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Transaction not found"),
        (status = 500, description = "Gateway or internal error")
    ),
    tag = "checkout"
)]
pub async fn checkout(
    State(state): State<crate::AppState>,
    user: AuthenticatedUser,
    Query(query): Query<CheckoutQuery>,
) -> Result<Json<CheckoutResponse>, CheckoutError> {
    let tx_repo = TransactionRepository::new(state.db.clone());

    let transaction = tx_repo
        .find_by_reference_for_user(&query.reference, user.user_id)
        .await?
        .ok_or_else(|| CheckoutError::TransactionNotFound(query.reference.clone()))?;

    let status = state.gateway.verify(&transaction.reference).await?;

    let response = match settlement_action(status) {
        SettlementAction::Settle => {
            tx_repo.mark_completed(&transaction.reference).await?;
            CartRepository::new(state.db.clone())
                .clear(user.user_id)
                .await?;

            tracing::info!(
                "Payment {} completed for user {}",
                transaction.reference,
                user.user_id
            );
            CheckoutResponse {
                reference: transaction.reference,
                status: TransactionStatus::Completed,
                message: "Payment verified, order placed".to_string(),
            }
        }
        SettlementAction::Fail => {
            tx_repo.mark_failed(&transaction.reference).await?;

            tracing::warn!(
                "Payment {} failed for user {}",
                transaction.reference,
                user.user_id
            );
            CheckoutResponse {
                reference: transaction.reference,
                status: TransactionStatus::Failed,
                message: "Payment failed, cart left unchanged".to_string(),
            }
        }
        SettlementAction::Wait => CheckoutResponse {
            reference: transaction.reference,
            status: TransactionStatus::Initialized,
            message: "Payment not confirmed yet, try again later".to_string(),
        },
    };

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_subunits_scales_by_one_hundred() {
        assert_eq!(to_subunits(dec!(12.50)).unwrap(), 1250);
        assert_eq!(to_subunits(dec!(3)).unwrap(), 300);
    }

    #[test]
    fn test_zero_total_is_rejected() {
        assert!(to_subunits(Decimal::ZERO).is_err());
    }
}
