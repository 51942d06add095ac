// Transaction models and the settlement decision taken after verification

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::checkout::gateway::GatewayStatus;

/// Lifecycle of a payment transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Initialized,
    Completed,
    Failed,
}

/// Transaction database model
#[derive(Debug, Clone, FromRow)]
pub struct Transaction {
    pub id: i32,
    pub reference: String,
    pub user_id: i32,
    pub email: String,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Response to a payment initialization request
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitializePaymentResponse {
    pub authorization_url: String,
    pub reference: String,
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

/// Response to a checkout verification request
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub reference: String,
    pub status: TransactionStatus,
    pub message: String,
}

/// What to do with the transaction and cart once the gateway has been asked
/// about a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementAction {
    /// Mark the transaction completed and clear the cart
    Settle,
    /// Mark the transaction failed; the cart is left untouched
    Fail,
    /// Record nothing; the payment may still complete later
    Wait,
}

/// Map a gateway verification status to a settlement action.
/// Only a confirmed success may clear the cart.
pub fn settlement_action(status: GatewayStatus) -> SettlementAction {
    match status {
        GatewayStatus::Success => SettlementAction::Settle,
        GatewayStatus::Failed => SettlementAction::Fail,
        GatewayStatus::Pending => SettlementAction::Wait,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_settles_and_clears() {
        assert_eq!(settlement_action(GatewayStatus::Success), SettlementAction::Settle);
    }

    #[test]
    fn test_failure_never_clears_the_cart() {
        assert_eq!(settlement_action(GatewayStatus::Failed), SettlementAction::Fail);
    }

    #[test]
    fn test_pending_records_nothing() {
        assert_eq!(settlement_action(GatewayStatus::Pending), SettlementAction::Wait);
    }
}
