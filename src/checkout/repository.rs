// Database repository for payment transactions

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::checkout::{
    error::CheckoutError,
    models::{Transaction, TransactionStatus},
};

const TRANSACTION_COLUMNS: &str =
    "id, reference, user_id, email, amount, status, paid_at, created_at";

#[derive(Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an initialized transaction for later verification
    pub async fn create(
        &self,
        reference: &str,
        user_id: i32,
        email: &str,
        amount: Decimal,
    ) -> Result<Transaction, CheckoutError> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            "INSERT INTO transactions (reference, user_id, email, amount) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {TRANSACTION_COLUMNS}"
        ))
        .bind(reference)
        .bind(user_id)
        .bind(email)
        .bind(amount)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    /// Look up a transaction by reference, scoped to its owner
    pub async fn find_by_reference_for_user(
        &self,
        reference: &str,
        user_id: i32,
    ) -> Result<Option<Transaction>, CheckoutError> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transactions \
             WHERE reference = $1 AND user_id = $2"
        ))
        .bind(reference)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    pub async fn mark_completed(&self, reference: &str) -> Result<(), CheckoutError> {
        sqlx::query("UPDATE transactions SET status = $1, paid_at = $2 WHERE reference = $3")
            .bind(TransactionStatus::Completed)
            .bind(Utc::now())
            .bind(reference)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn mark_failed(&self, reference: &str) -> Result<(), CheckoutError> {
        sqlx::query("UPDATE transactions SET status = $1 WHERE reference = $2")
            .bind(TransactionStatus::Failed)
            .bind(reference)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
