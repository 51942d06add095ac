// Paystack client behind a gateway trait so handlers never depend on the
// concrete HTTP integration

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

/// Errors from talking to the payment provider
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Request to payment provider failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Payment provider rejected the request: {0}")]
    Rejected(String),

    #[error("Payment provider configuration error: {0}")]
    Config(String),
}

/// Outcome of verifying a transaction reference with the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayStatus {
    Success,
    Failed,
    Pending,
}

/// A payment the provider has accepted and is waiting on the customer for
#[derive(Debug, Clone)]
pub struct InitializedPayment {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}

/// Third-party payment provider seam
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Start a payment for the given email and amount in the currency's
    /// smallest unit
    async fn initialize(
        &self,
        email: &str,
        amount_subunits: i64,
    ) -> Result<InitializedPayment, GatewayError>;

    /// Ask the provider what happened to a previously initialized payment
    async fn verify(&self, reference: &str) -> Result<GatewayStatus, GatewayError>;
}

/// Envelope Paystack wraps every response in
#[derive(Debug, Deserialize)]
struct PaystackResponse<T> {
    status: bool,
    message: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct InitializeData {
    authorization_url: String,
    access_code: String,
    reference: String,
}

#[derive(Debug, Deserialize)]
struct VerifyData {
    status: String,
}

/// Paystack REST client
pub struct PaystackClient {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl PaystackClient {
    pub fn new(base_url: String, secret_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            secret_key,
        }
    }

    /// Build the client from PAYSTACK_SECRET_KEY and an optional
    /// PAYSTACK_BASE_URL override
    pub fn from_env() -> Result<Self, GatewayError> {
        let secret_key = std::env::var("PAYSTACK_SECRET_KEY")
            .map_err(|_| GatewayError::Config("PAYSTACK_SECRET_KEY must be set".to_string()))?;
        let base_url = std::env::var("PAYSTACK_BASE_URL")
            .unwrap_or_else(|_| "https://api.paystack.co".to_string());

        Ok(Self::new(base_url, secret_key))
    }

    fn map_verify_status(status: &str) -> GatewayStatus {
        match status {
            "success" => GatewayStatus::Success,
            "failed" | "abandoned" | "reversed" => GatewayStatus::Failed,
            _ => GatewayStatus::Pending,
        }
    }
}

#[async_trait]
impl PaymentGateway for PaystackClient {
    async fn initialize(
        &self,
        email: &str,
        amount_subunits: i64,
    ) -> Result<InitializedPayment, GatewayError> {
        let response = self
            .client
            .post(format!("{}/transaction/initialize", self.base_url))
            .bearer_auth(&self.secret_key)
            .json(&json!({
                "email": email,
                "amount": amount_subunits,
            }))
            .send()
            .await?
            .json::<PaystackResponse<InitializeData>>()
            .await?;

        if !response.status {
            return Err(GatewayError::Rejected(response.message));
        }

        let data = response
            .data
            .ok_or_else(|| GatewayError::Rejected("initialize response had no data".to_string()))?;

        Ok(InitializedPayment {
            authorization_url: data.authorization_url,
            access_code: data.access_code,
            reference: data.reference,
        })
    }

    async fn verify(&self, reference: &str) -> Result<GatewayStatus, GatewayError> {
        let response = self
            .client
            .get(format!("{}/transaction/verify/{}", self.base_url, reference))
            .bearer_auth(&self.secret_key)
            .send()
            .await?
            .json::<PaystackResponse<VerifyData>>()
            .await?;

        if !response.status {
            return Err(GatewayError::Rejected(response.message));
        }

        let data = response
            .data
            .ok_or_else(|| GatewayError::Rejected("verify response had no data".to_string()))?;

        Ok(Self::map_verify_status(&data.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_initialize_response() {
        let body = r#"{
            "status": true,
            "message": "Authorization URL created",
            "data": {
                "authorization_url": "https://checkout.paystack.com/abc123",
                "access_code": "abc123",
                "reference": "ref_001"
            }
        }"#;

        let parsed: PaystackResponse<InitializeData> = serde_json::from_str(body).unwrap();
        assert!(parsed.status);
        let data = parsed.data.unwrap();
        assert_eq!(data.reference, "ref_001");
        assert_eq!(data.authorization_url, "https://checkout.paystack.com/abc123");
    }

    #[test]
    fn test_parse_verify_response() {
        let body = r#"{
            "status": true,
            "message": "Verification successful",
            "data": { "status": "success" }
        }"#;

        let parsed: PaystackResponse<VerifyData> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.data.unwrap().status, "success");
    }

    #[test]
    fn test_parse_error_response_without_data() {
        let body = r#"{ "status": false, "message": "Invalid key" }"#;

        let parsed: PaystackResponse<VerifyData> = serde_json::from_str(body).unwrap();
        assert!(!parsed.status);
        assert!(parsed.data.is_none());
    }

    #[test]
    fn test_verify_status_mapping() {
        assert_eq!(
            PaystackClient::map_verify_status("success"),
            GatewayStatus::Success
        );
        assert_eq!(
            PaystackClient::map_verify_status("failed"),
            GatewayStatus::Failed
        );
        assert_eq!(
            PaystackClient::map_verify_status("abandoned"),
            GatewayStatus::Failed
        );
        assert_eq!(
            PaystackClient::map_verify_status("ongoing"),
            GatewayStatus::Pending
        );
    }
}
