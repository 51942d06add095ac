pub mod error;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod repository;

pub use error::CheckoutError;
pub use gateway::{GatewayError, GatewayStatus, PaymentGateway, PaystackClient};
pub use models::{CheckoutResponse, InitializePaymentResponse, Transaction, TransactionStatus};
pub use repository::TransactionRepository;
