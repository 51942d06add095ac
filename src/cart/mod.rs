pub mod error;
pub mod handlers;
pub mod models;
pub mod pricing;
pub mod repository;

pub use error::CartError;
pub use models::{Cart, CartItem, CartItemResponse, CartResponse};
pub use repository::CartRepository;
