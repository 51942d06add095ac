// Authentication module
// JWT-based authentication with registration, login, email verification,
// and password reset for user and admin accounts

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use middleware::{AdminUser, AuthenticatedUser};
pub use models::{MessageResponse, Role, User, UserResponse};
pub use service::AuthService;
