// Authentication extractors for protected routes

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::warn;

use crate::auth::{error::AuthError, models::Role, token::TokenService};

/// Authenticated user extractor for protected routes
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub email: String,
    pub role: Role,
}

fn bearer_token(auth_header: &str) -> Result<&str, AuthError> {
    auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidToken)
}

fn token_service_from_env() -> Result<TokenService, AuthError> {
    let jwt_secret = std::env::var("JWT_SECRET")
        .map_err(|_| AuthError::ConfigError("JWT_SECRET not configured".to_string()))?;
    Ok(TokenService::new(jwt_secret))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::InvalidToken)?;

        let token = bearer_token(auth_header)?;
        let claims = token_service_from_env()?.validate_access_token(token)?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// Extractor that additionally requires the admin role
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user: AuthenticatedUser,
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if user.role != Role::Admin {
            warn!(
                "Authorization failed: user_id={}, actual_role={}, endpoint={}",
                user.user_id,
                user.role,
                parts.uri.path()
            );
            return Err(AuthError::InsufficientPermissions {
                required: Role::Admin,
                actual: user.role,
            });
        }

        Ok(AdminUser { user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";

    fn set_test_secret() {
        std::env::set_var("JWT_SECRET", TEST_SECRET);
    }

    fn create_parts_with_auth(auth_value: &str) -> Parts {
        let req = Request::builder()
            .uri("/")
            .header(header::AUTHORIZATION, auth_value)
            .body(())
            .unwrap();
        let (parts, _) = req.into_parts();
        parts
    }

    fn create_parts_without_auth() -> Parts {
        let req = Request::builder().uri("/").body(()).unwrap();
        let (parts, _) = req.into_parts();
        parts
    }

    #[tokio::test]
    async fn test_valid_token_is_accepted() {
        set_test_secret();
        let service = TokenService::new(TEST_SECRET.to_string());
        let token = service
            .generate_access_token(42, "test@example.com", Role::User)
            .unwrap();

        let mut parts = create_parts_with_auth(&format!("Bearer {}", token));
        let user = AuthenticatedUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(user.user_id, 42);
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_missing_authorization_header() {
        set_test_secret();
        let mut parts = create_parts_without_auth();
        let result = AuthenticatedUser::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result.unwrap_err(), AuthError::MissingToken));
    }

    #[tokio::test]
    async fn test_malformed_tokens_are_rejected() {
        set_test_secret();
        let malformed = [
            "Bearer invalid_token",
            "Bearer not.a.valid.jwt",
            "Basic dXNlcjpwYXNz",
            "token_without_bearer",
        ];

        for auth_value in malformed {
            let mut parts = create_parts_with_auth(auth_value);
            let result = AuthenticatedUser::from_request_parts(&mut parts, &()).await;
            assert!(result.is_err(), "should reject: {}", auth_value);
        }
    }

    #[tokio::test]
    async fn test_admin_token_passes_admin_check() {
        set_test_secret();
        let service = TokenService::new(TEST_SECRET.to_string());
        let token = service
            .generate_access_token(1, "admin@example.com", Role::Admin)
            .unwrap();

        let mut parts = create_parts_with_auth(&format!("Bearer {}", token));
        let admin = AdminUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(admin.user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_user_token_fails_admin_check() {
        set_test_secret();
        let service = TokenService::new(TEST_SECRET.to_string());
        let token = service
            .generate_access_token(7, "user@example.com", Role::User)
            .unwrap();

        let mut parts = create_parts_with_auth(&format!("Bearer {}", token));
        let result = AdminUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(
            result.unwrap_err(),
            AuthError::InsufficientPermissions { .. }
        ));
    }

    #[test]
    fn test_bearer_prefix_is_required() {
        assert!(bearer_token("Bearer abc").is_ok());
        assert!(bearer_token("bearer abc").is_err());
        assert!(bearer_token("abc").is_err());
    }
}
