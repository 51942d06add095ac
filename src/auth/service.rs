// Authentication service - business logic layer

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::info;

use crate::auth::{
    error::AuthError,
    models::{LoginResponse, RegisterRequest, Role, UserResponse},
    password::PasswordService,
    repository::UserRepository,
    token::{random_token, TokenService},
};
use crate::mailer::EmailService;

const VERIFICATION_TOKEN_LEN: usize = 32;
const RESET_TOKEN_LEN: usize = 32;
const RESET_TOKEN_TTL_MINUTES: i64 = 30;

/// Authentication service coordinating all auth operations
pub struct AuthService {
    user_repo: UserRepository,
    token_service: TokenService,
    mailer: Arc<EmailService>,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(
        user_repo: UserRepository,
        token_service: TokenService,
        mailer: Arc<EmailService>,
    ) -> Self {
        Self {
            user_repo,
            token_service,
            mailer,
        }
    }

    /// Register a new account with the given role; the account starts
    /// unverified and a verification link is emailed
    pub async fn register(
        &self,
        request: RegisterRequest,
        role: Role,
    ) -> Result<UserResponse, AuthError> {
        if request.password != request.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let password_hash = PasswordService::hash_password(&request.password)?;
        let verification_token = random_token(VERIFICATION_TOKEN_LEN);

        let user = self
            .user_repo
            .create_user(
                &request.full_name,
                &request.email,
                &password_hash,
                role,
                &verification_token,
            )
            .await?;

        self.mailer
            .send_verification_email(&user.email, &user.full_name, &verification_token)
            .await?;

        info!("Registered new {} account: user_id={}", role, user.id);
        Ok(user.into())
    }

    /// Login with email and password, issuing a bearer token.
    /// Unverified accounts are rejected.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_verified {
            return Err(AuthError::AccountNotVerified);
        }

        self.user_repo.touch_last_login(user.id).await?;

        let token = self
            .token_service
            .generate_access_token(user.id, &user.email, user.role)?;

        info!("User logged in: user_id={}", user.id);
        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }

    /// Consume an email verification token
    pub async fn verify_email(&self, token: &str) -> Result<UserResponse, AuthError> {
        let user = self
            .user_repo
            .find_by_verification_token(token)
            .await?
            .ok_or(AuthError::TokenNotFound)?;

        if user.is_verified {
            return Err(AuthError::AlreadyVerified);
        }

        let user = self.user_repo.mark_verified(user.id).await?;
        info!("Account verified: user_id={}", user.id);
        Ok(user.into())
    }

    /// Issue a time-limited password reset token and email it
    pub async fn forgot_password(&self, email: &str) -> Result<(), AuthError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let token = random_token(RESET_TOKEN_LEN);
        let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);

        self.user_repo
            .set_reset_token(user.id, &token, expires_at)
            .await?;

        self.mailer
            .send_password_reset_email(&user.email, &user.full_name, &token)
            .await?;

        info!("Password reset requested: user_id={}", user.id);
        Ok(())
    }

    /// Reset a password using a previously issued token; the token is
    /// invalidated on success
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), AuthError> {
        if new_password != confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let user = self
            .user_repo
            .find_by_reset_token(token)
            .await?
            .ok_or(AuthError::TokenNotFound)?;

        match user.reset_token_expires_at {
            Some(expires_at) if expires_at > Utc::now() => {}
            _ => return Err(AuthError::ExpiredToken),
        }

        let password_hash = PasswordService::hash_password(new_password)?;
        self.user_repo.update_password(user.id, &password_hash).await?;

        info!("Password reset completed: user_id={}", user.id);
        Ok(())
    }
}
