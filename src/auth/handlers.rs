// HTTP handlers for authentication endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    middleware::AdminUser,
    models::{
        ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
        ResetPasswordRequest, Role, UserResponse,
    },
};

/// Register a new user account
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered, verification email sent", body = UserResponse),
        (status = 400, description = "Validation failure or mismatched passwords"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn register_user(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let user = state.auth_service.register(request, Role::User).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Register a new admin account (open bootstrap endpoint)
#[utoipa::path(
    post,
    path = "/api/v1/admin/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Admin registered, verification email sent", body = UserResponse),
        (status = 400, description = "Validation failure or mismatched passwords"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn register_admin(
    State(state): State<crate::AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let user = state.auth_service.register(request, Role::Admin).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Create an admin account (requires an admin bearer token)
#[utoipa::path(
    post,
    path = "/api/v1/admin",
    request_body = RegisterRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Admin created", body = UserResponse),
        (status = 400, description = "Validation failure or mismatched passwords"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn create_admin(
    State(state): State<crate::AppState>,
    _admin: AdminUser,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let user = state.auth_service.register(request, Role::Admin).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Missing credentials"),
        (status = 401, description = "Invalid email or password"),
        (status = 403, description = "Account not verified"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let response = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(response))
}

/// Verify an account via the emailed token
#[utoipa::path(
    get,
    path = "/api/v1/verify/user/{token}",
    params(("token" = String, Path, description = "Verification token from the email")),
    responses(
        (status = 200, description = "Account verified", body = UserResponse),
        (status = 400, description = "Account already verified"),
        (status = 404, description = "Token not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn verify_user(
    State(state): State<crate::AppState>,
    Path(token): Path<String>,
) -> Result<Json<UserResponse>, AuthError> {
    let user = state.auth_service.verify_email(&token).await?;
    Ok(Json(user))
}

/// Request a password reset link
#[utoipa::path(
    post,
    path = "/api/v1/forgot_password/user",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset link sent", body = MessageResponse),
        (status = 404, description = "Account not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn forgot_password(
    State(state): State<crate::AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    state.auth_service.forgot_password(&request.email).await?;
    Ok(Json(MessageResponse::new(
        "Password reset link sent to your email",
    )))
}

/// Reset a password using the emailed token
#[utoipa::path(
    post,
    path = "/api/v1/reset_password/user/{token}",
    params(("token" = String, Path, description = "Reset token from the email")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 400, description = "Validation failure or mismatched passwords"),
        (status = 401, description = "Reset token expired"),
        (status = 404, description = "Token not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn reset_password(
    State(state): State<crate::AppState>,
    Path(token): Path<String>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    state
        .auth_service
        .reset_password(&token, &request.new_password, &request.confirm_password)
        .await?;
    Ok(Json(MessageResponse::new("Password reset successfully")))
}
