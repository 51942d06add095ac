mod auth;
mod cart;
mod catalog;
mod checkout;
mod db;
mod error;
mod mailer;
mod validation;

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::PgPool;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use auth::service::AuthService;
use auth::token::TokenService;
use checkout::gateway::{PaymentGateway, PaystackClient};
use mailer::EmailService;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register_user,
        auth::handlers::register_admin,
        auth::handlers::create_admin,
        auth::handlers::login,
        auth::handlers::verify_user,
        auth::handlers::forgot_password,
        auth::handlers::reset_password,
        catalog::handlers::create_category,
        catalog::handlers::get_all_categories,
        catalog::handlers::get_category,
        catalog::handlers::add_product,
        catalog::handlers::get_all_products,
        catalog::handlers::get_product,
        catalog::handlers::get_products_by_category,
        catalog::handlers::delete_product,
        cart::handlers::add_to_cart,
        cart::handlers::get_cart,
        cart::handlers::reduce_product_quantity,
        cart::handlers::delete_product_from_cart,
        cart::handlers::clear_cart,
        checkout::handlers::initialize_payment,
        checkout::handlers::checkout,
    ),
    components(
        schemas(
            auth::models::Role,
            auth::models::UserResponse,
            auth::models::RegisterRequest,
            auth::models::LoginRequest,
            auth::models::ForgotPasswordRequest,
            auth::models::ResetPasswordRequest,
            auth::models::LoginResponse,
            auth::models::MessageResponse,
            catalog::models::Category,
            catalog::models::CategoryResponse,
            catalog::models::CreateCategoryRequest,
            catalog::models::Product,
            cart::models::CartItemResponse,
            cart::models::CartResponse,
            checkout::models::TransactionStatus,
            checkout::models::InitializePaymentResponse,
            checkout::models::CheckoutResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login, email verification, and password reset"),
        (name = "catalog", description = "Category and product management"),
        (name = "cart", description = "Per-user shopping cart"),
        (name = "checkout", description = "Payment initialization and verification")
    ),
    info(
        title = "Storefront API",
        version = "1.0.0",
        description = "RESTful e-commerce backend with JWT auth, catalog, cart, and checkout",
        contact(
            name = "API Support",
            email = "support@storefrontapi.com"
        )
    )
)]
struct ApiDoc;

/// Registers the bearer token scheme referenced by protected endpoints
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth_service: Arc<AuthService>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub upload_dir: String,
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::services::ServeDir;

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_dir = state.upload_dir.clone();

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/documentation").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Auth routes
        .route("/api/v1/register", post(auth::handlers::register_user))
        .route("/api/v1/admin/register", post(auth::handlers::register_admin))
        .route("/api/v1/admin", post(auth::handlers::create_admin))
        .route("/api/v1/login", post(auth::handlers::login))
        .route("/api/v1/verify/user/:token", get(auth::handlers::verify_user))
        .route(
            "/api/v1/forgot_password/user",
            post(auth::handlers::forgot_password),
        )
        .route(
            "/api/v1/reset_password/user/:token",
            post(auth::handlers::reset_password),
        )
        // Catalog routes
        .route("/api/v1/category", post(catalog::handlers::create_category))
        .route(
            "/api/v1/allCategories",
            get(catalog::handlers::get_all_categories),
        )
        .route("/api/v1/category/:id", get(catalog::handlers::get_category))
        // The path parameter is the product id for GET and the category id
        // for the multipart POST
        .route(
            "/api/v1/product/:id",
            get(catalog::handlers::get_product).post(catalog::handlers::add_product),
        )
        .route(
            "/api/v1/allProducts",
            get(catalog::handlers::get_all_products),
        )
        .route(
            "/api/v1/products/category/:id",
            get(catalog::handlers::get_products_by_category),
        )
        .route(
            "/api/v1/product/delete/:product_id/:category_id",
            delete(catalog::handlers::delete_product),
        )
        // Cart routes
        .route("/api/v1/cart/:product_id", post(cart::handlers::add_to_cart))
        .route("/api/v1/allCart", get(cart::handlers::get_cart))
        .route(
            "/api/v1/cart/reduce/:product_id",
            patch(cart::handlers::reduce_product_quantity),
        )
        .route(
            "/api/v1/cart/delete/:product_id",
            delete(cart::handlers::delete_product_from_cart),
        )
        .route("/api/v1/clearCart", delete(cart::handlers::clear_cart))
        // Checkout routes
        .route(
            "/payment/initialize",
            post(checkout::handlers::initialize_payment),
        )
        .route("/checkout", post(checkout::handlers::checkout))
        // Uploaded product images
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Storefront API - Starting...");

    // Get configuration from environment variables
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");
    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in environment");
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    tokio::fs::create_dir_all(&upload_dir)
        .await
        .expect("Failed to create upload directory");

    // Wire up services
    let mailer = Arc::new(EmailService::from_env().expect("Failed to configure SMTP mailer"));
    let auth_service = Arc::new(AuthService::new(
        auth::repository::UserRepository::new(db_pool.clone()),
        TokenService::new(jwt_secret),
        mailer,
    ));
    let gateway: Arc<dyn PaymentGateway> =
        Arc::new(PaystackClient::from_env().expect("Failed to configure payment gateway"));

    let state = AppState {
        db: db_pool,
        auth_service,
        gateway,
        upload_dir,
    };

    // Create the application router
    let app = create_router(state);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Storefront API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/documentation", addr);

    axum::serve(listener, app).await.expect("Server error");
}

#[cfg(test)]
mod tests;
