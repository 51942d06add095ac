// HTTP handlers for category and product endpoints

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use validator::Validate;

use crate::auth::middleware::{AdminUser, AuthenticatedUser};
use crate::catalog::{
    models::{Category, CategoryResponse, CreateCategoryRequest, NewProduct, Product},
    repository::{CategoryRepository, ProductRepository},
    storage,
};
use crate::error::ApiError;

/// Create a new category
#[utoipa::path(
    post,
    path = "/api/v1/category",
    request_body = CreateCategoryRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid category name"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 409, description = "Category name already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "catalog"
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    _admin: AdminUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if crate::db::check_duplicate_category(&state.db, &payload.name).await? {
        tracing::warn!("Attempt to create duplicate category: {}", payload.name);
        return Err(ApiError::Conflict {
            message: format!("Category with name '{}' already exists", payload.name),
        });
    }

    let category = CategoryRepository::new(state.db.clone())
        .create(&payload.name)
        .await?;

    tracing::info!("Created category with id: {}", category.id);
    Ok((StatusCode::CREATED, Json(category)))
}

/// List all categories
#[utoipa::path(
    get,
    path = "/api/v1/allCategories",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All categories", body = Vec<Category>),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Internal server error")
    ),
    tag = "catalog"
)]
pub async fn get_all_categories(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Category>>, ApiError> {
    let categories = CategoryRepository::new(state.db.clone()).find_all().await?;
    tracing::debug!("Retrieved {} categories", categories.len());
    Ok(Json(categories))
}

/// Get one category with its product ids
#[utoipa::path(
    get,
    path = "/api/v1/category/{categoryId}",
    params(("categoryId" = i32, Path, description = "Category ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "catalog"
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Path(category_id): Path<i32>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let repo = CategoryRepository::new(state.db.clone());

    let category = repo
        .find_by_id(category_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Category".to_string(),
            id: category_id.to_string(),
        })?;

    let products = repo.product_ids(category_id).await?;
    Ok(Json(CategoryResponse::new(category, products)))
}

/// Add a product under a category. Multipart form with `description`,
/// `price`, and a `productImage` file.
#[utoipa::path(
    post,
    path = "/api/v1/product/{categoryId}",
    params(("categoryId" = i32, Path, description = "Category the product belongs to")),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Missing or malformed form fields"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "catalog"
)]
pub async fn add_product(
    State(state): State<crate::AppState>,
    _admin: AdminUser,
    Path(category_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    if !crate::db::category_exists(&state.db, category_id).await? {
        return Err(ApiError::NotFound {
            resource: "Category".to_string(),
            id: category_id.to_string(),
        });
    }

    let mut description: Option<String> = None;
    let mut price: Option<Decimal> = None;
    let mut image: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "description" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid description: {}", e)))?;
                description = Some(text);
            }
            "price" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid price: {}", e)))?;
                let parsed = text
                    .parse::<Decimal>()
                    .map_err(|_| ApiError::BadRequest("Price must be a number".to_string()))?;
                price = Some(parsed);
            }
            "productImage" => {
                let filename = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid image upload: {}", e)))?;
                image = Some((filename, bytes.to_vec()));
            }
            other => {
                tracing::debug!("Ignoring unexpected multipart field: {}", other);
            }
        }
    }

    let description =
        description.ok_or_else(|| ApiError::BadRequest("Description is required".to_string()))?;
    let price = price.ok_or_else(|| ApiError::BadRequest("Price is required".to_string()))?;
    let (filename, bytes) =
        image.ok_or_else(|| ApiError::BadRequest("Product image is required".to_string()))?;

    crate::validation::validate_positive_price(price)
        .map_err(|_| ApiError::BadRequest("Price must be positive".to_string()))?;

    let image_url = storage::store_image(&state.upload_dir, filename.as_deref(), &bytes).await?;

    let product = ProductRepository::new(state.db.clone())
        .create(
            category_id,
            &NewProduct {
                description,
                price,
                image_url,
            },
        )
        .await?;

    tracing::info!(
        "Created product with id: {} in category {}",
        product.id,
        category_id
    );
    Ok((StatusCode::CREATED, Json(product)))
}

/// List all products
#[utoipa::path(
    get,
    path = "/api/v1/allProducts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All products", body = Vec<Product>),
        (status = 401, description = "Missing or invalid token"),
        (status = 500, description = "Internal server error")
    ),
    tag = "catalog"
)]
pub async fn get_all_products(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = ProductRepository::new(state.db.clone()).find_all().await?;
    tracing::debug!("Retrieved {} products", products.len());
    Ok(Json(products))
}

/// Get one product by id
#[utoipa::path(
    get,
    path = "/api/v1/product/{productId}",
    params(("productId" = i32, Path, description = "Product ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "catalog"
)]
pub async fn get_product(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Path(product_id): Path<i32>,
) -> Result<Json<Product>, ApiError> {
    let product = ProductRepository::new(state.db.clone())
        .find_by_id(product_id)
        .await?
        .ok_or_else(|| ApiError::NotFound {
            resource: "Product".to_string(),
            id: product_id.to_string(),
        })?;

    Ok(Json(product))
}

/// List the products in a category
#[utoipa::path(
    get,
    path = "/api/v1/products/category/{categoryId}",
    params(("categoryId" = i32, Path, description = "Category ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Products in the category", body = Vec<Product>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "catalog"
)]
pub async fn get_products_by_category(
    State(state): State<crate::AppState>,
    _user: AuthenticatedUser,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<Product>>, ApiError> {
    if !crate::db::category_exists(&state.db, category_id).await? {
        return Err(ApiError::NotFound {
            resource: "Category".to_string(),
            id: category_id.to_string(),
        });
    }

    let products = ProductRepository::new(state.db.clone())
        .find_by_category(category_id)
        .await?;
    Ok(Json(products))
}

/// Delete a product from a category
#[utoipa::path(
    delete,
    path = "/api/v1/product/delete/{productId}/{categoryId}",
    params(
        ("productId" = i32, Path, description = "Product ID"),
        ("categoryId" = i32, Path, description = "Category the product belongs to")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Product not found in that category"),
        (status = 500, description = "Internal server error")
    ),
    tag = "catalog"
)]
pub async fn delete_product(
    State(state): State<crate::AppState>,
    _admin: AdminUser,
    Path((product_id, category_id)): Path<(i32, i32)>,
) -> Result<StatusCode, ApiError> {
    let deleted = ProductRepository::new(state.db.clone())
        .delete(product_id, category_id)
        .await?;

    if !deleted {
        return Err(ApiError::NotFound {
            resource: "Product".to_string(),
            id: product_id.to_string(),
        });
    }

    tracing::info!(
        "Deleted product {} from category {}",
        product_id,
        category_id
    );
    Ok(StatusCode::NO_CONTENT)
}
