// Catalog module
// Category and product management, including product image uploads

pub mod handlers;
pub mod models;
pub mod repository;
pub mod storage;

pub use models::{Category, CategoryResponse, CreateCategoryRequest, Product};
pub use repository::{CategoryRepository, ProductRepository};
