// Image storage for product uploads

use std::path::Path;
use uuid::Uuid;

use crate::error::ApiError;

/// Persist uploaded image bytes under the upload directory with a generated
/// filename, returning the URL path the image is served from
pub async fn store_image(
    upload_dir: &str,
    original_name: Option<&str>,
    bytes: &[u8],
) -> Result<String, ApiError> {
    let extension = original_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .unwrap_or("bin");

    let filename = format!("{}.{}", Uuid::new_v4(), extension);
    let path = Path::new(upload_dir).join(&filename);

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| ApiError::InternalError(format!("Failed to create upload dir: {}", e)))?;
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| ApiError::InternalError(format!("Failed to store image: {}", e)))?;

    tracing::debug!("Stored uploaded image at {}", path.display());
    Ok(format!("/uploads/{}", filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_image_writes_file_and_keeps_extension() {
        let dir = std::env::temp_dir().join(format!("uploads-test-{}", Uuid::new_v4()));
        let dir_str = dir.to_str().unwrap().to_string();

        let url = store_image(&dir_str, Some("photo.png"), b"not-really-a-png")
            .await
            .unwrap();

        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));

        let filename = url.strip_prefix("/uploads/").unwrap();
        let stored = tokio::fs::read(dir.join(filename)).await.unwrap();
        assert_eq!(stored, b"not-really-a-png");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_image_without_filename_falls_back() {
        let dir = std::env::temp_dir().join(format!("uploads-test-{}", Uuid::new_v4()));
        let dir_str = dir.to_str().unwrap().to_string();

        let url = store_image(&dir_str, None, b"bytes").await.unwrap();
        assert!(url.ends_with(".bin"));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
