//! Photos service
//!
//! Uploads are checked, renamed and stored inline in the database together
//! with their MIME type, size and SHA-256 content hash.

use crate::config::{ALLOWED_PHOTO_EXTENSIONS, MAX_FILENAME_LENGTH, MAX_PHOTO_SIZE_BYTES};
use crate::database::{NewPhoto, PhotoMeta, Repository, TravelPhoto};
use crate::error::{AppError, Result};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Service for trip photos
#[derive(Clone)]
pub struct PhotosService {
    repo: Repository,
}

impl PhotosService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Store an uploaded photo for one of the user's trips
    pub async fn save_photo(
        &self,
        user_id: &str,
        trip_id: &str,
        original_name: &str,
        description: Option<&str>,
        data: &[u8],
    ) -> Result<PhotoMeta> {
        tracing::info!(
            "Saving photo {} for trip {} (size: {} bytes)",
            original_name,
            trip_id,
            data.len()
        );

        if data.is_empty() {
            return Err(AppError::validation("Photo is empty"));
        }
        if data.len() > MAX_PHOTO_SIZE_BYTES {
            return Err(AppError::validation(format!(
                "Photo exceeds the {} MB limit",
                MAX_PHOTO_SIZE_BYTES / (1024 * 1024)
            )));
        }

        let extension = photo_extension(&sanitize_filename(original_name))?;

        let trip = self.repo.get_trip(trip_id).await?;
        if trip.user_id != user_id {
            return Err(AppError::not_found("Trip", trip_id));
        }

        let unique = Uuid::new_v4().simple().to_string();
        let filename = format!(
            "user_{}_trip_{}_{}_{}.{}",
            user_id,
            trip_id,
            Utc::now().format("%Y%m%d%H%M%S"),
            &unique[..8],
            extension
        );

        let meta = self
            .repo
            .create_photo(NewPhoto {
                user_id: user_id.to_string(),
                trip_id: trip_id.to_string(),
                filename,
                description: crate::validation::optional_text(description),
                mime_type: mime_type(&extension).to_string(),
                content_hash: content_hash(data),
                file_data: data.to_vec(),
            })
            .await?;

        tracing::info!("Photo saved: {} as {}", meta.id, meta.filename);
        Ok(meta)
    }

    pub async fn get_photo(&self, id: &str) -> Result<TravelPhoto> {
        self.repo.get_photo(id).await
    }

    pub async fn list_trip_photos(&self, trip_id: &str) -> Result<Vec<PhotoMeta>> {
        self.repo.list_trip_photos(trip_id).await
    }

    pub async fn update_description(&self, id: &str, description: Option<&str>) -> Result<PhotoMeta> {
        self.repo.update_photo_description(id, description).await
    }

    pub async fn delete_photo(&self, id: &str) -> Result<()> {
        tracing::info!("Deleting photo: {}", id);
        self.repo.delete_photo(id).await
    }

    /// Write a photo's payload into `dir` under its stored filename
    pub async fn export_photo(&self, id: &str, dir: &Path) -> Result<PathBuf> {
        let photo = self.repo.get_photo(id).await?;
        let path = dir.join(sanitize_filename(&photo.meta.filename));

        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&path, &photo.file_data).await?;

        tracing::info!("Exported photo {} to {}", id, path.display());
        Ok(path)
    }
}

/// Sanitize filename to prevent path traversal attacks
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| *c != '/' && *c != '\\' && *c != '\0')
        .take(MAX_FILENAME_LENGTH)
        .collect()
}

/// Lower-cased extension, restricted to the supported image types
fn photo_extension(filename: &str) -> Result<String> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if !ALLOWED_PHOTO_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported photo type '{}'; expected one of: {}",
            extension,
            ALLOWED_PHOTO_EXTENSIONS.join(", ")
        )));
    }

    Ok(extension)
}

fn mime_type(extension: &str) -> &'static str {
    match extension {
        "png" => "image/png",
        _ => "image/jpeg",
    }
}

fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::services::test_support::*;
    use tempfile::TempDir;

    async fn create_test_service() -> (PhotosService, String, String) {
        let repo = create_test_repo().await;
        let user = create_test_user(&repo).await;
        let trip = create_trip(&repo, &user.id, "London", date(2025, 6, 1), date(2025, 6, 3)).await;
        (PhotosService::new(repo), user.id, trip.id)
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("normal.jpg"), "normal.jpg");
        assert_eq!(sanitize_filename("../../../etc/passwd"), "......etcpasswd");
        assert_eq!(sanitize_filename("dir\\photo.png"), "dirphoto.png");
    }

    #[test]
    fn test_photo_extension() {
        assert_eq!(photo_extension("IMG_001.JPG").unwrap(), "jpg");
        assert_eq!(photo_extension("a.png").unwrap(), "png");
        assert!(photo_extension("notes.txt").is_err());
        assert!(photo_extension("noextension").is_err());
    }

    #[test]
    fn test_content_hash() {
        assert_eq!(
            content_hash(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_save_and_export() {
        let (service, user_id, trip_id) = create_test_service().await;
        let data = b"\x89PNG\r\n\x1a\nfake";

        let meta = service
            .save_photo(&user_id, &trip_id, "../bridge.PNG", Some("Tower Bridge"), data)
            .await
            .unwrap();

        assert_eq!(meta.mime_type, "image/png");
        assert_eq!(meta.size, data.len() as i64);
        assert!(meta
            .filename
            .starts_with(&format!("user_{}_trip_{}_", user_id, trip_id)));
        assert!(meta.filename.ends_with(".png"));
        assert_eq!(meta.content_hash, content_hash(data));

        let dir = TempDir::new().unwrap();
        let path = service.export_photo(&meta.id, dir.path()).await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), data);
    }

    #[tokio::test]
    async fn test_same_second_uploads_export_separately() {
        let (service, user_id, trip_id) = create_test_service().await;

        let first = service
            .save_photo(&user_id, &trip_id, "a.jpg", None, b"AAAA")
            .await
            .unwrap();
        let second = service
            .save_photo(&user_id, &trip_id, "b.jpg", None, b"BBBB")
            .await
            .unwrap();
        assert_ne!(first.filename, second.filename);

        let dir = TempDir::new().unwrap();
        let first_path = service.export_photo(&first.id, dir.path()).await.unwrap();
        let second_path = service.export_photo(&second.id, dir.path()).await.unwrap();

        assert_ne!(first_path, second_path);
        assert_eq!(std::fs::read(first_path).unwrap(), b"AAAA");
        assert_eq!(std::fs::read(second_path).unwrap(), b"BBBB");
    }

    #[tokio::test]
    async fn test_rejected_uploads() {
        let (service, user_id, trip_id) = create_test_service().await;

        let empty = service
            .save_photo(&user_id, &trip_id, "a.jpg", None, b"")
            .await
            .unwrap_err();
        assert_eq!(empty.kind(), ErrorKind::ValidationFailure);

        let wrong_type = service
            .save_photo(&user_id, &trip_id, "a.gif", None, b"GIF89a")
            .await
            .unwrap_err();
        assert_eq!(wrong_type.kind(), ErrorKind::ValidationFailure);

        let oversize = vec![0u8; MAX_PHOTO_SIZE_BYTES + 1];
        let too_big = service
            .save_photo(&user_id, &trip_id, "a.jpg", None, &oversize)
            .await
            .unwrap_err();
        assert_eq!(too_big.kind(), ErrorKind::ValidationFailure);

        let foreign = service
            .save_photo("someone-else", &trip_id, "a.jpg", None, b"jpg")
            .await
            .unwrap_err();
        assert_eq!(foreign.kind(), ErrorKind::NotFound);
    }
}
