use super::Repository;
use crate::database::models::{NewPhoto, PhotoMeta, TravelPhoto};
use crate::error::{AppError, Result};
use chrono::Utc;
use uuid::Uuid;

const PHOTO_META_COLUMNS: &str =
    "id, user_id, trip_id, filename, description, mime_type, size, content_hash, created_at";

impl Repository {
    /// Store a photo and its payload
    pub async fn create_photo(&self, photo: NewPhoto) -> Result<PhotoMeta> {
        let id = Uuid::new_v4().to_string();
        let size = photo.file_data.len() as i64;

        let meta = self
            .executor
            .execute_returning::<PhotoMeta>(
                &format!(
                    r#"
                    INSERT INTO travel_photos
                        (id, user_id, trip_id, filename, description, mime_type, size, content_hash, file_data, created_at)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                    RETURNING {}
                    "#,
                    PHOTO_META_COLUMNS
                ),
                &[
                    id.as_str().into(),
                    photo.user_id.into(),
                    photo.trip_id.into(),
                    photo.filename.into(),
                    photo.description.into(),
                    photo.mime_type.into(),
                    size.into(),
                    photo.content_hash.into(),
                    photo.file_data.into(),
                    Utc::now().into(),
                ],
            )
            .await?;

        tracing::debug!("Stored photo: {} ({} bytes)", meta.id, meta.size);
        Ok(meta)
    }

    /// Get a photo with its payload
    pub async fn get_photo(&self, id: &str) -> Result<TravelPhoto> {
        self.executor
            .fetch_optional::<TravelPhoto>("SELECT * FROM travel_photos WHERE id = ?", &[id.into()])
            .await?
            .ok_or_else(|| AppError::not_found("Photo", id))
    }

    /// Photo metadata for a trip, newest upload first
    pub async fn list_trip_photos(&self, trip_id: &str) -> Result<Vec<PhotoMeta>> {
        self.executor
            .fetch_all::<PhotoMeta>(
                &format!(
                    "SELECT {} FROM travel_photos WHERE trip_id = ? ORDER BY created_at DESC",
                    PHOTO_META_COLUMNS
                ),
                &[trip_id.into()],
            )
            .await
    }

    pub async fn update_photo_description(
        &self,
        id: &str,
        description: Option<&str>,
    ) -> Result<PhotoMeta> {
        let description = crate::validation::optional_text(description);

        self.executor
            .execute_returning::<PhotoMeta>(
                &format!(
                    "UPDATE travel_photos SET description = ? WHERE id = ? RETURNING {}",
                    PHOTO_META_COLUMNS
                ),
                &[description.into(), id.into()],
            )
            .await
            .map_err(|e| match e {
                AppError::NotFound { .. } => AppError::not_found("Photo", id),
                other => other,
            })
    }

    pub async fn delete_photo(&self, id: &str) -> Result<()> {
        let rows = self
            .executor
            .execute("DELETE FROM travel_photos WHERE id = ?", &[id.into()])
            .await?;

        if rows == 0 {
            return Err(AppError::not_found("Photo", id));
        }

        tracing::debug!("Deleted photo: {}", id);
        Ok(())
    }
}
