//! Photo commands

use super::{current_trip, owned_trip, CommandResponse, Session};
use crate::app::AppState;
use crate::database::{PhotoMeta, TravelPhoto};
use crate::error::Result;
use std::path::{Path, PathBuf};

pub async fn upload_photo(
    state: &AppState,
    session: &Session,
    original_name: &str,
    description: Option<&str>,
    data: &[u8],
) -> CommandResponse<PhotoMeta> {
    let result: Result<PhotoMeta> = async {
        let trip = current_trip(state, session).await?;
        state
            .photos_service
            .save_photo(&trip.user_id, &trip.id, original_name, description, data)
            .await
    }
    .await;

    CommandResponse::from_result("upload_photo", result, |_| {
        "Photo uploaded successfully!".to_string()
    })
}

pub async fn list_photos(state: &AppState, session: &Session) -> CommandResponse<Vec<PhotoMeta>> {
    let result: Result<Vec<PhotoMeta>> = async {
        let trip = current_trip(state, session).await?;
        state.photos_service.list_trip_photos(&trip.id).await
    }
    .await;

    CommandResponse::from_result("list_photos", result, |photos| {
        format!("{} photo(s)", photos.len())
    })
}

/// Load a photo with its payload, if it belongs to the session's user
async fn owned_photo(state: &AppState, session: &Session, photo_id: &str) -> Result<TravelPhoto> {
    let photo = state.photos_service.get_photo(photo_id).await?;
    owned_trip(state, session, &photo.meta.trip_id).await?;
    Ok(photo)
}

pub async fn export_photo(
    state: &AppState,
    session: &Session,
    photo_id: &str,
    dir: &Path,
) -> CommandResponse<PathBuf> {
    let result: Result<PathBuf> = async {
        owned_photo(state, session, photo_id).await?;
        state.photos_service.export_photo(photo_id, dir).await
    }
    .await;

    CommandResponse::from_result("export_photo", result, |path| {
        format!("Saved to {}", path.display())
    })
}

pub async fn update_photo_description(
    state: &AppState,
    session: &Session,
    photo_id: &str,
    description: Option<&str>,
) -> CommandResponse<PhotoMeta> {
    let result: Result<PhotoMeta> = async {
        owned_photo(state, session, photo_id).await?;
        state
            .photos_service
            .update_description(photo_id, description)
            .await
    }
    .await;

    CommandResponse::from_result("update_photo_description", result, |_| {
        "Description updated".to_string()
    })
}

pub async fn delete_photo(state: &AppState, session: &Session, photo_id: &str) -> CommandResponse<()> {
    let result: Result<()> = async {
        owned_photo(state, session, photo_id).await?;
        state.photos_service.delete_photo(photo_id).await
    }
    .await;

    CommandResponse::from_result("delete_photo", result, |_| {
        "Photo deleted successfully".to_string()
    })
}
