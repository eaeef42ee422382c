//! Travel journal service

use crate::database::{MoodCount, Repository, TravelNote, TravelNoteInput};
use crate::error::Result;

/// Service for travel notes
#[derive(Clone)]
pub struct JournalService {
    repo: Repository,
}

impl JournalService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    pub async fn create_note(&self, trip_id: &str, input: TravelNoteInput) -> Result<TravelNote> {
        self.repo.get_trip(trip_id).await?;

        let note = self.repo.create_travel_note(trip_id, &input).await?;

        tracing::info!("Travel note created: {} for trip {}", note.id, trip_id);
        Ok(note)
    }

    pub async fn get_note(&self, id: &str) -> Result<TravelNote> {
        self.repo.get_travel_note(id).await
    }

    pub async fn list_notes(&self, trip_id: &str) -> Result<Vec<TravelNote>> {
        self.repo.list_travel_notes(trip_id).await
    }

    pub async fn update_note(&self, id: &str, input: TravelNoteInput) -> Result<TravelNote> {
        tracing::debug!("Updating travel note: {}", id);
        self.repo.update_travel_note(id, &input).await
    }

    pub async fn delete_note(&self, id: &str) -> Result<()> {
        tracing::info!("Deleting travel note: {}", id);
        self.repo.delete_travel_note(id).await
    }

    pub async fn mood_counts(&self, trip_id: &str) -> Result<Vec<MoodCount>> {
        self.repo.mood_counts(trip_id).await
    }

    pub async fn locations(&self, trip_id: &str) -> Result<Vec<String>> {
        self.repo.note_locations(trip_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::services::test_support::*;

    #[tokio::test]
    async fn test_note_round_trip() {
        let repo = create_test_repo().await;
        let user = create_test_user(&repo).await;
        let trip = create_trip(&repo, &user.id, "London", date(2025, 6, 1), date(2025, 6, 3)).await;
        let service = JournalService::new(repo);

        let created = service
            .create_note(
                &trip.id,
                TravelNoteInput {
                    title: "Day 1".to_string(),
                    content: "Arrived".to_string(),
                    date: date(2025, 6, 1),
                    location: Some("Heathrow".to_string()),
                    mood: Some("Excited".to_string()),
                },
            )
            .await
            .unwrap();

        let fetched = service.get_note(&created.id).await.unwrap();
        assert_eq!(fetched.title, "Day 1");
        assert_eq!(fetched.content, "Arrived");
        assert_eq!(fetched.date, date(2025, 6, 1));
        assert_eq!(fetched.location.as_deref(), Some("Heathrow"));
        assert_eq!(fetched.mood.as_deref(), Some("Excited"));

        let listed = service.list_notes(&trip.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);

        assert_eq!(service.locations(&trip.id).await.unwrap(), vec!["Heathrow"]);
    }

    #[tokio::test]
    async fn test_note_for_missing_trip() {
        let service = JournalService::new(create_test_repo().await);

        let err = service
            .create_note(
                "missing",
                TravelNoteInput {
                    title: "Lost".to_string(),
                    content: "Nowhere".to_string(),
                    date: date(2025, 6, 1),
                    location: None,
                    mood: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
