use super::Repository;
use crate::database::models::{MoodCount, TravelNote, TravelNoteInput};
use crate::error::{AppError, Result};
use crate::validation;
use chrono::Utc;
use uuid::Uuid;

struct NoteFields {
    title: String,
    content: String,
    location: Option<String>,
    mood: Option<String>,
}

fn note_fields(input: &TravelNoteInput) -> Result<NoteFields> {
    Ok(NoteFields {
        title: validation::require_text("Title", &input.title)?,
        content: validation::require_body("Content", &input.content)?,
        location: validation::optional_text(input.location.as_deref()),
        mood: validation::optional_text(input.mood.as_deref()),
    })
}

impl Repository {
    /// Add a journal entry to a trip
    pub async fn create_travel_note(
        &self,
        trip_id: &str,
        input: &TravelNoteInput,
    ) -> Result<TravelNote> {
        let fields = note_fields(input)?;
        let id = Uuid::new_v4().to_string();

        let note = self
            .executor
            .execute_returning::<TravelNote>(
                r#"
                INSERT INTO travel_notes (id, trip_id, title, content, date, location, mood, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                RETURNING *
                "#,
                &[
                    id.as_str().into(),
                    trip_id.into(),
                    fields.title.into(),
                    fields.content.into(),
                    input.date.into(),
                    fields.location.into(),
                    fields.mood.into(),
                    Utc::now().into(),
                ],
            )
            .await?;

        tracing::debug!("Created travel note: {} for trip: {}", note.id, trip_id);
        Ok(note)
    }

    pub async fn get_travel_note(&self, id: &str) -> Result<TravelNote> {
        self.executor
            .fetch_optional::<TravelNote>("SELECT * FROM travel_notes WHERE id = ?", &[id.into()])
            .await?
            .ok_or_else(|| AppError::not_found("Travel note", id))
    }

    /// Journal for a trip, newest entry first
    pub async fn list_travel_notes(&self, trip_id: &str) -> Result<Vec<TravelNote>> {
        self.executor
            .fetch_all::<TravelNote>(
                r#"
                SELECT * FROM travel_notes
                WHERE trip_id = ?
                ORDER BY date DESC, created_at DESC
                "#,
                &[trip_id.into()],
            )
            .await
    }

    /// Replace every editable field of a note
    pub async fn update_travel_note(&self, id: &str, input: &TravelNoteInput) -> Result<TravelNote> {
        let fields = note_fields(input)?;

        let rows = self
            .executor
            .execute(
                r#"
                UPDATE travel_notes
                SET title = ?, content = ?, date = ?, location = ?, mood = ?
                WHERE id = ?
                "#,
                &[
                    fields.title.into(),
                    fields.content.into(),
                    input.date.into(),
                    fields.location.into(),
                    fields.mood.into(),
                    id.into(),
                ],
            )
            .await?;

        if rows == 0 {
            return Err(AppError::not_found("Travel note", id));
        }

        tracing::debug!("Updated travel note: {}", id);
        self.get_travel_note(id).await
    }

    pub async fn delete_travel_note(&self, id: &str) -> Result<()> {
        let rows = self
            .executor
            .execute("DELETE FROM travel_notes WHERE id = ?", &[id.into()])
            .await?;

        if rows == 0 {
            return Err(AppError::not_found("Travel note", id));
        }

        tracing::debug!("Deleted travel note: {}", id);
        Ok(())
    }

    /// How often each mood was recorded on a trip, most frequent first
    pub async fn mood_counts(&self, trip_id: &str) -> Result<Vec<MoodCount>> {
        self.executor
            .fetch_all::<MoodCount>(
                r#"
                SELECT mood, COUNT(*) AS count
                FROM travel_notes
                WHERE trip_id = ? AND mood IS NOT NULL
                GROUP BY mood
                ORDER BY count DESC, mood ASC
                "#,
                &[trip_id.into()],
            )
            .await
    }

    /// Distinct locations mentioned in a trip's journal
    pub async fn note_locations(&self, trip_id: &str) -> Result<Vec<String>> {
        let rows: Vec<(String,)> = self
            .executor
            .fetch_all(
                r#"
                SELECT DISTINCT location
                FROM travel_notes
                WHERE trip_id = ? AND location IS NOT NULL AND location != ''
                ORDER BY location ASC
                "#,
                &[trip_id.into()],
            )
            .await?;

        Ok(rows.into_iter().map(|(location,)| location).collect())
    }
}
