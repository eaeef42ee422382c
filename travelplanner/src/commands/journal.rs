//! Travel journal commands

use super::{current_trip, owned_trip, parse_date, CommandResponse, Session};
use crate::app::AppState;
use crate::config::SUGGESTED_MOODS;
use crate::database::{MoodCount, TravelNote, TravelNoteInput};
use crate::error::Result;

/// Note fields as collected from a form
#[derive(Debug, Clone, Default)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
    pub date: String,
    pub location: Option<String>,
    pub mood: Option<String>,
}

impl NoteForm {
    fn into_input(self) -> Result<TravelNoteInput> {
        Ok(TravelNoteInput {
            date: parse_date("Date", &self.date)?,
            title: self.title,
            content: self.content,
            location: self.location,
            mood: self.mood,
        })
    }
}

pub async fn add_note(state: &AppState, session: &Session, form: NoteForm) -> CommandResponse<TravelNote> {
    let result: Result<TravelNote> = async {
        let input = form.into_input()?;
        let trip = current_trip(state, session).await?;
        state.journal_service.create_note(&trip.id, input).await
    }
    .await;

    CommandResponse::from_result("add_note", result, |_| {
        "Travel note added successfully".to_string()
    })
}

pub async fn list_notes(state: &AppState, session: &Session) -> CommandResponse<Vec<TravelNote>> {
    let result: Result<Vec<TravelNote>> = async {
        let trip = current_trip(state, session).await?;
        state.journal_service.list_notes(&trip.id).await
    }
    .await;

    CommandResponse::from_result("list_notes", result, |notes| {
        format!("{} note(s)", notes.len())
    })
}

pub async fn get_note(state: &AppState, session: &Session, note_id: &str) -> CommandResponse<TravelNote> {
    let result: Result<TravelNote> = async {
        let note = state.journal_service.get_note(note_id).await?;
        owned_trip(state, session, &note.trip_id).await?;
        Ok(note)
    }
    .await;

    CommandResponse::from_result("get_note", result, |_| String::new())
}

pub async fn update_note(
    state: &AppState,
    session: &Session,
    note_id: &str,
    form: NoteForm,
) -> CommandResponse<TravelNote> {
    let result: Result<TravelNote> = async {
        let input = form.into_input()?;
        let note = state.journal_service.get_note(note_id).await?;
        owned_trip(state, session, &note.trip_id).await?;
        state.journal_service.update_note(note_id, input).await
    }
    .await;

    CommandResponse::from_result("update_note", result, |_| {
        "Travel note updated successfully".to_string()
    })
}

pub async fn delete_note(state: &AppState, session: &Session, note_id: &str) -> CommandResponse<()> {
    let result: Result<()> = async {
        let note = state.journal_service.get_note(note_id).await?;
        owned_trip(state, session, &note.trip_id).await?;
        state.journal_service.delete_note(note_id).await
    }
    .await;

    CommandResponse::from_result("delete_note", result, |_| {
        "Travel note deleted successfully".to_string()
    })
}

pub async fn mood_counts(state: &AppState, session: &Session) -> CommandResponse<Vec<MoodCount>> {
    let result: Result<Vec<MoodCount>> = async {
        let trip = current_trip(state, session).await?;
        state.journal_service.mood_counts(&trip.id).await
    }
    .await;

    CommandResponse::from_result("mood_counts", result, |_| String::new())
}

pub async fn note_locations(state: &AppState, session: &Session) -> CommandResponse<Vec<String>> {
    let result: Result<Vec<String>> = async {
        let trip = current_trip(state, session).await?;
        state.journal_service.locations(&trip.id).await
    }
    .await;

    CommandResponse::from_result("note_locations", result, |_| String::new())
}

/// Mood labels offered when writing a note
pub fn suggested_moods() -> CommandResponse<Vec<&'static str>> {
    CommandResponse::ok(SUGGESTED_MOODS.to_vec(), "")
}
