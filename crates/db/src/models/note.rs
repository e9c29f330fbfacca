//! Note model.

use serde::Serialize;
use sqlx::FromRow;
use yahub_core::access::{Authored, RecordKind};
use yahub_core::types::{DbId, Timestamp};

/// A row from the `notes` table. `slug` is unique across all notes.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Note {
    pub id: DbId,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Authored for Note {
    const KIND: RecordKind = RecordKind::Note;

    fn author_id(&self) -> DbId {
        self.author_id
    }
}

/// DTO for creating a note. The slug is already resolved.
#[derive(Debug, Clone)]
pub struct CreateNote {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub author_id: DbId,
}

/// DTO for replacing a note's editable fields. The author never changes.
#[derive(Debug, Clone)]
pub struct UpdateNote {
    pub title: String,
    pub text: String,
    pub slug: String,
}
