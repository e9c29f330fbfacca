//! Comment model.

use serde::Serialize;
use sqlx::FromRow;
use yahub_core::access::{Authored, RecordKind};
use yahub_core::types::{DbId, Timestamp};

/// A row from the `comments` table. `news_id` and `author_id` are fixed at
/// creation; only `text` is editable.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: DbId,
    pub news_id: DbId,
    pub author_id: DbId,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Authored for Comment {
    const KIND: RecordKind = RecordKind::Comment;

    fn author_id(&self) -> DbId {
        self.author_id
    }
}

/// DTO for creating a comment.
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub news_id: DbId,
    pub author_id: DbId,
    pub text: String,
}
