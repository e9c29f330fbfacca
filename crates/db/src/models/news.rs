//! News item model.

use serde::Serialize;
use sqlx::FromRow;
use yahub_core::types::{DbId, Timestamp};

/// A row from the `news` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct News {
    pub id: DbId,
    pub title: String,
    pub text: String,
    pub published_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a news item. `published_at` defaults to now.
#[derive(Debug, Clone)]
pub struct CreateNews {
    pub title: String,
    pub text: String,
    pub published_at: Option<Timestamp>,
}
