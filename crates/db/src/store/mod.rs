//! The content store the HTTP layer talks to.
//!
//! [`ContentStore`] abstracts over where records live so handlers can be
//! driven against Postgres in production and an in-memory store in tests
//! and local development. Every method is a single consistent operation;
//! handlers never hold a lock across calls.

use async_trait::async_trait;
use yahub_core::types::DbId;

use crate::models::comment::{Comment, CreateComment};
use crate::models::news::{CreateNews, News};
use crate::models::note::{CreateNote, Note, UpdateNote};
use crate::models::user::{CreateUser, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique field already holds `value`.
    #[error("Duplicate {field}: {value}")]
    Conflict { field: &'static str, value: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Confirm the backing storage is reachable.
    async fn health_check(&self) -> StoreResult<()>;

    // -- users ---------------------------------------------------------------

    /// Fails with [`StoreError::Conflict`] on field `username` if taken.
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    // -- news ----------------------------------------------------------------

    async fn create_news(&self, input: &CreateNews) -> StoreResult<News>;
    async fn find_news(&self, id: DbId) -> StoreResult<Option<News>>;
    /// Newest `published_at` first, at most `limit` items, ties in insertion order.
    async fn list_latest_news(&self, limit: usize) -> StoreResult<Vec<News>>;
    /// Deletes the news item and every comment attached to it.
    async fn delete_news(&self, id: DbId) -> StoreResult<bool>;

    // -- comments ------------------------------------------------------------

    async fn create_comment(&self, input: &CreateComment) -> StoreResult<Comment>;
    async fn find_comment(&self, id: DbId) -> StoreResult<Option<Comment>>;
    /// Oldest `created_at` first.
    async fn list_comments(&self, news_id: DbId) -> StoreResult<Vec<Comment>>;
    async fn update_comment_text(&self, id: DbId, text: &str) -> StoreResult<Option<Comment>>;
    async fn delete_comment(&self, id: DbId) -> StoreResult<bool>;

    // -- notes ---------------------------------------------------------------

    /// Fails with [`StoreError::Conflict`] on field `slug` if taken.
    async fn create_note(&self, input: &CreateNote) -> StoreResult<Note>;
    async fn find_note_by_slug(&self, slug: &str) -> StoreResult<Option<Note>>;
    async fn list_notes_by_author(&self, author_id: DbId) -> StoreResult<Vec<Note>>;
    /// Fails with [`StoreError::Conflict`] on field `slug` if another note
    /// holds the new slug.
    async fn update_note(&self, id: DbId, input: &UpdateNote) -> StoreResult<Option<Note>>;
    async fn delete_note(&self, id: DbId) -> StoreResult<bool>;
}
