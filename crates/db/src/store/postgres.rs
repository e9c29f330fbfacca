//! [`ContentStore`] backed by PostgreSQL through the repositories.

use async_trait::async_trait;
use yahub_core::types::DbId;

use super::{ContentStore, StoreError, StoreResult};
use crate::models::comment::{Comment, CreateComment};
use crate::models::news::{CreateNews, News};
use crate::models::note::{CreateNote, Note, UpdateNote};
use crate::models::user::{CreateUser, User};
use crate::repositories::{CommentRepo, NewsRepo, NoteRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL unique violation.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Turn a unique violation on `constraint` into a field conflict; pass every
/// other error through.
fn map_unique(
    err: sqlx::Error,
    constraint: &str,
    field: &'static str,
    value: &str,
) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
            && db_err.constraint() == Some(constraint)
        {
            tracing::debug!(constraint, field, value, "Unique constraint conflict");
            return StoreError::Conflict {
                field,
                value: value.to_string(),
            };
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl ContentStore for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        UserRepo::create(&self.pool, input)
            .await
            .map_err(|e| map_unique(e, "uq_users_username", "username", &input.username))
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn create_news(&self, input: &CreateNews) -> StoreResult<News> {
        Ok(NewsRepo::create(&self.pool, input).await?)
    }

    async fn find_news(&self, id: DbId) -> StoreResult<Option<News>> {
        Ok(NewsRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_latest_news(&self, limit: usize) -> StoreResult<Vec<News>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        Ok(NewsRepo::list_latest(&self.pool, limit).await?)
    }

    async fn delete_news(&self, id: DbId) -> StoreResult<bool> {
        Ok(NewsRepo::delete(&self.pool, id).await?)
    }

    async fn create_comment(&self, input: &CreateComment) -> StoreResult<Comment> {
        Ok(CommentRepo::create(&self.pool, input).await?)
    }

    async fn find_comment(&self, id: DbId) -> StoreResult<Option<Comment>> {
        Ok(CommentRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_comments(&self, news_id: DbId) -> StoreResult<Vec<Comment>> {
        Ok(CommentRepo::list_by_news(&self.pool, news_id).await?)
    }

    async fn update_comment_text(&self, id: DbId, text: &str) -> StoreResult<Option<Comment>> {
        Ok(CommentRepo::update_text(&self.pool, id, text).await?)
    }

    async fn delete_comment(&self, id: DbId) -> StoreResult<bool> {
        Ok(CommentRepo::delete(&self.pool, id).await?)
    }

    async fn create_note(&self, input: &CreateNote) -> StoreResult<Note> {
        NoteRepo::create(&self.pool, input)
            .await
            .map_err(|e| map_unique(e, "uq_notes_slug", "slug", &input.slug))
    }

    async fn find_note_by_slug(&self, slug: &str) -> StoreResult<Option<Note>> {
        Ok(NoteRepo::find_by_slug(&self.pool, slug).await?)
    }

    async fn list_notes_by_author(&self, author_id: DbId) -> StoreResult<Vec<Note>> {
        Ok(NoteRepo::list_by_author(&self.pool, author_id).await?)
    }

    async fn update_note(&self, id: DbId, input: &UpdateNote) -> StoreResult<Option<Note>> {
        NoteRepo::update(&self.pool, id, input)
            .await
            .map_err(|e| map_unique(e, "uq_notes_slug", "slug", &input.slug))
    }

    async fn delete_note(&self, id: DbId) -> StoreResult<bool> {
        Ok(NoteRepo::delete(&self.pool, id).await?)
    }
}
