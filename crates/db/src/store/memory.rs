//! In-process [`ContentStore`] for tests and database-less development.
//!
//! Tables are plain vectors in insertion order behind one `RwLock`, so
//! every trait method observes and mutates a consistent snapshot. Listing
//! order comes from [`yahub_core::listing`], whose stable sorts reproduce the
//! Postgres `id` tie-break.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use yahub_core::listing::{newest_first, oldest_first};
use yahub_core::types::DbId;

use super::{ContentStore, StoreError, StoreResult};
use crate::models::comment::{Comment, CreateComment};
use crate::models::news::{CreateNews, News};
use crate::models::note::{CreateNote, Note, UpdateNote};
use crate::models::user::{CreateUser, User};

#[derive(Default)]
struct Tables {
    next_id: DbId,
    users: Vec<User>,
    news: Vec<News>,
    comments: Vec<Comment>,
    notes: Vec<Note>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn slug_taken(&self, slug: &str, except: Option<DbId>) -> bool {
        self.notes
            .iter()
            .any(|n| n.slug == slug && Some(n.id) != except)
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total comments across all news. Used by tests to assert nothing was
    /// persisted on rejection.
    pub async fn comment_count(&self) -> usize {
        self.tables.read().await.comments.len()
    }

    /// Total notes across all authors.
    pub async fn note_count(&self) -> usize {
        self.tables.read().await.notes.len()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == input.username) {
            return Err(StoreError::Conflict {
                field: "username",
                value: input.username.clone(),
            });
        }
        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_news(&self, input: &CreateNews) -> StoreResult<News> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let news = News {
            id: tables.next_id(),
            title: input.title.clone(),
            text: input.text.clone(),
            published_at: input.published_at.unwrap_or(now),
            created_at: now,
            updated_at: now,
        };
        tables.news.push(news.clone());
        Ok(news)
    }

    async fn find_news(&self, id: DbId) -> StoreResult<Option<News>> {
        let tables = self.tables.read().await;
        Ok(tables.news.iter().find(|n| n.id == id).cloned())
    }

    async fn list_latest_news(&self, limit: usize) -> StoreResult<Vec<News>> {
        let tables = self.tables.read().await;
        Ok(newest_first(tables.news.clone(), |n| n.published_at, limit))
    }

    async fn delete_news(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.news.len();
        tables.news.retain(|n| n.id != id);
        let deleted = tables.news.len() < before;
        if deleted {
            tables.comments.retain(|c| c.news_id != id);
        }
        Ok(deleted)
    }

    async fn create_comment(&self, input: &CreateComment) -> StoreResult<Comment> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let comment = Comment {
            id: tables.next_id(),
            news_id: input.news_id,
            author_id: input.author_id,
            text: input.text.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_comment(&self, id: DbId) -> StoreResult<Option<Comment>> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_comments(&self, news_id: DbId) -> StoreResult<Vec<Comment>> {
        let tables = self.tables.read().await;
        let thread = tables
            .comments
            .iter()
            .filter(|c| c.news_id == news_id)
            .cloned()
            .collect();
        Ok(oldest_first(thread, |c| c.created_at))
    }

    async fn update_comment_text(&self, id: DbId, text: &str) -> StoreResult<Option<Comment>> {
        let mut tables = self.tables.write().await;
        let Some(comment) = tables.comments.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        comment.text = text.to_string();
        comment.updated_at = Utc::now();
        Ok(Some(comment.clone()))
    }

    async fn delete_comment(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        Ok(tables.comments.len() < before)
    }

    async fn create_note(&self, input: &CreateNote) -> StoreResult<Note> {
        let mut tables = self.tables.write().await;
        if tables.slug_taken(&input.slug, None) {
            return Err(StoreError::Conflict {
                field: "slug",
                value: input.slug.clone(),
            });
        }
        let now = Utc::now();
        let note = Note {
            id: tables.next_id(),
            title: input.title.clone(),
            text: input.text.clone(),
            slug: input.slug.clone(),
            author_id: input.author_id,
            created_at: now,
            updated_at: now,
        };
        tables.notes.push(note.clone());
        Ok(note)
    }

    async fn find_note_by_slug(&self, slug: &str) -> StoreResult<Option<Note>> {
        let tables = self.tables.read().await;
        Ok(tables.notes.iter().find(|n| n.slug == slug).cloned())
    }

    async fn list_notes_by_author(&self, author_id: DbId) -> StoreResult<Vec<Note>> {
        let tables = self.tables.read().await;
        Ok(tables
            .notes
            .iter()
            .filter(|n| n.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn update_note(&self, id: DbId, input: &UpdateNote) -> StoreResult<Option<Note>> {
        let mut tables = self.tables.write().await;
        if tables.slug_taken(&input.slug, Some(id)) {
            return Err(StoreError::Conflict {
                field: "slug",
                value: input.slug.clone(),
            });
        }
        let Some(note) = tables.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        note.title = input.title.clone();
        note.text = input.text.clone();
        note.slug = input.slug.clone();
        note.updated_at = Utc::now();
        Ok(Some(note.clone()))
    }

    async fn delete_note(&self, id: DbId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.notes.len();
        tables.notes.retain(|n| n.id != id);
        Ok(tables.notes.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Duration;

    use super::*;

    async fn seed_user(store: &MemoryStore, name: &str) -> User {
        store
            .create_user(&CreateUser {
                username: name.into(),
                password_hash: "hash".into(),
            })
            .await
            .unwrap()
    }

    fn note(author_id: DbId, slug: &str) -> CreateNote {
        CreateNote {
            title: "title".into(),
            text: "text".into(),
            slug: slug.into(),
            author_id,
        }
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let store = MemoryStore::new();
        seed_user(&store, "author").await;
        let result = store
            .create_user(&CreateUser {
                username: "author".into(),
                password_hash: "other".into(),
            })
            .await;
        assert_matches!(result, Err(StoreError::Conflict { field: "username", .. }));
    }

    #[tokio::test]
    async fn latest_news_newest_first_and_limited() {
        let store = MemoryStore::new();
        let today = Utc::now();
        for i in 0..11 {
            store
                .create_news(&CreateNews {
                    title: format!("News {i}"),
                    text: "text".into(),
                    published_at: Some(today - Duration::days(i)),
                })
                .await
                .unwrap();
        }

        let page = store.list_latest_news(10).await.unwrap();
        assert_eq!(page.len(), 10);
        assert_eq!(page[0].title, "News 0");
        assert!(page.windows(2).all(|w| w[0].published_at >= w[1].published_at));
    }

    #[tokio::test]
    async fn deleting_news_cascades_to_comments() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "author").await;
        let news = store
            .create_news(&CreateNews {
                title: "t".into(),
                text: "t".into(),
                published_at: None,
            })
            .await
            .unwrap();
        store
            .create_comment(&CreateComment {
                news_id: news.id,
                author_id: user.id,
                text: "hi".into(),
            })
            .await
            .unwrap();

        assert!(store.delete_news(news.id).await.unwrap());
        assert_eq!(store.comment_count().await, 0);
    }

    #[tokio::test]
    async fn comments_listed_chronologically() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "author").await;
        let news = store
            .create_news(&CreateNews {
                title: "t".into(),
                text: "t".into(),
                published_at: None,
            })
            .await
            .unwrap();
        for i in 0..3 {
            store
                .create_comment(&CreateComment {
                    news_id: news.id,
                    author_id: user.id,
                    text: format!("comment {i}"),
                })
                .await
                .unwrap();
        }

        let texts: Vec<_> = store
            .list_comments(news.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, ["comment 0", "comment 1", "comment 2"]);
    }

    #[tokio::test]
    async fn duplicate_slug_conflicts_and_count_unchanged() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "author").await;
        store.create_note(&note(user.id, "slug")).await.unwrap();

        let result = store.create_note(&note(user.id, "slug")).await;
        assert_matches!(result, Err(StoreError::Conflict { field: "slug", .. }));
        assert_eq!(store.note_count().await, 1);
    }

    #[tokio::test]
    async fn update_note_may_keep_own_slug() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "author").await;
        let created = store.create_note(&note(user.id, "slug")).await.unwrap();

        let updated = store
            .update_note(
                created.id,
                &UpdateNote {
                    title: "new".into(),
                    text: "new".into(),
                    slug: "slug".into(),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "new");
        assert_eq!(updated.author_id, user.id);
    }

    #[tokio::test]
    async fn update_note_to_foreign_slug_conflicts() {
        let store = MemoryStore::new();
        let user = seed_user(&store, "author").await;
        store.create_note(&note(user.id, "taken")).await.unwrap();
        let mine = store.create_note(&note(user.id, "mine")).await.unwrap();

        let result = store
            .update_note(
                mine.id,
                &UpdateNote {
                    title: "t".into(),
                    text: "t".into(),
                    slug: "taken".into(),
                },
            )
            .await;
        assert_matches!(result, Err(StoreError::Conflict { field: "slug", .. }));
        let unchanged = store.find_note_by_slug("mine").await.unwrap();
        assert!(unchanged.is_some());
    }

    #[tokio::test]
    async fn notes_listed_by_author_only() {
        let store = MemoryStore::new();
        let author = seed_user(&store, "author").await;
        let other = seed_user(&store, "other").await;
        store.create_note(&note(author.id, "a")).await.unwrap();
        store.create_note(&note(other.id, "b")).await.unwrap();

        let notes = store.list_notes_by_author(author.id).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].slug, "a");
    }
}
