//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod comment_repo;
pub mod news_repo;
pub mod note_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use news_repo::NewsRepo;
pub use note_repo::NoteRepo;
pub use user_repo::UserRepo;
