//! Domain rules for the news and notes applications.
//!
//! Everything here is synchronous and free of I/O: the access policy, the
//! comment moderation filter, note slug assignment, listing order, and the
//! typed forms the HTTP layer deserializes into. Persistence lives in
//! `yahub-db`, transport in `yahub-api`.

pub mod access;
pub mod error;
pub mod forms;
pub mod listing;
pub mod moderation;
pub mod principal;
pub mod slug;
pub mod types;
