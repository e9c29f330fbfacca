//! Request extractors and access enforcement.
//!
//! - [`auth::CurrentPrincipal`] -- Resolves the principal from an optional JWT Bearer token.
//! - [`access`] -- Maps access policy decisions onto [`crate::error::AppError`].

pub mod access;
pub mod auth;
