//! The actor behind a request.

use serde::Serialize;

use crate::types::DbId;

/// An authenticated account, as far as the access policy is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRef {
    pub id: DbId,
    pub username: String,
}

/// Who is issuing the request.
///
/// Resolved once per request by the HTTP layer and passed explicitly into
/// every policy function.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Principal {
    #[default]
    Anonymous,
    User(UserRef),
}

impl Principal {
    pub fn user(id: DbId, username: impl Into<String>) -> Self {
        Self::User(UserRef {
            id,
            username: username.into(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }

    /// The account id, or `None` for anonymous principals.
    pub fn id(&self) -> Option<DbId> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user.id),
        }
    }

    pub fn as_user(&self) -> Option<&UserRef> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user),
        }
    }
}
