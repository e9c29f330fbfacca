//! Access policy for news, comments and notes.
//!
//! Rights are decided by author identity alone; there are no roles. Two
//! kinds of denial exist and handlers surface them differently:
//!
//! - [`Denial::AuthRequired`] -- the principal is anonymous and the action is
//!   protected. Surfaced as a redirect to the login page.
//! - [`Denial::NotFound`] -- the principal is authenticated but does not own
//!   the record. Surfaced exactly like a missing record so other users'
//!   records cannot be probed.
//!
//! Authentication is always checked before ownership.

use serde::Serialize;

use crate::principal::Principal;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    List,
    Create,
    Edit,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    News,
    Comment,
    Note,
}

impl RecordKind {
    /// Entity name used in not-found errors and log fields.
    pub fn entity_name(self) -> &'static str {
        match self {
            Self::News => "News",
            Self::Comment => "Comment",
            Self::Note => "Note",
        }
    }
}

/// What a principal must be for an action on a record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Anyone, including anonymous principals.
    Public,
    /// Any authenticated principal.
    Authenticated,
    /// The record's author.
    Author,
    /// Nobody through this surface (news are managed out of band).
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    AuthRequired,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }

    pub fn into_result(self) -> Result<(), Denial> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(denial) => Err(denial),
        }
    }
}

/// A record that belongs to exactly one author.
pub trait Authored {
    const KIND: RecordKind;

    fn author_id(&self) -> DbId;
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// The requirement table.
pub fn requirement(kind: RecordKind, action: Action) -> Requirement {
    use Action::*;
    use RecordKind::*;

    match (kind, action) {
        (News, View | List) => Requirement::Public,
        (News, Create | Edit | Delete) => Requirement::Unavailable,

        (Comment, View | List) => Requirement::Public,
        (Comment, Create) => Requirement::Authenticated,
        (Comment, Edit | Delete) => Requirement::Author,

        (Note, List | Create) => Requirement::Authenticated,
        (Note, View | Edit | Delete) => Requirement::Author,
    }
}

/// Collection-level check, evaluated before any record is loaded.
///
/// For [`Requirement::Author`] this only performs the authentication half;
/// ownership must then be confirmed with [`authorize`] once the record is
/// known. Calling this first is what guarantees that an anonymous principal
/// gets [`Denial::AuthRequired`] even for a record that does not exist.
pub fn authorize_kind(principal: &Principal, action: Action, kind: RecordKind) -> Decision {
    match requirement(kind, action) {
        Requirement::Public => Decision::Allow,
        _ if !principal.is_authenticated() => Decision::Deny(Denial::AuthRequired),
        Requirement::Authenticated | Requirement::Author => Decision::Allow,
        Requirement::Unavailable => Decision::Deny(Denial::NotFound),
    }
}

/// Full check of `action` by `principal` on `record`.
pub fn authorize<R: Authored>(principal: &Principal, action: Action, record: &R) -> Decision {
    match authorize_kind(principal, action, R::KIND) {
        Decision::Allow => {}
        denied => return denied,
    }

    if requirement(R::KIND, action) != Requirement::Author {
        return Decision::Allow;
    }

    if principal.id() == Some(record.author_id()) {
        Decision::Allow
    } else {
        Decision::Deny(Denial::NotFound)
    }
}

/// Keep only the records authored by `principal`. Anonymous principals own
/// nothing.
pub fn owned_by<R: Authored>(principal: &Principal, records: Vec<R>) -> Vec<R> {
    match principal.id() {
        Some(id) => records.into_iter().filter(|r| r.author_id() == id).collect(),
        None => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeNote {
        author_id: DbId,
    }

    impl Authored for FakeNote {
        const KIND: RecordKind = RecordKind::Note;

        fn author_id(&self) -> DbId {
            self.author_id
        }
    }

    struct FakeComment {
        author_id: DbId,
    }

    impl Authored for FakeComment {
        const KIND: RecordKind = RecordKind::Comment;

        fn author_id(&self) -> DbId {
            self.author_id
        }
    }

    fn author() -> Principal {
        Principal::user(1, "author")
    }

    fn reader() -> Principal {
        Principal::user(2, "reader")
    }

    // -- news ----------------------------------------------------------------

    #[test]
    fn news_is_public() {
        for principal in [Principal::Anonymous, reader()] {
            assert!(authorize_kind(&principal, Action::List, RecordKind::News).is_allowed());
            assert!(authorize_kind(&principal, Action::View, RecordKind::News).is_allowed());
        }
    }

    #[test]
    fn news_mutation_unavailable() {
        assert_eq!(
            authorize_kind(&reader(), Action::Edit, RecordKind::News),
            Decision::Deny(Denial::NotFound)
        );
        assert_eq!(
            authorize_kind(&Principal::Anonymous, Action::Delete, RecordKind::News),
            Decision::Deny(Denial::AuthRequired)
        );
    }

    // -- comments ------------------------------------------------------------

    #[test]
    fn anonymous_cannot_create_comment() {
        assert_eq!(
            authorize_kind(&Principal::Anonymous, Action::Create, RecordKind::Comment),
            Decision::Deny(Denial::AuthRequired)
        );
        assert!(authorize_kind(&reader(), Action::Create, RecordKind::Comment).is_allowed());
    }

    #[test]
    fn comment_edit_and_delete_by_author_only() {
        let comment = FakeComment { author_id: 1 };
        for action in [Action::Edit, Action::Delete] {
            assert!(authorize(&author(), action, &comment).is_allowed());
            assert_eq!(
                authorize(&reader(), action, &comment),
                Decision::Deny(Denial::NotFound)
            );
            assert_eq!(
                authorize(&Principal::Anonymous, action, &comment),
                Decision::Deny(Denial::AuthRequired)
            );
        }
    }

    #[test]
    fn anyone_can_view_comment() {
        let comment = FakeComment { author_id: 1 };
        assert!(authorize(&Principal::Anonymous, Action::View, &comment).is_allowed());
        assert!(authorize(&reader(), Action::View, &comment).is_allowed());
    }

    // -- notes ---------------------------------------------------------------

    #[test]
    fn note_actions_by_author_only() {
        let note = FakeNote { author_id: 1 };
        for action in [Action::View, Action::Edit, Action::Delete] {
            assert!(authorize(&author(), action, &note).is_allowed());
            assert_eq!(
                authorize(&reader(), action, &note),
                Decision::Deny(Denial::NotFound)
            );
        }
    }

    #[test]
    fn anonymous_gets_auth_required_before_ownership() {
        let note = FakeNote { author_id: 2 };
        for action in [Action::View, Action::Edit, Action::Delete] {
            assert_eq!(
                authorize(&Principal::Anonymous, action, &note),
                Decision::Deny(Denial::AuthRequired)
            );
            assert_eq!(
                authorize_kind(&Principal::Anonymous, action, RecordKind::Note),
                Decision::Deny(Denial::AuthRequired)
            );
        }
    }

    #[test]
    fn note_list_and_create_need_authentication() {
        for action in [Action::List, Action::Create] {
            assert!(authorize_kind(&reader(), action, RecordKind::Note).is_allowed());
            assert_eq!(
                authorize_kind(&Principal::Anonymous, action, RecordKind::Note),
                Decision::Deny(Denial::AuthRequired)
            );
        }
    }

    #[test]
    fn owned_by_filters_foreign_records() {
        let notes = vec![
            FakeNote { author_id: 1 },
            FakeNote { author_id: 2 },
            FakeNote { author_id: 1 },
        ];
        let mine = owned_by(&author(), notes);
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|n| n.author_id == 1));
    }

    #[test]
    fn owned_by_anonymous_is_empty() {
        let notes = vec![FakeNote { author_id: 1 }];
        assert!(owned_by(&Principal::Anonymous, notes).is_empty());
    }

    #[test]
    fn decision_into_result() {
        assert_eq!(Decision::Allow.into_result(), Ok(()));
        assert_eq!(
            Decision::Deny(Denial::NotFound).into_result(),
            Err(Denial::NotFound)
        );
    }
}
