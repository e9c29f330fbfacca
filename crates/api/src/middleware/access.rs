//! Turns access policy decisions into handler errors.
//!
//! Handlers call [`CurrentPrincipal::permit`] before loading anything and
//! [`CurrentPrincipal::permit_record`] once the record is known. A denial
//! becomes [`AppError::LoginRequired`] (redirect to login) or a 404 that
//! does not reveal whether the record exists.

use std::fmt::Display;

use yahub_core::access::{authorize, authorize_kind, Action, Authored, Decision, Denial, RecordKind};
use yahub_core::error::CoreError;
use yahub_core::principal::UserRef;

use super::auth::CurrentPrincipal;
use crate::error::{AppError, AppResult};

impl CurrentPrincipal {
    /// Collection-level gate for `action` on `kind`.
    pub fn permit(&self, action: Action, kind: RecordKind) -> AppResult<()> {
        self.enforce(authorize_kind(&self.principal, action, kind), kind, &self.next)
    }

    /// Full check of `action` on `record`; `key` names it in a 404.
    pub fn permit_record<R: Authored>(
        &self,
        action: Action,
        record: &R,
        key: impl Display,
    ) -> AppResult<()> {
        self.enforce(authorize(&self.principal, action, record), R::KIND, key)
    }

    /// The authenticated user, or a login redirect for anonymous visitors.
    pub fn user(&self) -> AppResult<&UserRef> {
        self.principal.as_user().ok_or_else(|| self.login_required())
    }

    fn enforce(&self, decision: Decision, kind: RecordKind, key: impl Display) -> AppResult<()> {
        match decision {
            Decision::Allow => Ok(()),
            Decision::Deny(Denial::AuthRequired) => Err(self.login_required()),
            Decision::Deny(Denial::NotFound) => {
                Err(CoreError::not_found(kind.entity_name(), key).into())
            }
        }
    }

    fn login_required(&self) -> AppError {
        AppError::LoginRequired {
            next: self.next.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use yahub_core::principal::Principal;
    use yahub_core::types::DbId;

    use super::*;

    struct OwnedNote(DbId);

    impl Authored for OwnedNote {
        const KIND: RecordKind = RecordKind::Note;

        fn author_id(&self) -> DbId {
            self.0
        }
    }

    fn viewer(principal: Principal) -> CurrentPrincipal {
        CurrentPrincipal {
            principal,
            next: "/notes/edit/slug".into(),
        }
    }

    #[test]
    fn anonymous_gets_login_redirect_with_next() {
        let result = viewer(Principal::Anonymous).permit(Action::Edit, RecordKind::Note);
        assert_matches!(
            result,
            Err(AppError::LoginRequired { next }) if next == "/notes/edit/slug"
        );
    }

    #[test]
    fn non_author_gets_not_found() {
        let result =
            viewer(Principal::user(2, "other")).permit_record(Action::Edit, &OwnedNote(1), "slug");
        assert_matches!(
            result,
            Err(AppError::Core(CoreError::NotFound { entity: "Note", key })) if key == "slug"
        );
    }

    #[test]
    fn author_is_allowed() {
        let author = viewer(Principal::user(1, "author"));
        assert!(author.permit_record(Action::Delete, &OwnedNote(1), "slug").is_ok());
        assert_eq!(author.user().unwrap().id, 1);
    }
}
