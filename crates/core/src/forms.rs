//! Typed forms for comments, notes and accounts.
//!
//! Each form deserializes from a submitted body, runs `validator` rules plus
//! its domain checks in `clean`, and yields a [`FormOutcome`]: either the
//! cleaned value or field-scoped errors that the caller re-renders alongside
//! the submitted data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::moderation::{ModerationFilter, Verdict};
use crate::slug::{validate_slug_format, MAX_SLUG_LENGTH};

/// Message for a missing required field.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Maximum note title length in characters.
pub const MAX_NOTE_TITLE_LENGTH: usize = 100;

/// Maximum username length in characters.
pub const MAX_USERNAME_LENGTH: usize = 150;

// ---------------------------------------------------------------------------
// Errors and outcomes
// ---------------------------------------------------------------------------

/// A single error attached to a named form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Field name → messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn add(&mut self, error: FieldError) {
        self.0.entry(error.field).or_default().push(error.message);
    }

    /// Messages for `field`, empty if it has none.
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    fn from_validation(errors: &ValidationErrors) -> Self {
        let mut out = Self::default();
        for (field, errs) in errors.field_errors() {
            for err in errs {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.add(FieldError::new(field.to_string(), message));
            }
        }
        out
    }
}

impl From<FieldError> for FormErrors {
    fn from(error: FieldError) -> Self {
        let mut errors = Self::default();
        errors.add(error);
        errors
    }
}

/// Result of cleaning a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome<T> {
    Accepted(T),
    Rejected(FormErrors),
}

/// Run `validator` rules, returning the collected field errors.
fn validation_errors<F: Validate>(form: &F) -> FormErrors {
    match form.validate() {
        Ok(()) => FormErrors::default(),
        Err(errors) => FormErrors::from_validation(&errors),
    }
}

/// A form as handed to a page: its name, the submitted (or initial) data,
/// and any errors.
#[derive(Debug, Clone, Serialize)]
pub struct FormView<T: Serialize> {
    pub name: &'static str,
    pub data: T,
    pub errors: FormErrors,
}

impl<T: Serialize> FormView<T> {
    pub fn blank(name: &'static str, data: T) -> Self {
        Self {
            name,
            data,
            errors: FormErrors::default(),
        }
    }

    pub fn with_errors(name: &'static str, data: T, errors: FormErrors) -> Self {
        Self { name, data, errors }
    }
}

// ---------------------------------------------------------------------------
// Comment form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub text: String,
}

impl CommentForm {
    pub const NAME: &'static str = "CommentForm";

    /// Validate the text and run it through the moderation filter. Accepted
    /// text is returned verbatim.
    pub fn clean(&self, filter: &ModerationFilter) -> FormOutcome<String> {
        let mut errors = validation_errors(self);
        if errors.is_empty() {
            if let Verdict::Reject { reason } = filter.validate_comment_text(&self.text) {
                errors.add(FieldError::new("text", reason));
            }
        }

        if errors.is_empty() {
            FormOutcome::Accepted(self.text.clone())
        } else {
            FormOutcome::Rejected(errors)
        }
    }
}

// ---------------------------------------------------------------------------
// Note form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NoteForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Title must be 1 to 100 characters."))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub text: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "Slug must be at most 100 characters."))]
    pub slug: Option<String>,
}

/// A cleaned note submission. `slug` is `None` when the client left it blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub text: String,
    pub slug: Option<String>,
}

impl NoteForm {
    pub const NAME: &'static str = "NoteForm";

    /// The requested slug, trimmed, or `None` when blank.
    pub fn requested_slug(&self) -> Option<&str> {
        self.slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn clean(&self) -> FormOutcome<NoteDraft> {
        let mut errors = validation_errors(self);
        let slug = self.requested_slug();
        if let Some(slug) = slug {
            if let Err(err) = validate_slug_format(slug) {
                errors.add(err);
            }
        }

        if !errors.is_empty() {
            return FormOutcome::Rejected(errors);
        }

        FormOutcome::Accepted(NoteDraft {
            title: self.title.clone(),
            text: self.text.clone(),
            slug: slug.map(str::to_string),
        })
    }
}

// ---------------------------------------------------------------------------
// Account forms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SignupForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 150, message = "Username must be 1 to 150 characters."))]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// What a signup page may echo back. Passwords are never echoed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountFormData {
    pub username: String,
}

impl SignupForm {
    pub const NAME: &'static str = "UserCreationForm";

    pub fn echo(&self) -> AccountFormData {
        AccountFormData {
            username: self.username.clone(),
        }
    }

    /// Validate the username alphabet and the password length.
    pub fn clean(&self, min_password_length: usize) -> FormOutcome<(String, String)> {
        let mut errors = validation_errors(self);

        let username_ok = self
            .username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c));
        if !username_ok {
            errors.add(FieldError::new(
                "username",
                "Username may contain only letters, numbers, and @/./+/-/_ characters.",
            ));
        }

        if self.password.chars().count() < min_password_length {
            errors.add(FieldError::new(
                "password",
                format!("Password must be at least {min_password_length} characters long"),
            ));
        }

        if errors.is_empty() {
            FormOutcome::Accepted((self.username.clone(), self.password.clone()))
        } else {
            FormOutcome::Rejected(errors)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub const NAME: &'static str = "AuthenticationForm";
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
