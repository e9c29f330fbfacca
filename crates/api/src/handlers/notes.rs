//! Handlers for the private notes manager.
//!
//! Every page except the landing page requires a login, and a note is only
//! visible to its author. Notes are addressed by slug.

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Serialize;
use yahub_core::access::{owned_by, Action, RecordKind};
use yahub_core::error::CoreError;
use yahub_core::forms::{FieldError, FormErrors, FormOutcome, FormView, NoteDraft, NoteForm};
use yahub_core::principal::UserRef;
use yahub_core::slug::{assign_slug, candidate_slug, duplicate_slug_error};
use yahub_core::types::DbId;
use yahub_db::models::note::{CreateNote, Note, UpdateNote};
use yahub_db::store::StoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentPrincipal;
use crate::response::{found, DataResponse};
use crate::state::AppState;

/// Where every successful note mutation lands.
pub const SUCCESS_URL: &str = "/notes/done";

// ---------------------------------------------------------------------------
// Page contexts
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct LandingContext {
    pub user: Option<UserRef>,
}

#[derive(Debug, Serialize)]
pub struct NoteListContext {
    pub object_list: Vec<Note>,
}

#[derive(Debug, Serialize)]
pub struct NoteFormContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<Note>,
    pub form: FormView<NoteForm>,
}

#[derive(Debug, Serialize)]
pub struct NoteContext {
    pub note: Note,
}

#[derive(Debug, Serialize)]
pub struct DoneContext {
    pub user: UserRef,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the note at `slug` and confirm `action` on it is allowed.
async fn authorized_note(
    state: &AppState,
    viewer: &CurrentPrincipal,
    action: Action,
    slug: &str,
) -> AppResult<Note> {
    viewer.permit(action, RecordKind::Note)?;
    let note = state
        .store
        .find_note_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Note", slug)))?;
    viewer.permit_record(action, &note, slug)?;
    Ok(note)
}

/// Resolve the slug `draft` will be stored under. `own_id` is the note being
/// edited, whose current slug does not count as taken.
async fn resolve_slug(
    state: &AppState,
    draft: &NoteDraft,
    own_id: Option<DbId>,
) -> AppResult<Result<String, FieldError>> {
    let candidate = candidate_slug(&draft.title, draft.slug.as_deref());
    let taken = match state.store.find_note_by_slug(&candidate).await? {
        Some(existing) => Some(existing.id) != own_id,
        None => false,
    };
    Ok(assign_slug(&draft.title, draft.slug.as_deref(), |_| taken))
}

/// A slug conflict reported by the store becomes the same field error as the
/// pre-check; anything else propagates.
fn slug_conflict(err: StoreError) -> AppResult<FieldError> {
    match err {
        StoreError::Conflict { field: "slug", value } => Ok(duplicate_slug_error(&value)),
        other => Err(other.into()),
    }
}

fn form_page(note: Option<Note>, form: NoteForm, errors: FormErrors) -> Response {
    Json(DataResponse {
        data: NoteFormContext {
            note,
            form: FormView::with_errors(NoteForm::NAME, form, errors),
        },
    })
    .into_response()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /notes
///
/// Landing page, open to everyone.
pub async fn landing(viewer: CurrentPrincipal) -> Json<DataResponse<LandingContext>> {
    Json(DataResponse {
        data: LandingContext {
            user: viewer.principal.as_user().cloned(),
        },
    })
}

/// GET /notes/list
///
/// The current user's notes and nobody else's.
pub async fn list(
    State(state): State<AppState>,
    viewer: CurrentPrincipal,
) -> AppResult<Json<DataResponse<NoteListContext>>> {
    viewer.permit(Action::List, RecordKind::Note)?;
    let user = viewer.user()?;
    let notes = state.store.list_notes_by_author(user.id).await?;
    Ok(Json(DataResponse {
        data: NoteListContext {
            object_list: owned_by(&viewer.principal, notes),
        },
    }))
}

/// GET /notes/add
pub async fn add_page(viewer: CurrentPrincipal) -> AppResult<Json<DataResponse<NoteFormContext>>> {
    viewer.permit(Action::Create, RecordKind::Note)?;
    Ok(Json(DataResponse {
        data: NoteFormContext {
            note: None,
            form: FormView::blank(NoteForm::NAME, NoteForm::default()),
        },
    }))
}

/// POST /notes/add
///
/// A blank slug is derived from the title. Either way the slug must be free.
pub async fn add(
    State(state): State<AppState>,
    viewer: CurrentPrincipal,
    form: Result<Form<NoteForm>, FormRejection>,
) -> AppResult<Response> {
    viewer.permit(Action::Create, RecordKind::Note)?;
    let author = viewer.user()?;
    let Form(form) = form?;

    let draft = match form.clean() {
        FormOutcome::Accepted(draft) => draft,
        FormOutcome::Rejected(errors) => return Ok(form_page(None, form, errors)),
    };
    let slug = match resolve_slug(&state, &draft, None).await? {
        Ok(slug) => slug,
        Err(err) => return Ok(form_page(None, form, err.into())),
    };

    let input = CreateNote {
        title: draft.title,
        text: draft.text,
        slug,
        author_id: author.id,
    };
    match state.store.create_note(&input).await {
        Ok(note) => {
            tracing::info!(
                user_id = author.id,
                note_id = note.id,
                slug = %note.slug,
                "Note created"
            );
            Ok(found(SUCCESS_URL))
        }
        Err(err) => Ok(form_page(None, form, slug_conflict(err)?.into())),
    }
}

/// GET /notes/done
pub async fn done(viewer: CurrentPrincipal) -> AppResult<Json<DataResponse<DoneContext>>> {
    viewer.permit(Action::List, RecordKind::Note)?;
    let user = viewer.user()?.clone();
    Ok(Json(DataResponse {
        data: DoneContext { user },
    }))
}

/// GET /notes/note/{slug}
pub async fn detail(
    State(state): State<AppState>,
    viewer: CurrentPrincipal,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<NoteContext>>> {
    let note = authorized_note(&state, &viewer, Action::View, &slug).await?;
    Ok(Json(DataResponse {
        data: NoteContext { note },
    }))
}

/// GET /notes/edit/{slug}
pub async fn edit_page(
    State(state): State<AppState>,
    viewer: CurrentPrincipal,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<NoteFormContext>>> {
    let note = authorized_note(&state, &viewer, Action::Edit, &slug).await?;
    let form = NoteForm {
        title: note.title.clone(),
        text: note.text.clone(),
        slug: Some(note.slug.clone()),
    };
    Ok(Json(DataResponse {
        data: NoteFormContext {
            note: Some(note),
            form: FormView::blank(NoteForm::NAME, form),
        },
    }))
}

/// POST /notes/edit/{slug}
///
/// Replaces title, text and slug. The author never changes.
pub async fn edit(
    State(state): State<AppState>,
    viewer: CurrentPrincipal,
    Path(slug): Path<String>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> AppResult<Response> {
    let note = authorized_note(&state, &viewer, Action::Edit, &slug).await?;
    let Form(form) = form?;

    let draft = match form.clean() {
        FormOutcome::Accepted(draft) => draft,
        FormOutcome::Rejected(errors) => return Ok(form_page(Some(note), form, errors)),
    };
    let new_slug = match resolve_slug(&state, &draft, Some(note.id)).await? {
        Ok(new_slug) => new_slug,
        Err(err) => return Ok(form_page(Some(note), form, err.into())),
    };

    let input = UpdateNote {
        title: draft.title,
        text: draft.text,
        slug: new_slug,
    };
    match state.store.update_note(note.id, &input).await {
        Ok(Some(updated)) => {
            tracing::info!(
                user_id = updated.author_id,
                note_id = updated.id,
                slug = %updated.slug,
                "Note updated"
            );
            Ok(found(SUCCESS_URL))
        }
        Ok(None) => Err(CoreError::not_found("Note", slug).into()),
        Err(err) => Ok(form_page(Some(note), form, slug_conflict(err)?.into())),
    }
}

/// GET /notes/delete/{slug}
pub async fn delete_page(
    State(state): State<AppState>,
    viewer: CurrentPrincipal,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<NoteContext>>> {
    let note = authorized_note(&state, &viewer, Action::Delete, &slug).await?;
    Ok(Json(DataResponse {
        data: NoteContext { note },
    }))
}

/// POST|DELETE /notes/delete/{slug}
pub async fn delete(
    State(state): State<AppState>,
    viewer: CurrentPrincipal,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let note = authorized_note(&state, &viewer, Action::Delete, &slug).await?;

    if !state.store.delete_note(note.id).await? {
        return Err(CoreError::not_found("Note", slug).into());
    }
    tracing::info!(user_id = note.author_id, note_id = note.id, "Note deleted");
    Ok(found(SUCCESS_URL))
}
