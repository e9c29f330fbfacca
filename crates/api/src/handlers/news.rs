//! Handlers for the public news feed and its comment threads.

use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Serialize;
use yahub_core::access::{Action, RecordKind};
use yahub_core::error::CoreError;
use yahub_core::forms::{CommentForm, FormOutcome, FormView};
use yahub_core::types::DbId;
use yahub_db::models::comment::{Comment, CreateComment};
use yahub_db::models::news::News;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentPrincipal;
use crate::response::{found, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Page contexts
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct NewsHomeContext {
    pub object_list: Vec<News>,
}

/// `form` is only present for principals who may comment.
#[derive(Debug, Serialize)]
pub struct NewsDetailContext {
    pub news: News,
    pub comments: Vec<Comment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<FormView<CommentForm>>,
}

#[derive(Debug, Serialize)]
pub struct CommentEditContext {
    pub comment: Comment,
    pub form: FormView<CommentForm>,
}

#[derive(Debug, Serialize)]
pub struct CommentDeleteContext {
    pub comment: Comment,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a numeric id path segment. Anything else names no record.
fn parse_id(entity: &'static str, raw: &str) -> AppResult<DbId> {
    raw.parse().map_err(|_| AppError::Core(CoreError::not_found(entity, raw)))
}

fn thread_url(news_id: DbId) -> String {
    format!("/news/{news_id}#comments")
}

async fn load_news(state: &AppState, id: DbId) -> AppResult<News> {
    state
        .store
        .find_news(id)
        .await?
        .ok_or_else(|| CoreError::not_found("News", id).into())
}

async fn load_comment(state: &AppState, id: DbId) -> AppResult<Comment> {
    state
        .store
        .find_comment(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Comment", id).into())
}

async fn detail_context(
    state: &AppState,
    news: News,
    form: Option<FormView<CommentForm>>,
) -> AppResult<Json<DataResponse<NewsDetailContext>>> {
    let comments = state.store.list_comments(news.id).await?;
    Ok(Json(DataResponse {
        data: NewsDetailContext {
            news,
            comments,
            form,
        },
    }))
}

/// Load a comment and confirm `action` on it is allowed for `viewer`.
async fn authorized_comment(
    state: &AppState,
    viewer: &CurrentPrincipal,
    action: Action,
    id: DbId,
) -> AppResult<Comment> {
    viewer.permit(action, RecordKind::Comment)?;
    let comment = load_comment(state, id).await?;
    viewer.permit_record(action, &comment, id)?;
    Ok(comment)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /news
///
/// The newest news items, at most `NEWS_COUNT_ON_HOME_PAGE` of them.
pub async fn home(
    State(state): State<AppState>,
    viewer: CurrentPrincipal,
) -> AppResult<Json<DataResponse<NewsHomeContext>>> {
    viewer.permit(Action::List, RecordKind::News)?;
    let object_list = state
        .store
        .list_latest_news(state.config.news_count_on_home_page)
        .await?;
    Ok(Json(DataResponse {
        data: NewsHomeContext { object_list },
    }))
}

/// GET /news/{id}
pub async fn detail(
    State(state): State<AppState>,
    viewer: CurrentPrincipal,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<NewsDetailContext>>> {
    let id = parse_id("News", &id)?;
    viewer.permit(Action::View, RecordKind::News)?;
    let news = load_news(&state, id).await?;

    let form = viewer
        .permit(Action::Create, RecordKind::Comment)
        .is_ok()
        .then(|| FormView::blank(CommentForm::NAME, CommentForm::default()));

    detail_context(&state, news, form).await
}

/// POST /news/{id}
///
/// Post a comment. Redirects to the thread on success; re-renders the page
/// with field errors when the form is rejected. The body is only read once
/// the principal may comment.
pub async fn create_comment(
    State(state): State<AppState>,
    viewer: CurrentPrincipal,
    Path(id): Path<String>,
    form: Result<Form<CommentForm>, FormRejection>,
) -> AppResult<Response> {
    let id = parse_id("News", &id)?;
    viewer.permit(Action::Create, RecordKind::Comment)?;
    let author = viewer.user()?;
    let news = load_news(&state, id).await?;
    let Form(form) = form?;

    match form.clean(&state.moderation) {
        FormOutcome::Accepted(text) => {
            let comment = state
                .store
                .create_comment(&CreateComment {
                    news_id: news.id,
                    author_id: author.id,
                    text,
                })
                .await?;
            tracing::info!(
                user_id = author.id,
                news_id = news.id,
                comment_id = comment.id,
                "Comment created"
            );
            Ok(found(thread_url(news.id)))
        }
        FormOutcome::Rejected(errors) => {
            tracing::debug!(user_id = author.id, news_id = news.id, "Comment rejected");
            let form = FormView::with_errors(CommentForm::NAME, form, errors);
            Ok(detail_context(&state, news, Some(form)).await?.into_response())
        }
    }
}

/// GET /news/comments/{id}/edit
pub async fn edit_comment_page(
    State(state): State<AppState>,
    viewer: CurrentPrincipal,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<CommentEditContext>>> {
    let id = parse_id("Comment", &id)?;
    let comment = authorized_comment(&state, &viewer, Action::Edit, id).await?;
    let form = FormView::blank(
        CommentForm::NAME,
        CommentForm {
            text: comment.text.clone(),
        },
    );
    Ok(Json(DataResponse {
        data: CommentEditContext { comment, form },
    }))
}

/// POST /news/comments/{id}/edit
///
/// Only the text changes; the comment keeps its news item and author.
pub async fn edit_comment(
    State(state): State<AppState>,
    viewer: CurrentPrincipal,
    Path(id): Path<String>,
    form: Result<Form<CommentForm>, FormRejection>,
) -> AppResult<Response> {
    let id = parse_id("Comment", &id)?;
    let comment = authorized_comment(&state, &viewer, Action::Edit, id).await?;
    let Form(form) = form?;

    match form.clean(&state.moderation) {
        FormOutcome::Accepted(text) => {
            let updated = state
                .store
                .update_comment_text(comment.id, &text)
                .await?
                .ok_or_else(|| AppError::Core(CoreError::not_found("Comment", id)))?;
            tracing::info!(
                user_id = updated.author_id,
                comment_id = updated.id,
                "Comment updated"
            );
            Ok(found(thread_url(updated.news_id)))
        }
        FormOutcome::Rejected(errors) => {
            let form = FormView::with_errors(CommentForm::NAME, form, errors);
            Ok(Json(DataResponse {
                data: CommentEditContext { comment, form },
            })
            .into_response())
        }
    }
}

/// GET /news/comments/{id}/delete
pub async fn delete_comment_page(
    State(state): State<AppState>,
    viewer: CurrentPrincipal,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<CommentDeleteContext>>> {
    let id = parse_id("Comment", &id)?;
    let comment = authorized_comment(&state, &viewer, Action::Delete, id).await?;
    Ok(Json(DataResponse {
        data: CommentDeleteContext { comment },
    }))
}

/// POST /news/comments/{id}/delete
pub async fn delete_comment(
    State(state): State<AppState>,
    viewer: CurrentPrincipal,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id("Comment", &id)?;
    let comment = authorized_comment(&state, &viewer, Action::Delete, id).await?;

    if !state.store.delete_comment(comment.id).await? {
        return Err(CoreError::not_found("Comment", id).into());
    }
    tracing::info!(
        user_id = comment.author_id,
        comment_id = comment.id,
        "Comment deleted"
    );
    Ok(found(thread_url(comment.news_id)))
}
