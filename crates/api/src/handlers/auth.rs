//! Handlers for the `/auth` resource (signup, login, logout).

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use yahub_core::error::CoreError;
use yahub_core::forms::{
    AccountFormData, FieldError, FormErrors, FormOutcome, FormView, LoginForm, SignupForm,
};
use yahub_db::models::user::{CreateUser, UserResponse};
use yahub_db::store::StoreError;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentPrincipal;
use crate::response::{found, DataResponse, LOGIN_URL};
use crate::state::AppState;

/// Where a login lands when no usable `next` was supplied.
pub const DEFAULT_LOGIN_REDIRECT: &str = "/news";

const USERNAME_TAKEN_MESSAGE: &str = "A user with that username already exists.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query string of the login page.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccountFormContext {
    pub form: FormView<AccountFormData>,
}

#[derive(Debug, Serialize)]
pub struct LoginPageContext {
    pub form: FormView<AccountFormData>,
    pub next: String,
}

/// Successful authentication response returned by login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
    /// Where the client should go next.
    pub next: String,
}

#[derive(Debug, Serialize)]
pub struct LogoutContext {
    pub logged_out: bool,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Accept only local absolute paths as a return target.
fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path.to_string()
        }
        _ => DEFAULT_LOGIN_REDIRECT.to_string(),
    }
}

fn render_signup(form: &SignupForm, errors: FormErrors) -> Response {
    Json(DataResponse {
        data: AccountFormContext {
            form: FormView::with_errors(SignupForm::NAME, form.echo(), errors),
        },
    })
    .into_response()
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /auth/signup
pub async fn signup_page() -> Json<DataResponse<AccountFormContext>> {
    Json(DataResponse {
        data: AccountFormContext {
            form: FormView::blank(SignupForm::NAME, AccountFormData::default()),
        },
    })
}

/// POST /auth/signup
///
/// Create an account and send the visitor to the login page.
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    let (username, password) = match form.clean(state.config.min_password_length) {
        FormOutcome::Accepted(credentials) => credentials,
        FormOutcome::Rejected(errors) => return Ok(render_signup(&form, errors)),
    };

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    match state
        .store
        .create_user(&CreateUser {
            username,
            password_hash,
        })
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = user.id, username = %user.username, "User registered");
            Ok(found(LOGIN_URL))
        }
        Err(StoreError::Conflict { field: "username", .. }) => Ok(render_signup(
            &form,
            FieldError::new("username", USERNAME_TAKEN_MESSAGE).into(),
        )),
        Err(err) => Err(err.into()),
    }
}

/// GET /auth/login
pub async fn login_page(Query(query): Query<NextQuery>) -> Json<DataResponse<LoginPageContext>> {
    Json(DataResponse {
        data: LoginPageContext {
            form: FormView::blank(LoginForm::NAME, AccountFormData::default()),
            next: safe_next(query.next.as_deref()),
        },
    })
}

/// POST /auth/login
///
/// Authenticate with username + password. Returns an access token and the
/// return path carried over from `?next=`.
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    Form(form): Form<LoginForm>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .store
        .find_user_by_username(&form.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&form.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Rejected login with wrong password");
        return Err(invalid_credentials());
    }

    let access_token = generate_access_token(user.id, &user.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        access_token,
        expires_in: state.config.jwt.expires_in_secs(),
        user: UserResponse::from(&user),
        next: safe_next(query.next.as_deref()),
    }))
}

/// GET|POST /auth/logout
///
/// Tokens are stateless, so logging out is the client discarding its token.
/// Open to everyone.
pub async fn logout(viewer: CurrentPrincipal) -> Json<DataResponse<LogoutContext>> {
    if let Some(user) = viewer.principal.as_user() {
        tracing::info!(user_id = user.id, "User logged out");
    }
    Json(DataResponse {
        data: LogoutContext { logged_out: true },
    })
}
