//! Shared response types for API handlers.
//!
//! Page contexts use a `{ "data": ... }` envelope via [`DataResponse`].
//! Successful form submissions answer with a `302 Found` through [`found`].

use std::fmt::Write;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Where anonymous visitors are sent when a page needs a login.
pub const LOGIN_URL: &str = "/auth/login";

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: context }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `302 Found` pointing at `location`.
pub fn found(location: impl Into<String>) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.into())]).into_response()
}

/// Redirect to the login page, preserving `next` as the return path.
pub fn redirect_to_login(next: &str) -> Response {
    found(login_url_with_next(next))
}

/// `/auth/login?next=<next>` with `next` percent-encoded. `/` is left as is
/// so plain paths stay readable.
pub fn login_url_with_next(next: &str) -> String {
    let mut url = String::with_capacity(LOGIN_URL.len() + 6 + next.len());
    url.push_str(LOGIN_URL);
    url.push_str("?next=");
    for byte in next.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                url.push(byte as char)
            }
            _ => {
                let _ = write!(url, "%{byte:02X}");
            }
        }
    }
    url
}
