#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION};
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;
use yahub_api::auth::jwt::{generate_access_token, JwtConfig};
use yahub_api::auth::password::hash_password;
use yahub_api::config::ServerConfig;
use yahub_api::router::build_app_router;
use yahub_api::state::AppState;
use yahub_core::listing::NEWS_COUNT_ON_HOME_PAGE;
use yahub_core::moderation::BAD_WORDS;
use yahub_db::models::comment::{Comment, CreateComment};
use yahub_db::models::news::{CreateNews, News};
use yahub_db::models::note::{CreateNote, Note};
use yahub_db::models::user::{CreateUser, User};
use yahub_db::store::{ContentStore, MemoryStore};

/// Password every seeded user is created with.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        news_count_on_home_page: NEWS_COUNT_ON_HOME_PAGE,
        banned_words: BAD_WORDS.iter().map(|w| w.to_string()).collect(),
        min_password_length: 8,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// The application wired to an in-memory store the test can inspect.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub config: ServerConfig,
}

/// Build the full application router with all middleware layers on top of
/// a fresh [`MemoryStore`].
pub fn build_test_app() -> TestApp {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let dyn_store: Arc<dyn ContentStore> = store.clone();
    let state = AppState::new(dyn_store, config.clone());
    TestApp {
        router: build_app_router(state, &config),
        store,
        config,
    }
}

impl TestApp {
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub async fn seed_user(&self, username: &str) -> User {
        let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
        self.store
            .create_user(&CreateUser {
                username: username.to_string(),
                password_hash,
            })
            .await
            .expect("user creation should succeed")
    }

    /// A valid Bearer token for `user`.
    pub fn token_for(&self, user: &User) -> String {
        generate_access_token(user.id, &user.username, &self.config.jwt)
            .expect("token generation should succeed")
    }

    pub async fn seed_news(&self, title: &str) -> News {
        self.store
            .create_news(&CreateNews {
                title: title.to_string(),
                text: "Текст_новости".to_string(),
                published_at: None,
            })
            .await
            .expect("news creation should succeed")
    }

    /// `count` news items, the i-th published `i` days ago.
    pub async fn seed_news_feed(&self, count: usize) {
        let today = Utc::now();
        for index in 0..count {
            self.store
                .create_news(&CreateNews {
                    title: format!("Новость {index}"),
                    text: "Просто текст.".to_string(),
                    published_at: Some(today - Duration::days(index as i64)),
                })
                .await
                .expect("news creation should succeed");
        }
    }

    pub async fn seed_comment(&self, news: &News, author: &User, text: &str) -> Comment {
        self.store
            .create_comment(&CreateComment {
                news_id: news.id,
                author_id: author.id,
                text: text.to_string(),
            })
            .await
            .expect("comment creation should succeed")
    }

    pub async fn seed_note(&self, author: &User, title: &str, slug: &str) -> Note {
        self.store
            .create_note(&CreateNote {
                title: title.to_string(),
                text: "текст_заметки".to_string(),
                slug: slug.to_string(),
                author_id: author.id,
            })
            .await
            .expect("note creation should succeed")
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Percent-encode `pairs` as an `application/x-www-form-urlencoded` body.
pub fn form_body(pairs: &[(&str, &str)]) -> String {
    fn encode(value: &str) -> String {
        value
            .bytes()
            .map(|b| match b {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                    (b as char).to_string()
                }
                _ => format!("%{b:02X}"),
            })
            .collect()
    }
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

/// Issue a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// Issue a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

fn form_request(method: Method, uri: &str, token: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

/// Issue a form-encoded POST request.
pub async fn post_form(app: Router, uri: &str, pairs: &[(&str, &str)]) -> Response<Body> {
    send(app, form_request(Method::POST, uri, None, form_body(pairs))).await
}

/// Issue a form-encoded POST request with a Bearer token.
pub async fn post_form_auth(
    app: Router,
    uri: &str,
    token: &str,
    pairs: &[(&str, &str)],
) -> Response<Body> {
    send(app, form_request(Method::POST, uri, Some(token), form_body(pairs))).await
}

/// Issue a POST request with an arbitrary body. `content_type` of `None`
/// sends no `Content-Type` header at all.
pub async fn post_raw(
    app: Router,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

/// Issue a DELETE request with a Bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, form_request(Method::DELETE, uri, Some(token), String::new())).await
}

/// Issue a DELETE request without credentials.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, form_request(Method::DELETE, uri, None, String::new())).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}
