//! Route availability for the notes pages.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, get, get_auth, location};

const SLUG: &str = "slug";

#[tokio::test]
async fn pages_available_to_everyone() {
    let t = build_test_app();
    for uri in ["/notes", "/auth/login", "/auth/logout", "/auth/signup"] {
        let response = get(t.app(), uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    }
}

#[tokio::test]
async fn pages_available_to_any_user() {
    let t = build_test_app();
    let user = t.seed_user("зарегистрированный_пользователь").await;
    let token = t.token_for(&user);

    for uri in ["/notes/list", "/notes/add", "/notes/done"] {
        let response = get_auth(t.app(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
    }
}

#[tokio::test]
async fn note_pages_available_only_to_author() {
    let t = build_test_app();
    let author = t.seed_user("автор_заметки").await;
    let reader = t.seed_user("зарегистрированный_пользователь").await;
    t.seed_note(&author, "заголовок_заметки", SLUG).await;

    for (user, expected) in [(&author, StatusCode::OK), (&reader, StatusCode::NOT_FOUND)] {
        let token = t.token_for(user);
        for prefix in ["/notes/note", "/notes/edit", "/notes/delete"] {
            let uri = format!("{prefix}/{SLUG}");
            let response = get_auth(t.app(), &uri, &token).await;
            assert_eq!(response.status(), expected, "{} GET {uri}", user.username);
        }
    }
}

#[tokio::test]
async fn anonymous_redirected_to_login() {
    let t = build_test_app();
    let author = t.seed_user("автор_заметки").await;
    t.seed_note(&author, "заголовок_заметки", SLUG).await;

    let uris = [
        "/notes/list".to_string(),
        "/notes/add".to_string(),
        "/notes/done".to_string(),
        format!("/notes/note/{SLUG}"),
        format!("/notes/edit/{SLUG}"),
        format!("/notes/delete/{SLUG}"),
    ];
    for uri in &uris {
        let response = get(t.app(), uri).await;
        assert_eq!(response.status(), StatusCode::FOUND, "GET {uri}");
        assert_eq!(location(&response), format!("/auth/login?next={uri}"));
    }
}

#[tokio::test]
async fn missing_note_is_404_for_user() {
    let t = build_test_app();
    let user = t.seed_user("автор_заметки").await;
    let response = get_auth(t.app(), "/notes/note/absent", &t.token_for(&user)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn return_path_keeps_query_string() {
    let t = build_test_app();
    let response = get(t.app(), "/notes/list?page=2").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/auth/login?next=/notes/list%3Fpage%3D2");
}
