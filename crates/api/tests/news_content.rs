//! What the news pages contain: feed size and order, comment order, and
//! whether the comment form is offered.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{body_json, build_test_app, get, get_auth};
use yahub_core::listing::NEWS_COUNT_ON_HOME_PAGE;

fn dates(items: &serde_json::Value, field: &str) -> Vec<DateTime<Utc>> {
    items
        .as_array()
        .expect("expected a list")
        .iter()
        .map(|item| {
            item[field]
                .as_str()
                .expect("timestamp must be a string")
                .parse()
                .expect("timestamp must be RFC 3339")
        })
        .collect()
}

#[tokio::test]
async fn home_page_shows_page_size_news() {
    let t = build_test_app();
    t.seed_news_feed(NEWS_COUNT_ON_HOME_PAGE + 1).await;

    let json = body_json(get(t.app(), "/news").await).await;

    let list = json["data"]["object_list"].as_array().unwrap();
    assert_eq!(list.len(), NEWS_COUNT_ON_HOME_PAGE);
}

#[tokio::test]
async fn home_page_sorted_newest_first() {
    let t = build_test_app();
    t.seed_news_feed(NEWS_COUNT_ON_HOME_PAGE + 1).await;

    let json = body_json(get(t.app(), "/news").await).await;

    let all = dates(&json["data"]["object_list"], "published_at");
    let mut sorted = all.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(all, sorted);
    assert_eq!(json["data"]["object_list"][0]["title"], "Новость 0");
}

#[tokio::test]
async fn home_page_with_fewer_news_shows_all() {
    let t = build_test_app();
    t.seed_news_feed(3).await;

    let json = body_json(get(t.app(), "/news").await).await;
    assert_eq!(json["data"]["object_list"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn comments_sorted_chronologically() {
    let t = build_test_app();
    let author = t.seed_user("Автор").await;
    let news = t.seed_news("Заголовок_новости").await;
    for index in 0..2 {
        t.seed_comment(&news, &author, &format!("Текст_комментария{index}"))
            .await;
    }

    let response = get(t.app(), &format!("/news/{}", news.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["data"]["news"]["id"], news.id);
    let all = dates(&json["data"]["comments"], "created_at");
    let mut sorted = all.clone();
    sorted.sort();
    assert_eq!(all, sorted);
    assert_eq!(json["data"]["comments"][0]["text"], "Текст_комментария0");
    assert_eq!(json["data"]["comments"][1]["text"], "Текст_комментария1");
}

#[tokio::test]
async fn form_hidden_from_anonymous() {
    let t = build_test_app();
    let news = t.seed_news("Заголовок_новости").await;

    let json = body_json(get(t.app(), &format!("/news/{}", news.id)).await).await;
    assert!(json["data"].get("form").is_none());
}

#[tokio::test]
async fn form_offered_to_authenticated_user() {
    let t = build_test_app();
    let user = t.seed_user("Юзер").await;
    let news = t.seed_news("Заголовок_новости").await;

    let json = body_json(
        get_auth(t.app(), &format!("/news/{}", news.id), &t.token_for(&user)).await,
    )
    .await;
    assert_eq!(json["data"]["form"]["name"], "CommentForm");
    assert_eq!(json["data"]["form"]["data"]["text"], "");
}

#[tokio::test]
async fn edit_page_prefills_comment_text() {
    let t = build_test_app();
    let author = t.seed_user("Автор").await;
    let news = t.seed_news("Заголовок_новости").await;
    let comment = t.seed_comment(&news, &author, "Текст_комментария").await;

    let json = body_json(
        get_auth(
            t.app(),
            &format!("/news/comments/{}/edit", comment.id),
            &t.token_for(&author),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["comment"]["id"], comment.id);
    assert_eq!(json["data"]["form"]["data"]["text"], "Текст_комментария");
}
