mod common;

use actix_web::{http::StatusCode, test, App};
use chrono::{NaiveDate, Utc};
use common::TestEnv;
use news_service::handlers::{self, stories::StoriesResponse};
use news_service::models::{Category, NewStory, Region};
use news_service::services::StoryStore;
use serde_json::json;
use uuid::Uuid;

fn story(headline: &str, category: &str, region: &str) -> NewStory {
    NewStory::parse(headline, category, region, "Full details").unwrap()
}

fn all_stories() -> serde_json::Value {
    json!({"story_cat": "*", "story_region": "*", "story_date": "*"})
}

#[actix_web::test]
async fn post_story_publishes_under_session_author() {
    let env = TestEnv::new();
    let (account, author) = env.author("josh", "Josh Boult").await;
    let cookie = env.session_for(&account).await;
    let app = test::init_service(
        App::new()
            .app_data(env.data())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/poststory")
        .cookie(cookie)
        .set_json(json!({
            "headline": "Parliament returns",
            "category": "pol",
            "region": "uk",
            "details": "MPs are back in Westminster."
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(test::read_body(resp).await, "Story added successfully");

    let req = test::TestRequest::get()
        .uri("/api/getstories")
        .set_json(all_stories())
        .to_request();
    let body: StoriesResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.stories.len(), 1);
    let listed = &body.stories[0];
    assert_eq!(listed.headline, "Parliament returns");
    assert_eq!(listed.story_cat, Category::Politics);
    assert_eq!(listed.story_region, Region::Uk);
    assert_eq!(listed.author, author.name);
    assert_eq!(listed.details, "MPs are back in Westminster.");
    assert_eq!(listed.date, Utc::now().date_naive());
}

#[actix_web::test]
async fn post_story_without_session_is_rejected() {
    let env = TestEnv::new();
    let app = test::init_service(
        App::new()
            .app_data(env.data())
            .configure(handlers::configure),
    )
    .await;

    // A stale cookie and garbage body still report the missing session
    let req = test::TestRequest::post()
        .uri("/api/poststory")
        .cookie(actix_web::cookie::Cookie::new("sessionid", Uuid::new_v4().to_string()))
        .set_payload("not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(test::read_body(resp).await, "User is not authenticated");
    assert_eq!(env.stories.story_count().await, 0);
}

#[actix_web::test]
async fn post_story_rejects_bad_payloads() {
    let env = TestEnv::new();
    let (account, _) = env.author("josh", "Josh Boult").await;
    let cookie = env.session_for(&account).await;
    let app = test::init_service(
        App::new()
            .app_data(env.data())
            .configure(handlers::configure),
    )
    .await;

    let bodies = [
        json!({"headline": "No region", "category": "pol", "details": "x"}),
        json!({"headline": "Bad category", "category": "sport", "region": "uk", "details": "x"}),
        json!({"headline": "Bad region", "category": "pol", "region": "mars", "details": "x"}),
        json!({"headline": "", "category": "pol", "region": "uk", "details": "x"}),
        json!({"headline": "h".repeat(65), "category": "pol", "region": "uk", "details": "x"}),
        json!({"headline": "Long", "category": "pol", "region": "uk", "details": "d".repeat(513)}),
    ];

    for body in bodies {
        let req = test::TestRequest::post()
            .uri("/api/poststory")
            .cookie(cookie.clone())
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", body);
    }

    let req = test::TestRequest::post()
        .uri("/api/poststory")
        .cookie(cookie)
        .set_payload("{\"headline\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(env.stories.story_count().await, 0);
}

#[actix_web::test]
async fn post_story_requires_author_record() {
    let env = TestEnv::new();
    let reader = env.auth.add_user("reader", common::PASSWORD).unwrap();
    let cookie = env.session_for(&reader).await;
    let app = test::init_service(
        App::new()
            .app_data(env.data())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/poststory")
        .cookie(cookie)
        .set_json(json!({"headline": "h", "category": "art", "region": "eu", "details": "d"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(env.stories.story_count().await, 0);
}

#[actix_web::test]
async fn get_stories_applies_filters_in_id_order() {
    let env = TestEnv::new();
    let (_, author) = env.author("josh", "Josh Boult").await;
    let old = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
    let new = NaiveDate::from_ymd_opt(2024, 9, 15).unwrap();
    for (headline, cat, region, date) in [
        ("old pol", "pol", "uk", old),
        ("new art", "art", "eu", new),
        ("new pol", "pol", "w", new),
        ("new tech", "tech", "uk", new),
    ] {
        env.stories
            .insert_story_dated(author.id, story(headline, cat, region), date)
            .await
            .unwrap();
    }
    let app = test::init_service(
        App::new()
            .app_data(env.data())
            .configure(handlers::configure),
    )
    .await;

    let cases = [
        (all_stories(), vec!["old pol", "new art", "new pol", "new tech"]),
        (
            json!({"story_cat": "pol", "story_region": "*", "story_date": "*"}),
            vec!["old pol", "new pol"],
        ),
        (
            json!({"story_cat": "*", "story_region": "uk", "story_date": "2024-01-01"}),
            vec!["new tech"],
        ),
        (
            json!({"story_cat": "*", "story_region": "*", "story_date": "2024-09-15"}),
            vec!["new art", "new pol", "new tech"],
        ),
        (
            json!({"story_cat": "trivia", "story_region": "*", "story_date": "*"}),
            vec![],
        ),
    ];

    for (filter, expected) in cases {
        let req = test::TestRequest::get()
            .uri("/api/getstories")
            .set_json(&filter)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", filter);
        let body: StoriesResponse = test::read_body_json(resp).await;
        let headlines: Vec<&str> = body.stories.iter().map(|s| s.headline.as_str()).collect();
        assert_eq!(headlines, expected, "{}", filter);
        let keys: Vec<i64> = body.stories.iter().map(|s| s.key).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }
}

#[actix_web::test]
async fn get_stories_reads_body_without_content_type() {
    let env = TestEnv::new();
    let (_, author) = env.author("josh", "Josh Boult").await;
    env.stories
        .create_story(author.id, story("Gallery opens", "art", "eu"))
        .await
        .unwrap();
    let app = test::init_service(
        App::new()
            .app_data(env.data())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/getstories")
        .set_payload(r#"{"story_cat":"art","story_region":"eu","story_date":"*"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .starts_with("application/json"));

    let body: serde_json::Value = test::read_body_json(resp).await;
    let first = &body["stories"][0];
    assert_eq!(first["story_cat"], "art");
    assert_eq!(first["story_region"], "eu");
    assert_eq!(first["author"], "Josh Boult");
    assert!(first["key"].is_i64());
}

#[actix_web::test]
async fn get_stories_rejects_bad_filters() {
    let env = TestEnv::new();
    let app = test::init_service(
        App::new()
            .app_data(env.data())
            .configure(handlers::configure),
    )
    .await;

    for payload in [
        "",
        r#"{"story_cat":"*","story_region":"*"}"#,
        r#"{"story_cat":"sport","story_region":"*","story_date":"*"}"#,
        r#"{"story_cat":"*","story_region":"*","story_date":"15/09/2024"}"#,
    ] {
        let req = test::TestRequest::get()
            .uri("/api/getstories")
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", payload);
    }
}

#[actix_web::test]
async fn delete_story_removes_once_then_reports_not_found() {
    let env = TestEnv::new();
    let (account, author) = env.author("josh", "Josh Boult").await;
    let cookie = env.session_for(&account).await;
    let created = env
        .stories
        .create_story(author.id, story("Short lived", "trivia", "w"))
        .await
        .unwrap();
    let app = test::init_service(
        App::new()
            .app_data(env.data())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/deletestory")
        .cookie(cookie.clone())
        .set_json(json!({"story_key": created.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(test::read_body(resp).await, "Story deleted successfully");
    assert!(env.stories.find_story(created.id).await.unwrap().is_none());

    let req = test::TestRequest::post()
        .uri("/api/deletestory")
        .cookie(cookie)
        .set_json(json!({"story_key": created.id.to_string()}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_story_checks_session_before_body() {
    let env = TestEnv::new();
    let (account, author) = env.author("josh", "Josh Boult").await;
    let cookie = env.session_for(&account).await;
    let created = env
        .stories
        .create_story(author.id, story("Stays", "pol", "uk"))
        .await
        .unwrap();
    let app = test::init_service(
        App::new()
            .app_data(env.data())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/deletestory")
        .set_json(json!({"story_key": created.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(test::read_body(resp).await, "User is not authenticated");

    for payload in ["{}", r#"{"story_key":"seven"}"#, "null"] {
        let req = test::TestRequest::post()
            .uri("/api/deletestory")
            .cookie(cookie.clone())
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", payload);
    }

    assert_eq!(env.stories.story_count().await, 1);
}

#[actix_web::test]
async fn any_author_may_delete_by_default() {
    let env = TestEnv::new();
    let (_, josh) = env.author("josh", "Josh Boult").await;
    let (sam_account, _) = env.author("sam", "Sam Reed").await;
    let cookie = env.session_for(&sam_account).await;
    let created = env
        .stories
        .create_story(josh.id, story("Josh's story", "pol", "uk"))
        .await
        .unwrap();
    let app = test::init_service(
        App::new()
            .app_data(env.data())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/deletestory")
        .cookie(cookie)
        .set_json(json!({"story_key": created.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn owner_restriction_blocks_other_authors() {
    let env = TestEnv::new().restrict_delete_to_owner();
    let (josh_account, josh) = env.author("josh", "Josh Boult").await;
    let (sam_account, _) = env.author("sam", "Sam Reed").await;
    let created = env
        .stories
        .create_story(josh.id, story("Josh's story", "pol", "uk"))
        .await
        .unwrap();
    let app = test::init_service(
        App::new()
            .app_data(env.data())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/deletestory")
        .cookie(env.session_for(&sam_account).await)
        .set_json(json!({"story_key": created.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(env.stories.story_count().await, 1);

    let josh_cookie = env.session_for(&josh_account).await;
    let req = test::TestRequest::post()
        .uri("/api/deletestory")
        .cookie(josh_cookie.clone())
        .set_json(json!({"story_key": created.id + 100}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/deletestory")
        .cookie(josh_cookie)
        .set_json(json!({"story_key": created.id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(env.stories.story_count().await, 0);
}

#[actix_web::test]
async fn removing_author_removes_their_stories_from_listing() {
    let env = TestEnv::new();
    let (_, josh) = env.author("josh", "Josh Boult").await;
    let (_, sam) = env.author("sam", "Sam Reed").await;
    env.stories.create_story(josh.id, story("a", "pol", "uk")).await.unwrap();
    env.stories.create_story(sam.id, story("b", "pol", "uk")).await.unwrap();
    env.stories.remove_author(josh.id).await;
    let app = test::init_service(
        App::new()
            .app_data(env.data())
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/getstories")
        .set_json(all_stories())
        .to_request();
    let body: StoriesResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.stories.len(), 1);
    assert_eq!(body.stories[0].author, "Sam Reed");
}
