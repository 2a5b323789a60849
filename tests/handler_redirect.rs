mod common;

use axum::http::{StatusCode, header};
use axum::routing::get;
use axum::Router;
use axum_test::TestServer;
use vanity_links::api::handlers::redirect_handler;
use vanity_links::domain::entities::{NewTarget, ObjectType, Platform};
use vanity_links::domain::repositories::TargetRepository;

fn make_server(ctx: &common::TestContext) -> TestServer {
    let app = Router::new()
        .fallback(get(redirect_handler))
        .with_state(ctx.state.clone());
    TestServer::new(app).unwrap()
}

fn location(response: &axum_test::TestResponse) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Location header missing")
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_redirect_decorates_destination() {
    let mut ctx = common::create_test_state();
    common::seed_slugged_post(&ctx, 42, "https://site.example/hello-world", "ab12cd34").await;
    let server = make_server(&ctx);

    let response = server.get("/ab12cd34-f").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    let location = location(&response);
    assert!(location.starts_with("https://site.example/hello-world?"));
    assert!(location.contains("utm_id=socialized"));
    assert!(location.contains("utm_source=facebook"));
    assert!(location.contains("utm_medium=social"));
    assert!(location.contains("utm_campaign=socialized"));
    assert!(location.contains("utm_source_platform=Example%20Site%20Website"));
    assert!(location.contains("utm_content=socialized-share-link"));
    assert!(location.contains("utm_creative_format=user-share-link"));
    assert!(location.contains("utm_marketing_tactic=prospecting"));

    let event = ctx.hit_rx.try_recv().expect("hit event missing");
    assert_eq!(event.object_type, ObjectType::Post);
    assert_eq!(event.object_id, 42);
    assert_eq!(event.platform, Platform::Facebook);
}

#[tokio::test]
async fn test_redirect_uses_campaign_term() {
    let mut ctx = common::create_test_state();
    ctx.targets
        .upsert(NewTarget {
            campaign_term: Some("launch week".to_string()),
            ..common::new_post(1, "https://site.example/launch")
        })
        .await
        .unwrap();
    ctx.targets
        .set_slug(ObjectType::Post, 1, "launch01")
        .await
        .unwrap();
    let server = make_server(&ctx);

    let response = server.get("/launch01-t").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert!(location(&response).contains("utm_term=launch%20week"));
    assert!(ctx.hit_rx.try_recv().is_ok());
}

#[tokio::test]
async fn test_redirect_unknown_platform_suffix() {
    let ctx = common::create_test_state();
    common::seed_slugged_post(&ctx, 42, "https://site.example/x", "ab12cd34").await;
    let server = make_server(&ctx);

    let response = server.get("/ab12cd34-z").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_unknown_slug() {
    let mut ctx = common::create_test_state();
    common::seed_slugged_post(&ctx, 42, "https://site.example/x", "ab12cd34").await;
    let server = make_server(&ctx);

    let response = server.get("/zzzzzzzz-f").await;
    response.assert_status_not_found();
    assert!(ctx.hit_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_redirect_multi_segment_path() {
    let ctx = common::create_test_state();
    common::seed_slugged_post(&ctx, 42, "https://site.example/x", "ab12cd34").await;
    let server = make_server(&ctx);

    let response = server.get("/blog/ab12cd34-f").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_disabled() {
    let mut ctx = common::create_test_state_with(false);
    common::seed_slugged_post(&ctx, 42, "https://site.example/x", "ab12cd34").await;
    let server = make_server(&ctx);

    let response = server.get("/ab12cd34-f").await;
    response.assert_status_not_found();
    assert!(ctx.hit_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_editor_redirects_are_not_counted() {
    let mut ctx = common::create_test_state();
    common::seed_slugged_post(&ctx, 42, "https://site.example/x", "ab12cd34").await;
    let server = make_server(&ctx);

    let response = server
        .get("/ab12cd34-f")
        .authorization_bearer(common::ADMIN_TOKEN)
        .await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert!(ctx.hit_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_invalid_bearer_still_counts() {
    let mut ctx = common::create_test_state();
    common::seed_slugged_post(&ctx, 42, "https://site.example/x", "ab12cd34").await;
    let server = make_server(&ctx);

    let response = server
        .get("/ab12cd34-f")
        .authorization_bearer("not-the-admin-token")
        .await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert!(ctx.hit_rx.try_recv().is_ok());
}

#[tokio::test]
async fn test_redirect_preserves_request_query() {
    let ctx = common::create_test_state();
    common::seed_slugged_post(&ctx, 42, "https://site.example/x", "ab12cd34").await;
    let server = make_server(&ctx);

    let response = server.get("/ab12cd34-f").add_query_param("ref", "abc").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    let location = location(&response);
    // The original query rides along after the UTM parameters.
    assert!(location.contains("utm_marketing_tactic=prospecting&ref=abc"));
}

#[tokio::test]
async fn test_redirect_slug_containing_dash() {
    let mut ctx = common::create_test_state();
    common::seed_slugged_post(&ctx, 7, "https://site.example/dashed", "ab-12").await;
    let server = make_server(&ctx);

    let response = server.get("/ab-12-t").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert!(location(&response).contains("utm_source=twitter"));

    let event = ctx.hit_rx.try_recv().unwrap();
    assert_eq!(event.platform, Platform::Twitter);
}
