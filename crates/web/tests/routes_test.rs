//! Route integration tests for both lookup styles

use axum::{Router, body::Body};
use http::{Method, Request, StatusCode, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use outcome_web::{Error, ServerConfig, User, UserDirectory, create_router, create_router_with};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Result<Router, Error> {
    create_router(&ServerConfig::default())
}

async fn send(router: Router, request: Request<Body>) -> Result<(StatusCode, Value), Error> {
    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = serde_json::from_slice(&bytes)?;
    Ok((status, body))
}

async fn get(uri: &str) -> Result<(StatusCode, Value), Error> {
    let request = Request::builder().uri(uri).body(Body::empty())?;
    send(app()?, request).await
}

async fn post_batch(mode: Option<&str>, ids: &[&str]) -> Result<(StatusCode, Value), Error> {
    let uri = mode.map_or_else(
        || "/outcome/users/batch".to_string(),
        |m| format!("/outcome/users/batch?mode={m}"),
    );
    let body = serde_json::to_vec(&json!({ "ids": ids }))?;
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body))?;
    send(app()?, request).await
}

#[tokio::test]
async fn test_outcome_route_returns_user() -> Result<(), Error> {
    let (status, body) = get("/outcome/users/1").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "ada");
    assert_eq!(body["active"], true);
    Ok(())
}

#[tokio::test]
async fn test_outcome_route_failure_body() -> Result<(), Error> {
    let (status, body) = get("/outcome/users/99").await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "user 99 does not exist", "code": 404 }));
    Ok(())
}

#[tokio::test]
async fn test_classic_route_returns_user() -> Result<(), Error> {
    let (status, body) = get("/classic/users/2").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "grace");
    Ok(())
}

#[tokio::test]
async fn test_classic_route_problem_details() -> Result<(), Error> {
    let (status, body) = get("/classic/users/3").await?;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], 403);
    assert_eq!(body["title"], "Forbidden");
    assert_eq!(body["detail"], "Forbidden: user 3 is inactive");
    Ok(())
}

#[tokio::test]
async fn test_both_styles_agree_on_status() -> Result<(), Error> {
    let cases = [
        ("1", StatusCode::OK),
        ("4", StatusCode::OK),
        ("3", StatusCode::FORBIDDEN),
        ("42", StatusCode::NOT_FOUND),
        ("0", StatusCode::BAD_REQUEST),
        ("abc", StatusCode::BAD_REQUEST),
    ];

    for (id, expected) in cases {
        let (classic, _) = get(&format!("/classic/users/{id}")).await?;
        let (outcome, _) = get(&format!("/outcome/users/{id}")).await?;

        assert_eq!(classic, expected, "classic route, id {id}");
        assert_eq!(outcome, expected, "outcome route, id {id}");
    }
    Ok(())
}

#[tokio::test]
async fn test_batch_defaults_to_first_failure() -> Result<(), Error> {
    let (status, body) = post_batch(None, &["1", "99", "3"]).await?;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "user 99 does not exist");
    Ok(())
}

#[tokio::test]
async fn test_batch_all_success() -> Result<(), Error> {
    let (status, body) = post_batch(Some("all"), &["2", "1"]).await?;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .map(|users| users.iter().filter_map(|u| u["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["grace", "ada"]);
    Ok(())
}

#[tokio::test]
async fn test_batch_partition_reports_every_failure() -> Result<(), Error> {
    let (status, body) = post_batch(Some("partition"), &["1", "99", "x", "3"]).await?;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let codes: Vec<u64> = body["failures"]
        .as_array()
        .map(|failures| failures.iter().filter_map(|f| f["code"].as_u64()).collect())
        .unwrap_or_default();
    assert_eq!(codes, vec![404, 400, 403]);
    Ok(())
}

#[tokio::test]
async fn test_batch_partition_all_success() -> Result<(), Error> {
    let (status, body) = post_batch(Some("partition"), &["1", "2"]).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn test_custom_directory() -> Result<(), Error> {
    let directory = UserDirectory::new([User::new(7, "ken", true)]);
    let router = create_router_with(&ServerConfig::default(), directory)?;

    let request = Request::builder()
        .uri("/outcome/users/7")
        .body(Body::empty())?;
    let (status, body) = send(router, request).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ken@example.com");
    Ok(())
}
