mod common;

use axum::http::{Method, StatusCode};
use ecommerce_backend::config::AppConfig;
use rstest::rstest;
use serde_json::json;

use common::{body_bytes, body_json, TestApp};

const HELLO_RESPONSE: &str = r#"{"data":{"hello":"Hello, world!"}}"#;

#[rstest]
#[case::plain(json!({ "query": "{ hello }" }))]
#[case::named_operation(json!({ "query": "query Greeting { hello }", "operationName": "Greeting" }))]
#[case::null_variables(json!({ "query": "{ hello }", "variables": null }))]
#[case::empty_variables(json!({ "query": "{ hello }", "variables": {} }))]
#[tokio::test]
async fn post_json_returns_exact_greeting(#[case] body: serde_json::Value) {
    let app = TestApp::new();

    let response = app.post_json(body).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, HELLO_RESPONSE.as_bytes());
}

#[rstest]
#[case::no_content_type(&[])]
#[case::text_plain(&[("content-type", "text/plain")])]
#[case::with_request_id(&[("content-type", "application/json"), ("x-request-id", "req-1")])]
#[case::browser_accept(&[("content-type", "application/json"), ("accept", "text/html")])]
#[tokio::test]
async fn headers_do_not_change_the_result(#[case] headers: &[(&str, &str)]) {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/graphql",
            headers,
            Some(json!({ "query": "{ hello }" }).to_string()),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, HELLO_RESPONSE.as_bytes());
}

#[rstest]
#[case::query_in_url_empty_body("/graphql?query=%7Bhello%7D", &[], "")]
#[case::query_in_url_json_content_type(
    "/graphql?query=%7Bhello%7D",
    &[("content-type", "application/json")],
    ""
)]
#[case::form_body(
    "/graphql",
    &[("content-type", "application/x-www-form-urlencoded")],
    "query=%7Bhello%7D"
)]
#[case::form_body_with_charset(
    "/graphql",
    &[("content-type", "application/x-www-form-urlencoded; charset=UTF-8")],
    "query=%7B%20hello%20%7D&operationName="
)]
#[case::form_body_with_url_operation(
    "/graphql?operationName=Greeting",
    &[("content-type", "application/x-www-form-urlencoded")],
    "query=query%20Greeting%20%7B%20hello%20%7D"
)]
#[case::raw_graphql_body("/graphql", &[("content-type", "application/graphql")], "{ hello }")]
#[tokio::test]
async fn post_shapes_return_exact_greeting(
    #[case] uri: &str,
    #[case] headers: &[(&str, &str)],
    #[case] body: &str,
) {
    let app = TestApp::new();

    let response = app
        .request(Method::POST, uri, headers, Some(body.to_string()))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, HELLO_RESPONSE.as_bytes());
}

#[tokio::test]
async fn post_without_any_query_is_a_bad_request() {
    let app = TestApp::new();

    let response = app.request(Method::POST, "/graphql", &[], None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Bad request: Must provide query string.");
}

#[tokio::test]
async fn get_with_query_string() {
    let app = TestApp::new();

    let response = app
        .request(Method::GET, "/graphql?query=%7B%20hello%20%7D", &[], None)
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, HELLO_RESPONSE.as_bytes());
}

#[tokio::test]
async fn get_without_query_serves_graphiql() {
    let app = TestApp::new();

    let response = app.request(Method::GET, "/graphql", &[], None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let page = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(page.contains("graphiql"));
}

#[tokio::test]
async fn get_without_query_is_rejected_when_graphiql_disabled() {
    let app = TestApp::with_config(AppConfig {
        graphiql: false,
        ..Default::default()
    });

    let response = app.request(Method::GET, "/graphql", &[], None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Bad request: Must provide query string.");
}

#[tokio::test]
async fn mutation_returns_error_not_data() {
    let app = TestApp::new();

    let response = app
        .post_json(json!({ "query": "mutation { hello }" }))
        .await;

    let body = body_json(response).await;
    assert!(body["data"].is_null());
    assert!(!body["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_field_is_a_validation_error() {
    let app = TestApp::new();

    let response = app.post_json(json!({ "query": "{ orders { quantity } }" })).await;

    let body = body_json(response).await;
    assert!(body["data"].is_null());
    assert!(body["errors"][0]["message"]
        .as_str()
        .unwrap()
        .contains("orders"));
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/graphql",
            &[("content-type", "application/json")],
            Some("{ not json".into()),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn custom_graphql_path_is_honoured() {
    let app = TestApp::with_config(AppConfig {
        graphql_path: "/api/graphql".into(),
        ..Default::default()
    });

    let moved = app
        .request(Method::GET, "/api/graphql?query=%7Bhello%7D", &[], None)
        .await;
    assert_eq!(body_bytes(moved).await, HELLO_RESPONSE.as_bytes());

    let old = app.request(Method::GET, "/graphql", &[], None).await;
    assert_eq!(old.status(), StatusCode::NOT_FOUND);
}
