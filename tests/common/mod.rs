use axum::{
    body::Body,
    http::{Method, Request, Response},
    Router,
};
use ecommerce_backend::{build_router, config::AppConfig, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Router-level harness with no database attached.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(cfg: AppConfig) -> Self {
        let state = AppState::new(cfg, None);
        Self {
            router: build_router(state),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Option<String>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_json(&self, body: Value) -> Response<Body> {
        self.request(
            Method::POST,
            "/graphql",
            &[("content-type", "application/json")],
            Some(body.to_string()),
        )
        .await
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
