//! E-commerce data-access backend
//!
//! Serves a GraphQL endpoint and maps Product and Order documents onto
//! MongoDB collections.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod schema;
pub mod server;
pub mod tracing;

use axum::{routing::get, Router};

use crate::schema::AppSchema;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub config: config::AppConfig,
    pub schema: AppSchema,
}

impl AppState {
    pub fn new(config: config::AppConfig, database: Option<mongodb::Database>) -> Self {
        Self {
            schema: schema::build_schema(database),
            config,
        }
    }
}

/// Mounts the GraphQL endpoint (query execution and GraphiQL) on the configured path.
pub fn graphql_routes(path: &str) -> Router<AppState> {
    Router::new().route(
        path,
        get(handlers::graphql::graphql_get).post(handlers::graphql::graphql_post),
    )
}

/// Full application router with HTTP tracing applied.
pub fn build_router(state: AppState) -> Router {
    graphql_routes(&state.config.graphql_path)
        .layer(crate::tracing::configure_http_tracing())
        .with_state(state)
}
