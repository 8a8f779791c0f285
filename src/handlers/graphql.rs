use async_graphql::http::GraphiQLSource;
use async_graphql::Variables;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::debug;

use super::AppState;
use crate::errors::ServiceError;

const GRAPHQL_CONTENT_TYPE: &str = "application/graphql";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// URL or form-encoded GraphQL request. `variables` arrives JSON-encoded.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlParams {
    pub query: Option<String>,
    pub operation_name: Option<String>,
    pub variables: Option<String>,
}

impl GraphQlParams {
    /// Field-wise merge; values already set on `self` win.
    fn or(self, fallback: GraphQlParams) -> GraphQlParams {
        GraphQlParams {
            query: self.query.or(fallback.query),
            operation_name: self.operation_name.or(fallback.operation_name),
            variables: self.variables.or(fallback.variables),
        }
    }

    fn into_request(self) -> Result<async_graphql::Request, ServiceError> {
        let query = self
            .query
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| ServiceError::BadRequest("Must provide query string.".into()))?;
        let mut request = async_graphql::Request::new(query);

        if let Some(name) = self.operation_name.filter(|n| !n.is_empty()) {
            request = request.operation_name(name);
        }

        if let Some(raw) = self.variables.filter(|v| !v.trim().is_empty()) {
            let value: serde_json::Value = serde_json::from_str(&raw)
                .map_err(|e| ServiceError::BadRequest(format!("Variables are invalid JSON: {}", e)))?;
            request = request.variables(Variables::from_json(value));
        }

        Ok(request)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    RawQuery,
    Form,
    Json,
}

impl BodyKind {
    fn from_headers(headers: &HeaderMap) -> Self {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with(GRAPHQL_CONTENT_TYPE) {
            BodyKind::RawQuery
        } else if content_type.starts_with(FORM_CONTENT_TYPE) {
            BodyKind::Form
        } else {
            BodyKind::Json
        }
    }
}

/// `GET /graphql`: runs the `query` parameter, or serves GraphiQL when no query is given.
pub async fn graphql_get(
    State(state): State<AppState>,
    Query(params): Query<GraphQlParams>,
) -> Result<Response, ServiceError> {
    if params.query.is_none() && state.config.graphiql {
        let page = GraphiQLSource::build()
            .endpoint(&state.config.graphql_path)
            .finish();
        return Ok(Html(page).into_response());
    }

    let request = params.into_request()?;
    Ok(Json(state.schema.execute(request).await).into_response())
}

/// `POST /graphql`: the body may be JSON, form-encoded, or a raw query
/// (`Content-Type: application/graphql`). Parameters missing from the body are
/// taken from the URL, and an empty body defers to the URL entirely.
pub async fn graphql_post(
    State(state): State<AppState>,
    Query(url_params): Query<GraphQlParams>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<async_graphql::Response>, ServiceError> {
    let request = match BodyKind::from_headers(&headers) {
        BodyKind::RawQuery => {
            let query = String::from_utf8(body.to_vec())
                .map_err(|_| ServiceError::BadRequest("Body is not valid UTF-8".into()))?;
            GraphQlParams {
                query: Some(query),
                ..url_params
            }
            .into_request()?
        }
        BodyKind::Form => {
            let form: GraphQlParams = serde_urlencoded::from_bytes(&body)
                .map_err(|e| ServiceError::BadRequest(format!("Form body is not a GraphQL request: {}", e)))?;
            form.or(url_params).into_request()?
        }
        BodyKind::Json if body.iter().all(u8::is_ascii_whitespace) => url_params.into_request()?,
        BodyKind::Json => serde_json::from_slice::<async_graphql::Request>(&body)
            .map_err(|e| ServiceError::BadRequest(format!("POST body is not a GraphQL request: {}", e)))?,
    };

    debug!(operation = ?request.operation_name, "Executing GraphQL request");
    Ok(Json(state.schema.execute(request).await))
}
