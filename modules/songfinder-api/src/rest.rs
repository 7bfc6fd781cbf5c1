use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use tracing::{error, info};

use songfinder_common::{ErrorResponse, SearchError, SearchResponse};

use crate::{markdown, AppState};

#[derive(Deserialize)]
pub struct SearchRequest {
    query: Option<String>,
}

/// Body format negotiated from the `Accept` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    Markdown,
}

impl ResponseFormat {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let wants_markdown = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("text/markdown"));
        if wants_markdown {
            ResponseFormat::Markdown
        } else {
            ResponseFormat::Json
        }
    }
}

pub async fn api_song_search(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Preflight that slipped past the CORS layer (no Origin header): empty 200
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let format = ResponseFormat::from_headers(&headers);

    if method != Method::POST {
        let err = SearchError::InvalidRequest(format!("method {method} not allowed, use POST"));
        return error_response(format, None, &err);
    }

    let query = match parse_query(&body) {
        Ok(q) => q,
        Err(err) => return error_response(format, None, &err),
    };

    match state.finder.search_response(&query).await {
        Ok(payload) => success_response(format, &payload),
        Err(err) => error_response(format, Some(query.trim()), &err),
    }
}

/// Pull the query string out of a JSON body. Anything malformed is an
/// `InvalidRequest`; blank strings are left to the finder to reject.
pub fn parse_query(body: &[u8]) -> Result<String, SearchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(SearchError::InvalidRequest(
            "request body must be JSON with a \"query\" field".to_string(),
        ));
    }
    let request: SearchRequest = serde_json::from_slice(body)
        .map_err(|e| SearchError::InvalidRequest(format!("invalid JSON body: {e}")))?;
    request
        .query
        .ok_or_else(|| SearchError::InvalidRequest("query parameter is required".to_string()))
}

fn success_response(format: ResponseFormat, payload: &SearchResponse) -> Response {
    match format {
        ResponseFormat::Json => Json(payload).into_response(),
        ResponseFormat::Markdown => markdown_response(
            StatusCode::OK,
            markdown::render_results(&payload.query, &payload.results),
        ),
    }
}

pub fn error_response(format: ResponseFormat, query: Option<&str>, err: &SearchError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(category = err.category(), error = ?err, "Song search failed");
    } else {
        info!(category = err.category(), error = %err, "Song search rejected");
    }

    let payload = ErrorResponse::from(err);
    match format {
        ResponseFormat::Json => (status, Json(payload)).into_response(),
        ResponseFormat::Markdown => {
            markdown_response(status, markdown::render_error(query, err, &payload))
        }
    }
}

fn markdown_response(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        body,
    )
        .into_response()
}
