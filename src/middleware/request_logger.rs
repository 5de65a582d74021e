//! Audit log of incoming requests, stored in `request_logs`.

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, Request, State},
    http::{header, request::Parts, HeaderMap},
    Error,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use serde_json::{Map, Value};
use std::net::SocketAddr;

use crate::db_storage::LeadStorage;
use crate::errors::AppError;
use crate::models::NewRequestLog;

/// Largest body the logger buffers; larger bodies are cut off earlier by the
/// body limit layer.
pub const MAX_LOGGED_BODY_BYTES: usize = 5 * 1024 * 1024;

const REDACTED: &str = "[REDACTED]";

/// Paths not worth an audit row (health checks and docs assets).
fn is_ignored_path(path: &str) -> bool {
    path == "/health" || path.starts_with("/docs") || path.starts_with("/api-docs")
}

/// Axum middleware that records every request and then hands it on.
///
/// The body is buffered so it can be logged and still reach the handler.
/// The insert runs in the background; a failed insert is logged and never
/// affects the response.
pub async fn log_request(State(storage): State<LeadStorage>, req: Request, next: Next) -> Response {
    if is_ignored_path(req.uri().path()) {
        return next.run(req).await;
    }

    let (parts, body) = req.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_LOGGED_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) if is_length_limit(&e) => {
            tracing::warn!("Request body over {} bytes rejected", MAX_LOGGED_BODY_BYTES);
            return AppError::PayloadTooLarge("Request body too large".to_string()).into_response();
        }
        Err(e) => {
            tracing::warn!("Failed to read request body: {}", e);
            return AppError::BadRequest("Invalid request body".to_string()).into_response();
        }
    };

    let entry = build_log_entry(&parts, &bytes);
    tokio::spawn(async move {
        if let Err(e) = storage.insert_request_log(&entry).await {
            tracing::error!("Error logging request: {}", e);
        }
    });

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Whether a body read failed on a size limit, ours or the body limit layer's.
fn is_length_limit(err: &Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

/// Turn request parts and the buffered body into an audit row.
pub fn build_log_entry(parts: &Parts, body: &Bytes) -> NewRequestLog {
    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    NewRequestLog {
        method: parts.method.to_string(),
        url: parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string()),
        headers: headers_to_json(&parts.headers),
        body: body_to_json(content_type, body),
        query_params: parts
            .uri
            .query()
            .map(form_pairs_to_json)
            .unwrap_or_else(|| Value::Object(Map::new())),
        ip: client_ip(parts),
        user_agent: parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    }
}

fn headers_to_json(headers: &HeaderMap) -> Value {
    let mut map = Map::new();
    for name in headers.keys() {
        let value = if *name == header::AUTHORIZATION {
            REDACTED.to_string()
        } else {
            headers
                .get_all(name)
                .iter()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ")
        };
        map.insert(name.as_str().to_string(), Value::String(value));
    }
    Value::Object(map)
}

fn body_to_json(content_type: &str, body: &[u8]) -> Option<Value> {
    if body.is_empty() {
        return None;
    }

    let content_type = content_type.to_ascii_lowercase();
    if content_type.starts_with("application/json") {
        if let Ok(value) = serde_json::from_slice::<Value>(body) {
            return Some(value);
        }
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        return Some(form_pairs_to_json(&String::from_utf8_lossy(body)));
    }

    Some(Value::String(String::from_utf8_lossy(body).into_owned()))
}

fn form_pairs_to_json(encoded: &str) -> Value {
    let map = url::form_urlencoded::parse(encoded.as_bytes())
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect::<Map<_, _>>();
    Value::Object(map)
}

fn client_ip(parts: &Parts) -> Option<String> {
    let forwarded = parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    let real_ip = || {
        parts
            .headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    forwarded
        .or_else(real_ip)
        .map(str::to_string)
        .or_else(|| {
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parts_for(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_json_request_entry() {
        let parts = parts_for(
            axum::http::Request::post("/retired?utm_source=google&ref=lp")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, "Bearer secret")
                .header(header::USER_AGENT, "curl/8.0")
                .header("x-forwarded-for", "203.0.113.7, 10.0.0.1"),
        );
        let body = Bytes::from_static(br#"{"name":"Ana"}"#);

        let entry = build_log_entry(&parts, &body);

        assert_eq!(entry.method, "POST");
        assert_eq!(entry.url, "/retired?utm_source=google&ref=lp");
        assert_eq!(entry.body, Some(json!({"name": "Ana"})));
        assert_eq!(entry.query_params, json!({"utm_source": "google", "ref": "lp"}));
        assert_eq!(entry.ip.as_deref(), Some("203.0.113.7"));
        assert_eq!(entry.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(entry.headers["authorization"], "[REDACTED]");
        assert_eq!(entry.headers["content-type"], "application/json");
    }

    #[test]
    fn test_form_and_empty_bodies() {
        let parts = parts_for(
            axum::http::Request::post("/api/athletes-rights")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded"),
        );
        let entry = build_log_entry(&parts, &Bytes::from_static(b"name=Jo%C3%A3o&phone=11"));
        assert_eq!(entry.body, Some(json!({"name": "João", "phone": "11"})));
        assert_eq!(entry.query_params, json!({}));
        assert_eq!(entry.ip, None);

        let parts = parts_for(axum::http::Request::get("/retired/1"));
        let entry = build_log_entry(&parts, &Bytes::new());
        assert_eq!(entry.body, None);
        assert_eq!(entry.user_agent, None);
    }

    #[test]
    fn test_unparseable_bodies_are_kept_as_text() {
        assert_eq!(
            body_to_json("application/json", b"{broken"),
            Some(json!("{broken"))
        );
        assert_eq!(body_to_json("text/plain", b"hello"), Some(json!("hello")));
    }

    #[test]
    fn test_peer_address_fallback() {
        let mut parts = parts_for(axum::http::Request::get("/retired/1"));
        parts
            .extensions
            .insert(ConnectInfo(SocketAddr::from(([192, 0, 2, 1], 4000))));
        assert_eq!(client_ip(&parts).as_deref(), Some("192.0.2.1"));

        let parts = parts_for(axum::http::Request::get("/retired/1").header("x-real-ip", "198.51.100.2"));
        assert_eq!(client_ip(&parts).as_deref(), Some("198.51.100.2"));
    }

    #[tokio::test]
    async fn test_length_limit_is_detected() {
        let err = axum::body::to_bytes(Body::from(vec![b'x'; 16]), 8)
            .await
            .unwrap_err();
        assert!(is_length_limit(&err));

        let err = Error::new(std::io::Error::new(std::io::ErrorKind::Other, "reset"));
        assert!(!is_length_limit(&err));
    }

    #[test]
    fn test_health_and_docs_paths_are_ignored() {
        assert!(is_ignored_path("/health"));
        assert!(is_ignored_path("/docs/"));
        assert!(is_ignored_path("/api-docs/openapi.json"));
        assert!(!is_ignored_path("/retired"));
    }
}
