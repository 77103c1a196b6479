use axum::{
    extract::Request,
    http::{header::HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for the request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

tokio::task_local! {
    static CURRENT_REQUEST_ID: RequestId;
}

/// Identifier attached to every request, echoed in responses and error bodies
#[derive(Debug, Clone)]
pub struct RequestId(String);

impl RequestId {
    /// Accepts a caller-supplied id, keeping only header-safe characters
    pub fn new(value: &str) -> Self {
        let sanitized: String = value
            .chars()
            .filter(|c| c.is_ascii_graphic())
            .take(64)
            .collect();
        if sanitized.is_empty() {
            Self::default()
        } else {
            Self(sanitized)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self(format!("req-{}", Uuid::new_v4().simple()))
    }
}

/// Request id of the request currently being handled, if any
pub fn current_request_id() -> Option<RequestId> {
    CURRENT_REQUEST_ID.try_with(|rid| rid.clone()).ok()
}

/// Ensures every request carries a request id for traceability
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(RequestId::new)
        .unwrap_or_default();

    // Request ids are sanitized ASCII, so the header value cannot fail.
    let header_value = HeaderValue::from_str(request_id.as_str())
        .unwrap_or_else(|_| HeaderValue::from_static("invalid"));
    request
        .headers_mut()
        .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value.clone());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id.as_str(),
        method = %request.method(),
        uri = %request.uri(),
    );

    let mut response = CURRENT_REQUEST_ID
        .scope(request_id, next.run(request))
        .instrument(span)
        .await;

    response
        .headers_mut()
        .insert(HeaderName::from_static(REQUEST_ID_HEADER), header_value);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_prefixed() {
        let rid = RequestId::default();
        assert!(rid.as_str().starts_with("req-"));
    }

    #[test]
    fn caller_ids_are_sanitized() {
        let rid = RequestId::new("abc\r\ndef");
        assert_eq!(rid.as_str(), "abcdef");
        assert!(!RequestId::new("\r\n").as_str().is_empty());
    }
}
