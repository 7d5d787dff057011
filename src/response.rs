//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Every response built here carries a `Content-Length` equal to the byte
//! length of its body. Headers keep their insertion order; setting a header
//! that already exists (ASCII case-insensitive) replaces the value in place.

use bytes::Bytes;
use http_body_util::Full;
use tracing::warn;

use crate::status::Status;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Content-type values for use with [`ResponseBuilder::body`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentType {
    Html,        // text/html
    Javascript,  // application/javascript
    Json,        // application/json
    Text,        // text/plain
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html       => "text/html",
            Self::Javascript => "application/javascript",
            Self::Json       => "application/json",
            Self::Text       => "text/plain",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use tack::{Response, Status};
///
/// let ok = Response::html("OK");
/// assert_eq!(ok.header("Content-Length"), Some("2"));
///
/// let missing = Response::status(Status::NotFound);
/// assert_eq!(missing.body(), "Not Found");
///
/// let created = Response::builder()
///     .status(Status::Created)
///     .header("Location", "/posts/42")
///     .json(r#"{"id":42}"#);
/// assert_eq!(created.status_code(), 201);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub(crate) status: u16,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: String,
}

impl Response {
    /// `200 OK` — `text/html`.
    pub fn html(body: impl Into<String>) -> Self {
        Self::builder().html(body)
    }

    /// `200 OK` — `text/plain`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::builder().text(body)
    }

    /// `200 OK` — `application/json`.
    pub fn json(body: impl Into<String>) -> Self {
        Self::builder().json(body)
    }

    /// `text/html` response whose body is the status's reason phrase.
    pub fn status(status: Status) -> Self {
        Self::builder().status(status).html(status.reason())
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok.into() }
    }

    pub fn status_code(&self) -> u16 { self.status }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &str { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Rebuilds the response around a new body, keeping status and header
    /// order and recomputing `Content-Length`.
    pub fn map_body(self, f: impl FnOnce(String) -> String) -> Self {
        let body = f(self.body);
        let mut headers = self.headers;
        set_header(&mut headers, "Content-Length", &body.len().to_string());
        Self { status: self.status, headers, body }
    }

    /// Same response with one header set (replaced in place when present).
    pub fn with_header(self, name: &str, value: &str) -> Self {
        let mut headers = self.headers;
        set_header(&mut headers, name, value);
        Self { headers, ..self }
    }

    /// Converts into the `http` crate's response type for hyper.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            let valid = http::HeaderName::from_bytes(name.as_bytes()).is_ok()
                && http::HeaderValue::from_str(value).is_ok();
            if valid {
                builder = builder.header(name.as_str(), value.as_str());
            } else {
                warn!(header = %name, "dropping header that is not valid on the wire");
            }
        }
        builder
            .body(Full::new(Bytes::from(self.body)))
            .unwrap_or_else(|e| {
                warn!("response could not be encoded: {e}");
                let mut fallback = http::Response::new(Full::new(Bytes::new()));
                *fallback.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
/// Terminated by a typed body method. Header precedence, lowest first:
/// the content type implied by the terminator, the computed
/// `Content-Length`, then every header passed to [`header`](Self::header).
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: u16,
}

impl ResponseBuilder {
    pub fn status(mut self, status: Status) -> Self {
        self.status = status.into();
        self
    }

    /// Raw status code. Values outside `100..=599` are sent as `500`.
    pub fn code(mut self, code: u16) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a `text/html` body.
    pub fn html(self, body: impl Into<String>) -> Response {
        self.body(ContentType::Html, body)
    }

    /// Terminate with a `text/plain` body.
    pub fn text(self, body: impl Into<String>) -> Response {
        self.body(ContentType::Text, body)
    }

    /// Terminate with an `application/json` body.
    pub fn json(self, body: impl Into<String>) -> Response {
        self.body(ContentType::Json, body)
    }

    /// Terminate with a typed body.
    pub fn body(self, content_type: ContentType, body: impl Into<String>) -> Response {
        let body = body.into();
        let mut headers = vec![
            ("Content-Type".to_owned(), content_type.as_str().to_owned()),
            ("Content-Length".to_owned(), body.len().to_string()),
        ];
        for (name, value) in &self.headers {
            set_header(&mut headers, name, value);
        }
        let status = if (100..=599).contains(&self.status) {
            self.status
        } else {
            Status::InternalServerError.into()
        };
        Response { status, headers, body }
    }
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
        Some((_, v)) => *v = value.to_owned(),
        None => headers.push((name.to_owned(), value.to_owned())),
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Closure handlers may return anything implementing this trait.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::html(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::html(self) }
}

/// Return a [`Status`] directly from a handler: `|_| Status::NotFound`
impl IntoResponse for Status {
    fn into_response(self) -> Response { Response::status(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_ok_html_with_length() {
        let res = Response::html("héllo");
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.headers(), &[
            ("Content-Type".to_owned(), "text/html".to_owned()),
            ("Content-Length".to_owned(), "6".to_owned()),
        ]);
    }

    #[test]
    fn caller_headers_win_in_place() {
        let res = Response::builder()
            .header("content-type", "application/json")
            .header("X-Request-Id", "abc")
            .html("{}");
        assert_eq!(res.headers()[0], ("Content-Type".to_owned(), "application/json".to_owned()));
        assert_eq!(res.headers()[2], ("X-Request-Id".to_owned(), "abc".to_owned()));
        assert_eq!(res.headers().len(), 3);
    }

    #[test]
    fn caller_may_override_content_length() {
        let res = Response::builder().header("Content-Length", "0").html("abc");
        assert_eq!(res.header("content-length"), Some("0"));
    }

    #[test]
    fn out_of_range_code_becomes_500() {
        assert_eq!(Response::builder().code(42).text("x").status_code(), 500);
        assert_eq!(Response::builder().code(599).text("x").status_code(), 599);
    }

    #[test]
    fn map_body_recomputes_length() {
        let res = Response::json("[1]").map_body(|b| format!("cb({b})"));
        assert_eq!(res.body(), "cb([1])");
        assert_eq!(res.header("Content-Length"), Some("7"));
        assert_eq!(res.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn status_body_is_reason_phrase() {
        let res = Status::NotImplemented.into_response();
        assert_eq!(res.status_code(), 501);
        assert_eq!(res.body(), "Not Implemented");
    }

    #[test]
    fn into_inner_carries_status_and_headers() {
        let inner = Response::builder()
            .status(Status::Created)
            .header("Location", "/posts/1")
            .text("ok")
            .into_inner();
        assert_eq!(inner.status(), http::StatusCode::CREATED);
        assert_eq!(inner.headers()["location"], "/posts/1");
        assert_eq!(inner.headers()["content-length"], "2");
    }
}
