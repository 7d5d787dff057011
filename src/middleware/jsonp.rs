//! JSON-P padding.
//!
//! `GET /posts?callback=render` answers `render(<body>)` instead of `<body>`,
//! so the response can be loaded through a `<script>` tag.

use crate::handler::Handler;
use crate::request::Request;
use crate::response::{ContentType, Response};

/// Pads the inner response body with the `callback` parameter, when present.
///
/// Callback names are limited to ASCII letters, digits, `_`, `.` and `$`;
/// any other value leaves the response untouched. Padded responses are
/// re-typed as `application/javascript` and get a fresh `Content-Length`.
pub struct Jsonp<H> {
    inner: H,
}

impl<H: Handler> Jsonp<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H: Handler> Handler for Jsonp<H> {
    fn handle(&self, req: &Request) -> Response {
        let response = self.inner.handle(req);
        match req.param("callback").filter(|cb| is_callback(cb)) {
            Some(callback) => response
                .map_body(|body| format!("{callback}({body})"))
                .with_header("Content-Type", ContentType::Javascript.as_str()),
            None => response,
        }
    }
}

fn is_callback(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b'$'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> Jsonp<impl Handler> {
        Jsonp::new(|_req: &Request| Response::json(r#"{"id":1}"#))
    }

    #[test]
    fn pads_body_and_fixes_headers() {
        let res = app().handle(&Request::new("GET", "/posts/1", "callback=show"));
        assert_eq!(res.body(), r#"show({"id":1})"#);
        assert_eq!(res.header("Content-Length"), Some("14"));
        assert_eq!(res.header("Content-Type"), Some("application/javascript"));
    }

    #[test]
    fn untouched_without_callback() {
        let res = app().handle(&Request::new("GET", "/posts/1", "page=2"));
        assert_eq!(res.body(), r#"{"id":1}"#);
        assert_eq!(res.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn refuses_script_injection() {
        let res = app().handle(&Request::new("GET", "/posts/1", "callback=alert(1)%3B"));
        assert_eq!(res.body(), r#"{"id":1}"#);
    }
}
