//! The handler contract and its call-time capability check.
//!
//! # Handlers
//!
//! Anything that turns a [`Request`] into a [`Response`] is a [`Handler`].
//! There is no base type: implement the trait on a struct, or pass a closure.
//!
//! ```text
//! |req: &Request| Response::html("OK")     ← closure, blanket impl
//! struct Info;  impl Handler for Info      ← named type
//! Trace::new(router)                       ← middleware wrapping a handler
//! ```
//!
//! # Endpoints
//!
//! The router does not store handlers directly. It stores an [`Endpoint`]
//! per resource name and asks it, per request, for a handler. An endpoint may
//! decline; the router then fails that dispatch with
//! [`Error::NotAHandler`](crate::Error::NotAHandler). Whether a registered
//! name can serve is therefore decided at call time, not at registration time.
//!
//! ```text
//! router.dispatch("/posts/5", "GET", "")
//!        ↓ registry lookup "Posts"
//! Arc<dyn Endpoint>
//!        ↓ endpoint.bind(&req)
//! Some(Arc<dyn Handler>) ──→ handler.handle(&req) ──→ Response
//! None                   ──→ Err(Error::NotAHandler)
//! ```

use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased handler shared across concurrent requests.
pub type BoxedHandler = Arc<dyn Handler>;

/// Turns one request into exactly one response.
///
/// `handle` is synchronous and must not fail: failures are responses.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, req: &Request) -> Response;
}

/// Any `Fn(&Request) -> impl IntoResponse` is a handler.
///
/// Closures need their argument annotated (`|req: &Request| …`) so the
/// compiler can pick the higher-ranked signature.
impl<F, R> Handler for F
where
    F: Fn(&Request) -> R + Send + Sync + 'static,
    R: IntoResponse,
{
    fn handle(&self, req: &Request) -> Response {
        (self)(req).into_response()
    }
}

/// Something registered under a resource name that can be asked for a
/// handler at dispatch time.
pub trait Endpoint: Send + Sync + 'static {
    /// Returns the handler for this request, or `None` if this endpoint
    /// cannot serve requests.
    fn bind(&self, req: &Request) -> Option<BoxedHandler>;
}

/// One handler instance serving every request, e.g. a health or info page.
pub(crate) struct Shared(pub(crate) BoxedHandler);

impl Endpoint for Shared {
    fn bind(&self, _req: &Request) -> Option<BoxedHandler> {
        Some(Arc::clone(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Status;

    struct Info;

    impl Handler for Info {
        fn handle(&self, _req: &Request) -> Response {
            Response::text("up")
        }
    }

    #[test]
    fn closures_and_types_are_handlers() {
        let req = Request::new("GET", "/info", "");
        let closure = |req: &Request| format!("hello {}", req.path());
        assert_eq!(closure.handle(&req).body(), "hello /info");
        assert_eq!(Info.handle(&req).body(), "up");

        let status = |_req: &Request| Status::ServiceUnavailable;
        assert_eq!(status.handle(&req).status_code(), 503);
    }

    #[test]
    fn shared_endpoint_hands_out_the_same_handler() {
        let handler: BoxedHandler = Arc::new(Info);
        let endpoint = Shared(Arc::clone(&handler));
        let req = Request::new("GET", "/info", "");
        let bound = endpoint.bind(&req).expect("shared endpoints always bind");
        assert!(Arc::ptr_eq(&bound, &handler));
    }
}
