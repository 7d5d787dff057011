//! Per-request tracing span.

use std::time::Instant;

use tracing::{info, info_span};

use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;

/// Opens an `info` span per request carrying method and path, and logs the
/// status and latency once the inner handler returns.
pub struct Trace<H> {
    inner: H,
}

impl<H: Handler> Trace<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H: Handler> Handler for Trace<H> {
    fn handle(&self, req: &Request) -> Response {
        let span = info_span!("request", method = %req.method(), path = %req.path());
        let _guard = span.enter();

        let start = Instant::now();
        let response = self.inner.handle(req);
        info!(
            status = response.status_code(),
            latency_us = start.elapsed().as_micros() as u64,
            "request handled"
        );
        response
    }
}
