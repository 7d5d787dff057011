//! Middleware layer.
//!
//! A middleware is a [`Handler`] that owns another handler: it sees the
//! request on the way in and the response on the way out. Layers compose
//! outward, the last one applied runs first:
//!
//! ```rust
//! use tack::middleware::{HandlerExt, Jsonp, Trace};
//! use tack::Router;
//!
//! let app = Router::new()
//!     .layer(Jsonp::new)
//!     .layer(Trace::new);
//! ```

mod jsonp;
mod trace;

pub use jsonp::Jsonp;
pub use trace::Trace;

use crate::handler::Handler;

/// Chaining helper available on every handler.
pub trait HandlerExt: Handler + Sized {
    /// Wraps `self` in the middleware built by `layer`.
    fn layer<L, F>(self, layer: F) -> L
    where
        F: FnOnce(Self) -> L,
        L: Handler,
    {
        layer(self)
    }
}

impl<H: Handler> HandlerExt for H {}
