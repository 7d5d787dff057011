//! Resources: one instance per request, one action per instance.
//!
//! A [`Resource`] implements whichever of the five actions it supports.
//! [`invoke`] is the isolation boundary between resource code and the rest of
//! the stack: whatever the action does, exactly one [`Response`] comes out.
//!
//! | outcome | response |
//! |---|---|
//! | no action for this method | `501 Not Implemented` |
//! | action not defined on the resource | `501 Not Implemented` |
//! | action returned `Err(Failed)` or panicked | `500 Internal Server Error` |
//! | action returned `Ok(None)` | `404 Not Found` |
//! | action returned `Ok(Some(res))` | `res` |
//!
//! ```rust
//! use tack::{respond, ActionResult, Params, Resource, Router};
//!
//! struct Posts { params: Params }
//!
//! impl Resource for Posts {
//!     fn read(&self, id: &str) -> ActionResult {
//!         Ok((id == "1").then(|| respond("first post", 200u16, &[])))
//!     }
//! }
//!
//! let router = Router::new().mount("Posts", |_id, params| Posts { params });
//! let res = router.dispatch("/posts/1", "GET", "").unwrap();
//! assert_eq!(res.body(), "first post");
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::error;

use crate::action::Action;
use crate::handler::{BoxedHandler, Endpoint, Handler};
use crate::request::{Params, Request};
use crate::response::Response;
use crate::status::Status;

/// What an action hands back. `Ok(None)` means "nothing here" (404).
pub type ActionResult = Result<Option<Response>, ActionError>;

/// Why an action produced no response.
#[derive(Debug)]
pub enum ActionError {
    /// The resource does not define this action.
    Undefined,
    /// The action ran and failed. Never shown to the client.
    Failed(Box<dyn std::error::Error + Send + Sync>),
}

impl ActionError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into().into())
    }
}

/// Lets actions use `?` on any error type.
impl<E> From<E> for ActionError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(e: E) -> Self {
        Self::Failed(Box::new(e))
    }
}

/// A per-request object bound to an identifier and parameters.
///
/// Every action defaults to [`ActionError::Undefined`]; override the ones the
/// resource supports.
pub trait Resource: Send + Sync + 'static {
    fn list(&self) -> ActionResult {
        Err(ActionError::Undefined)
    }

    fn read(&self, _id: &str) -> ActionResult {
        Err(ActionError::Undefined)
    }

    fn create(&self) -> ActionResult {
        Err(ActionError::Undefined)
    }

    fn update(&self, _id: &str) -> ActionResult {
        Err(ActionError::Undefined)
    }

    fn delete(&self, _id: &str) -> ActionResult {
        Err(ActionError::Undefined)
    }
}

/// Runs `action` on `resource` and converts every outcome into a response.
///
/// Failures and panics are logged and answered with a bare 500; nothing
/// propagates past this call.
pub fn invoke<R>(resource: &R, action: Option<Action>, identifier: Option<&str>) -> Response
where
    R: Resource + ?Sized,
{
    let Some(action) = action else {
        return not_implemented();
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| match (action, identifier) {
        (Action::List, _)          => resource.list(),
        (Action::Create, _)        => resource.create(),
        (Action::Read, Some(id))   => resource.read(id),
        (Action::Update, Some(id)) => resource.update(id),
        (Action::Delete, Some(id)) => resource.delete(id),
        _                          => Err(ActionError::Undefined),
    }));

    match outcome {
        Ok(Ok(Some(response))) => response,
        Ok(Ok(None)) => not_found(),
        Ok(Err(ActionError::Undefined)) => not_implemented(),
        Ok(Err(ActionError::Failed(e))) => {
            error!(%action, error = %e, "action failed");
            internal_error()
        }
        Err(payload) => {
            error!(%action, panic = panic_message(&*payload), "action panicked");
            internal_error()
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload.downcast_ref::<&str>().copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Builds a `text/html` response.
///
/// Header precedence, lowest first: `Content-Type: text/html`, the computed
/// `Content-Length`, then `headers`. Caller headers win on conflict.
pub fn respond(body: impl Into<String>, status: impl Into<u16>, headers: &[(&str, &str)]) -> Response {
    headers.iter()
        .fold(Response::builder().code(status.into()), |b, (name, value)| b.header(name, value))
        .html(body)
}

pub fn not_found() -> Response {
    Response::status(Status::NotFound)
}

pub fn not_implemented() -> Response {
    Response::status(Status::NotImplemented)
}

pub fn internal_error() -> Response {
    Response::status(Status::InternalServerError)
}

pub fn unprocessable() -> Response {
    Response::status(Status::UnprocessableEntity)
}

// ── Endpoint glue ─────────────────────────────────────────────────────────────

/// A resource instance adapted to the handler contract.
struct Bound<R>(R);

impl<R: Resource> Handler for Bound<R> {
    fn handle(&self, req: &Request) -> Response {
        let action = Action::resolve(req.method(), req.identifier().is_some());
        invoke(&self.0, action, req.identifier())
    }
}

/// Builds a fresh resource for every request.
pub(crate) struct Factory<F>(pub(crate) F);

impl<F, R> Endpoint for Factory<F>
where
    F: Fn(Option<String>, Params) -> R + Send + Sync + 'static,
    R: Resource,
{
    fn bind(&self, req: &Request) -> Option<BoxedHandler> {
        let resource = (self.0)(req.identifier().map(str::to_owned), req.params().clone());
        Some(Arc::new(Bound(resource)))
    }
}
