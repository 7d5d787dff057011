//! # tack
//!
//! A tiny resource-oriented HTTP dispatcher.
//! One path, one verb, one action.
//!
//! ## The contract
//!
//! A [`Handler`] turns a [`Request`] into exactly one [`Response`]. A
//! [`Router`] is a handler that maps paths of the form `/posts` or
//! `/posts/5` onto a [`Resource`] registered as `Posts`, builds one instance
//! of it per request, and runs the action the method asks for:
//!
//! | method | `/posts` | `/posts/5` |
//! |---|---|---|
//! | `GET` | `list` | `read("5")` |
//! | `PUT` | `create` | `create` |
//! | `POST` | 501 | `update("5")` |
//! | `DELETE` | 501 | `delete("5")` |
//!
//! Whatever the action does, the client gets a response: undefined actions
//! are `501`, empty results `404`, failures and panics a bare `500`.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use tack::{respond, ActionResult, Params, Resource, Router, Server, Status};
//! use tack::middleware::{HandlerExt, Trace};
//!
//! struct Posts {
//!     params: Params,
//! }
//!
//! impl Resource for Posts {
//!     fn list(&self) -> ActionResult {
//!         let page = self.params.get("page").map(String::as_str).unwrap_or("1");
//!         Ok(Some(respond(format!("page {page}"), Status::Ok, &[])))
//!     }
//!
//!     fn read(&self, id: &str) -> ActionResult {
//!         Ok((id == "1").then(|| respond("hello", Status::Ok, &[])))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tack::Error> {
//!     let app = Router::new()
//!         .mount("Posts", |_id, params| Posts { params })
//!         .layer(Trace::new);
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await
//! }
//! ```

mod action;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod middleware;
pub mod resource;

pub use action::Action;
pub use error::Error;
pub use handler::{BoxedHandler, Endpoint, Handler};
pub use method::{Method, UnknownMethod};
pub use request::{Params, Request};
pub use resource::{respond, ActionError, ActionResult, Resource};
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
