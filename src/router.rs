//! Path routing and the resource registry.
//!
//! Two path shapes, one flat namespace. `/posts` and `/posts/5` route to the
//! resource registered as `Posts`; nothing deeper is routed. No wildcards,
//! no nesting, no reflection: names are registered at startup and looked up
//! exactly.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use tracing::{debug, error, warn};

use crate::error::Error;
use crate::handler::{Endpoint, Handler, Shared};
use crate::request::{Params, Request};
use crate::resource::{self, Factory, Resource};
use crate::response::Response;

/// The application router.
///
/// Build it once at startup, then either call [`dispatch`](Router::dispatch)
/// from your own transport or hand it to [`Server::serve`](crate::Server::serve)
/// (it implements [`Handler`]). Each registration returns `self` so calls
/// chain naturally.
pub struct Router {
    shapes: MatchitRouter<Shape>,
    resources: HashMap<String, Arc<dyn Endpoint>>,
}

#[derive(Clone, Copy)]
enum Shape {
    Collection,
    Member,
}

impl Router {
    pub fn new() -> Self {
        let mut shapes = MatchitRouter::new();
        for (pattern, shape) in [
            ("/{resource}", Shape::Collection),
            ("/{resource}/{identifier}", Shape::Member),
        ] {
            shapes
                .insert(pattern, shape)
                .unwrap_or_else(|e| panic!("invalid route `{pattern}`: {e}"));
        }
        Self { shapes, resources: HashMap::new() }
    }

    /// Registers a resource under `name`. `factory` builds a fresh resource
    /// from the identifier and parameters of every request routed to it.
    ///
    /// Names are matched against the capitalised first path segment, so
    /// `/posts` and `/POSTS` both reach a resource mounted as `"Posts"`.
    pub fn mount<F, R>(self, name: &str, factory: F) -> Self
    where
        F: Fn(Option<String>, Params) -> R + Send + Sync + 'static,
        R: Resource,
    {
        self.endpoint(name, Factory(factory))
    }

    /// Registers one handler that serves every request routed to `name`,
    /// whatever the method or identifier.
    pub fn handler(self, name: &str, handler: impl Handler) -> Self {
        self.endpoint(name, Shared(Arc::new(handler)))
    }

    /// Registers a custom [`Endpoint`].
    pub fn endpoint(mut self, name: &str, endpoint: impl Endpoint) -> Self {
        if capitalize(name) != name {
            warn!(resource = name, "resource name is not capitalised, no path can reach it");
        }
        if self.resources.insert(name.to_owned(), Arc::new(endpoint)).is_some() {
            warn!(resource = name, "resource registered twice, keeping the latest");
        }
        self
    }

    /// Routes one request and produces one response.
    ///
    /// Fails with [`Error::RouteNotFound`] when the path has the wrong shape
    /// or names no registered resource, and with [`Error::NotAHandler`] when
    /// the registered endpoint declines the request. Anything that happens
    /// inside the resource is already a response.
    pub fn dispatch(&self, raw_path: &str, method: &str, query_string: &str) -> Result<Response, Error> {
        self.route(Request::new(method, raw_path, query_string))
    }

    /// Splits a path into its resource name (capitalised) and identifier.
    ///
    /// ```rust
    /// use tack::Router;
    ///
    /// let router = Router::new();
    /// assert_eq!(router.parse_path("/posts").unwrap(), ("Posts".to_owned(), None));
    /// assert_eq!(router.parse_path("/posts/5").unwrap(), ("Posts".to_owned(), Some("5".to_owned())));
    /// assert!(router.parse_path("/").is_err());
    /// assert!(router.parse_path("/posts/5/comments").is_err());
    /// ```
    pub fn parse_path(&self, path: &str) -> Result<(String, Option<String>), Error> {
        let not_found = || Error::RouteNotFound { path: path.to_owned() };

        let trimmed = match path.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => path,
        };
        let matched = self.shapes.at(trimmed).map_err(|_| not_found())?;

        let resource = matched.params.get("resource").filter(|s| is_word(s)).ok_or_else(not_found)?;
        let identifier = match matched.value {
            Shape::Collection => None,
            Shape::Member => {
                let id = matched.params.get("identifier").filter(|s| is_word(s)).ok_or_else(not_found)?;
                Some(id.to_owned())
            }
        };
        Ok((capitalize(resource), identifier))
    }

    fn route(&self, req: Request) -> Result<Response, Error> {
        let (name, identifier) = self.parse_path(req.path())?;
        let endpoint = self.resources.get(&name).ok_or_else(|| Error::RouteNotFound {
            path: req.path().to_owned(),
        })?;

        let req = req.with_identifier(identifier);
        let handler = endpoint.bind(&req).ok_or(Error::NotAHandler { resource: name })?;
        Ok(handler.handle(&req))
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

/// Routing failures become responses: an unroutable path is a 404, an
/// endpoint that cannot serve is a 500.
impl Handler for Router {
    fn handle(&self, req: &Request) -> Response {
        match self.route(req.clone()) {
            Ok(response) => response,
            Err(e @ Error::RouteNotFound { .. }) => {
                debug!("{e}");
                resource::not_found()
            }
            Err(e) => {
                error!("{e}");
                resource::internal_error()
            }
        }
    }
}

/// `\w+` over ASCII: letters, digits and underscore.
fn is_word(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// `posts` → `Posts`, `POSTS` → `Posts`.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalises_like_a_type_name() {
        assert_eq!(capitalize("posts"), "Posts");
        assert_eq!(capitalize("BLOG_posts"), "Blog_posts");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn parses_collection_and_member_paths() {
        let router = Router::new();
        assert_eq!(router.parse_path("/posts").unwrap(), ("Posts".into(), None));
        assert_eq!(router.parse_path("/posts/").unwrap(), ("Posts".into(), None));
        assert_eq!(router.parse_path("/posts/a_1").unwrap(), ("Posts".into(), Some("a_1".into())));
        assert_eq!(router.parse_path("/posts/5/").unwrap(), ("Posts".into(), Some("5".into())));
    }

    #[test]
    fn rejects_everything_else() {
        let router = Router::new();
        for path in ["", "/", "//", "posts", "/posts//", "/posts/5/6", "/po-sts", "/posts/5.json", "/posts/%20"] {
            assert!(
                matches!(router.parse_path(path), Err(Error::RouteNotFound { .. })),
                "{path:?} should not route",
            );
        }
    }
}
