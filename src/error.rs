//! Unified error type.

use std::fmt;

/// The error type returned by tack's fallible operations.
///
/// Failures *inside* a resource (a missing action, a failing action, an empty
/// result) are expressed as HTTP [`Response`](crate::Response) values, never as
/// `Error`s. This type surfaces what happens before a resource exists: a path
/// that does not route, an endpoint that cannot serve, or the transport
/// failing to bind.
#[derive(Debug)]
pub enum Error {
    /// The path is not `/resource` or `/resource/identifier`, or names no
    /// registered resource.
    RouteNotFound { path: String },
    /// The registered endpoint refused to produce a handler for the request.
    NotAHandler { resource: String },
    /// `Server::bind` was given something that is not a `host:port` pair.
    InvalidAddress(String),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RouteNotFound { path } => write!(f, "no route for `{path}`"),
            Self::NotAHandler { resource } => write!(f, "`{resource}` is not a handler"),
            Self::InvalidAddress(addr) => write!(f, "invalid socket address `{addr}`"),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
