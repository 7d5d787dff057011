//! HTTP status codes as a typed enum.
//!
//! Only the codes a resource is expected to answer with are named. Anything
//! else can still be sent: [`ResponseBuilder::code`](crate::ResponseBuilder::code)
//! takes a raw `u16`.
//!
//! ```rust
//! use tack::{Response, Status};
//!
//! Response::builder()
//!     .status(Status::Created)
//!     .header("Location", "/posts/42")
//!     .html("created");
//! ```

/// The status codes tack names.
#[allow(clippy::enum_variant_names)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                   // 200
    Created,              // 201
    NoContent,            // 204

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,           // 400
    NotFound,             // 404
    MethodNotAllowed,     // 405
    UnprocessableEntity,  // 422

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError,  // 500
    NotImplemented,       // 501
    ServiceUnavailable,   // 503
}

impl Status {
    pub fn code(self) -> u16 {
        self.into()
    }

    /// Reason phrase, also used verbatim as the body of tack's canned responses.
    pub fn reason(self) -> &'static str {
        match self {
            Self::Ok                  => "OK",
            Self::Created             => "Created",
            Self::NoContent           => "No Content",
            Self::BadRequest          => "Bad Request",
            Self::NotFound            => "Not Found",
            Self::MethodNotAllowed    => "Method Not Allowed",
            Self::UnprocessableEntity => "Unprocessable Entity",
            Self::InternalServerError => "Internal Server Error",
            Self::NotImplemented      => "Not Implemented",
            Self::ServiceUnavailable  => "Service Unavailable",
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::Created             => 201,
            Status::NoContent           => 204,
            Status::BadRequest          => 400,
            Status::NotFound            => 404,
            Status::MethodNotAllowed    => 405,
            Status::UnprocessableEntity => 422,
            Status::InternalServerError => 500,
            Status::NotImplemented      => 501,
            Status::ServiceUnavailable  => 503,
        }
    }
}
