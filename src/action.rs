//! Verb dispatch: HTTP method plus identifier presence to a CRUD action.
//!
//! | method | identifier | action |
//! |---|---|---|
//! | `GET` | no | [`Action::List`] |
//! | `GET` | yes | [`Action::Read`] |
//! | `PUT` | either | [`Action::Create`] |
//! | `POST` | yes | [`Action::Update`] |
//! | `DELETE` | yes | [`Action::Delete`] |
//!
//! Every other combination resolves to `None`, which the resource base
//! answers with `501 Not Implemented`. Resolution never fails.

use std::fmt;

use crate::method::Method;

/// A named operation on a resource.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Action {
    List,
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    /// Resolves the action for a raw method token.
    pub fn resolve(method: &str, identifier_present: bool) -> Option<Self> {
        method.parse().ok().and_then(|m| Self::for_method(m, identifier_present))
    }

    pub fn for_method(method: Method, identifier_present: bool) -> Option<Self> {
        match (method, identifier_present) {
            (Method::Get, false)   => Some(Self::List),
            (Method::Get, true)    => Some(Self::Read),
            (Method::Put, _)       => Some(Self::Create),
            (Method::Post, true)   => Some(Self::Update),
            (Method::Delete, true) => Some(Self::Delete),
            _                      => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::List   => "list",
            Self::Read   => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_table() {
        let table = [
            ("GET", false, Some(Action::List)),
            ("GET", true, Some(Action::Read)),
            ("PUT", false, Some(Action::Create)),
            ("PUT", true, Some(Action::Create)),
            ("POST", true, Some(Action::Update)),
            ("POST", false, None),
            ("DELETE", true, Some(Action::Delete)),
            ("DELETE", false, None),
            ("PATCH", true, None),
            ("HEAD", false, None),
            ("OPTIONS", true, None),
            ("BREW", false, None),
            ("get", false, None),
            ("", true, None),
        ];
        for (method, has_id, expected) in table {
            assert_eq!(Action::resolve(method, has_id), expected, "{method} id={has_id}");
        }
    }

    #[test]
    fn names() {
        assert_eq!(Action::List.to_string(), "list");
        assert_eq!(Action::Delete.as_str(), "delete");
    }
}
