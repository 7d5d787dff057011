//! Incoming HTTP request type.

use std::collections::HashMap;

/// Decoded `key=value` pairs. Repeated keys keep the last value.
pub type Params = HashMap<String, String>;

/// An incoming request as tack sees it: method, path, decoded parameters and,
/// once routed, the resource identifier.
///
/// Values are never mutated; the `with_*` methods consume and return a new
/// request.
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    method: String,
    path: String,
    query: Params,
    identifier: Option<String>,
    params: Params,
}

impl Request {
    /// Builds a request from the raw method, path and query string
    /// (without the leading `?`). `params` starts as a copy of the query.
    pub fn new(method: &str, path: &str, query_string: &str) -> Self {
        let query = parse_query(query_string);
        Self {
            method: method.to_owned(),
            path: path.to_owned(),
            params: query.clone(),
            query,
            identifier: None,
        }
    }

    /// Merges an `application/x-www-form-urlencoded` body into `params`.
    /// Body values win over query values on key conflict.
    pub fn with_form(mut self, body: &str) -> Self {
        self.params.extend(parse_query(body));
        self
    }

    pub(crate) fn with_identifier(mut self, identifier: Option<String>) -> Self {
        self.identifier = identifier;
        self
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query(&self) -> &Params { &self.query }
    pub fn params(&self) -> &Params { &self.params }

    /// The identifier segment of `/resource/identifier`, set by the router.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Returns a single decoded parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Splits on `&` and `;`, then on the first `=`. Keys and values are
/// percent-decoded with `+` read as a space. Pairs with an empty key are
/// skipped.
pub(crate) fn parse_query(qs: &str) -> Params {
    qs.split(['&', ';'])
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            let key = unescape(k);
            (!key.is_empty()).then(|| (key, unescape(v)))
        })
        .collect()
}

fn unescape(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex);
                let lo = bytes.get(i + 2).copied().and_then(hex);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_with_both_separators() {
        let p = parse_query("a=1&b=2;c=3");
        assert_eq!(p.len(), 3);
        assert_eq!(p["b"], "2");
        assert_eq!(p["c"], "3");
    }

    #[test]
    fn decodes_plus_and_percent() {
        let p = parse_query("title=hello+world&body=caf%C3%A9%21");
        assert_eq!(p["title"], "hello world");
        assert_eq!(p["body"], "café!");
    }

    #[test]
    fn keeps_malformed_escapes_literally() {
        assert_eq!(parse_query("x=100%")["x"], "100%");
        assert_eq!(parse_query("x=%zz")["x"], "%zz");
    }

    #[test]
    fn bare_keys_and_empty_keys() {
        let p = parse_query("flag&=orphan&&last=1&last=2");
        assert_eq!(p["flag"], "");
        assert_eq!(p["last"], "2");
        assert!(!p.contains_key(""));
    }

    #[test]
    fn form_body_overrides_query() {
        let req = Request::new("POST", "/posts/1", "title=old&page=2").with_form("title=new");
        assert_eq!(req.param("title"), Some("new"));
        assert_eq!(req.param("page"), Some("2"));
        assert_eq!(req.query()["title"], "old");
    }
}
