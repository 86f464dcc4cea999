#[allow(unused)]
use tracing::{debug, error, info, span, trace, warn, Instrument, Level};

use std::{borrow::Cow, fmt};

use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Everything up to the first "?", then the optional query.  A "#" is just another character:
    // service descriptions may contain one.
    static ref URL_RE: Regex = Regex::new(r"(?s)^(?P<base>[^?]*)(?:\?(?P<query>.*))?$").unwrap();
}

/// A single `key[=value]` piece of a query string.  Pieces without an `=` (including empty
/// ones from `&&`) are kept as-is.
#[derive(Clone, Debug, PartialEq)]
struct Param<'a> {
    key: &'a str,
    value: Option<Cow<'a, str>>,
}

/// A URL split at its first `?`.
///
/// Parameters keep their original order and spelling; nothing is decoded or re-encoded, so
/// serializing an untouched `Query` gives back the exact input.
#[derive(Clone, Debug, PartialEq)]
pub struct Query<'a> {
    base: &'a str,
    has_query: bool,
    params: Vec<Param<'a>>,
}

impl<'a> Param<'a> {
    fn parse(piece: &'a str) -> Self {
        match piece.split_once('=') {
            Some((key, value)) => Self {
                key,
                value: Some(value.into()),
            },
            None => Self {
                key: piece,
                value: None,
            },
        }
    }
}

impl<'a> fmt::Display for Param<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.as_ref() {
            Some(value) => write!(f, "{}={}", self.key, value),
            None => f.write_str(self.key),
        }
    }
}

impl<'a> Query<'a> {
    pub fn parse(url: &'a str) -> Self {
        let caps = match URL_RE.captures(url) {
            Some(caps) => caps,
            None => {
                // The pattern matches any input, but don't panic over it
                warn!(url, "unexpected url layout");
                return Self {
                    base: url,
                    has_query: false,
                    params: Vec::new(),
                };
            }
        };

        let base = caps.name("base").map_or("", |m| &url[m.range()]);
        let query = caps.name("query").map(|m| &url[m.range()]);

        let params = match query {
            Some(query) if !query.is_empty() => query.split('&').map(Param::parse).collect(),
            _ => Vec::new(),
        };

        Self {
            base,
            has_query: query.is_some(),
            params,
        }
    }

    /// Sets every parameter called `key` to `value`, or appends `key=value` when there isn't one.
    pub fn set(&mut self, key: &'a str, value: impl fmt::Display) -> &mut Self {
        let value = value.to_string();
        let mut found = false;

        for param in self.params.iter_mut().filter(|param| param.key == key) {
            trace!(key, old = ?param.value, new = %value, "replacing");
            param.value = Some(Cow::Owned(value.clone()));
            found = true;
        }

        if !found {
            trace!(key, %value, "appending");
            self.params.push(Param {
                key,
                value: Some(Cow::Owned(value)),
            });
        }

        self
    }
}

impl<'a> fmt::Display for Query<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base)?;
        if self.has_query || !self.params.is_empty() {
            write!(f, "?{}", self.params.iter().join("&"))?;
        }
        Ok(())
    }
}
