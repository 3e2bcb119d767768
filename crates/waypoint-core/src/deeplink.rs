//! Deep-link parsing
//!
//! Turns an incoming URL such as `app://profile/alice/post/3k2y?highlight=1`
//! into the chain of destinations it names. Patterns are registered with a
//! builder that produces an application route from the captured parameters;
//! the URL path is consumed left to right, each step taking the longest
//! registered pattern that matches.

use std::collections::HashMap;
use thiserror::Error;

use crate::destination::{Destination, NavigationMode};
use crate::route::RouteInfo;

/// Parameters captured from a URL
pub type RouteParams = HashMap<String, String>;

/// Deep-link parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeeplinkError {
    /// The URL has no path segments
    #[error("Deep link has no path")]
    Empty,

    /// No registered pattern matches at a position
    #[error("No route matches segment '{segment}' at position {position}")]
    Unmatched {
        /// The first segment that could not be consumed
        segment: String,
        /// Index of that segment in the URL path
        position: usize,
    },
}

/// Result type for deep-link parsing
pub type Result<T> = std::result::Result<T, DeeplinkError>;

/// A parsed deep link
#[derive(Debug, Clone, PartialEq)]
pub struct Deeplink<R> {
    /// Destinations to open, outermost first
    pub routes: Vec<Destination<R>>,
    /// Concatenated path segments of `routes`
    pub path: String,
}

/// One segment of a registered pattern
#[derive(Debug, Clone)]
enum PatternSegment {
    Literal(String),
    Param(String),
}

impl PatternSegment {
    fn from_raw(raw: &str) -> Self {
        match raw.strip_prefix(':') {
            Some(name) => Self::Param(name.to_owned()),
            None => Self::Literal(raw.to_owned()),
        }
    }

    /// Whether `actual` fits this segment, recording a decoded capture
    fn accepts(&self, actual: &str, params: &mut RouteParams) -> bool {
        match self {
            Self::Literal(expected) => expected == actual,
            Self::Param(name) => match urlencoding::decode(actual) {
                Ok(value) => {
                    params.insert(name.clone(), value.into_owned());
                    true
                }
                Err(_) => false,
            },
        }
    }
}

/// Non-empty `/`-separated segments of a path
fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Decoded `key=value` pairs of a query string; pairs without `=` or with a
/// malformed escape are skipped
fn query_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let value = urlencoding::decode(value).ok()?;
            Some((key.to_owned(), value.into_owned()))
        })
        .collect()
}

/// Route pattern for matching
struct RoutePattern<R> {
    segments: Vec<PatternSegment>,
    mode: NavigationMode,
    builder: fn(RouteParams) -> Option<R>,
}

/// URL parser producing destination chains
pub struct DeeplinkParser<R> {
    patterns: Vec<RoutePattern<R>>,
}

impl<R: RouteInfo> Default for DeeplinkParser<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RouteInfo> DeeplinkParser<R> {
    /// Create a parser with no patterns
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Register a pattern whose routes are pushed
    ///
    /// Segments starting with `:` capture a parameter, e.g. `/profile/:name`.
    pub fn add_route(&mut self, pattern: &str, builder: fn(RouteParams) -> Option<R>) -> &mut Self {
        self.add_route_with_mode(pattern, NavigationMode::Push, builder)
    }

    /// Register a pattern whose routes use the given presentation mode
    pub fn add_route_with_mode(
        &mut self,
        pattern: &str,
        mode: NavigationMode,
        builder: fn(RouteParams) -> Option<R>,
    ) -> &mut Self {
        self.patterns.push(RoutePattern {
            segments: path_segments(pattern).map(PatternSegment::from_raw).collect(),
            mode,
            builder,
        });
        self
    }

    /// Number of registered patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no patterns are registered
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Parse a URL into the chain of destinations it names
    ///
    /// Query parameters are passed to the builder of the last route only.
    pub fn parse(&self, url: &str) -> Result<Deeplink<R>> {
        let without_scheme = match url.find("://") {
            Some(idx) => &url[idx + 3..],
            None => url,
        };
        let (pathname, query) = match without_scheme.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (without_scheme, None),
        };

        let segments: Vec<&str> = path_segments(pathname).collect();
        if segments.is_empty() {
            return Err(DeeplinkError::Empty);
        }
        let query = query.map(query_pairs).unwrap_or_default();

        let mut routes = Vec::new();
        let mut position = 0;
        while position < segments.len() {
            let (consumed, destination) = self
                .match_longest(&segments[position..], &query)
                .ok_or_else(|| DeeplinkError::Unmatched {
                    segment: segments[position].to_string(),
                    position,
                })?;
            routes.push(destination);
            position += consumed;
        }

        let path = routes.iter().map(|route| route.path()).collect();
        tracing::debug!(url, routes = routes.len(), "Parsed deep link");

        Ok(Deeplink { routes, path })
    }

    /// Find the longest pattern matching a prefix of `path`
    ///
    /// The query only reaches a pattern that consumes the rest of the path.
    fn match_longest(
        &self,
        path: &[&str],
        query: &[(String, String)],
    ) -> Option<(usize, Destination<R>)> {
        let mut best: Option<(usize, Destination<R>)> = None;

        for pattern in &self.patterns {
            let len = pattern.segments.len();
            let beaten = best.as_ref().is_some_and(|(consumed, _)| *consumed >= len);
            if len == 0 || len > path.len() || beaten {
                continue;
            }

            let mut params = RouteParams::new();
            let fits = pattern
                .segments
                .iter()
                .zip(path)
                .all(|(segment, actual)| segment.accepts(actual, &mut params));
            if !fits {
                continue;
            }
            if len == path.len() {
                params.extend(query.iter().cloned());
            }

            if let Some(route) = (pattern.builder)(params) {
                best = Some((len, Destination::new(route, pattern.mode)));
            }
        }

        best
    }
}
