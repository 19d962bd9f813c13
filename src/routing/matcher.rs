//! Route pattern compilation and path matching.
//!
//! # Responsibilities
//! - Compile a pattern string into literal, named and wildcard segments
//! - Reject malformed patterns at registration time
//! - Test a concrete request path and extract parameters
//!
//! # Design Decisions
//! - Patterns without `:name` or `*` segments match by plain string equality
//! - Segment counts are compared before any segment is walked
//! - Single pass over the segments, no backtracking, no regex
//! - Matching is case-sensitive and does not percent-decode

use crate::routing::error::RouteError;
use crate::routing::params::PathParams;

/// One `/`-delimited component of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the path segment byte for byte.
    Literal(String),
    /// `:name`, binds any single non-empty path segment.
    Param(String),
    /// `*` in final position, matches the rest of the path.
    Wildcard,
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
    has_named_params: bool,
    has_wildcard: bool,
}

impl Pattern {
    /// Compile a pattern, failing fast on anything ambiguous.
    pub fn parse(pattern: &str) -> Result<Self, RouteError> {
        // An empty pattern addresses the root.
        let raw = if pattern.is_empty() { "/" } else { pattern };

        let Some(rest) = raw.strip_prefix('/') else {
            return Err(RouteError::MissingLeadingSlash(raw.to_string()));
        };

        // Paths ending in '/' are redirected before matching, so such a
        // pattern could never be reached.
        if raw.len() > 1 && raw.ends_with('/') {
            return Err(RouteError::TrailingSlash(raw.to_string()));
        }

        let parts: Vec<&str> = rest.split('/').collect();
        let last = parts.len() - 1;
        let mut segments = Vec::with_capacity(parts.len());

        for (idx, part) in parts.iter().enumerate() {
            let segment = if *part == "*" {
                if idx != last {
                    return Err(RouteError::WildcardNotLast(raw.to_string()));
                }
                Segment::Wildcard
            } else if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(RouteError::EmptyParamName(raw.to_string()));
                }
                let duplicate = segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                if duplicate {
                    return Err(RouteError::DuplicateParam {
                        pattern: raw.to_string(),
                        name: name.to_string(),
                    });
                }
                Segment::Param(name.to_string())
            } else {
                Segment::Literal((*part).to_string())
            };
            segments.push(segment);
        }

        let has_named_params = segments.iter().any(|s| matches!(s, Segment::Param(_)));
        let has_wildcard = matches!(segments.last(), Some(Segment::Wildcard));

        Ok(Self {
            raw: raw.to_string(),
            segments,
            has_named_params,
            has_wildcard,
        })
    }

    /// The pattern as registered (empty patterns normalized to `/`).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_named_params(&self) -> bool {
        self.has_named_params
    }

    pub fn has_wildcard(&self) -> bool {
        self.has_wildcard
    }

    /// Test `path` against this pattern.
    ///
    /// Returns the extracted parameters on success. A static pattern yields
    /// an empty parameter set.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        if !self.has_named_params && !self.has_wildcard {
            return (path == self.raw).then(PathParams::default);
        }

        let rest = path.strip_prefix('/').unwrap_or(path);
        let path_len = segment_count(rest);

        if self.has_wildcard {
            if path_len < self.segments.len() - 1 {
                return None;
            }
        } else if path_len != self.segments.len() {
            return None;
        }

        let mut params = PathParams::with_capacity(self.segments.len());
        let mut remaining = rest;

        for segment in &self.segments {
            if let Segment::Wildcard = segment {
                params.set_wildcard(remaining);
                return Some(params);
            }

            let (current, tail) = match remaining.split_once('/') {
                Some((current, tail)) => (current, tail),
                None => (remaining, ""),
            };

            match segment {
                Segment::Literal(expected) if expected != current => return None,
                Segment::Param(_) if current.is_empty() => return None,
                Segment::Param(name) => params.push(name, current),
                _ => {}
            }

            remaining = tail;
        }

        Some(params)
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Number of `/`-delimited segments in a path with its leading slash removed.
fn segment_count(rest: &str) -> usize {
    rest.bytes().filter(|b| *b == b'/').count() + 1
}
