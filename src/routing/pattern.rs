//! Path patterns and path normalization.
//!
//! # Syntax
//! - `resumes` - literal segment, matched exactly (case-sensitive)
//! - `:id` - parameter segment, matches any non-empty segment
//! - `/` or empty - no segments (matches without consuming)
//!
//! # Design Decisions
//! - No wildcard / catch-all segments
//! - Segment-wise comparison, no regex
//! - Parameter values are percent-decoded; undecodable values do not match

use percent_encoding::percent_decode_str;
use thiserror::Error;

use crate::routing::params::Params;

/// Errors produced when parsing a route pattern.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("empty parameter name in pattern `{0}`")]
    EmptyParam(String),

    #[error("duplicate parameter `{name}` in pattern `{pattern}`")]
    DuplicateParam { pattern: String, name: String },

    #[error("wildcard segments are not supported: `{0}`")]
    Wildcard(String),
}

/// A single pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern such as `builder`, `:id` or `/`.
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let mut segments = Vec::new();
        for part in raw.split('/').filter(|s| !s.is_empty()) {
            if part.contains('*') {
                return Err(PatternError::Wildcard(raw.to_string()));
            }
            match part.strip_prefix(':') {
                Some("") => return Err(PatternError::EmptyParam(raw.to_string())),
                Some(name) => {
                    let duplicate = segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(existing) if existing == name));
                    if duplicate {
                        return Err(PatternError::DuplicateParam {
                            pattern: raw.to_string(),
                            name: name.to_string(),
                        });
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Consume this pattern's segments from the front of `path`.
    ///
    /// On success, bindings are appended to `params` and the unconsumed
    /// remainder is returned. On failure `params` is left untouched.
    pub fn consume<'s, 'p>(
        &self,
        path: &'s [&'p str],
        params: &mut Params,
    ) -> Option<&'s [&'p str]> {
        if path.len() < self.segments.len() {
            return None;
        }

        let mark = params.len();
        for (segment, actual) in self.segments.iter().zip(path) {
            let ok = match segment {
                Segment::Literal(literal) => literal == actual,
                Segment::Param(name) => match decode_segment(actual) {
                    Some(value) => {
                        params.push(name.as_str(), value);
                        true
                    }
                    None => false,
                },
            };
            if !ok {
                params.truncate(mark);
                return None;
            }
        }

        Some(&path[self.segments.len()..])
    }
}

fn decode_segment(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Split a request path into its non-empty segments.
///
/// Query string and fragment are ignored.
pub fn split_path(path: &str) -> Vec<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    path[..end].split('/').filter(|s| !s.is_empty()).collect()
}

/// Canonical form of a request path: leading slash, no trailing slash,
/// no empty segments, no query or fragment.
pub fn normalize_path(path: &str) -> String {
    let segments = split_path(path);
    format!("/{}", segments.join("/"))
}
