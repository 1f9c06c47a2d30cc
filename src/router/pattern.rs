//! Compiled route patterns and capture binding.

use std::fmt;

use log::debug;
use regex::Regex;

use crate::router::context::RequestContext;
use crate::router::error::Error;

/// A regular expression over request paths, compiled once when its route is
/// built.
///
/// Matching is unanchored unless the source anchors itself with `^` / `$`.
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
    /// Group names by group index; index 0 is the whole match, unnamed groups are `""`.
    capture_names: Vec<String>,
}

impl Pattern {
    /// Compile `source` into a pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPattern`] when `source` is not a valid expression.
    pub fn compile(source: &str) -> Result<Self, Error> {
        let regex = Regex::new(source).map_err(|source_err| Error::InvalidPattern {
            pattern: source.to_string(),
            source: source_err,
        })?;
        let capture_names = regex
            .capture_names()
            .map(|name| name.unwrap_or_default().to_string())
            .collect();

        Ok(Self { regex, capture_names })
    }

    /// The expression this pattern was compiled from.
    pub fn source(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn capture_names(&self) -> &[String] {
        &self.capture_names
    }

    /// Matched substrings aligned with [`Pattern::capture_names`], or an empty
    /// vector when `path` doesn't match. Groups that took no part in the match
    /// yield `""`.
    pub fn captures(&self, path: &str) -> Vec<String> {
        let Some(caps) = self.regex.captures(path) else {
            return Vec::new();
        };

        caps.iter()
            .map(|m| m.map_or_else(String::new, |m| m.as_str().to_string()))
            .collect()
    }

    /// Bind every named capture of `path` into `context`, left to right.
    ///
    /// The whole match and unnamed groups are skipped. A name bound twice keeps
    /// the later value. Returns the number of bindings written.
    pub fn bind(&self, path: &str, context: &mut RequestContext) -> usize {
        let values = self.captures(path);
        let mut bound = 0;

        for (name, value) in self.capture_names.iter().zip(values).skip(1) {
            if name.is_empty() {
                continue;
            }
            debug!("Binding path capture {name}={value}");
            context.insert(name.as_str(), value);
            bound += 1;
        }

        bound
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source()).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source())
    }
}
