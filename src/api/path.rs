//
//  teamcity-cli
//  api/path.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Resource paths relative to `app/rest/`.
//!
//! A path is a list of segments plus optional query parameters. Segments are
//! percent-encoded one by one when the URL is composed, so a locator segment
//! such as `id:Bt1` keeps its `:` while a `/` inside a branch name is escaped.
//!
//! ```rust
//! use teamcity_cli::api::ResourcePath;
//!
//! let path = ResourcePath::parse("buildTypes/id:Bt1/branches");
//! assert_eq!(path.segments(), ["buildTypes", "id:Bt1", "branches"]);
//!
//! // Slashes inside parentheses belong to the locator.
//! let path = ResourcePath::parse("builds/branch:(name:refs/heads/main)");
//! assert_eq!(path.segments(), ["builds", "branch:(name:refs/heads/main)"]);
//! ```

use std::fmt;

use crate::api::common::ApiError;
use crate::locators::ResourceLocator;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl ResourcePath {
    /// The API root, `app/rest/`.
    pub fn root() -> Self {
        Self::default()
    }

    /// Splits `path` on `/`, ignoring slashes nested in parentheses and
    /// dropping empty segments.
    pub fn parse(path: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut depth = 0usize;

        for ch in path.chars() {
            match ch {
                '(' => {
                    depth += 1;
                    current.push(ch);
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    current.push(ch);
                }
                '/' if depth == 0 => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
                _ => current.push(ch),
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }

        Self {
            segments,
            query: Vec::new(),
        }
    }

    /// Appends one segment verbatim, without splitting.
    pub fn join(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Appends every segment of `other`, and its query parameters.
    pub fn append(mut self, other: impl Into<ResourcePath>) -> Self {
        let other = other.into();
        self.segments.extend(other.segments);
        self.query.extend(other.query);
        self
    }

    /// Appends a rendered locator as a single segment, e.g. `id:Bt1`.
    pub fn join_locator(self, locator: &dyn ResourceLocator) -> Result<Self, ApiError> {
        Ok(self.join(locator.render()?))
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Adds the `locator` query parameter used by collection endpoints.
    pub fn with_locator(self, locator: &dyn ResourceLocator) -> Result<Self, ApiError> {
        Ok(self.query("locator", locator.render()?))
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))?;
        for (index, (name, value)) in self.query.iter().enumerate() {
            let separator = if index == 0 { '?' } else { '&' };
            write!(f, "{separator}{name}={value}")?;
        }
        Ok(())
    }
}

impl From<&str> for ResourcePath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for ResourcePath {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

impl From<&String> for ResourcePath {
    fn from(path: &String) -> Self {
        Self::parse(path)
    }
}
