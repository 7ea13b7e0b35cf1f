//
//  teamcity-cli
//  locators/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Locators
//!
//! TeamCity selects entities with *locators*: comma-separated
//! `dimension:value` pairs such as `buildType:(id:Bt1),status:FAILURE,count:5`.
//! A locator is sent either as a path segment (`/builds/id:42`) or as the
//! `locator` query parameter of a collection.
//!
//! ## Grammar
//!
//! ```text
//! locator := dimension ("," dimension)*
//! dimension := name ":" value
//! value := text | "(" locator ")" | "(" text ("," text)* ")" | text ("|" text)*
//! ```
//!
//! ## Overview
//!
//! - [`Locator`]: an ordered list of dimensions, serialized in insertion order.
//! - [`LocatorValue`]: plain text, a nested locator, or a multi-value list.
//! - [`ResourceLocator`]: implemented by the typed builders. Validation is
//!   deferred to [`ResourceLocator::to_locator`] so builder chains stay
//!   infallible.
//! - Typed builders: [`BuildLocator`], [`BuildTypeLocator`],
//!   [`ProjectLocator`], [`BranchLocator`], [`VcsRootLocator`],
//!   [`TestLocator`], [`UserLocator`], [`AgentLocator`], [`ChangeLocator`].
//!
//! ## Example
//!
//! ```rust
//! use teamcity_cli::locators::{BuildLocator, BuildStatus, BuildTypeLocator, ResourceLocator};
//!
//! let locator = BuildLocator::new()
//!     .build_type(BuildTypeLocator::with_id("Bt1"))
//!     .status(BuildStatus::Failure)
//!     .count(5);
//!
//! assert_eq!(
//!     locator.render().unwrap(),
//!     "buildType:(id:Bt1),status:FAILURE,count:5"
//! );
//! ```

mod build;
mod resources;

pub use build::{BuildLocator, BuildStatus};
pub use resources::{
    AgentLocator, BranchLocator, BranchPolicy, BuildTypeLocator, ChangeLocator,
    InvestigationLocator, ProjectLocator, TestLocator, TestScope, UserLocator, VcsRootLocator,
};

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::api::common::ApiError;

/// Characters that force a plain value into parentheses.
const RESERVED: [char; 4] = [',', ':', '(', ')'];

/// Server date format, e.g. `20241230T172539+0000`.
pub const DATE_FORMAT: &str = "%Y%m%dT%H%M%S%z";

/// Formats a timestamp the way TeamCity expects in date dimensions.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use teamcity_cli::locators::format_date;
///
/// let date = Utc.with_ymd_and_hms(2024, 12, 30, 17, 25, 39).unwrap();
/// assert_eq!(format_date(&date), "20241230T172539+0000");
/// ```
pub fn format_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    date.format(DATE_FORMAT).to_string()
}

/// Parses a date in the server's format, as found in `startDate`,
/// `finishDate` and similar attributes.
pub fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, DATE_FORMAT).ok()
}

/// The value side of a locator dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorValue {
    /// A plain value. Wrapped in parentheses when it contains `,` `:` `(` or `)`.
    Text(String),
    /// A nested locator, always parenthesized.
    Nested(Locator),
    /// A comma list, rendered as `(a,b)`.
    List(Vec<String>),
    /// Alternatives, rendered as `a|b`.
    Alternatives(Vec<String>),
}

impl fmt::Display for LocatorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) if text.contains(RESERVED) => write!(f, "({text})"),
            Self::Text(text) => f.write_str(text),
            Self::Nested(locator) => write!(f, "({locator})"),
            Self::List(items) => write!(f, "({})", items.join(",")),
            Self::Alternatives(items) => f.write_str(&items.join("|")),
        }
    }
}

impl From<&str> for LocatorValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LocatorValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for LocatorValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for LocatorValue {
    fn from(value: bool) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u32> for LocatorValue {
    fn from(value: u32) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<u64> for LocatorValue {
    fn from(value: u64) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Locator> for LocatorValue {
    fn from(value: Locator) -> Self {
        Self::Nested(value)
    }
}

/// An ordered set of `dimension:value` pairs.
///
/// # Example
///
/// ```rust
/// use teamcity_cli::locators::{Locator, LocatorValue};
///
/// let locator = Locator::new()
///     .dimension("project", Locator::new().dimension("id", "Root"))
///     .dimension("name", "My: build")
///     .dimension("status", LocatorValue::Alternatives(vec!["FAILURE".into(), "ERROR".into()]));
///
/// assert_eq!(locator.to_string(), "project:(id:Root),name:(My: build),status:FAILURE|ERROR");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locator {
    dimensions: Vec<(String, LocatorValue)>,
}

impl Locator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a dimension. Repeated names are kept, in order.
    pub fn dimension(mut self, name: impl Into<String>, value: impl Into<LocatorValue>) -> Self {
        self.dimensions.push((name.into(), value.into()));
        self
    }

    /// Sets a dimension, replacing an earlier value of the same name in place.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<LocatorValue>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.dimensions.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.dimensions.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&LocatorValue> {
        self.dimensions
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocatorValue)> {
        self.dimensions.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, value)) in self.dimensions.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{name}:{value}")?;
        }
        Ok(())
    }
}

/// Anything that can be turned into a validated locator.
pub trait ResourceLocator {
    /// Builds the locator, failing with [`ApiError::InvalidLocator`] when a
    /// required dimension is missing.
    fn to_locator(&self) -> Result<Locator, ApiError>;

    /// The serialized locator text.
    fn render(&self) -> Result<String, ApiError> {
        Ok(self.to_locator()?.to_string())
    }
}

impl ResourceLocator for Locator {
    fn to_locator(&self) -> Result<Locator, ApiError> {
        if self.is_empty() {
            return Err(ApiError::InvalidLocator(
                "locator has no dimensions".to_string(),
            ));
        }
        Ok(self.clone())
    }
}

impl<L: ResourceLocator + ?Sized> ResourceLocator for &L {
    fn to_locator(&self) -> Result<Locator, ApiError> {
        (**self).to_locator()
    }
}

/// Builder state shared by the typed locators.
///
/// Tracks whether any discriminating dimension was set and remembers the
/// first failure of a nested locator until [`DimensionSet::finish`].
#[derive(Debug, Clone, Default)]
pub(crate) struct DimensionSet {
    locator: Locator,
    discriminating: bool,
    nested_error: Option<String>,
}

impl DimensionSet {
    /// Sets a dimension that identifies or narrows the entity.
    pub(crate) fn key(&mut self, name: &str, value: impl Into<LocatorValue>) {
        self.discriminating = true;
        self.option(name, value);
    }

    /// Sets a paging or modifier dimension that does not narrow on its own.
    pub(crate) fn option(&mut self, name: &str, value: impl Into<LocatorValue>) {
        let locator = std::mem::take(&mut self.locator);
        self.locator = locator.set(name, value);
    }

    /// Sets a discriminating dimension whose value is another locator.
    pub(crate) fn nested(&mut self, name: &str, inner: &dyn ResourceLocator) {
        match inner.to_locator() {
            Ok(locator) => self.key(name, locator),
            Err(err) => {
                if self.nested_error.is_none() {
                    self.nested_error = Some(format!("{name}: {err}"));
                }
            }
        }
    }

    /// Validates and returns the locator.
    ///
    /// With `match_all` set, an empty set serializes to that dimension instead
    /// of failing.
    pub(crate) fn finish(
        &self,
        kind: &str,
        match_all: Option<(&str, &str)>,
    ) -> Result<Locator, ApiError> {
        if let Some(err) = &self.nested_error {
            return Err(ApiError::InvalidLocator(format!("{kind} locator: {err}")));
        }
        if self.discriminating {
            return Ok(self.locator.clone());
        }
        match match_all {
            Some((name, value)) if self.locator.is_empty() => {
                Ok(Locator::new().dimension(name, value))
            }
            Some(_) => Ok(self.locator.clone()),
            None => Err(ApiError::InvalidLocator(format!(
                "{kind} locator needs at least one identifying dimension"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_insertion_order_is_kept() {
        let locator = Locator::new()
            .dimension("count", 5u32)
            .dimension("id", "X")
            .dimension("running", true);
        assert_eq!(locator.to_string(), "count:5,id:X,running:true");
    }

    #[test]
    fn test_reserved_characters_are_parenthesized() {
        assert_eq!(LocatorValue::from("a,b").to_string(), "(a,b)");
        assert_eq!(LocatorValue::from("refs/heads/main").to_string(), "refs/heads/main");
        assert_eq!(LocatorValue::from("x(y)").to_string(), "(x(y))");
    }

    #[test]
    fn test_multi_values() {
        let list = LocatorValue::List(vec!["a".into(), "b".into()]);
        let alternatives = LocatorValue::Alternatives(vec!["a".into(), "b".into()]);
        assert_eq!(list.to_string(), "(a,b)");
        assert_eq!(alternatives.to_string(), "a|b");
    }

    #[test]
    fn test_set_replaces_in_place() {
        let locator = Locator::new()
            .set("id", "A")
            .set("count", 1u32)
            .set("id", "B");
        assert_eq!(locator.to_string(), "id:B,count:1");
    }

    #[test]
    fn test_empty_raw_locator_is_rejected() {
        assert!(matches!(
            Locator::new().to_locator(),
            Err(ApiError::InvalidLocator(_))
        ));
    }

    #[test]
    fn test_date_format() {
        let date = Utc.with_ymd_and_hms(2024, 12, 30, 17, 25, 39).unwrap();
        assert_eq!(format_date(&date), "20241230T172539+0000");

        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_date(&local), "20240102T030405+0200");
    }

    #[test]
    fn test_parse_date() {
        let parsed = parse_date("20241230T172539+0000").unwrap();
        assert_eq!(parsed.timestamp(), 1735579539);
        assert!(parse_date("2024-12-30").is_none());
    }

    #[test]
    fn test_dimension_set_requires_key() {
        let mut set = DimensionSet::default();
        set.option("count", 1u32);
        assert!(set.finish("project", None).is_err());
        assert_eq!(
            set.finish("build", Some(("defaultFilter", "false")))
                .unwrap()
                .to_string(),
            "count:1"
        );
    }

    #[test]
    fn test_dimension_set_match_all_when_empty() {
        let set = DimensionSet::default();
        assert_eq!(
            set.finish("agent", Some(("defaultFilter", "false")))
                .unwrap()
                .to_string(),
            "defaultFilter:false"
        );
    }

    #[test]
    fn test_nested_error_surfaces_on_finish() {
        let mut set = DimensionSet::default();
        set.nested("project", &Locator::new());
        set.key("id", "X");
        match set.finish("build type", None) {
            Err(ApiError::InvalidLocator(message)) => assert!(message.contains("project")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
