//! Enumerated shopper choices: filter groups, sort keys, shipping options.
//!
//! Each enum parses from and displays as the lowercase token used in forms
//! and on the command line. Unknown tokens are errors, never defaults.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a token does not name a known option.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value:?} (expected one of: {expected})")]
pub struct ParseOptionError {
    /// Which option was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Accepted tokens, comma separated.
    pub expected: &'static str,
}

impl ParseOptionError {
    fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
            expected,
        }
    }
}

/// A browse facet that products can be filtered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterGroup {
    Gender,
    Category,
    Size,
    Color,
}

impl FilterGroup {
    /// All groups in display order.
    pub const ALL: [Self; 4] = [Self::Gender, Self::Category, Self::Size, Self::Color];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Category => "category",
            Self::Size => "size",
            Self::Color => "color",
        }
    }
}

impl fmt::Display for FilterGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterGroup {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gender" => Ok(Self::Gender),
            "category" => Ok(Self::Category),
            "size" => Ok(Self::Size),
            "color" => Ok(Self::Color),
            _ => Err(ParseOptionError::new(
                "filter group",
                s,
                "gender, category, size, color",
            )),
        }
    }
}

/// Ordering applied to browse results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    Price,
    Category,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Category => "category",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "category" => Ok(Self::Category),
            _ => Err(ParseOptionError::new(
                "sort key",
                s,
                "name, price, category",
            )),
        }
    }
}

/// Delivery speed chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
    Priority,
}

impl ShippingMethod {
    pub const ALL: [Self; 3] = [Self::Standard, Self::Express, Self::Priority];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Express => "express",
            Self::Priority => "priority",
        }
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingMethod {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "express" => Ok(Self::Express),
            "priority" => Ok(Self::Priority),
            _ => Err(ParseOptionError::new(
                "shipping method",
                s,
                "standard, express, priority",
            )),
        }
    }
}

/// Shipping destination region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Destination {
    /// Canada.
    #[default]
    #[serde(rename = "CA")]
    Canada,
    /// United States.
    #[serde(rename = "US")]
    UnitedStates,
    /// Everywhere else.
    #[serde(rename = "INT")]
    International,
}

impl Destination {
    pub const ALL: [Self; 3] = [Self::Canada, Self::UnitedStates, Self::International];

    /// The region code ("CA", "US" or "INT").
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Canada => "CA",
            Self::UnitedStates => "US",
            Self::International => "INT",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Destination {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CA" => Ok(Self::Canada),
            "US" => Ok(Self::UnitedStates),
            "INT" => Ok(Self::International),
            _ => Err(ParseOptionError::new("destination", s, "CA, US, INT")),
        }
    }
}
