//! # Metric Module
//!
//! Units of measure attached to quantities.
//!
//! A [`Metric`] is an opaque tag: it names what is being counted and
//! carries a display symbol. There is no conversion logic and no check
//! that two metrics are dimensionally compatible.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::validation::{validate_metric_name, ValidationResult};

/// A unit of measure, identified by its name and displayed by its symbol.
///
/// The description is informational only and is ignored by equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metric {
    name: Cow<'static, str>,
    symbol: Cow<'static, str>,
    #[serde(default)]
    description: Cow<'static, str>,
}

impl Metric {
    /// Countable items. Has an empty symbol, so `10` pieces display as `10`.
    pub const UNIT: Metric = Metric::from_static("Pieces", "", "Counted items");

    pub const KILOGRAM: Metric = Metric::from_static("Kilogram", "kg", "Mass");

    pub const LITER: Metric = Metric::from_static("Liter", "l", "Volume");

    pub const METER: Metric = Metric::from_static("Meter", "m", "Length");

    pub const SQUARE_METER: Metric = Metric::from_static("Square Meter", "m²", "Area");

    /// Default currency for monetary amounts.
    pub const EURO: Metric = Metric::from_static("Euro", "€", "European currency");

    /// Builds a metric from static strings, usable in `const` context.
    pub const fn from_static(
        name: &'static str,
        symbol: &'static str,
        description: &'static str,
    ) -> Self {
        Metric {
            name: Cow::Borrowed(name),
            symbol: Cow::Borrowed(symbol),
            description: Cow::Borrowed(description),
        }
    }

    /// Creates a metric at runtime.
    ///
    /// ## Errors
    /// The name must be non-empty and at most 50 characters.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> ValidationResult<Self> {
        let name = name.into();
        validate_metric_name(&name)?;

        Ok(Metric {
            name: Cow::Owned(name.trim().to_string()),
            symbol: Cow::Owned(symbol.into()),
            description: Cow::Borrowed(""),
        })
    }

    /// Returns the metric with the given description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Cow::Owned(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::UNIT
    }
}

impl PartialEq for Metric {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.symbol == other.symbol
    }
}

impl Eq for Metric {}

impl Hash for Metric {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.symbol.hash(state);
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}
