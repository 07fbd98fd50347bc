//! Points of interest supplied by a place source.

use std::{fmt, str::FromStr};

use geo::Coord;
use thiserror::Error;

/// Highest rating a point of interest may carry.
pub const MAX_RATING: f32 = 5.0;

/// Ordered price levels, cheapest first.
///
/// # Examples
/// ```
/// use wayfarer_core::PriceTier;
///
/// let tier: PriceTier = "$$".parse().unwrap();
/// assert_eq!(tier, PriceTier::Moderate);
/// assert!(PriceTier::Inexpensive < PriceTier::VeryExpensive);
/// assert_eq!(tier.to_string(), "$$");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceTier {
    /// `$`
    #[cfg_attr(feature = "serde", serde(rename = "$"))]
    Inexpensive,
    /// `$$`
    #[cfg_attr(feature = "serde", serde(rename = "$$"))]
    Moderate,
    /// `$$$`
    #[cfg_attr(feature = "serde", serde(rename = "$$$"))]
    Expensive,
    /// `$$$$`
    #[cfg_attr(feature = "serde", serde(rename = "$$$$"))]
    VeryExpensive,
}

impl PriceTier {
    /// Return the dollar-sign label for the tier.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inexpensive => "$",
            Self::Moderate => "$$",
            Self::Expensive => "$$$",
            Self::VeryExpensive => "$$$$",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a price label is not one of `$` to `$$$$`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown price tier label {label:?}")]
pub struct UnknownPriceTier {
    /// The label that failed to parse.
    pub label: String,
}

impl FromStr for PriceTier {
    type Err = UnknownPriceTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "$" => Ok(Self::Inexpensive),
            "$$" => Ok(Self::Moderate),
            "$$$" => Ok(Self::Expensive),
            "$$$$" => Ok(Self::VeryExpensive),
            other => Err(UnknownPriceTier {
                label: other.to_owned(),
            }),
        }
    }
}

/// A place that may be recommended to a visitor.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use wayfarer_core::{PointOfInterest, PriceTier, geodesy::lat_lng};
///
/// # fn main() -> Result<(), wayfarer_core::PointOfInterestError> {
/// let poi = PointOfInterest::new(
///     "poi_011",
///     "Royal Ontario Museum",
///     lat_lng(43.6677, -79.3948),
///     "museum",
///     4.8,
/// )?
/// .with_price_tier(PriceTier::Moderate)
/// .with_tags(["history", "indoor"]);
///
/// assert_eq!(poi.category, "museum");
/// assert_eq!(poi.tags.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointOfInterest {
    /// Stable identifier assigned by the place source.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Broad category such as `restaurant`, `museum` or `park`.
    pub category: String,
    /// Average rating in `0.0..=5.0`.
    pub rating: f32,
    /// Price level, when the source knows it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub price_tier: Option<PriceTier>,
    /// Free-form descriptive tags, e.g. `outdoor` or `family-friendly`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    /// Whether the place reported itself open when fetched.
    #[cfg_attr(feature = "serde", serde(default))]
    pub open_now: bool,
    /// Street address, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: Option<String>,
}

/// Errors returned by [`PointOfInterest::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointOfInterestError {
    /// The identifier was empty or whitespace.
    #[error("point of interest must have a non-empty id")]
    MissingId,
    /// The category was empty or whitespace.
    #[error("point of interest {id} must have a category")]
    MissingCategory {
        /// Identifier of the offending POI.
        id: String,
    },
    /// The rating was not a finite value in `0.0..=5.0`.
    #[error("rating {rating} for point of interest {id} is outside 0.0..=5.0")]
    InvalidRating {
        /// Identifier of the offending POI.
        id: String,
        /// Rejected rating.
        rating: f32,
    },
}

impl PointOfInterest {
    /// Validate and construct a point of interest without price, tags or
    /// address.
    ///
    /// # Errors
    /// Returns [`PointOfInterestError`] when the id or category is blank or
    /// the rating falls outside `0.0..=5.0`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Coord<f64>,
        category: impl Into<String>,
        rating: f32,
    ) -> Result<Self, PointOfInterestError> {
        let id = id.into();
        let category = category.into();
        if id.trim().is_empty() {
            return Err(PointOfInterestError::MissingId);
        }
        if category.trim().is_empty() {
            return Err(PointOfInterestError::MissingCategory { id });
        }
        if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
            return Err(PointOfInterestError::InvalidRating { id, rating });
        }
        Ok(Self {
            id,
            name: name.into(),
            location,
            category,
            rating,
            price_tier: None,
            tags: Vec::new(),
            open_now: false,
            address: None,
        })
    }

    /// Set the price tier while returning `self` for chaining.
    #[must_use]
    pub const fn with_price_tier(mut self, tier: PriceTier) -> Self {
        self.price_tier = Some(tier);
        self
    }

    /// Replace the tags while returning `self` for chaining.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the open-now flag while returning `self` for chaining.
    #[must_use]
    pub const fn with_open_now(mut self, open_now: bool) -> Self {
        self.open_now = open_now;
        self
    }

    /// Set the street address while returning `self` for chaining.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}
