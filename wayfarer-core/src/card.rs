//! Display-ready recommendation cards derived from points of interest.

use geo::Coord;

use crate::{PointOfInterest, geodesy::haversine_distance};

/// Separator between summary segments.
const SUMMARY_SEPARATOR: &str = " • ";
/// Number of tags quoted in a summary.
const SUMMARY_TAGS: usize = 2;

/// A scored place ready to show to the user.
///
/// `score` is zero until the card passes through a [`crate::Scorer`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecommendationCard {
    /// Identifier of the underlying place.
    pub place_id: String,
    /// Display name.
    pub name: String,
    /// Average rating in `0.0..=5.0`.
    pub rating: f32,
    /// Distance from the user, in metres.
    pub distance_metres: f64,
    /// One-line description such as `Museum • $$ • history, indoor`.
    pub summary: String,
    /// Position of the place.
    pub location: Coord<f64>,
    /// Ranking score; higher is better.
    pub score: f64,
}

impl RecommendationCard {
    /// Derive a card from `poi`, measuring distance from `origin`.
    ///
    /// Without an origin the distance is zero.
    ///
    /// # Examples
    /// ```
    /// use wayfarer_core::{PointOfInterest, PriceTier, RecommendationCard, geodesy::lat_lng};
    ///
    /// let poi = PointOfInterest::new("poi_011", "Royal Ontario Museum", lat_lng(43.6677, -79.3948), "museum", 4.8)
    ///     .unwrap()
    ///     .with_price_tier(PriceTier::Moderate)
    ///     .with_tags(["history", "indoor", "family-friendly"]);
    /// let card = RecommendationCard::from_poi(&poi, None);
    /// assert_eq!(card.summary, "Museum • $$ • history, indoor");
    /// assert_eq!(card.distance_metres, 0.0);
    /// ```
    #[must_use]
    pub fn from_poi(poi: &PointOfInterest, origin: Option<Coord<f64>>) -> Self {
        Self {
            place_id: poi.id.clone(),
            name: poi.name.clone(),
            rating: poi.rating,
            distance_metres: origin.map_or(0.0, |from| haversine_distance(from, poi.location)),
            summary: summarise(poi),
            location: poi.location,
            score: 0.0,
        }
    }
}

fn display_category(category: &str) -> String {
    let spaced = category.trim().replace('_', " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn summarise(poi: &PointOfInterest) -> String {
    let mut parts = vec![display_category(&poi.category)];
    if let Some(tier) = poi.price_tier {
        parts.push(tier.label().to_owned());
    }
    let tags: Vec<&str> = poi
        .tags
        .iter()
        .map(|tag| tag.trim())
        .filter(|tag| !tag.is_empty())
        .take(SUMMARY_TAGS)
        .collect();
    if !tags.is_empty() {
        parts.push(tags.join(", "));
    }
    parts.join(SUMMARY_SEPARATOR)
}
