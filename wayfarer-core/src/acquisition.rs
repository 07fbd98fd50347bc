//! Candidate acquisition: narrow a pool of places to those a user could want.
//!
//! A place survives when it matches an interest, lies within the search
//! radius and fits the budget. The filters are applied here even when the
//! place source has already applied its own, so a loose provider can never
//! leak an out-of-range place into the ranking.

use geo::Coord;
use thiserror::Error;

use crate::{
    Integration, PlaceSource, PointOfInterest, Preferences, ProviderError,
    geodesy::haversine_distance,
};

/// Lowercase a term and drop one trailing `s`.
fn normalise_term(term: &str) -> String {
    let lower = term.trim().to_lowercase();
    match lower.strip_suffix('s') {
        Some(stem) => stem.to_owned(),
        None => lower,
    }
}

fn terms_overlap(interest: &str, target: &str) -> bool {
    let normalised = normalise_term(target);
    !normalised.is_empty() && (normalised.contains(interest) || interest.contains(&normalised))
}

/// Whether `poi` matches any of `interests` by category or tag.
///
/// Terms are compared case-insensitively after dropping one trailing `s`,
/// and match when either contains the other. An empty interest list (or
/// one holding only blank terms) places no restriction.
///
/// # Examples
/// ```
/// use wayfarer_core::{PointOfInterest, acquisition::matches_interests, geodesy::lat_lng};
///
/// let poi = PointOfInterest::new("p1", "ROM", lat_lng(43.6677, -79.3948), "museum", 4.8)
///     .unwrap()
///     .with_tags(["history"]);
/// assert!(matches_interests(&poi, &["Museums".to_owned()]));
/// assert!(matches_interests(&poi, &["histories".to_owned()]));
/// assert!(!matches_interests(&poi, &["nightlife".to_owned()]));
/// assert!(matches_interests(&poi, &[]));
/// ```
#[must_use]
pub fn matches_interests(poi: &PointOfInterest, interests: &[String]) -> bool {
    let mut terms = interests
        .iter()
        .map(|interest| normalise_term(interest))
        .filter(|term| !term.is_empty())
        .peekable();
    if terms.peek().is_none() {
        return true;
    }
    terms.any(|term| {
        terms_overlap(&term, &poi.category) || poi.tags.iter().any(|tag| terms_overlap(&term, tag))
    })
}

/// Whether `poi` lies within `radius_metres` of `location`, inclusive.
#[must_use]
pub fn within_radius(poi: &PointOfInterest, location: Coord<f64>, radius_metres: u32) -> bool {
    haversine_distance(location, poi.location) <= f64::from(radius_metres)
}

/// Whether `poi` fits the budget in `preferences`.
///
/// Only applied when both a budget and a price tier are known.
#[must_use]
pub fn fits_budget(poi: &PointOfInterest, preferences: &Preferences) -> bool {
    match (preferences.budget, poi.price_tier) {
        (Some(budget), Some(tier)) => budget.admits(tier),
        _ => true,
    }
}

/// Keep the places in `pool` that pass every acquisition filter.
///
/// The result preserves the order of `pool`; no ranking is implied.
#[must_use]
pub fn filter_candidates<I>(
    pool: I,
    location: Coord<f64>,
    preferences: &Preferences,
) -> Vec<PointOfInterest>
where
    I: IntoIterator<Item = PointOfInterest>,
{
    pool.into_iter()
        .filter(|poi| {
            matches_interests(poi, &preferences.interests)
                && within_radius(poi, location, preferences.radius_metres)
                && fits_budget(poi, preferences)
        })
        .collect()
}

/// Errors surfaced by [`acquire`] and [`CandidateQuery::run`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquisitionError {
    /// No location was available to search around.
    #[error("a location is required to acquire candidates")]
    MissingLocation,
    /// The place source was missing or failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Fetch places around `location` and apply the acquisition filters.
///
/// # Errors
/// Returns [`AcquisitionError::MissingLocation`] when `location` is `None`
/// and [`AcquisitionError::Provider`] when the place source is unwired or
/// fails.
pub fn acquire(
    integration: &Integration,
    location: Option<Coord<f64>>,
    preferences: &Preferences,
) -> Result<Vec<PointOfInterest>, AcquisitionError> {
    let origin = location.ok_or(AcquisitionError::MissingLocation)?;
    let raw = integration.nearby_places(origin, preferences)?;
    let fetched = raw.len();
    let candidates = filter_candidates(raw, origin, preferences);
    log::debug!(
        "acquired {} of {fetched} places within {} m",
        candidates.len(),
        preferences.radius_metres
    );
    Ok(candidates)
}

/// A caller-facing candidate search.
///
/// # Examples
/// ```
/// use wayfarer_core::{CandidateQuery, Preferences, geodesy::lat_lng};
///
/// let query = CandidateQuery::new(lat_lng(43.6532, -79.3832), Preferences::default())
///     .with_search_term("tower")
///     .with_max_results(5);
/// assert_eq!(query.max_results, Some(5));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateQuery {
    /// Where to search; required.
    pub location: Option<Coord<f64>>,
    /// Filters to apply; defaults apply when absent.
    pub preferences: Option<Preferences>,
    /// Case-insensitive substring that a name or category must contain.
    pub search_term: Option<String>,
    /// Upper bound on the number of places returned.
    pub max_results: Option<usize>,
}

impl CandidateQuery {
    /// Query around `location` with `preferences`.
    #[must_use]
    pub const fn new(location: Coord<f64>, preferences: Preferences) -> Self {
        Self {
            location: Some(location),
            preferences: Some(preferences),
            search_term: None,
            max_results: None,
        }
    }

    /// Restrict results to names or categories containing `term`.
    #[must_use]
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Return at most `max_results` places.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Run the query against `integration`.
    ///
    /// # Errors
    /// Propagates [`acquire`] errors.
    pub fn run(&self, integration: &Integration) -> Result<Vec<PointOfInterest>, AcquisitionError> {
        let defaults = Preferences::default();
        let preferences = self.preferences.as_ref().unwrap_or(&defaults);
        let mut places = acquire(integration, self.location, preferences)?;
        if let Some(needle) = self
            .search_term
            .as_deref()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
        {
            places.retain(|poi| {
                poi.name.to_lowercase().contains(&needle)
                    || poi.category.to_lowercase().contains(&needle)
            });
        }
        if let Some(limit) = self.max_results {
            places.truncate(limit);
        }
        Ok(places)
    }
}

/// Place source backed by an in-memory pool.
///
/// Searches apply the acquisition filters with a linear scan. Geocoding
/// matches a stored address exactly, ignoring case and surrounding space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryPlaceSource {
    pois: Vec<PointOfInterest>,
}

impl MemoryPlaceSource {
    /// Create a source holding `pois`.
    #[must_use]
    pub fn new<I>(pois: I) -> Self
    where
        I: IntoIterator<Item = PointOfInterest>,
    {
        Self {
            pois: pois.into_iter().collect(),
        }
    }

    /// Every place in the pool.
    #[must_use]
    pub fn pois(&self) -> &[PointOfInterest] {
        &self.pois
    }

    /// Number of places in the pool.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.pois.len()
    }

    /// Whether the pool is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }
}

impl FromIterator<PointOfInterest> for MemoryPlaceSource {
    fn from_iter<I: IntoIterator<Item = PointOfInterest>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl PlaceSource for MemoryPlaceSource {
    fn search_places(
        &self,
        location: Coord<f64>,
        preferences: &Preferences,
    ) -> Result<Vec<PointOfInterest>, ProviderError> {
        Ok(filter_candidates(self.pois.iter().cloned(), location, preferences))
    }

    fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, ProviderError> {
        let wanted = address.trim();
        Ok(self
            .pois
            .iter()
            .find(|poi| {
                poi.address
                    .as_deref()
                    .is_some_and(|known| known.trim().eq_ignore_ascii_case(wanted))
            })
            .map(|poi| poi.location))
    }
}
