//! The recommendation pipeline: acquire, score, rank and plan.
//!
//! [`RecommendationEngine`] owns its [`CandidateCache`] and the
//! [`Integration`] it fetches from. Its caller-facing operations never fail:
//! missing wiring, a missing location or a provider failure is logged and
//! yields an empty result. The `try_` variants expose the underlying error.

use geo::Coord;

use crate::{
    CandidateCache, CandidateQuery, Context, Integration, Itinerary, ItineraryPlanner,
    PointOfInterest, Preferences, RecommendationCard, Scorer, SingleStopPlanner, WeightedScorer,
    acquisition::{AcquisitionError, acquire},
};

/// Ranks candidate places and expands a selection into an itinerary.
///
/// One engine serves one session; ranking mutates the cache, so callers
/// sharing an engine across threads must serialise access themselves.
///
/// # Examples
/// ```
/// use wayfarer_core::{
///     Context, Integration, MemoryPlaceSource, PointOfInterest, Preferences,
///     RecommendationEngine, geodesy::lat_lng,
/// };
///
/// # fn main() -> Result<(), wayfarer_core::PointOfInterestError> {
/// let places = [
///     PointOfInterest::new("poi_011", "Royal Ontario Museum", lat_lng(43.6677, -79.3948), "museum", 4.8)?,
///     PointOfInterest::new("poi_002", "Pasta Palace", lat_lng(43.6529, -79.3849), "restaurant", 4.5)?,
/// ];
/// let mut engine = RecommendationEngine::new(Integration::standard(MemoryPlaceSource::new(places)));
/// let context = Context::now(Some(lat_lng(43.6532, -79.3832)), None);
/// let prefs = Preferences::default().with_interests(["museum"]);
///
/// let cards = engine.rank(&prefs, &context);
/// assert_eq!(cards.len(), 1);
/// assert_eq!(cards[0].name, "Royal Ontario Museum");
/// let plan = engine.build_itinerary(&prefs, &cards[0]);
/// assert_eq!(plan.total_minutes, 90);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RecommendationEngine<S = WeightedScorer> {
    integration: Integration,
    cache: CandidateCache,
    scorer: S,
}

impl RecommendationEngine {
    /// Create an engine with the default weighted scorer and an empty cache.
    #[must_use]
    pub fn new(integration: Integration) -> Self {
        Self {
            integration,
            cache: CandidateCache::new(),
            scorer: WeightedScorer::default(),
        }
    }

    /// Create an engine with no providers attached.
    ///
    /// Ranking returns nothing until providers are supplied through
    /// [`RecommendationEngine::with_integration`].
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::new(Integration::default())
    }
}

impl<S: Scorer> RecommendationEngine<S> {
    /// Replace the scorer.
    #[must_use]
    pub fn with_scorer<T: Scorer>(self, scorer: T) -> RecommendationEngine<T> {
        RecommendationEngine {
            integration: self.integration,
            cache: self.cache,
            scorer,
        }
    }

    /// Replace the candidate cache, e.g. with a pre-seeded one.
    #[must_use]
    pub fn with_cache(mut self, cache: CandidateCache) -> Self {
        self.cache = cache;
        self
    }

    /// Replace the providers. The cache is cleared.
    #[must_use]
    pub fn with_integration(mut self, integration: Integration) -> Self {
        self.integration = integration;
        self.cache.clear();
        self
    }

    /// Providers in use.
    #[must_use]
    pub const fn integration(&self) -> &Integration {
        &self.integration
    }

    /// Current candidate cache.
    #[must_use]
    pub const fn cache(&self) -> &CandidateCache {
        &self.cache
    }

    /// Run `query` against the place source.
    ///
    /// # Errors
    /// Returns [`AcquisitionError`] when the query has no location or the
    /// place source is unwired or fails.
    pub fn try_fetch_candidates(
        &self,
        query: &CandidateQuery,
    ) -> Result<Vec<PointOfInterest>, AcquisitionError> {
        query.run(&self.integration)
    }

    /// Run `query`, degrading to an empty list on failure.
    #[must_use]
    pub fn fetch_candidates(&self, query: &CandidateQuery) -> Vec<PointOfInterest> {
        self.try_fetch_candidates(query).unwrap_or_else(|err| {
            log::warn!("candidate fetch returned nothing: {err}");
            Vec::new()
        })
    }

    fn refill_cache(&mut self, preferences: &Preferences, context: &Context) {
        let origin = context.location();
        let cards: Vec<RecommendationCard> =
            match acquire(&self.integration, origin, preferences) {
                Ok(pois) => pois
                    .iter()
                    .map(|poi| RecommendationCard::from_poi(poi, origin))
                    .collect(),
                Err(err) => {
                    log::warn!("candidate acquisition returned nothing: {err}");
                    Vec::new()
                }
            };
        log::debug!("caching {} candidates", cards.len());
        self.cache.store(cards);
    }

    /// Score and order candidates for `preferences` in `context`.
    ///
    /// Candidates are fetched once per cache epoch; every call rescores them
    /// against the current inputs. The result is ordered by non-increasing
    /// score, with ties kept in acquisition order.
    pub fn rank(
        &mut self,
        preferences: &Preferences,
        context: &Context,
    ) -> Vec<RecommendationCard> {
        if self.cache.is_populated() {
            log::debug!("ranking from cached candidates");
        } else {
            self.refill_cache(preferences, context);
        }
        let Some(cached) = self.cache.get() else {
            return Vec::new();
        };
        let mut ranked: Vec<RecommendationCard> = cached
            .iter()
            .map(|card| RecommendationCard {
                score: self.scorer.score(card, preferences, context),
                ..card.clone()
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        log::debug!("ranked {} cards", ranked.len());
        ranked
    }

    /// Drop cached candidates so the next [`rank`](Self::rank) re-fetches.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Build the standard single-stop itinerary for `card`.
    #[must_use]
    pub fn build_itinerary(
        &self,
        preferences: &Preferences,
        card: &RecommendationCard,
    ) -> Itinerary {
        self.build_itinerary_with(&SingleStopPlanner::default(), preferences, card)
    }

    /// Build an itinerary for `card` with `planner`, offering it the cached
    /// candidates as possible extra stops.
    #[must_use]
    pub fn build_itinerary_with(
        &self,
        planner: &dyn ItineraryPlanner,
        preferences: &Preferences,
        card: &RecommendationCard,
    ) -> Itinerary {
        planner.plan(preferences, card, self.cache.get().unwrap_or_default())
    }

    /// Resolve `address`, returning `None` when it is unknown or the place
    /// source cannot answer.
    #[must_use]
    pub fn geocode(&self, address: &str) -> Option<Coord<f64>> {
        self.integration.geocode(address).unwrap_or_else(|err| {
            log::warn!("geocoding failed: {err}");
            None
        })
    }

    /// Snapshot the context at `location`, reading weather when possible.
    #[must_use]
    pub fn current_context(&self, location: Option<Coord<f64>>) -> Context {
        let weather = location.and_then(|point| match self.integration.weather(point) {
            Ok(reading) => Some(reading),
            Err(err) => {
                log::debug!("no weather for context: {err}");
                None
            }
        });
        Context::now(location, weather)
    }
}
