//! Conversation-style orchestration over a recommendation engine.
//!
//! A [`PlanningSession`] keeps the user's preferences, their context and the
//! most recent ranking so the caller can page through results, tweak
//! preferences and pick a card without re-supplying everything each time.

use thiserror::Error;

use crate::{
    Context, DeltaEffect, Itinerary, ItineraryPlanner, Preferences, PreferencesDelta,
    RecommendationCard, RecommendationEngine, Scorer, SingleStopPlanner, WeightedScorer,
};

/// Cards returned per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Errors returned by [`PlanningSession`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The supplied card identifier was empty.
    #[error("a card identifier is required")]
    MissingIdentifier,
    /// The card is not part of the most recent ranking.
    #[error("card {place_id} is not in the current recommendations")]
    CardNotFound {
        /// Identifier that was requested.
        place_id: String,
    },
    /// Planning has not started, so there are no preferences to work from.
    #[error("planning has not started")]
    NotStarted,
}

/// One user's planning conversation.
///
/// # Examples
/// ```
/// use wayfarer_core::{
///     Context, Integration, MemoryPlaceSource, PlanningSession, PointOfInterest, Preferences,
///     RecommendationEngine, geodesy::lat_lng,
/// };
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let museum = PointOfInterest::new(
///     "poi_011",
///     "Royal Ontario Museum",
///     lat_lng(43.6677, -79.3948),
///     "museum",
///     4.8,
/// )?;
/// let engine = RecommendationEngine::new(Integration::standard(MemoryPlaceSource::new([museum])));
/// let context = Context::now(Some(lat_lng(43.6532, -79.3832)), None);
/// let mut session = PlanningSession::new(engine, context);
///
/// let page = session.start_planning(Preferences::default().with_interests(["museum"]));
/// let itinerary = session.select_card(&page[0].place_id)?;
/// assert!(itinerary.steps[0].contains("Royal Ontario Museum"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PlanningSession<S = WeightedScorer> {
    engine: RecommendationEngine<S>,
    preferences: Option<Preferences>,
    context: Context,
    ranked: Vec<RecommendationCard>,
    cursor: usize,
    page_size: usize,
    request_count: u64,
}

impl<S: Scorer> PlanningSession<S> {
    /// Start a session around `engine` in `context`.
    #[must_use]
    pub const fn new(engine: RecommendationEngine<S>, context: Context) -> Self {
        Self {
            engine,
            preferences: None,
            context,
            ranked: Vec::new(),
            cursor: 0,
            page_size: DEFAULT_PAGE_SIZE,
            request_count: 0,
        }
    }

    /// Return `page_size` cards per page; zero is treated as one.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Current preferences, once planning has started.
    #[must_use]
    pub const fn preferences(&self) -> Option<&Preferences> {
        self.preferences.as_ref()
    }

    /// Current context.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Most recent full ranking.
    #[must_use]
    pub fn ranked(&self) -> &[RecommendationCard] {
        &self.ranked
    }

    /// Number of ranking requests served so far.
    #[must_use]
    pub const fn request_count(&self) -> u64 {
        self.request_count
    }

    /// Underlying engine.
    #[must_use]
    pub const fn engine(&self) -> &RecommendationEngine<S> {
        &self.engine
    }

    fn rerank(&mut self, preferences: &Preferences) -> Vec<RecommendationCard> {
        self.request_count = self.request_count.saturating_add(1);
        self.ranked = self.engine.rank(preferences, &self.context);
        self.cursor = 0;
        if self.ranked.is_empty() {
            log::warn!("no recommendations for request {}", self.request_count);
        }
        self.next_page()
    }

    fn next_page(&mut self) -> Vec<RecommendationCard> {
        let page: Vec<RecommendationCard> = self
            .ranked
            .iter()
            .skip(self.cursor)
            .take(self.page_size)
            .cloned()
            .collect();
        self.cursor = self.cursor.saturating_add(page.len());
        page
    }

    /// Adopt `preferences` and return the first page of recommendations.
    ///
    /// Starting again discards cached candidates from any earlier start.
    pub fn start_planning(&mut self, preferences: Preferences) -> Vec<RecommendationCard> {
        self.engine.clear_cache();
        let page = self.rerank(&preferences);
        self.preferences = Some(preferences);
        page
    }

    /// Merge `delta` into the preferences and re-rank.
    ///
    /// Changing interests, budget or radius invalidates cached candidates;
    /// other changes only rescore them.
    ///
    /// # Errors
    /// Returns [`SessionError::NotStarted`] before [`start_planning`](Self::start_planning).
    pub fn adjust_preferences(
        &mut self,
        delta: PreferencesDelta,
    ) -> Result<Vec<RecommendationCard>, SessionError> {
        let mut preferences = self.preferences.take().ok_or(SessionError::NotStarted)?;
        if preferences.merge(delta) == DeltaEffect::Refetch {
            log::debug!("preferences changed a filter; refetching candidates");
            self.engine.clear_cache();
        }
        let page = self.rerank(&preferences);
        self.preferences = Some(preferences);
        Ok(page)
    }

    /// Return the next page of the most recent ranking, or nothing when it is
    /// exhausted.
    pub fn show_more(&mut self) -> Vec<RecommendationCard> {
        self.next_page()
    }

    /// Build the standard itinerary for the card with `place_id`.
    ///
    /// # Errors
    /// Returns [`SessionError::MissingIdentifier`] for a blank id,
    /// [`SessionError::NotStarted`] before planning starts and
    /// [`SessionError::CardNotFound`] when the card is not in the most recent
    /// ranking.
    pub fn select_card(&self, place_id: &str) -> Result<Itinerary, SessionError> {
        self.select_card_with(&SingleStopPlanner::default(), place_id)
    }

    /// Build an itinerary for the card with `place_id` using `planner`.
    ///
    /// # Errors
    /// As for [`select_card`](Self::select_card).
    pub fn select_card_with(
        &self,
        planner: &dyn ItineraryPlanner,
        place_id: &str,
    ) -> Result<Itinerary, SessionError> {
        let wanted = place_id.trim();
        if wanted.is_empty() {
            return Err(SessionError::MissingIdentifier);
        }
        let preferences = self.preferences.as_ref().ok_or(SessionError::NotStarted)?;
        let card = self
            .ranked
            .iter()
            .find(|card| card.place_id == wanted)
            .ok_or_else(|| SessionError::CardNotFound {
                place_id: wanted.to_owned(),
            })?;
        Ok(self.engine.build_itinerary_with(planner, preferences, card))
    }

    /// Replace the context, dropping cached candidates if the location moved.
    ///
    /// The next ranking happens on the following
    /// [`adjust_preferences`](Self::adjust_preferences) or
    /// [`start_planning`](Self::start_planning) call.
    pub fn update_context(&mut self, context: Context) {
        if context.location() != self.context.location() {
            log::debug!("location changed; clearing cached candidates");
            self.engine.clear_cache();
        }
        self.context = context;
    }
}
