//! Expand a selected recommendation into a short plan.
//!
//! [`SingleStopPlanner`] produces the standard plan: visit the place, explore
//! around it, and budget a fixed total. [`NearbyStopsPlanner`] is an opt-in
//! extension that chains up to three nearby candidates with estimated travel
//! legs. Both return the same [`Itinerary`] shape.

use crate::{
    Preferences, RecommendationCard, TransportMode,
    geodesy::haversine_distance,
    travel_time::{RouteRequest, SpeedTableProvider, TravelTimeProvider},
};

/// Upper bound on the extra stops [`NearbyStopsPlanner`] appends.
pub const MAX_EXTRA_STOPS: usize = 3;

/// An ordered, human-readable plan.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    /// Lines to show in order.
    pub steps: Vec<String>,
    /// Estimated duration of the whole plan, in minutes.
    pub total_minutes: u32,
}

/// Fixed planning estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItineraryConfig {
    /// Total budgeted for a single-stop plan.
    pub total_minutes: u32,
    /// Time suggested for exploring around a stop.
    pub explore_minutes: u32,
}

impl Default for ItineraryConfig {
    fn default() -> Self {
        Self {
            total_minutes: 90,
            explore_minutes: 30,
        }
    }
}

/// Builds an [`Itinerary`] for a selected card.
pub trait ItineraryPlanner: Send + Sync {
    /// Plan a visit to `selected`.
    ///
    /// `candidates` is the cached candidate set, unscored and in acquisition
    /// order, which planners may draw extra stops from.
    fn plan(
        &self,
        preferences: &Preferences,
        selected: &RecommendationCard,
        candidates: &[RecommendationCard],
    ) -> Itinerary;
}

fn visit_lines(index: usize, card: &RecommendationCard, headline: &str) -> [String; 3] {
    [
        format!("{index}. {headline}"),
        format!("   Rating: {:.1}/5.0", card.rating),
        format!("   Distance: {:.0}m from you", card.distance_metres),
    ]
}

const fn travel_verb(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::Walking => "Walk",
        TransportMode::Driving => "Drive",
        TransportMode::Transit => "Take transit",
    }
}

fn total_line(minutes: u32) -> String {
    format!("Total estimated time: {minutes} minutes")
}

/// Plans a single destination with a fixed total duration.
///
/// # Examples
/// ```
/// use wayfarer_core::{ItineraryPlanner, Preferences, RecommendationCard, SingleStopPlanner};
/// use wayfarer_core::geodesy::lat_lng;
///
/// let card = RecommendationCard {
///     place_id: "poi_001".into(),
///     name: "CN Tower".into(),
///     rating: 4.8,
///     distance_metres: 500.0,
///     summary: "Landmark".into(),
///     location: lat_lng(43.6426, -79.3871),
///     score: 0.0,
/// };
/// let itinerary = SingleStopPlanner::default().plan(&Preferences::default(), &card, &[]);
/// assert!(itinerary.steps[0].contains("CN Tower"));
/// assert!(itinerary.steps[1].contains("4.8/5.0"));
/// assert_eq!(itinerary.total_minutes, 90);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SingleStopPlanner {
    config: ItineraryConfig,
}

impl SingleStopPlanner {
    /// Plan with custom estimates.
    #[must_use]
    pub const fn new(config: ItineraryConfig) -> Self {
        Self { config }
    }

    fn steps(&self, selected: &RecommendationCard) -> Vec<String> {
        let mut steps: Vec<String> =
            visit_lines(1, selected, &format!("Visit {} (main destination)", selected.name))
                .into_iter()
                .collect();
        steps.push(format!(
            "2. Explore the area ({} min suggested)",
            self.config.explore_minutes
        ));
        steps
    }
}

impl ItineraryPlanner for SingleStopPlanner {
    fn plan(
        &self,
        _preferences: &Preferences,
        selected: &RecommendationCard,
        _candidates: &[RecommendationCard],
    ) -> Itinerary {
        let mut steps = self.steps(selected);
        steps.push(total_line(self.config.total_minutes));
        Itinerary {
            steps,
            total_minutes: self.config.total_minutes,
        }
    }
}

/// Extends the single-stop plan with the closest other candidates.
///
/// Extra stops are chosen by distance from the selected place and visited
/// nearest first. Each leg is estimated by the travel provider using the
/// user's transport mode; the total adds each leg and an exploration slot
/// per extra stop to the single-stop estimate. Without other candidates, or
/// when a leg cannot be estimated, the plan stops where it is.
#[derive(Debug, Clone, Copy)]
pub struct NearbyStopsPlanner<T = SpeedTableProvider> {
    base: SingleStopPlanner,
    extra_stops: usize,
    travel: T,
}

impl Default for NearbyStopsPlanner {
    fn default() -> Self {
        Self::new(SpeedTableProvider, MAX_EXTRA_STOPS)
    }
}

impl<T: TravelTimeProvider> NearbyStopsPlanner<T> {
    /// Append up to `extra_stops` stops (clamped to `1..=3`), timing legs
    /// with `travel`.
    #[must_use]
    pub fn new(travel: T, extra_stops: usize) -> Self {
        Self {
            base: SingleStopPlanner::default(),
            extra_stops: extra_stops.clamp(1, MAX_EXTRA_STOPS),
            travel,
        }
    }

    /// Use custom estimates for the base plan.
    #[must_use]
    pub const fn with_config(mut self, config: ItineraryConfig) -> Self {
        self.base = SingleStopPlanner::new(config);
        self
    }

    fn nearest<'a>(
        &self,
        selected: &RecommendationCard,
        candidates: &'a [RecommendationCard],
    ) -> Vec<&'a RecommendationCard> {
        let mut others: Vec<(f64, &RecommendationCard)> = candidates
            .iter()
            .filter(|card| card.place_id != selected.place_id)
            .map(|card| (haversine_distance(selected.location, card.location), card))
            .collect();
        others.sort_by(|a, b| a.0.total_cmp(&b.0));
        others
            .into_iter()
            .take(self.extra_stops)
            .map(|(_, card)| card)
            .collect()
    }

    fn leg_minutes(
        &self,
        from: &RecommendationCard,
        to: &RecommendationCard,
        preferences: &Preferences,
    ) -> Option<u32> {
        let request = RouteRequest::new(from.location, [to.location], preferences.transport_mode);
        match self.travel.get_etas(&request) {
            Ok(etas) => etas.first().map(|eta| eta.duration_minutes),
            Err(err) => {
                log::warn!("cannot time leg to {}: {err}", to.place_id);
                None
            }
        }
    }
}

impl<T: TravelTimeProvider> ItineraryPlanner for NearbyStopsPlanner<T> {
    fn plan(
        &self,
        preferences: &Preferences,
        selected: &RecommendationCard,
        candidates: &[RecommendationCard],
    ) -> Itinerary {
        let config = self.base.config;
        let mut steps = self.base.steps(selected);
        let mut total = config.total_minutes;
        let mut previous = selected;

        for (offset, stop) in self.nearest(selected, candidates).into_iter().enumerate() {
            let Some(minutes) = self.leg_minutes(previous, stop, preferences) else {
                break;
            };
            let headline = format!(
                "{} to {} ({minutes} min), then explore for {} min",
                travel_verb(preferences.transport_mode),
                stop.name,
                config.explore_minutes,
            );
            steps.extend(visit_lines(offset + 3, stop, &headline));
            total = total
                .saturating_add(minutes)
                .saturating_add(config.explore_minutes);
            previous = stop;
        }

        steps.push(total_line(total));
        Itinerary {
            steps,
            total_minutes: total,
        }
    }
}
