//! Core domain types and pipeline for the Wayfarer recommendation engine.
//!
//! Places come in through a [`PlaceSource`], are narrowed by the
//! [`acquisition`] filters, scored by a [`Scorer`] and ordered by the
//! [`RecommendationEngine`]. A selected card expands into an [`Itinerary`].
//! [`PlanningSession`] layers paging and preference tweaks on top.
//!
//! Constructors validate their input and return `Result`; the engine's
//! caller-facing operations degrade to empty results instead.

#![forbid(unsafe_code)]

pub mod acquisition;
mod cache;
mod card;
mod context;
mod engine;
pub mod geodesy;
pub mod integration;
pub mod itinerary;
mod poi;
mod preferences;
pub mod scorer;
mod session;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod travel_time;

pub use acquisition::{AcquisitionError, CandidateQuery, MemoryPlaceSource};
pub use cache::CandidateCache;
pub use card::RecommendationCard;
pub use context::{Context, TimeOfDay, Weather};
pub use engine::RecommendationEngine;
pub use integration::{FixedWeatherSource, Integration, PlaceSource, ProviderError, WeatherSource};
pub use itinerary::{
    Itinerary, ItineraryConfig, ItineraryPlanner, NearbyStopsPlanner, SingleStopPlanner,
};
pub use poi::{PointOfInterest, PointOfInterestError, PriceTier, UnknownPriceTier};
pub use preferences::{Budget, DeltaEffect, Preferences, PreferencesDelta, TransportMode};
pub use scorer::{ScoreWeights, ScoreWeightsError, Scorer, WeightedScorer};
pub use session::{PlanningSession, SessionError};
#[cfg(feature = "store-sqlite")]
pub use store::{SqlitePlaceSource, SqlitePlaceSourceError, write_places_database};
pub use travel_time::{
    Eta, RouteRequest, SpeedTableProvider, TravelTimeError, TravelTimeProvider, estimate_etas,
};
