//! Facade crate for the Wayfarer recommendation engine.
//!
//! This crate re-exports the core domain types and exposes the SQLite place
//! source behind the `store-sqlite` feature.

#![forbid(unsafe_code)]

pub use wayfarer_core::{
    AcquisitionError, Budget, CandidateQuery, Context, Eta, Integration, Itinerary,
    ItineraryPlanner, MemoryPlaceSource, NearbyStopsPlanner, PlaceSource, PlanningSession,
    PointOfInterest, Preferences, PreferencesDelta, PriceTier, ProviderError,
    RecommendationCard, RecommendationEngine, RouteRequest, Scorer, SessionError,
    SingleStopPlanner, TransportMode, TravelTimeError, TravelTimeProvider, WeightedScorer,
};

#[cfg(feature = "store-sqlite")]
pub use wayfarer_core::{SqlitePlaceSource, SqlitePlaceSourceError};
