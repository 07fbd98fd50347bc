//! Estimate travel durations from an origin to a list of destinations.
//!
//! The `TravelTimeProvider` trait abstracts the retrieval of [`Eta`] values
//! for a [`RouteRequest`]. [`SpeedTableProvider`] derives them from the
//! haversine distance and a fixed speed per [`TransportMode`].
//!
//! ETAs are advisory. [`estimate_etas`] swallows request errors and returns
//! an empty list, which is what the ranking pipeline wants; call the
//! provider directly to observe the error.

mod error;
mod provider;

pub use error::TravelTimeError;
pub use provider::{SpeedTableProvider, TravelTimeProvider, eta_for_distance};

use geo::Coord;

use crate::TransportMode;

/// A travel-time estimate to one destination.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eta {
    /// Whole minutes, rounded up.
    pub duration_minutes: u32,
    /// Great-circle distance in metres.
    pub distance_metres: f64,
    /// Mode the estimate assumes.
    pub mode: TransportMode,
}

/// Input to [`TravelTimeProvider::get_etas`].
///
/// Every field is optional so callers can pass through whatever they have;
/// a missing mode means walking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteRequest {
    /// Starting point.
    pub origin: Option<Coord<f64>>,
    /// Points to estimate, in order.
    pub destinations: Option<Vec<Coord<f64>>>,
    /// Travel mode.
    pub mode: Option<TransportMode>,
}

impl RouteRequest {
    /// Request ETAs from `origin` to each of `destinations`.
    #[must_use]
    pub fn new(
        origin: Coord<f64>,
        destinations: impl IntoIterator<Item = Coord<f64>>,
        mode: TransportMode,
    ) -> Self {
        Self {
            origin: Some(origin),
            destinations: Some(destinations.into_iter().collect()),
            mode: Some(mode),
        }
    }
}

/// Estimate ETAs with the speed table, returning an empty list when the
/// request lacks an origin or destinations.
///
/// # Examples
/// ```
/// use wayfarer_core::geodesy::lat_lng;
/// use wayfarer_core::travel_time::{RouteRequest, estimate_etas};
/// use wayfarer_core::TransportMode;
///
/// let request = RouteRequest::new(
///     lat_lng(43.6532, -79.3832),
///     [lat_lng(43.6426, -79.3871)],
///     TransportMode::Walking,
/// );
/// let etas = estimate_etas(&request);
/// assert_eq!(etas.len(), 1);
/// assert!(estimate_etas(&RouteRequest::default()).is_empty());
/// ```
#[must_use]
pub fn estimate_etas(request: &RouteRequest) -> Vec<Eta> {
    SpeedTableProvider.get_etas(request).unwrap_or_else(|err| {
        log::debug!("no travel estimates: {err}");
        Vec::new()
    })
}
