//! Travel-time provider trait and the speed-table implementation.

use crate::{TransportMode, geodesy::haversine_distance};

use super::{Eta, RouteRequest, error::TravelTimeError};

/// Fetch travel-time estimates for a route request.
///
/// Implementers must return one [`Eta`] per destination, in request order.
///
/// # Examples
///
/// ```rust
/// use wayfarer_core::travel_time::{Eta, RouteRequest, TravelTimeError, TravelTimeProvider};
/// use wayfarer_core::TransportMode;
///
/// struct TenMinutesEverywhere;
///
/// impl TravelTimeProvider for TenMinutesEverywhere {
///     fn get_etas(&self, request: &RouteRequest) -> Result<Vec<Eta>, TravelTimeError> {
///         let destinations = request
///             .destinations
///             .as_deref()
///             .filter(|points| !points.is_empty())
///             .ok_or(TravelTimeError::EmptyInput)?;
///         Ok(destinations
///             .iter()
///             .map(|_| Eta {
///                 duration_minutes: 10,
///                 distance_metres: 0.0,
///                 mode: request.mode.unwrap_or_default(),
///             })
///             .collect())
///     }
/// }
///
/// let err = TenMinutesEverywhere.get_etas(&RouteRequest::default());
/// assert_eq!(err, Err(TravelTimeError::EmptyInput));
/// ```
pub trait TravelTimeProvider: Send + Sync {
    /// Return ETAs from `request.origin` to each destination.
    ///
    /// # Errors
    /// Implementations return [`TravelTimeError::MissingOrigin`] or
    /// [`TravelTimeError::EmptyInput`] when the request is incomplete.
    fn get_etas(&self, request: &RouteRequest) -> Result<Vec<Eta>, TravelTimeError>;
}

/// Estimates durations from haversine distance and a fixed speed per mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpeedTableProvider;

impl TravelTimeProvider for SpeedTableProvider {
    fn get_etas(&self, request: &RouteRequest) -> Result<Vec<Eta>, TravelTimeError> {
        let origin = request.origin.ok_or(TravelTimeError::MissingOrigin)?;
        let destinations = request
            .destinations
            .as_deref()
            .filter(|points| !points.is_empty())
            .ok_or(TravelTimeError::EmptyInput)?;
        let mode = request.mode.unwrap_or_default();
        Ok(destinations
            .iter()
            .map(|destination| eta_for_distance(haversine_distance(origin, *destination), mode))
            .collect())
    }
}

/// Estimate the time to cover `distance_metres` by `mode`.
///
/// Minutes are rounded up; a negative or non-finite distance yields zero.
///
/// # Examples
/// ```
/// use wayfarer_core::TransportMode;
/// use wayfarer_core::travel_time::eta_for_distance;
///
/// assert_eq!(eta_for_distance(1_000.0, TransportMode::Walking).duration_minutes, 12);
/// assert_eq!(eta_for_distance(1_000.0, TransportMode::Driving).duration_minutes, 2);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "durations are derived from floating-point distances"
)]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "minutes are clamped to the non-negative u32 range before casting"
)]
pub fn eta_for_distance(distance_metres: f64, mode: TransportMode) -> Eta {
    let metres = if distance_metres.is_finite() {
        distance_metres.max(0.0)
    } else {
        0.0
    };
    let minutes = (metres * 60.0 / f64::from(mode.metres_per_hour())).ceil();
    Eta {
        duration_minutes: minutes.min(f64::from(u32::MAX)) as u32,
        distance_metres: metres,
        mode,
    }
}

#[cfg(test)]
#[expect(
    clippy::float_arithmetic,
    reason = "tests compare floating-point distances"
)]
mod tests {
    use super::*;
    use crate::geodesy::{EARTH_RADIUS_METRES, lat_lng};
    use rstest::rstest;

    /// Move `metres` due north along a meridian from the origin.
    fn north_of_origin(metres: f64) -> geo::Coord<f64> {
        lat_lng((metres / EARTH_RADIUS_METRES).to_degrees(), 0.0)
    }

    #[rstest]
    #[case(TransportMode::Walking, 12)]
    #[case(TransportMode::Transit, 3)]
    #[case(TransportMode::Driving, 2)]
    fn one_kilometre_per_mode(#[case] mode: TransportMode, #[case] expected: u32) {
        assert_eq!(eta_for_distance(1_000.0, mode).duration_minutes, expected);
    }

    #[rstest]
    fn zero_distance_takes_no_time() {
        let eta = eta_for_distance(0.0, TransportMode::Walking);
        assert_eq!(eta.duration_minutes, 0);
    }

    #[rstest]
    fn partial_minutes_round_up() {
        assert_eq!(eta_for_distance(84.0, TransportMode::Walking).duration_minutes, 2);
    }

    #[rstest]
    fn provider_returns_one_eta_per_destination() {
        let request = RouteRequest::new(
            lat_lng(0.0, 0.0),
            [north_of_origin(450.0), north_of_origin(1_450.0)],
            TransportMode::Walking,
        );
        let etas = SpeedTableProvider
            .get_etas(&request)
            .expect("complete request should succeed");
        let minutes: Vec<_> = etas.iter().map(|eta| eta.duration_minutes).collect();
        assert_eq!(minutes, vec![6, 18]);
    }

    #[rstest]
    fn missing_mode_means_walking() {
        let request = RouteRequest {
            mode: None,
            ..RouteRequest::new(lat_lng(0.0, 0.0), [north_of_origin(100.0)], TransportMode::Driving)
        };
        let etas = SpeedTableProvider.get_etas(&request).expect("eta");
        assert!(etas.iter().all(|eta| eta.mode == TransportMode::Walking));
    }

    #[rstest]
    fn errors_on_missing_origin() {
        let request = RouteRequest {
            origin: None,
            ..RouteRequest::new(lat_lng(0.0, 0.0), [lat_lng(1.0, 1.0)], TransportMode::Walking)
        };
        let err = SpeedTableProvider
            .get_etas(&request)
            .expect_err("expected MissingOrigin");
        assert_eq!(err, TravelTimeError::MissingOrigin);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(Vec::new()))]
    fn errors_on_empty_destinations(#[case] destinations: Option<Vec<geo::Coord<f64>>>) {
        let request = RouteRequest {
            origin: Some(lat_lng(0.0, 0.0)),
            destinations,
            mode: None,
        };
        let err = SpeedTableProvider
            .get_etas(&request)
            .expect_err("expected EmptyInput");
        assert_eq!(err, TravelTimeError::EmptyInput);
    }
}
