//! Boundary to the services that supply places, weather and travel times.
//!
//! Each service sits behind its own trait and occupies an optional slot in
//! [`Integration`]. An empty slot is reported as
//! [`ProviderError::NotConfigured`] so callers can tell "not wired" apart
//! from "wired but returned nothing".

use std::{fmt, sync::Arc};

use geo::Coord;
use thiserror::Error;

use crate::{
    Preferences, PointOfInterest, Weather,
    travel_time::{Eta, RouteRequest, SpeedTableProvider, TravelTimeError, TravelTimeProvider},
};

/// Service name used for the place source in errors and logs.
pub const PLACES_SERVICE: &str = "places";
/// Service name used for the weather source in errors and logs.
pub const WEATHER_SERVICE: &str = "weather";
/// Service name used for the travel-time provider in errors and logs.
pub const TRAVEL_SERVICE: &str = "travel";

/// Errors raised at the provider boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No implementation was attached for the service.
    #[error("{service} provider is not configured")]
    NotConfigured {
        /// Name of the missing service.
        service: &'static str,
    },
    /// The service was attached but could not answer.
    #[error("{service} provider is unavailable: {message}")]
    Unavailable {
        /// Name of the failing service.
        service: &'static str,
        /// Provider-supplied detail.
        message: String,
    },
    /// The travel-time request was incomplete.
    #[error(transparent)]
    TravelTime(#[from] TravelTimeError),
}

/// Supplies candidate places and resolves addresses.
pub trait PlaceSource: Send + Sync {
    /// Return places near `location` for `preferences`.
    ///
    /// Implementations may pre-filter; the acquisition step enforces the
    /// interest, radius and budget filters regardless.
    ///
    /// # Errors
    /// Returns [`ProviderError::Unavailable`] when the backing data cannot be
    /// read.
    fn search_places(
        &self,
        location: Coord<f64>,
        preferences: &Preferences,
    ) -> Result<Vec<PointOfInterest>, ProviderError>;

    /// Resolve a free-text address, returning `None` when it is unknown.
    ///
    /// # Errors
    /// Returns [`ProviderError::Unavailable`] when the lookup itself fails.
    fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, ProviderError>;
}

/// Reports current weather at a location.
pub trait WeatherSource: Send + Sync {
    /// Return the weather at `location`.
    ///
    /// # Errors
    /// Returns [`ProviderError::Unavailable`] when no reading can be taken.
    fn get_weather(&self, location: Coord<f64>) -> Result<Weather, ProviderError>;
}

/// Weather source that always reports the same reading.
///
/// The default is a pleasant 22 °C, sunny, 60 % humidity and 10 km/h wind.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedWeatherSource {
    reading: Weather,
}

impl FixedWeatherSource {
    /// Always report `reading`.
    #[must_use]
    pub const fn new(reading: Weather) -> Self {
        Self { reading }
    }
}

impl Default for FixedWeatherSource {
    fn default() -> Self {
        Self::new(Weather::new(22.0, "sunny", 60, 10.0))
    }
}

impl WeatherSource for FixedWeatherSource {
    fn get_weather(&self, _location: Coord<f64>) -> Result<Weather, ProviderError> {
        Ok(self.reading.clone())
    }
}

/// The set of providers a recommendation engine consults.
///
/// # Examples
/// ```
/// use wayfarer_core::{Integration, MemoryPlaceSource, ProviderError};
/// use wayfarer_core::geodesy::lat_lng;
///
/// let bare = Integration::default();
/// assert!(matches!(
///     bare.geocode("1 Front St"),
///     Err(ProviderError::NotConfigured { service: "places" })
/// ));
///
/// let wired = Integration::standard(MemoryPlaceSource::default());
/// assert!(wired.weather(lat_lng(0.0, 0.0)).is_ok());
/// ```
#[derive(Clone, Default)]
pub struct Integration {
    places: Option<Arc<dyn PlaceSource>>,
    weather: Option<Arc<dyn WeatherSource>>,
    travel: Option<Arc<dyn TravelTimeProvider>>,
}

impl fmt::Debug for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Integration")
            .field("places", &self.places.is_some())
            .field("weather", &self.weather.is_some())
            .field("travel", &self.travel.is_some())
            .finish()
    }
}

impl Integration {
    /// Wire `places` with fixed weather and speed-table travel times.
    #[must_use]
    pub fn standard(places: impl PlaceSource + 'static) -> Self {
        Self::default()
            .with_places(places)
            .with_weather(FixedWeatherSource::default())
            .with_travel(SpeedTableProvider)
    }

    /// Attach a place source.
    #[must_use]
    pub fn with_places(mut self, places: impl PlaceSource + 'static) -> Self {
        self.places = Some(Arc::new(places));
        self
    }

    /// Attach a weather source.
    #[must_use]
    pub fn with_weather(mut self, weather: impl WeatherSource + 'static) -> Self {
        self.weather = Some(Arc::new(weather));
        self
    }

    /// Attach a travel-time provider.
    #[must_use]
    pub fn with_travel(mut self, travel: impl TravelTimeProvider + 'static) -> Self {
        self.travel = Some(Arc::new(travel));
        self
    }

    /// Whether a place source is attached.
    #[must_use]
    pub const fn has_places(&self) -> bool {
        self.places.is_some()
    }

    fn place_source(&self) -> Result<&dyn PlaceSource, ProviderError> {
        self.places
            .as_deref()
            .ok_or(ProviderError::NotConfigured {
                service: PLACES_SERVICE,
            })
    }

    /// Search the place source around `location`.
    ///
    /// # Errors
    /// Returns [`ProviderError::NotConfigured`] without a place source, or
    /// whatever the source reports.
    pub fn nearby_places(
        &self,
        location: Coord<f64>,
        preferences: &Preferences,
    ) -> Result<Vec<PointOfInterest>, ProviderError> {
        self.place_source()?.search_places(location, preferences)
    }

    /// Resolve an address through the place source.
    ///
    /// # Errors
    /// Returns [`ProviderError::NotConfigured`] without a place source, or
    /// whatever the source reports.
    pub fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, ProviderError> {
        self.place_source()?.geocode(address)
    }

    /// Read the weather at `location`.
    ///
    /// # Errors
    /// Returns [`ProviderError::NotConfigured`] without a weather source, or
    /// whatever the source reports.
    pub fn weather(&self, location: Coord<f64>) -> Result<Weather, ProviderError> {
        self.weather
            .as_deref()
            .ok_or(ProviderError::NotConfigured {
                service: WEATHER_SERVICE,
            })?
            .get_weather(location)
    }

    /// Estimate travel times for `request`.
    ///
    /// # Errors
    /// Returns [`ProviderError::NotConfigured`] without a travel provider and
    /// [`ProviderError::TravelTime`] for an incomplete request.
    pub fn etas(&self, request: &RouteRequest) -> Result<Vec<Eta>, ProviderError> {
        let travel = self
            .travel
            .as_deref()
            .ok_or(ProviderError::NotConfigured {
                service: TRAVEL_SERVICE,
            })?;
        Ok(travel.get_etas(request)?)
    }
}
