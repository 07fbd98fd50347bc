//! Situational snapshot used alongside preferences when ranking.

use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike};
use geo::Coord;

/// Current weather at the user's location.
///
/// # Examples
/// ```
/// use wayfarer_core::Weather;
///
/// let weather = Weather::new(22.0, "sunny", 60, 10.0);
/// assert_eq!(weather.to_string(), "22.0°C, sunny");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weather {
    /// Air temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Short description such as `sunny` or `rain`.
    pub condition: String,
    /// Relative humidity as a percentage.
    pub humidity_pct: u8,
    /// Wind speed in kilometres per hour.
    pub wind_speed_kmh: f64,
}

impl Weather {
    /// Construct a weather reading.
    #[must_use]
    pub fn new(
        temperature_c: f64,
        condition: impl Into<String>,
        humidity_pct: u8,
        wind_speed_kmh: f64,
    ) -> Self {
        Self {
            temperature_c,
            condition: condition.into(),
            humidity_pct,
            wind_speed_kmh,
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C, {}", self.temperature_c, self.condition)
    }
}

/// Coarse part of the day derived from a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TimeOfDay {
    /// 05:00 to 11:59.
    Morning,
    /// 12:00 to 16:59.
    Afternoon,
    /// 17:00 to 20:59.
    Evening,
    /// 21:00 to 04:59.
    Night,
}

impl TimeOfDay {
    /// Bucket an hour of the day (`0..=23`).
    ///
    /// # Examples
    /// ```
    /// use wayfarer_core::TimeOfDay;
    ///
    /// assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Morning);
    /// assert_eq!(TimeOfDay::from_hour(23), TimeOfDay::Night);
    /// ```
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=20 => Self::Evening,
            _ => Self::Night,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        })
    }
}

/// Location, weather and time for one ranking pass.
///
/// The time-of-day bucket is always derived from `timestamp`.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    location: Option<Coord<f64>>,
    weather: Option<Weather>,
    timestamp: NaiveDateTime,
    time_of_day: TimeOfDay,
}

impl Context {
    /// Build a context, deriving the time-of-day bucket from `timestamp`.
    #[must_use]
    pub fn new(
        location: Option<Coord<f64>>,
        weather: Option<Weather>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            location,
            weather,
            timestamp,
            time_of_day: TimeOfDay::from_hour(timestamp.hour()),
        }
    }

    /// Build a context stamped with the local wall-clock time.
    #[must_use]
    pub fn now(location: Option<Coord<f64>>, weather: Option<Weather>) -> Self {
        Self::new(location, weather, Local::now().naive_local())
    }

    /// The user's current position, if known.
    #[must_use]
    pub const fn location(&self) -> Option<Coord<f64>> {
        self.location
    }

    /// Weather at the user's position, if known.
    #[must_use]
    pub const fn weather(&self) -> Option<&Weather> {
        self.weather.as_ref()
    }

    /// When the snapshot was taken.
    #[must_use]
    pub const fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Part of the day the snapshot falls in.
    #[must_use]
    pub const fn time_of_day(&self) -> TimeOfDay {
        self.time_of_day
    }

    /// Return a copy positioned at `location`, keeping weather and time.
    #[must_use]
    pub fn relocated(&self, location: Option<Coord<f64>>) -> Self {
        Self {
            location,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::lat_lng;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn at_hour(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|date| date.and_hms_opt(hour, 30, 0))
            .expect("valid timestamp")
    }

    #[rstest]
    #[case(0, TimeOfDay::Night)]
    #[case(4, TimeOfDay::Night)]
    #[case(5, TimeOfDay::Morning)]
    #[case(11, TimeOfDay::Morning)]
    #[case(12, TimeOfDay::Afternoon)]
    #[case(16, TimeOfDay::Afternoon)]
    #[case(17, TimeOfDay::Evening)]
    #[case(20, TimeOfDay::Evening)]
    #[case(21, TimeOfDay::Night)]
    fn context_derives_time_of_day(#[case] hour: u32, #[case] expected: TimeOfDay) {
        let context = Context::new(None, None, at_hour(hour));
        assert_eq!(context.time_of_day(), expected);
    }

    #[rstest]
    fn relocating_keeps_weather_and_time() {
        let weather = Weather::new(18.5, "cloudy", 70, 12.0);
        let context = Context::new(Some(lat_lng(0.0, 0.0)), Some(weather.clone()), at_hour(9));
        let moved = context.relocated(Some(lat_lng(43.6532, -79.3832)));
        assert_eq!(moved.location(), Some(lat_lng(43.6532, -79.3832)));
        assert_eq!(moved.weather(), Some(&weather));
        assert_eq!(moved.timestamp(), context.timestamp());
    }

    #[rstest]
    fn weather_display_shows_temperature_and_condition() {
        assert_eq!(Weather::new(-3.0, "snow", 90, 25.0).to_string(), "-3.0°C, snow");
    }
}
