//! Search flags shared by every subcommand and the ranking run behind them.

use std::io::Write;

use camino::Utf8PathBuf;
use geo::Coord;
use serde::Serialize;
use wayfarer_core::{
    Budget, CandidateCache, CandidateQuery, Integration, Preferences, PreferencesDelta,
    RecommendationCard, RecommendationEngine, TransportMode, geodesy::lat_lng,
};

use crate::{ARG_LATITUDE, ARG_LONGITUDE, ARG_PLACES, CliError};

/// Environment variables that can supply the required search flags.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchEnv {
    pub(crate) places: &'static str,
    pub(crate) latitude: &'static str,
    pub(crate) longitude: &'static str,
}

/// Search flags after configuration merging, before validation.
#[derive(Debug, Clone, Default)]
pub(crate) struct SearchFields {
    pub(crate) places: Option<Utf8PathBuf>,
    pub(crate) latitude: Option<f64>,
    pub(crate) longitude: Option<f64>,
    pub(crate) address: Option<String>,
    pub(crate) interests: Option<Vec<String>>,
    pub(crate) budget: Option<String>,
    pub(crate) radius: Option<u32>,
    pub(crate) transport: Option<String>,
    pub(crate) max_results: Option<usize>,
    pub(crate) search: Option<String>,
}

/// Where the user is searching from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Origin {
    /// An explicit position.
    Coordinates(Coord<f64>),
    /// An address to resolve against the places database.
    Address(String),
}

/// Resolved search configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchConfig {
    /// Path to the SQLite places database.
    pub(crate) places: Utf8PathBuf,
    /// Starting point.
    pub(crate) origin: Origin,
    /// Filters and scoring inputs.
    pub(crate) preferences: Preferences,
    /// Optional name or category filter.
    pub(crate) search_term: Option<String>,
    /// Upper bound on the cards returned; `None` means all.
    pub(crate) max_results: Option<usize>,
}

impl SearchFields {
    pub(crate) fn resolve(self, env: SearchEnv) -> Result<SearchConfig, CliError> {
        let places = self.places.ok_or(CliError::MissingArgument {
            field: ARG_PLACES,
            env: env.places,
        })?;
        let origin = resolve_origin(self.latitude, self.longitude, self.address, env)?;

        let mut preferences = Preferences::default();
        preferences.merge(PreferencesDelta {
            interests: self.interests.map(clean_interests),
            budget: self.budget.as_deref().map(Budget::parse),
            radius_metres: self.radius,
            transport_mode: self.transport.as_deref().map(TransportMode::parse),
            accessibility_needs: None,
        });

        Ok(SearchConfig {
            places,
            origin,
            preferences,
            search_term: self
                .search
                .map(|term| term.trim().to_owned())
                .filter(|term| !term.is_empty()),
            max_results: self.max_results.filter(|limit| *limit > 0),
        })
    }
}

fn clean_interests(interests: Vec<String>) -> Vec<String> {
    interests
        .into_iter()
        .map(|interest| interest.trim().to_owned())
        .filter(|interest| !interest.is_empty())
        .collect()
}

fn resolve_origin(
    latitude: Option<f64>,
    longitude: Option<f64>,
    address: Option<String>,
    env: SearchEnv,
) -> Result<Origin, CliError> {
    match (latitude, longitude) {
        (Some(lat), Some(lng)) => {
            if address.is_some() {
                log::debug!("coordinates given; ignoring address");
            }
            validate_coordinates(lat, lng).map(Origin::Coordinates)
        }
        (Some(_), None) => Err(CliError::MissingArgument {
            field: ARG_LONGITUDE,
            env: env.longitude,
        }),
        (None, Some(_)) => Err(CliError::MissingArgument {
            field: ARG_LATITUDE,
            env: env.latitude,
        }),
        (None, None) => address
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
            .map(Origin::Address)
            .ok_or(CliError::MissingArgument {
                field: ARG_LATITUDE,
                env: env.latitude,
            }),
    }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> Result<Coord<f64>, CliError> {
    if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
        Ok(lat_lng(latitude, longitude))
    } else {
        Err(CliError::InvalidCoordinate {
            latitude,
            longitude,
        })
    }
}

/// Builds the provider wiring for the current invocation.
pub(crate) trait PlaceSourceBuilder {
    fn build(&self, config: &SearchConfig) -> Result<Integration, CliError>;
}

/// Opens the SQLite places database named by the configuration.
pub(crate) struct DefaultPlaceSourceBuilder;

impl PlaceSourceBuilder for DefaultPlaceSourceBuilder {
    #[cfg(feature = "store-sqlite")]
    fn build(&self, config: &SearchConfig) -> Result<Integration, CliError> {
        let source = wayfarer_core::SqlitePlaceSource::open(config.places.as_std_path())?;
        Ok(Integration::standard(source))
    }

    #[cfg(not(feature = "store-sqlite"))]
    fn build(&self, _config: &SearchConfig) -> Result<Integration, CliError> {
        Err(CliError::MissingFeature {
            feature: "store-sqlite",
            action: "opening a places database",
        })
    }
}

/// A ranked search and the engine that produced it.
pub(crate) struct SearchOutcome {
    pub(crate) engine: RecommendationEngine,
    pub(crate) cards: Vec<RecommendationCard>,
}

/// Rank places for `config` using providers from `builder`.
///
/// The place source is searched once. Places matching the search term seed
/// the engine's cache, so ranking and multi-stop planning only see them. The
/// result limit applies after ranking.
pub(crate) fn run_search(
    config: &SearchConfig,
    builder: &dyn PlaceSourceBuilder,
) -> Result<SearchOutcome, CliError> {
    let engine = RecommendationEngine::new(builder.build(config)?);
    let origin = locate(&engine, &config.origin)?;
    let context = engine.current_context(Some(origin));

    let candidates: Vec<RecommendationCard> = engine
        .try_fetch_candidates(&candidate_query(origin, config))?
        .iter()
        .map(|poi| RecommendationCard::from_poi(poi, Some(origin)))
        .collect();
    if candidates.is_empty() {
        log::info!("no places match");
        return Ok(SearchOutcome {
            engine,
            cards: Vec::new(),
        });
    }

    let mut seeded = engine.with_cache(CandidateCache::seeded(candidates));
    let cards: Vec<RecommendationCard> = seeded
        .rank(&config.preferences, &context)
        .into_iter()
        .take(config.max_results.unwrap_or(usize::MAX))
        .collect();
    log::info!("{} recommendations", cards.len());
    Ok(SearchOutcome {
        engine: seeded,
        cards,
    })
}

fn candidate_query(origin: Coord<f64>, config: &SearchConfig) -> CandidateQuery {
    let query = CandidateQuery::new(origin, config.preferences.clone());
    match &config.search_term {
        Some(term) => query.with_search_term(term.as_str()),
        None => query,
    }
}

fn locate(engine: &RecommendationEngine, origin: &Origin) -> Result<Coord<f64>, CliError> {
    match origin {
        Origin::Coordinates(point) => Ok(*point),
        Origin::Address(address) => engine.integration().geocode(address)?.ok_or_else(|| {
            CliError::AddressNotFound {
                address: address.clone(),
            }
        }),
    }
}

/// Write `value` to `writer` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
