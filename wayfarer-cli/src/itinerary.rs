//! Itinerary command implementation for the Wayfarer CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfarer_core::{Itinerary, ItineraryPlanner, NearbyStopsPlanner, SingleStopPlanner};

use crate::{
    ARG_ADDRESS, ARG_BUDGET, ARG_INTERESTS, ARG_LATITUDE, ARG_LONGITUDE, ARG_MAX_RESULTS,
    ARG_MULTI_STOP, ARG_PLACE_ID, ARG_PLACES, ARG_RADIUS, ARG_SEARCH, ARG_TRANSPORT, CliError,
    ENV_ITINERARY_LATITUDE, ENV_ITINERARY_LONGITUDE, ENV_ITINERARY_PLACE_ID, ENV_ITINERARY_PLACES,
    search::{
        DefaultPlaceSourceBuilder, PlaceSourceBuilder, SearchConfig, SearchEnv, SearchFields,
        run_search, write_json,
    },
};

const ITINERARY_ENV: SearchEnv = SearchEnv {
    places: ENV_ITINERARY_PLACES,
    latitude: ENV_ITINERARY_LATITUDE,
    longitude: ENV_ITINERARY_LONGITUDE,
};

/// CLI arguments for the `itinerary` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "itinerary",
    long_about = "Rank places with the same flags as `recommend`, then plan \
                 a visit to the chosen place. With --multi-stop the plan \
                 continues to up to three nearby recommendations.",
    about = "Plan a visit to one recommended place"
)]
#[ortho_config(prefix = "WAYFARER")]
pub(crate) struct ItineraryArgs {
    /// Path to the SQLite places database.
    #[arg(long = ARG_PLACES, value_name = "path")]
    #[serde(default)]
    pub(crate) places: Option<Utf8PathBuf>,
    /// Latitude of the starting point in degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the starting point in degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Address to start from when no coordinates are given.
    #[arg(long = ARG_ADDRESS, value_name = "text")]
    #[serde(default)]
    pub(crate) address: Option<String>,
    /// Comma-separated interests, e.g. `museum,park`.
    #[arg(long = ARG_INTERESTS, value_name = "list", value_delimiter = ',')]
    #[serde(default)]
    pub(crate) interests: Option<Vec<String>>,
    /// Budget: low, medium or high. Anything else is unrestricted.
    #[arg(long = ARG_BUDGET, value_name = "level")]
    #[serde(default)]
    pub(crate) budget: Option<String>,
    /// Search radius in metres (default 2000).
    #[arg(long = ARG_RADIUS, value_name = "metres")]
    #[serde(default)]
    pub(crate) radius: Option<u32>,
    /// Transport mode: walking, driving or transit (default walking).
    #[arg(long = ARG_TRANSPORT, value_name = "mode")]
    #[serde(default)]
    pub(crate) transport: Option<String>,
    /// Only consider the first this many cards.
    #[arg(long = ARG_MAX_RESULTS, value_name = "n")]
    #[serde(default)]
    pub(crate) max_results: Option<usize>,
    /// Only consider places whose name or category contains this term.
    #[arg(long = ARG_SEARCH, value_name = "term")]
    #[serde(default)]
    pub(crate) search: Option<String>,
    /// Identifier of the recommended place to visit.
    #[arg(long = ARG_PLACE_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) place_id: Option<String>,
    /// Continue to nearby recommendations after the main stop.
    #[arg(long = ARG_MULTI_STOP, action = ArgAction::SetTrue)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) multi_stop: bool,
}

impl ItineraryArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `itinerary` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// How to find the recommendations to choose from.
    pub(crate) search: SearchConfig,
    /// Place to plan around.
    pub(crate) place_id: String,
    /// Whether to append nearby stops.
    pub(crate) multi_stop: bool,
}

impl TryFrom<ItineraryArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: ItineraryArgs) -> Result<Self, Self::Error> {
        let place_id = args
            .place_id
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_PLACE_ID,
                env: ENV_ITINERARY_PLACE_ID,
            })?;
        let multi_stop = args.multi_stop;
        let search = SearchFields {
            places: args.places,
            latitude: args.lat,
            longitude: args.lng,
            address: args.address,
            interests: args.interests,
            budget: args.budget,
            radius: args.radius,
            transport: args.transport,
            max_results: args.max_results,
            search: args.search,
        }
        .resolve(ITINERARY_ENV)?;
        Ok(Self {
            search,
            place_id,
            multi_stop,
        })
    }
}

pub(super) fn run_itinerary(args: ItineraryArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_itinerary_with(args, &DefaultPlaceSourceBuilder, &mut stdout)
}

pub(super) fn run_itinerary_with(
    args: ItineraryArgs,
    builder: &dyn PlaceSourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_itinerary_config(args)?;
    let itinerary = plan(&config, builder)?;
    write_json(writer, &itinerary)
}

fn resolve_itinerary_config(args: ItineraryArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    crate::fs::require_existing(&config.search.places, ARG_PLACES)?;
    Ok(config)
}

fn plan(config: &PlanConfig, builder: &dyn PlaceSourceBuilder) -> Result<Itinerary, CliError> {
    let outcome = run_search(&config.search, builder)?;
    let selected = outcome
        .cards
        .iter()
        .find(|card| card.place_id == config.place_id)
        .ok_or_else(|| CliError::CardNotFound {
            place_id: config.place_id.clone(),
        })?;
    let single = SingleStopPlanner::default();
    let nearby = NearbyStopsPlanner::default();
    let planner: &dyn ItineraryPlanner = if config.multi_stop {
        &nearby
    } else {
        &single
    };
    Ok(outcome
        .engine
        .build_itinerary_with(planner, &config.search.preferences, selected))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = ItineraryArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
