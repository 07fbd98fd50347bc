//! Recommend command implementation for the Wayfarer CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ADDRESS, ARG_BUDGET, ARG_INTERESTS, ARG_LATITUDE, ARG_LONGITUDE, ARG_MAX_RESULTS,
    ARG_PLACES, ARG_RADIUS, ARG_SEARCH, ARG_TRANSPORT, CliError, ENV_RECOMMEND_LATITUDE,
    ENV_RECOMMEND_LONGITUDE, ENV_RECOMMEND_PLACES,
    search::{
        DefaultPlaceSourceBuilder, PlaceSourceBuilder, SearchConfig, SearchEnv, SearchFields,
        run_search, write_json,
    },
};

const RECOMMEND_ENV: SearchEnv = SearchEnv {
    places: ENV_RECOMMEND_PLACES,
    latitude: ENV_RECOMMEND_LATITUDE,
    longitude: ENV_RECOMMEND_LONGITUDE,
};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "recommend",
    long_about = "Rank the places around a position or address by rating, \
                 distance and budget fit. Values can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Rank nearby places"
)]
#[ortho_config(prefix = "WAYFARER")]
pub(crate) struct RecommendArgs {
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
    /// Print at most this many cards.
    #[arg(long = ARG_MAX_RESULTS, value_name = "n")]
    #[serde(default)]
    pub(crate) max_results: Option<usize>,
    /// Keep only places whose name or category contains this term.
    #[arg(long = ARG_SEARCH, value_name = "term")]
    #[serde(default)]
    pub(crate) search: Option<String>,
}

impl RecommendArgs {
    pub(crate) fn into_config(self) -> Result<SearchConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SearchConfig::try_from(merged)
    }
}

impl From<RecommendArgs> for SearchFields {
    fn from(args: RecommendArgs) -> Self {
        Self {
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
    }
}

impl TryFrom<RecommendArgs> for SearchConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        SearchFields::from(args).resolve(RECOMMEND_ENV)
    }
}

pub(super) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &DefaultPlaceSourceBuilder, &mut stdout)
}

pub(super) fn run_recommend_with(
    args: RecommendArgs,
    builder: &dyn PlaceSourceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_recommend_config(args)?;
    let outcome = run_search(&config, builder)?;
    write_json(writer, &outcome.cards)
}

fn resolve_recommend_config(args: RecommendArgs) -> Result<SearchConfig, CliError> {
    let config = args.into_config()?;
    crate::fs::require_existing(&config.places, ARG_PLACES)?;
    Ok(config)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SearchConfig, CliError> {
    let merged = RecommendArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SearchConfig::try_from(merged)
}
