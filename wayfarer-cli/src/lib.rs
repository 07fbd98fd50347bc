//! Command-line interface for querying Wayfarer recommendations offline.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod itinerary;
mod recommend;
mod search;

pub use error::CliError;

use itinerary::{ItineraryArgs, run_itinerary};
use recommend::{RecommendArgs, run_recommend};

pub(crate) const ARG_PLACES: &str = "places";
pub(crate) const ARG_LATITUDE: &str = "lat";
pub(crate) const ARG_LONGITUDE: &str = "lng";
pub(crate) const ARG_ADDRESS: &str = "address";
pub(crate) const ARG_INTERESTS: &str = "interests";
pub(crate) const ARG_BUDGET: &str = "budget";
pub(crate) const ARG_RADIUS: &str = "radius";
pub(crate) const ARG_TRANSPORT: &str = "transport";
pub(crate) const ARG_MAX_RESULTS: &str = "max-results";
pub(crate) const ARG_SEARCH: &str = "search";
pub(crate) const ARG_PLACE_ID: &str = "place-id";
pub(crate) const ARG_MULTI_STOP: &str = "multi-stop";

pub(crate) const ENV_RECOMMEND_PLACES: &str = "WAYFARER_CMDS_RECOMMEND_PLACES";
pub(crate) const ENV_RECOMMEND_LATITUDE: &str = "WAYFARER_CMDS_RECOMMEND_LAT";
pub(crate) const ENV_RECOMMEND_LONGITUDE: &str = "WAYFARER_CMDS_RECOMMEND_LNG";
pub(crate) const ENV_ITINERARY_PLACES: &str = "WAYFARER_CMDS_ITINERARY_PLACES";
pub(crate) const ENV_ITINERARY_LATITUDE: &str = "WAYFARER_CMDS_ITINERARY_LAT";
pub(crate) const ENV_ITINERARY_LONGITUDE: &str = "WAYFARER_CMDS_ITINERARY_LNG";
pub(crate) const ENV_ITINERARY_PLACE_ID: &str = "WAYFARER_CMDS_ITINERARY_PLACE_ID";

/// Run the Wayfarer CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// places database cannot be used, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Recommend(args) => run_recommend(args),
        Command::Itinerary(args) => run_itinerary(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfarer",
    about = "Rank nearby places and plan short outings from a places database",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print ranked recommendations as JSON.
    Recommend(RecommendArgs),
    /// Print an itinerary for one recommended place as JSON.
    Itinerary(ItineraryArgs),
}

#[cfg(test)]
mod tests;
