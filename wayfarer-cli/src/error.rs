//! Error types emitted by the Wayfarer CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use wayfarer_core::{AcquisitionError, ProviderError};

/// Errors emitted by the Wayfarer CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without the leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        /// Cargo feature that would enable the operation.
        feature: &'static str,
        /// What the user asked for.
        action: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag that named the path.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag that named the path.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag that named the path.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The supplied coordinates are not a valid position.
    #[error("latitude {latitude} and longitude {longitude} are not a valid position")]
    InvalidCoordinate {
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
    /// The places database does not know the supplied address.
    #[error("address {address:?} could not be found")]
    AddressNotFound {
        /// Address as given.
        address: String,
    },
    /// Opening the places database failed.
    #[cfg(feature = "store-sqlite")]
    #[error(transparent)]
    OpenPlaces(#[from] wayfarer_core::SqlitePlaceSourceError),
    /// The place source failed while answering a lookup.
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// Fetching candidate places failed.
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),
    /// The requested place is not among the recommendations.
    #[error("place {place_id} is not among the current recommendations")]
    CardNotFound {
        /// Identifier as given.
        place_id: String,
    },
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
