//! Test helpers for composing CLI workspaces and stub providers.

use super::*;
use crate::search::{PlaceSourceBuilder, SearchConfig};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use wayfarer_core::{
    Integration, MemoryPlaceSource,
    test_support::{CountingPlaceSource, FailingPlaceSource, toronto_pois},
};

/// Latitude of Toronto City Hall.
pub(super) const CITY_HALL_LAT: f64 = 43.6532;
/// Longitude of Toronto City Hall.
pub(super) const CITY_HALL_LNG: f64 = -79.3832;

/// A temporary directory that cleans up after the test.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write the Toronto sample places to `places.db` and return its path.
    #[cfg(feature = "store-sqlite")]
    pub(super) fn places_database(&self) -> Utf8PathBuf {
        let path = self.root.join("places.db");
        wayfarer_core::write_places_database(path.as_std_path(), &toronto_pois())
            .expect("persist places");
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write file");
}

/// Serves the Toronto sample places from memory, ignoring the database path.
pub(super) struct MemoryPlaceSourceBuilder;

impl PlaceSourceBuilder for MemoryPlaceSourceBuilder {
    fn build(&self, _config: &SearchConfig) -> Result<Integration, CliError> {
        Ok(Integration::standard(MemoryPlaceSource::new(toronto_pois())))
    }
}

/// Wires a place source that always fails.
pub(super) struct FailingPlaceSourceBuilder;

impl PlaceSourceBuilder for FailingPlaceSourceBuilder {
    fn build(&self, _config: &SearchConfig) -> Result<Integration, CliError> {
        Ok(Integration::standard(FailingPlaceSource))
    }
}

/// Serves the Toronto sample places and counts searches through `source`.
pub(super) struct CountingPlaceSourceBuilder {
    pub(super) source: CountingPlaceSource,
}

impl CountingPlaceSourceBuilder {
    pub(super) fn new() -> Self {
        Self {
            source: CountingPlaceSource::new(toronto_pois()),
        }
    }
}

impl PlaceSourceBuilder for CountingPlaceSourceBuilder {
    fn build(&self, _config: &SearchConfig) -> Result<Integration, CliError> {
        Ok(Integration::standard(self.source.clone()))
    }
}
