//! SQLite-backed place source.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use geo::Coord;
use rusqlite::{Connection, OpenFlags, Row, params};
use thiserror::Error;

use crate::{
    MemoryPlaceSource, PlaceSource, PointOfInterest, PointOfInterestError, Preferences, PriceTier,
    ProviderError, geodesy::lat_lng, integration::PLACES_SERVICE,
};

const CREATE_SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS pois (\
     poi_id TEXT PRIMARY KEY, \
     name TEXT, \
     category TEXT NOT NULL, \
     latitude REAL NOT NULL, \
     longitude REAL NOT NULL, \
     rating REAL NOT NULL DEFAULT 0, \
     price_level TEXT, \
     tags TEXT, \
     open_now INTEGER NOT NULL DEFAULT 0, \
     address TEXT)";

const SELECT_POIS_SQL: &str = "SELECT poi_id, name, category, latitude, longitude, rating, \
     price_level, tags, open_now, address FROM pois ORDER BY rowid";

const INSERT_POI_SQL: &str = "INSERT OR REPLACE INTO pois (poi_id, name, category, latitude, \
     longitude, rating, price_level, tags, open_now, address) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

/// Error raised when reading or writing the place database.
#[derive(Debug, Error)]
pub enum SqlitePlaceSourceError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// The stored tag payload was not a JSON array of strings.
    #[error("failed to decode tags for place {id}: {source}")]
    InvalidTags {
        /// Identifier of the place whose tags failed to decode.
        id: String,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A row described an invalid place.
    #[error("row for place {id} is invalid: {source}")]
    InvalidPoi {
        /// Identifier stored in the row.
        id: String,
        /// Validation failure.
        #[source]
        source: PointOfInterestError,
    },
    /// Generic SQLite error when reading or writing rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Place source answering from a snapshot of a SQLite `pois` table.
pub struct SqlitePlaceSource {
    path: PathBuf,
    places: MemoryPlaceSource,
}

impl fmt::Debug for SqlitePlaceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqlitePlaceSource")
            .field("path", &self.path)
            .field("entries", &self.places.len())
            .finish()
    }
}

impl SqlitePlaceSource {
    /// Open the database at `path` read-only and load every place.
    ///
    /// # Errors
    /// Returns [`SqlitePlaceSourceError`] when the file cannot be opened or a
    /// row cannot be decoded into a valid place.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SqlitePlaceSourceError> {
        let path = path.as_ref().to_path_buf();
        let places = load_places(&path)?;
        log::info!("loaded {} places from {}", places.len(), path.display());
        Ok(Self { path, places })
    }

    /// Reload the snapshot from disk, returning the new number of places.
    ///
    /// On failure the previous snapshot is kept.
    ///
    /// # Errors
    /// As for [`SqlitePlaceSource::open`].
    pub fn refresh(&mut self) -> Result<usize, SqlitePlaceSourceError> {
        self.places = load_places(&self.path)?;
        log::debug!("refreshed {} places from {}", self.places.len(), self.path.display());
        Ok(self.places.len())
    }

    /// Places in the current snapshot.
    #[must_use]
    pub fn pois(&self) -> &[PointOfInterest] {
        self.places.pois()
    }
}

impl PlaceSource for SqlitePlaceSource {
    fn search_places(
        &self,
        location: Coord<f64>,
        preferences: &Preferences,
    ) -> Result<Vec<PointOfInterest>, ProviderError> {
        self.places.search_places(location, preferences)
    }

    fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, ProviderError> {
        self.places.geocode(address)
    }
}

impl From<SqlitePlaceSourceError> for ProviderError {
    fn from(err: SqlitePlaceSourceError) -> Self {
        Self::Unavailable {
            service: PLACES_SERVICE,
            message: err.to_string(),
        }
    }
}

fn load_places(path: &Path) -> Result<MemoryPlaceSource, SqlitePlaceSourceError> {
    let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|source| SqlitePlaceSourceError::OpenDatabase {
            path: path.to_path_buf(),
            source,
        })?;
    let mut statement = connection.prepare(SELECT_POIS_SQL)?;
    let mut rows = statement.query([])?;
    let mut pois = Vec::new();
    while let Some(row) = rows.next()? {
        pois.push(decode_row(row)?);
    }
    Ok(MemoryPlaceSource::new(pois))
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "ratings are stored as REAL but validated to 0..=5"
)]
fn decode_row(row: &Row<'_>) -> Result<PointOfInterest, SqlitePlaceSourceError> {
    let id: String = row.get(0)?;
    let name: Option<String> = row.get(1)?;
    let category: String = row.get(2)?;
    let latitude: f64 = row.get(3)?;
    let longitude: f64 = row.get(4)?;
    let rating: f64 = row.get(5)?;
    let price_level: Option<String> = row.get(6)?;
    let tags_json: Option<String> = row.get(7)?;
    let open_now: bool = row.get(8)?;
    let address: Option<String> = row.get(9)?;

    let tags: Vec<String> = match tags_json.as_deref().map(str::trim) {
        None | Some("") => Vec::new(),
        Some(json) => serde_json::from_str(json).map_err(|source| {
            SqlitePlaceSourceError::InvalidTags {
                id: id.clone(),
                source,
            }
        })?,
    };

    let poi = PointOfInterest::new(
        id.clone(),
        name.unwrap_or_default(),
        lat_lng(latitude, longitude),
        category,
        rating as f32,
    )
    .map_err(|source| SqlitePlaceSourceError::InvalidPoi { id, source })?
    .with_tags(tags)
    .with_open_now(open_now);

    let with_price = match price_level.as_deref().map(str::parse::<PriceTier>) {
        Some(Ok(tier)) => poi.with_price_tier(tier),
        Some(Err(err)) => {
            log::debug!("ignoring price for place {}: {err}", poi.id);
            poi
        }
        None => poi,
    };
    Ok(match address {
        Some(text) => with_price.with_address(text),
        None => with_price,
    })
}

/// Create (or extend) the `pois` table at `path` and store `pois` in it.
///
/// Existing rows with the same identifier are replaced.
///
/// # Errors
/// Returns [`SqlitePlaceSourceError`] when the database cannot be opened or
/// written.
pub fn write_places_database(
    path: impl AsRef<Path>,
    pois: &[PointOfInterest],
) -> Result<(), SqlitePlaceSourceError> {
    let path = path.as_ref();
    let mut connection =
        Connection::open(path).map_err(|source| SqlitePlaceSourceError::OpenDatabase {
            path: path.to_path_buf(),
            source,
        })?;
    connection.execute_batch(CREATE_SCHEMA_SQL)?;
    let transaction = connection.transaction()?;
    {
        let mut insert = transaction.prepare(INSERT_POI_SQL)?;
        for poi in pois {
            let tags = serde_json::to_string(&poi.tags).map_err(|source| {
                SqlitePlaceSourceError::InvalidTags {
                    id: poi.id.clone(),
                    source,
                }
            })?;
            insert.execute(params![
                poi.id,
                poi.name,
                poi.category,
                poi.location.y,
                poi.location.x,
                f64::from(poi.rating),
                poi.price_tier.map(PriceTier::label),
                tags,
                poi.open_now,
                poi.address,
            ])?;
        }
    }
    transaction.commit()?;
    Ok(())
}
