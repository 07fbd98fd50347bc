//! Sample data and instrumented place sources for unit and behaviour tests.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use geo::Coord;

use crate::{
    MemoryPlaceSource, PlaceSource, PointOfInterest, Preferences, PriceTier, ProviderError,
    geodesy::lat_lng,
    integration::PLACES_SERVICE,
};

/// Where the sample user stands: Toronto City Hall.
pub const DOWNTOWN_TORONTO: Coord<f64> = lat_lng(43.6532, -79.3832);

struct Sample {
    id: &'static str,
    name: &'static str,
    latitude: f64,
    longitude: f64,
    category: &'static str,
    rating: f32,
    price: PriceTier,
    tags: &'static [&'static str],
    address: &'static str,
}

const SAMPLES: &[Sample] = &[
    Sample {
        id: "poi_001",
        name: "CN Tower",
        latitude: 43.6426,
        longitude: -79.3871,
        category: "landmark",
        rating: 4.7,
        price: PriceTier::Expensive,
        tags: &["observation", "iconic", "views"],
        address: "290 Bremner Blvd, Toronto",
    },
    Sample {
        id: "poi_002",
        name: "Pasta Palace",
        latitude: 43.6529,
        longitude: -79.3849,
        category: "restaurant",
        rating: 4.5,
        price: PriceTier::Moderate,
        tags: &["italian", "pasta"],
        address: "123 Queen St W, Toronto",
    },
    Sample {
        id: "poi_003",
        name: "French Bistro",
        latitude: 43.6487,
        longitude: -79.3850,
        category: "restaurant",
        rating: 4.6,
        price: PriceTier::VeryExpensive,
        tags: &["french", "fine-dining"],
        address: "45 King St W, Toronto",
    },
    Sample {
        id: "poi_004",
        name: "High Park",
        latitude: 43.6465,
        longitude: -79.4637,
        category: "park",
        rating: 4.6,
        price: PriceTier::Inexpensive,
        tags: &["outdoor", "nature", "family-friendly"],
        address: "1873 Bloor St W, Toronto",
    },
    Sample {
        id: "poi_005",
        name: "Art Gallery of Ontario",
        latitude: 43.6536,
        longitude: -79.3925,
        category: "art_gallery",
        rating: 4.7,
        price: PriceTier::Moderate,
        tags: &["art", "indoor"],
        address: "317 Dundas St W, Toronto",
    },
    Sample {
        id: "poi_006",
        name: "Kensington Market",
        latitude: 43.6547,
        longitude: -79.4005,
        category: "market",
        rating: 4.4,
        price: PriceTier::Inexpensive,
        tags: &["shopping", "street-food", "vintage"],
        address: "Kensington Ave, Toronto",
    },
    Sample {
        id: "poi_007",
        name: "St. Lawrence Market",
        latitude: 43.6487,
        longitude: -79.3716,
        category: "market",
        rating: 4.6,
        price: PriceTier::Inexpensive,
        tags: &["food", "shopping"],
        address: "93 Front St E, Toronto",
    },
    Sample {
        id: "poi_011",
        name: "Royal Ontario Museum",
        latitude: 43.6677,
        longitude: -79.3948,
        category: "museum",
        rating: 4.8,
        price: PriceTier::Moderate,
        tags: &["history", "indoor", "family-friendly"],
        address: "100 Queens Park, Toronto",
    },
];

/// A fixed set of downtown Toronto places.
///
/// Within 2 km of [`DOWNTOWN_TORONTO`] lie everything except High Park. The
/// only museum is the Royal Ontario Museum, priced `$$`; the French Bistro
/// is a `$$$$` restaurant.
///
/// # Panics
/// Never; every sample is valid.
#[must_use]
#[expect(
    clippy::expect_used,
    reason = "sample data is static and validated by tests"
)]
pub fn toronto_pois() -> Vec<PointOfInterest> {
    SAMPLES
        .iter()
        .map(|sample| {
            PointOfInterest::new(
                sample.id,
                sample.name,
                lat_lng(sample.latitude, sample.longitude),
                sample.category,
                sample.rating,
            )
            .expect("sample POI is valid")
            .with_price_tier(sample.price)
            .with_tags(sample.tags.iter().copied())
            .with_open_now(true)
            .with_address(sample.address)
        })
        .collect()
}

/// Place source that counts how often it is searched.
///
/// Clones share the counter, so a test can hand one clone to an engine and
/// keep another to read [`CountingPlaceSource::calls`].
#[derive(Debug, Clone, Default)]
pub struct CountingPlaceSource {
    inner: MemoryPlaceSource,
    calls: Arc<AtomicUsize>,
}

impl CountingPlaceSource {
    /// Count searches over `pois`.
    #[must_use]
    pub fn new<I>(pois: I) -> Self
    where
        I: IntoIterator<Item = PointOfInterest>,
    {
        Self {
            inner: MemoryPlaceSource::new(pois),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Searches served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PlaceSource for CountingPlaceSource {
    fn search_places(
        &self,
        location: Coord<f64>,
        preferences: &Preferences,
    ) -> Result<Vec<PointOfInterest>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.search_places(location, preferences)
    }

    fn geocode(&self, address: &str) -> Result<Option<Coord<f64>>, ProviderError> {
        self.inner.geocode(address)
    }
}

/// Place source whose every call fails as unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingPlaceSource;

impl FailingPlaceSource {
    fn outage() -> ProviderError {
        ProviderError::Unavailable {
            service: PLACES_SERVICE,
            message: "simulated outage".to_owned(),
        }
    }
}

impl PlaceSource for FailingPlaceSource {
    fn search_places(
        &self,
        _location: Coord<f64>,
        _preferences: &Preferences,
    ) -> Result<Vec<PointOfInterest>, ProviderError> {
        Err(Self::outage())
    }

    fn geocode(&self, _address: &str) -> Result<Option<Coord<f64>>, ProviderError> {
        Err(Self::outage())
    }
}
