//! Property-based tests for acquisition, ranking and travel estimates.
//!
//! # Invariants tested
//!
//! - **Distance:** haversine distance is zero to itself and symmetric.
//! - **Radius:** acquired places never lie beyond the search radius.
//! - **Budget:** acquired places never cost more than the budget allows.
//! - **Interests:** blank interests never narrow the pool.
//! - **Ranking:** scores are bounded and never increase down the list.
//! - **ETAs:** a longer walk never takes less time.
#![expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating point distances and scores"
)]


use proptest::prelude::*;
use wayfarer_core::{
    Context, Integration, MemoryPlaceSource, Preferences, RecommendationEngine, TransportMode,
    acquisition::{filter_candidates, matches_interests, within_radius},
    geodesy::{haversine_distance, lat_lng},
    scorer::MAX_SCORE,
    test_support::DOWNTOWN_TORONTO,
    travel_time::eta_for_distance,
};

use proptest_support::{budget_strategy, poi_pool_strategy};

fn coordinate_strategy() -> impl Strategy<Value = (f64, f64)> {
    (-80.0_f64..80.0_f64, -179.0_f64..179.0_f64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: a point is zero metres from itself.
    #[test]
    fn distance_to_self_is_zero((lat, lng) in coordinate_strategy()) {
        let point = lat_lng(lat, lng);
        prop_assert!(haversine_distance(point, point).abs() < 1e-6);
    }

    /// Property: distance does not depend on direction.
    #[test]
    fn distance_is_symmetric(
        (lat_a, lng_a) in coordinate_strategy(),
        (lat_b, lng_b) in coordinate_strategy(),
    ) {
        let a = lat_lng(lat_a, lng_a);
        let b = lat_lng(lat_b, lng_b);
        let forward = haversine_distance(a, b);
        let backward = haversine_distance(b, a);
        prop_assert!(forward >= 0.0);
        prop_assert!((forward - backward).abs() < 1e-6);
    }

    /// Property: every acquired place lies within the radius.
    #[test]
    fn acquired_places_are_within_radius(
        pool in poi_pool_strategy(0, 20),
        radius in 100_u32..=10_000_u32,
    ) {
        let prefs = Preferences::default().with_radius_metres(radius);
        for poi in filter_candidates(pool, DOWNTOWN_TORONTO, &prefs) {
            prop_assert!(within_radius(&poi, DOWNTOWN_TORONTO, radius));
        }
    }

    /// Property: every acquired place with a price fits the budget.
    #[test]
    fn acquired_places_fit_the_budget(
        pool in poi_pool_strategy(0, 20),
        budget in budget_strategy(),
    ) {
        let mut prefs = Preferences::default().with_radius_metres(20_000);
        prefs.budget = budget;
        let acquired = filter_candidates(pool, DOWNTOWN_TORONTO, &prefs);
        if let Some(limit) = budget {
            for poi in &acquired {
                prop_assert!(poi.price_tier.is_none_or(|tier| limit.admits(tier)));
            }
        }
    }

    /// Property: blank interests match every place.
    #[test]
    fn blank_interests_never_filter(
        pool in poi_pool_strategy(0, 20),
        blanks in proptest::collection::vec("[ \t]{0,3}", 0..3),
    ) {
        for poi in &pool {
            prop_assert!(matches_interests(poi, &blanks));
        }
    }

    /// Property: ranked scores are bounded and non-increasing.
    #[test]
    fn ranking_is_ordered_and_bounded(
        pool in poi_pool_strategy(1, 20),
        radius in 500_u32..=10_000_u32,
    ) {
        let mut engine =
            RecommendationEngine::new(Integration::standard(MemoryPlaceSource::new(pool)));
        let prefs = Preferences::default().with_radius_metres(radius);
        let context = Context::now(Some(DOWNTOWN_TORONTO), None);
        let ranked = engine.rank(&prefs, &context);
        for card in &ranked {
            prop_assert!((0.0..=MAX_SCORE).contains(&card.score));
        }
        prop_assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    /// Property: walking further never takes less time.
    #[test]
    fn eta_grows_with_distance(
        near in 0.0_f64..20_000.0_f64,
        extra in 0.0_f64..20_000.0_f64,
    ) {
        let short = eta_for_distance(near, TransportMode::Walking);
        let long = eta_for_distance(near + extra, TransportMode::Walking);
        prop_assert!(short.duration_minutes <= long.duration_minutes);
    }
}
