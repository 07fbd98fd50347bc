//! Focused unit tests covering CLI configuration and command execution.

use super::helpers::{
    CITY_HALL_LAT, CITY_HALL_LNG, CountingPlaceSourceBuilder, FailingPlaceSourceBuilder,
    MemoryPlaceSourceBuilder, Workspace, write_utf8,
};
use super::*;
use crate::{
    itinerary::{ItineraryArgs, PlanConfig, run_itinerary_with},
    recommend::{RecommendArgs, run_recommend_with},
    search::{Origin, SearchConfig},
};
use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use wayfarer_core::{Budget, TransportMode, geodesy::lat_lng};

#[fixture]
fn workspace() -> Workspace {
    Workspace::new()
}

/// Arguments pointing at a placeholder database file, searching from City Hall.
fn city_hall_args(workspace: &Workspace) -> RecommendArgs {
    let places = workspace.root().join("places.db");
    write_utf8(&places, b"placeholder");
    RecommendArgs {
        places: Some(places),
        lat: Some(CITY_HALL_LAT),
        lng: Some(CITY_HALL_LNG),
        ..RecommendArgs::default()
    }
}

fn recommend_json(args: RecommendArgs) -> serde_json::Value {
    let mut buffer = Vec::new();
    run_recommend_with(args, &MemoryPlaceSourceBuilder, &mut buffer).expect("recommend succeeds");
    serde_json::from_slice(&buffer).expect("output is JSON")
}

fn names(cards: &serde_json::Value) -> Vec<String> {
    cards
        .as_array()
        .expect("cards array")
        .iter()
        .map(|card| card["name"].as_str().expect("card name").to_owned())
        .collect()
}

#[rstest]
fn converting_recommend_without_places_errors() {
    let args = RecommendArgs {
        lat: Some(CITY_HALL_LAT),
        lng: Some(CITY_HALL_LNG),
        ..RecommendArgs::default()
    };
    let err = SearchConfig::try_from(args).expect_err("missing places should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLACES);
            assert_eq!(env, ENV_RECOMMEND_PLACES);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case::latitude_only(Some(CITY_HALL_LAT), None, ARG_LONGITUDE)]
#[case::longitude_only(None, Some(CITY_HALL_LNG), ARG_LATITUDE)]
#[case::nothing(None, None, ARG_LATITUDE)]
fn converting_without_a_full_location_errors(
    #[case] lat: Option<f64>,
    #[case] lng: Option<f64>,
    #[case] expected: &'static str,
) {
    let args = RecommendArgs {
        places: Some(Utf8PathBuf::from("places.db")),
        lat,
        lng,
        ..RecommendArgs::default()
    };
    match SearchConfig::try_from(args).expect_err("incomplete location should error") {
        CliError::MissingArgument { field, .. } => assert_eq!(field, expected),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn address_is_used_without_coordinates() {
    let args = RecommendArgs {
        places: Some(Utf8PathBuf::from("places.db")),
        address: Some("  290 Bremner Blvd, Toronto ".to_owned()),
        ..RecommendArgs::default()
    };
    let config = SearchConfig::try_from(args).expect("config should build");
    assert_eq!(
        config.origin,
        Origin::Address("290 Bremner Blvd, Toronto".to_owned())
    );
}

#[rstest]
fn coordinates_take_precedence_over_address() {
    let args = RecommendArgs {
        places: Some(Utf8PathBuf::from("places.db")),
        lat: Some(CITY_HALL_LAT),
        lng: Some(CITY_HALL_LNG),
        address: Some("290 Bremner Blvd, Toronto".to_owned()),
        ..RecommendArgs::default()
    };
    let config = SearchConfig::try_from(args).expect("config should build");
    assert_eq!(
        config.origin,
        Origin::Coordinates(lat_lng(CITY_HALL_LAT, CITY_HALL_LNG))
    );
}

#[rstest]
#[case(95.0, 0.0)]
#[case(0.0, -181.0)]
#[case(f64::NAN, 0.0)]
fn invalid_coordinates_are_rejected(#[case] lat: f64, #[case] lng: f64) {
    let args = RecommendArgs {
        places: Some(Utf8PathBuf::from("places.db")),
        lat: Some(lat),
        lng: Some(lng),
        ..RecommendArgs::default()
    };
    assert!(matches!(
        SearchConfig::try_from(args),
        Err(CliError::InvalidCoordinate { .. })
    ));
}

#[rstest]
fn preferences_are_parsed_leniently() {
    let args = RecommendArgs {
        places: Some(Utf8PathBuf::from("places.db")),
        lat: Some(CITY_HALL_LAT),
        lng: Some(CITY_HALL_LNG),
        interests: Some(vec![" museum ".to_owned(), String::new()]),
        budget: Some("LOW".to_owned()),
        radius: Some(0),
        transport: Some("Driving".to_owned()),
        max_results: Some(0),
        search: Some("   ".to_owned()),
        ..RecommendArgs::default()
    };
    let config = SearchConfig::try_from(args).expect("config should build");
    assert_eq!(config.preferences.interests, vec!["museum".to_owned()]);
    assert_eq!(config.preferences.budget, Some(Budget::Low));
    assert_eq!(config.preferences.radius_metres, 2_000);
    assert_eq!(config.preferences.transport_mode, TransportMode::Driving);
    assert_eq!(config.max_results, None);
    assert_eq!(config.search_term, None);
}

#[rstest]
#[case("lavish", Budget::Unrestricted)]
#[case("Medium", Budget::Medium)]
fn unknown_budgets_are_unrestricted(#[case] label: &str, #[case] expected: Budget) {
    let args = RecommendArgs {
        places: Some(Utf8PathBuf::from("places.db")),
        lat: Some(CITY_HALL_LAT),
        lng: Some(CITY_HALL_LNG),
        budget: Some(label.to_owned()),
        ..RecommendArgs::default()
    };
    let config = SearchConfig::try_from(args).expect("config should build");
    assert_eq!(config.preferences.budget, Some(expected));
}

#[rstest]
fn itinerary_requires_a_place_id() {
    let args = ItineraryArgs {
        places: Some(Utf8PathBuf::from("places.db")),
        lat: Some(CITY_HALL_LAT),
        lng: Some(CITY_HALL_LNG),
        place_id: Some("  ".to_owned()),
        ..ItineraryArgs::default()
    };
    match PlanConfig::try_from(args).expect_err("blank place id should error") {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLACE_ID);
            assert_eq!(env, ENV_ITINERARY_PLACE_ID);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn itinerary_reports_its_own_environment_variables() {
    let args = ItineraryArgs {
        place_id: Some("poi_001".to_owned()),
        ..ItineraryArgs::default()
    };
    match PlanConfig::try_from(args).expect_err("missing places should error") {
        CliError::MissingArgument { env, .. } => assert_eq!(env, ENV_ITINERARY_PLACES),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn require_existing_reports_missing_files(workspace: Workspace) {
    let path = workspace.root().join("absent.db");
    match crate::fs::require_existing(&path, ARG_PLACES).expect_err("missing file") {
        CliError::MissingSourceFile { field, path: reported } => {
            assert_eq!(field, ARG_PLACES);
            assert_eq!(reported, path);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn require_existing_rejects_directories(workspace: Workspace) {
    let path = workspace.root().join("places.db");
    std::fs::create_dir(path.as_std_path()).expect("create directory");
    assert!(matches!(
        crate::fs::require_existing(&path, ARG_PLACES),
        Err(CliError::SourcePathNotFile { .. })
    ));
}

#[rstest]
fn recommend_prints_ranked_cards(workspace: Workspace) {
    let cards = recommend_json(city_hall_args(&workspace));
    let scores: Vec<f64> = cards
        .as_array()
        .expect("cards array")
        .iter()
        .map(|card| card["score"].as_f64().expect("score"))
        .collect();
    assert_eq!(scores.len(), 7);
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[rstest]
fn recommend_applies_search_term_and_limit(workspace: Workspace) {
    let searched = recommend_json(RecommendArgs {
        search: Some("MARKET".to_owned()),
        ..city_hall_args(&workspace)
    });
    let mut found = names(&searched);
    found.sort();
    assert_eq!(found, vec!["Kensington Market", "St. Lawrence Market"]);

    let limited = recommend_json(RecommendArgs {
        max_results: Some(3),
        ..city_hall_args(&workspace)
    });
    assert_eq!(names(&limited).len(), 3);
}

#[rstest]
fn searching_queries_the_place_source_once(workspace: Workspace) {
    let builder = CountingPlaceSourceBuilder::new();
    let args = RecommendArgs {
        search: Some("market".to_owned()),
        ..city_hall_args(&workspace)
    };
    let mut buffer = Vec::new();
    run_recommend_with(args, &builder, &mut buffer).expect("recommend succeeds");
    assert_eq!(builder.source.calls(), 1);
    let cards: serde_json::Value = serde_json::from_slice(&buffer).expect("output is JSON");
    assert_eq!(names(&cards).len(), 2);
}

#[rstest]
fn unmatched_search_term_prints_no_cards(workspace: Workspace) {
    let builder = CountingPlaceSourceBuilder::new();
    let args = RecommendArgs {
        search: Some("aquarium".to_owned()),
        ..city_hall_args(&workspace)
    };
    let mut buffer = Vec::new();
    run_recommend_with(args, &builder, &mut buffer).expect("recommend succeeds");
    assert_eq!(builder.source.calls(), 1);
    let cards: serde_json::Value = serde_json::from_slice(&buffer).expect("output is JSON");
    assert_eq!(cards.as_array().map(Vec::len), Some(0));
}

#[rstest]
fn failing_place_source_surfaces_acquisition_error(workspace: Workspace) {
    let mut buffer = Vec::new();
    let err = run_recommend_with(
        city_hall_args(&workspace),
        &FailingPlaceSourceBuilder,
        &mut buffer,
    )
    .expect_err("failing source should error");
    assert!(matches!(err, CliError::Acquisition(_)), "found {err:?}");
    assert!(buffer.is_empty());
}

#[rstest]
fn failing_geocoder_surfaces_provider_error(workspace: Workspace) {
    let args = RecommendArgs {
        lat: None,
        lng: None,
        address: Some("290 Bremner Blvd, Toronto".to_owned()),
        ..city_hall_args(&workspace)
    };
    let mut buffer = Vec::new();
    let err = run_recommend_with(args, &FailingPlaceSourceBuilder, &mut buffer)
        .expect_err("failing geocoder should error");
    assert!(matches!(err, CliError::Provider(_)), "found {err:?}");
}

#[rstest]
fn itinerary_rejects_cards_outside_the_results(workspace: Workspace) {
    let base = city_hall_args(&workspace);
    let args = ItineraryArgs {
        places: base.places,
        lat: base.lat,
        lng: base.lng,
        interests: Some(vec!["museum".to_owned()]),
        place_id: Some("poi_001".to_owned()),
        ..ItineraryArgs::default()
    };
    let mut buffer = Vec::new();
    match run_itinerary_with(args, &MemoryPlaceSourceBuilder, &mut buffer)
        .expect_err("CN Tower is not a museum")
    {
        CliError::CardNotFound { place_id } => assert_eq!(place_id, "poi_001"),
        other => panic!("expected CardNotFound, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "lat": "north" }));

    let err = crate::recommend::config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "places": "from-file.db",
            "radius": 500,
            "transport": "transit",
        }),
        None,
    );
    composer.push_environment(json!({
        "lat": CITY_HALL_LAT,
        "lng": CITY_HALL_LNG,
        "radius": 1_000,
    }));
    composer.push_cli(json!({ "radius": 1_500 }));

    let config = crate::recommend::config_from_layers_for_test(composer.layers())
        .expect("merged config should build");
    assert_eq!(config.places, Utf8PathBuf::from("from-file.db"));
    assert_eq!(
        config.origin,
        Origin::Coordinates(lat_lng(CITY_HALL_LAT, CITY_HALL_LNG))
    );
    assert_eq!(config.preferences.radius_metres, 1_500);
    assert_eq!(config.preferences.transport_mode, TransportMode::Transit);
}

#[rstest]
fn itinerary_layers_carry_the_multi_stop_flag() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "places": "places.db",
            "lat": CITY_HALL_LAT,
            "lng": CITY_HALL_LNG,
            "multi_stop": true,
        }),
        None,
    );
    composer.push_cli(json!({ "place_id": "poi_001" }));

    let config = crate::itinerary::config_from_layers_for_test(composer.layers())
        .expect("merged config should build");
    assert_eq!(config.place_id, "poi_001");
    assert!(config.multi_stop);
}
