//! Behavioural tests for itineraries and travel estimates.
#![expect(
    clippy::expect_used,
    reason = "tests fail fast when fixtures are malformed"
)]

use std::cell::{Cell, RefCell};

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use wayfarer_core::{
    Eta, Itinerary, ItineraryPlanner, NearbyStopsPlanner, Preferences, RecommendationCard,
    RouteRequest, SingleStopPlanner, TransportMode, estimate_etas,
    geodesy::lat_lng,
    travel_time::eta_for_distance,
};

/// Shared state for itinerary scenarios.
#[derive(Default)]
struct ItineraryWorld {
    selected: RefCell<Option<RecommendationCard>>,
    candidates: RefCell<Vec<RecommendationCard>>,
    itinerary: RefCell<Option<Itinerary>>,
    distance_metres: Cell<f64>,
    request: RefCell<RouteRequest>,
    etas: RefCell<Vec<Eta>>,
}

impl ItineraryWorld {
    fn plan_with(&self, planner: &dyn ItineraryPlanner) {
        let selected = self.selected.borrow();
        let card = selected.as_ref().expect("a card should be selected");
        let itinerary = planner.plan(&Preferences::default(), card, &self.candidates.borrow());
        self.itinerary.replace(Some(itinerary));
    }

    fn itinerary(&self) -> Itinerary {
        self.itinerary
            .borrow()
            .clone()
            .expect("an itinerary should be built")
    }
}

#[fixture]
fn world() -> ItineraryWorld {
    ItineraryWorld::default()
}

fn card(id: &str, name: &str, latitude: f64, longitude: f64) -> RecommendationCard {
    RecommendationCard {
        place_id: id.to_owned(),
        name: name.to_owned(),
        rating: 4.8,
        distance_metres: 500.0,
        summary: String::new(),
        location: lat_lng(latitude, longitude),
        score: 0.0,
    }
}

#[given("a CN Tower card rated 4.8 at 500 metres")]
fn given_tower(world: &ItineraryWorld) {
    world
        .selected
        .replace(Some(card("poi_001", "CN Tower", 43.6426, -79.3871)));
}

#[given("three other candidates nearby")]
fn given_neighbours(world: &ItineraryWorld) {
    world.candidates.replace(vec![
        card("poi_009", "Ripley's Aquarium", 43.6424, -79.3860),
        card("poi_010", "Rogers Centre", 43.6414, -79.3894),
        card("poi_003", "French Bistro", 43.6487, -79.3850),
    ]);
}

#[given("a walk of 1000 metres")]
fn given_walk(world: &ItineraryWorld) {
    world.distance_metres.set(1_000.0);
}

#[given("a route request without an origin")]
fn given_no_origin(world: &ItineraryWorld) {
    world.request.replace(RouteRequest {
        origin: None,
        destinations: Some(vec![lat_lng(43.6426, -79.3871)]),
        mode: Some(TransportMode::Walking),
    });
}

#[when("the standard itinerary is built")]
fn build_standard(world: &ItineraryWorld) {
    world.plan_with(&SingleStopPlanner::default());
}

#[when("the multi-stop itinerary is built")]
fn build_multi_stop(world: &ItineraryWorld) {
    world.plan_with(&NearbyStopsPlanner::default());
}

#[when("the travel time is estimated")]
fn estimate_walk(world: &ItineraryWorld) {
    let eta = eta_for_distance(world.distance_metres.get(), TransportMode::Walking);
    world.etas.replace(vec![eta]);
}

#[when("the route is estimated")]
fn estimate_route(world: &ItineraryWorld) {
    let etas = estimate_etas(&world.request.borrow());
    world.etas.replace(etas);
}

#[then("the first step names the CN Tower")]
fn then_first_step(world: &ItineraryWorld) {
    let itinerary = world.itinerary();
    let first = itinerary.steps.first().expect("at least one step");
    assert!(first.contains("CN Tower"), "unexpected first step {first}");
}

#[then("the second step reports a rating of 4.8/5.0")]
fn then_rating(world: &ItineraryWorld) {
    let itinerary = world.itinerary();
    let second = itinerary.steps.get(1).expect("at least two steps");
    assert!(second.contains("4.8/5.0"), "unexpected second step {second}");
}

#[then("the plan takes 90 minutes")]
fn then_ninety(world: &ItineraryWorld) {
    assert_eq!(world.itinerary().total_minutes, 90);
}

#[then("the plan visits more than one place")]
fn then_several_places(world: &ItineraryWorld) {
    let visits = world
        .itinerary()
        .steps
        .iter()
        .filter(|step| step.trim_start().starts_with("Rating:"))
        .count();
    assert_eq!(visits, 4);
}

#[then("the plan takes longer than 90 minutes")]
fn then_longer(world: &ItineraryWorld) {
    assert!(world.itinerary().total_minutes > 90);
}

#[then("the estimate is 12 minutes")]
fn then_twelve(world: &ItineraryWorld) {
    let etas = world.etas.borrow();
    assert_eq!(etas.first().map(|eta| eta.duration_minutes), Some(12));
}

#[then("no estimates are returned")]
fn then_no_estimates(world: &ItineraryWorld) {
    assert!(world.etas.borrow().is_empty());
}

#[scenario(path = "tests/features/itinerary.feature", index = 0)]
fn single_stop_plan(world: ItineraryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/itinerary.feature", index = 1)]
fn multi_stop_plan(world: ItineraryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/itinerary.feature", index = 2)]
fn walking_kilometre(world: ItineraryWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/itinerary.feature", index = 3)]
fn route_without_origin(world: ItineraryWorld) {
    let _ = world;
}
