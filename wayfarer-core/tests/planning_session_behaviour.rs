//! Behavioural tests for planning sessions.
#![expect(
    clippy::expect_used,
    reason = "tests fail fast when fixtures are malformed"
)]

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use wayfarer_core::{
    Budget, Context, Integration, Itinerary, PlanningSession, Preferences, PreferencesDelta,
    RecommendationCard, RecommendationEngine, SessionError,
    test_support::{CountingPlaceSource, DOWNTOWN_TORONTO, toronto_pois},
};

/// Shared state for session scenarios.
struct SessionWorld {
    source: CountingPlaceSource,
    session: RefCell<Option<PlanningSession>>,
    first_page: RefCell<Vec<RecommendationCard>>,
    latest_page: RefCell<Vec<RecommendationCard>>,
    selection: RefCell<Option<Result<Itinerary, SessionError>>>,
}

impl SessionWorld {
    fn with_session<R>(&self, f: impl FnOnce(&mut PlanningSession) -> R) -> R {
        let mut slot = self.session.borrow_mut();
        let session = slot.as_mut().expect("session should be created");
        f(session)
    }
}

#[fixture]
fn world() -> SessionWorld {
    SessionWorld {
        source: CountingPlaceSource::new(toronto_pois()),
        session: RefCell::new(None),
        first_page: RefCell::new(Vec::new()),
        latest_page: RefCell::new(Vec::new()),
        selection: RefCell::new(None),
    }
}

#[given("a session at City Hall with pages of 3 cards")]
fn given_session(world: &SessionWorld) {
    let engine = RecommendationEngine::new(Integration::standard(world.source.clone()));
    let context = Context::now(Some(DOWNTOWN_TORONTO), None);
    world
        .session
        .replace(Some(PlanningSession::new(engine, context).with_page_size(3)));
}

#[when("planning starts with no interests")]
fn start_planning(world: &SessionWorld) {
    let page = world.with_session(|session| session.start_planning(Preferences::default()));
    world.first_page.replace(page.clone());
    world.latest_page.replace(page);
}

#[when("more cards are requested")]
fn show_more(world: &SessionWorld) {
    let page = world.with_session(PlanningSession::show_more);
    world.latest_page.replace(page);
}

#[when("the card \"poi_999\" is selected")]
fn select_unknown(world: &SessionWorld) {
    let outcome = world.with_session(|session| session.select_card("poi_999"));
    world.selection.replace(Some(outcome));
}

#[when("the budget is refined to low")]
fn refine_budget(world: &SessionWorld) {
    let page = world
        .with_session(|session| {
            session.adjust_preferences(PreferencesDelta {
                budget: Some(Budget::Low),
                ..PreferencesDelta::default()
            })
        })
        .expect("planning has started");
    world.latest_page.replace(page);
}

#[then("3 cards are returned")]
fn then_three_cards(world: &SessionWorld) {
    assert_eq!(world.latest_page.borrow().len(), 3);
}

#[then("the session has served 1 request")]
fn then_one_request(world: &SessionWorld) {
    assert_eq!(world.with_session(|session| session.request_count()), 1);
}

#[then("the new page does not repeat the first page")]
fn then_no_repeats(world: &SessionWorld) {
    let first = world.first_page.borrow();
    let latest = world.latest_page.borrow();
    assert!(!latest.is_empty());
    assert!(
        latest
            .iter()
            .all(|card| first.iter().all(|seen| seen.place_id != card.place_id))
    );
}

#[then("the selection fails because the card is not recommended")]
fn then_not_found(world: &SessionWorld) {
    assert_eq!(
        world.selection.borrow().clone(),
        Some(Err(SessionError::CardNotFound {
            place_id: "poi_999".to_owned()
        }))
    );
}

#[then("every returned card is inexpensive")]
fn then_inexpensive(world: &SessionWorld) {
    let page = world.latest_page.borrow();
    assert!(!page.is_empty());
    assert!(
        page.iter()
            .all(|card| matches!(card.place_id.as_str(), "poi_006" | "poi_007"))
    );
}

#[then("the place source has been searched twice")]
fn then_searched_twice(world: &SessionWorld) {
    assert_eq!(world.source.calls(), 2);
}

#[scenario(path = "tests/features/planning_session.feature", index = 0)]
fn starting_returns_first_page(world: SessionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planning_session.feature", index = 1)]
fn show_more_continues(world: SessionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planning_session.feature", index = 2)]
fn unknown_card_is_reported(world: SessionWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planning_session.feature", index = 3)]
fn refining_budget_refetches(world: SessionWorld) {
    let _ = world;
}
