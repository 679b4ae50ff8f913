//! Store flows driven through EffectStoreTestHarness
//!
//! Intents go in, effects are drained and asserted, and async completions
//! are fed back with `complete_action`.

use pretty_assertions::assert_eq;
use tui_dispatch::NumericComponentId;
use tui_dispatch::testing::*;
use worldwise::{
    action::Action,
    auth::{DEMO_EMAIL, DEMO_PASSWORD},
    cities::{City, Position},
    components::{Component, Root, RootProps},
    effect::Effect,
    geo::GeocodedPlace,
    reducer::reducer,
    route,
    state::AppState,
};

fn city(id: &str, name: &str, country: &str) -> City {
    City {
        id: id.into(),
        city_name: name.into(),
        country: country.into(),
        emoji: String::new(),
        date: "2024-01-01T00:00:00.000Z".into(),
        notes: String::new(),
        position: Position::new(38.72, -9.14),
    }
}

fn lisbon() -> GeocodedPlace {
    GeocodedPlace {
        city_name: "Lisbon".into(),
        country: "Portugal".into(),
        country_code: "PT".into(),
    }
}

/// Logged in on the city list with two cities loaded
fn signed_in() -> AppState {
    let mut state = AppState::new(route::CITIES);
    state.auth.login(DEMO_EMAIL, DEMO_PASSWORD);
    state.cities.cities = vec![
        city("1", "Lisbon", "Portugal"),
        city("2", "Porto", "Portugal"),
    ];
    state
}

// ============================================================================
// Cities store
// ============================================================================

#[test]
fn test_init_fetches_city_list() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.cities.is_loading);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchCities));

    harness.complete_action(Action::CitiesDidLoad(vec![city("1", "Lisbon", "Portugal")]));
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));

    harness.assert_state(|s| !s.cities.is_loading && s.cities.cities.len() == 1);
}

#[test]
fn test_get_city_twice_issues_one_request() {
    let mut harness = EffectStoreTestHarness::new(signed_in(), reducer);

    harness.dispatch_collect(Action::CityGet("1".into()));
    harness
        .drain_effects()
        .effects_first_matches(|e| matches!(e, Effect::FetchCity { id } if id == "1"));

    harness.complete_action(Action::CityDidLoad(city("1", "Lisbon", "Portugal")));
    harness.process_emitted();

    harness.dispatch_collect(Action::CityGet("1".into()));
    harness.drain_effects().effects_empty();
    harness.assert_state(|s| !s.cities.is_loading);
}

#[test]
fn test_create_appends_and_becomes_current() {
    let mut harness = EffectStoreTestHarness::new(signed_in(), reducer);

    harness.complete_action(Action::CityDidCreate(city("3", "Madrid", "Spain")));
    harness.process_emitted();

    harness.assert_state(|s| s.cities.cities.len() == 3);
    harness.assert_state(|s| s.cities.current_city_id() == Some("3"));
}

#[test]
fn test_delete_removes_city_and_clears_current() {
    let mut harness = EffectStoreTestHarness::new(signed_in(), reducer);
    harness.complete_action(Action::CityDidLoad(city("1", "Lisbon", "Portugal")));
    harness.process_emitted();

    harness.dispatch_collect(Action::CityDelete("2".into()));
    harness.assert_state(|s| s.cities.is_loading);
    harness
        .drain_effects()
        .effects_first_matches(|e| matches!(e, Effect::DeleteCity { id } if id == "2"));

    harness.complete_action(Action::CityDidDelete("2".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.cities.cities.len() == 1);
    harness.assert_state(|s| s.cities.current_city.is_none());
}

#[test]
fn test_rejection_keeps_list() {
    let mut harness = EffectStoreTestHarness::new(signed_in(), reducer);

    harness.dispatch_collect(Action::CityDelete("1".into()));
    harness.complete_action(Action::CitiesDidReject("Error deleting city".into()));
    harness.process_emitted();

    harness.assert_state(|s| s.cities.cities.len() == 2);
    harness.assert_state(|s| s.cities.error.as_deref() == Some("Error deleting city"));
    harness.assert_state(|s| !s.cities.is_loading);
}

// ============================================================================
// Auth + guard
// ============================================================================

#[test]
fn test_protected_start_url_redirects_home() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(route::COUNTRIES), reducer);
    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.url == route::ROOT);
}

#[test]
fn test_wrong_credentials_change_nothing() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(route::LOGIN), reducer);

    harness.dispatch_collect(Action::AuthLogin {
        email: DEMO_EMAIL.into(),
        password: "letmein".into(),
    });

    harness.drain_effects().effects_empty();
    harness.assert_state(|s| !s.auth.is_authenticated() && s.auth.user().is_none());
    harness.assert_state(|s| s.url == route::LOGIN);
}

#[test]
fn test_login_then_logout() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(route::LOGIN), reducer);
    harness.dispatch_collect(Action::LoginSubmit);
    harness.assert_state(|s| s.url == route::CITIES);
    harness.assert_state(|s| s.auth.user().map(|u| u.name.as_str()) == Some("Jack"));

    harness.dispatch_collect(Action::AuthLogout);
    harness.assert_state(|s| s.url == route::ROOT);
    harness.assert_state(|s| s.auth.user().is_none());
}

// ============================================================================
// Map → form → create
// ============================================================================

#[test]
fn test_pick_geocode_and_submit() {
    let mut harness = EffectStoreTestHarness::new(signed_in(), reducer);

    harness.dispatch_collect(Action::Navigate("/app/form?lat=38.72&lng=-9.14".into()));
    harness.assert_state(|s| s.form.geocode.is_loading());
    harness.drain_effects().effects_first_matches(
        |e| matches!(e, Effect::ReverseGeocode { lat, lng } if *lat == 38.72 && *lng == -9.14),
    );

    harness.complete_action(Action::GeocodeDidLoad {
        lat: 38.72,
        lng: -9.14,
        place: lisbon(),
    });
    harness.process_emitted();
    harness.assert_state(|s| s.form.city_name == "Lisbon" && s.form.country == "Portugal");

    harness.dispatch_collect(Action::FormNotesChange("Custard tarts".into()));
    harness.dispatch_collect(Action::FormSubmit);
    harness.drain_effects().effects_first_matches(|e| {
        matches!(e, Effect::CreateCity { draft, .. }
            if draft.city_name == "Lisbon" && draft.notes == "Custard tarts")
    });

    harness.complete_action(Action::CityDidCreate(city("9", "Lisbon", "Portugal")));
    harness.process_emitted();

    harness.assert_state(|s| s.url == route::CITIES);
    harness.assert_state(|s| s.cities.current_city_id() == Some("9"));
}

#[test]
fn test_two_saves_at_same_point_both_complete() {
    let mut harness = EffectStoreTestHarness::new(signed_in(), reducer);
    let url = "/app/form?lat=38.72&lng=-9.14";

    let mut keys = Vec::new();
    for _ in 0..2 {
        harness.dispatch_collect(Action::Navigate(url.into()));
        harness.complete_action(Action::GeocodeDidLoad {
            lat: 38.72,
            lng: -9.14,
            place: lisbon(),
        });
        harness.process_emitted();
        harness.dispatch_collect(Action::FormSubmit);
        harness.dispatch_collect(Action::NavigateBack);
        keys.extend(
            harness
                .drain_effects()
                .iter()
                .filter(|e| matches!(e, Effect::CreateCity { .. }))
                .map(Effect::task_key),
        );
    }

    assert_eq!(keys.len(), 2);
    assert_ne!(keys[0], keys[1]);

    harness.complete_action(Action::CityDidCreate(city("8", "Lisbon", "Portugal")));
    harness.complete_action(Action::CityDidCreate(city("9", "Lisbon", "Portugal")));
    harness.process_emitted();

    harness.assert_state(|s| s.cities.cities.len() == 4);
    harness.assert_state(|s| s.cities.current_city_id() == Some("9"));
}

#[test]
fn test_superseded_geocode_is_ignored() {
    let mut harness = EffectStoreTestHarness::new(signed_in(), reducer);

    harness.dispatch_collect(Action::Navigate("/app/form?lat=10&lng=10".into()));
    harness.dispatch_collect(Action::Navigate("/app/form?lat=20&lng=20".into()));

    harness.complete_action(Action::GeocodeDidError {
        lat: 10.0,
        lng: 10.0,
        message: "late".into(),
    });
    let (changed, _) = harness.process_emitted();

    assert_eq!(changed, 0);
    harness.assert_state(|s| s.form.geocode.is_loading());
}

#[test]
fn test_not_a_city_message_replaces_form() {
    let mut harness = EffectStoreTestHarness::new(signed_in(), reducer);
    harness.dispatch_collect(Action::Navigate("/app/form?lat=30&lng=-40".into()));

    harness.complete_action(Action::GeocodeDidError {
        lat: 30.0,
        lng: -40.0,
        message: "That doesn't seem to be a city. Click somewhere else.".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| {
        s.form.geocode.error() == Some("That doesn't seem to be a city. Click somewhere else.")
    });
    harness.drain_effects();
    harness.dispatch_collect(Action::FormSubmit);
    harness.drain_effects().effects_empty();
    harness.assert_state(|s| !s.form.submitting);
}

// ============================================================================
// Keys through the root component
// ============================================================================

#[test]
fn test_keys_switch_tabs_and_refresh() {
    let mut harness = EffectStoreTestHarness::new(signed_in(), reducer);
    let mut root = Root::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("2", |state, event| {
        root.handle_event(&event.kind, RootProps { state })
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_first(Action::Navigate(route::COUNTRIES.into()));
    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.url == route::COUNTRIES);

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        root.handle_event(&event.kind, RootProps { state })
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_first(Action::CitiesFetch);
}

#[test]
fn test_keys_ignored_when_logged_out_on_protected_url() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(route::CITIES), reducer);
    let mut root = Root::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("r", |state, event| {
        root.handle_event(&event.kind, RootProps { state })
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_empty();
}
