//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::cities::Position;
use crate::effect::Effect;
use crate::route::{self, Guard, Route};
use crate::state::{AppState, FormState, Pane};

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            state.cities.begin_loading();
            let mut effects = vec![Effect::FetchCities];
            effects.extend(settle_route(state));
            DispatchResult::changed_with_many(effects)
        }

        // ===== Navigation =====
        Action::Navigate(url) => changed_with(navigate(state, url)),

        Action::NavigateBack => {
            let Some(previous) = state.history.pop() else {
                return DispatchResult::unchanged();
            };
            state.url = previous;
            changed_with(settle_route(state))
        }

        // ===== Cities store =====
        Action::CitiesFetch => {
            state.cities.begin_loading();
            DispatchResult::changed_with(Effect::FetchCities)
        }

        Action::CitiesDidLoad(cities) => {
            state.cities.loaded(cities);
            state.clamp_selection();
            DispatchResult::changed()
        }

        Action::CitiesDidReject(error) => {
            if state.form.submitting {
                state.form.submitting = false;
                state.form.validation = Some(error.clone());
            }
            state.cities.rejected(error);
            DispatchResult::changed()
        }

        Action::CityGet(id) => match get_city(state, id) {
            Some(effect) => DispatchResult::changed_with(effect),
            None => DispatchResult::unchanged(),
        },

        Action::CityDidLoad(city) => {
            if let Some(idx) = state.cities.position_of(&city.id) {
                state.list_selected = idx;
            }
            state.cities.city_loaded(city);
            DispatchResult::changed()
        }

        Action::CityDidCreate(city) => {
            state.cities.created(city);
            state.list_selected = state.cities.cities.len().saturating_sub(1);
            if state.form.submitting {
                state.form.submitting = false;
                return changed_with(navigate(state, route::CITIES.to_string()));
            }
            DispatchResult::changed()
        }

        Action::CityDelete(id) => {
            state.cities.begin_loading();
            DispatchResult::changed_with(Effect::DeleteCity { id })
        }

        Action::CityDidDelete(id) => {
            state.cities.deleted(&id);
            state.clamp_selection();
            if state.route() == (Route::City { id }) {
                state.url = route::CITIES.to_string();
            }
            DispatchResult::changed()
        }

        Action::CitySelect(index) => {
            if index < state.cities.cities.len() && index != state.list_selected {
                state.list_selected = index;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // ===== Auth store =====
        Action::AuthLogin { email, password } => match login(state, &email, &password) {
            Some(effects) => changed_with(effects),
            None => DispatchResult::unchanged(),
        },

        Action::AuthLogout => {
            state.auth.logout();
            changed_with(navigate(state, route::ROOT.to_string()))
        }

        // ===== Login page =====
        Action::LoginEmailChange(email) => {
            state.login.email = email;
            state.login.rejected = false;
            DispatchResult::changed()
        }

        Action::LoginPasswordChange(password) => {
            state.login.password = password;
            state.login.rejected = false;
            DispatchResult::changed()
        }

        Action::LoginFieldNext => {
            state.login.field = state.login.field.toggle();
            DispatchResult::changed()
        }

        Action::LoginSubmit => {
            let (email, password) = (state.login.email.clone(), state.login.password.clone());
            match login(state, email.trim(), &password) {
                Some(effects) => changed_with(effects),
                None => {
                    state.login.rejected = true;
                    DispatchResult::changed()
                }
            }
        }

        // ===== Form =====
        Action::FormCityNameChange(name) => {
            state.form.city_name = name;
            state.form.validation = None;
            DispatchResult::changed()
        }

        Action::FormDateChange(date) => {
            state.form.date = date;
            state.form.validation = None;
            DispatchResult::changed()
        }

        Action::FormNotesChange(notes) => {
            state.form.notes = notes;
            DispatchResult::changed()
        }

        Action::FormFieldNext => {
            state.form.field = state.form.field.next();
            DispatchResult::changed()
        }

        Action::FormFieldPrev => {
            state.form.field = state.form.field.prev();
            DispatchResult::changed()
        }

        Action::FormSubmit => {
            if state.form.submitting || !state.form.geocode.is_loaded() {
                return DispatchResult::unchanged();
            }
            match state.form.draft() {
                Ok(draft) => {
                    state.form.submitting = true;
                    state.form.validation = None;
                    state.cities.begin_loading();
                    state.create_requests += 1;
                    DispatchResult::changed_with(Effect::CreateCity {
                        request: state.create_requests,
                        draft,
                    })
                }
                Err(err) => {
                    state.form.validation = Some(err.to_string());
                    DispatchResult::changed()
                }
            }
        }

        // ===== Geocoding results =====
        Action::GeocodeDidLoad { lat, lng, place } => {
            if !form_awaits(state, lat, lng) {
                return DispatchResult::unchanged();
            }
            state.form.apply_place(place);
            DispatchResult::changed()
        }

        Action::GeocodeDidError { lat, lng, message } => {
            if !form_awaits(state, lat, lng) {
                return DispatchResult::unchanged();
            }
            state.form.geocode = DataResource::Failed(message);
            DispatchResult::changed()
        }

        // ===== Map =====
        Action::MapPan(direction) => {
            state.map.pan(direction);
            DispatchResult::changed()
        }

        Action::MapZoomIn => {
            if state.map.zoom_in() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::MapZoomOut => {
            if state.map.zoom_out() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::MapPick => {
            state.focus = Pane::Sidebar;
            let url = route::form_url(state.map.cursor);
            changed_with(navigate(state, url))
        }

        // ===== UI =====
        Action::UiFocusNext => {
            state.focus = state.focus.toggle();
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global =====
        Action::Tick => {
            if state.is_busy() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn changed_with(effects: Vec<Effect>) -> DispatchResult<Effect> {
    if effects.is_empty() {
        DispatchResult::changed()
    } else {
        DispatchResult::changed_with_many(effects)
    }
}

/// Push the current URL onto the history and enter `url`
fn navigate(state: &mut AppState, url: String) -> Vec<Effect> {
    if url != state.url {
        let previous = std::mem::replace(&mut state.url, url);
        state.history.push(previous);
    }
    settle_route(state)
}

/// Resolve index redirects and the auth guard for the current URL, then run
/// whatever the landing route needs.
fn settle_route(state: &mut AppState) -> Vec<Effect> {
    let mut route = state.route();
    if route == Route::AppIndex {
        state.url = route::CITIES.to_string();
        route = Route::Cities;
    }

    if let Guard::Redirect(to) = route::guard(&route, &state.auth) {
        state.url = to.to_string();
        return Vec::new();
    }

    match route {
        Route::City { id } => {
            follow_url_position(state);
            get_city(state, id).into_iter().collect()
        }
        Route::Form => open_form(state).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Fetch a city unless it is already the current one
fn get_city(state: &mut AppState, id: String) -> Option<Effect> {
    if state.cities.is_current(&id) {
        return None;
    }
    state.cities.begin_loading();
    Some(Effect::FetchCity { id })
}

/// Reset the form for the URL position and start the lookup when there is one
fn open_form(state: &mut AppState) -> Option<Effect> {
    let Position { lat, lng } = state.url_position();
    state.form = FormState::new(Position::new(lat, lng), &state.today);
    if lat == 0.0 || lng == 0.0 {
        return None;
    }
    state.map.center_on(state.form.position);
    state.form.geocode = DataResource::Loading;
    Some(Effect::ReverseGeocode { lat, lng })
}

fn follow_url_position(state: &mut AppState) {
    let position = state.url_position();
    if position.lat != 0.0 && position.lng != 0.0 {
        state.map.center_on(position);
    }
}

/// Geocoding results only land on the form that asked for them
fn form_awaits(state: &AppState, lat: f64, lng: f64) -> bool {
    state.route() == Route::Form && state.form.geocode.is_loading() && state.form.matches(lat, lng)
}

/// `Some(effects)` when a session was started
fn login(state: &mut AppState, email: &str, password: &str) -> Option<Vec<Effect>> {
    if !state.auth.login(email, password) {
        return None;
    }
    state.login.rejected = false;
    Some(navigate(state, route::APP.to_string()))
}
