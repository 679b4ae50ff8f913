//! Actions: intents from the UI and results from async tasks

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cities::City;
use crate::geo::GeocodedPlace;
use crate::state::PanDirection;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: resolve the initial URL and load the city list
    Init,

    // ===== Navigation category =====
    /// Go to a URL (path plus optional query string)
    Navigate(String),

    /// Return to the previous URL
    NavigateBack,

    // ===== Cities category =====
    /// Intent: (re)load the city list
    CitiesFetch,

    /// Result: city list loaded
    CitiesDidLoad(Vec<City>),

    /// Result: any cities request failed
    CitiesDidReject(String),

    // ===== City category =====
    /// Intent: make a city current (no request if it already is)
    CityGet(String),

    /// Result: single city loaded
    CityDidLoad(City),

    /// Result: city stored by the backend
    CityDidCreate(City),

    /// Intent: remove a city
    CityDelete(String),

    /// Result: city removed
    CityDidDelete(String),

    /// Move the list cursor
    CitySelect(usize),

    // ===== Auth category =====
    /// Start a session (silently ignored on mismatch)
    AuthLogin { email: String, password: String },

    /// End the session
    AuthLogout,

    // ===== Login page category =====
    LoginEmailChange(String),
    LoginPasswordChange(String),
    LoginFieldNext,
    /// Submit the login page's inputs
    LoginSubmit,

    // ===== Form category =====
    FormCityNameChange(String),
    FormDateChange(String),
    FormNotesChange(String),
    FormFieldNext,
    FormFieldPrev,
    /// Intent: create a city from the form
    FormSubmit,

    // ===== Geocode category =====
    /// Result: reverse-geocoding for the form's coordinates
    GeocodeDidLoad {
        lat: f64,
        lng: f64,
        place: GeocodedPlace,
    },

    /// Result: reverse-geocoding failed (message is user-facing)
    GeocodeDidError { lat: f64, lng: f64, message: String },

    // ===== Map category =====
    MapPan(PanDirection),
    MapZoomIn,
    MapZoomOut,
    /// Open the form at the map cursor
    MapPick,

    // ===== UI category =====
    /// Switch keyboard focus between sidebar and map
    UiFocusNext,

    /// Force a re-render (cursor movement in inputs, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the spinner
    Tick,

    /// Exit the application
    Quit,
}
