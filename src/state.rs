//! Application state - single source of truth

use chrono::{NaiveDate, SecondsFormat};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::auth::{AuthState, DEMO_EMAIL, DEMO_PASSWORD};
use crate::cities::{CitiesState, CityDraft, Position};
use crate::geo::GeocodedPlace;
use crate::route::{self, Route};

/// Date format typed into the form
pub const FORM_DATE_FORMAT: &str = "%Y/%m/%d";

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 6;

/// Which half of the app shell receives keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Pane {
    #[default]
    Sidebar,
    Map,
}

impl Pane {
    pub fn toggle(self) -> Self {
        match self {
            Pane::Sidebar => Pane::Map,
            Pane::Map => Pane::Sidebar,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PanDirection {
    North,
    South,
    East,
    West,
}

/// Editable fields of the city form, top to bottom
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FormField {
    #[default]
    CityName,
    Date,
    Notes,
}

impl FormField {
    const ORDER: [FormField; 3] = [FormField::CityName, FormField::Date, FormField::Notes];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum DraftError {
    #[error("Pick a point on the map first")]
    MissingPosition,
    #[error("Enter a city name")]
    MissingCityName,
    #[error("Enter the date as yyyy/mm/dd")]
    InvalidDate,
}

/// The "add a city" form, keyed by the URL position
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FormState {
    pub position: Position,
    /// Reverse-geocoding lifecycle: Empty (no position) → Loading → Loaded/Failed
    pub geocode: DataResource<GeocodedPlace>,
    pub city_name: String,
    pub country: String,
    pub emoji: String,
    pub date: String,
    pub notes: String,
    pub field: FormField,
    pub submitting: bool,
    pub validation: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(Position::default(), &today())
    }
}

impl FormState {
    pub fn new(position: Position, today: &str) -> Self {
        Self {
            position,
            geocode: DataResource::Empty,
            city_name: String::new(),
            country: String::new(),
            emoji: String::new(),
            date: today.to_string(),
            notes: String::new(),
            field: FormField::default(),
            submitting: false,
            validation: None,
        }
    }

    /// Whether a geocoding result for `(lat, lng)` belongs to this form
    pub fn matches(&self, lat: f64, lng: f64) -> bool {
        self.position.lat == lat && self.position.lng == lng
    }

    pub fn apply_place(&mut self, place: GeocodedPlace) {
        self.city_name = place.city_name.clone();
        self.country = place.country.clone();
        self.emoji = place.flag();
        self.geocode = DataResource::Loaded(place);
    }

    pub fn draft(&self) -> Result<CityDraft, DraftError> {
        if self.position.lat == 0.0 || self.position.lng == 0.0 {
            return Err(DraftError::MissingPosition);
        }
        let city_name = self.city_name.trim();
        if city_name.is_empty() {
            return Err(DraftError::MissingCityName);
        }
        let date = NaiveDate::parse_from_str(self.date.trim(), FORM_DATE_FORMAT)
            .map_err(|_| DraftError::InvalidDate)?;
        let date = date
            .and_hms_opt(0, 0, 0)
            .ok_or(DraftError::InvalidDate)?
            .and_utc()
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        Ok(CityDraft {
            city_name: city_name.to_string(),
            country: self.country.clone(),
            emoji: self.emoji.clone(),
            date,
            notes: self.notes.clone(),
            position: self.position,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

impl LoginField {
    pub fn toggle(self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        }
    }
}

/// Login page inputs, pre-filled with the demo account
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub field: LoginField,
    /// Last submit did not start a session
    pub rejected: bool,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            email: DEMO_EMAIL.into(),
            password: DEMO_PASSWORD.into(),
            field: LoginField::default(),
            rejected: false,
        }
    }
}

/// World map viewport: cursor position plus zoom level
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MapState {
    pub cursor: Position,
    pub zoom: u8,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            cursor: Position::new(38.72, -9.14),
            zoom: MIN_ZOOM,
        }
    }
}

impl MapState {
    /// Visible (longitude, latitude) span
    pub fn span(&self) -> (f64, f64) {
        let scale = f64::from(1u32 << (self.zoom.clamp(MIN_ZOOM, MAX_ZOOM) - 1));
        (360.0 / scale, 180.0 / scale)
    }

    /// `([west, east], [south, north])`, kept inside the world
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let (lng_span, lat_span) = self.span();
        let west = (self.cursor.lng - lng_span / 2.0).clamp(-180.0, 180.0 - lng_span);
        let south = (self.cursor.lat - lat_span / 2.0).clamp(-90.0, 90.0 - lat_span);
        ([west, west + lng_span], [south, south + lat_span])
    }

    pub fn pan(&mut self, direction: PanDirection) {
        let (lng_span, lat_span) = self.span();
        let (lng_step, lat_step) = (lng_span / 36.0, lat_span / 18.0);
        let cursor = &mut self.cursor;
        match direction {
            PanDirection::North => cursor.lat += lat_step,
            PanDirection::South => cursor.lat -= lat_step,
            PanDirection::East => cursor.lng += lng_step,
            PanDirection::West => cursor.lng -= lng_step,
        }
        cursor.lat = round_coord(cursor.lat.clamp(-85.0, 85.0));
        cursor.lng = round_coord(cursor.lng.clamp(-180.0, 180.0));
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom.saturating_add(1))
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom.saturating_sub(1))
    }

    fn set_zoom(&mut self, zoom: u8) -> bool {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let changed = zoom != self.zoom;
        self.zoom = zoom;
        changed
    }

    pub fn center_on(&mut self, position: Position) {
        self.cursor = position;
    }
}

fn round_coord(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Local date in the form's input format
pub fn today() -> String {
    chrono::Local::now()
        .date_naive()
        .format(FORM_DATE_FORMAT)
        .to_string()
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Session", label = "Auth", debug_fmt)]
    pub auth: AuthState,

    #[debug(section = "Navigation", label = "URL", debug_fmt)]
    pub url: String,

    #[debug(section = "Navigation", label = "History", debug_fmt)]
    pub history: Vec<String>,

    #[debug(section = "Cities", label = "Store", debug_fmt)]
    pub cities: CitiesState,

    #[debug(section = "Form", label = "Form", debug_fmt)]
    pub form: FormState,

    #[debug(section = "Map", label = "Viewport", debug_fmt)]
    pub map: MapState,

    #[debug(section = "UI", label = "Focus", debug_fmt)]
    pub focus: Pane,

    #[debug(skip)]
    pub login: LoginState,

    /// Cursor in the city list
    #[debug(skip)]
    pub list_selected: usize,

    /// Default visit date for new forms
    #[debug(skip)]
    pub today: String,

    /// Last create request number handed out
    #[debug(section = "Cities", label = "Creates", debug_fmt)]
    pub create_requests: u64,

    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            auth: AuthState::default(),
            url: url.into(),
            history: Vec::new(),
            cities: CitiesState::default(),
            form: FormState::default(),
            map: MapState::default(),
            focus: Pane::default(),
            login: LoginState::default(),
            list_selected: 0,
            today: today(),
            create_requests: 0,
            tick_count: 0,
        }
    }

    pub fn route(&self) -> Route {
        Route::from_url(&self.url)
    }

    /// Position carried by the current URL (`0` when absent)
    pub fn url_position(&self) -> Position {
        let (lat, lng) = route::url_position(&self.url);
        Position::new(lat, lng)
    }

    /// Something is in flight; drives the spinner
    pub fn is_busy(&self) -> bool {
        self.cities.is_loading || self.form.geocode.is_loading()
    }

    pub fn clamp_selection(&mut self) {
        let len = self.cities.cities.len();
        self.list_selected = self.list_selected.min(len.saturating_sub(1));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(route::ROOT)
    }
}
