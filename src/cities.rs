//! Visited cities and the cities store

use chrono::{DateTime, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// A point on the map
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

impl Position {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A visited city as stored by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct City {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub city_name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub notes: String,
    pub position: Position,
}

/// A city that has not been saved yet (no server-assigned id)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityDraft {
    pub city_name: String,
    pub country: String,
    pub emoji: String,
    pub date: String,
    pub notes: String,
    pub position: Position,
}

/// json-server hands out numeric ids, other backends use strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// Cities store: the cached list plus the selected ("current") city.
///
/// Every request moves through `begin_loading` and is closed by exactly one of
/// `loaded`, `city_loaded`, `created`, `deleted` or `rejected`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CitiesState {
    pub cities: Vec<City>,
    pub is_loading: bool,
    pub current_city: Option<City>,
    pub error: Option<String>,
}

impl CitiesState {
    pub fn begin_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Replace the list. The current city survives only if it is still listed.
    pub fn loaded(&mut self, cities: Vec<City>) {
        self.is_loading = false;
        let still_listed = self
            .current_city
            .as_ref()
            .is_some_and(|current| cities.iter().any(|city| city.id == current.id));
        if !still_listed {
            self.current_city = None;
        }
        self.cities = cities;
    }

    pub fn city_loaded(&mut self, city: City) {
        self.is_loading = false;
        self.current_city = Some(city);
    }

    pub fn created(&mut self, city: City) {
        self.is_loading = false;
        self.cities.push(city.clone());
        self.current_city = Some(city);
    }

    /// Drop the city and clear the current one, whichever city that was.
    pub fn deleted(&mut self, id: &str) {
        self.is_loading = false;
        self.cities.retain(|city| city.id != id);
        self.current_city = None;
    }

    pub fn rejected(&mut self, error: String) {
        self.is_loading = false;
        self.error = Some(error);
    }

    pub fn current_city_id(&self) -> Option<&str> {
        self.current_city.as_ref().map(|city| city.id.as_str())
    }

    pub fn is_current(&self, id: &str) -> bool {
        self.current_city_id() == Some(id)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.cities.iter().position(|city| city.id == id)
    }
}

/// One city per country, in the order countries were first visited
pub fn unique_countries(cities: &[City]) -> Vec<&City> {
    cities.iter().fold(Vec::new(), |mut acc: Vec<&City>, city| {
        if !acc.iter().any(|seen| seen.country == city.country) {
            acc.push(city);
        }
        acc
    })
}

/// Parse a stored visit date (RFC 3339 timestamp or plain `YYYY-MM-DD`)
pub fn parse_visit_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// "Monday, January 1, 2024"; unparseable dates are shown as stored.
pub fn format_visit_date(raw: &str) -> String {
    match parse_visit_date(raw) {
        Some(date) => date.format("%A, %B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}
