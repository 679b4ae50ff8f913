//! URL routing, the query-string position hook, and the auth guard

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::auth::AuthState;
use crate::cities::{City, Position};

pub const ROOT: &str = "/";
pub const LOGIN: &str = "/login";
pub const APP: &str = "/app";
pub const CITIES: &str = "/app/cities";
pub const COUNTRIES: &str = "/app/countries";
pub const FORM: &str = "/app/form";

/// Pages reachable by URL path
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Route {
    Home,
    Login,
    /// `/app` itself; resolves to the city list
    AppIndex,
    Cities,
    City { id: String },
    Countries,
    Form,
    NotFound,
}

impl Route {
    pub fn from_url(url: &str) -> Self {
        let (path, _) = split_url(url);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["app"] => Route::AppIndex,
            ["app", "cities"] => Route::Cities,
            ["app", "cities", id] => Route::City {
                id: decode(id),
            },
            ["app", "countries"] => Route::Countries,
            ["app", "form"] => Route::Form,
            _ => Route::NotFound,
        }
    }

    /// Routes behind the login gate
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::AppIndex | Route::Cities | Route::City { .. } | Route::Countries | Route::Form
        )
    }
}

/// Outcome of checking a route against the session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Allow,
    Redirect(&'static str),
}

/// Protected routes redirect to the root path until the user is logged in.
pub fn guard(route: &Route, auth: &AuthState) -> Guard {
    if route.is_protected() && !auth.is_authenticated() {
        Guard::Redirect(ROOT)
    } else {
        Guard::Allow
    }
}

/// Split `path?query` (a `#fragment` is dropped)
pub fn split_url(url: &str) -> (&str, Option<&str>) {
    let url = url.split('#').next().unwrap_or_default();
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// First value of a query parameter, percent-decoded
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let (_, query) = split_url(url);
    query?
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key) == name).then(|| decode(value))
        })
        .next()
}

/// Read `lat`/`lng` from the query string.
///
/// Each value falls back to `0` on its own when it is missing or not a number.
pub fn url_position(url: &str) -> (f64, f64) {
    let read = |name| {
        query_param(url, name)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .unwrap_or(0.0)
    };
    (read("lat"), read("lng"))
}

pub fn with_position(path: &str, position: Position) -> String {
    format!("{path}?lat={}&lng={}", position.lat, position.lng)
}

/// Detail URL for a city, carrying its coordinates so the map can follow
pub fn city_url(city: &City) -> String {
    let path = format!("{CITIES}/{}", urlencoding::encode(&city.id));
    with_position(&path, city.position)
}

pub fn form_url(position: Position) -> String {
    with_position(FORM, position)
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    urlencoding::decode(&raw)
        .map(|value| value.into_owned())
        .unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_position_reads_query() {
        assert_eq!(url_position("/app/form?lat=12.5&lng=45"), (12.5, 45.0));
        assert_eq!(url_position("?lat=12.5&lng=45"), (12.5, 45.0));
    }

    #[test]
    fn test_url_position_defaults_to_zero() {
        assert_eq!(url_position("/app/form"), (0.0, 0.0));
        assert_eq!(url_position("/app/form?lat=abc&lng=7"), (0.0, 7.0));
        assert_eq!(url_position("/app/form?lat=3"), (3.0, 0.0));
        assert_eq!(url_position("/app/form?lat=NaN&lng=inf"), (0.0, 0.0));
    }

    #[test]
    fn test_route_parsing() {
        assert_eq!(Route::from_url("/"), Route::Home);
        assert_eq!(Route::from_url(""), Route::Home);
        assert_eq!(Route::from_url("/login"), Route::Login);
        assert_eq!(Route::from_url("/app"), Route::AppIndex);
        assert_eq!(Route::from_url("/app/cities/"), Route::Cities);
        assert_eq!(
            Route::from_url("/app/cities/42?lat=1&lng=2"),
            Route::City { id: "42".into() }
        );
        assert_eq!(Route::from_url("/app/form?lat=1&lng=2"), Route::Form);
        assert_eq!(Route::from_url("/pricing"), Route::NotFound);
    }

    #[test]
    fn test_guard_redirects_when_logged_out() {
        let mut auth = AuthState::default();
        assert_eq!(guard(&Route::Cities, &auth), Guard::Redirect(ROOT));
        assert_eq!(guard(&Route::Login, &auth), Guard::Allow);

        auth.login(crate::auth::DEMO_EMAIL, crate::auth::DEMO_PASSWORD);
        assert_eq!(guard(&Route::Cities, &auth), Guard::Allow);
    }

    #[test]
    fn test_city_url_round_trips_id_and_position() {
        let city = City {
            id: "a b".into(),
            city_name: "Lisbon".into(),
            country: "Portugal".into(),
            emoji: String::new(),
            date: String::new(),
            notes: String::new(),
            position: Position::new(38.5, -9.25),
        };
        let url = city_url(&city);
        assert_eq!(Route::from_url(&url), Route::City { id: "a b".into() });
        assert_eq!(url_position(&url), (38.5, -9.25));
    }
}
