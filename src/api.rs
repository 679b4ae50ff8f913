//! HTTP clients for the cities backend and the reverse geocoder

use serde::Deserialize;

use crate::cities::{City, CityDraft};
use crate::geo::GeocodedPlace;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_GEOCODE_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";

// ============================================================================
// Cities backend
// ============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("cities request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// REST client for `/cities`
#[derive(Clone, Debug)]
pub struct CitiesClient {
    client: reqwest::Client,
    base_url: String,
}

impl CitiesClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn cities_url(&self) -> String {
        format!("{}/cities", self.base_url.trim_end_matches('/'))
    }

    fn city_url(&self, id: &str) -> String {
        format!("{}/{}", self.cities_url(), urlencoding::encode(id))
    }

    /// `GET /cities`
    pub async fn list_cities(&self) -> Result<Vec<City>, ApiError> {
        let cities = self
            .client
            .get(self.cities_url())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(cities)
    }

    /// `GET /cities/{id}`
    pub async fn get_city(&self, id: &str) -> Result<City, ApiError> {
        let city = self
            .client
            .get(self.city_url(id))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(city)
    }

    /// `POST /cities`, returning the stored record with its id
    pub async fn create_city(&self, draft: &CityDraft) -> Result<City, ApiError> {
        let city = self
            .client
            .post(self.cities_url())
            .json(draft)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(city)
    }

    /// `DELETE /cities/{id}`; the response body is ignored
    pub async fn delete_city(&self, id: &str) -> Result<(), ApiError> {
        self.client
            .delete(self.city_url(id))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

// ============================================================================
// Reverse geocoding
// ============================================================================

/// The subset of the BigDataCloud reverse-geocode response we read
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReverseGeocodeResponse {
    city: Option<String>,
    locality: Option<String>,
    country_code: Option<String>,
    country_name: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum GeocodingError {
    #[error("geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("no country found at {lat}, {lng}")]
    NotACity { lat: f64, lng: f64 },
}

impl GeocodingError {
    /// Text shown in the form in place of the fields
    pub fn user_message(&self) -> &'static str {
        match self {
            GeocodingError::NotACity { .. } => {
                "That doesn't seem to be a city. Click somewhere else."
            }
            GeocodingError::Request(_) => {
                "Could not reach the geocoding service. Pick the point again."
            }
        }
    }
}

fn place_from_response(
    response: ReverseGeocodeResponse,
    lat: f64,
    lng: f64,
) -> Result<GeocodedPlace, GeocodingError> {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let country_code =
        non_empty(response.country_code).ok_or(GeocodingError::NotACity { lat, lng })?;
    let city_name = non_empty(response.city)
        .or_else(|| non_empty(response.locality))
        .unwrap_or_default();

    Ok(GeocodedPlace {
        city_name,
        country: response.country_name.unwrap_or_default(),
        country_code,
    })
}

/// Client for `GET {endpoint}?latitude=..&longitude=..`
#[derive(Clone, Debug)]
pub struct GeocodingClient {
    client: reqwest::Client,
    endpoint: String,
}

impl GeocodingClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<GeocodedPlace, GeocodingError> {
        let response: ReverseGeocodeResponse = self
            .client
            .get(&self.endpoint)
            .query(&[("latitude", lat), ("longitude", lng)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        place_from_response(response, lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> ReverseGeocodeResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_place_prefers_city_over_locality() {
        let place = place_from_response(
            response(r#"{"city":"Lisbon","locality":"Baixa","countryCode":"PT","countryName":"Portugal"}"#),
            38.7,
            -9.1,
        )
        .unwrap();
        assert_eq!(place.city_name, "Lisbon");
        assert_eq!(place.country, "Portugal");
        assert_eq!(place.country_code, "PT");
    }

    #[test]
    fn test_place_falls_back_to_locality() {
        let place = place_from_response(
            response(r#"{"city":"","locality":"Sintra","countryCode":"PT","countryName":"Portugal"}"#),
            38.8,
            -9.4,
        )
        .unwrap();
        assert_eq!(place.city_name, "Sintra");
    }

    #[test]
    fn test_missing_country_code_is_not_a_city() {
        let err = place_from_response(
            response(r#"{"city":"","locality":"Atlantic Ocean","countryCode":"","countryName":""}"#),
            30.0,
            -40.0,
        )
        .unwrap_err();
        assert!(matches!(err, GeocodingError::NotACity { .. }));
        assert_eq!(
            err.user_message(),
            "That doesn't seem to be a city. Click somewhere else."
        );
    }

    #[test]
    fn test_urls_trim_trailing_slash_and_encode_id() {
        let client = CitiesClient::new("http://localhost:8000/");
        assert_eq!(client.cities_url(), "http://localhost:8000/cities");
        assert_eq!(client.city_url("a/b"), "http://localhost:8000/cities/a%2Fb");
    }
}
