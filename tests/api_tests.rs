//! HTTP clients against an in-process fake backend and geocoder

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use worldwise::api::{CitiesClient, GeocodingClient, GeocodingError};
use worldwise::cities::{CityDraft, Position};

type Db = Arc<Mutex<Vec<Value>>>;

async fn list(State(db): State<Db>) -> Json<Value> {
    let cities = db.lock().unwrap().clone();
    Json(Value::Array(cities))
}

async fn create(State(db): State<Db>, Json(mut city): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut cities = db.lock().unwrap();
    city["id"] = json!(1000 + cities.len());
    cities.push(city.clone());
    (StatusCode::CREATED, Json(city))
}

fn matches_id(city: &Value, id: &str) -> bool {
    match &city["id"] {
        Value::String(s) => s == id,
        other => other.to_string() == id,
    }
}

async fn show(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    db.lock()
        .unwrap()
        .iter()
        .find(|city| matches_id(city, &id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn destroy(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    let mut cities = db.lock().unwrap();
    let before = cities.len();
    cities.retain(|city| !matches_id(city, &id));
    if cities.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({})))
}

/// Ocean at latitude 30; Lisbon everywhere else
async fn reverse_geocode(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let lat = params.get("latitude").cloned().unwrap_or_default();
    if lat == "30" {
        return Json(json!({
            "city": "", "locality": "North Atlantic Ocean", "countryCode": "", "countryName": ""
        }));
    }
    Json(json!({
        "city": "", "locality": "Lisbon", "countryCode": "PT", "countryName": "Portugal"
    }))
}

async fn spawn_backend() -> String {
    let db: Db = Arc::new(Mutex::new(vec![json!({
        "id": "73930385",
        "cityName": "Lisbon",
        "country": "Portugal",
        "emoji": "🇵🇹",
        "date": "2027-10-31T15:59:59.138Z",
        "notes": "My favorite city so far!",
        "position": { "lat": 38.727881642324164, "lng": -9.140900099907554 }
    })]));

    let app = Router::new()
        .route("/cities", get(list).post(create))
        .route("/cities/:id", get(show).delete(destroy))
        .route("/geocode", get(reverse_geocode))
        .with_state(db);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_list_get_create_delete() {
    let base = spawn_backend().await;
    let client = CitiesClient::new(format!("{base}/"));

    let cities = client.list_cities().await.unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].city_name, "Lisbon");

    let city = client.get_city("73930385").await.unwrap();
    assert_eq!(city.notes, "My favorite city so far!");

    let created = client
        .create_city(&CityDraft {
            city_name: "Madrid".into(),
            country: "Spain".into(),
            emoji: "🇪🇸".into(),
            date: "2024-01-01T00:00:00.000Z".into(),
            notes: String::new(),
            position: Position::new(40.41, -3.70),
        })
        .await
        .unwrap();
    assert_eq!(created.id, "1001");
    assert_eq!(created.city_name, "Madrid");

    client.delete_city("73930385").await.unwrap();
    let cities = client.list_cities().await.unwrap();
    let ids: Vec<_> = cities.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1001"]);
}

#[tokio::test]
async fn test_missing_city_is_an_error() {
    let base = spawn_backend().await;
    let client = CitiesClient::new(base);

    assert!(client.get_city("nope").await.is_err());
    assert!(client.delete_city("nope").await.is_err());
}

#[tokio::test]
async fn test_unreachable_backend_is_an_error() {
    let client = CitiesClient::new("http://127.0.0.1:9");
    assert!(client.list_cities().await.is_err());
}

#[tokio::test]
async fn test_reverse_geocode() {
    let base = spawn_backend().await;
    let geocoder = GeocodingClient::new(format!("{base}/geocode"));

    let place = geocoder.reverse_geocode(38.72, -9.14).await.unwrap();
    assert_eq!(place.city_name, "Lisbon");
    assert_eq!(place.country, "Portugal");
    assert_eq!(place.flag(), "\u{1F1F5}\u{1F1F9}");

    let err = geocoder.reverse_geocode(30.0, -40.0).await.unwrap_err();
    assert!(matches!(err, GeocodingError::NotACity { .. }));
}
