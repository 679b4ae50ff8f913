//! Reverse-geocoding results and flag glyphs

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::cities::Position;

/// Offset from an ASCII capital letter to its regional indicator symbol
const REGIONAL_INDICATOR_OFFSET: u32 = 0x1F1E6 - 'A' as u32;

/// What the geocoder knows about a map point
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeocodedPlace {
    pub city_name: String,
    pub country: String,
    pub country_code: String,
}

impl GeocodedPlace {
    pub fn flag(&self) -> String {
        flag_emoji(&self.country_code)
    }
}

/// Turn an ISO 3166 alpha-2 code into its flag ("US" -> 🇺🇸).
///
/// Letters are shifted into the regional indicator block; anything else is dropped.
pub fn flag_emoji(country_code: &str) -> String {
    country_code
        .chars()
        .filter(char::is_ascii_alphabetic)
        .filter_map(|c| char::from_u32(REGIONAL_INDICATOR_OFFSET + c.to_ascii_uppercase() as u32))
        .collect()
}

pub fn format_coords(position: Position) -> String {
    let ns = if position.lat < 0.0 { 'S' } else { 'N' };
    let ew = if position.lng < 0.0 { 'W' } else { 'E' };
    format!(
        "{:.2}°{}, {:.2}°{}",
        position.lat.abs(),
        ns,
        position.lng.abs(),
        ew
    )
}
