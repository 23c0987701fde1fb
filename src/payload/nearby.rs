use crate::models::NearbyPlace;
use serde_json::Value;
use tracing::debug;

/// Parse a listing's `nearby_places` field into canonical entries.
///
/// Accepts an array, a JSON-encoded string, a plain place name, or a single
/// value. Malformed entries are dropped; the result may be empty.
pub fn parse_nearby_places(raw: &Value) -> Vec<NearbyPlace> {
    let entries = match raw {
        Value::Array(entries) => entries.clone(),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(entries)) => entries,
            Ok(other) => vec![other],
            Err(_) => vec![Value::String(text.clone())],
        },
        other => vec![other.clone()],
    };

    entries.iter().filter_map(place_from_entry).collect()
}

/// Nearby places of a raw listing record
pub fn nearby_places_of(property: &Value) -> Vec<NearbyPlace> {
    property
        .get("nearby_places")
        .map(parse_nearby_places)
        .unwrap_or_default()
}

fn place_from_entry(entry: &Value) -> Option<NearbyPlace> {
    let place = match entry {
        Value::String(text) => NearbyPlace {
            place: text.trim().to_string(),
            distance: None,
        },
        Value::Object(map) => match map.get("place") {
            Some(Value::String(place)) => NearbyPlace {
                place: place.trim().to_string(),
                distance: map.get("distance").and_then(distance_text),
            },
            _ => {
                debug!("Dropping nearby place without a name: {}", entry);
                return None;
            }
        },
        _ => return None,
    };

    (!place.place.is_empty()).then_some(place)
}

fn distance_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
