// src/store/models.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical talent listing as served to the board.
///
/// Every field is concrete: the parser below substitutes a default for
/// anything absent on the raw record, so callers never see a missing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Record identifier assigned by the store on creation.
    pub id: String,

    pub full_name: String,
    pub email: String,
    pub spark_line: String,
    pub skills: Vec<String>,
    pub city: String,

    pub price_usd: f64,
    /// Optional free-text local price, e.g. "₹2,000".
    pub price_local: String,

    /// By convention one of "Tonight" | "24h" | "This Week" | "Weekend",
    /// but the store accepts any string.
    pub availability: String,

    pub youtube_link: String,
    pub photo_url: String,

    /// Only "Active" records are listed on the board.
    pub status: String,
}

/// Field payload sent to the store when creating a profile.
///
/// Built by the create handler after validation/normalization; `status` is
/// always "Active" regardless of what the client sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileFields {
    pub full_name: String,
    pub email: String,
    pub spark_line: String,
    pub skills: Vec<String>,
    pub city: String,
    pub price_usd: f64,
    pub price_local: String,
    pub availability: String,
    pub youtube_link: String,
    pub status: String,
}

/// Page of records as returned by the store's select/create endpoints.
#[derive(Debug, Deserialize)]
pub struct RecordPage {
    #[serde(default)]
    pub records: Vec<RawRecord>,
}

/// Raw record from the store (wire format).
///
/// `fields` is an open map: the store omits unset columns entirely, so we
/// keep it loosely typed and default everything in `into_profile`.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Value,
}

impl RawRecord {
    /// Convert the raw record into a fully-defaulted `Profile`.
    pub fn into_profile(self) -> Profile {
        let f = &self.fields;

        Profile {
            id: self.id,
            full_name: str_field(f, "full_name"),
            email: str_field(f, "email"),
            spark_line: str_field(f, "spark_line"),
            skills: str_list_field(f, "skills"),
            city: str_field(f, "city"),
            price_usd: num_field(f, "price_usd"),
            price_local: str_field(f, "price_local"),
            availability: str_field(f, "availability"),
            youtube_link: str_field(f, "youtube_link"),
            photo_url: str_field(f, "photo_url"),
            status: match f.get("status").and_then(Value::as_str) {
                Some(s) => s.to_string(),
                None => "Active".to_string(),
            },
        }
    }
}

fn str_field(fields: &Value, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn num_field(fields: &Value, key: &str) -> f64 {
    fields.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn str_list_field(fields: &Value, key: &str) -> Vec<String> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
