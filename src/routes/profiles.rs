// src/routes/profiles.rs

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::board::{self, options, BoardFilter, BudgetBucket};
use crate::error::ApiError;
use crate::store::models::{Profile, ProfileFields};
use crate::AppState;

/// Incoming profile submission (JSON body).
///
/// `skills` and `price_usd` stay loosely typed here: clients historically
/// send `skills` either as an array or as a JSON-encoded string, and
/// `price_usd` either as a number or a numeric string. Unknown fields
/// (including any client-supplied `status`) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileSubmission {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub spark_line: Option<String>,
    #[serde(default)]
    pub skills: Option<Value>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub price_usd: Option<Value>,
    #[serde(default)]
    pub price_local: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub youtube_link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateProfileResponse {
    pub success: bool,
    pub id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ListProfilesResponse {
    pub success: bool,
    pub profiles: Vec<Profile>,
}

/// Optional board filters on the list endpoint. Absent, empty, or
/// sentinel-valued parameters leave that dimension inactive.
#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    pub q: Option<String>,
    pub skill: Option<String>,
    pub city: Option<String>,
    pub availability: Option<String>,
    pub budget: Option<String>,
}

impl BoardQuery {
    fn into_filter(self) -> BoardFilter {
        BoardFilter {
            search: active(self.q, ""),
            skill: active(self.skill, options::ALL_SKILLS),
            city: active(self.city, options::ALL_CITIES),
            availability: active(self.availability, options::ANY_TIME),
            budget: self.budget.as_deref().and_then(BudgetBucket::from_label),
        }
    }
}

fn active(value: Option<String>, sentinel: &str) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != sentinel)
}

/// POST /api/profiles
///
/// Validates and normalizes the submission, then inserts exactly one record
/// with status forced to "Active". Validation failures name the offending
/// fields; store failures surface the store's diagnostic text.
pub async fn create_profile(
    State(state): State<AppState>,
    Json(submission): Json<ProfileSubmission>,
) -> Result<Json<CreateProfileResponse>, ApiError> {
    let fields = normalize(submission)?;

    match state.store.create_profile(&fields).await {
        Ok(id) => Ok(Json(CreateProfileResponse {
            success: true,
            id,
            message: "Profile created successfully".to_string(),
        })),
        Err(err) => {
            error!("Failed to create profile: {}", err);
            Err(err.into())
        }
    }
}

/// GET /api/profiles
///
/// Lists active profiles. Store failures degrade to an empty board with
/// success indicated so the page keeps rendering.
pub async fn list_profiles(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> Json<ListProfilesResponse> {
    let profiles = match state.store.list_active_profiles().await {
        Ok(profiles) => profiles,
        Err(err) => {
            error!("Failed to fetch profiles from store: {}", err);
            Vec::new()
        }
    };

    let profiles = board::apply(&profiles, &query.into_filter());

    Json(ListProfilesResponse {
        success: true,
        profiles,
    })
}

/// Check required fields, trim everything, and build the store payload.
fn normalize(submission: ProfileSubmission) -> Result<ProfileFields, ApiError> {
    let mut missing: Vec<String> = Vec::new();

    let full_name = required(submission.full_name, "full_name", &mut missing);
    let email = required(submission.email, "email", &mut missing);
    let spark_line = required(submission.spark_line, "spark_line", &mut missing);
    let city = required(submission.city, "city", &mut missing);

    let price_usd = match parse_price(submission.price_usd.as_ref()) {
        Some(price) => price,
        None => {
            missing.push("price_usd".to_string());
            0.0
        }
    };

    if !missing.is_empty() {
        return Err(ApiError::Validation(missing));
    }

    Ok(ProfileFields {
        full_name,
        email: email.to_lowercase(),
        spark_line,
        skills: resolve_skills(submission.skills.as_ref()),
        city,
        price_usd,
        price_local: trimmed(submission.price_local),
        availability: match trimmed(submission.availability) {
            a if a.is_empty() => "Tonight".to_string(),
            a => a,
        },
        youtube_link: trimmed(submission.youtube_link),
        status: "Active".to_string(),
    })
}

/// Trim a required field; record its name when missing or empty.
fn required(value: Option<String>, name: &str, missing: &mut Vec<String>) -> String {
    let value = trimmed(value);
    if value.is_empty() {
        missing.push(name.to_string());
    }
    value
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Coerce `price_usd` from a number or numeric string.
fn parse_price(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Resolve the skills field to a list of trimmed, non-empty strings.
///
/// Accepts a JSON array or the legacy JSON-encoded-string form; any parse
/// failure recovers to an empty list rather than failing the request.
fn resolve_skills(value: Option<&Value>) -> Vec<String> {
    let parsed;
    let list = match value {
        Some(Value::Array(items)) => items.as_slice(),
        Some(Value::String(encoded)) => match serde_json::from_str::<Value>(encoded) {
            Ok(Value::Array(items)) => {
                parsed = items;
                parsed.as_slice()
            }
            _ => {
                warn!("Unparseable skills submission, treating as empty list");
                return Vec::new();
            }
        },
        _ => return Vec::new(),
    };

    list.iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppEnv, Config};
    use crate::store::client::{ProfileStore, StoreError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    struct StubProfileStore {
        created: Mutex<Vec<ProfileFields>>,
        create_error: Mutex<Option<StoreError>>,
        profiles: Mutex<Vec<Profile>>,
        fail_list: bool,
    }

    impl Default for StubProfileStore {
        fn default() -> Self {
            Self {
                created: Mutex::new(Vec::new()),
                create_error: Mutex::new(None),
                profiles: Mutex::new(Vec::new()),
                fail_list: false,
            }
        }
    }

    #[async_trait]
    impl ProfileStore for StubProfileStore {
        async fn create_profile(&self, fields: &ProfileFields) -> Result<String, StoreError> {
            if let Some(err) = self.create_error.lock().unwrap().take() {
                return Err(err);
            }
            self.created.lock().unwrap().push(fields.clone());
            Ok("rec-stub-1".to_string())
        }

        async fn list_active_profiles(&self) -> Result<Vec<Profile>, StoreError> {
            if self.fail_list {
                return Err(StoreError::Api {
                    status: 500,
                    details: "store down".to_string(),
                });
            }
            Ok(self.profiles.lock().unwrap().clone())
        }
    }

    fn test_config() -> Config {
        Config {
            env: AppEnv::Development,
            http_port: 3000,
            airtable_api_key: None,
            airtable_base_id: None,
            profiles_table: "Profiles".to_string(),
        }
    }

    fn state_with(store: Arc<StubProfileStore>) -> AppState {
        AppState {
            store,
            config: test_config(),
        }
    }

    fn submission(value: serde_json::Value) -> ProfileSubmission {
        serde_json::from_value(value).unwrap()
    }

    fn valid_submission() -> ProfileSubmission {
        submission(json!({
            "full_name": "Ann",
            "email": "a@x.com",
            "spark_line": "I teach yoga",
            "skills": ["Yoga Instruction"],
            "city": "Pune",
            "price_usd": "25",
            "availability": "Tonight",
        }))
    }

    fn stub_profile(name: &str, skills: &[&str], city: &str, price: f64, when: &str) -> Profile {
        Profile {
            id: format!("rec-{}", name),
            full_name: name.to_string(),
            email: String::new(),
            spark_line: String::new(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            city: city.to_string(),
            price_usd: price,
            price_local: String::new(),
            availability: when.to_string(),
            youtube_link: String::new(),
            photo_url: String::new(),
            status: "Active".to_string(),
        }
    }

    #[tokio::test]
    async fn create_returns_id_and_normalizes_fields() {
        let store = Arc::new(StubProfileStore::default());
        let state = state_with(store.clone());

        let body = submission(json!({
            "full_name": "  Ann  ",
            "email": "  A@X.Com ",
            "spark_line": "I teach yoga",
            "skills": ["Yoga Instruction", " Meditation "],
            "city": " Pune",
            "price_usd": "25",
        }));

        let Json(response) = create_profile(State(state), Json(body)).await.unwrap();
        assert!(response.success);
        assert_eq!(response.id, "rec-stub-1");

        let created = store.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        let fields = &created[0];
        assert_eq!(fields.full_name, "Ann");
        assert_eq!(fields.email, "a@x.com");
        assert_eq!(fields.city, "Pune");
        assert_eq!(fields.price_usd, 25.0);
        assert_eq!(fields.skills, vec!["Yoga Instruction", "Meditation"]);
        // Defaults applied when absent.
        assert_eq!(fields.availability, "Tonight");
        assert_eq!(fields.price_local, "");
        assert_eq!(fields.status, "Active");
    }

    #[tokio::test]
    async fn create_rejects_missing_required_fields_without_insert() {
        let store = Arc::new(StubProfileStore::default());
        let state = state_with(store.clone());

        let body = submission(json!({
            "full_name": "Ann",
            "email": "   ",
            "city": "Pune",
            "price_usd": 25,
        }));

        let result = create_profile(State(state), Json(body)).await;
        match result {
            Err(ApiError::Validation(fields)) => {
                assert_eq!(fields, vec!["email", "spark_line"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_unparseable_price() {
        let store = Arc::new(StubProfileStore::default());
        let state = state_with(store.clone());

        let body = submission(json!({
            "full_name": "Ann",
            "email": "a@x.com",
            "spark_line": "I teach yoga",
            "city": "Pune",
            "price_usd": "twenty-five",
        }));

        let result = create_profile(State(state), Json(body)).await;
        match result {
            Err(ApiError::Validation(fields)) => assert_eq!(fields, vec!["price_usd"]),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_accepts_json_encoded_skills_string() {
        let store = Arc::new(StubProfileStore::default());
        let state = state_with(store.clone());

        let body = submission(json!({
            "full_name": "Ann",
            "email": "a@x.com",
            "spark_line": "I teach yoga",
            "skills": "[\"A\",\"B\"]",
            "city": "Pune",
            "price_usd": 25,
        }));

        create_profile(State(state), Json(body)).await.unwrap();
        let created = store.created.lock().unwrap();
        assert_eq!(created[0].skills, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn create_recovers_malformed_skills_to_empty_list() {
        let store = Arc::new(StubProfileStore::default());
        let state = state_with(store.clone());

        let body = submission(json!({
            "full_name": "Ann",
            "email": "a@x.com",
            "spark_line": "I teach yoga",
            "skills": "[not json",
            "city": "Pune",
            "price_usd": 25,
        }));

        let Json(response) = create_profile(State(state), Json(body)).await.unwrap();
        assert!(response.success);
        assert!(store.created.lock().unwrap()[0].skills.is_empty());
    }

    #[tokio::test]
    async fn create_ignores_client_supplied_status() {
        let store = Arc::new(StubProfileStore::default());
        let state = state_with(store.clone());

        let body = submission(json!({
            "full_name": "Ann",
            "email": "a@x.com",
            "spark_line": "I teach yoga",
            "city": "Pune",
            "price_usd": 25,
            "status": "Hidden",
        }));

        create_profile(State(state), Json(body)).await.unwrap();
        assert_eq!(store.created.lock().unwrap()[0].status, "Active");
    }

    #[tokio::test]
    async fn create_without_store_config_is_a_config_error() {
        let store = Arc::new(StubProfileStore {
            create_error: Mutex::new(Some(StoreError::NotConfigured)),
            ..Default::default()
        });
        let state = state_with(store);

        let result = create_profile(State(state), Json(valid_submission())).await;
        assert!(matches!(result, Err(ApiError::NotConfigured)));
    }

    #[tokio::test]
    async fn create_surfaces_upstream_diagnostics() {
        let store = Arc::new(StubProfileStore {
            create_error: Mutex::new(Some(StoreError::Api {
                status: 422,
                details: "Unknown field name: price_usd".to_string(),
            })),
            ..Default::default()
        });
        let state = state_with(store);

        let result = create_profile(State(state), Json(valid_submission())).await;
        match result {
            Err(ApiError::Upstream(details)) => {
                assert!(details.contains("Unknown field name"));
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_degrades_to_empty_board_on_store_failure() {
        let store = Arc::new(StubProfileStore {
            fail_list: true,
            ..Default::default()
        });
        let state = state_with(store);

        let Json(response) = list_profiles(State(state), Query(BoardQuery::default())).await;
        assert!(response.success);
        assert!(response.profiles.is_empty());
    }

    #[tokio::test]
    async fn list_returns_profiles_in_store_order() {
        let store = Arc::new(StubProfileStore {
            profiles: Mutex::new(vec![
                stub_profile("Ann", &["Yoga"], "Pune", 19.0, "Tonight"),
                stub_profile("Ben", &["Cocktails"], "Mumbai", 30.0, "24h"),
            ]),
            ..Default::default()
        });
        let state = state_with(store);

        let Json(response) = list_profiles(State(state), Query(BoardQuery::default())).await;
        let names: Vec<_> = response.profiles.iter().map(|p| p.full_name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Ben"]);
    }

    #[tokio::test]
    async fn list_applies_query_filters_and_ignores_sentinels() {
        let store = Arc::new(StubProfileStore {
            profiles: Mutex::new(vec![
                stub_profile("Ann", &["Yoga"], "Pune", 19.0, "Tonight"),
                stub_profile("Ben", &["Cocktails"], "Mumbai", 30.0, "24h"),
            ]),
            ..Default::default()
        });
        let state = state_with(store);

        let query = BoardQuery {
            skill: Some("Cocktails".to_string()),
            city: Some("All Cities".to_string()),
            budget: Some("Any Budget".to_string()),
            ..Default::default()
        };

        let Json(response) = list_profiles(State(state), Query(query)).await;
        assert_eq!(response.profiles.len(), 1);
        assert_eq!(response.profiles[0].full_name, "Ben");
    }

    #[tokio::test]
    async fn listed_skills_round_trip_in_order() {
        let store = Arc::new(StubProfileStore::default());
        let state = state_with(store.clone());

        let body = submission(json!({
            "full_name": "Ann",
            "email": "a@x.com",
            "spark_line": "I teach yoga",
            "skills": ["A", "B"],
            "city": "Pune",
            "price_usd": 25,
        }));
        create_profile(State(state.clone()), Json(body)).await.unwrap();

        // Reflect the stored fields back as a listed profile, the way the
        // store would serve them.
        let fields = store.created.lock().unwrap()[0].clone();
        store.profiles.lock().unwrap().push(Profile {
            id: "rec-stub-1".to_string(),
            full_name: fields.full_name,
            email: fields.email,
            spark_line: fields.spark_line,
            skills: fields.skills,
            city: fields.city,
            price_usd: fields.price_usd,
            price_local: fields.price_local,
            availability: fields.availability,
            youtube_link: fields.youtube_link,
            photo_url: String::new(),
            status: fields.status,
        });

        let Json(response) = list_profiles(State(state), Query(BoardQuery::default())).await;
        assert_eq!(response.profiles[0].skills, vec!["A", "B"]);
        assert_eq!(response.profiles[0].price_usd, 25.0);
    }
}
