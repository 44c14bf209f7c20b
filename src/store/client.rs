// src/store/client.rs

use crate::config::Config;
use crate::store::models::{Profile, ProfileFields, RecordPage};

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

const AIRTABLE_API_URL: &str = "https://api.airtable.com/v0";

/// Select formula restricting the board to visible records.
const ACTIVE_FILTER: &str = "{status} = 'Active'";

/// Listing page size. The board never shows more than this many profiles.
const MAX_RECORDS: &str = "100";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile store is not configured")]
    NotConfigured,

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("store error {status}: {details}")]
    Api { status: u16, details: String },

    #[error("malformed store response: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert one profile record and return the identifier the store
    /// assigned to it.
    async fn create_profile(&self, fields: &ProfileFields) -> Result<String, StoreError>;

    /// Fetch up to 100 records whose status is "Active".
    async fn list_active_profiles(&self) -> Result<Vec<Profile>, StoreError>;
}

/// Convenient type alias for dyn store.
pub type DynProfileStore = Arc<dyn ProfileStore>;

/// Airtable-backed implementation talking to the REST API over HTTPS.
#[derive(Clone)]
pub struct AirtableProfileStore {
    http: reqwest::Client,
    api_key: String,
    base_id: String,
    table: String,
}

impl AirtableProfileStore {
    pub fn new(http: reqwest::Client, api_key: String, base_id: String, table: String) -> Self {
        Self {
            http,
            api_key,
            base_id,
            table,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/{}/{}", AIRTABLE_API_URL, self.base_id, self.table)
    }
}

/// No-op store used when credentials are not configured.
///
/// Reads yield an empty page so the board still renders; writes fail with a
/// configuration error so the submitter sees what is wrong.
#[derive(Clone)]
pub struct NoopProfileStore;

impl NoopProfileStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProfileStore for NoopProfileStore {
    async fn create_profile(&self, _fields: &ProfileFields) -> Result<String, StoreError> {
        Err(StoreError::NotConfigured)
    }

    async fn list_active_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        Ok(vec![])
    }
}

/// Build the profile store from config.
///
/// If both AIRTABLE_API_KEY and AIRTABLE_BASE_ID are set -> Airtable client
/// Otherwise -> Noop store (board lists nothing, submissions are refused)
pub fn build_profile_store(cfg: &Config) -> DynProfileStore {
    match (cfg.airtable_api_key.clone(), cfg.airtable_base_id.clone()) {
        (Some(api_key), Some(base_id)) => {
            info!(
                "Initializing AirtableProfileStore for base={} table={}",
                base_id, cfg.profiles_table
            );
            let store = AirtableProfileStore::new(
                reqwest::Client::new(),
                api_key,
                base_id,
                cfg.profiles_table.clone(),
            );
            Arc::new(store) as DynProfileStore
        }
        _ => {
            warn!("AIRTABLE_API_KEY / AIRTABLE_BASE_ID not set; using NoopProfileStore (no profiles will be stored or listed)");
            Arc::new(NoopProfileStore::new()) as DynProfileStore
        }
    }
}

#[async_trait]
impl ProfileStore for AirtableProfileStore {
    async fn create_profile(&self, fields: &ProfileFields) -> Result<String, StoreError> {
        let body = json!({
            "records": [ { "fields": fields } ]
        });

        let response = self
            .http
            .post(self.table_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let details = response.text().await.unwrap_or_default();
            return Err(StoreError::Api { status, details });
        }

        let page: RecordPage = response.json().await?;

        page.records
            .into_iter()
            .next()
            .map(|record| record.id)
            .ok_or_else(|| StoreError::Malformed("create returned no records".to_string()))
    }

    async fn list_active_profiles(&self) -> Result<Vec<Profile>, StoreError> {
        let response = self
            .http
            .get(self.table_url())
            .bearer_auth(&self.api_key)
            .query(&[("filterByFormula", ACTIVE_FILTER), ("maxRecords", MAX_RECORDS)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let details = response.text().await.unwrap_or_default();
            return Err(StoreError::Api { status, details });
        }

        let page: RecordPage = response.json().await?;

        Ok(page
            .records
            .into_iter()
            .map(|record| record.into_profile())
            .collect())
    }
}
