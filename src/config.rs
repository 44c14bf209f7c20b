use std::{env, str::FromStr};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Debug, Clone, Copy)]
pub enum AppEnv {
    Development,
    Staging,
    Production,
}

impl FromStr for AppEnv {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnv::Development),
            "staging" | "stage" => Ok(AppEnv::Staging),
            "production" | "prod" => Ok(AppEnv::Production),
            _ => Ok(AppEnv::Development), // default if unknown
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub env: AppEnv,
    pub http_port: u16,

    /// Airtable credentials. Both must be present (and non-empty) for the
    /// gateway to reach the real store; otherwise reads degrade to empty
    /// results and writes fail with a configuration error.
    pub airtable_api_key: Option<String>,
    pub airtable_base_id: Option<String>,

    /// Table holding profile records. Defaults to "Profiles".
    pub profiles_table: String,
}

/// Entry point to load configuration
pub fn load() -> Result<Config> {
    load_dotenv()?;
    Config::from_env()
}

/// Load .env base, then .env.{APP_ENV}
fn load_dotenv() -> Result<()> {
    // 1. Load base .env (if it exists)
    let _ = dotenvy::dotenv();

    // 2. Read APP_ENV from env (may come from .env)
    let env_name = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

    // 3. Try to load .env.{APP_ENV}, e.g. .env.development
    let filename = format!(".env.{}", env_name);
    let _ = dotenvy::from_filename(&filename);

    Ok(())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let env = AppEnv::from_str(&env_str).unwrap_or(AppEnv::Development);

        let http_port: u16 = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| "HTTP_PORT must be a valid u16")?;

        // An empty value is as good as a missing one here.
        let airtable_api_key = env::var("AIRTABLE_API_KEY").ok().filter(|v| !v.is_empty());
        let airtable_base_id = env::var("AIRTABLE_BASE_ID").ok().filter(|v| !v.is_empty());

        let profiles_table =
            env::var("AIRTABLE_PROFILES_TABLE").unwrap_or_else(|_| "Profiles".to_string());

        Ok(Self {
            env,
            http_port,
            airtable_api_key,
            airtable_base_id,
            profiles_table,
        })
    }

    /// Whether both store secrets are present.
    pub fn store_configured(&self) -> bool {
        self.airtable_api_key.is_some() && self.airtable_base_id.is_some()
    }
}
