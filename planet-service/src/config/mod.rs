use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct PlanetConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    /// Environment mode, reported by `GET /os`.
    pub environment: String,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub store: StoreConfig,
    pub static_dir: PathBuf,
    pub api_docs_path: PathBuf,
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum StoreConfig {
    Mongodb(MongoConfig),
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: Secret<String>,
    pub database: String,
    pub collection: String,
    pub timeout_secs: u64,
}

impl PlanetConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let is_prod = environment == "prod";

        let store = match get_env("STORE_BACKEND", Some("mongodb"), false)?
            .to_lowercase()
            .as_str()
        {
            "mongodb" => StoreConfig::Mongodb(MongoConfig {
                uri: Secret::new(get_env("MONGO_URI", None, is_prod)?),
                database: get_env("MONGODB_DATABASE", Some("mydb"), is_prod)?,
                collection: get_env("MONGODB_COLLECTION", Some("planets"), is_prod)?,
                timeout_secs: parse_env("MONGODB_TIMEOUT_SECS", 5)?,
            }),
            "memory" => StoreConfig::Memory,
            other => {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "Invalid store backend: {}",
                    other
                )))
            }
        };

        Ok(PlanetConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("planet-service"), false)?,
            log_level: get_env("LOG_LEVEL", Some("info"), false)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            store,
            static_dir: get_env("STATIC_DIR", Some("public"), false)?.into(),
            api_docs_path: get_env("API_DOCS_PATH", Some("oas.json"), false)?.into(),
            max_body_bytes: parse_env("MAX_BODY_BYTES", 100 * 1024)?,
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.parse().map_err(|e: T::Err| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value '{}': {}", key, val, e))
        }),
        Err(_) => Ok(default),
    }
}
