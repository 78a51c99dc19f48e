use crate::core::{AppError, Currency, Result};
use std::env;
use std::str::FromStr;

pub mod database;
pub mod issuer;
pub mod server;
pub mod sheet;

pub use database::DatabaseConfig;
pub use issuer::{BankDetails, IssuerProfile};
pub use server::ServerConfig;
pub use sheet::SheetConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    /// Only loaded for `STORAGE=mysql`
    pub database: Option<DatabaseConfig>,
    pub server: ServerConfig,
    pub issuer: IssuerProfile,
    pub sheet: SheetConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub storage: StorageBackend,
    pub currency: Currency,
}

/// Where records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    MySql,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(StorageBackend::MySql),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(AppError::Configuration(format!(
                "Invalid STORAGE '{}', expected mysql or memory",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl AppConfig {
    /// Filter used when `RUST_LOG` is unset: `LOG_LEVEL` for this crate, info for actix
    pub fn default_log_filter(&self) -> String {
        format!(
            "ledgerline={},actix_web=info",
            self.log_level.trim().to_ascii_lowercase()
        )
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let storage: StorageBackend = env::var("STORAGE")
            .unwrap_or_else(|_| "mysql".to_string())
            .parse()?;

        let currency = env::var("CURRENCY")
            .unwrap_or_else(|_| "INR".to_string())
            .parse::<Currency>()
            .map_err(AppError::Configuration)?;

        let log_format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let database = match storage {
            StorageBackend::MySql => Some(DatabaseConfig::from_env()?),
            StorageBackend::Memory => None,
        };

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format,
                storage,
                currency,
            },
            database,
            server: ServerConfig::from_env()?,
            issuer: IssuerProfile::from_env(),
            sheet: SheetConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(database) = &self.database {
            if database.max_connections == 0 {
                return Err(AppError::Configuration(
                    "DATABASE_MAX_CONNECTIONS must be greater than 0".to_string(),
                ));
            }
            if database.pool_size > database.max_connections {
                return Err(AppError::Configuration(
                    "DATABASE_POOL_SIZE cannot exceed DATABASE_MAX_CONNECTIONS".to_string(),
                ));
            }
        }

        if self.sheet.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "LEAD_SHEET_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.app.log_level.trim().to_ascii_lowercase().as_str()) {
            return Err(AppError::Configuration(format!(
                "Invalid LOG_LEVEL '{}', expected one of {}",
                self.app.log_level,
                LOG_LEVELS.join(", ")
            )));
        }

        if self.issuer.business_name.trim().is_empty() {
            return Err(AppError::Configuration(
                "ISSUER_BUSINESS_NAME cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
