use crate::core::{AppError, Result};
use std::env;

const DEFAULT_SHEET_ID: &str = "1k4pRYDbUMix4Lecfu5tX1B-9JT1pmZweG05OK5lggd8";

/// Where lead rows are imported from
#[derive(Debug, Clone)]
pub struct SheetConfig {
    /// CSV export URL of the lead spreadsheet
    pub csv_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            csv_url: format!(
                "https://docs.google.com/spreadsheets/d/{}/export?format=csv&gid=0",
                DEFAULT_SHEET_ID
            ),
            timeout_secs: 15,
            max_retries: 2,
        }
    }
}

impl SheetConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            csv_url: env::var("LEAD_SHEET_CSV_URL").unwrap_or(defaults.csv_url),
            timeout_secs: env::var("LEAD_SHEET_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.timeout_secs.to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid LEAD_SHEET_TIMEOUT_SECS".to_string())
                })?,
            max_retries: env::var("LEAD_SHEET_MAX_RETRIES")
                .unwrap_or_else(|_| defaults.max_retries.to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid LEAD_SHEET_MAX_RETRIES".to_string())
                })?,
        })
    }
}
