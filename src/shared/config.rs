use std::env;

use crate::shared::errors::{AppError, AppResult};

/// Runtime configuration, sourced from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::InternalError("DATABASE_URL is not set".to_string()))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| {
                AppError::InternalError(format!("Invalid PORT value '{}': {}", raw, e))
            })?,
            Err(_) => {
                tracing::info!("PORT not set, using default: 8000");
                8000
            }
        };

        Ok(Self { database_url, port })
    }
}
