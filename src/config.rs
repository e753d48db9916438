use std::env;

use chrono::FixedOffset;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Rate limiting
    pub disable_rate_limiting: bool,
    pub rate_limit_metadata_per_second: u64,
    pub rate_limit_metadata_burst: u32,
    pub rate_limit_data_per_second: u64,
    pub rate_limit_data_burst: u32,

    // Aggregation windows
    //
    // Day and ISO-week boundaries are computed in this fixed offset rather
    // than whatever zone the host happens to run in. Storage stays UTC.
    pub aggregation_utc_offset_minutes: i32,

    // Application metadata
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if required environment variables are not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            // Database
            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,

            // API settings
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),

            // Rate limiting
            disable_rate_limiting: env::var("DISABLE_RATE_LIMITING")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            rate_limit_metadata_per_second: env::var("RATE_LIMIT_METADATA_PER_SECOND")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
            rate_limit_metadata_burst: env::var("RATE_LIMIT_METADATA_BURST")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),
            rate_limit_data_per_second: env::var("RATE_LIMIT_DATA_PER_SECOND")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            rate_limit_data_burst: env::var("RATE_LIMIT_DATA_BURST")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .unwrap_or(60),

            // Aggregation windows (default UTC)
            aggregation_utc_offset_minutes: env::var("AGGREGATION_UTC_OFFSET_MINUTES")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .unwrap_or(0),

            // Application metadata
            deployment: Deployment::from_str(
                &env::var("DEPLOYMENT").unwrap_or_else(|_| "local".to_string()),
            ),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    /// The fixed offset used for day/week window computation.
    ///
    /// Falls back to UTC if the configured minute offset is out of range.
    #[must_use]
    pub fn aggregation_offset(&self) -> FixedOffset {
        self.aggregation_utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_offset_minutes(minutes: i32) -> Config {
        Config {
            database_url: "postgres://localhost/test".to_string(),
            api_host: "0.0.0.0".to_string(),
            api_port: 3000,
            disable_rate_limiting: true,
            rate_limit_metadata_per_second: 5,
            rate_limit_metadata_burst: 60,
            rate_limit_data_per_second: 10,
            rate_limit_data_burst: 60,
            aggregation_utc_offset_minutes: minutes,
            deployment: Deployment::Local,
        }
    }

    #[test]
    fn aggregation_offset_converts_minutes_east() {
        let config = config_with_offset_minutes(120);
        assert_eq!(
            config.aggregation_offset(),
            FixedOffset::east_opt(2 * 3600).unwrap()
        );
    }

    #[test]
    fn aggregation_offset_falls_back_to_utc_out_of_range() {
        for minutes in [i32::MIN, i32::MAX, 24 * 60] {
            let config = config_with_offset_minutes(minutes);
            assert_eq!(
                config.aggregation_offset(),
                FixedOffset::east_opt(0).unwrap()
            );
        }
    }
}
