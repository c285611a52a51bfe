use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PREDICT_URL: &str = "http://127.0.0.1:8000/predict";
pub const DEFAULT_STATIONS: &str = "stations.json";
pub const DEFAULT_LOG_FILE: &str = "smogsense.log";

/// Where the station list is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationSource {
    File(PathBuf),
    Url(String),
}

impl StationSource {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub predict_url: String,
    pub stations: StationSource,
    pub show_legend: bool,
    pub request_timeout: Option<Duration>,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            predict_url: DEFAULT_PREDICT_URL.to_string(),
            stations: StationSource::File(PathBuf::from(DEFAULT_STATIONS)),
            show_legend: true,
            request_timeout: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            debug: false,
        }
    }
}

impl AppConfig {
    /// Reads `.env` and the process environment.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let predict_url =
            lookup("SMOGSENSE_PREDICT_URL").unwrap_or_else(|| DEFAULT_PREDICT_URL.to_string());
        reqwest::Url::parse(&predict_url)
            .map_err(|e| eyre!("Invalid prediction endpoint {predict_url}: {e}"))?;

        let stations = StationSource::parse(
            &lookup("SMOGSENSE_STATIONS").unwrap_or_else(|| DEFAULT_STATIONS.to_string()),
        );

        let show_legend = lookup("SMOGSENSE_LEGEND").map_or(true, |value| parse_flag(&value));

        let request_timeout = match lookup("SMOGSENSE_REQUEST_TIMEOUT_SECS") {
            Some(value) if !value.trim().is_empty() => {
                let secs: u64 = value
                    .trim()
                    .parse()
                    .map_err(|_| eyre!("Invalid request timeout: {value}"))?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            _ => None,
        };

        let log_file = lookup("SMOGSENSE_LOG_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);

        let debug = lookup("DEBUG").is_some_and(|value| parse_flag(&value));

        Ok(Self {
            predict_url,
            stations,
            show_legend,
            request_timeout,
            log_file,
            debug,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "0" | "false" | "no" | "off" | ""
    )
}
