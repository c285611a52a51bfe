use clap::{CommandFactory, Parser};

#[derive(Debug, Parser)]
#[command(name = "smogsense", version, about = "SmogSense PM2.5 forecast dashboard")]
pub struct CliArgs {
    /// Fetch one prediction, print a report and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the prediction endpoint
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Override the station list (file path or http(s) URL)
    #[arg(long, value_name = "PATH|URL")]
    pub stations: Option<String>,

    /// Hide the AQI legend
    #[arg(long = "no-legend")]
    pub no_legend: bool,

    /// Give up on a request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Override the log file used while the dashboard is running
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(endpoint) = &self.endpoint {
            std::env::set_var("SMOGSENSE_PREDICT_URL", endpoint);
        }
        if let Some(stations) = &self.stations {
            std::env::set_var("SMOGSENSE_STATIONS", stations);
        }
        if self.no_legend {
            std::env::set_var("SMOGSENSE_LEGEND", "0");
        }
        if let Some(timeout) = self.timeout {
            std::env::set_var("SMOGSENSE_REQUEST_TIMEOUT_SECS", timeout.to_string());
        }
        if let Some(path) = &self.log_file {
            std::env::set_var("SMOGSENSE_LOG_FILE", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    pub const fn is_headless(&self) -> bool {
        self.headless || self.json
    }

    pub fn help_text() -> String {
        let mut command = Self::command();
        let mut buffer = Vec::new();
        command.write_help(&mut buffer).ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let args = CliArgs::try_parse_from([
            "smogsense",
            "--endpoint",
            "http://10.0.0.5:8000/predict",
            "--stations",
            "data/stations.json",
            "--no-legend",
            "--timeout",
            "20",
        ])
        .unwrap();

        assert_eq!(
            args.endpoint.as_deref(),
            Some("http://10.0.0.5:8000/predict")
        );
        assert_eq!(args.stations.as_deref(), Some("data/stations.json"));
        assert!(args.no_legend);
        assert_eq!(args.timeout, Some(20));
        assert!(!args.is_headless());
    }

    #[test]
    fn json_implies_headless() {
        let args = CliArgs::try_parse_from(["smogsense", "--json"]).unwrap();
        assert!(args.is_headless());
    }

    #[test]
    fn help_mentions_flags() {
        let help = CliArgs::help_text();
        assert!(help.contains("--endpoint"));
        assert!(help.contains("--headless"));
    }
}
