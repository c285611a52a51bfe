//! HTTP access to the prediction service and the station list.

use async_trait::async_trait;
use color_eyre::eyre::{eyre, Result};
use smogsense_core::models::{parse_prediction, parse_stations};
use smogsense_core::{Backend, DashboardError, PredictionResponse, Station};

use crate::config::{AppConfig, StationSource};

pub struct HttpBackend {
    client: reqwest::Client,
    predict_url: String,
    stations: StationSource,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            predict_url: config.predict_url.clone(),
            stations: config.stations.clone(),
        })
    }

    async fn get_text(&self, url: &str) -> Result<String, DashboardError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::status(url, status.as_u16()));
        }

        response.text().await.map_err(|e| transport_error(url, &e))
    }
}

fn transport_error(url: &str, error: &reqwest::Error) -> DashboardError {
    if error.is_timeout() {
        DashboardError::timeout(url)
    } else {
        DashboardError::fetch(url, error.to_string())
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
    async fn fetch_prediction(&self) -> Result<PredictionResponse, DashboardError> {
        tracing::debug!(url = %self.predict_url, "fetching prediction");
        let body = self.get_text(&self.predict_url).await?;
        parse_prediction(&body).map_err(|e| DashboardError::parse("prediction", e.to_string()))
    }

    async fn fetch_stations(&self) -> Result<Vec<Station>, DashboardError> {
        tracing::debug!(source = %self.stations.describe(), "fetching stations");
        let body = match &self.stations {
            StationSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| DashboardError::stations(format!("{}: {e}", path.display())))?,
            StationSource::Url(url) => self.get_text(url).await?,
        };
        parse_stations(&body).map_err(|e| DashboardError::parse("stations", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::path::PathBuf;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves `responses` in order, one connection each.
    async fn serve(responses: Vec<(u16, String)>) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            for (status, body) in responses {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let mut request = [0_u8; 2048];
                let _ = socket.read(&mut request).await;
                let reply = format!(
                    "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        addr
    }

    fn config(predict_url: String, stations: StationSource) -> AppConfig {
        AppConfig {
            predict_url,
            stations,
            ..AppConfig::default()
        }
    }

    const PREDICTION: &str = r#"{"current_pm25": 42.1, "current_aqi_category": "Unhealthy for Sensitive Groups",
        "forecast_7day": [{"day": 1, "pm25": 40.0, "aqi_category": "Unhealthy for Sensitive Groups"}]}"#;

    #[tokio::test]
    async fn fetches_prediction() {
        let addr = serve(vec![(200, PREDICTION.to_string())]).await;
        let backend = HttpBackend::new(&config(
            format!("http://{addr}/predict"),
            StationSource::File(PathBuf::from("missing.json")),
        ))
        .unwrap();

        let prediction = backend.fetch_prediction().await.unwrap();
        assert!((prediction.current_pm25 - 42.1).abs() < 1e-9);
        assert_eq!(prediction.forecast_7day.len(), 1);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let addr = serve(vec![(500, "{}".to_string())]).await;
        let url = format!("http://{addr}/predict");
        let backend = HttpBackend::new(&config(
            url.clone(),
            StationSource::File(PathBuf::from("missing.json")),
        ))
        .unwrap();

        let error = backend.fetch_prediction().await.unwrap_err();
        assert_eq!(error, DashboardError::status(url, 500));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let addr = serve(vec![(200, "<html>oops</html>".to_string())]).await;
        let backend = HttpBackend::new(&config(
            format!("http://{addr}/predict"),
            StationSource::File(PathBuf::from("missing.json")),
        ))
        .unwrap();

        let error = backend.fetch_prediction().await.unwrap_err();
        assert!(matches!(error, DashboardError::Parse { .. }));
    }

    #[tokio::test]
    async fn reads_stations_from_file_and_url() {
        let path = std::env::temp_dir().join(format!("smogsense-stations-{}.json", std::process::id()));
        tokio::fs::write(&path, r#"[{"name": "ITO", "lat": 28.6289, "lon": 77.2411}]"#)
            .await
            .unwrap();
        let backend = HttpBackend::new(&config(
            DEFAULT_URL.to_string(),
            StationSource::File(path.clone()),
        ))
        .unwrap();
        let stations = backend.fetch_stations().await.unwrap();
        assert_eq!(stations[0].name, "ITO");
        let _ = tokio::fs::remove_file(&path).await;

        let addr = serve(vec![(
            200,
            r#"[{"name": "Dwarka", "lat": 28.5921, "lon": 77.0460}]"#.to_string(),
        )])
        .await;
        let backend = HttpBackend::new(&config(
            DEFAULT_URL.to_string(),
            StationSource::Url(format!("http://{addr}/stations.json")),
        ))
        .unwrap();
        let stations = backend.fetch_stations().await.unwrap();
        assert_eq!(stations[0].name, "Dwarka");
    }

    #[tokio::test]
    async fn missing_station_file_is_reported() {
        let backend = HttpBackend::new(&config(
            DEFAULT_URL.to_string(),
            StationSource::File(PathBuf::from("/nonexistent/stations.json")),
        ))
        .unwrap();
        let error = backend.fetch_stations().await.unwrap_err();
        assert!(matches!(error, DashboardError::Stations { .. }));
    }

    const DEFAULT_URL: &str = crate::config::DEFAULT_PREDICT_URL;
}
