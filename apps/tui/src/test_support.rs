use async_trait::async_trait;
use smogsense_core::models::parse_prediction;
use smogsense_core::{Backend, DashboardError, PredictionResponse, Station};

const PREDICTION: &str = r#"{
    "current_pm25": 30.0,
    "current_aqi_category": "Moderate",
    "forecast_7day": [
        {"day": 1, "pm25": 30.0, "aqi_category": "Moderate"},
        {"day": 2, "pm25": 45.0, "aqi_category": "Unhealthy for Sensitive Groups"},
        {"day": 3, "pm25": 8.0, "aqi_category": "Good"}
    ]
}"#;

/// Answers every request with the same canned data.
pub struct ScriptedBackend {
    online: bool,
}

impl ScriptedBackend {
    pub const fn healthy() -> Self {
        Self { online: true }
    }

    pub const fn offline() -> Self {
        Self { online: false }
    }
}

#[async_trait(?Send)]
impl Backend for ScriptedBackend {
    async fn fetch_prediction(&self) -> Result<PredictionResponse, DashboardError> {
        if !self.online {
            return Err(DashboardError::fetch("scripted://predict", "connection refused"));
        }
        parse_prediction(PREDICTION).map_err(|e| DashboardError::parse("prediction", e.to_string()))
    }

    async fn fetch_stations(&self) -> Result<Vec<Station>, DashboardError> {
        Ok(vec![
            Station {
                name: "RK Puram".to_string(),
                lat: 28.5633,
                lon: 77.1869,
            },
            Station {
                name: "Mandir Marg".to_string(),
                lat: 28.6364,
                lon: 77.2011,
            },
        ])
    }
}
