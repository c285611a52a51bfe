use serde::{Deserialize, Serialize};

use crate::aqi::AqiCategory;

/// A fixed monitoring point, as listed in `stations.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub day: i64,
    pub pm25: f64,
    #[serde(default)]
    pub aqi_category: String,
}

/// Body of `GET /predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub current_pm25: f64,
    #[serde(default)]
    pub current_aqi_category: String,
    pub forecast_7day: Vec<ForecastDay>,
}

impl PredictionResponse {
    /// Fills in categories the payload left blank from the PM2.5 value.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.current_aqi_category.trim().is_empty() {
            self.current_aqi_category = AqiCategory::from_pm25(self.current_pm25)
                .as_str()
                .to_string();
        }
        for day in &mut self.forecast_7day {
            if day.aqi_category.trim().is_empty() {
                day.aqi_category = AqiCategory::from_pm25(day.pm25).as_str().to_string();
            }
        }
        self
    }
}

pub fn parse_prediction(body: &str) -> Result<PredictionResponse, serde_json::Error> {
    serde_json::from_str(body)
}

pub fn parse_stations(body: &str) -> Result<Vec<Station>, serde_json::Error> {
    serde_json::from_str(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prediction_payload() {
        let body = r#"{
            "current_pm25": 87.5,
            "current_aqi_category": "Unhealthy",
            "forecast_7day": [
                {"day": 1, "pm25": 80.12, "aqi_category": "Unhealthy"},
                {"day": 2, "pm25": 30.0, "aqi_category": "Moderate"}
            ]
        }"#;

        let prediction = parse_prediction(body).unwrap();
        assert!((prediction.current_pm25 - 87.5).abs() < f64::EPSILON);
        assert_eq!(prediction.current_aqi_category, "Unhealthy");
        assert_eq!(prediction.forecast_7day.len(), 2);
        assert_eq!(prediction.forecast_7day[1].aqi_category, "Moderate");
    }

    #[test]
    fn missing_forecast_is_a_parse_error() {
        assert!(parse_prediction(r#"{"current_pm25": 10}"#).is_err());
        assert!(parse_prediction("<html>").is_err());
    }

    #[test]
    fn blank_categories_are_derived_from_pm25() {
        let prediction = parse_prediction(
            r#"{"current_pm25": 8, "forecast_7day": [{"day": 1, "pm25": 300}]}"#,
        )
        .unwrap()
        .normalized();

        assert_eq!(prediction.current_aqi_category, "Good");
        assert_eq!(prediction.forecast_7day[0].aqi_category, "Hazardous");
    }

    #[test]
    fn parses_station_list() {
        let stations = parse_stations(
            r#"[{"name": "Anand Vihar", "lat": 28.6469, "lon": 77.3164},
                {"name": "ITO", "lat": 28.6289, "lon": 77.2411}]"#,
        )
        .unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name, "Anand Vihar");
    }
}
