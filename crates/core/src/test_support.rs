use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use crate::backend::Backend;
use crate::error::DashboardError;
use crate::models::{ForecastDay, PredictionResponse, Station};

pub fn sample_stations() -> Vec<Station> {
    vec![
        Station {
            name: "Anand Vihar".to_string(),
            lat: 28.6469,
            lon: 77.3164,
        },
        Station {
            name: "ITO".to_string(),
            lat: 28.6289,
            lon: 77.2411,
        },
        Station {
            name: "Punjabi Bagh".to_string(),
            lat: 28.6740,
            lon: 77.1310,
        },
    ]
}

pub fn forecast_day(day: i64, pm25: f64, category: &str) -> ForecastDay {
    ForecastDay {
        day,
        pm25,
        aqi_category: category.to_string(),
    }
}

pub fn sample_prediction() -> PredictionResponse {
    PredictionResponse {
        current_pm25: 55.0,
        current_aqi_category: "Unhealthy for Sensitive Groups".to_string(),
        forecast_7day: vec![
            forecast_day(1, 61.2, "Unhealthy"),
            forecast_day(2, 48.0, "Unhealthy for Sensitive Groups"),
            forecast_day(3, 33.5, "Moderate"),
            forecast_day(4, 10.25, "Good"),
            forecast_day(5, 160.0, "Very Unhealthy"),
            forecast_day(6, 280.4, "Hazardous"),
            forecast_day(7, 90.0, "Unhealthy"),
        ],
    }
}

/// In-memory backend with scripted responses.
pub struct FakeBackend {
    prediction: RefCell<Option<PredictionResponse>>,
    stations: Option<Vec<Station>>,
    prediction_calls: Cell<usize>,
    station_calls: Cell<usize>,
}

impl FakeBackend {
    pub fn healthy() -> Self {
        Self {
            prediction: RefCell::new(Some(sample_prediction())),
            stations: Some(sample_stations()),
            prediction_calls: Cell::new(0),
            station_calls: Cell::new(0),
        }
    }

    pub fn with_prediction(self, prediction: PredictionResponse) -> Self {
        self.prediction.replace(Some(prediction));
        self
    }

    pub fn without_stations(mut self) -> Self {
        self.stations = None;
        self
    }

    pub fn set_offline(&self) {
        self.prediction.replace(None);
    }

    pub fn prediction_calls(&self) -> usize {
        self.prediction_calls.get()
    }

    pub fn station_calls(&self) -> usize {
        self.station_calls.get()
    }
}

#[async_trait(?Send)]
impl Backend for FakeBackend {
    async fn fetch_prediction(&self) -> Result<PredictionResponse, DashboardError> {
        self.prediction_calls.set(self.prediction_calls.get() + 1);
        self.prediction
            .borrow()
            .clone()
            .ok_or_else(|| DashboardError::fetch("fake://predict", "connection refused"))
    }

    async fn fetch_stations(&self) -> Result<Vec<Station>, DashboardError> {
        self.station_calls.set(self.station_calls.get() + 1);
        self.stations
            .clone()
            .ok_or_else(|| DashboardError::stations("stations.json not found"))
    }
}
