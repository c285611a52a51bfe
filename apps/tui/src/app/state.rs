use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use smogsense_core::{Cycle, Dashboard, DashboardError, DashboardOptions, RequestTicket};
use throbber_widgets_tui::ThrobberState;

use crate::config::AppConfig;

pub struct App {
    pub running: bool,
    pub dashboard: Dashboard,
    pub show_help: bool,
    pub last_frame: Instant,
    pub throbber: ThrobberState,
    pub status_message: String,
    pub last_updated: Option<DateTime<Local>>,
    pub endpoint: String,
    fetch_requested: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            running: true,
            dashboard: Dashboard::new(DashboardOptions {
                show_legend: config.show_legend,
            }),
            show_help: false,
            last_frame: Instant::now(),
            throbber: ThrobberState::default(),
            status_message: "Press Enter to get a prediction".to_string(),
            last_updated: None,
            endpoint: config.predict_url.clone(),
            fetch_requested: false,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(delta);
    }

    /// Moves every animation forward by `delta`.
    pub fn advance(&mut self, delta: Duration) {
        self.dashboard.tick(delta);
        if self.dashboard.is_loading() {
            self.throbber.calc_next();
        }
    }

    /// Marks a fetch as wanted; the event loop picks it up.
    pub fn request_prediction(&mut self) {
        self.fetch_requested = true;
    }

    pub fn take_fetch_request(&mut self) -> bool {
        std::mem::take(&mut self.fetch_requested)
    }

    pub fn begin_request(&mut self) -> RequestTicket {
        self.status_message = format!("Requesting {}", self.endpoint);
        self.dashboard.begin_request()
    }

    pub fn finish_request(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Cycle, DashboardError>,
    ) {
        let failed = outcome.is_err();
        if !self.dashboard.complete(ticket, outcome) {
            return;
        }

        if failed {
            self.status_message = "Prediction failed, press Enter to retry".to_string();
        } else {
            let now = Local::now();
            self.status_message = format!("Updated at {}", now.format("%H:%M:%S"));
            self.last_updated = Some(now);
        }
    }

    pub fn select_day(&mut self, index: usize) {
        if let Err(error) = self.dashboard.select_day(index) {
            tracing::debug!(%error, "ignoring day selection");
        }
    }

    pub fn select_next_day(&mut self) {
        if let Err(error) = self.dashboard.select_next_day() {
            tracing::debug!(%error, "ignoring day selection");
        }
    }

    pub fn select_previous_day(&mut self) {
        if let Err(error) = self.dashboard.select_previous_day() {
            tracing::debug!(%error, "ignoring day selection");
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PREDICT_URL;
    use smogsense_core::{Phase, PredictionResponse, BACKEND_ERROR_MESSAGE};

    fn test_config() -> AppConfig {
        AppConfig::default()
    }

    fn cycle() -> Cycle {
        let prediction: PredictionResponse = smogsense_core::models::parse_prediction(
            r#"{"current_pm25": 80.0, "current_aqi_category": "Unhealthy",
                "forecast_7day": [{"day": 1, "pm25": 70.0, "aqi_category": "Unhealthy"},
                                  {"day": 2, "pm25": 20.0, "aqi_category": "Moderate"}]}"#,
        )
        .unwrap();
        Cycle {
            prediction,
            stations: Vec::new(),
        }
    }

    #[test]
    fn fetch_request_is_taken_once() {
        let mut app = App::new(&test_config());
        assert!(!app.take_fetch_request());
        app.request_prediction();
        assert!(app.take_fetch_request());
        assert!(!app.take_fetch_request());
    }

    #[test]
    fn finishing_a_request_updates_status() {
        let mut app = App::new(&test_config());
        let ticket = app.begin_request();
        assert!(app.dashboard.is_loading());

        app.finish_request(ticket, Ok(cycle()));
        assert_eq!(app.dashboard.phase(), Phase::Ready);
        assert!(app.status_message.starts_with("Updated at"));
        assert!(app.last_updated.is_some());
    }

    #[test]
    fn failed_request_offers_retry() {
        let mut app = App::new(&test_config());
        let ticket = app.begin_request();
        app.finish_request(ticket, Err(DashboardError::timeout(DEFAULT_PREDICT_URL)));

        assert_eq!(app.dashboard.advisory_text(), BACKEND_ERROR_MESSAGE);
        assert!(app.status_message.contains("retry"));
        assert!(app.last_updated.is_none());
    }

    #[test]
    fn stale_response_leaves_status_alone() {
        let mut app = App::new(&test_config());
        let stale = app.begin_request();
        let _current = app.begin_request();
        let status = app.status_message.clone();

        app.finish_request(stale, Ok(cycle()));
        assert_eq!(app.status_message, status);
        assert!(app.dashboard.is_loading());
    }

    #[test]
    fn advancing_drives_dashboard_animations() {
        let mut app = App::new(&test_config());
        let ticket = app.begin_request();
        app.finish_request(ticket, Ok(cycle()));
        let before = app.dashboard.map().pulse_phase();

        app.advance(Duration::from_millis(400));

        assert!((app.dashboard.map().pulse_phase() - before - 0.25).abs() < 1e-9);
        assert!(app.dashboard.forecast().cards().iter().all(|card| card.entered));
    }

    #[test]
    fn out_of_range_day_is_ignored() {
        let mut app = App::new(&test_config());
        let ticket = app.begin_request();
        app.finish_request(ticket, Ok(cycle()));

        app.select_day(5);
        assert_eq!(app.dashboard.selected_day(), Some(0));
        app.select_day(1);
        assert_eq!(app.dashboard.selected_day(), Some(1));
    }
}
