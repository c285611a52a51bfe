//! The dashboard controller.
//!
//! A refresh runs in three steps so a front end can keep drawing while the
//! network is busy:
//!
//! 1. [`Dashboard::begin_request`] shows the loading state and hands out a
//!    ticket.
//! 2. [`PredictionPipeline::run`] fetches the prediction, then the (memoized)
//!    station list.
//! 3. [`Dashboard::complete`] applies the outcome, unless a newer request was
//!    started in the meantime.
//!
//! [`Dashboard::refresh`] chains the three for callers that can simply await.

use std::rc::Rc;
use std::time::Duration;

use crate::aqi::{aqi_color, day_name, health_advisory, legend, LegendEntry};
use crate::backend::Backend;
use crate::error::DashboardError;
use crate::forecast::ForecastPanel;
use crate::map::MapView;
use crate::models::{ForecastDay, PredictionResponse, Station};
use crate::stations::StationLoader;

pub const LOADING_MESSAGE: &str = "Loading...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Identifies one refresh. Later tickets supersede earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Everything one successful refresh fetched.
#[derive(Debug, Clone)]
pub struct Cycle {
    pub prediction: PredictionResponse,
    pub stations: Vec<Rc<Station>>,
}

#[derive(Debug)]
pub struct PredictionPipeline<B> {
    backend: B,
    stations: StationLoader,
}

impl<B: Backend> PredictionPipeline<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            stations: StationLoader::new(),
        }
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Stations are only requested once the prediction is in hand.
    pub async fn run(&self) -> Result<Cycle, DashboardError> {
        let prediction = self.backend.fetch_prediction().await?.normalized();
        let stations = self.stations.load(&self.backend).await;
        Ok(Cycle {
            prediction,
            stations,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    pub show_legend: bool,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self { show_legend: true }
    }
}

/// The reading behind the header. Outlives a failed refresh, unlike the
/// prediction it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentReading {
    pub pm25: f64,
    pub aqi_category: String,
}

#[derive(Debug)]
pub struct Dashboard {
    options: DashboardOptions,
    phase: Phase,
    issued: u64,
    latest: Option<RequestTicket>,
    current_pm_text: String,
    current_aqi_text: String,
    advisory_text: String,
    current: Option<CurrentReading>,
    prediction: Option<PredictionResponse>,
    stations: Vec<Rc<Station>>,
    forecast: ForecastPanel,
    map: MapView,
    legend: Option<[LegendEntry; 6]>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DashboardOptions::default())
    }
}

impl Dashboard {
    pub fn new(options: DashboardOptions) -> Self {
        Self::with_map(options, MapView::default())
    }

    pub fn with_map(options: DashboardOptions, map: MapView) -> Self {
        Self {
            options,
            phase: Phase::Idle,
            issued: 0,
            latest: None,
            current_pm_text: String::new(),
            current_aqi_text: String::new(),
            advisory_text: String::new(),
            current: None,
            prediction: None,
            stations: Vec::new(),
            forecast: ForecastPanel::new(),
            map,
            legend: None,
        }
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    pub fn current_pm_text(&self) -> &str {
        &self.current_pm_text
    }

    pub fn current_aqi_text(&self) -> &str {
        &self.current_aqi_text
    }

    pub fn advisory_text(&self) -> &str {
        &self.advisory_text
    }

    pub const fn current(&self) -> Option<&CurrentReading> {
        self.current.as_ref()
    }

    /// The prediction behind the forecast strip; `None` once a refresh fails.
    pub const fn prediction(&self) -> Option<&PredictionResponse> {
        self.prediction.as_ref()
    }

    pub fn stations(&self) -> &[Rc<Station>] {
        &self.stations
    }

    pub const fn forecast(&self) -> &ForecastPanel {
        &self.forecast
    }

    pub const fn map(&self) -> &MapView {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut MapView {
        &mut self.map
    }

    pub const fn legend(&self) -> Option<&[LegendEntry; 6]> {
        self.legend.as_ref()
    }

    pub const fn selected_day(&self) -> Option<usize> {
        self.forecast.selected()
    }

    pub fn begin_request(&mut self) -> RequestTicket {
        self.issued += 1;
        let ticket = RequestTicket(self.issued);
        self.latest = Some(ticket);
        self.phase = Phase::Loading;
        self.advisory_text = LOADING_MESSAGE.to_string();
        tracing::debug!(ticket = ticket.0, "prediction requested");
        ticket
    }

    /// Applies the outcome of `ticket`. Returns `false` when a newer request
    /// has been issued since, in which case nothing changes.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<Cycle, DashboardError>,
    ) -> bool {
        if self.latest != Some(ticket) {
            tracing::debug!(ticket = ticket.0, "discarding superseded response");
            return false;
        }

        match outcome {
            Ok(cycle) => self.apply_cycle(cycle),
            Err(error) => self.apply_failure(&error),
        }
        true
    }

    pub async fn refresh<B: Backend>(
        &mut self,
        pipeline: &PredictionPipeline<B>,
    ) -> Result<(), DashboardError> {
        let ticket = self.begin_request();
        let outcome = pipeline.run().await;
        let failure = outcome.as_ref().err().cloned();
        self.complete(ticket, outcome);
        failure.map_or(Ok(()), Err)
    }

    fn apply_cycle(&mut self, cycle: Cycle) {
        let Cycle {
            prediction,
            stations,
        } = cycle;
        let current_pm25 = prediction.current_pm25;
        let current_category = prediction.current_aqi_category.clone();

        self.current_pm_text = format!("PM2.5: {current_pm25} µg/m³");
        self.current_aqi_text = format!("AQI: {current_category}");

        self.forecast.render(&prediction.forecast_7day);

        // Markers start out in the current category; selecting day 0 below
        // rebinds them to that day.
        self.map.rebuild_station_markers(
            &stations,
            aqi_color(&current_category),
            |station| current_popup(station, current_pm25, &current_category),
        );
        self.stations = stations;
        self.current = Some(CurrentReading {
            pm25: current_pm25,
            aqi_category: current_category.clone(),
        });
        self.prediction = Some(prediction);
        self.phase = Phase::Ready;

        if self.forecast.is_empty() {
            self.advisory_text = format!(
                "Today ({current_category}): {}",
                health_advisory(&current_category)
            );
        } else if let Err(error) = self.select_day(0) {
            tracing::warn!(%error, "could not select first forecast day");
        }

        self.map.update_center(current_pm25, &current_category);

        if self.options.show_legend {
            self.legend = Some(legend());
        }

        tracing::info!(
            pm25 = current_pm25,
            category = %current_category,
            days = self.forecast.len(),
            stations = self.stations.len(),
            "prediction applied"
        );
    }

    fn apply_failure(&mut self, error: &DashboardError) {
        tracing::error!(%error, "prediction request failed");
        self.phase = Phase::Failed;
        self.advisory_text = error.user_message();
        self.forecast.clear();
        self.map.clear_station_markers();
        self.stations.clear();
        self.prediction = None;
    }

    /// Highlights day `index`, rebinds the advisory and every station marker
    /// to it and re-centers the map.
    pub fn select_day(&mut self, index: usize) -> Result<(), DashboardError> {
        let day = self.forecast.select(index)?.clone();

        self.advisory_text = advisory_for(&day);
        let title = day_name(day.day);
        self.map
            .restyle_station_markers(aqi_color(&day.aqi_category), |station| {
                day_popup(station, &title, &day)
            });
        self.map.fly_home();

        tracing::debug!(index, day = day.day, "forecast day selected");
        Ok(())
    }

    pub fn select_next_day(&mut self) -> Result<(), DashboardError> {
        let len = self.forecast.len();
        if len == 0 {
            return Ok(());
        }
        let next = self.forecast.selected().map_or(0, |index| (index + 1) % len);
        self.select_day(next)
    }

    pub fn select_previous_day(&mut self) -> Result<(), DashboardError> {
        let len = self.forecast.len();
        if len == 0 {
            return Ok(());
        }
        let previous = self
            .forecast
            .selected()
            .map_or(len - 1, |index| (index + len - 1) % len);
        self.select_day(previous)
    }

    /// Advances the entrance, camera and pulse animations.
    pub fn tick(&mut self, delta: Duration) {
        self.forecast.tick(delta);
        self.map.tick(delta);
    }
}

pub fn advisory_for(day: &ForecastDay) -> String {
    format!(
        "{} ({}): {}",
        day_name(day.day),
        day.aqi_category,
        health_advisory(&day.aqi_category)
    )
}

fn current_popup(station: &Station, pm25: f64, category: &str) -> String {
    format!("{}\nPM2.5: {pm25} µg/m³\nAQI: {category}", station.name)
}

fn day_popup(station: &Station, title: &str, day: &ForecastDay) -> String {
    format!(
        "{}\n{title}: {} µg/m³\nAQI: {}",
        station.name, day.pm25, day.aqi_category
    )
}
