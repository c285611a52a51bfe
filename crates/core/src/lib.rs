//! Air-quality dashboard state shared by the terminal and browser front ends.
//!
//! Nothing here draws: front ends read [`Dashboard`] every frame and render
//! it with whatever widget toolkit they use.

pub mod aqi;
pub mod backend;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod map;
pub mod models;
pub mod stations;

#[cfg(test)]
mod test_support;

pub use aqi::{aqi_color, day_name, health_advisory, AqiCategory, LegendEntry, Rgb};
pub use backend::Backend;
pub use dashboard::{CurrentReading, Cycle, Dashboard, DashboardOptions, Phase, PredictionPipeline, RequestTicket};
pub use error::{DashboardError, BACKEND_ERROR_MESSAGE};
pub use models::{ForecastDay, PredictionResponse, Station};
