use async_trait::async_trait;

use crate::error::DashboardError;
use crate::models::{PredictionResponse, Station};

/// Where the dashboard gets its data from.
///
/// Futures are not required to be `Send`: both front ends drive requests on a
/// single-threaded executor (a tokio `LocalSet` in the terminal, the browser
/// event loop on the web).
#[async_trait(?Send)]
pub trait Backend {
    async fn fetch_prediction(&self) -> Result<PredictionResponse, DashboardError>;

    async fn fetch_stations(&self) -> Result<Vec<Station>, DashboardError>;
}
