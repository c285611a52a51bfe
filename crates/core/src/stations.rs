use std::cell::RefCell;
use std::rc::Rc;

use crate::backend::Backend;
use crate::models::Station;

/// Session cache for the station list.
///
/// The list is fetched on first use and kept for the lifetime of the loader.
/// A failed or empty fetch leaves the cache empty, so the next call tries
/// again.
#[derive(Debug, Default)]
pub struct StationLoader {
    cache: RefCell<Vec<Rc<Station>>>,
}

impl StationLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        !self.cache.borrow().is_empty()
    }

    pub fn cached(&self) -> Vec<Rc<Station>> {
        self.cache.borrow().clone()
    }

    /// Never fails: errors are logged and yield an empty list.
    pub async fn load<B: Backend + ?Sized>(&self, backend: &B) -> Vec<Rc<Station>> {
        if self.is_loaded() {
            return self.cached();
        }

        match backend.fetch_stations().await {
            Ok(stations) => {
                let stations: Vec<Rc<Station>> = stations.into_iter().map(Rc::new).collect();
                tracing::debug!(count = stations.len(), "loaded stations");
                self.cache.replace(stations.clone());
                stations
            }
            Err(error) => {
                tracing::error!(%error, "failed to load stations");
                Vec::new()
            }
        }
    }
}
