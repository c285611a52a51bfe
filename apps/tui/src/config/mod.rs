mod settings;

pub use settings::{
    AppConfig, StationSource, DEFAULT_LOG_FILE, DEFAULT_PREDICT_URL, DEFAULT_STATIONS,
};
