use thiserror::Error;

/// Text shown in the advisory area whenever a prediction cannot be fetched.
pub const BACKEND_ERROR_MESSAGE: &str = "Error connecting to backend";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("request to {url} failed: {message}")]
    Fetch { url: String, message: String },

    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to parse {what}: {message}")]
    Parse { what: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("failed to load stations: {message}")]
    Stations { message: String },

    #[error("day {index} is out of range for a forecast of {len} days")]
    DayOutOfRange { index: usize, len: usize },

    #[error("view needs at least {min_width}x{min_height} cells, got {width}x{height}")]
    Layout {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
}

impl DashboardError {
    pub fn fetch<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn status<U: Into<String>>(url: U, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    pub fn parse<W: Into<String>, M: Into<String>>(what: W, message: M) -> Self {
        Self::Parse {
            what: what.into(),
            message: message.into(),
        }
    }

    pub fn timeout<U: Into<String>>(url: U) -> Self {
        Self::Timeout { url: url.into() }
    }

    pub fn stations<M: Into<String>>(message: M) -> Self {
        Self::Stations {
            message: message.into(),
        }
    }

    /// Network, status and payload failures all read the same to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::DayOutOfRange { .. } | Self::Layout { .. } => self.to_string(),
            _ => BACKEND_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_collapse_to_one_message() {
        let errors = [
            DashboardError::fetch("http://127.0.0.1:8000/predict", "connection refused"),
            DashboardError::status("http://127.0.0.1:8000/predict", 500),
            DashboardError::parse("prediction", "expected value at line 1"),
            DashboardError::timeout("http://127.0.0.1:8000/predict"),
        ];
        for error in errors {
            assert_eq!(error.user_message(), BACKEND_ERROR_MESSAGE);
        }
    }

    #[test]
    fn layout_errors_are_shown_verbatim() {
        let error = DashboardError::Layout {
            width: 60,
            height: 20,
            min_width: 80,
            min_height: 24,
        };
        assert_eq!(
            error.user_message(),
            "view needs at least 80x24 cells, got 60x20"
        );
    }

    #[test]
    fn display_keeps_detail_for_logs() {
        let error = DashboardError::status("http://localhost/predict", 503);
        assert_eq!(
            error.to_string(),
            "http://localhost/predict responded with status 503"
        );
    }
}
