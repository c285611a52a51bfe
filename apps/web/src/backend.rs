use async_trait::async_trait;
use smogsense_core::{Backend, DashboardError, PredictionResponse, Station};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

pub const DEFAULT_PREDICT_URL: &str = "http://127.0.0.1:8000/predict";
pub const DEFAULT_STATIONS_URL: &str = "stations.json";

/// Fetches through the browser. The prediction service is cross-origin, the
/// station list is served next to the page.
pub struct WebBackend {
    predict_url: String,
    stations_url: String,
}

impl WebBackend {
    pub const fn new(predict_url: String, stations_url: String) -> Self {
        Self {
            predict_url,
            stations_url,
        }
    }

    /// Reads `?endpoint=` and `?stations=` from the page URL.
    pub fn from_location() -> Self {
        let params = web_sys::window()
            .and_then(|window| window.location().search().ok())
            .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok());
        let lookup = |key: &str| params.as_ref().and_then(|params| params.get(key));

        Self::new(
            lookup("endpoint").unwrap_or_else(|| DEFAULT_PREDICT_URL.to_string()),
            lookup("stations").unwrap_or_else(|| DEFAULT_STATIONS_URL.to_string()),
        )
    }
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

async fn fetch_json(url: &str, mode: RequestMode) -> Result<JsValue, DashboardError> {
    let window = web_sys::window().ok_or_else(|| DashboardError::fetch(url, "no window"))?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(mode);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| DashboardError::fetch(url, describe(&e)))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| DashboardError::fetch(url, describe(&e)))?;

    let response = response_value
        .dyn_into::<Response>()
        .map_err(|_| DashboardError::fetch(url, "not a response"))?;

    if !response.ok() {
        return Err(DashboardError::status(url, response.status()));
    }

    let body = response
        .json()
        .map_err(|e| DashboardError::parse(url, describe(&e)))?;
    JsFuture::from(body)
        .await
        .map_err(|e| DashboardError::parse(url, describe(&e)))
}

#[async_trait(?Send)]
impl Backend for WebBackend {
    async fn fetch_prediction(&self) -> Result<PredictionResponse, DashboardError> {
        let json = fetch_json(&self.predict_url, RequestMode::Cors).await?;
        serde_wasm_bindgen::from_value(json)
            .map_err(|e| DashboardError::parse("prediction", e.to_string()))
    }

    async fn fetch_stations(&self) -> Result<Vec<Station>, DashboardError> {
        let json = fetch_json(&self.stations_url, RequestMode::SameOrigin).await?;
        serde_wasm_bindgen::from_value(json)
            .map_err(|e| DashboardError::parse("stations", e.to_string()))
    }
}
