use std::net::SocketAddr;
use std::path::PathBuf;

use smogsense_core::{Dashboard, Phase, PredictionPipeline, BACKEND_ERROR_MESSAGE};
use smogsense_tui::config::StationSource;
use smogsense_tui::event::{build_report, write_report};
use smogsense_tui::{AppConfig, HttpBackend};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const PREDICTION: &str = r#"{
    "current_pm25": 182.5,
    "current_aqi_category": "Very Unhealthy",
    "forecast_7day": [
        {"day": 1, "pm25": 170.0, "aqi_category": "Very Unhealthy"},
        {"day": 2, "pm25": 140.2, "aqi_category": "Unhealthy"},
        {"day": 3, "pm25": 98.0, "aqi_category": "Unhealthy"},
        {"day": 4, "pm25": 60.0, "aqi_category": "Unhealthy"},
        {"day": 5, "pm25": 41.0, "aqi_category": "Unhealthy for Sensitive Groups"},
        {"day": 6, "pm25": 30.0, "aqi_category": "Moderate"},
        {"day": 7, "pm25": 11.0}
    ]
}"#;

const STATIONS: &str = r#"[
    {"name": "Anand Vihar", "lat": 28.6469, "lon": 77.3164},
    {"name": "ITO", "lat": 28.6289, "lon": 77.2411},
    {"name": "Punjabi Bagh", "lat": 28.6740, "lon": 77.1310},
    {"name": "RK Puram", "lat": 28.5633, "lon": 77.1869}
]"#;

async fn serve(responses: Vec<(u16, &'static str)>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0_u8; 2048];
            let _ = socket.read(&mut request).await;
            let reply = format!(
                "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }
    });
    addr
}

fn station_file(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "smogsense-flow-{tag}-{}.json",
        std::process::id()
    ));
    std::fs::write(&path, STATIONS).unwrap();
    path
}

fn config(addr: SocketAddr, stations: PathBuf) -> AppConfig {
    AppConfig {
        predict_url: format!("http://{addr}/predict"),
        stations: StationSource::File(stations),
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn refresh_renders_forecast_and_reuses_stations() {
    let addr = serve(vec![(200, PREDICTION), (200, PREDICTION)]).await;
    let stations = station_file("reuse");
    let config = config(addr, stations.clone());
    let pipeline = PredictionPipeline::new(HttpBackend::new(&config).unwrap());
    let mut dashboard = Dashboard::default();

    dashboard.refresh(&pipeline).await.unwrap();

    assert_eq!(dashboard.phase(), Phase::Ready);
    assert_eq!(dashboard.current_pm_text(), "PM2.5: 182.5 µg/m³");
    assert_eq!(dashboard.forecast().len(), 7);
    assert_eq!(dashboard.selected_day(), Some(0));
    assert_eq!(dashboard.map().markers().len(), 4);
    // A missing category is derived from the reading.
    assert_eq!(dashboard.forecast().cards()[6].category, "Good");

    // The station list is memoized, so the file is not needed again.
    std::fs::remove_file(&stations).unwrap();
    dashboard.refresh(&pipeline).await.unwrap();
    assert_eq!(dashboard.map().markers().len(), 4);
    assert_eq!(dashboard.map().circle().unwrap().updates(), 1);

    dashboard.select_day(4).unwrap();
    assert!(dashboard
        .map()
        .markers()
        .iter()
        .all(|marker| marker.popup().contains("Day 5: 41 µg/m³")));

    let report = build_report(&dashboard, &config.predict_url);
    let mut json = Vec::new();
    write_report(&mut json, &report, true).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value["stations"], 4);
    assert_eq!(value["forecast"][0]["title"], "Tomorrow");
    assert_eq!(value["current_aqi_category"], "Very Unhealthy");
}

#[tokio::test]
async fn backend_failure_clears_forecast() {
    let addr = serve(vec![(200, PREDICTION), (503, "{}")]).await;
    let stations = station_file("failure");
    let config = config(addr, stations.clone());
    let pipeline = PredictionPipeline::new(HttpBackend::new(&config).unwrap());
    let mut dashboard = Dashboard::default();

    dashboard.refresh(&pipeline).await.unwrap();
    assert!(dashboard.refresh(&pipeline).await.is_err());

    assert_eq!(dashboard.phase(), Phase::Failed);
    assert_eq!(dashboard.advisory_text(), BACKEND_ERROR_MESSAGE);
    assert!(dashboard.forecast().is_empty());
    assert!(dashboard.map().markers().is_empty());

    let _ = std::fs::remove_file(&stations);
}
