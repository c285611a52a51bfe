use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result, WrapErr};
use crossterm::event::{Event, KeyEventKind};
use futures::{Stream, StreamExt};
use ratatui::backend::Backend as TerminalBackend;
use ratatui::Terminal;
use serde::Serialize;
use smogsense_core::dashboard::advisory_for;
use smogsense_core::{
    day_name, Backend, Cycle, Dashboard, DashboardError, DashboardOptions, PredictionPipeline,
    RequestTicket, BACKEND_ERROR_MESSAGE,
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tokio::time::MissedTickBehavior;

use crate::app::{handle_input, App};
use crate::config::AppConfig;
use crate::ui;

const FRAME_INTERVAL: Duration = Duration::from_millis(50);

type Completion = (RequestTicket, Result<Cycle, DashboardError>);

/// Runs the interactive dashboard until the user quits.
///
/// Must be polled inside a [`tokio::task::LocalSet`]: requests are spawned
/// with `spawn_local` and report back over a channel, so the UI keeps
/// drawing while the network is busy.
pub async fn run<T, S, B>(
    terminal: &mut Terminal<T>,
    mut events: S,
    app: &mut App,
    pipeline: Rc<PredictionPipeline<B>>,
) -> Result<()>
where
    T: TerminalBackend,
    S: Stream<Item = io::Result<Event>> + Unpin,
    B: Backend + 'static,
{
    let (tx, mut rx) = unbounded_channel::<Completion>();
    let mut frames = tokio::time::interval(FRAME_INTERVAL);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while app.running {
        if app.take_fetch_request() {
            spawn_fetch(app, &pipeline, &tx);
        }

        terminal
            .draw(|f| ui::ui(app, f))
            .map_err(|e| eyre!("Terminal draw error: {e}"))?;

        tokio::select! {
            _ = frames.tick() => app.update(),
            Some((ticket, outcome)) = rx.recv() => app.finish_request(ticket, outcome),
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(eyre!("Failed to read terminal event: {e}")),
                None => break,
            },
        }
    }

    Ok(())
}

fn spawn_fetch<B: Backend + 'static>(
    app: &mut App,
    pipeline: &Rc<PredictionPipeline<B>>,
    tx: &UnboundedSender<Completion>,
) {
    let ticket = app.begin_request();
    let pipeline = Rc::clone(pipeline);
    let tx = tx.clone();
    tokio::task::spawn_local(async move {
        let outcome = pipeline.run().await;
        if tx.send((ticket, outcome)).is_err() {
            tracing::debug!("dashboard closed before the response arrived");
        }
    });
}

/// Run one refresh without a UI and print the result to stdout.
pub async fn run_headless<B: Backend>(
    pipeline: &PredictionPipeline<B>,
    config: &AppConfig,
    json: bool,
) -> Result<()> {
    let mut dashboard = Dashboard::new(DashboardOptions {
        show_legend: config.show_legend,
    });

    dashboard
        .refresh(pipeline)
        .await
        .wrap_err(BACKEND_ERROR_MESSAGE)?;

    let report = build_report(&dashboard, &config.predict_url);
    write_report(&mut io::stdout().lock(), &report, json)
}

#[derive(Debug, Serialize)]
pub struct HeadlessReport {
    pub endpoint: String,
    pub current_pm25: Option<f64>,
    pub current_aqi_category: Option<String>,
    pub advisory: String,
    pub stations: usize,
    pub forecast: Vec<HeadlessDay>,
}

#[derive(Debug, Serialize)]
pub struct HeadlessDay {
    pub day: i64,
    pub title: String,
    pub pm25: f64,
    pub aqi_category: String,
    pub advisory: String,
}

pub fn build_report(dashboard: &Dashboard, endpoint: &str) -> HeadlessReport {
    let prediction = dashboard.prediction();
    let forecast = prediction
        .map(|prediction| {
            prediction
                .forecast_7day
                .iter()
                .map(|day| HeadlessDay {
                    day: day.day,
                    title: day_name(day.day),
                    pm25: day.pm25,
                    aqi_category: day.aqi_category.clone(),
                    advisory: advisory_for(day),
                })
                .collect()
        })
        .unwrap_or_default();

    HeadlessReport {
        endpoint: endpoint.to_string(),
        current_pm25: prediction.map(|p| p.current_pm25),
        current_aqi_category: prediction.map(|p| p.current_aqi_category.clone()),
        advisory: dashboard.advisory_text().to_string(),
        stations: dashboard.stations().len(),
        forecast,
    }
}

pub fn write_report<W: Write>(out: &mut W, report: &HeadlessReport, json: bool) -> Result<()> {
    if json {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(out, "{json}")?;
        return Ok(());
    }

    writeln!(out, "\nSmogSense Prediction")?;
    writeln!(out, "====================")?;
    writeln!(out, "Endpoint: {}", report.endpoint)?;
    if let (Some(pm25), Some(category)) = (report.current_pm25, &report.current_aqi_category) {
        writeln!(out, "Current PM2.5: {pm25} µg/m³")?;
        writeln!(out, "Current AQI: {category}")?;
    }
    writeln!(out, "Stations: {}", report.stations)?;
    writeln!(out, "Advisory: {}", report.advisory)?;

    writeln!(out, "\nForecast:")?;
    for day in &report.forecast {
        writeln!(
            out,
            "- {} | {} µg/m³ | {}",
            day.title, day.pm25, day.aqi_category
        )?;
    }

    Ok(())
}
