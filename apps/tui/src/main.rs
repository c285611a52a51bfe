use std::rc::Rc;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::EventStream;
use smogsense_core::PredictionPipeline;
use smogsense_tui::app::App;
use smogsense_tui::cli::CliArgs;
use smogsense_tui::{event, logging, terminal, AppConfig, HttpBackend};
use tokio::task::LocalSet;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = AppConfig::from_env()?;

    let headless = args.is_headless() || !is_terminal();
    logging::init(&config, headless)?;
    tracing::info!(endpoint = %config.predict_url, stations = %config.stations.describe(), "starting");

    let pipeline = Rc::new(PredictionPipeline::new(HttpBackend::new(&config)?));

    if headless {
        return event::run_headless(&pipeline, &config, args.json).await;
    }

    let mut terminal = terminal::setup_terminal()?;
    let mut app = App::new(&config);

    let result = LocalSet::new()
        .run_until(event::run(
            &mut terminal,
            EventStream::new(),
            &mut app,
            pipeline,
        ))
        .await;

    terminal::cleanup_terminal_state(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
