pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod event;
pub mod logging;
pub mod terminal;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use client::HttpBackend;
pub use config::AppConfig;
