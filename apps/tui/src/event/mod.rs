mod loop_handler;

pub use loop_handler::{build_report, run, run_headless, write_report, HeadlessReport};
