mod setup;

pub use setup::{check_size, cleanup_terminal_state, setup_terminal, MIN_HEIGHT, MIN_WIDTH};
