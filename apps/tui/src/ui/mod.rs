pub mod screens;
pub mod theme;
pub mod widgets;

use crate::app::App;
use crate::terminal::check_size;
use ratatui::Frame;

pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    let area = f.area();
    if let Err(error) = check_size(area.width, area.height) {
        screens::dashboard::render_too_small(f, &error.user_message());
        return;
    }

    screens::dashboard::render_dashboard(app, f);

    if app.show_help {
        screens::help::render_help(f);
    }
}
