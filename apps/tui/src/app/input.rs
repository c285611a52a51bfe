use crossterm::event::KeyCode;

use crate::app::App;

pub fn handle_input(app: &mut App, key: KeyCode) {
    if app.show_help {
        if matches!(key, KeyCode::F(1) | KeyCode::Esc | KeyCode::Char('?' | 'q')) {
            app.show_help = false;
        }
        return;
    }

    match key {
        KeyCode::F(1) | KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('q') => app.quit(),
        KeyCode::Esc => {
            if app.dashboard.map().open_popup().is_some() {
                app.dashboard.map_mut().close_popup();
            } else {
                app.quit();
            }
        }
        KeyCode::Enter | KeyCode::Char('p' | 'r') => app.request_prediction(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(digit) = c.to_digit(10) {
                app.select_day(digit as usize - 1);
            }
        }
        KeyCode::Right | KeyCode::Char('l') => app.select_next_day(),
        KeyCode::Left | KeyCode::Char('h') => app.select_previous_day(),
        KeyCode::Tab => app.dashboard.map_mut().open_next_popup(),
        KeyCode::BackTab => app.dashboard.map_mut().open_previous_popup(),
        _ => {}
    }
}
