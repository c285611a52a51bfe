mod animation;
mod backend;
mod view;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use ratzilla::event::{KeyCode, KeyEvent};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use smogsense_core::{Dashboard, PredictionPipeline};
use wasm_bindgen_futures::spawn_local;

use animation::FrameClock;
use backend::WebBackend;

#[derive(Default)]
struct WebApp {
    dashboard: Dashboard,
    clock: FrameClock,
}

type Pipeline = Rc<PredictionPipeline<WebBackend>>;

fn main() -> io::Result<()> {
    let state = Rc::new(RefCell::new(WebApp::default()));
    let pipeline: Pipeline = Rc::new(PredictionPipeline::new(WebBackend::from_location()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let state = state.clone();
        move |event| handle_key(&state, &pipeline, &event)
    });

    terminal.draw_web(move |f| {
        let mut app = state.borrow_mut();
        let delta = app.clock.tick(js_sys::Date::now() / 1000.0);
        app.dashboard.tick(delta);
        view::render(&app.dashboard, f);
    });

    Ok(())
}

fn handle_key(state: &Rc<RefCell<WebApp>>, pipeline: &Pipeline, event: &KeyEvent) {
    let selection = match event.code {
        KeyCode::Enter | KeyCode::Char('p' | 'r') => {
            spawn_local(refresh(state.clone(), pipeline.clone()));
            return;
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10).map_or(0, |digit| digit as usize - 1);
            state.borrow_mut().dashboard.select_day(index)
        }
        KeyCode::Right => state.borrow_mut().dashboard.select_next_day(),
        KeyCode::Left => state.borrow_mut().dashboard.select_previous_day(),
        KeyCode::Tab => {
            let mut app = state.borrow_mut();
            if event.shift {
                app.dashboard.map_mut().open_previous_popup();
            } else {
                app.dashboard.map_mut().open_next_popup();
            }
            Ok(())
        }
        KeyCode::Esc => {
            state.borrow_mut().dashboard.map_mut().close_popup();
            Ok(())
        }
        _ => Ok(()),
    };

    if let Err(error) = selection {
        web_sys::console::warn_1(&error.to_string().into());
    }
}

async fn refresh(state: Rc<RefCell<WebApp>>, pipeline: Pipeline) {
    let ticket = state.borrow_mut().dashboard.begin_request();
    let outcome = pipeline.run().await;
    if let Err(error) = &outcome {
        web_sys::console::error_1(&format!("Prediction request failed: {error}").into());
    }
    state.borrow_mut().dashboard.complete(ticket, outcome);
}
