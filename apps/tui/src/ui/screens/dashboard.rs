use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use smogsense_core::dashboard::LOADING_MESSAGE;
use smogsense_core::{aqi_color, Phase};
use throbber_widgets_tui::Throbber;

use crate::app::App;
use crate::ui::theme::{self, ACCENT, MUTED};
use crate::ui::widgets::forecast::render_forecast;
use crate::ui::widgets::legend::render_legend;
use crate::ui::widgets::map::render_map;
use crate::ui::widgets::popup::render_station_popup;

const HINTS: &str = "Enter predict  1-7 day  ←/→ browse  Tab station  F1 help  q quit";

pub fn render_dashboard(app: &mut App, f: &mut Frame<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Current values
            Constraint::Min(10),   // Map and side panel
            Constraint::Length(6), // Forecast strip
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(app, f, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);
    render_map(f, body[0], app.dashboard.map());
    render_side_panel(app, f, body[1]);

    render_forecast(f, rows[2], app.dashboard.forecast());
    render_status(app, f, rows[3]);
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" SmogSense · Delhi PM2.5 ")
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let line = match app.dashboard.current() {
        Some(reading) => {
            let color = theme::color(aqi_color(&reading.aqi_category));
            TextLine::from(vec![
                Span::styled(
                    app.dashboard.current_pm_text(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw("   "),
                Span::styled(
                    app.dashboard.current_aqi_text(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ])
        }
        None => TextLine::from(Span::styled(
            "Press Enter to get a prediction",
            Style::default().fg(MUTED),
        )),
    };

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_side_panel(app: &App, f: &mut Frame<'_>, area: Rect) {
    let legend = app.dashboard.legend();
    let constraints = if legend.is_some() {
        vec![
            Constraint::Min(5),
            Constraint::Length(8),
            Constraint::Length(6),
        ]
    } else {
        vec![Constraint::Min(5), Constraint::Length(6)]
    };
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    render_advisory(app, f, sections[0]);
    if let Some(entries) = legend {
        render_legend(f, sections[1], entries);
    }
    render_station_popup(f, sections[sections.len() - 1], app.dashboard.map());
}

fn render_advisory(app: &App, f: &mut Frame<'_>, area: Rect) {
    let dashboard = &app.dashboard;
    let color = match dashboard.phase() {
        Phase::Failed => Color::Red,
        Phase::Loading | Phase::Idle => MUTED,
        Phase::Ready => dashboard
            .forecast()
            .selected_day()
            .map(|day| theme::color(aqi_color(&day.aqi_category)))
            .or_else(|| {
                dashboard
                    .current()
                    .map(|reading| theme::color(aqi_color(&reading.aqi_category)))
            })
            .unwrap_or(Color::White),
    };

    let block = Block::default()
        .title(" Health Advisory ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let paragraph = Paragraph::new(Text::from(dashboard.advisory_text()))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}

fn render_status(app: &mut App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    if app.dashboard.is_loading() {
        let throbber = Throbber::default()
            .label(LOADING_MESSAGE)
            .style(Style::default().fg(Color::Yellow))
            .throbber_style(Style::default().fg(ACCENT));
        f.render_stateful_widget(throbber, columns[0], &mut app.throbber);
    } else {
        let style = if app.dashboard.phase() == Phase::Failed {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        f.render_widget(
            Paragraph::new(Span::styled(app.status_message.as_str(), style)),
            columns[0],
        );
    }

    f.render_widget(
        Paragraph::new(Span::styled(HINTS, Style::default().fg(MUTED)))
            .alignment(Alignment::Right),
        columns[1],
    );
}

pub fn render_too_small(f: &mut Frame<'_>, message: &str) {
    let text = Text::from(vec![
        TextLine::from(Span::styled(
            "Terminal too small",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(message),
    ]);
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        f.area(),
    );
}
