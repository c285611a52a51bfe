use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line as TextLine, Span, Text},
    widgets::canvas::{Canvas, Line as CanvasLine, Map, MapResolution, Points},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use smogsense_core::dashboard::LOADING_MESSAGE;
use smogsense_core::forecast::DayCard;
use smogsense_core::map::{ring_points, MapView};
use smogsense_core::{aqi_color, AqiCategory, Dashboard, Phase, Rgb};

const fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.red(), color.green(), color.blue())
}

pub fn render(dashboard: &Dashboard, f: &mut Frame<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(12),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(dashboard, f, rows[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(rows[1]);
    render_map(dashboard.map(), f, body[0]);
    render_side(dashboard, f, body[1]);

    render_cards(dashboard, f, rows[2]);

    let hints = Paragraph::new(Span::styled(
        "Enter: get prediction  1-7: day  ←/→: browse  Tab: station",
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center);
    f.render_widget(hints, rows[3]);
}

fn render_header(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let line = match (dashboard.phase(), dashboard.current()) {
        (Phase::Loading, _) => TextLine::from(Span::styled(
            LOADING_MESSAGE,
            Style::default().fg(Color::Yellow),
        )),
        (_, Some(reading)) => TextLine::from(vec![
            Span::styled(
                dashboard.current_pm_text(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                dashboard.current_aqi_text(),
                Style::default()
                    .fg(rgb(aqi_color(&reading.aqi_category)))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        (_, None) => TextLine::from(Span::styled(
            "Press Enter to get a prediction",
            Style::default().fg(Color::Gray),
        )),
    };

    let block = Block::default()
        .title("SmogSense")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_map(map: &MapView, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Delhi")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    let aspect = f64::from(inner.width.max(1)) / (f64::from(inner.height.max(1)) * 2.0);
    let bounds = map.camera().bounds(aspect);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([bounds.west, bounds.east])
        .y_bounds([bounds.south, bounds.north])
        .paint(|ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.layer();

            if let Some(circle) = map.circle() {
                let points = ring_points(circle.center(), circle.radius_m());
                for pair in points.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].0,
                        y1: pair[0].1,
                        x2: pair[1].0,
                        y2: pair[1].1,
                        color: rgb(circle.color()),
                    });
                }
            }
            if let Some(marker) = map.center_marker() {
                let pulse = ring_points(marker.position(), 900.0f64.mul_add(map.pulse_phase(), 250.0));
                ctx.draw(&Points {
                    coords: &pulse,
                    color: rgb(marker.color()),
                });
            }
            ctx.layer();

            for (index, marker) in map.markers().iter().enumerate() {
                let symbol = if map.open_popup_index() == Some(index) {
                    "◉"
                } else {
                    "●"
                };
                ctx.print(
                    marker.position().lon,
                    marker.position().lat,
                    Span::styled(symbol, Style::default().fg(rgb(marker.color()))),
                );
            }
        });
    f.render_widget(canvas, area);
}

fn render_side(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(if dashboard.legend().is_some() { 8 } else { 0 }),
            Constraint::Length(6),
        ])
        .split(area);

    let advisory_color = if dashboard.phase() == Phase::Failed {
        Color::Red
    } else {
        Color::Gray
    };
    let advisory = Paragraph::new(dashboard.advisory_text())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Health Advisory")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(advisory_color)),
        );
    f.render_widget(advisory, sections[0]);

    if let Some(entries) = dashboard.legend() {
        let lines: Vec<TextLine<'_>> = entries
            .iter()
            .map(|entry| {
                TextLine::from(vec![
                    Span::styled("■ ", Style::default().fg(rgb(entry.color))),
                    Span::raw(entry.label),
                ])
            })
            .collect();
        let legend = Paragraph::new(Text::from(lines)).block(
            Block::default()
                .title("AQI Legend")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        );
        f.render_widget(legend, sections[1]);
    }

    let map = dashboard.map();
    let popup = map
        .open_popup()
        .map(|marker| marker.popup())
        .or_else(|| map.circle().map(|circle| circle.popup()))
        .unwrap_or("Tab to focus a station");
    let popup = Paragraph::new(popup).wrap(Wrap { trim: true }).block(
        Block::default()
            .title("Station")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray)),
    );
    f.render_widget(popup, sections[2]);
}

fn render_cards(dashboard: &Dashboard, f: &mut Frame<'_>, area: Rect) {
    let cards = dashboard.forecast().cards();
    if cards.is_empty() {
        let empty = Paragraph::new("No forecast yet")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().title("7-Day Forecast").borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    }

    let count = u32::try_from(cards.len()).unwrap_or(u32::MAX);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(cards.iter().map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for (card, column) in cards.iter().zip(columns.iter()) {
        if card.entered {
            render_card(card, f, *column);
        }
    }
}

fn render_card(card: &DayCard, f: &mut Frame<'_>, area: Rect) {
    let badge = rgb(card.badge_color);
    let label = AqiCategory::parse(&card.category)
        .map_or(card.category.as_str(), |c| c.legend_label());

    let mut block = Block::default().title(card.title.as_str()).borders(Borders::ALL);
    block = if card.selected {
        block
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(badge).add_modifier(Modifier::BOLD))
    } else {
        block.border_style(Style::default().fg(Color::Gray))
    };

    let text = Text::from(vec![
        TextLine::from(Span::styled(
            format!(" {label} "),
            Style::default().bg(badge).fg(Color::Black),
        )),
        TextLine::from(card.pm25_label()),
        TextLine::from(Span::styled(
            card.detail_hint(),
            Style::default().fg(Color::Gray),
        )),
    ]);
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(block),
        area,
    );
}
