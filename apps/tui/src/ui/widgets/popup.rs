use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::Buffer;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};
use ratatui::Frame;
use smogsense_core::map::MapView;

use crate::ui::theme::{self, MUTED};

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1]);

    horizontal_layout[1]
}

pub struct ClearWidget;

impl Widget for ClearWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        ratatui::widgets::Clear.render(area, buf);
    }
}

/// Shows the focused station's popup, or the radius circle's when no station
/// is focused.
pub fn render_station_popup(f: &mut Frame<'_>, area: Rect, map: &MapView) {
    let (title, body, color) = if let Some(marker) = map.open_popup() {
        (" Station ", marker.popup(), Some(marker.color()))
    } else if let Some(circle) = map.circle() {
        (" Delhi ", circle.popup(), Some(circle.color()))
    } else {
        (" Station ", "", None)
    };

    let border = color.map_or(MUTED, theme::color);
    let mut lines: Vec<TextLine<'_>> = body
        .lines()
        .enumerate()
        .map(|(index, line)| {
            if index == 0 && map.open_popup().is_some() {
                TextLine::from(Span::styled(
                    line,
                    Style::default().add_modifier(Modifier::BOLD),
                ))
            } else {
                TextLine::from(line)
            }
        })
        .collect();
    if lines.is_empty() {
        lines.push(TextLine::from(Span::styled(
            "Tab to focus a station",
            Style::default().fg(MUTED),
        )));
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let paragraph = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}
