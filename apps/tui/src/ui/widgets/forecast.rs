use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;
use smogsense_core::forecast::{DayCard, ForecastPanel};
use smogsense_core::AqiCategory;

use crate::ui::theme::{self, ACCENT, MUTED};

/// Badge text short enough for narrow cards.
fn badge_label(category: &str) -> &str {
    AqiCategory::parse(category).map_or(category, |c| c.legend_label())
}

pub fn render_forecast(f: &mut Frame<'_>, area: Rect, panel: &ForecastPanel) {
    if panel.is_empty() {
        let block = Block::default()
            .title(" 7-Day Forecast ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED));
        let empty = Paragraph::new("No forecast yet")
            .style(Style::default().fg(MUTED))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let count = u32::try_from(panel.len()).unwrap_or(u32::MAX);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(panel.cards().iter().map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for (card, column) in panel.cards().iter().zip(columns.iter()) {
        if card.entered {
            render_card(f, *column, card);
        }
    }
}

fn render_card(f: &mut Frame<'_>, area: Rect, card: &DayCard) {
    let badge = theme::color(card.badge_color);
    let block = if card.selected {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(badge).add_modifier(Modifier::BOLD))
    } else {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(MUTED))
    }
    .title(Span::styled(
        format!(" {} ", card.title),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ));

    let lines = vec![
        TextLine::from(Span::styled(
            format!(" {} ", badge_label(&card.category)),
            Style::default()
                .bg(badge)
                .fg(theme::text_on(card.badge_color))
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(card.pm25_label()),
        TextLine::from(Span::styled(card.detail_hint(), Style::default().fg(MUTED))),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badges_use_short_labels() {
        assert_eq!(badge_label("Unhealthy for Sensitive Groups"), "Unhealthy-SG");
        assert_eq!(badge_label("Good"), "Good");
        assert_eq!(badge_label("Smoky"), "Smoky");
    }
}
