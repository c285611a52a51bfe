use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use smogsense_core::LegendEntry;

use crate::ui::theme::{self, MUTED};

pub fn render_legend(f: &mut Frame<'_>, area: Rect, entries: &[LegendEntry]) {
    let lines: Vec<TextLine<'_>> = entries
        .iter()
        .map(|entry| {
            TextLine::from(vec![
                Span::styled("■ ", Style::default().fg(theme::color(entry.color))),
                Span::styled(entry.label, Style::default().fg(Color::White)),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" AQI Legend ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED));
    f.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}
