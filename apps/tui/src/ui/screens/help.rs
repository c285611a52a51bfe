use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::ui::theme::ACCENT;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};

const KEYS: [(&str, &str); 9] = [
    ("Enter / p / r", "Get prediction"),
    ("1-9", "Show forecast day"),
    ("← / →  h / l", "Previous / next day"),
    ("Tab / Shift+Tab", "Focus next / previous station"),
    ("Esc", "Close station popup, then quit"),
    ("F1 / ?", "Toggle this help"),
    ("q", "Quit"),
    ("", ""),
    ("", "Logs are written to the configured log file"),
];

pub fn render_help(f: &mut Frame<'_>) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(ClearWidget, area);

    let mut lines = vec![
        TextLine::from(Span::styled(
            "Keys",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
    ];
    lines.extend(KEYS.iter().map(|(key, action)| {
        TextLine::from(vec![
            Span::styled(format!("{key:<18}"), Style::default().fg(Color::Yellow)),
            Span::raw(*action),
        ])
    }));

    let block = Block::default()
        .title(" Help ")
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    f.render_widget(
        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}
