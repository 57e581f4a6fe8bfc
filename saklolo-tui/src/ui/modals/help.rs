use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::super::theme::get_theme_colors;
use super::utils::centered_rect;
use crate::app::App;

/// Render help modal
pub fn render_help_modal(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);

    let modal_area = centered_rect(70, 80, area);
    frame.render_widget(Clear, modal_area);

    let mut lines = vec![Line::from("")];

    for (section, items) in shortcuts() {
        lines.push(Line::from(Span::styled(
            section,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));

        for (key, description) in items {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<15}", key), Style::default().fg(theme.success)),
                Span::styled(description, Style::default().fg(theme.text)),
            ]));
        }

        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "Press ? or Esc to close",
        Style::default().fg(theme.text_dim),
    )));

    let help_content = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
                .title(" Keyboard Shortcuts ")
                .title_alignment(Alignment::Center)
                .style(Style::default().bg(theme.background)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(help_content, modal_area);
}

fn shortcuts() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    vec![
        (
            "Feed",
            vec![
                ("n", "Ask for help"),
                ("s / Tab", "Switch between Latest and Popular"),
                ("1 / 2", "Latest / Popular"),
                ("r", "Refresh"),
                ("j / k / ↑ / ↓", "Move selection"),
                ("g / G", "First / last post"),
                ("q / Esc", "Quit"),
            ],
        ),
        (
            "Ask for Help form",
            vec![
                ("Tab / Shift+Tab", "Next / previous field"),
                ("←/→ or 1-4", "Choose category"),
                ("Enter", "Attach photo path (empty clears)"),
                ("Delete", "Remove attached photo"),
                ("Ctrl+S", "Submit"),
                ("Esc", "Cancel"),
            ],
        ),
    ]
}
