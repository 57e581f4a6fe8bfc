use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use saklolo_types::SortMode;

use super::formatting::format_post;
use super::modals::{render_help_modal, render_report_form};
use super::theme::{get_theme_colors, ThemeColors};
use crate::app::App;

pub fn render_main_screen(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Create trigger
            Constraint::Length(3), // Sort tabs
            Constraint::Min(0),    // Feed
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_create_trigger(frame, app, chunks[0]);
    render_sort_tabs(frame, app, chunks[1]);
    render_feed(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);

    // Modals are drawn last so they sit on top of the feed
    if app.form.open {
        log_rendering!(app.log_config, "Rendering report form (focus: {:?})", app.form.focus);
        render_report_form(frame, app, area);
    }

    if app.show_help {
        render_help_modal(frame, app, area);
    }
}

/// "Ask for help" prompt that opens the report form
fn render_create_trigger(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);

    let mut spans = Vec::new();
    if let Some(user) = &app.current_user {
        spans.push(Span::styled(
            format!("@{} ", user.display()),
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled("What's wrong? ", Style::default().fg(theme.text_dim)));
    spans.push(Span::styled(
        "Press n to ask for help",
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    ));

    let trigger = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(trigger, area);
}

fn render_sort_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);

    let mut spans = Vec::new();
    for (i, mode) in [SortMode::Latest, SortMode::Popular].iter().enumerate() {
        let style = if *mode == app.feed.sort_mode {
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.text_dim)
        };
        spans.push(Span::styled(format!(" {} ", mode.label()), style));
        if i == 0 {
            spans.push(Span::raw(" | "));
        }
    }

    let tabs = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(tabs, area);
}

fn render_feed(frame: &mut Frame, app: &mut App, area: Rect) {
    log_rendering!(app.log_config, "render_feed: {} posts, loading={}", app.feed.posts.len(), app.feed.loading);
    let theme = get_theme_colors(app);

    let (banner_area, list_area) = if app.feed.error.is_some() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        (Some(split[0]), split[1])
    } else {
        (None, area)
    };

    if let (Some(banner_area), Some(error)) = (banner_area, app.feed.error.as_deref()) {
        let banner = Paragraph::new(error.to_string())
            .style(Style::default().fg(theme.error).add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.error)),
            );
        frame.render_widget(banner, banner_area);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Help Requests ({}) ", app.feed.sort_mode.label()))
        .border_style(Style::default().fg(theme.border));

    // The spinner replaces the list while a fetch is outstanding
    if app.feed.loading {
        let loading = Paragraph::new(create_loading_display("Loading posts...", &theme))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(loading, list_area);
        return;
    }

    if app.feed.posts.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No help requests yet",
                Style::default().fg(theme.text_dim),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, list_area);
        return;
    }

    let width = list_area.width as usize;
    let selected = app.feed.list_state.selected();
    let items: Vec<ListItem> = app
        .feed
        .posts
        .iter()
        .enumerate()
        .map(|(i, post)| ListItem::new(format_post(post, selected == Some(i), &theme, width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.highlight_bg));
    frame.render_stateful_widget(list, list_area, &mut app.feed.list_state);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let theme = get_theme_colors(app);
    frame.render_widget(Clear, area);

    let footer = Paragraph::new(
        "n: Ask for help | s/Tab: Sort | 1/2: Latest/Popular | r: Refresh | ↑/↓/j/k: Navigate | ?: Help | q/Esc: Quit",
    )
    .style(Style::default().fg(theme.text_dim).bg(theme.background))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(footer, area);
}

fn create_loading_display(message: &str, theme: &ThemeColors) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("⟳ {}", message),
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Please wait",
            Style::default().fg(theme.text_dim),
        )),
    ]
}
