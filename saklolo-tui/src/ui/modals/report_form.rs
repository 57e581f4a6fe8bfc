use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use saklolo_types::Category;

use super::super::theme::{category_color, get_theme_colors, ThemeColors};
use super::utils::centered_rect;
use crate::app::{App, FormField};
use crate::report::MAX_DESCRIPTION_CHARS;

/// Render the "Ask for Help" modal
pub fn render_report_form(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = get_theme_colors(app);
    let form = &app.form;

    let modal_area = centered_rect(70, 85, area);
    frame.render_widget(Clear, modal_area);

    let outer_block = Block::default()
        .title(" Ask for Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(theme.background));

    let inner = outer_block.inner(modal_area);
    frame.render_widget(outer_block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Description
            Constraint::Length(1), // Counter / description error
            Constraint::Length(3), // Category
            Constraint::Length(1), // Category error
            Constraint::Length(3), // Photo path
            Constraint::Length(1), // Photo preview or error
            Constraint::Length(3), // Submit
            Constraint::Length(1), // Instructions
        ])
        .split(inner);

    // Description
    let description_block = Block::default()
        .borders(Borders::ALL)
        .title("Description")
        .border_style(field_border(form.focus == FormField::Description, &theme));
    let description_inner = description_block.inner(chunks[0]);
    frame.render_widget(description_block, chunks[0]);
    frame.render_widget(&form.description, description_inner);

    let char_count = form.description_char_count();
    let counter_style = if char_count > MAX_DESCRIPTION_CHARS {
        Style::default().fg(theme.error).add_modifier(Modifier::BOLD)
    } else if char_count >= MAX_DESCRIPTION_CHARS * 9 / 10 {
        Style::default().fg(theme.warning)
    } else {
        Style::default().fg(theme.text_dim)
    };
    let mut counter_spans = Vec::new();
    if let Some(error) = &form.errors.description {
        counter_spans.push(error_span(error, &theme));
        counter_spans.push(Span::raw("  "));
    }
    counter_spans.push(Span::styled(
        format!("{}/{} characters", char_count, MAX_DESCRIPTION_CHARS),
        counter_style,
    ));
    frame.render_widget(
        Paragraph::new(Line::from(counter_spans)).alignment(Alignment::Right),
        chunks[1],
    );

    // Category
    let category = Paragraph::new(category_line(form.category, &theme)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Category")
            .border_style(field_border(form.focus == FormField::Category, &theme)),
    );
    frame.render_widget(category, chunks[2]);
    if let Some(error) = &form.errors.category {
        frame.render_widget(Paragraph::new(Line::from(error_span(error, &theme))), chunks[3]);
    }

    // Photo
    let photo_text = if form.photo_path_input.is_empty() && form.focus != FormField::Photo {
        Span::styled("Optional: path to a photo, then Enter", Style::default().fg(theme.text_dim))
    } else {
        let cursor = if form.focus == FormField::Photo { "▏" } else { "" };
        Span::styled(
            format!("{}{}", form.photo_path_input, cursor),
            Style::default().fg(theme.text),
        )
    };
    let photo = Paragraph::new(Line::from(photo_text)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Photo")
            .border_style(field_border(form.focus == FormField::Photo, &theme)),
    );
    frame.render_widget(photo, chunks[4]);

    let photo_status = match (&form.errors.photo, &form.photo) {
        (Some(error), _) => Line::from(error_span(error, &theme)),
        (None, Some(preview)) => Line::from(Span::styled(
            format!("📷 {}", preview.summary()),
            Style::default().fg(theme.success),
        )),
        (None, None) => Line::from(""),
    };
    frame.render_widget(Paragraph::new(photo_status), chunks[5]);

    // Submit
    let (label, label_style) = if form.submitting {
        ("Submitting…", Style::default().fg(theme.text_dim))
    } else if form.focus == FormField::Submit {
        (
            "[ Submit ]",
            Style::default()
                .fg(theme.background)
                .bg(theme.success)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("[ Submit ]", Style::default().fg(theme.success))
    };
    let submit = Paragraph::new(Span::styled(label, label_style))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(field_border(form.focus == FormField::Submit, &theme)),
        );
    frame.render_widget(submit, chunks[6]);

    let instructions = Paragraph::new("Tab: Next field | Ctrl+S: Submit | Esc: Cancel")
        .style(Style::default().fg(theme.text_dim))
        .alignment(Alignment::Center);
    frame.render_widget(instructions, chunks[7]);
}

fn field_border(focused: bool, theme: &ThemeColors) -> Style {
    if focused {
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border)
    }
}

fn error_span(message: &str, theme: &ThemeColors) -> Span<'static> {
    Span::styled(
        message.to_string(),
        Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
    )
}

/// All four categories in a row with the chosen one highlighted
fn category_line(selected: Option<Category>, theme: &ThemeColors) -> Line<'static> {
    let mut spans = Vec::new();
    if selected.is_none() {
        spans.push(Span::styled("Select a category ", Style::default().fg(theme.text_dim)));
    }
    for (i, category) in Category::ALL.iter().enumerate() {
        let style = if selected == Some(*category) {
            Style::default()
                .fg(theme.background)
                .bg(category_color(*category, theme))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(category_color(*category, theme))
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, category.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}
