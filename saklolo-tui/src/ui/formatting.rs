use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use saklolo_types::Post;

use super::theme::{category_color, ThemeColors};

pub const BORDER_PADDING: u16 = 4;

pub fn format_timestamp(timestamp: &chrono::DateTime<chrono::Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

/// Render one feed item: a header line, the wrapped description, and a
/// stats line, followed by a blank separator
pub fn format_post(post: &Post, is_selected: bool, theme: &ThemeColors, max_width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let author_style = if is_selected {
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.primary)
    };
    lines.push(Line::from(vec![
        Span::styled(
            format!("[{}]", post.category.label().to_uppercase()),
            Style::default()
                .fg(category_color(post.category, theme))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(format!("@{}", post.author_username), author_style),
        Span::styled(
            format!("  {}", format_timestamp(&post.created_at)),
            Style::default().fg(theme.text_dim),
        ),
    ]));

    lines.extend(format_description(&post.description, is_selected, theme, max_width));

    let mut stats = vec![Span::styled(
        format!("  ▲ {}   💬 {}", post.upvotes, post.comment_count),
        Style::default().fg(theme.text_dim),
    )];
    if post.photo_url.is_some() {
        stats.push(Span::styled("   📷 photo", Style::default().fg(theme.secondary)));
    }
    lines.push(Line::from(stats));
    lines.push(Line::from(""));

    lines
}

/// Wrap description text to the given width with a two-space indent
pub fn format_description(
    content: &str,
    is_selected: bool,
    theme: &ThemeColors,
    max_width: usize,
) -> Vec<Line<'static>> {
    let wrap_width = max_width.saturating_sub(BORDER_PADDING as usize).max(10);
    let style = if is_selected {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    content
        .lines()
        .flat_map(|line| {
            if line.is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(line, wrap_width)
                    .into_iter()
                    .map(|l| l.into_owned())
                    .collect()
            }
        })
        .map(|line| Line::from(vec![Span::raw("  "), Span::styled(line, style)]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::theme_for;
    use saklolo_types::{Category, ColorScheme};
    use uuid::Uuid;

    fn sample(description: &str) -> Post {
        Post {
            id: Uuid::nil(),
            author_username: "lito".to_string(),
            description: description.to_string(),
            category: Category::Earthquake,
            photo_url: None,
            created_at: "2024-03-01T06:15:00Z".parse().unwrap(),
            upvotes: 4,
            comment_count: 2,
        }
    }

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn post_header_shows_category_author_and_time() {
        let theme = theme_for(ColorScheme::Default);
        let lines = format_post(&sample("Cracks in the school wall"), false, &theme, 80);
        assert_eq!(text_of(&lines[0]), "[EARTHQUAKE] @lito  2024-03-01 06:15");
        assert_eq!(text_of(&lines[1]), "  Cracks in the school wall");
        assert!(text_of(&lines[2]).contains("▲ 4"));
        assert_eq!(text_of(lines.last().unwrap()), "");
    }

    #[test]
    fn long_descriptions_wrap() {
        let theme = theme_for(ColorScheme::Dark);
        let text = "word ".repeat(40);
        let lines = format_description(text.trim(), false, &theme, 40);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_of(line).chars().count() <= 40);
        }
    }

    #[test]
    fn photo_marker_only_when_photo_present() {
        let theme = theme_for(ColorScheme::Light);
        let mut post = sample("Smoke");
        let without = format_post(&post, false, &theme, 80);
        assert!(!without.iter().any(|l| text_of(l).contains("photo")));

        post.photo_url = Some("https://cdn.example/1.jpg".to_string());
        let with = format_post(&post, true, &theme, 80);
        assert!(with.iter().any(|l| text_of(l).contains("photo")));
    }
}
