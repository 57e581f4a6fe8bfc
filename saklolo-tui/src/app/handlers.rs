use crate::app::state::{App, FormField};
use crate::log_key_event;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use saklolo_types::{Category, SortMode};

pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    // Priority 1: Help modal
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            app.toggle_help();
        }
        return Ok(());
    }

    // Priority 2: Report form
    if app.form.open {
        log_key_event!(app.log_config, "form key={:?} focus={:?}", key.code, app.form.focus);
        return handle_form_keys(app, key);
    }

    log_key_event!(app.log_config, "feed key={:?}", key.code);
    handle_feed_keys(app, key)
}

fn handle_feed_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.open_report_form(),
        KeyCode::Char('s') | KeyCode::Tab | KeyCode::BackTab => app.toggle_sort_mode(),
        KeyCode::Char('1') => app.set_sort_mode(SortMode::Latest),
        KeyCode::Char('2') => app.set_sort_mode(SortMode::Popular),
        KeyCode::Char('r') | KeyCode::Char('R') => app.request_refresh(),
        KeyCode::Down | KeyCode::Char('j') => app.next_post(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_post(),
        KeyCode::Home | KeyCode::Char('g') => app.first_post(),
        KeyCode::End | KeyCode::Char('G') => app.last_post(),
        _ => {}
    }
    Ok(())
}

fn handle_form_keys(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.close_report_form();
            return Ok(());
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.submit_report();
            return Ok(());
        }
        KeyCode::Tab => {
            app.form.focus = app.form.focus.next();
            return Ok(());
        }
        KeyCode::BackTab => {
            app.form.focus = app.form.focus.previous();
            return Ok(());
        }
        _ => {}
    }

    match app.form.focus {
        FormField::Description => {
            // All other keys are handled by TextArea
            if app.form.description.input(key) {
                app.form.errors.description = None;
            }
        }
        FormField::Category => handle_category_keys(app, key),
        FormField::Photo => handle_photo_keys(app, key),
        FormField::Submit => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                app.submit_report();
            }
        }
    }
    Ok(())
}

fn handle_category_keys(app: &mut App, key: KeyEvent) {
    let current = app.form.category;
    let chosen = match key.code {
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            Some(current.map(|c| c.next()).unwrap_or(Category::Typhoon))
        }
        KeyCode::Left | KeyCode::Char('h') => {
            Some(current.map(|c| c.previous()).unwrap_or(Category::Crime))
        }
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            Some(Category::ALL[idx])
        }
        KeyCode::Enter => {
            app.form.focus = app.form.focus.next();
            None
        }
        _ => None,
    };

    if let Some(category) = chosen {
        app.form.category = Some(category);
        app.form.errors.category = None;
    }
}

fn handle_photo_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => {
            let path = app.form.photo_path_input.trim().to_string();
            if path.is_empty() {
                app.clear_photo();
            } else {
                app.select_photo(path);
            }
        }
        KeyCode::Delete => app.clear_photo(),
        KeyCode::Backspace => {
            app.form.photo_path_input.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.photo_path_input.push(c);
        }
        _ => {}
    }
}
