use std::sync::Arc;

use ratatui::style::Style;
use ratatui::widgets::ListState;
use saklolo_types::{Category, ColorScheme, CurrentUser, Post, SortMode};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tui_textarea::TextArea;

use super::tasks::AppMessage;
use crate::api::PostService;
use crate::logging::LogConfig;
use crate::photo::PhotoPreview;
use crate::report::FieldErrors;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Navigation, // Browsing the feed, shortcuts active
    Typing,     // Report form open, keys go to the focused field
}

/// Focusable parts of the report form, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Description,
    Category,
    Photo,
    Submit,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Description => FormField::Category,
            FormField::Category => FormField::Photo,
            FormField::Photo => FormField::Submit,
            FormField::Submit => FormField::Description,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            FormField::Description => FormField::Submit,
            FormField::Category => FormField::Description,
            FormField::Photo => FormField::Category,
            FormField::Submit => FormField::Photo,
        }
    }
}

/// Feed panel state.
///
/// The list on screen is always the result of the latest dispatched fetch;
/// older responses are dropped by comparing `latest_request`.
pub struct FeedState {
    pub posts: Vec<Post>,
    pub list_state: ListState,
    pub loading: bool,
    pub error: Option<String>,
    pub sort_mode: SortMode,
    /// Set on mount and after a successful submission; consumed on dispatch
    pub refresh_requested: bool,
    /// Sort mode of the most recently dispatched fetch
    pub dispatched_sort: Option<SortMode>,
    /// Token of the most recently dispatched fetch
    pub latest_request: u64,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            posts: Vec::new(),
            list_state: ListState::default(),
            loading: false,
            error: None,
            sort_mode: SortMode::default(),
            refresh_requested: true,
            dispatched_sort: None,
            latest_request: 0,
        }
    }

    pub fn needs_fetch(&self) -> bool {
        self.refresh_requested || self.dispatched_sort != Some(self.sort_mode)
    }

    pub fn selected_post(&self) -> Option<&Post> {
        self.list_state.selected().and_then(|i| self.posts.get(i))
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

/// "Ask for Help" modal state. Lives only while the modal is open.
pub struct ReportFormState {
    pub open: bool,
    /// Incremented every time the form opens, so a late submission result
    /// cannot close a newer form
    pub session: u64,
    pub focus: FormField,
    pub description: TextArea<'static>,
    pub category: Option<Category>,
    pub photo_path_input: String,
    pub photo: Option<PhotoPreview>,
    pub errors: FieldErrors,
    pub submitting: bool,
}

impl ReportFormState {
    pub fn new() -> Self {
        Self {
            open: false,
            session: 0,
            focus: FormField::Description,
            description: new_description_area(),
            category: None,
            photo_path_input: String::new(),
            photo: None,
            errors: FieldErrors::default(),
            submitting: false,
        }
    }

    pub fn description_text(&self) -> String {
        self.description.lines().join("\n")
    }

    pub fn description_char_count(&self) -> usize {
        self.description_text().chars().count()
    }

    /// Discard the draft. Dropping the preview releases its staged copy.
    pub fn reset(&mut self) {
        self.open = false;
        self.focus = FormField::Description;
        self.description = new_description_area();
        self.category = None;
        self.photo_path_input.clear();
        self.photo = None;
        self.errors.clear();
        self.submitting = false;
    }
}

impl Default for ReportFormState {
    fn default() -> Self {
        Self::new()
    }
}

fn new_description_area() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text("What's wrong?");
    textarea.set_cursor_line_style(Style::default());
    textarea.set_hard_tab_indent(true);
    textarea
}

/// Main application state
pub struct App {
    pub running: bool,
    pub service: Arc<dyn PostService>,
    pub current_user: Option<CurrentUser>,
    pub feed: FeedState,
    pub form: ReportFormState,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub color_scheme: ColorScheme,
    pub log_config: LogConfig,
    pub(crate) tx: UnboundedSender<AppMessage>,
    pub(crate) rx: UnboundedReceiver<AppMessage>,
}
