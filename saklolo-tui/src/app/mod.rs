use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::KeyEvent;
use saklolo_types::{ColorScheme, CurrentUser, SortMode};
use tokio::sync::mpsc;

use crate::api::PostService;
use crate::logging::LogConfig;
use crate::api::ApiError;
use crate::photo::{expand_home, PhotoPreview};
use crate::report::validate_report;
use crate::{log_api_call, log_feed, log_form};

pub mod state;
pub use state::*;
pub mod handlers;
pub mod tasks;
pub use tasks::AppMessage;

impl App {
    pub fn new(service: Arc<dyn PostService>, current_user: Option<CurrentUser>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            running: true,
            service,
            current_user,
            feed: FeedState::new(),
            form: ReportFormState::new(),
            input_mode: InputMode::Navigation,
            show_help: false,
            color_scheme: ColorScheme::default(),
            log_config: LogConfig::default(),
            tx,
            rx,
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    // Feed

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        if self.feed.sort_mode != mode {
            log_feed!(self.log_config, "sort mode {} -> {}", self.feed.sort_mode.as_str(), mode.as_str());
            self.feed.sort_mode = mode;
        }
    }

    pub fn toggle_sort_mode(&mut self) {
        let next = self.feed.sort_mode.toggle();
        self.set_sort_mode(next);
    }

    /// Mark the feed as stale; the next `sync_feed` re-fetches it
    pub fn request_refresh(&mut self) {
        self.feed.refresh_requested = true;
    }

    /// Dispatch a fetch if a refresh was requested or the sort mode differs
    /// from the last dispatched one. Returns whether a fetch was started.
    pub fn sync_feed(&mut self) -> bool {
        if !self.feed.needs_fetch() {
            return false;
        }

        let sort = self.feed.sort_mode;
        self.feed.latest_request += 1;
        self.feed.loading = true;
        self.feed.error = None;
        self.feed.refresh_requested = false;
        self.feed.dispatched_sort = Some(sort);

        let token = self.feed.latest_request;
        log_api_call!(self.log_config, "fetch feed token={} sort={}", token, sort.as_str());
        tasks::fetch_feed(self.service.clone(), self.tx.clone(), token, sort);
        true
    }

    pub fn next_post(&mut self) {
        if self.feed.posts.is_empty() {
            return;
        }
        let last = self.feed.posts.len() - 1;
        let next = match self.feed.list_state.selected() {
            Some(i) => (i + 1).min(last),
            None => 0,
        };
        self.feed.list_state.select(Some(next));
    }

    pub fn previous_post(&mut self) {
        if self.feed.posts.is_empty() {
            return;
        }
        let prev = match self.feed.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.feed.list_state.select(Some(prev));
    }

    pub fn first_post(&mut self) {
        if !self.feed.posts.is_empty() {
            self.feed.list_state.select(Some(0));
        }
    }

    pub fn last_post(&mut self) {
        if !self.feed.posts.is_empty() {
            self.feed.list_state.select(Some(self.feed.posts.len() - 1));
        }
    }

    // Report form

    pub fn open_report_form(&mut self) {
        if self.form.open {
            return;
        }
        self.form.reset();
        self.form.open = true;
        self.form.session += 1;
        self.input_mode = InputMode::Typing;
        log_form!(self.log_config, "report form opened (session {})", self.form.session);
    }

    /// Close the modal and discard the draft, including any staged photo
    pub fn close_report_form(&mut self) {
        if !self.form.open {
            return;
        }
        self.form.reset();
        self.input_mode = InputMode::Navigation;
        log_form!(self.log_config, "report form closed (session {})", self.form.session);
    }

    /// Stage a photo for the draft, replacing (and releasing) any previous one.
    /// On failure the previous preview is kept and the error is shown inline.
    pub fn select_photo(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.form.photo_path_input = path.display().to_string();
        match PhotoPreview::stage(path) {
            Ok(preview) => {
                log_form!(self.log_config, "photo selected: {}", preview.summary());
                self.form.photo = Some(preview);
                self.form.errors.photo = None;
                true
            }
            Err(e) => {
                log_form!(self.log_config, "photo rejected: {}", e);
                self.form.errors.photo = Some(e.to_string());
                false
            }
        }
    }

    pub fn clear_photo(&mut self) {
        self.form.photo = None;
        self.form.photo_path_input.clear();
        self.form.errors.photo = None;
    }

    /// Validate the draft and send it. Returns whether a request was dispatched.
    ///
    /// Invalid drafts only update the inline field errors. While a submission
    /// is in flight further submits are ignored.
    pub fn submit_report(&mut self) -> bool {
        if !self.form.open || self.form.submitting {
            return false;
        }

        // A typed path counts even if Enter was never pressed in the photo field
        let photo_ready = self.stage_typed_photo();

        let draft = match validate_report(&self.form.description_text(), self.form.category) {
            Ok(draft) if photo_ready => draft,
            Ok(_) => {
                log_form!(self.log_config, "submit blocked by photo error");
                return false;
            }
            Err(mut errors) => {
                log_form!(self.log_config, "validation failed: {:?}", errors);
                errors.photo = self.form.errors.photo.take();
                self.form.errors = errors;
                return false;
            }
        };

        let photo = match self.form.photo.as_ref().map(|p| p.read_upload()).transpose() {
            Ok(photo) => photo,
            Err(e) => {
                self.form.errors.photo = Some(format!("Could not read photo: {}", e));
                return false;
            }
        };

        self.form.errors.clear();
        self.form.submitting = true;
        log_api_call!(
            self.log_config,
            "create post category={} photo={}",
            draft.category.as_str(),
            photo.is_some()
        );
        tasks::create_post(
            self.service.clone(),
            self.tx.clone(),
            self.form.session,
            draft.with_photo(photo),
        );
        true
    }

    /// Bring the staged preview in line with the photo path field.
    /// Returns false when the path cannot be attached.
    fn stage_typed_photo(&mut self) -> bool {
        let typed = self.form.photo_path_input.trim().to_string();
        if typed.is_empty() {
            self.clear_photo();
            return true;
        }

        let already_staged = self
            .form
            .photo
            .as_ref()
            .is_some_and(|p| p.source() == expand_home(Path::new(&typed)));
        if already_staged {
            self.form.errors.photo = None;
            return true;
        }
        self.select_photo(typed)
    }

    // Messages

    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::PostsLoaded { token, sort, result } => {
                if token != self.feed.latest_request {
                    log_feed!(
                        self.log_config,
                        "dropping stale feed response token={} sort={} (latest={})",
                        token,
                        sort.as_str(),
                        self.feed.latest_request
                    );
                    return;
                }

                self.feed.loading = false;
                match result {
                    Ok(posts) => {
                        log_feed!(self.log_config, "feed loaded: {} posts ({})", posts.len(), sort.as_str());
                        self.feed.list_state.select(if posts.is_empty() { None } else { Some(0) });
                        self.feed.posts = posts;
                        self.feed.error = None;
                    }
                    Err(e) => {
                        log::warn!("Failed to load feed: {}", e);
                        self.feed.error = Some(categorize_error(&e));
                    }
                }
            }
            AppMessage::ReportSubmitted { session, result } => {
                let current = session == self.form.session;
                if current {
                    self.form.submitting = false;
                }
                match result {
                    Ok(post) => {
                        log::info!("Report {} submitted ({})", post.id, post.category.as_str());
                        self.request_refresh();
                        if current {
                            self.close_report_form();
                        }
                    }
                    // Submission failures are intentionally not shown in the UI
                    Err(e) => log::warn!("Report submission failed: {}", e),
                }
            }
        }
    }

    /// Apply every message that has already arrived without blocking
    pub fn process_messages(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.rx.try_recv() {
            self.handle_message(message);
            handled += 1;
        }
        handled
    }

    /// Wait for the next completed remote call
    pub async fn wait_for_message(&mut self) -> Option<AppMessage> {
        self.rx.recv().await
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        handlers::handle_key_event(self, key)
    }
}

/// Turn a failed fetch into the banner text shown above the feed
fn categorize_error(error: &ApiError) -> String {
    const NETWORK: &str =
        "Network Error: Connection failed. Check your network and try again (Press r to retry)";
    const RESPONSE: &str =
        "Response Error: The server sent a feed this client cannot read (Press r to retry)";

    match error {
        ApiError::Network(e) if e.is_decode() => RESPONSE.to_string(),
        ApiError::Network(e) if e.is_connect() || e.is_timeout() || e.is_request() => {
            NETWORK.to_string()
        }
        ApiError::Serialization(_) => RESPONSE.to_string(),
        ApiError::Unauthorized(_) => {
            "Authorization Error: Session expired or insufficient permissions. Check your session token".to_string()
        }
        ApiError::Server { .. } => {
            "Server Error: The server is experiencing issues. Please try again later (Press r to retry)".to_string()
        }
        other => format!("Error: {} (Press r to retry)", other),
    }
}
