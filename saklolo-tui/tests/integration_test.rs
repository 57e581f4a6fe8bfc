use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use saklolo::api::{ApiError, ApiResult, PostService};
use saklolo::app::App;
use saklolo::report::DraftReport;
use saklolo::ui;
use saklolo_types::{Category, CurrentUser, Post, SortMode};
use uuid::Uuid;

/// In-memory server: created posts show up in the next listing
#[derive(Default)]
struct MemoryServer {
    posts: Mutex<Vec<Post>>,
    fetches: Mutex<Vec<SortMode>>,
    offline: bool,
}

#[async_trait]
impl PostService for MemoryServer {
    async fn list_posts(&self) -> ApiResult<Vec<Post>> {
        self.fetches.lock().unwrap().push(SortMode::Latest);
        if self.offline {
            return Err(ApiError::Api("connection refused".to_string()));
        }
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn list_popular_posts(&self) -> ApiResult<Vec<Post>> {
        self.fetches.lock().unwrap().push(SortMode::Popular);
        if self.offline {
            return Err(ApiError::Api("connection refused".to_string()));
        }
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.upvotes.cmp(&a.upvotes));
        Ok(posts)
    }

    async fn create_post(&self, draft: DraftReport) -> ApiResult<Post> {
        let post = Post {
            id: Uuid::new_v4(),
            author_username: "maria".to_string(),
            description: draft.description,
            category: draft.category,
            photo_url: draft.photo.map(|p| format!("https://cdn.test/{}", p.file_name)),
            created_at: chrono::Utc::now(),
            upvotes: 0,
            comment_count: 0,
        };
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key_event(key(KeyCode::Char(c))).unwrap();
    }
}

async fn settle(app: &mut App) {
    let message = tokio::time::timeout(Duration::from_secs(2), app.wait_for_message())
        .await
        .expect("timed out waiting for message")
        .expect("channel closed");
    app.handle_message(message);
}

fn screen_text(app: &mut App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    terminal.draw(|frame| ui::render(app, frame)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[tokio::test]
async fn report_typed_at_the_keyboard_appears_in_the_feed() {
    let server = Arc::new(MemoryServer::default());
    let mut app = App::new(server.clone(), Some(CurrentUser::new("maria")));

    assert!(app.sync_feed());
    settle(&mut app).await;
    assert!(screen_text(&mut app).contains("No help requests yet"));

    app.handle_key_event(key(KeyCode::Char('n'))).unwrap();
    assert!(app.form.open);
    type_text(&mut app, "Roof torn off, need tarps");
    app.handle_key_event(key(KeyCode::Tab)).unwrap();
    app.handle_key_event(key(KeyCode::Char('1'))).unwrap();
    assert_eq!(app.form.category, Some(Category::Typhoon));

    let form_screen = screen_text(&mut app);
    assert!(form_screen.contains("Ask for Help"));
    assert!(form_screen.contains("25/1000 characters"));

    app.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
        .unwrap();
    assert!(app.form.submitting);
    settle(&mut app).await;
    assert!(!app.form.open);

    assert!(app.sync_feed());
    settle(&mut app).await;
    assert_eq!(app.feed.posts.len(), 1);
    assert!(screen_text(&mut app).contains("Roof torn off, need tarps"));
    assert!(!app.sync_feed());
}

#[tokio::test]
async fn empty_form_shows_field_errors_and_sends_nothing() {
    let server = Arc::new(MemoryServer::default());
    let mut app = App::new(server.clone(), None);
    app.sync_feed();
    settle(&mut app).await;

    app.handle_key_event(key(KeyCode::Char('n'))).unwrap();
    app.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
        .unwrap();

    assert!(app.form.open);
    assert!(!app.form.submitting);
    let text = screen_text(&mut app);
    assert!(text.contains("Description is required"));
    assert!(text.contains("Category is required"));
    assert!(server.posts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn switching_sort_refetches_from_the_popular_endpoint() {
    let server = Arc::new(MemoryServer::default());
    let mut app = App::new(server.clone(), None);
    app.sync_feed();
    settle(&mut app).await;

    app.handle_key_event(key(KeyCode::Char('2'))).unwrap();
    assert!(app.sync_feed());
    assert!(screen_text(&mut app).contains("Loading posts"));
    settle(&mut app).await;

    assert_eq!(
        *server.fetches.lock().unwrap(),
        vec![SortMode::Latest, SortMode::Popular]
    );
}

#[tokio::test]
async fn offline_server_shows_retry_banner() {
    let server = Arc::new(MemoryServer {
        offline: true,
        ..Default::default()
    });
    let mut app = App::new(server, None);
    app.sync_feed();
    settle(&mut app).await;

    assert!(!app.feed.loading);
    assert!(screen_text(&mut app).contains("Press r to retry"));
}

#[test]
fn tiny_terminal_shows_resize_notice() {
    let mut app = App::new(Arc::new(MemoryServer::default()), None);
    let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
    terminal.draw(|frame| ui::render(&mut app, frame)).unwrap();
    let text: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(text.contains("Terminal Too Small"));
}
