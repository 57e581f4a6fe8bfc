use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};
use saklolo::api::ApiClient;
use saklolo::app::App;
use saklolo::config::{Settings, SettingsOverrides};
use saklolo::logging::{self, LogConfig};
use saklolo::{terminal, ui};
use saklolo_types::CurrentUser;

/// Saklolo - ask your neighbours for help from the terminal
#[derive(Parser)]
#[command(name = "saklolo")]
#[command(about = "A terminal client for community help requests")]
#[command(version)]
struct Cli {
    /// Server API base URL (e.g. http://127.0.0.1:8000/api)
    #[arg(long, short)]
    server: Option<String>,

    /// Color scheme: default, dark, light or solarized
    #[arg(long)]
    color_scheme: Option<String>,

    /// Session token sent as a bearer token
    #[arg(long, env = "SAKLOLO_SESSION_TOKEN")]
    session_token: Option<String>,

    /// Username shown in the "ask for help" prompt
    #[arg(long, short)]
    user: Option<String>,

    /// Settings file to use instead of ~/.saklolo/settings.toml
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

// Load environment variables from .env file so SAKLOLO_* can be set
// without command-line args
fn load_env() {
    let _ = dotenv::dotenv();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    load_env();

    let settings = Settings::load(
        cli.config.as_deref(),
        SettingsOverrides {
            server_url: cli.server,
            color_scheme: cli.color_scheme,
            session_token: cli.session_token,
            username: cli.user,
        },
    )?;

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    }
    .with_log_file(settings.log_file.clone());
    logging::init_logging(&log_config)?;
    log::info!("Connecting to {}", settings.server_url);

    let mut client = ApiClient::new(settings.server_url.clone());
    client.set_session_token(settings.session_token.clone());

    let current_user = settings.username.clone().map(CurrentUser::new);
    let mut app = App::new(Arc::new(client), current_user);
    app.color_scheme = settings.color_scheme();
    app.log_config = log_config;

    let mut tui = terminal::init()?;
    let result = run(&mut tui, &mut app);
    terminal::restore()?;

    if let Err(e) = &result {
        log::error!("Exited with error: {:#}", e);
    }
    result
}

fn run(tui: &mut terminal::Tui, app: &mut App) -> Result<()> {
    while app.running {
        app.sync_feed();
        app.process_messages();

        tui.draw(|frame| ui::render(app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            // Mouse and resize events only need a redraw
            if let Event::Key(key) = event::read()? {
                app.handle_key_event(key)?;
            }
        }
    }
    Ok(())
}
