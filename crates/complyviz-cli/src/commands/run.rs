use std::io;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};

use complyviz_core::animation::{Clock, SystemClock};
use complyviz_core::api::{completion_percent, ApiClient, CredentialStore};
use complyviz_core::AppConfig;
use complyviz_tui::{
    app::App,
    event::{AppEvent, EventHandler, LiveDataResult},
    input::handle_key_event,
    ui,
};

use super::api_client;

type Backend = CrosstermBackend<io::Stdout>;

pub async fn run(config: AppConfig) -> Result<()> {
    let mut app = App::new(&config)?;

    // Create channel for async live-data results
    let (live_tx, mut live_rx) = mpsc::unbounded_channel::<LiveDataResult>();
    match api_client(&config) {
        Ok(client) => spawn_live_fetch(client, live_tx),
        Err(e) => warn!(error = %e, "API client unavailable, showing demo data only"),
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("complyviz"))?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let event_handler =
        EventHandler::with_animation_fps(config.ui.tick_rate_ms, config.animation.animation_fps);
    let result = event_loop(&mut terminal, &mut app, &event_handler, &mut live_rx);

    // Unmount animations before the terminal goes away
    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    events: &EventHandler,
    live_rx: &mut mpsc::UnboundedReceiver<LiveDataResult>,
) -> Result<()> {
    let clock = SystemClock::new();

    loop {
        // Process any completed fetches (non-blocking)
        while let Ok(result) = live_rx.try_recv() {
            app.apply_live(result, clock.now());
        }

        terminal.draw(|frame| ui::draw(frame, app, clock.now()))?;

        // Use the animation frame interval while anything is moving
        let event = if app.needs_animation_frame() {
            events.next_animation()?
        } else {
            events.next()?
        };
        if let Some(AppEvent::Key(key)) = event {
            let action = handle_key_event(key, app);
            app.apply(action, clock.now());
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Fetch assessment progress in the background when a session exists
fn spawn_live_fetch(client: ApiClient, tx: mpsc::UnboundedSender<LiveDataResult>) {
    match client.credentials().get_token() {
        Ok(Some(_)) => {}
        Ok(None) => {
            info!("No stored session, dashboard runs on demo data");
            return;
        }
        Err(e) => {
            warn!(error = %e, "Could not read stored session");
            return;
        }
    }

    tokio::spawn(async move {
        let result = match fetch_live(&client).await {
            Ok((completion, user)) => LiveDataResult::Success { completion, user },
            Err(e) => LiveDataResult::Failure {
                error: e.to_string(),
            },
        };
        let _ = tx.send(result);
    });
}

async fn fetch_live(client: &ApiClient) -> complyviz_core::Result<(f64, Option<String>)> {
    let user = client.me().await?;
    let questions = client.questions(None).await?;
    let answers = client.answers().await?;
    Ok((completion_percent(&questions, &answers), Some(user.email)))
}
