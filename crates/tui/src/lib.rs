use std::{io, sync::Arc, time::Duration};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sift_client::{SearchBackend, SearchClient};
use sift_core::config::AppConfig;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

mod app;
mod events;
mod ui;

pub use app::{App, SearchRequest};
pub use events::SearchEvent;

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    // Pre-flight (outside of the alternate screen so errors stay readable)
    let client = SearchClient::new(&config)?;
    tracing::info!("Search endpoint: {}", client.endpoint());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, event::EnableMouseCapture, event::EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let res = run_app(&mut terminal, &mut app, Arc::new(client)).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        event::DisableMouseCapture,
        event::DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    res
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    backend: Arc<dyn SearchBackend>,
) -> anyhow::Result<()> {
    let (tx_events, mut rx_events) = mpsc::channel::<SearchEvent>(32);

    loop {
        if app.should_quit {
            return Ok(());
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(request) = app.handle_key(key) {
                        spawn_search(backend.clone(), request, tx_events.clone());
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    event::MouseEventKind::ScrollUp => app.scroll_up(3),
                    event::MouseEventKind::ScrollDown => app.scroll_down(3),
                    _ => {}
                },
                Event::Paste(text) => app.handle_paste(&text),
                _ => {}
            }
        }

        // Apply whatever finished since the last frame, in arrival order
        while let Ok(event) = rx_events.try_recv() {
            app.handle_event(event);
        }
    }
}

/// Runs one search off the UI loop and reports the outcome on `tx`.
/// Overlapping searches are neither deduplicated nor cancelled.
pub fn spawn_search(
    backend: Arc<dyn SearchBackend>,
    request: SearchRequest,
    tx: mpsc::Sender<SearchEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = backend.search(&request.query).await;
        let event = SearchEvent::Completed {
            generation: request.generation,
            query: request.query,
            outcome,
        };
        if tx.send(event).await.is_err() {
            tracing::debug!("UI loop gone, dropping search result");
        }
    })
}
