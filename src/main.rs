use anyhow::Result;
use crossterm::{
    event::EventStream,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use lemon_squeezer::app::action::Action;
use lemon_squeezer::app::event::AppEvent;
use lemon_squeezer::app::handler;
use lemon_squeezer::app::state::AppState;
use lemon_squeezer::logging::{self, SqueezeJournal};
use lemon_squeezer::squeezer::timer::SqueezeTimer;
use lemon_squeezer::squeezer::{SqueezerStore, StoreChange};
use lemon_squeezer::{config, ui};
use ratatui::prelude::*;
use std::io;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    // Load config
    let cfg = config::load_config()?;
    if logging::init_tracing(&cfg.logging)? {
        info!(version = env!("CARGO_PKG_VERSION"), "lemon squeezer starting");
    }
    match config::write_default_config() {
        Ok(true) => info!("wrote default config"),
        Ok(false) => {}
        Err(e) => warn!(error = %e, "could not write default config"),
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg).await;

    // Restore terminal
    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    // The store reports every applied change back into the event loop
    let mut store = SqueezerStore::new().with_empty_quality(cfg.squeeze.empty_quality);
    let store_tx = event_tx.clone();
    store.subscribe(move |change: &StoreChange, _: &SqueezerStore| {
        let _ = store_tx.send(AppEvent::Store(change.clone()));
    });

    let mut timer = SqueezeTimer::new(cfg.squeeze.delay());
    let mut journal = SqueezeJournal::new(&cfg.logging);
    let mut state = AppState::new(cfg, store);
    state.seed_starting_lemon();

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    // Initial render
    terminal.draw(|f| ui::render(f, &state))?;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        if let AppEvent::Store(ref change) = event {
            journal.record(change);
        }

        let actions = handler::handle_event(&mut state, event);

        for action in actions {
            match action {
                Action::ScheduleSqueeze { ticket } => {
                    let tx = event_tx.clone();
                    timer.schedule(ticket, move |ticket| {
                        let _ = tx.send(AppEvent::SqueezeElapsed(ticket));
                    });
                }
                Action::CancelSqueezes => {
                    timer.cancel_all();
                }
                Action::Quit => {
                    state.should_quit = true;
                }
            }
        }

        if state.should_quit {
            timer.cancel_all();
            info!(
                squeezes = state.store.squeeze_count(),
                total = state.store.collection().total_amount,
                "lemon squeezer exiting"
            );
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state))?;
            state.dirty = false;
        }
    }

    Ok(())
}
