mod app;
mod components;
mod draw;
mod format;
mod images;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{error, info};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if handle_cli_args() {
        return Ok(());
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(log::LevelFilter::Error)?;
    tui_logger::set_default_level(log::LevelFilter::Error);

    let settings = AppSettings::load();
    let client = settings.api_client();
    info!(
        "squads at {}, model at {}, stats at {}",
        settings.endpoints.squads, settings.endpoints.model, settings.endpoints.stats
    );
    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx));

    // Network thread
    let network_worker = NetworkWorker::new(client, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();

    Ok(())
}

fn handle_cli_args() -> bool {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return false;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            true
        }
        "-V" | "--version" => {
            println!("cricxi {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "cricxi - fantasy cricket XI picker for the terminal

Usage:
  cricxi
  cricxi --help
  cricxi --version

Environment:
  CRICXI_SQUADS_URL      Squad listing service
  CRICXI_MODEL_URL       Optimizer and team revaluation service
  CRICXI_STATS_URL       Career stats and analysis service
  CRICXI_TIMEOUT_SECS    Request timeout in seconds (default 10)
  CRICXI_RETRIES         Retries after a connection failure (default 1)
  CRICXI_LOG_LEVEL       error, warn, info, debug or trace
  CRICXI_INSTRUCTIONS    Text file replacing the bundled instructions
  CRICXI_PLAYER_IMAGES   JSON list of player image references
  CRICXI_EXPORT_DIR      Where the final XI is saved (default ~/.config/cricxi)"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    {
        let mut app_guard = app.lock().await;
        draw::draw(&mut terminal, &mut app_guard, loading);
    }

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                handle_ui_event(ui_event, &app, &network_requests).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }

            Some(response) = network_responses.recv() => {
                handle_network_response(response, &app, &network_requests, &mut loading).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    match ui_event {
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
        }
        UiEvent::Resize => {}
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    loading: &mut LoadingState,
) {
    let mut guard = app.lock().await;
    let follow_ups = match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            Vec::new()
        }
        NetworkResponse::SquadsLoaded { date, listing } => {
            guard.on_squads_loaded(date, listing);
            Vec::new()
        }
        NetworkResponse::AggregateStatsLoaded { stats } => {
            guard.on_aggregate_stats_loaded(stats);
            Vec::new()
        }
        NetworkResponse::TeamPredicted { prediction } => guard.on_team_predicted(prediction),
        NetworkResponse::TeamEvaluated { lineup, scores, evaluation } => {
            guard.on_team_evaluated(lineup, scores, evaluation);
            Vec::new()
        }
        NetworkResponse::TeamAnalyzed { lineup, text } => {
            guard.on_team_analyzed(lineup, text);
            Vec::new()
        }
        NetworkResponse::PlayerAnalyzed { player, text } => {
            guard.on_player_analyzed(player, text);
            Vec::new()
        }
        NetworkResponse::Error { request, message } => {
            error!("Network error: {message}");
            guard.on_error(request, message);
            Vec::new()
        }
    };
    drop(guard);

    for request in follow_ups {
        let _ = network_requests.send(request).await;
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

/// Best effort: also runs from the panic hook.
pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
