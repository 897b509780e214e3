use crate::app::{App, ROSTER_COLUMNS, Screen};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;
    let requests = bindings(&mut guard, key_event);
    drop(guard);

    for request in requests {
        let _ = network_requests.send(request).await;
    }
}

/// Apply a key press to the app and return the service calls it triggers.
pub fn bindings(app: &mut App, key_event: KeyEvent) -> Vec<NetworkRequest> {
    let mut requests = Vec::new();
    let screen = app.state.screen;

    match (screen, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('c'), KeyModifiers::CONTROL) => quit(),
        (_, Char('q'), _) => quit(),

        // Global
        (_, KeyCode::Esc, _) => app.back(),
        (_, Char('?'), _) => app.toggle_help(),
        (_, Char('"'), _) => app.toggle_show_logs(),
        (_, Char('F'), _) => app.toggle_full_screen(),

        // Scrolling text screens
        (Screen::Instructions | Screen::TeamReport | Screen::PlayerInfo, Char('j') | KeyCode::Down, _) => {
            app.scroll_down()
        }
        (Screen::Instructions | Screen::TeamReport | Screen::PlayerInfo, Char('k') | KeyCode::Up, _) => {
            app.scroll_up()
        }
        (Screen::Instructions, KeyCode::Enter, _) => app.start(),

        // Match selection
        (Screen::SelectMatch, Char(c), _) if c.is_ascii_digit() => {
            requests.extend(app.type_date_digit(c));
        }
        (Screen::SelectMatch, KeyCode::Backspace, _) => requests.extend(app.erase_date_digit()),
        (Screen::SelectMatch, KeyCode::Up, _) => app.state.match_selection.prev_league(),
        (Screen::SelectMatch, KeyCode::Down, _) => app.state.match_selection.next_league(),
        (Screen::SelectMatch, KeyCode::Left, _) => app.state.match_selection.prev_match(),
        (Screen::SelectMatch, KeyCode::Right, _) => app.state.match_selection.next_match(),
        (Screen::SelectMatch, KeyCode::Enter, _) => requests.extend(app.confirm_match()),

        // Squad picking
        (Screen::PlayerSelection, Char('l') | KeyCode::Right, _) => app.picker_move(1),
        (Screen::PlayerSelection, Char('h') | KeyCode::Left, _) => app.picker_move(-1),
        (Screen::PlayerSelection, Char('j') | KeyCode::Down, _) => {
            app.picker_move(ROSTER_COLUMNS as isize)
        }
        (Screen::PlayerSelection, Char('k') | KeyCode::Up, _) => {
            app.picker_move(-(ROSTER_COLUMNS as isize))
        }
        (Screen::PlayerSelection, KeyCode::Tab, _) => app.picker_toggle_focus(),
        (Screen::PlayerSelection, KeyCode::Enter | Char(' '), _) => app.picker_activate(),
        (Screen::PlayerSelection, Char('a'), _) => app.picker_auto_select(),
        (Screen::PlayerSelection, Char('n'), _) => requests.extend(app.picker_commit()),

        // Lineup screens
        (Screen::Playing11 | Screen::SwapPlayer | Screen::FinalPlaying11, Char('j') | KeyCode::Down, _) => {
            app.lineup_move(1)
        }
        (Screen::Playing11 | Screen::SwapPlayer | Screen::FinalPlaying11, Char('k') | KeyCode::Up, _) => {
            app.lineup_move(-1)
        }
        (Screen::Playing11 | Screen::SwapPlayer | Screen::FinalPlaying11, Char('i'), _) => {
            requests.extend(app.open_player_info())
        }
        (Screen::Playing11 | Screen::FinalPlaying11, KeyCode::Enter, _) => {
            requests.extend(app.open_player_info())
        }
        (Screen::Playing11 | Screen::FinalPlaying11, Char('r'), _) => {
            requests.extend(app.open_team_report())
        }
        (Screen::Playing11, Char('s'), _) => app.open_swap(),
        (Screen::Playing11 | Screen::SwapPlayer, Char('f'), _) => requests.extend(app.finalize()),
        (Screen::SwapPlayer, Char('l') | KeyCode::Right, _) => requests.extend(app.bench_move(1)),
        (Screen::SwapPlayer, Char('h') | KeyCode::Left, _) => requests.extend(app.bench_move(-1)),
        (Screen::SwapPlayer, KeyCode::Enter, _) => requests.extend(app.commit_swap()),
        (Screen::FinalPlaying11, Char('w'), _) => app.save_and_report(),

        _ => {}
    }

    requests
}

fn quit() {
    crate::cleanup_terminal();
    std::process::exit(0);
}
