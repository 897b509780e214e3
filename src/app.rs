use crate::images::PlayerImages;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, CommitOutcome, FinalTeamExport, PickerFocus, SelectedMatch};
use crate::state::messages::{Evaluation, NetworkRequest};
use chrono::NaiveDate;
use cricxi_api::{AggregateStatsMap, Format, Prediction, SquadListing, TeamScores};
use anyhow::Context;
use log::{info, warn};
use std::path::PathBuf;

/// Columns in the squad picker grid.
pub const ROSTER_COLUMNS: usize = 3;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Screen {
    #[default]
    Instructions,
    SelectMatch,
    PlayerSelection,
    Playing11,
    SwapPlayer,
    FinalPlaying11,
    TeamReport,
    PlayerInfo,
    Help,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Instructions => "Instructions",
            Screen::SelectMatch => "Select Match",
            Screen::PlayerSelection => "Player Selection",
            Screen::Playing11 => "Playing 11",
            Screen::SwapPlayer => "Swap Player",
            Screen::FinalPlaying11 => "Final Playing 11",
            Screen::TeamReport => "Team Report",
            Screen::PlayerInfo => "Player Information",
            Screen::Help => "Help",
        }
    }

    /// Position in the main wizard, for the step indicator.
    pub fn step(&self) -> Option<usize> {
        match self {
            Screen::Instructions => Some(0),
            Screen::SelectMatch => Some(1),
            Screen::PlayerSelection => Some(2),
            Screen::Playing11 => Some(3),
            Screen::SwapPlayer => Some(4),
            Screen::FinalPlaying11 => Some(5),
            _ => None,
        }
    }
}

pub const WIZARD_STEPS: [Screen; 6] = [
    Screen::Instructions,
    Screen::SelectMatch,
    Screen::PlayerSelection,
    Screen::Playing11,
    Screen::SwapPlayer,
    Screen::FinalPlaying11,
];

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let images = match settings.player_images_path.as_deref() {
            Some(path) => match PlayerImages::load(path) {
                Ok(images) => {
                    info!("loaded {} player images", images.len());
                    images
                }
                Err(e) => {
                    warn!("{e:#}");
                    PlayerImages::default()
                }
            },
            None => PlayerImages::default(),
        };
        let state = AppState::new(settings.instructions(), images);

        if let Some(level) = settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        Self { settings, state }
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn navigate(&mut self, next: Screen) {
        if self.state.screen == next {
            return;
        }
        self.state.history.push(self.state.screen);
        self.state.screen = next;
        self.state.status_message = None;
        self.state.last_error = None;
    }

    /// Pop the history stack. Leaving the swap screen drops any preview;
    /// returning to a completed squad pick reopens it on the first side.
    pub fn back(&mut self) {
        if let Some(previous) = self.state.history.pop() {
            if self.state.screen == Screen::SwapPlayer {
                self.state.prediction.clear_preview();
            }
            if previous == Screen::PlayerSelection && self.state.picker.complete {
                self.state.picker.reopen();
            }
            self.state.screen = previous;
            self.state.status_message = None;
            self.state.last_error = None;
        }
    }

    pub fn toggle_help(&mut self) {
        if self.state.screen == Screen::Help {
            self.back();
        } else {
            self.navigate(Screen::Help);
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn start(&mut self) {
        self.navigate(Screen::SelectMatch);
    }

    pub fn scroll_down(&mut self) {
        if let Some(offset) = self.scroll_offset_mut() {
            *offset = offset.saturating_add(1);
        }
    }

    pub fn scroll_up(&mut self) {
        if let Some(offset) = self.scroll_offset_mut() {
            *offset = offset.saturating_sub(1);
        }
    }

    fn scroll_offset_mut(&mut self) -> Option<&mut u16> {
        match self.state.screen {
            Screen::Instructions => Some(&mut self.state.instructions_scroll),
            Screen::TeamReport => Some(&mut self.state.report_scroll),
            Screen::PlayerInfo => Some(&mut self.state.player_report.scroll_offset),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Match selection
    // -----------------------------------------------------------------------

    pub fn type_date_digit(&mut self, digit: char) -> Option<NetworkRequest> {
        let date = self.state.match_selection.push_digit(digit)?;
        Some(NetworkRequest::LoadSquads { date })
    }

    pub fn erase_date_digit(&mut self) -> Option<NetworkRequest> {
        let date = self.state.match_selection.pop_digit()?;
        Some(NetworkRequest::LoadSquads { date })
    }

    /// Lock in the highlighted fixture and fetch stats for everyone listed.
    pub fn confirm_match(&mut self) -> Option<NetworkRequest> {
        if self.state.aggregate_pending {
            return None;
        }
        let selection = &self.state.match_selection;
        let date = selection.date()?;
        let league = selection.selected_league()?.name.clone();
        let fixture = selection.selected_fixture()?.clone();

        let players = fixture.details.all_players();
        let format = fixture.details.format;
        let changed = self
            .state
            .selected
            .as_ref()
            .is_none_or(|m| m.fixture.key != fixture.key || m.date != date);
        if changed {
            self.state.picker = Default::default();
            self.state.prediction = Default::default();
        }
        self.state.selected = Some(SelectedMatch { date, league, fixture });
        self.state.aggregate_pending = true;
        Some(NetworkRequest::LoadAggregateStats { players, format })
    }

    pub fn on_squads_loaded(&mut self, date: NaiveDate, listing: SquadListing) {
        info!("{} leagues on {date}", listing.leagues.len());
        self.state.last_error = None;
        self.state.match_selection.on_listing(date, listing);
    }

    pub fn on_aggregate_stats_loaded(&mut self, stats: AggregateStatsMap) {
        self.state.aggregate = stats;
        self.state.aggregate_pending = false;
        self.state.last_error = None;
        if self.state.screen == Screen::SelectMatch {
            self.navigate(Screen::PlayerSelection);
        }
    }

    // -----------------------------------------------------------------------
    // Squad picking
    // -----------------------------------------------------------------------

    pub fn picker_move(&mut self, delta: isize) {
        let roster_len = self.state.picker_roster().len();
        let picker = &mut self.state.picker;
        match picker.focus {
            PickerFocus::Roster => {
                picker.cursor = step_clamped(picker.cursor, delta, roster_len);
            }
            PickerFocus::Slots => {
                picker.slot_cursor = step_clamped(picker.slot_cursor, delta, picker.slots.len());
            }
        }
    }

    pub fn picker_toggle_focus(&mut self) {
        let picker = &mut self.state.picker;
        picker.focus = match picker.focus {
            PickerFocus::Roster => PickerFocus::Slots,
            PickerFocus::Slots => PickerFocus::Roster,
        };
    }

    /// Enter in the grid picks; Enter on a slot clears it.
    pub fn picker_activate(&mut self) {
        match self.state.picker.focus {
            PickerFocus::Roster => {
                let roster = self.state.picker_roster();
                let cursor = self.state.picker.cursor;
                if let Some(name) = roster.get(cursor) {
                    self.state.picker.pick(cursor, name, &self.state.images);
                }
            }
            PickerFocus::Slots => {
                let slot = self.state.picker.slot_cursor;
                self.state.picker.clear_slot(slot);
            }
        }
    }

    pub fn picker_auto_select(&mut self) {
        let side_index = self.state.picker.side_index;
        let Some(side) = self.state.selected.as_ref().and_then(|m| m.details().side(side_index))
        else {
            return;
        };
        self.state.picker.auto_select(side, &self.state.images);
    }

    /// NEXT on the first side, PREDICT 11 on the second.
    pub fn picker_commit(&mut self) -> Option<NetworkRequest> {
        match self.state.picker.commit_side() {
            CommitOutcome::NextSide => None,
            CommitOutcome::NotEnoughPlayers => {
                self.state.status_message =
                    Some("Pick at least 11 players across both sides".to_string());
                None
            }
            CommitOutcome::Complete => {
                self.navigate(Screen::Playing11);
                self.request_prediction()
            }
        }
    }

    fn request_prediction(&mut self) -> Option<NetworkRequest> {
        let selected = self.state.selected.as_ref()?;
        let player_info = self.state.picker.player_info(selected.details());
        self.state.prediction = Default::default();
        self.state.prediction.pending = true;
        Some(NetworkRequest::PredictTeam {
            date: selected.date,
            format: selected.details().format,
            player_info,
        })
    }

    // -----------------------------------------------------------------------
    // Prediction, revaluation and narratives
    // -----------------------------------------------------------------------

    fn format(&self) -> Format {
        self.state
            .selected
            .as_ref()
            .map(|m| m.details().format)
            .unwrap_or_default()
    }

    /// Revaluation of the new XI, then team analysis when the roster changed.
    pub fn on_team_predicted(&mut self, prediction: Prediction) -> Vec<NetworkRequest> {
        info!("optimizer picked {} players", prediction.best_team.len());
        self.state.prediction.load(prediction);
        self.state.last_error = None;
        let mut requests = vec![self.evaluation_request(Evaluation::Committed)];
        requests.extend(self.refresh_narrative());
        requests
    }

    fn evaluation_request(&self, evaluation: Evaluation) -> NetworkRequest {
        let prediction = &self.state.prediction;
        let lineup = match (evaluation, prediction.preview.as_ref()) {
            (Evaluation::Preview, Some(preview)) => preview.lineup.clone(),
            _ => prediction.predicted.clone(),
        };
        NetworkRequest::EvaluateTeam {
            lineup,
            cov_matrix: prediction.cov_matrix.clone(),
            stats_raw: prediction.stats_raw.clone(),
            evaluation,
        }
    }

    fn refresh_narrative(&mut self) -> Option<NetworkRequest> {
        let lineup = self.state.prediction.predicted.clone();
        if lineup.is_empty() || !self.state.narrative.needs_refresh(&lineup) {
            return None;
        }
        self.state.narrative.begin(&lineup);
        Some(NetworkRequest::AnalyzeTeam {
            lineup,
            stats_raw: self.state.prediction.stats_raw.clone(),
            format: self.format(),
        })
    }

    pub fn on_team_evaluated(&mut self, lineup: Vec<String>, scores: TeamScores, evaluation: Evaluation) {
        self.state
            .prediction
            .on_scores(&lineup, scores, evaluation == Evaluation::Committed);
    }

    pub fn on_team_analyzed(&mut self, lineup: Vec<String>, text: String) {
        self.state.narrative.complete(&lineup, text);
    }

    pub fn on_player_analyzed(&mut self, player: String, text: String) {
        self.state.player_report.complete(&player, text);
    }

    pub fn lineup_move(&mut self, delta: isize) {
        if delta > 0 {
            self.state.prediction.select_next();
        } else {
            self.state.prediction.select_prev();
        }
    }

    pub fn open_team_report(&mut self) -> Option<NetworkRequest> {
        if !self.state.prediction.is_loaded() {
            return None;
        }
        self.state.report_scroll = 0;
        self.navigate(Screen::TeamReport);
        self.refresh_narrative()
    }

    pub fn open_player_info(&mut self) -> Option<NetworkRequest> {
        let player = self.state.prediction.selected_player()?.to_string();
        self.state.player_report.open(&player);
        self.navigate(Screen::PlayerInfo);
        Some(NetworkRequest::AnalyzePlayer {
            player,
            lineup: self.state.prediction.predicted.clone(),
            format: self.format(),
        })
    }

    // -----------------------------------------------------------------------
    // Swaps
    // -----------------------------------------------------------------------

    pub fn open_swap(&mut self) {
        if self.state.prediction.is_loaded() {
            self.state.prediction.clear_preview();
            self.navigate(Screen::SwapPlayer);
        }
    }

    /// Moving onto a bench player previews the swapped XI.
    pub fn bench_move(&mut self, delta: isize) -> Option<NetworkRequest> {
        let bench = self.state.bench();
        if bench.is_empty() {
            return None;
        }
        let cursor = match self.state.prediction.bench_cursor {
            Some(current) => step_clamped(current, delta, bench.len()),
            None => 0,
        };
        if self.state.prediction.bench_cursor == Some(cursor) {
            return None;
        }
        self.state.prediction.bench_cursor = Some(cursor);
        self.state.prediction.begin_preview(&bench[cursor]);
        Some(self.evaluation_request(Evaluation::Preview))
    }

    pub fn commit_swap(&mut self) -> Option<NetworkRequest> {
        let cursor = self.state.prediction.bench_cursor?;
        let candidate = self.state.bench().get(cursor)?.clone();
        let outgoing = self.state.prediction.selected_player()?.to_string();
        self.state.prediction.commit_swap(&candidate);
        self.state.status_message = Some(format!("{candidate} in for {outgoing}"));
        Some(self.evaluation_request(Evaluation::Committed))
    }

    pub fn finalize(&mut self) -> Option<NetworkRequest> {
        if !self.state.prediction.is_loaded() {
            return None;
        }
        self.state.prediction.clear_preview();
        self.navigate(Screen::FinalPlaying11);
        self.refresh_narrative()
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    pub fn final_team_export(&self) -> Option<FinalTeamExport> {
        let selected = self.state.selected.as_ref()?;
        let prediction = &self.state.prediction;
        if !prediction.is_loaded() {
            return None;
        }
        Some(FinalTeamExport {
            date: selected.date.format("%Y-%m-%d").to_string(),
            fixture: selected.fixture.key.clone(),
            format: selected.details().format.to_string(),
            lineup: prediction.predicted.clone(),
            captain: prediction.leaders.captain.clone(),
            vice_captain: prediction.leaders.vice_captain.clone(),
            total_score: crate::state::scoring::round_to(prediction.total_score, 2),
            scores: prediction.scores,
        })
    }

    pub fn save_final_team(&self) -> anyhow::Result<PathBuf> {
        let export = self.final_team_export().context("No final team to save")?;
        let dir = &self.settings.export_dir;
        let path = dir.join(format!("final_xi_{}.json", export.date));
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let payload = serde_json::to_string_pretty(&export).context("Failed to serialize team")?;
        std::fs::write(&path, payload)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("saved final XI to {}", path.display());
        Ok(path)
    }

    pub fn save_and_report(&mut self) {
        match self.save_final_team() {
            Ok(path) => {
                self.state.status_message = Some(format!("Saved to {}", path.display()));
            }
            Err(e) => {
                warn!("{e:#}");
                self.state.last_error = Some(format!("{e:#}"));
            }
        }
    }

    // -----------------------------------------------------------------------
    // Failures
    // -----------------------------------------------------------------------

    pub fn on_error(&mut self, request: NetworkRequest, message: String) {
        match request {
            NetworkRequest::LoadSquads { date } => {
                self.state.match_selection.on_error(date, message.clone());
            }
            NetworkRequest::LoadAggregateStats { .. } => {
                self.state.aggregate_pending = false;
            }
            NetworkRequest::PredictTeam { .. } => {
                self.state.prediction.pending = false;
                self.state.prediction.error = Some(message.clone());
            }
            NetworkRequest::EvaluateTeam { .. } => {}
            NetworkRequest::AnalyzeTeam { lineup, .. } => {
                self.state.narrative.fail(&lineup, message.clone());
            }
            NetworkRequest::AnalyzePlayer { player, .. } => {
                self.state.player_report.fail(&player, message.clone());
            }
        }
        self.state.last_error = Some(message);
    }
}

fn step_clamped(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cricxi_api::{CovMatrixToken, Fixture, League, MatchDetails, PlayerPoints, Side};

    fn app() -> App {
        let settings = AppSettings {
            export_dir: std::env::temp_dir().join(format!("cricxi-app-{}", std::process::id())),
            ..AppSettings::default()
        };
        App::new(settings)
    }

    fn side(name: &str) -> Side {
        Side {
            name: name.into(),
            squad: (0..8).map(|i| format!("{name} {i}")).collect(),
            second_squad: vec![],
        }
    }

    fn listing() -> SquadListing {
        SquadListing {
            leagues: vec![League {
                name: "Tour".into(),
                matches: vec![Fixture {
                    key: "Ireland_vs_Zimbabwe_Harare".into(),
                    details: MatchDetails {
                        format: Format::Odi,
                        sides: vec![side("Ireland"), side("Zimbabwe")],
                    },
                }],
            }],
        }
    }

    fn enter_date(app: &mut App) -> NaiveDate {
        let mut request = None;
        for c in "12072024".chars() {
            request = app.type_date_digit(c);
        }
        match request {
            Some(NetworkRequest::LoadSquads { date }) => date,
            other => panic!("expected squad lookup, got {other:?}"),
        }
    }

    fn through_picking(app: &mut App) -> NetworkRequest {
        app.start();
        let date = enter_date(app);
        app.on_squads_loaded(date, listing());
        let Some(NetworkRequest::LoadAggregateStats { players, format }) = app.confirm_match()
        else {
            panic!("expected aggregate stats request");
        };
        assert_eq!(players.len(), 16);
        assert_eq!(format, Format::Odi);
        app.on_aggregate_stats_loaded(AggregateStatsMap::default());
        assert_eq!(app.state.screen, Screen::PlayerSelection);

        app.picker_auto_select();
        assert!(app.picker_commit().is_none());
        app.picker_auto_select();
        app.picker_commit().expect("prediction request")
    }

    fn prediction(lineup: &[String]) -> Prediction {
        Prediction {
            best_team: lineup.to_vec(),
            cov_matrix: CovMatrixToken::new("cov"),
            player_stats_raw: "[]".into(),
            player_stats: lineup
                .iter()
                .enumerate()
                .map(|(i, p)| PlayerPoints {
                    player: p.clone(),
                    mean_points: 10.0 + i as f64,
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[test]
    fn wizard_reaches_prediction_with_both_sides() {
        let mut app = app();
        let request = through_picking(&mut app);
        let NetworkRequest::PredictTeam { player_info, format, .. } = request else {
            panic!("expected prediction request");
        };
        assert_eq!(format, Format::Odi);
        assert_eq!(player_info.sides.len(), 2);
        assert_eq!(player_info.sides[1].1.len(), 8);
        assert_eq!(app.state.screen, Screen::Playing11);
        assert!(app.state.prediction.pending);
    }

    #[test]
    fn prediction_queues_revaluation_then_analysis_once() {
        let mut app = app();
        through_picking(&mut app);
        let lineup: Vec<String> = app.state.picker.team_a_names().into_iter().take(11).collect();

        let requests = app.on_team_predicted(prediction(&lineup));
        assert_eq!(requests.len(), 2);
        assert!(matches!(
            requests[0],
            NetworkRequest::EvaluateTeam { evaluation: Evaluation::Committed, .. }
        ));
        assert!(matches!(requests[1], NetworkRequest::AnalyzeTeam { format: Format::Odi, .. }));

        assert!(app.open_team_report().is_none());
        assert_eq!(app.state.screen, Screen::TeamReport);
    }

    #[test]
    fn swap_flow_previews_then_commits() {
        let mut app = app();
        through_picking(&mut app);
        let lineup: Vec<String> = app.state.picker.team_a_names();
        app.on_team_predicted(prediction(&lineup));
        app.open_swap();

        let bench = app.state.bench();
        assert_eq!(bench.len(), 8);
        let Some(NetworkRequest::EvaluateTeam { lineup: preview, evaluation, .. }) = app.bench_move(1)
        else {
            panic!("expected preview revaluation");
        };
        assert_eq!(evaluation, Evaluation::Preview);
        assert_eq!(preview[0], bench[0]);
        assert_eq!(app.state.prediction.predicted, lineup);

        let Some(NetworkRequest::EvaluateTeam { lineup: committed, evaluation, .. }) =
            app.commit_swap()
        else {
            panic!("expected committed revaluation");
        };
        assert_eq!(evaluation, Evaluation::Committed);
        assert_eq!(committed[0], bench[0]);
        assert_eq!(app.state.prediction.predicted, committed);
        assert!(app.state.prediction.preview.is_none());

        assert!(matches!(app.finalize(), Some(NetworkRequest::AnalyzeTeam { .. })));
        assert_eq!(app.state.screen, Screen::FinalPlaying11);
    }

    #[test]
    fn old_failure_clears_once_the_wizard_moves_on() {
        let mut app = app();
        app.start();
        let date = enter_date(&mut app);
        app.on_error(NetworkRequest::LoadSquads { date }, "No Data Available".into());
        assert_eq!(app.state.last_error.as_deref(), Some("No Data Available"));

        app.erase_date_digit();
        let date = app.type_date_digit('4').map(|_| date).unwrap();
        app.on_squads_loaded(date, listing());
        assert!(app.state.last_error.is_none());

        app.confirm_match();
        app.on_error(
            NetworkRequest::LoadAggregateStats { players: vec![], format: Format::Odi },
            "stats down".into(),
        );
        app.confirm_match();
        app.on_aggregate_stats_loaded(AggregateStatsMap::default());
        assert!(app.state.last_error.is_none());

        app.picker_auto_select();
        app.picker_commit();
        app.picker_auto_select();
        let request = app.picker_commit().unwrap();
        app.on_error(request, "optimizer down".into());
        assert_eq!(app.state.prediction.error.as_deref(), Some("optimizer down"));

        let lineup = app.state.picker.team_a_names();
        app.on_team_predicted(prediction(&lineup));
        assert!(app.state.last_error.is_none());
        assert!(app.state.prediction.error.is_none());
    }

    #[test]
    fn back_from_prediction_reopens_first_side() {
        let mut app = app();
        through_picking(&mut app);
        let lineup = app.state.picker.team_a_names();
        app.on_team_predicted(prediction(&lineup));

        app.back();
        assert_eq!(app.state.screen, Screen::PlayerSelection);
        let picker = &app.state.picker;
        assert_eq!(picker.side_index, 0);
        assert_eq!(picker.filled(), 8);
        assert_eq!(picker.slots[0].as_ref().unwrap().name, "Ireland 0");

        app.state.picker.clear_slot(0);
        assert!(app.picker_commit().is_none());
        assert_eq!(app.state.picker.filled(), 8);
        let Some(NetworkRequest::PredictTeam { player_info, .. }) = app.picker_commit() else {
            panic!("expected a fresh prediction request");
        };
        assert_eq!(player_info.sides[0].1.len(), 7);
        assert!(!player_info.sides[0].1.contains(&"Ireland 0".to_string()));
        assert_eq!(player_info.sides[1].1.len(), 8);
    }

    #[test]
    fn back_walks_history() {
        let mut app = app();
        app.start();
        app.toggle_help();
        assert_eq!(app.state.screen, Screen::Help);
        app.back();
        assert_eq!(app.state.screen, Screen::SelectMatch);
        app.back();
        assert_eq!(app.state.screen, Screen::Instructions);
        app.back();
        assert_eq!(app.state.screen, Screen::Instructions);
    }

    #[test]
    fn squad_failure_is_shown_on_match_screen() {
        let mut app = app();
        app.start();
        let date = enter_date(&mut app);
        app.on_error(NetworkRequest::LoadSquads { date }, "No Data Available".into());
        assert_eq!(app.state.match_selection.error.as_deref(), Some("No Data Available"));
        assert!(app.confirm_match().is_none());
    }

    #[test]
    fn save_writes_final_team_json() {
        let mut app = app();
        through_picking(&mut app);
        let lineup: Vec<String> = app.state.picker.team_a_names();
        app.on_team_predicted(prediction(&lineup));

        let path = app.save_final_team().unwrap();
        assert!(path.ends_with("final_xi_2024-07-12.json"));
        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["match"], "Ireland_vs_Zimbabwe_Harare");
        assert_eq!(saved["format"], "ODI");
        assert_eq!(saved["lineup"].as_array().unwrap().len(), 8);
        assert_eq!(saved["captain"], lineup[7].as_str());
        std::fs::remove_file(path).unwrap();
    }
}
