use crate::app::Screen;
use crate::format::{mask_date, parse_date};
use crate::images::PlayerImages;
use crate::state::scoring::{self, Leaders};
use chrono::NaiveDate;
use cricxi_api::{
    AggregateStatsMap, CovMatrixToken, Fixture, League, MatchDetails, PlayerInfo, PlayerPoints,
    Prediction, Side, SquadListing, TeamScores,
};
use serde::Serialize;
use std::collections::HashSet;

pub const SLOT_COUNT: usize = 11;
const MAX_DATE_DIGITS: usize = 8;

// ---------------------------------------------------------------------------
// Match selection
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MatchSelectionState {
    /// Raw digits typed so far, `DDMMYYYY`.
    pub digits: String,
    pub listing: Option<SquadListing>,
    pub league_index: usize,
    pub match_index: usize,
    pub error: Option<String>,
}

impl MatchSelectionState {
    pub fn masked(&self) -> String {
        mask_date(&self.digits)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        parse_date(&self.masked())
    }

    /// Returns the date to look up once the digits form a valid date.
    pub fn push_digit(&mut self, digit: char) -> Option<NaiveDate> {
        if !digit.is_ascii_digit() || self.digits.len() >= MAX_DATE_DIGITS {
            return None;
        }
        self.digits.push(digit);
        self.on_edit()
    }

    pub fn pop_digit(&mut self) -> Option<NaiveDate> {
        self.digits.pop()?;
        self.on_edit()
    }

    fn on_edit(&mut self) -> Option<NaiveDate> {
        self.listing = None;
        self.error = None;
        self.league_index = 0;
        self.match_index = 0;
        self.date()
    }

    /// Listings for a date the user has since edited away from are dropped.
    pub fn on_listing(&mut self, date: NaiveDate, listing: SquadListing) {
        if self.date() != Some(date) {
            return;
        }
        self.listing = Some(listing);
        self.league_index = 0;
        self.match_index = 0;
        self.error = None;
    }

    pub fn on_error(&mut self, date: NaiveDate, message: String) {
        if self.date() == Some(date) {
            self.listing = None;
            self.error = Some(message);
        }
    }

    pub fn leagues(&self) -> &[League] {
        self.listing.as_ref().map(|l| l.leagues.as_slice()).unwrap_or_default()
    }

    pub fn selected_league(&self) -> Option<&League> {
        self.leagues().get(self.league_index)
    }

    pub fn selected_fixture(&self) -> Option<&Fixture> {
        self.selected_league()?.matches.get(self.match_index)
    }

    pub fn selected_match(&self) -> Option<&MatchDetails> {
        self.selected_fixture().map(|f| &f.details)
    }

    pub fn next_league(&mut self) {
        let count = self.leagues().len();
        if count > 0 {
            self.league_index = (self.league_index + 1) % count;
            self.match_index = 0;
        }
    }

    pub fn prev_league(&mut self) {
        let count = self.leagues().len();
        if count > 0 {
            self.league_index = (self.league_index + count - 1) % count;
            self.match_index = 0;
        }
    }

    pub fn next_match(&mut self) {
        let count = self.selected_league().map(|l| l.matches.len()).unwrap_or(0);
        if count > 0 {
            self.match_index = (self.match_index + 1) % count;
        }
    }

    pub fn prev_match(&mut self) {
        let count = self.selected_league().map(|l| l.matches.len()).unwrap_or(0);
        if count > 0 {
            self.match_index = (self.match_index + count - 1) % count;
        }
    }
}

/// The fixture the user committed to on the match screen.
#[derive(Debug, Clone)]
pub struct SelectedMatch {
    pub date: NaiveDate,
    pub league: String,
    pub fixture: Fixture,
}

impl SelectedMatch {
    pub fn details(&self) -> &MatchDetails {
        &self.fixture.details
    }
}

// ---------------------------------------------------------------------------
// Squad picking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PickedPlayer {
    /// Position in the side's full roster.
    pub roster_index: usize,
    pub name: String,
    pub image: String,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum PickerFocus {
    #[default]
    Roster,
    Slots,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CommitOutcome {
    NextSide,
    Complete,
    NotEnoughPlayers,
}

#[derive(Debug, Default)]
pub struct SquadPickerState {
    /// 0 = first listed side, 1 = second.
    pub side_index: usize,
    pub cursor: usize,
    pub slot_cursor: usize,
    pub focus: PickerFocus,
    pub slots: [Option<PickedPlayer>; SLOT_COUNT],
    pub team_a: Vec<PickedPlayer>,
    pub team_b: Vec<PickedPlayer>,
    /// Both sides committed.
    pub complete: bool,
}

fn into_slots(players: Vec<PickedPlayer>) -> [Option<PickedPlayer>; SLOT_COUNT] {
    let mut slots: [Option<PickedPlayer>; SLOT_COUNT] = Default::default();
    for (slot, player) in slots.iter_mut().zip(players) {
        *slot = Some(player);
    }
    slots
}

impl SquadPickerState {
    pub fn filled(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_picked(&self, roster_index: usize) -> bool {
        self.slots.iter().flatten().any(|p| p.roster_index == roster_index)
    }

    /// Fill the first empty slot. False when full or already picked.
    pub fn pick(&mut self, roster_index: usize, name: &str, images: &PlayerImages) -> bool {
        if self.is_picked(roster_index) {
            return false;
        }
        let Some(empty) = self.slots.iter_mut().find(|s| s.is_none()) else {
            return false;
        };
        *empty = Some(PickedPlayer {
            roster_index,
            name: name.to_string(),
            image: images.lookup(name).to_string(),
        });
        true
    }

    pub fn clear_slot(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// First 11 of the side's primary squad.
    pub fn auto_select(&mut self, side: &Side, images: &PlayerImages) {
        self.slots = Default::default();
        for (index, name) in side.squad.iter().take(SLOT_COUNT).enumerate() {
            self.slots[index] = Some(PickedPlayer {
                roster_index: index,
                name: name.clone(),
                image: images.lookup(name).to_string(),
            });
        }
    }

    pub fn can_commit(&self) -> bool {
        self.side_index == 0 || self.team_a.len() + self.filled() >= SLOT_COUNT
    }

    pub fn commit_side(&mut self) -> CommitOutcome {
        if !self.can_commit() {
            return CommitOutcome::NotEnoughPlayers;
        }
        let picked: Vec<PickedPlayer> = std::mem::take(&mut self.slots).into_iter().flatten().collect();
        self.cursor = 0;
        self.slot_cursor = 0;
        self.focus = PickerFocus::Roster;
        if self.side_index == 0 {
            self.team_a = picked;
            self.side_index = 1;
            self.slots = into_slots(std::mem::take(&mut self.team_b));
            CommitOutcome::NextSide
        } else {
            self.team_b = picked;
            self.complete = true;
            CommitOutcome::Complete
        }
    }

    /// Back to side A for editing, with both picks restored as they go.
    pub fn reopen(&mut self) {
        self.side_index = 0;
        self.cursor = 0;
        self.slot_cursor = 0;
        self.focus = PickerFocus::Roster;
        self.complete = false;
        self.slots = into_slots(std::mem::take(&mut self.team_a));
    }

    pub fn team_a_names(&self) -> Vec<String> {
        self.team_a.iter().map(|p| p.name.clone()).collect()
    }

    pub fn team_b_names(&self) -> Vec<String> {
        self.team_b.iter().map(|p| p.name.clone()).collect()
    }

    /// Picked players keyed by side, in listing order.
    pub fn player_info(&self, details: &MatchDetails) -> PlayerInfo {
        let mut info = PlayerInfo::default();
        for (side, picked) in details.sides.iter().zip([&self.team_a, &self.team_b]) {
            info.push(side.name.clone(), picked.iter().map(|p| p.name.clone()).collect());
        }
        info
    }

    pub fn image_for(&self, player: &str) -> Option<&str> {
        self.team_a
            .iter()
            .chain(&self.team_b)
            .find(|p| p.name == player)
            .map(|p| p.image.as_str())
    }
}

// ---------------------------------------------------------------------------
// Prediction and swaps
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preview {
    pub candidate: String,
    pub lineup: Vec<String>,
    pub scores: Option<TeamScores>,
}

#[derive(Debug, Default)]
pub struct PredictionState {
    pub predicted: Vec<String>,
    pub cov_matrix: CovMatrixToken,
    pub stats_raw: String,
    pub stats: Vec<PlayerPoints>,
    pub total_score: f64,
    pub leaders: Leaders,
    pub scores: Option<TeamScores>,
    pub preview: Option<Preview>,
    pub selected_slot: usize,
    pub bench_cursor: Option<usize>,
    pub pending: bool,
    pub error: Option<String>,
}

impl PredictionState {
    pub fn is_loaded(&self) -> bool {
        !self.predicted.is_empty()
    }

    pub fn load(&mut self, prediction: Prediction) {
        self.predicted = prediction.best_team;
        self.cov_matrix = prediction.cov_matrix;
        self.stats_raw = prediction.player_stats_raw;
        self.stats = prediction.player_stats;
        self.scores = None;
        self.preview = None;
        self.selected_slot = 0;
        self.bench_cursor = None;
        self.pending = false;
        self.error = None;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.total_score = scoring::total_score(&self.predicted, &self.stats);
        self.leaders = scoring::pick_leaders(&self.predicted, &self.stats);
    }

    pub fn selected_player(&self) -> Option<&str> {
        self.predicted.get(self.selected_slot).map(String::as_str)
    }

    pub fn select_next(&mut self) {
        if !self.predicted.is_empty() {
            self.selected_slot = (self.selected_slot + 1) % self.predicted.len();
            self.clear_preview();
        }
    }

    pub fn select_prev(&mut self) {
        let count = self.predicted.len();
        if count > 0 {
            self.selected_slot = (self.selected_slot + count - 1) % count;
            self.clear_preview();
        }
    }

    pub fn clear_preview(&mut self) {
        self.preview = None;
        self.bench_cursor = None;
    }

    /// Lineup with the selected slot swapped for `candidate`, held as a preview.
    pub fn begin_preview(&mut self, candidate: &str) -> Vec<String> {
        let lineup = scoring::swap(&self.predicted, self.selected_slot, candidate);
        self.preview = Some(Preview {
            candidate: candidate.to_string(),
            lineup: lineup.clone(),
            scores: None,
        });
        lineup
    }

    /// Swap `candidate` into the selected slot and return the new lineup.
    pub fn commit_swap(&mut self, candidate: &str) -> Vec<String> {
        self.predicted = scoring::swap(&self.predicted, self.selected_slot, candidate);
        self.clear_preview();
        self.recompute();
        self.predicted.clone()
    }

    /// Results for a lineup that is no longer current or previewed are dropped.
    pub fn on_scores(&mut self, lineup: &[String], scores: TeamScores, committed: bool) {
        if committed {
            if self.predicted == lineup {
                self.scores = Some(scores);
            }
            return;
        }
        if let Some(preview) = self.preview.as_mut()
            && preview.lineup == lineup
        {
            preview.scores = Some(scores);
        }
    }

    pub fn points(&self, player: &str) -> Option<&PlayerPoints> {
        scoring::points_for(&self.stats, player)
    }
}

// ---------------------------------------------------------------------------
// Language-model narratives
// ---------------------------------------------------------------------------

/// Team analysis cached against the roster it was written for.
#[derive(Debug, Default)]
pub struct NarrativeCache {
    pub team: Vec<String>,
    pub text: Option<String>,
    pub error: Option<String>,
}

impl NarrativeCache {
    fn same_roster(&self, team: &[String]) -> bool {
        let cached: HashSet<&String> = self.team.iter().collect();
        let candidate: HashSet<&String> = team.iter().collect();
        cached == candidate
    }

    /// Order is ignored.
    pub fn needs_refresh(&self, team: &[String]) -> bool {
        self.team.is_empty() || !self.same_roster(team)
    }

    pub fn is_pending(&self) -> bool {
        !self.team.is_empty() && self.text.is_none() && self.error.is_none()
    }

    pub fn begin(&mut self, team: &[String]) {
        self.team = team.to_vec();
        self.text = None;
        self.error = None;
    }

    pub fn complete(&mut self, team: &[String], text: String) {
        if self.same_roster(team) {
            self.text = Some(text);
            self.error = None;
        }
    }

    /// A failed request is forgotten so the next visit retries.
    pub fn fail(&mut self, team: &[String], message: String) {
        if self.same_roster(team) {
            self.team.clear();
            self.text = None;
            self.error = Some(message);
        }
    }
}

#[derive(Debug, Default)]
pub struct PlayerReportState {
    pub player: Option<String>,
    pub analysis: Option<String>,
    pub error: Option<String>,
    pub scroll_offset: u16,
}

impl PlayerReportState {
    pub fn open(&mut self, player: &str) {
        self.player = Some(player.to_string());
        self.analysis = None;
        self.error = None;
        self.scroll_offset = 0;
    }

    pub fn complete(&mut self, player: &str, text: String) {
        if self.player.as_deref() == Some(player) {
            self.analysis = Some(text);
        }
    }

    pub fn fail(&mut self, player: &str, message: String) {
        if self.player.as_deref() == Some(player) {
            self.error = Some(message);
        }
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Written by Save on the final XI screen.
#[derive(Debug, Clone, Serialize)]
pub struct FinalTeamExport {
    pub date: String,
    #[serde(rename = "match")]
    pub fixture: String,
    pub format: String,
    pub lineup: Vec<String>,
    pub captain: Option<String>,
    pub vice_captain: Option<String>,
    pub total_score: f64,
    pub scores: Option<TeamScores>,
}

// ---------------------------------------------------------------------------
// Root state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub history: Vec<Screen>,
    pub instructions: Vec<String>,
    pub instructions_scroll: u16,
    pub match_selection: MatchSelectionState,
    pub selected: Option<SelectedMatch>,
    pub aggregate: AggregateStatsMap,
    pub aggregate_pending: bool,
    pub picker: SquadPickerState,
    pub prediction: PredictionState,
    pub narrative: NarrativeCache,
    pub report_scroll: u16,
    pub player_report: PlayerReportState,
    pub images: PlayerImages,
    pub last_error: Option<String>,
    pub status_message: Option<String>,
    pub show_logs: bool,
}

impl AppState {
    pub fn new(instructions: Vec<String>, images: PlayerImages) -> Self {
        Self {
            screen: Screen::default(),
            history: Vec::new(),
            instructions,
            instructions_scroll: 0,
            match_selection: MatchSelectionState::default(),
            selected: None,
            aggregate: AggregateStatsMap::default(),
            aggregate_pending: false,
            picker: SquadPickerState::default(),
            prediction: PredictionState::default(),
            narrative: NarrativeCache::default(),
            report_scroll: 0,
            player_report: PlayerReportState::default(),
            images,
            last_error: None,
            status_message: None,
            show_logs: false,
        }
    }

    /// Roster of the side currently being picked.
    pub fn picker_roster(&self) -> Vec<String> {
        self.selected
            .as_ref()
            .and_then(|m| m.details().side(self.picker.side_index))
            .map(Side::full_roster)
            .unwrap_or_default()
    }

    pub fn bench(&self) -> Vec<String> {
        scoring::bench(
            &self.picker.team_a_names(),
            &self.picker.team_b_names(),
            &self.prediction.predicted,
        )
    }

    pub fn image_for(&self, player: &str) -> String {
        self.picker
            .image_for(player)
            .unwrap_or_else(|| self.images.lookup(player))
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cricxi_api::Format;

    fn listing() -> SquadListing {
        let fixture = |key: &str| Fixture { key: key.into(), details: MatchDetails::default() };
        SquadListing {
            leagues: vec![
                League { name: "L1".into(), matches: vec![fixture("A_vs_B_X"), fixture("C_vs_D_Y")] },
                League { name: "L2".into(), matches: vec![fixture("E_vs_F_Z")] },
            ],
        }
    }

    fn type_date(state: &mut MatchSelectionState, digits: &str) -> Option<NaiveDate> {
        digits.chars().map(|c| state.push_digit(c)).last().flatten()
    }

    #[test]
    fn full_valid_date_requests_lookup() {
        let mut state = MatchSelectionState::default();
        assert_eq!(type_date(&mut state, "1207202"), None);
        assert_eq!(state.push_digit('4'), NaiveDate::from_ymd_opt(2024, 7, 12));
        assert_eq!(state.push_digit('9'), None);
        assert_eq!(state.masked(), "12/07/2024");
    }

    #[test]
    fn invalid_date_never_requests() {
        let mut state = MatchSelectionState::default();
        assert_eq!(type_date(&mut state, "31022024"), None);
    }

    #[test]
    fn stale_listing_is_ignored() {
        let mut state = MatchSelectionState::default();
        let date = type_date(&mut state, "12072024").unwrap();
        state.pop_digit();
        state.on_listing(date, listing());
        assert!(state.listing.is_none());
    }

    #[test]
    fn carousels_wrap_and_league_change_resets_match() {
        let mut state = MatchSelectionState::default();
        let date = type_date(&mut state, "12072024").unwrap();
        state.on_listing(date, listing());

        state.prev_match();
        assert_eq!(state.match_index, 1);
        state.next_match();
        assert_eq!(state.match_index, 0);
        state.next_match();
        state.next_league();
        assert_eq!((state.league_index, state.match_index), (1, 0));
        state.next_league();
        assert_eq!(state.league_index, 0);
        state.prev_league();
        assert_eq!(state.selected_fixture().unwrap().key, "E_vs_F_Z");
    }

    #[test]
    fn squad_error_clears_listing() {
        let mut state = MatchSelectionState::default();
        let date = type_date(&mut state, "12072024").unwrap();
        state.on_error(date, "No Data Available".into());
        assert_eq!(state.error.as_deref(), Some("No Data Available"));
        assert!(state.selected_match().is_none());
    }

    fn side(name: &str, count: usize) -> Side {
        Side {
            name: name.into(),
            squad: (0..count).map(|i| format!("{name} P{i}")).collect(),
            second_squad: vec![format!("{name} Reserve")],
        }
    }

    #[test]
    fn pick_fills_first_empty_slot_once() {
        let images = PlayerImages::default();
        let mut picker = SquadPickerState::default();
        assert!(picker.pick(3, "A", &images));
        assert!(picker.pick(5, "B", &images));
        assert!(!picker.pick(3, "A", &images));
        picker.clear_slot(0);
        assert!(picker.pick(7, "C", &images));
        assert_eq!(picker.slots[0].as_ref().unwrap().name, "C");
        assert_eq!(picker.filled(), 2);
    }

    #[test]
    fn full_slots_reject_picks() {
        let images = PlayerImages::default();
        let mut picker = SquadPickerState::default();
        picker.auto_select(&side("Ireland", 15), &images);
        assert_eq!(picker.filled(), SLOT_COUNT);
        assert!(!picker.pick(14, "Ireland P14", &images));
    }

    #[test]
    fn auto_select_uses_primary_squad_only() {
        let images = PlayerImages::default();
        let mut picker = SquadPickerState::default();
        picker.auto_select(&side("Ireland", 4), &images);
        assert_eq!(picker.filled(), 4);
        assert!(picker.slots[4].is_none());
    }

    #[test]
    fn second_side_needs_eleven_in_total() {
        let images = PlayerImages::default();
        let mut picker = SquadPickerState::default();
        picker.auto_select(&side("Ireland", 6), &images);
        assert_eq!(picker.commit_side(), CommitOutcome::NextSide);
        assert_eq!(picker.team_a.len(), 6);
        assert_eq!(picker.filled(), 0);

        picker.auto_select(&side("Zimbabwe", 4), &images);
        assert!(!picker.can_commit());
        assert_eq!(picker.commit_side(), CommitOutcome::NotEnoughPlayers);

        picker.pick(4, "Zimbabwe Reserve", &images);
        assert_eq!(picker.commit_side(), CommitOutcome::Complete);
        assert_eq!(picker.team_b.len(), 5);

        let details = MatchDetails {
            format: Format::T20,
            sides: vec![side("Ireland", 6), side("Zimbabwe", 4)],
        };
        let info = picker.player_info(&details);
        assert_eq!(info.sides[0].0, "Ireland");
        assert_eq!(info.sides[1].1.len(), 5);
    }

    fn prediction(team: &[&str]) -> Prediction {
        Prediction {
            best_team: team.iter().map(|s| s.to_string()).collect(),
            cov_matrix: CovMatrixToken::new("cov"),
            player_stats_raw: "[]".into(),
            player_stats: team
                .iter()
                .enumerate()
                .map(|(i, p)| PlayerPoints {
                    player: p.to_string(),
                    mean_points: (i + 1) as f64 * 10.0,
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[test]
    fn commit_swap_recomputes_total_and_leaders() {
        let mut state = PredictionState::default();
        state.load(prediction(&["A", "B", "C"]));
        assert_eq!(state.total_score, 60.0);
        assert_eq!(state.leaders.captain.as_deref(), Some("C"));

        state.selected_slot = 2;
        let lineup = state.commit_swap("X");
        assert_eq!(lineup, vec!["A", "B", "X"]);
        assert_eq!(state.total_score, 30.0);
        assert_eq!(state.leaders.captain.as_deref(), Some("B"));
        assert_eq!(state.leaders.vice_captain.as_deref(), Some("A"));
    }

    #[test]
    fn scores_for_replaced_xi_are_dropped() {
        let mut state = PredictionState::default();
        state.load(prediction(&["A", "B"]));
        let old_lineup = state.predicted.clone();
        state.selected_slot = 1;
        let new_lineup = state.commit_swap("X");
        let scores = TeamScores { consistency: 2.0, diversity: 3.0, form: 4.0 };

        state.on_scores(&old_lineup, scores, true);
        assert!(state.scores.is_none());
        state.on_scores(&new_lineup, scores, true);
        assert_eq!(state.scores, Some(scores));
    }

    #[test]
    fn reopen_restores_both_sides_for_editing() {
        let images = PlayerImages::default();
        let mut picker = SquadPickerState::default();
        picker.auto_select(&side("Ireland", 6), &images);
        picker.commit_side();
        picker.auto_select(&side("Zimbabwe", 5), &images);
        assert_eq!(picker.commit_side(), CommitOutcome::Complete);
        assert!(picker.complete);

        picker.reopen();
        assert_eq!(picker.side_index, 0);
        assert!(!picker.complete);
        assert_eq!(picker.filled(), 6);
        assert_eq!(picker.slots[0].as_ref().unwrap().name, "Ireland P0");

        picker.clear_slot(5);
        assert_eq!(picker.commit_side(), CommitOutcome::NextSide);
        assert_eq!(picker.team_a.len(), 5);
        assert_eq!(picker.filled(), 5);
        assert_eq!(picker.slots[0].as_ref().unwrap().name, "Zimbabwe P0");
        assert!(picker.team_b.is_empty());
    }

    #[test]
    fn preview_scores_for_stale_lineup_are_dropped() {
        let mut state = PredictionState::default();
        state.load(prediction(&["A", "B"]));
        let first = state.begin_preview("X");
        let second = state.begin_preview("Y");
        let scores = TeamScores { consistency: 1.0, diversity: 1.0, form: 1.0 };

        state.on_scores(&first, scores, false);
        assert_eq!(state.preview.as_ref().unwrap().scores, None);
        state.on_scores(&second, scores, false);
        assert_eq!(state.preview.as_ref().unwrap().scores, Some(scores));
        assert_eq!(state.predicted, vec!["A", "B"]);
        assert!(state.scores.is_none());
    }

    #[test]
    fn narrative_cache_ignores_order() {
        let team = |s: &[&str]| s.iter().map(|p| p.to_string()).collect::<Vec<_>>();
        let mut cache = NarrativeCache::default();
        assert!(cache.needs_refresh(&team(&["A", "B"])));

        cache.begin(&team(&["A", "B"]));
        assert!(cache.is_pending());
        assert!(!cache.needs_refresh(&team(&["B", "A"])));

        cache.complete(&team(&["A", "C"]), "stale".into());
        assert!(cache.text.is_none());
        cache.complete(&team(&["B", "A"]), "fresh".into());
        assert_eq!(cache.text.as_deref(), Some("fresh"));
        assert!(cache.needs_refresh(&team(&["A", "C"])));
    }

    #[test]
    fn failed_narrative_is_retried() {
        let team = vec!["A".to_string()];
        let mut cache = NarrativeCache::default();
        cache.begin(&team);
        cache.fail(&team, "timeout".into());
        assert!(!cache.is_pending());
        assert!(cache.needs_refresh(&team));
    }
}
