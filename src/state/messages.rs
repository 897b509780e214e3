use crate::state::network::LoadingState;
use chrono::NaiveDate;
use cricxi_api::{
    AggregateStatsMap, CovMatrixToken, Format, PlayerInfo, Prediction, SquadListing, TeamScores,
};
use crossterm::event::KeyEvent;

/// Whether a revaluation result replaces the team scores or only feeds the
/// swap preview.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Evaluation {
    Committed,
    Preview,
}

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadSquads { date: NaiveDate },
    LoadAggregateStats { players: Vec<String>, format: Format },
    PredictTeam { date: NaiveDate, format: Format, player_info: PlayerInfo },
    EvaluateTeam {
        lineup: Vec<String>,
        cov_matrix: CovMatrixToken,
        stats_raw: String,
        evaluation: Evaluation,
    },
    AnalyzeTeam { lineup: Vec<String>, stats_raw: String, format: Format },
    AnalyzePlayer { player: String, lineup: Vec<String>, format: Format },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    SquadsLoaded { date: NaiveDate, listing: SquadListing },
    AggregateStatsLoaded { stats: AggregateStatsMap },
    TeamPredicted { prediction: Prediction },
    TeamEvaluated { lineup: Vec<String>, scores: TeamScores, evaluation: Evaluation },
    TeamAnalyzed { lineup: Vec<String>, text: String },
    PlayerAnalyzed { player: String, text: String },
    /// The failed request is returned so its screen can recover.
    Error { request: NetworkRequest, message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
}
