/// Raw request/response shapes for the squad, optimizer and stats services.
/// These map to the clean domain types in client.rs.
use crate::{AggregateStats, Format, PlayerInfo, TeamScores};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Squads  (POST /squads)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct SquadsRequest<'a> {
    #[serde(rename = "Date")]
    pub date: &'a str,
}

/// league → fixture key → { "Format": .., "<Side>": [..], "<Side>_Second_Squad": [..] }
pub type SquadsResponse = serde_json::Map<String, serde_json::Value>;

pub const FORMAT_KEY: &str = "Format";
pub const SECOND_SQUAD_SUFFIX: &str = "_Second_Squad";

// ---------------------------------------------------------------------------
// Aggregate stats  (POST /aggregate_stats)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AggregateStatsRequest<'a> {
    #[serde(rename = "Players")]
    pub players: &'a [String],
    #[serde(rename = "Format")]
    pub format: Format,
}

/// Unknown players come back as `null`.
pub type AggregateStatsResponse = HashMap<String, Option<AggregateStats>>;

// ---------------------------------------------------------------------------
// Optimizer  (POST /generate_best_team, POST /team_evaluation)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct BestTeamRequest<'a> {
    pub date: &'a str,
    pub format: Format,
    pub player_info: &'a PlayerInfo,
}

#[derive(Debug, Deserialize, Default)]
pub struct BestTeamResponse {
    #[serde(default)]
    pub best_team: Vec<String>,
    #[serde(default)]
    pub cov_matrix: String,
    /// JSON-encoded list of per-player point records.
    #[serde(default)]
    pub player_stats: String,
}

#[derive(Debug, Serialize)]
pub struct TeamEvaluationRequest<'a> {
    pub best_team: &'a [String],
    pub player_stats: &'a str,
    pub cov_matrix: &'a str,
}

pub type TeamEvaluationResponse = TeamScores;

// ---------------------------------------------------------------------------
// Language-model analysis  (POST /analyze_team, POST /analyze_player)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct TeamAnalysisRequest<'a> {
    pub best_team: &'a [String],
    pub format: Format,
    pub player_stats: &'a str,
}

#[derive(Debug, Deserialize, Default)]
pub struct TeamAnalysisResponse {
    #[serde(rename = "team analysis", default)]
    pub team_analysis: String,
}

#[derive(Debug, Serialize)]
pub struct PlayerAnalysisRequest<'a> {
    #[serde(rename = "Player")]
    pub player: &'a str,
    pub best_team: &'a [String],
    pub format: Format,
}

#[derive(Debug, Deserialize, Default)]
pub struct PlayerAnalysisResponse {
    #[serde(default)]
    pub analysis: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Every service reports failures as `{"error": "..."}` with a 4xx status.
#[derive(Debug, Deserialize, Default)]
pub struct ErrorBody {
    pub error: Option<String>,
}
