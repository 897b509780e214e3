use crate::wire::{
    AggregateStatsRequest, AggregateStatsResponse, BestTeamRequest, BestTeamResponse, ErrorBody,
    FORMAT_KEY, PlayerAnalysisRequest, PlayerAnalysisResponse, SECOND_SQUAD_SUFFIX,
    SquadsRequest, SquadsResponse, TeamAnalysisRequest, TeamAnalysisResponse,
    TeamEvaluationRequest, TeamEvaluationResponse,
};
use crate::{
    AggregateStatsMap, CovMatrixToken, Fixture, Format, League, MatchDetails, PlayerInfo,
    PlayerPoints, Prediction, Side, SquadListing, TeamScores,
};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_SQUADS_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_MODEL_URL: &str = "http://localhost:8080";
pub const DEFAULT_STATS_URL: &str = "http://localhost:3002";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Language-model endpoints routinely take tens of seconds.
const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(120);
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Base URLs of the three backing services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Squad lookup by date.
    pub squads: String,
    /// Best-11 optimizer and team revaluation.
    pub model: String,
    /// Aggregate career stats and language-model analysis.
    pub stats: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            squads: DEFAULT_SQUADS_URL.to_owned(),
            model: DEFAULT_MODEL_URL.to_owned(),
            stats: DEFAULT_STATS_URL.to_owned(),
        }
    }
}

impl Endpoints {
    fn url(base: &str, path: &str) -> String {
        format!("{}/{path}", base.trim_end_matches('/'))
    }
}

/// Client for the fantasy-team services. Every call is a single JSON POST.
#[derive(Debug, Clone)]
pub struct FantasyApi {
    client: Client,
    endpoints: Endpoints,
    timeout: Duration,
    analysis_timeout: Duration,
    retries: u32,
}

impl Default for FantasyApi {
    fn default() -> Self {
        Self::new(Endpoints::default())
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    /// The service answered with an error status; `message` is its `error` field when present.
    Service { status: u16, message: String, url: String },
    Parsing(reqwest::Error, String),
    /// A JSON document embedded in a response field could not be decoded.
    Decode(serde_json::Error, String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Service { message, .. } => write!(f, "{message}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Decode(e, what) => write!(f, "Could not decode {what}: {e}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl FantasyApi {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            client: Client::builder()
                .user_agent("cricxi/0.1 (terminal team picker)")
                .build()
                .unwrap_or_default(),
            endpoints,
            timeout: DEFAULT_TIMEOUT,
            analysis_timeout: ANALYSIS_TIMEOUT,
            retries: 1,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_analysis_timeout(mut self, timeout: Duration) -> Self {
        self.analysis_timeout = timeout;
        self
    }

    /// Number of extra attempts after a connect or timeout failure.
    /// Error statuses are never retried.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Leagues and fixtures scheduled on `date`, with both squads per fixture.
    pub async fn fetch_squads(&self, date: NaiveDate) -> ApiResult<SquadListing> {
        let url = Endpoints::url(&self.endpoints.squads, "squads");
        let date = iso_date(date);
        let raw: SquadsResponse = self
            .post(&url, &SquadsRequest { date: &date }, self.timeout)
            .await?;
        Ok(map_listing(raw))
    }

    /// Career stats for every listed player in the given format.
    pub async fn fetch_aggregate_stats(
        &self,
        players: &[String],
        format: Format,
    ) -> ApiResult<AggregateStatsMap> {
        let url = Endpoints::url(&self.endpoints.stats, "aggregate_stats");
        let raw: AggregateStatsResponse = self
            .post(&url, &AggregateStatsRequest { players, format }, self.timeout)
            .await?;
        let players = raw
            .into_iter()
            .map(|(name, stats)| (name, stats.unwrap_or_default()))
            .collect();
        Ok(AggregateStatsMap::new(players))
    }

    /// Ask the optimizer for the best 11 out of the picked squads.
    pub async fn predict_team(
        &self,
        date: NaiveDate,
        format: Format,
        player_info: &PlayerInfo,
    ) -> ApiResult<Prediction> {
        let url = Endpoints::url(&self.endpoints.model, "generate_best_team");
        let date = iso_date(date);
        let raw: BestTeamResponse = self
            .post(
                &url,
                &BestTeamRequest { date: &date, format, player_info },
                self.analysis_timeout,
            )
            .await?;
        map_prediction(raw)
    }

    /// Score a candidate lineup against the optimizer's covariance matrix.
    pub async fn evaluate_team(
        &self,
        cov_matrix: &CovMatrixToken,
        player_stats: &str,
        lineup: &[String],
    ) -> ApiResult<TeamScores> {
        let url = Endpoints::url(&self.endpoints.model, "team_evaluation");
        let body = TeamEvaluationRequest {
            best_team: lineup,
            player_stats,
            cov_matrix: cov_matrix.as_str(),
        };
        self.post::<_, TeamEvaluationResponse>(&url, &body, self.timeout).await
    }

    pub async fn analyze_team(
        &self,
        lineup: &[String],
        player_stats: &str,
        format: Format,
    ) -> ApiResult<String> {
        let url = Endpoints::url(&self.endpoints.stats, "analyze_team");
        let body = TeamAnalysisRequest { best_team: lineup, format, player_stats };
        let raw: TeamAnalysisResponse = self.post(&url, &body, self.analysis_timeout).await?;
        Ok(raw.team_analysis)
    }

    pub async fn analyze_player(
        &self,
        format: Format,
        player: &str,
        lineup: &[String],
    ) -> ApiResult<String> {
        let url = Endpoints::url(&self.endpoints.stats, "analyze_player");
        let body = PlayerAnalysisRequest { player, best_team: lineup, format };
        let raw: PlayerAnalysisResponse = self.post(&url, &body, self.analysis_timeout).await?;
        Ok(raw.analysis)
    }

    async fn post<B, T>(&self, url: &str, body: &B, timeout: Duration) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut attempt = 0;
        let response = loop {
            match self.client.post(url).timeout(timeout).json(body).send().await {
                Ok(res) => break res,
                Err(e) if attempt < self.retries && (e.is_connect() || e.is_timeout()) => {
                    attempt += 1;
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
                Err(e) => return Err(ApiError::Network(e, url.to_owned())),
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("request failed").to_owned()
                });
            return Err(ApiError::Service {
                status: status.as_u16(),
                message,
                url: url.to_owned(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire types → clean domain types
// ---------------------------------------------------------------------------

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn map_listing(raw: SquadsResponse) -> SquadListing {
    let leagues = raw
        .into_iter()
        .filter_map(|(name, fixtures)| {
            let serde_json::Value::Object(fixtures) = fixtures else {
                return None;
            };
            let matches: Vec<Fixture> = fixtures
                .into_iter()
                .filter_map(|(key, details)| match details {
                    serde_json::Value::Object(details) => Some(Fixture {
                        key,
                        details: map_match_details(details),
                    }),
                    _ => None,
                })
                .collect();
            (!matches.is_empty()).then_some(League { name, matches })
        })
        .collect();
    SquadListing { leagues }
}

/// Sides keep the order the service listed them; `<Side>_Second_Squad`
/// entries attach to their primary side.
fn map_match_details(raw: serde_json::Map<String, serde_json::Value>) -> MatchDetails {
    let mut format = Format::default();
    let mut sides: Vec<Side> = Vec::new();
    let mut second_squads: Vec<(String, Vec<String>)> = Vec::new();

    for (key, value) in raw {
        if key == FORMAT_KEY {
            if let Some(f) = value.as_str().and_then(Format::from_label) {
                format = f;
            }
            continue;
        }
        let players = string_list(&value);
        match key.strip_suffix(SECOND_SQUAD_SUFFIX) {
            Some(side) => second_squads.push((side.to_owned(), players)),
            None => sides.push(Side { name: key, squad: players, second_squad: Vec::new() }),
        }
    }

    for (side_name, players) in second_squads {
        match sides.iter_mut().find(|s| s.name == side_name) {
            Some(side) => side.second_squad = players,
            None => sides.push(Side { name: side_name, squad: Vec::new(), second_squad: players }),
        }
    }

    MatchDetails { format, sides }
}

fn string_list(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

fn map_prediction(raw: BestTeamResponse) -> ApiResult<Prediction> {
    let player_stats: Vec<PlayerPoints> = if raw.player_stats.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(&raw.player_stats)
            .map_err(|e| ApiError::Decode(e, "player_stats".into()))?
    };
    if raw.best_team.is_empty() {
        return Err(ApiError::Other("optimizer returned an empty team".into()));
    }
    Ok(Prediction {
        best_team: raw.best_team,
        cov_matrix: CovMatrixToken::new(raw.cov_matrix),
        player_stats_raw: raw.player_stats,
        player_stats,
    })
}
