use crate::state::messages::{Evaluation, NetworkRequest, NetworkResponse};
use cricxi_api::client::{ApiError, ApiResult, FantasyApi};
use log::{debug, error};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Serves service calls in order, one at a time. Language-model analysis
/// runs in its own task so it never holds up the queue.
pub struct NetworkWorker {
    client: FantasyApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    backlog: VecDeque<NetworkRequest>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: FantasyApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            backlog: VecDeque::new(),
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.next_request().await {
            while let Ok(queued) = self.requests.try_recv() {
                self.backlog.push_back(queued);
            }
            if is_superseded(&request, &self.backlog) {
                debug!("skipping superseded preview");
                continue;
            }

            if is_background(&request) {
                let client = self.client.clone();
                let responses = self.responses.clone();
                tokio::spawn(async move {
                    let result = serve(&client, request.clone()).await;
                    let _ = responses.send(into_response(request, result)).await;
                });
                continue;
            }

            self.start_loading_animation().await;
            let result = serve(&self.client, request.clone()).await;
            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            if let Err(e) = self.responses.send(into_response(request, result)).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn next_request(&mut self) -> Option<NetworkRequest> {
        match self.backlog.pop_front() {
            Some(request) => Some(request),
            None => self.requests.recv().await,
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(80));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}

/// Analysis calls can take minutes.
fn is_background(request: &NetworkRequest) -> bool {
    matches!(request, NetworkRequest::AnalyzeTeam { .. } | NetworkRequest::AnalyzePlayer { .. })
}

/// A preview revaluation is stale once a newer preview is queued behind it.
fn is_superseded(request: &NetworkRequest, backlog: &VecDeque<NetworkRequest>) -> bool {
    let is_preview = |r: &NetworkRequest| {
        matches!(r, NetworkRequest::EvaluateTeam { evaluation: Evaluation::Preview, .. })
    };
    is_preview(request) && backlog.iter().any(is_preview)
}

fn into_response(request: NetworkRequest, result: ApiResult<NetworkResponse>) -> NetworkResponse {
    result.unwrap_or_else(|err| {
        error!("{request:?} failed: {err}");
        NetworkResponse::Error { request, message: describe(&err) }
    })
}

async fn serve(client: &FantasyApi, request: NetworkRequest) -> ApiResult<NetworkResponse> {
    match request {
        NetworkRequest::LoadSquads { date } => {
            debug!("loading squads for {date}");
            let listing = client.fetch_squads(date).await?;
            Ok(NetworkResponse::SquadsLoaded { date, listing })
        }
        NetworkRequest::LoadAggregateStats { players, format } => {
            debug!("loading {format} aggregate stats for {} players", players.len());
            let stats = client.fetch_aggregate_stats(&players, format).await?;
            Ok(NetworkResponse::AggregateStatsLoaded { stats })
        }
        NetworkRequest::PredictTeam { date, format, player_info } => {
            debug!("predicting best {format} XI for {date}");
            let prediction = client.predict_team(date, format, &player_info).await?;
            Ok(NetworkResponse::TeamPredicted { prediction })
        }
        NetworkRequest::EvaluateTeam { lineup, cov_matrix, stats_raw, evaluation } => {
            debug!("revaluating lineup ({evaluation:?})");
            let scores = client.evaluate_team(&cov_matrix, &stats_raw, &lineup).await?;
            Ok(NetworkResponse::TeamEvaluated { lineup, scores, evaluation })
        }
        NetworkRequest::AnalyzeTeam { lineup, stats_raw, format } => {
            debug!("requesting team analysis");
            let text = client.analyze_team(&lineup, &stats_raw, format).await?;
            Ok(NetworkResponse::TeamAnalyzed { lineup, text })
        }
        NetworkRequest::AnalyzePlayer { player, lineup, format } => {
            debug!("requesting analysis for {player}");
            let text = client.analyze_player(format, &player, &lineup).await?;
            Ok(NetworkResponse::PlayerAnalyzed { player, text })
        }
    }
}

/// Status-line text for a failed call.
fn describe(err: &ApiError) -> String {
    match err {
        ApiError::Network(e, url) if e.is_timeout() => format!("Timed out waiting for {url}"),
        ApiError::Network(e, url) if e.is_connect() => format!("Could not reach {url}"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cricxi_api::client::Endpoints;
    use cricxi_api::{CovMatrixToken, Format};

    fn evaluate(first: &str, evaluation: Evaluation) -> NetworkRequest {
        NetworkRequest::EvaluateTeam {
            lineup: vec![first.to_string()],
            cov_matrix: CovMatrixToken::new("cov"),
            stats_raw: "[]".into(),
            evaluation,
        }
    }

    #[test]
    fn newer_preview_replaces_queued_one() {
        let backlog = VecDeque::from([evaluate("B", Evaluation::Preview)]);
        assert!(is_superseded(&evaluate("A", Evaluation::Preview), &backlog));
        assert!(!is_superseded(&evaluate("A", Evaluation::Committed), &backlog));

        let committed_only = VecDeque::from([evaluate("B", Evaluation::Committed)]);
        assert!(!is_superseded(&evaluate("A", Evaluation::Preview), &committed_only));
        assert!(!is_superseded(&evaluate("A", Evaluation::Preview), &VecDeque::new()));
    }

    #[test]
    fn only_analysis_leaves_the_queue() {
        let team = NetworkRequest::AnalyzeTeam {
            lineup: vec![],
            stats_raw: "[]".into(),
            format: Format::T20,
        };
        let player = NetworkRequest::AnalyzePlayer {
            player: "A".into(),
            lineup: vec![],
            format: Format::Odi,
        };
        assert!(is_background(&team));
        assert!(is_background(&player));
        assert!(!is_background(&evaluate("A", Evaluation::Preview)));
    }

    #[tokio::test]
    async fn failures_carry_the_request_back() {
        let unreachable = "http://127.0.0.1:9".to_string();
        let client = FantasyApi::new(Endpoints {
            squads: unreachable.clone(),
            model: unreachable.clone(),
            stats: unreachable,
        })
        .with_retries(0);
        let request = evaluate("A", Evaluation::Preview);
        let response = into_response(request.clone(), serve(&client, request).await);
        match response {
            NetworkResponse::Error { request, message } => {
                assert!(matches!(request, NetworkRequest::EvaluateTeam { .. }));
                assert!(message.contains("127.0.0.1:9"));
            }
            other => panic!("expected an error, got {other:?}"),
        }
    }
}
