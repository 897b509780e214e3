pub mod client;
pub mod wire;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Domain types, independent of the services' wire format
// ---------------------------------------------------------------------------

/// Match format. The services spell ODI in capitals and Test in title case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    #[default]
    T20,
    #[serde(rename = "ODI")]
    Odi,
    Test,
}

impl Format {
    pub fn label(&self) -> &'static str {
        match self {
            Format::T20 => "T20",
            Format::Odi => "ODI",
            Format::Test => "Test",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "T20" => Some(Format::T20),
            "ODI" => Some(Format::Odi),
            "Test" => Some(Format::Test),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Every league playing on a given date, in the order the squad service
/// listed them.
#[derive(Debug, Clone, Default)]
pub struct SquadListing {
    pub leagues: Vec<League>,
}

impl SquadListing {
    pub fn is_empty(&self) -> bool {
        self.leagues.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct League {
    pub name: String,
    pub matches: Vec<Fixture>,
}

#[derive(Debug, Clone, Default)]
pub struct Fixture {
    /// Service key, e.g. `"Ireland_vs_Zimbabwe_Stormont Belfast"`.
    pub key: String,
    pub details: MatchDetails,
}

impl Fixture {
    /// Split the fixture key into `(team_a, team_b, location)`.
    pub fn teams_label(&self) -> (String, String, String) {
        let parts: Vec<&str> = self.key.split('_').collect();
        let team_a = parts.first().copied().unwrap_or_default().to_owned();
        let team_b = parts.get(2).copied().unwrap_or_default().to_owned();
        let location = parts.get(3..).map(|rest| rest.join(" ")).unwrap_or_default();
        (team_a, team_b, location)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchDetails {
    pub format: Format,
    pub sides: Vec<Side>,
}

impl MatchDetails {
    /// Every listed player of both sides, second squads included.
    pub fn all_players(&self) -> Vec<String> {
        self.sides.iter().flat_map(|s| s.full_roster()).collect()
    }

    pub fn side(&self, index: usize) -> Option<&Side> {
        self.sides.get(index)
    }

    /// Name of the side a player is listed under, if any.
    pub fn side_of(&self, player: &str) -> Option<&str> {
        self.sides
            .iter()
            .find(|s| s.squad.iter().chain(&s.second_squad).any(|p| p == player))
            .map(|s| s.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Side {
    pub name: String,
    pub squad: Vec<String>,
    pub second_squad: Vec<String>,
}

impl Side {
    pub fn full_roster(&self) -> Vec<String> {
        self.squad.iter().chain(&self.second_squad).cloned().collect()
    }
}

/// Picked players per side, as sent to the optimizer. Serialized as a JSON
/// object keyed by side name, preserving insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerInfo {
    pub sides: Vec<(String, Vec<String>)>,
}

impl PlayerInfo {
    pub fn push(&mut self, side: impl Into<String>, players: Vec<String>) {
        self.sides.push((side.into(), players));
    }
}

impl Serialize for PlayerInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.sides.len()))?;
        for (side, players) in &self.sides {
            map.serialize_entry(side, players)?;
        }
        map.end()
    }
}

/// Serialized covariance matrix returned by the optimizer. Opaque: it is
/// only ever forwarded back to the revaluation endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CovMatrixToken(String);

impl CovMatrixToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Prediction {
    pub best_team: Vec<String>,
    pub cov_matrix: CovMatrixToken,
    /// `player_stats` exactly as received; forwarded to revaluation and analysis.
    pub player_stats_raw: String,
    pub player_stats: Vec<PlayerPoints>,
}

/// Match-specific predicted fantasy points for one player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerPoints {
    pub player: String,
    #[serde(default)]
    pub mean_points: f64,
    #[serde(default)]
    pub variance: f64,
    #[serde(default)]
    pub batting_points: f64,
    #[serde(default)]
    pub bowling_points: f64,
    #[serde(default)]
    pub fielding_points: f64,
    #[serde(default)]
    pub team: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamScores {
    #[serde(rename = "team_consistency_score")]
    pub consistency: f64,
    #[serde(rename = "team_diversity_score")]
    pub diversity: f64,
    #[serde(rename = "form_score")]
    pub form: f64,
}

/// A career statistic. The stats service reports unbounded ratios (e.g. a
/// bowling strike rate with no wickets) as the string `"Infinity"`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Stat {
    Value(f64),
    Infinite,
    #[default]
    Missing,
}

impl Stat {
    pub fn value(&self) -> Option<f64> {
        match self {
            Stat::Value(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    /// Displayable value: missing, infinite and negative figures show as `-`.
    pub fn display(&self) -> String {
        match self.value() {
            Some(v) if v >= 0.0 => format_number(v),
            _ => "-".to_string(),
        }
    }
}

impl<'de> Deserialize<'de> for Stat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        Ok(match raw {
            Some(serde_json::Value::Number(n)) => n.as_f64().map(Stat::Value).unwrap_or_default(),
            Some(serde_json::Value::String(s)) => match s.trim() {
                "Infinity" | "-Infinity" | "inf" => Stat::Infinite,
                other => other.parse::<f64>().map(Stat::Value).unwrap_or_default(),
            },
            _ => Stat::Missing,
        })
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{}", (v * 100.0).round() / 100.0)
    }
}

/// Career-level statistics for one player in one format.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AggregateStats {
    #[serde(rename = "Batting", default)]
    pub batting: Option<String>,
    #[serde(rename = "Bowling", default)]
    pub bowling: Option<String>,
    #[serde(rename = "Batting Avg", default)]
    pub batting_avg: Stat,
    #[serde(rename = "Batting S/R", default)]
    pub batting_sr: Stat,
    #[serde(rename = "Bowling S/R", default)]
    pub bowling_sr: Stat,
    #[serde(rename = "Economy Rate", default)]
    pub economy_rate: Stat,
    #[serde(rename = "Runs", default)]
    pub runs: Stat,
    #[serde(rename = "Wickets", default)]
    pub wickets: Stat,
}

#[derive(Debug, Clone, Default)]
pub struct AggregateStatsMap {
    players: HashMap<String, AggregateStats>,
}

impl AggregateStatsMap {
    pub fn new(players: HashMap<String, AggregateStats>) -> Self {
        Self { players }
    }

    /// Stats for a player; unknown players read as all-missing.
    pub fn get(&self, player: &str) -> AggregateStats {
        self.players.get(player).cloned().unwrap_or_default()
    }

    pub fn contains(&self, player: &str) -> bool {
        self.players.contains_key(player)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_key_splits_into_teams_and_location() {
        let fixture = Fixture {
            key: "Ireland_vs_Zimbabwe_Stormont_Belfast".into(),
            details: MatchDetails::default(),
        };
        let (a, b, loc) = fixture.teams_label();
        assert_eq!(a, "Ireland");
        assert_eq!(b, "Zimbabwe");
        assert_eq!(loc, "Stormont Belfast");
    }

    #[test]
    fn fixture_key_without_location_yields_empty_location() {
        let fixture = Fixture { key: "India_vs_Nepal".into(), details: MatchDetails::default() };
        assert_eq!(fixture.teams_label(), ("India".into(), "Nepal".into(), String::new()));
    }

    #[test]
    fn stat_parses_numbers_infinity_and_null() {
        let stats: AggregateStats = serde_json::from_str(
            r#"{"Batting":"RHB","Batting Avg":22.5,"Batting S/R":"Infinity","Bowling S/R":null,"Runs":410}"#,
        )
        .unwrap();
        assert_eq!(stats.batting.as_deref(), Some("RHB"));
        assert_eq!(stats.batting_avg, Stat::Value(22.5));
        assert_eq!(stats.batting_sr, Stat::Infinite);
        assert_eq!(stats.bowling_sr, Stat::Missing);
        assert_eq!(stats.economy_rate, Stat::Missing);
        assert_eq!(stats.runs.display(), "410");
    }

    #[test]
    fn stat_display_hides_negative_and_infinite() {
        assert_eq!(Stat::Value(-1.0).display(), "-");
        assert_eq!(Stat::Infinite.display(), "-");
        assert_eq!(Stat::Missing.display(), "-");
        assert_eq!(Stat::Value(7.456).display(), "7.46");
    }

    #[test]
    fn player_info_serializes_in_insertion_order() {
        let mut info = PlayerInfo::default();
        info.push("Zimbabwe", vec!["S Raza".into()]);
        info.push("Ireland", vec!["PR Stirling".into()]);
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"Zimbabwe":["S Raza"],"Ireland":["PR Stirling"]}"#);
    }

    #[test]
    fn team_scores_use_service_field_names() {
        let scores: TeamScores = serde_json::from_str(
            r#"{"team_consistency_score":0.8,"team_diversity_score":1.2,"form_score":33.0}"#,
        )
        .unwrap();
        assert_eq!(scores, TeamScores { consistency: 0.8, diversity: 1.2, form: 33.0 });
    }

    #[test]
    fn match_details_reports_side_of_player() {
        let details = MatchDetails {
            format: Format::T20,
            sides: vec![
                Side { name: "Ireland".into(), squad: vec!["A".into()], second_squad: vec!["B".into()] },
                Side { name: "Zimbabwe".into(), squad: vec!["C".into()], second_squad: vec![] },
            ],
        };
        assert_eq!(details.all_players(), vec!["A", "B", "C"]);
        assert_eq!(details.side_of("B"), Some("Ireland"));
        assert_eq!(details.side_of("Z"), None);
    }
}
