use crate::format::{compact_name, strip_second_squad};
use crate::state::scoring::{percent_change, round_to, stat_delta};
use cricxi_api::{AggregateStats, PlayerPoints, Stat, TeamScores};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};

const ARROW_UP: char = '↑';
const ARROW_DOWN: char = '↓';

fn label_style() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

fn field(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), label_style()),
        Span::raw(value.into()),
    ])
}

pub fn trend_color(value: f64) -> Color {
    if value > 0.0 {
        Color::Green
    } else if value < 0.0 {
        Color::Red
    } else {
        Color::Gray
    }
}

/// `"12 ↑"`, `"3.5 ↓"` or `"0%"`.
pub fn trend_text(value: f64, percent: bool) -> String {
    let unit = if percent { "%" } else { "" };
    if value == 0.0 {
        "0%".to_string()
    } else if value > 0.0 {
        format!("{value}{unit} {ARROW_UP}")
    } else {
        format!("{}{unit} {ARROW_DOWN}", -value)
    }
}

fn trend_span(value: f64, percent: bool) -> Span<'static> {
    Span::styled(trend_text(value, percent), Style::default().fg(trend_color(value)))
}

/// Career figures from the stats service.
pub fn aggregate_lines(name: &str, team: Option<&str>, stats: &AggregateStats) -> Vec<Line<'static>> {
    let mut lines = vec![field("Name", compact_name(name))];
    if let Some(team) = team {
        lines.push(field("Team", strip_second_squad(team).to_string()));
    }
    lines.extend([
        field("Batting", stats.batting.clone().unwrap_or_else(|| "-".into())),
        field("Bowling", stats.bowling.clone().unwrap_or_else(|| "-".into())),
        field("Runs", stats.runs.display()),
        field("Wickets", stats.wickets.display()),
        field("Batting Avg", stats.batting_avg.display()),
        field("Batting S/R", stats.batting_sr.display()),
        field("Bowling S/R", stats.bowling_sr.display()),
        field("Economy Rate", stats.economy_rate.display()),
    ]);
    lines
}

/// Match-specific prediction for one player.
pub fn points_lines(points: Option<&PlayerPoints>) -> Vec<Line<'static>> {
    let Some(points) = points else {
        return vec![Line::styled("No prediction for this player", Style::default().fg(Color::DarkGray))];
    };
    vec![
        field("Predicted Points", format!("{:.2}", points.mean_points)),
        field("Variance", format!("{:.2}", points.variance)),
        field("Batting Points", format!("{:.2}", points.batting_points)),
        field("Bowling Points", format!("{:.2}", points.bowling_points)),
        field("Fielding Points", format!("{:.2}", points.fielding_points)),
    ]
}

/// Inputs for the swap comparison panel.
pub struct SwapComparison<'a> {
    pub player: &'a str,
    pub current: &'a AggregateStats,
    /// Stats of the bench player under the cursor.
    pub candidate: Option<&'a AggregateStats>,
    pub current_points: f64,
    pub candidate_points: f64,
    pub base_scores: Option<TeamScores>,
    pub preview_scores: Option<TeamScores>,
}

impl SwapComparison<'_> {
    fn stat_line(&self, label: &str, current: Stat, candidate: Option<Stat>, decimals: u32) -> Line<'static> {
        let mut spans = vec![
            Span::styled(format!("{label}: "), label_style()),
            Span::raw(current.display()),
        ];
        let hidden = current.display() == "-";
        if let Some(delta) = candidate.and_then(|c| stat_delta(c, current, decimals))
            && !hidden
        {
            spans.push(Span::raw("  "));
            spans.push(trend_span(delta, false));
        }
        Line::from(spans)
    }

    fn team_line(&self, label: &str, pick: fn(&TeamScores) -> f64) -> Line<'static> {
        let value = match (self.preview_scores, self.base_scores) {
            (None, _) => Span::styled("HOVER TO VIEW", Style::default().fg(Color::Gray)),
            (Some(preview), Some(base)) => match percent_change(pick(&base), pick(&preview)) {
                Some(change) => trend_span(change, true),
                None => Span::styled("-", Style::default().fg(Color::Gray)),
            },
            (Some(_), None) => trend_span(0.0, true),
        };
        Line::from(vec![Span::styled(format!("{label}: "), label_style()), value])
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let candidate = self.candidate;
        let mut lines = vec![
            field("Name", compact_name(self.player)),
            Line::default(),
            self.stat_line("Batting S/R", self.current.batting_sr, candidate.map(|c| c.batting_sr), 1),
            self.stat_line("Bowling S/R", self.current.bowling_sr, candidate.map(|c| c.bowling_sr), 1),
            self.stat_line("Economy Rate", self.current.economy_rate, candidate.map(|c| c.economy_rate), 1),
            self.stat_line("Runs", self.current.runs, candidate.map(|c| c.runs), 0),
        ];

        let mut total = vec![
            Span::styled("Predicted Points: ", label_style()),
            Span::raw(format!("{:.2}", self.current_points)),
        ];
        if candidate.is_some() {
            total.push(Span::raw("  "));
            total.push(trend_span(round_to(self.candidate_points - self.current_points, 2), false));
        }
        lines.push(Line::from(total));

        lines.push(Line::default());
        lines.push(self.team_line("Team Consistency Score", |s| s.consistency));
        lines.push(self.team_line("Team Diversity Score", |s| s.diversity));
        lines.push(self.team_line("Team Form Score", |s| s.form));
        lines
    }
}
