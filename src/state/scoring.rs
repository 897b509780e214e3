//! Figures derived locally from the optimizer's per-player points.

use cricxi_api::{PlayerPoints, Stat};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaders {
    pub captain: Option<String>,
    pub vice_captain: Option<String>,
}

impl Leaders {
    pub fn badge(&self, player: &str) -> Option<&'static str> {
        if self.captain.as_deref() == Some(player) {
            Some("C")
        } else if self.vice_captain.as_deref() == Some(player) {
            Some("VC")
        } else {
            None
        }
    }
}

/// Predicted mean points for a player, zero when the optimizer had none.
pub fn mean_points(stats: &[PlayerPoints], player: &str) -> f64 {
    stats
        .iter()
        .find(|p| p.player == player)
        .map(|p| p.mean_points)
        .unwrap_or_default()
}

pub fn points_for<'a>(stats: &'a [PlayerPoints], player: &str) -> Option<&'a PlayerPoints> {
    stats.iter().find(|p| p.player == player)
}

/// Sum of the positive means in the lineup.
pub fn total_score(lineup: &[String], stats: &[PlayerPoints]) -> f64 {
    lineup
        .iter()
        .map(|p| mean_points(stats, p))
        .filter(|m| *m > 0.0)
        .sum()
}

/// Captain and vice are the two highest positive means. Equal means keep
/// lineup order.
pub fn pick_leaders(lineup: &[String], stats: &[PlayerPoints]) -> Leaders {
    let mut eligible: Vec<(&String, f64)> = lineup
        .iter()
        .map(|p| (p, mean_points(stats, p)))
        .filter(|(_, m)| *m > 0.0)
        .collect();
    eligible.sort_by(|a, b| b.1.total_cmp(&a.1));

    let mut ranked = eligible.into_iter().map(|(p, _)| p.clone());
    Leaders { captain: ranked.next(), vice_captain: ranked.next() }
}

/// Replace exactly one slot.
pub fn swap(lineup: &[String], slot: usize, candidate: &str) -> Vec<String> {
    let mut next = lineup.to_vec();
    if let Some(current) = next.get_mut(slot) {
        *current = candidate.to_string();
    }
    next
}

/// Picked players the lineup left out, team A first.
pub fn bench(team_a: &[String], team_b: &[String], lineup: &[String]) -> Vec<String> {
    team_a
        .iter()
        .chain(team_b)
        .filter(|p| !lineup.contains(p))
        .cloned()
        .collect()
}

pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Relative change in percent, two decimals.
pub fn percent_change(old: f64, new: f64) -> Option<f64> {
    if old == 0.0 {
        return None;
    }
    let change = (new - old) * 100.0 / old;
    change.is_finite().then(|| round_to(change, 2))
}

pub fn stat_delta(candidate: Stat, current: Stat, decimals: u32) -> Option<f64> {
    let delta = candidate.value()? - current.value()?;
    delta.is_finite().then(|| round_to(delta, decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(player: &str, mean: f64) -> PlayerPoints {
        PlayerPoints { player: player.into(), mean_points: mean, ..Default::default() }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn total_ignores_non_positive_means() {
        let stats = vec![points("A", 40.0), points("B", -3.0), points("C", 12.5)];
        assert_eq!(total_score(&names(&["A", "B", "C", "D"]), &stats), 52.5);
    }

    #[test]
    fn leaders_are_two_highest_positive() {
        let stats = vec![points("A", 10.0), points("B", 55.0), points("C", 30.0)];
        let leaders = pick_leaders(&names(&["A", "B", "C"]), &stats);
        assert_eq!(leaders.captain.as_deref(), Some("B"));
        assert_eq!(leaders.vice_captain.as_deref(), Some("C"));
        assert_eq!(leaders.badge("B"), Some("C"));
        assert_eq!(leaders.badge("C"), Some("VC"));
        assert_eq!(leaders.badge("A"), None);
    }

    #[test]
    fn tied_leaders_follow_lineup_order() {
        let stats = vec![points("A", 20.0), points("B", 20.0), points("C", 20.0)];
        let leaders = pick_leaders(&names(&["C", "A", "B"]), &stats);
        assert_eq!(leaders.captain.as_deref(), Some("C"));
        assert_eq!(leaders.vice_captain.as_deref(), Some("A"));
    }

    #[test]
    fn single_eligible_player_has_no_vice() {
        let stats = vec![points("A", 5.0), points("B", 0.0)];
        let leaders = pick_leaders(&names(&["A", "B"]), &stats);
        assert_eq!(leaders.captain.as_deref(), Some("A"));
        assert_eq!(leaders.vice_captain, None);
    }

    #[test]
    fn swap_replaces_one_slot() {
        let lineup = names(&["A", "B", "C"]);
        assert_eq!(swap(&lineup, 1, "X"), names(&["A", "X", "C"]));
        assert_eq!(swap(&lineup, 7, "X"), lineup);
    }

    #[test]
    fn bench_lists_unpicked_in_order() {
        let bench = bench(&names(&["A", "B"]), &names(&["C", "D"]), &names(&["B", "C"]));
        assert_eq!(bench, names(&["A", "D"]));
    }

    #[test]
    fn percent_change_guards_zero_base() {
        assert_eq!(percent_change(0.0, 3.0), None);
        assert_eq!(percent_change(2.0, 3.0), Some(50.0));
        assert_eq!(percent_change(3.0, 2.0), Some(-33.33));
    }

    #[test]
    fn stat_delta_skips_unknown_values() {
        assert_eq!(stat_delta(Stat::Value(130.44), Stat::Value(120.0), 1), Some(10.4));
        assert_eq!(stat_delta(Stat::Infinite, Stat::Value(1.0), 1), None);
        assert_eq!(stat_delta(Stat::Value(410.0), Stat::Missing, 0), None);
    }
}
