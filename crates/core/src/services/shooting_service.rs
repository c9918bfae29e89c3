use std::collections::BTreeSet;

use crate::models::shooting::{
    PlayerGameLine, PlayerGamePoint, ScoringBreakdown, ShootingFilter, ShootingSummary,
    ShootingTotals,
};

/// Season filters, averages and shooting splits for a player's game log.
///
/// Like the team stats, every numeric column is read leniently: garbage
/// counts as 0 and never aborts the summary.
pub struct ShootingService;

impl ShootingService {
    pub fn new() -> Self {
        Self
    }

    /// Distinct season years, sorted.
    pub fn season_years(&self, lines: &[PlayerGameLine]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.season_year.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct season divisions (e.g. "Regular", "Playoffs") in first-seen order.
    pub fn season_divs(&self, lines: &[PlayerGameLine]) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        lines
            .iter()
            .filter(|l| seen.insert(l.season_div.as_str()))
            .map(|l| l.season_div.clone())
            .collect()
    }

    pub fn filter<'a>(&self, lines: &'a [PlayerGameLine], filter: &ShootingFilter) -> Vec<&'a PlayerGameLine> {
        lines.iter().filter(|l| filter.matches(l)).collect()
    }

    /// Totals, per-game averages and percentages over the filtered lines.
    pub fn summarize(&self, lines: &[PlayerGameLine], filter: &ShootingFilter) -> ShootingSummary {
        let filtered = self.filter(lines, filter);
        let games = filtered.len();

        let mut totals = ShootingTotals::default();
        let mut wins = 0;
        for line in &filtered {
            totals.points += line.points();
            totals.fgm += line.field_goals_made();
            totals.fga += line.field_goals_attempted();
            totals.tpm += line.threes_made();
            totals.tpa += line.threes_attempted();
            totals.ftm += line.free_throws_made();
            totals.fta += line.free_throws_attempted();
            totals.rebounds += line.rebounds();
            totals.minutes += line.minutes_played();
            if line.is_win() {
                wins += 1;
            }
        }

        let per_game = |v: f64| if games > 0 { v / games as f64 } else { 0.0 };

        ShootingSummary {
            games,
            wins,
            win_pct: if games > 0 {
                ((wins as f64 / games as f64) * 100.0).round() as u32
            } else {
                0
            },
            ppg: per_game(totals.points),
            rpg: per_game(totals.rebounds),
            mpg: per_game(totals.minutes),
            fg_pct: percentage(totals.fgm, totals.fga),
            tp_pct: percentage(totals.tpm, totals.tpa),
            ft_pct: percentage(totals.ftm, totals.fta),
            totals,
        }
    }

    /// Made shots by type over the filtered lines.
    pub fn scoring_breakdown(&self, lines: &[PlayerGameLine], filter: &ShootingFilter) -> ScoringBreakdown {
        self.filter(lines, filter)
            .into_iter()
            .fold(ScoringBreakdown::default(), |mut acc, line| {
                acc.two_point_makes += (line.field_goals_made() - line.threes_made()).max(0.0);
                acc.three_point_makes += line.threes_made();
                acc.free_throw_makes += line.free_throws_made();
                acc
            })
    }

    /// One chart point per filtered game, in log order.
    pub fn series_by_game(&self, lines: &[PlayerGameLine], filter: &ShootingFilter) -> Vec<PlayerGamePoint> {
        self.filter(lines, filter)
            .into_iter()
            .enumerate()
            .map(|(idx, line)| PlayerGamePoint {
                index: idx + 1,
                date: line.date.clone(),
                opponent: line.opponent.clone(),
                points: line.points(),
                threes_made: line.threes_made(),
                rebounds: line.rebounds(),
                minutes: line.minutes_played(),
            })
            .collect()
    }
}

impl Default for ShootingService {
    fn default() -> Self {
        Self::new()
    }
}

/// made / attempted × 100, or 0 with no attempts.
fn percentage(made: f64, attempted: f64) -> f64 {
    if attempted > 0.0 {
        made / attempted * 100.0
    } else {
        0.0
    }
}
