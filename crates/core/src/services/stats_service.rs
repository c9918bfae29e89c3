use crate::models::analytics::{AggregateStats, GameSpotlight, RecentGamesSummary, Streak};
use crate::models::chart::ChartPoint;
use crate::models::game::{GameRecord, GameResult};

/// Point margin at which momentum reaches ~88/100 (tanh(1) ≈ 0.76).
const MOMENTUM_SCALE: f64 = 18.0;

/// Squash a point differential into a [0, 100] "momentum" score.
///
/// `clamp01(0.5 + tanh(d / 18) * 0.5) * 100`. An even game is 50 and
/// blowouts taper toward 0 or 100. The result stays strictly inside (0, 100)
/// up to a margin of about 300; from roughly 350 on, `tanh` rounds to ±1 in
/// f64 and the score saturates at exactly 0 or 100.
pub fn compute_momentum(differential: f64) -> f64 {
    let squashed = 0.5 + (differential / MOMENTUM_SCALE).tanh() * 0.5;
    squashed.clamp(0.0, 1.0) * 100.0
}

/// The first `n` records (input is most-recent-first). Never reorders.
pub fn select_window(records: &[GameRecord], n: usize) -> &[GameRecord] {
    &records[..n.min(records.len())]
}

/// Derives chart series and scoreboard aggregates from recent games.
///
/// Pure and re-entrant: the only state is the tracked team's name, used to
/// decide which side of each game is "ours". Malformed scores were already
/// coerced to 0 when the records were built, so nothing here can fail.
#[derive(Debug, Clone)]
pub struct StatsService {
    team_name: String,
}

impl StatsService {
    /// `team_name` must not be blank: it is matched as a substring of the
    /// home team, and an empty name would make every game a home game.
    /// `Settings::validate` rejects a blank name before the facade gets here.
    pub fn new(team_name: impl Into<String>) -> Self {
        let team_name = team_name.into();
        debug_assert!(!team_name.trim().is_empty(), "team name must not be blank");
        Self { team_name }
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    /// Chart points for the `n` most recent games, oldest first.
    pub fn to_chart_series(&self, records: &[GameRecord], n: usize) -> Vec<ChartPoint> {
        select_window(records, n)
            .iter()
            .rev()
            .map(|record| self.to_chart_point(record))
            .collect()
    }

    pub fn to_chart_point(&self, record: &GameRecord) -> ChartPoint {
        let side = record.perspective(&self.team_name);
        ChartPoint {
            id: record.id.clone(),
            label: record.event_label.clone(),
            date: record.date.clone(),
            for_points: side.for_points,
            against_points: side.against_points,
            result: side.result(),
        }
    }

    /// Record, averages and streak over `window` (most recent first).
    ///
    /// An empty window yields zeroed stats. Momentum is only filled in for a
    /// window of exactly one game.
    pub fn compute_aggregates(&self, window: &[GameRecord]) -> AggregateStats {
        if window.is_empty() {
            return AggregateStats::empty();
        }

        let mut stats = AggregateStats::empty();
        let mut sum_for = 0.0;
        let mut sum_against = 0.0;
        let mut results = Vec::with_capacity(window.len());

        for record in window {
            let side = record.perspective(&self.team_name);
            sum_for += f64::from(side.for_points);
            sum_against += f64::from(side.against_points);

            let result = side.result();
            match result {
                GameResult::Win => stats.wins += 1,
                GameResult::Loss => stats.losses += 1,
                GameResult::Tie => stats.ties += 1,
            }
            results.push(result);
        }

        let count = window.len() as f64;
        stats.games = window.len();
        stats.average_for = sum_for / count;
        stats.average_against = sum_against / count;
        stats.average_differential = (sum_for - sum_against) / count;
        stats.current_streak = current_streak(&results);
        if window.len() == 1 {
            stats.momentum_score = Some(compute_momentum(stats.average_differential));
        }
        stats
    }

    /// Single-game spotlight for `record`.
    pub fn spotlight(&self, record: &GameRecord) -> GameSpotlight {
        let side = record.perspective(&self.team_name);
        let differential = side.differential();
        let opponent = if side.opponent.trim().is_empty() {
            "Opponent".to_string()
        } else {
            side.opponent.to_string()
        };

        GameSpotlight {
            id: record.id.clone(),
            label: record.event_label.clone(),
            date: record.date.clone(),
            opponent,
            venue: side.venue,
            for_points: side.for_points,
            against_points: side.against_points,
            differential,
            result: side.result(),
            momentum: compute_momentum(differential as f64),
        }
    }

    /// Everything the recent-games panel needs in one pass.
    ///
    /// The chart covers `chart_window` games, taken from the first
    /// `summary_window` records; aggregates cover the `summary_window`.
    pub fn recent_games(
        &self,
        records: &[GameRecord],
        chart_window: usize,
        summary_window: usize,
    ) -> RecentGamesSummary {
        let recent = select_window(records, summary_window);
        let spotlight = match recent {
            [only] => Some(self.spotlight(only)),
            _ => None,
        };

        RecentGamesSummary {
            chart: self.to_chart_series(recent, chart_window),
            aggregates: self.compute_aggregates(recent),
            spotlight,
            is_empty: records.is_empty(),
        }
    }
}

/// Run of identical results from index 0.
///
/// A leading tie means there is no streak. Scanning stops at the first tie
/// or change of direction; neither counts toward the run.
fn current_streak(results: &[GameResult]) -> Streak {
    let Some((first, rest)) = results.split_first() else {
        return Streak::NONE;
    };
    let direction = first.signum();
    if direction == 0 {
        return Streak::NONE;
    }

    let extra = rest
        .iter()
        .take_while(|r| r.signum() == direction)
        .count() as i32;
    Streak(direction * (1 + extra))
}

#[cfg(test)]
mod tests {
    use super::*;
    use GameResult::{Loss as L, Tie as T, Win as W};

    #[test]
    fn streak_stops_at_first_flip() {
        assert_eq!(current_streak(&[W, W, L, W]), Streak(2));
        assert_eq!(current_streak(&[L, L, L]), Streak(-3));
    }

    #[test]
    fn streak_stops_at_tie_without_counting_it() {
        assert_eq!(current_streak(&[W, T, W]), Streak(1));
    }

    #[test]
    fn leading_tie_means_no_streak() {
        assert_eq!(current_streak(&[T, W, W]), Streak::NONE);
        assert_eq!(current_streak(&[]), Streak::NONE);
    }
}
