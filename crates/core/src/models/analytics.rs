use serde::{Deserialize, Serialize};

use super::chart::ChartPoint;
use super::game::{GameResult, Venue};

/// Signed run of consecutive results, counted from the most recent game.
///
/// Positive is a win streak, negative a loss streak, 0 means no streak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Streak(pub i32);

impl Streak {
    pub const NONE: Streak = Streak(0);

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Number of games in the run, regardless of direction.
    pub fn length(self) -> u32 {
        self.0.unsigned_abs()
    }

    /// Direction of the run, if any.
    pub fn direction(self) -> Option<GameResult> {
        match self.0.signum() {
            1 => Some(GameResult::Win),
            -1 => Some(GameResult::Loss),
            _ => None,
        }
    }
}

impl std::fmt::Display for Streak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.direction() {
            Some(GameResult::Win) => write!(f, "W{}", self.length()),
            Some(GameResult::Loss) => write!(f, "L{}", self.length()),
            _ => write!(f, "—"),
        }
    }
}

/// Scoreboard summary over a window of recent games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Number of games in the window (= wins + losses + ties)
    pub games: usize,

    pub wins: usize,
    pub losses: usize,
    pub ties: usize,

    /// Mean points scored per game
    pub average_for: f64,

    /// Mean points conceded per game
    pub average_against: f64,

    /// (sum_for - sum_against) / games
    pub average_differential: f64,

    /// Run of same results counted back from the most recent game
    pub current_streak: Streak,

    /// Only set in single-game mode (window of exactly one game)
    pub momentum_score: Option<f64>,
}

impl AggregateStats {
    /// All-zero stats for an empty window.
    pub fn empty() -> Self {
        Self {
            games: 0,
            wins: 0,
            losses: 0,
            ties: 0,
            average_for: 0.0,
            average_against: 0.0,
            average_differential: 0.0,
            current_streak: Streak::NONE,
            momentum_score: None,
        }
    }

    /// Record string such as `4-1` or `3-2-1` (ties only shown when present).
    pub fn record_label(&self) -> String {
        if self.ties > 0 {
            format!("{}-{}-{}", self.wins, self.losses, self.ties)
        } else {
            format!("{}-{}", self.wins, self.losses)
        }
    }
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self::empty()
    }
}

/// Everything the "last game spotlight" panel shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSpotlight {
    pub id: String,
    pub label: String,
    pub date: String,

    /// Opponent name, or `"Opponent"` when upstream left it blank
    pub opponent: String,

    pub venue: Venue,
    pub for_points: u32,
    pub against_points: u32,

    /// for_points - against_points
    pub differential: i64,

    pub result: GameResult,

    /// Point margin squashed into [0, 100]; 50 is an even game
    pub momentum: f64,
}

/// Chart, aggregates and (in single-game mode) the spotlight for the recent-games panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentGamesSummary {
    /// Oldest game first
    pub chart: Vec<ChartPoint>,

    pub aggregates: AggregateStats,

    /// Present only when the summary window holds exactly one game
    pub spotlight: Option<GameSpotlight>,

    /// True when there were no games at all; the caller shows an empty state
    pub is_empty: bool,
}
