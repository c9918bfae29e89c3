use serde::{Deserialize, Serialize};

use super::game::GameResult;

/// A single point on the recent-games chart.
///
/// The core generates these, oldest game first; the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Upstream event id
    pub id: String,

    /// Display name of the game
    pub label: String,

    /// Date as sent upstream
    pub date: String,

    /// Points scored by the tracked team
    pub for_points: u32,

    /// Points scored by the opponent
    pub against_points: u32,

    pub result: GameResult,
}
