use serde::{Deserialize, Serialize};

use super::score::parse_lenient;

/// One box-score line for a single player in a single game.
///
/// Field names follow the CSV headings the dashboard's game log uses, so
/// any serde-compatible reader can produce these directly. Numeric columns
/// stay as raw text and are read leniently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerGameLine {
    #[serde(rename = "Season_year", default)]
    pub season_year: String,
    #[serde(rename = "Season_div", default)]
    pub season_div: String,
    #[serde(rename = "Date", default)]
    pub date: String,
    #[serde(rename = "OPP", default)]
    pub opponent: String,
    #[serde(rename = "Result", default)]
    pub result: String,
    #[serde(rename = "T Score", default)]
    pub team_score: String,
    #[serde(rename = "O Score", default)]
    pub opp_score: String,
    #[serde(rename = "MIN", default)]
    pub minutes: String,
    #[serde(rename = "FGM", default)]
    pub fgm: String,
    #[serde(rename = "FGA", default)]
    pub fga: String,
    #[serde(rename = "3PTM", default)]
    pub tpm: String,
    #[serde(rename = "3PTA", default)]
    pub tpa: String,
    #[serde(rename = "FTM", default)]
    pub ftm: String,
    #[serde(rename = "FTA", default)]
    pub fta: String,
    #[serde(rename = "REB", default)]
    pub reb: String,
}

impl PlayerGameLine {
    pub fn field_goals_made(&self) -> f64 {
        parse_lenient(&self.fgm)
    }

    pub fn field_goals_attempted(&self) -> f64 {
        parse_lenient(&self.fga)
    }

    pub fn threes_made(&self) -> f64 {
        parse_lenient(&self.tpm)
    }

    pub fn threes_attempted(&self) -> f64 {
        parse_lenient(&self.tpa)
    }

    pub fn free_throws_made(&self) -> f64 {
        parse_lenient(&self.ftm)
    }

    pub fn free_throws_attempted(&self) -> f64 {
        parse_lenient(&self.fta)
    }

    pub fn rebounds(&self) -> f64 {
        parse_lenient(&self.reb)
    }

    pub fn minutes_played(&self) -> f64 {
        parse_lenient(&self.minutes)
    }

    /// 2PM×2 + 3PM×3 + FTM, where 2PM = FGM - 3PM.
    pub fn points(&self) -> f64 {
        let fgm = self.field_goals_made();
        let tpm = self.threes_made();
        (fgm - tpm) * 2.0 + tpm * 3.0 + self.free_throws_made()
    }

    /// Result column starts with `W` (e.g. `"W 118-110"`).
    pub fn is_win(&self) -> bool {
        self.result.trim().starts_with('W')
    }
}

/// Season filter for a player's game log. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShootingFilter {
    pub season_year: Option<String>,
    pub season_div: Option<String>,
}

impl ShootingFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, line: &PlayerGameLine) -> bool {
        let year_ok = self
            .season_year
            .as_deref()
            .is_none_or(|y| y == line.season_year);
        let div_ok = self
            .season_div
            .as_deref()
            .is_none_or(|d| d == line.season_div);
        year_ok && div_ok
    }
}

/// Column sums over a filtered game log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShootingTotals {
    pub points: f64,
    pub fgm: f64,
    pub fga: f64,
    pub tpm: f64,
    pub tpa: f64,
    pub ftm: f64,
    pub fta: f64,
    pub rebounds: f64,
    pub minutes: f64,
}

/// Per-game averages and shooting percentages for a filtered game log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShootingSummary {
    pub games: usize,
    pub wins: usize,

    /// Win share rounded to a whole percent
    pub win_pct: u32,

    pub ppg: f64,
    pub rpg: f64,
    pub mpg: f64,

    /// Field-goal %, 0 when no attempts
    pub fg_pct: f64,
    /// Three-point %, 0 when no attempts
    pub tp_pct: f64,
    /// Free-throw %, 0 when no attempts
    pub ft_pct: f64,

    pub totals: ShootingTotals,
}

/// Made shots split by type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringBreakdown {
    pub two_point_makes: f64,
    pub three_point_makes: f64,
    pub free_throw_makes: f64,
}

/// One per-game point of the player's trend charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerGamePoint {
    /// 1-based position in the filtered log
    pub index: usize,
    pub date: String,
    pub opponent: String,
    pub points: f64,
    pub threes_made: f64,
    pub rebounds: f64,
    pub minutes: f64,
}
