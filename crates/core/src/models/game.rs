use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::score::{coerce_score, ScoreField};

/// Outcome of a game from the tracked team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "T")]
    Tie,
}

impl GameResult {
    /// Equal points are a tie; otherwise the higher score wins.
    pub fn from_points(for_points: u32, against_points: u32) -> Self {
        match for_points.cmp(&against_points) {
            std::cmp::Ordering::Equal => GameResult::Tie,
            std::cmp::Ordering::Greater => GameResult::Win,
            std::cmp::Ordering::Less => GameResult::Loss,
        }
    }

    /// +1 for a win, -1 for a loss, 0 for a tie.
    pub fn signum(self) -> i32 {
        match self {
            GameResult::Win => 1,
            GameResult::Loss => -1,
            GameResult::Tie => 0,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Win => write!(f, "W"),
            GameResult::Loss => write!(f, "L"),
            GameResult::Tie => write!(f, "T"),
        }
    }
}

/// Where the tracked team played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    Home,
    Away,
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Venue::Home => write!(f, "Home"),
            Venue::Away => write!(f, "Away"),
        }
    }
}

/// An event exactly as TheSportsDB returns it from `eventslast.php`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "idEvent", default)]
    pub id_event: Option<String>,
    #[serde(rename = "dateEvent", default)]
    pub date_event: Option<String>,
    #[serde(rename = "strEvent", default)]
    pub str_event: Option<String>,
    #[serde(rename = "strHomeTeam", default)]
    pub str_home_team: Option<String>,
    #[serde(rename = "strAwayTeam", default)]
    pub str_away_team: Option<String>,
    #[serde(rename = "intHomeScore", default)]
    pub int_home_score: Option<ScoreField>,
    #[serde(rename = "intAwayScore", default)]
    pub int_away_score: Option<ScoreField>,
}

/// One completed game.
///
/// Scores are coerced exactly once, here, so every derived view reads the
/// same numbers. A record is never mutated after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Opaque upstream identifier
    pub id: String,

    /// Date as sent upstream (usually `YYYY-MM-DD`, not guaranteed)
    pub date: String,

    /// Human-readable event name, e.g. "Golden State Warriors vs Boston Celtics"
    pub event_label: String,

    pub home_team: String,
    pub away_team: String,

    /// Home score; missing or malformed upstream values are 0
    pub home_score: u32,

    /// Away score; missing or malformed upstream values are 0
    pub away_score: u32,
}

/// A game seen from the tracked team's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perspective<'a> {
    pub venue: Venue,
    pub for_points: u32,
    pub against_points: u32,
    pub opponent: &'a str,
}

impl Perspective<'_> {
    pub fn result(&self) -> GameResult {
        GameResult::from_points(self.for_points, self.against_points)
    }

    pub fn differential(&self) -> i64 {
        i64::from(self.for_points) - i64::from(self.against_points)
    }
}

impl GameRecord {
    /// Build a record from raw upstream fields, coercing both scores.
    pub fn new(
        id: impl Into<String>,
        date: impl Into<String>,
        event_label: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home_score: Option<&str>,
        away_score: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            event_label: event_label.into(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_score: coerce_score(home_score.map(ScoreField::from).as_ref()),
            away_score: coerce_score(away_score.map(ScoreField::from).as_ref()),
        }
    }

    /// Best-effort calendar date. `None` when the upstream string is not `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    /// True when `team_name` appears (case-insensitively) in the home team's name.
    pub fn is_home_for(&self, team_name: &str) -> bool {
        self.home_team
            .to_lowercase()
            .contains(&team_name.to_lowercase())
    }

    /// Resolve which score is "for" and which is "against" for `team_name`.
    pub fn perspective(&self, team_name: &str) -> Perspective<'_> {
        if self.is_home_for(team_name) {
            Perspective {
                venue: Venue::Home,
                for_points: self.home_score,
                against_points: self.away_score,
                opponent: &self.away_team,
            }
        } else {
            Perspective {
                venue: Venue::Away,
                for_points: self.away_score,
                against_points: self.home_score,
                opponent: &self.home_team,
            }
        }
    }
}

impl From<RawEvent> for GameRecord {
    fn from(raw: RawEvent) -> Self {
        Self {
            id: raw.id_event.unwrap_or_default(),
            date: raw.date_event.unwrap_or_default(),
            event_label: raw.str_event.unwrap_or_default(),
            home_team: raw.str_home_team.unwrap_or_default(),
            away_team: raw.str_away_team.unwrap_or_default(),
            home_score: coerce_score(raw.int_home_score.as_ref()),
            away_score: coerce_score(raw.int_away_score.as_ref()),
        }
    }
}
