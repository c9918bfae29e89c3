use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::player::Player;

/// Position filter value that disables position filtering.
pub const ALL_POSITIONS: &str = "All";

/// Jersey sort key for players without a readable number (sorts them last).
const MISSING_JERSEY: u32 = 9999;

/// Roster ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RosterSort {
    /// Alphabetical by player name
    #[default]
    NameAsc,
    /// By jersey number, missing numbers last
    Jersey,
    /// By position, then name
    Position,
}

/// Search box, position chip and sort selector of the roster view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterQuery {
    /// Case-insensitive substring of the player's name; empty matches all
    pub search: String,

    /// Exact position (as shown by `positions()`); `None` or `"All"` matches all
    pub position: Option<String>,

    pub sort: RosterSort,
}

/// Filtering and ordering for the roster grid.
pub struct RosterService;

impl RosterService {
    pub fn new() -> Self {
        Self
    }

    /// `"All"` followed by every distinct position, sorted.
    /// Players without a position are grouped under `"Unknown"`.
    pub fn positions(&self, players: &[Player]) -> Vec<String> {
        let distinct: BTreeSet<&str> = players.iter().map(Player::position_or_unknown).collect();
        std::iter::once(ALL_POSITIONS.to_string())
            .chain(distinct.into_iter().map(str::to_string))
            .collect()
    }

    /// Players matching `query`, in the requested order. The input is untouched.
    pub fn filter_and_sort<'a>(&self, players: &'a [Player], query: &RosterQuery) -> Vec<&'a Player> {
        let needle = query.search.trim().to_lowercase();
        let position = query
            .position
            .as_deref()
            .filter(|p| *p != ALL_POSITIONS);

        let mut list: Vec<&Player> = players
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .filter(|p| position.is_none_or(|pos| p.position_or_unknown() == pos))
            .collect();

        match query.sort {
            RosterSort::NameAsc => list.sort_by(|a, b| a.name.cmp(&b.name)),
            RosterSort::Jersey => list.sort_by_key(|p| p.jersey_number().unwrap_or(MISSING_JERSEY)),
            RosterSort::Position => list.sort_by(|a, b| {
                match a.position_or_unknown().cmp(b.position_or_unknown()) {
                    Ordering::Equal => a.name.cmp(&b.name),
                    other => other,
                }
            }),
        }
        list
    }
}

impl Default for RosterService {
    fn default() -> Self {
        Self::new()
    }
}
