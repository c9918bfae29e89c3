use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::game::GameRecord;
use crate::models::player::Player;

/// Source of roster and game data for one tracked team.
///
/// TheSportsDB is the only implementation shipped; tests and alternative
/// feeds implement this trait and hand it to `FanDashboard::new`.
///
/// The returned futures are `Send`: resources run them on spawned Tokio tasks.
#[async_trait]
pub trait SportsDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Every player currently listed on the team.
    async fn get_players(&self) -> Result<Vec<Player>, CoreError>;

    /// The team's most recent completed games, most recent first.
    async fn get_recent_events(&self) -> Result<Vec<GameRecord>, CoreError>;
}
