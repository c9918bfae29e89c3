pub mod errors;
pub mod models;
pub mod providers;
pub mod resource;
pub mod services;

use std::sync::Arc;

use models::{
    analytics::RecentGamesSummary,
    game::GameRecord,
    player::Player,
    settings::Settings,
    shooting::{PlayerGameLine, ShootingFilter, ShootingSummary},
};
use providers::{thesportsdb::TheSportsDbProvider, traits::SportsDataProvider};
use resource::{AsyncResource, ResourceOptions};
use services::{
    fetch_service::with_fallback,
    roster_service::{RosterQuery, RosterService},
    shooting_service::ShootingService,
    stats_service::StatsService,
};

use errors::CoreError;

/// Main entry point for the fan-dashboard core library.
///
/// Holds the settings, the data provider and the derivation services. Each
/// `*_resource()` call builds an independent [`AsyncResource`], so a failed
/// roster fetch never hides successfully loaded games (and vice versa).
#[must_use]
pub struct FanDashboard {
    settings: Settings,
    provider: Arc<dyn SportsDataProvider>,
    stats_service: StatsService,
    roster_service: RosterService,
    shooting_service: ShootingService,
}

impl std::fmt::Debug for FanDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanDashboard")
            .field("settings", &self.settings)
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl FanDashboard {
    /// Build a dashboard over any provider. Settings are validated first.
    pub fn new(settings: Settings, provider: Arc<dyn SportsDataProvider>) -> Result<Self, CoreError> {
        settings.validate()?;
        let stats_service = StatsService::new(settings.team_name.clone());
        Ok(Self {
            settings,
            provider,
            stats_service,
            roster_service: RosterService::new(),
            shooting_service: ShootingService::new(),
        })
    }

    /// Build a dashboard backed by TheSportsDB.
    pub fn from_settings(settings: Settings) -> Result<Self, CoreError> {
        let provider = Arc::new(TheSportsDbProvider::from_settings(&settings));
        Self::new(settings, provider)
    }

    /// Settings from `FAN_DASHBOARD_*` environment variables, backed by TheSportsDB.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_settings(Settings::from_env()?)
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    // ── Resources ───────────────────────────────────────────────────

    /// Roster resource. Starts loading immediately when a Tokio runtime is running.
    pub fn players_resource(&self) -> AsyncResource<Vec<Player>> {
        let provider = Arc::clone(&self.provider);
        let use_fallback = self.settings.use_fallback;
        AsyncResource::new(
            move || {
                let provider = Arc::clone(&provider);
                async move {
                    if use_fallback {
                        Ok(with_fallback(provider.get_players(), Vec::new(), "players").await)
                    } else {
                        provider.get_players().await
                    }
                }
            },
            ResourceOptions::default(),
        )
    }

    /// Recent-games resource (most recent first). Starts loading immediately
    /// when a Tokio runtime is running.
    pub fn games_resource(&self) -> AsyncResource<Vec<GameRecord>> {
        let provider = Arc::clone(&self.provider);
        let use_fallback = self.settings.use_fallback;
        AsyncResource::new(
            move || {
                let provider = Arc::clone(&provider);
                async move {
                    if use_fallback {
                        Ok(with_fallback(provider.get_recent_events(), Vec::new(), "recent events").await)
                    } else {
                        provider.get_recent_events().await
                    }
                }
            },
            ResourceOptions::default(),
        )
    }

    // ── Derived views ───────────────────────────────────────────────

    /// Chart, aggregates and spotlight for the configured windows.
    #[must_use]
    pub fn recent_games(&self, records: &[GameRecord]) -> RecentGamesSummary {
        self.stats_service.recent_games(
            records,
            self.settings.chart_window,
            self.settings.summary_window,
        )
    }

    #[must_use]
    pub fn stats(&self) -> &StatsService {
        &self.stats_service
    }

    /// Roster filtered and ordered for display.
    #[must_use]
    pub fn filter_roster<'a>(&self, players: &'a [Player], query: &RosterQuery) -> Vec<&'a Player> {
        self.roster_service.filter_and_sort(players, query)
    }

    /// Position chips for the roster view, `"All"` first.
    #[must_use]
    pub fn roster_positions(&self, players: &[Player]) -> Vec<String> {
        self.roster_service.positions(players)
    }

    /// Shooting summary for a player's game log.
    #[must_use]
    pub fn shooting_summary(&self, lines: &[PlayerGameLine], filter: &ShootingFilter) -> ShootingSummary {
        self.shooting_service.summarize(lines, filter)
    }

    #[must_use]
    pub fn shooting(&self) -> &ShootingService {
        &self.shooting_service
    }
}
