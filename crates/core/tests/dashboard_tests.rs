// ═══════════════════════════════════════════════════════════════════
// Dashboard Tests — facade wiring, independent resources, fallback
// ═══════════════════════════════════════════════════════════════════

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use fan_dashboard_core::errors::CoreError;
use fan_dashboard_core::models::game::GameRecord;
use fan_dashboard_core::models::player::Player;
use fan_dashboard_core::models::settings::Settings;
use fan_dashboard_core::providers::traits::SportsDataProvider;
use fan_dashboard_core::resource::{AsyncResource, ResourceSnapshot};
use fan_dashboard_core::services::roster_service::RosterQuery;
use fan_dashboard_core::FanDashboard;

// ═══════════════════════════════════════════════════════════════════
// Mock Provider
// ═══════════════════════════════════════════════════════════════════

/// Roster endpoint is down; games endpoint works.
struct HalfBrokenProvider;

fn sample_games() -> Vec<GameRecord> {
    vec![
        GameRecord::new("3", "2025-01-22", "Warriors vs Suns", "Golden State Warriors", "Phoenix Suns", Some("105"), Some("98")),
        GameRecord::new("2", "2025-01-20", "Celtics vs Warriors", "Boston Celtics", "Golden State Warriors", Some("85"), Some("125")),
        GameRecord::new("1", "2025-01-18", "Warriors vs Bulls", "Golden State Warriors", "Chicago Bulls", Some("99"), Some("102")),
    ]
}

#[async_trait]
impl SportsDataProvider for HalfBrokenProvider {
    fn name(&self) -> &str {
        "HalfBroken"
    }

    async fn get_players(&self) -> Result<Vec<Player>, CoreError> {
        Err(CoreError::Api {
            provider: "HalfBroken".into(),
            message: "players endpoint unavailable".into(),
        })
    }

    async fn get_recent_events(&self) -> Result<Vec<GameRecord>, CoreError> {
        Ok(sample_games())
    }
}

async fn settle<T: Clone>(resource: &AsyncResource<T>) -> ResourceSnapshot<T> {
    let wait = async {
        let mut rx = resource.subscribe();
        loop {
            let snap = resource.snapshot();
            if !snap.loading {
                return snap;
            }
            rx.changed().await.expect("resource alive");
        }
    };
    tokio::time::timeout(Duration::from_secs(5), wait)
        .await
        .expect("resource settled in time")
}

fn dashboard(settings: Settings) -> FanDashboard {
    FanDashboard::new(settings, Arc::new(HalfBrokenProvider)).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
// Construction
// ═══════════════════════════════════════════════════════════════════

mod construction {
    use super::*;

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = Settings { chart_window: 0, ..Settings::default() };
        let result = FanDashboard::new(settings, Arc::new(HalfBrokenProvider));
        assert!(matches!(result, Err(CoreError::Config(_))));
    }

    #[test]
    fn default_provider_is_thesportsdb() {
        let dash = FanDashboard::from_settings(Settings::default()).unwrap();
        assert_eq!(dash.provider_name(), "TheSportsDB");
        assert_eq!(dash.settings().team_id, "134865");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Resources
// ═══════════════════════════════════════════════════════════════════

mod resources {
    use super::*;

    #[tokio::test]
    async fn failure_in_one_resource_does_not_affect_the_other() {
        let dash = dashboard(Settings::default());
        let players = dash.players_resource();
        let games = dash.games_resource();

        let players = settle(&players).await;
        let games = settle(&games).await;

        assert!(players.data.is_none());
        assert_eq!(
            players.error.as_deref(),
            Some("API error (HalfBroken): players endpoint unavailable")
        );
        assert_eq!(games.data.map(|g| g.len()), Some(3));
        assert!(games.error.is_none());
    }

    #[tokio::test]
    async fn fallback_mode_turns_failures_into_empty_lists() {
        let dash = dashboard(Settings { use_fallback: true, ..Settings::default() });
        let players = dash.players_resource();

        let snap = settle(&players).await;
        assert_eq!(snap.data, Some(vec![]));
        assert!(snap.error.is_none());
    }

    #[tokio::test]
    async fn refetch_on_facade_resource() {
        let dash = dashboard(Settings::default());
        let games = dash.games_resource();
        settle(&games).await;

        games.set_data(vec![]);
        games.refetch().await;
        assert_eq!(games.data().map(|g| g.len()), Some(3));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Derived views
// ═══════════════════════════════════════════════════════════════════

mod views {
    use super::*;

    #[test]
    fn recent_games_uses_configured_windows() {
        let dash = dashboard(Settings { summary_window: 2, ..Settings::default() });
        let summary = dash.recent_games(&sample_games());

        assert_eq!(summary.aggregates.games, 2);
        assert_eq!(summary.aggregates.wins, 2);
        assert_eq!(summary.aggregates.current_streak.to_string(), "W2");
        assert_eq!(summary.chart.len(), 2);
        assert_eq!(summary.chart[0].id, "2");
    }

    #[test]
    fn full_window_streak_and_averages() {
        let dash = dashboard(Settings::default());
        let stats = dash.recent_games(&sample_games()).aggregates;

        assert_eq!(stats.record_label(), "2-1");
        assert_eq!(stats.average_for, (105.0 + 125.0 + 99.0) / 3.0);
        assert_eq!(stats.average_against, (98.0 + 85.0 + 102.0) / 3.0);
        assert_eq!(stats.current_streak.to_string(), "W2");
    }

    #[test]
    fn single_game_window_gives_spotlight() {
        let dash = dashboard(Settings { summary_window: 1, ..Settings::default() });
        let summary = dash.recent_games(&sample_games());
        let spot = summary.spotlight.expect("spotlight in single-game mode");
        assert_eq!(spot.opponent, "Phoenix Suns");
        assert_eq!(spot.differential, 7);
        assert!(spot.momentum > 50.0);
    }

    #[test]
    fn roster_helpers_delegate() {
        let dash = dashboard(Settings::default());
        let players = vec![
            Player::new("1", "Stephen Curry").with_position("Guard"),
            Player::new("2", "Kevon Looney").with_position("Center"),
        ];
        assert_eq!(dash.roster_positions(&players), vec!["All", "Center", "Guard"]);
        let query = RosterQuery { search: "looney".into(), ..Default::default() };
        assert_eq!(dash.filter_roster(&players, &query).len(), 1);
    }
}
