// ═══════════════════════════════════════════════════════════════════
// Provider Tests — TheSportsDB response parsing, construction
// ═══════════════════════════════════════════════════════════════════

use std::sync::Arc;

use fan_dashboard_core::errors::CoreError;
use fan_dashboard_core::models::settings::Settings;
use fan_dashboard_core::providers::thesportsdb::{
    parse_events_response, parse_players_response, TheSportsDbProvider,
};
use fan_dashboard_core::providers::traits::SportsDataProvider;
use fan_dashboard_core::services::fetch_service::with_fallback;

mod construction {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let p = TheSportsDbProvider::new("https://www.thesportsdb.com/api/v1/json/123/", "134865");
        assert_eq!(p.base_url(), "https://www.thesportsdb.com/api/v1/json/123");
        assert_eq!(p.team_id(), "134865");
        assert_eq!(p.name(), "TheSportsDB");
    }

    #[test]
    fn from_settings_uses_configured_team() {
        let settings = Settings { team_id: "134860".into(), ..Settings::default() };
        let p = TheSportsDbProvider::from_settings(&settings);
        assert_eq!(p.team_id(), "134860");
    }

    fn assert_send<T: Send>(_: &T) {}

    #[test]
    fn trait_object_futures_are_send() {
        // Resources spawn these on Tokio worker threads.
        let p: Arc<dyn SportsDataProvider> =
            Arc::new(TheSportsDbProvider::new("https://www.thesportsdb.com/api/v1/json/123", "134865"));
        let players = p.get_players();
        assert_send(&players);
        let events = p.get_recent_events();
        assert_send(&events);
    }
}

mod players {
    use super::*;

    #[test]
    fn parses_player_list() {
        let body = r#"{"player":[
            {"idPlayer":"34146034","strPlayer":"Stephen Curry","strPosition":"Point Guard","strNumber":"30"},
            {"idPlayer":"34146040","strPlayer":"Draymond Green","strPosition":"Power Forward"}
        ]}"#;
        let players = parse_players_response(body).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name, "Stephen Curry");
        assert_eq!(players[1].number, None);
    }

    #[test]
    fn null_list_is_empty() {
        assert!(parse_players_response(r#"{"player":null}"#).unwrap().is_empty());
        assert!(parse_players_response("{}").unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_api_error() {
        let err = parse_players_response("<html>").unwrap_err();
        assert!(matches!(err, CoreError::Api { ref provider, .. } if provider == "TheSportsDB"));
    }
}

mod events {
    use super::*;

    #[test]
    fn parses_events_in_sent_order() {
        let body = r#"{"results":[
            {"idEvent":"2","dateEvent":"2025-01-20","strEvent":"Warriors @ Celtics",
             "strHomeTeam":"Boston Celtics","strAwayTeam":"Golden State Warriors",
             "intHomeScore":"85","intAwayScore":"125"},
            {"idEvent":"1","dateEvent":"2025-01-18","strEvent":"Bulls @ Warriors",
             "strHomeTeam":"Golden State Warriors","strAwayTeam":"Chicago Bulls",
             "intHomeScore":null,"intAwayScore":null}
        ]}"#;
        let events = parse_events_response(body).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "2");
        assert_eq!(events[0].away_score, 125);
        assert_eq!(events[1].home_score, 0);
    }

    #[test]
    fn null_results_is_empty() {
        assert!(parse_events_response(r#"{"results":null}"#).unwrap().is_empty());
    }

    #[test]
    fn wrong_shape_is_api_error() {
        assert!(parse_events_response(r#"{"results": 5}"#).is_err());
    }
}

mod fallback {
    use super::*;

    #[tokio::test]
    async fn success_passes_through() {
        let v = with_fallback(async { Ok::<_, CoreError>(vec![1, 2]) }, vec![], "test").await;
        assert_eq!(v, vec![1, 2]);
    }

    #[tokio::test]
    async fn failure_returns_fallback() {
        let v: Vec<u8> = with_fallback(
            async { Err(CoreError::Network("timeout".into())) },
            vec![],
            "test",
        )
        .await;
        assert!(v.is_empty());
    }
}
