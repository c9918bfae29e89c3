use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::game::{GameRecord, RawEvent};
use crate::models::player::Player;
use crate::models::settings::Settings;
use super::traits::SportsDataProvider;

const PROVIDER_NAME: &str = "TheSportsDB";

/// TheSportsDB v1 JSON API.
///
/// - **Free**: the public test key (`123`) works without sign-up.
/// - **Endpoints**: `/lookup_all_players.php?id=`, `/eventslast.php?id=`
///
/// Both endpoints answer `null` instead of `[]` when there is nothing to
/// list; that is treated as an empty result, not an error.
pub struct TheSportsDbProvider {
    client: Client,
    base_url: String,
    team_id: String,
}

impl TheSportsDbProvider {
    pub fn new(base_url: impl Into<String>, team_id: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            team_id: team_id.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base.clone(), settings.team_id.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn team_id(&self) -> &str {
        &self.team_id
    }

    async fn get_json(&self, endpoint: &str) -> Result<String, CoreError> {
        let url = format!("{}/{endpoint}", self.base_url);
        tracing::debug!(%url, team_id = %self.team_id, "requesting");

        let resp = self
            .client
            .get(&url)
            .query(&[("id", self.team_id.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER_NAME.into(),
                message: format!("{endpoint} returned HTTP {status}"),
            });
        }
        Ok(resp.text().await?)
    }
}

// ── TheSportsDB response types ──────────────────────────────────────

#[derive(Deserialize)]
struct PlayersResponse {
    #[serde(default)]
    player: Option<Vec<Player>>,
}

#[derive(Deserialize)]
struct EventsResponse {
    #[serde(default)]
    results: Option<Vec<RawEvent>>,
}

/// Parse a `lookup_all_players.php` body. A missing or `null` list is empty.
pub fn parse_players_response(body: &str) -> Result<Vec<Player>, CoreError> {
    let resp: PlayersResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
        provider: PROVIDER_NAME.into(),
        message: format!("Failed to parse players response: {e}"),
    })?;
    Ok(resp.player.unwrap_or_default())
}

/// Parse an `eventslast.php` body into records, most recent first as sent.
pub fn parse_events_response(body: &str) -> Result<Vec<GameRecord>, CoreError> {
    let resp: EventsResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
        provider: PROVIDER_NAME.into(),
        message: format!("Failed to parse events response: {e}"),
    })?;
    Ok(resp
        .results
        .unwrap_or_default()
        .into_iter()
        .map(GameRecord::from)
        .collect())
}

#[async_trait]
impl SportsDataProvider for TheSportsDbProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn get_players(&self) -> Result<Vec<Player>, CoreError> {
        let body = self.get_json("lookup_all_players.php").await?;
        parse_players_response(&body)
    }

    async fn get_recent_events(&self) -> Result<Vec<GameRecord>, CoreError> {
        let body = self.get_json("eventslast.php").await?;
        parse_events_response(&body)
    }
}
