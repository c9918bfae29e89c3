use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

pub const DEFAULT_API_BASE: &str = "https://www.thesportsdb.com/api/v1/json/123";
pub const DEFAULT_TEAM_ID: &str = "134865";
pub const DEFAULT_TEAM_NAME: &str = "warriors";
pub const DEFAULT_CHART_WINDOW: usize = 8;
pub const DEFAULT_SUMMARY_WINDOW: usize = 6;

pub const ENV_API_BASE: &str = "FAN_DASHBOARD_API_BASE";
pub const ENV_TEAM_ID: &str = "FAN_DASHBOARD_TEAM_ID";
pub const ENV_TEAM_NAME: &str = "FAN_DASHBOARD_TEAM_NAME";
pub const ENV_CHART_WINDOW: &str = "FAN_DASHBOARD_CHART_WINDOW";
pub const ENV_SUMMARY_WINDOW: &str = "FAN_DASHBOARD_SUMMARY_WINDOW";
pub const ENV_USE_FALLBACK: &str = "FAN_DASHBOARD_USE_FALLBACK";

/// Dashboard configuration: which team to track and where to fetch it from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the TheSportsDB v1 JSON API, including the key segment.
    pub api_base: String,

    /// TheSportsDB team id (134865 = Golden State Warriors).
    pub team_id: String,

    /// Substring matched (case-insensitively) against the home team's name
    /// to decide which score belongs to the tracked team.
    pub team_name: String,

    /// How many recent games the chart shows.
    pub chart_window: usize,

    /// How many recent games the scoreboard aggregates cover.
    pub summary_window: usize,

    /// When set, failed fetches resolve to an empty list instead of an error.
    pub use_fallback: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            team_id: DEFAULT_TEAM_ID.to_string(),
            team_name: DEFAULT_TEAM_NAME.to_string(),
            chart_window: DEFAULT_CHART_WINDOW,
            summary_window: DEFAULT_SUMMARY_WINDOW,
            use_fallback: false,
        }
    }
}

impl Settings {
    /// Defaults overridden by `FAN_DASHBOARD_*` variables (a `.env` file is
    /// loaded first if present). Blank variables keep the default.
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut settings = Self::default();
        if let Some(v) = get(ENV_API_BASE) {
            settings.api_base = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = get(ENV_TEAM_ID) {
            settings.team_id = v;
        }
        if let Some(v) = get(ENV_TEAM_NAME) {
            settings.team_name = v;
        }
        if let Some(v) = get(ENV_CHART_WINDOW) {
            settings.chart_window = parse_window(ENV_CHART_WINDOW, &v)?;
        }
        if let Some(v) = get(ENV_SUMMARY_WINDOW) {
            settings.summary_window = parse_window(ENV_SUMMARY_WINDOW, &v)?;
        }
        if let Some(v) = get(ENV_USE_FALLBACK) {
            settings.use_fallback = parse_flag(ENV_USE_FALLBACK, &v)?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the dashboard cannot work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.api_base.starts_with("http") {
            return Err(CoreError::Config(format!(
                "API base '{}' must be an http(s) URL",
                self.api_base
            )));
        }
        if self.team_id.trim().is_empty() {
            return Err(CoreError::Config("team id must not be empty".into()));
        }
        if self.team_name.trim().is_empty() {
            return Err(CoreError::Config("team name must not be empty".into()));
        }
        if self.chart_window == 0 || self.summary_window == 0 {
            return Err(CoreError::Config(
                "chart and summary windows must be at least 1 game".into(),
            ));
        }
        Ok(())
    }
}

fn parse_window(key: &str, value: &str) -> Result<usize, CoreError> {
    value
        .parse()
        .map_err(|e| CoreError::Config(format!("{key}='{value}' is not a game count: {e}")))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, CoreError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(CoreError::Config(format!("{key}='{value}' is not a boolean"))),
    }
}
