use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// A roster entry as TheSportsDB returns it from `lookup_all_players.php`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "idPlayer", default, deserialize_with = "null_as_empty")]
    pub id: String,

    #[serde(rename = "strPlayer", default, deserialize_with = "null_as_empty")]
    pub name: String,

    #[serde(rename = "strPosition", default)]
    pub position: Option<String>,

    #[serde(rename = "strHeight", default)]
    pub height: Option<String>,

    #[serde(rename = "strWeight", default)]
    pub weight: Option<String>,

    /// Birth date, usually `YYYY-MM-DD`
    #[serde(rename = "dateBorn", default)]
    pub date_born: Option<String>,

    /// Portrait/thumbnail URL
    #[serde(rename = "strThumb", default)]
    pub thumb: Option<String>,

    #[serde(rename = "strDescriptionEN", default)]
    pub description: Option<String>,

    /// Jersey number as sent upstream (may contain `#` or whitespace)
    #[serde(rename = "strNumber", default)]
    pub number: Option<String>,

    #[serde(rename = "strNationality", default)]
    pub nationality: Option<String>,
}

/// Label used for players without a listed position.
pub const UNKNOWN_POSITION: &str = "Unknown";

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_date_born(mut self, date_born: impl Into<String>) -> Self {
        self.date_born = Some(date_born.into());
        self
    }

    /// The listed position, or `"Unknown"` when missing or blank.
    pub fn position_or_unknown(&self) -> &str {
        match self.position.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p,
            _ => UNKNOWN_POSITION,
        }
    }

    /// Jersey number with every non-digit stripped, e.g. `"#30"` → `30`.
    pub fn jersey_number(&self) -> Option<u32> {
        let digits: String = self
            .number
            .as_deref()
            .unwrap_or("")
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    }

    /// Age in whole years on `on`. `None` when the birth date does not parse
    /// or lies after `on`.
    pub fn age_on(&self, on: NaiveDate) -> Option<u32> {
        let born = NaiveDate::parse_from_str(self.date_born.as_deref()?.trim(), "%Y-%m-%d").ok()?;
        let mut years = on.year() - born.year();
        if (on.month(), on.day()) < (born.month(), born.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }
}

/// TheSportsDB sends `null` for blank text fields.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
