use serde::{Deserialize, Serialize};

/// A numeric field as it arrives from an upstream feed.
///
/// TheSportsDB sends scores as strings, but `null` and bare JSON numbers
/// show up too depending on the endpoint and league.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreField {
    Text(String),
    Number(f64),
}

impl ScoreField {
    /// Lenient numeric value of this field (see [`parse_lenient`]).
    pub fn value(&self) -> f64 {
        match self {
            ScoreField::Text(s) => parse_lenient(s),
            ScoreField::Number(n) if n.is_finite() => *n,
            ScoreField::Number(_) => 0.0,
        }
    }
}

impl From<&str> for ScoreField {
    fn from(s: &str) -> Self {
        ScoreField::Text(s.to_string())
    }
}

/// Best-effort numeric parse.
///
/// Every character other than an ASCII digit, `-` or `.` is dropped before
/// parsing, so `"112 pts"` reads as `112`. Anything that still fails to
/// parse, or parses to a non-finite value, is `0.0`.
pub fn parse_lenient(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Coerce an optional raw score into a non-negative point total.
///
/// Negative and fractional readings are clamped/truncated: a score is a
/// count of points.
pub fn coerce_score(raw: Option<&ScoreField>) -> u32 {
    let value = raw.map(ScoreField::value).unwrap_or(0.0);
    if value <= 0.0 {
        0
    } else if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value.trunc() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_noise_before_parsing() {
        assert_eq!(parse_lenient("112 pts"), 112.0);
        assert_eq!(parse_lenient(" 45.5% "), 45.5);
        assert_eq!(parse_lenient("-3"), -3.0);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(parse_lenient(""), 0.0);
        assert_eq!(parse_lenient("n/a"), 0.0);
        assert_eq!(parse_lenient("1-2"), 0.0);
        assert_eq!(parse_lenient("--"), 0.0);
    }

    #[test]
    fn score_coercion_never_goes_negative() {
        assert_eq!(coerce_score(Some(&"-7".into())), 0);
        assert_eq!(coerce_score(Some(&ScoreField::Number(101.9))), 101);
        assert_eq!(coerce_score(Some(&ScoreField::Number(f64::NAN))), 0);
        assert_eq!(coerce_score(None), 0);
    }
}
