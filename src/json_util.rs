use anyhow::anyhow;
use chrono::NaiveTime;
use serde::{Deserialize, Deserializer};

/// Deserializes a String, using an empty String if the field is null
pub fn parse_string<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

/// Parses a time of day in the hh:mm format (seconds are tolerated)
pub fn parse_time_of_day(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M").or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
}

/// Wraps a JSON error with the part of the body around the failing column.
pub fn improve_json_error(err: &serde_json::Error, json_string: &str) -> anyhow::Error {
    if err.line() != 1 {
        // Pretty-printed bodies already give a useful line number
        return anyhow!("{err}");
    }

    let col = err.column().min(json_string.len());
    let start = floor_char_boundary(json_string, col.saturating_sub(50));
    let end = floor_char_boundary(json_string, (col + 50).min(json_string.len()));
    let start_ell = if start == 0 { "" } else { "..." };
    let end_ell = if end == json_string.len() { "" } else { "..." };

    let snippet = &json_string[start..end];
    anyhow!("{err} | {start_ell}{snippet}{end_ell}")
}

/// Schedule bodies are full of Cyrillic, so byte offsets must be moved onto a char boundary.
fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "parse_string")]
        text: String,
    }

    #[test]
    fn null_and_missing_strings_are_empty() {
        let s: Sample = serde_json::from_str(r#"{"text": null}"#).unwrap();
        assert_eq!(s.text, "");
        let s: Sample = serde_json::from_str("{}").unwrap();
        assert_eq!(s.text, "");
    }

    #[test]
    fn times_with_and_without_seconds() {
        let time = parse_time_of_day("09:50").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(9, 50, 0).unwrap());
        let time = parse_time_of_day(" 13:40:00").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(13, 40, 0).unwrap());
    }

    #[test]
    fn bad_time_is_rejected() {
        assert!(parse_time_of_day("half past nine").is_err());
    }

    #[test]
    fn json_error_snippet_respects_utf8() {
        let body = format!(r#"{{"{}": [1, 2,, 3]}}"#, "Расписание".repeat(10));
        let err = serde_json::from_str::<serde_json::Value>(&body).unwrap_err();
        let improved = improve_json_error(&err, &body).to_string();
        assert!(improved.starts_with(&err.to_string()));
        assert!(improved.contains(" | ..."));
    }
}
