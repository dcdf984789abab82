use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveTime;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::calendar::LessonWeek;
use crate::etu::EtuClient;
use crate::json_util::{parse_string, parse_time_of_day};
use crate::query::ScheduleQuery;

/// One response of the schedule endpoint, keyed by group number.
///
/// Groups are decoded one by one: a group whose value is not an object is
/// absent, and a group that fails to decode only poisons lookups of itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleDocument {
    groups: BTreeMap<String, Result<GroupSchedule, String>>,
}

impl ScheduleDocument {
    /// # Errors
    /// If the entry of this group exists but could not be decoded.
    pub fn group(&self, group_number: &str) -> Result<Option<&GroupSchedule>> {
        match self.groups.get(group_number) {
            None => Ok(None),
            Some(Ok(group)) => Ok(Some(group)),
            Some(Err(err)) => Err(anyhow!("Malformed schedule of group {group_number}: {err}")),
        }
    }
}

impl<'de> Deserialize<'de> for ScheduleDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let groups = raw
            .into_iter()
            .filter(|(_, value)| value.is_object())
            .map(|(number, value)| {
                let group = GroupSchedule::deserialize(value).map_err(|e| e.to_string());
                (number, group)
            })
            .collect();
        Ok(Self { groups })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GroupSchedule {
    /// Keyed by day index as a string, `"0"` (Monday) to `"5"` (Saturday).
    /// A key whose value is not an object maps to `None`.
    #[serde(default, deserialize_with = "parse_days")]
    days: Option<BTreeMap<String, Option<DaySchedule>>>,
}

impl GroupSchedule {
    #[must_use]
    pub fn day(&self, day_index: usize) -> Option<&DaySchedule> {
        self.days.as_ref()?.get(&day_index.to_string())?.as_ref()
    }

    /// True when `days` is missing, not an object, or has no keys at all.
    #[must_use]
    pub fn has_no_days(&self) -> bool {
        self.days.as_ref().is_none_or(BTreeMap::is_empty)
    }
}

fn parse_days<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, Option<DaySchedule>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Object(raw) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    raw.into_iter()
        .map(|(key, value)| {
            let day = if value.is_object() {
                Some(DaySchedule::deserialize(value)?)
            } else {
                None
            };
            Ok::<_, serde_json::Error>((key, day))
        })
        .collect::<Result<BTreeMap<_, _>, _>>()
        .map(Some)
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DaySchedule {
    #[serde(default, deserialize_with = "parse_lessons")]
    lessons: Option<Vec<Lesson>>,
}

impl DaySchedule {
    /// Lessons in document order. A missing list reads as empty.
    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        self.lessons.as_deref().unwrap_or_default()
    }
}

/// Anything but an array counts as a missing list.
fn parse_lessons<'de, D>(deserializer: D) -> Result<Option<Vec<Lesson>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Array(_) => Vec::<Lesson>::deserialize(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Lesson {
    pub start_time: LessonTime,

    pub end_time: LessonTime,

    #[serde(default, deserialize_with = "parse_string")]
    pub name: String,

    #[serde(default, deserialize_with = "parse_string")]
    pub teacher: String,

    #[serde(default, deserialize_with = "parse_string")]
    pub room: String,

    #[serde(deserialize_with = "parse_week")]
    pub week: LessonWeek,
}

/// A time of day as sent by the API. Displays as the original text,
/// compares as a [`NaiveTime`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct LessonTime {
    text: String,
    time: NaiveTime,
}

impl LessonTime {
    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl TryFrom<String> for LessonTime {
    type Error = String;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        let time = parse_time_of_day(&text)
            .map_err(|e| format!("invalid time of day {text:?}: {e}"))?;
        Ok(Self { text, time })
    }
}

impl fmt::Display for LessonTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// The API sends `week` as a number, but older datasets quote it.
fn parse_week<'de, D>(deserializer: D) -> Result<LessonWeek, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawWeek {
        Number(i64),
        Text(String),
    }

    let code = match RawWeek::deserialize(deserializer)? {
        RawWeek::Number(n) => n,
        RawWeek::Text(s) => s.trim().parse::<i64>().map_err(|_| {
            <D::Error as serde::de::Error>::custom(format!("week {s:?} is not a number"))
        })?,
    };
    LessonWeek::from_code(code)
        .ok_or_else(|| serde::de::Error::custom(format!("unsupported week code {code}")))
}

impl EtuClient {
    /// Fetch one schedule document from the API.
    ///
    /// # Errors
    /// There are lots of ways this function can fail:
    /// * Error sending HTTPS request
    /// * Response body is not valid UTF-8
    /// * Server responded with a non-success status code (not 2xx)
    /// * Json deserialization failed
    pub fn fetch_schedule(&self, query: &ScheduleQuery) -> Result<ScheduleDocument> {
        self.get_json("schedule", &query.to_params())
            .with_context(|| format!("Could not fetch schedule for group {}", query.group()))
    }
}
