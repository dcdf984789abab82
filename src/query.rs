use chrono::{Datelike, NaiveDate};

use crate::calendar::{Season, WeekdayCode};

/// The two request shapes the schedule endpoint is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryMode {
    /// One weekday, parities kept apart (`joinWeeks=false`).
    SingleDay(WeekdayCode),
    /// All days, both parities merged (`joinWeeks=true`).
    WholeWeek,
}

/// Parameters of one schedule request.
///
/// The group number is passed through untouched; the server decides whether
/// it exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleQuery {
    mode: QueryMode,
    group: String,
    season: Season,
    year: i32,
}

impl ScheduleQuery {
    #[must_use]
    pub fn new(mode: QueryMode, group: impl Into<String>, season: Season, year: i32) -> Self {
        Self {
            mode,
            group: group.into(),
            season,
            year,
        }
    }

    /// Query for the academic window `today` falls in.
    #[must_use]
    pub fn for_date(mode: QueryMode, group: impl Into<String>, today: NaiveDate) -> Self {
        Self::new(mode, group, Season::of_date(today), today.year())
    }

    #[must_use]
    pub const fn week_day(&self) -> Option<WeekdayCode> {
        match self.mode {
            QueryMode::SingleDay(day) => Some(day),
            QueryMode::WholeWeek => None,
        }
    }

    #[must_use]
    pub const fn join_weeks(&self) -> bool {
        matches!(self.mode, QueryMode::WholeWeek)
    }

    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    #[must_use]
    pub const fn season(&self) -> Season {
        self.season
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Query string pairs in the order the endpoint documents them.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);
        if let Some(day) = self.week_day() {
            params.push(("weekDay", day.as_str().to_owned()));
        }
        params.push(("groupNumber", self.group.clone()));
        params.push(("joinWeeks", self.join_weeks().to_string()));
        params.push(("season", self.season.as_str().to_owned()));
        params.push(("year", self.year.to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_day_params() {
        let query = ScheduleQuery::for_date(
            QueryMode::SingleDay(WeekdayCode::Wed),
            "3352",
            date(2026, 10, 19),
        );
        assert_eq!(
            query.to_params(),
            vec![
                ("weekDay", "WED".to_owned()),
                ("groupNumber", "3352".to_owned()),
                ("joinWeeks", "false".to_owned()),
                ("season", "autumn".to_owned()),
                ("year", "2026".to_owned()),
            ]
        );
    }

    #[test]
    fn whole_week_params_have_no_weekday() {
        let query = ScheduleQuery::for_date(QueryMode::WholeWeek, "3352", date(2027, 3, 2));
        assert_eq!(query.week_day(), None);
        assert!(query.join_weeks());
        assert_eq!(
            query.to_params(),
            vec![
                ("groupNumber", "3352".to_owned()),
                ("joinWeeks", "true".to_owned()),
                ("season", "spring".to_owned()),
                ("year", "2027".to_owned()),
            ]
        );
    }

    #[test]
    fn group_is_passed_through_verbatim() {
        let query = ScheduleQuery::new(QueryMode::WholeWeek, "не-группа 42", Season::Spring, 2026);
        assert_eq!(query.group(), "не-группа 42");
        assert!(query.to_params().contains(&("groupNumber", "не-группа 42".to_owned())));
    }
}
