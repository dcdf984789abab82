use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate, Weekday};

/// Three-letter weekday code as understood by the schedule API (`weekDay=MON`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekdayCode {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    /// Representable, but there are never classes on Sunday.
    Sun,
}

impl WeekdayCode {
    #[must_use]
    pub fn of_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Mon => Self::Mon,
            Weekday::Tue => Self::Tue,
            Weekday::Wed => Self::Wed,
            Weekday::Thu => Self::Thu,
            Weekday::Fri => Self::Fri,
            Weekday::Sat => Self::Sat,
            Weekday::Sun => Self::Sun,
        }
    }

    /// Index of this day inside a schedule document (`MON` = 0 ... `SAT` = 5).
    ///
    /// Sunday has no index; callers treat `None` as "nothing to schedule".
    #[must_use]
    pub const fn day_index(self) -> Option<usize> {
        match self {
            Self::Mon => Some(0),
            Self::Tue => Some(1),
            Self::Wed => Some(2),
            Self::Thu => Some(3),
            Self::Fri => Some(4),
            Self::Sat => Some(5),
            Self::Sun => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mon => "MON",
            Self::Tue => "TUE",
            Self::Wed => "WED",
            Self::Thu => "THU",
            Self::Fri => "FRI",
            Self::Sat => "SAT",
            Self::Sun => "SUN",
        }
    }
}

impl fmt::Display for WeekdayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWeekdayError(pub String);

impl FromStr for WeekdayCode {
    type Err = ParseWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = match s.to_ascii_uppercase().as_str() {
            "MON" => Self::Mon,
            "TUE" => Self::Tue,
            "WED" => Self::Wed,
            "THU" => Self::Thu,
            "FRI" => Self::Fri,
            "SAT" => Self::Sat,
            "SUN" => Self::Sun,
            _ => return Err(ParseWeekdayError(s.to_owned())),
        };
        Ok(code)
    }
}

/// Display name of a schedule day index.
///
/// Unlike [`WeekdayCode::day_index`], an out-of-range index is not an error
/// here: it renders as a placeholder.
#[must_use]
pub const fn day_display_name(index: usize) -> &'static str {
    match index {
        0 => "Понедельник",
        1 => "Вторник",
        2 => "Среда",
        3 => "Четверг",
        4 => "Пятница",
        5 => "Суббота",
        _ => "Неизвестный день",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Autumn,
    Spring,
}

impl Season {
    /// September through December is the autumn term, everything else spring.
    #[must_use]
    pub fn of_date(date: NaiveDate) -> Self {
        let september = Month::September.number_from_month();
        let december = Month::December.number_from_month();
        if (september..=december).contains(&date.month()) {
            Self::Autumn
        } else {
            Self::Spring
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Autumn => "autumn",
            Self::Spring => "spring",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekParity {
    Odd,
    Even,
}

impl WeekParity {
    /// Parity of the week containing `date`.
    ///
    /// This is `(day_of_year / 7) % 2` and not an ISO week number, so it can
    /// disagree with the parity the university publishes for the same date.
    #[must_use]
    pub fn of_date(date: NaiveDate) -> Self {
        if (date.ordinal() / 7) % 2 == 0 {
            Self::Even
        } else {
            Self::Odd
        }
    }

    /// Parses the user-facing week token: `ne` (нечётная) or `e` (чётная).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "ne" => Some(Self::Odd),
            "e" => Some(Self::Even),
            _ => None,
        }
    }
}

/// Which weeks a lesson takes place in, as encoded by the `week` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonWeek {
    Every,
    Odd,
    Even,
}

impl LessonWeek {
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Every),
            1 => Some(Self::Odd),
            2 => Some(Self::Even),
            _ => None,
        }
    }

    #[must_use]
    pub const fn applies_to(self, parity: WeekParity) -> bool {
        matches!(
            (self, parity),
            (Self::Every, _) | (Self::Odd, WeekParity::Odd) | (Self::Even, WeekParity::Even)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_codes_follow_the_calendar() {
        // 2026-10-19 is a Monday
        let monday = date(2026, 10, 19);
        let codes: Vec<_> = (0..7)
            .map(|offset| WeekdayCode::of_date(monday + chrono::Days::new(offset)))
            .collect();
        assert_eq!(
            codes,
            [
                WeekdayCode::Mon,
                WeekdayCode::Tue,
                WeekdayCode::Wed,
                WeekdayCode::Thu,
                WeekdayCode::Fri,
                WeekdayCode::Sat,
                WeekdayCode::Sun,
            ]
        );
    }

    #[test]
    fn day_index_matches_days_from_monday() {
        let monday = date(2026, 10, 19);
        for offset in 0..7 {
            let day = monday + chrono::Days::new(offset);
            let index = WeekdayCode::of_date(day).day_index();
            if day.weekday() == Weekday::Sun {
                assert_eq!(index, None);
            } else {
                let expected = day.weekday().num_days_from_monday() as usize;
                assert_eq!(index, Some(expected));
            }
        }
    }

    #[test]
    fn weekday_tokens_are_case_insensitive() {
        assert_eq!("mon".parse::<WeekdayCode>(), Ok(WeekdayCode::Mon));
        assert_eq!("Sat".parse::<WeekdayCode>(), Ok(WeekdayCode::Sat));
        assert_eq!("SUN".parse::<WeekdayCode>(), Ok(WeekdayCode::Sun));
        assert_eq!(
            "monday".parse::<WeekdayCode>(),
            Err(ParseWeekdayError("monday".to_owned()))
        );
    }

    #[test]
    fn display_name_falls_back_to_placeholder() {
        assert_eq!(day_display_name(0), "Понедельник");
        assert_eq!(day_display_name(5), "Суббота");
        assert_eq!(day_display_name(6), "Неизвестный день");
        assert_eq!(day_display_name(usize::MAX), "Неизвестный день");
    }

    #[test]
    fn season_boundaries() {
        assert_eq!(Season::of_date(date(2026, 10, 1)), Season::Autumn);
        assert_eq!(Season::of_date(date(2026, 10, 31)), Season::Autumn);
        assert_eq!(Season::of_date(date(2026, 9, 1)), Season::Autumn);
        assert_eq!(Season::of_date(date(2026, 12, 31)), Season::Autumn);
        assert_eq!(Season::of_date(date(2026, 8, 31)), Season::Spring);
        assert_eq!(Season::of_date(date(2026, 3, 15)), Season::Spring);
        assert_eq!(Season::of_date(date(2027, 1, 1)), Season::Spring);
    }

    #[test]
    fn week_parity_uses_day_of_year_over_seven() {
        // day-of-year 6 -> 0 -> even
        assert_eq!(WeekParity::of_date(date(2026, 1, 6)), WeekParity::Even);
        // day-of-year 7 -> 1 -> odd
        assert_eq!(WeekParity::of_date(date(2026, 1, 7)), WeekParity::Odd);
        // day-of-year 14 -> 2 -> even
        assert_eq!(WeekParity::of_date(date(2026, 1, 14)), WeekParity::Even);
        // day-of-year 292 -> 41 -> odd
        assert_eq!(WeekParity::of_date(date(2026, 10, 19)), WeekParity::Odd);
    }

    #[test]
    fn week_tokens() {
        assert_eq!(WeekParity::from_token("ne"), Some(WeekParity::Odd));
        assert_eq!(WeekParity::from_token("E"), Some(WeekParity::Even));
        assert_eq!(WeekParity::from_token("odd"), None);
        assert_eq!(WeekParity::from_token(""), None);
    }

    #[test]
    fn every_week_lessons_apply_to_both_parities() {
        assert!(LessonWeek::Every.applies_to(WeekParity::Odd));
        assert!(LessonWeek::Every.applies_to(WeekParity::Even));
    }

    #[test]
    fn parity_lessons_apply_only_to_their_parity() {
        assert!(LessonWeek::Odd.applies_to(WeekParity::Odd));
        assert!(!LessonWeek::Odd.applies_to(WeekParity::Even));
        assert!(LessonWeek::Even.applies_to(WeekParity::Even));
        assert!(!LessonWeek::Even.applies_to(WeekParity::Odd));
    }

    #[test]
    fn lesson_week_codes() {
        assert_eq!(LessonWeek::from_code(0), Some(LessonWeek::Every));
        assert_eq!(LessonWeek::from_code(1), Some(LessonWeek::Odd));
        assert_eq!(LessonWeek::from_code(2), Some(LessonWeek::Even));
        assert_eq!(LessonWeek::from_code(3), None);
        assert_eq!(LessonWeek::from_code(-1), None);
    }
}
