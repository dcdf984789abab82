//! Picks the lessons that answer a request out of the [`GroupSchedule`] of a
//! fetched document. `None` stands for a group the document does not have.
//!
//! Lessons are always taken in document order. The API returns them sorted
//! by start time and nothing here re-sorts them, so an unordered day is
//! scanned as-is.

use chrono::{NaiveDate, NaiveTime};

use crate::calendar::{WeekParity, WeekdayCode};
use crate::etu::schedule::{GroupSchedule, Lesson};

/// Number of schedule days in a week, Monday to Saturday.
pub const SCHEDULE_DAY_COUNT: usize = 6;

/// Result of looking up one weekday of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayLookup<'a> {
    GroupNotFound,
    NoScheduleForDay,
    Lessons(&'a [Lesson]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayOutcome<'a> {
    GroupNotFound,
    /// The document has no entry for the day (or the day is Sunday).
    NoScheduleForDay,
    /// The day exists but nothing takes place in the requested week.
    EmptyWeek,
    Lessons(Vec<&'a Lesson>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekDay<'a> {
    NoData,
    NoLessons,
    Lessons(&'a [Lesson]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekOutcome<'a> {
    GroupNotFound,
    /// The group is known but has no day entries at all.
    NoSchedule,
    /// Indexed by day, Monday first.
    Days([WeekDay<'a>; SCHEDULE_DAY_COUNT]),
}

/// Which day a nearest lesson was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NearDay {
    Today,
    Tomorrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NearOutcome<'a> {
    Found(&'a Lesson),
    GroupNotFound,
    NotFound,
}

/// Lessons of a day that take place in a week of the given parity, in document order.
pub fn extract_applicable(lessons: &[Lesson], parity: WeekParity) -> Vec<&Lesson> {
    lessons
        .iter()
        .filter(|lesson| lesson.week.applies_to(parity))
        .collect()
}

#[must_use]
pub fn lookup_day(schedule: Option<&GroupSchedule>, day: WeekdayCode) -> DayLookup<'_> {
    let Some(group_schedule) = schedule else {
        return DayLookup::GroupNotFound;
    };
    let Some(index) = day.day_index() else {
        return DayLookup::NoScheduleForDay;
    };
    match group_schedule.day(index) {
        Some(day_schedule) => DayLookup::Lessons(day_schedule.lessons()),
        None => DayLookup::NoScheduleForDay,
    }
}

/// Lessons of `day` in a week of the given parity.
#[must_use]
pub fn resolve_day(
    schedule: Option<&GroupSchedule>,
    day: WeekdayCode,
    parity: WeekParity,
) -> DayOutcome<'_> {
    match lookup_day(schedule, day) {
        DayLookup::GroupNotFound => DayOutcome::GroupNotFound,
        DayLookup::NoScheduleForDay => DayOutcome::NoScheduleForDay,
        DayLookup::Lessons(lessons) => {
            let applicable = extract_applicable(lessons, parity);
            if applicable.is_empty() {
                DayOutcome::EmptyWeek
            } else {
                DayOutcome::Lessons(applicable)
            }
        }
    }
}

/// Every day of a whole-week document.
///
/// No parity filter is applied: a `joinWeeks` document holds both weeks and
/// each lesson keeps its own week marker.
#[must_use]
pub fn resolve_week(schedule: Option<&GroupSchedule>) -> WeekOutcome<'_> {
    let Some(group_schedule) = schedule else {
        return WeekOutcome::GroupNotFound;
    };
    if group_schedule.has_no_days() {
        return WeekOutcome::NoSchedule;
    }

    let days = std::array::from_fn(|index| match group_schedule.day(index) {
        None => WeekDay::NoData,
        Some(day) if day.lessons().is_empty() => WeekDay::NoLessons,
        Some(day) => WeekDay::Lessons(day.lessons()),
    });
    WeekOutcome::Days(days)
}

/// First lesson of `today` still ahead of `now`.
///
/// Only lessons starting strictly after `now` qualify; one that is already
/// running is skipped.
#[must_use]
pub fn near_today(
    schedule: Option<&GroupSchedule>,
    today: NaiveDate,
    now: NaiveTime,
) -> NearOutcome<'_> {
    match lookup_day(schedule, WeekdayCode::of_date(today)) {
        DayLookup::GroupNotFound => NearOutcome::GroupNotFound,
        DayLookup::NoScheduleForDay => NearOutcome::NotFound,
        DayLookup::Lessons(lessons) => extract_applicable(lessons, WeekParity::of_date(today))
            .into_iter()
            .find(|lesson| lesson.start_time.time() > now)
            .map_or(NearOutcome::NotFound, NearOutcome::Found),
    }
}

/// First lesson of `tomorrow`, whatever its start time.
#[must_use]
pub fn near_tomorrow(schedule: Option<&GroupSchedule>, tomorrow: NaiveDate) -> NearOutcome<'_> {
    match lookup_day(schedule, WeekdayCode::of_date(tomorrow)) {
        DayLookup::GroupNotFound => NearOutcome::GroupNotFound,
        DayLookup::NoScheduleForDay => NearOutcome::NotFound,
        DayLookup::Lessons(lessons) => extract_applicable(lessons, WeekParity::of_date(tomorrow))
            .into_iter()
            .next()
            .map_or(NearOutcome::NotFound, NearOutcome::Found),
    }
}
