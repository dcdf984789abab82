use anyhow::{Context, Result};
use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::calendar::{WeekParity, WeekdayCode};
use crate::command::Command;
use crate::etu::ScheduleSource;
use crate::etu::schedule::ScheduleDocument;
use crate::format;
use crate::query::{QueryMode, ScheduleQuery};
use crate::resolve::{self, DayOutcome, NearDay, NearOutcome};

/// Turns chat messages into replies. Holds no state besides its source, so
/// one instance can serve any number of chats.
#[derive(Debug, Clone)]
pub struct ScheduleBot<S> {
    source: S,
}

impl<S: ScheduleSource> ScheduleBot<S> {
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Reply to one chat message, `now` being the local time of the university.
    ///
    /// Never fails: bad input gets a corrective reply and failures get a
    /// generic one (the cause is logged).
    #[must_use]
    pub fn handle(&self, text: &str, now: NaiveDateTime) -> String {
        let command = match Command::parse(text) {
            Ok(command) => command,
            Err(err) => {
                log::debug!("Rejected message {text:?}: {err}");
                return format::command_error(&err);
            }
        };

        log::debug!("Handling {command:?} at {now}");
        match self.execute(&command, now) {
            Ok(reply) => reply,
            Err(err) => {
                log::error!("Could not handle {command:?}: {err:?}");
                format::GENERIC_FAILURE.to_owned()
            }
        }
    }

    fn execute(&self, command: &Command, now: NaiveDateTime) -> Result<String> {
        let today = now.date();
        match command {
            Command::Day { day, parity, group } => self.day(*day, *parity, group, today),
            Command::All { group } => self.all(group, today),
            Command::Tomorrow { group } => self.tomorrow(group, today),
            Command::Near { group } => self.near(group, now),
            Command::Help => Ok(format::help().to_owned()),
        }
    }

    /// Season and year always follow `today`, also when fetching tomorrow.
    fn fetch_day(
        &self,
        day: WeekdayCode,
        group: &str,
        today: NaiveDate,
    ) -> Result<ScheduleDocument> {
        let query = ScheduleQuery::for_date(QueryMode::SingleDay(day), group, today);
        self.source.fetch(&query)
    }

    fn day(
        &self,
        day: WeekdayCode,
        parity: WeekParity,
        group: &str,
        today: NaiveDate,
    ) -> Result<String> {
        if day.day_index().is_none() {
            return Ok(format::day(&DayOutcome::NoScheduleForDay, day, group));
        }
        let doc = self.fetch_day(day, group, today)?;
        let outcome = resolve::resolve_day(doc.group(group)?, day, parity);
        Ok(format::day(&outcome, day, group))
    }

    fn tomorrow(&self, group: &str, today: NaiveDate) -> Result<String> {
        let tomorrow = next_day(today)?;
        let day = WeekdayCode::of_date(tomorrow);
        if day.day_index().is_none() {
            return Ok(format::tomorrow(&DayOutcome::NoScheduleForDay, day, group));
        }
        let doc = self.fetch_day(day, group, today)?;
        let outcome = resolve::resolve_day(doc.group(group)?, day, WeekParity::of_date(tomorrow));
        Ok(format::tomorrow(&outcome, day, group))
    }

    fn all(&self, group: &str, today: NaiveDate) -> Result<String> {
        let query = ScheduleQuery::for_date(QueryMode::WholeWeek, group, today);
        let doc = self.source.fetch(&query)?;
        let outcome = resolve::resolve_week(doc.group(group)?);
        Ok(format::week(&outcome, group))
    }

    fn near(&self, group: &str, now: NaiveDateTime) -> Result<String> {
        let today = now.date();
        let today_code = WeekdayCode::of_date(today);

        if today_code.day_index().is_some() {
            let doc = self.fetch_day(today_code, group, today)?;
            match resolve::near_today(doc.group(group)?, today, now.time()) {
                NearOutcome::Found(lesson) => return Ok(format::near(lesson, NearDay::Today)),
                NearOutcome::GroupNotFound => return Ok(format::group_not_found(group)),
                NearOutcome::NotFound => {}
            }
        }

        let tomorrow = next_day(today)?;
        let tomorrow_code = WeekdayCode::of_date(tomorrow);
        if tomorrow_code.day_index().is_none() {
            return Ok(format::NO_UPCOMING_LESSON.to_owned());
        }
        let doc = self.fetch_day(tomorrow_code, group, today)?;
        let reply = match resolve::near_tomorrow(doc.group(group)?, tomorrow) {
            NearOutcome::Found(lesson) => format::near(lesson, NearDay::Tomorrow),
            NearOutcome::GroupNotFound => format::group_not_found(group),
            NearOutcome::NotFound => format::NO_UPCOMING_LESSON.to_owned(),
        };
        Ok(reply)
    }
}

fn next_day(date: NaiveDate) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(1))
        .with_context(|| format!("No day after {date}"))
}
