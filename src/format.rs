//! Every text the bot replies with.

use std::fmt::Write;

use crate::calendar::{LessonWeek, WeekdayCode, day_display_name};
use crate::command::{CommandError, CommandKind};
use crate::etu::schedule::Lesson;
use crate::resolve::{DayOutcome, NearDay, WeekDay, WeekOutcome};

pub const GENERIC_FAILURE: &str = "Произошла ошибка. Попробуйте позже.";
pub const NO_UPCOMING_LESSON: &str = "Ближайших пар не найдено.";

const UNKNOWN_COMMAND: &str = "Неизвестная команда. Используйте /help для получения списка команд.";
const INVALID_WEEK: &str =
    "Некорректное значение недели. Используйте 'ne' (нечётная) или 'e' (чётная).";
const INVALID_DAY: &str = "Некорректный день недели. Используйте: mon, tue, wed, thu, fri, sat.";

const HELP: &str = "\
Доступные команды:

/all <группа> - Узнать расписание на всю неделю.
/tom <группа> - Узнать расписание на завтра.
/near <группа> - Узнать ближайшую пару.
/day <день> <неделя> <группа> - Узнать расписание на день.

день - mon | tue | wed | thu | fri | sat
неделя - ne (нечётная) | e (чётная)
группа - номер группы (например, 3352)
Пример: /day mon ne 3352

/help - Вывод списка доступных команд
";

#[must_use]
pub const fn help() -> &'static str {
    HELP
}

#[must_use]
pub fn command_error(err: &CommandError) -> String {
    match err {
        CommandError::Empty | CommandError::Unknown(_) => UNKNOWN_COMMAND.to_owned(),
        CommandError::InvalidDay(_) => INVALID_DAY.to_owned(),
        CommandError::InvalidWeek(_) => INVALID_WEEK.to_owned(),
        CommandError::Usage(kind) => usage(*kind).to_owned(),
    }
}

const fn usage(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::Day => {
            "Неверный формат команды. Используйте: /day <день> <неделя> <группа>.\n\
             Пример: /day mon ne 3352\n"
        }
        CommandKind::All => "Неверный формат команды. Используйте: /all <группа>.",
        CommandKind::Tomorrow => "Неверный формат команды. Используйте: /tom <группа>.",
        CommandKind::Near => "Неверный формат команды. Используйте: /near <группа>.",
    }
}

#[must_use]
pub fn group_not_found(group: &str) -> String {
    format!("Не удалось найти расписание для группы {group}")
}

/// `09:50 - 11:20: Name (Teacher)` followed by the room line. Times are
/// shown exactly as the API sent them.
#[must_use]
pub fn lesson_block(lesson: &Lesson) -> String {
    let mut out = String::new();
    push_lesson(&mut out, lesson, false);
    out
}

fn push_lesson(out: &mut String, lesson: &Lesson, with_week: bool) {
    let _ = write!(
        out,
        "{} - {}: {} ({})",
        lesson.start_time,
        lesson.end_time,
        lesson.name,
        lesson.teacher,
    );
    if with_week {
        match lesson.week {
            LessonWeek::Every => {}
            LessonWeek::Odd => out.push_str(" [нечётная неделя]"),
            LessonWeek::Even => out.push_str(" [чётная неделя]"),
        }
    }
    let _ = writeln!(out, "\nАудитория: {}", lesson.room);
}

fn push_lessons<'a>(
    out: &mut String,
    lessons: impl IntoIterator<Item = &'a Lesson>,
    with_week: bool,
) {
    for lesson in lessons {
        push_lesson(out, lesson, with_week);
        out.push('\n');
    }
}

fn day_name(day: WeekdayCode) -> &'static str {
    day.day_index().map_or(day_display_name(usize::MAX), day_display_name)
}

/// Reply to `/day`.
#[must_use]
pub fn day(outcome: &DayOutcome<'_>, day: WeekdayCode, group: &str) -> String {
    let header = format!("Расписание на {}:\n", day_name(day));
    match outcome {
        DayOutcome::GroupNotFound => group_not_found(group),
        DayOutcome::NoScheduleForDay => "Нет занятий на этот день.".to_owned(),
        DayOutcome::EmptyWeek => header + "Занятий на этой неделе нет.\n",
        DayOutcome::Lessons(lessons) => {
            let mut out = header;
            push_lessons(&mut out, lessons.iter().copied(), false);
            out
        }
    }
}

/// Reply to `/tom`.
#[must_use]
pub fn tomorrow(outcome: &DayOutcome<'_>, day: WeekdayCode, group: &str) -> String {
    let header = format!("Расписание на завтра ({}):\n", day_name(day));
    match outcome {
        DayOutcome::GroupNotFound => group_not_found(group),
        DayOutcome::NoScheduleForDay => "Завтра занятий нет.".to_owned(),
        DayOutcome::EmptyWeek => header + "Занятий на завтрашней неделе нет.\n",
        DayOutcome::Lessons(lessons) => {
            let mut out = header;
            push_lessons(&mut out, lessons.iter().copied(), false);
            out
        }
    }
}

/// Reply to `/all`. Lessons that only run in one week carry a week marker.
#[must_use]
pub fn week(outcome: &WeekOutcome<'_>, group: &str) -> String {
    let days = match outcome {
        WeekOutcome::GroupNotFound => return group_not_found(group),
        WeekOutcome::NoSchedule => return format!("Нет расписания для группы {group}"),
        WeekOutcome::Days(days) => days,
    };

    let mut out = format!("Расписание на всю неделю для группы {group}:\n\n");
    for (index, day) in days.iter().enumerate() {
        let name = day_display_name(index);
        match day {
            WeekDay::NoData => {
                let _ = write!(out, "{name}: Нет данных о расписании\n\n");
            }
            WeekDay::NoLessons => {
                let _ = write!(out, "{name}:\nНет занятий\n\n");
            }
            WeekDay::Lessons(lessons) => {
                let _ = writeln!(out, "{name}:");
                push_lessons(&mut out, lessons.iter(), true);
            }
        }
    }
    out
}

/// Reply to `/near` when a lesson was found.
#[must_use]
pub fn near(lesson: &Lesson, when: NearDay) -> String {
    let header = match when {
        NearDay::Today => "Ближайшая пара сегодня:\n",
        NearDay::Tomorrow => "Ближайшая пара завтра:\n",
    };
    let block = lesson_block(lesson);
    format!("{header}{}", block.trim_end_matches('\n'))
}
