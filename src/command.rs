use crate::calendar::{WeekParity, WeekdayCode};

/// A validated inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Day {
        day: WeekdayCode,
        parity: WeekParity,
        group: String,
    },
    All {
        group: String,
    },
    Tomorrow {
        group: String,
    },
    Near {
        group: String,
    },
    Help,
}

/// Commands that take arguments, for picking the right usage text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Day,
    All,
    Tomorrow,
    Near,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty message")]
    Empty,

    #[error("unknown command {0:?}")]
    Unknown(String),

    #[error("wrong number of arguments for {0:?}")]
    Usage(CommandKind),

    #[error("invalid day {0:?}")]
    InvalidDay(String),

    #[error("invalid week {0:?}")]
    InvalidWeek(String),
}

impl Command {
    /// Parses a chat message such as `/day mon ne 3352` or `near@etu_bot 3352`.
    ///
    /// # Errors
    /// Returns the [`CommandError`] whose text tells the user how to fix the message.
    pub fn parse(text: &str) -> Result<Self, CommandError> {
        let mut tokens = text.split_whitespace();
        let first = tokens.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = tokens.collect();

        // Telegram may send `/cmd@botname arg1 ...`
        let name = first
            .trim_start_matches('/')
            .split('@')
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match name.as_str() {
            "day" => parse_day(&args),
            "all" => single_group(&args, CommandKind::All).map(|group| Self::All { group }),
            "tom" => {
                single_group(&args, CommandKind::Tomorrow).map(|group| Self::Tomorrow { group })
            }
            "near" => single_group(&args, CommandKind::Near).map(|group| Self::Near { group }),
            "help" | "start" => Ok(Self::Help),
            _ => Err(CommandError::Unknown(first.to_owned())),
        }
    }
}

fn parse_day(args: &[&str]) -> Result<Command, CommandError> {
    let &[day, week, group] = args else {
        return Err(CommandError::Usage(CommandKind::Day));
    };
    let day: WeekdayCode = day
        .parse()
        .map_err(|_| CommandError::InvalidDay(day.to_owned()))?;
    let parity =
        WeekParity::from_token(week).ok_or_else(|| CommandError::InvalidWeek(week.to_owned()))?;
    Ok(Command::Day {
        day,
        parity,
        group: group.to_owned(),
    })
}

fn single_group(args: &[&str], kind: CommandKind) -> Result<String, CommandError> {
    match args {
        [group] => Ok((*group).to_owned()),
        _ => Err(CommandError::Usage(kind)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_command() {
        assert_eq!(
            Command::parse("/day MON ne 3352"),
            Ok(Command::Day {
                day: WeekdayCode::Mon,
                parity: WeekParity::Odd,
                group: "3352".to_owned(),
            })
        );
        assert_eq!(
            Command::parse("day sat E 3352"),
            Ok(Command::Day {
                day: WeekdayCode::Sat,
                parity: WeekParity::Even,
                group: "3352".to_owned(),
            })
        );
    }

    #[test]
    fn parses_group_commands() {
        let group = || "3352".to_owned();
        assert_eq!(Command::parse("/all 3352"), Ok(Command::All { group: group() }));
        assert_eq!(
            Command::parse("/tom@etu_schedule_bot   3352 "),
            Ok(Command::Tomorrow { group: group() })
        );
        assert_eq!(Command::parse("NEAR 3352"), Ok(Command::Near { group: group() }));
        assert_eq!(Command::parse("/help"), Ok(Command::Help));
        assert_eq!(Command::parse("/start"), Ok(Command::Help));
        assert_eq!(Command::parse("/help me please"), Ok(Command::Help));
    }

    #[test]
    fn wrong_argument_counts_are_usage_errors() {
        assert_eq!(
            Command::parse("/day mon ne"),
            Err(CommandError::Usage(CommandKind::Day))
        );
        assert_eq!(
            Command::parse("/day mon ne 3352 extra"),
            Err(CommandError::Usage(CommandKind::Day))
        );
        assert_eq!(
            Command::parse("/all"),
            Err(CommandError::Usage(CommandKind::All))
        );
        assert_eq!(
            Command::parse("/tom 3352 3353"),
            Err(CommandError::Usage(CommandKind::Tomorrow))
        );
        assert_eq!(
            Command::parse("/near"),
            Err(CommandError::Usage(CommandKind::Near))
        );
    }

    #[test]
    fn bad_tokens() {
        assert_eq!(
            Command::parse("/day monday ne 3352"),
            Err(CommandError::InvalidDay("monday".to_owned()))
        );
        assert_eq!(
            Command::parse("/day mon odd 3352"),
            Err(CommandError::InvalidWeek("odd".to_owned()))
        );
    }

    #[test]
    fn unknown_and_empty() {
        assert_eq!(Command::parse("   "), Err(CommandError::Empty));
        assert_eq!(
            Command::parse("/week 3352"),
            Err(CommandError::Unknown("/week".to_owned()))
        );
        assert_eq!(
            Command::parse("/dayx mon ne 3352"),
            Err(CommandError::Unknown("/dayx".to_owned()))
        );
    }
}
