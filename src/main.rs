mod logging;

use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use clap::{ArgAction, Parser};
use etu_schedule_bot::{EtuClient, ScheduleBot, ScheduleSource, etu::DEFAULT_BASE_URL, format};
use reqwest::Url;

/// ETU class schedule bot
///
/// Answers one command given on the command line, or one command per line
/// read from stdin. Replies go to stdout, logs to stderr.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Base URL of the mobile schedule API
    #[arg(short, long, default_value = DEFAULT_BASE_URL)]
    api_url: Url,

    /// The timezone in which "today", "tomorrow" and "now" are evaluated
    #[arg(short = 'z', long, default_value_t = chrono_tz::Europe::Moscow)]
    timezone: Tz,

    /// HTTP request timeout in seconds (0 disables the timeout)
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    /// Log more (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Log less (repeatable)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,

    /// A single command to answer, e.g. `near 3352`
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

impl Args {
    fn verbosity(&self) -> i8 {
        let verbose = i8::try_from(self.verbose).unwrap_or(i8::MAX);
        let quiet = i8::try_from(self.quiet).unwrap_or(i8::MAX);
        verbose.saturating_sub(quiet)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbosity());

    let timeout = (args.timeout > 0).then(|| Duration::from_secs(args.timeout));
    let client = EtuClient::new(args.api_url, timeout)
        .context("Could not create schedule API client")?;
    log::info!(
        "Using schedule API at {} (timezone {})",
        client.base_url(),
        args.timezone
    );
    let bot = ScheduleBot::new(client);

    if !args.command.is_empty() {
        let text = args.command.join(" ");
        println!("{}", answer(&bot, &text, args.timezone).trim_end());
        return Ok(());
    }

    log::info!("Reading commands from stdin, one per line");
    let mut stdout = io::stdout().lock();
    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read command from stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        let reply = answer(&bot, &line, args.timezone);
        writeln!(stdout, "{}\n", reply.trim_end()).context("Could not write reply")?;
        stdout.flush().context("Could not flush stdout")?;
    }

    log::info!("Input closed; shutting down.");
    Ok(())
}

/// One request never takes the process down, not even by panicking.
fn answer<S: ScheduleSource>(bot: &ScheduleBot<S>, text: &str, timezone: Tz) -> String {
    let now = local_now(Utc::now(), timezone);
    panic::catch_unwind(AssertUnwindSafe(|| bot.handle(text, now))).unwrap_or_else(|_| {
        log::error!("Panicked while handling {text:?}");
        format::GENERIC_FAILURE.to_owned()
    })
}

fn local_now(now: DateTime<Utc>, timezone: Tz) -> NaiveDateTime {
    now.with_timezone(&timezone).naive_local()
}
