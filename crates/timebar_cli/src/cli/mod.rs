use clap::Parser;
use timebar_core::error::TimerError;

#[derive(Parser, Debug)]
#[command(
    name = "timebar",
    version,
    about = "Countdown timers and alarms for your status bar",
    long_about = None
)]
pub struct Cli {
    /// Label for the timer or alarm being scheduled
    #[arg(short = 'm', long = "message", value_name = "MESSAGE")]
    pub message: Option<String>,

    /// Hide the entry until remaining time drops to this duration (e.g. 10m)
    #[arg(short = 'n', long = "near", value_name = "DURATION")]
    pub near: Option<String>,

    /// Cancel an entry interactively
    #[arg(short = 'c', long = "cancel")]
    pub cancel: bool,

    /// Show remaining time as HH:MM:SS
    #[arg(short = 's', long = "seconds")]
    pub seconds: bool,

    /// Print one entry per line
    #[arg(short = '1', long = "vertical")]
    pub vertical: bool,

    /// List every entry, ignoring visibility windows
    #[arg(short = 'a', long = "all")]
    pub all: bool,

    /// Emit the listing as JSON
    #[arg(long)]
    pub json: bool,

    /// Open the configuration file in your editor
    #[arg(long)]
    pub config: bool,

    // Waiter re-entry plumbing; set only by the scheduler itself.
    #[arg(long, hide = true)]
    pub waiter: bool,

    #[arg(long, hide = true, value_name = "EPOCH")]
    pub deadline: Option<i64>,

    #[arg(long, hide = true, value_name = "KIND")]
    pub kind: Option<String>,

    #[arg(long, hide = true, value_name = "SECONDS")]
    pub near_secs: Option<i64>,

    #[arg(long, hide = true, value_name = "FLAG")]
    pub chime: Option<u8>,

    /// New entry: MESSAGE TIME... (or -m MESSAGE TIME...). With no
    /// arguments at all, lists the current entries.
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleArgs {
    pub message: String,
    pub time_spec: String,
}

/// Split the schedule invocation into message and time. Trailing positionals
/// are joined with spaces so `timebar lunch 2026-08-07 12:30` works without
/// quoting the date.
pub fn split_schedule_args(
    message_flag: Option<String>,
    positionals: &[String],
) -> Result<ScheduleArgs, TimerError> {
    let (message, time_parts) = match message_flag {
        Some(message) => (message, positionals),
        None => {
            let Some((message, rest)) = positionals.split_first() else {
                return Err(TimerError::missing_fields("message and time are required"));
            };
            (message.clone(), rest)
        }
    };

    if message.trim().is_empty() {
        return Err(TimerError::missing_fields("message is required"));
    }
    if time_parts.is_empty() {
        return Err(TimerError::missing_fields("time is required"));
    }

    Ok(ScheduleArgs {
        message,
        time_spec: time_parts.join(" "),
    })
}
