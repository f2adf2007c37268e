use crate::error::TimerError;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

/// Result of parsing a clock/date string into an absolute instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsoluteTime {
    pub epoch: i64,
    /// True when a bare `HH:MM` had already passed today and was moved to
    /// tomorrow. The caller surfaces a warning for this.
    pub rolled_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduled {
    Timer { deadline: i64 },
    Alarm { deadline: i64, rolled_over: bool },
}

/// Parse a duration string like "1h30m" or "90s" into seconds.
///
/// Tokens are `<number><unit>` with unit h, m or s; numbers may be
/// fractional; tokens add up. Anything left over is an error rather than
/// being passed along to a lower-level time facility.
pub fn parse_duration(raw: &str) -> Result<f64, TimerError> {
    let cleaned = raw.trim().to_ascii_lowercase();
    if cleaned.is_empty() {
        return Err(TimerError::invalid_duration("duration is empty"));
    }

    let mut total = 0.0_f64;
    let mut number = String::new();
    let mut tokens = 0;

    for ch in cleaned.chars() {
        match ch {
            '0'..='9' | '.' => number.push(ch),
            'h' | 'm' | 's' => {
                if number.is_empty() {
                    return Err(TimerError::invalid_duration(format!(
                        "unit '{ch}' without a number"
                    )));
                }
                let value: f64 = number.parse().map_err(|_| {
                    TimerError::invalid_duration(format!("bad number '{number}'"))
                })?;
                total += match ch {
                    'h' => value * 3600.0,
                    'm' => value * 60.0,
                    _ => value,
                };
                number.clear();
                tokens += 1;
            }
            _ => {
                return Err(TimerError::invalid_duration(format!(
                    "unexpected character '{ch}'"
                )));
            }
        }
    }

    if !number.is_empty() {
        return Err(TimerError::invalid_duration(format!(
            "trailing '{number}' without a unit"
        )));
    }
    if tokens == 0 {
        return Err(TimerError::invalid_duration("no duration tokens"));
    }

    Ok(total)
}

/// Parse a clock time ("14:30"), a date ("2026-08-07") or a date-time
/// ("2026-08-07 14:30[:00]") into epoch seconds, relative to `now`.
///
/// A bare clock time that has already passed today rolls over to tomorrow.
pub fn parse_absolute(raw: &str, now: OffsetDateTime) -> Result<AbsoluteTime, TimerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TimerError::invalid_date("time is empty"));
    }
    let offset = now.offset();

    if let Some(clock_time) = parse_clock(trimmed) {
        let today = PrimitiveDateTime::new(now.date(), clock_time).assume_offset(offset);
        if today > now {
            return Ok(AbsoluteTime {
                epoch: today.unix_timestamp(),
                rolled_over: false,
            });
        }
        let next_day = now
            .date()
            .next_day()
            .ok_or_else(|| TimerError::invalid_date("date out of range"))?;
        let tomorrow = PrimitiveDateTime::new(next_day, clock_time).assume_offset(offset);
        return Ok(AbsoluteTime {
            epoch: tomorrow.unix_timestamp(),
            rolled_over: true,
        });
    }

    let date_time_secs = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, date_time_secs) {
        return Ok(AbsoluteTime {
            epoch: parsed.assume_offset(offset).unix_timestamp(),
            rolled_over: false,
        });
    }

    let date_time = format_description!("[year]-[month]-[day] [hour]:[minute]");
    if let Ok(parsed) = PrimitiveDateTime::parse(trimmed, date_time) {
        return Ok(AbsoluteTime {
            epoch: parsed.assume_offset(offset).unix_timestamp(),
            rolled_over: false,
        });
    }

    let date_only = format_description!("[year]-[month]-[day]");
    if let Ok(parsed) = Date::parse(trimmed, date_only) {
        let midnight = PrimitiveDateTime::new(parsed, Time::MIDNIGHT).assume_offset(offset);
        return Ok(AbsoluteTime {
            epoch: midnight.unix_timestamp(),
            rolled_over: false,
        });
    }

    Err(TimerError::invalid_date(format!(
        "'{trimmed}' is not a recognized time or date"
    )))
}

/// Decide what a single time argument means: a duration schedules a timer,
/// an absolute time schedules an alarm, anything else is unparseable.
pub fn infer_schedule(raw: &str, now: OffsetDateTime) -> Result<Scheduled, TimerError> {
    if let Ok(seconds) = parse_duration(raw) {
        return Ok(Scheduled::Timer {
            deadline: now.unix_timestamp() + seconds.round() as i64,
        });
    }

    match parse_absolute(raw, now) {
        Ok(at) => Ok(Scheduled::Alarm {
            deadline: at.epoch,
            rolled_over: at.rolled_over,
        }),
        Err(_) => Err(TimerError::unparseable(format!(
            "'{raw}' is neither a duration nor a time"
        ))),
    }
}

fn parse_clock(raw: &str) -> Option<Time> {
    let (hour_raw, minute_raw) = raw.split_once(':')?;
    if hour_raw.is_empty() || hour_raw.len() > 2 || minute_raw.len() != 2 {
        return None;
    }
    let hour: u8 = hour_raw.parse().ok()?;
    let minute: u8 = minute_raw.parse().ok()?;
    Time::from_hms(hour, minute, 0).ok()
}
