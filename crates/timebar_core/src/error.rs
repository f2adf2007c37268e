use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    InvalidDuration(String),
    InvalidDate(String),
    Unparseable(String),
    MissingFields(String),
    TimeInPast(String),
    InvalidWindow(String),
    InvalidData(String),
    Io(String),
}

impl TimerError {
    pub fn invalid_duration<M: Into<String>>(message: M) -> Self {
        Self::InvalidDuration(message.into())
    }

    pub fn invalid_date<M: Into<String>>(message: M) -> Self {
        Self::InvalidDate(message.into())
    }

    pub fn unparseable<M: Into<String>>(message: M) -> Self {
        Self::Unparseable(message.into())
    }

    pub fn missing_fields<M: Into<String>>(message: M) -> Self {
        Self::MissingFields(message.into())
    }

    pub fn time_in_past<M: Into<String>>(message: M) -> Self {
        Self::TimeInPast(message.into())
    }

    pub fn invalid_window<M: Into<String>>(message: M) -> Self {
        Self::InvalidWindow(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDuration(_) => "invalid_duration",
            Self::InvalidDate(_) => "invalid_date",
            Self::Unparseable(_) => "unparseable",
            Self::MissingFields(_) => "missing_fields",
            Self::TimeInPast(_) => "time_in_past",
            Self::InvalidWindow(_) => "invalid_window",
            Self::InvalidData(_) => "invalid_data",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidDuration(message)
            | Self::InvalidDate(message)
            | Self::Unparseable(message)
            | Self::MissingFields(message)
            | Self::TimeInPast(message)
            | Self::InvalidWindow(message)
            | Self::InvalidData(message)
            | Self::Io(message) => message,
        }
    }
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for TimerError {}
