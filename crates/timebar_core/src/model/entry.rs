/// Glyph marking a completed record in the log file and in listings.
pub const CHECKMARK: &str = "✓";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Timer,
    Alarm,
}

impl EntryKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Timer => "TIMER",
            Self::Alarm => "ALARM",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Timer => "timer",
            Self::Alarm => "alarm",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "TIMER" => Some(Self::Timer),
            "ALARM" => Some(Self::Alarm),
            _ => None,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "timer" => Some(Self::Timer),
            "alarm" => Some(Self::Alarm),
            _ => None,
        }
    }
}

/// A pending timer or alarm with a detached waiter process behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveEntry {
    pub deadline: i64,
    pub kind: EntryKind,
    pub pid: u32,
    pub window: i64,
    pub sound: bool,
    pub message: String,
}

impl LiveEntry {
    /// Serialize to the store line format. The message is the last column and
    /// may contain any characters, including spaces and pipes.
    pub fn to_line(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.deadline,
            self.kind.tag(),
            self.pid,
            self.window,
            u8::from(self.sound),
            self.message
        )
    }

    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.splitn(6, ' ');
        let deadline = parts.next()?.parse().ok()?;
        let kind = EntryKind::from_tag(parts.next()?)?;
        let pid = parts.next()?.parse().ok()?;
        let window = parts.next()?.parse().ok()?;
        let sound = match parts.next()? {
            "0" => false,
            "1" => true,
            _ => return None,
        };
        let message = parts.next()?.to_string();
        Some(Self {
            deadline,
            kind,
            pid,
            window,
            sound,
            message,
        })
    }
}

/// A fired entry kept around for the retention window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoneEntry {
    pub completed_at: i64,
    pub message: String,
}

impl DoneEntry {
    pub fn to_line(&self) -> String {
        format!("{} {} {}", self.completed_at, CHECKMARK, self.message)
    }

    fn parse(line: &str) -> Option<Self> {
        let mut parts = line.splitn(3, ' ');
        let completed_at = parts.next()?.parse().ok()?;
        if parts.next()? != CHECKMARK {
            return None;
        }
        let message = parts.next()?.to_string();
        Some(Self {
            completed_at,
            message,
        })
    }
}

/// One line of the log store. Lines that parse as neither a live nor a
/// completed entry are carried through every rewrite untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Live(LiveEntry),
    Done(DoneEntry),
    Unrecognized(String),
}

impl Record {
    pub fn parse(line: &str) -> Self {
        if let Some(entry) = LiveEntry::parse(line) {
            return Self::Live(entry);
        }
        if let Some(done) = DoneEntry::parse(line) {
            return Self::Done(done);
        }
        Self::Unrecognized(line.to_string())
    }

    pub fn to_line(&self) -> String {
        match self {
            Self::Live(entry) => entry.to_line(),
            Self::Done(done) => done.to_line(),
            Self::Unrecognized(raw) => raw.clone(),
        }
    }
}
