use crate::error::TimerError;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config";
const CONFIG_ENV_VAR: &str = "TIMEBAR_CONFIG_PATH";

/// Default retention for completed entries, in seconds.
pub const DEFAULT_CLEANUP_AGE: i64 = 600;

pub const CONFIG_TEMPLATE: &str = "\
# timebar configuration
#
# notify_on_create=0
# notify_on_expire=1
# sound_on_expire=0
# sound_file=/usr/share/sounds/freedesktop/stereo/complete.oga
# cleanup_age=600
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub notify_on_create: bool,
    pub notify_on_expire: bool,
    pub sound_on_expire: bool,
    pub sound_file: Option<PathBuf>,
    pub cleanup_age: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notify_on_create: false,
            notify_on_expire: true,
            sound_on_expire: false,
            sound_file: None,
            cleanup_age: DEFAULT_CLEANUP_AGE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<TimerError>,
}

pub fn config_path() -> Result<PathBuf, TimerError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .ok_or_else(|| TimerError::invalid_data("HOME is not set"))?;
    Ok(config_dir.join("timebar").join(CONFIG_FILE_NAME))
}

/// Load the config, falling back to defaults when the file is missing or
/// unreadable. A bad config never blocks a timer from being set.
pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match std::fs::read_to_string(path) {
        Ok(content) => ConfigLoad {
            config: parse_config(&content),
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(TimerError::io(format!("{}: {}", path.display(), err))),
        },
    }
}

/// Parse `key=value` lines. Comments, unknown keys and malformed values are
/// ignored; the corresponding defaults stay in place.
pub fn parse_config(content: &str) -> Config {
    let mut config = Config::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "notify_on_create" => {
                if let Some(flag) = parse_flag(value) {
                    config.notify_on_create = flag;
                }
            }
            "notify_on_expire" => {
                if let Some(flag) = parse_flag(value) {
                    config.notify_on_expire = flag;
                }
            }
            "sound_on_expire" => {
                if let Some(flag) = parse_flag(value) {
                    config.sound_on_expire = flag;
                }
            }
            "sound_file" => {
                if !value.is_empty() {
                    config.sound_file = Some(PathBuf::from(value));
                }
            }
            "cleanup_age" => {
                if let Ok(seconds) = value.parse::<i64>()
                    && seconds >= 0
                {
                    config.cleanup_age = seconds;
                }
            }
            _ => {}
        }
    }

    config
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

/// Write a commented template on first use so `--config` opens something
/// self-explanatory.
pub fn ensure_template(path: &Path) -> Result<(), TimerError> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| TimerError::io(err.to_string()))?;
    }
    std::fs::write(path, CONFIG_TEMPLATE).map_err(|err| TimerError::io(err.to_string()))
}
