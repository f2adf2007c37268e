mod cli;

use clap::Parser;
use cli::Cli;
use std::io::{self, BufRead, Write};
use std::path::Path;
use timebar_core::config::Config;
use timebar_core::error::TimerError;
use timebar_core::list::ListItem;
use timebar_core::model::EntryKind;
use timebar_core::parse::Scheduled;
use timebar_core::storage::log_store;
use timebar_core::{cancel, clock, config, format, list, notify, parse, schedule};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), TimerError> {
    if cli.waiter {
        return run_waiter(&cli);
    }
    if cli.config {
        return open_config();
    }

    let store = log_store::store_path()?;
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error.as_ref() {
        log::warn!("config fell back to defaults: {err}");
    }
    let cfg = loaded.config;

    log_store::cleanup(&store, clock::unix_now(), cfg.cleanup_age)?;

    if cli.cancel {
        return run_cancel(&store);
    }
    if cli.message.is_some() || !cli.args.is_empty() {
        return run_schedule(&cli, &store, &cfg);
    }
    run_list(&cli, &store, &cfg)
}

fn run_schedule(cli: &Cli, store: &Path, cfg: &Config) -> Result<(), TimerError> {
    let args = cli::split_schedule_args(cli.message.clone(), &cli.args)?;

    let window = match cli.near.as_deref() {
        Some(raw) => {
            let seconds = parse::parse_duration(raw)
                .map_err(|err| TimerError::invalid_window(err.message().to_string()))?;
            seconds.round() as i64
        }
        None => 0,
    };

    // One clock reading for inference and validation, so a 1s timer can
    // never land exactly on the next second and read as already due.
    let now_local = clock::local_now();
    let now = now_local.unix_timestamp();
    let (deadline, kind) = match parse::infer_schedule(&args.time_spec, now_local)? {
        Scheduled::Timer { deadline } => (deadline, EntryKind::Timer),
        Scheduled::Alarm {
            deadline,
            rolled_over,
        } => {
            if rolled_over {
                eprintln!(
                    "warning: {} has already passed today, scheduling for tomorrow",
                    args.time_spec
                );
            }
            (deadline, EntryKind::Alarm)
        }
    };

    let request = schedule::ScheduleRequest {
        deadline,
        kind,
        window,
        sound: cfg.sound_on_expire,
        message: args.message,
    };
    let entry = schedule::schedule_with_path(store, now, &request, &schedule::ExecDetacher)?;

    let remaining = format::human_remaining(entry.deadline - now);
    if cfg.notify_on_create {
        let notifier = notify::notifier_from_env()?;
        if let Err(err) = notifier.alert("timebar", &format!("{} in {}", entry.message, remaining))
        {
            log::warn!("creation notification failed: {err}");
        }
    }

    println!("Scheduled {}: {} ({})", kind.label(), entry.message, remaining);
    Ok(())
}

fn run_cancel(store: &Path) -> Result<(), TimerError> {
    let records = log_store::load(store)?;
    let live = cancel::live_entries(&records);

    if live.is_empty() {
        println!("nothing to cancel");
        return Ok(());
    }

    for (index, entry) in live.iter().enumerate() {
        println!("{}. {}", index + 1, entry.message);
    }
    print!("cancel which? ");
    io::stdout()
        .flush()
        .map_err(|err| TimerError::io(err.to_string()))?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .map_err(|err| TimerError::io(err.to_string()))?;

    match cancel::parse_selection(&input, live.len()) {
        Some(index) => {
            let entry = &live[index];
            cancel::cancel_with_path(store, entry)?;
            println!("cancelled: {}", entry.message);
        }
        None => println!("invalid selection"),
    }
    Ok(())
}

fn run_list(cli: &Cli, store: &Path, cfg: &Config) -> Result<(), TimerError> {
    let listing = list::list_with_path(store, clock::unix_now(), cfg.cleanup_age, cli.all)?;

    if cli.json {
        let payload = serde_json::to_string(&listing.items)
            .map_err(|err| TimerError::invalid_data(err.to_string()))?;
        println!("{payload}");
        return Ok(());
    }

    let rendered: Vec<String> = listing
        .items
        .iter()
        .map(|item| render_item(item, cli.seconds))
        .collect();

    if cli.vertical {
        for line in &rendered {
            println!("{line}");
        }
    } else if listing.store_empty {
        println!();
    } else if !rendered.is_empty() {
        println!("{}", rendered.join(" | "));
    }
    Ok(())
}

fn render_item(item: &ListItem, precise: bool) -> String {
    if item.completed {
        return format!("{} {}", format::CHECKMARK, item.name);
    }
    if precise {
        return format!("{} {}", format::clock_remaining(item.remaining), item.name);
    }
    format!(
        "{} {} {}",
        item.emoji,
        format::human_remaining(item.remaining),
        item.name
    )
}

fn run_waiter(cli: &Cli) -> Result<(), TimerError> {
    let deadline = cli
        .deadline
        .ok_or_else(|| TimerError::missing_fields("waiter requires --deadline"))?;
    let kind = cli
        .kind
        .as_deref()
        .and_then(EntryKind::from_label)
        .ok_or_else(|| TimerError::missing_fields("waiter requires --kind"))?;
    let message = cli
        .message
        .clone()
        .ok_or_else(|| TimerError::missing_fields("waiter requires --message"))?;

    let task = schedule::WaiterTask {
        deadline,
        kind,
        window: cli.near_secs.unwrap_or(0),
        sound: cli.chime.unwrap_or(0) == 1,
        message,
    };

    let store = log_store::store_path()?;
    let cfg = config::load_config_with_fallback().config;
    let notifier = notify::notifier_from_env()?;
    schedule::run_waiter(&store, &task, &cfg, notifier.as_ref())
}

fn open_config() -> Result<(), TimerError> {
    let path = config::config_path()?;
    config::ensure_template(&path)?;

    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());
    let status = std::process::Command::new(&editor)
        .arg(&path)
        .status()
        .map_err(|err| TimerError::io(format!("{editor}: {err}")))?;
    if !status.success() {
        return Err(TimerError::io(format!("{editor} exited with failure")));
    }
    Ok(())
}
