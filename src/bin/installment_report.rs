use std::{error::Error, path::PathBuf};

use chrono::NaiveDate;
use installment_core::{
    config::{Config, ConfigManager},
    core::{Clock, FixedClock, SortField, SystemClock, TrackerManager},
    init, report,
    storage::JsonStorage,
    utils::{build_info, resolve_base},
};

const USAGE: &str = "usage: installment_report [--home DIR] [--today YYYY-MM-DD] [--sort FIELD]... [--no-color] [--version]";

#[derive(Debug, Default)]
struct ReportArgs {
    home: Option<PathBuf>,
    today: Option<NaiveDate>,
    sorts: Vec<SortField>,
    no_color: bool,
    version: bool,
}

impl ReportArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut parsed = ReportArgs::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--home" => {
                    let value = args.next().ok_or("--home needs a directory")?;
                    parsed.home = Some(PathBuf::from(value));
                }
                "--today" => {
                    let value = args.next().ok_or("--today needs a date")?;
                    let date = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                        .map_err(|err| format!("invalid --today `{value}`: {err}"))?;
                    parsed.today = Some(date);
                }
                "--sort" => {
                    let value = args.next().ok_or("--sort needs a field")?;
                    parsed.sorts.push(value.parse()?);
                }
                "--no-color" => parsed.no_color = true,
                "--version" | "-V" => parsed.version = true,
                other => return Err(format!("unexpected argument `{other}`\n{USAGE}")),
            }
        }
        Ok(parsed)
    }
}

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = ReportArgs::parse(std::env::args().skip(1))?;
    if args.version {
        println!("{}", build_info::current().banner());
        return Ok(());
    }
    if args.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    let base = resolve_base(args.home);
    let config_manager = ConfigManager::with_base_dir(base.clone())?;
    let config = config_manager.load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "invalid config.json, using defaults");
        Config::default()
    });

    let clock: Box<dyn Clock> = match args.today {
        Some(today) => Box::new(FixedClock::new(today)),
        None => Box::new(SystemClock),
    };
    let storage = JsonStorage::new(Some(base))?;
    let mut manager = TrackerManager::open(Box::new(storage), clock);
    manager.load_registry_from(&config_manager.registry_path(&config));
    for field in args.sorts {
        manager.sort_by(field);
    }

    let purchases = manager.sorted_purchases();
    println!(
        "{}",
        report::render_report(
            &purchases,
            manager.views(),
            manager.registry(),
            &config.money_formatter(),
        )
    );
    Ok(())
}
