use anyhow::{Context, Result};
use clap::{Arg, Command};
use std::path::PathBuf;

use platform_shell::platform::{PlatformEvent, WindowId};
use platform_shell::trace::{read_header, EventTrace};

mod summary;
use summary::{describe, summarize};

fn main() -> Result<()> {
    let matches = Command::new("trace_inspector")
        .about("Inspects recorded event trace files")
        .arg(
            Arg::new("trace")
                .value_name("FILE")
                .required(true)
                .help("Trace file to inspect"),
        )
        .arg(
            Arg::new("events")
                .long("events")
                .help("List every event in the trace")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("limit")
                .short('n')
                .long("limit")
                .value_name("COUNT")
                .help("Cap the event listing at COUNT entries"),
        )
        .get_matches();

    let path = matches
        .get_one::<String>("trace")
        .map(PathBuf::from)
        .context("trace file argument missing")?;

    let header = read_header(&path)
        .with_context(|| format!("failed to read trace header from {}", path.display()))?;

    // The inspector has no live window to bind to; any id will do.
    let trace = EventTrace::load_from_file(&path, WindowId::new(1))
        .with_context(|| format!("failed to load trace from {}", path.display()))?;

    println!("{}", summarize(&path, &header, &trace));

    if matches.get_flag("events") {
        let limit = match matches.get_one::<String>("limit") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("--limit expects a number, got {raw}"))?,
            None => usize::MAX,
        };
        list_events(trace.events(), limit);
    }

    Ok(())
}

fn list_events(events: &[PlatformEvent], limit: usize) {
    for (index, event) in events.iter().take(limit).enumerate() {
        println!(
            "{index:>5}  {:>9.3}s  {}",
            event.timestamp,
            describe(&event.kind)
        );
    }
    if events.len() > limit {
        println!("       ... {} more", events.len() - limit);
    }
}
