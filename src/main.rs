//! hlt-trigger CLI
//!
//! Usage:
//!   hlt-trigger --list                               # Show registered variants
//!   hlt-trigger --events events.jsonl                # Evaluate events with AnyFiredTrigger
//!   hlt-trigger --config menus.json --trigger MenuA  # Evaluate with a configured menu
//!   hlt-trigger --trigger MenuA --json < events.jsonl

use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;

use hlt_trigger::config::{load_config, TriggerConfig};
use hlt_trigger::core::{parse_event_line, EventPipeline, FactoryRegistry, ANY_FIRED_TRIGGER};
use hlt_trigger::types::GlobalTriggerDecision;
use hlt_trigger::{logging, TriggerError, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "hlt-trigger",
    version = VERSION,
    about = "Evaluate global trigger decisions event by event",
    long_about = "Creates a trigger variant by class name from the factory registry and\n\
                  feeds it events read as JSON lines, one event per line:\n\n  \
                  {\"event_id\": 1, \"inputs\": [\n    \
                  {\"kind\": \"decision\", \"name\": \"MUON\", \"fired\": true},\n    \
                  {\"kind\": \"object\", \"data_type\": \"CLUSTERS:PHOS\", \"spec\": 1}]}\n\n\
                  Each event prints one decision line, followed by a run summary."
)]
struct Args {
    /// Configuration file (JSON) with registry capacity and trigger menus
    #[arg(short, long)]
    config: Option<String>,

    /// Trigger class to create
    #[arg(short, long, default_value = ANY_FIRED_TRIGGER)]
    trigger: String,

    /// Events file (JSON lines); stdin when absent
    #[arg(short, long)]
    events: Option<String>,

    /// List registered trigger classes and exit
    #[arg(short, long)]
    list: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("hlt-trigger: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), TriggerError> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => TriggerConfig::default(),
    };

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else if args.quiet {
        log::LevelFilter::Error
    } else {
        config.level_filter()
    };
    logging::init(level, !args.no_color);

    let registry = config.build_registry()?;

    if args.list {
        print_registry(&registry, args.json)?;
        return Ok(());
    }

    let trigger = registry.create_new(&args.trigger)?;
    log::info!(
        "created '{}' with {} trigger classes",
        trigger.class_name(),
        trigger.counters().len()
    );
    let mut pipeline = EventPipeline::new(trigger);

    match &args.events {
        Some(path) => {
            let file = File::open(path).map_err(|e| TriggerError::io(path, e))?;
            run_events(&mut pipeline, BufReader::new(file), path, args)?;
        }
        None => run_events(&mut pipeline, io::stdin().lock(), "<stdin>", args)?,
    }

    print_summary(&pipeline, args.json)
}

/// Process every event line; malformed lines are logged and skipped
fn run_events(
    pipeline: &mut EventPipeline,
    reader: impl BufRead,
    source: &str,
    args: &Args,
) -> Result<(), TriggerError> {
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| TriggerError::io(source, e))?;
        let record = match parse_event_line(&line) {
            Ok(Some(record)) => record,
            Ok(None) => continue,
            Err(e) => {
                log::warn!("{}:{} skipped: {}", source, number + 1, e);
                continue;
            }
        };
        let decision = pipeline.process(&record);
        print_decision(&decision, args)?;
    }
    Ok(())
}

fn print_decision(decision: &GlobalTriggerDecision, args: &Args) -> Result<(), TriggerError> {
    if args.json {
        println!("{}", serde_json::to_string(decision)?);
    } else if args.no_color {
        println!("{}", decision.to_parseable_string());
    } else {
        println!("{}", decision.to_terminal_string());
    }
    Ok(())
}

fn print_registry(registry: &FactoryRegistry, json: bool) -> Result<(), TriggerError> {
    if json {
        println!("{}", serde_json::to_string(&registry.names())?);
        return Ok(());
    }
    println!(
        "Registered trigger classes ({} of {}):",
        registry.len(),
        registry.capacity()
    );
    for name in registry.names() {
        println!("  {}", name);
    }
    Ok(())
}

fn print_summary(pipeline: &EventPipeline, json: bool) -> Result<(), TriggerError> {
    let summary = pipeline.summary();
    if json {
        println!("{}", serde_json::to_string(summary)?);
        return Ok(());
    }
    println!();
    println!("========================================");
    println!("  hlt-trigger v{} - {}", VERSION, summary.trigger);
    println!("========================================");
    println!("  events:          {}", summary.events);
    println!("  fired:           {}", summary.fired);
    println!("  ignored inputs:  {}", summary.ignored_inputs);
    println!("  counters:        {:?}", summary.counters);
    Ok(())
}
