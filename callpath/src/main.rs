//! Run a batch of executions, each through a randomly selected call path.

use std::io::{stderr, stdin};
use std::path::PathBuf;

use anyhow::{Context, Result};
use callpath::batch::{BatchOptions, run_batch};
use callpath::core::random::SeededRandom;
use callpath::core::run_count::{RunCount, resolve_run_count};
use callpath::driver::{CaptureRequest, ExecutionDriver};
use callpath::exit_codes;
use callpath::io::aux_steps::OsAux;
use callpath::io::config::{RunConfig, load_config};
use callpath::io::pacing::{EnterToContinue, NoPause, Pacing};
use callpath::io::payload::{ConsoleNotice, LogNotice, Payload, PayloadKind};
use callpath::io::stack::BacktraceCapture;
use callpath::logging;
use callpath::paths::registry::Registry;
use callpath::report::{BatchReport, render_execution, render_stack, render_summary};
use chrono::Utc;
use clap::{ArgAction, Parser};
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "callpath",
    version,
    about = "Reach one payload through randomly chosen, structurally distinct call paths"
)]
struct Cli {
    /// Number of executions; clamped to the configured range, default on bad input.
    #[arg(allow_negative_numbers = true)]
    count: Option<String>,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for path selection and shape decisions.
    #[arg(long)]
    seed: Option<u64>,

    /// Skip diagnostic stack capture.
    #[arg(long)]
    no_stack: bool,

    /// Wait for Enter between executions.
    #[arg(long)]
    pause: bool,

    /// Print the batch report as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::INVALID);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut cfg = match &cli.config {
        Some(path) => load_config(path).context("load config")?,
        None => RunConfig::default(),
    };
    if cli.no_stack {
        cfg.stack.enabled = false;
    }
    if cli.pause {
        cfg.pause_between_runs = true;
    }

    let count = resolve_run_count(cli.count.as_deref(), cfg.run_limits());
    match count {
        RunCount::Clamped { requested, runs } => {
            warn!(requested, runs, "execution count out of range; clamped");
        }
        RunCount::Unparsable(runs) => {
            warn!(runs, "execution count not a number; using default");
        }
        RunCount::Default(_) | RunCount::Requested(_) => {}
    }
    let runs = count.runs();

    let registry = Registry::standard();
    let payload = build_payload(&cfg, cli.json);
    let aux = OsAux;
    let capture = BacktraceCapture;

    let mut driver = ExecutionDriver::new(
        &registry,
        payload.as_ref(),
        &aux,
        Box::new(SeededRandom::from_entropy()),
        Box::new(SeededRandom::from_entropy()),
    );
    if cfg.stack.enabled {
        driver = driver.with_capture(CaptureRequest {
            capture: &capture,
            point: cfg.stack.point,
            max_frames: cfg.stack.max_frames,
        });
    }
    if let Some(seed) = cli.seed {
        driver.reseed(seed);
    }

    let options = BatchOptions {
        runs,
        reseed: cfg.reseed,
        base_seed: cli
            .seed
            .unwrap_or_else(|| Utc::now().timestamp().unsigned_abs()),
    };

    if !cli.json {
        print_banner(&registry, &cfg, runs);
    }

    // The prompt goes to stderr so stdout carries only the report.
    let mut pacing: Box<dyn Pacing> = if cfg.pause_between_runs {
        Box::new(EnterToContinue::new(stdin().lock(), stderr()))
    } else {
        Box::new(NoPause)
    };

    let shown_frames = cfg.stack.shown_frames;
    let json = cli.json;
    let outcome = run_batch(&mut driver, &options, pacing.as_mut(), |record| {
        if json {
            return;
        }
        println!("{}", render_execution(record));
        if let Some(snapshot) = &record.stack {
            println!("{}", render_stack(snapshot, shown_frames));
        }
    })?;

    if cli.json {
        let report = BatchReport::new(&registry, &outcome);
        let rendered = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{rendered}");
    } else {
        println!("{}", render_summary(&registry, &outcome));
    }
    Ok(())
}

/// JSON output must stay parseable, so the console payload is replaced by
/// the log payload in that mode.
fn build_payload(cfg: &RunConfig, json: bool) -> Box<dyn Payload> {
    match cfg.payload.kind {
        PayloadKind::Console if !json => Box::new(ConsoleNotice::new(
            cfg.payload.title.clone(),
            cfg.payload.message.clone(),
        )),
        PayloadKind::Console | PayloadKind::Log => Box::new(LogNotice {
            message: cfg.payload.message.clone(),
        }),
    }
}

fn print_banner(registry: &Registry, cfg: &RunConfig, runs: u32) {
    println!("Call-path diversification demo");
    println!("==============================");
    println!("  paths registered: {}", registry.count());
    println!("  planned executions: {runs}");
    if cfg.stack.enabled {
        println!("  stack capture: enabled ({:?})", cfg.stack.point);
    } else {
        println!("  stack capture: disabled");
    }
}
