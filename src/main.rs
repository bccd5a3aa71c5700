//! farmplan - Entry Point
//!
//! Loads the three catalog tables, resolves the search sets, formulates and
//! solves the farming program, and prints the plan.

use std::path::PathBuf;

use clap::Parser;

use farmplan::catalog::load_catalog;
use farmplan::core::config::PlanConfig;
use farmplan::core::error::Result;
use farmplan::plan::{build_model, decode, resolve, solve};
use farmplan::report;

/// Plan which monsters to hunt, and where, to gather every material the
/// flagged augments need.
#[derive(Parser, Debug)]
#[command(name = "farmplan")]
#[command(about = "Minimal-route farming planner for crafting materials")]
struct Args {
    /// Augment recipes table
    #[arg(long, default_value = "data/augments.csv")]
    augments: PathBuf,

    /// Zone weights table
    #[arg(long, default_value = "data/zone_weights.csv")]
    zones: PathBuf,

    /// Monster drops/locations table
    #[arg(long, default_value = "data/monsters.csv")]
    monsters: PathBuf,

    /// TOML file overriding objective factors or table delimiters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,

    /// Print the formulated program before solving
    #[arg(long)]
    dump_model: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        "farmplan=debug"
    } else {
        "farmplan=warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => PlanConfig::load(path)?,
        None => PlanConfig::default(),
    };

    let catalog = load_catalog(&args.augments, &args.zones, &args.monsters, &config)?;
    let resolution = resolve(&catalog)?;
    let model = build_model(&catalog.zones, &resolution, &config)?;
    if args.dump_model {
        println!("{model}");
    }
    let assignment = solve(&model)?;
    let plan = decode(&resolution, &assignment);

    if args.format == "json" {
        println!("{}", report::render_json(&plan)?);
    } else {
        print!("{}", report::render_text(&plan));
    }
    Ok(())
}
