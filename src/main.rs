use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use oscillator_sim::config;
use oscillator_sim::io::{self as output, json::RunSummary, xyz};
use oscillator_sim::physics::spring;
use oscillator_sim::{sim, Params, Record};

#[derive(Parser, Debug)]
#[command(about = "One-dimensional harmonic oscillator, semi-implicit Euler")]
struct Args {
    /// YAML scenario file. Without it the parameters are read from stdin.
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Directory for output.txt, per-quantity series, trajectory.xyz and summary.json
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Element label of the particle in the XYZ trajectory
    #[arg(short, long, default_value = xyz::DEFAULT_LABEL)]
    label: String,
}

fn acquire_params(args: &Args) -> Result<Params> {
    match &args.scenario {
        Some(path) => Ok(config::load_scenario(path)?.params()),
        None => {
            let stdin = io::stdin();
            config::prompt_parameters(stdin.lock(), io::stdout())
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = acquire_params(&args)?;
    info!("parameters: {:?}", params);

    let records = match sim::simulate(&params) {
        Ok(records) => records,
        Err(e) => {
            error!("simulation failed: {}", e);
            return Err(e.into());
        }
    };

    output::write_all(&args.output_dir, &params, &records, &args.label)
        .with_context(|| format!("failed to write output to {}", args.output_dir.display()))?;

    report(&params, &records);
    Ok(())
}

// ---------------------------------------------------------------------------
// Terminal report
// ---------------------------------------------------------------------------

fn report(params: &Params, records: &[Record]) {
    let summary = RunSummary::from_records(params, records);

    println!();
    println!("====================================================================");
    println!("  HARMONIC OSCILLATOR  F = -kx");
    println!("====================================================================");
    println!(
        "  x0 = {:>10.4}    v0 = {:>10.4}    m = {:>8.4}    k = {:>8.4}",
        params.initial_position, params.initial_velocity, params.mass, params.spring_constant
    );
    match spring::natural_period(params.mass, params.spring_constant) {
        Some(period) => println!(
            "  h  = {:>10.6}    T  = {:>10.4}    period = {:.4} ({:.0} steps)",
            params.time_step,
            params.time_interval,
            period,
            period / params.time_step
        ),
        None => println!(
            "  h  = {:>10.6}    T  = {:>10.4}    (no oscillation)",
            params.time_step, params.time_interval
        ),
    }
    println!();

    println!("  {:>10}  {:>12}  {:>12}  {:>12}", "t", "F", "x", "v");
    println!("  {}", "─".repeat(54));
    let sample_interval = (records.len() / 20).max(1);
    for (i, r) in records.iter().enumerate() {
        if i % sample_interval != 0 && i != records.len() - 1 {
            continue;
        }
        println!(
            "  {:>10.4}  {:>12.6}  {:>12.6}  {:>12.6}",
            r.time, r.force, r.position, r.velocity
        );
    }

    println!();
    println!(
        "  x range [{:.6}, {:.6}]   max |v| {:.6}",
        summary.min_position, summary.max_position, summary.max_speed
    );
    println!("  Simulation: {} steps, h={}", summary.steps, params.time_step);
    println!("====================================================================");
    println!();
}
