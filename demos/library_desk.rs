//! A library service desk open for a number of hours, where customers arrive on average every few minutes and each
//! takes a few minutes to serve. While nobody is at the counter, the librarian writes articles.
//!
//! Runs the desk for many independent days and prints the averages: how long customers waited, how long the line
//! was, and how many articles got written per day. Run with `--log-level trace` to watch every event of every day.

use anyhow::{Context, Result};
use clap::Parser;
use deskq::{DeskParameters, LibrarySimulation, DEFAULT_DAYS};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "library-desk")]
#[command(about = "Simulate a single-server library desk", long_about = None)]
struct Cli {
    /// Hours the desk accepts new customers
    #[arg(long, default_value = "8.0")]
    hours: f64,

    /// Mean minutes between customer arrivals
    #[arg(long, default_value = "6.0")]
    arrival_minutes: f64,

    /// Mean minutes spent serving one customer
    #[arg(long, default_value = "5.0")]
    service_minutes: f64,

    /// Number of independent days to average
    #[arg(short, long, default_value_t = DEFAULT_DAYS)]
    days: usize,

    /// Seed for the random-number generator; drawn from the OS if omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Spread days over all cores
    #[arg(long)]
    parallel: bool,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(cli.log_level).finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install log subscriber")?;

    let parameters = DeskParameters::new(cli.hours, cli.arrival_minutes, cli.service_minutes);
    let desk = LibrarySimulation::new(parameters).context("invalid desk parameters")?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(?parameters, days = cli.days, seed, "simulating library desk");

    let summary = if cli.parallel {
        desk.simulate_parallel(cli.days, seed)?
    } else {
        desk.simulate(cli.days, &mut Pcg64::seed_from_u64(seed))?
    };

    println!("Days simulated:        {}", summary.days);
    println!("Mean waiting time:     {:.1} s", summary.mean_waiting_time);
    println!("Mean queue length:     {:.3}", summary.mean_queue_length);
    println!("Mean articles per day: {:.2}", summary.mean_articles);
    Ok(())
}
