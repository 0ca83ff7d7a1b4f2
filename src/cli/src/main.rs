#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::{eyre::eyre, owo_colors::OwoColorize};
use cube3::{Algorithm, Cube};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, info};
use std::time::{Duration, Instant};
use thistlethwaite::{Phase, SolverOptions, ThistlethwaiteSolver};

/// Solves the 3x3x3 cube with Thistlethwaite's four phase method
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the cube reached by applying a scramble to a solved cube
    Solve {
        /// The scramble, e.g. "R U' F2 D"
        scramble: String,
        /// Print each phase's moves on its own line
        #[arg(long)]
        phases: bool,
        /// Keep moves at phase boundaries apart instead of merging them
        #[arg(long)]
        no_merge: bool,
    },
    /// Print a random scramble
    Scramble {
        /// How many moves the scramble has
        #[arg(long, short, default_value_t = 25)]
        length: usize,
        /// Seed for the random number generator
        #[arg(long, short)]
        seed: Option<u64>,
    },
    /// Solve many random scrambles and report solution lengths and timings
    Bench {
        /// How many scrambles to solve
        #[arg(long, short, default_value_t = 1000)]
        count: usize,
        /// Seed for the random number generator
        #[arg(long, short)]
        seed: Option<u64>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .parse_default_env()
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    match cli.command {
        Commands::Solve {
            scramble,
            phases,
            no_merge,
        } => solve(&scramble, phases, no_merge),
        Commands::Scramble { length, seed } => {
            println!("{}", Algorithm::random(length, &mut rng(seed)));
            Ok(())
        }
        Commands::Bench { count, seed } => bench(count, seed),
    }
}

fn rng(seed: Option<u64>) -> fastrand::Rng {
    seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
}

fn solve(scramble: &str, phases: bool, no_merge: bool) -> color_eyre::Result<()> {
    let scramble: Algorithm = scramble.parse()?;
    let cube = Cube::from_algorithm(&scramble);
    let options = SolverOptions::default().with_merge_phase_boundaries(!no_merge);
    let solver = ThistlethwaiteSolver::with_options(options)?;

    let solutions = solver.solve_phases(&cube)?;
    if phases {
        for (phase, solution) in Phase::ALL.iter().zip(&solutions) {
            println!(
                "{:>20} {} {}",
                phase.to_string().bold(),
                format!("({})", solution.len()).dimmed(),
                solution
            );
        }
    }
    let mut solution: Algorithm = solutions
        .iter()
        .flat_map(Algorithm::moves)
        .copied()
        .collect();
    if solver.options().merge_phase_boundaries() {
        solution = solution.simplified();
    }
    println!("{} {}", solution, format!("({} moves)", solution.len()).green());
    Ok(())
}

fn bench(count: usize, seed: Option<u64>) -> color_eyre::Result<()> {
    if count == 0 {
        return Err(eyre!("The scramble count must be positive"));
    }
    let start = Instant::now();
    let solver = ThistlethwaiteSolver::new()?;
    let build_time = start.elapsed();
    info!("Tables ready, solving {count} scrambles");

    let mut rng = rng(seed);
    let mut lengths = Vec::with_capacity(count);
    let mut solve_time = Duration::ZERO;
    for _ in 0..count {
        let cube = Cube::from_algorithm(&Algorithm::random(25, &mut rng));
        let start = Instant::now();
        let solution = solver.solve_full(&cube)?;
        solve_time += start.elapsed();
        lengths.push(solution.len());
    }

    let total: usize = lengths.iter().sum();
    let (min, max) = lengths
        .iter()
        .minmax()
        .into_option()
        .ok_or_else(|| eyre!("No scrambles were solved"))?;
    println!("{:>12} {:.3}s", "tables".bold(), build_time.as_secs_f64());
    println!(
        "{:>12} {:.1} average, {min} shortest, {max} longest",
        "moves".bold(),
        total as f64 / count as f64
    );
    println!(
        "{:>12} {:.3}ms per solve",
        "time".bold(),
        solve_time.as_secs_f64() * 1000.0 / count as f64
    );
    Ok(())
}
