//! Batch simulator CLI - runs registered seat policies against each
//! other entirely in memory and reports aggregate results.
//!
//! Every game derives its own seed from the master seed, so a whole
//! batch replays from one number. A failed game aborts the batch with a
//! diagnostic naming the offending seat and policy.

mod metrics;
mod output;
mod simulator;
mod types;

use clap::Parser;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use wizard_engine::ai::{by_name, registered_policies};
use wizard_engine::domain::rules::DECK_SIZE;
use wizard_engine::domain::{default_total_rounds, derive_game_seed, derive_policy_seed};

use metrics::{build_game_metrics, BatchSummary};
use output::OutputWriter;
use simulator::{BoxedPolicy, Simulator};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "ai-simulator")]
#[command(about = "In-memory batch simulator for seat policies")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Policy for every seat (shortcut for a uniform table)
    #[arg(long, default_value = "estimator", conflicts_with = "seat", value_parser = parse_policy)]
    seats: String,

    /// Policy for one seat; repeat once per seat, in seat order
    #[arg(long = "seat", value_parser = parse_policy)]
    seat: Vec<String>,

    /// Seats at the table when using --seats (ignored with --seat)
    #[arg(long, default_value = "4", value_parser = clap::value_parser!(u8).range(2..=6))]
    players: u8,

    /// Configured round count; rounds 1 through N-1 are played.
    /// Defaults to 60 divided by the seat count.
    #[arg(long, value_parser = clap::value_parser!(u8).range(2..))]
    rounds: Option<u8>,

    /// Master seed for a reproducible batch; drawn from entropy when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress the JSONL output
    #[arg(long)]
    compress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_policy(value: &str) -> Result<String, String> {
    if by_name(value).is_some() {
        return Ok(value.to_string());
    }
    let known: Vec<&str> = registered_policies().iter().map(|f| f.name).collect();
    Err(format!(
        "unknown policy `{value}` (registered: {})",
        known.join(", ")
    ))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let lineup = seat_lineup(&args)?;
    let players = lineup.len() as u8;
    let total_rounds = args.rounds.unwrap_or_else(|| default_total_rounds(players));
    check_deck_capacity(players, total_rounds)?;

    // Logged so an entropy-seeded batch can still be replayed.
    let master_seed = args.seed.unwrap_or_else(rand::random);
    info!(
        games = args.games,
        players,
        total_rounds,
        master_seed,
        lineup = ?lineup,
        "Starting batch"
    );

    let mut output_writer = OutputWriter::new(
        &args.output_dir,
        &args.output_format,
        args.compress,
        lineup.len(),
    )?;

    let mut summary = BatchSummary::new(&lineup);
    let start = Instant::now();

    for game_index in 0..args.games {
        let game_no = game_index + 1;
        let game_seed = derive_game_seed(master_seed, game_index);
        let policies = seat_policies(&lineup, game_seed)?;

        let game_start = Instant::now();
        let result = match Simulator::new(players, total_rounds, game_seed).simulate_game(&policies)
        {
            Ok(result) => result,
            Err(err) => {
                error!(game_no, game_seed, %err, "Game aborted");
                return Err(format!("game {game_no} (seed {game_seed}) aborted: {err}").into());
            }
        };
        let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;

        debug!(game_no, game_seed, scores = ?result.final_scores, "Game finished");

        let game_metrics = build_game_metrics(
            game_no,
            game_seed,
            &lineup,
            args.games,
            total_rounds,
            &result,
            duration_ms,
        );
        output_writer.write_game(&game_metrics)?;
        summary.record(&result);
    }

    let elapsed = start.elapsed();

    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.map(Path::to_path_buf);
    let csv_path = csv_path.to_path_buf();
    output_writer.finish()?;

    if let Some(path) = jsonl_path {
        info!(path = %path.display(), "Wrote per-game records");
    }
    info!(path = %csv_path.display(), "Wrote summary CSV");

    print_summary(&summary, total_rounds, master_seed, elapsed);
    Ok(())
}

/// One policy name per seat, from `--seat` occurrences or the `--seats`
/// shortcut.
fn seat_lineup(args: &Args) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    if args.seat.is_empty() {
        return Ok(vec![args.seats.clone(); args.players as usize]);
    }
    let n = args.seat.len();
    if !(2..=6).contains(&n) {
        return Err(format!("--seat must be given 2 to 6 times, got {n}").into());
    }
    Ok(args.seat.clone())
}

/// Fresh policies for one game, seeded per seat off the game seed.
fn seat_policies(
    lineup: &[String],
    game_seed: u64,
) -> Result<Vec<BoxedPolicy>, Box<dyn std::error::Error>> {
    lineup
        .iter()
        .enumerate()
        .map(|(seat, name)| {
            let factory = by_name(name).ok_or_else(|| format!("unknown policy `{name}`"))?;
            Ok((factory.make)(Some(derive_policy_seed(game_seed, seat as u8))))
        })
        .collect()
}

/// The largest dealt round plus the trump card must fit in the deck.
fn check_deck_capacity(players: u8, total_rounds: u8) -> Result<(), Box<dyn std::error::Error>> {
    let largest_hand = u16::from(total_rounds.saturating_sub(1));
    let needed = u16::from(players) * largest_hand + 1;
    if needed > DECK_SIZE as u16 {
        return Err(format!(
            "{players} seats over {total_rounds} rounds would need {needed} cards \
             for the largest round; the deck holds {DECK_SIZE}"
        )
        .into());
    }
    Ok(())
}

fn print_summary(summary: &BatchSummary, total_rounds: u8, master_seed: u64, elapsed: Duration) {
    println!("\n=== Simulation summary ===");
    println!("Games completed: {}", summary.games);
    println!(
        "Rounds per game: {} (of {} configured)",
        total_rounds.saturating_sub(1),
        total_rounds
    );
    println!("Master seed: {master_seed}");
    println!("Total time: {elapsed:?}");
    if summary.games == 0 {
        return;
    }
    println!("Average time per game: {:?}", elapsed / summary.games);

    println!("\n=== Results by seat ===");
    for (seat, stats) in summary.seats.iter().enumerate() {
        let (exact, over, under) = stats.bid_split();
        println!(
            "Seat {} [{}]: wins={} ({:.1}%), total={}, avg={:.1}, min={}, max={}, \
             bids exact={:.1}% over={:.1}% under={:.1}%",
            seat,
            stats.policy,
            stats.wins,
            stats.win_rate(summary.games),
            stats.total_score,
            stats.avg_score(summary.games),
            stats.min_score,
            stats.max_score,
            exact,
            over,
            under,
        );
    }
    println!("Draws: {}", summary.draws);
}
