use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use game_2048::game::Game;
use game_2048::policy::{play_out, PolicyKind, RunSummary};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "batch", about = "Simulate many seeded 2048 games in parallel and report statistics")]
struct Args {
    /// Number of games to play
    #[arg(long, default_value_t = 1000)]
    games: u64,

    /// Base seed; game `i` uses `seed + i`
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, value_enum, default_value = "corner")]
    policy: PolicyKind,

    /// Per-game: stop after this many board-changing turns
    #[arg(long)]
    max_turns: Option<u32>,

    /// Number of worker threads (defaults to Rayon default)
    #[arg(long, value_name = "N")]
    threads: Option<usize>,

    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .context("failed to configure rayon thread pool")?;
    }

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(args.games);
        pb.set_style(
            ProgressStyle::with_template("{spinner} {elapsed_precise} [{bar:40}] {pos}/{len} games | {msg}")?
                .tick_chars("⠁⠃⠇⠧⠷⠿⠻⠟⠯⠷⠧⠇⠃"),
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    };

    let start = Instant::now();
    let summaries: Vec<RunSummary> = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let summary = run_single_game(args.seed.wrapping_add(i), args.policy, args.max_turns);
            pb.inc(1);
            if summary.won {
                pb.set_message(format!("last win at game {i}"));
            }
            summary
        })
        .collect();
    pb.finish_and_clear();

    let stats = Stats::collect(&summaries);
    let elapsed = start.elapsed().as_secs_f64().max(1e-6);
    info!("played {} games in {:.2}s ({:.1} games/sec)", stats.games, elapsed, stats.games as f64 / elapsed);
    stats.print();
    Ok(())
}

/// One game on its own RNG streams; nothing is shared between games.
fn run_single_game(seed: u64, kind: PolicyKind, max_turns: Option<u32>) -> RunSummary {
    let mut game = Game::new(StdRng::seed_from_u64(seed));
    let mut policy = kind.build(StdRng::seed_from_u64(!seed));
    play_out(&mut game, &mut policy, max_turns, |_, _| {})
}

#[derive(Debug, Default)]
struct Stats {
    games: u64,
    wins: u64,
    total_score: u64,
    best_score: u64,
    total_turns: u64,
    highest_tiles: BTreeMap<u32, u64>,
}

impl Stats {
    fn collect(summaries: &[RunSummary]) -> Self {
        let mut stats = Stats::default();
        for s in summaries {
            stats.games += 1;
            stats.wins += u64::from(s.won);
            stats.total_score += s.score;
            stats.best_score = stats.best_score.max(s.score);
            stats.total_turns += u64::from(s.turns);
            *stats.highest_tiles.entry(s.highest_tile).or_default() += 1;
        }
        stats
    }

    fn print(&self) {
        let n = self.games.max(1) as f64;
        println!(
            "Games: {} | wins: {} ({:.1}%) | mean score: {:.1} | best score: {} | mean turns: {:.1}",
            self.games,
            self.wins,
            100.0 * self.wins as f64 / n,
            self.total_score as f64 / n,
            self.best_score,
            self.total_turns as f64 / n
        );
        println!("Highest tile reached:");
        for (tile, count) in self.highest_tiles.iter().rev() {
            println!("{:>7}: {:>6} ({:.1}%)", tile, count, 100.0 * *count as f64 / n);
        }
    }
}
