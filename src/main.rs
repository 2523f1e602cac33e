use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use game_2048::game::Game;
use game_2048::policy::{play_out, Policy, PolicyKind, ScriptedPolicy};
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Debug, Parser)]
#[command(name = "game-2048", about = "Play one seeded 2048 game from a script or a policy")]
struct Args {
    /// RNG seed (random if omitted; the seed used is logged)
    #[arg(long)]
    seed: Option<u64>,

    /// Moves to play, e.g. "left,up,down" or "LLUR"; overrides --policy
    #[arg(long, value_name = "SCRIPT")]
    moves: Option<String>,

    /// Policy used when no script is given
    #[arg(long, value_enum, default_value = "corner")]
    policy: PolicyKind,

    /// Stop after this many board-changing turns
    #[arg(long)]
    max_turns: Option<u32>,

    /// Only print the final board and summary
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);
    let policy_rng = StdRng::seed_from_u64(rng.gen());

    let mut policy: Box<dyn Policy + Send> = match &args.moves {
        Some(script) => Box::new(ScriptedPolicy::parse(script).context("invalid --moves script")?),
        None => args.policy.build(policy_rng),
    };

    let mut game = Game::new(rng);
    if !args.quiet {
        println!("{}", game.board());
    }
    let summary = play_out(&mut game, &mut policy, args.max_turns, |direction, board| {
        if !args.quiet {
            println!("{direction}{board}");
        }
    });

    if args.quiet {
        println!("{}", game.board());
    }
    println!(
        "Turns: {}, wasted inputs: {}, score: {}, board sum: {}, highest tile: {}, won: {}, over: {}",
        summary.turns, summary.wasted, summary.score, summary.board_sum, summary.highest_tile, summary.won, summary.over
    );
    Ok(())
}
