//! Headless AI-vs-AI simulation: random fleets, random shots, JSON summary.

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use schiffe_versenken::{init_logging, random_target, Manifest, Match, Phase, Side};
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Fix the RNG seed for reproducible games.
    #[arg(long)]
    seed: Option<u64>,
    /// Board side length.
    #[arg(long, default_value_t = 10)]
    size: usize,
    /// Fleet as comma-separated ship lengths; defaults to the classic fleet.
    #[arg(long, value_delimiter = ',')]
    fleet: Option<Vec<usize>>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    };

    let manifest = match cli.fleet {
        Some(lengths) => Manifest::from_lengths(&lengths),
        None => Manifest::classic(),
    };

    let mut game = Match::new(cli.size, manifest);
    game.place_fleet_randomly(Side::PlayerOne, &mut rng)?;
    game.place_fleet_randomly(Side::PlayerTwo, &mut rng)?;

    let mut shots = [0usize; 2];
    let winner = loop {
        let side = match game.phase() {
            Phase::Combat { turn } => turn,
            _ => anyhow::bail!("combat did not start"),
        };
        let target = random_target(&game.target_view(side), &mut rng)
            .ok_or_else(|| anyhow::anyhow!("no cells left to target"))?;
        let report = game.strike(side, target)?;
        shots[match side {
            Side::PlayerOne => 0,
            Side::PlayerTwo => 1,
        }] += 1;
        if let Some(winner) = report.winner {
            break winner;
        }
    };

    let winner = match winner {
        Side::PlayerOne => "player1",
        Side::PlayerTwo => "player2",
    };

    println!(
        "{}",
        serde_json::to_string(&json!({
            "winner": winner,
            "player1": { "shots": shots[0] },
            "player2": { "shots": shots[1] },
        }))?
    );
    Ok(())
}
