use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use skull_king_sim::game::GameError;
use skull_king_sim::rng::GameRng;
use skull_king_sim::simulation::{
    aggregate_results, run_seeded_game, GameConfig, GameResult, SimulationStats, StrategyKind,
};
use skull_king_sim::telemetry::init_tracing;

#[derive(Parser)]
#[command(name = "skull-king-sim")]
#[command(about = "Skull King trick-taking game simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log every card and trick
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a batch of games (default)
    Run {
        /// Number of games to simulate
        #[arg(short, long, default_value = "1000")]
        num_games: usize,

        /// Players at the table
        #[arg(short, long, default_value = "4")]
        players: usize,

        /// Base seed; game i uses seed + i
        #[arg(short, long)]
        seed: Option<u64>,

        /// Strategy for every seat: random or greedy
        #[arg(long, default_value = "random")]
        strategy: StrategyKind,

        /// Print the aggregated stats as JSON
        #[arg(long)]
        json: bool,
    },

    /// Play one game and log it trick by trick
    Play {
        #[arg(short, long, default_value = "4")]
        players: usize,

        #[arg(short, long)]
        seed: Option<u64>,

        #[arg(long, default_value = "random")]
        strategy: StrategyKind,
    },

    /// Greedy seats against random seats
    Compare {
        #[arg(short, long, default_value = "1000")]
        num_games: usize,

        /// Players at the table; even seats are greedy, odd seats random
        #[arg(short, long, default_value = "4")]
        players: usize,

        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Some(Commands::Run {
            num_games,
            players,
            seed,
            strategy,
            json,
        }) => {
            init_tracing(cli.verbose);
            run_simulation(num_games, players, seed, &vec![strategy; players], json)
        }
        Some(Commands::Play {
            players,
            seed,
            strategy,
        }) => {
            init_tracing(true);
            play_single(players, seed, strategy)
        }
        Some(Commands::Compare {
            num_games,
            players,
            seed,
        }) => {
            init_tracing(cli.verbose);
            compare_strategies(num_games, players, seed)
        }
        None => {
            init_tracing(cli.verbose);
            run_simulation(1000, 4, None, &[StrategyKind::Random; 4], false)
        }
    };

    if let Err(e) = outcome {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }
}

/// Run `num_games` games in parallel; seeds are `base + i` so a batch replays exactly.
fn simulate_batch(
    num_games: usize,
    players: usize,
    seed: Option<u64>,
    seats: &[StrategyKind],
) -> Result<(u64, Vec<GameResult>), GameError> {
    GameConfig::new(players).validate()?;
    let base_seed = seed.unwrap_or_else(|| GameRng::new(None).seed());

    let progress = ProgressBar::new(num_games as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games ({per_sec}, eta {eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let results = (0..num_games)
        .into_par_iter()
        .map(|i| {
            let config = GameConfig::new(players).with_seed(base_seed.wrapping_add(i as u64));
            let result = run_seeded_game(&config, seats);
            progress.inc(1);
            result
        })
        .collect::<Result<Vec<_>, _>>()?;

    progress.finish_and_clear();
    Ok((base_seed, results))
}

fn run_simulation(
    num_games: usize,
    players: usize,
    seed: Option<u64>,
    seats: &[StrategyKind],
    json: bool,
) -> Result<(), GameError> {
    let start = std::time::Instant::now();
    let (base_seed, results) = simulate_batch(num_games, players, seed, seats)?;
    let elapsed = start.elapsed();
    let stats = aggregate_results(&results);

    if json {
        match serde_json::to_string_pretty(&stats) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("✗ Failed to encode stats: {}", e),
        }
        return Ok(());
    }

    println!("\n=== Skull King Simulator ===\n");
    println!("Players: {}", players);
    println!("Games: {}", num_games);
    println!("Seed: {}", base_seed);
    println!();
    print_seat_table(&stats);
    println!();
    println!("Kraken-voided tricks per game: {:.2}", stats.avg_void_tricks);
    println!(
        "\nSimulation completed in {:.2?} ({:.0} games/sec)",
        elapsed,
        num_games as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}

fn print_seat_table(stats: &SimulationStats) {
    println!(
        "{:6} {:10} {:>10} {:>8} {:>8} {:>9} {:>9}",
        "Seat", "Strategy", "Avg score", "Best", "Worst", "Win rate", "Bids made"
    );
    println!("{:-<66}", "");
    for seat in &stats.seats {
        println!(
            "{:6} {:10} {:>10.1} {:>8} {:>8} {:>8.1}% {:>8.1}%",
            seat.seat,
            seat.strategy,
            seat.avg_score,
            seat.best_score,
            seat.worst_score,
            seat.win_rate * 100.0,
            seat.bid_accuracy * 100.0
        );
    }
}

fn play_single(players: usize, seed: Option<u64>, strategy: StrategyKind) -> Result<(), GameError> {
    let config = GameConfig {
        players,
        seed,
        ..GameConfig::default()
    };
    let result = run_seeded_game(&config, &vec![strategy; players])?;

    println!("\n=== Skull King: single game ===\n");
    println!("Seed: {}", result.seed);
    println!();
    for round in &result.rounds {
        println!(
            "Round {:2}: bets {:?} tricks {:?} scores {:?}",
            round.round_number, round.bets, round.tricks_taken, round.round_scores
        );
    }
    println!();
    for (seat, score) in result.final_scores.iter().enumerate() {
        println!("  Seat {} ({}): {}", seat, result.strategies[seat], score);
    }
    let winners = result.winners();
    println!("\nWinner(s): {:?}", winners);
    Ok(())
}

fn compare_strategies(num_games: usize, players: usize, seed: Option<u64>) -> Result<(), GameError> {
    let seats: Vec<StrategyKind> = (0..players)
        .map(|seat| {
            if seat % 2 == 0 {
                StrategyKind::Greedy
            } else {
                StrategyKind::Random
            }
        })
        .collect();

    println!("\n=== Strategy Comparison ===\n");
    println!("Players: {} (even seats greedy, odd seats random)", players);
    println!("Games: {}", num_games);
    println!();

    let start = std::time::Instant::now();
    let (base_seed, results) = simulate_batch(num_games, players, seed, &seats)?;
    let stats = aggregate_results(&results);

    println!("Seed: {}\n", base_seed);
    println!(
        "{:10} {:>8} {:>10} {:>9} {:>9}",
        "Strategy", "Seats", "Avg score", "Win rate", "Bids made"
    );
    println!("{:-<50}", "");
    for s in &stats.by_strategy {
        println!(
            "{:10} {:>8} {:>10.1} {:>8.1}% {:>8.1}%",
            s.strategy,
            s.seats_played,
            s.avg_score,
            s.win_rate * 100.0,
            s.bid_accuracy * 100.0
        );
    }

    let greedy = stats.by_strategy.iter().find(|s| s.strategy == "greedy");
    let random = stats.by_strategy.iter().find(|s| s.strategy == "random");
    if let (Some(g), Some(r)) = (greedy, random) {
        println!();
        if g.avg_score > r.avg_score {
            println!("✓ greedy scores {:.1} more per game on average", g.avg_score - r.avg_score);
        } else if r.avg_score > g.avg_score {
            println!("✓ random scores {:.1} more per game on average", r.avg_score - g.avg_score);
        } else {
            println!("Both strategies score the same on average");
        }
    }

    println!("\nCompleted in {:.2?}", start.elapsed());
    Ok(())
}
