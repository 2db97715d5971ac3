pub mod analyze;
pub mod engine;
pub mod strategy;

pub use analyze::{aggregate_results, SeatStats, SimulationStats, StrategyStats};
pub use engine::{run_game, run_seeded_game, GameConfig, GameResult};
pub use strategy::{card_strength, GreedyStrategy, RandomStrategy, StrategyKind};
