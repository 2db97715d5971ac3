use serde::{Deserialize, Serialize};
use tracing::info;

use crate::card::DECK_SIZE;
use crate::game::{GameError, PlayerId, RoundSummary, Strategy, Table, MAX_PLAYERS, MAX_ROUNDS, MIN_PLAYERS};
use crate::rng::GameRng;
use crate::simulation::strategy::StrategyKind;

/// Table size, game length and seed for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub players: usize,
    pub rounds: u8,
    /// Random when absent; the seed actually used is recorded in the result
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            players: 4,
            rounds: MAX_ROUNDS,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(players: usize) -> Self {
        GameConfig {
            players,
            ..GameConfig::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rounds(mut self, rounds: u8) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(GameError::InvalidPlayerCount(self.players));
        }
        if self.rounds == 0 || self.rounds > MAX_ROUNDS {
            return Err(GameError::InvalidRound {
                round: self.rounds,
                max: MAX_ROUNDS,
            });
        }
        let needed = self.players * self.rounds as usize;
        if needed > DECK_SIZE {
            return Err(GameError::DeckTooSmall {
                players: self.players,
                round: self.rounds,
                needed,
                available: DECK_SIZE,
            });
        }
        Ok(())
    }
}

/// Full history of one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub seed: u64,
    pub players: usize,
    /// Strategy label per seat
    pub strategies: Vec<String>,
    pub rounds: Vec<RoundSummary>,
    pub final_scores: Vec<i32>,
}

impl GameResult {
    /// Seats sharing the top score
    pub fn winners(&self) -> Vec<PlayerId> {
        let Some(best) = self.final_scores.iter().max() else {
            return Vec::new();
        };
        self.final_scores
            .iter()
            .enumerate()
            .filter(|(_, score)| *score == best)
            .map(|(seat, _)| seat)
            .collect()
    }

    /// Rounds in which `seat` took exactly its bid
    pub fn bids_made(&self, seat: PlayerId) -> usize {
        self.rounds
            .iter()
            .filter(|r| r.bets.get(seat).is_some() && r.bets.get(seat) == r.tricks_taken.get(seat))
            .count()
    }
}

/// Play a whole game with one strategy per seat.
pub fn run_game(
    config: &GameConfig,
    strategies: &mut [Box<dyn Strategy>],
) -> Result<GameResult, GameError> {
    config.validate()?;
    if strategies.len() != config.players {
        return Err(GameError::StrategyCount {
            players: config.players,
            strategies: strategies.len(),
        });
    }

    let mut table = Table::new(config.players, GameRng::new(config.seed))?;
    let seed = table.seed();

    let mut rounds = Vec::with_capacity(config.rounds as usize);
    for round_number in 1..=config.rounds {
        rounds.push(table.play_round(round_number, strategies)?);
    }

    let final_scores = table.state().player_scores.clone();
    info!(seed, scores = ?final_scores, "game finished");

    Ok(GameResult {
        seed,
        players: config.players,
        strategies: strategies.iter().map(|s| s.name().to_string()).collect(),
        rounds,
        final_scores,
    })
}

/// Play a game with built-in strategies. Random seats draw from forks of the
/// game seed, so the seed alone reproduces the game.
pub fn run_seeded_game(config: &GameConfig, seats: &[StrategyKind]) -> Result<GameResult, GameError> {
    let rng = GameRng::new(config.seed);
    let config = GameConfig {
        seed: Some(rng.seed()),
        ..*config
    };
    let mut strategies: Vec<Box<dyn Strategy>> = seats
        .iter()
        .enumerate()
        .map(|(seat, kind)| kind.build(&rng, seat))
        .collect();
    run_game(&config, &mut strategies)
}
