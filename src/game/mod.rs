pub mod error;
pub mod round;
pub mod scoring;
pub mod state;
pub mod strategy;
pub mod trick;
pub mod zones;

#[cfg(test)]
mod tests_props_trick;

pub use error::GameError;
pub use round::{RoundSummary, Table, MAX_PLAYERS, MAX_ROUNDS, MIN_PLAYERS};
pub use scoring::{score_loot, score_player};
pub use state::{CardMask, GameState, LootRecord, RoundPhase};
pub use strategy::{legal_actions, PlayerView, Strategy};
pub use trick::{PlayerId, Trick, TrickError, TrickOutcome, TrickPhase};
pub use zones::{Deck, DeckError, Hand, HandError};
