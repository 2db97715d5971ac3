use crate::card::CardId;
use crate::game::trick::{PlayerId, TrickError};
use crate::game::zones::{DeckError, HandError};
use thiserror::Error;

/// Everything that can abort a round. None of these are recoverable locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    // Configuration
    #[error("invalid player count {0} (expected 2..=8)")]
    InvalidPlayerCount(usize),
    #[error("invalid round {round} (expected 1..={max})")]
    InvalidRound { round: u8, max: u8 },
    #[error("deck too small: {players} players x {round} cards needs {needed}, deck has {available}")]
    DeckTooSmall {
        players: usize,
        round: u8,
        needed: usize,
        available: usize,
    },
    #[error("expected one strategy per seat ({players}), got {strategies}")]
    StrategyCount { players: usize, strategies: usize },

    // Protocol violations by a strategy
    #[error("player {player} bid {bid}, allowed range is 0..={max}")]
    BidOutOfRange { player: PlayerId, bid: u8, max: u8 },
    #[error("player {player} played illegal card {card}")]
    IllegalCard { player: PlayerId, card: CardId },
    #[error("player {player}: {source}")]
    Hand {
        player: PlayerId,
        #[source]
        source: HandError,
    },

    // Engine invariants
    #[error("trick error: {0}")]
    Trick(#[from] TrickError),
    #[error("deck error: {0}")]
    Deck(#[from] DeckError),
}

impl GameError {
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GameError::InvalidPlayerCount(_)
                | GameError::InvalidRound { .. }
                | GameError::DeckTooSmall { .. }
                | GameError::StrategyCount { .. }
        )
    }

    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            GameError::BidOutOfRange { .. } | GameError::IllegalCard { .. } | GameError::Hand { .. }
        )
    }
}
