use crate::card::{CardId, TigressMode};
use crate::game::state::{CardMask, GameState};
use crate::game::trick::{PlayerId, Trick};
use crate::game::zones::Hand;

/// What a seat sees when asked to act: the public state, its own hand, and the
/// trick in progress.
#[derive(Debug, Clone, Copy)]
pub struct PlayerView<'a> {
    pub seat: PlayerId,
    pub state: &'a GameState,
    pub hand: &'a Hand,
    pub current_trick: &'a Trick,
}

impl<'a> PlayerView<'a> {
    pub fn legal_actions(&self) -> CardMask {
        legal_actions(self.hand, self.current_trick)
    }
}

/// Cards in `hand` that may be played into `trick`.
///
/// Anything goes on an empty trick or when no color is locked. With a locked
/// color, a player holding that color must play it or a non-Number card.
pub fn legal_actions(hand: &Hand, trick: &Trick) -> CardMask {
    let mut legal = CardMask::new();
    let lock = if trick.is_empty() { None } else { trick.color_lock() };

    let must_follow = match lock {
        Some(color) => hand.cards().iter().any(|c| c.color() == Some(color)),
        None => false,
    };

    for card in hand.cards() {
        let allowed = match card.color() {
            Some(color) if must_follow => Some(color) == lock,
            _ => true,
        };
        if allowed {
            legal.insert(card.id);
        }
    }

    legal
}

/// Decision-maker for one seat. The engine treats every call as a blocking
/// request; returning an illegal answer aborts the round.
pub trait Strategy {
    /// Label recorded in game results
    fn name(&self) -> &'static str {
        "custom"
    }

    /// Bid in `0..=round_number`
    fn bid(&mut self, view: &PlayerView<'_>) -> u8;

    /// A card id contained in `legal`
    fn play(&mut self, view: &PlayerView<'_>, legal: CardMask) -> CardId;

    /// Asked only when the chosen card is the Tigress
    fn tigress_mode(&mut self, _view: &PlayerView<'_>) -> TigressMode {
        TigressMode::Pirate
    }

    fn on_trick_won(&mut self, _trick: &Trick) {}

    fn on_trick_lost(&mut self) {}

    fn on_round_scored(&mut self, _round_score: i32) {}
}
