//! The pairwise "beats" relation between two played cards.
//!
//! This is not a total order. The outcome depends on the trick's locked color
//! (Number against Number), on play order (ties between cards of equal strength),
//! and on whether a Mermaid has already captured the Skull King.

use crate::card::catalog::CardError;
use crate::card::types::{Card, CardKind, Color, TigressMode};

/// Strength group of a card for the beat table. A Tigress collapses into the
/// Pirate or Escape row depending on how it was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row {
    Number(Color, u8),
    Pirate,
    Mermaid { captured: bool },
    SkullKing,
    Escape,
    Kraken,
    WhiteWhale,
}

fn row(kind: &CardKind) -> Row {
    match *kind {
        CardKind::Number { color, value } => Row::Number(color, value),
        CardKind::Pirate | CardKind::Tigress { mode: TigressMode::Pirate } => Row::Pirate,
        CardKind::Mermaid { captured_skull_king } => Row::Mermaid {
            captured: captured_skull_king,
        },
        CardKind::SkullKing => Row::SkullKing,
        CardKind::Escape | CardKind::Loot | CardKind::Tigress { mode: TigressMode::Escape } => {
            Row::Escape
        }
        CardKind::Kraken => Row::Kraken,
        CardKind::WhiteWhale => Row::WhiteWhale,
    }
}

/// Does `a` beat `b`? `trick_color` is the trick's color lock and only matters
/// when both cards are Numbers.
pub fn beats(a: &Card, b: &Card, trick_color: Option<Color>) -> Result<bool, CardError> {
    match (&a.kind, &b.kind) {
        (CardKind::SkullKing, CardKind::SkullKing) => {
            return Err(CardError::IncomparableSkullKings)
        }
        (CardKind::Tigress { .. }, CardKind::Tigress { .. }) => {
            return Err(CardError::IncomparableTigresses)
        }
        // A Mermaid never beats the Tigress played as a Pirate
        (CardKind::Mermaid { .. }, CardKind::Tigress { mode: TigressMode::Pirate }) => {
            return Ok(false)
        }
        _ => {}
    }

    // Played earlier wins the tie
    let first = a.trick_order < b.trick_order;

    let result = match (row(&a.kind), row(&b.kind)) {
        (Row::Kraken, _) | (Row::WhiteWhale, _) => false,

        (Row::Number(ac, av), Row::Number(bc, bv)) => number_beats(ac, av, bc, bv, trick_color),
        (Row::Number(..), Row::Escape | Row::Kraken | Row::WhiteWhale) => true,
        (Row::Number(..), _) => false,

        (Row::Pirate, Row::Pirate | Row::WhiteWhale) => first,
        (Row::Pirate, Row::Mermaid { captured }) => !captured,
        (Row::Pirate, Row::SkullKing) => false,
        (Row::Pirate, _) => true,

        (Row::Mermaid { captured }, Row::Pirate) => captured,
        (Row::Mermaid { .. }, Row::Mermaid { .. } | Row::WhiteWhale) => first,
        (Row::Mermaid { .. }, _) => true,

        (Row::SkullKing, Row::Mermaid { .. }) => false,
        (Row::SkullKing, Row::WhiteWhale) => first,
        (Row::SkullKing, _) => true,

        (Row::Escape, Row::Escape | Row::Kraken | Row::WhiteWhale) => first,
        (Row::Escape, _) => false,
    };

    Ok(result)
}

fn number_beats(ac: Color, av: u8, bc: Color, bv: u8, trick_color: Option<Color>) -> bool {
    match (ac == Color::Black, bc == Color::Black) {
        (true, false) => return true,
        (false, true) => return false,
        _ => {}
    }

    if let Some(lock) = trick_color {
        match (ac == lock, bc == lock) {
            (true, false) => return true,
            (false, true) => return false,
            _ => {}
        }
    }

    av > bv
}
