use crate::card::types::{Card, CardId, CardKind, Color, TigressMode};
use thiserror::Error;

/// Total number of cards in the game: the specials plus four colors of 1..=14
pub const DECK_SIZE: usize = SPECIALS.len() + 4 * 14;

/// The two Loot cards, tracked for the loot pairing bonus
pub const LOOT_IDS: [CardId; 2] = [CardId(13), CardId(14)];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("cannot compare two Skull King cards")]
    IncomparableSkullKings,
    #[error("cannot compare two Tigress cards")]
    IncomparableTigresses,
    #[error("card not found: {0}")]
    UnknownCard(String),
    #[error("no card with id {0}")]
    UnknownId(u8),
}

const SPECIALS: &[(&str, CardKind)] = &[
    ("Skull King", CardKind::SkullKing),
    ("Harry the Giant", CardKind::Pirate),
    ("Juanita Jade", CardKind::Pirate),
    ("Rascal of Roatan", CardKind::Pirate),
    ("Rosie de Lancy", CardKind::Pirate),
    ("Bahij the Bandit", CardKind::Pirate),
    ("Sirena", CardKind::Mermaid { captured_skull_king: false }),
    ("Alyra", CardKind::Mermaid { captured_skull_king: false }),
    ("Kraken", CardKind::Kraken),
    ("Escape", CardKind::Escape),
    ("Escape", CardKind::Escape),
    ("Escape", CardKind::Escape),
    ("Escape", CardKind::Escape),
    ("Loot", CardKind::Loot),
    ("Loot", CardKind::Loot),
    ("White Whale", CardKind::WhiteWhale),
    ("Tigress", CardKind::Tigress { mode: TigressMode::Pirate }),
];

const NUMBER_NAMES: [[&str; 14]; 4] = [
    [
        "Black 1", "Black 2", "Black 3", "Black 4", "Black 5", "Black 6", "Black 7",
        "Black 8", "Black 9", "Black 10", "Black 11", "Black 12", "Black 13", "Black 14",
    ],
    [
        "Yellow 1", "Yellow 2", "Yellow 3", "Yellow 4", "Yellow 5", "Yellow 6", "Yellow 7",
        "Yellow 8", "Yellow 9", "Yellow 10", "Yellow 11", "Yellow 12", "Yellow 13", "Yellow 14",
    ],
    [
        "Green 1", "Green 2", "Green 3", "Green 4", "Green 5", "Green 6", "Green 7",
        "Green 8", "Green 9", "Green 10", "Green 11", "Green 12", "Green 13", "Green 14",
    ],
    [
        "Pink 1", "Pink 2", "Pink 3", "Pink 4", "Pink 5", "Pink 6", "Pink 7",
        "Pink 8", "Pink 9", "Pink 10", "Pink 11", "Pink 12", "Pink 13", "Pink 14",
    ],
];

/// Build the full catalog in id order: 17 special cards, then Black, Yellow,
/// Green and Pink 1..=14.
pub fn all_cards() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for (id, (name, kind)) in SPECIALS.iter().enumerate() {
        cards.push(Card::new(id as u8, *name, *kind));
    }

    for (color, names) in Color::ALL.iter().zip(NUMBER_NAMES.iter()) {
        for (i, name) in names.iter().enumerate() {
            let id = cards.len() as u8;
            let kind = CardKind::Number { color: *color, value: i as u8 + 1 };
            cards.push(Card::new(id, *name, kind));
        }
    }

    cards
}

/// Fresh instance of the card with the given id
pub fn card_by_id(id: CardId) -> Result<Card, CardError> {
    all_cards()
        .into_iter()
        .find(|c| c.id == id)
        .ok_or(CardError::UnknownId(id.0))
}

/// Fresh instance of the first card with the given name.
/// Escape and Loot have several copies; the lowest id is returned.
pub fn card_by_name(name: &str) -> Result<Card, CardError> {
    all_cards()
        .into_iter()
        .find(|c| c.name == name)
        .ok_or_else(|| CardError::UnknownCard(name.to_string()))
}
