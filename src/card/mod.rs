pub mod beats;
pub mod catalog;
pub mod types;

pub use beats::beats;
pub use catalog::{all_cards, card_by_id, card_by_name, CardError, DECK_SIZE, LOOT_IDS};
pub use types::{Card, CardId, CardKind, Color, TigressMode};
