use serde::{Deserialize, Serialize};
use std::fmt;

/// Suit colors of the Number cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Yellow,
    Green,
    Pink,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Black, Color::Yellow, Color::Green, Color::Pink];

    pub fn name(&self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Pink => "Pink",
        }
    }
}

/// How a Tigress is played: as a Pirate or as an Escape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TigressMode {
    #[default]
    Pirate,
    Escape,
}

/// Stable catalog identity of a card (0..73)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The ten card kinds.
///
/// `Mermaid` and `Tigress` carry per-trick state: whether the Mermaid captured the
/// Skull King, and which identity the Tigress was played as. Both are reset whenever
/// the deck is rebuilt from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardKind {
    Number { color: Color, value: u8 },
    Pirate,
    Mermaid { captured_skull_king: bool },
    SkullKing,
    Escape,
    Loot,
    Kraken,
    WhiteWhale,
    Tigress { mode: TigressMode },
}

impl CardKind {
    /// Pirate, or a Tigress played as one
    pub fn is_pirate(&self) -> bool {
        matches!(
            self,
            CardKind::Pirate | CardKind::Tigress { mode: TigressMode::Pirate }
        )
    }

    pub fn is_mermaid(&self) -> bool {
        matches!(self, CardKind::Mermaid { .. })
    }

    pub fn is_skull_king(&self) -> bool {
        matches!(self, CardKind::SkullKing)
    }

    /// Pirate, Mermaid or Skull King
    pub fn is_pms(&self) -> bool {
        self.is_pirate() || self.is_mermaid() || self.is_skull_king()
    }

    /// Escape, Loot, or a Tigress played as an Escape
    pub fn is_escape_like(&self) -> bool {
        matches!(
            self,
            CardKind::Escape | CardKind::Loot | CardKind::Tigress { mode: TigressMode::Escape }
        )
    }

    pub fn number(&self) -> Option<(Color, u8)> {
        match *self {
            CardKind::Number { color, value } => Some((color, value)),
            _ => None,
        }
    }
}

/// A card instance for one round.
///
/// `bonus_points` and `trick_order` are only meaningful inside the trick the card
/// was played in; a fresh instance comes from the catalog each round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: CardId,
    pub name: &'static str,
    pub kind: CardKind,
    pub bonus_points: i32,
    pub trick_order: usize,
}

impl Card {
    pub fn new(id: u8, name: &'static str, kind: CardKind) -> Self {
        Card {
            id: CardId(id),
            name,
            kind,
            bonus_points: base_bonus(&kind),
            trick_order: 0,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn color(&self) -> Option<Color> {
        self.kind.number().map(|(color, _)| color)
    }

    pub fn value(&self) -> Option<u8> {
        self.kind.number().map(|(_, value)| value)
    }

    pub fn is_number(&self) -> bool {
        self.kind.number().is_some()
    }

    pub fn is_loot(&self) -> bool {
        matches!(self.kind, CardKind::Loot)
    }

    /// Choose the Tigress identity. No effect on other kinds.
    pub fn set_tigress_mode(&mut self, mode: TigressMode) {
        if let CardKind::Tigress { mode: current } = &mut self.kind {
            *current = mode;
        }
    }

    pub fn capture_mermaids(&mut self, count: usize) {
        self.bonus_points += 20 * count as i32;
    }

    pub fn capture_pirates(&mut self, count: usize) {
        self.bonus_points += 30 * count as i32;
    }

    /// Mark a Mermaid as having captured the Skull King and grant the capture bonus
    pub fn capture_skull_king(&mut self) {
        if let CardKind::Mermaid { captured_skull_king } = &mut self.kind {
            *captured_skull_king = true;
            self.bonus_points += 50;
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            CardKind::Number { .. } => "Number",
            CardKind::Pirate => "Pirate",
            CardKind::Mermaid { .. } => "Mermaid",
            CardKind::SkullKing => "SkullKing",
            CardKind::Escape => "Escape",
            CardKind::Loot => "Loot",
            CardKind::Kraken => "Kraken",
            CardKind::WhiteWhale => "WhiteWhale",
            CardKind::Tigress { mode: TigressMode::Pirate } => "Tigress/Pirate",
            CardKind::Tigress { mode: TigressMode::Escape } => "Tigress/Escape",
        };
        write!(f, "({})[{}] {}", self.id.0, label, self.name)
    }
}

/// Bonus printed on the card itself: the 14s
fn base_bonus(kind: &CardKind) -> i32 {
    match *kind {
        CardKind::Number { color: Color::Black, value: 14 } => 20,
        CardKind::Number { value: 14, .. } => 10,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fourteens_carry_bonus() {
        let black = Card::new(30, "Black 14", CardKind::Number { color: Color::Black, value: 14 });
        let green = Card::new(58, "Green 14", CardKind::Number { color: Color::Green, value: 14 });
        let green13 = Card::new(57, "Green 13", CardKind::Number { color: Color::Green, value: 13 });
        assert_eq!(black.bonus_points, 20);
        assert_eq!(green.bonus_points, 10);
        assert_eq!(green13.bonus_points, 0);
    }

    #[test]
    fn test_tigress_mode_changes_grouping() {
        let mut tigress = Card::new(16, "Tigress", CardKind::Tigress { mode: TigressMode::default() });
        assert!(tigress.kind.is_pirate());
        assert!(tigress.kind.is_pms());

        tigress.set_tigress_mode(TigressMode::Escape);
        assert!(!tigress.kind.is_pirate());
        assert!(tigress.kind.is_escape_like());
    }

    #[test]
    fn test_mermaid_capture_sets_flag_and_bonus() {
        let mut mermaid = Card::new(6, "Sirena", CardKind::Mermaid { captured_skull_king: false });
        mermaid.capture_skull_king();
        assert_eq!(mermaid.kind, CardKind::Mermaid { captured_skull_king: true });
        assert_eq!(mermaid.bonus_points, 50);
    }

    #[test]
    fn test_capture_on_wrong_kind_is_noop() {
        let mut pirate = Card::new(1, "Harry the Giant", CardKind::Pirate);
        pirate.capture_skull_king();
        assert_eq!(pirate.bonus_points, 0);
        assert_eq!(pirate.kind, CardKind::Pirate);
    }
}
