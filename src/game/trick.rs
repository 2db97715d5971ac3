use crate::card::{beats, Card, CardError, CardId, CardKind, Color};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Seat index of a player, 0-based
pub type PlayerId = usize;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    #[error("trick already holds a card from all {seats} seats")]
    TrickFull { seats: usize },
    #[error("cannot resolve an empty trick")]
    EmptyTrick,
    #[error("trick incomplete: {played} of {seats} cards played")]
    Incomplete { played: usize, seats: usize },
    #[error("trick already resolved")]
    AlreadyResolved,
    #[error(transparent)]
    Card(#[from] CardError),
}

/// Trick lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TrickPhase {
    Empty,
    Accumulating,
    Resolved,
}

/// Result of resolving a trick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrickOutcome {
    /// None when the Kraken voided the trick
    pub winner: Option<PlayerId>,
    pub winning_card: Option<CardId>,
    /// Who leads the next trick
    pub next_leader: PlayerId,
}

/// One trick: plays in turn order plus the flags derived from them.
#[derive(Debug, Clone, Serialize)]
pub struct Trick {
    seats: usize,
    plays: Vec<(PlayerId, Card)>,
    color_lock: Option<Color>,
    pms_played: bool,
    kraken_played: bool,
    white_whale_played: bool,
    winner_id: Option<PlayerId>,
    resolved: bool,
}

impl Trick {
    pub fn new(seats: usize) -> Self {
        Trick {
            seats,
            plays: Vec::with_capacity(seats),
            color_lock: None,
            pms_played: false,
            kraken_played: false,
            white_whale_played: false,
            winner_id: None,
            resolved: false,
        }
    }

    pub fn phase(&self) -> TrickPhase {
        if self.resolved {
            TrickPhase::Resolved
        } else if self.plays.is_empty() {
            TrickPhase::Empty
        } else {
            TrickPhase::Accumulating
        }
    }

    /// Add the next card in turn order
    pub fn add_card(&mut self, player_id: PlayerId, mut card: Card) -> Result<(), TrickError> {
        if self.resolved {
            return Err(TrickError::AlreadyResolved);
        }
        if self.plays.len() >= self.seats {
            return Err(TrickError::TrickFull { seats: self.seats });
        }

        card.trick_order = self.plays.len();

        if card.kind.is_pms() {
            self.pms_played = true;
        }
        match card.kind {
            CardKind::Kraken => self.kraken_played = true,
            CardKind::WhiteWhale => self.white_whale_played = true,
            CardKind::Number { color, .. } if self.color_lock.is_none() && !self.pms_played => {
                self.color_lock = Some(color);
            }
            _ => {}
        }

        debug!(player = player_id, card = %card, "card played");
        self.plays.push((player_id, card));
        Ok(())
    }

    /// Resolve the trick. Applies capture bonuses to the winning card; can only
    /// succeed once.
    pub fn get_winner(&mut self) -> Result<TrickOutcome, TrickError> {
        if self.resolved {
            return Err(TrickError::AlreadyResolved);
        }
        if self.plays.is_empty() {
            return Err(TrickError::EmptyTrick);
        }
        if self.plays.len() < self.seats {
            return Err(TrickError::Incomplete {
                played: self.plays.len(),
                seats: self.seats,
            });
        }
        self.resolved = true;

        let outcome = if self.white_whale_played {
            let whale = self.resolve_white_whale();
            if self.kraken_played {
                // Still void, but the White Whale's pick leads the next trick
                TrickOutcome {
                    winner: None,
                    winning_card: None,
                    next_leader: whale.next_leader,
                }
            } else {
                whale
            }
        } else if self.kraken_played {
            self.resolve_kraken()
        } else {
            self.resolve_standard()?
        };

        self.winner_id = outcome.winner;
        debug!(
            winner = ?outcome.winner,
            next_leader = outcome.next_leader,
            bonus = self.bonus_points(),
            "trick resolved"
        );
        Ok(outcome)
    }

    /// Only Numbers compete, by raw value; the earliest of equal values wins.
    /// Without any Number the leader keeps it.
    fn resolve_white_whale(&self) -> TrickOutcome {
        let mut best: Option<(u8, PlayerId, CardId)> = None;
        for (player, card) in &self.plays {
            if let Some(value) = card.value() {
                if best.map_or(true, |(top, _, _)| value > top) {
                    best = Some((value, *player, card.id));
                }
            }
        }

        let (winner, winning_card) = match best {
            Some((_, player, id)) => (player, id),
            None => (self.plays[0].0, self.plays[0].1.id),
        };

        TrickOutcome {
            winner: Some(winner),
            winning_card: Some(winning_card),
            next_leader: winner,
        }
    }

    /// Nobody wins; the seat after the Kraken player leads next.
    fn resolve_kraken(&self) -> TrickOutcome {
        let kraken_player = self
            .plays
            .iter()
            .find(|(_, card)| matches!(card.kind, CardKind::Kraken))
            .map(|(player, _)| *player)
            .unwrap_or(self.plays[0].0);

        TrickOutcome {
            winner: None,
            winning_card: None,
            next_leader: (kraken_player + 1) % self.seats,
        }
    }

    fn resolve_standard(&mut self) -> Result<TrickOutcome, TrickError> {
        let mut best = 0;
        for i in 1..self.plays.len() {
            if beats(&self.plays[i].1, &self.plays[best].1, self.color_lock)? {
                best = i;
            }
        }

        let pirates = self.plays.iter().filter(|(_, c)| c.kind.is_pirate()).count();
        let mermaids = self.plays.iter().filter(|(_, c)| c.kind.is_mermaid()).count();
        let skull_king = self.plays.iter().any(|(_, c)| c.kind.is_skull_king());

        // Pirate + Mermaid + Skull King: the first Mermaid always takes it
        if pirates > 0 && mermaids > 0 && skull_king {
            if let Some(pos) = self.plays.iter().position(|(_, c)| c.kind.is_mermaid()) {
                best = pos;
            }
        }

        let (winner, card) = &mut self.plays[best];
        if card.kind.is_pirate() {
            card.capture_mermaids(mermaids);
        } else if card.kind.is_mermaid() {
            if skull_king {
                card.capture_skull_king();
            }
        } else if card.kind.is_skull_king() {
            card.capture_pirates(pirates);
        }

        Ok(TrickOutcome {
            winner: Some(*winner),
            winning_card: Some(card.id),
            next_leader: *winner,
        })
    }

    /// Sum of the bonus points of every card in the trick
    pub fn bonus_points(&self) -> i32 {
        self.plays.iter().map(|(_, c)| c.bonus_points).sum()
    }

    pub fn plays(&self) -> &[(PlayerId, Card)] {
        &self.plays
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == self.seats
    }

    pub fn seats(&self) -> usize {
        self.seats
    }

    pub fn leader(&self) -> Option<PlayerId> {
        self.plays.first().map(|(player, _)| *player)
    }

    pub fn color_lock(&self) -> Option<Color> {
        self.color_lock
    }

    pub fn pms_played(&self) -> bool {
        self.pms_played
    }

    pub fn kraken_played(&self) -> bool {
        self.kraken_played
    }

    pub fn white_whale_played(&self) -> bool {
        self.white_whale_played
    }

    pub fn winner_id(&self) -> Option<PlayerId> {
        self.winner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{card_by_id, card_by_name, TigressMode};

    fn card(name: &str) -> Card {
        card_by_name(name).expect("card exists")
    }

    fn escape(n: u8) -> Card {
        card_by_id(CardId(9 + n)).expect("escape exists")
    }

    fn loot(n: u8) -> Card {
        card_by_id(CardId(13 + n)).expect("loot exists")
    }

    fn trick_of(cards: Vec<Card>) -> Trick {
        let mut trick = Trick::new(cards.len());
        for (player, card) in cards.into_iter().enumerate() {
            trick.add_card(player, card).expect("seat available");
        }
        trick
    }

    fn winner_of(names: &[&str]) -> Option<PlayerId> {
        let mut trick = trick_of(names.iter().map(|n| card(n)).collect());
        trick.get_winner().expect("resolvable").winner
    }

    #[test]
    fn test_numbers_same_color() {
        assert_eq!(winner_of(&["Yellow 5", "Yellow 6", "Yellow 7", "Yellow 8"]), Some(3));
    }

    #[test]
    fn test_numbers_lock_color_wins() {
        assert_eq!(winner_of(&["Yellow 5", "Pink 6", "Green 7", "Pink 8"]), Some(0));
    }

    #[test]
    fn test_black_trumps_lock() {
        assert_eq!(winner_of(&["Yellow 5", "Yellow 6", "Yellow 7", "Black 1"]), Some(3));
        assert_eq!(winner_of(&["Black 2", "Yellow 14", "Black 1", "Green 9"]), Some(0));
    }

    #[test]
    fn test_all_escapes_first_wins() {
        let mut trick = trick_of(vec![escape(0), escape(1), escape(2), escape(3)]);
        assert_eq!(trick.get_winner().unwrap().winner, Some(0));
    }

    #[test]
    fn test_escapes_and_loot() {
        let mut trick = trick_of(vec![escape(0), loot(0), loot(1), escape(1)]);
        assert_eq!(trick.get_winner().unwrap().winner, Some(0));
    }

    #[test]
    fn test_white_whale_without_numbers_goes_to_leader() {
        let mut trick = trick_of(vec![escape(0), loot(0), card("White Whale"), escape(1)]);
        assert_eq!(trick.get_winner().unwrap().winner, Some(0));
    }

    #[test]
    fn test_white_whale_with_kraken_is_void() {
        let mut trick = trick_of(vec![escape(0), loot(0), card("White Whale"), card("Kraken")]);
        let outcome = trick.get_winner().unwrap();
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.next_leader, 0, "the White Whale pick leads next");
        assert_eq!(trick.winner_id(), None);

        let mut trick = trick_of(vec![
            card("Kraken"),
            card("Yellow 4"),
            card("White Whale"),
            card("Pink 11"),
        ]);
        let outcome = trick.get_winner().unwrap();
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.next_leader, 3);
    }

    #[test]
    fn test_white_whale_tie_goes_to_earliest() {
        assert_eq!(winner_of(&["Yellow 10", "White Whale", "Green 10"]), Some(0));
        assert_eq!(winner_of(&["Pink 2", "Black 13", "White Whale", "Green 13"]), Some(1));
    }

    #[test]
    fn test_white_whale_raw_value() {
        assert_eq!(
            winner_of(&["Black 7", "Skull King", "White Whale", "Yellow 10"]),
            Some(3)
        );
    }

    #[test]
    fn test_white_whale_applies_no_capture_bonus() {
        let mut trick = trick_of(vec![
            card("Harry the Giant"),
            card("Sirena"),
            card("White Whale"),
            card("Green 2"),
        ]);
        assert_eq!(trick.get_winner().unwrap().winner, Some(3));
        assert_eq!(trick.bonus_points(), 0);
    }

    #[test]
    fn test_mermaid_beats_skull_king_without_pirate() {
        let mut trick = trick_of(vec![
            card("Black 10"),
            card("Skull King"),
            escape(0),
            card("Alyra"),
        ]);
        let outcome = trick.get_winner().unwrap();
        assert_eq!(outcome.winner, Some(3));
        assert_eq!(trick.bonus_points(), 50);
        let (_, mermaid) = &trick.plays()[3];
        assert_eq!(mermaid.kind, CardKind::Mermaid { captured_skull_king: true });
    }

    #[test]
    fn test_pirate_beats_mermaid_without_skull_king() {
        let mut trick = trick_of(vec![
            card("Black 10"),
            card("Harry the Giant"),
            escape(0),
            card("Alyra"),
        ]);
        assert_eq!(trick.get_winner().unwrap().winner, Some(1));
        assert_eq!(trick.bonus_points(), 20);
    }

    #[test]
    fn test_skull_king_captures_pirates() {
        let mut trick = trick_of(vec![
            card("Black 10"),
            card("Harry the Giant"),
            escape(0),
            card("Skull King"),
        ]);
        assert_eq!(trick.get_winner().unwrap().winner, Some(3));
        assert_eq!(trick.bonus_points(), 30);
    }

    #[test]
    fn test_full_pms_mermaid_wins_any_order() {
        let orders: [[&str; 4]; 3] = [
            ["Black 10", "Harry the Giant", "Sirena", "Skull King"],
            ["Black 10", "Sirena", "Harry the Giant", "Skull King"],
            ["Skull King", "Harry the Giant", "Black 10", "Sirena"],
        ];
        for names in orders {
            let mut trick = trick_of(names.iter().map(|n| card(n)).collect());
            let expected = names.iter().position(|n| *n == "Sirena");
            assert_eq!(trick.get_winner().unwrap().winner, expected, "{:?}", names);
            assert_eq!(trick.bonus_points(), 50);
        }
    }

    #[test]
    fn test_three_way_override_picks_first_mermaid() {
        let mut trick = trick_of(vec![
            card("Harry the Giant"),
            card("Alyra"),
            card("Skull King"),
            card("Sirena"),
        ]);
        assert_eq!(trick.get_winner().unwrap().winner, Some(1));
    }

    #[test]
    fn test_fourteen_bonuses() {
        let mut trick = trick_of(vec![
            card("Yellow 14"),
            card("Green 14"),
            card("Pink 14"),
            card("Yellow 5"),
        ]);
        assert_eq!(trick.get_winner().unwrap().winner, Some(0));
        assert_eq!(trick.bonus_points(), 30);

        let mut trick = trick_of(vec![
            card("Yellow 5"),
            card("Yellow 6"),
            card("Yellow 7"),
            card("Black 14"),
        ]);
        assert_eq!(trick.get_winner().unwrap().winner, Some(3));
        assert_eq!(trick.bonus_points(), 20);
    }

    #[test]
    fn test_kraken_voids_trick() {
        let mut trick = trick_of(vec![
            card("Harry the Giant"),
            card("Kraken"),
            card("Sirena"),
            card("Juanita Jade"),
        ]);
        let outcome = trick.get_winner().unwrap();
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.next_leader, 2);
        assert_eq!(trick.winner_id(), None);
        assert_eq!(trick.bonus_points(), 0, "no capture bonus on a void trick");
    }

    #[test]
    fn test_kraken_successor_wraps() {
        let mut trick = trick_of(vec![card("Yellow 3"), card("Yellow 9"), card("Kraken")]);
        assert_eq!(trick.get_winner().unwrap().next_leader, 0);
    }

    #[test]
    fn test_tigress_modes() {
        let mut tigress = card("Tigress");
        tigress.set_tigress_mode(TigressMode::Escape);
        let mut trick = trick_of(vec![tigress, card("Yellow 3")]);
        assert_eq!(trick.get_winner().unwrap().winner, Some(1));

        let mut trick = trick_of(vec![
            card("Skull King"),
            card("Tigress"),
            card("Harry the Giant"),
            escape(0),
        ]);
        assert_eq!(trick.get_winner().unwrap().winner, Some(0));
        assert_eq!(trick.bonus_points(), 60);
    }

    #[test]
    fn test_color_lock() {
        let trick = trick_of(vec![escape(0), card("Yellow 5"), card("Green 9")]);
        assert_eq!(trick.color_lock(), Some(Color::Yellow));
        assert!(!trick.pms_played());

        let trick = trick_of(vec![card("Harry the Giant"), card("Green 3")]);
        assert_eq!(trick.color_lock(), None);
        assert!(trick.pms_played());
    }

    #[test]
    fn test_trick_order_assigned() {
        let trick = trick_of(vec![card("Pink 1"), card("Pink 2"), card("Pink 3")]);
        for (i, (_, c)) in trick.plays().iter().enumerate() {
            assert_eq!(c.trick_order, i);
        }
    }

    #[test]
    fn test_lifecycle_errors() {
        let mut trick = Trick::new(2);
        assert_eq!(trick.phase(), TrickPhase::Empty);
        assert_eq!(trick.get_winner(), Err(TrickError::EmptyTrick));

        trick.add_card(0, card("Green 1")).unwrap();
        assert_eq!(trick.phase(), TrickPhase::Accumulating);
        assert_eq!(
            trick.get_winner(),
            Err(TrickError::Incomplete { played: 1, seats: 2 })
        );

        trick.add_card(1, card("Green 2")).unwrap();
        assert_eq!(
            trick.add_card(0, card("Green 3")),
            Err(TrickError::TrickFull { seats: 2 })
        );

        assert_eq!(trick.get_winner().unwrap().winner, Some(1));
        assert_eq!(trick.phase(), TrickPhase::Resolved);
        assert_eq!(trick.get_winner(), Err(TrickError::AlreadyResolved));
    }

    #[test]
    fn test_two_skull_kings_is_an_engine_error() {
        let mut trick = trick_of(vec![card("Skull King"), card("Skull King")]);
        assert_eq!(
            trick.get_winner(),
            Err(TrickError::Card(CardError::IncomparableSkullKings))
        );
    }
}
