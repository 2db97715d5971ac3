use crate::card::{CardId, DECK_SIZE};
use crate::game::trick::PlayerId;
use serde::{Deserialize, Serialize};

/// Round phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Dealing,
    Bidding,
    Playing { trick: u8 },
    Scoring,
    Cleanup,
}

impl RoundPhase {
    /// Next phase for a round of `round_number` tricks
    pub fn next(&self, round_number: u8) -> RoundPhase {
        match *self {
            RoundPhase::Dealing => RoundPhase::Bidding,
            RoundPhase::Bidding => RoundPhase::Playing { trick: 1 },
            RoundPhase::Playing { trick } if trick < round_number => {
                RoundPhase::Playing { trick: trick + 1 }
            }
            RoundPhase::Playing { .. } => RoundPhase::Scoring,
            RoundPhase::Scoring => RoundPhase::Cleanup,
            RoundPhase::Cleanup => RoundPhase::Dealing,
        }
    }
}

/// Set of card ids as a bitmask over every catalog card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMask(pub u128);

impl CardMask {
    pub fn new() -> Self {
        CardMask(0)
    }

    pub fn insert(&mut self, id: CardId) {
        self.0 |= 1u128 << id.0;
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.0 & (1u128 << id.0) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        (0..DECK_SIZE as u8).map(CardId).filter(|id| self.contains(*id))
    }
}

/// Who played a Loot card, and who led the trick it was played in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootRecord {
    pub player: PlayerId,
    pub trick_leader: PlayerId,
}

/// Public game state, visible to every strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub round_number: u8,
    pub phase: RoundPhase,
    pub starting_player: PlayerId,
    /// None until the player has bid this round
    pub player_bets: Vec<Option<u8>>,
    /// Cumulative across rounds
    pub player_scores: Vec<i32>,
    pub tricks_taken: Vec<u8>,
    pub cards_played: CardMask,
    /// Indexed by loot slot (ids 13 and 14)
    pub loot: [Option<LootRecord>; 2],
}

impl GameState {
    pub fn new(players: usize) -> Self {
        GameState {
            round_number: 0,
            phase: RoundPhase::Dealing,
            starting_player: 0,
            player_bets: vec![None; players],
            player_scores: vec![0; players],
            tricks_taken: vec![0; players],
            cards_played: CardMask::new(),
            loot: [None; 2],
        }
    }

    pub fn players(&self) -> usize {
        self.player_scores.len()
    }

    /// Clear per-round state. Cumulative scores are kept.
    pub fn reset_round(&mut self) {
        let players = self.players();
        self.phase = RoundPhase::Dealing;
        self.player_bets = vec![None; players];
        self.tricks_taken = vec![0; players];
        self.cards_played.clear();
        self.loot = [None; 2];
    }

    pub fn next_phase(&mut self) {
        self.phase = self.phase.next(self.round_number);
    }

    /// Did the player take exactly as many tricks as they bid?
    pub fn made_bid(&self, player: PlayerId) -> bool {
        match (self.player_bets.get(player), self.tricks_taken.get(player)) {
            (Some(Some(bet)), Some(taken)) => bet == taken,
            _ => false,
        }
    }
}
