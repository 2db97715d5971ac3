//! Built-in seat strategies used by the simulator

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::card::{beats, Card, CardId, CardKind, Color, TigressMode};
use crate::game::{CardMask, PlayerView, Strategy, Trick};
use crate::rng::GameRng;

/// Which built-in strategy sits in a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Random,
    Greedy,
}

impl StrategyKind {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::Greedy => "greedy",
        }
    }

    /// Build a strategy for `seat`; random seats draw from their own fork of `rng`.
    pub fn build(self, rng: &GameRng, seat: usize) -> Box<dyn Strategy> {
        match self {
            StrategyKind::Random => Box::new(RandomStrategy::new(rng.fork(seat as u64))),
            StrategyKind::Greedy => Box::new(GreedyStrategy::new()),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(StrategyKind::Random),
            "greedy" => Ok(StrategyKind::Greedy),
            other => Err(format!("unknown strategy '{}' (use 'random' or 'greedy')", other)),
        }
    }
}

/// Uniformly random legal choices, reproducible from its generator's seed
pub struct RandomStrategy {
    rng: GameRng,
}

impl RandomStrategy {
    pub fn new(rng: GameRng) -> Self {
        RandomStrategy { rng }
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        StrategyKind::Random.name()
    }

    fn bid(&mut self, view: &PlayerView<'_>) -> u8 {
        self.rng.random_inclusive(view.state.round_number)
    }

    fn play(&mut self, _view: &PlayerView<'_>, legal: CardMask) -> CardId {
        let ids: Vec<CardId> = legal.ids().collect();
        // An empty mask means an empty hand; the engine rejects the id.
        self.rng.choose(&ids).copied().unwrap_or(CardId(0))
    }

    fn tigress_mode(&mut self, _view: &PlayerView<'_>) -> TigressMode {
        if self.rng.random_range(2) == 0 {
            TigressMode::Pirate
        } else {
            TigressMode::Escape
        }
    }
}

/// Rough playing strength used to order cards from weakest to strongest
pub fn card_strength(card: &Card) -> u8 {
    match card.kind {
        CardKind::Escape | CardKind::Loot => 0,
        CardKind::Kraken => 1,
        CardKind::WhiteWhale => 2,
        CardKind::Number { color, value } => {
            let trump = if color == Color::Black { 14 } else { 0 };
            2 + value + trump
        }
        CardKind::Mermaid { .. } => 40,
        CardKind::Pirate | CardKind::Tigress { .. } => 45,
        CardKind::SkullKing => 50,
    }
}

/// Whether `card` would currently be winning `trick` if played now.
/// Ignores the Kraken, the White Whale and the three-way Mermaid rule.
fn takes_lead(trick: &Trick, card: &Card) -> bool {
    let plays = trick.plays();
    let Some((_, first)) = plays.first() else {
        return true;
    };
    let lock = trick.color_lock();
    let mut best = first;
    for (_, other) in &plays[1..] {
        if beats(other, best, lock).unwrap_or(false) {
            best = other;
        }
    }
    let mut candidate = card.clone();
    candidate.trick_order = plays.len();
    beats(&candidate, best, lock).unwrap_or(false)
}

/// Deterministic heuristic: bid the strong cards in hand, then chase the bid
/// with the cheapest winning card and dump the weakest card once it is met.
#[derive(Debug, Default)]
pub struct GreedyStrategy {
    wants_trick: bool,
}

impl GreedyStrategy {
    pub fn new() -> Self {
        GreedyStrategy::default()
    }

    fn is_strong(card: &Card) -> bool {
        match card.kind {
            CardKind::SkullKing | CardKind::Pirate | CardKind::Tigress { .. } => true,
            CardKind::Mermaid { .. } => true,
            CardKind::Number { color, value } => {
                value >= 12 || (color == Color::Black && value >= 8)
            }
            _ => false,
        }
    }
}

impl Strategy for GreedyStrategy {
    fn name(&self) -> &'static str {
        StrategyKind::Greedy.name()
    }

    fn bid(&mut self, view: &PlayerView<'_>) -> u8 {
        let strong = view.hand.cards().iter().filter(|c| Self::is_strong(c)).count();
        (strong as u8).min(view.state.round_number)
    }

    fn play(&mut self, view: &PlayerView<'_>, legal: CardMask) -> CardId {
        let mut candidates: Vec<&Card> = view
            .hand
            .cards()
            .iter()
            .filter(|c| legal.contains(c.id))
            .collect();
        candidates.sort_by_key(|c| (card_strength(c), c.id));

        let bet = view.state.player_bets.get(view.seat).copied().flatten().unwrap_or(0);
        let taken = view.state.tricks_taken.get(view.seat).copied().unwrap_or(0);
        self.wants_trick = taken < bet;

        let choice = if self.wants_trick {
            if view.current_trick.is_empty() {
                candidates.last().copied()
            } else {
                candidates
                    .iter()
                    .copied()
                    .find(|c| takes_lead(view.current_trick, c))
                    .or_else(|| candidates.first().copied())
            }
        } else {
            candidates
                .iter()
                .copied()
                .find(|c| view.current_trick.is_empty() || !takes_lead(view.current_trick, c))
                .or_else(|| candidates.first().copied())
        };

        choice.map(|c| c.id).unwrap_or(CardId(0))
    }

    fn tigress_mode(&mut self, _view: &PlayerView<'_>) -> TigressMode {
        if self.wants_trick {
            TigressMode::Pirate
        } else {
            TigressMode::Escape
        }
    }
}
