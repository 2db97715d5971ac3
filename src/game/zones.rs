use crate::card::{all_cards, Card, CardId};
use crate::rng::GameRng;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("cannot draw {requested} cards, only {remaining} left")]
    NotEnoughCards { requested: usize, remaining: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    #[error("card {0} not in hand")]
    CardNotInHand(CardId),
}

/// Deck - ordered stack of cards, drawn from the end
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// A fresh, unshuffled deck in catalog order
    pub fn new() -> Self {
        Deck { cards: all_cards() }
    }

    /// Rebuild from the catalog, discarding any per-round card state
    pub fn reset(&mut self) {
        self.cards = all_cards();
    }

    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Remove and return the last `n` cards
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if n > self.cards.len() {
            return Err(DeckError::NotEnoughCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let split = self.cards.len() - n;
        let mut drawn = self.cards.split_off(split);
        drawn.reverse();
        Ok(drawn)
    }

    /// Rig the next deal: `hands[i]` goes to the i-th hand drawn, in order.
    #[cfg(test)]
    pub(crate) fn stack(&mut self, hands: &[Vec<CardId>]) {
        let mut top = Vec::new();
        for hand in hands.iter().rev() {
            for id in hand.iter().rev() {
                if let Some(pos) = self.cards.iter().position(|c| c.id == *id) {
                    top.push(self.cards.remove(pos));
                }
            }
        }
        self.cards.extend(top);
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Hand - cards held by one player
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Hand { cards }
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove and return the card with the given id
    pub fn pick(&mut self, id: CardId) -> Result<Card, HandError> {
        let pos = self
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or(HandError::CardNotInHand(id))?;
        Ok(self.cards.remove(pos))
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.cards.iter().any(|c| c.id == id)
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
