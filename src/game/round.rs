//! Round orchestration: deal, bid, play `round_number` tricks, score, clean up.

use crate::card::{CardKind, DECK_SIZE, LOOT_IDS};
use crate::game::error::GameError;
use crate::game::scoring::{score_loot, score_player};
use crate::game::state::{GameState, LootRecord, RoundPhase};
use crate::game::strategy::{PlayerView, Strategy};
use crate::game::trick::{PlayerId, Trick, TrickOutcome};
use crate::game::zones::{Deck, Hand, HandError};
use crate::rng::GameRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;
pub const MAX_ROUNDS: u8 = 10;

/// What happened in one round, captured before cleanup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_number: u8,
    pub bets: Vec<u8>,
    pub tricks_taken: Vec<u8>,
    /// Points scored this round, loot bonus included
    pub round_scores: Vec<i32>,
    pub loot_bonus: Vec<i32>,
    pub void_tricks: u8,
}

/// The table owns every piece of mutable game state: the deck, the hands, the
/// public state, and the tricks each player has won this round.
pub struct Table {
    state: GameState,
    deck: Deck,
    hands: Vec<Hand>,
    won_tricks: Vec<Vec<Trick>>,
    void_tricks: u8,
    rng: GameRng,
}

impl Table {
    pub fn new(players: usize, mut rng: GameRng) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            return Err(GameError::InvalidPlayerCount(players));
        }

        let mut state = GameState::new(players);
        state.starting_player = rng.random_range(players);

        let mut deck = Deck::new();
        deck.shuffle(&mut rng);

        Ok(Table {
            state,
            deck,
            hands: vec![Hand::new(); players],
            won_tricks: vec![Vec::new(); players],
            void_tricks: 0,
            rng,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn players(&self) -> usize {
        self.state.players()
    }

    pub fn hand(&self, player: PlayerId) -> Option<&Hand> {
        self.hands.get(player)
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Play one full round and return its summary. Any error aborts the round and
    /// cleans the table up, so the round can be played again. Cumulative scores
    /// only change once a round completes.
    pub fn play_round(
        &mut self,
        round_number: u8,
        strategies: &mut [Box<dyn Strategy>],
    ) -> Result<RoundSummary, GameError> {
        let players = self.players();
        if strategies.len() != players {
            return Err(GameError::StrategyCount {
                players,
                strategies: strategies.len(),
            });
        }
        if round_number == 0 || round_number > MAX_ROUNDS {
            return Err(GameError::InvalidRound {
                round: round_number,
                max: MAX_ROUNDS,
            });
        }
        let needed = players * round_number as usize;
        if needed > DECK_SIZE {
            return Err(GameError::DeckTooSmall {
                players,
                round: round_number,
                needed,
                available: DECK_SIZE,
            });
        }

        let result = self.run_round(round_number, strategies);
        if let Err(err) = &result {
            debug!(round = round_number, error = %err, "round aborted");
        }
        self.cleanup();
        result
    }

    fn run_round(
        &mut self,
        round_number: u8,
        strategies: &mut [Box<dyn Strategy>],
    ) -> Result<RoundSummary, GameError> {
        self.state.round_number = round_number;
        self.state.phase = RoundPhase::Dealing;
        info!(
            round = round_number,
            starting_player = self.state.starting_player,
            "starting round"
        );

        self.deal(round_number)?;
        self.state.next_phase();

        self.collect_bids(strategies)?;
        self.state.next_phase();

        for _ in 0..round_number {
            self.play_trick(strategies)?;
            self.state.next_phase();
        }

        let summary = self.score_round(strategies);
        self.state.next_phase();
        Ok(summary)
    }

    fn deal(&mut self, round_number: u8) -> Result<(), GameError> {
        for hand in self.hands.iter_mut() {
            *hand = Hand::with_cards(self.deck.draw(round_number as usize)?);
        }
        Ok(())
    }

    fn collect_bids(&mut self, strategies: &mut [Box<dyn Strategy>]) -> Result<(), GameError> {
        let round_number = self.state.round_number;
        let empty_trick = Trick::new(self.players());

        for (seat, strategy) in strategies.iter_mut().enumerate() {
            let view = PlayerView {
                seat,
                state: &self.state,
                hand: &self.hands[seat],
                current_trick: &empty_trick,
            };
            let bid = strategy.bid(&view);
            if bid > round_number {
                return Err(GameError::BidOutOfRange {
                    player: seat,
                    bid,
                    max: round_number,
                });
            }
            self.state.player_bets[seat] = Some(bid);
        }

        info!(bets = ?self.state.player_bets, "bids collected");
        Ok(())
    }

    /// Every seat plays once, starting from `starting_player`
    fn play_trick(
        &mut self,
        strategies: &mut [Box<dyn Strategy>],
    ) -> Result<TrickOutcome, GameError> {
        let players = self.players();
        let leader = self.state.starting_player;
        let mut trick = Trick::new(players);

        for offset in 0..players {
            let seat = (leader + offset) % players;
            let (card_id, mode) = {
                let view = PlayerView {
                    seat,
                    state: &self.state,
                    hand: &self.hands[seat],
                    current_trick: &trick,
                };
                let legal = view.legal_actions();
                let card_id = strategies[seat].play(&view, legal);

                let chosen = self.hands[seat]
                    .cards()
                    .iter()
                    .find(|c| c.id == card_id)
                    .map(|c| c.kind);
                let Some(kind) = chosen else {
                    return Err(GameError::Hand {
                        player: seat,
                        source: HandError::CardNotInHand(card_id),
                    });
                };
                if !legal.contains(card_id) {
                    return Err(GameError::IllegalCard {
                        player: seat,
                        card: card_id,
                    });
                }

                let mode = match kind {
                    CardKind::Tigress { .. } => Some(strategies[seat].tigress_mode(&view)),
                    _ => None,
                };
                (card_id, mode)
            };

            let mut card = self.hands[seat]
                .pick(card_id)
                .map_err(|source| GameError::Hand { player: seat, source })?;
            if let Some(mode) = mode {
                card.set_tigress_mode(mode);
            }

            self.state.cards_played.insert(card_id);
            if let Some(slot) = LOOT_IDS.iter().position(|id| *id == card_id) {
                self.state.loot[slot] = Some(LootRecord {
                    player: seat,
                    trick_leader: leader,
                });
            }

            trick.add_card(seat, card)?;
        }

        let outcome = trick.get_winner()?;
        match outcome.winner {
            Some(winner) => {
                self.state.tricks_taken[winner] += 1;
                for (seat, strategy) in strategies.iter_mut().enumerate() {
                    if seat == winner {
                        strategy.on_trick_won(&trick);
                    } else {
                        strategy.on_trick_lost();
                    }
                }
                debug!(winner, bonus = trick.bonus_points(), "trick won");
                self.won_tricks[winner].push(trick);
            }
            None => {
                self.void_tricks += 1;
                for strategy in strategies.iter_mut() {
                    strategy.on_trick_lost();
                }
                debug!(next_leader = outcome.next_leader, "kraken: trick void");
            }
        }

        self.state.starting_player = outcome.next_leader;
        Ok(outcome)
    }

    fn score_round(&mut self, strategies: &mut [Box<dyn Strategy>]) -> RoundSummary {
        let round_number = self.state.round_number;
        let loot_bonus = score_loot(&self.state);

        let mut round_scores = Vec::with_capacity(self.players());
        for seat in 0..self.players() {
            let bet = self.state.player_bets[seat].unwrap_or(0);
            let bonus: i32 = self.won_tricks[seat].iter().map(Trick::bonus_points).sum();
            let score = score_player(round_number, bet, self.state.tricks_taken[seat], bonus)
                + loot_bonus[seat];
            round_scores.push(score);
        }

        for (seat, score) in round_scores.iter().enumerate() {
            self.state.player_scores[seat] += score;
            strategies[seat].on_round_scored(*score);
        }

        let summary = RoundSummary {
            round_number,
            bets: self.state.player_bets.iter().map(|b| b.unwrap_or(0)).collect(),
            tricks_taken: self.state.tricks_taken.clone(),
            round_scores,
            loot_bonus,
            void_tricks: self.void_tricks,
        };

        info!(
            round = round_number,
            bets = ?summary.bets,
            tricks = ?summary.tricks_taken,
            scores = ?self.state.player_scores,
            "round scored"
        );
        summary
    }

    /// Release per-round state and prepare a fresh shuffled deck
    fn cleanup(&mut self) {
        for hand in self.hands.iter_mut() {
            hand.clear();
        }
        for tricks in self.won_tricks.iter_mut() {
            tricks.clear();
        }
        self.void_tricks = 0;
        self.state.reset_round();

        self.deck.reset();
        self.deck.shuffle(&mut self.rng);
        self.state.starting_player = self.rng.random_range(self.players());
    }
}
