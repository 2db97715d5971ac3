//! Aggregate statistics over many simulated games

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::simulation::engine::GameResult;

/// Per-seat results across a batch of games
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatStats {
    pub seat: usize,
    pub strategy: String,
    pub avg_score: f64,
    pub best_score: i32,
    pub worst_score: i32,
    /// Share of games this seat finished on top (ties count for every tied seat)
    pub win_rate: f64,
    /// Share of rounds in which the seat took exactly its bid
    pub bid_accuracy: f64,
}

/// Per-strategy results, pooled over every seat that strategy occupied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyStats {
    pub strategy: String,
    pub seats_played: usize,
    pub avg_score: f64,
    pub win_rate: f64,
    pub bid_accuracy: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationStats {
    pub generated_at: DateTime<Utc>,
    pub games: usize,
    pub seats: Vec<SeatStats>,
    pub by_strategy: Vec<StrategyStats>,
    /// Average Kraken-voided tricks per game
    pub avg_void_tricks: f64,
}

#[derive(Default)]
struct Tally {
    strategy: String,
    games: usize,
    score_sum: i64,
    best: Option<i32>,
    worst: Option<i32>,
    wins: usize,
    rounds: usize,
    bids_made: usize,
}

impl Tally {
    fn record(&mut self, result: &GameResult, seat: usize, won: bool) {
        let score = result.final_scores[seat];
        self.games += 1;
        self.score_sum += score as i64;
        self.best = Some(self.best.map_or(score, |b| b.max(score)));
        self.worst = Some(self.worst.map_or(score, |w| w.min(score)));
        if won {
            self.wins += 1;
        }
        self.rounds += result.rounds.len();
        self.bids_made += result.bids_made(seat);
    }

    fn ratio(num: usize, den: usize) -> f64 {
        if den == 0 {
            0.0
        } else {
            num as f64 / den as f64
        }
    }

    fn avg_score(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.score_sum as f64 / self.games as f64
        }
    }
}

/// Fold a batch of results into per-seat and per-strategy stats. Seats are
/// taken from the widest table in the batch.
pub fn aggregate_results(results: &[GameResult]) -> SimulationStats {
    let seat_count = results.iter().map(|r| r.players).max().unwrap_or(0);
    let mut seats: Vec<Tally> = (0..seat_count).map(|_| Tally::default()).collect();
    let mut strategies: BTreeMap<String, Tally> = BTreeMap::new();
    let mut void_tricks = 0usize;

    for result in results {
        let winners = result.winners();
        for seat in 0..result.players.min(result.final_scores.len()) {
            let won = winners.contains(&seat);
            let name = result
                .strategies
                .get(seat)
                .cloned()
                .unwrap_or_else(|| "custom".to_string());

            let tally = &mut seats[seat];
            if tally.strategy.is_empty() {
                tally.strategy = name.clone();
            } else if tally.strategy != name {
                tally.strategy = "mixed".to_string();
            }
            tally.record(result, seat, won);

            let pooled = strategies.entry(name.clone()).or_default();
            pooled.strategy = name;
            pooled.record(result, seat, won);
        }
        void_tricks += result.rounds.iter().map(|r| r.void_tricks as usize).sum::<usize>();
    }

    let seats = seats
        .iter()
        .enumerate()
        .map(|(seat, t)| SeatStats {
            seat,
            strategy: t.strategy.clone(),
            avg_score: t.avg_score(),
            best_score: t.best.unwrap_or(0),
            worst_score: t.worst.unwrap_or(0),
            win_rate: Tally::ratio(t.wins, t.games),
            bid_accuracy: Tally::ratio(t.bids_made, t.rounds),
        })
        .collect();

    let by_strategy = strategies
        .values()
        .map(|t| StrategyStats {
            strategy: t.strategy.clone(),
            seats_played: t.games,
            avg_score: t.avg_score(),
            win_rate: Tally::ratio(t.wins, t.games),
            bid_accuracy: Tally::ratio(t.bids_made, t.rounds),
        })
        .collect();

    SimulationStats {
        generated_at: Utc::now(),
        games: results.len(),
        seats,
        by_strategy,
        avg_void_tricks: Tally::ratio(void_tricks, results.len()),
    }
}
