//! Property-based tests for trick resolution

use proptest::prelude::*;
use proptest::sample::subsequence;

use crate::card::{card_by_id, Card, CardId, CardKind, Color, TigressMode, DECK_SIZE};
use crate::game::trick::Trick;

fn build(ids: &[u8], tigress: TigressMode) -> Trick {
    let mut trick = Trick::new(ids.len());
    for (seat, id) in ids.iter().enumerate() {
        let mut card = card_by_id(CardId(*id)).expect("catalog id");
        card.set_tigress_mode(tigress);
        trick.add_card(seat, card).expect("seat available");
    }
    trick
}

fn any_trick() -> impl Strategy<Value = Vec<u8>> {
    subsequence((0u8..DECK_SIZE as u8).collect::<Vec<_>>(), 2..=6).prop_shuffle()
}

fn tigress_mode() -> impl Strategy<Value = TigressMode> {
    prop_oneof![Just(TigressMode::Pirate), Just(TigressMode::Escape)]
}

fn number_id(color: usize, value: u8) -> u8 {
    17 + color as u8 * 14 + (value - 1)
}

fn cards(trick: &Trick) -> Vec<&Card> {
    trick.plays().iter().map(|(_, c)| c).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Every trick of distinct catalog cards resolves, and exactly the tricks
    /// holding the Kraken are left without a winner.
    #[test]
    fn prop_every_trick_resolves(ids in any_trick(), mode in tigress_mode()) {
        let mut trick = build(&ids, mode);
        let outcome = trick.get_winner().expect("distinct cards always resolve");

        prop_assert!(outcome.next_leader < ids.len());
        prop_assert_eq!(outcome.winner.is_none(), trick.kraken_played());
        if let Some(winner) = outcome.winner {
            prop_assert!(winner < ids.len());
            prop_assert_eq!(outcome.next_leader, winner);
        }
    }

    /// Capture bonuses only ever add to the printed bonuses
    #[test]
    fn prop_bonus_never_below_printed(ids in any_trick(), mode in tigress_mode()) {
        let printed: i32 = ids
            .iter()
            .map(|id| card_by_id(CardId(*id)).expect("catalog id").bonus_points)
            .sum();
        let mut trick = build(&ids, mode);
        trick.get_winner().expect("resolves");
        prop_assert!(trick.bonus_points() >= printed);
    }

    /// Resolution is a pure function of the plays
    #[test]
    fn prop_resolution_is_deterministic(ids in any_trick(), mode in tigress_mode()) {
        let mut a = build(&ids, mode);
        let mut b = build(&ids, mode);
        prop_assert_eq!(a.get_winner().expect("resolves"), b.get_winner().expect("resolves"));
        prop_assert_eq!(a.bonus_points(), b.bonus_points());
    }

    /// Single color: highest value wins
    #[test]
    fn prop_single_color_highest_wins(
        color in 0usize..4,
        values in subsequence((1u8..=14).collect::<Vec<_>>(), 2..=6).prop_shuffle(),
    ) {
        let ids: Vec<u8> = values.iter().map(|v| number_id(color, *v)).collect();
        let mut trick = build(&ids, TigressMode::Pirate);
        let winner = trick.get_winner().expect("resolves").winner.expect("has winner");
        let best = values.iter().enumerate().max_by_key(|(_, v)| **v).map(|(i, _)| i);
        prop_assert_eq!(Some(winner), best);
    }

    /// Numbers only: Black beats everything, otherwise the lock color leads
    #[test]
    fn prop_numbers_black_then_lock(
        ids in subsequence((17u8..DECK_SIZE as u8).collect::<Vec<_>>(), 2..=6).prop_shuffle(),
    ) {
        let mut trick = build(&ids, TigressMode::Pirate);
        let lock = trick.color_lock().expect("first card is a number");
        let played: Vec<(Color, u8)> = cards(&trick)
            .iter()
            .map(|c| c.kind.number().expect("number"))
            .collect();
        let winner = trick.get_winner().expect("resolves").winner.expect("has winner");

        let top_color = if played.iter().any(|(c, _)| *c == Color::Black) {
            Color::Black
        } else {
            lock
        };
        let best = played
            .iter()
            .enumerate()
            .filter(|(_, (c, _))| *c == top_color)
            .max_by_key(|(_, (_, v))| *v)
            .map(|(i, _)| i);
        prop_assert_eq!(Some(winner), best);
    }

    /// White Whale: the earliest Number with the highest raw value leads next,
    /// and wins unless the Kraken voids the trick
    #[test]
    fn prop_white_whale_highest_value(ids in any_trick()) {
        let mut ids = ids;
        if !ids.contains(&15) {
            ids[0] = 15;
        }
        let mut trick = build(&ids, TigressMode::Pirate);
        let values: Vec<Option<u8>> = cards(&trick).iter().map(|c| c.value()).collect();
        let outcome = trick.get_winner().expect("resolves");

        let expected = match values.iter().flatten().max() {
            Some(max) => values.iter().position(|v| *v == Some(*max)).expect("max is present"),
            None => 0,
        };
        prop_assert_eq!(outcome.next_leader, expected);
        if trick.kraken_played() {
            prop_assert_eq!(outcome.winner, None);
        } else {
            prop_assert_eq!(outcome.winner, Some(expected));
        }
    }

    /// A Mermaid winning with the Skull King in the trick is flagged as its captor
    #[test]
    fn prop_mermaid_capture_flag(ids in any_trick(), mode in tigress_mode()) {
        let mut trick = build(&ids, mode);
        let outcome = trick.get_winner().expect("resolves");
        let king_present = trick.plays().iter().any(|(_, c)| c.kind.is_skull_king());

        if let (Some(card_id), false) = (outcome.winning_card, trick.white_whale_played()) {
            let (_, card) = trick
                .plays()
                .iter()
                .find(|(_, c)| c.id == card_id)
                .expect("winning card is in the trick");
            if let CardKind::Mermaid { captured_skull_king } = card.kind {
                prop_assert_eq!(captured_skull_king, king_present);
            }
        }
    }
}
