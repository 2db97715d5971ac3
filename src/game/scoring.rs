use crate::game::state::{GameState, LootRecord};

/// Bonus each player of a successful loot pairing receives
pub const LOOT_BONUS: i32 = 20;

/// Score one player's round.
///
/// `bonus_points` is the summed bonus of every trick the player won; it only
/// counts when a non-zero bet is made exactly.
pub fn score_player(round_number: u8, bet: u8, tricks_collected: u8, bonus_points: i32) -> i32 {
    let round = round_number as i32;
    if bet == 0 {
        if tricks_collected == 0 {
            round * 10
        } else {
            -round * 10
        }
    } else if bet == tricks_collected {
        20 * bet as i32 + bonus_points
    } else {
        -10 * (bet as i32 - tricks_collected as i32).abs()
    }
}

/// Loot pairing bonus per player, applied once per loot card
pub fn score_loot(state: &GameState) -> Vec<i32> {
    let mut bonus = vec![0; state.players()];
    for record in state.loot.iter().flatten() {
        let LootRecord { player, trick_leader } = *record;
        if player == trick_leader || player >= bonus.len() || trick_leader >= bonus.len() {
            continue;
        }
        if state.made_bid(player) && state.made_bid(trick_leader) {
            bonus[player] += LOOT_BONUS;
            bonus[trick_leader] += LOOT_BONUS;
        }
    }
    bonus
}
