use near_sdk::Balance;

use crate::interfaces::raffle::RaffleState;

/// Whether a draw may start right now. Pure; safe to call from views.
pub fn is_ready(
    state: RaffleState,
    entrant_count: u64,
    pot: Balance,
    now: u64,
    last_timestamp: u64,
    interval: u64,
) -> bool {
    state == RaffleState::Open
        && entrant_count > 0
        && pot > 0
        && now.saturating_sub(last_timestamp) >= interval
}
