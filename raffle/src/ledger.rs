use common::types::EntrantCount;
use near_sdk::collections::Vector;
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::{AccountId, Balance};

use crate::error::RaffleError;
use crate::events;
use crate::interfaces::raffle::{RaffleState, Snapshot};
use crate::utils::storage_keys::StorageKeys;

/// Entries and pot of the current round.
///
/// A participant may hold several slots; each entry is one slot and one
/// chance to win.
#[derive(BorshDeserialize, BorshSerialize)]
pub struct EntrantLedger{
    entrants: Vector<AccountId>,
    pot: Balance,
}

impl Default for EntrantLedger{
    fn default() -> Self {
        Self {
            entrants: Vector::new(StorageKeys::Entrants),
            pot: 0,
        }
    }
}

impl EntrantLedger{
    /// Records one entry and returns the new entrant count.
    pub fn enter(
        &mut self,
        state: RaffleState,
        entrance_fee: Balance,
        participant: &AccountId,
        paid: Balance,
    ) -> Result<EntrantCount, RaffleError>{
        if paid < entrance_fee {
            return Err(RaffleError::InsufficientFee { paid, required: entrance_fee });
        }
        if state != RaffleState::Open {
            return Err(RaffleError::RoundNotOpen);
        }

        let pot = self.pot
            .checked_add(paid)
            .unwrap_or_else(|| near_sdk::env::panic_str("Pot overflow"));

        self.entrants.push(participant);
        self.pot = pot;

        let count = self.entrants.len();
        events::entry_recorded(participant, count);

        Ok(count)
    }

    pub fn snapshot(&self) -> Snapshot{
        Snapshot {
            entrant_count: self.entrants.len(),
            pot: self.pot,
        }
    }

    pub fn entrant(&self, index: EntrantCount) -> Option<AccountId>{
        self.entrants.get(index)
    }

    pub fn len(&self) -> EntrantCount{
        self.entrants.len()
    }

    pub fn pot(&self) -> Balance{
        self.pot
    }

    pub fn reset(&mut self){
        self.entrants.clear();
        self.pot = 0;
    }
}
