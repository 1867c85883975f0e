use common::types::RandomWord;
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::json_types::{Base64VecU8, U128, U64};
use near_sdk::{env, ext_contract, log, near_bindgen, AccountId, Balance, PanicOnDefault, PromiseError};
use interfaces::raffle::{PendingRequestView, PrizePayoutView, RaffleState};
use machine::{Raffle, RaffleConfig};
use oracle::{VrfConfig, VrfCoordinatorClient, NUM_WORDS, REQUEST_CONFIRMATIONS};
use payout::NativeTransfer;
use utils::{gas, now_seconds};

pub mod coordinator;
pub mod error;
pub mod external;
pub mod interfaces;
pub mod ledger;
pub mod machine;
pub mod oracle;
pub mod readiness;
mod events;
mod payout;
mod utils;

pub use crate::error::RaffleError;
pub use crate::external::*;

#[cfg(test)]
mod test_utils;

#[near_bindgen]
#[derive(BorshDeserialize, BorshSerialize, PanicOnDefault)]
pub struct Contract{
    raffle: Raffle,
    vrf: VrfCoordinatorClient,
}

fn unwrap_or_panic<T>(result: Result<T, RaffleError>) -> T{
    result.unwrap_or_else(|err| env::panic_str(&err.to_string()))
}

#[near_bindgen]
impl Contract{
    /// Sets up the raffle. `interval` is in seconds; `vrf_coordinator` is the
    /// only account allowed to deliver random words.
    #[init]
    pub fn new(
        entrance_fee: U128,
        interval: U64,
        vrf_coordinator: AccountId,
        key_hash: String,
        subscription_id: U64,
        callback_gas_limit: U64,
    ) -> Self{
        assert!(!env::state_exists(), "Already initialized");

        let raffle = unwrap_or_panic(Raffle::new(
            RaffleConfig { entrance_fee: entrance_fee.0, interval: interval.0 },
            now_seconds(),
        ));
        let vrf = unwrap_or_panic(VrfCoordinatorClient::new(VrfConfig {
            coordinator: vrf_coordinator,
            key_hash,
            subscription_id: subscription_id.0,
            callback_gas_limit: callback_gas_limit.0,
        }));

        Self { raffle, vrf }
    }

    /// Buys one slot in the current round with the attached deposit.
    /// Returns the number of entries after this one.
    #[payable]
    pub fn enter_raffle(&mut self) -> U64{
        let participant = env::predecessor_account_id();
        let count = unwrap_or_panic(self.raffle.enter(&participant, env::attached_deposit()));

        U64(count)
    }

    /// Keeper check. The payload is handed back unchanged for `perform_upkeep`.
    pub fn check_upkeep(&self, check_data: Option<Base64VecU8>) -> (bool, Base64VecU8){
        let check = self.raffle.check_upkeep(now_seconds());

        (check.upkeep_needed, check_data.unwrap_or_else(|| Base64VecU8(Vec::new())))
    }

    /// Closes the round and requests randomness. Anyone may call it; it only
    /// succeeds when `check_upkeep` would report true.
    pub fn perform_upkeep(&mut self, _perform_data: Option<Base64VecU8>) -> U64{
        let request_id = unwrap_or_panic(self.raffle.perform_upkeep(&mut self.vrf, now_seconds()));
        log!("Draw requested for round {} as request {}", self.raffle.round(), request_id);

        U64(request_id)
    }

    /// Oracle callback. Returns the picked winner, or `None` when the payout
    /// was rejected and the round is locked. The round reopens once the prize
    /// transfer is confirmed by `on_prize_transfer`.
    pub fn fulfill_random_words(&mut self, request_id: U64, random_words: Vec<RandomWord>) -> Option<AccountId>{
        unwrap_or_panic(self.vrf.assert_coordinator(&env::predecessor_account_id()));

        let result = self.raffle.fulfill_random_words(
            &mut NativeTransfer,
            request_id.0,
            &random_words,
            now_seconds(),
        );

        match result {
            Ok(winner) => Some(winner),
            // the locked round must be persisted, so this one does not revert
            Err(RaffleError::PayoutFailed { .. }) => None,
            Err(err) => env::panic_str(&err.to_string()),
        }
    }

    pub fn get_entrance_fee(&self) -> U128{
        U128(self.raffle.config().entrance_fee)
    }

    pub fn get_interval(&self) -> U64{
        U64(self.raffle.config().interval)
    }

    pub fn get_player(&self, index: U64) -> Option<AccountId>{
        self.raffle.player(index.0)
    }

    pub fn get_number_of_players(&self) -> U64{
        U64(self.raffle.number_of_players())
    }

    pub fn get_pot(&self) -> U128{
        U128(self.raffle.pot())
    }

    pub fn get_recent_winner(&self) -> Option<AccountId>{
        self.raffle.recent_winner().cloned()
    }

    pub fn get_latest_timestamp(&self) -> U64{
        U64(self.raffle.last_timestamp())
    }

    pub fn get_raffle_state(&self) -> RaffleState{
        self.raffle.state()
    }

    pub fn get_round(&self) -> U64{
        U64(self.raffle.round())
    }

    pub fn get_num_words(&self) -> u32{
        NUM_WORDS
    }

    pub fn get_request_confirmations(&self) -> u16{
        REQUEST_CONFIRMATIONS
    }

    pub fn get_vrf_coordinator(&self) -> AccountId{
        self.vrf.config().coordinator.clone()
    }

    pub fn get_pending_request(&self) -> Option<PendingRequestView>{
        self.raffle.pending_request().map(PendingRequestView::from)
    }

    pub fn get_payout_in_flight(&self) -> Option<PrizePayoutView>{
        self.raffle.payout_in_flight().map(PrizePayoutView::from)
    }

    pub fn get_unpaid_prize(&self) -> Option<PrizePayoutView>{
        self.raffle.unpaid_prize().map(PrizePayoutView::from)
    }
}
