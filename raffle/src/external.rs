use crate::*;

// Callback
#[ext_contract(this_contract)]
pub trait ExtSelf {
    fn on_random_words_requested(&mut self, request_id: U64, #[callback_result] result: Result<(), PromiseError>) -> bool;
    fn on_prize_transfer(&mut self, winner: AccountId, amount: U128, #[callback_result] result: Result<(), PromiseError>) -> bool;
}

#[ext_contract(ext_vrf_coordinator)]
pub trait ExtVrfCoordinator {
    /// Asks the coordinator to deliver `num_words` words to the caller's
    /// `fulfill_random_words` under `request_id`.
    fn request_random_words(
        &mut self,
        key_hash: String,
        subscription_id: U64,
        request_confirmations: u16,
        callback_gas_limit: U64,
        num_words: u32,
        request_id: U64,
    );
}
