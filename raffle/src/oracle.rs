use common::types::RequestId;
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::json_types::U64;
use near_sdk::{env, log, near_bindgen, AccountId, PromiseError};

use crate::error::RaffleError;
use crate::external::{ext_vrf_coordinator, this_contract};
use crate::interfaces::oracle::{OracleError, RandomnessOracle, RoundContext};
use crate::utils::gas;
use crate::{Contract, ContractContract};

pub const REQUEST_CONFIRMATIONS: u16 = 3;
pub const NUM_WORDS: u32 = 1;

/// Connection parameters of the VRF coordinator contract.
#[derive(BorshDeserialize, BorshSerialize, Clone, Debug, PartialEq, Eq)]
pub struct VrfConfig {
    /// Only this account may deliver random words
    pub coordinator: AccountId,
    /// Gas lane, selects the coordinator's proving key
    pub key_hash: String,
    pub subscription_id: u64,
    pub callback_gas_limit: u64,
}

impl VrfConfig {
    pub fn assert_valid(&self) -> Result<(), RaffleError> {
        if self.key_hash.is_empty() {
            return Err(RaffleError::InvalidConfig("key hash must not be empty".to_string()));
        }
        if self.subscription_id == 0 {
            return Err(RaffleError::InvalidConfig("subscription id must be positive".to_string()));
        }
        if self.callback_gas_limit == 0 || self.callback_gas_limit > gas::MAX_CALLBACK_GAS.0 {
            return Err(RaffleError::InvalidConfig(format!(
                "callback gas limit must be within 1..={}",
                gas::MAX_CALLBACK_GAS.0
            )));
        }
        Ok(())
    }
}

/// Places requests with the coordinator contract through a cross-contract
/// call. Request ids are allocated here, starting at 1, and travel with the
/// call so the coordinator answers under the same id. A rejection by the
/// coordinator comes back through `on_random_words_requested`.
#[derive(BorshDeserialize, BorshSerialize)]
pub struct VrfCoordinatorClient {
    config: VrfConfig,
    next_request_id: RequestId,
}

impl VrfCoordinatorClient {
    pub fn new(config: VrfConfig) -> Result<Self, RaffleError> {
        config.assert_valid()?;
        Ok(Self { config, next_request_id: 1 })
    }

    pub fn config(&self) -> &VrfConfig {
        &self.config
    }

    /// Fulfillments are only trusted from the configured coordinator.
    pub fn assert_coordinator(&self, caller: &AccountId) -> Result<(), RaffleError> {
        if caller != &self.config.coordinator {
            log!("Fulfillment from unexpected account {}", caller);
            return Err(RaffleError::UnauthorizedOracle { caller: caller.clone() });
        }
        Ok(())
    }
}

impl RandomnessOracle for VrfCoordinatorClient {
    fn request_random_words(&mut self, round: &RoundContext) -> Result<RequestId, OracleError> {
        if round.entrant_count == 0 || round.pot == 0 {
            return Err(OracleError::MalformedRequest(format!(
                "round {} has nothing to draw",
                round.round
            )));
        }

        let required = gas::REQUEST_RANDOM_WORDS.0 + gas::ON_RANDOM_WORDS_REQUESTED.0;
        let available = env::prepaid_gas().0.saturating_sub(env::used_gas().0);
        if available < required {
            return Err(OracleError::InsufficientGas { available, required });
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;

        ext_vrf_coordinator::request_random_words(
            self.config.key_hash.clone(),
            U64(self.config.subscription_id),
            REQUEST_CONFIRMATIONS,
            U64(self.config.callback_gas_limit),
            NUM_WORDS,
            U64(request_id),
            self.config.coordinator.clone(),
            0,
            gas::REQUEST_RANDOM_WORDS,
        )
        .then(this_contract::on_random_words_requested(
            U64(request_id),
            env::current_account_id(),
            0,
            gas::ON_RANDOM_WORDS_REQUESTED,
        ));
        log!("Requested {} random words from {} as request {}", NUM_WORDS, self.config.coordinator, request_id);

        Ok(request_id)
    }
}

#[near_bindgen]
impl Contract {
    /// Result of placing `request_id` with the coordinator. A rejected request
    /// reopens the round so it can be triggered again.
    #[private]
    pub fn on_random_words_requested(&mut self, request_id: U64, #[callback_result] result: Result<(), PromiseError>) -> bool {
        if result.is_ok() {
            return true;
        }

        log!("Coordinator rejected request {}", request_id.0);
        if let Err(err) = self.raffle.abort_request(request_id.0, "rejected by the coordinator") {
            log!("Nothing to abort: {}", err);
        }
        false
    }
}
