use near_sdk::AccountId;
use near_sdk::Balance;

pub fn alice() -> AccountId {
    "alice".parse().unwrap()
}
pub fn bob() -> AccountId {
    "bob".parse().unwrap()
}
pub fn owner() -> AccountId {
    "owner".parse().unwrap()
}
pub fn charlie() -> AccountId {
    "charlie".parse().unwrap()
}

pub fn coordinator() -> AccountId {
    "vrf-coordinator".parse().unwrap()
}
pub fn raffle_account() -> AccountId {
    "raffle".parse().unwrap()
}

pub fn ntoy(near_amount: Balance) -> Balance {
    near_amount * 10u128.pow(24)
}

#[cfg(test)]
pub mod tests {
    use common::types::{RandomWord, RequestId};
    use near_sdk::test_utils::VMContextBuilder;
    use near_sdk::{testing_env, PromiseError, VMContext};

    use crate::*;
    use crate::interfaces::oracle::{OracleError, RandomnessOracle, RoundContext};
    use crate::interfaces::payout::{PayoutSink, PayoutStatus, TransferError};

    pub use super::*;

    pub const ONE_SECOND_TS: u64 = 1_000_000_000;
    pub const START_SECONDS: u64 = 1_000;

    pub const FEE: Balance = 1_000_000_000_000_000_000_000_000;
    pub const INTERVAL: u64 = 30;

    pub const KEY_HASH: &str = "lane-500-gwei";
    pub const SUBSCRIPTION_ID: u64 = 1;
    pub const CALLBACK_GAS_LIMIT: u64 = 50_000_000_000_000;

    /// Fresh storage with the raffle as the current account.
    pub fn setup_context() {
        testing_env!(VMContextBuilder::new()
            .current_account_id(raffle_account())
            .predecessor_account_id(owner())
            .build());
    }

    /// Accepts every request unless told to fail; ids start at 1.
    pub struct MockOracle {
        pub next_request_id: RequestId,
        pub requests: Vec<RoundContext>,
        pub fail_with: Option<OracleError>,
    }

    impl Default for MockOracle {
        fn default() -> Self {
            Self { next_request_id: 1, requests: Vec::new(), fail_with: None }
        }
    }

    impl MockOracle {
        pub fn failing(err: OracleError) -> Self {
            Self { fail_with: Some(err), ..Self::default() }
        }
    }

    impl RandomnessOracle for MockOracle {
        fn request_random_words(&mut self, round: &RoundContext) -> Result<RequestId, OracleError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }

            let request_id = self.next_request_id;
            self.next_request_id += 1;
            self.requests.push(*round);

            Ok(request_id)
        }
    }

    /// Completes payouts on the spot unless built with `scheduling` or `failing`.
    #[derive(Default)]
    pub struct MockPayout {
        pub payments: Vec<(AccountId, Balance)>,
        pub fail_with: Option<TransferError>,
        pub schedule: bool,
    }

    impl MockPayout {
        pub fn failing(err: TransferError) -> Self {
            Self { fail_with: Some(err), ..Self::default() }
        }

        pub fn scheduling() -> Self {
            Self { schedule: true, ..Self::default() }
        }
    }

    impl PayoutSink for MockPayout {
        fn pay(&mut self, recipient: &AccountId, amount: Balance) -> Result<PayoutStatus, TransferError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }

            self.payments.push((recipient.clone(), amount));
            if self.schedule {
                Ok(PayoutStatus::Scheduled)
            } else {
                Ok(PayoutStatus::Completed)
            }
        }
    }

    pub struct Emulator {
        pub contract: Contract,
        pub block_timestamp: u64,
        pub account_balance: Balance,
        pub context: VMContext,
    }

    impl Emulator {
        pub fn new(entrance_fee: Balance, interval: u64) -> Self {
            let block_timestamp = START_SECONDS * ONE_SECOND_TS;
            let account_balance = ntoy(100);
            let context = VMContextBuilder::new()
                .current_account_id(raffle_account())
                .predecessor_account_id(owner())
                .block_timestamp(block_timestamp)
                .account_balance(account_balance)
                .build();
            testing_env!(context.clone());
            let contract = Contract::new(
                U128(entrance_fee),
                U64(interval),
                coordinator(),
                KEY_HASH.to_string(),
                U64(SUBSCRIPTION_ID),
                U64(CALLBACK_GAS_LIMIT),
            );
            Emulator {
                contract,
                block_timestamp,
                account_balance,
                context,
            }
        }

        pub fn update_context(&mut self, predecessor: AccountId, deposit: Balance) {
            self.context = VMContextBuilder::new()
                .current_account_id(raffle_account())
                .predecessor_account_id(predecessor)
                .block_timestamp(self.block_timestamp)
                .account_balance(self.account_balance)
                .attached_deposit(deposit)
                .build();
            testing_env!(self.context.clone());
        }

        pub fn skip_seconds(&mut self, num: u64) {
            self.block_timestamp += num * ONE_SECOND_TS;
            self.update_context(owner(), 0);
        }

        pub fn enter(&mut self, participant: AccountId, deposit: Balance) -> U64 {
            self.update_context(participant, deposit);
            self.contract.enter_raffle()
        }

        pub fn perform_upkeep(&mut self) -> U64 {
            self.update_context(owner(), 0);
            self.contract.perform_upkeep(None)
        }

        /// Delivers words as the coordinator.
        pub fn fulfill(&mut self, request_id: U64, random_words: Vec<RandomWord>) -> Option<AccountId> {
            self.update_context(coordinator(), 0);
            self.contract.fulfill_random_words(request_id, random_words)
        }

        /// Runs the transfer callback as the runtime would after the prize transfer.
        pub fn settle_transfer(&mut self, winner: AccountId, amount: Balance, result: Result<(), PromiseError>) -> bool {
            self.update_context(raffle_account(), 0);
            self.contract.on_prize_transfer(winner, U128(amount), result)
        }

        /// Runs the request callback as the runtime would after the coordinator call.
        pub fn settle_request(&mut self, request_id: U64, result: Result<(), PromiseError>) -> bool {
            self.update_context(raffle_account(), 0);
            self.contract.on_random_words_requested(request_id, result)
        }
    }
}
