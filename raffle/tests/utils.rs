use near_sdk::json_types::{U128, U64};
use near_sdk::test_utils::VMContextBuilder;
use near_sdk::{testing_env, AccountId, Balance, PromiseError};
use common::types::U256;
use raffle::Contract;

pub(crate) const ONE_SECOND_TS: u64 = 1_000_000_000;
pub(crate) const START_SECONDS: u64 = 1_700_000_000;
pub(crate) const INTERVAL: u64 = 30;
pub(crate) const KEY_HASH: &str = "lane-500-gwei";
pub(crate) const SUBSCRIPTION_ID: u64 = 7;
pub(crate) const CALLBACK_GAS_LIMIT: u64 = 50_000_000_000_000;

pub(crate) fn to_yocto(value: &str) -> u128 {
    let vals: Vec<_> = value.split('.').collect();
    let part1 = vals[0].parse::<u128>().unwrap() * 10u128.pow(24);
    if vals.len() > 1 {
        let power = vals[1].len() as u32;
        let part2 = vals[1].parse::<u128>().unwrap() * 10u128.pow(24 - power);
        part1 + part2
    } else {
        part1
    }
}

pub(crate) fn account(name: &str) -> AccountId {
    name.parse().unwrap()
}

pub(crate) fn deployer() -> AccountId {
    account("deployer")
}

pub(crate) fn vrf_coordinator() -> AccountId {
    account("vrf-coordinator")
}

pub(crate) fn keeper() -> AccountId {
    account("keeper")
}

pub(crate) fn raffle_account() -> AccountId {
    account("raffle")
}

fn set_context(predecessor: AccountId, deposit: Balance, block_timestamp: u64, account_balance: Balance) {
    testing_env!(VMContextBuilder::new()
        .current_account_id(raffle_account())
        .predecessor_account_id(predecessor)
        .attached_deposit(deposit)
        .block_timestamp(block_timestamp)
        .account_balance(account_balance)
        .build());
}

/// Drives a deployed raffle through the mocked blockchain, one context per call.
pub(crate) struct Chain {
    pub contract: Contract,
    pub block_timestamp: u64,
    pub account_balance: Balance,
}

impl Chain {
    pub fn deploy(entrance_fee: Balance) -> Self {
        let block_timestamp = START_SECONDS * ONE_SECOND_TS;
        let account_balance = to_yocto("100");
        set_context(deployer(), 0, block_timestamp, account_balance);

        let contract = Contract::new(
            U128(entrance_fee),
            U64(INTERVAL),
            vrf_coordinator(),
            KEY_HASH.to_string(),
            U64(SUBSCRIPTION_ID),
            U64(CALLBACK_GAS_LIMIT),
        );

        Self { contract, block_timestamp, account_balance }
    }

    /// Sets up the context of the next call.
    pub fn call_as(&mut self, predecessor: AccountId, deposit: Balance) -> &mut Contract {
        set_context(predecessor, deposit, self.block_timestamp, self.account_balance);
        &mut self.contract
    }

    pub fn increase_time(&mut self, seconds: u64) {
        self.block_timestamp += seconds * ONE_SECOND_TS;
    }

    pub fn enter(&mut self, participant: AccountId, deposit: Balance) -> U64 {
        self.call_as(participant, deposit).enter_raffle()
    }

    pub fn perform_upkeep(&mut self) -> U64 {
        self.call_as(keeper(), 0).perform_upkeep(None)
    }

    pub fn upkeep_needed(&mut self) -> bool {
        self.call_as(keeper(), 0).check_upkeep(None).0
    }

    /// Runs the prize transfer callback the way the runtime schedules it.
    pub fn settle_transfer(&mut self, winner: AccountId, amount: Balance, result: Result<(), PromiseError>) -> bool {
        self.call_as(raffle_account(), 0).on_prize_transfer(winner, U128(amount), result)
    }

    /// Coordinator delivers `word`; a scheduled prize transfer is confirmed right after.
    pub fn draw(&mut self, request_id: U64, word: u64) -> Option<AccountId> {
        let pot = self.contract.get_pot().0;
        let winner = self.call_as(vrf_coordinator(), 0).fulfill_random_words(request_id, vec![U256::from(word)])?;
        self.settle_transfer(winner.clone(), pot, Ok(()));
        Some(winner)
    }
}
