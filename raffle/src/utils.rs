use near_sdk::env;

pub mod storage_keys{
    use near_sdk::BorshStorageKey;
    use near_sdk::borsh::{self, BorshSerialize};

    #[derive(BorshStorageKey, BorshSerialize)]
    pub enum StorageKeys {
        Entrants,
    }
}

pub mod gas{
    use near_sdk::Gas;

    pub const REQUEST_RANDOM_WORDS: Gas = Gas(10_000_000_000_000);
    pub const ON_RANDOM_WORDS_REQUESTED: Gas = Gas(10_000_000_000_000);
    pub const ON_PRIZE_TRANSFER: Gas = Gas(10_000_000_000_000);

    /// Upper bound accepted for the coordinator's callback into `fulfill_random_words`.
    pub const MAX_CALLBACK_GAS: Gas = Gas(200_000_000_000_000);
}

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// Block time in seconds; the raffle interval is configured in seconds.
pub(crate) fn now_seconds() -> u64 {
    env::block_timestamp() / NANOS_PER_SECOND
}
