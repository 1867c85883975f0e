pub mod raffle {
    use common::types::{EntrantCount, RequestId, RoundId};
    use near_sdk::json_types::{U128, U64};
    use near_sdk::{AccountId, Balance};
    use near_sdk::{borsh::{self, BorshDeserialize, BorshSerialize}, serde::{Serialize, Deserialize}};

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[derive(BorshDeserialize, BorshSerialize)]
    #[derive(Serialize, Deserialize)]
    #[serde(crate = "near_sdk::serde")]
    pub enum RaffleState {
        /// Accepting entries
        Open,
        /// Waiting for the oracle to fulfill the outstanding request
        Calculating,
    }

    /// Entrant count and pot frozen when a draw starts.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    #[derive(BorshDeserialize, BorshSerialize)]
    pub struct Snapshot {
        pub entrant_count: EntrantCount,
        pub pot: Balance,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[derive(BorshDeserialize, BorshSerialize)]
    pub struct PendingRequest {
        pub request_id: RequestId,
        pub round: RoundId,
        pub snapshot: Snapshot,
        pub requested_at: u64,
    }

    /// Prize of a drawn round, either on its way to the winner or rejected.
    #[derive(Clone, Debug, PartialEq, Eq)]
    #[derive(BorshDeserialize, BorshSerialize)]
    pub struct PrizePayout {
        pub round: RoundId,
        pub request_id: RequestId,
        pub winner: AccountId,
        pub amount: Balance,
    }

    /// Result of the readiness check, with the figures it was computed from.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct UpkeepCheck {
        pub upkeep_needed: bool,
        pub state: RaffleState,
        pub players: EntrantCount,
        pub pot: Balance,
        pub time_passed: u64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(crate = "near_sdk::serde")]
    pub struct PendingRequestView {
        pub request_id: U64,
        pub round: U64,
        pub entrant_count: U64,
        pub pot: U128,
        pub requested_at: U64,
    }

    impl From<&PendingRequest> for PendingRequestView {
        fn from(pending: &PendingRequest) -> Self {
            Self {
                request_id: U64(pending.request_id),
                round: U64(pending.round),
                entrant_count: U64(pending.snapshot.entrant_count),
                pot: U128(pending.snapshot.pot),
                requested_at: U64(pending.requested_at),
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(crate = "near_sdk::serde")]
    pub struct PrizePayoutView {
        pub round: U64,
        pub request_id: U64,
        pub winner: AccountId,
        pub amount: U128,
    }

    impl From<&PrizePayout> for PrizePayoutView {
        fn from(prize: &PrizePayout) -> Self {
            Self {
                round: U64(prize.round),
                request_id: U64(prize.request_id),
                winner: prize.winner.clone(),
                amount: U128(prize.amount),
            }
        }
    }
}

pub mod oracle {
    use common::types::{EntrantCount, RequestId, RoundId};
    use near_sdk::Balance;
    use thiserror::Error;

    /// What the oracle is told about the round it draws for.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct RoundContext {
        pub round: RoundId,
        pub entrant_count: EntrantCount,
        pub pot: Balance,
    }

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum OracleError {
        #[error("malformed request: {0}")]
        MalformedRequest(String),
        #[error("not enough gas left to reach the coordinator: {available} < {required}")]
        InsufficientGas { available: u64, required: u64 },
        #[error("oracle unavailable: {0}")]
        Unavailable(String),
    }

    /// Places randomness requests. Fulfillment comes back through a separate
    /// entry point, correlated by the returned id.
    pub trait RandomnessOracle {
        fn request_random_words(&mut self, round: &RoundContext) -> Result<RequestId, OracleError>;
    }
}

pub mod payout {
    use near_sdk::{AccountId, Balance};
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum TransferError {
        #[error("insufficient balance: available {available}, required {required}")]
        InsufficientBalance { available: Balance, required: Balance },
        #[error("recipient {0} cannot receive the prize")]
        RejectedRecipient(AccountId),
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum PayoutStatus {
        /// Funds have reached the recipient
        Completed,
        /// Funds are on their way; the outcome is reported later through `Raffle::settle_payout`
        Scheduled,
    }

    pub trait PayoutSink {
        fn pay(&mut self, recipient: &AccountId, amount: Balance) -> Result<PayoutStatus, TransferError>;
    }
}
