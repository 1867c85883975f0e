use common::types::RequestId;
use near_sdk::{AccountId, Balance};
use thiserror::Error;

use crate::interfaces::raffle::RaffleState;

/// Errors that may be returned by the raffle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RaffleError {
    /// Attached deposit is below the entrance fee
    #[error("Not enough deposit attached: paid {paid}, entrance fee is {required}")]
    InsufficientFee { paid: Balance, required: Balance },

    /// Entries are only accepted while the raffle is open
    #[error("Raffle is not open")]
    RoundNotOpen,

    #[error("Upkeep not needed: pot {pot}, players {players}, state {state:?}")]
    UpkeepNotNeeded { pot: Balance, players: u64, state: RaffleState },

    /// The oracle refused the randomness request, the draw was not started
    #[error("Randomness request failed: {0}")]
    RequestFailed(String),

    #[error("Unknown randomness request {0}")]
    UnknownRequest(RequestId),

    #[error("Fulfillment carries no random words")]
    MissingRandomWords,

    #[error("Only the VRF coordinator can fulfill randomness, got {caller}")]
    UnauthorizedOracle { caller: AccountId },

    /// The prize could not be sent, the round stays locked
    #[error("Payout of {amount} to {winner} failed: {reason}")]
    PayoutFailed { winner: AccountId, amount: Balance, reason: String },

    /// A transfer outcome arrived for a payout that is not in flight
    #[error("No payout of {amount} to {winner} is in flight")]
    UnexpectedPayout { winner: AccountId, amount: Balance },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
