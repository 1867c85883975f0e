use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Serialize, Deserialize};
use uint::construct_uint;

/// Correlation token between a randomness request and its fulfillment.
pub type RequestId = u64;
pub type RoundId = u64;
pub type EntrantCount = u64;

construct_uint!{
    /// 256-bit unsigned integer
    #[derive(Serialize, Deserialize, BorshDeserialize, BorshSerialize)]
    pub struct U256(4);
}

/// Raw word delivered by the randomness oracle.
pub type RandomWord = U256;
