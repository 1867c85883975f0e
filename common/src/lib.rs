pub mod types;

pub mod utils{
    use crate::types::{EntrantCount, RandomWord, U256};

    /// Reads 32 little-endian bytes as a `U256`.
    pub fn as_u256(arr: &[u8; 32]) -> U256{
        let mut result:U256 = U256::zero();
        let mut shift:u16 = 0;

        for idx in 0..arr.len(){
            result += U256::from(arr[idx]) << shift;
            shift += 8;
        }

        return result;
    }

    /// Reduces a random word onto `[0, entrant_count)`.
    /// Returns `None` when there is nobody to pick.
    pub fn winner_index(word: &RandomWord, entrant_count: EntrantCount) -> Option<EntrantCount>{
        if entrant_count == 0 {
            return None;
        }

        let index = *word % U256::from(entrant_count);
        Some(index.low_u64())
    }
}
