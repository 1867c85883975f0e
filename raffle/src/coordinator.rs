use common::types::{EntrantCount, RandomWord, RequestId, RoundId};
use common::utils::winner_index;
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::{env, log};

use crate::error::RaffleError;
use crate::interfaces::oracle::{RandomnessOracle, RoundContext};
use crate::interfaces::raffle::{PendingRequest, Snapshot};

/// Outcome of an accepted fulfillment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedDraw {
    pub request_id: RequestId,
    pub round: RoundId,
    pub snapshot: Snapshot,
    pub winner_index: EntrantCount,
}

/// Holds at most one outstanding randomness request.
#[derive(BorshDeserialize, BorshSerialize, Default)]
pub struct RandomnessCoordinator {
    pending: Option<PendingRequest>,
}

impl RandomnessCoordinator {
    /// Places the request for `round` against the frozen `snapshot`.
    /// Nothing is recorded unless the oracle accepts.
    pub fn request_randomness<O: RandomnessOracle>(
        &mut self,
        oracle: &mut O,
        round: RoundId,
        snapshot: Snapshot,
        now: u64,
    ) -> Result<RequestId, RaffleError> {
        if let Some(pending) = &self.pending {
            return Err(RaffleError::RequestFailed(format!(
                "request {} is still outstanding",
                pending.request_id
            )));
        }

        let context = RoundContext {
            round,
            entrant_count: snapshot.entrant_count,
            pot: snapshot.pot,
        };
        let request_id = oracle
            .request_random_words(&context)
            .map_err(|err| RaffleError::RequestFailed(err.to_string()))?;

        self.pending = Some(PendingRequest {
            request_id,
            round,
            snapshot,
            requested_at: now,
        });

        Ok(request_id)
    }

    /// Accepts the words for the outstanding request and forgets it, so the
    /// same id can never be fulfilled twice.
    pub fn fulfill(
        &mut self,
        request_id: RequestId,
        random_words: &[RandomWord],
    ) -> Result<ResolvedDraw, RaffleError> {
        let pending = match self.pending {
            Some(pending) if pending.request_id == request_id => pending,
            _ => {
                log!("Rejected fulfillment for unknown request {}", request_id);
                return Err(RaffleError::UnknownRequest(request_id));
            }
        };

        let word = random_words.first().ok_or(RaffleError::MissingRandomWords)?;
        // requests are only placed for rounds with entrants
        let winner_index = winner_index(word, pending.snapshot.entrant_count)
            .unwrap_or_else(|| env::panic_str("Pending request has an empty snapshot"));

        self.pending = None;

        Ok(ResolvedDraw {
            request_id,
            round: pending.round,
            snapshot: pending.snapshot,
            winner_index,
        })
    }

    /// Drops the outstanding request after the oracle rejected it.
    pub fn cancel(&mut self, request_id: RequestId) -> Result<PendingRequest, RaffleError> {
        match self.pending {
            Some(pending) if pending.request_id == request_id => {
                self.pending = None;
                Ok(pending)
            }
            _ => Err(RaffleError::UnknownRequest(request_id)),
        }
    }

    pub fn pending(&self) -> Option<&PendingRequest> {
        self.pending.as_ref()
    }
}
