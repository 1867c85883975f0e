use common::types::{EntrantCount, RandomWord, RequestId, RoundId};
use near_sdk::borsh::{self, BorshDeserialize, BorshSerialize};
use near_sdk::{env, log, AccountId, Balance};

use crate::coordinator::RandomnessCoordinator;
use crate::error::RaffleError;
use crate::events;
use crate::interfaces::oracle::RandomnessOracle;
use crate::interfaces::payout::{PayoutSink, PayoutStatus};
use crate::interfaces::raffle::{PendingRequest, PrizePayout, RaffleState, UpkeepCheck};
use crate::ledger::EntrantLedger;
use crate::readiness::is_ready;

#[derive(BorshDeserialize, BorshSerialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RaffleConfig {
    pub entrance_fee: Balance,
    /// Minimum seconds between two draws
    pub interval: u64,
}

impl RaffleConfig {
    pub fn assert_valid(&self) -> Result<(), RaffleError> {
        if self.entrance_fee == 0 {
            return Err(RaffleError::InvalidConfig("entrance fee must be positive".to_string()));
        }
        if self.interval == 0 {
            return Err(RaffleError::InvalidConfig("interval must be positive".to_string()));
        }
        Ok(())
    }
}

/// Round state machine: `Open` while collecting entries, `Calculating` while
/// a randomness request is outstanding.
///
/// Fulfillment ordering: the outstanding request is cleared first, then the
/// prize is paid, and only a confirmed payout resets the ledger and reopens
/// the raffle. A payout the sink only scheduled stays in flight, with the round
/// still `Calculating`, until `settle_payout` reports its outcome.
#[derive(BorshDeserialize, BorshSerialize)]
pub struct Raffle {
    config: RaffleConfig,
    state: RaffleState,
    ledger: EntrantLedger,
    coordinator: RandomnessCoordinator,
    round: RoundId,
    last_timestamp: u64,
    recent_winner: Option<AccountId>,
    payout_in_flight: Option<PrizePayout>,
    unpaid_prize: Option<PrizePayout>,
}

impl Raffle {
    pub fn new(config: RaffleConfig, now: u64) -> Result<Self, RaffleError> {
        config.assert_valid()?;

        Ok(Self {
            config,
            state: RaffleState::Open,
            ledger: EntrantLedger::default(),
            coordinator: RandomnessCoordinator::default(),
            round: 0,
            last_timestamp: now,
            recent_winner: None,
            payout_in_flight: None,
            unpaid_prize: None,
        })
    }

    pub fn enter(&mut self, participant: &AccountId, paid: Balance) -> Result<EntrantCount, RaffleError> {
        self.ledger.enter(self.state, self.config.entrance_fee, participant, paid)
    }

    pub fn check_upkeep(&self, now: u64) -> UpkeepCheck {
        let players = self.ledger.len();
        let pot = self.ledger.pot();

        UpkeepCheck {
            upkeep_needed: is_ready(
                self.state,
                players,
                pot,
                now,
                self.last_timestamp,
                self.config.interval,
            ),
            state: self.state,
            players,
            pot,
            time_passed: now.saturating_sub(self.last_timestamp),
        }
    }

    /// Closes entries and asks the oracle for randomness. Fails without side
    /// effects when not ready or when the oracle refuses the request.
    pub fn perform_upkeep<O: RandomnessOracle>(
        &mut self,
        oracle: &mut O,
        now: u64,
    ) -> Result<RequestId, RaffleError> {
        let check = self.check_upkeep(now);
        if !check.upkeep_needed {
            return Err(RaffleError::UpkeepNotNeeded {
                pot: check.pot,
                players: check.players,
                state: check.state,
            });
        }

        let snapshot = self.ledger.snapshot();
        let request_id = self
            .coordinator
            .request_randomness(oracle, self.round, snapshot, now)?;
        self.state = RaffleState::Calculating;

        events::draw_started(request_id);
        Ok(request_id)
    }

    /// Oracle rejected the request after it was placed. Reopens the round with
    /// its entries intact so the draw can be triggered again.
    pub fn abort_request(&mut self, request_id: RequestId, reason: &str) -> Result<(), RaffleError> {
        self.coordinator.cancel(request_id)?;
        self.state = RaffleState::Open;

        log!("{}", RaffleError::RequestFailed(reason.to_string()));
        events::draw_aborted(request_id, reason);
        Ok(())
    }

    /// Picks the winner for the outstanding request and pays out the frozen pot.
    /// The round reopens right away only when the sink reports the payout as
    /// completed.
    pub fn fulfill_random_words<P: PayoutSink>(
        &mut self,
        payout: &mut P,
        request_id: RequestId,
        random_words: &[RandomWord],
        now: u64,
    ) -> Result<AccountId, RaffleError> {
        let resolved = self.coordinator.fulfill(request_id, random_words)?;

        // entries are refused while calculating, so the ledger still is the snapshot
        let winner = self
            .ledger
            .entrant(resolved.winner_index)
            .unwrap_or_else(|| env::panic_str("Winning slot missing from the ledger"));
        let prize = PrizePayout {
            round: resolved.round,
            request_id,
            winner: winner.clone(),
            amount: resolved.snapshot.pot,
        };

        match payout.pay(&winner, prize.amount) {
            Err(err) => Err(self.lock_round(prize, err.to_string())),
            Ok(PayoutStatus::Completed) => {
                self.complete_round(prize, now);
                Ok(winner)
            }
            Ok(PayoutStatus::Scheduled) => {
                log!("Round {} waits for the transfer to {}", prize.round, winner);
                self.payout_in_flight = Some(prize);
                Ok(winner)
            }
        }
    }

    /// Applies the outcome of the payout in flight.
    pub fn settle_payout(
        &mut self,
        winner: &AccountId,
        amount: Balance,
        succeeded: bool,
        now: u64,
    ) -> Result<AccountId, RaffleError> {
        let prize = match self.payout_in_flight.take() {
            Some(prize) if &prize.winner == winner && prize.amount == amount => prize,
            other => {
                self.payout_in_flight = other;
                return Err(RaffleError::UnexpectedPayout { winner: winner.clone(), amount });
            }
        };

        if !succeeded {
            return Err(self.lock_round(prize, "transfer was refunded".to_string()));
        }

        self.complete_round(prize, now);
        Ok(winner.clone())
    }

    fn complete_round(&mut self, prize: PrizePayout, now: u64) {
        self.ledger.reset();
        self.last_timestamp = now;
        self.recent_winner = Some(prize.winner.clone());
        self.round += 1;
        self.state = RaffleState::Open;

        events::winner_picked(&prize.winner);
    }

    /// Keeps the round `Calculating` with nothing pending and records the prize.
    fn lock_round(&mut self, prize: PrizePayout, reason: String) -> RaffleError {
        log!("Round {} is locked: {}", prize.round, reason);
        events::payout_failed(&prize.winner, prize.amount, &reason);

        let err = RaffleError::PayoutFailed {
            winner: prize.winner.clone(),
            amount: prize.amount,
            reason,
        };
        self.unpaid_prize = Some(prize);
        err
    }

    pub fn config(&self) -> &RaffleConfig {
        &self.config
    }

    pub fn state(&self) -> RaffleState {
        self.state
    }

    pub fn round(&self) -> RoundId {
        self.round
    }

    pub fn player(&self, index: EntrantCount) -> Option<AccountId> {
        self.ledger.entrant(index)
    }

    pub fn number_of_players(&self) -> EntrantCount {
        self.ledger.len()
    }

    pub fn pot(&self) -> Balance {
        self.ledger.pot()
    }

    pub fn last_timestamp(&self) -> u64 {
        self.last_timestamp
    }

    pub fn recent_winner(&self) -> Option<&AccountId> {
        self.recent_winner.as_ref()
    }

    pub fn pending_request(&self) -> Option<&PendingRequest> {
        self.coordinator.pending()
    }

    pub fn payout_in_flight(&self) -> Option<&PrizePayout> {
        self.payout_in_flight.as_ref()
    }

    pub fn unpaid_prize(&self) -> Option<&PrizePayout> {
        self.unpaid_prize.as_ref()
    }
}
