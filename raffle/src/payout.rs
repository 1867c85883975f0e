use crate::*;
use crate::interfaces::payout::{PayoutSink, PayoutStatus, TransferError};
use near_sdk::{Promise, PromiseError};

/// Pays prizes in native NEAR out of the contract balance.
///
/// The transfer itself executes in a later receipt, so a payout is only
/// `Scheduled` here; `on_prize_transfer` settles the round once the outcome
/// is known.
pub(crate) struct NativeTransfer;

impl NativeTransfer {
    fn available_balance() -> Balance {
        let locked_for_storage = Balance::from(env::storage_usage()) * env::storage_byte_cost();
        env::account_balance().saturating_sub(locked_for_storage)
    }
}

impl PayoutSink for NativeTransfer {
    fn pay(&mut self, recipient: &AccountId, amount: Balance) -> Result<PayoutStatus, TransferError> {
        if recipient == &env::current_account_id() {
            return Err(TransferError::RejectedRecipient(recipient.clone()));
        }

        let available = Self::available_balance();
        if amount > available {
            return Err(TransferError::InsufficientBalance { available, required: amount });
        }

        Promise::new(recipient.clone())
            .transfer(amount)
            .then(this_contract::on_prize_transfer(
                recipient.clone(),
                U128(amount),
                env::current_account_id(),
                0,
                gas::ON_PRIZE_TRANSFER,
            ));
        log!("Sending {} to {}", amount, recipient);

        Ok(PayoutStatus::Scheduled)
    }
}

#[near_bindgen]
impl Contract {
    /// Reopens the round when the prize arrived, locks it when the transfer
    /// was refunded. Returns whether the winner got paid.
    #[private]
    pub fn on_prize_transfer(&mut self, winner: AccountId, amount: U128, #[callback_result] result: Result<(), PromiseError>) -> bool {
        if result.is_err() {
            log!("Prize transfer of {} to {} was refunded", amount.0, winner);
        }

        match self.raffle.settle_payout(&winner, amount.0, result.is_ok(), now_seconds()) {
            Ok(_) => true,
            // the locked round must be persisted, so this one does not revert
            Err(RaffleError::PayoutFailed { .. }) => false,
            Err(err) => env::panic_str(&err.to_string()),
        }
    }
}
