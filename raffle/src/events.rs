use common::types::RequestId;
use near_sdk::json_types::{U128, U64};
use near_sdk::{AccountId, Balance, log};
use near_sdk::serde::Serialize;
use near_sdk::serde_json::json;

const STANDARD: &str = "raffle";
const VERSION: &str = "1.0.0";

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct EntryRecorded<'a> {
    pub participant: &'a AccountId,
    pub count: U64,
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct DrawStarted {
    pub request_id: U64,
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct DrawAborted<'a> {
    pub request_id: U64,
    pub reason: &'a str,
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct WinnerPicked<'a> {
    pub winner: &'a AccountId,
}

#[derive(Serialize)]
#[serde(crate = "near_sdk::serde")]
struct PayoutFailed<'a> {
    pub winner: &'a AccountId,
    pub amount: U128,
    pub reason: &'a str,
}

fn log_event<T: Serialize>(event: &str, data: T) {
    let event = json!({
        "standard": STANDARD,
        "version": VERSION,
        "event": event,
        "data": [data]
    });

    log!("EVENT_JSON:{}", event.to_string());
}

pub fn entry_recorded(participant: &AccountId, count: u64){
    log_event(
        "entry_recorded",
        EntryRecorded {
            participant,
            count: U64(count),
        }
    );
}

pub fn draw_started(request_id: RequestId){
    log_event("draw_started", DrawStarted { request_id: U64(request_id) });
}

pub fn draw_aborted(request_id: RequestId, reason: &str){
    log_event("draw_aborted", DrawAborted { request_id: U64(request_id), reason });
}

pub fn winner_picked(winner: &AccountId){
    log_event("winner_picked", WinnerPicked { winner });
}

pub fn payout_failed(winner: &AccountId, amount: Balance, reason: &str){
    log_event(
        "payout_failed",
        PayoutFailed {
            winner,
            amount: U128(amount),
            reason,
        }
    );
}
