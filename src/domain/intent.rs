//! Intents: a user's commitment to act on a suggestion, plus the
//! append-only ledger of transactions submitted for it.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Lifecycle of an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    New = 0,
    InProgress = 1,
    Completed = 2,
    Reverted = 3,
}

impl IntentStatus {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for IntentStatus {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::New),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Completed),
            3 => Ok(Self::Reverted),
            other => Err(Error::Parse(format!("unknown intent status: {other}"))),
        }
    }
}

/// Status of one submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxStatus {
    Pending = 0,
    Finalized = 1,
}

impl TxStatus {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for TxStatus {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Finalized),
            other => Err(Error::Parse(format!("unknown tx status: {other}"))),
        }
    }
}

/// A wallet's commitment to act on a suggestion with a given amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldSuggestionIntent {
    pub id: i32,
    pub wallet_address: String,
    pub suggestion_id: i32,
    pub asset_amount: f64,
    pub status: IntentStatus,
}

/// One row in the per-intent transaction ledger.
///
/// Rows are append-only; `sequence_number` increases monotonically per
/// `(wallet_address, intent_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxHistoryEntry {
    pub id: i32,
    pub wallet_address: String,
    pub suggestion_id: i32,
    pub intent_id: i32,
    pub sequence_number: i32,
    pub tx_hash: String,
    pub tx_status: TxStatus,
}
