// Copyright 2019. The Tari Project
//
// Redistribution and use in source and binary forms, with or without modification, are permitted provided that the
// following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this list of conditions and the following
// disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice, this list of conditions and the
// following disclaimer in the documentation and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors may be used to endorse or promote
// products derived from this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES,
// INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL,
// SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY,
// WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE
// USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use crate::{
    amount::Amount,
    types::{Height, PeerId, TxId},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle of a coin in the ledger. Draft coins are promises made during a negotiation; they only become
/// spendable wallet money once the transaction carrying them is registered and confirmed on chain.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinStatus {
    /// Created by a live negotiation, not yet part of any registered transaction
    Draft,
    /// Reserved as an input by a live negotiation
    Locked,
    /// Part of a registered transaction awaiting chain confirmation
    Unconfirmed,
    /// Spendable
    Confirmed,
    /// Consumed by a confirmed transaction
    Spent,
    /// Released by a cancelled or failed negotiation
    Cancelled,
}

/// A single unspent (or once-spent) output tracked by the coin ledger, together with the negotiations that created
/// and consumed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Ledger-assigned identifier; input to the deterministic blinding-key derivation
    pub id: u64,
    pub amount: Amount,
    pub status: CoinStatus,
    /// The earliest height at which this coin may be spent
    pub maturity_height: Height,
    /// The negotiation that created this coin, if any
    pub create_tx_id: Option<TxId>,
    /// The negotiation that is spending (or spent) this coin, if any
    pub spent_tx_id: Option<TxId>,
}

impl Coin {
    /// A coin as first drafted by a negotiation. The ledger assigns the id when the coin is stored.
    pub fn draft(amount: Amount, maturity_height: Height, create_tx_id: TxId) -> Coin {
        Coin {
            id: 0,
            amount,
            status: CoinStatus::Draft,
            maturity_height,
            create_tx_id: Some(create_tx_id),
            spent_tx_id: None,
        }
    }
}

/// The progress of a negotiation as shown to the wallet owner. Transitions are monotone:
/// Pending → InProgress → Registered → Completed, with Cancelled and Failed as terminal exits available from any
/// non-terminal state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    /// Created on user request; the state machine has not run yet
    Pending,
    /// The negotiation is still being worked through by the parties
    InProgress,
    /// The assembled transaction has been accepted by the node
    Registered,
    /// The kernel has been proven on chain
    Completed,
    /// Cancelled by the wallet owner
    Cancelled,
    /// Abandoned after an unrecoverable error
    Failed,
}

impl TxStatus {
    /// Terminal states can never be left, and `update()` on a terminal negotiation is a no-op.
    pub fn is_terminal(self) -> bool {
        matches!(self, TxStatus::Completed | TxStatus::Cancelled | TxStatus::Failed)
    }

    pub fn can_cancel(self) -> bool {
        matches!(self, TxStatus::Pending | TxStatus::InProgress | TxStatus::Registered)
    }
}

impl Default for TxStatus {
    fn default() -> Self {
        TxStatus::Pending
    }
}

/// Why a negotiation was abandoned. Persisted in the parameter store so that a wallet restarted mid-failure still
/// terminates the negotiation cleanly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxFailureReason {
    Unknown,
    Cancelled,
    InsufficientFunds,
    InvalidPeerSignature,
    FailedToRegister,
    InvalidTransaction,
    InvalidKernelProof,
    FailedToGetParameter,
    LoopbackNotSupported,
}

impl fmt::Display for TxFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TxFailureReason::Unknown => "Unknown reason",
            TxFailureReason::Cancelled => "Transaction was cancelled",
            TxFailureReason::InsufficientFunds => "Not enough inputs to fund the transaction",
            TxFailureReason::InvalidPeerSignature => "Peer's signature is not valid",
            TxFailureReason::FailedToRegister => "Failed to register transaction",
            TxFailureReason::InvalidTransaction => "Transaction is not valid",
            TxFailureReason::InvalidKernelProof => "Invalid kernel proof provided",
            TxFailureReason::FailedToGetParameter => "Failed to get parameter",
            TxFailureReason::LoopbackNotSupported => "Transactions to an owned address are not supported",
        };
        f.write_str(msg)
    }
}

/// The durable per-negotiation record. Created by the wallet on user request and from then on mutated only by the
/// negotiation state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxDescription {
    pub tx_id: TxId,
    pub peer_id: PeerId,
    pub amount: Amount,
    pub fee: Amount,
    pub min_height: Height,
    pub change: Amount,
    /// true when this wallet is paying, false when it is being paid
    pub sender: bool,
    pub status: TxStatus,
    pub create_time: NaiveDateTime,
    pub modify_time: NaiveDateTime,
}

impl TxDescription {
    pub fn new(tx_id: TxId, peer_id: PeerId, amount: Amount, fee: Amount, sender: bool) -> TxDescription {
        let now = chrono::Utc::now().naive_utc();
        TxDescription {
            tx_id,
            peer_id,
            amount,
            fee,
            min_height: 0,
            change: Amount::from(0),
            sender,
            status: TxStatus::Pending,
            create_time: now,
            modify_time: now,
        }
    }
}

/// An entry of the wallet's address book. The negotiation core only cares whether a peer address belongs to this
/// wallet itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletAddress {
    pub peer_id: PeerId,
    pub label: String,
    pub own: bool,
}
