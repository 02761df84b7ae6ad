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

//! The public data messages exchanged between the two wallets. Messages are never fed to the state machine
//! directly: the transport writes their fields into the recipient's parameter store (the `apply` methods below) and
//! then triggers an `update()` on the negotiation the `tx_id` addresses.

use crate::{
    amount::Amount,
    storage::{
        database::{params, WalletBackend, WalletDatabase, WalletStorageError},
        models::{TxDescription, TxFailureReason},
    },
    transaction::{TransactionInput, TransactionOutput},
    types::{Height, PeerId, PrivateKey, PublicKey, TxId},
};
use serde::{Deserialize, Serialize};

/// Opening message of a negotiation. Carries the initiator's public protocol contribution along with the terms of
/// the payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invite {
    pub tx_id: TxId,
    pub amount: Amount,
    pub fee: Amount,
    pub height: Height,
    /// true when the initiator is paying the recipient, false when requesting payment
    pub send: bool,
    pub inputs: Vec<TransactionInput>,
    pub outputs: Vec<TransactionOutput>,
    pub public_peer_excess: PublicKey,
    pub public_peer_nonce: PublicKey,
    pub offset: PrivateKey,
}

impl Invite {
    /// The durable record the invited wallet creates for this negotiation. The invited party takes the opposite
    /// role of the initiator.
    pub fn to_description(&self, peer_id: PeerId) -> TxDescription {
        let mut desc = TxDescription::new(self.tx_id, peer_id, self.amount, self.fee, !self.send);
        desc.min_height = self.height;
        desc
    }

    pub fn apply<B: WalletBackend>(&self, db: &WalletDatabase<B>) -> Result<(), WalletStorageError> {
        db.set_parameter_if_absent(&self.tx_id, params::AMOUNT, &self.amount)?;
        db.set_parameter_if_absent(&self.tx_id, params::FEE, &self.fee)?;
        db.set_parameter_if_absent(&self.tx_id, params::MIN_HEIGHT, &self.height)?;
        db.set_parameter_if_absent(&self.tx_id, params::PEER_INPUTS, &self.inputs)?;
        db.set_parameter_if_absent(&self.tx_id, params::PEER_OUTPUTS, &self.outputs)?;
        db.set_parameter_if_absent(&self.tx_id, params::PUBLIC_PEER_EXCESS, &self.public_peer_excess)?;
        db.set_parameter_if_absent(&self.tx_id, params::PUBLIC_PEER_NONCE, &self.public_peer_nonce)?;
        db.set_parameter_if_absent(&self.tx_id, params::PEER_OFFSET, &self.offset)?;
        Ok(())
    }
}

/// The invited party's answer: its public contribution plus its partial signature over the aggregate challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmInvitation {
    pub tx_id: TxId,
    pub public_peer_excess: PublicKey,
    pub public_peer_nonce: PublicKey,
    /// The partial signature scalar this party contributes for the peer to combine
    pub peer_signature: PrivateKey,
}

impl ConfirmInvitation {
    pub fn apply<B: WalletBackend>(&self, db: &WalletDatabase<B>) -> Result<(), WalletStorageError> {
        db.set_parameter_if_absent(&self.tx_id, params::PUBLIC_PEER_EXCESS, &self.public_peer_excess)?;
        db.set_parameter_if_absent(&self.tx_id, params::PUBLIC_PEER_NONCE, &self.public_peer_nonce)?;
        db.set_parameter_if_absent(&self.tx_id, params::PEER_SIGNATURE, &self.peer_signature)?;
        Ok(())
    }
}

/// The initiator's closing contribution: its own partial signature, enabling the peer to assemble and register the
/// transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmTransaction {
    pub tx_id: TxId,
    pub peer_signature: PrivateKey,
}

impl ConfirmTransaction {
    pub fn apply<B: WalletBackend>(&self, db: &WalletDatabase<B>) -> Result<(), WalletStorageError> {
        db.set_parameter_if_absent(&self.tx_id, params::PEER_SIGNATURE, &self.peer_signature)?;
        Ok(())
    }
}

/// Notification that the transaction was accepted by the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxRegistered {
    pub tx_id: TxId,
}

impl TxRegistered {
    pub fn apply<B: WalletBackend>(&self, db: &WalletDatabase<B>) -> Result<(), WalletStorageError> {
        db.set_parameter_if_absent(&self.tx_id, params::TRANSACTION_REGISTERED, &true)?;
        Ok(())
    }
}

/// Notification that the peer abandoned the negotiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TxFailed {
    pub tx_id: TxId,
    pub reason: TxFailureReason,
}

impl TxFailed {
    pub fn apply<B: WalletBackend>(&self, db: &WalletDatabase<B>) -> Result<(), WalletStorageError> {
        db.set_parameter_if_absent(&self.tx_id, params::FAILURE_REASON, &self.reason)?;
        Ok(())
    }
}

/// Either of the two confirmation payloads, as handed to the transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TxConfirmation {
    Invitation(ConfirmInvitation),
    Transaction(ConfirmTransaction),
}

impl TxConfirmation {
    pub fn tx_id(&self) -> TxId {
        match self {
            TxConfirmation::Invitation(m) => m.tx_id,
            TxConfirmation::Transaction(m) => m.tx_id,
        }
    }

    pub fn apply<B: WalletBackend>(&self, db: &WalletDatabase<B>) -> Result<(), WalletStorageError> {
        match self {
            TxConfirmation::Invitation(m) => m.apply(db),
            TxConfirmation::Transaction(m) => m.apply(db),
        }
    }
}
