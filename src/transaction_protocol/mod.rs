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

//! The transaction protocol facilitates the process of constructing a Mimblewimble transaction between two parties.
//!
//! In this protocol a Sender pays a Receiver from their inputs, optionally paying change back to themselves. The
//! Receiver will receive a single output from the transaction. Both parties run the same re-entrant state machine
//! ([`negotiation::TxNegotiation`]) over their own durable parameter store; every message that arrives is written to
//! the store by the transport, after which a single `update()` call advances the negotiation by exactly one step.
//! The diagram below illustrates the progression of the two state machines and shows where the public data messages
//! are constructed and accepted in each state machine
//!
//! <div class="mermaid">
//!   sequenceDiagram
//!   participant Sender
//!   participant Receiver
//!#
//!   activate Sender
//!   Sender-->>Sender: reserve inputs, derive excess
//!   deactivate Sender
//!#
//!   activate Sender
//!   Sender-->>+Receiver: Invite [tx_id, amount, fee, inputs, outputs, P_s, R_s, offset_s]
//!   Receiver-->>Receiver: create output, partial sign
//!   Receiver-->>-Sender: ConfirmInvitation [tx_id, P_r, R_r, s_r]
//!   deactivate Sender
//!#
//!   alt invalid partial signature
//!   Sender--XSender: failed
//!   end
//!#
//!   activate Sender
//!   Sender-->>+Receiver: ConfirmTransaction [tx_id, s_s]
//!   Receiver-->>Receiver: assemble, validate, register
//!   Receiver-->>-Sender: TxRegistered [tx_id]
//!   deactivate Sender
//!#
//!   note over Sender,Receiver: both await kernel inclusion proof
//!   alt proof delivered
//!   Sender-->>Sender: completed
//!   Receiver-->>Receiver: completed
//!   end
//! </div>

pub mod messages;
pub mod multisig;
pub mod negotiation;

use crate::{
    amount::Amount,
    storage::database::WalletStorageError,
    transaction::TransactionError,
    types::{HashDigest, HashOutput, Height, PublicKey},
};
use digest::Digest;
use serde::{Deserialize, Serialize};
use tari_crypto::{
    signatures::SchnorrSignatureError,
    tari_utilities::{ByteArray, ByteArrayError},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionProtocolError {
    #[error("The negotiation is in an invalid state for this operation")]
    InvalidStateError,
    #[error("An error occurred while performing a signature: {0}")]
    SigningError(SchnorrSignatureError),
    #[error("A scalar could not be derived from hashed bytes: {0}")]
    ScalarConversionError(#[from] ByteArrayError),
    #[error("An error occurred while building the final transaction: {0}")]
    TransactionBuildError(#[from] TransactionError),
    #[error("Wallet storage error: {0}")]
    StorageError(#[from] WalletStorageError),
}

/// Transaction metadata, including the fee and lock height. This is the part of the kernel that is fixed before
/// either party signs, and it is what the kernel signature commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionMetadata {
    /// The absolute fee for the transaction
    pub fee: Amount,
    /// The earliest block this transaction can be mined
    pub lock_height: Height,
}

impl TransactionMetadata {
    /// The canonical message the kernel signature signs: the hash of the kernel with its excess still unset.
    pub fn message(&self) -> HashOutput {
        HashDigest::new()
            .chain(u64::from(self.fee).to_le_bytes())
            .chain(self.lock_height.to_le_bytes())
            .result()
            .to_vec()
    }
}

/// Convenience function that calculates the challenge for the Schnorr signatures:
/// e = H(R_sum || P_sum || kernel message)
pub fn build_challenge(
    sum_public_nonces: &PublicKey,
    sum_public_excess: &PublicKey,
    metadata: &TransactionMetadata,
) -> HashOutput {
    HashDigest::new()
        .chain(sum_public_nonces.as_bytes())
        .chain(sum_public_excess.as_bytes())
        .chain(metadata.message())
        .result()
        .to_vec()
}

#[cfg(test)]
mod test {
    use super::{build_challenge, TransactionMetadata};
    use crate::types::{PrivateKey, PublicKey};
    use rand::rngs::OsRng;
    use tari_crypto::keys::{PublicKey as PublicKeyTrait, SecretKey};

    #[test]
    fn metadata_message_commits_to_fee_and_height() {
        let a = TransactionMetadata {
            fee: 100.into(),
            lock_height: 5,
        };
        let b = TransactionMetadata {
            fee: 101.into(),
            lock_height: 5,
        };
        let c = TransactionMetadata {
            fee: 100.into(),
            lock_height: 6,
        };
        assert_ne!(a.message(), b.message());
        assert_ne!(a.message(), c.message());
        assert_eq!(a.message(), a.message());
    }

    #[test]
    fn challenge_binds_both_aggregates() {
        let metadata = TransactionMetadata::default();
        let r = PublicKey::from_secret_key(&PrivateKey::random(&mut OsRng));
        let p = PublicKey::from_secret_key(&PrivateKey::random(&mut OsRng));
        let e = build_challenge(&r, &p, &metadata);
        assert_ne!(e, build_challenge(&p, &r, &metadata));
    }
}
