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
    storage::models::TxDescription,
    transaction::{Transaction, TransactionKernel},
    transaction_protocol::messages::{Invite, TxConfirmation},
    types::{Commitment, HashOutput, Height},
};
use serde::{Deserialize, Serialize};

/// The chain head as reported by the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainTip {
    pub height: Height,
    pub hash: HashOutput,
}

/// The node's attestation that a kernel is included in the chain. Opaque to everything except the final completion
/// check of a negotiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelProof {
    /// Height of the block the kernel was included in
    pub height: Height,
    /// The excess of the kernel the proof speaks for
    pub excess: Commitment,
}

impl KernelProof {
    /// Whether this proof vouches for the given kernel under the given chain tip.
    pub fn proves(&self, kernel: &TransactionKernel, tip: &ChainTip) -> bool {
        self.excess == kernel.excess && self.height >= kernel.lock_height && self.height <= tip.height
    }
}

/// The set of outbound capabilities a negotiation drives. The wallet's transport and node connection provide an
/// implementation; tests provide a loopback. All calls are fire-and-forget: any answer arrives later as a parameter
/// write followed by another `update()`.
pub trait NegotiatorGateway {
    /// Deliver an invitation to the peer wallet
    fn send_tx_invitation(&self, desc: &TxDescription, invite: Invite);
    /// Deliver a signature confirmation to the peer wallet
    fn send_tx_confirmation(&self, desc: &TxDescription, confirmation: TxConfirmation);
    /// Tell the peer the transaction has been accepted by the node
    fn send_tx_registered(&self, desc: &TxDescription);
    /// Tell the peer the negotiation is abandoned
    fn send_tx_failed(&self, desc: &TxDescription);
    /// Submit the fully assembled transaction to the node
    fn register_tx(&self, desc: &TxDescription, transaction: Transaction);
    /// Ask the node for an inclusion proof for this kernel
    fn confirm_kernel(&self, desc: &TxDescription, kernel: TransactionKernel);
    /// Ask the node to confirm the negotiation's outputs in the utxo set
    fn confirm_outputs(&self, desc: &TxDescription);
    /// Signal that the negotiation reached a terminal state
    fn on_tx_completed(&self, desc: &TxDescription);
    /// The current chain head, if the node connection knows one
    fn get_tip(&self) -> Option<ChainTip>;
    /// In test mode the kernel proof check is advisory rather than binding
    fn is_test_mode(&self) -> bool;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        amount::Amount,
        transaction_protocol::TransactionMetadata,
        types::{Commitment, PrivateKey, PublicKey, Signature},
    };
    use rand::rngs::OsRng;
    use tari_crypto::keys::{PublicKey as PublicKeyTrait, SecretKey};

    #[test]
    fn proof_checks_excess_and_height_window() {
        let excess = Commitment::from_public_key(&PublicKey::from_secret_key(&PrivateKey::random(&mut OsRng)));
        let kernel = TransactionKernel::new(
            TransactionMetadata {
                fee: Amount::from(1),
                lock_height: 10,
            },
            excess.clone(),
            Signature::new(PublicKey::default(), PrivateKey::default()),
        );
        let tip = ChainTip {
            height: 20,
            hash: vec![0u8; 32],
        };

        let good = KernelProof { height: 15, excess };
        assert!(good.proves(&kernel, &tip));

        let premature = KernelProof {
            height: 9,
            excess: good.excess.clone(),
        };
        assert!(!premature.proves(&kernel, &tip));

        let unknown_block = KernelProof {
            height: 21,
            excess: good.excess.clone(),
        };
        assert!(!unknown_block.proves(&kernel, &tip));

        let foreign = KernelProof {
            height: 15,
            excess: Commitment::from_public_key(&PublicKey::from_secret_key(&PrivateKey::random(&mut OsRng))),
        };
        assert!(!foreign.proves(&kernel, &tip));
    }
}
