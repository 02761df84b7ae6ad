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
    aggregated_body::AggregateBody,
    amount::Amount,
    transaction_protocol::{build_challenge, TransactionMetadata},
    types::{
        BlindingFactor,
        Commitment,
        CommitmentFactory,
        CryptoFactories,
        HashDigest,
        Height,
        RangeProof,
        RangeProofService,
        Signature,
    },
};
use digest::Digest;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt,
    fmt::{Display, Formatter},
};
use tari_crypto::{
    commitment::HomomorphicCommitmentFactory,
    range_proof::{RangeProofError, RangeProofService as RangeProofServiceTrait},
    tari_utilities::{hex::Hex, ByteArray, Hashable},
};
use thiserror::Error;

pub const MAX_TRANSACTION_INPUTS: usize = 500;
pub const MAX_TRANSACTION_OUTPUTS: usize = 500;

//--------------------------------------        Output features   --------------------------------------------------//

/// Options for UTXOs. The only option this wallet core carries is the maturity: the minimum block height at which
/// the output may be spent.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize, Default)]
pub struct OutputFeatures {
    pub maturity: Height,
}

impl OutputFeatures {
    /// Create an `OutputFeatures` with the given maturity and all other values at their default setting
    pub fn with_maturity(maturity: Height) -> OutputFeatures {
        OutputFeatures { maturity }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        bincode::serialize_into(&mut buf, self).unwrap(); // this should not fail
        buf
    }
}

impl Display for OutputFeatures {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "OutputFeatures: Maturity = {}", self.maturity)
    }
}

//----------------------------------------     TransactionError   ----------------------------------------------------//

#[derive(Clone, Debug, PartialEq, Error)]
pub enum TransactionError {
    #[error("Error validating the transaction: {0}")]
    ValidationError(String),
    #[error("Signature is invalid")]
    InvalidSignatureError,
    #[error("A range proof construction or verification has produced an error: {0}")]
    RangeProofError(#[from] RangeProofError),
    #[error("Kernel height bounds exceed the current chain state")]
    InvalidKernel,
}

//----------------------------------------     TransactionInput   ----------------------------------------------------//

/// One spent coin: the commitment of the output being consumed, plus the features of that output so its maturity
/// can be checked against the spending height.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionInput {
    /// The features of the output being spent
    pub features: OutputFeatures,
    /// The commitment of the output being spent
    pub commitment: Commitment,
}

impl TransactionInput {
    pub fn new(features: OutputFeatures, commitment: Commitment) -> TransactionInput {
        TransactionInput { features, commitment }
    }

    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// Checks if the given key and value open this input's commitment
    pub fn opened_by(&self, blinding_factor: &BlindingFactor, value: Amount, factory: &CommitmentFactory) -> bool {
        factory.open(blinding_factor, &value.into(), &self.commitment)
    }
}

// The canonical ordering of inputs is ascending by commitment bytes; both parties must derive the identical
// serialization before signing.
impl PartialEq for TransactionInput {
    fn eq(&self, other: &TransactionInput) -> bool {
        self.commitment == other.commitment
    }
}

impl Eq for TransactionInput {}

impl PartialOrd for TransactionInput {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TransactionInput {
    fn cmp(&self, other: &Self) -> Ordering {
        self.commitment.as_bytes().cmp(other.commitment.as_bytes())
    }
}

impl Hashable for TransactionInput {
    fn hash(&self) -> Vec<u8> {
        HashDigest::new()
            .chain(self.features.to_bytes())
            .chain(self.commitment.as_bytes())
            .result()
            .to_vec()
    }
}

impl Display for TransactionInput {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        fmt.write_str(&format!("{} [{:?}]\n", self.commitment.to_hex(), self.features))
    }
}

//----------------------------------------   TransactionOutput    ----------------------------------------------------//

/// One coin created by the transaction. Only the commitment travels on chain; the attached range proof convinces a
/// verifier that the hidden amount is a sane non-negative number, without which a party could commit to a negative
/// value and mint money out of the difference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionOutput {
    pub features: OutputFeatures,
    /// The commitment hiding the output amount
    pub commitment: Commitment,
    /// A proof that the committed value lies in the accepted range
    pub proof: RangeProof,
}

impl TransactionOutput {
    pub fn new(features: OutputFeatures, commitment: Commitment, proof: RangeProof) -> TransactionOutput {
        TransactionOutput {
            features,
            commitment,
            proof,
        }
    }

    /// Blind the given value with the given key and attach a freshly constructed range proof
    pub fn create(
        features: OutputFeatures,
        blinding_factor: &BlindingFactor,
        value: Amount,
        factories: &CryptoFactories,
    ) -> Result<TransactionOutput, TransactionError> {
        let commitment = factories.commitment.commit(blinding_factor, &value.into());
        let proof = factories.range_proof.construct_proof(blinding_factor, value.into())?;
        Ok(TransactionOutput {
            features,
            commitment,
            proof,
        })
    }

    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    pub fn proof(&self) -> &RangeProof {
        &self.proof
    }

    /// Verify that range proof is valid
    pub fn verify_range_proof(&self, prover: &RangeProofService) -> Result<bool, TransactionError> {
        Ok(prover.verify(&self.proof, &self.commitment))
    }
}

// As for inputs, the canonical ordering of outputs is ascending by commitment bytes.
impl PartialEq for TransactionOutput {
    fn eq(&self, other: &TransactionOutput) -> bool {
        self.commitment == other.commitment
    }
}

impl Eq for TransactionOutput {}

impl PartialOrd for TransactionOutput {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TransactionOutput {
    fn cmp(&self, other: &Self) -> Ordering {
        self.commitment.as_bytes().cmp(other.commitment.as_bytes())
    }
}

/// Implement the canonical hashing function for TransactionOutput for use in ordering.
///
/// We can exclude the range proof from this hash. The commitment uniquely determines the output that is being spent;
/// the proof is only material to whether the output may enter the utxo set.
impl Hashable for TransactionOutput {
    fn hash(&self) -> Vec<u8> {
        HashDigest::new()
            .chain(self.features.to_bytes())
            .chain(self.commitment.as_bytes())
            .result()
            .to_vec()
    }
}

impl Display for TransactionOutput {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        fmt.write_str(&format!("({} [{:?}])", self.commitment.to_hex(), self.features))
    }
}

//----------------------------------------   Transaction Kernel   ----------------------------------------------------//

/// The transaction kernel tracks the excess for a given transaction: the public image of the blinding factors that
/// remain once all inputs and outputs (and the disclosed offset) cancel out. The kernel also tracks other transaction
/// metadata, such as the lock height for the transaction (i.e. the earliest this transaction can be mined) and the
/// transaction fee, in cleartext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionKernel {
    /// The fee the transaction pays, in clear
    pub fee: Amount,
    /// The earliest height at which the transaction may be mined; the range is open ended upwards: [lock_height, ∞)
    pub lock_height: Height,
    /// What is left of the commitment sums once all amounts cancel: a commitment to zero coins under the aggregate
    /// blinding excess, which is therefore also a valid public key
    pub excess: Commitment,
    /// The two parties' combined Schnorr signature over the kernel metadata, keyed by the excess
    pub excess_sig: Signature,
}

impl TransactionKernel {
    /// Assemble the kernel. Unlike blocks, a negotiated transaction only ever carries one kernel, and it is built
    /// in a single shot: by the time the aggregate signature exists, the metadata and excess are already fixed, so
    /// there is nothing to stage.
    pub fn new(metadata: TransactionMetadata, excess: Commitment, excess_sig: Signature) -> TransactionKernel {
        TransactionKernel {
            fee: metadata.fee,
            lock_height: metadata.lock_height,
            excess,
            excess_sig,
        }
    }

    pub fn metadata(&self) -> TransactionMetadata {
        TransactionMetadata {
            fee: self.fee,
            lock_height: self.lock_height,
        }
    }

    /// Verify the aggregate kernel signature against the kernel's own excess and metadata
    pub fn verify_signature(&self) -> Result<(), TransactionError> {
        let excess = self.excess.as_public_key();
        let r = self.excess_sig.get_public_nonce();
        let c = build_challenge(r, excess, &self.metadata());
        if self.excess_sig.verify_challenge(excess, &c) {
            Ok(())
        } else {
            Err(TransactionError::InvalidSignatureError)
        }
    }
}

impl PartialEq for TransactionKernel {
    fn eq(&self, other: &TransactionKernel) -> bool {
        self.excess == other.excess
    }
}

impl Eq for TransactionKernel {}

impl PartialOrd for TransactionKernel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TransactionKernel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.excess.as_bytes().cmp(other.excess.as_bytes())
    }
}

impl Hashable for TransactionKernel {
    /// Produce a canonical hash for a transaction kernel. The hash is given by
    /// $$ H(fee | lock_height | P_excess | R_sum | s_sum) $$
    fn hash(&self) -> Vec<u8> {
        HashDigest::new()
            .chain(u64::from(self.fee).to_le_bytes())
            .chain(self.lock_height.to_le_bytes())
            .chain(self.excess.as_bytes())
            .chain(self.excess_sig.get_public_nonce().as_bytes())
            .chain(self.excess_sig.get_signature().as_bytes())
            .result()
            .to_vec()
    }
}

impl Display for TransactionKernel {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            fmt,
            "Fee: {}\nLock height: {}\nExcess: {}\nExcess signature: ({}, {})\n",
            self.fee,
            self.lock_height,
            self.excess.to_hex(),
            self.excess_sig.get_public_nonce().to_hex(),
            self.excess_sig.get_signature().to_hex(),
        )
    }
}

//----------------------------------------      Transaction       ----------------------------------------------------//

/// The finished artefact of a negotiation: the merged body of both parties' inputs and outputs, the co-signed
/// kernel, and the disclosed offset. The offset is the portion of the total blinding randomness the parties publish
/// in clear, so that individual kernels cannot be linked back to the input/output subsets they balance against.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The disclosed part of the blinding randomness. Summed over both parties.
    pub offset: BlindingFactor,
    /// The constituents of the transaction.
    pub body: AggregateBody,
}

impl Transaction {
    /// Create a new transaction from the provided inputs, outputs, kernels and offset. The body is brought into
    /// canonical (sorted) form here.
    pub fn new(
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
        kernels: Vec<TransactionKernel>,
        offset: BlindingFactor,
    ) -> Transaction {
        let mut body = AggregateBody::new(inputs, outputs, kernels);
        body.sort();
        Transaction { offset, body }
    }

    /// Validate this transaction by checking the following:
    /// 1. The sum of inputs, outputs, offset and fees equal the kernel excess
    /// 1. The signature signs the canonical metadata with the aggregate private excess
    /// 1. Range proofs of the outputs are valid
    /// 1. The kernel lock height has been reached at `height`
    ///
    /// Whether the inputs actually exist in the utxo set is for the node to judge, not the wallet.
    pub fn validate_internal_consistency(
        &self,
        factories: &CryptoFactories,
        height: Height,
    ) -> Result<(), TransactionError> {
        self.body.validate_internal_consistency(&self.offset, height, factories)
    }

    pub fn get_body(&self) -> &AggregateBody {
        &self.body
    }

    /// Returns the total fee claimed by the transaction's kernels
    pub fn get_total_fee(&self) -> Amount {
        self.body.get_total_fee()
    }
}

impl Display for Transaction {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        fmt.write_str("-------------- Transaction --------------\n")?;
        fmt.write_str("--- Offset ---\n")?;
        fmt.write_str(&format!("{}\n", self.offset.to_hex()))?;
        fmt.write_str("---  Body  ---\n")?;
        fmt.write_str(&format!("{}\n", self.body))
    }
}

//----------------------------------------         Tests          ----------------------------------------------------//
