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

use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fmt::{Display, Formatter},
    sync::Arc,
};
use tari_crypto::{
    common::Blake256,
    ristretto::{
        dalek_range_proof::DalekRangeProofService,
        pedersen::{PedersenCommitment, PedersenCommitmentFactory},
        RistrettoPublicKey,
        RistrettoSchnorr,
        RistrettoSecretKey,
    },
    tari_utilities::hex::Hex,
};

/// Define the explicit Signature implementation for the wallet. A different signature scheme can be employed by
/// redefining this type.
pub type Signature = RistrettoSchnorr;

/// Define the explicit Commitment implementation for the wallet.
pub type Commitment = PedersenCommitment;
pub type CommitmentFactory = PedersenCommitmentFactory;

/// Define the explicit Secret key implementation for the wallet.
pub type PrivateKey = RistrettoSecretKey;
pub type BlindingFactor = RistrettoSecretKey;

/// Define the explicit Public key implementation for the wallet.
pub type PublicKey = RistrettoPublicKey;

/// Wallets are addressed by the public key their transport endpoint is registered under.
pub type PeerId = RistrettoPublicKey;

/// Specify the hash function for general hashing and for signature challenges.
pub type HashDigest = Blake256;

/// Define the data type that is used to store results of `HashDigest`
pub type HashOutput = Vec<u8>;

/// Specify the range proof service
pub type RangeProofService = DalekRangeProofService;

/// Specify the range proof. Proof construction and verification are delegated entirely to the proof service.
pub type RangeProof = Vec<u8>;

/// Block heights, and the height bounds carried by kernels.
pub type Height = u64;

pub const MAX_RANGE_PROOF_RANGE: usize = 64; // 2^64

/// Unique identifier of a single negotiation. Generated locally by the initiating wallet and never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TxId([u8; 16]);

impl TxId {
    /// Draw a fresh random identifier from the OS entropy source
    pub fn new_random() -> TxId {
        let mut id = [0u8; 16];
        OsRng.fill_bytes(&mut id);
        TxId(id)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 16]> for TxId {
    fn from(id: [u8; 16]) -> Self {
        TxId(id)
    }
}

impl Display for TxId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_vec().to_hex())
    }
}

/// The commitment and range-proof services every negotiation runs against. One set is built at wallet start-up and
/// a handle is passed to each live negotiation; the services sit behind `Arc`s, so the handles are cheap clones of
/// the same instances.
pub struct CryptoFactories {
    pub commitment: Arc<CommitmentFactory>,
    pub range_proof: Arc<RangeProofService>,
}

impl Default for CryptoFactories {
    /// Pedersen commitments over the default generator pair, with range proofs covering the full 64-bit amount
    /// space. Amounts are plain `u64`s everywhere in this wallet, so no narrower proof range is ever wanted and no
    /// other configuration is exposed. The proof service constructor only fails on a zero or oversized bit range,
    /// which a constant rules out.
    fn default() -> Self {
        let commitment = Arc::new(CommitmentFactory::default());
        let range_proof = Arc::new(RangeProofService::new(MAX_RANGE_PROOF_RANGE, &commitment).unwrap());
        Self {
            commitment,
            range_proof,
        }
    }
}

impl Clone for CryptoFactories {
    fn clone(&self) -> Self {
        Self {
            commitment: self.commitment.clone(),
            range_proof: self.range_proof.clone(),
        }
    }
}
