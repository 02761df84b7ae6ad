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

//! Two-party aggregated Schnorr signing over the kernel metadata.
//!
//! Each party holds a secret blinding excess `x_i` and contributes a partial signature `s_i = r_i + e·x_i` under the
//! shared challenge `e = H(R_sum || P_sum || m)`. Nonces are never drawn from a process-wide RNG: they are derived
//! deterministically from the signing key and the message, so that replaying the state machine from its durable
//! store after a crash produces the same nonce instead of leaking the key through nonce reuse.

use crate::{
    transaction_protocol::{build_challenge, TransactionMetadata, TransactionProtocolError},
    types::{HashDigest, PrivateKey, PublicKey, Signature},
};
use digest::Digest;
use tari_crypto::{
    keys::PublicKey as PublicKeyTrait,
    tari_utilities::ByteArray,
};

/// Derive the secret signing nonce for one party. The derivation commits to the party's blinding excess and the
/// kernel metadata; a fresh excess (new coin keys per negotiation) therefore yields a fresh nonce.
pub fn derive_nonce(
    blinding_excess: &PrivateKey,
    metadata: &TransactionMetadata,
) -> Result<PrivateKey, TransactionProtocolError> {
    let hash = HashDigest::new()
        .chain(blinding_excess.as_bytes())
        .chain(metadata.message())
        .result();
    Ok(PrivateKey::from_bytes(hash.as_slice())?)
}

/// Split a blinding factor into a private excess component and an offset component, such that
/// `private_excess + offset = key`. The offset component is disclosed in clear with the transaction; the private
/// component stays inside the kernel excess. The split is deterministic in `(key, index)` so a restarted wallet
/// recovers the identical decomposition.
pub fn split_key(key: &PrivateKey, index: u64) -> Result<(PrivateKey, PrivateKey), TransactionProtocolError> {
    let hash = HashDigest::new()
        .chain(key.as_bytes())
        .chain(index.to_le_bytes())
        .result();
    let offset = PrivateKey::from_bytes(hash.as_slice())?;
    let private_excess = key - &offset;
    Ok((private_excess, offset))
}

/// Produce this party's partial signature `s_i = r_i + e·x_i` over the aggregate challenge.
pub fn sign_partial(
    blinding_excess: &PrivateKey,
    nonce: PrivateKey,
    public_nonce_sum: &PublicKey,
    public_excess_sum: &PublicKey,
    metadata: &TransactionMetadata,
) -> Result<Signature, TransactionProtocolError> {
    let e = build_challenge(public_nonce_sum, public_excess_sum, metadata);
    Signature::sign(blinding_excess.clone(), nonce, &e).map_err(TransactionProtocolError::SigningError)
}

/// Check a received partial signature: `g·s_j == R_j + e·P_j`, with `e` recomputed from the aggregates. A partial
/// signature that fails this check MUST abort the negotiation.
pub fn verify_partial(
    partial_signature: &PrivateKey,
    public_peer_nonce: &PublicKey,
    public_peer_excess: &PublicKey,
    public_nonce_sum: &PublicKey,
    public_excess_sum: &PublicKey,
    metadata: &TransactionMetadata,
) -> bool {
    let e = build_challenge(public_nonce_sum, public_excess_sum, metadata);
    let sig = Signature::new(public_peer_nonce.clone(), partial_signature.clone());
    sig.verify_challenge(public_peer_excess, &e)
}

/// Assemble the final aggregate signature from both parties' partials. The public nonces and signature scalars
/// simply add.
pub fn combine_signatures(own: &Signature, peer: &Signature) -> Signature {
    own + peer
}

/// The public image of a secret under the default generator.
pub fn as_public(secret: &PrivateKey) -> PublicKey {
    PublicKey::from_secret_key(secret)
}
