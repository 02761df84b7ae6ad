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
    gateway::KernelProof,
    storage::models::{Coin, TxDescription, TxFailureReason, WalletAddress},
    transaction::{TransactionInput, TransactionOutput},
    types::{Height, PeerId, PrivateKey, PublicKey, TxId},
};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalletStorageError {
    #[error("Tried to access the wallet store through a poisoned lock")]
    PoisonedAccess,
    #[error("Error converting a stored value: `{0}`")]
    ConversionError(String),
    #[error("Could not find all values specified for the operation")]
    ValuesNotFound,
}

/// Identifiers of the per-transaction key/value entries that carry all durable protocol state. The set is closed;
/// the meaning of an entry never changes once written.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TxParameterId {
    Amount,
    Fee,
    MinHeight,
    Offset,
    Inputs,
    Outputs,
    BlindingExcess,
    PeerSignature,
    PublicPeerNonce,
    PublicPeerExcess,
    PeerOffset,
    PeerInputs,
    PeerOutputs,
    TransactionRegistered,
    KernelProof,
    FailureReason,
}

/// A typed handle onto one parameter slot. Having the value type ride along with the identifier makes it impossible
/// to decode a stored scalar as, say, a point at the call site; the encoding itself is centralized in
/// [`WalletDatabase`].
#[derive(Debug)]
pub struct TxParameter<T> {
    id: TxParameterId,
    value_type: PhantomData<T>,
}

impl<T> TxParameter<T> {
    const fn new(id: TxParameterId) -> TxParameter<T> {
        TxParameter {
            id,
            value_type: PhantomData,
        }
    }

    pub fn id(&self) -> TxParameterId {
        self.id
    }
}

/// The typed handles, one per [`TxParameterId`].
pub mod params {
    use super::*;

    pub const AMOUNT: TxParameter<Amount> = TxParameter::new(TxParameterId::Amount);
    pub const FEE: TxParameter<Amount> = TxParameter::new(TxParameterId::Fee);
    pub const MIN_HEIGHT: TxParameter<Height> = TxParameter::new(TxParameterId::MinHeight);
    pub const OFFSET: TxParameter<PrivateKey> = TxParameter::new(TxParameterId::Offset);
    pub const INPUTS: TxParameter<Vec<TransactionInput>> = TxParameter::new(TxParameterId::Inputs);
    pub const OUTPUTS: TxParameter<Vec<TransactionOutput>> = TxParameter::new(TxParameterId::Outputs);
    pub const BLINDING_EXCESS: TxParameter<PrivateKey> = TxParameter::new(TxParameterId::BlindingExcess);
    pub const PEER_SIGNATURE: TxParameter<PrivateKey> = TxParameter::new(TxParameterId::PeerSignature);
    pub const PUBLIC_PEER_NONCE: TxParameter<PublicKey> = TxParameter::new(TxParameterId::PublicPeerNonce);
    pub const PUBLIC_PEER_EXCESS: TxParameter<PublicKey> = TxParameter::new(TxParameterId::PublicPeerExcess);
    pub const PEER_OFFSET: TxParameter<PrivateKey> = TxParameter::new(TxParameterId::PeerOffset);
    pub const PEER_INPUTS: TxParameter<Vec<TransactionInput>> = TxParameter::new(TxParameterId::PeerInputs);
    pub const PEER_OUTPUTS: TxParameter<Vec<TransactionOutput>> = TxParameter::new(TxParameterId::PeerOutputs);
    pub const TRANSACTION_REGISTERED: TxParameter<bool> = TxParameter::new(TxParameterId::TransactionRegistered);
    pub const KERNEL_PROOF: TxParameter<KernelProof> = TxParameter::new(TxParameterId::KernelProof);
    pub const FAILURE_REASON: TxParameter<TxFailureReason> = TxParameter::new(TxParameterId::FailureReason);
}

/// The storage functionality the negotiation core relies on. Implementations serialize writes themselves; a call
/// into the backend is atomic with respect to any other backend call.
pub trait WalletBackend: Send + Sync {
    /// Return a set of spendable coins whose sum covers `amount`, or an empty list if the wallet cannot cover it.
    /// Selection must be deterministic for a given ledger state. The returned coins are not yet reserved; the
    /// caller marks them and writes them back with [`update_coins`](WalletBackend::update_coins).
    fn select_coins(&self, amount: Amount) -> Result<Vec<Coin>, WalletStorageError>;
    /// Derive the blinding factor for a coin's commitment. A pure function of the coin's identity.
    fn calc_key(&self, coin: &Coin) -> Result<PrivateKey, WalletStorageError>;
    /// Persist a coin drafted by a negotiation. The ledger assigns and returns the coin id.
    fn store_coin(&self, coin: Coin) -> Result<Coin, WalletStorageError>;
    /// Write back mutated coin statuses and transaction links, atomically.
    fn update_coins(&self, coins: &[Coin]) -> Result<(), WalletStorageError>;
    /// Reverse every coin mutation tied to `tx_id`: coins drafted by it become Cancelled, coins reserved by it are
    /// released back to Confirmed.
    fn rollback_tx(&self, tx_id: &TxId) -> Result<(), WalletStorageError>;
    /// Iterate all coins in the ledger.
    fn for_each_coin(&self, f: &mut dyn FnMut(&Coin)) -> Result<(), WalletStorageError>;

    fn current_height(&self) -> Result<Height, WalletStorageError>;
    fn get_address(&self, peer_id: &PeerId) -> Result<Option<WalletAddress>, WalletStorageError>;

    fn save_tx(&self, desc: &TxDescription) -> Result<(), WalletStorageError>;
    fn delete_tx(&self, tx_id: &TxId) -> Result<(), WalletStorageError>;
    fn fetch_tx(&self, tx_id: &TxId) -> Result<Option<TxDescription>, WalletStorageError>;

    /// Fetch the raw encoded value of a transaction parameter. Absence is `None`, never a typed zero.
    fn get_tx_parameter(&self, tx_id: &TxId, id: TxParameterId) -> Result<Option<Vec<u8>>, WalletStorageError>;
    /// Store the encoded value of a transaction parameter. Append-only per `(tx_id, id)`.
    fn set_tx_parameter(&self, tx_id: &TxId, id: TxParameterId, value: Vec<u8>) -> Result<(), WalletStorageError>;
}

/// This structure holds an inner backend that implements the storage functionality and provides the typed parameter
/// encoding on top of it. Parameter values travel through the store as bincode blobs (little-endian, length
/// prefixed), so that both parties derive identical bytes for identical values.
#[derive(Clone)]
pub struct WalletDatabase<T>
where T: WalletBackend
{
    db: T,
}

impl<T> WalletDatabase<T>
where T: WalletBackend
{
    pub fn new(db: T) -> Self {
        Self { db }
    }

    pub fn get_parameter<V: DeserializeOwned>(
        &self,
        tx_id: &TxId,
        param: TxParameter<V>,
    ) -> Result<Option<V>, WalletStorageError> {
        match self.db.get_tx_parameter(tx_id, param.id())? {
            Some(blob) => {
                let value = bincode::deserialize(&blob).map_err(|e| WalletStorageError::ConversionError(e.to_string()))?;
                Ok(Some(value))
            },
            None => Ok(None),
        }
    }

    /// Store a parameter value. Rewriting a parameter that is already present is a programmer error; negotiation
    /// state only ever grows.
    pub fn set_parameter<V: Serialize>(
        &self,
        tx_id: &TxId,
        param: TxParameter<V>,
        value: &V,
    ) -> Result<(), WalletStorageError> {
        if cfg!(debug_assertions) {
            let existing = self.db.get_tx_parameter(tx_id, param.id())?;
            debug_assert!(
                existing.is_none(),
                "transaction parameter {:?} for {} written twice",
                param.id(),
                tx_id
            );
        }
        let blob = bincode::serialize(value).map_err(|e| WalletStorageError::ConversionError(e.to_string()))?;
        self.db.set_tx_parameter(tx_id, param.id(), blob)
    }

    /// Store a parameter value unless the slot is already occupied. This is the entry point for the transport: a
    /// peer may deliver the same message more than once, and only the first delivery may write.
    pub fn set_parameter_if_absent<V: Serialize>(
        &self,
        tx_id: &TxId,
        param: TxParameter<V>,
        value: &V,
    ) -> Result<bool, WalletStorageError> {
        if self.db.get_tx_parameter(tx_id, param.id())?.is_some() {
            return Ok(false);
        }
        let blob = bincode::serialize(value).map_err(|e| WalletStorageError::ConversionError(e.to_string()))?;
        self.db.set_tx_parameter(tx_id, param.id(), blob)?;
        Ok(true)
    }

    pub fn select_coins(&self, amount: Amount) -> Result<Vec<Coin>, WalletStorageError> {
        self.db.select_coins(amount)
    }

    pub fn calc_key(&self, coin: &Coin) -> Result<PrivateKey, WalletStorageError> {
        self.db.calc_key(coin)
    }

    pub fn store_coin(&self, coin: Coin) -> Result<Coin, WalletStorageError> {
        self.db.store_coin(coin)
    }

    pub fn update_coins(&self, coins: &[Coin]) -> Result<(), WalletStorageError> {
        self.db.update_coins(coins)
    }

    pub fn rollback_tx(&self, tx_id: &TxId) -> Result<(), WalletStorageError> {
        self.db.rollback_tx(tx_id)
    }

    pub fn for_each_coin(&self, f: &mut dyn FnMut(&Coin)) -> Result<(), WalletStorageError> {
        self.db.for_each_coin(f)
    }

    /// All coins drafted into existence by the given negotiation.
    pub fn coins_created_by(&self, tx_id: &TxId) -> Result<Vec<Coin>, WalletStorageError> {
        let mut coins = Vec::new();
        self.db.for_each_coin(&mut |c| {
            if c.create_tx_id.as_ref() == Some(tx_id) {
                coins.push(c.clone());
            }
        })?;
        Ok(coins)
    }

    pub fn current_height(&self) -> Result<Height, WalletStorageError> {
        self.db.current_height()
    }

    pub fn get_address(&self, peer_id: &PeerId) -> Result<Option<WalletAddress>, WalletStorageError> {
        self.db.get_address(peer_id)
    }

    pub fn save_tx(&self, desc: &TxDescription) -> Result<(), WalletStorageError> {
        self.db.save_tx(desc)
    }

    pub fn delete_tx(&self, tx_id: &TxId) -> Result<(), WalletStorageError> {
        self.db.delete_tx(tx_id)
    }

    pub fn fetch_tx(&self, tx_id: &TxId) -> Result<Option<TxDescription>, WalletStorageError> {
        self.db.fetch_tx(tx_id)
    }
}
