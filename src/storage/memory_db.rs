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
    storage::{
        database::{TxParameterId, WalletBackend, WalletStorageError},
        models::{Coin, CoinStatus, TxDescription, WalletAddress},
    },
    types::{HashDigest, Height, PeerId, PrivateKey, TxId},
};
use digest::Digest;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};
use tari_crypto::tari_utilities::ByteArray;

/// This structure is an in-memory wallet backend that implements the `WalletBackend` trait and provides all the
/// functionality required by the trait. It serves the tests, and pins down the reference semantics of the storage
/// contract (deterministic selection, atomic write-back, per-transaction rollback).
struct InnerDatabase {
    coins: Vec<Coin>,
    next_coin_id: u64,
    transactions: HashMap<TxId, TxDescription>,
    parameters: HashMap<(TxId, TxParameterId), Vec<u8>>,
    addresses: Vec<WalletAddress>,
    chain_height: Height,
}

impl InnerDatabase {
    fn new() -> Self {
        Self {
            coins: Vec::new(),
            next_coin_id: 1,
            transactions: HashMap::new(),
            parameters: HashMap::new(),
            addresses: Vec::new(),
            chain_height: 0,
        }
    }
}

#[derive(Clone)]
pub struct WalletMemoryDatabase {
    master_key: PrivateKey,
    db: Arc<RwLock<InnerDatabase>>,
}

impl WalletMemoryDatabase {
    pub fn new(master_key: PrivateKey) -> Self {
        Self {
            master_key,
            db: Arc::new(RwLock::new(InnerDatabase::new())),
        }
    }

    /// Seed the wallet with a spendable coin. Only meaningful before a negotiation runs.
    pub fn add_confirmed_coin(&self, amount: Amount) -> Result<Coin, WalletStorageError> {
        let mut db = self.db.write().map_err(|_| WalletStorageError::PoisonedAccess)?;
        let id = db.next_coin_id;
        db.next_coin_id += 1;
        let coin = Coin {
            id,
            amount,
            status: CoinStatus::Confirmed,
            maturity_height: 0,
            create_tx_id: None,
            spent_tx_id: None,
        };
        db.coins.push(coin.clone());
        Ok(coin)
    }

    pub fn add_address(&self, address: WalletAddress) -> Result<(), WalletStorageError> {
        let mut db = self.db.write().map_err(|_| WalletStorageError::PoisonedAccess)?;
        db.addresses.push(address);
        Ok(())
    }

    pub fn set_chain_height(&self, height: Height) -> Result<(), WalletStorageError> {
        let mut db = self.db.write().map_err(|_| WalletStorageError::PoisonedAccess)?;
        db.chain_height = height;
        Ok(())
    }
}

impl WalletBackend for WalletMemoryDatabase {
    fn select_coins(&self, amount: Amount) -> Result<Vec<Coin>, WalletStorageError> {
        let db = self.db.read().map_err(|_| WalletStorageError::PoisonedAccess)?;
        let mut spendable: Vec<Coin> = db
            .coins
            .iter()
            .filter(|c| {
                c.status == CoinStatus::Confirmed && c.spent_tx_id.is_none() && c.maturity_height <= db.chain_height
            })
            .cloned()
            .collect();
        // Largest first, ties broken by id, so a given ledger state always yields the same selection
        spendable.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.id.cmp(&b.id)));
        let mut total = Amount::from(0);
        let mut selected = Vec::new();
        for coin in spendable {
            if total >= amount {
                break;
            }
            total += coin.amount;
            selected.push(coin);
        }
        if total < amount {
            return Ok(Vec::new());
        }
        Ok(selected)
    }

    fn calc_key(&self, coin: &Coin) -> Result<PrivateKey, WalletStorageError> {
        let hash = HashDigest::new()
            .chain(self.master_key.as_bytes())
            .chain(coin.id.to_le_bytes())
            .result();
        PrivateKey::from_bytes(hash.as_slice()).map_err(|e| WalletStorageError::ConversionError(e.to_string()))
    }

    fn store_coin(&self, mut coin: Coin) -> Result<Coin, WalletStorageError> {
        let mut db = self.db.write().map_err(|_| WalletStorageError::PoisonedAccess)?;
        coin.id = db.next_coin_id;
        db.next_coin_id += 1;
        db.coins.push(coin.clone());
        Ok(coin)
    }

    fn update_coins(&self, coins: &[Coin]) -> Result<(), WalletStorageError> {
        let mut db = self.db.write().map_err(|_| WalletStorageError::PoisonedAccess)?;
        // Verify the whole batch before mutating anything
        for coin in coins {
            if !db.coins.iter().any(|c| c.id == coin.id) {
                return Err(WalletStorageError::ValuesNotFound);
            }
        }
        for coin in coins {
            if let Some(slot) = db.coins.iter_mut().find(|c| c.id == coin.id) {
                *slot = coin.clone();
            }
        }
        Ok(())
    }

    fn rollback_tx(&self, tx_id: &TxId) -> Result<(), WalletStorageError> {
        let mut db = self.db.write().map_err(|_| WalletStorageError::PoisonedAccess)?;
        for coin in db.coins.iter_mut() {
            if coin.create_tx_id.as_ref() == Some(tx_id) &&
                matches!(coin.status, CoinStatus::Draft | CoinStatus::Unconfirmed)
            {
                coin.status = CoinStatus::Cancelled;
            }
            if coin.spent_tx_id.as_ref() == Some(tx_id) && coin.status != CoinStatus::Spent {
                coin.status = CoinStatus::Confirmed;
                coin.spent_tx_id = None;
            }
        }
        Ok(())
    }

    fn for_each_coin(&self, f: &mut dyn FnMut(&Coin)) -> Result<(), WalletStorageError> {
        let db = self.db.read().map_err(|_| WalletStorageError::PoisonedAccess)?;
        for coin in db.coins.iter() {
            f(coin);
        }
        Ok(())
    }

    fn current_height(&self) -> Result<Height, WalletStorageError> {
        let db = self.db.read().map_err(|_| WalletStorageError::PoisonedAccess)?;
        Ok(db.chain_height)
    }

    fn get_address(&self, peer_id: &PeerId) -> Result<Option<WalletAddress>, WalletStorageError> {
        let db = self.db.read().map_err(|_| WalletStorageError::PoisonedAccess)?;
        Ok(db.addresses.iter().find(|a| &a.peer_id == peer_id).cloned())
    }

    fn save_tx(&self, desc: &TxDescription) -> Result<(), WalletStorageError> {
        let mut db = self.db.write().map_err(|_| WalletStorageError::PoisonedAccess)?;
        db.transactions.insert(desc.tx_id, desc.clone());
        Ok(())
    }

    fn delete_tx(&self, tx_id: &TxId) -> Result<(), WalletStorageError> {
        let mut db = self.db.write().map_err(|_| WalletStorageError::PoisonedAccess)?;
        db.transactions.remove(tx_id);
        db.parameters.retain(|(id, _), _| id != tx_id);
        Ok(())
    }

    fn fetch_tx(&self, tx_id: &TxId) -> Result<Option<TxDescription>, WalletStorageError> {
        let db = self.db.read().map_err(|_| WalletStorageError::PoisonedAccess)?;
        Ok(db.transactions.get(tx_id).cloned())
    }

    fn get_tx_parameter(&self, tx_id: &TxId, id: TxParameterId) -> Result<Option<Vec<u8>>, WalletStorageError> {
        let db = self.db.read().map_err(|_| WalletStorageError::PoisonedAccess)?;
        Ok(db.parameters.get(&(*tx_id, id)).cloned())
    }

    fn set_tx_parameter(&self, tx_id: &TxId, id: TxParameterId, value: Vec<u8>) -> Result<(), WalletStorageError> {
        let mut db = self.db.write().map_err(|_| WalletStorageError::PoisonedAccess)?;
        db.parameters.insert((*tx_id, id), value);
        Ok(())
    }
}
