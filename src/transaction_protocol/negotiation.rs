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

//! The per-transaction negotiation state machine.
//!
//! A [`TxNegotiation`] owns one negotiation: its draft coins in the ledger and its `(tx_id, *)` slice of the
//! parameter store. All durable state lives in those two places; the struct itself can be dropped and rebuilt from
//! the stored [`TxDescription`] at any point. The scheduler calls [`update`](TxNegotiation::update) whenever a new
//! parameter has arrived for the transaction. Each call reads the parameters present, performs the single next step
//! they allow, persists what it learned and returns; it never blocks.

use crate::{
    amount::Amount,
    gateway::{KernelProof, NegotiatorGateway},
    storage::{
        database::{params, WalletBackend, WalletDatabase},
        models::{Coin, CoinStatus, TxDescription, TxFailureReason, TxStatus},
    },
    transaction::{OutputFeatures, Transaction, TransactionInput, TransactionKernel, TransactionOutput},
    transaction_protocol::{
        messages::{ConfirmInvitation, ConfirmTransaction, Invite, TxConfirmation},
        multisig,
        TransactionMetadata,
        TransactionProtocolError,
    },
    types::{Commitment, CryptoFactories, Height, PrivateKey, PublicKey, Signature},
};
use log::*;
use std::collections::HashSet;
use tari_crypto::commitment::HomomorphicCommitmentFactory;

pub const LOG_TARGET: &str = "wallet::transaction_protocol::negotiation";

/// Which side of the payment this wallet plays.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Role {
    Sender,
    Receiver,
}

/// Outbound actions, used to suppress duplicate emissions when `update()` runs again without any new parameters.
/// The set is in-memory only: a restarted wallet re-emits, and the deterministic nonce derivation guarantees the
/// re-sent message is identical to the lost one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum OutboundStep {
    Invite,
    ConfirmInvitation,
    ConfirmTransaction,
    Register,
    Registered,
    ConfirmKernel,
}

pub struct TxNegotiation<B, G>
where
    B: WalletBackend,
    G: NegotiatorGateway,
{
    role: Role,
    db: WalletDatabase<B>,
    gateway: G,
    factories: CryptoFactories,
    desc: TxDescription,
    kernel: Option<TransactionKernel>,
    emitted: HashSet<OutboundStep>,
}

impl<B, G> TxNegotiation<B, G>
where
    B: WalletBackend,
    G: NegotiatorGateway,
{
    /// Take ownership of a negotiation. The role is the one recorded in the description; a wallet that is paying
    /// runs the Sender steps, a wallet being paid runs the Receiver steps.
    pub fn new(gateway: G, db: WalletDatabase<B>, factories: CryptoFactories, desc: TxDescription) -> Self {
        let role = if desc.sender { Role::Sender } else { Role::Receiver };
        TxNegotiation {
            role,
            db,
            gateway,
            factories,
            desc,
            kernel: None,
            emitted: HashSet::new(),
        }
    }

    pub fn tx_id(&self) -> crate::types::TxId {
        self.desc.tx_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn status(&self) -> TxStatus {
        self.desc.status
    }

    pub fn description(&self) -> &TxDescription {
        &self.desc
    }

    /// The co-signed kernel, available once the transaction has been registered.
    pub fn kernel(&self) -> Option<&TransactionKernel> {
        match self.desc.status {
            TxStatus::Registered | TxStatus::Completed => self.kernel.as_ref(),
            _ => None,
        }
    }

    /// Advance the negotiation by one step. Protocol-level failures terminate the negotiation internally (status
    /// `Failed`, coins rolled back, peer notified where appropriate) and still return `Ok`; only storage trouble
    /// surfaces as an error.
    pub fn update(&mut self) -> Result<(), TransactionProtocolError> {
        if self.desc.status.is_terminal() {
            return Ok(());
        }
        if let Some(reason) = self.db.get_parameter(&self.desc.tx_id, params::FAILURE_REASON)? {
            // Recorded by a previous run or delivered by the peer; finish tearing down locally.
            self.on_failed(reason, false)?;
            return Ok(());
        }
        match self.role {
            Role::Sender => self.update_sender(),
            Role::Receiver => self.update_receiver(),
        }
    }

    /// Abandon the negotiation. A Pending transaction is deleted outright; anything further along is rolled back
    /// and the peer is told.
    pub fn cancel(&mut self) -> Result<(), TransactionProtocolError> {
        if self.desc.status == TxStatus::Pending {
            self.db.delete_tx(&self.desc.tx_id)?;
            return Ok(());
        }
        if !self.desc.status.can_cancel() {
            return Err(TransactionProtocolError::InvalidStateError);
        }
        info!(target: LOG_TARGET, "{} Cancelling. Rollback...", self.desc.tx_id);
        self.db
            .set_parameter_if_absent(&self.desc.tx_id, params::FAILURE_REASON, &TxFailureReason::Cancelled)?;
        self.update_description(TxStatus::Cancelled)?;
        self.db.rollback_tx(&self.desc.tx_id)?;
        self.gateway.send_tx_failed(&self.desc);
        Ok(())
    }

    fn update_sender(&mut self) -> Result<(), TransactionProtocolError> {
        let tx_id = self.desc.tx_id;
        let initiator = self.db.get_parameter(&tx_id, params::PEER_OFFSET)?.is_none();

        let stored_excess = self.db.get_parameter(&tx_id, params::BLINDING_EXCESS)?;
        let stored_offset = self.db.get_parameter(&tx_id, params::OFFSET)?;
        let (blinding_excess, offset) = match (stored_excess, stored_offset) {
            (Some(x), Some(o)) => (x, o),
            _ => {
                info!(
                    target: LOG_TARGET,
                    "{} Sending {} (fee: {})", tx_id, self.desc.amount, self.desc.fee
                );
                let current_height = self.db.current_height()?;
                self.desc.min_height = current_height;
                let (x, o) = match self.reserve_inputs(current_height)? {
                    Some(keys) => keys,
                    None => {
                        self.on_failed(TxFailureReason::InsufficientFunds, !initiator)?;
                        return Ok(());
                    },
                };
                if let Some(address) = self.db.get_address(&self.desc.peer_id)? {
                    if address.own {
                        self.on_failed(TxFailureReason::LoopbackNotSupported, false)?;
                        return Ok(());
                    }
                }
                // Re-derivable values: a run interrupted between these writes resumes with identical bytes
                self.db.set_parameter_if_absent(&tx_id, params::BLINDING_EXCESS, &x)?;
                self.db.set_parameter_if_absent(&tx_id, params::OFFSET, &o)?;
                self.update_description(TxStatus::InProgress)?;
                (x, o)
            },
        };

        let metadata = TransactionMetadata {
            fee: self.desc.fee,
            lock_height: self.desc.min_height,
        };
        let nonce = multisig::derive_nonce(&blinding_excess, &metadata)?;
        let public_nonce = multisig::as_public(&nonce);
        let public_excess = multisig::as_public(&blinding_excess);

        let peer_nonce = self.db.get_parameter(&tx_id, params::PUBLIC_PEER_NONCE)?;
        let peer_excess = self.db.get_parameter(&tx_id, params::PUBLIC_PEER_EXCESS)?;
        let (peer_nonce, peer_excess) = match (peer_nonce, peer_excess) {
            (Some(n), Some(x)) => (n, x),
            _ => {
                debug_assert!(initiator);
                self.send_invite(public_excess, public_nonce, &offset)?;
                return Ok(());
            },
        };

        let nonce_sum = &public_nonce + &peer_nonce;
        let excess_sum = &public_excess + &peer_excess;
        let partial = multisig::sign_partial(&blinding_excess, nonce, &nonce_sum, &excess_sum, &metadata)?;

        let peer_signature = match self.db.get_parameter(&tx_id, params::PEER_SIGNATURE)? {
            Some(s) => s,
            None => {
                // We were invited to pay; answer with our public data and partial signature
                debug_assert!(!initiator);
                self.send_confirm_invitation(public_excess, public_nonce, &partial)?;
                return Ok(());
            },
        };

        if !multisig::verify_partial(&peer_signature, &peer_nonce, &peer_excess, &nonce_sum, &excess_sum, &metadata) {
            self.on_failed(TxFailureReason::InvalidPeerSignature, true)?;
            return Ok(());
        }
        let peer_partial = Signature::new(peer_nonce.clone(), peer_signature);
        let kernel = self.build_kernel(&metadata, &excess_sum, multisig::combine_signatures(&partial, &peer_partial));

        match self.db.get_parameter(&tx_id, params::TRANSACTION_REGISTERED)? {
            None => {
                let peer_inputs = self.db.get_parameter(&tx_id, params::PEER_INPUTS)?;
                let peer_outputs = self.db.get_parameter(&tx_id, params::PEER_OUTPUTS)?;
                match (peer_inputs, peer_outputs) {
                    (Some(inputs), Some(outputs)) => {
                        // The peer initiated; assembling and submitting falls to us
                        let peer_offset = match self.db.get_parameter(&tx_id, params::PEER_OFFSET)? {
                            Some(po) => po,
                            None => {
                                self.on_failed(TxFailureReason::FailedToGetParameter, true)?;
                                return Ok(());
                            },
                        };
                        self.assemble_and_register(kernel, &offset, &peer_offset, inputs, outputs)?;
                    },
                    _ => {
                        // We initiated; hand our partial signature over and let the peer assemble
                        debug_assert!(initiator);
                        self.send_confirm_transaction(&partial)?;
                    },
                }
                Ok(())
            },
            Some(false) => {
                self.on_failed(TxFailureReason::FailedToRegister, true)?;
                Ok(())
            },
            Some(true) => match self.db.get_parameter(&tx_id, params::KERNEL_PROOF)? {
                None => {
                    if !initiator {
                        self.send_registered();
                    }
                    self.confirm_kernel(kernel)
                },
                Some(proof) => self.complete_if_proven(kernel, proof),
            },
        }
    }

    fn update_receiver(&mut self) -> Result<(), TransactionProtocolError> {
        let tx_id = self.desc.tx_id;

        if self.db.get_parameter(&tx_id, params::OUTPUTS)?.is_none() {
            info!(
                target: LOG_TARGET,
                "{} Receiving {} (fee: {})", tx_id, self.desc.amount, self.desc.fee
            );
            let coin = self.create_output(self.desc.amount, self.desc.min_height)?;
            let blinding_factor = self.db.calc_key(&coin)?;
            let (private_excess, new_offset) = multisig::split_key(&blinding_factor, coin.id)?;
            let blinding_excess = &PrivateKey::default() - &private_excess;
            let outputs = self.tx_outputs()?;
            // The guard parameter (Outputs) goes last so an interrupted run re-enters this block
            self.db.set_parameter_if_absent(&tx_id, params::BLINDING_EXCESS, &blinding_excess)?;
            self.db.set_parameter_if_absent(&tx_id, params::OFFSET, &new_offset)?;
            self.db.set_parameter(&tx_id, params::OUTPUTS, &outputs)?;
            info!(target: LOG_TARGET, "{} Invitation accepted", tx_id);
            self.update_description(TxStatus::InProgress)?;
        }

        let stored_excess = self.db.get_parameter(&tx_id, params::BLINDING_EXCESS)?;
        let stored_offset = self.db.get_parameter(&tx_id, params::OFFSET)?;
        let (blinding_excess, offset) = match (stored_excess, stored_offset) {
            (Some(x), Some(o)) => (x, o),
            _ => {
                self.on_failed(TxFailureReason::FailedToGetParameter, true)?;
                return Ok(());
            },
        };

        let peer_offset = self.db.get_parameter(&tx_id, params::PEER_OFFSET)?;
        let peer_nonce = self.db.get_parameter(&tx_id, params::PUBLIC_PEER_NONCE)?;
        let peer_excess = self.db.get_parameter(&tx_id, params::PUBLIC_PEER_EXCESS)?;
        let (peer_offset, peer_nonce, peer_excess) = match (peer_offset, peer_nonce, peer_excess) {
            (Some(po), Some(n), Some(x)) => (po, n, x),
            _ => {
                // A receiver cannot open a negotiation; without the inviter's data there is nothing to do
                self.on_failed(TxFailureReason::FailedToGetParameter, true)?;
                return Ok(());
            },
        };

        let metadata = TransactionMetadata {
            fee: self.desc.fee,
            lock_height: self.desc.min_height,
        };
        let nonce = multisig::derive_nonce(&blinding_excess, &metadata)?;
        let public_nonce = multisig::as_public(&nonce);
        let public_excess = multisig::as_public(&blinding_excess);
        let nonce_sum = &public_nonce + &peer_nonce;
        let excess_sum = &public_excess + &peer_excess;
        let partial = multisig::sign_partial(&blinding_excess, nonce, &nonce_sum, &excess_sum, &metadata)?;

        let peer_signature = match self.db.get_parameter(&tx_id, params::PEER_SIGNATURE)? {
            Some(s) => s,
            None => {
                self.send_confirm_invitation(public_excess, public_nonce, &partial)?;
                return Ok(());
            },
        };

        if !multisig::verify_partial(&peer_signature, &peer_nonce, &peer_excess, &nonce_sum, &excess_sum, &metadata) {
            self.on_failed(TxFailureReason::InvalidPeerSignature, true)?;
            return Ok(());
        }
        let peer_partial = Signature::new(peer_nonce.clone(), peer_signature);
        let kernel = self.build_kernel(&metadata, &excess_sum, multisig::combine_signatures(&partial, &peer_partial));

        match self.db.get_parameter(&tx_id, params::TRANSACTION_REGISTERED)? {
            None => {
                let peer_inputs = self.db.get_parameter(&tx_id, params::PEER_INPUTS)?.unwrap_or_default();
                let peer_outputs = self.db.get_parameter(&tx_id, params::PEER_OUTPUTS)?.unwrap_or_default();
                self.assemble_and_register(kernel, &offset, &peer_offset, peer_inputs, peer_outputs)
            },
            Some(false) => {
                self.on_failed(TxFailureReason::FailedToRegister, true)?;
                Ok(())
            },
            Some(true) => match self.db.get_parameter(&tx_id, params::KERNEL_PROOF)? {
                None => {
                    self.send_registered();
                    self.confirm_kernel(kernel)
                },
                Some(proof) => self.complete_if_proven(kernel, proof),
            },
        }
    }

    /// Reserve enough confirmed coins to cover amount plus fee, deriving the aggregate blinding excess, and create
    /// the change output when the reservation overshoots. Coins already locked to this transaction are picked up
    /// again, so a run that was interrupted between the ledger write and the parameter writes resumes cleanly.
    fn reserve_inputs(
        &mut self,
        current_height: Height,
    ) -> Result<Option<(PrivateKey, PrivateKey)>, TransactionProtocolError> {
        let tx_id = self.desc.tx_id;
        let amount_with_fee = self.desc.amount + self.desc.fee;

        let mut coins = Vec::new();
        self.db.for_each_coin(&mut |c| {
            if c.spent_tx_id == Some(tx_id) && c.status == CoinStatus::Locked {
                coins.push(c.clone());
            }
        })?;
        if coins.is_empty() {
            coins = self.db.select_coins(amount_with_fee)?;
            if coins.is_empty() {
                warn!(
                    target: LOG_TARGET,
                    "{} Not enough funds to cover {}", tx_id, amount_with_fee
                );
                return Ok(None);
            }
            for coin in coins.iter_mut() {
                coin.spent_tx_id = Some(tx_id);
                coin.status = CoinStatus::Locked;
            }
            self.db.update_coins(&coins)?;
        }

        let mut blinding_excess = PrivateKey::default();
        for coin in coins.iter() {
            blinding_excess = &blinding_excess + &self.db.calc_key(coin)?;
        }

        let total: Amount = coins.iter().map(|c| c.amount).sum();
        let change = total - amount_with_fee;
        let mut offset = PrivateKey::default();
        if !change.is_zero() {
            let change_coin = self.create_output(change, current_height)?;
            let blinding_factor = self.db.calc_key(&change_coin)?;
            let (private_excess, new_offset) = multisig::split_key(&blinding_factor, change_coin.id)?;
            blinding_excess = &blinding_excess - &private_excess;
            offset = &offset + &new_offset;
            self.desc.change = change;
        }
        Ok(Some((blinding_excess, offset)))
    }

    /// Draft an output coin for this negotiation, reusing one drafted by an interrupted earlier run.
    fn create_output(&self, amount: Amount, maturity_height: Height) -> Result<Coin, TransactionProtocolError> {
        let existing = self
            .db
            .coins_created_by(&self.desc.tx_id)?
            .into_iter()
            .find(|c| c.status == CoinStatus::Draft && c.amount == amount);
        let coin = match existing {
            Some(c) => c,
            None => self
                .db
                .store_coin(Coin::draft(amount, maturity_height, self.desc.tx_id))?,
        };
        Ok(coin)
    }

    fn build_kernel(
        &mut self,
        metadata: &TransactionMetadata,
        excess_sum: &PublicKey,
        signature: Signature,
    ) -> TransactionKernel {
        let kernel = TransactionKernel::new(*metadata, Commitment::from_public_key(excess_sum), signature);
        self.kernel = Some(kernel.clone());
        kernel
    }

    /// Merge both parties' inputs and outputs around the signed kernel, validate the whole transaction and hand it
    /// to the node.
    fn assemble_and_register(
        &mut self,
        kernel: TransactionKernel,
        own_offset: &PrivateKey,
        peer_offset: &PrivateKey,
        mut inputs: Vec<TransactionInput>,
        mut outputs: Vec<TransactionOutput>,
    ) -> Result<(), TransactionProtocolError> {
        inputs.append(&mut self.tx_inputs()?);
        outputs.append(&mut self.tx_outputs()?);
        let transaction = Transaction::new(inputs, outputs, vec![kernel], peer_offset + own_offset);

        let height = self.db.current_height()?;
        if let Err(e) = transaction.validate_internal_consistency(&self.factories, height) {
            warn!(
                target: LOG_TARGET,
                "{} Assembled transaction failed validation: {}", self.desc.tx_id, e
            );
            self.on_failed(TxFailureReason::InvalidTransaction, true)?;
            return Ok(());
        }
        if self.emit(OutboundStep::Register) {
            self.gateway.register_tx(&self.desc, transaction);
        }
        Ok(())
    }

    /// Mark the registered transaction's coins as awaiting confirmation and ask the node to start proving the
    /// kernel.
    fn confirm_kernel(&mut self, kernel: TransactionKernel) -> Result<(), TransactionProtocolError> {
        if self.desc.status != TxStatus::Registered {
            info!(target: LOG_TARGET, "{} Transaction registered", self.desc.tx_id);
            self.update_description(TxStatus::Registered)?;
            let mut coins = self.db.coins_created_by(&self.desc.tx_id)?;
            for coin in coins.iter_mut() {
                coin.status = CoinStatus::Unconfirmed;
            }
            self.db.update_coins(&coins)?;
        }
        if self.emit(OutboundStep::ConfirmKernel) {
            self.gateway.confirm_kernel(&self.desc, kernel);
        }
        Ok(())
    }

    fn complete_if_proven(
        &mut self,
        kernel: TransactionKernel,
        proof: KernelProof,
    ) -> Result<(), TransactionProtocolError> {
        let proven = match self.gateway.get_tip() {
            Some(tip) => proof.proves(&kernel, &tip),
            None => false,
        };
        if !proven && !self.gateway.is_test_mode() {
            // The chain may simply not have caught up to the proof yet; try again on the next tip update
            debug!(
                target: LOG_TARGET,
                "{} Kernel proof not valid under the current tip", self.desc.tx_id
            );
            return Ok(());
        }
        self.complete_tx()
    }

    fn complete_tx(&mut self) -> Result<(), TransactionProtocolError> {
        info!(target: LOG_TARGET, "{} Transaction completed", self.desc.tx_id);
        self.update_description(TxStatus::Completed)?;
        self.gateway.confirm_outputs(&self.desc);
        self.gateway.on_tx_completed(&self.desc);
        Ok(())
    }

    fn on_failed(&mut self, reason: TxFailureReason, notify: bool) -> Result<(), TransactionProtocolError> {
        warn!(
            target: LOG_TARGET,
            "{} Transaction failed ({}). Rollback...", self.desc.tx_id, reason
        );
        self.db
            .set_parameter_if_absent(&self.desc.tx_id, params::FAILURE_REASON, &reason)?;
        self.update_description(TxStatus::Failed)?;
        self.db.rollback_tx(&self.desc.tx_id)?;
        if notify {
            self.gateway.send_tx_failed(&self.desc);
        }
        self.gateway.on_tx_completed(&self.desc);
        Ok(())
    }

    fn update_description(&mut self, status: TxStatus) -> Result<(), TransactionProtocolError> {
        self.desc.status = status;
        self.desc.modify_time = chrono::Utc::now().naive_utc();
        self.db.save_tx(&self.desc)?;
        Ok(())
    }

    /// Commitments of the coins this negotiation has reserved as inputs.
    fn tx_inputs(&self) -> Result<Vec<TransactionInput>, TransactionProtocolError> {
        let tx_id = self.desc.tx_id;
        let mut coins = Vec::new();
        self.db.for_each_coin(&mut |c| {
            if c.spent_tx_id == Some(tx_id) && c.status == CoinStatus::Locked {
                coins.push(c.clone());
            }
        })?;
        let mut inputs = Vec::with_capacity(coins.len());
        for coin in coins {
            let key = self.db.calc_key(&coin)?;
            let commitment = self.factories.commitment.commit(&key, &coin.amount.into());
            inputs.push(TransactionInput::new(
                OutputFeatures::with_maturity(coin.maturity_height),
                commitment,
            ));
        }
        Ok(inputs)
    }

    /// Blinded outputs for the coins this negotiation has drafted.
    fn tx_outputs(&self) -> Result<Vec<TransactionOutput>, TransactionProtocolError> {
        let coins: Vec<Coin> = self
            .db
            .coins_created_by(&self.desc.tx_id)?
            .into_iter()
            .filter(|c| c.status == CoinStatus::Draft)
            .collect();
        let mut outputs = Vec::with_capacity(coins.len());
        for coin in coins {
            let key = self.db.calc_key(&coin)?;
            outputs.push(TransactionOutput::create(
                OutputFeatures::with_maturity(coin.maturity_height),
                &key,
                coin.amount,
                &self.factories,
            )?);
        }
        Ok(outputs)
    }

    fn send_invite(
        &mut self,
        public_excess: PublicKey,
        public_nonce: PublicKey,
        offset: &PrivateKey,
    ) -> Result<(), TransactionProtocolError> {
        if !self.emit(OutboundStep::Invite) {
            return Ok(());
        }
        let invite = Invite {
            tx_id: self.desc.tx_id,
            amount: self.desc.amount,
            fee: self.desc.fee,
            height: self.desc.min_height,
            send: self.desc.sender,
            inputs: self.tx_inputs()?,
            outputs: self.tx_outputs()?,
            public_peer_excess: public_excess,
            public_peer_nonce: public_nonce,
            offset: offset.clone(),
        };
        self.gateway.send_tx_invitation(&self.desc, invite);
        Ok(())
    }

    fn send_confirm_invitation(
        &mut self,
        public_excess: PublicKey,
        public_nonce: PublicKey,
        partial: &Signature,
    ) -> Result<(), TransactionProtocolError> {
        if !self.emit(OutboundStep::ConfirmInvitation) {
            return Ok(());
        }
        let confirmation = ConfirmInvitation {
            tx_id: self.desc.tx_id,
            public_peer_excess: public_excess,
            public_peer_nonce: public_nonce,
            peer_signature: partial.get_signature().clone(),
        };
        self.gateway
            .send_tx_confirmation(&self.desc, TxConfirmation::Invitation(confirmation));
        Ok(())
    }

    fn send_confirm_transaction(&mut self, partial: &Signature) -> Result<(), TransactionProtocolError> {
        if !self.emit(OutboundStep::ConfirmTransaction) {
            return Ok(());
        }
        let confirmation = ConfirmTransaction {
            tx_id: self.desc.tx_id,
            peer_signature: partial.get_signature().clone(),
        };
        self.gateway
            .send_tx_confirmation(&self.desc, TxConfirmation::Transaction(confirmation));
        Ok(())
    }

    fn send_registered(&mut self) {
        if self.emit(OutboundStep::Registered) {
            self.gateway.send_tx_registered(&self.desc);
        }
    }

    fn emit(&mut self, step: OutboundStep) -> bool {
        self.emitted.insert(step)
    }
}
