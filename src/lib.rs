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

//! # mw_wallet
//!
//! The interactive transaction negotiation core of a Mimblewimble wallet: two wallets, a sender and a receiver,
//! exchange messages over an unreliable channel to jointly build, co-sign and register a single confidential
//! transaction. All durable protocol state lives in an append-only per-transaction parameter store and the coin
//! ledger, so a negotiation survives wallet restarts and resumes exactly where it left off.
//!
//! The entry point is [`transaction_protocol::negotiation::TxNegotiation`]; the storage contract it runs against is
//! [`storage::database::WalletBackend`], and the outbound capabilities it drives are
//! [`gateway::NegotiatorGateway`].

pub mod aggregated_body;
pub mod amount;
pub mod gateway;
pub mod storage;
pub mod transaction;
pub mod transaction_protocol;
pub mod types;

pub use crate::{
    amount::Amount,
    transaction_protocol::negotiation::TxNegotiation,
    types::TxId,
};
