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

//! End-to-end negotiation scenarios: two in-memory wallets wired together through a synchronous loopback gateway
//! and a scripted node.

use mw_wallet::{
    amount::Amount,
    gateway::{ChainTip, KernelProof, NegotiatorGateway},
    storage::{
        database::{params, WalletDatabase},
        memory_db::WalletMemoryDatabase,
        models::{Coin, CoinStatus, TxDescription, TxFailureReason, TxStatus, WalletAddress},
    },
    transaction::{OutputFeatures, Transaction, TransactionKernel, TransactionOutput},
    transaction_protocol::{
        messages::{ConfirmTransaction, Invite, TxConfirmation, TxFailed, TxRegistered},
        multisig,
        negotiation::TxNegotiation,
        TransactionMetadata,
    },
    types::{Commitment, CryptoFactories, PeerId, PrivateKey, PublicKey, TxId},
};
use rand::rngs::OsRng;
use std::sync::{Arc, Mutex};
use tari_crypto::keys::{PublicKey as PublicKeyTrait, SecretKey};

const TEST_HEIGHT: u64 = 5;

//----------------------------------------        Support         ----------------------------------------------------//

#[derive(Debug, Clone)]
enum GatewayEvent {
    Invitation(Invite),
    Confirmation(TxConfirmation),
    Registered(TxId),
    Failed(TxId),
    SubmitTx(Transaction),
    ConfirmKernel(TransactionKernel),
    ConfirmOutputs(TxId),
    Completed(TxId, TxStatus),
}

struct NodeState {
    height: u64,
    mined: Vec<(Commitment, u64)>,
}

type SharedNode = Arc<Mutex<NodeState>>;

fn new_node() -> SharedNode {
    Arc::new(Mutex::new(NodeState {
        height: TEST_HEIGHT,
        mined: Vec::new(),
    }))
}

#[derive(Clone)]
struct TestGateway {
    outbox: Arc<Mutex<Vec<GatewayEvent>>>,
    node: SharedNode,
    test_mode: bool,
}

impl NegotiatorGateway for TestGateway {
    fn send_tx_invitation(&self, _desc: &TxDescription, invite: Invite) {
        self.outbox.lock().unwrap().push(GatewayEvent::Invitation(invite));
    }

    fn send_tx_confirmation(&self, _desc: &TxDescription, confirmation: TxConfirmation) {
        self.outbox.lock().unwrap().push(GatewayEvent::Confirmation(confirmation));
    }

    fn send_tx_registered(&self, desc: &TxDescription) {
        self.outbox.lock().unwrap().push(GatewayEvent::Registered(desc.tx_id));
    }

    fn send_tx_failed(&self, desc: &TxDescription) {
        self.outbox.lock().unwrap().push(GatewayEvent::Failed(desc.tx_id));
    }

    fn register_tx(&self, _desc: &TxDescription, transaction: Transaction) {
        self.outbox.lock().unwrap().push(GatewayEvent::SubmitTx(transaction));
    }

    fn confirm_kernel(&self, _desc: &TxDescription, kernel: TransactionKernel) {
        self.outbox.lock().unwrap().push(GatewayEvent::ConfirmKernel(kernel));
    }

    fn confirm_outputs(&self, desc: &TxDescription) {
        self.outbox.lock().unwrap().push(GatewayEvent::ConfirmOutputs(desc.tx_id));
    }

    fn on_tx_completed(&self, desc: &TxDescription) {
        self.outbox
            .lock()
            .unwrap()
            .push(GatewayEvent::Completed(desc.tx_id, desc.status));
    }

    fn get_tip(&self) -> Option<ChainTip> {
        let node = self.node.lock().unwrap();
        Some(ChainTip {
            height: node.height,
            hash: vec![7u8; 32],
        })
    }

    fn is_test_mode(&self) -> bool {
        self.test_mode
    }
}

struct TestWallet {
    id: PeerId,
    backend: WalletMemoryDatabase,
    db: WalletDatabase<WalletMemoryDatabase>,
    gateway: TestGateway,
}

impl TestWallet {
    fn new(node: &SharedNode) -> TestWallet {
        TestWallet::with_test_mode(node, false)
    }

    fn with_test_mode(node: &SharedNode, test_mode: bool) -> TestWallet {
        let backend = WalletMemoryDatabase::new(PrivateKey::random(&mut OsRng));
        backend.set_chain_height(TEST_HEIGHT).unwrap();
        TestWallet {
            id: PublicKey::from_secret_key(&PrivateKey::random(&mut OsRng)),
            backend: backend.clone(),
            db: WalletDatabase::new(backend),
            gateway: TestGateway {
                outbox: Arc::new(Mutex::new(Vec::new())),
                node: node.clone(),
                test_mode,
            },
        }
    }

    fn seed_coins(&self, amounts: &[u64]) {
        for a in amounts {
            self.backend.add_confirmed_coin(Amount::from(*a)).unwrap();
        }
    }

    fn take_events(&self) -> Vec<GatewayEvent> {
        self.gateway.outbox.lock().unwrap().drain(..).collect()
    }

    fn coins(&self) -> Vec<Coin> {
        let mut coins = Vec::new();
        self.db.for_each_coin(&mut |c| coins.push(c.clone())).unwrap();
        coins
    }

    fn negotiation(&self, desc: TxDescription) -> TxNegotiation<WalletMemoryDatabase, TestGateway> {
        TxNegotiation::new(self.gateway.clone(), self.db.clone(), CryptoFactories::default(), desc)
    }

    /// Rebuild the negotiation from durable state only, as a restarted wallet process would.
    fn resume_negotiation(&self, tx_id: &TxId) -> TxNegotiation<WalletMemoryDatabase, TestGateway> {
        let desc = self.db.fetch_tx(tx_id).unwrap().expect("transaction must be stored");
        self.negotiation(desc)
    }
}

fn expect_invite(events: Vec<GatewayEvent>) -> Invite {
    for e in events {
        if let GatewayEvent::Invitation(invite) = e {
            return invite;
        }
    }
    panic!("no invitation was sent");
}

fn expect_confirmation(events: Vec<GatewayEvent>) -> TxConfirmation {
    for e in events {
        if let GatewayEvent::Confirmation(c) = e {
            return c;
        }
    }
    panic!("no confirmation was sent");
}

fn expect_submitted(events: Vec<GatewayEvent>) -> Transaction {
    for e in events {
        if let GatewayEvent::SubmitTx(tx) = e {
            return tx;
        }
    }
    panic!("no transaction was submitted to the node");
}

fn contains_registered(events: &[GatewayEvent]) -> bool {
    events.iter().any(|e| matches!(e, GatewayEvent::Registered(_)))
}

fn contains_kernel_confirmation(events: &[GatewayEvent]) -> bool {
    events.iter().any(|e| matches!(e, GatewayEvent::ConfirmKernel(_)))
}

fn contains_failed(events: &[GatewayEvent]) -> bool {
    events.iter().any(|e| matches!(e, GatewayEvent::Failed(_)))
}

/// The node side of the loopback: validate the submitted transaction, mine it one block on and acknowledge the
/// registration to the submitting wallet.
fn node_accept(
    node: &SharedNode,
    factories: &CryptoFactories,
    submitter: &TestWallet,
    tx_id: &TxId,
    transaction: &Transaction,
) {
    let height = node.lock().unwrap().height;
    transaction
        .validate_internal_consistency(factories, height)
        .expect("node rejected the transaction");
    {
        let mut node = node.lock().unwrap();
        node.height += 1;
        let mined_at = node.height;
        for kernel in transaction.body.kernels() {
            node.mined.push((kernel.excess.clone(), mined_at));
        }
    }
    submitter
        .db
        .set_parameter_if_absent(tx_id, params::TRANSACTION_REGISTERED, &true)
        .unwrap();
}

/// Answer a kernel confirmation request with the inclusion proof, if the kernel has been mined.
fn node_prove(node: &SharedNode, wallet: &TestWallet, tx_id: &TxId, kernel: &TransactionKernel) {
    let node = node.lock().unwrap();
    let mined = node
        .mined
        .iter()
        .find(|(excess, _)| excess == &kernel.excess)
        .expect("kernel was never mined");
    wallet
        .db
        .set_parameter_if_absent(
            tx_id,
            params::KERNEL_PROOF,
            &KernelProof {
                height: mined.1,
                excess: mined.0.clone(),
            },
        )
        .unwrap();
}

struct CompletedRun {
    tx_id: TxId,
    sender: TxNegotiation<WalletMemoryDatabase, TestGateway>,
    receiver: TxNegotiation<WalletMemoryDatabase, TestGateway>,
}

/// Drive a full sender-initiated negotiation between the two wallets to completion.
fn run_to_completion(
    node: &SharedNode,
    factories: &CryptoFactories,
    alice: &TestWallet,
    bob: &TestWallet,
    amount: Amount,
    fee: Amount,
) -> CompletedRun {
    let tx_id = TxId::new_random();
    let desc = TxDescription::new(tx_id, bob.id.clone(), amount, fee, true);
    alice.db.save_tx(&desc).unwrap();
    let mut alice_neg = alice.negotiation(desc);

    // the sender reserves inputs and sends the invitation
    alice_neg.update().unwrap();
    let invite = expect_invite(alice.take_events());

    // transport: the invite lands in Bob's store and wakes a receiver negotiation
    let bob_desc = invite.to_description(alice.id.clone());
    bob.db.save_tx(&bob_desc).unwrap();
    invite.apply(&bob.db).unwrap();
    let mut bob_neg = bob.negotiation(bob_desc);

    // the receiver creates its output and answers with a partial signature
    bob_neg.update().unwrap();
    let confirmation = expect_confirmation(bob.take_events());
    confirmation.apply(&alice.db).unwrap();

    // the sender verifies Bob's partial signature and hands its own over
    alice_neg.update().unwrap();
    let confirm_tx = expect_confirmation(alice.take_events());
    confirm_tx.apply(&bob.db).unwrap();

    // the receiver assembles, validates and submits
    bob_neg.update().unwrap();
    let transaction = expect_submitted(bob.take_events());
    node_accept(node, factories, bob, &tx_id, &transaction);

    // the receiver tells Alice and asks the node for the proof
    bob_neg.update().unwrap();
    let events = bob.take_events();
    assert!(contains_registered(&events));
    assert!(contains_kernel_confirmation(&events));
    TxRegistered { tx_id }.apply(&alice.db).unwrap();
    node_prove(node, bob, &tx_id, bob_neg.kernel().expect("receiver kernel"));

    // receiver completes once the proof arrives
    bob_neg.update().unwrap();
    assert_eq!(bob_neg.status(), TxStatus::Completed);

    // the sender runs its own completion path
    alice_neg.update().unwrap();
    assert!(contains_kernel_confirmation(&alice.take_events()));
    node_prove(node, alice, &tx_id, alice_neg.kernel().expect("sender kernel"));
    alice_neg.update().unwrap();
    assert_eq!(alice_neg.status(), TxStatus::Completed);

    CompletedRun {
        tx_id,
        sender: alice_neg,
        receiver: bob_neg,
    }
}

//----------------------------------------       Scenarios        ----------------------------------------------------//

#[test]
fn happy_path_with_change() {
    let factories = CryptoFactories::default();
    let node = new_node();
    let alice = TestWallet::new(&node);
    let bob = TestWallet::new(&node);
    alice.seed_coins(&[100]);

    let run = run_to_completion(&node, &factories, &alice, &bob, Amount::from(40), Amount::from(1));

    // the sender ends with an unconfirmed change coin of 59 and the input locked to the transaction
    let alice_coins = alice.coins();
    let change: Vec<&Coin> = alice_coins
        .iter()
        .filter(|c| c.create_tx_id == Some(run.tx_id))
        .collect();
    assert_eq!(change.len(), 1);
    assert_eq!(change[0].amount, Amount::from(59));
    assert_eq!(change[0].status, CoinStatus::Unconfirmed);
    let spent: Vec<&Coin> = alice_coins
        .iter()
        .filter(|c| c.spent_tx_id == Some(run.tx_id))
        .collect();
    assert_eq!(spent.len(), 1);
    assert_eq!(spent[0].status, CoinStatus::Locked);

    // the receiver ends with a single unconfirmed coin of 40
    let bob_coins = bob.coins();
    assert_eq!(bob_coins.len(), 1);
    assert_eq!(bob_coins[0].amount, Amount::from(40));
    assert_eq!(bob_coins[0].status, CoinStatus::Unconfirmed);

    // the co-signed kernel verifies, and both parties hold the same one
    let kernel = run.sender.kernel().expect("kernel after completion");
    kernel.verify_signature().unwrap();
    assert_eq!(kernel.excess, run.receiver.kernel().unwrap().excess);
    assert_eq!(run.sender.description().change, Amount::from(59));
}

#[test]
fn exact_amount_creates_no_change() {
    let factories = CryptoFactories::default();
    let node = new_node();
    let alice = TestWallet::new(&node);
    let bob = TestWallet::new(&node);
    alice.seed_coins(&[30, 10]);

    let run = run_to_completion(&node, &factories, &alice, &bob, Amount::from(39), Amount::from(1));

    let alice_coins = alice.coins();
    assert!(alice_coins.iter().all(|c| c.create_tx_id != Some(run.tx_id)));
    let spent: Vec<&Coin> = alice_coins
        .iter()
        .filter(|c| c.spent_tx_id == Some(run.tx_id))
        .collect();
    assert_eq!(spent.len(), 2);

    let bob_coins = bob.coins();
    assert_eq!(bob_coins.len(), 1);
    assert_eq!(bob_coins[0].amount, Amount::from(39));
    assert_eq!(run.sender.description().change, Amount::from(0));
}

#[test]
fn fee_only_transfer_of_zero() {
    let factories = CryptoFactories::default();
    let node = new_node();
    let alice = TestWallet::new(&node);
    let bob = TestWallet::new(&node);
    alice.seed_coins(&[1]);

    let run = run_to_completion(&node, &factories, &alice, &bob, Amount::from(0), Amount::from(1));

    // coin of 1 covers exactly the fee: no change coin appears
    assert!(alice.coins().iter().all(|c| c.create_tx_id != Some(run.tx_id)));
    assert_eq!(run.sender.kernel().unwrap().fee, Amount::from(1));
}

#[test]
fn insufficient_funds_fails_locally_without_invite() {
    let node = new_node();
    let alice = TestWallet::new(&node);
    let bob = TestWallet::new(&node);
    alice.seed_coins(&[10]);

    let tx_id = TxId::new_random();
    let desc = TxDescription::new(tx_id, bob.id.clone(), Amount::from(20), Amount::from(1), true);
    alice.db.save_tx(&desc).unwrap();
    let mut neg = alice.negotiation(desc);
    neg.update().unwrap();

    assert_eq!(neg.status(), TxStatus::Failed);
    let events = alice.take_events();
    assert!(events.iter().all(|e| !matches!(e, GatewayEvent::Invitation(_))));
    // we never spoke to the peer, so the peer is not notified either
    assert!(!contains_failed(&events));
    assert_eq!(
        alice.db.get_parameter(&tx_id, params::FAILURE_REASON).unwrap(),
        Some(TxFailureReason::InsufficientFunds)
    );
    // no coin was touched
    assert!(alice
        .coins()
        .iter()
        .all(|c| c.status == CoinStatus::Confirmed && c.spent_tx_id.is_none()));
}

#[test]
fn tampered_peer_signature_rolls_back_both_sides() {
    let node = new_node();
    let alice = TestWallet::new(&node);
    let bob = TestWallet::new(&node);
    alice.seed_coins(&[100]);

    let tx_id = TxId::new_random();
    let desc = TxDescription::new(tx_id, bob.id.clone(), Amount::from(40), Amount::from(1), true);
    alice.db.save_tx(&desc).unwrap();
    let mut alice_neg = alice.negotiation(desc);
    alice_neg.update().unwrap();
    let invite = expect_invite(alice.take_events());

    let bob_desc = invite.to_description(alice.id.clone());
    bob.db.save_tx(&bob_desc).unwrap();
    invite.apply(&bob.db).unwrap();
    let mut bob_neg = bob.negotiation(bob_desc);
    bob_neg.update().unwrap();

    // the transport (or a hostile receiver) replaces the partial signature with a random scalar
    let mut confirmation = match expect_confirmation(bob.take_events()) {
        TxConfirmation::Invitation(c) => c,
        _ => panic!("expected an invitation confirmation"),
    };
    confirmation.peer_signature = PrivateKey::random(&mut OsRng);
    confirmation.apply(&alice.db).unwrap();

    alice_neg.update().unwrap();
    assert_eq!(alice_neg.status(), TxStatus::Failed);
    assert_eq!(
        alice.db.get_parameter(&tx_id, params::FAILURE_REASON).unwrap(),
        Some(TxFailureReason::InvalidPeerSignature)
    );
    let events = alice.take_events();
    assert!(contains_failed(&events));

    // alice's inputs are released
    assert!(alice
        .coins()
        .iter()
        .all(|c| c.status == CoinStatus::Confirmed && c.spent_tx_id.is_none()));

    // the failure notification tears the receiver down too
    TxFailed {
        tx_id,
        reason: TxFailureReason::InvalidPeerSignature,
    }
    .apply(&bob.db)
    .unwrap();
    bob_neg.update().unwrap();
    assert_eq!(bob_neg.status(), TxStatus::Failed);
    assert!(bob.coins().iter().all(|c| c.status == CoinStatus::Cancelled));
}

#[test]
fn crash_after_invite_resumes_from_durable_state() {
    let factories = CryptoFactories::default();
    let node = new_node();
    let alice = TestWallet::new(&node);
    let bob = TestWallet::new(&node);
    alice.seed_coins(&[100]);

    let tx_id = TxId::new_random();
    let desc = TxDescription::new(tx_id, bob.id.clone(), Amount::from(40), Amount::from(1), true);
    alice.db.save_tx(&desc).unwrap();
    let mut alice_neg = alice.negotiation(desc);
    alice_neg.update().unwrap();
    let invite = expect_invite(alice.take_events());

    let bob_desc = invite.to_description(alice.id.clone());
    bob.db.save_tx(&bob_desc).unwrap();
    invite.apply(&bob.db).unwrap();
    let mut bob_neg = bob.negotiation(bob_desc);
    bob_neg.update().unwrap();
    let confirmation = expect_confirmation(bob.take_events());

    // the sender process dies here; only the stores survive
    drop(alice_neg);
    let mut alice_neg = alice.resume_negotiation(&tx_id);

    confirmation.apply(&alice.db).unwrap();
    alice_neg.update().unwrap();
    let confirm_tx = expect_confirmation(alice.take_events());
    confirm_tx.apply(&bob.db).unwrap();

    bob_neg.update().unwrap();
    let transaction = expect_submitted(bob.take_events());
    node_accept(&node, &factories, &bob, &tx_id, &transaction);
    bob_neg.update().unwrap();
    bob.take_events();
    TxRegistered { tx_id }.apply(&alice.db).unwrap();
    node_prove(&node, &bob, &tx_id, bob_neg.kernel().unwrap());
    bob_neg.update().unwrap();

    alice_neg.update().unwrap();
    alice.take_events();
    node_prove(&node, &alice, &tx_id, alice_neg.kernel().unwrap());
    alice_neg.update().unwrap();

    assert_eq!(alice_neg.status(), TxStatus::Completed);
    assert_eq!(bob_neg.status(), TxStatus::Completed);
    // the resumed run recovered the same aggregate excess the receiver signed
    assert_eq!(alice_neg.kernel().unwrap().excess, bob_neg.kernel().unwrap().excess);
    alice_neg.kernel().unwrap().verify_signature().unwrap();
}

#[test]
fn resent_confirmation_is_byte_identical() {
    let node = new_node();
    let alice = TestWallet::new(&node);
    let bob = TestWallet::new(&node);
    alice.seed_coins(&[100]);

    let tx_id = TxId::new_random();
    let desc = TxDescription::new(tx_id, bob.id.clone(), Amount::from(40), Amount::from(1), true);
    alice.db.save_tx(&desc).unwrap();
    let mut alice_neg = alice.negotiation(desc);
    alice_neg.update().unwrap();
    let invite = expect_invite(alice.take_events());

    let bob_desc = invite.to_description(alice.id.clone());
    bob.db.save_tx(&bob_desc).unwrap();
    invite.apply(&bob.db).unwrap();
    let mut bob_neg = bob.negotiation(bob_desc);
    bob_neg.update().unwrap();
    let first = match expect_confirmation(bob.take_events()) {
        TxConfirmation::Invitation(c) => c,
        _ => panic!("expected an invitation confirmation"),
    };

    // a restarted receiver derives the identical partial signature from its stored state
    drop(bob_neg);
    let mut bob_neg = bob.resume_negotiation(&tx_id);
    bob_neg.update().unwrap();
    let second = match expect_confirmation(bob.take_events()) {
        TxConfirmation::Invitation(c) => c,
        _ => panic!("expected an invitation confirmation"),
    };

    assert_eq!(first.peer_signature, second.peer_signature);
    assert_eq!(first.public_peer_nonce, second.public_peer_nonce);
    assert_eq!(first.public_peer_excess, second.public_peer_excess);
}

#[test]
fn repeated_update_emits_nothing_new() {
    let node = new_node();
    let alice = TestWallet::new(&node);
    let bob = TestWallet::new(&node);
    alice.seed_coins(&[100]);

    let tx_id = TxId::new_random();
    let desc = TxDescription::new(tx_id, bob.id.clone(), Amount::from(40), Amount::from(1), true);
    alice.db.save_tx(&desc).unwrap();
    let mut neg = alice.negotiation(desc);
    neg.update().unwrap();
    assert_eq!(alice.take_events().len(), 1);

    let coins_before = alice.coins();
    neg.update().unwrap();
    neg.update().unwrap();
    assert!(alice.take_events().is_empty());
    assert_eq!(alice.coins(), coins_before);
}

#[test]
fn cancel_after_invite_releases_coins_and_notifies() {
    let node = new_node();
    let alice = TestWallet::new(&node);
    let bob = TestWallet::new(&node);
    alice.seed_coins(&[100]);

    let tx_id = TxId::new_random();
    let desc = TxDescription::new(tx_id, bob.id.clone(), Amount::from(40), Amount::from(1), true);
    alice.db.save_tx(&desc).unwrap();
    let mut neg = alice.negotiation(desc);
    neg.update().unwrap();
    alice.take_events();

    neg.cancel().unwrap();
    assert_eq!(neg.status(), TxStatus::Cancelled);
    assert!(contains_failed(&alice.take_events()));
    assert!(alice
        .coins()
        .iter()
        .filter(|c| c.create_tx_id != Some(tx_id))
        .all(|c| c.status == CoinStatus::Confirmed && c.spent_tx_id.is_none()));
    assert!(alice
        .coins()
        .iter()
        .filter(|c| c.create_tx_id == Some(tx_id))
        .all(|c| c.status == CoinStatus::Cancelled));
    assert_eq!(
        alice.db.get_parameter(&tx_id, params::FAILURE_REASON).unwrap(),
        Some(TxFailureReason::Cancelled)
    );

    // terminal: further updates change nothing
    neg.update().unwrap();
    assert!(alice.take_events().is_empty());
}

#[test]
fn cancel_of_pending_deletes_the_record() {
    let node = new_node();
    let alice = TestWallet::new(&node);
    let bob = TestWallet::new(&node);

    let tx_id = TxId::new_random();
    let desc = TxDescription::new(tx_id, bob.id.clone(), Amount::from(40), Amount::from(1), true);
    alice.db.save_tx(&desc).unwrap();
    let mut neg = alice.negotiation(desc);
    neg.cancel().unwrap();

    assert!(alice.db.fetch_tx(&tx_id).unwrap().is_none());
    assert!(alice.take_events().is_empty());
}

#[test]
fn self_send_is_rejected() {
    let node = new_node();
    let alice = TestWallet::new(&node);
    alice.seed_coins(&[100]);
    alice
        .backend
        .add_address(WalletAddress {
            peer_id: alice.id.clone(),
            label: "self".to_string(),
            own: true,
        })
        .unwrap();

    let tx_id = TxId::new_random();
    let desc = TxDescription::new(tx_id, alice.id.clone(), Amount::from(40), Amount::from(1), true);
    alice.db.save_tx(&desc).unwrap();
    let mut neg = alice.negotiation(desc);
    neg.update().unwrap();

    assert_eq!(neg.status(), TxStatus::Failed);
    assert_eq!(
        alice.db.get_parameter(&tx_id, params::FAILURE_REASON).unwrap(),
        Some(TxFailureReason::LoopbackNotSupported)
    );
    // the reserved coin is released by the rollback
    assert!(alice
        .coins()
        .iter()
        .filter(|c| c.create_tx_id != Some(tx_id))
        .all(|c| c.status == CoinStatus::Confirmed && c.spent_tx_id.is_none()));
}

#[test]
fn kernel_proof_is_retried_on_next_tip() {
    let factories = CryptoFactories::default();
    let node = new_node();
    let alice = TestWallet::new(&node);
    let bob = TestWallet::new(&node);
    alice.seed_coins(&[100]);

    let tx_id = TxId::new_random();
    let desc = TxDescription::new(tx_id, bob.id.clone(), Amount::from(40), Amount::from(1), true);
    alice.db.save_tx(&desc).unwrap();
    let mut alice_neg = alice.negotiation(desc);
    alice_neg.update().unwrap();
    let invite = expect_invite(alice.take_events());
    let bob_desc = invite.to_description(alice.id.clone());
    bob.db.save_tx(&bob_desc).unwrap();
    invite.apply(&bob.db).unwrap();
    let mut bob_neg = bob.negotiation(bob_desc);
    bob_neg.update().unwrap();
    expect_confirmation(bob.take_events()).apply(&alice.db).unwrap();
    alice_neg.update().unwrap();
    expect_confirmation(alice.take_events()).apply(&bob.db).unwrap();
    bob_neg.update().unwrap();
    let transaction = expect_submitted(bob.take_events());
    node_accept(&node, &factories, &bob, &tx_id, &transaction);
    bob_neg.update().unwrap();
    bob.take_events();

    // a proof for a block the wallet's node has not seen yet: ahead of the current tip
    let future_height = node.lock().unwrap().height + 10;
    bob.db
        .set_parameter_if_absent(
            &tx_id,
            params::KERNEL_PROOF,
            &KernelProof {
                height: future_height,
                excess: bob_neg.kernel().unwrap().excess.clone(),
            },
        )
        .unwrap();
    bob_neg.update().unwrap();
    assert_eq!(bob_neg.status(), TxStatus::Registered);

    // the chain catches up; the next update completes the negotiation
    node.lock().unwrap().height = future_height;
    bob_neg.update().unwrap();
    assert_eq!(bob_neg.status(), TxStatus::Completed);
}

#[test]
fn test_mode_completes_despite_proof_mismatch() {
    let factories = CryptoFactories::default();
    let node = new_node();
    let alice = TestWallet::with_test_mode(&node, true);
    let bob = TestWallet::with_test_mode(&node, true);
    alice.seed_coins(&[100]);

    let tx_id = TxId::new_random();
    let desc = TxDescription::new(tx_id, bob.id.clone(), Amount::from(40), Amount::from(1), true);
    alice.db.save_tx(&desc).unwrap();
    let mut alice_neg = alice.negotiation(desc);
    alice_neg.update().unwrap();
    let invite = expect_invite(alice.take_events());
    let bob_desc = invite.to_description(alice.id.clone());
    bob.db.save_tx(&bob_desc).unwrap();
    invite.apply(&bob.db).unwrap();
    let mut bob_neg = bob.negotiation(bob_desc);
    bob_neg.update().unwrap();
    expect_confirmation(bob.take_events()).apply(&alice.db).unwrap();
    alice_neg.update().unwrap();
    expect_confirmation(alice.take_events()).apply(&bob.db).unwrap();
    bob_neg.update().unwrap();
    let transaction = expect_submitted(bob.take_events());
    node_accept(&node, &factories, &bob, &tx_id, &transaction);
    bob_neg.update().unwrap();
    bob.take_events();

    // a proof that does not match the kernel at all
    bob.db
        .set_parameter_if_absent(
            &tx_id,
            params::KERNEL_PROOF,
            &KernelProof {
                height: 0,
                excess: Commitment::from_public_key(&PublicKey::from_secret_key(&PrivateKey::random(&mut OsRng))),
            },
        )
        .unwrap();
    bob_neg.update().unwrap();
    assert_eq!(bob_neg.status(), TxStatus::Completed);
}

/// A payment request: the payee builds the invitation by hand (playing the transport-visible part of the protocol)
/// and the paying wallet runs the machine as the invited party.
#[test]
fn invited_sender_assembles_and_registers() {
    let factories = CryptoFactories::default();
    let node = new_node();
    let alice = TestWallet::new(&node);
    let bob = TestWallet::new(&node);
    alice.seed_coins(&[100]);

    let tx_id = TxId::new_random();
    let amount = Amount::from(25);
    let fee = Amount::from(1);
    let metadata = TransactionMetadata {
        fee,
        lock_height: TEST_HEIGHT,
    };

    // Bob requests payment: drafts his output and his protocol contribution
    let coin = bob.db.store_coin(Coin::draft(amount, TEST_HEIGHT, tx_id)).unwrap();
    let key = bob.db.calc_key(&coin).unwrap();
    let (private_excess, offset) = multisig::split_key(&key, coin.id).unwrap();
    let blinding_excess = &PrivateKey::default() - &private_excess;
    let nonce = multisig::derive_nonce(&blinding_excess, &metadata).unwrap();
    let output = TransactionOutput::create(OutputFeatures::with_maturity(TEST_HEIGHT), &key, amount, &factories).unwrap();
    let invite = Invite {
        tx_id,
        amount,
        fee,
        height: TEST_HEIGHT,
        send: false,
        inputs: vec![],
        outputs: vec![output],
        public_peer_excess: multisig::as_public(&blinding_excess),
        public_peer_nonce: multisig::as_public(&nonce),
        offset: offset.clone(),
    };

    // Alice accepts the request and runs the sender machine as the invited party
    let desc = invite.to_description(bob.id.clone());
    assert!(desc.sender);
    alice.db.save_tx(&desc).unwrap();
    invite.apply(&alice.db).unwrap();
    let mut alice_neg = alice.negotiation(desc);
    alice_neg.update().unwrap();
    let answer = match expect_confirmation(alice.take_events()) {
        TxConfirmation::Invitation(c) => c,
        _ => panic!("expected an invitation confirmation"),
    };

    // Bob verifies Alice's partial signature and returns his own
    let nonce_sum = &multisig::as_public(&nonce) + &answer.public_peer_nonce;
    let excess_sum = &multisig::as_public(&blinding_excess) + &answer.public_peer_excess;
    assert!(multisig::verify_partial(
        &answer.peer_signature,
        &answer.public_peer_nonce,
        &answer.public_peer_excess,
        &nonce_sum,
        &excess_sum,
        &metadata
    ));
    let partial = multisig::sign_partial(&blinding_excess, nonce, &nonce_sum, &excess_sum, &metadata).unwrap();
    ConfirmTransaction {
        tx_id,
        peer_signature: partial.get_signature().clone(),
    }
    .apply(&alice.db)
    .unwrap();

    // Alice assembles and submits
    alice_neg.update().unwrap();
    let transaction = expect_submitted(alice.take_events());
    node_accept(&node, &factories, &alice, &tx_id, &transaction);

    // ...then notifies Bob and completes once the proof arrives
    alice_neg.update().unwrap();
    let events = alice.take_events();
    assert!(contains_registered(&events));
    assert!(contains_kernel_confirmation(&events));
    node_prove(&node, &alice, &tx_id, alice_neg.kernel().unwrap());
    alice_neg.update().unwrap();
    assert_eq!(alice_neg.status(), TxStatus::Completed);

    // change of 100 - 26 = 74 came back to Alice
    let change: Vec<Coin> = alice
        .coins()
        .into_iter()
        .filter(|c| c.create_tx_id == Some(tx_id))
        .collect();
    assert_eq!(change.len(), 1);
    assert_eq!(change[0].amount, Amount::from(74));
}

