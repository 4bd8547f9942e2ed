use crate::domain::account::{Account, IncomingPayment, LiquidityAccountType, Peer, WalletAddress};
use crate::domain::ports::{
    AccountingService, IncomingPaymentService, PeerService, WalletAddressService,
};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

/// A thread-safe in-memory directory of incoming payments.
#[derive(Default, Clone)]
pub struct InMemoryIncomingPayments {
    payments: Arc<RwLock<HashMap<Uuid, IncomingPayment>>>,
}

impl InMemoryIncomingPayments {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, payment: IncomingPayment) {
        self.payments.write().await.insert(payment.id, payment);
    }
}

#[async_trait]
impl IncomingPaymentService for InMemoryIncomingPayments {
    async fn get(&self, id: &str) -> Result<Option<IncomingPayment>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let payments = self.payments.read().await;
        Ok(payments.get(&id).cloned())
    }
}

/// A thread-safe in-memory directory of wallet addresses.
#[derive(Default, Clone)]
pub struct InMemoryWalletAddresses {
    wallet_addresses: Arc<RwLock<HashMap<Uuid, WalletAddress>>>,
}

impl InMemoryWalletAddresses {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, wallet_address: WalletAddress) {
        self.wallet_addresses
            .write()
            .await
            .insert(wallet_address.id, wallet_address);
    }
}

#[async_trait]
impl WalletAddressService for InMemoryWalletAddresses {
    async fn get(&self, id: &str) -> Result<Option<WalletAddress>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let wallet_addresses = self.wallet_addresses.read().await;
        Ok(wallet_addresses.get(&id).cloned())
    }
}

/// A thread-safe in-memory peer routing table.
///
/// When several registered addresses prefix a destination, the longest one
/// wins.
#[derive(Default, Clone)]
pub struct InMemoryPeers {
    peers: Arc<RwLock<HashMap<Uuid, Peer>>>,
}

impl InMemoryPeers {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, peer: Peer) {
        self.peers.write().await.insert(peer.id, peer);
    }
}

#[async_trait]
impl PeerService for InMemoryPeers {
    async fn get(&self, id: &str) -> Result<Option<Peer>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let peers = self.peers.read().await;
        Ok(peers.get(&id).cloned())
    }

    async fn get_by_destination_address(&self, destination: &str) -> Result<Option<Peer>> {
        let peers = self.peers.read().await;
        Ok(peers
            .values()
            .filter(|peer| peer.routes(destination))
            .max_by_key(|peer| peer.static_ilp_address.len())
            .cloned())
    }
}

/// A thread-safe in-memory liquidity ledger.
///
/// Holds one record per account id. The existence check and the insert happen
/// under the same write lock, so concurrent creations for one account yield
/// exactly one record and `AccountAlreadyExists` for the rest.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    accounts: Arc<RwLock<HashMap<Uuid, LiquidityAccountType>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, account_id: Uuid) -> Option<LiquidityAccountType> {
        self.accounts.read().await.get(&account_id).copied()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountingService for InMemoryLedger {
    async fn create_liquidity_account(
        &self,
        account: &Account,
        account_type: LiquidityAccountType,
    ) -> std::result::Result<(), LedgerError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.id()) {
            return Err(LedgerError::AccountAlreadyExists);
        }
        accounts.insert(account.id(), account_type);
        Ok(())
    }
}
