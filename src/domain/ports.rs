use super::account::{Account, IncomingPayment, LiquidityAccountType, Peer, WalletAddress};
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait IncomingPaymentService: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<IncomingPayment>>;
}

#[async_trait]
pub trait WalletAddressService: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<WalletAddress>>;
}

#[async_trait]
pub trait PeerService: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Peer>>;
    /// Finds the peer whose registered address prefixes `destination`.
    async fn get_by_destination_address(&self, destination: &str) -> Result<Option<Peer>>;
}

/// The liquidity ledger.
///
/// Creating a record that already exists must fail with
/// [`LedgerError::AccountAlreadyExists`]. The connector takes no lock around
/// first-time provisioning, so this rejection is what keeps concurrent
/// packets for the same account from creating duplicate records.
#[async_trait]
pub trait AccountingService: Send + Sync {
    async fn create_liquidity_account(
        &self,
        account: &Account,
        account_type: LiquidityAccountType,
    ) -> std::result::Result<(), LedgerError>;
}

pub type IncomingPaymentServiceRef = Arc<dyn IncomingPaymentService>;
pub type WalletAddressServiceRef = Arc<dyn WalletAddressService>;
pub type PeerServiceRef = Arc<dyn PeerService>;
pub type AccountingServiceRef = Arc<dyn AccountingService>;
