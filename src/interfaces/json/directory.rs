use crate::application::context::ConnectorServices;
use crate::domain::account::{IncomingPayment, Peer, WalletAddress};
use crate::domain::ports::AccountingServiceRef;
use crate::error::Result;
use crate::infrastructure::in_memory::{
    InMemoryIncomingPayments, InMemoryPeers, InMemoryWalletAddresses,
};
use serde::Deserialize;
use std::io::Read;
use std::sync::Arc;

/// A point-in-time export of the account directory.
///
/// ```json
/// {
///   "peers": [{ "id": "...", "static_ilp_address": "test.peer" }],
///   "incoming_payments": [{ "id": "...", "wallet_address_id": "...", "state": "PENDING" }],
///   "wallet_addresses": [{ "id": "...", "url": "https://wallet.example/alice" }]
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct DirectorySnapshot {
    #[serde(default)]
    pub peers: Vec<Peer>,
    #[serde(default)]
    pub incoming_payments: Vec<IncomingPayment>,
    #[serde(default)]
    pub wallet_addresses: Vec<WalletAddress>,
}

impl DirectorySnapshot {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    /// Loads the snapshot into in-memory directories backed by `accounting`.
    pub async fn into_services(self, accounting: AccountingServiceRef) -> ConnectorServices {
        let peers = InMemoryPeers::new();
        for peer in self.peers {
            peers.insert(peer).await;
        }
        let incoming_payments = InMemoryIncomingPayments::new();
        for payment in self.incoming_payments {
            incoming_payments.insert(payment).await;
        }
        let wallet_addresses = InMemoryWalletAddresses::new();
        for wallet_address in self.wallet_addresses {
            wallet_addresses.insert(wallet_address).await;
        }

        ConnectorServices::new(
            Arc::new(incoming_payments),
            Arc::new(wallet_addresses),
            Arc::new(peers),
            accounting,
        )
    }
}
