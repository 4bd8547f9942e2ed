#![allow(dead_code)]

use async_trait::async_trait;
use ilp_connector::application::context::{ConnectorServices, PacketContext, PacketState};
use ilp_connector::domain::account::{
    Account, IncomingPayment, IncomingPaymentState, LiquidityAccountType, Peer, WalletAddress,
};
use ilp_connector::domain::packet::PreparePacket;
use ilp_connector::domain::ports::{
    AccountingService, IncomingPaymentService, PeerService, WalletAddressService,
};
use ilp_connector::error::{ConnectorError, LedgerError, Result};
use ilp_connector::infrastructure::in_memory::{
    InMemoryIncomingPayments, InMemoryLedger, InMemoryPeers, InMemoryWalletAddresses,
};
use rust_decimal::Decimal;
use std::io;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::subscriber::DefaultGuard;
use uuid::Uuid;

pub const SERVER_ADDRESS: &str = "test.connector";

/// Directory and ledger fakes that count every call made through them.
#[derive(Default)]
pub struct Spy {
    pub incoming_payments: InMemoryIncomingPayments,
    pub wallet_addresses: InMemoryWalletAddresses,
    pub peers: InMemoryPeers,
    pub ledger: InMemoryLedger,
    pub ledger_failure: Option<LedgerError>,
    pub directory_failure: Option<String>,
    lookups: AtomicUsize,
    creations: Mutex<Vec<(Uuid, LiquidityAccountType)>>,
}

impl Spy {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A spy whose ledger fails every creation with `failure`.
    pub fn failing(failure: LedgerError) -> Arc<Self> {
        Arc::new(Self {
            ledger_failure: Some(failure),
            ..Self::default()
        })
    }

    /// A spy whose directory lookups all fail with `message`.
    pub fn directory_failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            directory_failure: Some(message.to_string()),
            ..Self::default()
        })
    }

    /// Counts the lookup and returns the configured directory failure, if any.
    fn lookup(&self) -> Result<()> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match &self.directory_failure {
            Some(message) => Err(ConnectorError::Directory(message.clone())),
            None => Ok(()),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn creations(&self) -> Vec<(Uuid, LiquidityAccountType)> {
        self.creations.lock().unwrap().clone()
    }

    pub fn services(self: &Arc<Self>) -> ConnectorServices {
        ConnectorServices::new(self.clone(), self.clone(), self.clone(), self.clone())
    }

    pub fn context(
        self: &Arc<Self>,
        caller: Option<Account>,
        destination: &str,
        amount: &str,
        stream_destination: Option<String>,
    ) -> PacketContext {
        PacketContext::new(self.services(), PreparePacket::new(destination, amount)).with_state(
            PacketState {
                incoming_account: caller,
                stream_destination,
            },
        )
    }
}

#[async_trait]
impl IncomingPaymentService for Spy {
    async fn get(&self, id: &str) -> Result<Option<IncomingPayment>> {
        self.lookup()?;
        self.incoming_payments.get(id).await
    }
}

#[async_trait]
impl WalletAddressService for Spy {
    async fn get(&self, id: &str) -> Result<Option<WalletAddress>> {
        self.lookup()?;
        self.wallet_addresses.get(id).await
    }
}

#[async_trait]
impl PeerService for Spy {
    async fn get(&self, id: &str) -> Result<Option<Peer>> {
        self.lookup()?;
        self.peers.get(id).await
    }

    async fn get_by_destination_address(&self, destination: &str) -> Result<Option<Peer>> {
        self.lookup()?;
        self.peers.get_by_destination_address(destination).await
    }
}

#[async_trait]
impl AccountingService for Spy {
    async fn create_liquidity_account(
        &self,
        account: &Account,
        account_type: LiquidityAccountType,
    ) -> std::result::Result<(), LedgerError> {
        self.creations
            .lock()
            .unwrap()
            .push((account.id(), account_type));
        if let Some(failure) = &self.ledger_failure {
            return Err(failure.clone());
        }
        self.ledger.create_liquidity_account(account, account_type).await
    }
}

pub fn peer(address: &str) -> Peer {
    Peer {
        id: Uuid::new_v4(),
        static_ilp_address: address.to_string(),
        name: None,
    }
}

pub fn caller() -> Account {
    Account::Peer(peer("test.caller"))
}

pub fn incoming_payment(state: IncomingPaymentState) -> IncomingPayment {
    IncomingPayment {
        id: Uuid::new_v4(),
        wallet_address_id: Uuid::new_v4(),
        state,
        incoming_amount: None,
        received_amount: Decimal::ZERO,
    }
}

pub fn wallet_address(total_events_amount: Option<Decimal>) -> WalletAddress {
    WalletAddress {
        id: Uuid::new_v4(),
        url: "https://wallet.example/alice".to_string(),
        total_events_amount,
    }
}

/// In-memory sink for log lines emitted while a test runs.
#[derive(Clone, Default)]
pub struct Logs(Arc<Mutex<Vec<u8>>>);

impl Logs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for Logs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Captures everything logged on this thread until the guard is dropped.
pub fn capture_logs() -> (Logs, DefaultGuard) {
    let logs = Logs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}
