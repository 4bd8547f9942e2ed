use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of an incoming payment.
///
/// `Pending -> Processing -> Completed`, with `Expired` reachable from either
/// non-terminal state. Timeouts are driven elsewhere.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomingPaymentState {
    Pending,
    Processing,
    Completed,
    Expired,
}

impl IncomingPaymentState {
    /// Finalized payments must not accept further non-zero settlement.
    pub fn is_finalized(&self) -> bool {
        matches!(
            self,
            IncomingPaymentState::Completed | IncomingPaymentState::Expired
        )
    }
}

/// Classifies why a liquidity record is created in the ledger.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiquidityAccountType {
    Incoming,
    WebMonetization,
}

/// Another connector reachable under a registered address prefix.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Peer {
    pub id: Uuid,
    pub static_ilp_address: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Peer {
    /// Whether packets for `destination` should be forwarded to this peer.
    ///
    /// The registered address must match whole segments: `test.peer` routes
    /// `test.peer` and `test.peer.alice`, never `test.peerage`.
    pub fn routes(&self, destination: &str) -> bool {
        match destination.strip_prefix(self.static_ilp_address.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct IncomingPayment {
    pub id: Uuid,
    pub wallet_address_id: Uuid,
    pub state: IncomingPaymentState,
    #[serde(default)]
    pub incoming_amount: Option<Decimal>,
    #[serde(default)]
    pub received_amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct WalletAddress {
    pub id: Uuid,
    pub url: String,
    /// Lifetime amount received through ad-hoc payments. Unset until the
    /// first funds arrive.
    #[serde(default)]
    pub total_events_amount: Option<Decimal>,
}

impl WalletAddress {
    pub fn has_received_funds(&self) -> bool {
        self.total_events_amount
            .is_some_and(|total| !total.is_zero())
    }
}

/// A ledger-trackable party a packet can be routed to or received from.
#[derive(Debug, PartialEq, Clone)]
pub enum Account {
    Peer(Peer),
    IncomingPayment(IncomingPayment),
    WalletAddress(WalletAddress),
}

impl Account {
    pub fn id(&self) -> Uuid {
        match self {
            Account::Peer(peer) => peer.id,
            Account::IncomingPayment(payment) => payment.id,
            Account::WalletAddress(wallet_address) => wallet_address.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Account::Peer(_) => "peer",
            Account::IncomingPayment(_) => "incoming_payment",
            Account::WalletAddress(_) => "wallet_address",
        }
    }
}

impl From<Peer> for Account {
    fn from(peer: Peer) -> Self {
        Account::Peer(peer)
    }
}

impl From<IncomingPayment> for Account {
    fn from(payment: IncomingPayment) -> Self {
        Account::IncomingPayment(payment)
    }
}

impl From<WalletAddress> for Account {
    fn from(wallet_address: WalletAddress) -> Self {
        Account::WalletAddress(wallet_address)
    }
}
