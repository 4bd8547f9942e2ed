use super::liquidity::LiquidityProvisioner;
use crate::domain::account::Account;
use crate::domain::packet::PreparePacket;
use crate::domain::ports::{
    AccountingServiceRef, IncomingPaymentServiceRef, PeerServiceRef, WalletAddressServiceRef,
};
use crate::error::{ConnectorError, Result};

/// Services every stage can reach through the packet context.
#[derive(Clone)]
pub struct ConnectorServices {
    pub incoming_payments: IncomingPaymentServiceRef,
    pub wallet_addresses: WalletAddressServiceRef,
    pub peers: PeerServiceRef,
    pub liquidity: LiquidityProvisioner,
}

impl ConnectorServices {
    pub fn new(
        incoming_payments: IncomingPaymentServiceRef,
        wallet_addresses: WalletAddressServiceRef,
        peers: PeerServiceRef,
        accounting: AccountingServiceRef,
    ) -> Self {
        Self {
            incoming_payments,
            wallet_addresses,
            peers,
            liquidity: LiquidityProvisioner::new(accounting),
        }
    }
}

/// State written by the stages that run before account resolution.
#[derive(Debug, Default, Clone)]
pub struct PacketState {
    /// The authenticated caller, set by the auth stage.
    pub incoming_account: Option<Account>,
    /// Destination identifier decoded by the STREAM stage.
    pub stream_destination: Option<String>,
}

/// The caller and counterparty of a packet once routing has been decided.
#[derive(Debug, Clone, PartialEq)]
pub struct Accounts {
    incoming: Account,
    outgoing: Account,
}

impl Accounts {
    pub fn new(incoming: Account, outgoing: Account) -> Self {
        Self { incoming, outgoing }
    }

    pub fn incoming(&self) -> &Account {
        &self.incoming
    }

    pub fn outgoing(&self) -> &Account {
        &self.outgoing
    }
}

/// Mutable state for one packet's traversal of the middleware chain.
///
/// Owned by the task processing the packet and dropped when the chain
/// finishes.
pub struct PacketContext {
    pub services: ConnectorServices,
    pub prepare: PreparePacket,
    pub state: PacketState,
    accounts: Option<Accounts>,
}

impl PacketContext {
    pub fn new(services: ConnectorServices, prepare: PreparePacket) -> Self {
        Self {
            services,
            prepare,
            state: PacketState::default(),
            accounts: None,
        }
    }

    pub fn with_state(mut self, state: PacketState) -> Self {
        self.state = state;
        self
    }

    /// The resolved accounts, absent until account resolution succeeds.
    pub fn accounts(&self) -> Option<&Accounts> {
        self.accounts.as_ref()
    }

    /// Only the account resolution stage sets the pair, once per packet.
    pub(crate) fn set_accounts(&mut self, accounts: Accounts) -> Result<()> {
        if self.accounts.is_some() {
            return Err(ConnectorError::AccountsAlreadyResolved);
        }
        self.accounts = Some(accounts);
        Ok(())
    }
}
