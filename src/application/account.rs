use super::context::{Accounts, PacketContext};
use super::middleware::{Middleware, Next};
use crate::domain::account::{Account, IncomingPaymentState, LiquidityAccountType};
use crate::error::{ConnectorError, Result};
use async_trait::async_trait;
use tracing::{debug, error};
use uuid::Uuid;

const UUID_LENGTH: usize = 36;

/// Resolves the account that should settle each packet.
///
/// Requires the caller account from the auth stage. On success the
/// (incoming, outgoing) pair is stored on the context and the rest of the
/// chain runs; otherwise the packet is rejected and the chain stops here.
pub struct AccountMiddleware {
    server_address: String,
}

impl AccountMiddleware {
    /// `server_address` is this connector's own ILP address.
    pub fn new(server_address: impl Into<String>) -> Self {
        Self {
            server_address: server_address.into(),
        }
    }

    async fn outgoing_account(&self, ctx: &PacketContext) -> Result<Option<Account>> {
        let services = &ctx.services;
        let destination = ctx.prepare.destination.as_str();
        let lookup_failed = |err: &ConnectorError| {
            error!(
                stream_destination = ?ctx.state.stream_destination,
                destination_address = %destination,
                error = %err,
                "Failed to look up destination account"
            );
        };

        if let Some(stream_destination) = ctx
            .state
            .stream_destination
            .as_deref()
            .filter(|destination| !destination.is_empty())
        {
            if let Some(payment) = services
                .incoming_payments
                .get(stream_destination)
                .await
                .inspect_err(lookup_failed)?
            {
                if !ctx.prepare.is_probe() && payment.state.is_finalized() {
                    let message = "destination account is in an incorrect state";
                    error!(
                        incoming_payment_id = %payment.id,
                        state = ?payment.state,
                        stream_destination,
                        "{message}"
                    );
                    return Err(ConnectorError::Unreachable {
                        message,
                        stream_destination: Some(stream_destination.to_string()),
                        destination_address: destination.to_string(),
                    });
                }

                // Stays pending until the first funds arrive.
                let is_pending = payment.state == IncomingPaymentState::Pending;
                let account = Account::from(payment);
                if is_pending {
                    services
                        .liquidity
                        .ensure(&account, LiquidityAccountType::Incoming)
                        .await?;
                }
                debug!(
                    incoming_payment_id = %account.id(),
                    "destination account is incoming payment"
                );
                return Ok(Some(account));
            }

            // SPSP fallback for payment pointers without an incoming payment.
            if let Some(wallet_address) = services
                .wallet_addresses
                .get(stream_destination)
                .await
                .inspect_err(lookup_failed)?
            {
                let first_funding = !wallet_address.has_received_funds();
                let account = Account::from(wallet_address);
                if first_funding {
                    services
                        .liquidity
                        .ensure(&account, LiquidityAccountType::WebMonetization)
                        .await?;
                }
                debug!(
                    wallet_address_id = %account.id(),
                    "destination account is wallet address"
                );
                return Ok(Some(account));
            }
        }

        if let Some(peer) = services
            .peers
            .get_by_destination_address(destination)
            .await
            .inspect_err(lookup_failed)?
        {
            debug!(peer_id = %peer.id, "destination account is peer");
            return Ok(Some(Account::from(peer)));
        }

        if let Some(account_id) = direct_account_id(&self.server_address, destination) {
            return Ok(direct_account(account_id).await);
        }

        Ok(None)
    }
}

#[async_trait]
impl Middleware for AccountMiddleware {
    async fn process(&self, ctx: &mut PacketContext, next: Next<'_>) -> Result<()> {
        let Some(incoming) = ctx.state.incoming_account.clone() else {
            error!(
                destination_address = %ctx.prepare.destination,
                "Unauthorized: No incoming account"
            );
            return Err(ConnectorError::Unauthorized);
        };

        let Some(outgoing) = self.outgoing_account(ctx).await? else {
            let message = "unknown destination account";
            error!(
                stream_destination = ?ctx.state.stream_destination,
                destination_address = %ctx.prepare.destination,
                "{message}"
            );
            return Err(ConnectorError::Unreachable {
                message,
                stream_destination: ctx.state.stream_destination.clone(),
                destination_address: ctx.prepare.destination.clone(),
            });
        };

        ctx.set_accounts(Accounts::new(incoming, outgoing))
            .inspect_err(|err| {
                error!(
                    destination_address = %ctx.prepare.destination,
                    error = %err,
                    "Account resolution ran twice"
                )
            })?;
        next.run(ctx).await
    }
}

/// Extracts the account id from a `<server address>.<uuid>[.<suffix>]`
/// destination.
pub fn direct_account_id(server_address: &str, destination: &str) -> Option<Uuid> {
    let rest = destination
        .strip_prefix(server_address)?
        .strip_prefix('.')?;
    let segment = rest.get(..UUID_LENGTH)?;
    let tail = &rest[UUID_LENGTH..];
    if !(tail.is_empty() || tail.starts_with('.')) {
        return None;
    }
    Uuid::parse_str(segment)
        .ok()
        .filter(|id| id.get_version_num() == 4)
}

/// Direct ILP access accounts are recognized by address but have no backing
/// store, so they never resolve.
async fn direct_account(account_id: Uuid) -> Option<Account> {
    // TODO: look up direct ILP access accounts by id once they are persisted.
    debug!(%account_id, "direct account lookup is not supported");
    None
}
