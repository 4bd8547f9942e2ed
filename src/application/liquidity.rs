use crate::domain::account::{Account, LiquidityAccountType};
use crate::domain::ports::AccountingServiceRef;
use crate::error::{LedgerError, Result};
use tracing::{debug, error};

/// Makes sure the ledger tracks liquidity for an account.
///
/// Safe to call for an account that is already provisioned, including from
/// concurrent packets: the ledger's duplicate rejection is treated as success.
#[derive(Clone)]
pub struct LiquidityProvisioner {
    accounting: AccountingServiceRef,
}

impl LiquidityProvisioner {
    pub fn new(accounting: AccountingServiceRef) -> Self {
        Self { accounting }
    }

    pub async fn ensure(&self, account: &Account, account_type: LiquidityAccountType) -> Result<()> {
        match self
            .accounting
            .create_liquidity_account(account, account_type)
            .await
        {
            Ok(()) => {
                debug!(
                    account_id = %account.id(),
                    ?account_type,
                    "Created liquidity account"
                );
                Ok(())
            }
            Err(LedgerError::AccountAlreadyExists) => {
                debug!(
                    account_id = %account.id(),
                    ?account_type,
                    "Liquidity account already exists"
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    account_id = %account.id(),
                    account_kind = account.kind(),
                    ?account_type,
                    error = %err,
                    "Failed to create liquidity account"
                );
                Err(err.into())
            }
        }
    }
}
