//! Domain model: accounts, packets and the ports to the account directory and
//! the liquidity ledger.

pub mod account;
pub mod packet;
pub mod ports;
