//! Application layer: the packet pipeline.
//!
//! Packets traverse a [`middleware::MiddlewareChain`] as independent tasks,
//! each with its own [`context::PacketContext`]. The account resolution stage
//! decides which account settles a packet and provisions its liquidity record
//! on first sight.

pub mod account;
pub mod context;
pub mod liquidity;
pub mod middleware;
