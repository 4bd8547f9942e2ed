use super::context::{Accounts, PacketContext};
use crate::error::{ConnectorError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// One stage of the packet pipeline.
///
/// A stage either calls `next.run(ctx)` to hand the packet to the rest of the
/// chain or returns without doing so to short-circuit it.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn process(&self, ctx: &mut PacketContext, next: Next<'_>) -> Result<()>;
}

pub type MiddlewareRef = Arc<dyn Middleware>;

/// The remainder of the chain after the current stage.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    rest: &'a [MiddlewareRef],
}

impl<'a> Next<'a> {
    pub fn new(rest: &'a [MiddlewareRef]) -> Self {
        Self { rest }
    }

    /// A continuation with nothing left to run.
    pub fn end() -> Next<'static> {
        Next { rest: &[] }
    }

    pub async fn run(self, ctx: &mut PacketContext) -> Result<()> {
        match self.rest.split_first() {
            Some((stage, rest)) => stage.process(ctx, Next { rest }).await,
            None => Ok(()),
        }
    }
}

/// An ordered list of stages run for every packet.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    stages: Vec<MiddlewareRef>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<M: Middleware + 'static>(mut self, stage: M) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Appends a stage that needs the resolved accounts.
    pub fn with_resolved<M: ResolvedMiddleware + 'static>(self, stage: M) -> Self {
        self.with(RequireAccounts(stage))
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub async fn run(&self, ctx: &mut PacketContext) -> Result<()> {
        Next::new(&self.stages).run(ctx).await
    }
}

/// A stage placed after account resolution.
///
/// Receives the resolved pair directly, so it never observes a packet whose
/// routing has not been decided.
#[async_trait]
pub trait ResolvedMiddleware: Send + Sync {
    async fn process(
        &self,
        ctx: &mut PacketContext,
        accounts: &Accounts,
        next: Next<'_>,
    ) -> Result<()>;
}

/// Adapts a [`ResolvedMiddleware`] into a chain stage.
pub struct RequireAccounts<M>(pub M);

#[async_trait]
impl<M: ResolvedMiddleware> Middleware for RequireAccounts<M> {
    async fn process(&self, ctx: &mut PacketContext, next: Next<'_>) -> Result<()> {
        // Misconfigured chain: this stage was placed ahead of account resolution.
        let accounts = ctx
            .accounts()
            .cloned()
            .ok_or(ConnectorError::AccountsNotResolved)?;
        self.0.process(ctx, &accounts, next).await
    }
}
