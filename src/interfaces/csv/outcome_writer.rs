use crate::application::context::Accounts;
use crate::error::{ConnectorError, Result};
use serde::Serialize;
use std::io::Write;
use uuid::Uuid;

/// What happened to one replayed packet.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct PacketOutcome {
    pub packet: usize,
    pub result: &'static str,
    pub outgoing_kind: Option<&'static str>,
    pub outgoing_account: Option<Uuid>,
    pub code: Option<String>,
    pub message: Option<String>,
}

impl PacketOutcome {
    pub fn routed(packet: usize, accounts: &Accounts) -> Self {
        Self {
            packet,
            result: "routed",
            outgoing_kind: Some(accounts.outgoing().kind()),
            outgoing_account: Some(accounts.outgoing().id()),
            code: None,
            message: None,
        }
    }

    pub fn rejected(packet: usize, err: &ConnectorError) -> Self {
        Self {
            packet,
            result: "rejected",
            outgoing_kind: None,
            outgoing_account: None,
            code: Some(err.rejection().code()),
            message: Some(err.to_string()),
        }
    }
}

/// Writes packet outcomes as CSV with a header row.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_outcomes<I>(&mut self, outcomes: I) -> Result<()>
    where
        I: IntoIterator<Item = PacketOutcome>,
    {
        for outcome in outcomes {
            self.writer.serialize(outcome)?;
        }
        self.writer.flush().map_err(ConnectorError::from)
    }
}
