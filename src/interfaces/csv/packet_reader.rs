use crate::domain::packet::PreparePacket;
use crate::error::{ConnectorError, Result};
use serde::Deserialize;
use std::io::Read;

/// One packet as recorded in a replay file.
///
/// `caller` is the id of the authenticated peer the packet arrived from.
/// `stream_destination` is the identifier the STREAM stage decoded, if any.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PacketRecord {
    pub caller: Option<String>,
    pub destination: String,
    pub amount: String,
    pub stream_destination: Option<String>,
}

impl PacketRecord {
    pub fn prepare(&self) -> PreparePacket {
        PreparePacket::new(self.destination.clone(), self.amount.clone())
    }
}

/// Reads packet records from a CSV source.
///
/// Trims whitespace and accepts rows that omit trailing optional columns.
pub struct PacketReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PacketReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes records so large replay files stream.
    pub fn packets(self) -> impl Iterator<Item = Result<PacketRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(ConnectorError::from))
    }
}
