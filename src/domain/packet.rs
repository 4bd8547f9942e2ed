use serde::Deserialize;

/// An ILP prepare packet, already decoded by the transport.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PreparePacket {
    pub destination: String,
    /// Decimal amount as it appeared on the wire.
    pub amount: String,
}

impl PreparePacket {
    pub fn new(destination: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            amount: amount.into(),
        }
    }

    /// Zero-amount packets probe reachability without moving value.
    pub fn is_probe(&self) -> bool {
        self.amount == "0"
    }
}
