pub mod outcome_writer;
pub mod packet_reader;

pub use outcome_writer::{OutcomeWriter, PacketOutcome};
pub use packet_reader::{PacketReader, PacketRecord};
