use thiserror::Error;

pub mod decoder;

pub use decoder::*;

/// The two packet types this crate understands. The game emits many more,
/// all of which are discarded undecoded.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PacketKind {
    /// Session-wide metadata, including the total lap count for the race.
    Session,
    /// Per-car lap progress for every car slot in the session.
    LapData,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Not enough bytes to read the packet type, got `{0}`")]
    TruncatedHeader(usize),
    #[error("Wrong packet length `{0}` for a session packet, cannot read the total lap count")]
    WrongSessionPacketLength(usize),
    #[error("Wrong packet length `{0}` for a lap data packet, cannot read the player's current lap")]
    WrongLapDataPacketLength(usize),
    #[error("Player car index `{0}` places its lap record outside the packet")]
    LapRecordOutOfRange(u8),
}
