//! Fixed-offset decoding of raw telemetry datagrams.
//!
//! Unlike a length-prefixed stream there is nothing to parse sequentially
//! here: every packet is a fixed-size record and every field sits at a
//! statically known byte offset. A packet is identified by its exact
//! datagram length together with a one byte type tag in the shared header,
//! and fields are read straight out of the buffer. The lap data packet has
//! the one interesting wrinkle: the player's lap record sits at an offset
//! derived from the player car index, which is itself a header field.

use crate::protocol::{DecodeError, PacketKind};

const SESSION_PACKET_ID: u8 = 1;
const LAP_DATA_PACKET_ID: u8 = 2;

const SESSION_PACKET_LEN: usize = 149;
const LAP_DATA_PACKET_LEN: usize = 843;

// Shared header layout
const PACKET_ID_OFFSET: usize = 5;
const PLAYER_CAR_INDEX_OFFSET: usize = 22;
const PACKET_HEADER_LEN: usize = 23;

const TOTAL_LAPS_OFFSET: usize = PACKET_HEADER_LEN + 3;

// Each car slot in a lap data packet is a 41 byte record following the
// header, with the current lap number 32 bytes into the record.
const LAP_RECORD_LEN: usize = 41;
const CURRENT_LAP_OFFSET: usize = 32;

/// Identify which of the supported packet kinds a datagram holds, if any.
///
/// Datagrams belonging to packet types this crate does not decode yield
/// `None`, which for this feed is the common case.
pub fn classify(packet: &[u8]) -> Result<Option<PacketKind>, DecodeError> {
    if is_session_packet(packet)? {
        Ok(Some(PacketKind::Session))
    } else if is_lap_data_packet(packet)? {
        Ok(Some(PacketKind::LapData))
    } else {
        Ok(None)
    }
}

/// Returns whether the buffer holds a lap data packet.
///
/// A length mismatch is a normal `false`, not an error, so the same
/// datagram can be probed against each packet kind in turn.
pub fn is_lap_data_packet(packet: &[u8]) -> Result<bool, DecodeError> {
    if packet.len() != LAP_DATA_PACKET_LEN {
        return Ok(false);
    }

    Ok(packet_id(packet)? == LAP_DATA_PACKET_ID)
}

/// Returns whether the buffer holds a session packet.
pub fn is_session_packet(packet: &[u8]) -> Result<bool, DecodeError> {
    if packet.len() != SESSION_PACKET_LEN {
        return Ok(false);
    }

    Ok(packet_id(packet)? == SESSION_PACKET_ID)
}

/// Read the number of laps the session is configured for out of a session
/// packet.
pub fn total_laps(packet: &[u8]) -> Result<u8, DecodeError> {
    if packet.len() != SESSION_PACKET_LEN {
        return Err(DecodeError::WrongSessionPacketLength(packet.len()));
    }

    Ok(packet[TOTAL_LAPS_OFFSET])
}

/// Read the lap the player's car is currently on out of a lap data packet.
///
/// The player car index is untrusted feed content, so the derived record
/// offset is re-checked against the buffer rather than assumed valid; an
/// index pointing past the last car slot fails with
/// [`DecodeError::LapRecordOutOfRange`].
pub fn player_current_lap(packet: &[u8]) -> Result<u8, DecodeError> {
    if packet.len() != LAP_DATA_PACKET_LEN {
        return Err(DecodeError::WrongLapDataPacketLength(packet.len()));
    }

    let car_index = player_car_index(packet)?;
    let offset = lap_record_offset(car_index) + CURRENT_LAP_OFFSET;

    packet
        .get(offset)
        .copied()
        .ok_or(DecodeError::LapRecordOutOfRange(car_index))
}

fn packet_id(packet: &[u8]) -> Result<u8, DecodeError> {
    packet
        .get(PACKET_ID_OFFSET)
        .copied()
        .ok_or_else(|| DecodeError::TruncatedHeader(packet.len()))
}

fn player_car_index(packet: &[u8]) -> Result<u8, DecodeError> {
    packet
        .get(PLAYER_CAR_INDEX_OFFSET)
        .copied()
        .ok_or_else(|| DecodeError::TruncatedHeader(packet.len()))
}

fn lap_record_offset(car_index: u8) -> usize {
    PACKET_HEADER_LEN + car_index as usize * LAP_RECORD_LEN
}
