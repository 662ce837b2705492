//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//! ```text
//! ┌──────────┬──────────────┬──────────┬─────────────┬──────┬──────┐
//! │ Len (4)  │ RequestId (4)│ Type (4) │    Body     │ 0x00 │ 0x00 │
//! └──────────┴──────────────┴──────────┴─────────────┴──────┴──────┘
//! ```
//!
//! The length prefix counts everything after itself. Streams may deliver a
//! packet in arbitrarily small pieces, so the readers here accumulate until
//! the declared byte count is satisfied.

use std::io::{ErrorKind, Read, Write};

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{RconError, Result};
use super::{Packet, PacketType};

/// Size of the length prefix
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Smallest legal length: request id + type + two terminators
pub const MIN_PACKET_LENGTH: usize = 4 + 4 + 2;

/// Largest length we accept in either direction (1 MiB)
pub const MAX_PACKET_LENGTH: usize = 1024 * 1024;

// =============================================================================
// Packet Encoding/Decoding
// =============================================================================

/// Encode a packet to bytes
///
/// Format: length (4) + request_id (4) + type (4) + body + 0x00 0x00
pub fn encode_packet(packet: &Packet) -> Result<Bytes> {
    let length = packet.wire_length();
    if length > MAX_PACKET_LENGTH {
        return Err(RconError::Protocol(format!(
            "Packet too large: {} bytes (max {})",
            length, MAX_PACKET_LENGTH
        )));
    }

    let mut buf = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + length);
    buf.put_i32_le(length as i32);
    buf.put_i32_le(packet.request_id);
    buf.put_i32_le(packet.packet_type.value());
    buf.put_slice(packet.body.as_bytes());
    buf.put_u8(0);
    buf.put_u8(0);

    Ok(buf.freeze())
}

/// Validate a length prefix read from the wire
pub(crate) fn check_length(length: i32) -> Result<usize> {
    if length < 0 {
        return Err(RconError::Protocol(format!(
            "Negative packet length: {}",
            length
        )));
    }

    let length = length as usize;
    if length < MIN_PACKET_LENGTH {
        return Err(RconError::Protocol(format!(
            "Packet too short: {} bytes (min {})",
            length, MIN_PACKET_LENGTH
        )));
    }
    if length > MAX_PACKET_LENGTH {
        return Err(RconError::Protocol(format!(
            "Packet too large: {} bytes (max {})",
            length, MAX_PACKET_LENGTH
        )));
    }

    Ok(length)
}

/// Decode the bytes following the length prefix
///
/// The body is decoded lossily: invalid UTF-8 becomes U+FFFD.
pub fn decode_payload(payload: &[u8]) -> Result<Packet> {
    if payload.len() < MIN_PACKET_LENGTH {
        return Err(RconError::Protocol(format!(
            "Incomplete packet: expected at least {} bytes, got {}",
            MIN_PACKET_LENGTH,
            payload.len()
        )));
    }

    let mut header = &payload[..8];
    let request_id = header.get_i32_le();
    let packet_type = PacketType(header.get_i32_le());

    // Drop the body terminator and the packet terminator
    let body_bytes = &payload[8..payload.len() - 2];
    let body = String::from_utf8_lossy(body_bytes).into_owned();

    Ok(Packet {
        request_id,
        packet_type,
        body,
    })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Fill `buf` completely, accumulating across partial reads
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<()> {
    let mut received = 0;
    while received < buf.len() {
        match reader.read(&mut buf[received..]) {
            Ok(0) => {
                return Err(RconError::ConnectionClosed {
                    expected: buf.len(),
                    received,
                })
            }
            Ok(n) => received += n,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Read a complete packet from a stream
///
/// Blocks until a complete packet is received or an error occurs
pub fn read_packet<R: Read>(reader: &mut R) -> Result<Packet> {
    // Read length prefix first
    let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
    read_full(reader, &mut prefix)?;
    let length = check_length(i32::from_le_bytes(prefix))?;

    // Read the declared number of bytes, however they arrive
    let mut payload = vec![0u8; length];
    read_full(reader, &mut payload)?;

    decode_payload(&payload)
}

/// Write a packet to a stream in a single write
pub fn write_packet<W: Write>(writer: &mut W, packet: &Packet) -> Result<()> {
    let bytes = encode_packet(packet)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
