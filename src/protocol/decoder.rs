//! Incremental packet decoder
//!
//! Same framing as [`read_packet`](super::read_packet), but driven by the
//! caller: bytes are fed in whatever chunks the transport produced and
//! complete packets are pulled out when enough data has arrived. Suitable
//! for non-blocking sockets where a blocking read loop is not an option.

use bytes::{Buf, BytesMut};

use crate::error::Result;
use super::codec::{check_length, decode_payload, LENGTH_PREFIX_SIZE};
use super::Packet;

/// What the decoder is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Waiting for the 4-byte length prefix
    Length,

    /// Length known, waiting for `length` payload bytes
    Payload { length: usize },
}

/// Read-buffer state machine for RCON packets
#[derive(Debug)]
pub struct PacketDecoder {
    buffer: BytesMut,
    state: DecodeState,
}

impl Default for PacketDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketDecoder {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::new(),
            state: DecodeState::Length,
        }
    }

    /// Append received bytes
    pub fn feed(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Bytes still missing before the next state transition
    pub fn bytes_needed(&self) -> usize {
        let target = match self.state {
            DecodeState::Length => LENGTH_PREFIX_SIZE,
            DecodeState::Payload { length } => length,
        };
        target.saturating_sub(self.buffer.len())
    }

    /// Number of buffered bytes not yet consumed
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Pull the next complete packet, if one is available.
    ///
    /// A framing error leaves the stream unrecoverable; the decoder resets
    /// itself and the caller is expected to drop the connection.
    pub fn next_packet(&mut self) -> Result<Option<Packet>> {
        loop {
            match self.state {
                DecodeState::Length => {
                    if self.buffer.len() < LENGTH_PREFIX_SIZE {
                        return Ok(None);
                    }
                    let raw = self.buffer.get_i32_le();
                    match check_length(raw) {
                        Ok(length) => self.state = DecodeState::Payload { length },
                        Err(e) => {
                            self.reset();
                            return Err(e);
                        }
                    }
                }
                DecodeState::Payload { length } => {
                    if self.buffer.len() < length {
                        return Ok(None);
                    }
                    let payload = self.buffer.split_to(length);
                    self.state = DecodeState::Length;
                    return decode_payload(&payload).map(Some);
                }
            }
        }
    }

    /// Discard all buffered data
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = DecodeState::Length;
    }
}
