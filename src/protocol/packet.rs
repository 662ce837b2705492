//! Packet definitions
//!
//! Represents a single RCON packet exchanged with the server.

use std::fmt;

/// Packet type discriminator
///
/// The protocol overloads value 2 (AUTH_RESPONSE and EXEC_COMMAND), so the
/// type is a plain integer wrapper rather than an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PacketType(pub i32);

impl PacketType {
    /// Client login request carrying the password
    pub const AUTH: PacketType = PacketType(3);

    /// Server reply to AUTH
    pub const AUTH_RESPONSE: PacketType = PacketType(2);

    /// Client command request
    pub const EXEC_COMMAND: PacketType = PacketType(2);

    /// Server reply to EXEC_COMMAND
    pub const RESPONSE_VALUE: PacketType = PacketType(0);

    /// Raw wire value
    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decoded packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Caller-assigned id, echoed back by the server
    pub request_id: i32,

    /// Packet type
    pub packet_type: PacketType,

    /// Text payload (without the two trailing null bytes)
    pub body: String,
}

impl Packet {
    /// Create a packet
    pub fn new(request_id: i32, packet_type: PacketType, body: impl Into<String>) -> Self {
        Self {
            request_id,
            packet_type,
            body: body.into(),
        }
    }

    /// Create an AUTH packet
    pub fn auth(request_id: i32, password: &str) -> Self {
        Self::new(request_id, PacketType::AUTH, password)
    }

    /// Create an EXEC_COMMAND packet
    pub fn command(request_id: i32, command: &str) -> Self {
        Self::new(request_id, PacketType::EXEC_COMMAND, command)
    }

    /// Value of the length prefix for this packet:
    /// request id (4) + type (4) + body + two terminators
    pub fn wire_length(&self) -> usize {
        4 + 4 + self.body.len() + 2
    }
}

/// Decide whether an AUTH reply means the credentials were rejected.
///
/// A request id of -1 signals rejection whatever the type says, so it is
/// checked first. Otherwise the reply must be of type AUTH_RESPONSE.
pub fn is_auth_failure(request_id: i32, packet_type: PacketType) -> bool {
    if request_id == -1 {
        return true;
    }
    packet_type != PacketType::AUTH_RESPONSE
}
