//! Protocol Module
//!
//! Defines the remote-console (RCON) wire protocol.
//!
//! ## Packet Format (all integers little-endian i32)
//! ```text
//! ┌──────────┬──────────────┬──────────┬─────────────┬──────┬──────┐
//! │ Len (4)  │ RequestId (4)│ Type (4) │    Body     │ 0x00 │ 0x00 │
//! └──────────┴──────────────┴──────────┴─────────────┴──────┴──────┘
//! Len = 4 + 4 + len(Body) + 2
//! ```
//!
//! ### Packet Types
//! - 3: AUTH            - Body: password
//! - 2: AUTH_RESPONSE   - Body: empty (RequestId is -1 on failure)
//! - 2: EXEC_COMMAND    - Body: command text
//! - 0: RESPONSE_VALUE  - Body: command output
//!
//! ### Exchange
//! Exactly one AUTH must precede any EXEC_COMMAND on a connection. Each
//! command is answered by a single response packet; there is no pipelining.

mod packet;
mod codec;
mod decoder;

pub use packet::{is_auth_failure, Packet, PacketType};
pub use codec::{
    decode_payload, encode_packet, read_packet, write_packet,
    LENGTH_PREFIX_SIZE, MAX_PACKET_LENGTH, MIN_PACKET_LENGTH,
};
pub use decoder::PacketDecoder;
