//! # rconsole
//!
//! Administration toolkit for game servers that expose a remote console:
//! - Synchronous RCON client (length-prefixed packets, password handshake)
//! - Framing that tolerates arbitrarily fragmented stream delivery
//! - Efficient tail of the server's rolling text log
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Operator front end (rcon-cli, ...)             │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │                              │
//!                ▼                              ▼
//!   ┌─────────────────────────┐      ┌─────────────────────┐
//!   │  AdminAction / Client   │      │     TailReader      │
//!   │  (auth, request ids)    │      │  (backward scan)    │
//!   └────────────┬────────────┘      └──────────┬──────────┘
//!                │                              │
//!                ▼                              ▼
//!   ┌─────────────────────────┐      ┌─────────────────────┐
//!   │ Connection + Codec      │      │   Server log file   │
//!   │ (TCP, packet framing)   │      │   (append-only)     │
//!   └─────────────────────────┘      └─────────────────────┘
//! ```
//!
//! The two halves are independent: the client never touches the log and the
//! tail reader never touches the network.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod logs;
pub mod admin;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RconError, Result};
pub use config::Config;
pub use network::RconClient;
pub use logs::{tail, TailReader};
pub use admin::AdminAction;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of rconsole
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
