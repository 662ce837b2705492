//! Network Module
//!
//! TCP client side of the RCON protocol.
//!
//! ## Architecture
//! - `Connection` owns one socket and moves whole packets over it
//! - `RconClient` adds authentication, request ids and session lifetime

mod connection;
mod client;

pub use connection::Connection;
pub use client::RconClient;
