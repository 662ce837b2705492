//! RCON Client
//!
//! Authenticated command/response sessions over a [`Connection`].

use std::time::Duration;

use crate::config::Config;
use crate::error::{RconError, Result};
use crate::protocol::{is_auth_failure, Packet};
use super::Connection;

/// Synchronous RCON client
///
/// One request is in flight at a time: every [`command`](Self::command) is a
/// full send/receive round trip. Any I/O or framing failure drops the
/// underlying socket; the client never reconnects or retries by itself.
///
/// The socket is released on [`close`](Self::close) or when the client is
/// dropped, so early returns and panics cannot leak it.
pub struct RconClient {
    /// Open connection, `None` when closed or never connected
    connection: Option<Connection>,

    /// Id of the last packet sent on the current connection
    request_id: i32,
}

impl Default for RconClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RconClient {
    /// Create a client that is not connected yet
    pub fn new() -> Self {
        Self {
            connection: None,
            request_id: 0,
        }
    }

    /// Connect using the host, port, password and timeout from `config`
    pub fn connect_with(config: &Config) -> Result<Self> {
        config.validate()?;
        let mut client = Self::new();
        client.connect(&config.host, config.port, &config.password, config.timeout())?;
        Ok(client)
    }

    /// Open a session, run `f`, and close the session on every path
    pub fn session<T, F>(config: &Config, f: F) -> Result<T>
    where
        F: FnOnce(&mut RconClient) -> Result<T>,
    {
        let mut client = Self::connect_with(config)?;
        let result = f(&mut client);
        client.close();
        result
    }

    /// Establish the TCP connection and authenticate.
    ///
    /// Any previous connection is closed first. On failure the client is
    /// left disconnected.
    pub fn connect(
        &mut self,
        host: &str,
        port: u16,
        password: &str,
        timeout: Duration,
    ) -> Result<()> {
        self.close();
        self.request_id = 0;

        tracing::debug!("Connecting to {}:{}", host, port);
        let connection = Connection::open(host, port, timeout)?;
        self.connection = Some(connection);

        if let Err(e) = self.authenticate(password) {
            self.close();
            return Err(e);
        }

        tracing::debug!("Authenticated with {}:{}", host, port);
        Ok(())
    }

    /// Send a command and return the server's reply text
    pub fn command(&mut self, text: &str) -> Result<String> {
        if self.connection.is_none() {
            return Err(RconError::NotConnected);
        }
        let request_id = self.next_request_id();
        let packet = Packet::command(request_id, text);
        let response = self.round_trip(&packet)?;
        Ok(response.body)
    }

    /// Release the socket. Safe to call any number of times.
    pub fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            tracing::debug!("Closing connection to {}", connection.peer_addr());
            connection.shutdown();
        }
    }

    /// Whether an authenticated connection is open
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Id carried by the most recently sent packet (0 before the first send)
    pub fn last_request_id(&self) -> i32 {
        self.request_id
    }

    /// Peer address of the open connection
    pub fn peer_addr(&self) -> Option<&str> {
        self.connection.as_ref().map(|c| c.peer_addr())
    }

    fn authenticate(&mut self, password: &str) -> Result<()> {
        let request_id = self.next_request_id();
        let response = self.round_trip(&Packet::auth(request_id, password))?;

        if is_auth_failure(response.request_id, response.packet_type) {
            tracing::warn!(
                "Authentication rejected (id={}, type={})",
                response.request_id,
                response.packet_type
            );
            return Err(RconError::Authentication(if response.request_id == -1 {
                "server rejected the password".to_string()
            } else {
                format!("unexpected reply type {}", response.packet_type)
            }));
        }

        Ok(())
    }

    /// Send one packet and receive exactly one reply.
    ///
    /// The reply id is not matched against the request: only one request is
    /// ever outstanding.
    fn round_trip(&mut self, packet: &Packet) -> Result<Packet> {
        let connection = self.connection.as_mut().ok_or(RconError::NotConnected)?;

        let result = match connection.send(packet) {
            Ok(()) => connection.receive(),
            Err(e) => Err(e),
        };

        if result.is_err() {
            // The stream position is unknown after a failure
            self.close();
        }
        result
    }

    /// Advance the request id counter. Ids stay positive so they never
    /// collide with the -1 failure sentinel.
    fn next_request_id(&mut self) -> i32 {
        self.request_id = match self.request_id.checked_add(1) {
            Some(id) if id > 0 => id,
            _ => 1,
        };
        self.request_id
    }
}

impl Drop for RconClient {
    fn drop(&mut self) {
        self.close();
    }
}
