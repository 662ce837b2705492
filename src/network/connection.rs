//! Connection
//!
//! Owns the TCP stream to an RCON server and moves packets over it.

use std::io::{self, BufReader, BufWriter, ErrorKind};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use crate::error::{RconError, Result};
use crate::protocol::{read_packet, write_packet, Packet};

/// A single TCP connection to an RCON server
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered so each packet leaves in one write)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Connect to `host:port`, trying every resolved address in turn.
    ///
    /// `timeout` is the budget for the whole connect phase, shared by all
    /// addresses a host resolves to (e.g. `::1` then `127.0.0.1`). It is then
    /// installed as the read and write timeout of the stream.
    pub fn open(host: &str, port: u16, timeout: Duration) -> Result<Self> {
        let addrs = (host, port).to_socket_addrs().map_err(|e| {
            RconError::Connection(format!("cannot resolve {}:{}: {}", host, port, e))
        })?;

        let deadline = Instant::now().checked_add(timeout);
        let mut last_err = None;
        for (attempt, addr) in addrs.enumerate() {
            let budget = if attempt == 0 {
                timeout
            } else {
                match remaining_budget(deadline, Instant::now(), timeout) {
                    Some(budget) => budget,
                    None => {
                        last_err = Some(io::Error::new(
                            ErrorKind::TimedOut,
                            "connect budget exhausted",
                        ));
                        break;
                    }
                }
            };

            match TcpStream::connect_timeout(&addr, budget) {
                Ok(stream) => {
                    let mut connection = Self::new(stream)?;
                    connection.set_timeouts(timeout, timeout)?;
                    return Ok(connection);
                }
                Err(e) => {
                    tracing::debug!("Connect to {} failed: {}", addr, e);
                    last_err = Some(e);
                }
            }
        }

        Err(match last_err {
            Some(e) => classify(e.into(), &format!("connect to {}:{}", host, port)),
            None => RconError::Connection(format!("no addresses for {}:{}", host, port)),
        })
    }

    /// Wrap an already connected stream
    pub fn new(stream: TcpStream) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Commands are small; don't let Nagle hold them back
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Configure read and write timeouts
    pub fn set_timeouts(&mut self, read: Duration, write: Duration) -> Result<()> {
        self.reader.get_ref().set_read_timeout(Some(read))?;
        self.writer.get_ref().set_write_timeout(Some(write))?;
        Ok(())
    }

    /// Send one packet
    pub fn send(&mut self, packet: &Packet) -> Result<()> {
        tracing::trace!(
            "-> {} id={} type={} len={}",
            self.peer_addr,
            packet.request_id,
            packet.packet_type,
            packet.wire_length()
        );
        write_packet(&mut self.writer, packet).map_err(|e| classify(e, "send"))
    }

    /// Receive one packet, blocking until it is complete
    pub fn receive(&mut self) -> Result<Packet> {
        let packet = read_packet(&mut self.reader).map_err(|e| classify(e, "receive"))?;
        tracing::trace!(
            "<- {} id={} type={} body_len={}",
            self.peer_addr,
            packet.request_id,
            packet.packet_type,
            packet.body.len()
        );
        Ok(packet)
    }

    /// Shut the socket down in both directions
    pub fn shutdown(self) {
        // Peer may already be gone; nothing useful to do with the error
        let _ = self.writer.get_ref().shutdown(Shutdown::Both);
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

/// Time left before `deadline`, or `None` once it has passed.
/// Without a deadline (overflowing timeout) the full timeout applies.
fn remaining_budget(deadline: Option<Instant>, now: Instant, timeout: Duration) -> Option<Duration> {
    match deadline {
        Some(deadline) => {
            let left = deadline.saturating_duration_since(now);
            if left.is_zero() {
                None
            } else {
                Some(left)
            }
        }
        None => Some(timeout),
    }
}

/// Turn raw I/O failures into the connection-level error they represent
fn classify(err: RconError, action: &str) -> RconError {
    match err {
        RconError::Io(ref e) => match e.kind() {
            // Unix reports an elapsed socket timeout as WouldBlock
            ErrorKind::WouldBlock | ErrorKind::TimedOut => {
                RconError::Timeout(format!("{} exceeded deadline", action))
            }
            ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::BrokenPipe
            | ErrorKind::NotConnected
            | ErrorKind::UnexpectedEof => RconError::Connection(format!("{} failed: {}", action, e)),
            _ => err,
        },
        other => other,
    }
}
