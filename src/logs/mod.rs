//! Logs Module
//!
//! Read-only access to the game server's rolling text log.
//!
//! ## Responsibilities
//! - Return the last N lines of a log without reading it from the start
//! - One fresh backward scan per call; no state is kept between calls

mod tail;

pub use tail::{tail, tail_lines, TailReader};
