//! Tail Reader
//!
//! Reads the last lines of a file by scanning backward from the end in
//! fixed-size blocks, so the cost depends on how much is requested rather
//! than on how large the log has grown.

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use crate::config::DEFAULT_TAIL_BLOCK_SIZE;
use crate::error::{RconError, Result};

/// Backward block reader for append-only text files
#[derive(Debug, Clone, Copy)]
pub struct TailReader {
    block_size: usize,
}

impl Default for TailReader {
    fn default() -> Self {
        Self::new(DEFAULT_TAIL_BLOCK_SIZE)
    }
}

impl TailReader {
    /// Create a reader using `block_size` bytes per backward read (min 1)
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Return the last `n` lines of `path`, oldest first.
    ///
    /// Returns fewer lines if the file has fewer; never pads. Line endings
    /// (`\n` or `\r\n`) are stripped and invalid UTF-8 is replaced.
    pub fn tail_lines(&self, path: &Path, n: usize) -> Result<Vec<String>> {
        let mut file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => RconError::NotFound(path.to_path_buf()),
            _ => RconError::Io(e),
        })?;

        let lines = self.tail_from(&mut file, n)?;
        tracing::debug!("Tail of {}: {} lines returned", path.display(), lines.len());
        Ok(lines)
    }

    /// Return the last `n` lines of any seekable source, oldest first.
    ///
    /// Reads backward from the end one block at a time and stops as soon as
    /// the oldest requested line is complete.
    pub fn tail_from<R: Read + Seek>(&self, reader: &mut R, n: usize) -> Result<Vec<String>> {
        if n == 0 {
            return Ok(Vec::new());
        }

        let source_len = reader.seek(SeekFrom::End(0))?;
        let mut end = source_len;

        // Blocks in reverse order; joined once at the end
        let mut blocks: Vec<Vec<u8>> = Vec::new();
        let mut total = 0usize;
        // Line boundaries seen so far. The newline terminating the last line
        // is not a boundary; with n boundaries the n-th line from the end is
        // known to be complete.
        let mut boundaries = 0usize;

        while end > 0 && boundaries < n {
            let start = end.saturating_sub(self.block_size as u64);
            reader.seek(SeekFrom::Start(start))?;

            let mut block = vec![0u8; (end - start) as usize];
            reader.read_exact(&mut block)?;

            let mut counted: &[u8] = &block;
            if end == source_len && counted.last() == Some(&b'\n') {
                counted = &counted[..counted.len() - 1];
            }
            boundaries += counted.iter().filter(|&&b| b == b'\n').count();

            total += block.len();
            blocks.push(block);
            end = start;
        }

        let mut data = Vec::with_capacity(total);
        for block in blocks.iter().rev() {
            data.extend_from_slice(block);
        }

        tracing::trace!("Tail scan read {} of {} bytes", total, source_len);

        let text = String::from_utf8_lossy(&data);
        let lines: Vec<&str> = text.lines().collect();
        let skip = lines.len().saturating_sub(n);

        Ok(lines[skip..].iter().map(|line| line.to_string()).collect())
    }

    /// Return the last `n` lines of `path` joined with `\n`
    pub fn tail(&self, path: &Path, n: usize) -> Result<String> {
        Ok(self.tail_lines(path, n)?.join("\n"))
    }
}

/// Last `n` lines of `path` joined with `\n`, using the default block size
pub fn tail(path: impl AsRef<Path>, n: usize) -> Result<String> {
    TailReader::default().tail(path.as_ref(), n)
}

/// Last `n` lines of `path`, using the default block size
pub fn tail_lines(path: impl AsRef<Path>, n: usize) -> Result<Vec<String>> {
    TailReader::default().tail_lines(path.as_ref(), n)
}
