//! Tests for the log tail reader
//!
//! These tests verify:
//! - Exactly the last N lines, in file order
//! - Short files, empty files, N = 0
//! - Missing trailing newline, CRLF, invalid UTF-8
//! - Block boundaries never yield truncated lines

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use rconsole::logs::{tail, tail_lines, TailReader};
use rconsole::RconError;
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_log() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("latest.log");
    (temp_dir, log_path)
}

fn line(i: usize) -> String {
    format!("[12:00:{:02}] [Server thread/INFO]: line {}", i % 60, i)
}

/// Write lines 1..=count, each terminated by '\n'
fn write_numbered_log(path: &Path, count: usize) {
    let mut file = File::create(path).unwrap();
    for i in 1..=count {
        writeln!(file, "{}", line(i)).unwrap();
    }
    file.sync_all().unwrap();
}

fn expected_range(from: usize, to: usize) -> Vec<String> {
    (from..=to).map(line).collect()
}

/// Counts every byte handed out by `read`
struct CountingReader<R> {
    inner: R,
    bytes_read: u64,
}

impl<R> CountingReader<R> {
    fn new(inner: R) -> Self {
        Self { inner, bytes_read: 0 }
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.bytes_read += n as u64;
        Ok(n)
    }
}

impl<R: Seek> Seek for CountingReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

fn numbered_log_bytes(count: usize) -> Vec<u8> {
    (1..=count).map(|i| format!("{}\n", line(i))).collect::<String>().into_bytes()
}

// =============================================================================
// Line Count Tests
// =============================================================================

#[test]
fn test_last_20_of_40() {
    let (_temp, path) = setup_temp_log();
    write_numbered_log(&path, 40);

    assert_eq!(tail_lines(&path, 20).unwrap(), expected_range(21, 40));
}

#[test]
fn test_10_1_0_of_30() {
    let (_temp, path) = setup_temp_log();
    write_numbered_log(&path, 30);

    assert_eq!(tail_lines(&path, 10).unwrap(), expected_range(21, 30));
    assert_eq!(tail_lines(&path, 1).unwrap(), expected_range(30, 30));
    assert!(tail_lines(&path, 0).unwrap().is_empty());
}

#[test]
fn test_more_requested_than_available() {
    let (_temp, path) = setup_temp_log();
    write_numbered_log(&path, 3);

    assert_eq!(tail_lines(&path, 10).unwrap(), expected_range(1, 3));
}

#[test]
fn test_tail_joins_with_newlines() {
    let (_temp, path) = setup_temp_log();
    write_numbered_log(&path, 5);

    let text = tail(&path, 2).unwrap();
    assert_eq!(text, format!("{}\n{}", line(4), line(5)));
}

// =============================================================================
// Edge Cases
// =============================================================================

#[test]
fn test_missing_file() {
    let (_temp, path) = setup_temp_log();

    match tail(&path, 10) {
        Err(RconError::NotFound(missing)) => assert_eq!(missing, path),
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_missing_file_with_zero_lines() {
    let (_temp, path) = setup_temp_log();
    assert!(matches!(tail(&path, 0), Err(RconError::NotFound(_))));
}

#[test]
fn test_empty_file() {
    let (_temp, path) = setup_temp_log();
    File::create(&path).unwrap();

    assert!(tail_lines(&path, 0).unwrap().is_empty());
    assert!(tail_lines(&path, 5).unwrap().is_empty());
    assert_eq!(tail(&path, 5).unwrap(), "");
}

#[test]
fn test_no_trailing_newline() {
    let (_temp, path) = setup_temp_log();
    std::fs::write(&path, "first\nsecond\nthird").unwrap();

    assert_eq!(tail_lines(&path, 1).unwrap(), vec!["third"]);
    assert_eq!(tail_lines(&path, 2).unwrap(), vec!["second", "third"]);
    assert_eq!(tail_lines(&path, 9).unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn test_crlf_line_endings() {
    let (_temp, path) = setup_temp_log();
    std::fs::write(&path, "alpha\r\nbeta\r\ngamma\r\n").unwrap();

    assert_eq!(tail_lines(&path, 2).unwrap(), vec!["beta", "gamma"]);
}

#[test]
fn test_blank_lines_are_lines() {
    let (_temp, path) = setup_temp_log();
    std::fs::write(&path, "a\n\nb\n\n").unwrap();

    assert_eq!(tail_lines(&path, 2).unwrap(), vec!["b", ""]);
    assert_eq!(tail_lines(&path, 4).unwrap(), vec!["a", "", "b", ""]);
}

#[test]
fn test_invalid_utf8_is_replaced() {
    let (_temp, path) = setup_temp_log();
    std::fs::write(&path, b"ok\nbad \xFF\xFE byte\nend\n").unwrap();

    let lines = tail_lines(&path, 2).unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("bad "));
    assert!(lines[0].contains('\u{FFFD}'));
    assert_eq!(lines[1], "end");
}

// =============================================================================
// Block Boundary Tests
// =============================================================================

#[test]
fn test_small_blocks_match_default() {
    let (_temp, path) = setup_temp_log();
    write_numbered_log(&path, 40);

    for block_size in [1, 3, 16, 47, 64, 1000] {
        let reader = TailReader::new(block_size);
        for n in [1, 5, 20, 39, 40, 41] {
            let from = 40usize.saturating_sub(n) + 1;
            assert_eq!(
                reader.tail_lines(&path, n).unwrap(),
                expected_range(from, 40),
                "block_size={} n={}",
                block_size,
                n
            );
        }
    }
}

#[test]
fn test_block_ending_on_newline_does_not_truncate() {
    let (_temp, path) = setup_temp_log();
    // Every line is exactly 8 bytes including '\n'
    std::fs::write(&path, "aaaaaaa\nbbbbbbb\nccccccc\n").unwrap();

    let reader = TailReader::new(8);
    assert_eq!(reader.tail_lines(&path, 1).unwrap(), vec!["ccccccc"]);
    assert_eq!(reader.tail_lines(&path, 2).unwrap(), vec!["bbbbbbb", "ccccccc"]);
}

#[test]
fn test_multibyte_characters_across_blocks() {
    let (_temp, path) = setup_temp_log();
    std::fs::write(&path, "héllo wörld\n日本語のログ\nlast ✓\n").unwrap();

    let reader = TailReader::new(5);
    assert_eq!(
        reader.tail_lines(&path, 2).unwrap(),
        vec!["日本語のログ", "last ✓"]
    );
}

#[test]
fn test_zero_block_size_is_clamped() {
    let reader = TailReader::new(0);
    assert_eq!(reader.block_size(), 1);
    assert_eq!(TailReader::default().block_size(), 8192);
}

#[test]
fn test_large_log() {
    let (_temp, path) = setup_temp_log();
    write_numbered_log(&path, 50_000);

    assert_eq!(tail_lines(&path, 50).unwrap(), expected_range(49_951, 50_000));
}

// =============================================================================
// Read Volume Tests
// =============================================================================

#[test]
fn test_reads_only_the_end_of_a_large_log() {
    let data = numbered_log_bytes(100_000);
    let total_len = data.len() as u64;
    let mut reader = CountingReader::new(Cursor::new(data));

    let tail = TailReader::new(8192);
    let lines = tail.tail_from(&mut reader, 20).unwrap();

    assert_eq!(lines, expected_range(99_981, 100_000));
    assert!(reader.bytes_read <= 2 * 8192, "read {} bytes", reader.bytes_read);
    assert!(reader.bytes_read < total_len / 100);
}

#[test]
fn test_read_volume_grows_with_requested_lines() {
    let data = numbered_log_bytes(100_000);
    let longest_line = (line(100_000).len() + 1) as u64;

    let tail = TailReader::new(4096);
    let mut few = CountingReader::new(Cursor::new(data.clone()));
    let mut many = CountingReader::new(Cursor::new(data));

    tail.tail_from(&mut few, 10).unwrap();
    let lines = tail.tail_from(&mut many, 2000).unwrap();

    assert_eq!(lines.len(), 2000);
    assert!(few.bytes_read <= 4096);
    // Enough blocks to cover 2000 lines, plus at most one extra
    assert!(many.bytes_read <= 2001 * longest_line + 4096);
    assert!(many.bytes_read > few.bytes_read);
}

#[test]
fn test_zero_lines_reads_nothing() {
    let mut reader = CountingReader::new(Cursor::new(numbered_log_bytes(1000)));

    assert!(TailReader::default().tail_from(&mut reader, 0).unwrap().is_empty());
    assert_eq!(reader.bytes_read, 0);
}
