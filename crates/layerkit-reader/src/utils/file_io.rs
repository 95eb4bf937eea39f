//! File I/O
//!
//! Streams G-code files line by line. Lines are handed to the caller with
//! their terminators so they can be echoed verbatim; bytes that are not valid
//! UTF-8 are replaced rather than rejected.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use layerkit_core::ReaderError;
use serde::{Deserialize, Serialize};

/// Buffer size for reading large files (256 KB)
const READ_BUFFER_SIZE: usize = 256 * 1024;

/// Text encoding observed while reading, ordered from narrowest to widest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FileEncoding {
    /// 7-bit ASCII
    Ascii,
    /// Valid UTF-8 with at least one multi-byte sequence
    Utf8,
    /// Invalid UTF-8, decoded with replacement characters
    Lossy,
}

impl FileEncoding {
    /// Classify a chunk of bytes
    pub fn detect(data: &[u8]) -> Self {
        if data.is_ascii() {
            FileEncoding::Ascii
        } else if std::str::from_utf8(data).is_ok() {
            FileEncoding::Utf8
        } else {
            FileEncoding::Lossy
        }
    }

    /// Combine the encoding of two chunks of the same file
    pub fn widen(self, other: Self) -> Self {
        self.max(other)
    }
}

/// File read statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReadStats {
    /// Total bytes read, terminators included
    pub bytes_read: u64,
    /// Lines handed to the callback
    pub lines_read: u64,
    /// Widest encoding seen
    pub encoding: FileEncoding,
    /// File size in bytes
    pub file_size: u64,
    /// Time taken to read (milliseconds)
    pub read_time_ms: u64,
    /// True if the callback stopped the read before the end of the file
    pub stopped_early: bool,
}

impl FileReadStats {
    /// Get progress percentage
    pub fn progress_percent(&self) -> f64 {
        if self.file_size == 0 {
            0.0
        } else {
            (self.bytes_read as f64 / self.file_size as f64) * 100.0
        }
    }
}

/// G-code file reader with streaming support
#[derive(Debug, Clone)]
pub struct GcodeFileReader {
    path: PathBuf,
    file_size: u64,
}

impl GcodeFileReader {
    /// Open a reader for `path`.
    ///
    /// # Errors
    /// Returns [`ReaderError`] if the path does not exist, is not a regular
    /// file or its metadata cannot be read.
    pub fn new(path: impl AsRef<Path>) -> std::result::Result<Self, ReaderError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(ReaderError::FileNotFound { path });
        }

        if !path.is_file() {
            return Err(ReaderError::NotAFile { path });
        }

        let file_size = match fs::metadata(&path) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                return Err(ReaderError::ReadFailed {
                    path,
                    reason: e.to_string(),
                })
            }
        };

        Ok(Self { path, file_size })
    }

    /// Get file size in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Get file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stream the file line by line.
    ///
    /// Every line, including its `\n` or `\r\n` terminator when present, is
    /// passed to `callback`. Returning [`ControlFlow::Break`] stops the read.
    ///
    /// # Errors
    /// Returns error if the file cannot be opened or read
    pub fn read_lines<F>(&self, mut callback: F) -> Result<FileReadStats>
    where
        F: FnMut(&str) -> ControlFlow<()>,
    {
        let start_time = Instant::now();
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);

        let mut buffer = Vec::new();
        let mut lines_read = 0u64;
        let mut bytes_read = 0u64;
        let mut encoding = FileEncoding::Ascii;
        let mut stopped_early = false;

        loop {
            buffer.clear();
            let n = reader
                .read_until(b'\n', &mut buffer)
                .with_context(|| format!("Failed to read {}", self.path.display()))?;
            if n == 0 {
                break;
            }

            bytes_read += n as u64;
            encoding = encoding.widen(FileEncoding::detect(&buffer));
            let line = String::from_utf8_lossy(&buffer);
            lines_read += 1;

            if callback(&line).is_break() {
                stopped_early = true;
                break;
            }
        }

        Ok(FileReadStats {
            bytes_read,
            lines_read,
            encoding,
            file_size: self.file_size,
            read_time_ms: start_time.elapsed().as_millis() as u64,
            stopped_early,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_file_encoding_detection() {
        assert_eq!(FileEncoding::detect(b"G0 X10 Y20"), FileEncoding::Ascii);
        assert_eq!(FileEncoding::detect("; Düse 0".as_bytes()), FileEncoding::Utf8);
        assert_eq!(
            FileEncoding::detect(&[0x47, 0xFF, 0x31]),
            FileEncoding::Lossy
        );
        assert_eq!(
            FileEncoding::Ascii.widen(FileEncoding::Utf8),
            FileEncoding::Utf8
        );
        assert_eq!(
            FileEncoding::Lossy.widen(FileEncoding::Ascii),
            FileEncoding::Lossy
        );
    }

    #[test]
    fn test_gcode_file_reader_not_found() {
        let result = GcodeFileReader::new("/nonexistent/path/file.gcode");
        assert!(matches!(result, Err(ReaderError::FileNotFound { .. })));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = GcodeFileReader::new(dir.path());
        assert!(matches!(result, Err(ReaderError::NotAFile { .. })));
    }

    #[test]
    fn test_read_lines_keeps_terminators() {
        let file = temp_file(b"G28\r\nG1 X1\n;end");
        let reader = GcodeFileReader::new(file.path()).unwrap();
        assert_eq!(reader.file_size(), 15);

        let mut lines = Vec::new();
        let stats = reader
            .read_lines(|line| {
                lines.push(line.to_string());
                ControlFlow::Continue(())
            })
            .unwrap();

        assert_eq!(lines, vec!["G28\r\n", "G1 X1\n", ";end"]);
        assert_eq!(stats.lines_read, 3);
        assert_eq!(stats.bytes_read, 15);
        assert_eq!(stats.encoding, FileEncoding::Ascii);
        assert!(!stats.stopped_early);
        assert_eq!(stats.progress_percent(), 100.0);
    }

    #[test]
    fn test_read_lines_can_stop() {
        let file = temp_file(b"G1 X1\nG1 X2\nG1 X3\n");
        let reader = GcodeFileReader::new(file.path()).unwrap();

        let mut seen = 0;
        let stats = reader
            .read_lines(|_| {
                seen += 1;
                if seen == 2 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
            .unwrap();

        assert_eq!(seen, 2);
        assert_eq!(stats.lines_read, 2);
        assert!(stats.stopped_early);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let file = temp_file(b"G1 X1 ;\xFF\n");
        let reader = GcodeFileReader::new(file.path()).unwrap();

        let mut lines = Vec::new();
        let stats = reader
            .read_lines(|line| {
                lines.push(line.to_string());
                ControlFlow::Continue(())
            })
            .unwrap();

        assert_eq!(lines, vec!["G1 X1 ;\u{FFFD}\n"]);
        assert_eq!(stats.encoding, FileEncoding::Lossy);
    }
}
