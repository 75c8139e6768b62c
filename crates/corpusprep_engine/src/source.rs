use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use corpusprep_logging::prep_warn;

use crate::decode::decode_utf8_ignoring_errors;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("cannot open input {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("failed reading input {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// Lazily yields decoded lines, without their terminator.
///
/// `\n`, `\r\n` and a lone `\r` all end a line, also when a `\r\n` pair
/// straddles two reads.
/// Invalid UTF-8 is dropped and tallied in [`LineSource::malformed_sequences`].
/// A leading byte-order mark on the first line is removed.
pub struct LineSource<R> {
    reader: R,
    label: PathBuf,
    buf: Vec<u8>,
    lines_read: u64,
    malformed: u64,
    after_cr: bool,
    failed: bool,
}

impl LineSource<BufReader<File>> {
    /// Open `path` for reading. Access failures surface here, before any
    /// line is processed.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R, label: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            label: label.into(),
            buf: Vec::new(),
            lines_read: 0,
            malformed: 0,
            after_cr: false,
            failed: false,
        }
    }

    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    pub fn malformed_sequences(&self) -> u64 {
        self.malformed
    }

    /// Fill `buf` with the next line. Returns `false` at end of input.
    fn read_line(&mut self) -> io::Result<bool> {
        self.buf.clear();
        let mut started = false;
        loop {
            let available = match self.reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if available.is_empty() {
                return Ok(started);
            }
            if self.after_cr {
                self.after_cr = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }
            started = true;
            match available.iter().position(|&b| is_line_end(b)) {
                Some(idx) => {
                    self.after_cr = available[idx] == b'\r';
                    self.buf.extend_from_slice(&available[..idx]);
                    self.reader.consume(idx + 1);
                    return Ok(true);
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }
    }
}

fn is_line_end(byte: u8) -> bool {
    byte == b'\n' || byte == b'\r'
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<String, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_line() {
            Ok(false) => None,
            Ok(true) => {
                let decoded = decode_utf8_ignoring_errors(&self.buf, self.lines_read == 0);
                self.lines_read += 1;
                if decoded.malformed > 0 {
                    self.malformed += decoded.malformed;
                    prep_warn!(
                        "Dropped {} malformed UTF-8 sequence(s) on line {} of {:?}",
                        decoded.malformed,
                        self.lines_read,
                        self.label
                    );
                }
                Some(Ok(decoded.text))
            }
            Err(source) => {
                self.failed = true;
                Some(Err(SourceError::Read {
                    path: self.label.clone(),
                    source,
                }))
            }
        }
    }
}

/// Count the lines [`LineSource`] would yield for `path`.
///
/// This is a separate pass over the file, used to size progress displays.
pub fn count_lines(path: &Path) -> Result<u64, SourceError> {
    let file = File::open(path).map_err(|source| SourceError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    count_lines_in(file).map_err(|source| SourceError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn count_lines_in<R: Read>(mut reader: R) -> io::Result<u64> {
    let mut chunk = vec![0u8; 64 * 1024];
    let mut lines = 0;
    let mut after_cr = false;
    let mut open_line = false;
    loop {
        let read = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        for &byte in &chunk[..read] {
            if byte == b'\n' && after_cr {
                after_cr = false;
            } else if is_line_end(byte) {
                lines += 1;
                after_cr = byte == b'\r';
                open_line = false;
            } else {
                after_cr = false;
                open_line = true;
            }
        }
    }
    if open_line {
        lines += 1;
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out one byte per `read` call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            match self.0.split_first() {
                Some((&first, rest)) if !out.is_empty() => {
                    out[0] = first;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[test]
    fn counts_unterminated_last_line() {
        assert_eq!(count_lines_in(&b"a\nb"[..]).unwrap(), 2);
        assert_eq!(count_lines_in(&b"a\nb\n"[..]).unwrap(), 2);
        assert_eq!(count_lines_in(&b""[..]).unwrap(), 0);
        assert_eq!(count_lines_in(&b"\n\n"[..]).unwrap(), 2);
    }

    #[test]
    fn counts_every_line_ending_style() {
        assert_eq!(count_lines_in(&b"a\rb\n"[..]).unwrap(), 2);
        assert_eq!(count_lines_in(&b"a\r\nb"[..]).unwrap(), 2);
        assert_eq!(count_lines_in(&b"\r\r\n\n"[..]).unwrap(), 3);
        assert_eq!(count_lines_in(Trickle(b"a\r\nb\r")).unwrap(), 2);
    }

    #[test]
    fn crlf_split_across_reads_is_one_terminator() {
        let reader = BufReader::with_capacity(2, &b"a\r\nb\rc"[..]);
        let lines = LineSource::new(reader, "memory")
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }
}
