//! Byte-order-mark sniffing and line-by-line text decoding.
//!
//! Scene files are usually UTF-8, but some tools write UTF-16 with a BOM.
//! [`LineReader`] inspects the first bytes of the stream once, then yields
//! decoded lines without their terminators, never holding more than one line
//! in memory.

use std::io::{self, BufRead, BufReader, Chain, Cursor, Read};

/// Text encoding detected from the start of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8, with or without a BOM.
    Utf8,
    /// UTF-16 little-endian (BOM `FF FE`).
    Utf16Le,
    /// UTF-16 big-endian (BOM `FE FF`).
    Utf16Be,
}

impl Encoding {
    /// Detects the encoding from the first bytes of a stream.
    ///
    /// Returns the encoding and the length of the BOM to skip. Without a
    /// recognized BOM the stream is treated as UTF-8.
    pub fn sniff(prefix: &[u8]) -> (Encoding, usize) {
        if prefix.starts_with(&[0xEF, 0xBB, 0xBF]) {
            (Encoding::Utf8, 3)
        } else if prefix.starts_with(&[0xFF, 0xFE]) {
            (Encoding::Utf16Le, 2)
        } else if prefix.starts_with(&[0xFE, 0xFF]) {
            (Encoding::Utf16Be, 2)
        } else {
            (Encoding::Utf8, 0)
        }
    }
}

/// Streams decoded lines from a byte source.
///
/// Lines are split on `\n`; a trailing `\r` is dropped. A final line without
/// a terminator is still returned. Invalid sequences decode to U+FFFD.
pub struct LineReader<R> {
    inner: BufReader<Chain<Cursor<Vec<u8>>, R>>,
    encoding: Encoding,
    bytes: Vec<u8>,
    units: Vec<u16>,
}

impl<R: Read> LineReader<R> {
    /// Sniffs the BOM from `reader` and prepares to decode the rest.
    pub fn new(mut reader: R) -> io::Result<Self> {
        let mut prefix = [0u8; 3];
        let filled = read_up_to(&mut reader, &mut prefix)?;
        let (encoding, bom_len) = Encoding::sniff(&prefix[..filled]);
        let replay = prefix[bom_len..filled].to_vec();
        Ok(Self {
            inner: BufReader::new(Cursor::new(replay).chain(reader)),
            encoding,
            bytes: Vec::new(),
            units: Vec::new(),
        })
    }

    /// Returns the encoding detected for this stream.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Reads the next line, or `None` at end of stream.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        match self.encoding {
            Encoding::Utf8 => self.next_utf8_line(),
            Encoding::Utf16Le => self.next_utf16_line(u16::from_le_bytes),
            Encoding::Utf16Be => self.next_utf16_line(u16::from_be_bytes),
        }
    }

    fn next_utf8_line(&mut self) -> io::Result<Option<String>> {
        self.bytes.clear();
        if self.inner.read_until(b'\n', &mut self.bytes)? == 0 {
            return Ok(None);
        }
        if self.bytes.last() == Some(&b'\n') {
            self.bytes.pop();
        }
        if self.bytes.last() == Some(&b'\r') {
            self.bytes.pop();
        }
        Ok(Some(String::from_utf8_lossy(&self.bytes).into_owned()))
    }

    fn next_utf16_line(&mut self, to_unit: fn([u8; 2]) -> u16) -> io::Result<Option<String>> {
        self.units.clear();
        let mut read_any = false;
        loop {
            let mut pair = [0u8; 2];
            match read_up_to(&mut self.inner, &mut pair)? {
                0 => break,
                1 => {
                    // Odd trailing byte.
                    self.units.push(0xFFFD);
                    read_any = true;
                    break;
                }
                _ => {
                    read_any = true;
                    let unit = to_unit(pair);
                    if unit == u16::from(b'\n') {
                        break;
                    }
                    self.units.push(unit);
                }
            }
        }
        if !read_any {
            return Ok(None);
        }
        if self.units.last() == Some(&u16::from(b'\r')) {
            self.units.pop();
        }
        let line = char::decode_utf16(self.units.iter().copied())
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect();
        Ok(Some(line))
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Fills as much of `buf` as the reader can provide, returning the count.
/// Short only at end of stream.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
