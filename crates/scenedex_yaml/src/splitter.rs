//! Cuts a scene stream into self-contained document texts.
//!
//! A scene file is a header (directives such as `%YAML` and `%TAG`) followed
//! by documents, each opened by a line starting with `---`. Every document
//! needs the header to parse on its own, so the splitter prefixes it onto each
//! emitted text.
//!
//! Progress is tracked as a line cursor: the number of body lines (counting
//! from the first separator) that belong to documents already emitted. A new
//! splitter resumed from that cursor re-reads the header, skips the body
//! lines, and continues with exactly the documents that were still pending.

use std::borrow::Cow;
use std::io::{self, Read};
use std::sync::LazyLock;

use regex::Regex;
use scenedex_source::LineReader;

/// Prefix of a document separator line.
const SEPARATOR: &str = "---";

/// Some exporters emit `--- !u!<class> &<anchor> stripped`, which is not
/// valid YAML. The trailing token is dropped.
static STRIPPED_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+ &\d+) stripped$").expect("static regex is valid"));

/// One complete document ready for loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Header plus the document's own lines, each terminated by `\n`.
    pub text: String,
    /// 1-based line of the document's separator within the file.
    pub line: usize,
    /// Number of body lines the document spans, separator included.
    pub line_count: usize,
}

struct PendingDocument {
    text: String,
    start: usize,
    line_count: usize,
}

/// Lazy, forward-only sequence of [`RawDocument`]s read from a byte stream.
pub struct DocumentSplitter<R> {
    lines: LineReader<R>,
    header: String,
    header_lines: usize,
    pending: Option<PendingDocument>,
    consumed: usize,
    finished: bool,
}

impl<R: Read> DocumentSplitter<R> {
    /// Starts splitting `reader` from its first document.
    pub fn new(reader: R) -> io::Result<Self> {
        Self::resume(reader, 0)
    }

    /// Starts splitting `reader` after skipping `skip_lines` body lines.
    ///
    /// `skip_lines` must be a value previously returned by
    /// [`cursor`](Self::cursor) for the same content. A cursor that lands
    /// anywhere but on a separator line is rejected with
    /// [`io::ErrorKind::InvalidData`].
    pub fn resume(reader: R, skip_lines: usize) -> io::Result<Self> {
        let mut lines = LineReader::new(reader)?;
        let mut header = String::new();
        let mut header_lines = 0;
        let mut first_separator = None;
        while let Some(line) = lines.next_line()? {
            if line.starts_with(SEPARATOR) {
                first_separator = Some(line);
                break;
            }
            header.push_str(&line);
            header.push('\n');
            header_lines += 1;
        }

        let mut splitter = Self {
            lines,
            header,
            header_lines,
            pending: None,
            consumed: skip_lines,
            finished: false,
        };

        let start = match first_separator {
            None => None,
            Some(line) if skip_lines == 0 => Some(line),
            Some(_) => splitter.skip_body_lines(skip_lines)?,
        };
        match start {
            None => splitter.finished = true,
            Some(line) if line.starts_with(SEPARATOR) => splitter.open_document(line, skip_lines),
            Some(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "resume cursor {skip_lines} does not point at a document separator (line {})",
                        header_lines + skip_lines + 1
                    ),
                ))
            }
        }
        Ok(splitter)
    }

    /// Returns the shared header text, each line terminated by `\n`.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Returns the number of body lines covered by emitted documents (plus
    /// any lines skipped on resume). Always aligned to a document boundary.
    pub fn cursor(&self) -> usize {
        self.consumed
    }

    /// Reads the next complete document.
    pub fn next_document(&mut self) -> io::Result<Option<RawDocument>> {
        if self.finished {
            return Ok(None);
        }
        loop {
            let Some(line) = self.lines.next_line()? else {
                self.finished = true;
                let last = self.pending.take();
                return Ok(last.map(|doc| self.complete(doc)));
            };
            if line.starts_with(SEPARATOR) {
                let done = self.pending.take();
                let next_start = done
                    .as_ref()
                    .map_or(self.consumed, |doc| doc.start + doc.line_count);
                self.open_document(line, next_start);
                if let Some(doc) = done {
                    return Ok(Some(self.complete(doc)));
                }
            } else if let Some(doc) = self.pending.as_mut() {
                doc.text.push_str(&line);
                doc.text.push('\n');
                doc.line_count += 1;
            }
        }
    }

    /// Discards the first separator and the following body lines up to
    /// `skip_lines`, returning the line at index `skip_lines`.
    fn skip_body_lines(&mut self, skip_lines: usize) -> io::Result<Option<String>> {
        for _ in 1..skip_lines {
            if self.lines.next_line()?.is_none() {
                return Ok(None);
            }
        }
        self.lines.next_line()
    }

    fn open_document(&mut self, separator: String, start: usize) {
        let separator = STRIPPED_SEPARATOR.replace(&separator, "$1");
        if let Cow::Owned(ref repaired) = separator {
            log::trace!("repaired stripped separator: {repaired}");
        }
        let mut text = String::with_capacity(self.header.len() + separator.len() + 1);
        text.push_str(&self.header);
        text.push_str(&separator);
        text.push('\n');
        self.pending = Some(PendingDocument {
            text,
            start,
            line_count: 1,
        });
    }

    fn complete(&mut self, doc: PendingDocument) -> RawDocument {
        self.consumed = doc.start + doc.line_count;
        RawDocument {
            text: doc.text,
            line: self.header_lines + doc.start + 1,
            line_count: doc.line_count,
        }
    }
}

impl<R: Read> Iterator for DocumentSplitter<R> {
    type Item = io::Result<RawDocument>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.next_document();
        if next.is_err() {
            self.finished = true;
        }
        next.transpose()
    }
}
