use crate::error::{MapError, MapResult};
use crate::seq::record::SeqRecord;
use crate::seq::traits::SeqBytes;
use std::io::{BufRead, BufReader, Cursor};
use std::marker::PhantomData;

/// Streaming four-line FASTQ reader. Qualities are checked for length and
/// then dropped. All four lines of a record are read before it is checked, so
/// a malformed record yields one error and the reader resumes at the next.
pub struct FastqRecords<R, S> {
    reader: R,
    line_no: usize,
    pending_header: Option<(String, usize)>,
    buf_line: String,
    done: bool,
    _marker: PhantomData<S>,
}

impl<R: BufRead, S: SeqBytes> FastqRecords<R, S> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            pending_header: None,
            buf_line: String::new(),
            done: false,
            _marker: PhantomData,
        }
    }

    fn next_nonempty_line(&mut self) -> Option<MapResult<(String, usize)>> {
        loop {
            let (line, line_no) = match self.next_line()? {
                Ok(value) => value,
                Err(err) => return Some(Err(err)),
            };
            if line.trim().is_empty() {
                continue;
            }
            return Some(Ok((line, line_no)));
        }
    }

    /// Next header line. Lines before it that are not headers are consumed up
    /// to the next `@` line and reported as a single error.
    fn next_header(&mut self) -> Option<MapResult<(String, usize)>> {
        if let Some(pending) = self.pending_header.take() {
            return Some(Ok(pending));
        }
        let (line, line_no) = match self.next_nonempty_line()? {
            Ok(value) => value,
            Err(err) => return Some(Err(err)),
        };
        if line.starts_with('@') {
            return Some(Ok((line, line_no)));
        }
        loop {
            match self.next_line() {
                None => break,
                Some(Err(err)) => return Some(Err(err)),
                Some(Ok((next, next_no))) => {
                    if next.starts_with('@') {
                        self.pending_header = Some((next, next_no));
                        break;
                    }
                }
            }
        }
        Some(Err(MapError::FastqFormat {
            msg: "expected header line starting with '@'",
            line: line_no,
        }))
    }

    fn next_line(&mut self) -> Option<MapResult<(String, usize)>> {
        self.buf_line.clear();
        match self.reader.read_line(&mut self.buf_line) {
            Ok(0) => None,
            Ok(_) => {
                self.line_no += 1;
                Some(Ok((std::mem::take(&mut self.buf_line), self.line_no)))
            }
            Err(err) => {
                self.done = true;
                Some(Err(MapError::Io(err)))
            }
        }
    }

    fn read_required_line(&mut self, msg: &'static str, line: usize) -> MapResult<(String, usize)> {
        match self.next_line() {
            Some(result) => result,
            None => Err(MapError::FastqFormat { msg, line }),
        }
    }
}

impl<R: BufRead, S: SeqBytes> Iterator for FastqRecords<R, S> {
    type Item = MapResult<SeqRecord<S>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (header_line, header_line_no) = match self.next_header()? {
            Ok(value) => value,
            Err(err) => return Some(Err(err)),
        };

        let (seq_line, seq_line_no) = match self
            .read_required_line("missing sequence line", header_line_no.saturating_add(1))
        {
            Ok(value) => value,
            Err(err) => return Some(Err(err)),
        };

        let (plus_line, plus_line_no) = match self
            .read_required_line("missing '+' separator line", seq_line_no.saturating_add(1))
        {
            Ok(value) => value,
            Err(err) => return Some(Err(err)),
        };

        let (qual_line, qual_line_no) =
            match self.read_required_line("missing quality line", plus_line_no.saturating_add(1)) {
                Ok(value) => value,
                Err(err) => return Some(Err(err)),
            };

        let (id, desc) = match parse_header(&header_line, header_line_no) {
            Ok(parsed) => parsed,
            Err(err) => return Some(Err(err)),
        };
        if !plus_line.starts_with('+') {
            return Some(Err(MapError::FastqFormat {
                msg: "expected '+' separator line",
                line: plus_line_no,
            }));
        }

        let seq_bytes = trim_eol(&seq_line).as_bytes().to_vec();
        if seq_bytes.len() != trim_eol(&qual_line).len() {
            return Some(Err(MapError::FastqFormat {
                msg: "sequence and quality lengths differ",
                line: qual_line_no,
            }));
        }

        let seq = match S::from_bytes(seq_bytes) {
            Ok(seq) => seq,
            Err(err) => return Some(Err(err)),
        };

        let record = match desc {
            Some(desc) => SeqRecord::new(id, seq).with_desc(desc),
            None => SeqRecord::new(id, seq),
        };
        Some(Ok(record))
    }
}

pub fn fastq_records_from_reader<R: BufRead, S: SeqBytes>(reader: R) -> FastqRecords<R, S> {
    FastqRecords::new(reader)
}

pub fn read_fastq_records_from_reader<R: BufRead, S: SeqBytes>(
    reader: R,
) -> MapResult<Vec<SeqRecord<S>>> {
    fastq_records_from_reader(reader).collect()
}

pub fn read_fastq_records_from_bytes<S: SeqBytes>(data: &[u8]) -> MapResult<Vec<SeqRecord<S>>> {
    read_fastq_records_from_reader(BufReader::new(Cursor::new(data)))
}

fn parse_header(header_line: &str, line_no: usize) -> MapResult<(Box<str>, Option<Box<str>>)> {
    let header = header_line.strip_prefix('@').ok_or(MapError::FastqFormat {
        msg: "expected header line starting with '@'",
        line: line_no,
    })?;

    let header = trim_eol(header).trim_start();
    if header.is_empty() {
        return Err(MapError::FastqFormat {
            msg: "empty header",
            line: line_no,
        });
    }

    let (id, desc) = match header.find(|c: char| c.is_whitespace()) {
        Some(idx) => {
            let id = &header[..idx];
            let desc = header[idx..].trim();
            let desc = if desc.is_empty() { None } else { Some(desc) };
            (id, desc)
        }
        None => (header, None),
    };

    Ok((id.into(), desc.map(|s| s.into())))
}

fn trim_eol(line: &str) -> &str {
    line.trim_end_matches(&['\n', '\r'][..])
}
