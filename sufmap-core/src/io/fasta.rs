use crate::error::{MapError, MapResult};
use crate::seq::record::SeqRecord;
use crate::seq::traits::SeqBytes;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::marker::PhantomData;
use std::path::Path;

/// Streaming FASTA reader. A malformed record yields an error and the reader
/// resumes at the next header; an I/O error ends the stream.
pub struct FastaRecords<R, S> {
    reader: R,
    line_no: usize,
    pending_header: Option<(String, usize)>,
    buf_line: String,
    seq_buf: Vec<u8>,
    done: bool,
    _marker: PhantomData<S>,
}

impl<R: BufRead, S: SeqBytes> FastaRecords<R, S> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            pending_header: None,
            buf_line: String::new(),
            seq_buf: Vec::new(),
            done: false,
            _marker: PhantomData,
        }
    }

    fn next_header(&mut self) -> Option<MapResult<(String, usize)>> {
        if let Some(pending) = self.pending_header.take() {
            return Some(Ok(pending));
        }

        loop {
            self.buf_line.clear();
            match self.reader.read_line(&mut self.buf_line) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_no += 1;
                    let line_no = self.line_no;
                    if self.buf_line.starts_with('>') {
                        return Some(Ok((self.buf_line.clone(), line_no)));
                    }
                    if self.buf_line.trim().is_empty() {
                        continue;
                    }
                    return match self.skip_to_header() {
                        Ok(()) => Some(Err(MapError::FastaFormat {
                            msg: "expected header line starting with '>'",
                            line: line_no,
                        })),
                        Err(err) => Some(Err(err)),
                    };
                }
                Err(err) => return Some(Err(self.fail(err))),
            }
        }
    }

    /// Consumes a block of stray lines so it is reported once.
    fn skip_to_header(&mut self) -> MapResult<()> {
        loop {
            self.buf_line.clear();
            match self.reader.read_line(&mut self.buf_line) {
                Ok(0) => return Ok(()),
                Ok(_) => {
                    self.line_no += 1;
                    if self.buf_line.starts_with('>') {
                        self.pending_header = Some((self.buf_line.clone(), self.line_no));
                        return Ok(());
                    }
                }
                Err(err) => return Err(self.fail(err)),
            }
        }
    }

    fn fail(&mut self, err: std::io::Error) -> MapError {
        self.done = true;
        MapError::Io(err)
    }
}

impl<R: BufRead, S: SeqBytes> Iterator for FastaRecords<R, S> {
    type Item = MapResult<SeqRecord<S>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let (header_line, header_line_no) = match self.next_header()? {
            Ok(header) => header,
            Err(err) => return Some(Err(err)),
        };

        self.seq_buf.clear();

        loop {
            self.buf_line.clear();
            match self.reader.read_line(&mut self.buf_line) {
                Ok(0) => break,
                Ok(_) => {
                    self.line_no += 1;
                    let line_no = self.line_no;
                    if self.buf_line.starts_with('>') {
                        self.pending_header = Some((self.buf_line.clone(), line_no));
                        break;
                    }
                    self.seq_buf.extend(
                        self.buf_line
                            .bytes()
                            .filter(|b| !b.is_ascii_whitespace()),
                    );
                }
                Err(err) => return Some(Err(self.fail(err))),
            }
        }

        // the body is consumed even when the header is bad, so the next call
        // starts cleanly at the following record
        let (id, desc) = match parse_header(&header_line, header_line_no) {
            Ok(parsed) => parsed,
            Err(err) => return Some(Err(err)),
        };

        let capacity = self.seq_buf.capacity();
        let bytes = std::mem::take(&mut self.seq_buf);
        self.seq_buf = Vec::with_capacity(capacity);
        let seq = match S::from_bytes(bytes) {
            Ok(seq) => seq,
            Err(err) => return Some(Err(err)),
        };

        Some(Ok(SeqRecord { id, desc, seq }))
    }
}

pub fn fasta_records_from_reader<R: BufRead, S: SeqBytes>(reader: R) -> FastaRecords<R, S> {
    FastaRecords::new(reader)
}

/// Reads every record, failing on the first bad one.
pub fn read_fasta_records_from_reader<R: BufRead, S: SeqBytes>(
    reader: R,
) -> MapResult<Vec<SeqRecord<S>>> {
    fasta_records_from_reader(reader).collect()
}

pub fn read_fasta_records_from_path<S: SeqBytes>(
    path: impl AsRef<Path>,
) -> MapResult<Vec<SeqRecord<S>>> {
    let file = File::open(path)?;
    read_fasta_records_from_reader(BufReader::new(file))
}

pub fn read_fasta_records_from_bytes<S: SeqBytes>(data: &[u8]) -> MapResult<Vec<SeqRecord<S>>> {
    read_fasta_records_from_reader(BufReader::new(Cursor::new(data)))
}

fn parse_header(header_line: &str, line_no: usize) -> MapResult<(Box<str>, Option<Box<str>>)> {
    let header = header_line.strip_prefix('>').ok_or(MapError::FastaFormat {
        msg: "expected header line starting with '>'",
        line: line_no,
    })?;

    let header = header.trim_end_matches(&['\n', '\r'][..]).trim_start();
    if header.is_empty() {
        return Err(MapError::FastaFormat {
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
