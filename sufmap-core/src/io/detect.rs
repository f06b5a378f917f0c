//! Query file format detection.
//!
//! Decided by the first non-whitespace byte: `@` → FASTQ, anything else
//! (including an empty file) → FASTA.

use std::io::{self, BufRead};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeqFormat {
    Fasta,
    Fastq,
}

/// Detect the format without consuming record bytes. Leading whitespace may be
/// consumed.
pub fn detect_format<R: BufRead>(reader: &mut R) -> io::Result<SeqFormat> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(SeqFormat::Fasta);
        }
        match buf.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(i) => {
                return Ok(match buf[i] {
                    b'@' => SeqFormat::Fastq,
                    _ => SeqFormat::Fasta,
                });
            }
            None => {
                let n = buf.len();
                reader.consume(n);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};

    fn detect(data: &[u8]) -> SeqFormat {
        detect_format(&mut Cursor::new(data)).unwrap()
    }

    #[test]
    fn detect_fasta() {
        assert_eq!(detect(b">q1\nMKV\n"), SeqFormat::Fasta);
    }

    #[test]
    fn detect_fastq() {
        assert_eq!(detect(b"@q1\nMKV\n+\n!!!\n"), SeqFormat::Fastq);
    }

    #[test]
    fn skips_leading_blank_lines() {
        assert_eq!(detect(b"\n\n  \n@q1\nMKV\n+\n!!!\n"), SeqFormat::Fastq);
    }

    #[test]
    fn empty_is_fasta() {
        assert_eq!(detect(b""), SeqFormat::Fasta);
        assert_eq!(detect(b"\n\n"), SeqFormat::Fasta);
    }

    #[test]
    fn record_bytes_are_left_in_place() {
        // tiny buffer forces the whitespace to span several fills
        let mut reader = BufReader::with_capacity(2, Cursor::new(&b"\n\n\n\n>q1\n"[..]));
        assert_eq!(detect_format(&mut reader).unwrap(), SeqFormat::Fasta);
        let mut rest = String::new();
        reader.read_to_string(&mut rest).unwrap();
        assert!(rest.trim_start().starts_with(">q1"));
    }
}
