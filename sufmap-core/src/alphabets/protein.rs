use crate::alphabets::Alphabet;
use std::sync::LazyLock;

/// Residue used for codons and letters with no amino-acid meaning.
pub const UNKNOWN: u8 = b'X';

pub const STOP: u8 = b'*';

/// Residues stored in the index: the 20 amino acids, B, Z, X and stop.
pub fn iupac_alphabet() -> Alphabet {
    Alphabet::new(b"ARNDCQEGHILKMFPSTWYVBZX*")
}

static NORMALIZE: LazyLock<[u8; 256]> = LazyLock::new(|| {
    let mut map = [0u8; 256];
    let known = iupac_alphabet();
    for b in b'A'..=b'Z' {
        let out = if known.contains(b) { b } else { UNKNOWN };
        map[b as usize] = out;
        map[b.to_ascii_lowercase() as usize] = out;
    }
    map[STOP as usize] = STOP;
    map
});

/// Upper-cases a residue and folds letters outside the alphabet to `X`.
/// Returns `None` for bytes that are not residues at all.
#[inline]
pub fn normalize(a: u8) -> Option<u8> {
    match NORMALIZE[a as usize] {
        0 => None,
        b => Some(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_case_and_unknown_letters() {
        assert_eq!(normalize(b'm'), Some(b'M'));
        assert_eq!(normalize(b'*'), Some(b'*'));
        assert_eq!(normalize(b'J'), Some(b'X'));
        assert_eq!(normalize(b'o'), Some(b'X'));
        assert_eq!(normalize(b'1'), None);
        assert_eq!(normalize(0), None);
    }

    #[test]
    fn standard_alphabet_is_subset() {
        assert!(iupac_alphabet().is_word(b"ARNDCEQGHILKMFPSTWYV"));
        assert!(!iupac_alphabet().is_word(b"mkv"));
    }
}
