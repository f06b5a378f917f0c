use crate::alphabets::Alphabet;
use std::sync::LazyLock;

pub fn iupac_alphabet() -> Alphabet {
    Alphabet::new(b"ACGTURYSWKMBDHVNacgturyswkmbdhvn")
}

static COMPLEMENT: LazyLock<[u8; 256]> = LazyLock::new(|| {
    let mut comp = [0; 256];
    comp.iter_mut().enumerate().for_each(|(v, a)| {
        *a = v as u8;
    });
    b"AGCTYRWSKMDVHBN"
        .iter()
        .zip(b"TCGARYWSMKHBDVN".iter())
        .for_each(|(&a, &b)| {
            comp[a as usize] = b;
            comp[a as usize + 32] = b + 32;
        });
    // U pairs like T
    comp[b'U' as usize] = b'A';
    comp[b'u' as usize] = b'a';
    comp
});

#[inline]
pub fn complement(a: u8) -> u8 {
    COMPLEMENT[a as usize]
}

pub fn reverse_complement(text: &[u8]) -> Vec<u8> {
    text.iter().rev().map(|&a| complement(a)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_word() {
        assert!(iupac_alphabet().is_word(b"GATTACA"));
        assert!(iupac_alphabet().is_word(b"gattaca"));
    }

    #[test]
    fn iupac_accepts_ambiguity_codes() {
        assert!(iupac_alphabet().is_word(b"ACGTNRY"));
        assert!(!iupac_alphabet().is_word(b"AC#"));
    }

    #[test]
    fn reverse_complement_keeps_case_and_n() {
        assert_eq!(reverse_complement(b"ACGTN"), b"NACGT");
        assert_eq!(reverse_complement(b"aacg"), b"cgtt");
        assert_eq!(reverse_complement(b"AU"), b"AT");
    }
}
