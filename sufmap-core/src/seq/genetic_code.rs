//! Codon tables for the NCBI genetic code variants.
//!
//! Tables are stored as the 64-letter NCBI strings, codons enumerated with the
//! first base slowest in `TCAG` order (`TTT, TTC, TTA, TTG, TCT, ...`).

use crate::alphabets::protein;
use crate::error::{MapError, MapResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeneticCode {
    #[default]
    Canonical,
    VertMitochondrial,
    YeastMitochondrial,
    MoldMitochondrial,
    InvertMitochondrial,
    Ciliate,
    FlatwormMitochondrial,
    Euplotid,
    Prokaryote,
    AltYeast,
    AscidianMitochondrial,
    AltFlatwormMitochondrial,
    Blepherisma,
    ChlorophyceanMitochondrial,
    TrematodeMitochondrial,
    ScenedesmusMitochondrial,
    ThraustochytriumMitochondrial,
    PterobranchiaMitochondrial,
    Gracilibacteria,
}

impl GeneticCode {
    pub const ALL: [GeneticCode; 19] = [
        GeneticCode::Canonical,
        GeneticCode::VertMitochondrial,
        GeneticCode::YeastMitochondrial,
        GeneticCode::MoldMitochondrial,
        GeneticCode::InvertMitochondrial,
        GeneticCode::Ciliate,
        GeneticCode::FlatwormMitochondrial,
        GeneticCode::Euplotid,
        GeneticCode::Prokaryote,
        GeneticCode::AltYeast,
        GeneticCode::AscidianMitochondrial,
        GeneticCode::AltFlatwormMitochondrial,
        GeneticCode::Blepherisma,
        GeneticCode::ChlorophyceanMitochondrial,
        GeneticCode::TrematodeMitochondrial,
        GeneticCode::ScenedesmusMitochondrial,
        GeneticCode::ThraustochytriumMitochondrial,
        GeneticCode::PterobranchiaMitochondrial,
        GeneticCode::Gracilibacteria,
    ];

    /// Variant by its position in [`GeneticCode::ALL`] (0 = canonical).
    pub fn from_id(id: u8) -> MapResult<Self> {
        Self::ALL
            .get(id as usize)
            .copied()
            .ok_or(MapError::UnknownGeneticCode { id })
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// NCBI translation table number.
    pub fn ncbi_id(self) -> u8 {
        match self {
            GeneticCode::Canonical => 1,
            GeneticCode::VertMitochondrial => 2,
            GeneticCode::YeastMitochondrial => 3,
            GeneticCode::MoldMitochondrial => 4,
            GeneticCode::InvertMitochondrial => 5,
            GeneticCode::Ciliate => 6,
            GeneticCode::FlatwormMitochondrial => 9,
            GeneticCode::Euplotid => 10,
            GeneticCode::Prokaryote => 11,
            GeneticCode::AltYeast => 12,
            GeneticCode::AscidianMitochondrial => 13,
            GeneticCode::AltFlatwormMitochondrial => 14,
            GeneticCode::Blepherisma => 15,
            GeneticCode::ChlorophyceanMitochondrial => 16,
            GeneticCode::TrematodeMitochondrial => 21,
            GeneticCode::ScenedesmusMitochondrial => 22,
            GeneticCode::ThraustochytriumMitochondrial => 23,
            GeneticCode::PterobranchiaMitochondrial => 24,
            GeneticCode::Gracilibacteria => 25,
        }
    }

    fn ncbi_table(self) -> &'static [u8; 64] {
        match self {
            GeneticCode::Canonical | GeneticCode::Prokaryote => {
                b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"
            }
            GeneticCode::VertMitochondrial => {
                b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG"
            }
            GeneticCode::YeastMitochondrial => {
                b"FFLLSSSSYY**CCWWTTTTPPPPHHQQRRRRIIMMTTTTNNKKSSRRVVVVAAAADDEEGGGG"
            }
            GeneticCode::MoldMitochondrial => {
                b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"
            }
            GeneticCode::InvertMitochondrial => {
                b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSSSVVVVAAAADDEEGGGG"
            }
            GeneticCode::Ciliate => {
                b"FFLLSSSSYYQQCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"
            }
            GeneticCode::FlatwormMitochondrial => {
                b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG"
            }
            GeneticCode::Euplotid => {
                b"FFLLSSSSYY**CCCWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"
            }
            GeneticCode::AltYeast => {
                b"FFLLSSSSYY**CC*WLLLSPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"
            }
            GeneticCode::AscidianMitochondrial => {
                b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSGGVVVVAAAADDEEGGGG"
            }
            GeneticCode::AltFlatwormMitochondrial => {
                b"FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG"
            }
            GeneticCode::Blepherisma => {
                b"FFLLSSSSYY*QCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"
            }
            GeneticCode::ChlorophyceanMitochondrial => {
                b"FFLLSSSSYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"
            }
            GeneticCode::TrematodeMitochondrial => {
                b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNNKSSSSVVVVAAAADDEEGGGG"
            }
            GeneticCode::ScenedesmusMitochondrial => {
                b"FFLLSS*SYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"
            }
            GeneticCode::ThraustochytriumMitochondrial => {
                b"FF*LSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"
            }
            GeneticCode::PterobranchiaMitochondrial => {
                b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG"
            }
            GeneticCode::Gracilibacteria => {
                b"FFLLSSSSYY**CCGWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"
            }
        }
    }
}

impl fmt::Display for GeneticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} (NCBI table {})", self, self.ncbi_id())
    }
}

/// Resolved codon lookup for one [`GeneticCode`]. Built once per run and
/// shared by reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodonTable {
    table: [u8; 64],
}

impl CodonTable {
    pub fn new(code: GeneticCode) -> Self {
        Self {
            table: *code.ncbi_table(),
        }
    }

    /// Amino acid for one codon. Codons with anything but A/C/G/T/U yield `X`.
    #[inline]
    pub fn translate_codon(&self, codon: &[u8]) -> u8 {
        debug_assert_eq!(codon.len(), 3);
        let i1 = BASE_INDEX[codon[0] as usize];
        let i2 = BASE_INDEX[codon[1] as usize];
        let i3 = BASE_INDEX[codon[2] as usize];
        if i1 < 4 && i2 < 4 && i3 < 4 {
            let idx = ((i1 as usize) << 4) | ((i2 as usize) << 2) | (i3 as usize);
            self.table[idx]
        } else {
            protein::UNKNOWN
        }
    }

    /// Translates complete codons of `bytes`; a trailing partial codon is dropped.
    pub fn translate(&self, bytes: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(bytes.len() / 3);
        for codon in bytes.chunks_exact(3) {
            out.push(self.translate_codon(codon));
        }
        out
    }
}

impl Default for CodonTable {
    fn default() -> Self {
        Self::new(GeneticCode::default())
    }
}

static BASE_INDEX: LazyLock<[u8; 256]> = LazyLock::new(|| {
    let mut map = [255u8; 256];
    for (rank, bases) in [b"Tt", b"Cc", b"Aa", b"Gg"].iter().enumerate() {
        for &b in bases.iter() {
            map[b as usize] = rank as u8;
        }
    }
    map[b'U' as usize] = 0;
    map[b'u' as usize] = 0;
    map
});
