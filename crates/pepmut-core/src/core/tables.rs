use phf::{Map, phf_map};

/// Residue emitted for a stop codon during table lookup. Never survives translation.
pub const STOP: u8 = b'_';

/// Marks a peptide that is not a clean single ORF: an untranslatable codon or a missing stop.
pub const UNCLEAN: u8 = b'+';

/// Fill value for matrix cells past the end of a shorter peptide.
pub const PAD: u8 = 0;

/// The fixed amino-acid alphabet. Row order of every frequency and score matrix.
pub const AMINO_ACIDS: [u8; 20] = [
    b'A', b'C', b'D', b'E', b'F', b'G', b'H', b'I', b'K', b'L', b'M', b'N', b'P', b'Q', b'R',
    b'S', b'T', b'V', b'W', b'Y',
];

/// Nucleotide order used by the 2-bit codon encoding.
pub const BASES: [u8; 4] = [b'T', b'C', b'A', b'G'];

static AMINO_ACID_INDEX: Map<u8, usize> = phf_map! {
    b'A' => 0, b'C' => 1, b'D' => 2, b'E' => 3, b'F' => 4,
    b'G' => 5, b'H' => 6, b'I' => 7, b'K' => 8, b'L' => 9,
    b'M' => 10, b'N' => 11, b'P' => 12, b'Q' => 13, b'R' => 14,
    b'S' => 15, b'T' => 16, b'V' => 17, b'W' => 18, b'Y' => 19,
};

// Indexed by (first << 4) | (second << 2) | third over the TCAG base order.
const GENETIC_CODE: &[u8; 64] =
    b"FFLLSSSSYY__CC_WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

#[inline]
fn base_code(base: u8) -> Option<usize> {
    match base {
        b'T' => Some(0),
        b'C' => Some(1),
        b'A' => Some(2),
        b'G' => Some(3),
        _ => None,
    }
}

/// Decodes one codon into an amino acid or [`STOP`].
///
/// Returns `None` for anything that is not exactly three unambiguous bases.
pub fn decode_codon(codon: &[u8]) -> Option<u8> {
    let [a, b, c] = codon else {
        return None;
    };
    let index = (base_code(*a)? << 4) | (base_code(*b)? << 2) | base_code(*c)?;
    Some(GENETIC_CODE[index])
}

/// Position of an amino acid in [`AMINO_ACIDS`], if it belongs to the alphabet.
pub fn amino_acid_index(residue: u8) -> Option<usize> {
    AMINO_ACID_INDEX.get(&residue).copied()
}

pub fn is_amino_acid(residue: u8) -> bool {
    AMINO_ACID_INDEX.contains_key(&residue)
}

/// All 64 codons in encoding order, paired with what they decode to.
pub fn codons() -> impl Iterator<Item = ([u8; 3], u8)> {
    (0..64usize).map(|index| {
        let codon = [BASES[index >> 4], BASES[(index >> 2) & 3], BASES[index & 3]];
        (codon, GENETIC_CODE[index])
    })
}

/// First codon (in encoding order) that decodes to `residue`. Accepts [`STOP`].
pub fn codon_for(residue: u8) -> Option<[u8; 3]> {
    codons().find(|(_, aa)| *aa == residue).map(|(codon, _)| codon)
}
