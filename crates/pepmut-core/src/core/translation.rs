//! In-frame translation of sequencing reads.
//!
//! Reads are assumed to start inside the library ORF, in frame, at index 0. There is no
//! start-codon or frame search: consecutive non-overlapping triplets are decoded until the
//! first stop codon.
//!
//! A read that yields anything other than a clean ORF is flagged with [`UNCLEAN`]:
//!
//! - an untranslatable triplet (ambiguous base, or a trailing fragment shorter than three
//!   bases) decodes to [`UNCLEAN`] in place of a residue, unless a stop came before it;
//! - a read with no in-frame stop gets [`UNCLEAN`] appended after the last residue.

use crate::core::tables::{self, STOP, UNCLEAN};

/// Translates one read into a peptide, truncated at the first stop codon.
pub fn translate(read: &[u8]) -> Vec<u8> {
    let mut peptide = Vec::with_capacity(read.len() / 3 + 1);
    for codon in read.chunks(3) {
        match tables::decode_codon(codon) {
            Some(STOP) => return peptide,
            Some(residue) => peptide.push(residue),
            None => peptide.push(UNCLEAN),
        }
    }
    peptide.push(UNCLEAN);
    peptide
}

/// Translates every read of a batch, preserving order.
pub fn translate_all<S: AsRef<[u8]>>(reads: &[S]) -> Vec<Vec<u8>> {
    reads.iter().map(|r| translate(r.as_ref())).collect()
}

/// `true` when every residue of the peptide belongs to the amino-acid alphabet.
///
/// Rejects [`UNCLEAN`] wherever it sits, as well as any other foreign symbol.
pub fn is_clean(peptide: &[u8]) -> bool {
    peptide.iter().all(|&c| tables::is_amino_acid(c))
}

/// Back-translates a peptide using the first codon of each residue, appending a stop.
///
/// Returns `None` if the peptide contains anything outside the amino-acid alphabet.
pub fn encode(peptide: &[u8]) -> Option<Vec<u8>> {
    let mut dna = Vec::with_capacity(peptide.len() * 3 + 3);
    for &residue in peptide {
        if !tables::is_amino_acid(residue) {
            return None;
        }
        dna.extend_from_slice(&tables::codon_for(residue)?);
    }
    dna.extend_from_slice(&tables::codon_for(STOP)?);
    Some(dna)
}
