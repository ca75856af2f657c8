//! The codon alphabet and the standard genetic code.
//!
//! Codons are ordered lexicographically by nucleotide in the order `A`, `C`, `G`, `T`, so that
//! the triplet `xyz` has triplet index `16x + 4y + z`. The three stop codons are not part of the
//! alphabet, so the codon state index of a sense codon is its triplet index less the number of
//! stop codons preceding it.

use super::alphabet::DNA_SYMBOLS;

/// The number of sense codons in the standard genetic code.
pub const NUM_SENSE_CODONS: usize = 61;

/// Triplet indices of the stop codons `TAA`, `TAG`, and `TGA`, in increasing order.
const STOP_TRIPLETS: [usize; 3] = [48, 50, 56];

/// The standard genetic code in NCBI order, where nucleotides are ordered `T`, `C`, `A`, `G`.
const STANDARD_CODE_NCBI: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

/// Position of each nucleotide (in `A`, `C`, `G`, `T` order) in NCBI order.
const NCBI_POSITION: [usize; 4] = [2, 1, 3, 0];

/// Returns the triplet index of three nucleotide indices.
pub(crate) fn triplet_index(nucleotides: [usize; 3]) -> usize {
    nucleotides[0] * 16 + nucleotides[1] * 4 + nucleotides[2]
}

/// Returns the nucleotide indices of a triplet index.
pub(crate) fn triplet_nucleotides(triplet: usize) -> [usize; 3] {
    [triplet / 16, (triplet / 4) % 4, triplet % 4]
}

/// Returns `true` if the triplet index is a stop codon.
pub(crate) fn is_stop(triplet: usize) -> bool {
    STOP_TRIPLETS.contains(&triplet)
}

/// Returns the codon state index of a triplet index, or `None` for stop codons.
pub(crate) fn sense_index(triplet: usize) -> Option<usize> {
    if is_stop(triplet) {
        None
    } else {
        Some(triplet - STOP_TRIPLETS.iter().filter(|&&stop| stop < triplet).count())
    }
}

/// Returns the triplet index of a codon state index.
pub(crate) fn sense_triplet(index: usize) -> usize {
    STOP_TRIPLETS
        .iter()
        .fold(index, |triplet, &stop| triplet + usize::from(triplet >= stop))
}

/// Returns the nucleotide symbols of a codon state index.
pub(crate) fn sense_codon(index: usize) -> [char; 3] {
    triplet_nucleotides(sense_triplet(index)).map(|i| DNA_SYMBOLS[i])
}

/// Returns the one-letter amino acid of a triplet index under the standard genetic code.
///
/// Stop codons are returned as `*`.
pub(crate) fn amino_acid(triplet: usize) -> char {
    let [x, y, z] = triplet_nucleotides(triplet);
    let ncbi = NCBI_POSITION[x] * 16 + NCBI_POSITION[y] * 4 + NCBI_POSITION[z];
    char::from(STANDARD_CODE_NCBI[ncbi])
}
