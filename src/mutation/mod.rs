use std::fmt;
use std::ops;
use std::slice;

use crate::code::{AminoAcid, GeneticCode};
use crate::constants::*;
use crate::seq::Codon;

/// Amino acid order of the pair enumeration.
pub const PAIR_ORDER: &[u8; N_AMINO_ACIDS] = b"ARNDCQEGHILKMFPSTWYV";

/// Number of single-nucleotide mutations connecting each pair of amino acids
pub struct MutCounts([u32; N_AA_PAIRS]);

impl MutCounts {
    #[inline]
    pub fn new() -> MutCounts {
        MutCounts([0; N_AA_PAIRS])
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<u32> {
        self.0.iter()
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Count for the unordered pair {a, b}.
    pub fn get(&self, a: AminoAcid, b: AminoAcid) -> Option<u32> {
        MutCounts::index(a, b).map(|i| self.0[i])
    }

    // pairs (i, j) with i < j in PAIR_ORDER are laid out row by row
    // the pair is looked up in both orientations
    // stop and identical amino acids have no pair index
    pub fn index(a: AminoAcid, b: AminoAcid) -> Option<usize> {
        let i = pair_rank(a)?;
        let j = pair_rank(b)?;
        if i == j {
            return None;
        }
        let (i, j) = if i < j { (i, j) } else { (j, i) };

        const N: usize = N_AMINO_ACIDS;
        // number of pairs in the rows before row i
        let offset = i * (2 * N - i - 1) / 2;
        Some(offset + (j - i - 1))
    }

    /// Pair labels in index order, e.g. `AR`, `AN`, ...
    pub fn pairs() -> Vec<String> {
        let mut names = Vec::with_capacity(N_AA_PAIRS);
        for i in 0..N_AMINO_ACIDS {
            for j in (i + 1)..N_AMINO_ACIDS {
                names.push(format!("{}{}", PAIR_ORDER[i] as char, PAIR_ORDER[j] as char));
            }
        }
        names
    }
}

fn pair_rank(aa: AminoAcid) -> Option<usize> {
    let x = aa.to_u8();
    PAIR_ORDER.iter().position(|&c| c == x)
}

impl Default for MutCounts {
    fn default() -> Self {
        MutCounts::new()
    }
}

impl PartialEq for MutCounts {
    fn eq(&self, other: &MutCounts) -> bool {
        &self.0 as &[u32] == &other.0 as &[u32]
    }
}

impl fmt::Debug for MutCounts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.0 as &[u32], f)
    }
}

impl ops::Index<usize> for MutCounts {
    type Output = u32;

    #[inline]
    fn index(&self, index: usize) -> &u32 {
        &self.0[index]
    }
}

impl ops::IndexMut<usize> for MutCounts {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut u32 {
        &mut self.0[index]
    }
}

/// Count the single-nucleotide mutations between pairs of amino acids under `code`.
///
/// Every ordered (codon, neighbour) pair with two different non-stop symbols adds one
/// to the unordered pair of those symbols.
pub fn number_of_mutations(code: &GeneticCode) -> MutCounts {
    let mut x = MutCounts::new();

    for codon in Codon::all() {
        let aa = code.get(&codon);
        if aa.is_stop() {
            continue;
        }
        for n in codon.neighbours().iter() {
            let n_aa = code.get(n);
            if !n_aa.is_stop() && n_aa != aa {
                let idx = MutCounts::index(aa, n_aa)
                    .unwrap_or_else(|| panic!("no index for amino acid pair {}{}", aa, n_aa));
                x[idx] += 1;
            }
        }
    }

    x
}
