use std::fmt;

use crate::code::{AminoAcid, GeneticCode, PhysChemGroup};
use crate::constants::*;
use crate::seq::Codon;

/// Partition of amino acids and stop into classes of mutually conservative substitutions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Grouping {
    /// Physicochemical groups (basic, proline, aromatic, aliphatic, polar, glycine, acidic, stop)
    PhysChem,
    /// Every symbol is its own class
    Identity,
    /// Class index per symbol, in canonical symbol order
    Custom([u8; N_SYMBOLS]),
}

impl Grouping {
    #[inline]
    pub fn class(&self, aa: AminoAcid) -> usize {
        match *self {
            Grouping::PhysChem => physchem_class(aa.physchem_group()),
            Grouping::Identity => aa.index(),
            Grouping::Custom(ref classes) => classes[aa.index()] as usize,
        }
    }

    #[inline]
    pub fn same_class(&self, a: AminoAcid, b: AminoAcid) -> bool {
        self.class(a) == self.class(b)
    }
}

impl Default for Grouping {
    fn default() -> Self {
        Grouping::PhysChem
    }
}

fn physchem_class(g: PhysChemGroup) -> usize {
    g as usize
}

/// Conservative substitutions out of all single-nucleotide substitutions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Robustness {
    pub conservative: u32,
    pub total: u32,
}

impl Robustness {
    #[inline]
    pub fn value(&self) -> f64 {
        self.conservative as f64 / self.total as f64
    }
}

impl fmt::Display for Robustness {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Robustness of a code.
///
/// Counts the ordered (codon, neighbour) pairs, 64 * 9 in total, whose symbols fall in
/// the same class of `grouping`.
pub fn robustness(code: &GeneticCode, grouping: &Grouping) -> Robustness {
    let mut conservative = 0;
    let mut total = 0;

    for codon in Codon::all() {
        let class = grouping.class(code.get(&codon));
        for n in codon.neighbours().iter() {
            total += 1;
            if grouping.class(code.get(n)) == class {
                conservative += 1;
            }
        }
    }

    debug_assert_eq!(total as usize, N_SUBSTITUTIONS);
    Robustness { conservative: conservative, total: total }
}
