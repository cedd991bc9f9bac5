//! Randomized alternatives to a base genetic code.
//!
//! Every generator reseeds its own random number generator on entry, so that a
//! code is fully determined by the base code and the seed.

use std::fmt;
use std::str;

use multimap::MultiMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::code::{AminoAcid, GeneticCode};
use crate::constants::*;
use crate::error::{Error, Result};
use crate::seq::Codon;

/// Randomization model.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Free permutation of the 20 amino acids over the codon blocks
    AaPermutation,
    /// Permutation within groups of amino acids of equal degeneracy
    AaPermutationRestricted,
    /// Random codon assignment with every amino acid encoded at least once
    RandomAssignment,
}

impl Strategy {
    /// Generate the code for `seed`; seed 0 yields the base code itself.
    pub fn generate(self, base: &GeneticCode, seed: u64) -> Result<GeneticCode> {
        if seed == 0 {
            return Ok(base.clone());
        }
        match self {
            Strategy::AaPermutation => aa_permutation(base, seed),
            Strategy::AaPermutationRestricted => aa_permutation_restricted(base, seed),
            Strategy::RandomAssignment => random_assignment(base, seed),
        }
    }

    /// Whether codon blocks are preserved, so that a block keeps one amino acid.
    pub fn preserves_blocks(self) -> bool {
        match self {
            Strategy::AaPermutation | Strategy::AaPermutationRestricted => true,
            Strategy::RandomAssignment => false,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = match *self {
            Strategy::AaPermutation => "aa_permutation",
            Strategy::AaPermutationRestricted => "aa_permutation_restricted",
            Strategy::RandomAssignment => "random",
        };

        write!(f, "{}", c)
    }
}

impl str::FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Strategy> {
        match s {
            "aa_permutation" => Ok(Strategy::AaPermutation),
            "aa_permutation_restricted" | "restricted" => Ok(Strategy::AaPermutationRestricted),
            "random" => Ok(Strategy::RandomAssignment),
            _ => Err(Error::UnknownStrategy(s.to_owned())),
        }
    }
}

fn check_seed(seed: u64) -> Result<()> {
    if seed > MAX_SEED {
        Err(Error::SeedOutOfRange(seed))
    } else {
        Ok(())
    }
}

fn check_surjective(base: &GeneticCode) -> Result<()> {
    if base.is_surjective() {
        Ok(())
    } else {
        Err(Error::DegenerateCode(String::from("not every amino acid is encoded")))
    }
}

/// Relabel `base` by the permutation `perm` of the 20 amino acids; stop is fixed.
fn permute(base: &GeneticCode, perm: &[AminoAcid]) -> GeneticCode {
    base.relabel(|aa| if aa.is_stop() { aa } else { perm[aa.index()] })
}

/// Amino acid permutation.
///
/// The codon blocks of `base` are kept and the 20 amino acids are shuffled among them.
/// Stop codons do not move.
pub fn aa_permutation(base: &GeneticCode, seed: u64) -> Result<GeneticCode> {
    check_seed(seed)?;
    check_surjective(base)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut perm: Vec<AminoAcid> = AminoAcid::residues().cloned().collect();
    perm.shuffle(&mut rng);
    trace!(seed, "drew amino acid permutation");

    Ok(permute(base, &perm))
}

/// Amino acid permutation restricted to amino acids with the same number of codons.
///
/// For the standard code, the amino acids encoded by 1, 2, 3, 4 and 6 codons are permuted
/// among themselves, which preserves the codon count of every block.
pub fn aa_permutation_restricted(base: &GeneticCode, seed: u64) -> Result<GeneticCode> {
    check_seed(seed)?;
    check_surjective(base)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let counts = base.degeneracy();
    let classes: MultiMap<usize, AminoAcid> = AminoAcid::residues()
        .map(|&aa| (counts[aa.index()], aa))
        .collect();
    let mut sizes: Vec<usize> = classes.keys().cloned().collect();
    sizes.sort();

    let mut perm: Vec<AminoAcid> = AminoAcid::residues().cloned().collect();
    // shuffle each degeneracy class, smallest class first
    for size in sizes.iter() {
        let members = match classes.get_vec(size) {
            Some(members) => members,
            None => continue,
        };
        let mut images = members.clone();
        images.shuffle(&mut rng);
        for (aa, image) in members.iter().zip(images.into_iter()) {
            perm[aa.index()] = image;
        }
    }
    trace!(seed, classes = sizes.len(), "drew restricted amino acid permutation");

    Ok(permute(base, &perm))
}

/// Random codon assignment.
///
/// Stop codons of `base` are kept. The remaining codons are shuffled; the first 20 are
/// assigned one to each amino acid and the rest receive amino acids drawn uniformly.
pub fn random_assignment(base: &GeneticCode, seed: u64) -> Result<GeneticCode> {
    check_seed(seed)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut codons: Vec<Codon> = Codon::all().collect();
    codons.shuffle(&mut rng);
    let sense: Vec<Codon> = codons.into_iter().filter(|c| !base.get(c).is_stop()).collect();

    if sense.len() < N_AMINO_ACIDS {
        return Err(Error::DegenerateCode(format!(
            "{} sense codons cannot encode {} amino acids",
            sense.len(),
            N_AMINO_ACIDS
        )));
    }

    let mut assignments: Vec<(Codon, AminoAcid)> = base.stop_codons()
        .into_iter()
        .map(|c| (c, AminoAcid::Stop))
        .collect();
    for (c, &aa) in sense.iter().zip(AminoAcid::residues()) {
        assignments.push((*c, aa));
    }
    for c in sense[N_AMINO_ACIDS..].iter() {
        let aa = AminoAcid::from_index(rng.gen_range(0..N_AMINO_ACIDS));
        assignments.push((*c, aa));
    }

    GeneticCode::from_assignments(assignments)
}
