//! Ostrov codes.
//!
//! Four free codon blocks of the standard code may be reassigned to any other amino acid
//! or to stop. A reassigned block that is not reachable by a single mutation from a codon
//! of its new amino acid forms a new, split region of meaning and is labeled by a
//! synthetic marker (X, Z, B or J) whose amino acid is recorded separately. Blocks that
//! are adjacent to a codon of their new meaning are absorbed into the real letter, and
//! adjacent reassigned blocks with the same meaning share a single label.

use std::fmt;

use itertools::Itertools;
use tracing::debug;

use crate::code::{AminoAcid, GeneticCode, Label, LabeledCode, Synthetic, SyntheticMeanings};
use crate::constants::*;
use crate::score::{self, Grouping, Robustness};
use crate::seq::Base::*;
use crate::seq::Codon;

pub mod rules;

use self::rules::Step;

/// A fixed set of codons that may be reassigned together.
#[derive(Debug)]
pub struct CodonBlock {
    pub codons: &'static [Codon],
}

impl fmt::Display for CodonBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let names: Vec<String> = self.codons.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", names.join(","))
    }
}

/// Free codon blocks: leucine UUA/UUG, stop UAG, the split serine block AGU/AGC and
/// arginine AGG/AGA.
pub static FREE_BLOCKS: [CodonBlock; N_FREE_BLOCKS] = [
    CodonBlock { codons: &[Codon::new(U, U, A), Codon::new(U, U, G)] },
    CodonBlock { codons: &[Codon::new(U, A, G)] },
    CodonBlock { codons: &[Codon::new(A, G, U), Codon::new(A, G, C)] },
    CodonBlock { codons: &[Codon::new(A, G, G), Codon::new(A, G, A)] },
];

/// Index of the split serine block among the free blocks.
pub const SERINE_BLOCK: usize = 2;

/// New meaning per free block; `None` keeps the standard meaning.
pub type Targets = [Option<AminoAcid>; N_FREE_BLOCKS];

/// Labels per free block; `None` is an unchanged block without a marker.
pub type Labels = [Option<Label>; N_FREE_BLOCKS];

/// One Ostrov code with its labels and score.
#[derive(Clone, Debug)]
pub struct OstrovRecord {
    /// `standard`, or `k-n` for the n-th code with k reassigned blocks
    pub id: String,
    pub targets: Targets,
    pub labels: Labels,
    pub meanings: SyntheticMeanings,
    pub code: GeneticCode,
    pub robustness: Robustness,
}

impl OstrovRecord {
    /// Number of reassigned blocks.
    pub fn n_changed(&self) -> usize {
        self.targets.iter().filter(|x| x.is_some()).count()
    }

    /// Code with each labeled block written as its label.
    pub fn labeled_code(&self, standard: &GeneticCode) -> LabeledCode {
        assemble(standard, &self.labels)
    }
}

/// Write the given block labels over the standard code.
pub fn assemble(standard: &GeneticCode, labels: &Labels) -> LabeledCode {
    let mut code = LabeledCode::from(standard);
    for (block, label) in FREE_BLOCKS.iter().zip(labels.iter()) {
        if let Some(label) = *label {
            code.assign(block.codons, label);
        }
    }
    code
}

/// Enumerates and scores all Ostrov codes derived from a standard code.
pub struct OstrovGenerator<'a> {
    standard: &'a GeneticCode,
    grouping: Grouping,
}

impl<'a> OstrovGenerator<'a> {
    pub fn new(standard: &'a GeneticCode, grouping: Grouping) -> OstrovGenerator<'a> {
        OstrovGenerator { standard: standard, grouping: grouping }
    }

    /// Meaning of a free block in the standard code.
    #[inline]
    pub fn standard_meaning(&self, block: usize) -> AminoAcid {
        self.standard.get(&FREE_BLOCKS[block].codons[0])
    }

    /// The unchanged code.
    pub fn standard_record(&self) -> OstrovRecord {
        self.evaluate(String::from("standard"), [None; N_FREE_BLOCKS])
    }

    /// Every combination of new meanings for `k` reassigned blocks.
    ///
    /// Block sets are visited in lexicographic order; for each set, the new meanings vary
    /// fastest on the last block, in canonical symbol order, skipping the standard meaning.
    pub fn targets(&self, k: usize) -> impl Iterator<Item = Targets> + '_ {
        (0..N_FREE_BLOCKS).combinations(k).filter(move |_| k > 0).flat_map(move |changed| {
            let choices: Vec<Vec<AminoAcid>> = changed
                .iter()
                .map(|&b| {
                    let standard = self.standard_meaning(b);
                    AminoAcid::iter().cloned().filter(|&aa| aa != standard).collect()
                })
                .collect();
            choices.into_iter().multi_cartesian_product().map(move |aas| {
                let mut targets = [None; N_FREE_BLOCKS];
                for (&b, &aa) in changed.iter().zip(aas.iter()) {
                    targets[b] = Some(aa);
                }
                targets
            })
        })
    }

    /// Scored codes with `k` reassigned blocks; `k` of 0 yields the standard record.
    pub fn records(&self, k: usize) -> Box<dyn Iterator<Item = OstrovRecord> + '_> {
        if k == 0 {
            return Box::new(Some(self.standard_record()).into_iter());
        }
        debug!(k, "enumerating Ostrov codes");
        Box::new(
            self.targets(k)
                .enumerate()
                .map(move |(n, targets)| self.evaluate(format!("{}-{}", k, n), targets)),
        )
    }

    /// The standard record followed by all codes with 1 to 4 reassigned blocks.
    pub fn iter(&self) -> impl Iterator<Item = OstrovRecord> + '_ {
        (0..=N_FREE_BLOCKS).flat_map(move |k| self.records(k))
    }

    /// Label, resolve and score one combination of reassignments.
    pub fn evaluate(&self, id: String, targets: Targets) -> OstrovRecord {
        let (labels, meanings) = self.label(&targets);

        let mut code = self.standard.clone();
        for (block, target) in FREE_BLOCKS.iter().zip(targets.iter()) {
            if let Some(aa) = *target {
                code = code.with_assignment(block.codons, aa);
            }
        }
        let robustness = score::robustness(&code, &self.grouping);

        OstrovRecord {
            id: id,
            targets: targets,
            labels: labels,
            meanings: meanings,
            code: code,
            robustness: robustness,
        }
    }

    /// Decide the label of every reassigned block and the meaning of every marker in use.
    pub fn label(&self, targets: &Targets) -> (Labels, SyntheticMeanings) {
        let mut labels: Labels = [None; N_FREE_BLOCKS];
        let mut meanings = SyntheticMeanings::new();

        let serine = self.standard_meaning(SERINE_BLOCK);
        if targets[SERINE_BLOCK].is_none() {
            labels[SERINE_BLOCK] = Some(Label::Synthetic(Synthetic::X));
            meanings.set(Synthetic::X, serine);
        }

        let changed: Vec<usize> = (0..N_FREE_BLOCKS).filter(|&b| targets[b].is_some()).collect();
        let rule = match rules::rule_for(&changed) {
            Some(rule) => rule,
            None => return (labels, meanings),
        };

        // standard code with the outcomes of committed blocks
        let mut working = LabeledCode::from(self.standard);

        for step in rule.steps.iter() {
            let aa = match targets[step.block] {
                Some(aa) => aa,
                None => continue,
            };
            let label = resolve_step(step, aa, serine, targets, &working, &mut labels, &mut meanings);
            labels[step.block] = Some(label);
            if step.commit {
                working.assign(FREE_BLOCKS[step.block].codons, label);
            }
        }

        (labels, meanings)
    }
}

fn resolve_step(
    step: &Step,
    aa: AminoAcid,
    serine: AminoAcid,
    targets: &Targets,
    working: &LabeledCode,
    labels: &mut Labels,
    meanings: &mut SyntheticMeanings,
) -> Label {
    let codons = FREE_BLOCKS[step.block].codons;
    let excluded = step.exclude.map(|b| FREE_BLOCKS[b].codons).unwrap_or(&[]);
    let partner = step.merge_with.filter(|&p| targets[p] == Some(aa));

    // fold into the unchanged split serine block
    if step.serine_fold && aa == serine {
        return Label::Synthetic(Synthetic::X);
    }

    // absorb: the block already neighbours its new meaning
    if aa.is_stop() || working.is_among_neighbours(codons, aa, excluded) {
        // an adjacent partner with the same meaning is absorbed along with this block
        if let Some(p) = partner {
            if let Some(Label::Synthetic(s)) = labels[p] {
                meanings.clear(s);
                labels[p] = Some(Label::Residue(aa));
            }
        }
        return Label::Residue(aa);
    }

    // merge: share the label of an adjacent partner with the same meaning
    if let Some(label) = partner.and_then(|p| labels[p]) {
        return label;
    }

    // mark
    meanings.set(step.slot, aa);
    Label::Synthetic(step.slot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(xs: &[(usize, AminoAcid)]) -> Targets {
        let mut t = [None; N_FREE_BLOCKS];
        for &(b, aa) in xs {
            t[b] = Some(aa);
        }
        t
    }

    fn letters(labels: &Labels) -> String {
        labels
            .iter()
            .map(|x| match *x {
                Some(l) => l.to_u8() as char,
                None => '-',
            })
            .collect()
    }

    fn meaning_letters(meanings: &SyntheticMeanings) -> String {
        Synthetic::iter()
            .map(|&s| match meanings.get(s) {
                Some(aa) => aa.to_u8() as char,
                None => '-',
            })
            .collect()
    }

    #[test]
    fn test_free_blocks() {
        let standard = GeneticCode::standard();
        let g = OstrovGenerator::new(&standard, Grouping::PhysChem);
        let meanings: Vec<AminoAcid> = (0..N_FREE_BLOCKS).map(|b| g.standard_meaning(b)).collect();
        assert_eq!(meanings, vec![AminoAcid::Leu, AminoAcid::Stop, AminoAcid::Ser, AminoAcid::Arg]);
        assert_eq!(FREE_BLOCKS[3].to_string(), "AGG,AGA");

        // blocks 1-2 and 3-4 are the only adjacent pairs
        let adjacent = |i: usize, j: usize| {
            FREE_BLOCKS[i].codons.iter().any(|a| FREE_BLOCKS[j].codons.iter().any(|b| a.is_neighbour(b)))
        };
        assert!(adjacent(0, 1));
        assert!(adjacent(2, 3));
        assert!(!adjacent(0, 2));
        assert!(!adjacent(0, 3));
        assert!(!adjacent(1, 2));
        assert!(!adjacent(1, 3));
    }

    #[test]
    fn test_standard_record() {
        let standard = GeneticCode::standard();
        let g = OstrovGenerator::new(&standard, Grouping::PhysChem);
        let r = g.standard_record();
        assert_eq!(r.id, "standard");
        assert_eq!(letters(&r.labels), "--X-");
        assert_eq!(meaning_letters(&r.meanings), "S---");
        assert_eq!(r.code, standard);
        assert_eq!(r.robustness, score::robustness(&standard, &Grouping::PhysChem));
    }

    #[test]
    fn test_single_block() {
        use crate::code::AminoAcid::*;
        let standard = GeneticCode::standard();
        let g = OstrovGenerator::new(&standard, Grouping::PhysChem);

        // UAG -> E is adjacent to GAG
        let (labels, meanings) = g.label(&targets(&[(1, Glu)]));
        assert_eq!(letters(&labels), "-EX-");
        assert_eq!(meaning_letters(&meanings), "S---");

        // UAG -> A has no alanine neighbour
        let (labels, meanings) = g.label(&targets(&[(1, Ala)]));
        assert_eq!(letters(&labels), "-ZX-");
        assert_eq!(meaning_letters(&meanings), "SA--");

        // stop never needs a marker
        let (labels, _) = g.label(&targets(&[(0, Stop)]));
        assert_eq!(letters(&labels), "*-X-");

        // AGG/AGA -> S joins the split serine block
        let (labels, meanings) = g.label(&targets(&[(3, Ser)]));
        assert_eq!(letters(&labels), "--XX");
        assert_eq!(meaning_letters(&meanings), "S---");

        // reassigning the serine block retires X
        let (labels, meanings) = g.label(&targets(&[(2, Ala)]));
        assert_eq!(letters(&labels), "--Z-");
        assert_eq!(meaning_letters(&meanings), "-A--");
    }

    #[test]
    fn test_adjacent_blocks_merge() {
        use crate::code::AminoAcid::*;
        let standard = GeneticCode::standard();
        let g = OstrovGenerator::new(&standard, Grouping::PhysChem);

        let (labels, meanings) = g.label(&targets(&[(0, Ala), (1, Ala)]));
        assert_eq!(letters(&labels), "ZZX-");
        assert_eq!(meaning_letters(&meanings), "SA--");

        // blocks 2 and 3 are not adjacent
        let (labels, meanings) = g.label(&targets(&[(1, Ala), (2, Ala)]));
        assert_eq!(letters(&labels), "-ZB-");
        assert_eq!(meaning_letters(&meanings), "-AA-");

        // AGU -> C is adjacent to UGU; AGG -> C is then adjacent to AGU
        let (labels, meanings) = g.label(&targets(&[(0, Ala), (2, Cys), (3, Cys)]));
        assert_eq!(letters(&labels), "Z-CC");
        assert_eq!(meaning_letters(&meanings), "-A--");
    }

    #[test]
    fn test_absorb_takes_partner_along() {
        use crate::code::AminoAcid::*;
        let standard = GeneticCode::standard();
        let g = OstrovGenerator::new(&standard, Grouping::PhysChem);

        // UUA/UUG -> E has no glutamate neighbour and claims Z, then UAG -> E is
        // adjacent to GAG, so both blocks become E and Z is released
        let (labels, meanings) = g.label(&targets(&[(0, Glu), (1, Glu)]));
        assert_eq!(letters(&labels), "EEX-");
        assert_eq!(meaning_letters(&meanings), "S---");
        assert_eq!(meanings.get(Synthetic::Z), None);

        // the same with a partner that stays marked
        let (labels, meanings) = g.label(&targets(&[(2, Glu), (3, Glu)]));
        assert_eq!(letters(&labels), "--ZZ");
        assert_eq!(meaning_letters(&meanings), "-E--");
    }

    #[test]
    fn test_four_blocks() {
        use crate::code::AminoAcid::*;
        let standard = GeneticCode::standard();
        let g = OstrovGenerator::new(&standard, Grouping::PhysChem);

        let r = g.evaluate(String::from("4-0"), targets(&[(0, Ala), (1, Ala), (2, Ala), (3, Ala)]));
        assert_eq!(letters(&r.labels), "XXBB");
        assert_eq!(meaning_letters(&r.meanings), "A-A-");
        assert_eq!(r.robustness.conservative, 216);

        let r = g.evaluate(String::from("4-401"), targets(&[(0, Ala), (1, Cys), (2, Ala), (3, Cys)]));
        assert_eq!(letters(&r.labels), "XZBJ");
        assert_eq!(meaning_letters(&r.meanings), "ACAC");
        assert_eq!(r.robustness.conservative, 214);
    }

    #[test]
    fn test_targets_skip_standard_meaning() {
        let standard = GeneticCode::standard();
        let g = OstrovGenerator::new(&standard, Grouping::PhysChem);
        let first: Vec<Targets> = g.targets(1).take(2).collect();
        assert_eq!(first[0], targets(&[(0, AminoAcid::Ala)]));
        assert_eq!(first[1], targets(&[(0, AminoAcid::Cys)]));
        assert!(g.targets(1).all(|t| t[0] != Some(AminoAcid::Leu) && t[1] != Some(AminoAcid::Stop)));
        assert_eq!(g.targets(0).count(), 0);
    }
}
