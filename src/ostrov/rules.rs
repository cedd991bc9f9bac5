//! Decision table for reassigned codon blocks.
//!
//! For each set of simultaneously reassigned blocks, the table lists the order in which
//! the blocks are resolved and, per block, the synthetic slot it may claim, the block
//! excluded from its neighbour search, whether its outcome is written into the working
//! code, whether it may fold into the split serine block and which earlier block it
//! may merge with.
//!
//! Exclusions and commits are kept exactly as the reference tables were produced; they
//! differ between the 2-, 3- and 4-block cases only where the blocks involved are not
//! adjacent.

use crate::code::Synthetic;
use crate::code::Synthetic::*;

/// Resolution of one reassigned block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// Block index
    pub block: usize,
    /// Marker claimed when the block cannot be absorbed
    pub slot: Synthetic,
    /// Block whose codons do not count as neighbours
    pub exclude: Option<usize>,
    /// Write the outcome into the working code before resolving later blocks
    pub commit: bool,
    /// A serine target joins the unchanged split serine block
    pub serine_fold: bool,
    /// Adjacent earlier block that shares a marker or an absorption with this one
    pub merge_with: Option<usize>,
}

/// Resolution order for one set of reassigned blocks.
#[derive(Copy, Clone, Debug)]
pub struct Rule {
    pub changed: &'static [usize],
    pub steps: &'static [Step],
}

const fn step(block: usize, slot: Synthetic) -> Step {
    Step {
        block: block,
        slot: slot,
        exclude: None,
        commit: false,
        serine_fold: false,
        merge_with: None,
    }
}

const fn committed(block: usize, slot: Synthetic, exclude: usize) -> Step {
    Step {
        block: block,
        slot: slot,
        exclude: Some(exclude),
        commit: true,
        serine_fold: false,
        merge_with: None,
    }
}

const fn folding(block: usize, slot: Synthetic) -> Step {
    Step {
        block: block,
        slot: slot,
        exclude: None,
        commit: false,
        serine_fold: true,
        merge_with: None,
    }
}

const fn merging(block: usize, slot: Synthetic, partner: usize) -> Step {
    Step {
        block: block,
        slot: slot,
        exclude: None,
        commit: false,
        serine_fold: false,
        merge_with: Some(partner),
    }
}

pub static RULES: [Rule; 15] = [
    // one block
    Rule { changed: &[0], steps: &[step(0, Z)] },
    Rule { changed: &[1], steps: &[step(1, Z)] },
    Rule { changed: &[2], steps: &[step(2, Z)] },
    Rule { changed: &[3], steps: &[folding(3, Z)] },
    // two blocks
    Rule { changed: &[0, 1], steps: &[committed(0, Z, 1), merging(1, B, 0)] },
    Rule { changed: &[0, 2], steps: &[committed(0, Z, 2), step(2, B)] },
    Rule { changed: &[0, 3], steps: &[committed(0, Z, 3), folding(3, B)] },
    Rule { changed: &[1, 2], steps: &[committed(1, Z, 2), step(2, B)] },
    Rule { changed: &[1, 3], steps: &[committed(1, Z, 3), folding(3, B)] },
    Rule { changed: &[2, 3], steps: &[committed(2, Z, 3), merging(3, B, 2)] },
    // three blocks
    Rule { changed: &[0, 1, 2], steps: &[committed(0, Z, 1), merging(1, B, 0), step(2, J)] },
    Rule { changed: &[0, 1, 3], steps: &[committed(0, Z, 1), merging(1, B, 0), folding(3, J)] },
    Rule { changed: &[0, 2, 3], steps: &[committed(0, Z, 2), committed(2, B, 3), merging(3, J, 2)] },
    Rule { changed: &[1, 2, 3], steps: &[committed(1, Z, 2), committed(2, B, 3), merging(3, J, 2)] },
    // all four blocks
    Rule {
        changed: &[0, 1, 2, 3],
        steps: &[committed(0, X, 1), merging(1, Z, 0), committed(2, B, 3), merging(3, J, 2)],
    },
];

/// Rule for the given set of reassigned blocks, in increasing block order.
pub fn rule_for(changed: &[usize]) -> Option<&'static Rule> {
    RULES.iter().find(|r| r.changed == changed)
}
