pub const NUCLEOTIDES: [u8; 4] = [b'A', b'C', b'G', b'U'];
pub const N_NUCLEOTIDES: usize = 4;

pub const CODON_LEN: usize = 3;
pub const N_CODONS: usize = N_NUCLEOTIDES * N_NUCLEOTIDES * N_NUCLEOTIDES;

// each codon position can be substituted by any of the other 3 nucleotides
pub const N_NEIGHBOURS: usize = CODON_LEN * (N_NUCLEOTIDES - 1);
pub const N_SUBSTITUTIONS: usize = N_CODONS * N_NEIGHBOURS;

pub const N_AMINO_ACIDS: usize = 20;
// amino acids and stop
pub const N_SYMBOLS: usize = N_AMINO_ACIDS + 1;
pub const N_AA_PAIRS: usize = N_AMINO_ACIDS * (N_AMINO_ACIDS - 1) / 2;

pub const N_PHYSCHEM_GROUPS: usize = 8;

pub const N_FREE_BLOCKS: usize = 4;
pub const N_SYNTHETIC: usize = 4;

/// Standard genetic code (NCBI translation table 1) with codons ordered by U, C, A, G.
pub const STANDARD_TABLE: &[u8; N_CODONS] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";
pub const STANDARD_TABLE_ORDER: [u8; 4] = [b'U', b'C', b'A', b'G'];

/// Largest seed accepted by the randomization strategies.
pub const MAX_SEED: u64 = u32::MAX as u64;
