use std::fmt;
use std::slice;
use std::str;

use crate::constants::*;
use crate::error::Error;

/// RNA nucleotide.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Base {
    A,
    C,
    G,
    U,
}

impl Base {
    pub fn iter() -> slice::Iter<'static, Base> {
        use self::Base::*;
        static BASES: [Base; N_NUCLEOTIDES] = [A, C, G, U];
        BASES.iter()
    }

    /// Parse a nucleotide letter; `T` is read as `U`.
    pub fn from_u8(x: u8) -> Option<Base> {
        match x {
            b'A' | b'a' => Some(Base::A),
            b'C' | b'c' => Some(Base::C),
            b'G' | b'g' => Some(Base::G),
            b'U' | b'u' | b'T' | b't' => Some(Base::U),
            _ => None,
        }
    }

    #[inline]
    pub fn to_u8(self) -> u8 {
        NUCLEOTIDES[self as usize]
    }

    #[inline]
    fn from_index(i: usize) -> Base {
        match i {
            0 => Base::A,
            1 => Base::C,
            2 => Base::G,
            _ => Base::U,
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_u8() as char)
    }
}

/// Nucleotide triplet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codon([Base; CODON_LEN]);

impl Codon {
    #[inline]
    pub const fn new(b1: Base, b2: Base, b3: Base) -> Codon {
        Codon([b1, b2, b3])
    }

    /// Codon at position `index` of the A, C, G, U ordering.
    // first base varies slowest
    pub fn from_index(index: usize) -> Codon {
        assert!(index < N_CODONS, "codon index {} out of range", index);
        const K: usize = N_NUCLEOTIDES;
        Codon([
            Base::from_index(index / (K * K)),
            Base::from_index((index / K) % K),
            Base::from_index(index % K),
        ])
    }

    #[inline]
    pub fn index(&self) -> usize {
        const K: usize = N_NUCLEOTIDES;
        (self.0[0] as usize * K + self.0[1] as usize) * K + self.0[2] as usize
    }

    /// All 64 codons in index order.
    pub fn all() -> impl Iterator<Item = Codon> {
        (0..N_CODONS).map(Codon::from_index)
    }

    /// Codons reachable by a single nucleotide substitution.
    ///
    /// Every codon has exactly 9 distinct neighbours, none of which is the codon itself.
    pub fn neighbours(&self) -> [Codon; N_NEIGHBOURS] {
        let mut res = [*self; N_NEIGHBOURS];
        let mut n = 0;
        for i in 0..CODON_LEN {
            for &b in Base::iter() {
                if self.0[i] != b {
                    res[n].0[i] = b;
                    n += 1;
                }
            }
        }
        res
    }

    pub fn hamming(&self, other: &Codon) -> usize {
        self.0.iter().zip(other.0.iter()).filter(|&(a, b)| a != b).count()
    }

    #[inline]
    pub fn is_neighbour(&self, other: &Codon) -> bool {
        self.hamming(other) == 1
    }
}

impl str::FromStr for Codon {
    type Err = Error;

    fn from_str(s: &str) -> Result<Codon, Error> {
        let x = s.trim().as_bytes();
        if x.len() != CODON_LEN {
            return Err(Error::InvalidCodon(s.to_owned()));
        }
        let mut bases = [Base::A; CODON_LEN];
        for (i, &c) in x.iter().enumerate() {
            bases[i] = Base::from_u8(c).ok_or_else(|| Error::InvalidCodon(s.to_owned()))?;
        }
        Ok(Codon(bases))
    }
}

impl fmt::Display for Codon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.0[0], self.0[1], self.0[2])
    }
}
