use std::fmt;
use std::slice;
use std::str;

use multimap::MultiMap;

use crate::constants::*;
use crate::error::{Error, Result};
use crate::seq::{Base, Codon};

pub mod random;

/// Amino acid residue or stop.
///
/// Declaration order is the canonical symbol order used for permutations and enumeration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    Ala,
    Cys,
    Asp,
    Glu,
    Phe,
    Gly,
    His,
    Ile,
    Lys,
    Leu,
    Met,
    Asn,
    Pro,
    Gln,
    Arg,
    Ser,
    Thr,
    Val,
    Trp,
    Tyr,
    Stop,
}

static SYMBOLS: [AminoAcid; N_SYMBOLS] = {
    use self::AminoAcid::*;
    [
        Ala, Cys, Asp, Glu, Phe, Gly, His, Ile, Lys, Leu, Met, Asn, Pro, Gln, Arg, Ser, Thr, Val,
        Trp, Tyr, Stop,
    ]
};

const LETTERS: &[u8; N_SYMBOLS] = b"ACDEFGHIKLMNPQRSTVWY*";

impl AminoAcid {
    /// All 20 amino acids and stop.
    #[inline]
    pub fn iter() -> slice::Iter<'static, AminoAcid> {
        SYMBOLS.iter()
    }

    /// The 20 amino acids, without stop.
    #[inline]
    pub fn residues() -> slice::Iter<'static, AminoAcid> {
        SYMBOLS[..N_AMINO_ACIDS].iter()
    }

    #[inline]
    pub fn from_index(i: usize) -> AminoAcid {
        SYMBOLS[i]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_u8(x: u8) -> Option<AminoAcid> {
        let x = x.to_ascii_uppercase();
        LETTERS.iter().position(|&c| c == x).map(AminoAcid::from_index)
    }

    #[inline]
    pub fn to_u8(self) -> u8 {
        LETTERS[self as usize]
    }

    #[inline]
    pub fn is_stop(self) -> bool {
        self == AminoAcid::Stop
    }

    pub fn physchem_group(self) -> PhysChemGroup {
        use self::AminoAcid::*;
        use self::PhysChemGroup::{Acidic, Aliphatic, Aromatic, Basic, Glycine, Polar, Proline};
        match self {
            His | Lys | Arg => Basic,
            Pro => Proline,
            Phe | Trp | Tyr => Aromatic,
            Ala | Ile | Leu | Val => Aliphatic,
            Cys | Met | Asn | Gln | Ser | Thr => Polar,
            Gly => Glycine,
            Asp | Glu => Acidic,
            Stop => PhysChemGroup::Stop,
        }
    }
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_u8() as char)
    }
}

impl str::FromStr for AminoAcid {
    type Err = Error;

    fn from_str(s: &str) -> Result<AminoAcid> {
        let x = s.trim().as_bytes();
        if x.len() != 1 {
            return Err(Error::InvalidSymbol(s.to_owned()));
        }
        AminoAcid::from_u8(x[0]).ok_or_else(|| Error::InvalidSymbol(s.to_owned()))
    }
}

/// Physicochemical classes of amino acids, after Pines et al., mBio, 2017.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PhysChemGroup {
    Basic,
    Proline,
    Aromatic,
    Aliphatic,
    Polar,
    Glycine,
    Acidic,
    Stop,
}

/// Placeholder letter for a reassigned codon block whose meaning is recorded separately.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Synthetic {
    X,
    Z,
    B,
    J,
}

impl Synthetic {
    pub fn iter() -> slice::Iter<'static, Synthetic> {
        use self::Synthetic::*;
        static SYNTHETIC: [Synthetic; N_SYNTHETIC] = [X, Z, B, J];
        SYNTHETIC.iter()
    }

    pub fn from_u8(x: u8) -> Option<Synthetic> {
        match x.to_ascii_uppercase() {
            b'X' => Some(Synthetic::X),
            b'Z' => Some(Synthetic::Z),
            b'B' => Some(Synthetic::B),
            b'J' => Some(Synthetic::J),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        b"XZBJ"[self as usize]
    }
}

impl fmt::Display for Synthetic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_u8() as char)
    }
}

/// Letter of a labeled code: a real symbol or a synthetic marker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    Residue(AminoAcid),
    Synthetic(Synthetic),
}

impl Label {
    pub fn from_u8(x: u8) -> Option<Label> {
        // synthetic letters do not collide with amino acid letters
        match Synthetic::from_u8(x) {
            Some(s) => Some(Label::Synthetic(s)),
            None => AminoAcid::from_u8(x).map(Label::Residue),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Label::Residue(aa) => aa.to_u8(),
            Label::Synthetic(s) => s.to_u8(),
        }
    }
}

impl From<AminoAcid> for Label {
    fn from(x: AminoAcid) -> Self {
        Label::Residue(x)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_u8() as char)
    }
}

impl str::FromStr for Label {
    type Err = Error;

    fn from_str(s: &str) -> Result<Label> {
        let x = s.trim().as_bytes();
        if x.len() != 1 {
            return Err(Error::InvalidSymbol(s.to_owned()));
        }
        Label::from_u8(x[0]).ok_or_else(|| Error::InvalidSymbol(s.to_owned()))
    }
}

/// Real meanings of the synthetic markers in use.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SyntheticMeanings([Option<AminoAcid>; N_SYNTHETIC]);

impl SyntheticMeanings {
    pub fn new() -> SyntheticMeanings {
        SyntheticMeanings::default()
    }

    #[inline]
    pub fn get(&self, s: Synthetic) -> Option<AminoAcid> {
        self.0[s as usize]
    }

    #[inline]
    pub fn set(&mut self, s: Synthetic, aa: AminoAcid) {
        self.0[s as usize] = Some(aa);
    }

    #[inline]
    pub fn clear(&mut self, s: Synthetic) {
        self.0[s as usize] = None;
    }

    /// Markers with a recorded meaning.
    pub fn live(&self) -> impl Iterator<Item = (Synthetic, AminoAcid)> + '_ {
        Synthetic::iter().filter_map(move |&s| self.get(s).map(|aa| (s, aa)))
    }
}

/// Total mapping from the 64 codons to amino acids and stop.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GeneticCode([AminoAcid; N_CODONS]);

impl GeneticCode {
    /// The standard genetic code.
    pub fn standard() -> GeneticCode {
        let mut code = [AminoAcid::Stop; N_CODONS];
        let mut i = 0;
        for &b1 in STANDARD_TABLE_ORDER.iter() {
            for &b2 in STANDARD_TABLE_ORDER.iter() {
                for &b3 in STANDARD_TABLE_ORDER.iter() {
                    let codon = Codon::new(base(b1), base(b2), base(b3));
                    code[codon.index()] = AminoAcid::from_u8(STANDARD_TABLE[i])
                        .expect("standard table holds amino acid letters only");
                    i += 1;
                }
            }
        }
        GeneticCode(code)
    }

    /// Build a code from (codon, amino acid) assignments, which must cover every codon exactly once.
    pub fn from_assignments<I>(assignments: I) -> Result<GeneticCode>
    where
        I: IntoIterator<Item = (Codon, AminoAcid)>,
    {
        let mut code: [Option<AminoAcid>; N_CODONS] = [None; N_CODONS];
        for (codon, aa) in assignments {
            let slot = &mut code[codon.index()];
            if slot.is_some() {
                return Err(Error::DuplicateCodon(codon));
            }
            *slot = Some(aa);
        }

        let found = code.iter().filter(|x| x.is_some()).count();
        if found != N_CODONS {
            return Err(Error::IncompleteCode { found: found });
        }

        let mut res = [AminoAcid::Stop; N_CODONS];
        for (i, x) in code.iter().enumerate() {
            if let Some(aa) = *x {
                res[i] = aa;
            }
        }
        Ok(GeneticCode(res))
    }

    #[inline]
    pub fn get(&self, codon: &Codon) -> AminoAcid {
        self.0[codon.index()]
    }

    /// Iterate over (codon, amino acid) in codon index order.
    pub fn iter(&self) -> impl Iterator<Item = (Codon, AminoAcid)> + '_ {
        self.0.iter().enumerate().map(|(i, &aa)| (Codon::from_index(i), aa))
    }

    /// New code with each symbol replaced by its image under `f`.
    pub fn relabel<F>(&self, f: F) -> GeneticCode
    where
        F: Fn(AminoAcid) -> AminoAcid,
    {
        let mut code = self.0;
        for aa in code.iter_mut() {
            *aa = f(*aa);
        }
        GeneticCode(code)
    }

    /// New code with the given codons reassigned to `aa`.
    pub fn with_assignment(&self, codons: &[Codon], aa: AminoAcid) -> GeneticCode {
        let mut code = self.0;
        for c in codons {
            code[c.index()] = aa;
        }
        GeneticCode(code)
    }

    /// Codons grouped by the symbol they encode.
    pub fn synonyms(&self) -> MultiMap<AminoAcid, Codon> {
        self.iter().map(|(c, aa)| (aa, c)).collect()
    }

    /// Number of codons assigned to each symbol, indexed by symbol.
    pub fn degeneracy(&self) -> [usize; N_SYMBOLS] {
        let mut counts = [0; N_SYMBOLS];
        for &aa in self.0.iter() {
            counts[aa.index()] += 1;
        }
        counts
    }

    /// Codons that encode stop.
    pub fn stop_codons(&self) -> Vec<Codon> {
        self.iter().filter(|&(_, aa)| aa.is_stop()).map(|(c, _)| c).collect()
    }

    /// Whether each of the 20 amino acids is encoded by at least one codon.
    pub fn is_surjective(&self) -> bool {
        let counts = self.degeneracy();
        counts[..N_AMINO_ACIDS].iter().all(|&n| n > 0)
    }
}

impl fmt::Debug for GeneticCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s: String = self.0.iter().map(|aa| aa.to_u8() as char).collect();
        write!(f, "GeneticCode({})", s)
    }
}

/// Total mapping from the 64 codons to letters that may include synthetic markers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LabeledCode([Label; N_CODONS]);

impl LabeledCode {
    pub fn from_assignments<I>(assignments: I) -> Result<LabeledCode>
    where
        I: IntoIterator<Item = (Codon, Label)>,
    {
        let mut code: [Option<Label>; N_CODONS] = [None; N_CODONS];
        for (codon, label) in assignments {
            let slot = &mut code[codon.index()];
            if slot.is_some() {
                return Err(Error::DuplicateCodon(codon));
            }
            *slot = Some(label);
        }

        let found = code.iter().filter(|x| x.is_some()).count();
        if found != N_CODONS {
            return Err(Error::IncompleteCode { found: found });
        }

        let mut res = [Label::Residue(AminoAcid::Stop); N_CODONS];
        for (i, x) in code.iter().enumerate() {
            if let Some(label) = *x {
                res[i] = label;
            }
        }
        Ok(LabeledCode(res))
    }

    #[inline]
    pub fn get(&self, codon: &Codon) -> Label {
        self.0[codon.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Codon, Label)> + '_ {
        self.0.iter().enumerate().map(|(i, &x)| (Codon::from_index(i), x))
    }

    /// Relabel the given codons in place.
    pub fn assign(&mut self, codons: &[Codon], label: Label) {
        for c in codons {
            self.0[c.index()] = label;
        }
    }

    /// Whether any codon one substitution away from `codons` encodes `aa`.
    ///
    /// Codons in `codons` itself and in `excluded` are not considered.
    pub fn is_among_neighbours(&self, codons: &[Codon], aa: AminoAcid, excluded: &[Codon]) -> bool {
        codons
            .iter()
            .flat_map(|c| c.neighbours().to_vec())
            .filter(|n| !codons.contains(n) && !excluded.contains(n))
            .any(|n| self.get(&n) == Label::Residue(aa))
    }

    /// Replace every synthetic marker by its recorded meaning.
    pub fn resolve(&self, meanings: &SyntheticMeanings) -> Result<GeneticCode> {
        let mut code = [AminoAcid::Stop; N_CODONS];
        for (i, &x) in self.0.iter().enumerate() {
            code[i] = match x {
                Label::Residue(aa) => aa,
                Label::Synthetic(s) => meanings.get(s).ok_or(Error::UnresolvedSymbol(s))?,
            };
        }
        Ok(GeneticCode(code))
    }
}

impl<'a> From<&'a GeneticCode> for LabeledCode {
    fn from(code: &'a GeneticCode) -> Self {
        let mut res = [Label::Residue(AminoAcid::Stop); N_CODONS];
        for (i, &aa) in code.0.iter().enumerate() {
            res[i] = Label::Residue(aa);
        }
        LabeledCode(res)
    }
}

fn base(x: u8) -> Base {
    Base::from_u8(x).expect("standard table order holds nucleotide letters only")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codon(s: &str) -> Codon {
        s.parse().unwrap()
    }

    #[test]
    fn test_symbol_letters() {
        let s: String = AminoAcid::iter().map(|aa| aa.to_u8() as char).collect();
        assert_eq!(s, "ACDEFGHIKLMNPQRSTVWY*");
        for &aa in AminoAcid::iter() {
            assert_eq!(AminoAcid::from_u8(aa.to_u8()), Some(aa));
        }
        assert_eq!(AminoAcid::from_u8(b'X'), None);
        assert_eq!("l".parse::<AminoAcid>().unwrap(), AminoAcid::Leu);
    }

    #[test]
    fn test_physchem_groups() {
        assert_eq!(AminoAcid::Stop.physchem_group(), PhysChemGroup::Stop);
        assert_eq!(AminoAcid::Ser.physchem_group(), PhysChemGroup::Polar);
        assert_eq!(AminoAcid::Arg.physchem_group(), PhysChemGroup::Basic);
        assert_eq!(AminoAcid::Gly.physchem_group(), PhysChemGroup::Glycine);
        // only stop falls in the stop group
        let stops: Vec<AminoAcid> = AminoAcid::iter()
            .cloned()
            .filter(|aa| aa.physchem_group() == PhysChemGroup::Stop)
            .collect();
        assert_eq!(stops, vec![AminoAcid::Stop]);
    }

    #[test]
    fn test_standard_table_letters() {
        // every letter of the built-in table is a symbol, in U, C, A, G order
        assert!(STANDARD_TABLE.iter().all(|&x| AminoAcid::from_u8(x).is_some()));
        assert!(STANDARD_TABLE_ORDER.iter().all(|&x| Base::from_u8(x).is_some()));
        let code = GeneticCode::standard();
        assert_eq!(code.get(&codon("UUU")), AminoAcid::Phe);
        assert_eq!(code.get(&codon("GGG")), AminoAcid::Gly);
        assert_eq!(code.degeneracy()[AminoAcid::Stop.index()], 3);
    }

    #[test]
    fn test_standard_code() {
        let code = GeneticCode::standard();
        assert_eq!(code.get(&codon("AUG")), AminoAcid::Met);
        assert_eq!(code.get(&codon("UGG")), AminoAcid::Trp);
        assert_eq!(code.get(&codon("UUA")), AminoAcid::Leu);
        assert_eq!(code.get(&codon("AGU")), AminoAcid::Ser);
        assert_eq!(code.get(&codon("AGG")), AminoAcid::Arg);
        assert_eq!(code.get(&codon("GGC")), AminoAcid::Gly);

        let stops: Vec<String> = code.stop_codons().iter().map(|c| c.to_string()).collect();
        assert_eq!(stops, vec!["UAA", "UAG", "UGA"]);
        assert!(code.is_surjective());
    }

    #[test]
    fn test_standard_degeneracy() {
        let counts = GeneticCode::standard().degeneracy();
        assert_eq!(counts[AminoAcid::Leu.index()], 6);
        assert_eq!(counts[AminoAcid::Ser.index()], 6);
        assert_eq!(counts[AminoAcid::Ile.index()], 3);
        assert_eq!(counts[AminoAcid::Met.index()], 1);
        assert_eq!(counts[AminoAcid::Stop.index()], 3);
        assert_eq!(counts.iter().sum::<usize>(), N_CODONS);
    }

    #[test]
    fn test_synonyms() {
        let syn = GeneticCode::standard().synonyms();
        let ile: Vec<String> = syn.get_vec(&AminoAcid::Ile).unwrap().iter().map(|c| c.to_string()).collect();
        assert_eq!(ile, vec!["AUA", "AUC", "AUU"]);
        assert_eq!(syn.keys().count(), N_SYMBOLS);
    }

    #[test]
    fn test_from_assignments() {
        let code = GeneticCode::standard();
        let rebuilt = GeneticCode::from_assignments(code.iter()).unwrap();
        assert_eq!(rebuilt, code);

        match GeneticCode::from_assignments(code.iter().skip(1)) {
            Err(Error::IncompleteCode { found }) => assert_eq!(found, 63),
            x => panic!("unexpected result: {:?}", x),
        }

        let dup = code.iter().chain(Some((codon("AAA"), AminoAcid::Lys)));
        match GeneticCode::from_assignments(dup) {
            Err(Error::DuplicateCodon(c)) => assert_eq!(c, codon("AAA")),
            x => panic!("unexpected result: {:?}", x),
        }
    }

    #[test]
    fn test_with_assignment_leaves_original() {
        let code = GeneticCode::standard();
        let block = [codon("UUA"), codon("UUG")];
        let mutant = code.with_assignment(&block, AminoAcid::Stop);
        assert_eq!(mutant.get(&block[0]), AminoAcid::Stop);
        assert_eq!(code.get(&block[0]), AminoAcid::Leu);
    }

    #[test]
    fn test_resolve_labeled() {
        let mut labeled = LabeledCode::from(&GeneticCode::standard());
        let block = [codon("AGG"), codon("AGA")];
        labeled.assign(&block, Label::Synthetic(Synthetic::Z));

        match labeled.resolve(&SyntheticMeanings::new()) {
            Err(Error::UnresolvedSymbol(s)) => assert_eq!(s, Synthetic::Z),
            x => panic!("unexpected result: {:?}", x),
        }

        let mut meanings = SyntheticMeanings::new();
        meanings.set(Synthetic::Z, AminoAcid::Ser);
        let code = labeled.resolve(&meanings).unwrap();
        assert_eq!(code.get(&codon("AGA")), AminoAcid::Ser);
    }

    #[test]
    fn test_is_among_neighbours() {
        let labeled = LabeledCode::from(&GeneticCode::standard());
        let block = [codon("AGG"), codon("AGA")];
        let serine = [codon("AGU"), codon("AGC")];
        // AGU and AGC are the only serine neighbours of the block
        assert!(labeled.is_among_neighbours(&block, AminoAcid::Ser, &[]));
        assert!(!labeled.is_among_neighbours(&block, AminoAcid::Ser, &serine));
        // the block's own codons do not count
        assert!(labeled.is_among_neighbours(&block, AminoAcid::Arg, &[]));
        assert!(!labeled.is_among_neighbours(&block, AminoAcid::Phe, &[]));
    }
}
