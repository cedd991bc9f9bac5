use std::fs;
use std::io;
use std::path::Path;

use crate::code::{AminoAcid, GeneticCode, Label, LabeledCode, Synthetic, SyntheticMeanings};
use crate::error::{Error, Result};
use crate::seq::Codon;

/// A genetic code table reader.
///
/// The table has a header line followed by one `letter \t codon` line per codon.
pub struct Reader<R: io::Read> {
    inner: csv::Reader<R>,
}

impl Reader<fs::File> {
    /// Read from a given file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(fs::File::open(path).map(Reader::new)?)
    }
}

impl<R: io::Read> Reader<R> {
    /// Read from a given reader.
    pub fn new(reader: R) -> Self {
        Reader {
            inner: csv::ReaderBuilder::new()
                .delimiter(b'\t')
                .comment(Some(b'#'))
                .has_headers(true)
                .from_reader(reader),
        }
    }

    /// Iterate over records.
    pub fn records(&mut self) -> Records<R> {
        Records { inner: self.inner.records() }
    }

    /// Read a code whose letters are all amino acids or stop.
    pub fn read_code(&mut self) -> Result<GeneticCode> {
        self.check_header()?;
        let mut assignments = Vec::new();
        for r in self.records() {
            let record = r?;
            match record.label {
                Label::Residue(aa) => assignments.push((record.codon, aa)),
                Label::Synthetic(s) => return Err(Error::UnresolvedSymbol(s)),
            }
        }
        GeneticCode::from_assignments(assignments)
    }

    /// Read a code that may contain synthetic markers.
    pub fn read_labeled(&mut self) -> Result<LabeledCode> {
        self.check_header()?;
        let mut assignments = Vec::new();
        for r in self.records() {
            let record = r?;
            assignments.push((record.codon, record.label));
        }
        LabeledCode::from_assignments(assignments)
    }

    /// Read a standard code, whose split serine block may be written as `X`.
    pub fn read_standard(&mut self) -> Result<GeneticCode> {
        let mut meanings = SyntheticMeanings::new();
        meanings.set(Synthetic::X, AminoAcid::Ser);
        self.read_labeled()?.resolve(&meanings)
    }

    // a header that parses as a record means the header line is missing
    fn check_header(&mut self) -> Result<()> {
        let header = self.inner.headers()?;
        match header.get(1) {
            None => Err(Error::MissingHeader),
            Some(x) if x.parse::<Codon>().is_ok() => Err(Error::MissingHeader),
            Some(_) => Ok(()),
        }
    }
}

pub struct Records<'r, R: 'r + io::Read> {
    inner: csv::StringRecordsIter<'r, R>,
}

impl<'r, R: io::Read> Iterator for Records<'r, R> {
    type Item = Result<Record>;

    /// Get next record.
    /// Stop reading as soon as a problematic record is encountered.
    fn next(&mut self) -> Option<Result<Record>> {
        self.inner.next().map(|res| -> Result<Record> {
            let record = res?;
            Ok(Record {
                label: record
                    .get(0)
                    .ok_or(Error::MissingField("letter"))
                    .and_then(|x| x.parse::<Label>())?,
                codon: record
                    .get(1)
                    .ok_or(Error::MissingField("codon"))
                    .and_then(|x| x.parse::<Codon>())?,
            })
        })
    }
}

/// A code table record.
#[derive(Debug, PartialEq)]
pub struct Record {
    /// Amino acid, stop or synthetic marker
    pub label: Label,
    pub codon: Codon,
}

/// A genetic code table writer.
pub struct Writer<W: io::Write> {
    inner: csv::Writer<W>,
}

impl Writer<fs::File> {
    /// Write to a given file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(fs::File::create(path).map(Writer::new)?)
    }
}

impl<W: io::Write> Writer<W> {
    pub fn new(writer: W) -> Self {
        Writer {
            inner: csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer),
        }
    }

    pub fn write_code(&mut self, code: &GeneticCode) -> Result<()> {
        self.inner.write_record(&["Aa", "Codon"])?;
        for (codon, aa) in code.iter() {
            self.write_row(Label::from(aa), codon)?;
        }
        self.inner.flush()?;
        Ok(())
    }

    pub fn write_labeled(&mut self, code: &LabeledCode) -> Result<()> {
        self.inner.write_record(&["Letter", "Codon"])?;
        for (codon, label) in code.iter() {
            self.write_row(label, codon)?;
        }
        self.inner.flush()?;
        Ok(())
    }

    fn write_row(&mut self, label: Label, codon: Codon) -> Result<()> {
        self.inner.write_record(&[label.to_string(), codon.to_string()])?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::Other, e.to_string())))
    }
}

/// Read a genetic code from a table file.
pub fn read_code<P: AsRef<Path>>(path: P) -> Result<GeneticCode> {
    Reader::from_file(path)?.read_code()
}

/// Read a standard code from a table file; `X` stands for serine.
pub fn read_standard<P: AsRef<Path>>(path: P) -> Result<GeneticCode> {
    Reader::from_file(path)?.read_standard()
}

/// Write a genetic code to a table file.
pub fn write_code<P: AsRef<Path>>(path: P, code: &GeneticCode) -> Result<()> {
    Writer::from_file(path)?.write_code(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARTIAL_TABLE: &'static [u8] = b"Aa\tCodon
L\tUUA
# comment lines are skipped
*\tUAG
X\tAGU
";

    fn standard_table() -> Vec<u8> {
        let mut w = Writer::new(Vec::new());
        w.write_code(&GeneticCode::standard()).unwrap();
        w.into_inner().unwrap()
    }

    #[test]
    fn test_records() {
        let labels = [Label::Residue(AminoAcid::Leu), Label::Residue(AminoAcid::Stop), Label::Synthetic(Synthetic::X)];
        let codons = ["UUA", "UAG", "AGU"];

        let mut reader = Reader::new(PARTIAL_TABLE);
        let mut n = 0;
        for (i, r) in reader.records().enumerate() {
            let record = r.ok().expect("Error reading record");
            assert_eq!(record.label, labels[i]);
            assert_eq!(record.codon, codons[i].parse::<Codon>().unwrap());
            n += 1;
        }
        assert_eq!(n, 3);
    }

    #[test]
    fn test_round_trip() {
        let table = standard_table();
        assert!(table.starts_with(b"Aa\tCodon\nK\tAAA\n"));
        let code = Reader::new(&table[..]).read_code().unwrap();
        assert_eq!(code, GeneticCode::standard());
    }

    #[test]
    fn test_incomplete_table() {
        match Reader::new(PARTIAL_TABLE).read_labeled() {
            Err(Error::IncompleteCode { found }) => assert_eq!(found, 3),
            x => panic!("unexpected result: {:?}", x),
        }
        match Reader::new(PARTIAL_TABLE).read_code() {
            Err(Error::UnresolvedSymbol(s)) => assert_eq!(s, Synthetic::X),
            x => panic!("unexpected result: {:?}", x),
        }
    }

    #[test]
    fn test_standard_with_split_serine() {
        let table = String::from_utf8(standard_table()).unwrap();
        let table = table.replace("S\tAGU", "X\tAGU").replace("S\tAGC", "X\tAGC");

        match Reader::new(table.as_bytes()).read_code() {
            Err(Error::UnresolvedSymbol(s)) => assert_eq!(s, Synthetic::X),
            x => panic!("unexpected result: {:?}", x),
        }
        let code = Reader::new(table.as_bytes()).read_standard().unwrap();
        assert_eq!(code, GeneticCode::standard());

        // other markers still need a meaning
        let table = table.replace("R\tAGG", "Z\tAGG");
        match Reader::new(table.as_bytes()).read_standard() {
            Err(Error::UnresolvedSymbol(s)) => assert_eq!(s, Synthetic::Z),
            x => panic!("unexpected result: {:?}", x),
        }
    }

    #[test]
    fn test_missing_header() {
        let table = standard_table();
        // drop the header line
        let body = &table[b"Aa\tCodon\n".len()..];
        match Reader::new(body).read_code() {
            Err(Error::MissingHeader) => {}
            x => panic!("unexpected result: {:?}", x),
        }
        match Reader::new(&b""[..]).read_code() {
            Err(Error::MissingHeader) => {}
            x => panic!("unexpected result: {:?}", x),
        }
    }

    #[test]
    fn test_duplicate_codon() {
        let mut table = standard_table();
        table.extend_from_slice(b"F\tUUU\n");
        match Reader::new(&table[..]).read_code() {
            Err(Error::DuplicateCodon(c)) => assert_eq!(c.to_string(), "UUU"),
            x => panic!("unexpected result: {:?}", x),
        }
    }

    #[test]
    fn test_invalid_fields() {
        let table = b"Aa\tCodon\nO\tUUU\n";
        match Reader::new(&table[..]).read_code() {
            Err(Error::InvalidSymbol(s)) => assert_eq!(s, "O"),
            x => panic!("unexpected result: {:?}", x),
        }
        let table = b"Aa\tCodon\nF\tUUUU\n";
        match Reader::new(&table[..]).read_code() {
            Err(Error::InvalidCodon(s)) => assert_eq!(s, "UUUU"),
            x => panic!("unexpected result: {:?}", x),
        }
    }
}
