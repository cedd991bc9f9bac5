//! Writers for per-code result tables.

use std::fs;
use std::io;
use std::path::Path;

use crate::code::{GeneticCode, Synthetic};
use crate::error::{Error, Result};
use crate::mutation::MutCounts;
use crate::ostrov::OstrovRecord;
use crate::score::Robustness;
use crate::seq::{Base, Codon};

/// Codon whose amino acid is reported as the occupant of the split serine block.
pub const SPLIT_BLOCK_CODON: Codon = Codon::new(Base::U, Base::C, Base::U);

const MISSING: &str = "-";

fn create<P: AsRef<Path>>(path: P) -> Result<fs::File> {
    Ok(fs::File::create(path)?)
}

fn into_inner<W: io::Write>(w: csv::Writer<W>) -> Result<W> {
    w.into_inner()
        .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::Other, e.to_string())))
}

/// Tab-delimited table of code robustness, one row per seed.
pub struct RobustnessWriter<W: io::Write> {
    inner: csv::Writer<W>,
    split_block: bool,
}

impl RobustnessWriter<fs::File> {
    pub fn from_file<P: AsRef<Path>>(path: P, split_block: bool) -> Result<Self> {
        RobustnessWriter::new(create(path)?, split_block)
    }
}

impl<W: io::Write> RobustnessWriter<W> {
    /// With `split_block`, a column reports the amino acid encoded by UCU.
    pub fn new(writer: W, split_block: bool) -> Result<Self> {
        let mut inner = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);
        if split_block {
            inner.write_record(&["seed", "split_block", "robustness"])?;
        } else {
            inner.write_record(&["seed", "robustness"])?;
        }
        Ok(RobustnessWriter { inner: inner, split_block: split_block })
    }

    pub fn write(&mut self, seed: u64, code: &GeneticCode, robustness: &Robustness) -> Result<()> {
        let mut row = vec![seed.to_string()];
        if self.split_block {
            row.push(code.get(&SPLIT_BLOCK_CODON).to_string());
        }
        row.push(robustness.to_string());
        self.inner.write_record(&row)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        Ok(self.inner.flush()?)
    }

    pub fn into_inner(self) -> Result<W> {
        into_inner(self.inner)
    }
}

/// Comma-delimited matrix of mutation counts, one row per code and one column per amino acid pair.
pub struct MutationMatrixWriter<W: io::Write> {
    inner: csv::Writer<W>,
}

impl MutationMatrixWriter<fs::File> {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        MutationMatrixWriter::new(create(path)?)
    }
}

impl<W: io::Write> MutationMatrixWriter<W> {
    pub fn new(writer: W) -> Result<Self> {
        let mut inner = csv::WriterBuilder::new().delimiter(b',').from_writer(writer);
        inner.write_record(&MutCounts::pairs())?;
        Ok(MutationMatrixWriter { inner: inner })
    }

    pub fn write(&mut self, counts: &MutCounts) -> Result<()> {
        self.inner.write_record(counts.iter().map(|x| x.to_string()))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        Ok(self.inner.flush()?)
    }

    pub fn into_inner(self) -> Result<W> {
        into_inner(self.inner)
    }
}

/// Tab-delimited summary of Ostrov codes.
pub struct OstrovWriter<W: io::Write> {
    inner: csv::Writer<W>,
}

impl OstrovWriter<fs::File> {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        OstrovWriter::new(create(path)?)
    }
}

impl<W: io::Write> OstrovWriter<W> {
    pub fn new(writer: W) -> Result<Self> {
        let mut inner = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);
        inner.write_record(&["Code", "Block1", "Block2", "Block3", "Block4", "X", "Z", "B", "J", "Robustness"])?;
        Ok(OstrovWriter { inner: inner })
    }

    pub fn write(&mut self, record: &OstrovRecord) -> Result<()> {
        let mut row = Vec::with_capacity(10);
        row.push(record.id.clone());
        for label in record.labels.iter() {
            row.push(label.map_or_else(|| MISSING.to_owned(), |x| x.to_string()));
        }
        for &s in Synthetic::iter() {
            row.push(record.meanings.get(s).map_or_else(|| MISSING.to_owned(), |x| x.to_string()));
        }
        row.push(record.robustness.to_string());
        self.inner.write_record(&row)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        Ok(self.inner.flush()?)
    }

    pub fn into_inner(self) -> Result<W> {
        into_inner(self.inner)
    }
}
