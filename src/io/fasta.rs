use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use rust_htslib::faidx;
use tracing::debug;

use crate::pileup::{PileupError, SequenceAccessor};

/// Indexed FASTA reference backed by htslib's `faidx`.
///
/// htslib builds the `.fai` index next to the FASTA when it is missing.
pub struct FastaAccessor {
    path: PathBuf,
    reader: faidx::Reader,
}

impl FastaAccessor {
    /// Open an indexed (or indexable) FASTA file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PileupError> {
        let path = path.as_ref().to_path_buf();
        let reader = faidx::Reader::from_path(&path).map_err(|err| {
            PileupError::config(format!("cannot open reference {}: {err}", path.display()))
        })?;
        debug!(path = %path.display(), "opened reference FASTA");
        Ok(Self { path, reader })
    }

    /// Path of the FASTA file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Debug for FastaAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FastaAccessor")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SequenceAccessor for FastaAccessor {
    fn fetch(&self, contig: &str, start: u64, end: u64) -> Result<Vec<u8>, PileupError> {
        if start == 0 || end < start {
            return Err(PileupError::fetch_failure(contig, start, end, "invalid range"));
        }
        let bases = self
            .reader
            .fetch_seq_string(contig, (start - 1) as usize, (end - 1) as usize)
            .map_err(|err| PileupError::fetch_failure(contig, start, end, err))?;

        let expected = (end - start + 1) as usize;
        if bases.len() != expected {
            return Err(PileupError::fetch_failure(
                contig,
                start,
                end,
                format!("range runs past the contig end ({} of {expected} bases)", bases.len()),
            ));
        }
        Ok(bases.to_ascii_uppercase().into_bytes())
    }
}

/// In-memory reference keyed by contig name.
#[derive(Debug, Clone, Default)]
pub struct MemoryReference {
    contigs: HashMap<String, Vec<u8>>,
}

impl MemoryReference {
    /// Create an empty reference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a contig.
    pub fn with_contig(mut self, name: impl Into<String>, bases: impl AsRef<[u8]>) -> Self {
        self.insert(name, bases);
        self
    }

    /// Add or replace a contig.
    pub fn insert(&mut self, name: impl Into<String>, bases: impl AsRef<[u8]>) {
        self.contigs
            .insert(name.into(), bases.as_ref().to_ascii_uppercase());
    }
}

impl SequenceAccessor for MemoryReference {
    fn fetch(&self, contig: &str, start: u64, end: u64) -> Result<Vec<u8>, PileupError> {
        let bases = self
            .contigs
            .get(contig)
            .ok_or_else(|| PileupError::fetch_failure(contig, start, end, "unknown contig"))?;
        if start == 0 || end < start || end > bases.len() as u64 {
            return Err(PileupError::fetch_failure(
                contig,
                start,
                end,
                format!("range outside contig of length {}", bases.len()),
            ));
        }
        Ok(bases[(start - 1) as usize..end as usize].to_vec())
    }
}
