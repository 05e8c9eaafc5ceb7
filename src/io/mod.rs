//! External collaborators of the reconstruction core: the alignment viewer
//! that produces pileup text blocks and the indexed FASTA that supplies
//! reference bases.

mod fasta;
mod tview;

pub use fasta::{FastaAccessor, MemoryReference};
pub use tview::{
    ensure_bam_index, locate_samtools, parse_viewer_output, PileupBlockSource, TviewSource,
    ViewerError,
};
