//! End-to-end snapshot: viewer block, reference bases, reconstruction and
//! rendering for one position.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::io::{PileupBlockSource, ViewerError};
use crate::pileup::{PileupAssembler, PileupConfig, PileupError, ReconstructedPileup, SequenceAccessor};
use crate::render::{write_svg, RenderError, RenderOptions};

/// Errors that can occur while producing a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Reconstruction failed.
    #[error(transparent)]
    Pileup(#[from] PileupError),

    /// The viewer could not produce a block.
    #[error(transparent)]
    Viewer(#[from] ViewerError),

    /// Drawing or writing the image failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Couples a block source and a reference accessor with an assembler.
#[derive(Debug)]
pub struct PileupSnapshot<S, A> {
    source: S,
    accessor: A,
    assembler: PileupAssembler,
}

impl<S: PileupBlockSource, A: SequenceAccessor> PileupSnapshot<S, A> {
    /// Create a snapshot pipeline.
    pub fn new(source: S, accessor: A, config: PileupConfig) -> Self {
        Self {
            source,
            accessor,
            assembler: PileupAssembler::new(config),
        }
    }

    /// Assembler used for reconstruction.
    pub fn assembler(&self) -> &PileupAssembler {
        &self.assembler
    }

    /// Reconstruct the pileup around `contig:position`.
    pub fn reconstruct(
        &self,
        contig: &str,
        position: u64,
    ) -> Result<ReconstructedPileup, SnapshotError> {
        let window = self.assembler.window(contig, position)?;
        info!(region = %window.region(), width = window.width(), "fetching pileup block");
        let block = self.source.fetch_block(&window)?;
        let pileup = self.assembler.assemble(&window, &block, &self.accessor)?;
        info!(
            columns = pileup.width(),
            reads = pileup.depth(),
            "reconstructed pileup"
        );
        Ok(pileup)
    }

    /// Reconstruct around `contig:position` and write the image to `path`.
    pub fn render_to<P: AsRef<Path>>(
        &self,
        contig: &str,
        position: u64,
        options: &RenderOptions,
        path: P,
    ) -> Result<ReconstructedPileup, SnapshotError> {
        let pileup = self.reconstruct(contig, position)?;
        write_svg(&pileup, options, path)?;
        Ok(pileup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryReference;
    use crate::pileup::{PileupBlock, Window};

    struct FailingSource;

    impl PileupBlockSource for FailingSource {
        fn fetch_block(&self, _window: &Window) -> Result<PileupBlock, ViewerError> {
            Err(ViewerError::SamtoolsNotFound)
        }
    }

    #[test]
    fn reconstructs_from_saved_block() {
        let block = PileupBlock::from_text("1    \nAC*GT\nAC*GT\nACGGT\n");
        let reference = MemoryReference::new().with_contig("chr1", "ACGTACGT");
        let snapshot = PileupSnapshot::new(block, reference, PileupConfig::default().with_extend(2));
        let pileup = snapshot.reconstruct("chr1", 3).unwrap();
        assert_eq!(pileup.reference().symbols(), "ACGT");
        assert_eq!(pileup.reads()[0].insertion_marks(), " ^  ");
    }

    #[test]
    fn viewer_failures_propagate() {
        let reference = MemoryReference::new().with_contig("chr1", "ACGT");
        let snapshot = PileupSnapshot::new(FailingSource, reference, PileupConfig::default().with_extend(1));
        assert!(matches!(
            snapshot.reconstruct("chr1", 2),
            Err(SnapshotError::Viewer(ViewerError::SamtoolsNotFound))
        ));
    }

    #[test]
    fn window_errors_abort_before_fetching() {
        let reference = MemoryReference::new();
        let snapshot = PileupSnapshot::new(FailingSource, reference, PileupConfig::default());
        assert!(matches!(
            snapshot.reconstruct("chr1", 10),
            Err(SnapshotError::Pileup(PileupError::Config(_)))
        ));
    }
}
