//! # Read pileup snapshots from alignment-viewer text
//!
//! This library turns the fixed-width text an alignment viewer prints for a
//! genomic window (`samtools tview -d T`) back into column-aligned rows and
//! draws them as an image.
//!
//! ## Pipeline
//!
//! 1. **Window**: pad the target position by `extend` on both sides
//! 2. **Block**: capture the viewer rows (title, ruler, consensus, reads)
//! 3. **Columns**: classify each column of the ruler as match or insertion
//! 4. **Rows**: rebuild reference, consensus and reads on that layout,
//!    keeping insertion columns or collapsing them into per-read flags
//! 5. **Render**: scatter the base glyphs into an SVG
//!
//! ## Usage Example
//!
//! ```
//! use pileshot::io::MemoryReference;
//! use pileshot::pileup::{PileupAssembler, PileupBlock, PileupConfig, Window};
//!
//! let reference = MemoryReference::new().with_contig("chr1", "ACGTACGT");
//! let block = PileupBlock::from_text("1    \nAC*GT\nAC*GT\nACGGT\n");
//! let window = Window::new("chr1", 3, 2)?;
//!
//! let pileup = PileupAssembler::new(PileupConfig::default())
//!     .assemble(&window, &block, &reference)?;
//! assert_eq!(pileup.reference().symbols(), "ACGT");
//! assert!(pileup.reads()[0].get(1).unwrap().has_insertion());
//! # Ok::<(), pileshot::pileup::PileupError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod io; // Viewer and reference collaborators
pub mod pileup; // Column reconstruction core
pub mod render; // Glyph styles and SVG output
pub mod snapshot; // End-to-end pipeline
pub mod variant; // Target parsing
/// Python bindings for the reconstruction core.
#[cfg(feature = "python-bindings")]
pub mod python_bindings;

// Re-exports for convenience
pub use io::{FastaAccessor, MemoryReference, PileupBlockSource, TviewSource, ViewerError};
pub use pileup::{
    AlignedCell, AlignedRow, ColumnLayout, ColumnType, PileupAssembler, PileupBlock,
    PileupConfig, PileupError, ReconstructedPileup, RowOrder, SequenceAccessor, Window,
};
pub use render::{render_svg, write_svg, RenderError, RenderOptions};
pub use snapshot::{PileupSnapshot, SnapshotError};
pub use variant::{Snv, VariantParseError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_cli_defaults() {
        let config = PileupConfig::default();
        assert_eq!(config.extend, 50);
        assert_eq!(config.depth_cap, Some(100));
        assert!(!config.include_insertion_columns);
        assert_eq!(config.row_order, RowOrder::AsEmitted);
        assert_eq!(RenderOptions::default().dpi, 200);
    }

    #[test]
    fn signed_config_rejects_negatives() {
        assert!(matches!(
            PileupConfig::from_signed(-1, Some(10)),
            Err(PileupError::Config(_))
        ));
        assert!(matches!(
            PileupConfig::from_signed(10, Some(-1)),
            Err(PileupError::Config(_))
        ));
        let config = PileupConfig::from_signed(10, Some(0)).unwrap();
        assert_eq!(config.extend, 10);
        assert_eq!(config.depth_cap, Some(0));
    }
}
