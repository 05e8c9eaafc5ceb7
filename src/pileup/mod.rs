//! Column reconstruction for alignment-viewer pileup blocks.
//!
//! The viewer prints a window of reads as fixed-width text: a title, a
//! ruler row in which `*` marks columns padded for inserted bases, a
//! consensus row and one row per read. Rows are already vertically
//! aligned, so a single column classification of the ruler drives the
//! reconstruction of the reference, consensus and read rows.

mod assembler;
mod cell;
mod column;
mod consensus;
mod error;
mod reads;
mod reference;
mod window;

pub use assembler::{PileupAssembler, PileupBlock, PileupConfig, ReconstructedPileup, RowOrder};
pub use cell::{AlignedCell, AlignedRow, BLANK, GAP};
pub use column::{ColumnLayout, ColumnType, INSERTION_PADDING};
pub use consensus::reconstruct_consensus;
pub use error::PileupError;
pub use reads::{reconstruct_read, reconstruct_reads};
pub use reference::{reconstruct_reference, SequenceAccessor};
pub use window::{cap_depth, checked_depth_cap, checked_extend, Window};
