use tracing::debug;

use crate::pileup::column::expect_row_width;
use crate::pileup::window::{cap_depth, checked_depth_cap, checked_extend};
use crate::pileup::{
    reconstruct_consensus, reconstruct_reads, reconstruct_reference, AlignedRow, ColumnLayout,
    PileupError, SequenceAccessor, Window,
};

/// Order in which reconstructed read rows are handed to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowOrder {
    /// Earliest read emitted by the viewer first.
    #[default]
    AsEmitted,
    /// Latest read emitted by the viewer first.
    Reversed,
}

/// Configuration parameters for pileup reconstruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PileupConfig {
    /// Positions added on each side of the centre position.
    pub extend: u64,
    /// Maximum number of read rows kept; `None` or `Some(0)` keeps all.
    pub depth_cap: Option<usize>,
    /// Keep insertion columns as their own output columns.
    pub include_insertion_columns: bool,
    /// Order of the reconstructed read rows.
    pub row_order: RowOrder,
}

impl Default for PileupConfig {
    fn default() -> Self {
        Self {
            extend: 50,
            depth_cap: Some(100),
            include_insertion_columns: false,
            row_order: RowOrder::AsEmitted,
        }
    }
}

impl PileupConfig {
    /// Construct configuration from signed window and depth values, as
    /// accepted on the command line or from Python.
    pub fn from_signed(extend: i64, depth_cap: Option<i64>) -> Result<Self, PileupError> {
        Ok(Self {
            extend: checked_extend(extend)?,
            depth_cap: checked_depth_cap(depth_cap)?,
            ..Self::default()
        })
    }

    /// Set the window padding.
    pub fn with_extend(mut self, extend: u64) -> Self {
        self.extend = extend;
        self
    }

    /// Set the read depth cap.
    pub fn with_depth_cap(mut self, depth_cap: Option<usize>) -> Self {
        self.depth_cap = depth_cap;
        self
    }

    /// Keep or collapse insertion columns.
    pub fn with_insertion_columns(mut self, include: bool) -> Self {
        self.include_insertion_columns = include;
        self
    }

    /// Set the read row order.
    pub fn with_row_order(mut self, row_order: RowOrder) -> Self {
        self.row_order = row_order;
        self
    }
}

/// Raw fixed-width text block emitted by the alignment viewer.
///
/// Layout: row 0 is a title, row 1 the ruler (`*` marks insertion padding),
/// row 2 the consensus, rows 3.. one row per read in viewer order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PileupBlock {
    rows: Vec<String>,
}

impl PileupBlock {
    /// Index of the title row.
    pub const TITLE_ROW: usize = 0;
    /// Index of the ruler row.
    pub const RULER_ROW: usize = 1;
    /// Index of the consensus row.
    pub const CONSENSUS_ROW: usize = 2;
    /// Index of the first read row.
    pub const FIRST_READ_ROW: usize = 3;

    /// Wrap already split rows.
    pub fn new(rows: Vec<String>) -> Self {
        Self { rows }
    }

    /// Split viewer output into rows.
    pub fn from_text(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(|line| line.trim_end_matches('\r').to_string())
                .collect(),
        )
    }

    /// All rows including title, ruler and consensus.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Total number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the block has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Title row, if present.
    pub fn title(&self) -> Option<&str> {
        self.rows.get(Self::TITLE_ROW).map(String::as_str)
    }

    /// Ruler row, if present.
    pub fn ruler(&self) -> Option<&str> {
        self.rows.get(Self::RULER_ROW).map(String::as_str)
    }

    /// Consensus row, if present.
    pub fn consensus(&self) -> Option<&str> {
        self.rows.get(Self::CONSENSUS_ROW).map(String::as_str)
    }

    /// Read rows in viewer order.
    pub fn reads(&self) -> &[String] {
        self.rows.get(Self::FIRST_READ_ROW..).unwrap_or(&[])
    }
}

/// Column-aligned reference, consensus and read rows for one window.
///
/// Every row has the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconstructedPileup {
    window: Window,
    reference: AlignedRow,
    consensus: AlignedRow,
    reads: Vec<AlignedRow>,
}

impl ReconstructedPileup {
    /// Window the pileup was reconstructed for.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Aligned reference row.
    pub fn reference(&self) -> &AlignedRow {
        &self.reference
    }

    /// Aligned consensus row.
    pub fn consensus(&self) -> &AlignedRow {
        &self.consensus
    }

    /// Aligned read rows in the configured order.
    pub fn reads(&self) -> &[AlignedRow] {
        &self.reads
    }

    /// Number of output columns shared by every row.
    pub fn width(&self) -> usize {
        self.reference.len()
    }

    /// Number of read rows.
    pub fn depth(&self) -> usize {
        self.reads.len()
    }

    /// Output column of the window's centre position.
    ///
    /// Gap cells in the reference are included insertion columns and do
    /// not count as positions. `None` when the centre has no column.
    pub fn focus_column(&self) -> Option<usize> {
        let offset = usize::try_from(self.window.extend()).ok()?;
        self.reference
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_gap())
            .nth(offset)
            .map(|(column, _)| column)
    }

    /// Fixed-width text view: one labelled line per row, followed by a
    /// `^` marker line for rows with insertion-flagged cells.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        push_row(&mut out, "REF", &self.reference);
        push_row(&mut out, "CON", &self.consensus);
        for (idx, read) in self.reads.iter().enumerate() {
            push_row(&mut out, &(idx + 1).to_string(), read);
        }
        out
    }
}

fn push_row(out: &mut String, label: &str, row: &AlignedRow) {
    out.push_str(&format!("{label:>5} {}\n", row.symbols()));
    if row.has_insertions() {
        out.push_str(&format!("{:>5} {}\n", "", row.insertion_marks().trim_end()));
    }
}

/// Validates pileup blocks and turns them into [`ReconstructedPileup`]s.
#[derive(Debug, Clone, Default)]
pub struct PileupAssembler {
    config: PileupConfig,
}

impl PileupAssembler {
    /// Create an assembler with the given configuration.
    pub fn new(config: PileupConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &PileupConfig {
        &self.config
    }

    /// Window around `center` padded by the configured extend.
    pub fn window(&self, contig: &str, center: u64) -> Result<Window, PileupError> {
        Window::new(contig, center, self.config.extend)
    }

    /// Reconstruct `block`, fetched for `window`, into aligned rows.
    ///
    /// Any violation of the block layout aborts the whole reconstruction.
    pub fn assemble<A: SequenceAccessor + ?Sized>(
        &self,
        window: &Window,
        block: &PileupBlock,
        accessor: &A,
    ) -> Result<ReconstructedPileup, PileupError> {
        if block.len() < PileupBlock::FIRST_READ_ROW {
            return Err(PileupError::malformed(format!(
                "pileup block has {} rows, expected at least title, ruler and consensus",
                block.len()
            )));
        }
        let width = window.width();
        for (idx, row) in block.rows().iter().enumerate() {
            expect_row_width(row, width, &format!("row {idx}"))?;
        }

        let (ruler, consensus) = match (block.ruler(), block.consensus()) {
            (Some(ruler), Some(consensus)) => (ruler, consensus),
            _ => return Err(PileupError::malformed("pileup block is missing ruler or consensus")),
        };

        let read_rows = cap_depth(block.reads(), self.config.depth_cap);
        let layout = ColumnLayout::classify(ruler, width)?;
        let include = self.config.include_insertion_columns;
        debug!(
            region = %window.region(),
            width,
            insertion_columns = layout.insertion_count(),
            reads = read_rows.len(),
            dropped_reads = block.reads().len() - read_rows.len(),
            "reconstructing pileup block"
        );

        let reference = reconstruct_reference(&layout, window, accessor, include)?;
        let consensus = reconstruct_consensus(&layout, consensus, include)?;
        let mut reads = reconstruct_reads(&layout, read_rows.iter().map(String::as_str), include)?;
        if self.config.row_order == RowOrder::Reversed {
            reads.reverse();
        }

        Ok(ReconstructedPileup {
            window: window.clone(),
            reference,
            consensus,
            reads,
        })
    }
}
