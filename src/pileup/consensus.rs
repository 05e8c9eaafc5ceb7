use crate::pileup::column::expect_row_width;
use crate::pileup::{AlignedCell, AlignedRow, ColumnLayout, PileupError};

/// Map the viewer's consensus row onto the column layout.
///
/// Characters are copied verbatim. Insertion columns are kept only when
/// `include_insertions` is set; unlike read rows, nothing is merged.
pub fn reconstruct_consensus(
    layout: &ColumnLayout,
    row: &str,
    include_insertions: bool,
) -> Result<AlignedRow, PileupError> {
    expect_row_width(row, layout.width(), "consensus row")?;
    Ok(layout
        .iter()
        .zip(row.bytes())
        .filter(|(column, _)| include_insertions || !column.is_insertion())
        .map(|(_, symbol)| AlignedCell::new(symbol))
        .collect())
}
