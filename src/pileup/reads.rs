use tracing::trace;

use crate::pileup::cell::{BLANK, GAP};
use crate::pileup::column::{expect_row_width, INSERTION_PADDING};
use crate::pileup::{AlignedCell, AlignedRow, ColumnLayout, ColumnType, PileupError};

fn read_symbol(raw: u8) -> u8 {
    if raw == INSERTION_PADDING {
        GAP
    } else {
        raw.to_ascii_uppercase()
    }
}

/// Map one viewer read row onto the column layout.
///
/// With `include_insertions` every column becomes a cell. Otherwise
/// insertion columns are dropped, and a real inserted base sets the
/// insertion flag on the previously emitted cell of the same row. An
/// inserted base seen before any cell was emitted has nothing to attach to
/// and is dropped.
pub fn reconstruct_read(
    layout: &ColumnLayout,
    row: &str,
    include_insertions: bool,
) -> Result<AlignedRow, PileupError> {
    expect_row_width(row, layout.width(), "read row")?;

    let mut cells = AlignedRow::with_capacity(layout.kept_width(include_insertions));
    for (column_idx, (column, raw)) in layout.iter().zip(row.bytes()).enumerate() {
        let symbol = read_symbol(raw);
        match column {
            ColumnType::Match => cells.push(AlignedCell::new(symbol)),
            ColumnType::Insertion if include_insertions => cells.push(AlignedCell::new(symbol)),
            ColumnType::Insertion => {
                if symbol == BLANK || symbol == GAP {
                    continue;
                }
                match cells.last_mut() {
                    Some(cell) => cell.mark_insertion(),
                    None => trace!(column = column_idx, "dropping insertion with no preceding cell"),
                }
            }
        }
    }
    Ok(cells)
}

/// Reconstruct read rows in the order given.
pub fn reconstruct_reads<'a, I>(
    layout: &ColumnLayout,
    rows: I,
    include_insertions: bool,
) -> Result<Vec<AlignedRow>, PileupError>
where
    I: IntoIterator<Item = &'a str>,
{
    rows.into_iter()
        .map(|row| reconstruct_read(layout, row, include_insertions))
        .collect()
}
