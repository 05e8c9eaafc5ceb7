use std::fmt;

/// Marker emitted where a row has no base in a kept column.
pub const GAP: u8 = b'-';
/// Character the viewer uses where a row has no coverage.
pub const BLANK: u8 = b' ';

/// One rendered unit of an aligned row.
///
/// A cell holds a single character (a base, [`GAP`] or [`BLANK`]). When
/// insertion columns are collapsed out of the frame, a read cell may also
/// carry a flag saying the read has inserted bases right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignedCell {
    symbol: u8,
    has_insertion: bool,
}

impl AlignedCell {
    /// Cell holding `symbol` with no insertion flag.
    pub fn new(symbol: u8) -> Self {
        Self {
            symbol,
            has_insertion: false,
        }
    }

    /// Gap cell.
    pub fn gap() -> Self {
        Self::new(GAP)
    }

    /// Blank (uncovered) cell.
    pub fn blank() -> Self {
        Self::new(BLANK)
    }

    /// Same cell with the insertion flag set.
    pub fn with_insertion(mut self) -> Self {
        self.mark_insertion();
        self
    }

    /// Character shown in this cell.
    pub fn symbol(&self) -> u8 {
        self.symbol
    }

    /// Returns `true` for gap cells.
    pub fn is_gap(&self) -> bool {
        self.symbol == GAP
    }

    /// Returns `true` for blank cells.
    pub fn is_blank(&self) -> bool {
        self.symbol == BLANK
    }

    /// Returns `true` when inserted bases follow this cell.
    pub fn has_insertion(&self) -> bool {
        self.has_insertion
    }

    /// Idempotent: a run of inserted bases collapses into one flag.
    pub(crate) fn mark_insertion(&mut self) {
        self.has_insertion = true;
    }
}

impl fmt::Display for AlignedCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol as char)?;
        if self.has_insertion {
            f.write_str("+ins")?;
        }
        Ok(())
    }
}

/// Ordered cells of one reconstructed row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignedRow {
    cells: Vec<AlignedCell>,
}

impl AlignedRow {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, cell: AlignedCell) {
        self.cells.push(cell);
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut AlignedCell> {
        self.cells.last_mut()
    }

    /// Number of output columns.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` when the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at an output column.
    pub fn get(&self, column: usize) -> Option<&AlignedCell> {
        self.cells.get(column)
    }

    /// All cells in column order.
    pub fn cells(&self) -> &[AlignedCell] {
        &self.cells
    }

    /// Iterate cells in column order.
    pub fn iter(&self) -> std::slice::Iter<'_, AlignedCell> {
        self.cells.iter()
    }

    /// Row characters as a string, one per column.
    pub fn symbols(&self) -> String {
        self.cells.iter().map(|cell| cell.symbol as char).collect()
    }

    /// `^` under every insertion-flagged column, blank elsewhere.
    pub fn insertion_marks(&self) -> String {
        self.cells
            .iter()
            .map(|cell| if cell.has_insertion { '^' } else { ' ' })
            .collect()
    }

    /// Returns `true` if any cell carries the insertion flag.
    pub fn has_insertions(&self) -> bool {
        self.cells.iter().any(AlignedCell::has_insertion)
    }
}

impl FromIterator<AlignedCell> for AlignedRow {
    fn from_iter<I: IntoIterator<Item = AlignedCell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AlignedRow {
    type Item = &'a AlignedCell;
    type IntoIter = std::slice::Iter<'a, AlignedCell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
