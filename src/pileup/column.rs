use crate::pileup::PileupError;

/// Ruler character the viewer uses to pad columns holding inserted bases.
pub const INSERTION_PADDING: u8 = b'*';

/// Role of one text column in a pileup block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Column backed by a reference coordinate.
    Match,
    /// Padding column holding bases inserted relative to the reference.
    Insertion,
}

impl ColumnType {
    /// Classify a single ruler character.
    pub fn from_ruler(symbol: u8) -> Self {
        if symbol == INSERTION_PADDING {
            ColumnType::Insertion
        } else {
            ColumnType::Match
        }
    }

    /// Returns `true` for insertion padding columns.
    pub fn is_insertion(self) -> bool {
        matches!(self, ColumnType::Insertion)
    }
}

/// Column classification of a pileup block, derived once from the ruler row
/// and shared by the reference, consensus and every read row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    columns: Vec<ColumnType>,
    matches: usize,
}

impl ColumnLayout {
    /// Classify every column of `ruler`, which must be exactly `width` wide.
    pub fn classify(ruler: &str, width: usize) -> Result<Self, PileupError> {
        expect_row_width(ruler, width, "ruler row")?;
        let columns: Vec<ColumnType> = ruler.bytes().map(ColumnType::from_ruler).collect();
        let matches = columns.iter().filter(|column| !column.is_insertion()).count();
        Ok(Self { columns, matches })
    }

    /// Number of text columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of columns that consume a reference coordinate.
    pub fn match_count(&self) -> usize {
        self.matches
    }

    /// Number of insertion padding columns.
    pub fn insertion_count(&self) -> usize {
        self.columns.len() - self.matches
    }

    /// Length of every reconstructed row under the given insertion policy.
    pub fn kept_width(&self, include_insertions: bool) -> usize {
        if include_insertions {
            self.width()
        } else {
            self.match_count()
        }
    }

    /// Column types in left-to-right order.
    pub fn iter(&self) -> impl Iterator<Item = ColumnType> + '_ {
        self.columns.iter().copied()
    }

    /// Column types as a slice.
    pub fn as_slice(&self) -> &[ColumnType] {
        &self.columns
    }
}

/// Rows are addressed by byte column, so they must be ASCII and exactly `width` long.
pub(crate) fn expect_row_width(row: &str, width: usize, label: &str) -> Result<(), PileupError> {
    if !row.is_ascii() {
        return Err(PileupError::malformed(format!(
            "{label} contains non-ASCII characters"
        )));
    }
    if row.len() != width {
        return Err(PileupError::malformed(format!(
            "{label} is {} columns wide, expected {width}",
            row.len()
        )));
    }
    Ok(())
}
