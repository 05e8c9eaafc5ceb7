use tracing::trace;

use crate::pileup::{AlignedCell, AlignedRow, ColumnLayout, ColumnType, PileupError, Window};

/// Source of linear reference bases.
pub trait SequenceAccessor {
    /// Uppercase bases for the 1-based inclusive range `[start, end]` of
    /// `contig`; the result is `end - start + 1` bases long.
    fn fetch(&self, contig: &str, start: u64, end: u64) -> Result<Vec<u8>, PileupError>;
}

impl<T: SequenceAccessor + ?Sized> SequenceAccessor for &T {
    fn fetch(&self, contig: &str, start: u64, end: u64) -> Result<Vec<u8>, PileupError> {
        (**self).fetch(contig, start, end)
    }
}

impl<T: SequenceAccessor + ?Sized> SequenceAccessor for Box<T> {
    fn fetch(&self, contig: &str, start: u64, end: u64) -> Result<Vec<u8>, PileupError> {
        (**self).fetch(contig, start, end)
    }
}

/// Build the aligned reference row.
///
/// Only match columns consume reference coordinates, so exactly
/// `layout.match_count()` bases are fetched starting at the window start.
/// Insertion columns become gaps when `include_insertions` is set and are
/// dropped otherwise.
pub fn reconstruct_reference<A: SequenceAccessor + ?Sized>(
    layout: &ColumnLayout,
    window: &Window,
    accessor: &A,
    include_insertions: bool,
) -> Result<AlignedRow, PileupError> {
    let matches = layout.match_count();
    let bases = if matches == 0 {
        Vec::new()
    } else {
        let end = window.start() + matches as u64 - 1;
        trace!(contig = window.contig(), start = window.start(), end, "fetching reference bases");
        accessor.fetch(window.contig(), window.start(), end)?
    };

    let mut fetched = bases.iter();
    let mut row = AlignedRow::with_capacity(layout.kept_width(include_insertions));
    for column in layout.iter() {
        match column {
            ColumnType::Match => {
                let base = fetched.next().ok_or_else(|| {
                    PileupError::malformed(format!(
                        "accessor returned {} bases for {matches} match columns",
                        bases.len()
                    ))
                })?;
                row.push(AlignedCell::new(base.to_ascii_uppercase()));
            }
            ColumnType::Insertion if include_insertions => row.push(AlignedCell::gap()),
            ColumnType::Insertion => {}
        }
    }

    if fetched.next().is_some() {
        return Err(PileupError::malformed(format!(
            "accessor returned {} bases for {matches} match columns",
            bases.len()
        )));
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryReference;

    struct FixedBases(&'static [u8]);

    impl SequenceAccessor for FixedBases {
        fn fetch(&self, _contig: &str, _start: u64, _end: u64) -> Result<Vec<u8>, PileupError> {
            Ok(self.0.to_vec())
        }
    }

    struct Unreachable;

    impl SequenceAccessor for Unreachable {
        fn fetch(&self, contig: &str, start: u64, end: u64) -> Result<Vec<u8>, PileupError> {
            Err(PileupError::fetch_failure(contig, start, end, "should not be called"))
        }
    }

    fn window() -> Window {
        Window::new("chr1", 3, 2).unwrap()
    }

    #[test]
    fn insertion_columns_become_gaps_when_included() {
        let layout = ColumnLayout::classify("MM*MM", 5).unwrap();
        let reference = MemoryReference::new().with_contig("chr1", "ACGTTTT");
        let row = reconstruct_reference(&layout, &window(), &reference, true).unwrap();
        assert_eq!(row.symbols(), "AC-GT");
    }

    #[test]
    fn insertion_columns_are_dropped_when_excluded() {
        let layout = ColumnLayout::classify("MM*MM", 5).unwrap();
        let reference = MemoryReference::new().with_contig("chr1", "acgtttt");
        let row = reconstruct_reference(&layout, &window(), &reference, false).unwrap();
        assert_eq!(row.symbols(), "ACGT");
    }

    #[test]
    fn all_insertion_layout_fetches_nothing() {
        let layout = ColumnLayout::classify("****", 4).unwrap();
        let window = Window::new("chr1", 10, 1).unwrap();
        let included = reconstruct_reference(&layout, &window, &Unreachable, true).unwrap();
        assert_eq!(included.symbols(), "----");
        let excluded = reconstruct_reference(&layout, &window, &Unreachable, false).unwrap();
        assert!(excluded.is_empty());
    }

    #[test]
    fn short_fetch_is_malformed() {
        let layout = ColumnLayout::classify("MM*MM", 5).unwrap();
        let err = reconstruct_reference(&layout, &window(), &FixedBases(b"ACG"), true).unwrap_err();
        assert!(matches!(err, PileupError::MalformedInput(_)));
    }

    #[test]
    fn long_fetch_is_malformed() {
        let layout = ColumnLayout::classify("MM*MM", 5).unwrap();
        let err =
            reconstruct_reference(&layout, &window(), &FixedBases(b"ACGTA"), true).unwrap_err();
        assert!(matches!(err, PileupError::MalformedInput(_)));
    }

    #[test]
    fn fetch_failures_propagate() {
        let layout = ColumnLayout::classify("MMMMM", 5).unwrap();
        let err = reconstruct_reference(&layout, &window(), &Unreachable, false).unwrap_err();
        assert!(matches!(err, PileupError::FetchFailure { .. }));
    }
}
