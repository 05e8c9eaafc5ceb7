//! Python bindings that expose pileup reconstruction via PyO3.
use std::path::PathBuf;

use pyo3::{exceptions::PyValueError, prelude::*, types::PyModule};

use crate::io::{parse_viewer_output, FastaAccessor};
use crate::pileup::{
    AlignedRow, PileupAssembler, PileupConfig, PileupError, ReconstructedPileup, SequenceAccessor,
};

type PyPileup = (Vec<String>, Vec<String>, Vec<Vec<String>>);

fn to_py_err(err: PileupError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Cells as strings; insertion-flagged cells carry an `I` suffix.
fn row_to_strings(row: &AlignedRow) -> Vec<String> {
    row.iter()
        .map(|cell| {
            let mut text = (cell.symbol() as char).to_string();
            if cell.has_insertion() {
                text.push('I');
            }
            text
        })
        .collect()
}

/// Reconstruct captured `samtools tview -d T` lines.
///
/// Args:
///     lines: Viewer output rows (title, ruler, consensus, reads).
///     contig: Contig of the target position.
///     position: 1-based target position.
///     reference: Path to the reference FASTA.
///     extend: Bases added on each side of the position.
///     depth: Maximum read rows (None or 0 keeps all).
///     ref_with_ins: Keep insertion columns.
///
/// Returns:
///     `(reference, consensus, reads)` as lists of cell strings.
#[pyfunction]
#[pyo3(signature = (lines, contig, position, reference, extend=50, depth=Some(100), ref_with_ins=false))]
pub fn reconstruct_block(
    lines: Vec<String>,
    contig: &str,
    position: u64,
    reference: PathBuf,
    extend: i64,
    depth: Option<i64>,
    ref_with_ins: bool,
) -> PyResult<PyPileup> {
    let accessor = FastaAccessor::open(&reference).map_err(to_py_err)?;
    let pileup = reconstruct_lines(&lines, contig, position, extend, depth, ref_with_ins, &accessor)
        .map_err(to_py_err)?;

    Ok((
        row_to_strings(pileup.reference()),
        row_to_strings(pileup.consensus()),
        pileup.reads().iter().map(row_to_strings).collect(),
    ))
}

/// Viewer rows may arrive with trailing blanks trimmed; pad them to the window.
fn reconstruct_lines<A: SequenceAccessor>(
    lines: &[String],
    contig: &str,
    position: u64,
    extend: i64,
    depth: Option<i64>,
    ref_with_ins: bool,
    accessor: &A,
) -> Result<ReconstructedPileup, PileupError> {
    let config = PileupConfig::from_signed(extend, depth)?.with_insertion_columns(ref_with_ins);
    let assembler = PileupAssembler::new(config);
    let window = assembler.window(contig, position)?;
    let block = parse_viewer_output(&lines.join("\n"), window.width());
    assembler.assemble(&window, &block, accessor)
}

/// Create Python module.
#[pymodule]
pub fn pileshot(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(reconstruct_block, m)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryReference;

    #[test]
    fn trimmed_viewer_rows_are_padded() {
        let reference = MemoryReference::new().with_contig("chr1", "ACGTACGT");
        let lines: Vec<String> = ["1", "AC*GT", "AC*GT", "ACGGT", "  *GT"]
            .iter()
            .map(|line| line.to_string())
            .collect();
        let pileup = reconstruct_lines(&lines, "chr1", 3, 2, Some(100), false, &reference).unwrap();
        assert_eq!(pileup.depth(), 2);
        assert_eq!(
            row_to_strings(&pileup.reads()[0]),
            vec!["A", "CI", "G", "T"]
        );
        assert_eq!(pileup.reads()[1].symbols(), "  GT");
    }
}
