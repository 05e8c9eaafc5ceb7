#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use pileshot::{MemoryReference, PileupBlock};

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

pub fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var("PILESHOT_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    if normalize(&expected) != normalize(actual) {
        panic!(
            "Snapshot mismatch for {:?}. Set PILESHOT_UPDATE_SNAPSHOTS=1 to regenerate.\nExpected:\n{}\nActual:\n{}",
            path,
            expected,
            actual
        );
    }
}

fn normalize(input: &str) -> String {
    input.replace("\r\n", "\n")
}

/// chr1 bases 3..=8 are `ACGTAC`.
pub fn chr1_reference() -> MemoryReference {
    MemoryReference::new().with_contig("chr1", "GGACGTACGTAA")
}

/// Viewer block for chr1:6 extended by 3 (columns 3..=8 plus one
/// insertion column after position 5).
pub fn chr1_block() -> PileupBlock {
    PileupBlock::new(
        [
            "3      ",
            "ACG*TAC",
            "ACG*TAC",
            "ACGATAC",
            "ACG*TAC",
            "  g*tac",
            "ACG*T  ",
            "AC**TAC",
        ]
        .iter()
        .map(|row| row.to_string())
        .collect(),
    )
}
