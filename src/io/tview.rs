use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::string::FromUtf8Error;

use rust_htslib::bam;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::pileup::{PileupBlock, Window};

/// Errors raised by the alignment-viewer collaborator.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// No `samtools` executable on `PATH`.
    #[error("samtools not found on PATH, please install it first")]
    SamtoolsNotFound,

    /// BAM index is missing and creation was not requested.
    #[error("BAM index of {} required, create it with: samtools index {}", .0.display(), .0.display())]
    MissingIndex(PathBuf),

    /// htslib failed to build the BAM index.
    #[error("failed to index {}: {source}", .path.display())]
    Index {
        /// BAM that was being indexed.
        path: PathBuf,
        /// Underlying htslib failure.
        #[source]
        source: rust_htslib::errors::Error,
    },

    /// The viewer process could not be started.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        /// Command line that was attempted.
        command: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The viewer exited unsuccessfully.
    #[error("`{command}` exited with {status}: {stderr}")]
    Exit {
        /// Command line that failed.
        command: String,
        /// Exit status reported by the process.
        status: ExitStatus,
        /// Captured standard error.
        stderr: String,
    },

    /// Viewer output was not valid UTF-8.
    #[error("viewer output is not valid UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),

    /// I/O failure while reading a saved block.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything able to produce the viewer text block for a window.
pub trait PileupBlockSource {
    /// Fetch the rows for `window`; each row should be `window.width()` wide.
    fn fetch_block(&self, window: &Window) -> Result<PileupBlock, ViewerError>;
}

/// A block captured earlier serves as its own source.
impl PileupBlockSource for PileupBlock {
    fn fetch_block(&self, _window: &Window) -> Result<PileupBlock, ViewerError> {
        Ok(self.clone())
    }
}

/// Find a `samtools` executable on `PATH`.
pub fn locate_samtools() -> Result<PathBuf, ViewerError> {
    let path = env::var_os("PATH").ok_or(ViewerError::SamtoolsNotFound)?;
    env::split_paths(&path)
        .map(|dir| dir.join("samtools"))
        .find(|candidate| candidate.is_file())
        .ok_or(ViewerError::SamtoolsNotFound)
}

/// Make sure `bam` has a BAI index (`x.bai` or `x.bam.bai`), building
/// `x.bam.bai` when it is missing and `create` is set.
pub fn ensure_bam_index(bam: &Path, create: bool) -> Result<PathBuf, ViewerError> {
    let appended = PathBuf::from(format!("{}.bai", bam.display()));
    let candidates = [bam.with_extension("bai"), appended.clone()];
    if let Some(found) = candidates.iter().find(|candidate| candidate.exists()) {
        debug!(index = %found.display(), "found BAM index");
        return Ok(found.clone());
    }
    if !create {
        return Err(ViewerError::MissingIndex(bam.to_path_buf()));
    }

    info!(bam = %bam.display(), "building BAM index");
    bam::index::build(bam, None, bam::index::Type::Bai, 1).map_err(|source| {
        ViewerError::Index {
            path: bam.to_path_buf(),
            source,
        }
    })?;
    Ok(appended)
}

/// Split viewer output into a block, right-padding rows the viewer trimmed.
pub fn parse_viewer_output(text: &str, width: usize) -> PileupBlock {
    let mut padded = 0usize;
    let rows = text
        .lines()
        .map(|line| {
            let mut row = line.trim_end_matches('\r').to_string();
            if row.len() < width {
                padded += 1;
                row.extend(std::iter::repeat(' ').take(width - row.len()));
            }
            row
        })
        .collect();
    if padded > 0 {
        debug!(padded, width, "padded trimmed viewer rows");
    }
    PileupBlock::new(rows)
}

/// Runs `samtools tview` in text mode for a BAM file.
#[derive(Debug, Clone)]
pub struct TviewSource {
    samtools: PathBuf,
    bam: PathBuf,
}

impl TviewSource {
    /// Use the first `samtools` found on `PATH`.
    pub fn new(bam: impl Into<PathBuf>) -> Result<Self, ViewerError> {
        Ok(Self::with_samtools(locate_samtools()?, bam))
    }

    /// Use an explicit `samtools` executable.
    pub fn with_samtools(samtools: impl Into<PathBuf>, bam: impl Into<PathBuf>) -> Self {
        Self {
            samtools: samtools.into(),
            bam: bam.into(),
        }
    }

    /// BAM file being viewed.
    pub fn bam(&self) -> &Path {
        &self.bam
    }

    /// Check (or build) the BAM index the viewer needs.
    pub fn ensure_index(&self, create: bool) -> Result<PathBuf, ViewerError> {
        ensure_bam_index(&self.bam, create)
    }

    fn command_line(&self, window: &Window) -> String {
        format!(
            "COLUMNS={} {} tview -d T -p {} {}",
            window.width(),
            self.samtools.display(),
            window.region(),
            self.bam.display()
        )
    }
}

impl PileupBlockSource for TviewSource {
    fn fetch_block(&self, window: &Window) -> Result<PileupBlock, ViewerError> {
        let command = self.command_line(window);
        debug!(%command, "running viewer");
        let output = Command::new(&self.samtools)
            .env("COLUMNS", window.width().to_string())
            .args(["tview", "-d", "T", "-p"])
            .arg(window.region())
            .arg(&self.bam)
            .output()
            .map_err(|source| ViewerError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ViewerError::Exit {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if !output.stderr.is_empty() {
            warn!(stderr = %String::from_utf8_lossy(&output.stderr).trim(), "viewer wrote to stderr");
        }

        let text = String::from_utf8(output.stdout)?;
        Ok(parse_viewer_output(&text, window.width()))
    }
}
