use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use resim_shared::result::Stage;
use thiserror::Error;

use crate::xml::XmlError;

/// Failure inside a single stage, before batch context is attached.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("external command is empty")]
    EmptyCommand,
    #[error("failed to launch {tool}: {source}")]
    Spawn { tool: String, source: io::Error },
    #[error("{tool} exited with {status}")]
    ToolFailed { tool: String, status: ExitStatus },
    #[error("{path}: {source}")]
    Document { path: PathBuf, source: XmlError },
    #[error("{path}: missing <{tag}> element")]
    MissingElement { path: PathBuf, tag: String },
    #[error("{path}: <{tag}> is missing the {attr} attribute")]
    MissingAttribute {
        path: PathBuf,
        tag: String,
        attr: String,
    },
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl StageError {
    pub(crate) fn document(path: &std::path::Path, source: XmlError) -> Self {
        Self::Document {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn read(path: &std::path::Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &std::path::Path, source: io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Batch-fatal error carrying enough context to name the failing seed and
/// stage to the operator.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Failure while preparing shared batch state: the stage directories or
    /// the one-shot network patch.
    #[error("batch setup failed: {0}")]
    Setup(StageError),
    #[error("seed {seed}: {stage} failed: {source}")]
    Seed {
        seed: u64,
        stage: Stage,
        source: StageError,
    },
}
