//! Record sources for the card pipeline.
//!
//! A record source yields one [`CardRecord`] attempt per input item, in a
//! stable order. Parse failures are per-record values, not fatal errors, so
//! the pipeline can log and skip a bad note while the rest of the run
//! continues.

use std::fs;
use std::path::{Path, PathBuf};

use cardstock_types::CardRecord;
use thiserror::Error;

pub mod markdown;

pub use markdown::parse_record;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no heading found")]
    MissingHeading,
    #[error("heading does not match 'Page <digits> - <title>': '{0}'")]
    HeadingFormat(String),
}

/// One input item: where it came from and what it parsed into.
#[derive(Debug)]
pub struct SourceItem {
    pub path: PathBuf,
    pub record: Result<CardRecord, SourceError>,
}

/// A stream of card records feeding the pipeline.
pub trait RecordSource {
    /// The next item, if any. Returns `None` when the source is exhausted.
    fn next_record(&mut self) -> Option<SourceItem>;

    /// Hint about the total number of items, when known.
    fn size_hint(&self) -> Option<usize> {
        None
    }
}

/// Reads `*.md` files from a directory in lexicographic order.
pub struct MarkdownDirSource {
    files: Vec<PathBuf>,
    index: usize,
}

impl MarkdownDirSource {
    /// Collects the directory's Markdown files up front so the iteration
    /// order is fixed before any parsing starts.
    pub fn open(dir: &Path) -> Result<Self, SourceError> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
            .collect();
        files.sort();
        log::debug!("found {} markdown files in {}", files.len(), dir.display());
        Ok(Self { files, index: 0 })
    }
}

impl RecordSource for MarkdownDirSource {
    fn next_record(&mut self) -> Option<SourceItem> {
        let path = self.files.get(self.index)?.clone();
        self.index += 1;
        let record = fs::read_to_string(&path)
            .map_err(SourceError::from)
            .and_then(|text| parse_record(&text));
        Some(SourceItem { path, record })
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.files.len())
    }
}

/// An in-memory source, mainly for tests and embedding.
pub struct VecRecordSource {
    records: Vec<CardRecord>,
    index: usize,
}

impl VecRecordSource {
    pub fn new(records: Vec<CardRecord>) -> Self {
        Self { records, index: 0 }
    }
}

impl RecordSource for VecRecordSource {
    fn next_record(&mut self) -> Option<SourceItem> {
        let record = self.records.get(self.index)?.clone();
        self.index += 1;
        Some(SourceItem {
            path: PathBuf::from(format!("record-{}", self.index)),
            record: Ok(record),
        })
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.records.len())
    }
}
