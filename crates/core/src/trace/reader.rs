//! Streaming commit-trace reader.
//!
//! Rows are consumed in file order without sorting. The reader is lenient about
//! row lengths (rows may carry more or fewer fields than the header) and only
//! parses the `commit_tick` field of the first and last rows.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::common::constants::COMMIT_TICK_COLUMN;
use crate::common::error::TraceError;

/// Summary of a commit trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceSummary {
    /// Number of data rows (committed instructions).
    pub num_insts: u64,
    /// `commit_tick` of the first row.
    pub first_commit_tick: i64,
    /// `commit_tick` of the last row.
    pub last_commit_tick: i64,
}

impl TraceSummary {
    /// Ticks elapsed between the first and the last commit.
    ///
    /// Negative when the trace is not in commit order.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::TickOverflow`] if the span does not fit in an `i64`.
    pub fn total_ticks(&self) -> Result<i64, TraceError> {
        self.last_commit_tick
            .checked_sub(self.first_commit_tick)
            .ok_or(TraceError::TickOverflow {
                first: self.first_commit_tick,
                last: self.last_commit_tick,
            })
    }
}

/// Reads the commit trace stored at `path`.
///
/// The existence check happens before any CSV parsing.
///
/// # Errors
///
/// Returns [`TraceError::NotFound`] if `path` is not a regular file, and any
/// error of [`read_commit_trace`] otherwise.
pub fn scan_commit_trace(path: impl AsRef<Path>) -> Result<TraceSummary, TraceError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(TraceError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    let summary = read_commit_trace(file)?;
    tracing::debug!(
        path = %path.display(),
        rows = summary.num_insts,
        "scanned commit trace"
    );
    Ok(summary)
}

/// Reads a commit trace from any reader.
///
/// # Errors
///
/// - [`TraceError::MissingColumn`] when the header lacks `commit_tick` or there
///   are no data rows.
/// - [`TraceError::MissingField`] / [`TraceError::InvalidTick`] when the first or
///   last row has no usable `commit_tick`.
/// - [`TraceError::Csv`] for malformed CSV.
pub fn read_commit_trace<R: Read>(reader: R) -> Result<TraceSummary, TraceError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);

    let column = rdr
        .headers()?
        .iter()
        .position(|name| name == COMMIT_TICK_COLUMN)
        .ok_or(TraceError::MissingColumn)?;

    let mut record = StringRecord::new();
    let mut first: Option<StringRecord> = None;
    let mut last = StringRecord::new();
    let mut num_insts: u64 = 0;

    while rdr.read_record(&mut record)? {
        num_insts += 1;
        if first.is_none() {
            first = Some(record.clone());
        }
        std::mem::swap(&mut last, &mut record);
    }

    let first = first.ok_or(TraceError::MissingColumn)?;
    Ok(TraceSummary {
        num_insts,
        first_commit_tick: parse_tick(&first, column, 1)?,
        last_commit_tick: parse_tick(&last, column, num_insts)?,
    })
}

fn parse_tick(record: &StringRecord, column: usize, row: u64) -> Result<i64, TraceError> {
    let raw = record
        .get(column)
        .ok_or(TraceError::MissingField { row })?;
    raw.trim().parse().map_err(|_| TraceError::InvalidTick {
        row,
        value: raw.to_string(),
    })
}
