//! # Tiktoken Vocabulary IO
//!
//! A "*.tiktoken" file holds one `<base64 bytes> <rank>` record per line.
//! Some producers prefix the file with a `#version` line; the loader skips it.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;

use crate::errors::{VCResult, VocabConvError};
use crate::vocab::Rank;

/// One tiktoken record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TiktokenEntry {
    /// The raw token bytes.
    pub bytes: Vec<u8>,

    /// The output rank.
    pub rank: Rank,
}

impl TiktokenEntry {
    /// Construct a new [`TiktokenEntry`].
    pub fn new<B: Into<Vec<u8>>>(
        bytes: B,
        rank: Rank,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            rank,
        }
    }

    /// Format this entry as a record line, without the trailing newline.
    pub fn to_line(&self) -> String {
        format!("{} {}", BASE64_STANDARD.encode(&self.bytes), self.rank)
    }

    /// Parse a record line.
    ///
    /// ## Arguments
    /// * `line` - the record text, without a line terminator.
    /// * `line_no` - 1-based line number, for error reporting.
    pub fn parse_line(
        line: &str,
        line_no: usize,
    ) -> VCResult<Self> {
        let bad = |message: String| VocabConvError::TiktokenLine {
            line: line_no,
            message,
        };

        let (chunk, rank) = line
            .split_once(' ')
            .ok_or_else(|| bad(format!("expected `<base64> <rank>`, got {line:?}")))?;

        let bytes = BASE64_STANDARD
            .decode(chunk)
            .map_err(|err| bad(format!("invalid base64 {chunk:?}: {err}")))?;

        let rank: Rank = rank
            .parse()
            .map_err(|err| bad(format!("invalid rank {rank:?}: {err}")))?;

        Ok(Self { bytes, rank })
    }
}

/// Stream entries to a writer, one record per line.
///
/// Records are written in the order given.
pub fn write_tiktoken_entries<W, I>(
    writer: W,
    entries: I,
) -> std::io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = TiktokenEntry>,
{
    let mut writer = BufWriter::new(writer);
    let mut count = 0;
    for entry in entries {
        writeln!(writer, "{}", entry.to_line())?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Save entries to a tiktoken file, replacing any existing file.
///
/// ## Arguments
/// * `entries` - the records to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_tiktoken_path<P, I>(
    entries: I,
    path: P,
) -> VCResult<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = TiktokenEntry>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| VocabConvError::io(path, err))?;
    write_tiktoken_entries(file, entries).map_err(|err| VocabConvError::io(path, err))
}

/// Load tiktoken records from a reader.
///
/// A leading `#version` line and blank lines are skipped.
pub fn load_tiktoken_reader<R: Read>(reader: R) -> VCResult<Vec<TiktokenEntry>> {
    let reader = BufReader::new(reader);
    let mut entries = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| VocabConvError::io("<reader>", err))?;
        let line = line.trim_end_matches('\r');

        if idx == 0 && line.starts_with("#version") {
            continue;
        }
        if line.is_empty() {
            continue;
        }

        entries.push(TiktokenEntry::parse_line(line, idx + 1)?);
    }

    Ok(entries)
}

/// Load tiktoken records from a file.
///
/// ## Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_tiktoken_path<P: AsRef<Path>>(path: P) -> VCResult<Vec<TiktokenEntry>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| VocabConvError::io(path, err))?;
    load_tiktoken_reader(file).map_err(|err| match err {
        VocabConvError::Io { source, .. } => VocabConvError::io(path, source),
        other => other,
    })
}
