//! # Vocab Converter
//!
//! Drops the first `offset` ranks of a vocabulary and re-bases the rest:
//!
//! ```text
//! {"a": 0, "b": 1, "c": 2, "d": 5}  --offset=2-->  "Yw== 0\nZA== 3\n"
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::DEFAULT_SPECIAL_TOKEN_OFFSET;
use crate::errors::{VCResult, VocabConvError};
use crate::vocab::hf_json::load_hf_vocab_path;
use crate::vocab::tiktoken_io::{TiktokenEntry, load_tiktoken_path, write_tiktoken_entries};
use crate::vocab::{Rank, RankedToken};

/// Options for [`VocabConverter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VocabConverterOptions {
    /// Ranks below this are dropped; the rest are shifted down by it.
    pub offset: Rank,
}

impl Default for VocabConverterOptions {
    fn default() -> Self {
        Self::new(DEFAULT_SPECIAL_TOKEN_OFFSET)
    }
}

impl VocabConverterOptions {
    /// Create options with the given offset.
    pub fn new(offset: Rank) -> Self {
        Self { offset }
    }

    /// Set the offset.
    pub fn with_offset(
        mut self,
        offset: Rank,
    ) -> Self {
        self.offset = offset;
        self
    }
}

/// Counts from a conversion run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Entries in the source vocab.
    pub read: usize,

    /// Entries written.
    pub written: usize,

    /// Entries dropped for ranking below the offset.
    pub skipped: usize,
}

/// Converts a ranked vocab into tiktoken records.
#[derive(Clone, Debug, Default)]
pub struct VocabConverter {
    options: VocabConverterOptions,
}

impl VocabConverter {
    /// Construct a new [`VocabConverter`].
    pub fn new(options: VocabConverterOptions) -> Self {
        Self { options }
    }

    /// Get the options for this converter.
    pub fn options(&self) -> &VocabConverterOptions {
        &self.options
    }

    /// Get the configured offset.
    pub fn offset(&self) -> Rank {
        self.options.offset
    }

    /// Map one entry to its output record, or `None` if it ranks below the offset.
    pub fn convert_entry(
        &self,
        entry: &RankedToken,
    ) -> Option<TiktokenEntry> {
        let rank = entry.rank.checked_sub(self.offset())?;
        Some(TiktokenEntry::new(entry.as_bytes(), rank))
    }

    /// Convert rank-sorted entries into output records.
    pub fn convert_entries(
        &self,
        entries: &[RankedToken],
    ) -> Vec<TiktokenEntry> {
        entries.iter().filter_map(|e| self.convert_entry(e)).collect()
    }

    /// Stream rank-sorted entries to `writer` as tiktoken records.
    ///
    /// ## Arguments
    /// * `entries` - the vocab, sorted by rank.
    /// * `writer` - the record sink.
    pub fn convert_to_writer<W: Write>(
        &self,
        entries: &[RankedToken],
        writer: W,
    ) -> std::io::Result<ConversionStats> {
        let offset = self.offset();
        let records = entries.iter().filter_map(|entry| {
            let record = self.convert_entry(entry);
            if record.is_none() {
                log::debug!(
                    "skipping {:?}: rank {} < offset {offset}",
                    entry.token,
                    entry.rank
                );
            }
            record
        });

        let written = write_tiktoken_entries(writer, records)?;

        Ok(ConversionStats {
            read: entries.len(),
            written,
            skipped: entries.len() - written,
        })
    }

    /// Convert a `tokenizer.json` file into a tiktoken file.
    ///
    /// The output file is only created once the input has been parsed;
    /// it is then written line by line, and may be left truncated if
    /// a write fails.
    ///
    /// ## Arguments
    /// * `input` - the JSON vocab path.
    /// * `output` - the tiktoken path; replaced if it exists.
    pub fn convert_path<I, O>(
        &self,
        input: I,
        output: O,
    ) -> VCResult<ConversionStats>
    where
        I: AsRef<Path>,
        O: AsRef<Path>,
    {
        let output = output.as_ref();
        let entries = load_hf_vocab_path(input)?;

        let file = File::create(output).map_err(|err| VocabConvError::io(output, err))?;
        let stats = self
            .convert_to_writer(&entries, file)
            .map_err(|err| VocabConvError::io(output, err))?;

        log::info!(
            "wrote {} tokens to {output:?} (offset {}, skipped {})",
            stats.written,
            self.offset(),
            stats.skipped
        );
        Ok(stats)
    }

    /// Re-read a written tiktoken file and check it against its source.
    ///
    /// Every record must decode to the bytes of the source token holding
    /// `rank + offset`, and records must appear in source order.
    pub fn verify_path<I, O>(
        &self,
        input: I,
        output: O,
    ) -> VCResult<usize>
    where
        I: AsRef<Path>,
        O: AsRef<Path>,
    {
        let entries = load_hf_vocab_path(input)?;
        let loaded = load_tiktoken_path(output)?;
        self.verify_entries(&entries, &loaded)?;
        Ok(loaded.len())
    }

    /// Check `records` against the expected conversion of `entries`.
    pub fn verify_entries(
        &self,
        entries: &[RankedToken],
        records: &[TiktokenEntry],
    ) -> VCResult<()> {
        let expected = self.convert_entries(entries);
        if expected.len() != records.len() {
            return Err(VocabConvError::Verify {
                message: format!(
                    "expected {} records, found {}",
                    expected.len(),
                    records.len()
                ),
            });
        }

        for (idx, (want, got)) in expected.iter().zip(records).enumerate() {
            if want != got {
                return Err(VocabConvError::Verify {
                    message: format!(
                        "record {idx}: expected {:?}, found {:?}",
                        want.to_line(),
                        got.to_line()
                    ),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::prelude::BASE64_STANDARD;

    use super::*;
    use crate::vocab::hf_json::parse_hf_vocab_str;

    const SAMPLE: &str = r#"{"model": {"vocab": {"a": 0, "b": 1, "c": 2, "d": 5}}}"#;

    fn convert_str(
        json: &str,
        offset: Rank,
    ) -> (ConversionStats, String) {
        let entries = parse_hf_vocab_str(json).unwrap();
        let converter = VocabConverter::new(VocabConverterOptions::new(offset));

        let mut buf: Vec<u8> = Vec::new();
        let stats = converter.convert_to_writer(&entries, &mut buf).unwrap();
        (stats, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_default_offset() {
        assert_eq!(VocabConverter::default().offset(), 5);
        assert_eq!(VocabConverterOptions::default().with_offset(2).offset, 2);
    }

    #[test]
    fn test_offset_drops_and_rebases() {
        let (stats, text) = convert_str(SAMPLE, 2);

        assert_eq!(text, "Yw== 0\nZA== 3\n");
        assert_eq!(
            stats,
            ConversionStats {
                read: 4,
                written: 2,
                skipped: 2,
            }
        );
    }

    #[test]
    fn test_zero_offset_keeps_ranks() {
        let (stats, text) = convert_str(SAMPLE, 0);

        assert_eq!(text, "YQ== 0\nYg== 1\nYw== 2\nZA== 5\n");
        assert_eq!(stats.written, 4);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn test_offset_past_end() {
        let (stats, text) = convert_str(SAMPLE, 100);

        assert_eq!(text, "");
        assert_eq!(stats.written, 0);
        assert_eq!(stats.skipped, 4);
    }

    #[test]
    fn test_contiguous_ranks_round_trip() {
        let json = r#"{"model": {"vocab": {
            "<s>": 0, "</s>": 1, "<unk>": 2, "<pad>": 3, "<mask>": 4,
            "Ġthe": 5, "ing": 6, "日本": 7, "é": 8, " ": 9
        }}}"#;
        let entries = parse_hf_vocab_str(json).unwrap();
        let (stats, text) = convert_str(json, 5);
        assert_eq!(stats.written, 5);

        let mut last: Option<Rank> = None;
        for (idx, line) in text.lines().enumerate() {
            let (chunk, rank) = line.split_once(' ').unwrap();
            let rank: Rank = rank.parse().unwrap();
            assert_eq!(rank, idx as Rank);
            if let Some(last) = last {
                assert!(rank > last);
            }
            last = Some(rank);

            let source = entries.iter().find(|e| e.rank == rank + 5).unwrap();
            assert_eq!(BASE64_STANDARD.decode(chunk).unwrap(), source.as_bytes());
        }
    }

    #[test]
    fn test_convert_path() {
        let dir = tempdir::TempDir::new("convert_test").unwrap();
        let input = dir.path().join("tokenizer.json");
        let output = dir.path().join("vocab.tiktoken");
        std::fs::write(&input, SAMPLE).unwrap();

        // Existing output is replaced.
        std::fs::write(&output, "stale contents\n").unwrap();

        let converter = VocabConverter::new(VocabConverterOptions::new(2));
        let stats = converter.convert_path(&input, &output).unwrap();
        assert_eq!(stats.written, 2);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "Yw== 0\nZA== 3\n");

        assert_eq!(converter.verify_path(&input, &output).unwrap(), 2);

        // A different offset no longer matches.
        let other = VocabConverter::new(VocabConverterOptions::new(1));
        assert!(matches!(
            other.verify_path(&input, &output),
            Err(VocabConvError::Verify { .. })
        ));
    }

    #[test]
    fn test_missing_vocab_creates_no_output() {
        let dir = tempdir::TempDir::new("convert_test").unwrap();
        let input = dir.path().join("tokenizer.json");
        let output = dir.path().join("vocab.tiktoken");
        std::fs::write(&input, r#"{"model": {"merges": []}}"#).unwrap();

        let err = VocabConverter::default()
            .convert_path(&input, &output)
            .unwrap_err();
        assert!(matches!(err, VocabConvError::Schema { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir::TempDir::new("convert_test").unwrap();
        let input = dir.path().join("nope.json");
        let output = dir.path().join("vocab.tiktoken");

        let err = VocabConverter::default()
            .convert_path(&input, &output)
            .unwrap_err();
        assert!(matches!(err, VocabConvError::Io { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_verify_entries_mismatch() {
        let entries = parse_hf_vocab_str(SAMPLE).unwrap();
        let converter = VocabConverter::new(VocabConverterOptions::new(2));

        let good = vec![TiktokenEntry::new("c", 0), TiktokenEntry::new("d", 3)];
        converter.verify_entries(&entries, &good).unwrap();

        let bad_rank = vec![TiktokenEntry::new("c", 0), TiktokenEntry::new("d", 2)];
        assert!(converter.verify_entries(&entries, &bad_rank).is_err());

        let short = vec![TiktokenEntry::new("c", 0)];
        assert!(converter.verify_entries(&entries, &short).is_err());
    }
}
