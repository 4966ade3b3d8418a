//! # Hugging Face `tokenizer.json` Vocabulary Loading
//!
//! Only the `model.vocab` table is read; every other key is ignored.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;

use crate::errors::{VCResult, VocabConvError};
use crate::vocab::{Rank, RankedToken, duplicate_ranks, sort_ranked_tokens};

/// The subset of a `tokenizer.json` document we require.
#[derive(Debug, Deserialize)]
pub struct TokenizerJson {
    /// The tokenizer model section.
    pub model: TokenizerModel,
}

/// The `model` section of a `tokenizer.json` document.
#[derive(Debug, Deserialize)]
pub struct TokenizerModel {
    /// `{ token -> rank }`.
    pub vocab: HashMap<String, Rank>,
}

impl TokenizerJson {
    /// Consume the document, returning the vocab sorted by rank.
    pub fn into_ranked_tokens(self) -> Vec<RankedToken> {
        let mut entries: Vec<RankedToken> = self
            .model
            .vocab
            .into_iter()
            .map(|(token, rank)| RankedToken { rank, token })
            .collect();
        sort_ranked_tokens(&mut entries);

        let dups = duplicate_ranks(&entries);
        if !dups.is_empty() {
            log::warn!(
                "vocab has {} duplicated rank(s), first: {}",
                dups.len(),
                dups[0]
            );
        }

        entries
    }
}

/// Parse a `tokenizer.json` document held in memory.
pub fn parse_hf_vocab_str(json: &str) -> VCResult<Vec<RankedToken>> {
    let doc: TokenizerJson = serde_json::from_str(json).map_err(VocabConvError::from_json)?;
    Ok(doc.into_ranked_tokens())
}

/// Load a `tokenizer.json` document from a reader.
pub fn load_hf_vocab_reader<R: Read>(reader: R) -> VCResult<Vec<RankedToken>> {
    let doc: TokenizerJson =
        serde_json::from_reader(BufReader::new(reader)).map_err(VocabConvError::from_json)?;
    Ok(doc.into_ranked_tokens())
}

/// Load a `tokenizer.json` document from a file.
///
/// ## Arguments
/// * `path` - the path to the JSON file.
///
/// ## Returns
/// The vocab entries, sorted by `(rank, token)`.
pub fn load_hf_vocab_path<P: AsRef<Path>>(path: P) -> VCResult<Vec<RankedToken>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| VocabConvError::io(path, err))?;

    let entries = load_hf_vocab_reader(file)?;
    log::info!("loaded {} vocab entries from {path:?}", entries.len());
    Ok(entries)
}
