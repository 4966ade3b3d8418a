//! # Vocabulary Types and IO
//!
//! ## Loading A Vocab
//!
//! ```rust,no_run
//! use vocabconv::vocab::{RankedToken, hf_json::load_hf_vocab_path};
//!
//! fn example() -> vocabconv::VCResult<()> {
//!     let vocab: Vec<RankedToken> = load_hf_vocab_path("tokenizer.json")?;
//!
//!     for entry in vocab.iter().take(10) {
//!         println!("{} {:?}", entry.rank, entry.as_bytes());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod hf_json;
pub mod tiktoken_io;

/// The integer rank type used throughout the converter.
pub type Rank = u64;

/// A token string paired with its rank in the source vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RankedToken {
    /// The rank; declared first so the derived ordering is `(rank, token)`.
    pub rank: Rank,

    /// The token text.
    pub token: String,
}

impl RankedToken {
    /// Construct a new [`RankedToken`].
    pub fn new<S: Into<String>>(
        token: S,
        rank: Rank,
    ) -> Self {
        Self {
            rank,
            token: token.into(),
        }
    }

    /// The UTF-8 bytes of the token.
    pub fn as_bytes(&self) -> &[u8] {
        self.token.as_bytes()
    }
}

/// Sort entries by `(rank, token)`.
///
/// Ranks are expected to be unique; the token tiebreak only keeps
/// the order stable when they are not.
pub fn sort_ranked_tokens(entries: &mut [RankedToken]) {
    entries.sort_unstable();
}

/// Find ranks which appear more than once in rank-sorted `entries`.
pub fn duplicate_ranks(entries: &[RankedToken]) -> Vec<Rank> {
    let mut dups: Vec<Rank> = entries
        .windows(2)
        .filter(|w| w[0].rank == w[1].rank)
        .map(|w| w[0].rank)
        .collect();
    dups.dedup();
    dups
}
