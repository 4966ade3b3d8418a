//! # vocabconv
//!
//! Converts a Hugging Face style `tokenizer.json` vocabulary
//! (`model.vocab`: `{ token -> rank }`) into a "*.tiktoken" rank file:
//! one `<base64 token> <rank - offset>` line per token, in rank order.
//!
//! The leading `offset` ranks are usually special tokens; they are dropped
//! from the output and the remaining ranks are re-based to start at zero.
//!
//! ## Converting A File
//!
//! ```rust,no_run
//! use vocabconv::convert::{VocabConverter, VocabConverterOptions};
//!
//! fn example() -> vocabconv::VCResult<()> {
//!     let converter = VocabConverter::new(VocabConverterOptions::default().with_offset(5));
//!
//!     let stats = converter.convert_path("tokenizer.json", "vocab.tiktoken")?;
//!     println!("wrote {} tokens", stats.written);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod convert;
pub mod errors;
pub mod vocab;

#[doc(inline)]
pub use convert::{ConversionStats, VocabConverter, VocabConverterOptions};
#[doc(inline)]
pub use errors::{VCResult, VocabConvError};
