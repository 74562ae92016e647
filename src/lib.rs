//! Text encoder for an IMDB-trained sentiment classifier.
//!
//! Converts free-form review text into the fixed-length id sequence the
//! classifier was trained on. The numeric model itself lives elsewhere; this
//! crate owns only the part with a silent-failure risk: reproducing the
//! vocabulary indexing convention exactly.
//!
//! ## Pipeline
//!
//! ```text
//! text → normalize → tokenize → vocab rank + index_from ──┐
//!                                  (>= num_words → oov)   │
//!                                                         ↓
//!          [start_id, id₁, id₂, …] truncated/padded to max_len
//!                                                         ↓
//!                                    U32 tensor [1, max_len]
//! ```
//!
//! ## Modules
//!
//! - [`config`]: `metadata.json` record and its invariants
//! - [`vocab`]: `vocab.json` word → rank map
//! - [`text`]: normalizer and tokenizer
//! - [`encoder`]: sequence encoding and the tensor bridge
//! - [`assets`]: one-step loading of both asset files
//!
//! ## Example
//!
//! ```no_run
//! let encoder = sentiment_rs::assets::load_dir("model/")?;
//! let seq = encoder.encode("A genuinely great film!");
//! assert_eq!(seq.len(), encoder.max_len());
//! let input = seq.to_tensor(&candle_core::Device::Cpu)?;
//! # Ok::<(), sentiment_rs::Error>(())
//! ```

pub mod assets;
pub mod config;
pub mod encoder;
pub mod text;
pub mod vocab;

mod error;

pub use config::EncoderConfig;
pub use encoder::{Sequence, SequenceEncoder, encode};
pub use error::{Error, Result};
pub use vocab::Vocabulary;
