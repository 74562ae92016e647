//! Text canonicalization.
//!
//! Raw review text is reduced to the same character class the vocabulary was
//! built from before any lookup happens.

mod normalize;

pub use normalize::{normalize, tokenize};
