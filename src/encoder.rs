//! Text → fixed-length id sequence.
//!
//! Reproduces the indexing convention the classifier was trained with:
//!
//! - position 0 is always `start_id`
//! - a known word maps to `rank + index_from`, unless that reaches
//!   `num_words`, in which case it becomes `oov_id`
//! - unknown words map to `oov_id`
//! - words past `max_len` are dropped (post-truncation)
//! - unused tail positions are filled with `pad_id` (post-padding)
//!
//! A mistake in any of these produces a well-formed but meaningless input,
//! so each rule has its own test below.

use candle_core::{Device, Tensor};
use serde::Serialize;

use crate::Result;
use crate::config::EncoderConfig;
use crate::text::{normalize, tokenize};
use crate::vocab::Vocabulary;

/// One encoded text: exactly `max_len` ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sequence {
    ids: Vec<u32>,
    truncated: bool,
}

impl Sequence {
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn into_ids(self) -> Vec<u32> {
        self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True when trailing words were dropped to fit `max_len`.
    ///
    /// Informational only; the ids are identical either way.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Model input tensor `[1, max_len]`, dtype `U32`.
    pub fn to_tensor(&self, device: &Device) -> candle_core::Result<Tensor> {
        Tensor::from_slice(&self.ids, (1, self.ids.len()), device)
    }
}

/// Encode `text` with an explicit vocabulary and configuration.
///
/// Total for every input. `config` is expected to have passed
/// [`EncoderConfig::validate`]; the output length equals `config.max_len`
/// regardless.
pub fn encode(text: &str, vocab: &Vocabulary, config: &EncoderConfig) -> Sequence {
    let normalized = normalize(text);
    let mut tokens = tokenize(&normalized);

    let mut ids = Vec::with_capacity(config.max_len.max(1));
    ids.push(config.start_id);
    while ids.len() < config.max_len {
        match tokens.next() {
            Some(token) => ids.push(token_id_for(token, vocab, config)),
            None => break,
        }
    }
    let truncated = tokens.next().is_some();
    ids.resize(config.max_len, config.pad_id);

    if truncated {
        tracing::trace!(max_len = config.max_len, "input truncated");
    }
    Sequence { ids, truncated }
}

fn token_id_for(token: &str, vocab: &Vocabulary, config: &EncoderConfig) -> u32 {
    match vocab.rank(token) {
        // Widened so a huge rank cannot wrap back under the cutoff.
        Some(rank) => {
            let idx = u64::from(rank) + u64::from(config.index_from);
            if idx >= u64::from(config.num_words) {
                config.oov_id
            } else {
                idx as u32
            }
        }
        None => config.oov_id,
    }
}

/// Validated configuration plus vocabulary, shared read-only by every encode call.
///
/// Holds no interior mutability, so a single instance can be used from any
/// number of threads behind `&` or `Arc`.
#[derive(Debug, Clone)]
pub struct SequenceEncoder {
    config: EncoderConfig,
    vocab: Vocabulary,
}

impl SequenceEncoder {
    pub fn new(config: EncoderConfig, vocab: Vocabulary) -> Result<Self> {
        config.validate()?;

        let reachable = vocab.count_below_cutoff(config.index_from, config.num_words);
        if reachable < vocab.len() {
            tracing::debug!(
                words = vocab.len(),
                reachable,
                num_words = config.num_words,
                "some vocabulary entries fall past the cutoff and will encode as OOV"
            );
        }
        if reachable == 0 {
            tracing::warn!(
                "no vocabulary entry is below the cutoff; every word will encode as OOV"
            );
        }

        Ok(Self { config, vocab })
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn max_len(&self) -> usize {
        self.config.max_len
    }

    /// Id emitted for a single canonical token.
    pub fn token_id(&self, token: &str) -> u32 {
        token_id_for(token, &self.vocab, &self.config)
    }

    pub fn encode(&self, text: &str) -> Sequence {
        encode(text, &self.vocab, &self.config)
    }

    pub fn encode_batch<S: AsRef<str>>(&self, texts: &[S]) -> Vec<Sequence> {
        texts.iter().map(|t| self.encode(t.as_ref())).collect()
    }

    /// Encode a batch straight into a `[N, max_len]` `U32` tensor.
    pub fn to_tensor<S: AsRef<str>>(
        &self,
        texts: &[S],
        device: &Device,
    ) -> candle_core::Result<Tensor> {
        let max_len = self.max_len();
        let mut flat = Vec::with_capacity(texts.len() * max_len);
        for text in texts {
            flat.extend_from_slice(self.encode(text.as_ref()).ids());
        }
        Tensor::from_vec(flat, (texts.len(), max_len), device)
    }
}
