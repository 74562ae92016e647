//! Encoder configuration.
//!
//! Mirrors `metadata.json` as exported next to the trained classifier:
//!
//! ```json
//! {"num_words": 20000, "max_len": 200, "index_from": 3, "pad_id": 0, "start_id": 1, "oov_id": 2}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Indexing and length rules the classifier was trained with.
///
/// Construct through [`EncoderConfig::load`] or [`EncoderConfig::from_json_str`]
/// to get validation, or call [`EncoderConfig::validate`] yourself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncoderConfig {
    /// Vocabulary size cutoff. Any computed index `>= num_words` becomes `oov_id`.
    pub num_words: u32,
    /// Target sequence length.
    pub max_len: usize,
    /// Offset added to every vocabulary rank.
    pub index_from: u32,
    pub pad_id: u32,
    pub start_id: u32,
    pub oov_id: u32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            num_words: 20000,
            max_len: 200,
            index_from: 3,
            pad_id: 0,
            start_id: 1,
            oov_id: 2,
        }
    }
}

/// `metadata.json` as written, before range checks.
///
/// Read as signed integers so a negative value is reported as an invalid
/// configuration rather than a parse failure.
#[derive(Debug, Deserialize)]
struct RawEncoderConfig {
    num_words: i64,
    max_len: i64,
    index_from: i64,
    pad_id: i64,
    start_id: i64,
    oov_id: i64,
}

impl RawEncoderConfig {
    fn into_config(self) -> Result<EncoderConfig> {
        if self.max_len < 1 {
            return Err(Error::InvalidConfiguration(format!(
                "max_len must be at least 1, got {}",
                self.max_len
            )));
        }
        let max_len = usize::try_from(self.max_len).map_err(|_| {
            Error::InvalidConfiguration(format!("max_len {} is too large", self.max_len))
        })?;
        Ok(EncoderConfig {
            num_words: non_negative("num_words", self.num_words)?,
            max_len,
            index_from: non_negative("index_from", self.index_from)?,
            pad_id: non_negative("pad_id", self.pad_id)?,
            start_id: non_negative("start_id", self.start_id)?,
            oov_id: non_negative("oov_id", self.oov_id)?,
        })
    }
}

fn non_negative(name: &str, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        Error::InvalidConfiguration(format!(
            "{name} must be between 0 and {}, got {value}",
            u32::MAX
        ))
    })
}

impl EncoderConfig {
    /// Parse and validate a `metadata.json` document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawEncoderConfig = serde_json::from_str(json)?;
        let config = raw.into_config()?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a `metadata.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::asset(path, e))?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(
            num_words = config.num_words,
            max_len = config.max_len,
            index_from = config.index_from,
            "loaded encoder config from {}",
            path.display()
        );
        Ok(config)
    }

    /// Check the invariants `encode` relies on.
    pub fn validate(&self) -> Result<()> {
        if self.max_len < 1 {
            return Err(Error::InvalidConfiguration(
                "max_len must be at least 1".into(),
            ));
        }
        if self.num_words <= self.index_from {
            return Err(Error::InvalidConfiguration(format!(
                "num_words ({}) must exceed index_from ({}), \
                 otherwise every token is out of vocabulary",
                self.num_words, self.index_from
            )));
        }
        let sentinels = self.sentinels();
        for (i, (name_a, id_a)) in sentinels.iter().enumerate() {
            for (name_b, id_b) in &sentinels[i + 1..] {
                if id_a == id_b {
                    return Err(Error::InvalidConfiguration(format!(
                        "{name_a} and {name_b} share id {id_a}"
                    )));
                }
            }
        }

        // Legal, but such a sentinel is indistinguishable from a real word.
        for (name, id) in sentinels {
            if id >= self.index_from && id < self.num_words {
                tracing::warn!(
                    sentinel = name,
                    id,
                    index_from = self.index_from,
                    "sentinel id falls inside the vocabulary index range"
                );
            }
        }
        Ok(())
    }

    fn sentinels(&self) -> [(&'static str, u32); 3] {
        [
            ("start_id", self.start_id),
            ("oov_id", self.oov_id),
            ("pad_id", self.pad_id),
        ]
    }
}
