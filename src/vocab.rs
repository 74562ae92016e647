//! Word vocabulary.
//!
//! `vocab.json` maps each canonical word to its frequency rank in the
//! training corpus. The map is read-only after loading.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use crate::{Error, Result};

/// Validated token → rank map. Ranks are unique and non-negative.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    ranks: HashMap<String, u32>,
}

impl Vocabulary {
    /// Build from `(token, rank)` pairs, rejecting negative, oversized or
    /// duplicate ranks and tokens listed twice.
    pub fn from_ranks<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let entries = entries.into_iter();
        let mut ranks = HashMap::with_capacity(entries.size_hint().0);
        let mut owners: HashMap<u32, String> = HashMap::with_capacity(entries.size_hint().0);

        for (token, rank) in entries {
            let token = token.into();
            let rank = u32::try_from(rank).map_err(|_| {
                if rank < 0 {
                    Error::MalformedVocabulary(format!("token {token:?} has negative rank {rank}"))
                } else {
                    Error::MalformedVocabulary(format!(
                        "token {token:?} has rank {rank}, larger than {}",
                        u32::MAX
                    ))
                }
            })?;
            if ranks.contains_key(&token) {
                return Err(Error::MalformedVocabulary(format!(
                    "token {token:?} listed twice"
                )));
            }
            if let Some(other) = owners.get(&rank) {
                return Err(Error::MalformedVocabulary(format!(
                    "rank {rank} is shared by {other:?} and {token:?}"
                )));
            }
            owners.insert(rank, token.clone());
            ranks.insert(token, rank);
        }

        Ok(Self { ranks })
    }

    /// Parse and validate a `vocab.json` document (`{"word": rank, ...}`).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RankEntries = serde_json::from_str(json)?;
        Self::from_ranks(raw.0)
    }

    /// Read, parse and validate a `vocab.json` file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::asset(path, e))?;
        let vocab = Self::from_json_str(&json)?;
        tracing::info!(
            words = vocab.len(),
            max_rank = vocab.max_rank(),
            "loaded vocabulary from {}",
            path.display()
        );
        Ok(vocab)
    }

    /// Zero-based rank of `token`, if known.
    pub fn rank(&self, token: &str) -> Option<u32> {
        self.ranks.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Highest rank present, `None` for an empty vocabulary.
    pub fn max_rank(&self) -> Option<u32> {
        self.ranks.values().copied().max()
    }

    /// Number of words whose offset index stays below `num_words`, i.e. the
    /// words that can ever be emitted as something other than OOV.
    pub fn count_below_cutoff(&self, index_from: u32, num_words: u32) -> usize {
        self.ranks
            .values()
            .filter(|&&rank| u64::from(rank) + u64::from(index_from) < u64::from(num_words))
            .count()
    }
}

/// Raw `vocab.json` entries in document order.
///
/// A `HashMap` target would let a repeated key silently overwrite the earlier
/// one, hiding it from the uniqueness checks in [`Vocabulary::from_ranks`].
struct RankEntries(Vec<(String, i64)>);

impl<'de> Deserialize<'de> for RankEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RankEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping words to integer ranks")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<RankEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, i64>()? {
                    entries.push(entry);
                }
                Ok(RankEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vocab_json() {
        let vocab = Vocabulary::from_json_str(r#"{"the": 1, "and": 2, "good": 10}"#).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.rank("good"), Some(10));
        assert_eq!(vocab.rank("the"), Some(1));
        assert_eq!(vocab.rank("bad"), None);
        assert_eq!(vocab.max_rank(), Some(10));
    }

    #[test]
    fn test_lookup_is_exact() {
        let vocab = Vocabulary::from_ranks([("good", 10)]).unwrap();
        assert_eq!(vocab.rank("Good"), None);
        assert_eq!(vocab.rank("good "), None);
    }

    #[test]
    fn test_empty_vocab() {
        let vocab = Vocabulary::from_json_str("{}").unwrap();
        assert!(vocab.is_empty());
        assert_eq!(vocab.max_rank(), None);
    }

    #[test]
    fn test_negative_rank_rejected() {
        let err = Vocabulary::from_json_str(r#"{"good": -1}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedVocabulary(_)));
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_duplicate_rank_rejected() {
        let err = Vocabulary::from_ranks([("good", 4), ("great", 4)]).unwrap_err();
        assert!(matches!(err, Error::MalformedVocabulary(_)));
        assert!(err.to_string().contains("rank 4"));
    }

    #[test]
    fn test_duplicate_token_rejected() {
        let err = Vocabulary::from_ranks([("good", 4), ("good", 5)]).unwrap_err();
        assert!(matches!(err, Error::MalformedVocabulary(_)));
    }

    #[test]
    fn test_repeated_key_in_document_rejected() {
        // "a" and "b" share rank 1 before the second "a" would overwrite it.
        let err = Vocabulary::from_json_str(r#"{"a": 1, "b": 1, "a": 2}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedVocabulary(_)));

        let err = Vocabulary::from_json_str(r#"{"a": 1, "a": 2}"#).unwrap_err();
        assert!(matches!(err, Error::MalformedVocabulary(_)));
        assert!(err.to_string().contains("listed twice"));
    }

    #[test]
    fn test_oversized_rank_rejected() {
        let err = Vocabulary::from_ranks([("good", i64::from(u32::MAX) + 1)]).unwrap_err();
        assert!(matches!(err, Error::MalformedVocabulary(_)));
    }

    #[test]
    fn test_non_integer_rank_is_json_error() {
        assert!(matches!(
            Vocabulary::from_json_str(r#"{"good": "ten"}"#),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            Vocabulary::from_json_str(r#"["good"]"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_count_below_cutoff() {
        let vocab = Vocabulary::from_ranks([("a", 0), ("b", 46), ("c", 47), ("d", 100)]).unwrap();
        // 0+3, 46+3 < 50; 47+3 and 100+3 are not.
        assert_eq!(vocab.count_below_cutoff(3, 50), 2);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.json");
        let err = Vocabulary::load(&path).unwrap_err();
        assert!(matches!(err, Error::Asset { .. }));
        assert!(err.to_string().contains("vocab.json"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.json");
        std::fs::write(&path, r#"{"great": 84, "awful": 373}"#).unwrap();
        let vocab = Vocabulary::load(&path).unwrap();
        assert_eq!(vocab.rank("awful"), Some(373));
    }
}
