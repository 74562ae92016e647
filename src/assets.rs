//! Loading exported encoder assets.
//!
//! The training run writes two files next to the model:
//!
//! - `metadata.json`: [`EncoderConfig`]
//! - `vocab.json`: [`Vocabulary`]
//!
//! Both are validated here, once, before any text is encoded.

use std::path::Path;

use crate::Result;
use crate::config::EncoderConfig;
use crate::encoder::SequenceEncoder;
use crate::vocab::Vocabulary;

/// File name of the encoder configuration inside an assets directory.
pub const METADATA_FILE: &str = "metadata.json";
/// File name of the vocabulary inside an assets directory.
pub const VOCAB_FILE: &str = "vocab.json";

/// Load and validate `metadata.json` and `vocab.json` from `dir`.
pub fn load_dir(dir: impl AsRef<Path>) -> Result<SequenceEncoder> {
    let dir = dir.as_ref();
    load_files(dir.join(METADATA_FILE), dir.join(VOCAB_FILE))
}

/// Load and validate explicitly named config and vocabulary files.
pub fn load_files(
    metadata: impl AsRef<Path>,
    vocab: impl AsRef<Path>,
) -> Result<SequenceEncoder> {
    let config = EncoderConfig::load(metadata)?;
    let vocab = Vocabulary::load(vocab)?;
    SequenceEncoder::new(config, vocab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const METADATA: &str = r#"{"num_words": 50, "max_len": 5, "index_from": 3,
                               "pad_id": 0, "start_id": 1, "oov_id": 2}"#;

    fn write_assets(metadata: &str, vocab: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(METADATA_FILE), metadata).unwrap();
        std::fs::write(dir.path().join(VOCAB_FILE), vocab).unwrap();
        dir
    }

    #[test]
    fn test_load_dir_and_encode() {
        let dir = write_assets(METADATA, r#"{"good": 10}"#);
        let enc = load_dir(dir.path()).unwrap();
        assert_eq!(enc.max_len(), 5);
        assert_eq!(enc.encode("Good!!").ids(), &[1, 13, 0, 0, 0]);
        assert_eq!(enc.encode("bad movie").ids(), &[1, 2, 2, 0, 0]);
    }

    #[test]
    fn test_load_files_with_custom_names() {
        let dir = tempfile::tempdir().unwrap();
        let meta = dir.path().join("meta.json");
        let vocab = dir.path().join("words.json");
        std::fs::write(&meta, METADATA).unwrap();
        std::fs::write(&vocab, r#"{"good": 10}"#).unwrap();
        let enc = load_files(&meta, &vocab).unwrap();
        assert_eq!(enc.token_id("good"), 13);
    }

    #[test]
    fn test_missing_vocab_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(METADATA_FILE), METADATA).unwrap();
        let err = load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Asset { .. }));
        assert!(err.to_string().contains(VOCAB_FILE));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let metadata = r#"{"num_words": 3, "max_len": 5, "index_from": 3,
                           "pad_id": 0, "start_id": 1, "oov_id": 2}"#;
        let dir = write_assets(metadata, r#"{"good": 10}"#);
        assert!(matches!(
            load_dir(dir.path()),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_malformed_vocab_is_fatal() {
        let dir = write_assets(METADATA, r#"{"good": 10, "great": 10}"#);
        assert!(matches!(
            load_dir(dir.path()),
            Err(Error::MalformedVocabulary(_))
        ));
    }
}
