//! Word sources for the secret word.
//!
//! A [`WordProvider`] makes one attempt per call and never retries; retrying is
//! the player's reset.

use crate::config::SourceConfig;
use crate::game_state::InvalidWord;
use crate::wordbank::{
    EMBEDDED_WORDBANK, is_word_of_length, load_wordbank_from_file, load_wordbank_from_str,
};
use crate::{debug_log, info_log};
use rand::Rng;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WordFetchError {
    #[error("word source unreachable: {0}")]
    Request(#[from] reqwest::Error),

    #[error("word source returned HTTP {status}")]
    Status { status: u16 },

    #[error("malformed word source response: {0}")]
    Decode(String),

    #[error("word source endpoint '{endpoint}' is not a valid URL")]
    InvalidEndpoint { endpoint: String },

    #[error("no {length}-letter candidates available")]
    NoCandidates { length: usize },

    #[error("failed to read word list '{path}': {source}")]
    WordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    InvalidWord(#[from] InvalidWord),
}

pub trait WordProvider: Send + Sync {
    /// Pick one word of exactly `length` letters, uniformly at random from at
    /// most `max_candidates` candidates.
    fn fetch_random_word(
        &self,
        length: usize,
        max_candidates: usize,
    ) -> Result<String, WordFetchError>;
}

/// Uniform pick. `None` when there is nothing to choose from.
pub fn choose_candidate<'a, R: Rng + ?Sized>(
    candidates: &'a [String],
    rng: &mut R,
) -> Option<&'a String> {
    if candidates.is_empty() {
        return None;
    }
    candidates.get(rng.random_range(0..candidates.len()))
}

/// One record of the word-search response. Other fields (`score`, `tags`) are
/// ignored.
#[derive(Debug, Deserialize)]
struct WordRecord {
    word: String,
}

/// Decode a word-search response body into the usable candidates.
///
/// Phrases, hyphenations and words of the wrong length are dropped; at most
/// `max_candidates` remain.
pub fn parse_candidates(
    body: &str,
    length: usize,
    max_candidates: usize,
) -> Result<Vec<String>, WordFetchError> {
    let records: Vec<WordRecord> =
        serde_json::from_str(body).map_err(|e| WordFetchError::Decode(e.to_string()))?;
    let total = records.len();
    let candidates: Vec<String> = records
        .into_iter()
        .map(|r| r.word.trim().to_lowercase())
        .filter(|w| is_word_of_length(w, length))
        .take(max_candidates)
        .collect();
    debug_log!(
        "parse_candidates() - kept {} of {} records",
        candidates.len(),
        total
    );
    Ok(candidates)
}

/// HTTP word source speaking the Datamuse `/words` query format.
pub struct DatamuseProvider {
    client: Client,
    endpoint: Url,
}

impl DatamuseProvider {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, WordFetchError> {
        let endpoint = Url::parse(endpoint).map_err(|_| WordFetchError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
        })?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self, WordFetchError> {
        Self::new(&config.endpoint, Duration::from_secs(config.timeout_secs))
    }

    /// Query URL: `sp` is one `?` wildcard per letter, `max` caps the results.
    #[must_use]
    pub fn query_url(&self, length: usize, max_candidates: usize) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("sp", &"?".repeat(length))
            .append_pair("max", &max_candidates.to_string());
        url
    }
}

impl WordProvider for DatamuseProvider {
    fn fetch_random_word(
        &self,
        length: usize,
        max_candidates: usize,
    ) -> Result<String, WordFetchError> {
        let url = self.query_url(length, max_candidates);
        info_log!("DatamuseProvider - GET {}", url);

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("word source answered {status}");
            return Err(WordFetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        let candidates = parse_candidates(&body, length, max_candidates)?;
        choose_candidate(&candidates, &mut rand::rng())
            .cloned()
            .ok_or(WordFetchError::NoCandidates { length })
    }
}

/// Local word source: the embedded bank or a newline-delimited file.
pub struct WordListProvider {
    words: Vec<String>,
}

impl WordListProvider {
    #[must_use]
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    #[must_use]
    pub fn embedded(length: usize) -> Self {
        Self::new(load_wordbank_from_str(EMBEDDED_WORDBANK, length))
    }

    pub fn from_file(path: &Path, length: usize) -> Result<Self, WordFetchError> {
        let words =
            load_wordbank_from_file(path, length).map_err(|e| WordFetchError::WordList {
                path: path.to_path_buf(),
                source: e,
            })?;
        info_log!("Loaded {} words from {}", words.len(), path.display());
        Ok(Self::new(words))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordProvider for WordListProvider {
    fn fetch_random_word(
        &self,
        length: usize,
        max_candidates: usize,
    ) -> Result<String, WordFetchError> {
        let candidates: Vec<String> = self
            .words
            .iter()
            .filter(|w| is_word_of_length(w, length))
            .take(max_candidates)
            .cloned()
            .collect();
        choose_candidate(&candidates, &mut rand::rng())
            .cloned()
            .ok_or(WordFetchError::NoCandidates { length })
    }
}
