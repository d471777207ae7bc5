use crate::debug_log;
use crate::game_state::{SecretWord, WORD_LENGTH};
use crate::provider::{WordFetchError, WordProvider};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

/// Outcome of one word request, tagged with the generation that asked for it.
#[derive(Debug)]
pub struct Fetched {
    pub generation: u64,
    pub result: Result<SecretWord, WordFetchError>,
}

/// Runs word requests off the UI thread.
///
/// Each [`WordLoader::request`] starts a new generation. Results of older
/// generations still arrive on the channel; the session discards them.
pub struct WordLoader {
    provider: Arc<dyn WordProvider>,
    max_candidates: usize,
    generation: u64,
    tx: Sender<Fetched>,
    rx: Receiver<Fetched>,
}

impl WordLoader {
    pub fn new(provider: Arc<dyn WordProvider>, max_candidates: usize) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            provider,
            max_candidates,
            generation: 0,
            tx,
            rx,
        }
    }

    /// Generation of the most recent request (0 before the first).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start fetching a new secret word and return its generation.
    pub fn request(&mut self) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        let provider = Arc::clone(&self.provider);
        let max_candidates = self.max_candidates;
        let tx = self.tx.clone();

        debug_log!("WordLoader::request() - generation {}", generation);
        thread::spawn(move || {
            let result = provider
                .fetch_random_word(WORD_LENGTH, max_candidates)
                .and_then(|word| SecretWord::parse(&word).map_err(WordFetchError::from));
            // The receiver only goes away when the session has ended.
            let _ = tx.send(Fetched { generation, result });
        });
        generation
    }

    /// Wait up to `wait` for the next finished request.
    pub fn poll(&self, wait: Duration) -> Option<Fetched> {
        match self.rx.recv_timeout(wait) {
            Ok(fetched) => Some(fetched),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}
