//! Guess engine: the authoritative game state and its transitions.
//!
//! Every transition takes `&self` and hands back a new [`GameState`], so the
//! caller owns the only copy and replaces it wholesale after each event.
//!
//! # State Machine
//! - `InProgress` → `Won` when a submitted row equals the secret
//! - `InProgress` → `Lost` when the sixth row misses
//! - `InProgress` → `InProgress` (next row) on any other complete submission
//! - `Won`/`Lost` are terminal; only [`GameState::reset_game`] leaves them

use crate::feedback::{Mark, evaluate_letter_feedback};
use crate::debug_log;
use std::fmt;
use thiserror::Error;

pub const WORD_LENGTH: usize = 5;
pub const MAX_GUESSES: usize = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("words must be five letters ({letters} typed)")]
    IncompleteGuess { letters: usize },

    #[error("the round is over ({0})")]
    RoundOver(GameStatus),

    #[error("'{0}' is not a letter")]
    InvalidLetter(char),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{0}' is not a five-letter word")]
pub struct InvalidWord(pub String);

/// The target word of a round: exactly five lowercase ASCII letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SecretWord([char; WORD_LENGTH]);

impl SecretWord {
    pub fn parse(word: &str) -> Result<Self, InvalidWord> {
        let trimmed = word.trim();
        if trimmed.len() != WORD_LENGTH || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(InvalidWord(word.to_string()));
        }
        let mut letters = [' '; WORD_LENGTH];
        for (slot, c) in letters.iter_mut().zip(trimmed.chars()) {
            *slot = c.to_ascii_lowercase();
        }
        Ok(Self(letters))
    }

    #[must_use]
    pub fn letter_at(&self, index: usize) -> Option<char> {
        self.0.get(index).copied()
    }

    #[must_use]
    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(&letter.to_ascii_lowercase())
    }

    #[must_use]
    pub fn letters(&self) -> &[char; WORD_LENGTH] {
        &self.0
    }
}

impl fmt::Display for SecretWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// One letter position of a row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Slot {
    #[default]
    Empty,
    Filled(char),
}

impl Slot {
    #[must_use]
    pub fn letter(self) -> Option<char> {
        match self {
            Self::Empty => None,
            Self::Filled(c) => Some(c),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GuessRow {
    slots: [Slot; WORD_LENGTH],
}

impl GuessRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fully filled row from a five-letter word.
    pub fn from_word(word: &str) -> Result<Self, InvalidWord> {
        let secret = SecretWord::parse(word)?;
        let mut row = Self::new();
        for (slot, c) in row.slots.iter_mut().zip(secret.letters()) {
            *slot = Slot::Filled(*c);
        }
        Ok(row)
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_slot(mut self, index: usize, slot: Slot) -> Self {
        self.slots[index] = slot;
        self
    }

    #[must_use]
    pub fn slots(&self) -> &[Slot; WORD_LENGTH] {
        &self.slots
    }

    #[must_use]
    pub fn filled(&self) -> usize {
        self.slots.iter().filter(|s| matches!(s, Slot::Filled(_))).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.filled() == WORD_LENGTH
    }

    /// Case-insensitive comparison against the secret. Rows with empty slots
    /// never match.
    #[must_use]
    pub fn matches(&self, secret: &SecretWord) -> bool {
        self.slots
            .iter()
            .zip(secret.letters())
            .all(|(slot, s)| slot.letter().is_some_and(|c| c.eq_ignore_ascii_case(s)))
    }
}

impl fmt::Display for GuessRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slots
            .iter()
            .try_for_each(|s| write!(f, "{}", s.letter().unwrap_or('_')))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InProgress => "in progress",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        f.write_str(label)
    }
}

/// How a row should be displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowView {
    /// Finalized row with its feedback
    Revealed(GuessRow, [Mark; WORD_LENGTH]),
    /// Row being typed, not yet revealed
    Active(GuessRow),
    /// Untouched placeholder row
    Pending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    secret: SecretWord,
    rows: [GuessRow; MAX_GUESSES],
    active_row_index: usize,
    active_row: GuessRow,
    cursor: usize,
    status: GameStatus,
}

impl GameState {
    /// Fresh round bound to `secret`.
    #[must_use]
    pub fn reset_game(secret: SecretWord) -> Self {
        Self {
            secret,
            rows: [GuessRow::new(); MAX_GUESSES],
            active_row_index: 0,
            active_row: GuessRow::new(),
            cursor: 0,
            status: GameStatus::InProgress,
        }
    }

    #[must_use]
    pub fn secret(&self) -> &SecretWord {
        &self.secret
    }

    #[must_use]
    pub fn rows(&self) -> &[GuessRow; MAX_GUESSES] {
        &self.rows
    }

    #[must_use]
    pub fn active_row_index(&self) -> usize {
        self.active_row_index
    }

    #[must_use]
    pub fn active_row(&self) -> &GuessRow {
        &self.active_row
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    fn ensure_in_progress(&self) -> Result<(), EngineError> {
        if self.status.is_terminal() {
            return Err(EngineError::RoundOver(self.status));
        }
        Ok(())
    }

    pub fn append_letter(&self, ch: char) -> Result<Self, EngineError> {
        if !ch.is_ascii_alphabetic() {
            return Err(EngineError::InvalidLetter(ch));
        }
        self.ensure_in_progress()?;
        if self.cursor == WORD_LENGTH {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        next.active_row.slots[next.cursor] = Slot::Filled(ch.to_ascii_lowercase());
        next.cursor += 1;
        debug_log!("append_letter() - row now '{}'", next.active_row);
        Ok(next)
    }

    pub fn delete_letter(&self) -> Result<Self, EngineError> {
        self.ensure_in_progress()?;
        if self.cursor == 0 {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        next.cursor -= 1;
        next.active_row.slots[next.cursor] = Slot::Empty;
        debug_log!("delete_letter() - row now '{}'", next.active_row);
        Ok(next)
    }

    pub fn submit_guess(&self) -> Result<Self, EngineError> {
        self.ensure_in_progress()?;
        if self.cursor != WORD_LENGTH {
            return Err(EngineError::IncompleteGuess {
                letters: self.cursor,
            });
        }

        let mut next = self.clone();
        next.rows[next.active_row_index] = next.active_row;

        if next.active_row.matches(&next.secret) {
            next.status = GameStatus::Won;
        } else if next.active_row_index == MAX_GUESSES - 1 {
            next.status = GameStatus::Lost;
        } else {
            next.active_row_index += 1;
            next.active_row = GuessRow::new();
            next.cursor = 0;
        }
        debug_log!(
            "submit_guess() - row {} submitted, status {}",
            self.active_row_index,
            next.status
        );
        Ok(next)
    }

    /// Display classification of each of the six rows.
    #[must_use]
    pub fn row_views(&self) -> [RowView; MAX_GUESSES] {
        let mut views = [RowView::Pending; MAX_GUESSES];
        for (i, view) in views.iter_mut().enumerate() {
            let finalized = i < self.active_row_index
                || (i == self.active_row_index && self.status.is_terminal());
            *view = if finalized {
                let row = self.rows[i];
                RowView::Revealed(row, evaluate_letter_feedback(&row, &self.secret))
            } else if i == self.active_row_index {
                RowView::Active(self.active_row)
            } else {
                RowView::Pending
            };
        }
        views
    }
}
