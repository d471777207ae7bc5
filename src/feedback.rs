use crate::game_state::{GuessRow, SecretWord, Slot, WORD_LENGTH};

/// Per-letter classification shown once a row is revealed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Right letter, right position (green)
    Correct,
    /// Letter occurs somewhere else in the secret (yellow)
    Present,
    /// Letter does not occur in the secret (gray)
    Absent,
}

impl Mark {
    /// Single-character code used by the plain interface.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => '.',
        }
    }
}

/// Compute the feedback marks for `row` against `secret`.
///
/// Each position is judged on its own: a letter is `Correct` when it sits at
/// the secret's position, `Present` when the secret contains it anywhere else,
/// `Absent` otherwise. There is no duplicate-letter accounting, so a guess with
/// two `e`s against a secret with one marks both of them. Empty slots are
/// `Absent`.
#[must_use]
pub fn evaluate_letter_feedback(row: &GuessRow, secret: &SecretWord) -> [Mark; WORD_LENGTH] {
    let mut marks = [Mark::Absent; WORD_LENGTH];
    for (i, slot) in row.slots().iter().enumerate() {
        let Slot::Filled(letter) = *slot else {
            continue;
        };
        let in_place = secret
            .letter_at(i)
            .is_some_and(|s| s.eq_ignore_ascii_case(&letter));
        let contained = secret.contains(letter);
        marks[i] = if in_place && contained {
            Mark::Correct
        } else if contained {
            Mark::Present
        } else {
            Mark::Absent
        };
    }
    marks
}

/// Render a row of marks as its symbol string, e.g. `".YYYY"`.
#[must_use]
pub fn marks_to_string(marks: &[Mark]) -> String {
    marks.iter().map(|m| m.symbol()).collect()
}
