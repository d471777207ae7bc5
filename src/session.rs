//! Session controller.
//!
//! Owns the single [`GameState`] and replaces it after every transition. The
//! UI talks to the session only through [`GameInterface`].
//!
//! # Phases
//! - `Loading` → `Playing` when the word for the pending generation arrives
//! - `Loading` → `Failed` when that request errors
//! - any phase → `Loading` on reset

use crate::game_state::{EngineError, GameState, GameStatus};
use crate::input::{Input, UserAction};
use crate::loader::{Fetched, WordLoader};
use crate::{debug_log, info_log};
use std::io;
use std::time::Duration;

const LOADING_POLL_TIMEOUT_MS: u64 = 50;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the word of `generation`; input is disabled
    Loading { generation: u64 },
    Playing(GameState),
    /// The word source failed; only reset or exit are possible
    Failed { message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Round counters shown in the status line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub played: u32,
    pub won: u32,
}

#[derive(Debug)]
pub struct Session {
    phase: Phase,
    notice: Option<Notice>,
    tally: Tally,
    revision: u64,
}

impl Session {
    /// A session waiting for the word of `generation`.
    #[must_use]
    pub fn new(generation: u64) -> Self {
        Self {
            phase: Phase::Loading { generation },
            notice: None,
            tally: Tally::default(),
            revision: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn game(&self) -> Option<&GameState> {
        match &self.phase {
            Phase::Playing(game) => Some(game),
            _ => None,
        }
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Bumped on every visible change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    /// True once the current round is decided.
    #[must_use]
    pub fn is_round_over(&self) -> bool {
        self.game().is_some_and(|g| g.status().is_terminal())
    }

    /// Letters typed into the active row, 0 outside a round.
    #[must_use]
    pub fn pending_letters(&self) -> usize {
        self.game().map_or(0, GameState::cursor)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Abandon the current round and wait for the word of `generation`.
    pub fn begin_reset(&mut self, generation: u64) {
        info_log!("Session::begin_reset() - waiting for generation {}", generation);
        self.phase = Phase::Loading { generation };
        self.notice = Some(Notice::new(NoticeKind::Info, "Fetching a new word..."));
        self.touch();
    }

    /// Take a finished word request. Results for anything but the pending
    /// generation are dropped.
    pub fn accept(&mut self, fetched: Fetched) {
        let Phase::Loading { generation } = self.phase else {
            debug_log!(
                "Session::accept() - not loading, dropping generation {}",
                fetched.generation
            );
            return;
        };
        if fetched.generation != generation {
            debug_log!(
                "Session::accept() - stale generation {} (pending {})",
                fetched.generation,
                generation
            );
            return;
        }

        match fetched.result {
            Ok(secret) => {
                debug_log!("Session::accept() - secret word is '{}'", secret);
                self.phase = Phase::Playing(GameState::reset_game(secret));
                self.notice = None;
            }
            Err(e) => {
                log::error!("could not fetch a secret word: {e}");
                self.phase = Phase::Failed {
                    message: e.to_string(),
                };
                self.notice = Some(Notice::new(
                    NoticeKind::Error,
                    format!("Could not fetch a word: {e}"),
                ));
            }
        }
        self.touch();
    }

    /// Apply one keyboard input to the round in play.
    pub fn handle_input(&mut self, input: Input) {
        let Phase::Playing(game) = &self.phase else {
            debug_log!("Session::handle_input() - no round in play, ignoring {:?}", input);
            return;
        };
        if game.status().is_terminal() {
            debug_log!("Session::handle_input() - round over, ignoring {:?}", input);
            return;
        }

        let result = match input {
            Input::Letter(c) => game.append_letter(c),
            Input::Backspace => game.delete_letter(),
            Input::Enter => game.submit_guess(),
        };

        match result {
            Ok(next) => {
                if next == *game {
                    return;
                }
                self.notice = Self::round_notice(&next);
                if next.status().is_terminal() {
                    self.tally.played += 1;
                    if next.status() == GameStatus::Won {
                        self.tally.won += 1;
                    }
                    info_log!("Round finished: {}", next.status());
                }
                self.phase = Phase::Playing(next);
            }
            Err(EngineError::IncompleteGuess { .. }) => {
                self.notice = Some(Notice::new(NoticeKind::Error, "Words must be five letters"));
            }
            Err(e) => {
                debug_log!("Session::handle_input() - rejected: {}", e);
                return;
            }
        }
        self.touch();
    }

    fn round_notice(game: &GameState) -> Option<Notice> {
        match game.status() {
            GameStatus::InProgress => None,
            GameStatus::Won => Some(Notice::new(NoticeKind::Success, "You've won!")),
            GameStatus::Lost => Some(Notice::new(
                NoticeKind::Error,
                format!(
                    "You've lost! The word was {}",
                    game.secret().to_string().to_uppercase()
                ),
            )),
        }
    }
}

/// UI seam: something that can show a session and produce actions.
pub trait GameInterface {
    fn render(&mut self, session: &Session) -> io::Result<()>;

    /// Next user action, or `None` when nothing happened yet.
    fn next_action(&mut self, session: &Session) -> io::Result<Option<UserAction>>;
}

/// Drive a session until the user exits.
pub fn run_session<I: GameInterface>(loader: &mut WordLoader, interface: &mut I) -> io::Result<Tally> {
    let mut session = Session::new(loader.request());
    // Show the loading board before the first fetch can land
    interface.render(&session)?;

    loop {
        let wait = if session.is_loading() {
            Duration::from_millis(LOADING_POLL_TIMEOUT_MS)
        } else {
            Duration::ZERO
        };
        if let Some(fetched) = loader.poll(wait) {
            session.accept(fetched);
        }

        interface.render(&session)?;

        match interface.next_action(&session)? {
            Some(UserAction::Exit) => {
                info_log!("run_session() - exit requested");
                break;
            }
            Some(UserAction::Reset) => {
                let generation = loader.request();
                session.begin_reset(generation);
            }
            Some(UserAction::Input(input)) => session.handle_input(input),
            None => {}
        }
    }
    Ok(session.tally())
}
