use crate::feedback::marks_to_string;
use crate::game_state::{GameStatus, RowView};
use crate::input::{UserAction, line_to_actions};
use crate::session::{GameInterface, NoticeKind, Phase, Session};
use clap::Parser;
use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Terminal Wordle
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list to draw secret words from
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Use the built-in word list instead of the online word source
    #[arg(long)]
    pub offline: bool,

    /// Line-based interface instead of the full-screen one
    #[arg(long)]
    pub plain: bool,

    /// Config file (default: <config dir>/wordle-tui/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the word source endpoint
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn format_board(session: &Session) -> Vec<String> {
    let Some(game) = session.game() else {
        return Vec::new();
    };
    let mut lines = Vec::new();
    for view in game.row_views() {
        match view {
            RowView::Revealed(row, marks) => {
                let letters: String = row
                    .slots()
                    .iter()
                    .map(|s| s.letter().unwrap_or(' ').to_ascii_uppercase())
                    .collect();
                lines.push(format!("  {letters}  {}", marks_to_string(&marks)));
            }
            RowView::Active(row) => {
                lines.push(format!("  {}", row.to_string().to_uppercase()));
            }
            RowView::Pending => lines.push("  _____".to_string()),
        }
    }
    lines
}

fn prompt(session: &Session) -> Option<&'static str> {
    match session.phase() {
        Phase::Loading { .. } => None,
        Phase::Failed { .. } => Some("Type ':reset' to try again or ':quit' to exit:"),
        Phase::Playing(game) => match game.status() {
            GameStatus::InProgress => {
                Some("Enter your guess (5 letters, ':reset' for a new word, ':quit' to exit):")
            }
            GameStatus::Won | GameStatus::Lost => {
                Some("Type ':reset' to play again or ':quit' to exit:")
            }
        },
    }
}

/// Plain line-based implementation of the [`GameInterface`] trait
///
/// Reads guesses from `reader` and prints the board to `writer` whenever the
/// session changes.
pub struct PlainInterface<R: BufRead, W: Write> {
    reader: R,
    writer: W,
    queued: VecDeque<UserAction>,
    last_revision: Option<u64>,
}

impl<R: BufRead, W: Write> PlainInterface<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            queued: VecDeque::new(),
            last_revision: None,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> GameInterface for PlainInterface<R, W> {
    fn render(&mut self, session: &Session) -> std::io::Result<()> {
        if self.last_revision == Some(session.revision()) || !self.queued.is_empty() {
            return Ok(());
        }
        self.last_revision = Some(session.revision());

        if session.is_loading() {
            writeln!(self.writer, "Fetching a word...")?;
            return Ok(());
        }
        writeln!(self.writer)?;
        for line in format_board(session) {
            writeln!(self.writer, "{line}")?;
        }
        if let Some(notice) = session.notice() {
            let tag = match notice.kind {
                NoticeKind::Success => "*",
                NoticeKind::Info => "-",
                NoticeKind::Error => "!",
            };
            writeln!(self.writer, "{tag} {}", notice.text)?;
        }
        if let Some(text) = prompt(session) {
            writeln!(self.writer, "{text}")?;
        }
        self.writer.flush()
    }

    fn next_action(&mut self, session: &Session) -> std::io::Result<Option<UserAction>> {
        if let Some(action) = self.queued.pop_front() {
            return Ok(Some(action));
        }
        if session.is_loading() {
            return Ok(None);
        }

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(Some(UserAction::Exit));
        }
        self.queued
            .extend(line_to_actions(&line, session.pending_letters()));
        Ok(self.queued.pop_front())
    }
}
