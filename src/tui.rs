//! TUI (Terminal User Interface) module for the Wordle game
//!
//! Renders a [`Session`] with Ratatui and turns crossterm key events into
//! [`UserAction`]s.
//!
//! # Layout
//! Title, the 6x5 board, an information panel for notices, a status line and
//! key help for the current phase.

use crate::feedback::Mark;
use crate::game_state::{GameStatus, GuessRow, MAX_GUESSES, RowView, WORD_LENGTH};
use crate::input::{UserAction, classify_key};
use crate::session::{GameInterface, NoticeKind, Phase, Session};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const LOADING_POLL_TIMEOUT_MS: u64 = 10;
const ROW_SPACING: u16 = 2;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// Display state of a single board cell.
#[derive(Clone, Copy, PartialEq, Debug)]
enum CellState {
    Empty,
    Entered,
    Revealed(Mark),
}

impl CellState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty | Self::Entered => (Color::DarkGray, Color::White),
            Self::Revealed(Mark::Correct) => (Color::Green, Color::Black),
            Self::Revealed(Mark::Present) => (Color::Yellow, Color::Black),
            Self::Revealed(Mark::Absent) => (Color::Gray, Color::Black),
        }
    }
}

/// Letters and cell states of one board row.
fn row_cells(view: &RowView) -> [(char, CellState); WORD_LENGTH] {
    let mut cells = [(' ', CellState::Empty); WORD_LENGTH];
    let fill = |row: &GuessRow, cells: &mut [(char, CellState); WORD_LENGTH]| {
        for (cell, slot) in cells.iter_mut().zip(row.slots()) {
            if let Some(c) = slot.letter() {
                *cell = (c.to_ascii_uppercase(), CellState::Entered);
            }
        }
    };
    match view {
        RowView::Revealed(row, marks) => {
            fill(row, &mut cells);
            for (cell, mark) in cells.iter_mut().zip(marks) {
                cell.1 = CellState::Revealed(*mark);
            }
        }
        RowView::Active(row) => fill(row, &mut cells),
        RowView::Pending => {}
    }
    cells
}

fn board_rows(session: &Session) -> [RowView; MAX_GUESSES] {
    session
        .game()
        .map_or([RowView::Pending; MAX_GUESSES], |g| g.row_views())
}

fn status_text(session: &Session) -> String {
    let tally = session.tally();
    let phase = match session.phase() {
        Phase::Loading { .. } => "Fetching a word...".to_string(),
        Phase::Failed { .. } => "Word source unavailable".to_string(),
        Phase::Playing(game) => match game.status() {
            GameStatus::InProgress => {
                format!("Guess {} of {MAX_GUESSES}", game.active_row_index() + 1)
            }
            GameStatus::Won => format!("Solved in {}/{MAX_GUESSES}", game.active_row_index() + 1),
            GameStatus::Lost => "Out of guesses".to_string(),
        },
    };
    format!("{phase} | Won {} of {}", tally.won, tally.played)
}

fn instructions_text(session: &Session) -> &'static str {
    match session.phase() {
        Phase::Loading { .. } => "Please wait... | CTRL+R: Fetch again | ESC: Quit",
        Phase::Failed { .. } => "CTRL+R: Retry | ESC: Quit",
        Phase::Playing(_) if session.is_round_over() => "N / CTRL+R: New Game | ESC: Quit",
        Phase::Playing(_) => {
            "Type letters | ENTER: Submit | BACKSPACE: Delete | CTRL+R: Reset | ESC: Quit"
        }
    }
}

/// Render the complete UI for `session`.
pub fn render_session(f: &mut Frame, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(14), // Board: six rows plus borders
            Constraint::Min(3),     // Info panel
            Constraint::Length(3),  // Status line
            Constraint::Length(3),  // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_board(f, chunks[1], &board_rows(session));
    render_info(f, chunks[2], session);
    render_status(f, chunks[3], &status_text(session));
    render_instructions(f, chunks[4], instructions_text(session));
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("WORDLE!")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

#[allow(clippy::cast_possible_truncation)]
fn render_board(f: &mut Frame, area: Rect, rows: &[RowView]) {
    let block = Block::default()
        .title("Guesses")
        .borders(Borders::ALL)
        .style(Style::default());
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (row_index, view) in rows.iter().enumerate() {
        let y = inner.y + (row_index as u16 * ROW_SPACING);
        if y >= inner.y + inner.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for (letter, state) in row_cells(view) {
            let (bg_color, fg_color) = state.colors();
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }

        f.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect {
                x: inner.x,
                y,
                width: inner.width,
                height: 1,
            },
        );
    }
}

fn render_info(f: &mut Frame, area: Rect, session: &Session) {
    let mut lines = Vec::new();

    if let Some(notice) = session.notice() {
        let style = match notice.kind {
            NoticeKind::Success => SUCCESS_STYLE,
            NoticeKind::Info => MESSAGE_STYLE,
            NoticeKind::Error => ERROR_STYLE,
        };
        lines.push(Line::from(vec![Span::styled(notice.text.clone(), style)]));
    }

    if let Phase::Failed { message } = session.phase() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![Span::styled(message.clone(), ERROR_STYLE)]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title("Information").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_status(f: &mut Frame, area: Rect, status: &str) {
    let paragraph = Paragraph::new(status)
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, text: &str) {
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

/// Full-screen terminal interface.
///
/// Raw mode and the alternate screen are entered on construction and restored
/// on drop.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");
        Ok(Self { terminal })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }
}

impl GameInterface for TuiInterface {
    fn render(&mut self, session: &Session) -> io::Result<()> {
        self.terminal.draw(|f| render_session(f, session))?;
        Ok(())
    }

    fn next_action(&mut self, session: &Session) -> io::Result<Option<UserAction>> {
        let timeout = if session.is_loading() {
            LOADING_POLL_TIMEOUT_MS
        } else {
            EVENT_POLL_TIMEOUT_MS
        };
        if !event::poll(Duration::from_millis(timeout))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                let action = classify_key(key, session.is_round_over());
                debug_log!("next_action() - {:?} -> {:?}", key.code, action);
                Ok(action)
            }
            // Resize and focus changes are picked up by the next draw
            _ => Ok(None),
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::SecretWord;
    use crate::input::Input;
    use crate::loader::Fetched;
    use ratatui::backend::TestBackend;

    fn playing(secret: &str) -> Session {
        let mut session = Session::new(1);
        session.accept(Fetched {
            generation: 1,
            result: Ok(SecretWord::parse(secret).unwrap()),
        });
        session
    }

    fn type_line(session: &mut Session, text: &str) {
        for c in text.chars() {
            session.handle_input(Input::Letter(c));
        }
        session.handle_input(Input::Enter);
    }

    fn screen(session: &Session) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render_session(f, session)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_row_cells_revealed() {
        let row = GuessRow::from_word("trace").unwrap();
        let marks = [
            Mark::Absent,
            Mark::Correct,
            Mark::Correct,
            Mark::Present,
            Mark::Correct,
        ];
        let cells = row_cells(&RowView::Revealed(row, marks));
        assert_eq!(cells[0], ('T', CellState::Revealed(Mark::Absent)));
        assert_eq!(cells[3], ('C', CellState::Revealed(Mark::Present)));
        assert_eq!(cells[3].1.colors(), (Color::Yellow, Color::Black));
        assert_eq!(cells[1].1.colors(), (Color::Green, Color::Black));
    }

    #[test]
    fn test_row_cells_active_and_pending() {
        let row = GuessRow::from_word("crane").unwrap();
        let cells = row_cells(&RowView::Active(row));
        assert!(cells.iter().all(|(_, s)| *s == CellState::Entered));
        let cells = row_cells(&RowView::Pending);
        assert!(cells.iter().all(|c| *c == (' ', CellState::Empty)));
    }

    #[test]
    fn test_status_text() {
        let mut session = playing("crane");
        assert_eq!(status_text(&session), "Guess 1 of 6 | Won 0 of 0");
        type_line(&mut session, "trace");
        type_line(&mut session, "crane");
        assert_eq!(status_text(&session), "Solved in 2/6 | Won 1 of 1");
        session.begin_reset(2);
        assert_eq!(status_text(&session), "Fetching a word... | Won 1 of 1");
    }

    #[test]
    fn test_render_shows_board_and_notice() {
        let mut session = playing("crane");
        type_line(&mut session, "trace");
        type_line(&mut session, "cr");
        let text = screen(&session);
        assert!(text.contains("WORDLE!"));
        assert!(text.contains(" T "));
        assert!(text.contains("Words must be five letters"));
        assert!(text.contains("Guess 2 of 6"));
    }

    #[test]
    fn test_render_loading_board_is_empty() {
        let session = Session::new(1);
        let text = screen(&session);
        assert!(text.contains("Fetching a word..."));
        assert!(text.contains("ESC: Quit"));
    }

    #[test]
    fn test_instructions_after_round() {
        let mut session = playing("crane");
        type_line(&mut session, "crane");
        assert_eq!(instructions_text(&session), "N / CTRL+R: New Game | ESC: Quit");
    }
}
