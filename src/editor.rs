//! Modal command dispatch and the editing session.
//!
//! Keys are mapped to [`Command`]s by the [`Dispatcher`] according to the
//! current [`Mode`]; the [`Session`] applies commands to its [`Document`]
//! and draws itself into a [`RenderSink`].
//!
//! # Examples
//!
//! ```
//! use red::editor::{Flow, Session};
//! use red::input::KeyEvent;
//!
//! let mut session = Session::from_text("world");
//! for c in "ihello \x1b".chars() {
//!     session.handle_key(KeyEvent::from_char(c))?;
//! }
//! assert_eq!(session.document().text(), "hello world");
//! assert_eq!(session.handle_key(KeyEvent::from_char('q'))?, Flow::Quit);
//! # Ok::<(), red::Error>(())
//! ```

use std::borrow::Cow;
use std::fmt;
use std::io;

use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::input::{KeyCode, KeyEvent, KeyModifiers};
use crate::screen::RenderSink;
use crate::text::Document;
use crate::unicode::{
    column_of, display_width, grapheme_count, grapheme_offset, render_line, skip_columns,
};

/// Shown on rows below the last line of the document.
const FILLER: &str = "~";

/// Editing mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Keys are commands.
    #[default]
    Normal,
    /// Keys are text.
    Insert,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Insert => write!(f, "INSERT"),
        }
    }
}

/// Cursor movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Down,
    Up,
    Right,
}

/// An editor action produced from a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Switch to insert mode at the cursor.
    EnterInsert,
    /// Move one column right, then switch to insert mode.
    Append,
    /// Start a new line below the current one in insert mode.
    OpenLine,
    /// Return to normal mode.
    ExitInsert,
    /// Insert a character at the cursor.
    Insert(char),
    Undo,
    Quit,
}

/// Whether the main loop keeps running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Maps keys to commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Dispatcher;

impl Dispatcher {
    /// The command `key` stands for in `mode`, or `None` if it is unbound.
    #[must_use]
    pub fn dispatch(mode: Mode, key: KeyEvent) -> Option<Command> {
        if key.matches(KeyCode::Char('q'), KeyModifiers::CTRL) {
            return Some(Command::Quit);
        }
        match mode {
            Mode::Normal => Self::normal(key),
            Mode::Insert => Self::insert(key),
        }
    }

    fn normal(key: KeyEvent) -> Option<Command> {
        let command = match key.printable()? {
            'h' => Command::Move(Direction::Left),
            'j' => Command::Move(Direction::Down),
            'k' => Command::Move(Direction::Up),
            'l' => Command::Move(Direction::Right),
            'i' => Command::EnterInsert,
            'a' => Command::Append,
            'o' => Command::OpenLine,
            'u' => Command::Undo,
            'q' => Command::Quit,
            _ => return None,
        };
        Some(command)
    }

    fn insert(key: KeyEvent) -> Option<Command> {
        match key.code {
            KeyCode::Esc => Some(Command::ExitInsert),
            KeyCode::Enter => Some(Command::Insert('\n')),
            KeyCode::Tab => Some(Command::Insert('\t')),
            _ => key.printable().map(Command::Insert),
        }
    }
}

/// One document being edited: cursor, viewport and mode.
///
/// The cursor is a `(row, col)` pair counted in lines and grapheme clusters.
#[derive(Debug, Default)]
pub struct Session {
    document: Document,
    row: usize,
    col: usize,
    top: usize,
    left: usize,
    mode: Mode,
}

impl Session {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// A session over a new document seeded with `text`.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(Document::new(text))
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Cursor as `(row, col)`.
    #[must_use]
    pub const fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// First document row shown on screen.
    #[must_use]
    pub const fn top(&self) -> usize {
        self.top
    }

    /// First display column shown on screen.
    #[must_use]
    pub const fn left(&self) -> usize {
        self.left
    }

    /// Dispatch `key` in the current mode and apply the result.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<Flow> {
        match Dispatcher::dispatch(self.mode, key) {
            Some(command) => self.apply(command),
            None => Ok(Flow::Continue),
        }
    }

    /// Apply one command.
    pub fn apply(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Move(direction) => self.move_cursor(direction),
            Command::EnterInsert => self.mode = Mode::Insert,
            Command::Append => {
                self.mode = Mode::Insert;
                self.col = (self.col + 1).min(self.line_len(self.row));
            }
            Command::OpenLine => {
                let text = self.document.text();
                let end = line_start(&text, self.row) + line(&text, self.row).len();
                self.document.insert(end, "\n")?;
                self.row += 1;
                self.col = 0;
                self.mode = Mode::Insert;
            }
            Command::ExitInsert => {
                self.mode = Mode::Normal;
                self.clamp_cursor();
            }
            Command::Insert(c) => {
                let offset = self.cursor_offset();
                let mut buf = [0u8; 4];
                self.document.insert(offset, c.encode_utf8(&mut buf))?;
                self.set_cursor_offset(offset + c.len_utf8());
            }
            Command::Undo => {
                if !self.document.undo() {
                    emit_log(LogLevel::Info, "nothing to undo");
                }
                self.clamp_cursor();
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Byte offset of the cursor in the document text.
    #[must_use]
    pub fn cursor_offset(&self) -> usize {
        let text = self.document.text();
        line_start(&text, self.row) + grapheme_offset(line(&text, self.row), self.col)
    }

    /// Draw the visible lines, the status line and the cursor, then flush.
    ///
    /// The viewport follows the cursor both ways: rows scroll by `top` and
    /// columns by `left`, so the cursor is always on screen.
    pub fn render(&mut self, sink: &mut impl RenderSink) -> io::Result<()> {
        let (width, height) = sink.size();
        let text_rows = usize::from(height.saturating_sub(1));
        self.scroll(text_rows);

        let text = self.document.text();
        let lines: Vec<&str> = text.split('\n').collect();
        let current = lines.get(self.row).copied().unwrap_or("");
        let column = column_of(current, self.col);
        self.scroll_columns(column, usize::from(width));

        let left = self.left;
        let rendered: Vec<_> = (self.top..self.top + text_rows)
            .map(|row| {
                lines
                    .get(row)
                    .copied()
                    .map_or(Cow::Borrowed(FILLER), |line| match render_line(line) {
                        Cow::Borrowed(line) => skip_columns(line, left),
                        Cow::Owned(line) => Cow::Owned(skip_columns(&line, left).into_owned()),
                    })
            })
            .collect();
        let visible: Vec<&str> = rendered.iter().map(|line| &**line).collect();

        let status = self.status_line(usize::from(width));
        sink.draw_lines(&visible, &status)?;

        let x = column - self.left + 1;
        let y = if text_rows == 0 {
            usize::from(height)
        } else {
            self.row - self.top + 1
        };
        sink.move_cursor_abs(to_i32(x), to_i32(y))?;
        sink.flush()
    }

    fn status_line(&self, width: usize) -> String {
        let left = match self.mode {
            Mode::Insert => "-- INSERT --",
            Mode::Normal => "",
        };
        let right = format!(
            "{}:{}  undo:{}",
            self.row + 1,
            self.col + 1,
            self.document.undo_depth()
        );
        let pad = width.saturating_sub(display_width(left) + display_width(&right));
        format!("{left}{:pad$}{right}", "")
    }

    fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.col = self.col.saturating_sub(1),
            Direction::Right => self.col += 1,
            Direction::Up => self.row = self.row.saturating_sub(1),
            Direction::Down => self.row += 1,
        }
        self.clamp_cursor();
    }

    /// Keep the cursor on an existing line and column. In normal mode the
    /// cursor sits on a character, in insert mode it may sit past the last.
    fn clamp_cursor(&mut self) {
        let text = self.document.text();
        let last_row = text.matches('\n').count();
        self.row = self.row.min(last_row);
        let len = grapheme_count(line(&text, self.row));
        let max_col = match self.mode {
            Mode::Insert => len,
            Mode::Normal => len.saturating_sub(1),
        };
        self.col = self.col.min(max_col);
    }

    fn set_cursor_offset(&mut self, offset: usize) {
        let text = self.document.text();
        let before = &text[..offset.min(text.len())];
        let start = before.rfind('\n').map_or(0, |i| i + 1);
        self.row = before.matches('\n').count();
        self.col = grapheme_count(&before[start..]);
    }

    fn line_len(&self, row: usize) -> usize {
        grapheme_count(line(&self.document.text(), row))
    }

    /// Move the viewport so the cursor row is one of `rows` visible rows.
    fn scroll(&mut self, rows: usize) {
        if rows == 0 {
            self.top = self.row;
        } else if self.row < self.top {
            self.top = self.row;
        } else if self.row >= self.top + rows {
            self.top = self.row + 1 - rows;
        }
    }

    /// Move the viewport so display column `column` is one of `columns`
    /// visible columns.
    fn scroll_columns(&mut self, column: usize, columns: usize) {
        if columns == 0 || column < self.left {
            self.left = column;
        } else if column >= self.left + columns {
            self.left = column + 1 - columns;
        }
    }
}

/// Line `row` of `text`, without its newline; empty past the end.
fn line(text: &str, row: usize) -> &str {
    text.split('\n').nth(row).unwrap_or("")
}

/// Byte offset at which line `row` starts, or `text.len()` past the end.
fn line_start(text: &str, row: usize) -> usize {
    if row == 0 {
        return 0;
    }
    text.match_indices('\n')
        .nth(row - 1)
        .map_or(text.len(), |(i, _)| i + 1)
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Screen;
    use crate::terminal::Terminal;

    fn keys(session: &mut Session, input: &str) -> Flow {
        let mut flow = Flow::Continue;
        for c in input.chars() {
            flow = session.handle_key(KeyEvent::from_char(c)).unwrap();
        }
        flow
    }

    #[test]
    fn test_dispatch_normal_mode() {
        let d = |c| Dispatcher::dispatch(Mode::Normal, KeyEvent::from_char(c));
        assert_eq!(d('h'), Some(Command::Move(Direction::Left)));
        assert_eq!(d('j'), Some(Command::Move(Direction::Down)));
        assert_eq!(d('k'), Some(Command::Move(Direction::Up)));
        assert_eq!(d('l'), Some(Command::Move(Direction::Right)));
        assert_eq!(d('i'), Some(Command::EnterInsert));
        assert_eq!(d('a'), Some(Command::Append));
        assert_eq!(d('o'), Some(Command::OpenLine));
        assert_eq!(d('u'), Some(Command::Undo));
        assert_eq!(d('q'), Some(Command::Quit));
        assert_eq!(d('\x11'), Some(Command::Quit));
        assert_eq!(d('x'), None);
        assert_eq!(d('\x1b'), None);
        assert_eq!(d('\r'), None);
    }

    #[test]
    fn test_dispatch_insert_mode() {
        let d = |c| Dispatcher::dispatch(Mode::Insert, KeyEvent::from_char(c));
        assert_eq!(d('q'), Some(Command::Insert('q')));
        assert_eq!(d('é'), Some(Command::Insert('é')));
        assert_eq!(d('\r'), Some(Command::Insert('\n')));
        assert_eq!(d('\t'), Some(Command::Insert('\t')));
        assert_eq!(d('\x1b'), Some(Command::ExitInsert));
        assert_eq!(d('\x11'), Some(Command::Quit));
        assert_eq!(d('\x7f'), None);
        assert_eq!(d('\x01'), None);
    }

    #[test]
    fn test_mode_transitions() {
        let mut session = Session::from_text("abc");
        assert_eq!(session.mode(), Mode::Normal);
        keys(&mut session, "i");
        assert_eq!(session.mode(), Mode::Insert);
        keys(&mut session, "q");
        assert_eq!(session.document().text(), "qabc");
        keys(&mut session, "\x1b");
        assert_eq!(session.mode(), Mode::Normal);
        assert_eq!(keys(&mut session, "q"), Flow::Quit);
    }

    #[test]
    fn test_movement_is_clamped() {
        let mut session = Session::from_text("ab\nlonger\nx");
        keys(&mut session, "hhkk");
        assert_eq!(session.cursor(), (0, 0));
        keys(&mut session, "jllllllll");
        assert_eq!(session.cursor(), (1, 5));
        keys(&mut session, "j");
        assert_eq!(session.cursor(), (2, 0));
        keys(&mut session, "jj");
        assert_eq!(session.cursor(), (2, 0));
    }

    #[test]
    fn test_append_at_line_end() {
        let mut session = Session::from_text("ab");
        keys(&mut session, "lla!");
        assert_eq!(session.document().text(), "ab!");
        assert_eq!(session.cursor(), (0, 3));
    }

    #[test]
    fn test_open_line_below() {
        let mut session = Session::from_text("one\ntwo");
        keys(&mut session, "onew\x1b");
        assert_eq!(session.document().text(), "one\nnew\ntwo");
        assert_eq!(session.cursor(), (1, 2));
    }

    #[test]
    fn test_enter_splits_line() {
        let mut session = Session::from_text("abcd");
        keys(&mut session, "lli\r");
        assert_eq!(session.document().text(), "ab\ncd");
        assert_eq!(session.cursor(), (1, 0));
    }

    #[test]
    fn test_cursor_offset_counts_graphemes() {
        let mut session = Session::from_text("e\u{301}日x\nz");
        keys(&mut session, "ll");
        assert_eq!(session.cursor(), (0, 2));
        assert_eq!(session.cursor_offset(), "e\u{301}日".len());
        keys(&mut session, "j");
        assert_eq!(session.cursor_offset(), "e\u{301}日x\n".len());
    }

    #[test]
    fn test_combining_mark_keeps_column() {
        let mut session = Session::from_text("");
        keys(&mut session, "ie\u{301}");
        assert_eq!(session.cursor(), (0, 1));
        assert_eq!(session.cursor_offset(), "e\u{301}".len());
    }

    #[test]
    fn test_undo_reverts_and_clamps() {
        let mut session = Session::from_text("ab");
        keys(&mut session, "llaXY\x1b");
        assert_eq!(session.document().text(), "abXY");
        keys(&mut session, "uu");
        assert_eq!(session.document().text(), "ab");
        assert_eq!(session.cursor(), (0, 1));
        keys(&mut session, "u");
        assert_eq!(session.document().text(), "ab");
    }

    #[test]
    fn test_render_places_cursor_and_status() {
        let mut session = Session::from_text("a\tb\nsecond");
        keys(&mut session, "ll");
        let mut screen = Screen::new(Terminal::new(Vec::new(), (20, 4)));
        session.render(&mut screen).unwrap();

        assert_eq!(screen.cursor(), (9, 1));
        let out = String::from_utf8_lossy(screen.terminal_mut().writer_mut()).into_owned();
        assert!(out.contains(&format!("a{}b", " ".repeat(7))));
        assert!(out.contains("second"));
        assert!(out.contains("\x1b[3;1H\x1b[2K~"));
        assert!(out.contains("1:3  undo:0"));
        assert!(!out.contains("INSERT"));
    }

    #[test]
    fn test_render_scrolls_viewport() {
        let text: Vec<String> = (0..10).map(|i| format!("line{i}")).collect();
        let mut session = Session::from_text(text.join("\n"));
        let mut screen = Screen::new(Terminal::new(Vec::new(), (20, 4)));

        keys(&mut session, "jjjjj");
        session.render(&mut screen).unwrap();
        assert_eq!(session.top(), 3);
        assert_eq!(screen.cursor(), (1, 3));

        keys(&mut session, "kkkkk");
        session.render(&mut screen).unwrap();
        assert_eq!(session.top(), 0);
        assert_eq!(screen.cursor(), (1, 1));
    }

    #[test]
    fn test_render_scrolls_columns() {
        let mut session = Session::from_text("abcdefghijklmnop");
        let mut screen = Screen::new(Terminal::new(Vec::new(), (5, 3)));

        keys(&mut session, "llllllll");
        session.render(&mut screen).unwrap();
        assert_eq!(session.left(), 4);
        assert_eq!(screen.cursor(), (5, 1));
        let out = String::from_utf8_lossy(screen.terminal_mut().writer_mut()).into_owned();
        assert!(out.contains("\x1b[2Kefghi"));
        screen.terminal_mut().writer_mut().clear();

        keys(&mut session, "hhhhhh");
        session.render(&mut screen).unwrap();
        assert_eq!(session.left(), 2);
        assert_eq!(screen.cursor(), (1, 1));
        let out = String::from_utf8_lossy(screen.terminal_mut().writer_mut()).into_owned();
        assert!(out.contains("\x1b[2Kcdefg"));
    }

    #[test]
    fn test_typing_past_width_keeps_cursor_visible() {
        let mut session = Session::from_text("");
        let mut screen = Screen::new(Terminal::new(Vec::new(), (4, 2)));
        keys(&mut session, "i123456");
        session.render(&mut screen).unwrap();

        assert_eq!(session.left(), 3);
        assert_eq!(screen.cursor(), (4, 1));
        let out = String::from_utf8_lossy(screen.terminal_mut().writer_mut()).into_owned();
        assert!(out.contains("\x1b[2K456"));
    }

    #[test]
    fn test_insert_status() {
        let mut session = Session::from_text("");
        keys(&mut session, "ihi");
        let mut screen = Screen::new(Terminal::new(Vec::new(), (30, 3)));
        session.render(&mut screen).unwrap();
        let out = String::from_utf8_lossy(screen.terminal_mut().writer_mut()).into_owned();
        assert!(out.contains("-- INSERT --"));
        assert!(out.contains("1:3  undo:2"));
    }
}
