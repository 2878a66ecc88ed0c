//! TUI application state, rendering, and input handling.

use std::path::PathBuf;

use conversation::{ConversationSession, Navigator, Update};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use proto::{Feature, NavigationState};
use ratatui::Frame;

use super::{chat, home};

/// Spinner animation frames (Braille pattern).
pub const SPINNER: &[char] = &['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

/// Work the event loop performs off the key handler.
pub enum Action {
    /// Send the session's draft (or selected file).
    Send(ConversationSession),
    /// Read `path` and hand it to the session.
    SelectFile {
        session: ConversationSession,
        path: PathBuf,
    },
}

// ─── TuiApp ──────────────────────────────────────────────────

/// Full state for the TUI.
///
/// Conversation state lives in the sessions owned by `navigator`; this only
/// tracks what is local to the terminal (cursors, scroll, notices).
pub struct TuiApp {
    /// Navigation state machine and session store.
    pub navigator: Navigator,
    /// Highlighted row on the menu screen.
    pub menu_cursor: usize,
    /// Cursor position within the active draft (byte offset).
    pub cursor_pos: usize,
    /// Lines scrolled up from the bottom of the chat log.
    pub scroll_back: u16,
    /// One-line local message shown above the input (usage hints, file errors).
    pub notice: Option<String>,
    /// Spinner animation tick counter.
    pub spinner_tick: u8,
    /// Whether the user requested exit.
    pub should_quit: bool,
}

impl TuiApp {
    /// Create a new TUI application state on the menu screen.
    pub fn new(navigator: Navigator) -> Self {
        Self {
            navigator,
            menu_cursor: 0,
            cursor_pos: 0,
            scroll_back: 0,
            notice: None,
            spinner_tick: 0,
            should_quit: false,
        }
    }

    /// Whether the active session is waiting on its backend.
    pub fn is_busy(&self) -> bool {
        self.navigator
            .active_session()
            .is_some_and(ConversationSession::is_busy)
    }

    /// Current spinner frame.
    pub fn spinner(&self) -> char {
        SPINNER[self.spinner_tick as usize % SPINNER.len()]
    }

    /// Cursor clamped to the draft, which sessions may rewrite underneath us.
    pub fn cursor_in(&self, draft: &str) -> usize {
        if self.cursor_pos > draft.len() || !draft.is_char_boundary(self.cursor_pos) {
            draft.len()
        } else {
            self.cursor_pos
        }
    }

    /// Reacts to a change notification from the navigator or a session.
    pub fn apply_update(&mut self, update: Update) {
        match update {
            Update::Navigation(_) => {}
            Update::Session(feature) => {
                // New output on the visible session jumps back to the bottom.
                if self.navigator.state() == NavigationState::Active(feature) {
                    self.scroll_back = 0;
                }
            }
        }
    }

    // ── Input handling ───────────────────────────────────────

    /// Handle a keyboard event, returning async work for the event loop.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }
        match self.navigator.state() {
            NavigationState::Menu => {
                self.handle_menu_key(key);
                None
            }
            NavigationState::Active(_) => self.handle_chat_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let count = Feature::ALL.len();
        match key.code {
            KeyCode::Up => self.menu_cursor = (self.menu_cursor + count - 1) % count,
            KeyCode::Down | KeyCode::Tab => self.menu_cursor = (self.menu_cursor + 1) % count,
            KeyCode::Char(c @ '1'..='5') => {
                self.menu_cursor = c as usize - '1' as usize;
                self.open_selected();
            }
            KeyCode::Enter => self.open_selected(),
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn open_selected(&mut self) {
        let feature = Feature::ALL[self.menu_cursor];
        if let Some(session) = self.navigator.select_feature(feature) {
            self.cursor_pos = session.draft().len();
            self.scroll_back = 0;
            self.notice = None;
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) -> Option<Action> {
        let session = self.navigator.active_session()?.clone();
        let mut draft = session.draft();
        let cursor = self.cursor_in(&draft);

        match key.code {
            KeyCode::Esc => {
                self.navigator.go_back();
                self.notice = None;
                None
            }
            KeyCode::Enter => self.submit(session),
            KeyCode::Char(c) => {
                draft.insert(cursor, c);
                self.cursor_pos = cursor + c.len_utf8();
                session.set_draft(draft);
                None
            }
            KeyCode::Backspace => {
                if let Some((prev, _)) = draft[..cursor].char_indices().last() {
                    draft.drain(prev..cursor);
                    self.cursor_pos = prev;
                    session.set_draft(draft);
                }
                None
            }
            KeyCode::Delete => {
                if let Some(c) = draft[cursor..].chars().next() {
                    draft.drain(cursor..cursor + c.len_utf8());
                    session.set_draft(draft);
                }
                None
            }
            KeyCode::Left => {
                self.cursor_pos = draft[..cursor]
                    .char_indices()
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
                None
            }
            KeyCode::Right => {
                self.cursor_pos = draft[cursor..]
                    .chars()
                    .next()
                    .map(|c| cursor + c.len_utf8())
                    .unwrap_or(draft.len());
                None
            }
            KeyCode::Home => {
                self.cursor_pos = 0;
                None
            }
            KeyCode::End => {
                self.cursor_pos = draft.len();
                None
            }
            KeyCode::Up => {
                self.scroll_back = self.scroll_back.saturating_add(1);
                None
            }
            KeyCode::Down => {
                self.scroll_back = self.scroll_back.saturating_sub(1);
                None
            }
            KeyCode::PageUp => {
                self.scroll_back = self.scroll_back.saturating_add(10);
                None
            }
            KeyCode::PageDown => {
                self.scroll_back = self.scroll_back.saturating_sub(10);
                None
            }
            _ => None,
        }
    }

    /// Enter on the chat screen: a `/file` command or a send.
    fn submit(&mut self, session: ConversationSession) -> Option<Action> {
        let view = session.view();

        if let Some(arg) = parse_file_command(&view.draft) {
            if !view.accepts_resource {
                self.notice = Some(format!("{} does not take files.", view.feature.title()));
                return None;
            }
            if arg.is_empty() {
                self.notice = Some("Usage: /file <path>".to_string());
                return None;
            }
            let path = PathBuf::from(arg);
            session.set_draft(String::new());
            self.cursor_pos = 0;
            self.notice = None;
            return Some(Action::SelectFile { session, path });
        }

        if view.busy {
            self.notice = Some("Still waiting for the previous reply.".to_string());
            return None;
        }
        if !view.accepts_questions {
            self.notice = Some("Upload a document first with /file <path>.".to_string());
            return None;
        }
        self.notice = None;
        self.scroll_back = 0;
        Some(Action::Send(session))
    }

    // ── Rendering ────────────────────────────────────────────

    /// Render the current screen into the given frame.
    pub fn render(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        match self.navigator.view().session {
            Some(session) => chat::render(self, &session, frame, area),
            None => home::render(self, frame, area),
        }
    }
}

/// Returns the argument of a `/file` command, or `None` for ordinary input.
pub fn parse_file_command(input: &str) -> Option<&str> {
    let rest = input.trim().strip_prefix("/file")?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}
