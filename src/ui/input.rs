/// Input sources: where raw key bytes come from.
///
/// The session only ever sees raw bytes (the same values a `getch` would
/// return), and decodes them itself with `Command::decode`.
///
///   - `TerminalInput` blocks on crossterm key events. Requires raw mode
///     (`Screen::init`) so keys arrive one at a time and Ctrl-C is not
///     turned into a signal.
///   - `ScriptedInput` replays a fixed key sequence, for tests and demos.

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub trait InputSource {
    /// Block until the next raw key byte is available.
    /// `Ok(None)` means the source is exhausted and no more input will come.
    fn next_raw(&mut self) -> io::Result<Option<u8>>;
}

// ── Terminal ──

pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn next_raw(&mut self) -> io::Result<Option<u8>> {
        loop {
            // Resize, focus, mouse and paste events are not input.
            if let Event::Key(key) = event::read()? {
                if let Some(raw) = key_to_raw(&key) {
                    return Ok(Some(raw));
                }
            }
        }
    }
}

/// Translate a key event into the byte a raw terminal read would give.
/// Releases are ignored; auto-repeat counts as another press.
pub fn key_to_raw(key: &KeyEvent) -> Option<u8> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            // Ctrl-A..Ctrl-Z → 1..26
            c.is_ascii_alphabetic().then(|| (c.to_ascii_lowercase() as u8) & 0x1f)
        }
        KeyCode::Char(c) if c.is_ascii() => Some(c as u8),
        KeyCode::Enter => Some(b'\r'),
        KeyCode::Tab => Some(b'\t'),
        KeyCode::Backspace => Some(0x7f),
        KeyCode::Esc => Some(0x1b),
        _ => None,
    }
}

// ── Scripted ──

pub struct ScriptedInput {
    keys: Vec<u8>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn from_bytes(keys: impl Into<Vec<u8>>) -> Self {
        ScriptedInput { keys: keys.into(), cursor: 0 }
    }

    /// Parse a key script.
    ///
    /// Every character of a line is one key press; `^C` stands for Ctrl-C.
    /// Blank lines and lines starting with `#` are skipped. Line breaks are
    /// not keys.
    pub fn parse(script: &str) -> Self {
        let mut keys = Vec::new();
        for line in script.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let mut chars = trimmed.chars().peekable();
            while let Some(c) = chars.next() {
                if c == '^' && chars.peek() == Some(&'C') {
                    chars.next();
                    keys.push(3);
                } else if c.is_ascii() {
                    keys.push(c as u8);
                } else {
                    log::warn!("skipping non-ASCII key {c:?} in script");
                }
            }
        }
        ScriptedInput::from_bytes(keys)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(ScriptedInput::parse(&text))
    }

    pub fn remaining(&self) -> usize {
        self.keys.len() - self.cursor
    }
}

impl InputSource for ScriptedInput {
    fn next_raw(&mut self) -> io::Result<Option<u8>> {
        let key = self.keys.get(self.cursor).copied();
        if key.is_some() {
            self.cursor += 1;
        }
        Ok(key)
    }
}
