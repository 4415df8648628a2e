/// Presentation layer: text frames and the screen they are printed on.
///
/// `render` is pure. It knows nothing about the player or the terminal; the
/// session hands it every glyph to draw, keyed by cell.
///
/// Frame layout for a W x H world:
///   ```text
///   +------+      top border: W dashes
///   |  K   |      H rows, W cells each
///   |      |
///   +------+      bottom border
///   ######        optional message box: len(message) + 2 hashes
///    hello        one space, then the message
///   ######
///   ```

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, BufWriter, Stdout, Write};

use crossterm::terminal;

use crate::domain::entity::Pos;
use crate::sim::world::GridWorld;

// ── Frame ──

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<String>,
    grid_rows: usize,
}

impl Frame {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The bordered map, without the message box.
    #[allow(dead_code)]
    pub fn grid(&self) -> &[String] {
        &self.lines[..self.grid_rows]
    }

    /// The message box lines, empty when there is no message.
    #[allow(dead_code)]
    pub fn message_box(&self) -> &[String] {
        &self.lines[self.grid_rows..]
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

// ── Rendering ──

pub fn render(world: &GridWorld, occupants: &BTreeMap<Pos, char>, message: &str) -> Frame {
    let width = world.width();
    let height = world.height();
    let mut lines = Vec::with_capacity(height as usize + 5);

    let border = horizontal_border(width);
    lines.push(border.clone());
    for y in 0..height {
        let mut row = String::with_capacity(width as usize + 2);
        row.push('|');
        for x in 0..width {
            row.push(occupants.get(&(x, y)).copied().unwrap_or(' '));
        }
        row.push('|');
        lines.push(row);
    }
    lines.push(border);
    let grid_rows = lines.len();

    if !message.is_empty() {
        let rule = "#".repeat(message.chars().count() + 2);
        lines.push(rule.clone());
        lines.push(format!(" {message}"));
        lines.push(rule);
    }

    Frame { lines, grid_rows }
}

fn horizontal_border(width: i32) -> String {
    format!("+{}+", "-".repeat(width as usize))
}

// ── Output ──

/// Where the session writes everything it shows the player.
pub trait FrameSink {
    /// Plain text lines (help banner, farewell).
    fn show_text(&mut self, lines: &[&str]) -> io::Result<()>;
    fn show_frame(&mut self, frame: &Frame) -> io::Result<()>;
}

/// Standard output. Each frame is one batched write followed by a blank line.
///
/// Lines end in `\r\n` because the terminal is in raw mode while we read keys,
/// and raw mode does not turn `\n` into a carriage return.
pub struct Screen {
    writer: BufWriter<Stdout>,
    raw: bool,
}

impl Screen {
    pub fn new() -> Self {
        Screen {
            writer: BufWriter::with_capacity(4096, io::stdout()),
            raw: false,
        }
    }

    /// Put the terminal into raw mode so single key presses reach us unbuffered.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        self.writer.flush()?;
        if self.raw {
            self.raw = false;
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    fn write_lines<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) -> io::Result<()> {
        for line in lines {
            self.writer.write_all(line.as_bytes())?;
            self.writer.write_all(b"\r\n")?;
        }
        self.writer.flush()
    }
}

impl Default for Screen {
    fn default() -> Self {
        Screen::new()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

impl FrameSink for Screen {
    fn show_text(&mut self, lines: &[&str]) -> io::Result<()> {
        self.write_lines(lines.iter().copied())
    }

    fn show_frame(&mut self, frame: &Frame) -> io::Result<()> {
        self.write_lines(frame.lines().iter().map(String::as_str).chain([""]))
    }
}
