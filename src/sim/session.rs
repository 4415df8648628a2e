/// Session: the interaction loop.
///
/// Owns the world, the dialogue registry and the player, and wires them
/// together on every step. One cycle:
///   1. Read a raw byte from the input source (blocking)
///   2. Decode it; unknown bytes are dropped without redrawing
///   3. Quit → say goodbye and stop; otherwise step the player
///   4. Render and emit a frame (message only right after Talk)

use std::collections::BTreeMap;
use std::io;

use crate::domain::entity::{Command, Player, Pos};
use crate::ui::input::InputSource;
use crate::ui::renderer::{self, Frame, FrameSink};
use super::dialogue::DialogueRegistry;
use super::event::GameEvent;
use super::level::Setup;
use super::step;
use super::world::GridWorld;

pub const HELP_BANNER: &[&str] = &[
    "---------------------------------",
    "w: up, a: left, s: right, z: down",
    "t: talk, ctrl+c: quit",
    "---------------------------------",
];

pub const FAREWELL: &str = "bye!";

/// Why `run` returned.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionEnd {
    Quit,
    InputClosed,
}

pub struct Session {
    world: GridWorld,
    dialogue: DialogueRegistry,
    player: Player,
    /// Commands applied so far (quit excluded).
    turns: u64,
}

impl Session {
    pub fn new(setup: Setup) -> Self {
        Session {
            world: setup.world,
            dialogue: setup.dialogue,
            player: setup.player,
            turns: 0,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Everyone's glyph by cell. The player goes in last.
    fn occupants(&self) -> BTreeMap<Pos, char> {
        let mut icons = self.world.occupant_icons();
        icons.insert(self.player.pos(), self.player.icon());
        icons
    }

    /// Render the current state with an optional message box.
    pub fn frame(&self, message: &str) -> Frame {
        renderer::render(&self.world, &self.occupants(), message)
    }

    /// Apply one decoded command.
    /// Returns the message for the next frame, or `None` on quit.
    pub fn apply(&mut self, command: Command) -> Option<String> {
        let events = step::step(&mut self.player, &self.world, &self.dialogue, command);

        let mut message = String::new();
        for event in events {
            log::debug!("{command:?}: {event:?}");
            match event {
                GameEvent::QuitRequested => return None,
                GameEvent::Spoke { message: line, .. } => message = line,
                GameEvent::Turned { .. } | GameEvent::Moved { .. } | GameEvent::Blocked { .. } => {}
            }
        }
        self.turns += 1;
        Some(message)
    }

    /// Drive the loop until quit or until the input source runs dry.
    pub fn run<I, S>(&mut self, input: &mut I, sink: &mut S) -> io::Result<SessionEnd>
    where
        I: InputSource + ?Sized,
        S: FrameSink + ?Sized,
    {
        sink.show_text(HELP_BANNER)?;
        sink.show_frame(&self.frame(""))?;

        while let Some(raw) = input.next_raw()? {
            let Some(command) = Command::decode(raw) else {
                log::trace!("ignoring raw input {raw}");
                continue;
            };

            match self.apply(command) {
                Some(message) => sink.show_frame(&self.frame(&message))?,
                None => {
                    sink.show_text(&[FAREWELL])?;
                    log::info!("quit after {} turns", self.turns);
                    return Ok(SessionEnd::Quit);
                }
            }
        }

        log::info!("input closed after {} turns", self.turns);
        Ok(SessionEnd::InputClosed)
    }
}
