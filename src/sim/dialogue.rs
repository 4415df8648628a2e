/// Who says what, keyed by the cell they stand on.

use std::collections::HashMap;

use crate::domain::entity::{NonPlayerCharacter, Pos};
use crate::domain::surroundings::Dialogue;

/// Reply when talking to an empty cell (or to a wall).
pub const NO_ONE: &str = "no one exists.";

#[derive(Clone, Debug, Default)]
pub struct DialogueRegistry {
    lines: HashMap<Pos, String>,
}

impl DialogueRegistry {
    pub fn from_cast(cast: &[NonPlayerCharacter]) -> Self {
        DialogueRegistry {
            lines: cast.iter().map(|npc| (npc.pos(), npc.dialogue.clone())).collect(),
        }
    }
}

impl Dialogue for DialogueRegistry {
    fn message_at(&self, x: i32, y: i32) -> &str {
        self.lines.get(&(x, y)).map(String::as_str).unwrap_or(NO_ONE)
    }
}
