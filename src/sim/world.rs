/// GridWorld: the bounded map and the townspeople standing on it.
///
/// ## Invariants
///
/// Both are checked once, in `GridWorld::new`, and hold for the world's lifetime:
///   - `width` and `height` are in `1..=MAX_SIDE`.
///   - Every townsperson is in bounds and no two share a cell.
///
/// The cast is never mutated after construction, so every query below is a
/// total function over `i32` coordinates.

use std::collections::{BTreeMap, HashSet};

use crate::domain::entity::{NonPlayerCharacter, Pos};
use crate::domain::surroundings::Passability;
use crate::error::SetupError;

/// Largest accepted side length. The whole map is redrawn as one text block,
/// so anything bigger would not fit a terminal anyway.
pub const MAX_SIDE: i32 = 256;

#[derive(Clone, Debug)]
pub struct GridWorld {
    width: i32,
    height: i32,
    cast: Vec<NonPlayerCharacter>,
}

// ── Construction ──

impl GridWorld {
    pub fn new(width: i32, height: i32, cast: Vec<NonPlayerCharacter>) -> Result<Self, SetupError> {
        if !(1..=MAX_SIDE).contains(&width) || !(1..=MAX_SIDE).contains(&height) {
            return Err(SetupError::InvalidSize { width, height, max: MAX_SIDE });
        }

        let mut world = GridWorld { width, height, cast: Vec::with_capacity(cast.len()) };
        let mut taken: HashSet<Pos> = HashSet::with_capacity(cast.len());
        for npc in cast {
            if !world.is_within_bounds(npc.x, npc.y) {
                return Err(SetupError::NpcOutOfBounds { x: npc.x, y: npc.y, width, height });
            }
            if !taken.insert(npc.pos()) {
                return Err(SetupError::NpcCollision { x: npc.x, y: npc.y });
            }
            world.cast.push(npc);
        }
        Ok(world)
    }
}

// ── Queries ──

impl GridWorld {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cast(&self) -> &[NonPlayerCharacter] {
        &self.cast
    }

    #[inline]
    pub fn is_within_bounds(&self, x: i32, y: i32) -> bool {
        0 <= x && x < self.width && 0 <= y && y < self.height
    }

    /// Townsperson standing at (x, y), if any.
    pub fn npc_at(&self, x: i32, y: i32) -> Option<&NonPlayerCharacter> {
        self.cast.iter().find(|npc| npc.x == x && npc.y == y)
    }

    #[inline]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.npc_at(x, y).is_some()
    }

    /// Glyphs of everyone on the map except the player, keyed by cell.
    pub fn occupant_icons(&self) -> BTreeMap<Pos, char> {
        self.cast.iter().map(|npc| (npc.pos(), npc.icon)).collect()
    }
}

impl Passability for GridWorld {
    /// In bounds and not standing room for a townsperson.
    /// The mover's own cell is not special-cased.
    fn is_passable(&self, x: i32, y: i32) -> bool {
        self.is_within_bounds(x, y) && !self.is_occupied(x, y)
    }
}
