/// Town setup: turns a `GameConfig` into the live objects of a session.
///
/// ## Construction order (acyclic):
///   1. `GridWorld`, bounds + cast, checked for size/out-of-bounds/collisions
///   2. `DialogueRegistry`, built from the same cast
///   3. `Player`, start checked against bounds and the cast
///
/// Nothing here knows about the Player when building the world, and the
/// Player never holds the world; the session passes it in on every step.

use crate::config::{CastConfig, GameConfig};
use crate::domain::entity::{Facing, NonPlayerCharacter, Player};
use crate::error::SetupError;
use super::dialogue::DialogueRegistry;
use super::world::GridWorld;

/// Everything a session needs, already validated.
#[derive(Clone, Debug)]
pub struct Setup {
    pub world: GridWorld,
    pub dialogue: DialogueRegistry,
    pub player: Player,
}

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

/// Build the town described by `config`, failing fast on any bad placement.
pub fn build(config: &GameConfig) -> Result<Setup, SetupError> {
    let cast = config.cast.iter()
        .map(to_npc)
        .collect::<Result<Vec<_>, _>>()?;

    let world = GridWorld::new(config.world.width, config.world.height, cast)?;
    let dialogue = DialogueRegistry::from_cast(world.cast());
    let player = place_player(&world, config)?;

    log::info!(
        "town ready: {}x{}, {} townspeople, player at ({}, {}) facing {:?}",
        world.width(), world.height(), world.cast().len(),
        player.x, player.y, player.facing,
    );

    Ok(Setup { world, dialogue, player })
}

// ══════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════

fn to_npc(entry: &CastConfig) -> Result<NonPlayerCharacter, SetupError> {
    let mut chars = entry.icon.chars();
    let icon = match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => c,
        _ => return Err(SetupError::BadIcon(entry.icon.clone())),
    };
    Ok(NonPlayerCharacter::new(entry.x, entry.y, icon, entry.dialogue.clone()))
}

fn place_player(world: &GridWorld, config: &GameConfig) -> Result<Player, SetupError> {
    let start = &config.player;
    let facing = Facing::from_name(&start.facing)
        .ok_or_else(|| SetupError::BadFacing(start.facing.clone()))?;

    if !world.is_within_bounds(start.x, start.y) {
        return Err(SetupError::PlayerOutOfBounds {
            x: start.x,
            y: start.y,
            width: world.width(),
            height: world.height(),
        });
    }
    if world.is_occupied(start.x, start.y) {
        return Err(SetupError::PlayerOnNpc { x: start.x, y: start.y });
    }

    Ok(Player::new(start.x, start.y, facing))
}
