/// The step function: applies one command to the player.
///
/// Processing order for a move:
///   1. Turn to the new direction (always, even if the move fails)
///   2. Check the target cell against `Passability`
///   3. Move, or stay put
///
/// Talk looks one cell ahead in the current facing and asks `Dialogue`.
/// Neither position nor facing changes.
///
/// The world is only ever read here. All mutation is on `Player`.

use crate::domain::entity::{Command, Facing, Player};
use crate::domain::surroundings::{Dialogue, Passability};
use super::event::GameEvent;

// ══════════════════════════════════════════════════════════════
// Main entry point
// ══════════════════════════════════════════════════════════════

pub fn step<W, D>(player: &mut Player, world: &W, dialogue: &D, command: Command) -> Vec<GameEvent>
where
    W: Passability + ?Sized,
    D: Dialogue + ?Sized,
{
    let mut events: Vec<GameEvent> = Vec::new();

    match (command, command.direction()) {
        (_, Some(dir)) => resolve_move(player, world, dir, &mut events),
        (Command::Talk, None) => resolve_talk(player, dialogue, &mut events),
        (_, None) => events.push(GameEvent::QuitRequested),
    }

    events
}

// ══════════════════════════════════════════════════════════════
// Movement
// ══════════════════════════════════════════════════════════════

fn resolve_move<W>(player: &mut Player, world: &W, dir: Facing, events: &mut Vec<GameEvent>)
where
    W: Passability + ?Sized,
{
    if player.facing != dir {
        player.facing = dir;
        events.push(GameEvent::Turned { facing: dir });
    }

    let from = player.pos();
    let (tx, ty) = player.neighbor(dir);
    if world.is_passable(tx, ty) {
        player.x = tx;
        player.y = ty;
        events.push(GameEvent::Moved { from, to: (tx, ty) });
    } else {
        events.push(GameEvent::Blocked { at: (tx, ty) });
    }
}

// ══════════════════════════════════════════════════════════════
// Talk
// ══════════════════════════════════════════════════════════════

fn resolve_talk<D>(player: &Player, dialogue: &D, events: &mut Vec<GameEvent>)
where
    D: Dialogue + ?Sized,
{
    let (ax, ay) = player.ahead();
    events.push(GameEvent::Spoke {
        at: (ax, ay),
        message: dialogue.message_at(ax, ay).to_string(),
    });
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::NonPlayerCharacter;
    use crate::sim::dialogue::{DialogueRegistry, NO_ONE};
    use crate::sim::world::GridWorld;

    const ALL: [Command; 5] = [
        Command::MoveUp,
        Command::MoveDown,
        Command::MoveLeft,
        Command::MoveRight,
        Command::Talk,
    ];

    fn cast() -> Vec<NonPlayerCharacter> {
        vec![
            NonPlayerCharacter::new(6, 1, 'K', "Death Should Not Have Taken Thee!"),
            NonPlayerCharacter::new(1, 5, 'S', "I'm a soldier."),
            NonPlayerCharacter::new(10, 6, 's', "No response. Looks dead."),
        ]
    }

    fn town() -> (GridWorld, DialogueRegistry) {
        let cast = cast();
        let dialogue = DialogueRegistry::from_cast(&cast);
        (GridWorld::new(14, 7, cast).unwrap(), dialogue)
    }

    // ── movement ──

    #[test]
    fn move_into_free_cell() {
        let (w, d) = town();
        let mut p = Player::new(6, 4, Facing::Up);
        let events = step(&mut p, &w, &d, Command::MoveUp);
        assert_eq!(p.pos(), (6, 3));
        assert_eq!(p.icon(), '^');
        assert_eq!(events, vec![GameEvent::Moved { from: (6, 4), to: (6, 3) }]);
    }

    #[test]
    fn move_turns_then_moves() {
        let (w, d) = town();
        let mut p = Player::new(6, 4, Facing::Up);
        let events = step(&mut p, &w, &d, Command::MoveRight);
        assert_eq!(p.pos(), (7, 4));
        assert_eq!(p.icon(), '>');
        assert_eq!(events[0], GameEvent::Turned { facing: Facing::Right });
    }

    #[test]
    fn blocked_by_townsperson_still_turns() {
        let (w, d) = town();
        let mut p = Player::new(6, 2, Facing::Down);
        let events = step(&mut p, &w, &d, Command::MoveUp);
        assert_eq!(p.pos(), (6, 2));
        assert_eq!(p.facing, Facing::Up);
        assert_eq!(events.last(), Some(&GameEvent::Blocked { at: (6, 1) }));
    }

    #[test]
    fn blocked_by_edge() {
        let (w, d) = town();
        let mut p = Player::new(0, 0, Facing::Up);
        step(&mut p, &w, &d, Command::MoveLeft);
        assert_eq!(p.pos(), (0, 0));
        assert_eq!(p.facing, Facing::Left);
        step(&mut p, &w, &d, Command::MoveUp);
        assert_eq!(p.pos(), (0, 0));
        assert_eq!(p.facing, Facing::Up);
    }

    #[test]
    fn blocked_move_is_idempotent() {
        let (w, d) = town();
        let mut p = Player::new(13, 3, Facing::Down);
        for _ in 0..10 {
            step(&mut p, &w, &d, Command::MoveRight);
            assert_eq!(p.pos(), (13, 3));
            assert_eq!(p.icon(), '>');
        }
    }

    #[test]
    fn position_stays_in_bounds_for_every_short_sequence() {
        let (w, d) = town();
        // Every sequence of 5 commands, from two different starts.
        for start in [(6, 4), (0, 0)] {
            for n in 0..ALL.len().pow(5) {
                let mut p = Player::new(start.0, start.1, Facing::Up);
                let mut k = n;
                for _ in 0..5 {
                    let cmd = ALL[k % ALL.len()];
                    k /= ALL.len();
                    step(&mut p, &w, &d, cmd);
                    assert!(w.is_within_bounds(p.x, p.y), "left bounds at {:?}", p.pos());
                    assert!(!w.is_occupied(p.x, p.y), "walked onto townsperson at {:?}", p.pos());
                }
            }
        }
    }

    #[test]
    fn walking_into_wall_from_far_side() {
        let (w, d) = town();
        let mut p = Player::new(6, 4, Facing::Up);
        for _ in 0..20 {
            step(&mut p, &w, &d, Command::MoveDown);
        }
        assert_eq!(p.pos(), (6, 6));
        assert_eq!(p.icon(), 'v');
    }

    // ── talk ──

    #[test]
    fn talk_to_empty_cell() {
        let (w, d) = town();
        let mut p = Player::new(6, 3, Facing::Up);
        let events = step(&mut p, &w, &d, Command::Talk);
        assert_eq!(events, vec![GameEvent::Spoke { at: (6, 2), message: NO_ONE.to_string() }]);
    }

    #[test]
    fn talk_to_townsperson_ahead() {
        let (w, d) = town();
        let mut p = Player::new(6, 2, Facing::Up);
        let events = step(&mut p, &w, &d, Command::Talk);
        assert_eq!(events, vec![GameEvent::Spoke {
            at: (6, 1),
            message: "Death Should Not Have Taken Thee!".to_string(),
        }]);
    }

    #[test]
    fn talk_uses_current_facing() {
        let (w, d) = town();
        // Soldier at (1, 5); stand to his right, facing left.
        let mut p = Player::new(2, 5, Facing::Left);
        let events = step(&mut p, &w, &d, Command::Talk);
        assert!(matches!(&events[0], GameEvent::Spoke { message, .. } if message == "I'm a soldier."));
    }

    #[test]
    fn talk_never_moves_or_turns() {
        let (w, d) = town();
        for facing in [Facing::Up, Facing::Down, Facing::Left, Facing::Right] {
            for start in [(6, 2), (0, 0), (13, 6), (11, 6)] {
                let mut p = Player::new(start.0, start.1, facing);
                let before = p.clone();
                step(&mut p, &w, &d, Command::Talk);
                assert_eq!(p, before);
            }
        }
    }

    #[test]
    fn talk_past_edge_is_no_one() {
        let (w, d) = town();
        let mut p = Player::new(0, 0, Facing::Left);
        let events = step(&mut p, &w, &d, Command::Talk);
        assert!(matches!(&events[0], GameEvent::Spoke { at: (-1, 0), message } if message == NO_ONE));
    }

    // ── quit ──

    #[test]
    fn quit_leaves_player_alone() {
        let (w, d) = town();
        let mut p = Player::new(6, 4, Facing::Up);
        let events = step(&mut p, &w, &d, Command::Quit);
        assert_eq!(events, vec![GameEvent::QuitRequested]);
        assert_eq!(p, Player::new(6, 4, Facing::Up));
    }
}
