/// Events emitted by a single step.
/// The session consumes these to pick the next frame's message and to log.

use crate::domain::entity::{Facing, Pos};

#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub enum GameEvent {
    Turned { facing: Facing },
    Moved { from: Pos, to: Pos },
    Blocked { at: Pos },
    Spoke { at: Pos, message: String },
    QuitRequested,
}
