/// Setup errors: a world configuration that must not reach the game loop.
///
/// Everything at runtime is total (blocked moves, empty talk and unknown keys
/// are not errors), so this is the only domain error type.

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("world size {width}x{height} is invalid (each side must be 1..={max})")]
    InvalidSize { width: i32, height: i32, max: i32 },

    #[error("player start ({x}, {y}) is outside the {width}x{height} world")]
    PlayerOutOfBounds { x: i32, y: i32, width: i32, height: i32 },

    #[error("unknown player facing {0:?} (expected up, down, left or right)")]
    BadFacing(String),

    #[error("townsperson at ({x}, {y}) is outside the {width}x{height} world")]
    NpcOutOfBounds { x: i32, y: i32, width: i32, height: i32 },

    #[error("two townspeople share cell ({x}, {y})")]
    NpcCollision { x: i32, y: i32 },

    #[error("player start ({x}, {y}) is occupied by a townsperson")]
    PlayerOnNpc { x: i32, y: i32 },

    #[error("townsperson icon {0:?} must be exactly one character")]
    BadIcon(String),
}
