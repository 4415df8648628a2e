/// What the Player is allowed to ask about the world around it.
///
/// The Player never sees `GridWorld` or `DialogueRegistry` directly;
/// it only gets these two capabilities, passed in on every step.

/// Movement gate: can an actor step into (x, y)?
pub trait Passability {
    fn is_passable(&self, x: i32, y: i32) -> bool;
}

/// Speech lookup: what does whoever stands at (x, y) say?
/// Always answers; an empty cell yields a default line.
pub trait Dialogue {
    fn message_at(&self, x: i32, y: i32) -> &str;
}
