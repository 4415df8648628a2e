/// Entities: the Player and the townspeople (non-player characters).
/// The Player is a two-field state machine (position + facing);
/// townspeople never change after they are placed.

/// Grid coordinate. Signed so that "one step past the edge" is representable
/// and simply answers "out of bounds".
pub type Pos = (i32, i32);

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Facing {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Facing {
    /// Glyph drawn for the player while facing this way.
    pub fn icon(self) -> char {
        match self {
            Facing::Up => '^',
            Facing::Down => 'v',
            Facing::Left => '<',
            Facing::Right => '>',
        }
    }

    /// One-cell offset in this direction. Row 0 is the top of the map.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::Up => (0, -1),
            Facing::Down => (0, 1),
            Facing::Left => (-1, 0),
            Facing::Right => (1, 0),
        }
    }

    /// Parse a config name (`"up"`, `"Down"`, ...).
    pub fn from_name(name: &str) -> Option<Facing> {
        match name.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Facing::Up),
            "down" => Some(Facing::Down),
            "left" => Some(Facing::Left),
            "right" => Some(Facing::Right),
            _ => None,
        }
    }
}

// ── Commands ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Talk,
    Quit,
}

pub const RAW_UP: u8 = b'w';
pub const RAW_LEFT: u8 = b'a';
/// Rightward, despite the mnemonic.
pub const RAW_RIGHT: u8 = b's';
pub const RAW_DOWN: u8 = b'z';
pub const RAW_TALK: u8 = b't';
/// Ctrl-C.
pub const RAW_QUIT: u8 = 3;

const DECODE_TABLE: &[(u8, Command)] = &[
    (RAW_UP, Command::MoveUp),
    (RAW_LEFT, Command::MoveLeft),
    (RAW_RIGHT, Command::MoveRight),
    (RAW_DOWN, Command::MoveDown),
    (RAW_TALK, Command::Talk),
    (RAW_QUIT, Command::Quit),
];

impl Command {
    /// Map a raw input byte to a command. Anything outside the table is `None`.
    pub fn decode(raw: u8) -> Option<Command> {
        DECODE_TABLE
            .iter()
            .find(|(r, _)| *r == raw)
            .map(|(_, cmd)| *cmd)
    }

    /// Direction for movement commands.
    pub fn direction(self) -> Option<Facing> {
        match self {
            Command::MoveUp => Some(Facing::Up),
            Command::MoveDown => Some(Facing::Down),
            Command::MoveLeft => Some(Facing::Left),
            Command::MoveRight => Some(Facing::Right),
            Command::Talk | Command::Quit => None,
        }
    }
}

// ── Townspeople ──

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonPlayerCharacter {
    pub x: i32,
    pub y: i32,
    pub icon: char,
    pub dialogue: String,
}

impl NonPlayerCharacter {
    pub fn new(x: i32, y: i32, icon: char, dialogue: impl Into<String>) -> Self {
        NonPlayerCharacter { x, y, icon, dialogue: dialogue.into() }
    }

    pub fn pos(&self) -> Pos {
        (self.x, self.y)
    }
}

// ── Player ──

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub facing: Facing,
}

impl Player {
    pub fn new(x: i32, y: i32, facing: Facing) -> Self {
        Player { x, y, facing }
    }

    pub fn pos(&self) -> Pos {
        (self.x, self.y)
    }

    pub fn icon(&self) -> char {
        self.facing.icon()
    }

    /// The cell one step away in the given direction.
    pub fn neighbor(&self, dir: Facing) -> Pos {
        let (dx, dy) = dir.delta();
        (self.x + dx, self.y + dy)
    }

    /// The cell directly in front of the player.
    pub fn ahead(&self) -> Pos {
        self.neighbor(self.facing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_table_matches_keys() {
        assert_eq!(Command::decode(119), Some(Command::MoveUp));
        assert_eq!(Command::decode(97), Some(Command::MoveLeft));
        assert_eq!(Command::decode(115), Some(Command::MoveRight));
        assert_eq!(Command::decode(122), Some(Command::MoveDown));
        assert_eq!(Command::decode(116), Some(Command::Talk));
        assert_eq!(Command::decode(3), Some(Command::Quit));
    }

    #[test]
    fn unmapped_bytes_decode_to_nothing() {
        for raw in [b'd', b'W', b'q', b' ', 0, 27, 255] {
            assert_eq!(Command::decode(raw), None, "raw {raw}");
        }
    }

    #[test]
    fn facing_icons() {
        assert_eq!(Facing::Up.icon(), '^');
        assert_eq!(Facing::Down.icon(), 'v');
        assert_eq!(Facing::Left.icon(), '<');
        assert_eq!(Facing::Right.icon(), '>');
    }

    #[test]
    fn ahead_follows_facing() {
        let mut p = Player::new(6, 4, Facing::Up);
        assert_eq!(p.ahead(), (6, 3));
        p.facing = Facing::Down;
        assert_eq!(p.ahead(), (6, 5));
        p.facing = Facing::Left;
        assert_eq!(p.ahead(), (5, 4));
        p.facing = Facing::Right;
        assert_eq!(p.ahead(), (7, 4));
    }

    #[test]
    fn facing_names_are_case_insensitive() {
        assert_eq!(Facing::from_name("Up"), Some(Facing::Up));
        assert_eq!(Facing::from_name(" left "), Some(Facing::Left));
        assert_eq!(Facing::from_name("north"), None);
    }
}
