/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to the built-in town if the file is missing or incomplete.
/// Values are NOT validated here; `sim::level::build` rejects bad worlds.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub cast: Vec<CastConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    pub width: i32,
    pub height: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerConfig {
    pub x: i32,
    pub y: i32,
    pub facing: String,
}

/// One townsperson as written in the config file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CastConfig {
    pub x: i32,
    pub y: i32,
    pub icon: String,
    pub dialogue: String,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    world: TomlWorld,
    #[serde(default)]
    player: TomlPlayer,
    #[serde(default)]
    cast: Option<Vec<CastConfig>>,
}

#[derive(Deserialize, Debug)]
struct TomlWorld {
    #[serde(default = "default_width")]
    width: i32,
    #[serde(default = "default_height")]
    height: i32,
}

#[derive(Deserialize, Debug)]
struct TomlPlayer {
    #[serde(default = "default_player_x")]
    x: i32,
    #[serde(default = "default_player_y")]
    y: i32,
    #[serde(default = "default_facing")]
    facing: String,
}

// ── Defaults ──

fn default_width() -> i32 { 14 }
fn default_height() -> i32 { 7 }
fn default_player_x() -> i32 { 6 }
fn default_player_y() -> i32 { 4 }
fn default_facing() -> String { "up".into() }

fn default_cast() -> Vec<CastConfig> {
    vec![
        cast_member(6, 1, "K", "Death Should Not Have Taken Thee!"),
        cast_member(1, 5, "S", "I'm a soldier."),
        cast_member(10, 6, "s", "No response. Looks dead."),
    ]
}

fn cast_member(x: i32, y: i32, icon: &str, dialogue: &str) -> CastConfig {
    CastConfig { x, y, icon: icon.into(), dialogue: dialogue.into() }
}

impl Default for TomlWorld {
    fn default() -> Self {
        TomlWorld {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for TomlPlayer {
    fn default() -> Self {
        TomlPlayer {
            x: default_player_x(),
            y: default_player_y(),
            facing: default_facing(),
        }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(toml_cfg: TomlConfig) -> Self {
        GameConfig {
            world: WorldConfig {
                width: toml_cfg.world.width,
                height: toml_cfg.world.height,
            },
            player: PlayerConfig {
                x: toml_cfg.player.x,
                y: toml_cfg.player.y,
                facing: toml_cfg.player.facing,
            },
            // An absent `[[cast]]` means the built-in town; `cast = []` means nobody.
            cast: toml_cfg.cast.unwrap_or_else(default_cast),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) `~/.config/townwalk`.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        load_toml(&candidate_dirs()).into()
    }

    /// Parse a config document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(GameConfig::from)
    }
}

/// Candidate directories to search: exe dir + CWD + user config dir (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. ~/.config/townwalk
    if let Ok(home) = std::env::var("HOME") {
        let user = PathBuf::from(&home).join(".config/townwalk");
        if user.is_dir() && !dirs.iter().any(|d| d == &user) {
            dirs.push(user);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => {
                        log::info!("loaded {}", path.display());
                        return cfg;
                    }
                    Err(e) => {
                        log::warn!("{} parse error: {e}", path.display());
                        log::warn!("using the built-in town");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    log::warn!("could not read {}: {e}", path.display());
                }
            }
        }
    }
    log::debug!("no config.toml found, using the built-in town");
    TomlConfig::default()
}
