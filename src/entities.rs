//! All game data types. Pure data; the only behavior is construction.

use crate::score::HighScoreRecord;

/// Number of enemy sprite variants in the fixed palette.
pub const ENEMY_VARIANTS: u8 = 4;

/// Renderer handle carried by every entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Ship,
    ShipBullet,
    EnemyBullet,
    /// Index into the enemy palette, in `0..ENEMY_VARIANTS`.
    Enemy(u8),
}

/// An axis-aligned rectangular game object in pixel units.
///
/// `alive` tracks the enemy lifecycle (false once destroyed, removed on the
/// next sweep); `used` tracks the projectile lifecycle (true once it has hit
/// something). Each entity is value-owned by the list that created it.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub sprite: Sprite,
    pub alive: bool,
    pub used: bool,
}

impl Entity {
    pub fn new(x: i32, y: i32, w: i32, h: i32, sprite: Sprite) -> Self {
        Entity {
            x,
            y,
            w,
            h,
            sprite,
            alive: true,
            used: false,
        }
    }
}

/// Top-level game mode.
///
/// Simulation and movement/fire input advance only in `Playing`; `Paused`
/// accepts resume and quit; `GameOver` accepts restart.
#[derive(Clone, Debug, PartialEq)]
pub enum GameMode {
    Playing,
    Paused,
    GameOver,
}

/// Held actions sampled once per tick by the shell.
///
/// Pause-toggle, resume, restart and quit are edge-triggered events rather
/// than held actions; the shell delivers those by calling the transition
/// functions in [`crate::compute`] on discrete key presses.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

/// The entire game state. Cloneable so pure update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player_name: String,
    pub ship: Entity,
    pub enemies: Vec<Entity>,
    /// Player bullets, travelling upward.
    pub bullets: Vec<Entity>,
    /// Enemy bullets, travelling downward.
    pub enemy_bullets: Vec<Entity>,
    pub score: u32,
    pub mode: GameMode,
    /// Tick counter; doubles as the deterministic clock behind the
    /// fire-cooldown and spawn timers.
    pub frame: u64,
    /// Frame of the last player volley. `None` means the next fire input is
    /// honored immediately.
    pub last_fired_frame: Option<u64>,
    pub last_spawn_frame: u64,
    /// Difficulty outputs, recomputed from the score at the end of every tick
    /// and applied to the next tick's movement phases.
    pub fall_speed: i32,
    pub enemy_bullet_speed: i32,
    /// In-memory copy of the persisted record. Updated on game over even when
    /// the disk write later fails.
    pub high_score: HighScoreRecord,
}
