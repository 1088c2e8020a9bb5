//! Tunable simulation constants.
//!
//! Everything the update loop measures in pixels, frames or milliseconds
//! flows through [`GameConfig`] so tests can shrink the board or stretch the
//! timers without touching the core.

use std::time::Duration;

/// Simulation tuning. [`Default`] holds the production values.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Side of one board tile in pixels.
    pub tile_size: i32,
    /// Board width in tiles.
    pub board_cols: i32,
    /// Board height in tiles.
    pub board_rows: i32,
    /// Fixed simulation rate in ticks per second.
    pub tick_rate: u64,
    pub ship_w: i32,
    pub ship_h: i32,
    /// Horizontal ship speed in pixels per tick.
    pub ship_speed: i32,
    pub bullet_w: i32,
    pub bullet_h: i32,
    /// Player-bullet vertical speed in pixels per tick (negative = upward).
    pub bullet_vel_y: i32,
    pub enemy_w: i32,
    pub enemy_h: i32,
    /// Enemy fall speed below the lowest difficulty tier.
    pub base_fall_speed: i32,
    /// Enemy-bullet speed below the lowest difficulty tier.
    pub base_enemy_bullet_speed: i32,
    pub fire_cooldown_ms: u64,
    pub spawn_interval_ms: u64,
    /// Chance in percent that an alive enemy fires on a given tick.
    pub enemy_fire_percent: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            tile_size: 32,
            board_cols: 32,
            board_rows: 24,
            tick_rate: 60,
            ship_w: 64,
            ship_h: 32,
            ship_speed: 10,
            bullet_w: 16,
            bullet_h: 16,
            bullet_vel_y: -15,
            enemy_w: 64,
            enemy_h: 32,
            base_fall_speed: 3,
            base_enemy_bullet_speed: 5,
            fire_cooldown_ms: 200,
            spawn_interval_ms: 1000,
            enemy_fire_percent: 1,
        }
    }
}

impl GameConfig {
    pub fn board_width(&self) -> i32 {
        self.tile_size * self.board_cols
    }

    pub fn board_height(&self) -> i32 {
        self.tile_size * self.board_rows
    }

    /// Fixed row of the ship's top edge, two tiles above the board bottom.
    pub fn ship_y(&self) -> i32 {
        self.board_height() - self.tile_size * 2
    }

    /// Fire cooldown in whole frames (200 ms at 60 Hz = 12 frames).
    pub fn fire_cooldown_frames(&self) -> u64 {
        self.fire_cooldown_ms * self.tick_rate / 1000
    }

    /// Spawn interval in whole frames (1000 ms at 60 Hz = 60 frames).
    pub fn spawn_interval_frames(&self) -> u64 {
        self.spawn_interval_ms * self.tick_rate / 1000
    }

    /// Wall-clock duration of one tick, for the shell's frame pacing.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.tick_rate)
    }
}
