//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! [`GameState`] (plus the [`GameConfig`] and, where needed, an RNG handle)
//! and returns a brand-new `GameState`. Side effects are limited to the
//! injected RNG; persistence stays in the shell.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Entity, GameMode, GameState, InputSnapshot, Sprite, ENEMY_VARIANTS};
use crate::score::HighScoreRecord;

/// Score awarded per destroyed enemy.
pub const KILL_SCORE: u32 = 100;

// ── Collision ────────────────────────────────────────────────────────────────

/// Axis-aligned box overlap. Strict on every side: boxes that only share an
/// edge do not collide.
pub fn collides(a: &Entity, b: &Entity) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

// ── Difficulty tables ────────────────────────────────────────────────────────

/// Map the score to `(fall_speed, enemy_bullet_speed)`.
///
/// Highest threshold wins; below 4000 the configured base values apply.
/// The base enemy-bullet speed (5) is higher than the 4000-tier value (2),
/// so crossing 4000 slows the enemy bullets down. That step is kept as-is.
pub fn difficulty_for(cfg: &GameConfig, score: u32) -> (i32, i32) {
    if score >= 22000 {
        (9, 8)
    } else if score >= 20000 {
        (8, 7)
    } else if score >= 18000 {
        (7, 6)
    } else if score >= 15000 {
        (6, 5)
    } else if score >= 12000 {
        (5, 4)
    } else if score >= 8000 {
        (4, 3)
    } else if score >= 4000 {
        (3, 2)
    } else {
        (cfg.base_fall_speed, cfg.base_enemy_bullet_speed)
    }
}

/// Bullets in one player volley, tiered by score.
pub fn bullets_per_volley(score: u32) -> usize {
    if score >= 2500 {
        4
    } else if score >= 1000 {
        3
    } else if score >= 500 {
        2
    } else {
        1
    }
}

/// Horizontal muzzle offset of the i-th bullet of a volley, in multiples of
/// the bullet width. The table is neither symmetric nor sorted.
fn volley_offset(i: usize) -> i32 {
    match i {
        0 => 0,
        1 => 1,
        2 => -2,
        _ => 2,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a player and a previously loaded record.
pub fn init_state(cfg: &GameConfig, player_name: &str, high_score: HighScoreRecord) -> GameState {
    let (fall_speed, enemy_bullet_speed) = difficulty_for(cfg, 0);
    GameState {
        player_name: player_name.to_string(),
        ship: spawn_ship(cfg),
        enemies: Vec::new(),
        bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        score: 0,
        mode: GameMode::Playing,
        frame: 0,
        last_fired_frame: None,
        last_spawn_frame: 0,
        fall_speed,
        enemy_bullet_speed,
        high_score,
    }
}

/// A fresh ship, centered on its fixed row.
fn spawn_ship(cfg: &GameConfig) -> Entity {
    Entity::new(
        cfg.board_width() / 2 - cfg.ship_w / 2,
        cfg.ship_y(),
        cfg.ship_w,
        cfg.ship_h,
        Sprite::Ship,
    )
}

// ── Mode transitions (edge-triggered, pure) ──────────────────────────────────

/// Toggle Playing <-> Paused. No effect once the game is over.
pub fn toggle_pause(state: &GameState) -> GameState {
    let mode = match state.mode {
        GameMode::Playing => GameMode::Paused,
        GameMode::Paused => GameMode::Playing,
        GameMode::GameOver => GameMode::GameOver,
    };
    GameState {
        mode,
        ..state.clone()
    }
}

/// Resume from pause; any other mode is returned unchanged.
pub fn resume(state: &GameState) -> GameState {
    if state.mode == GameMode::Paused {
        GameState {
            mode: GameMode::Playing,
            ..state.clone()
        }
    } else {
        state.clone()
    }
}

/// Start a fresh game after a game over: centered ship, empty lists, score 0.
/// The fire cooldown is cleared and the spawn timer re-arms at the current
/// frame. The player name and the high-score record carry over.
pub fn restart(cfg: &GameConfig, state: &GameState) -> GameState {
    if state.mode != GameMode::GameOver {
        return state.clone();
    }
    let (fall_speed, enemy_bullet_speed) = difficulty_for(cfg, 0);
    GameState {
        ship: spawn_ship(cfg),
        enemies: Vec::new(),
        bullets: Vec::new(),
        enemy_bullets: Vec::new(),
        score: 0,
        mode: GameMode::Playing,
        last_fired_frame: None,
        last_spawn_frame: state.frame,
        fall_speed,
        enemy_bullet_speed,
        ..state.clone()
    }
}

// ── Per-tick update (nearly pure; RNG is injected) ───────────────────────────

/// Advance the simulation by one tick. All randomness comes through `rng` so
/// callers control determinism (tests use a seeded RNG). Ticks delivered
/// while Paused or GameOver return the state untouched.
pub fn tick(
    cfg: &GameConfig,
    state: &GameState,
    input: &InputSnapshot,
    rng: &mut impl Rng,
) -> GameState {
    if state.mode != GameMode::Playing {
        return state.clone();
    }
    let frame = state.frame + 1;
    let mut mode = GameMode::Playing;

    // ── 1. Input: movement and firing ────────────────────────────────────────
    let mut ship = state.ship.clone();
    if input.move_left {
        ship.x = (ship.x - cfg.ship_speed).max(0);
    }
    if input.move_right {
        ship.x = (ship.x + cfg.ship_speed).min(cfg.board_width() - ship.w);
    }

    let mut bullets = state.bullets.clone();
    let mut last_fired_frame = state.last_fired_frame;
    let cooled_down =
        last_fired_frame.map_or(true, |last| frame - last >= cfg.fire_cooldown_frames());
    if input.fire && cooled_down {
        let muzzle_x = ship.x + ship.w / 2;
        for i in 0..bullets_per_volley(state.score) {
            bullets.push(Entity::new(
                muzzle_x + volley_offset(i) * cfg.bullet_w,
                ship.y - cfg.bullet_h,
                cfg.bullet_w,
                cfg.bullet_h,
                Sprite::ShipBullet,
            ));
        }
        // The whole volley shares one cooldown update.
        last_fired_frame = Some(frame);
    }

    // ── 2. Spawn: one enemy on the interval, then per-enemy fire rolls ───────
    let mut enemies = state.enemies.clone();
    let mut last_spawn_frame = state.last_spawn_frame;
    if frame - last_spawn_frame >= cfg.spawn_interval_frames() {
        let x = rng.gen_range(0..(cfg.board_width() - cfg.enemy_w).max(1));
        let variant = rng.gen_range(0..ENEMY_VARIANTS);
        enemies.push(Entity::new(
            x,
            0,
            cfg.enemy_w,
            cfg.enemy_h,
            Sprite::Enemy(variant),
        ));
        last_spawn_frame = frame;
    }

    let mut enemy_bullets = state.enemy_bullets.clone();
    for enemy in enemies.iter().filter(|e| e.alive) {
        if rng.gen_range(0u32..100) < cfg.enemy_fire_percent {
            enemy_bullets.push(Entity::new(
                enemy.x + enemy.w / 2,
                enemy.y + enemy.h,
                cfg.bullet_w,
                cfg.bullet_h,
                Sprite::EnemyBullet,
            ));
        }
    }

    // ── 3. Enemy movement ────────────────────────────────────────────────────
    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        enemy.y += state.fall_speed;
        if enemy.y + enemy.h >= ship.y {
            // Reaching the ship's row ends the game; the loop keeps going so
            // every enemy still advances this tick.
            mode = GameMode::GameOver;
        }
    }
    enemies.retain(|e| e.y + e.h < ship.y);

    // ── 4. Player bullets: move, collide, sweep ──────────────────────────────
    let mut score = state.score;
    for bullet in bullets.iter_mut() {
        bullet.y += cfg.bullet_vel_y;
        for enemy in enemies.iter_mut() {
            // `used` is set immediately, so only the first collision in
            // iteration order registers for a given bullet.
            if !bullet.used && enemy.alive && collides(bullet, enemy) {
                bullet.used = true;
                enemy.alive = false;
                score += KILL_SCORE;
            }
        }
    }
    bullets.retain(|b| !b.used && b.y >= 0);
    enemies.retain(|e| e.alive);

    // ── 5. Enemy bullets: move, hit test against the ship, sweep ─────────────
    for bullet in enemy_bullets.iter_mut() {
        bullet.y += state.enemy_bullet_speed;
        if collides(bullet, &ship) {
            bullet.used = true;
            mode = GameMode::GameOver;
        }
    }
    enemy_bullets.retain(|b| !b.used && b.y <= cfg.board_height());

    // ── 6. Difficulty for the next tick ──────────────────────────────────────
    let (fall_speed, enemy_bullet_speed) = difficulty_for(cfg, score);

    // The in-memory record updates the moment the game ends; the shell
    // persists it once, when it observes the transition.
    let mut high_score = state.high_score.clone();
    if mode == GameMode::GameOver && score > high_score.score {
        high_score = HighScoreRecord {
            name: Some(state.player_name.clone()),
            score,
        };
    }

    GameState {
        player_name: state.player_name.clone(),
        ship,
        enemies,
        bullets,
        enemy_bullets,
        score,
        mode,
        frame,
        last_fired_frame,
        last_spawn_frame,
        fall_speed,
        enemy_bullet_speed,
        high_score,
    }
}
