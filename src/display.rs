//! Rendering layer; all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the game
//! state. No game logic is performed; this module only projects the
//! pixel-space world onto terminal cells (one cell per board tile).

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::config::GameConfig;
use crate::entities::{GameMode, GameState, Sprite};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_SHIP: Color = Color::White;
const C_BULLET: Color = Color::Cyan;
const C_ENEMY_BULLET: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

/// Two-cell glyph and colour for each enemy palette variant.
const ENEMY_GLYPHS: [(&str, Color); 4] = [
    ("<>", Color::Green),
    ("[]", Color::Cyan),
    ("{}", Color::Magenta),
    ("()", Color::Yellow),
];

/// First play-area row; row 0 is the HUD, row 1 the top border.
const PLAY_TOP: u16 = 2;

fn cell_x(cfg: &GameConfig, x: i32) -> u16 {
    (x / cfg.tile_size).clamp(0, cfg.board_cols - 1) as u16 + 1
}

fn cell_y(cfg: &GameConfig, y: i32) -> u16 {
    (y / cfg.tile_size).clamp(0, cfg.board_rows - 1) as u16 + PLAY_TOP
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, cfg: &GameConfig, state: &GameState) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, cfg)?;
    draw_hud(out, cfg, state)?;

    for enemy in state.enemies.iter().filter(|e| e.alive) {
        let variant = match enemy.sprite {
            Sprite::Enemy(v) => v as usize % ENEMY_GLYPHS.len(),
            _ => 0,
        };
        let (glyph, color) = ENEMY_GLYPHS[variant];
        out.queue(cursor::MoveTo(cell_x(cfg, enemy.x), cell_y(cfg, enemy.y)))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }

    for bullet in state.bullets.iter().filter(|b| !b.used) {
        out.queue(cursor::MoveTo(cell_x(cfg, bullet.x), cell_y(cfg, bullet.y)))?;
        out.queue(style::SetForegroundColor(C_BULLET))?;
        out.queue(Print("║"))?;
    }

    for bullet in state.enemy_bullets.iter().filter(|b| !b.used) {
        out.queue(cursor::MoveTo(cell_x(cfg, bullet.x), cell_y(cfg, bullet.y)))?;
        out.queue(style::SetForegroundColor(C_ENEMY_BULLET))?;
        out.queue(Print("↓"))?;
    }

    draw_ship(out, cfg, state)?;
    draw_controls_hint(out, cfg)?;

    match state.mode {
        GameMode::Paused => draw_paused(out, cfg)?,
        GameMode::GameOver => draw_game_over(out, cfg, state)?,
        GameMode::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, PLAY_TOP + cfg.board_rows as u16 + 1))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, cfg: &GameConfig) -> std::io::Result<()> {
    let cols = cfg.board_cols as usize;
    let bottom = PLAY_TOP + cfg.board_rows as u16;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, PLAY_TOP - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(cols))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(cols))))?;

    for row in PLAY_TOP..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(cfg.board_cols as u16 + 1, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, cfg: &GameConfig, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "{}  Score: {:>6}",
        state.player_name, state.score
    )))?;

    let best = format!(
        "Best: {} - {}",
        state.high_score.display_name(),
        state.high_score.score
    );
    let right = (cfg.board_cols as u16 + 1).saturating_sub(best.chars().count() as u16);
    out.queue(cursor::MoveTo(right, 0))?;
    out.queue(Print(&best))?;

    Ok(())
}

// ── Ship ──────────────────────────────────────────────────────────────────────

fn draw_ship<W: Write>(out: &mut W, cfg: &GameConfig, state: &GameState) -> std::io::Result<()> {
    let ship = &state.ship;
    out.queue(cursor::MoveTo(cell_x(cfg, ship.x), cell_y(cfg, ship.y)))?;
    out.queue(style::SetForegroundColor(C_SHIP))?;
    out.queue(Print("◢◣"))?;
    Ok(())
}

// ── Controls hint (below the board) ───────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, cfg: &GameConfig) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, PLAY_TOP + cfg.board_rows as u16 + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   SPACE : Fire   ESC : Pause   Q : Quit",
    ))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_centered_block<W: Write>(
    out: &mut W,
    cfg: &GameConfig,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = cfg.board_cols as u16 / 2 + 1;
    let cy = PLAY_TOP + cfg.board_rows as u16 / 2;
    let start_row = cy.saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}

fn draw_paused<W: Write>(out: &mut W, cfg: &GameConfig) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::White),
        ("║      PAUSED      ║", Color::White),
        ("╚══════════════════╝", Color::White),
        ("C - Continue   Q - Quit", Color::DarkGrey),
    ];
    draw_centered_block(out, cfg, lines)
}

fn draw_game_over<W: Write>(
    out: &mut W,
    cfg: &GameConfig,
    state: &GameState,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("ENTER - Play Again   Q - Menu", Color::White),
    ];
    draw_centered_block(out, cfg, lines)
}
