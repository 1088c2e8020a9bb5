use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use invaders::compute;
use invaders::config::GameConfig;
use invaders::display;
use invaders::entities::{GameMode, GameState, InputSnapshot};
use invaders::score::{HighScoreRecord, HighScoreStore};

// ── Input constants ───────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is >= 15 Hz, so a window of 8 frames (~133 ms at
/// 60 Hz) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

const MAX_NAME_LEN: usize = 12;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(String),
    Quit,
}

fn draw_menu<W: Write>(
    out: &mut W,
    record: &HighScoreRecord,
    name: &str,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  I N V A D E R S  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    if record.score > 0 {
        let best = format!("Best: {} - {}", record.display_name(), record.score);
        out.queue(cursor::MoveTo(
            cx.saturating_sub(best.chars().count() as u16 / 2),
            cy.saturating_sub(4),
        ))?;
        out.queue(style::SetForegroundColor(Color::Yellow))?;
        out.queue(Print(&best))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(format!("Name: {}_", name)))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 2))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("ENTER : Start   ESC : Quit"))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 4))?;
    out.queue(Print("← → / A D : Move   SPACE : Fire   ESC : Pause"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    record: &HighScoreRecord,
) -> std::io::Result<MenuResult> {
    let mut name = String::from("Player");

    loop {
        draw_menu(out, record, &name)?;

        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind, .. }))
                if kind == KeyEventKind::Press || kind == KeyEventKind::Repeat =>
            {
                match code {
                    KeyCode::Enter => {
                        let name = name.trim();
                        let name = if name.is_empty() { "Player" } else { name };
                        return Ok(MenuResult::Start(name.to_string()));
                    }
                    KeyCode::Esc => return Ok(MenuResult::Quit),
                    KeyCode::Backspace => {
                        name.pop();
                    }
                    // ';' delimits the score file, so it can't be part of a name
                    KeyCode::Char(c)
                        if !c.is_control() && c != ';' && name.chars().count() < MAX_NAME_LEN =>
                    {
                        name.push(c);
                    }
                    _ => {}
                }
            }
            Ok(_) => {}
            Err(_) => return Ok(MenuResult::Quit), // event thread gone
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key. Each frame the held movement/fire keys
/// are folded into an [`InputSnapshot`] for the tick, so Space plus A/D work
/// simultaneously. Pause, resume, restart and quit act on discrete press
/// events only, never on the held set.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): proper
///   `Press` / `Repeat` / `Release` events, so keys drop out on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`). Keys expire after `HOLD_WINDOW` frames of silence,
///   which is shorter than the OS repeat interval, so a held key stays live
///   while it keeps generating repeats.
fn game_loop<W: Write>(
    out: &mut W,
    cfg: &GameConfig,
    state: &mut GameState,
    store: &HighScoreStore,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut rng = thread_rng();

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent {
            code,
            kind,
            modifiers,
            ..
        })) = rx.try_recv()
        {
            match kind {
                // Press: record key + dispatch edge-triggered actions
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Esc => {
                            *state = compute::toggle_pause(state);
                        }
                        KeyCode::Char('c') | KeyCode::Char('C') => {
                            *state = compute::resume(state);
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') => match state.mode {
                            GameMode::Paused => return Ok(true),
                            GameMode::GameOver => return Ok(false),
                            GameMode::Playing => {}
                        },
                        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R')
                            if state.mode == GameMode::GameOver =>
                        {
                            *state = compute::restart(cfg, state);
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so the key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Snapshot held actions and advance the simulation ──────────────────
        let input = InputSnapshot {
            move_left: is_held(&key_frame, &KeyCode::Left, frame)
                || is_held(&key_frame, &KeyCode::Char('a'), frame)
                || is_held(&key_frame, &KeyCode::Char('A'), frame),
            move_right: is_held(&key_frame, &KeyCode::Right, frame)
                || is_held(&key_frame, &KeyCode::Char('d'), frame)
                || is_held(&key_frame, &KeyCode::Char('D'), frame),
            fire: is_held(&key_frame, &KeyCode::Char(' '), frame),
        };

        let next = compute::tick(cfg, state, &input, &mut rng);

        // Persist once, on the transition tick, only when the record was beaten.
        if state.mode == GameMode::Playing
            && next.mode == GameMode::GameOver
            && next.high_score.score > state.high_score.score
        {
            store.save(&next.high_score);
        }
        *state = next;

        display::render(out, cfg, state)?;

        let elapsed = frame_start.elapsed();
        let tick_len = cfg.tick_duration();
        if elapsed < tick_len {
            thread::sleep(tick_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();

    let cfg = GameConfig::default();
    let store = HighScoreStore::new(HighScoreStore::default_path());

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &cfg, &store, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(
    out: &mut W,
    cfg: &GameConfig,
    store: &HighScoreStore,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut record = store.load();

    loop {
        match show_menu(out, rx, &record)? {
            MenuResult::Quit => break,
            MenuResult::Start(name) => {
                let mut state = compute::init_state(cfg, &name, record.clone());
                let quit = game_loop(out, cfg, &mut state, store, rx)?;

                // Carry any beaten record back to the menu
                record = state.high_score.clone();

                if quit {
                    break;
                }
            }
        }
    }
    Ok(())
}
