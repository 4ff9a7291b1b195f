mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use treadmill_shooter::config::{
    GameConfig, DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH, DEFAULT_FRAME_RATE,
};
use treadmill_shooter::game::Game;
use treadmill_shooter::input::{Command, InputController, InputEvent, Pointer};

use display::{Presenter, Viewport};

#[derive(Parser)]
#[command(name = "treadmill-shooter")]
#[command(about = "Drag the ship along the bottom and shoot the descending enemies")]
struct Args {
    /// Arena width in pixels
    #[arg(long, default_value_t = DEFAULT_ARENA_WIDTH)]
    width: f32,
    /// Arena height in pixels
    #[arg(long, default_value_t = DEFAULT_ARENA_HEIGHT)]
    height: f32,
    /// Milliseconds between enemy spawns
    #[arg(long, default_value_t = 2000)]
    spawn_interval_ms: u64,
    /// Stop the spawn timer while the HUD is expanded
    #[arg(long)]
    pause_spawner: bool,
    /// Fixed RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Frames per second
    #[arg(long, default_value_t = DEFAULT_FRAME_RATE)]
    fps: u32,
    /// Write tracing output here (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            arena_width: self.width,
            arena_height: self.height,
            spawn_interval: Duration::from_millis(self.spawn_interval_ms),
            spawn_while_paused: !self.pause_spawner,
            seed: self.seed,
            frame_rate: self.fps,
        }
    }
}

// ── Keyboard constants ────────────────────────────────────────────────────────

/// Arena pixels the ship moves per keyboard step.
const KEY_STEP: f32 = 8.0;

/// Min frames between shots while Space is held.
const SHOOT_COOLDOWN: u32 = 10;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    // The terminal is in raw mode while playing; logs only go to a file.
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Restart,
}

/// Input model: pointer events go through the `InputController` as they
/// arrive; keyboard keys are tracked in `key_frame` (frame of last
/// press/repeat) so Space and the arrows can be held together.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<LoopExit> {
    let frame_budget = game.config().frame_duration();
    let arena = game.state().arena;
    let mut presenter = Presenter::new(game.state().progress.hud());
    let mut controller = InputController::new();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut shoot_cooldown: u32 = 0;
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last);
        last = frame_start;
        frame += 1;

        let (width, height) = terminal::size()?;
        let view = Viewport::new(width, height, arena);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            match event {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(LoopExit::Quit);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(LoopExit::Quit);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') if game.is_over() => {
                                return Ok(LoopExit::Restart);
                            }
                            KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('H') => {
                                if let Some(command) = controller.handle(
                                    InputEvent::HudToggle,
                                    &game.state().player,
                                    &arena,
                                ) {
                                    game.apply(command);
                                }
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(mouse) => {
                    if let Some(input) = pointer_input(&mouse, &view) {
                        if let Some(command) =
                            controller.handle(input, &game.state().player, &arena)
                        {
                            game.apply(command);
                        }
                    }
                }
                _ => {}
            }
        }

        // ── Apply held-key actions every frame ────────────────────────────────
        if !game.is_over() {
            let left = is_held(&key_frame, &KeyCode::Left, frame)
                || is_held(&key_frame, &KeyCode::Char('a'), frame);
            let right = is_held(&key_frame, &KeyCode::Right, frame)
                || is_held(&key_frame, &KeyCode::Char('d'), frame);
            let shoot = is_held(&key_frame, &KeyCode::Char(' '), frame);

            let x = game.state().player.x;
            if left {
                game.apply(Command::SetPlayerX(x - KEY_STEP));
            } else if right {
                game.apply(Command::SetPlayerX(x + KEY_STEP));
            }

            if shoot_cooldown == 0 && shoot {
                game.apply(Command::Fire);
                shoot_cooldown = SHOOT_COOLDOWN;
            }
        }
        shoot_cooldown = shoot_cooldown.saturating_sub(1);

        // ── Clock-driven spawns, then this frame's tick ───────────────────────
        game.advance_clock(dt);
        game.frame();

        let events = game.drain_events();
        presenter.consume(&events);
        presenter.advance(dt);
        presenter.render(out, game.state(), &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

/// Left-button mouse events → pointer input in arena coordinates.
fn pointer_input(mouse: &MouseEvent, view: &Viewport) -> Option<InputEvent> {
    let at = view.arena_point(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Press {
            pointer: Pointer::Mouse,
            x: at.x,
            y: at.y,
        }),
        MouseEventKind::Drag(MouseButton::Left) => Some(InputEvent::Move { x: at.x, y: at.y }),
        MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::Release { x: at.x, y: at.y }),
        _ => None,
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.config();
    config.validate()?;
    init_logging(args.log_file.as_deref())?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

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

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Some(score) = result? {
        println!("Game over! Score: {score}");
    }
    Ok(())
}

/// Plays runs until the player quits.  Returns the final score of the last
/// finished run, if any.
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
) -> anyhow::Result<Option<u32>> {
    let mut last_score = None;
    loop {
        // A restart is a brand new session, never a partial reset.
        let mut game = Game::new(config.clone())?;
        info!(seed = ?config.seed, "run started");
        let exit = game_loop(out, &mut game, rx)?;
        if let Some(score) = game.final_score() {
            last_score = Some(score);
        }
        if let LoopExit::Quit = exit {
            return Ok(last_score);
        }
    }
}
