/// Rendering layer — all terminal I/O lives here.
///
/// The presenter consumes the core's events (hits, level-ups, pause) to
/// drive purely visual state, and reads an immutable view of the game to
/// draw each frame.  No game logic is performed here.

use std::collections::HashMap;
use std::io::Write;
use std::time::Duration;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use rand::Rng;

use treadmill_shooter::entities::{
    Arena, Enemy, EnemyId, EnemyKind, GameState, Position, RunStatus, PLAYER_WIDTH,
    PROJECTILE_WIDTH,
};
use treadmill_shooter::events::{GameEvent, HudSnapshot};
use treadmill_shooter::progression::scroll_speed_secs;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TREADMILL: Color = Color::DarkGrey;
const C_HUD_HP: Color = Color::Red;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_HUD_SCORE: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_ENEMY_NORMAL: Color = Color::Green;
const C_ENEMY_FAST: Color = Color::Yellow;
const C_ENEMY_TANK: Color = Color::Blue;
const C_ENEMY_EXPLOSIVE: Color = Color::Red;
const C_ENEMY_HIT: Color = Color::White;
const C_PROJECTILE: Color = Color::Cyan;
const C_PANEL: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;
const PARTICLE_COLORS: [Color; 3] = [Color::DarkYellow, Color::Yellow, Color::Red];

/// Particles per hit.
const BURST_SIZE: usize = 15;
/// How long a hit's particles and flash stay on screen.
const EFFECT_LIFETIME: Duration = Duration::from_millis(1000);
const FLASH_LIFETIME: Duration = Duration::from_millis(200);
/// How long a level-up banner stays in the HUD.
const BANNER_LIFETIME: Duration = Duration::from_millis(1500);

// ── Terminal ↔ arena mapping ──────────────────────────────────────────────────

/// The play field occupies rows 2..height-2 and columns 1..width-1; row 0
/// is the HUD, rows 1 and height-2 are the border, the last row is hints.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    pub arena: Arena,
}

impl Viewport {
    pub fn new(width: u16, height: u16, arena: Arena) -> Self {
        Self {
            width,
            height,
            arena,
        }
    }

    fn inner_cols(&self) -> f32 {
        f32::from(self.width.saturating_sub(2).max(1))
    }

    fn inner_rows(&self) -> f32 {
        f32::from(self.height.saturating_sub(4).max(1))
    }

    fn top_row(&self) -> u16 {
        2
    }

    fn bottom_row(&self) -> u16 {
        self.height.saturating_sub(3).max(2)
    }

    pub fn col_of(&self, x: f32) -> u16 {
        let col = 1.0 + x / self.arena.width * self.inner_cols();
        (col.max(1.0) as u16).min(self.width.saturating_sub(2).max(1))
    }

    pub fn row_of(&self, y: f32) -> u16 {
        let row = f32::from(self.top_row()) + y / self.arena.height * self.inner_rows();
        (row.max(f32::from(self.top_row())) as u16).min(self.bottom_row())
    }

    /// Terminal cell → arena point at the cell's centre.
    pub fn arena_point(&self, col: u16, row: u16) -> Position {
        let x = (f32::from(col) - 1.0 + 0.5) / self.inner_cols() * self.arena.width;
        let y = (f32::from(row) - f32::from(self.top_row()) + 0.5) / self.inner_rows()
            * self.arena.height;
        Position::new(
            x.clamp(0.0, self.arena.width),
            y.clamp(0.0, self.arena.height),
        )
    }
}

// ── Visual-only state ────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct Particle {
    at: Position,
    glyph: char,
    color: Color,
    remaining: Duration,
}

pub struct Presenter {
    hud: HudSnapshot,
    scroll_speed_secs: u32,
    paused: bool,
    particles: Vec<Particle>,
    flashes: HashMap<EnemyId, Duration>,
    banner: Option<(String, Duration)>,
    /// Treadmill position in `[0, 1)` of one scroll cycle.
    treadmill_phase: f32,
}

impl Presenter {
    pub fn new(hud: HudSnapshot) -> Self {
        Self {
            scroll_speed_secs: scroll_speed_secs(hud.level),
            hud,
            paused: false,
            particles: Vec::new(),
            flashes: HashMap::new(),
            banner: None,
            treadmill_phase: 0.0,
        }
    }

    pub fn consume(&mut self, events: &[GameEvent]) {
        let mut rng = rand::thread_rng();
        for event in events {
            match event {
                GameEvent::EnemyDamaged { id, effect_at, .. } => {
                    self.flashes.insert(*id, FLASH_LIFETIME);
                    for _ in 0..BURST_SIZE {
                        let spread: f32 = rng.gen_range(10.0..30.0);
                        let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
                        self.particles.push(Particle {
                            at: Position::new(
                                effect_at.x + angle.cos() * spread,
                                effect_at.y + angle.sin() * spread,
                            ),
                            glyph: ['*', '•', '·'][rng.gen_range(0..3)],
                            color: PARTICLE_COLORS[rng.gen_range(0..PARTICLE_COLORS.len())],
                            remaining: EFFECT_LIFETIME,
                        });
                    }
                }
                GameEvent::EnemyRemoved { id, .. } => {
                    self.flashes.remove(id);
                }
                GameEvent::LevelUp {
                    level,
                    scroll_speed_secs,
                } => {
                    self.scroll_speed_secs = *scroll_speed_secs;
                    self.banner = Some((format!("LEVEL {level}!"), BANNER_LIFETIME));
                }
                GameEvent::HudChanged(hud) => self.hud = *hud,
                GameEvent::PauseChanged { paused } => self.paused = *paused,
                _ => {}
            }
        }
    }

    /// Age effects and scroll the treadmill.  The treadmill stands still
    /// while the HUD is expanded.
    pub fn advance(&mut self, dt: Duration) {
        self.particles.retain_mut(|p| {
            p.remaining = p.remaining.saturating_sub(dt);
            !p.remaining.is_zero()
        });
        self.flashes.retain(|_, left| {
            *left = left.saturating_sub(dt);
            !left.is_zero()
        });
        if let Some((_, left)) = &mut self.banner {
            *left = left.saturating_sub(dt);
        }
        if self.banner.as_ref().is_some_and(|(_, left)| left.is_zero()) {
            self.banner = None;
        }
        if !self.paused {
            let period = self.scroll_speed_secs.max(1) as f32;
            self.treadmill_phase = (self.treadmill_phase + dt.as_secs_f32() / period).fract();
        }
    }

    /// Render one complete frame.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        state: &GameState,
        view: &Viewport,
    ) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        draw_border(out, view)?;
        self.draw_treadmill(out, view)?;
        self.draw_hud(out, view)?;

        for enemy in state.registry.enemies() {
            self.draw_enemy(out, enemy, view)?;
        }
        for projectile in state.registry.projectiles() {
            out.queue(cursor::MoveTo(
                view.col_of(projectile.position.x + PROJECTILE_WIDTH / 2.0),
                view.row_of(projectile.position.y),
            ))?;
            out.queue(style::SetForegroundColor(C_PROJECTILE))?;
            out.queue(Print("║"))?;
        }
        for particle in &self.particles {
            out.queue(cursor::MoveTo(view.col_of(particle.at.x), view.row_of(particle.at.y)))?;
            out.queue(style::SetForegroundColor(particle.color))?;
            out.queue(Print(particle.glyph))?;
        }

        draw_player(out, state, view)?;

        if self.paused {
            self.draw_expanded_hud(out, view)?;
        }
        draw_controls_hint(out, view)?;

        if state.status == RunStatus::GameOver {
            draw_game_over(out, state, view)?;
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }

    // ── Treadmill background ─────────────────────────────────────────────────

    fn draw_treadmill<W: Write>(&self, out: &mut W, view: &Viewport) -> std::io::Result<()> {
        const SPACING: u16 = 4;
        let rows = view.bottom_row().saturating_sub(view.top_row()) + 1;
        let shift = (self.treadmill_phase * f32::from(rows)) as u16;

        out.queue(style::SetForegroundColor(C_TREADMILL))?;
        for row in view.top_row()..=view.bottom_row() {
            let offset = row - view.top_row() + rows - shift % rows.max(1);
            if offset % SPACING != 0 {
                continue;
            }
            let mut col = 3 + (offset / SPACING % 2) * 3;
            while col < view.width.saturating_sub(1) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print("·"))?;
                col += 6;
            }
        }
        Ok(())
    }

    // ── HUD (row 0, docked) ──────────────────────────────────────────────────

    fn draw_hud<W: Write>(&self, out: &mut W, view: &Viewport) -> std::io::Result<()> {
        const BAR: usize = 6;
        let filled = (self.hud.hp_fraction() * BAR as f32).round() as usize;

        out.queue(cursor::MoveTo(1, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_HP))?;
        out.queue(Print(format!(
            "HP {}{} ",
            "█".repeat(filled),
            "░".repeat(BAR - filled)
        )))?;
        out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
        out.queue(Print(format!(
            "Lv {}  XP {}/{} ",
            self.hud.level, self.hud.xp, self.hud.xp_to_next_level
        )))?;
        out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        out.queue(Print(format!("Score {}", self.hud.score)))?;

        if let Some((banner, _)) = &self.banner {
            let col = view.width.saturating_sub(banner.chars().count() as u16 + 1);
            out.queue(cursor::MoveTo(col, 0))?;
            out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
            out.queue(Print(banner))?;
        }
        Ok(())
    }

    /// The HUD slid up into a panel: full stats plus the item grid.
    fn draw_expanded_hud<W: Write>(&self, out: &mut W, view: &Viewport) -> std::io::Result<()> {
        const PANEL_WIDTH: u16 = 30;
        let hud = &self.hud;
        let lines = [
            "╔════════ PAUSED ════════╗".to_string(),
            format!("  HP     {}/{}", hud.hp, hud.max_hp),
            format!("  Level  {}", hud.level),
            format!("  XP     {}/{}", hud.xp, hud.xp_to_next_level),
            format!("  Score  {}", hud.score),
            format!("  Speed  {}s", self.scroll_speed_secs),
            "  Items  [ ] [ ] [ ]".to_string(),
            "         [ ] [ ] [ ]".to_string(),
            "╚════════════════════════╝".to_string(),
        ];

        let col = (view.width / 2).saturating_sub(PANEL_WIDTH / 2);
        let start = view.bottom_row().saturating_sub(lines.len() as u16);
        out.queue(style::SetForegroundColor(C_PANEL))?;
        for (i, line) in lines.iter().enumerate() {
            out.queue(cursor::MoveTo(col, start + i as u16))?;
            out.queue(Print(format!("{line:<26}")))?;
        }
        Ok(())
    }

    // ── Entities ─────────────────────────────────────────────────────────────

    fn draw_enemy<W: Write>(&self, out: &mut W, enemy: &Enemy, view: &Viewport) -> std::io::Result<()> {
        let centre = enemy.bounds().center();
        let (left, right, color) = match enemy.kind {
            EnemyKind::Normal => ('(', ')', C_ENEMY_NORMAL),
            EnemyKind::Fast => ('>', '<', C_ENEMY_FAST),
            EnemyKind::Tank => ('[', ']', C_ENEMY_TANK),
            EnemyKind::Explosive => ('*', '*', C_ENEMY_EXPLOSIVE),
        };
        let color = if self.flashes.contains_key(&enemy.id) {
            C_ENEMY_HIT
        } else {
            color
        };
        let col = view.col_of(centre.x).saturating_sub(1).max(1);
        out.queue(cursor::MoveTo(col, view.row_of(centre.y)))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(format!("{left}{}{right}", enemy.hp)))?;
        Ok(())
    }
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲       ← tip, level with the player's top edge
    //  /|\      ← wings
    let col = view.col_of(state.player.x + PLAYER_WIDTH / 2.0);
    let row = view.row_of(state.arena.player_top()).min(view.bottom_row().saturating_sub(1));
    out.queue(style::SetForegroundColor(C_PLAYER))?;

    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;

    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), row + 1))?;
    out.queue(Print("/|\\"))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "drag ship / ← → : Move   click ship / SPACE : Shoot   TAB : HUD   Q : Quit",
    ))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", state.progress.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
