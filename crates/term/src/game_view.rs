//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! Pure (no I/O), so every screen can be unit-tested.
//!
//! | Phase      | Screen                                         |
//! |------------|------------------------------------------------|
//! | `Menu`     | Title and mode choices                         |
//! | `Playing`  | Board, cursor, selection, side panel           |
//! | `GameOver` | Final board dimmed under a result overlay      |

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameMode, GamePhase, Position, TileKind, GRID_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Front-end state drawn on top of the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hud {
    pub cursor: Option<Position>,
    /// Tiles of a suggested swap
    pub hint: Option<(Position, Position)>,
    /// `(shown, total)` while a cascade is being staged
    pub cascade: Option<(usize, usize)>,
    /// The last swap left no moves and the board was replaced
    pub reshuffled: bool,
}

const BOARD_BG: Rgb = Rgb::new(28, 26, 38);
const FRAME: CellStyle = CellStyle::new(Rgb::new(190, 180, 210), Rgb::BLACK);
const LABEL: CellStyle = CellStyle::new(Rgb::new(230, 230, 230), Rgb::BLACK).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);
const HELP: CellStyle = CellStyle::new(Rgb::new(150, 150, 160), Rgb::BLACK).dim();
const BANNER: CellStyle = CellStyle::new(Rgb::WHITE, Rgb::BLACK).bold();

/// Terminal renderer for the match-3 game.
pub struct GameView {
    /// Tile width in terminal columns (marker, glyph, marker).
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 3,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Size of the bordered board in terminal cells
    pub fn frame_size(&self) -> (u16, u16) {
        (
            GRID_SIZE as u16 * self.cell_w + 2,
            GRID_SIZE as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, resizing it to `viewport`.
    pub fn render_into(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell::default());

        match snap.phase {
            GamePhase::Menu => self.draw_menu(fb, viewport),
            GamePhase::Playing | GamePhase::GameOver => {
                let (frame_w, frame_h) = self.frame_size();
                let x0 = viewport.width.saturating_sub(frame_w + PANEL_W) / 2;
                let y0 = viewport.height.saturating_sub(frame_h) / 2;
                let over = snap.phase == GamePhase::GameOver;

                self.draw_board(fb, snap, hud, x0, y0, over);
                self.draw_panel(fb, snap, hud, x0 + frame_w + 2, y0);
                if over {
                    self.draw_game_over(fb, snap, x0, y0, frame_w, frame_h);
                }
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_menu(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        const LINES: [&str; 6] = [
            "M A T C H - 3",
            "",
            "[t]  timed game",
            "[m]  move-limited game",
            "",
            "[q]  quit",
        ];
        let top = viewport.height.saturating_sub(LINES.len() as u16) / 2;
        for (i, line) in LINES.iter().enumerate() {
            let style = if i == 0 { BANNER } else { VALUE };
            fb.put_centered(0, viewport.width, top + i as u16, line, style);
        }

        let mut x = viewport.width.saturating_sub(TileKind::ALL.len() as u16 * 2) / 2;
        let y = top.saturating_sub(2);
        for kind in TileKind::ALL {
            let (glyph, color) = tile_look(kind);
            fb.put_char(x, y, glyph, CellStyle::new(color, Rgb::BLACK).bold());
            x += 2;
        }
    }

    fn draw_board(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, hud: &Hud, x0: u16, y0: u16, over: bool) {
        let (frame_w, frame_h) = self.frame_size();
        draw_border(fb, x0, y0, frame_w, frame_h, FRAME);
        fb.fill_rect(x0 + 1, y0 + 1, frame_w - 2, frame_h - 2, ' ', CellStyle::default().on(BOARD_BG));

        let Some(grid) = snap.board.as_ref() else {
            return;
        };
        for (row, tiles) in grid.iter().enumerate() {
            for (col, tile) in tiles.iter().enumerate() {
                let pos = Position::new(row as u8, col as u8);
                let px = x0 + 1 + col as u16 * self.cell_w;
                let py = y0 + 1 + row as u16 * self.cell_h;

                let (glyph, color) = tile_look(tile.kind);
                let selected = snap.selection == Some(pos);
                let mut style = CellStyle::new(color, BOARD_BG);
                if selected {
                    style = style.on(Rgb::new(90, 86, 120)).bold();
                }
                if over || snap.busy {
                    style = style.dim();
                }
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
                fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, glyph, style);

                if self.cell_w >= 3 && !over {
                    let marker = CellStyle::new(Rgb::WHITE, style.bg).bold();
                    let hinted = hud.hint.is_some_and(|(a, b)| a == pos || b == pos);
                    let pair = if hud.cursor == Some(pos) {
                        Some(('[', ']'))
                    } else if hinted {
                        Some(('*', '*'))
                    } else {
                        None
                    };
                    if let Some((l, r)) = pair {
                        let my = py + self.cell_h / 2;
                        fb.put_char(px, my, l, marker);
                        fb.put_char(px + self.cell_w - 1, my, r, marker);
                    }
                }
            }
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, hud: &Hud, x: u16, y0: u16) {
        if x >= fb.width() || fb.width() - x < PANEL_W - 2 {
            return;
        }

        let mut y = y0;
        fb.put_str(x, y, "MODE", LABEL);
        fb.put_str(x, y + 1, mode_label(snap.mode), VALUE);
        y += 3;

        fb.put_str(x, y, "SCORE", LABEL);
        fb.put_str(x, y + 1, &snap.score.to_string(), VALUE);
        y += 3;

        let (title, unit) = match snap.mode {
            Some(GameMode::Timed) => ("TIME", "s"),
            _ => ("MOVES", ""),
        };
        fb.put_str(x, y, title, LABEL);
        let end = fb.put_str(x, y + 1, &snap.remaining.to_string(), VALUE);
        fb.put_str(end, y + 1, unit, VALUE);
        y += 3;

        if let Some((shown, total)) = hud.cascade {
            fb.put_str(x, y, &format!("CASCADE {shown}/{total}"), BANNER);
        } else if snap.busy {
            fb.put_str(x, y, "...", BANNER);
        } else if hud.reshuffled {
            fb.put_str(x, y, "NEW BOARD", BANNER);
        }
        y += 2;

        for line in ["arrows  move", "space   select", "?       hint", "esc     menu"] {
            fb.put_str(x, y, line, HELP);
            y += 1;
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x0: u16, y0: u16, frame_w: u16, frame_h: u16) {
        let mid = y0 + frame_h / 2;
        let inner = frame_w.saturating_sub(2);
        let band = CellStyle::new(Rgb::WHITE, Rgb::new(60, 20, 30));
        fb.fill_rect(x0 + 1, mid.saturating_sub(1), inner, 3, ' ', band);
        fb.put_centered(x0 + 1, inner, mid.saturating_sub(1), "GAME OVER", band.bold());
        fb.put_centered(x0 + 1, inner, mid, &format!("score {}", snap.score), band);
        fb.put_centered(x0 + 1, inner, mid + 1, "r again  esc menu", band.dim());
    }
}

/// Columns reserved right of the board for the side panel
const PANEL_W: u16 = 18;

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);
    fb.put_char(x, y, '╭', style);
    fb.put_char(right, y, '╮', style);
    fb.put_char(x, bottom, '╰', style);
    fb.put_char(right, bottom, '╯', style);
    for cx in x + 1..right {
        fb.put_char(cx, y, '─', style);
        fb.put_char(cx, bottom, '─', style);
    }
    for cy in y + 1..bottom {
        fb.put_char(x, cy, '│', style);
        fb.put_char(right, cy, '│', style);
    }
}

/// Glyph and color for a tile kind
pub fn tile_look(kind: TileKind) -> (char, Rgb) {
    match kind {
        TileKind::Red => ('●', Rgb::new(235, 75, 75)),
        TileKind::Blue => ('◆', Rgb::new(80, 140, 240)),
        TileKind::Green => ('▲', Rgb::new(90, 210, 110)),
        TileKind::Yellow => ('★', Rgb::new(245, 215, 70)),
        TileKind::Purple => ('♦', Rgb::new(185, 105, 225)),
    }
}

fn mode_label(mode: Option<GameMode>) -> &'static str {
    match mode {
        Some(GameMode::Timed) => "timed",
        Some(GameMode::MoveLimited) => "moves",
        None => "-",
    }
}
