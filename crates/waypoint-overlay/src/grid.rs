#![forbid(unsafe_code)]

//! Character-cell rasterizer for overlay scenes.
//!
//! [`CellGrid::render`] maps a pixel-space [`OverlayScene`] onto a grid of
//! terminal cells: the scrim is shaded, the cut-out is left blank, and the
//! card is boxed with its text wrapped by display width. Used for previews
//! in the showcase binary and for layout assertions in tests.
//!
//! # Invariants
//!
//! 1. Grid size is `ceil(viewport / cell)` on each axis, capped at
//!    [`MAX_CELLS`].
//! 2. Nothing is written outside the grid, whatever the scene geometry.
//! 3. A wide grapheme occupies its cell plus continuation cells and is
//!    never split across the card's inner edge.

use unicode_segmentation::UnicodeSegmentation;

use waypoint_core::geometry::BoundingBox;

use crate::scene::{BACK_LABEL, Card, OverlayScene};
use crate::text::{display_width, truncate_to_width, wrap_text};

/// Upper bound on either grid dimension.
pub const MAX_CELLS: u16 = 1000;

const SCRIM: char = '░';

/// Pixel size of one character cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

impl CellMetrics {
    pub const fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }

    fn is_usable(&self) -> bool {
        self.cell_width.is_finite()
            && self.cell_height.is_finite()
            && self.cell_width > 0.0
            && self.cell_height > 0.0
    }
}

/// Which overlay layer produced a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Scrim,
    Cutout,
    Card,
}

/// What a cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellContent {
    Char(char),
    /// Covered by the wide character to its left.
    Continuation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub content: CellContent,
    pub layer: Layer,
}

impl Cell {
    const fn new(ch: char, layer: Layer) -> Self {
        Self {
            content: CellContent::Char(ch),
            layer,
        }
    }
}

/// Half-open cell span `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRect {
    x0: u16,
    y0: u16,
    x1: u16,
    y1: u16,
}

impl CellRect {
    fn width(&self) -> u16 {
        self.x1.saturating_sub(self.x0)
    }

    fn height(&self) -> u16 {
        self.y1.saturating_sub(self.y0)
    }
}

/// A rendered overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Rasterize `scene` with the given cell size.
    pub fn render(scene: &OverlayScene, metrics: CellMetrics) -> Self {
        if !metrics.is_usable() {
            tracing::debug!(?metrics, "unusable cell metrics; empty grid");
            return Self::blank(0, 0);
        }
        let width = to_cells(scene.scrim.width / metrics.cell_width, f64::ceil);
        let height = to_cells(scene.scrim.height / metrics.cell_height, f64::ceil);
        let mut grid = Self::blank(width, height);

        if let Some(cutout) = scene.cutout {
            let rect = grid.cell_rect(&cutout.rect, metrics, f64::floor, f64::ceil);
            grid.fill(rect, Cell::new(' ', Layer::Cutout));
        }

        let card = grid.cell_rect(&scene.card.rect, metrics, f64::round, f64::round);
        grid.draw_card(card, &scene.card);

        tracing::trace!(width, height, "overlay rasterized");
        grid
    }

    fn blank(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::new(SCRIM, Layer::Scrim); usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get_mut(usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Number of cells produced by `layer`.
    pub fn count(&self, layer: Layer) -> usize {
        self.cells.iter().filter(|c| c.layer == layer).count()
    }

    /// Text of row `y`, continuation cells skipped.
    pub fn row(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter_map(|cell| match cell.content {
                CellContent::Char(ch) => Some(ch),
                CellContent::Continuation => None,
            })
            .collect()
    }

    /// All rows joined by newlines.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn cell_rect(
        &self,
        rect: &BoundingBox,
        metrics: CellMetrics,
        round_start: fn(f64) -> f64,
        round_end: fn(f64) -> f64,
    ) -> CellRect {
        let x0 = to_cells(rect.left / metrics.cell_width, round_start).min(self.width);
        let y0 = to_cells(rect.top / metrics.cell_height, round_start).min(self.height);
        let x1 = to_cells(rect.right() / metrics.cell_width, round_end).min(self.width);
        let y1 = to_cells(rect.bottom() / metrics.cell_height, round_end).min(self.height);
        CellRect {
            x0,
            y0,
            x1: x1.max(x0),
            y1: y1.max(y0),
        }
    }

    fn fill(&mut self, rect: CellRect, cell: Cell) {
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                if let Some(slot) = self.get_mut(x, y) {
                    *slot = cell;
                }
            }
        }
    }

    fn draw_card(&mut self, rect: CellRect, card: &Card) {
        self.fill(rect, Cell::new(' ', Layer::Card));
        if rect.width() < 4 || rect.height() < 3 {
            return;
        }
        self.draw_border(rect);

        let inner_x = rect.x0 + 2;
        let inner_width = usize::from(rect.width() - 4);
        let top = rect.y0 + 1;
        let footer = rect.y1 - 2;

        let mut body = wrap_text(card.title, inner_width);
        body.push(String::new());
        body.extend(wrap_text(card.description, inner_width));
        if let Some(hint) = card.action_hint {
            body.push(String::new());
            body.extend(wrap_text(&format!("▸ {hint}"), inner_width));
        }
        if let Some(waiting) = card.waiting_hint() {
            body.push(String::new());
            body.extend(wrap_text(&waiting, inner_width));
        }

        let mut body_end = footer;
        if let Some(key_hint) = card.key_hint
            && footer > top + 1
        {
            body_end = footer - 1;
            self.write_str(inner_x, body_end, key_hint, inner_width);
        }

        for (line, y) in body.iter().zip(top..body_end) {
            self.write_str(inner_x, y, line, inner_width);
        }

        if footer >= top {
            self.draw_footer(inner_x, footer, inner_width, card);
        }
    }

    fn draw_border(&mut self, rect: CellRect) {
        let (right, bottom) = (rect.x1 - 1, rect.y1 - 1);
        for x in rect.x0..=right {
            let (top_ch, bottom_ch) = if x == rect.x0 {
                ('┌', '└')
            } else if x == right {
                ('┐', '┘')
            } else {
                ('─', '─')
            };
            self.put(x, rect.y0, top_ch);
            self.put(x, bottom, bottom_ch);
        }
        for y in rect.y0 + 1..bottom {
            self.put(rect.x0, y, '│');
            self.put(right, y, '│');
        }
    }

    fn draw_footer(&mut self, x: u16, y: u16, width: usize, card: &Card) {
        let buttons = if card.previous_enabled {
            format!("[{BACK_LABEL}] [{}]", card.next_label)
        } else {
            format!("[{}]", card.next_label)
        };
        let dots: String = card.dots.iter().map(|d| d.glyph()).collect();
        let status = if dots.is_empty() {
            card.progress.clone()
        } else {
            format!("{} {dots}", card.progress)
        };

        let buttons_width = display_width(&buttons);
        if buttons_width + 1 < width {
            let status_room = width - buttons_width - 1;
            self.write_str(x, y, truncate_to_width(&status, status_room), status_room);
            let offset = u16::try_from(width - buttons_width).unwrap_or(0);
            self.write_str(x + offset, y, &buttons, buttons_width);
        } else {
            self.write_str(x, y, &buttons, width);
        }
    }

    fn put(&mut self, x: u16, y: u16, ch: char) {
        if let Some(cell) = self.get_mut(x, y) {
            *cell = Cell::new(ch, Layer::Card);
        }
    }

    /// Write one line, stopping before `max_width` columns are exceeded.
    fn write_str(&mut self, start_x: u16, y: u16, text: &str, max_width: usize) {
        let mut x = start_x;
        let mut used = 0usize;
        for grapheme in text.graphemes(true) {
            let w = display_width(grapheme);
            if w == 0 {
                continue;
            }
            if used + w > max_width {
                break;
            }
            if let Some(ch) = grapheme.chars().next() {
                self.put(x, y, ch);
            }
            for offset in 1..w {
                let cx = x.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
                if let Some(cell) = self.get_mut(cx, y) {
                    cell.content = CellContent::Continuation;
                    cell.layer = Layer::Card;
                }
            }
            x = x.saturating_add(u16::try_from(w).unwrap_or(u16::MAX));
            used += w;
        }
    }
}

/// Convert a cell coordinate to `u16`, saturating; NaN becomes 0.
fn to_cells(value: f64, round: fn(f64) -> f64) -> u16 {
    let rounded = round(value);
    if rounded.is_nan() || rounded <= 0.0 {
        0
    } else if rounded >= f64::from(MAX_CELLS) {
        MAX_CELLS
    } else {
        rounded as u16
    }
}
