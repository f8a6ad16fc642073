//! Screen geometry of the tile grid.
//!
//! Drawing and mouse hit-testing share these numbers, so a click always lands
//! on the tile that was drawn under it.

use std::ops::Range;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

/// Rows needed for a tile to carry its own border around a symbol.
const BORDERED_HEIGHT: u16 = 3;

/// Splits the screen into title, board and status areas.
pub(crate) fn screen_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(6),    // Board
            Constraint::Length(3), // Status
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Area inside the board frame where tiles go, for a screen of `area`.
pub fn board_grid_area(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(screen_chunks(area)[1])
}

/// Placement of every visible tile inside the grid area.
///
/// Rows get equal whole heights. When there are more rows than lines, each
/// row is one line tall and the window scrolls to keep the cursor's row in
/// view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    area: Rect,
    columns: usize,
    tiles: usize,
    first_row: usize,
    visible_rows: usize,
    row_height: u16,
    column_width: u16,
}

impl BoardGeometry {
    /// Lays out `tiles` tiles in `columns` columns within `area`.
    ///
    /// Returns `None` when the area cannot fit one line per row and one cell
    /// per column.
    pub fn new(area: Rect, columns: usize, tiles: usize, cursor: usize) -> Option<Self> {
        if columns == 0 || tiles == 0 || area.height == 0 {
            return None;
        }
        let column_width = area.width / u16::try_from(columns).ok()?;
        if column_width == 0 {
            return None;
        }

        let rows = tiles.div_ceil(columns);
        let lines = usize::from(area.height);
        let visible_rows = rows.min(lines);
        let row_height = u16::try_from(lines / visible_rows).ok()?;

        let cursor_row = cursor.min(tiles - 1) / columns;
        let first_row = (cursor_row + 1).saturating_sub(visible_rows);

        Some(Self {
            area,
            columns,
            tiles,
            first_row,
            visible_rows,
            row_height,
            column_width,
        })
    }

    /// Rows currently on screen.
    pub fn visible_rows(&self) -> Range<usize> {
        self.first_row..self.first_row + self.visible_rows
    }

    /// Total number of rows on the board.
    pub fn rows(&self) -> usize {
        self.tiles.div_ceil(self.columns)
    }

    /// True if some rows are scrolled out of view.
    pub fn is_scrolled(&self) -> bool {
        self.visible_rows < self.rows()
    }

    /// True if cells are tall and wide enough to draw a border around a symbol.
    pub fn bordered(&self) -> bool {
        self.row_height >= BORDERED_HEIGHT && self.column_width >= BORDERED_HEIGHT
    }

    /// Indices of the tiles on screen.
    pub fn visible_tiles(&self) -> Range<usize> {
        let rows = self.visible_rows();
        (rows.start * self.columns)..(rows.end * self.columns).min(self.tiles)
    }

    /// Screen cell of a tile, or `None` if it is off screen.
    pub fn cell(&self, index: usize) -> Option<Rect> {
        if !self.visible_tiles().contains(&index) {
            return None;
        }
        let row = u16::try_from(index / self.columns - self.first_row).ok()?;
        let column = u16::try_from(index % self.columns).ok()?;
        Some(Rect::new(
            self.area.x + column * self.column_width,
            self.area.y + row * self.row_height,
            self.column_width,
            self.row_height,
        ))
    }

    /// Tile drawn at screen position (`x`, `y`), if any.
    pub fn tile_at(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.area.x || y < self.area.y {
            return None;
        }
        let column = usize::from((x - self.area.x) / self.column_width);
        let row = usize::from((y - self.area.y) / self.row_height);
        if column >= self.columns || row >= self.visible_rows {
            return None;
        }
        let index = (self.first_row + row) * self.columns + column;
        (index < self.tiles).then_some(index)
    }
}
