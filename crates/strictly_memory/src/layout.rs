//! Grid layout policy.

use tracing::instrument;

/// Preferred number of columns.
pub const PREFERRED_COLUMNS: usize = 5;

/// Picks a column count for a board of `tiles` tiles.
///
/// Five columns when they divide the board evenly, otherwise four or three if
/// either does, otherwise five with a ragged last row.
#[instrument]
pub fn column_count(tiles: usize) -> usize {
    [PREFERRED_COLUMNS, 4, 3]
        .into_iter()
        .find(|columns| tiles % columns == 0)
        .unwrap_or(PREFERRED_COLUMNS)
}

/// Number of rows needed for `tiles` tiles in `columns` columns.
pub fn row_count(tiles: usize, columns: usize) -> usize {
    if columns == 0 {
        return 0;
    }
    tiles.div_ceil(columns)
}
