//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;

/// Moves the cursor over a grid of `tiles` tiles laid out in `columns` columns.
///
/// Arrow keys stop at the edges; the last row may be ragged.
pub fn move_cursor(cursor: usize, key: KeyCode, columns: usize, tiles: usize) -> usize {
    if tiles == 0 || columns == 0 {
        return 0;
    }
    let cursor = cursor.min(tiles - 1);
    let column = cursor % columns;

    match key {
        KeyCode::Left if column > 0 => cursor - 1,
        KeyCode::Right if column + 1 < columns && cursor + 1 < tiles => cursor + 1,
        KeyCode::Up if cursor >= columns => cursor - columns,
        KeyCode::Down if cursor + columns < tiles => cursor + columns,
        _ => cursor,
    }
}
