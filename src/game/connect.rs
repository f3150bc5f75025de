//! Straight-line connectivity test
//!
//! Two cells link when they are orthogonally adjacent, or share a row or
//! column with only matched cells strictly between them. This is a
//! single-segment rule: pairs differing in both row and column never link,
//! there is no bent-path search.

use super::board::{Board, Pos};

/// Whether a straight, unobstructed line joins `a` and `b`
///
/// Callers check icon equality first; this only answers whether the board
/// geometry permits the link.
pub fn can_connect(board: &Board, a: Pos, b: Pos) -> bool {
    if a == b {
        return false;
    }

    let row_dist = a.row.abs_diff(b.row);
    let col_dist = a.col.abs_diff(b.col);

    // Orthogonal neighbors always link
    if (row_dist == 1 && col_dist == 0) || (col_dist == 1 && row_dist == 0) {
        return true;
    }

    // Same row: every cell strictly between must be cleared
    if a.row == b.row {
        let (start, end) = (a.col.min(b.col), a.col.max(b.col));
        return (start + 1..end).all(|col| board.is_matched(Pos::new(a.row, col)));
    }

    // Same column: symmetric
    if a.col == b.col {
        let (start, end) = (a.row.min(b.row), a.row.max(b.row));
        return (start + 1..end).all(|row| board.is_matched(Pos::new(row, a.col)));
    }

    false
}
