//! Plain-text board renderer for the terminal front end and test output.

use crate::board::board::Board;
use crate::board::coordinate::Coordinate;
use crate::board::piece_catalogue::{PieceDescriptor, PieceKind};
use crate::board::turn::Turn;

/// Render the board with the highest row on top.
///
/// Every cell is three characters wide; the destination of the last move is
/// bracketed. Column and row labels are the coordinates accepted by
/// [`crate::utils::move_notation::parse_move_steps`].
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    let header = column_header(board.width());

    out.push_str(&header);
    out.push('\n');

    for y in (0..board.height()).rev() {
        out.push_str(&format!("{y:>2} "));
        for x in 0..board.width() {
            let pos = Coordinate::new(x, y);
            let symbol = board.piece_at(pos).map(piece_symbol).unwrap_or('·');
            if board.last_move() == Some(pos) {
                out.push('[');
                out.push(symbol);
                out.push(']');
            } else {
                out.push(' ');
                out.push(symbol);
                out.push(' ');
            }
        }
        out.push_str(&format!(" {y}\n"));
    }

    out.push_str(&header);
    out
}

fn column_header(width: i32) -> String {
    let mut header = String::from("   ");
    for x in 0..width {
        header.push_str(&format!(" {x} "));
    }
    header
}

fn piece_symbol(piece: PieceDescriptor) -> char {
    match (piece.owner, piece.kind) {
        (Turn::Max, PieceKind::Standard) => 'o',
        (Turn::Max, PieceKind::King) => 'O',
        (Turn::Min, PieceKind::Standard) => 'x',
        (Turn::Min, PieceKind::King) => 'X',
    }
}
