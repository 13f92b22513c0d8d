//! Array-backed checkers board.
//!
//! Cells hold raw `PieceId` values (`EMPTY_CELL` for vacant squares), stored
//! column-major: the cell for `(x, y)` lives at `x * height + y`. Piece
//! iteration walks cells in ascending index order, which fixes the order in
//! which the successor generator visits pieces.
//!
//! Per-player piece and king counts are maintained incrementally by
//! [`Board::add_piece`] and [`Board::remove_piece`]; only
//! [`Board::from_cells`] rebuilds them with a full scan.

use crate::board::board_ids::BoardId;
use crate::board::coordinate::Coordinate;
use crate::board::piece_catalogue::{self, PieceDescriptor, PieceId, EMPTY_CELL};
use crate::board::turn::Turn;
use crate::errors::{CheckersError, CheckersResult};

pub const CHECKERS_BOARD_EXTENT: i32 = 8;

/// Number of rows each player fills at the start of a game.
const STARTING_ROWS: i32 = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub total: u32,
    pub kings: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    counts: [Counts; 2],
}

impl Stats {
    #[inline]
    pub fn counts(&self, player: Turn) -> Counts {
        self.counts[player.index()]
    }

    #[inline]
    pub fn total(&self, player: Turn) -> u32 {
        self.counts[player.index()].total
    }

    #[inline]
    pub fn kings(&self, player: Turn) -> u32 {
        self.counts[player.index()].kings
    }

    fn add(&mut self, piece: PieceDescriptor) {
        let counts = &mut self.counts[piece.owner.index()];
        counts.total += 1;
        if piece.is_king() {
            counts.kings += 1;
        }
    }

    fn remove(&mut self, piece: PieceDescriptor) {
        let counts = &mut self.counts[piece.owner.index()];
        debug_assert!(counts.total > 0, "removing from an empty {} army", piece.owner);
        counts.total -= 1;
        if piece.is_king() {
            debug_assert!(counts.kings > 0, "removing a king {} does not hold", piece.owner);
            counts.kings -= 1;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    id: BoardId,
    width: i32,
    height: i32,
    cells: Vec<PieceId>,
    stats: Stats,
    turn: Turn,
    last_move: Option<Coordinate>,
}

impl Board {
    /// Empty standard 8x8 board.
    pub fn empty(id: BoardId, turn: Turn) -> Self {
        Self::with_extent(id, CHECKERS_BOARD_EXTENT, CHECKERS_BOARD_EXTENT, turn)
    }

    pub fn with_extent(id: BoardId, width: i32, height: i32, turn: Turn) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            id,
            width,
            height,
            cells: vec![EMPTY_CELL; (width * height) as usize],
            stats: Stats::default(),
            turn,
            last_move: None,
        }
    }

    /// Build a board from a raw cell snapshot, recounting every piece.
    pub fn from_cells(
        id: BoardId,
        width: i32,
        height: i32,
        cells: Vec<PieceId>,
        turn: Turn,
    ) -> CheckersResult<Self> {
        let expected_cells = (width.max(0) * height.max(0)) as usize;
        if cells.len() != expected_cells {
            return Err(CheckersError::InvalidSnapshot {
                expected_cells,
                found_cells: cells.len(),
            });
        }

        let mut stats = Stats::default();
        for &cell in cells.iter().filter(|&&cell| cell != EMPTY_CELL) {
            stats.add(piece_catalogue::try_lookup(cell)?);
        }

        Ok(Self {
            id,
            width,
            height,
            cells,
            stats,
            turn,
            last_move: None,
        })
    }

    /// Standard opening layout: each player fills the dark squares of the
    /// three rows nearest to its own edge, slots assigned row by row.
    pub fn starting_position(id: BoardId, turn: Turn) -> CheckersResult<Self> {
        let mut board = Self::empty(id, turn);
        let extent = CHECKERS_BOARD_EXTENT;

        let max_rows = 0..STARTING_ROWS;
        let min_rows = ((extent - STARTING_ROWS)..extent).rev();
        let layouts: [(Turn, Vec<i32>); 2] = [
            (Turn::Max, max_rows.collect()),
            (Turn::Min, min_rows.collect()),
        ];

        for (player, rows) in layouts {
            let mut slot = 0;
            for y in rows {
                for x in ((y + 1) % 2..extent).step_by(2) {
                    let piece = piece_catalogue::standard_piece(player, slot)
                        .ok_or(CheckersError::UnknownPieceId(slot as PieceId))?;
                    board.add_piece(Coordinate::new(x, y), piece)?;
                    slot += 1;
                }
            }
        }

        board.last_move = None;
        Ok(board)
    }

    /// Copy of this board under a new identity and side to move.
    pub fn derive(&self, id: BoardId, turn: Turn) -> Self {
        Self {
            id,
            turn,
            ..self.clone()
        }
    }

    #[inline]
    pub fn id(&self) -> BoardId {
        self.id
    }

    #[inline]
    pub fn turn(&self) -> Turn {
        self.turn
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    #[inline]
    pub fn cells(&self) -> &[PieceId] {
        &self.cells
    }

    /// Destination of the most recent placement, for rendering.
    #[inline]
    pub fn last_move(&self) -> Option<Coordinate> {
        self.last_move
    }

    #[inline]
    pub fn is_on_board(&self, pos: Coordinate) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// True for cells on the outer ring of the board.
    #[inline]
    pub fn is_edge(&self, pos: Coordinate) -> bool {
        pos.x == 0 || pos.y == 0 || pos.x == self.width - 1 || pos.y == self.height - 1
    }

    #[inline]
    fn index_of(&self, pos: Coordinate) -> usize {
        (pos.x * self.height + pos.y) as usize
    }

    #[inline]
    fn coordinate_of(&self, index: usize) -> Coordinate {
        let index = index as i32;
        Coordinate::new(index / self.height, index % self.height)
    }

    /// Piece on `pos`; `None` for empty or off-board cells.
    pub fn piece_at(&self, pos: Coordinate) -> Option<PieceDescriptor> {
        if !self.is_on_board(pos) {
            return None;
        }
        piece_catalogue::lookup(self.cells[self.index_of(pos)])
    }

    pub fn holds_piece_at(&self, pos: Coordinate) -> bool {
        self.piece_at(pos).is_some()
    }

    /// Every piece on the board in ascending cell-index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coordinate, PieceDescriptor)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, &cell)| {
                piece_catalogue::lookup(cell).map(|piece| (self.coordinate_of(index), piece))
            })
    }

    pub fn pieces_of(&self, player: Turn) -> impl Iterator<Item = (Coordinate, PieceDescriptor)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.owner == player)
    }

    pub fn add_piece(&mut self, pos: Coordinate, piece: PieceDescriptor) -> CheckersResult<()> {
        if !self.is_on_board(pos) {
            return Err(CheckersError::OffBoard(pos));
        }
        let index = self.index_of(pos);
        if self.cells[index] != EMPTY_CELL {
            return Err(CheckersError::CellOccupied(pos));
        }
        self.cells[index] = piece.id();
        self.stats.add(piece);
        self.last_move = Some(pos);
        Ok(())
    }

    pub fn remove_piece(&mut self, pos: Coordinate) -> CheckersResult<PieceDescriptor> {
        if !self.is_on_board(pos) {
            return Err(CheckersError::OffBoard(pos));
        }
        let index = self.index_of(pos);
        let piece = match piece_catalogue::lookup(self.cells[index]) {
            Some(piece) => piece,
            None => return Err(CheckersError::EmptyCell(pos)),
        };
        self.cells[index] = EMPTY_CELL;
        self.stats.remove(piece);
        Ok(piece)
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.turn == other.turn
            && self.cells == other.cells
    }
}

impl Eq for Board {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::piece_catalogue::{king_variant_of, standard_piece};

    fn piece(owner: Turn, slot: usize) -> PieceDescriptor {
        standard_piece(owner, slot).expect("slot within catalogue")
    }

    #[test]
    fn starting_position_layout() {
        let board = Board::starting_position(0, Turn::Max).expect("starting position builds");
        assert_eq!(board.stats().total(Turn::Max), 12);
        assert_eq!(board.stats().total(Turn::Min), 12);
        assert_eq!(board.stats().kings(Turn::Max), 0);
        assert_eq!(board.last_move(), None);

        for (pos, p) in board.pieces() {
            assert_eq!((pos.x + pos.y) % 2, 1, "piece on light square {pos}");
            match p.owner {
                Turn::Max => assert!(pos.y < 3),
                Turn::Min => assert!(pos.y > 4),
            }
        }

        assert_eq!(board.piece_at(Coordinate::new(1, 0)), Some(piece(Turn::Max, 0)));
        assert_eq!(board.piece_at(Coordinate::new(0, 1)), Some(piece(Turn::Max, 4)));
        assert_eq!(board.piece_at(Coordinate::new(0, 7)), Some(piece(Turn::Min, 0)));
        assert_eq!(board.piece_at(Coordinate::new(1, 6)), Some(piece(Turn::Min, 4)));
    }

    #[test]
    fn pieces_iterate_in_cell_index_order() {
        let board = Board::starting_position(0, Turn::Max).expect("starting position builds");
        let coords: Vec<Coordinate> = board.pieces().map(|(pos, _)| pos).collect();
        assert_eq!(coords[0], Coordinate::new(0, 1));
        assert_eq!(coords[1], Coordinate::new(0, 5));
        assert_eq!(coords[2], Coordinate::new(0, 7));
        assert_eq!(coords[3], Coordinate::new(1, 0));
    }

    #[test]
    fn add_and_remove_keep_stats_in_sync() {
        let mut board = Board::empty(0, Turn::Max);
        let pos = Coordinate::new(2, 3);
        let king = king_variant_of(piece(Turn::Min, 3));
        board.add_piece(pos, king).expect("cell is empty");
        assert_eq!(board.stats().counts(Turn::Min), Counts { total: 1, kings: 1 });
        assert_eq!(board.last_move(), Some(pos));

        assert_eq!(
            board.add_piece(pos, piece(Turn::Max, 0)),
            Err(CheckersError::CellOccupied(pos))
        );

        assert_eq!(board.remove_piece(pos), Ok(king));
        assert_eq!(board.stats().counts(Turn::Min), Counts::default());
        assert_eq!(board.remove_piece(pos), Err(CheckersError::EmptyCell(pos)));
    }

    #[test]
    fn clearing_a_snapshot_empties_the_counts_exactly() {
        let opening = Board::starting_position(0, Turn::Max).expect("starting position builds");
        let mut board = Board::from_cells(1, 8, 8, opening.cells().to_vec(), Turn::Max)
            .expect("snapshot is valid");

        let occupied: Vec<Coordinate> = board.pieces().map(|(pos, _)| pos).collect();
        for (removed, pos) in occupied.iter().enumerate() {
            board.remove_piece(*pos).expect("cell holds a piece");
            let left = (occupied.len() - removed - 1) as u32;
            let total = board.stats().total(Turn::Max) + board.stats().total(Turn::Min);
            assert_eq!(total, left);
        }
        assert_eq!(board.stats().counts(Turn::Max), Counts::default());
        assert_eq!(board.stats().counts(Turn::Min), Counts::default());
    }

    #[test]
    fn off_board_positions_are_rejected() {
        let mut board = Board::empty(0, Turn::Max);
        let outside = Coordinate::new(8, 0);
        assert!(!board.is_on_board(outside));
        assert!(!board.is_on_board(Coordinate::new(0, -1)));
        assert_eq!(board.piece_at(outside), None);
        assert_eq!(
            board.add_piece(outside, piece(Turn::Max, 0)),
            Err(CheckersError::OffBoard(outside))
        );
    }

    #[test]
    fn from_cells_recounts_pieces() {
        let source = Board::starting_position(0, Turn::Min).expect("starting position builds");
        let rebuilt = Board::from_cells(9, 8, 8, source.cells().to_vec(), Turn::Min)
            .expect("snapshot is valid");
        assert_eq!(rebuilt, source);
        assert_eq!(rebuilt.stats(), source.stats());

        let short = Board::from_cells(0, 8, 8, vec![0; 10], Turn::Max);
        assert_eq!(
            short.map(|_| ()),
            Err(CheckersError::InvalidSnapshot {
                expected_cells: 64,
                found_cells: 10
            })
        );

        let mut bogus = vec![0; 64];
        bogus[3] = 5;
        assert_eq!(
            Board::from_cells(0, 8, 8, bogus, Turn::Max).map(|_| ()),
            Err(CheckersError::UnknownPieceId(5))
        );
    }

    #[test]
    fn equality_ignores_id_and_last_move() {
        let board = Board::starting_position(0, Turn::Max).expect("starting position builds");
        let mut other = board.derive(42, Turn::Max);
        assert_eq!(board, other);

        let pos = Coordinate::new(3, 4);
        other.add_piece(pos, piece(Turn::Max, 11)).ok();
        other.remove_piece(pos).expect("piece was just placed");
        assert_eq!(other.last_move(), Some(pos));
        assert_eq!(board, other);

        assert_ne!(board, board.derive(0, Turn::Min));
    }
}
