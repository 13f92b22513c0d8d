//! Noughts and crosses, used to exercise the search engine on a game small
//! enough to solve outright.

use crate::board::board_ids::{BoardId, BoardIdGenerator, SequentialBoardIds};
use crate::board::turn::Turn;
use crate::errors::CheckersResult;
use crate::game::turn_driven_game::TurnDrivenGame;
use crate::move_generation::successor_generator::SuccessorGenerator;
use crate::search::board_scoring::BoardScorer;
use crate::search::goal::GoalCheck;
use crate::search::negmax::NegmaxStage;
use crate::search::pipeline::{SearchFeatures, SearchPipeline, Traversal};
use crate::search::search_state::SearchState;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 3x3 grid; cell `x * 3 + y` holds a player id or 0.
#[derive(Debug, Clone)]
pub(crate) struct Grid {
    id: BoardId,
    cells: [i32; 9],
    turn: Turn,
}

impl Grid {
    pub(crate) fn new(id: BoardId, cells: [i32; 9], turn: Turn) -> Self {
        Self { id, cells, turn }
    }

    pub(crate) fn cells(&self) -> [i32; 9] {
        self.cells
    }

    /// Copy with `player`'s mark on `cell` and the turn passed on.
    pub(crate) fn with_mark(&self, id: BoardId, cell: usize, player: Turn) -> Self {
        let mut cells = self.cells;
        cells[cell] = player.id();
        Self {
            id,
            cells,
            turn: self.turn.next(),
        }
    }

    fn has_line(&self, player: Turn) -> bool {
        LINES
            .iter()
            .any(|line| line.iter().all(|&cell| self.cells[cell] == player.id()))
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells && self.turn == other.turn
    }
}

impl SearchState for Grid {
    fn state_id(&self) -> BoardId {
        self.id
    }

    fn turn(&self) -> Turn {
        self.turn
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct GridRules;

impl SuccessorGenerator<Grid> for GridRules {
    fn successors(&self, state: &Grid, ids: &mut dyn BoardIdGenerator) -> CheckersResult<Vec<Grid>> {
        Ok((0..9)
            .filter(|&cell| state.cells[cell] == 0)
            .map(|cell| state.with_mark(ids.next_board_id(), cell, state.turn))
            .collect())
    }
}

impl GoalCheck<Grid> for GridRules {
    fn player_has_lost(&self, state: &Grid, player: Turn) -> bool {
        state.has_line(player.next())
    }
}

impl BoardScorer<Grid> for GridRules {
    fn score(&self, state: &Grid) -> i32 {
        let moved = state.turn.next();
        if state.has_line(moved) {
            1
        } else if state.has_line(state.turn) {
            -1
        } else {
            0
        }
    }
}

pub(crate) fn grid_game(start: Grid, features: SearchFeatures, traversal: Traversal) -> TurnDrivenGame<Grid> {
    let negmax = NegmaxStage::new(Box::new(GridRules), Box::new(GridRules), Box::new(GridRules));
    let pipeline = SearchPipeline::new(
        negmax,
        features,
        traversal,
        Box::new(SequentialBoardIds::starting_at(start.state_id() + 1)),
    );
    match TurnDrivenGame::new(start, pipeline, 9) {
        Ok(game) => game,
        Err(err) => panic!("nine plies is a valid depth: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CheckersError;

    fn play(cells: [i32; 9]) -> TurnDrivenGame<Grid> {
        grid_game(Grid::new(0, cells, Turn::Max), SearchFeatures::default(), Traversal::default())
    }

    #[test]
    fn completes_a_winning_diagonal() {
        let mut game = play([1, -1, 0, 1, 1, -1, -1, 0, 0]);
        let outcome = game.compute_next_move().expect("moves remain");
        assert_eq!(outcome.state.cells(), [1, -1, 0, 1, 1, -1, -1, 0, 1]);
        assert!(outcome.won);
        assert_eq!(game.winner().expect("search runs"), Some(Turn::Max));
    }

    #[test]
    fn prefers_winning_over_blocking() {
        let mut game = play([1, 1, 0, 1, -1, 0, -1, -1, 1]);
        let outcome = game.compute_next_move().expect("moves remain");
        assert_eq!(outcome.state.cells(), [1, 1, 1, 1, -1, 0, -1, -1, 1]);
    }

    #[test]
    fn completes_a_winning_column() {
        let mut game = play([1, -1, -1, 1, 0, 0, 0, 0, 0]);
        let outcome = game.compute_next_move().expect("moves remain");
        assert_eq!(outcome.state.cells(), [1, -1, -1, 1, 0, 0, 1, 0, 0]);
    }

    #[test]
    fn blocks_an_immediate_threat() {
        // Min threatens the 2-4-6 diagonal and Max has no win of its own
        let mut game = play([1, 0, -1, 0, -1, 0, 0, 0, 0]);
        let outcome = game.compute_next_move().expect("moves remain");
        assert_eq!(outcome.state.cells()[6], 1);
    }

    #[test]
    fn solved_opening_takes_the_first_cell() {
        let mut game = play([0; 9]);
        let outcome = game.compute_next_move().expect("moves remain");
        assert_eq!(outcome.state.cells(), [1, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(!outcome.won);
    }

    #[test]
    fn occupied_cell_is_illegal() {
        let mut game = play([0; 9]);
        let after = game.compute_next_move().expect("moves remain").state;

        let overwrite = after.with_mark(BoardId::MAX - 1, 0, Turn::Min);
        assert_eq!(game.submit_move(&overwrite), Err(CheckersError::IllegalMove));

        let legal = after.with_mark(BoardId::MAX, 4, Turn::Min);
        let outcome = game.submit_move(&legal).expect("free cell is legal");
        assert_eq!(outcome.state, legal);
        assert_ne!(outcome.state.state_id(), legal.state_id());
    }

    #[test]
    fn decided_grid_reports_finished() {
        let mut game = play([-1, -1, -1, 1, 1, 0, 0, 0, 0]);
        assert_eq!(
            game.compute_next_move(),
            Err(CheckersError::GameFinished { winner: Turn::Min })
        );
        assert!(game.is_game_over().expect("search runs"));
    }

    #[test]
    fn feature_combinations_choose_the_same_moves() {
        let start = [1, 0, 0, 0, -1, 0, 0, 0, 0];
        let combos = [
            (SearchFeatures { alpha_beta: false, caching: false }, Traversal::Recursive),
            (SearchFeatures { alpha_beta: true, caching: false }, Traversal::ExplicitStack),
            (SearchFeatures { alpha_beta: false, caching: true }, Traversal::ExplicitStack),
            (SearchFeatures::default(), Traversal::ExplicitStack),
        ];

        let lines: Vec<Vec<[i32; 9]>> = combos
            .iter()
            .map(|&(features, traversal)| {
                let mut game = grid_game(Grid::new(0, start, Turn::Max), features, traversal);
                let mut played = Vec::new();
                while let Ok(outcome) = game.compute_next_move() {
                    played.push(outcome.state.cells());
                    if outcome.won {
                        break;
                    }
                }
                played
            })
            .collect();

        assert!(!lines[0].is_empty());
        for line in &lines[1..] {
            assert_eq!(line, &lines[0]);
        }
    }
}
