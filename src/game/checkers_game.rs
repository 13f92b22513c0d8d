//! Checkers front door: a configured engine plus the human move path.

use log::info;
use rand::Rng;

use crate::board::board::Board;
use crate::board::board_ids::{BoardIdGenerator, SequentialBoardIds};
use crate::board::turn::Turn;
use crate::errors::CheckersResult;
use crate::game::turn_driven_game::{MoveOutcome, TurnDrivenGame};
use crate::move_generation::checkers_successors::CheckersMoveGenerator;
use crate::move_generation::move_request::{apply_move_request, MoveStep};
use crate::search::board_scoring::{BoardScorer, CheckersScorer};
use crate::search::goal::CheckersGoal;
use crate::search::negmax::NegmaxStage;
use crate::search::pipeline::{SearchConfig, SearchFeatures, SearchPipeline, SearchReport, Traversal};

pub struct CheckersGame {
    game: TurnDrivenGame<Board>,
}

impl CheckersGame {
    pub fn builder() -> CheckersGameBuilder {
        CheckersGameBuilder::default()
    }

    /// Standard opening with the default configuration and a random first mover.
    pub fn new() -> CheckersResult<Self> {
        Self::builder().build()
    }

    #[inline]
    pub fn current_state(&self) -> &Board {
        self.game.current_state()
    }

    #[inline]
    pub fn depth_limit(&self) -> u32 {
        self.game.depth_limit()
    }

    pub fn set_depth_limit(&mut self, depth_limit: u32) -> CheckersResult<()> {
        self.game.set_depth_limit(depth_limit)
    }

    pub fn features(&self) -> SearchFeatures {
        self.game.pipeline().features()
    }

    pub fn last_search(&self) -> SearchReport {
        self.game.last_search()
    }

    /// Lets the engine play for the side to act.
    pub fn compute_next_move(&mut self) -> CheckersResult<MoveOutcome<Board>> {
        self.game.compute_next_move()
    }

    /// Plays a move request for the side to act.
    ///
    /// The steps are applied to a copy of the current board, and the result
    /// is only committed when it equals one of the legal successors.
    pub fn submit_moves(&mut self, steps: &[MoveStep]) -> CheckersResult<MoveOutcome<Board>> {
        self.game.ensure_playable()?;
        let id = self.game.pipeline_mut().ids().next_board_id();
        let proposed = apply_move_request(self.game.current_state(), steps, id)?;
        self.game.submit_move(&proposed)
    }

    pub fn is_game_over(&mut self) -> CheckersResult<bool> {
        self.game.is_game_over()
    }

    pub fn winner(&mut self) -> CheckersResult<Option<Turn>> {
        self.game.winner()
    }
}

pub struct CheckersGameBuilder {
    config: SearchConfig,
    starting_turn: Option<Turn>,
    starting_board: Option<Board>,
    scorer: Option<Box<dyn BoardScorer<Board>>>,
    ids: Option<Box<dyn BoardIdGenerator>>,
}

impl Default for CheckersGameBuilder {
    fn default() -> Self {
        Self {
            config: SearchConfig::default(),
            starting_turn: None,
            starting_board: None,
            scorer: None,
            ids: None,
        }
    }
}

impl CheckersGameBuilder {
    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn depth_limit(mut self, depth_limit: u32) -> Self {
        self.config.depth_limit = depth_limit;
        self
    }

    pub fn alpha_beta(mut self, enabled: bool) -> Self {
        self.config.features.alpha_beta = enabled;
        self
    }

    pub fn caching(mut self, enabled: bool) -> Self {
        self.config.features.caching = enabled;
        self
    }

    pub fn traversal(mut self, traversal: Traversal) -> Self {
        self.config.traversal = traversal;
        self
    }

    pub fn starting_turn(mut self, turn: Turn) -> Self {
        self.starting_turn = Some(turn);
        self
    }

    /// Draws the first mover from `rng`.
    pub fn starting_turn_from<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let turn = if rng.random_bool(0.5) { Turn::Max } else { Turn::Min };
        self.starting_turn(turn)
    }

    /// Starts from `board` instead of the standard opening. The starting
    /// turn setting is ignored; the board carries its own.
    pub fn starting_board(mut self, board: Board) -> Self {
        self.starting_board = Some(board);
        self
    }

    pub fn scorer(mut self, scorer: Box<dyn BoardScorer<Board>>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn ids(mut self, ids: Box<dyn BoardIdGenerator>) -> Self {
        self.ids = Some(ids);
        self
    }

    pub fn build(self) -> CheckersResult<CheckersGame> {
        let mut ids = self
            .ids
            .unwrap_or_else(|| Box::new(SequentialBoardIds::new()));

        let start = match self.starting_board {
            Some(board) => board,
            None => {
                let turn = self
                    .starting_turn
                    .unwrap_or_else(|| if rand::rng().random_bool(0.5) { Turn::Max } else { Turn::Min });
                Board::starting_position(ids.next_board_id(), turn)?
            }
        };

        let scorer = self
            .scorer
            .unwrap_or_else(|| Box::new(CheckersScorer::new()));
        let negmax = NegmaxStage::new(Box::new(CheckersMoveGenerator::new()), scorer, Box::new(CheckersGoal));
        let pipeline = SearchPipeline::new(negmax, self.config.features, self.config.traversal, ids);

        let game = TurnDrivenGame::new(start, pipeline, self.config.depth_limit)?;
        info!(
            "new checkers game: {} to act, depth {}, alpha-beta {}, caching {}",
            game.current_state().turn(),
            self.config.depth_limit,
            self.config.features.alpha_beta,
            self.config.features.caching
        );

        Ok(CheckersGame { game })
    }
}
