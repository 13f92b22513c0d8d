//! Turn-driven game orchestration on top of the search pipeline.
//!
//! The orchestrator owns the committed state. The engine's move comes from a
//! full-depth search; a proposed move is validated against a depth-1 search
//! and the generated successor (not the proposal) is committed, so the
//! committed state keeps an id the search cache knows about.

use log::{debug, info};

use crate::board::turn::Turn;
use crate::errors::{CheckersError, CheckersResult};
use crate::search::node::SearchTree;
use crate::search::pipeline::{SearchPipeline, SearchReport};
use crate::search::search_state::SearchState;

/// A committed move and whether it decided the game.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome<S> {
    pub state: S,
    /// The side to act in `state` has lost or has no legal move.
    pub won: bool,
}

pub struct TurnDrivenGame<S: SearchState> {
    current: S,
    pipeline: SearchPipeline<S>,
    depth_limit: u32,
}

impl<S: SearchState> TurnDrivenGame<S> {
    pub fn new(start: S, pipeline: SearchPipeline<S>, depth_limit: u32) -> CheckersResult<Self> {
        if depth_limit == 0 {
            return Err(CheckersError::InvalidDepthLimit(depth_limit));
        }
        Ok(Self {
            current: start,
            pipeline,
            depth_limit,
        })
    }

    #[inline]
    pub fn current_state(&self) -> &S {
        &self.current
    }

    #[inline]
    pub fn depth_limit(&self) -> u32 {
        self.depth_limit
    }

    pub fn set_depth_limit(&mut self, depth_limit: u32) -> CheckersResult<()> {
        if depth_limit == 0 {
            return Err(CheckersError::InvalidDepthLimit(depth_limit));
        }
        info!("changing depth limit from {} to {depth_limit}", self.depth_limit);
        self.depth_limit = depth_limit;
        Ok(())
    }

    #[inline]
    pub fn pipeline(&self) -> &SearchPipeline<S> {
        &self.pipeline
    }

    #[inline]
    pub fn pipeline_mut(&mut self) -> &mut SearchPipeline<S> {
        &mut self.pipeline
    }

    pub fn last_search(&self) -> SearchReport {
        self.pipeline.last_report()
    }

    /// Searches from the committed state and plays the best-scoring move.
    pub fn compute_next_move(&mut self) -> CheckersResult<MoveOutcome<S>> {
        let tree = self.pipeline.search(self.current.clone(), self.depth_limit)?;
        self.ensure_not_finished(&tree)?;

        let root = tree.root();
        let ranked = tree.ranked_children(root);
        let Some(&best) = ranked.first() else {
            return Err(self.finished());
        };

        let chosen = tree.node(best);
        info!(
            "{} plays state {} (score {}, {} candidates)",
            self.current.turn(),
            chosen.state().state_id(),
            chosen.score(),
            ranked.len()
        );
        self.current = chosen.state().clone();
        self.outcome()
    }

    /// Validates `proposed` as a successor of the committed state and plays it.
    pub fn submit_move(&mut self, proposed: &S) -> CheckersResult<MoveOutcome<S>> {
        let expected = self.current.turn().next();
        if proposed.turn() != expected {
            return Err(CheckersError::NotYourTurn {
                expected,
                found: proposed.turn(),
            });
        }

        let tree = self.pipeline.search(self.current.clone(), 1)?;
        self.ensure_not_finished(&tree)?;

        let matching = tree
            .children(tree.root())
            .iter()
            .map(|&child| tree.node(child).state())
            .find(|&candidate| candidate == proposed);

        match matching {
            Some(generated) => {
                debug!(
                    "accepted proposed move as state {} for {}",
                    generated.state_id(),
                    self.current.turn()
                );
                self.current = generated.clone();
                self.outcome()
            }
            None => Err(CheckersError::IllegalMove),
        }
    }

    /// The side to act has lost or has no legal move.
    pub fn is_game_over(&mut self) -> CheckersResult<bool> {
        if self.pipeline.mover_has_lost(&self.current) {
            return Ok(true);
        }
        let tree = self.pipeline.search(self.current.clone(), 1)?;
        Ok(tree.children(tree.root()).is_empty())
    }

    /// Winning side once the game is over.
    pub fn winner(&mut self) -> CheckersResult<Option<Turn>> {
        Ok(self
            .is_game_over()?
            .then(|| self.current.turn().next()))
    }

    /// `GameFinished` once the game is over, so callers can refuse input early.
    pub fn ensure_playable(&mut self) -> CheckersResult<()> {
        if self.is_game_over()? {
            return Err(self.finished());
        }
        Ok(())
    }

    fn outcome(&mut self) -> CheckersResult<MoveOutcome<S>> {
        let won = self.is_game_over()?;
        if won {
            info!("game over, {} wins", self.current.turn().next());
        }
        Ok(MoveOutcome {
            state: self.current.clone(),
            won,
        })
    }

    fn ensure_not_finished(&self, tree: &SearchTree<S>) -> CheckersResult<()> {
        if self.pipeline.mover_has_lost(&self.current) || tree.children(tree.root()).is_empty() {
            return Err(self.finished());
        }
        Ok(())
    }

    fn finished(&self) -> CheckersError {
        CheckersError::GameFinished {
            winner: self.current.turn().next(),
        }
    }
}
