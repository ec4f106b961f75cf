use crate::{legal_actions, Action, EventBus, GameState, Phase, PlayerId, RuleError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerInfo {
    pub name: String,
    #[serde(default)]
    pub is_bot: bool,
}

impl PlayerInfo {
    pub fn new(name: &str, is_bot: bool) -> Self {
        Self {
            name: name.to_string(),
            is_bot,
        }
    }
}

/// Read-only view of the game, called once per decision point.
pub trait Presenter {
    fn render(&mut self, state: &GameState, roster: &[PlayerInfo]);
}

/// Chooses one action for `player` out of `legal`.
pub trait Actor {
    fn select_action(&mut self, state: &GameState, player: PlayerId, legal: &[Action]) -> Action;
}

/// Presenter that draws nothing, for headless play.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render(&mut self, _state: &GameState, _roster: &[PlayerInfo]) {}
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("expected {expected} actors, got {got}")]
    ActorCount { expected: usize, got: usize },
    #[error("action {0} was not offered")]
    NotOffered(String),
    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Owns the game state and serializes every decision through one loop.
#[derive(Debug)]
pub struct Engine {
    pub state: GameState,
    pub roster: Vec<PlayerInfo>,
}

impl Engine {
    pub fn new(state: GameState, roster: Vec<PlayerInfo>) -> Self {
        Self { state, roster }
    }

    /// One decision: start the turn if needed, offer legal actions to the
    /// player holding the decision, and resolve the chosen one.
    pub fn step(
        &mut self,
        actors: &mut [Box<dyn Actor>],
        presenter: &mut dyn Presenter,
        events: &mut EventBus,
    ) -> Result<(PlayerId, Action), EngineError> {
        if actors.len() != self.state.player_count() {
            return Err(EngineError::ActorCount {
                expected: self.state.player_count(),
                got: actors.len(),
            });
        }
        if self.state.phase == Phase::Untap {
            self.state.begin_turn(events)?;
        }
        let player = self.state.action_on;
        let legal = legal_actions(&self.state, player);
        presenter.render(&self.state, &self.roster);
        let action = actors[player].select_action(&self.state, player, &legal);
        if !legal.contains(&action) {
            return Err(EngineError::NotOffered(action.stable_key()));
        }
        self.state.apply(player, &action, events)?;
        Ok((player, action))
    }

    /// Plays until `max_turns` turns have been passed. Returns the number of
    /// decisions taken.
    pub fn run_turns(
        &mut self,
        max_turns: u32,
        actors: &mut [Box<dyn Actor>],
        presenter: &mut dyn Presenter,
        events: &mut EventBus,
    ) -> Result<usize, EngineError> {
        let mut steps = 0;
        while !(self.state.phase == Phase::Untap && self.state.turn_number >= max_turns) {
            self.step(actors, presenter, events)?;
            steps += 1;
        }
        Ok(steps)
    }
}
