use crate::{
    actor_for, AutoplayConfig, AutoplayError, AutoplayResult, FinalState, RunStatus, SeatSummary,
    StepRecord, SummaryStats,
};
use std::time::Instant;
use tapout_core::{
    Action, Actor, Deck, Engine, EngineError, ErrorKind, EventBus, GameConfig, GameState,
    NullPresenter, PlayerInfo, RngState,
};

#[derive(Debug)]
pub struct Simulator {
    pub engine: Engine,
    pub events: EventBus,
}

impl Simulator {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            events: EventBus::default(),
        }
    }

    /// Shuffles with `config.seed` and seats one bot per strategy. Player 0
    /// takes the first turn.
    pub fn from_decks(
        decks: Vec<Deck>,
        game: GameConfig,
        config: &AutoplayConfig,
    ) -> Result<Self, AutoplayError> {
        let mut rng = RngState::from_seed(config.seed);
        let mut events = EventBus::default();
        let state = GameState::new(decks, 0, game, &mut rng, &mut events)?;
        let roster = config
            .strategies
            .iter()
            .enumerate()
            .map(|(idx, strategy)| PlayerInfo::new(&format!("{} bot {idx}", strategy.label()), true))
            .collect();
        Ok(Self {
            engine: Engine::new(state, roster),
            events,
        })
    }

    fn actors(config: &AutoplayConfig) -> Vec<Box<dyn Actor>> {
        config
            .strategies
            .iter()
            .enumerate()
            .map(|(idx, strategy)| actor_for(*strategy, config.seed.wrapping_add(idx as u64 + 1)))
            .collect()
    }

    pub fn final_state(&self) -> FinalState {
        let state = &self.engine.state;
        let seats = state
            .players
            .iter()
            .enumerate()
            .map(|(idx, zones)| SeatSummary {
                name: self
                    .engine
                    .roster
                    .get(idx)
                    .map(|info| info.name.clone())
                    .unwrap_or_else(|| format!("player {idx}")),
                library: zones.library.len(),
                hand: zones.hand.len(),
                board: zones.board.cards.len(),
                graveyard: zones.graveyard.cards.len(),
            })
            .collect();
        FinalState {
            turn: state.turn_number,
            turn_holder: state.turn_holder,
            phase: state.phase.label().to_string(),
            pending_spells: state.stack.len(),
            seats,
        }
    }

    /// Plays bot against bot until the turn limit or the step budget runs out.
    pub fn play(&mut self, config: &AutoplayConfig) -> Result<AutoplayResult, AutoplayError> {
        let started_at = Instant::now();
        let mut actors = Self::actors(config);
        let mut presenter = NullPresenter;
        let mut steps: Vec<StepRecord> = Vec::new();
        let mut total_events = self.events.drain().count();

        for step in 0..config.max_steps {
            if self.engine.state.turn_limit_reached(config.max_turns) {
                break;
            }
            let phase_before = self.engine.state.phase.label().to_string();
            let (player, action, gap) =
                match self.engine.step(&mut actors, &mut presenter, &mut self.events) {
                    Ok((player, action)) => (player, action, None),
                    Err(EngineError::Rule(err)) if err.kind() == ErrorKind::RuleGap => {
                        // bots cannot do anything useful with an unsupported card
                        let player = self.engine.state.action_on;
                        self.engine
                            .state
                            .apply(player, &Action::PassTurn, &mut self.events)
                            .map_err(EngineError::from)?;
                        (player, Action::PassTurn, Some(err.to_string()))
                    }
                    Err(err) => return Err(err.into()),
                };
            let event_count = self.events.drain().count();
            total_events += event_count;
            let state = &self.engine.state;
            steps.push(StepRecord {
                step,
                turn: state.turn_number,
                player,
                phase_before,
                action_label: match gap {
                    Some(reason) => format!("{reason}; {}", state.describe_action(player, &action)),
                    None => state.describe_action(player, &action),
                },
                action,
                phase_after: state.phase.label().to_string(),
                event_count,
            });
        }

        let status = if self.engine.state.turn_limit_reached(config.max_turns) {
            RunStatus::TurnLimit
        } else {
            RunStatus::MaxSteps
        };
        Ok(AutoplayResult {
            seed: config.seed,
            status,
            final_state: self.final_state(),
            summary: SummaryStats {
                steps: steps.len() as u32,
                events: total_events,
                wall_time_ms: started_at.elapsed().as_millis() as u64,
            },
            steps,
        })
    }
}
