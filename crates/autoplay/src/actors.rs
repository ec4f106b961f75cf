use crate::Strategy;
use tapout_core::{Action, Actor, GameState, PlayerId, RngState};

/// Picks uniformly among the offered actions.
#[derive(Debug)]
pub struct RandomActor {
    rng: RngState,
}

impl RandomActor {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RngState::from_seed(seed),
        }
    }
}

impl Actor for RandomActor {
    fn select_action(&mut self, _state: &GameState, _player: PlayerId, legal: &[Action]) -> Action {
        self.rng
            .pick_index(legal.len())
            .and_then(|idx| legal.get(idx))
            .cloned()
            .unwrap_or(Action::PassTurn)
    }
}

/// Fixed priority list: land drop, heaviest permanent, combat, then pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyActor;

impl GreedyActor {
    fn heaviest_permanent(state: &GameState, player: PlayerId, legal: &[Action]) -> Option<Action> {
        legal
            .iter()
            .filter_map(|action| match action {
                Action::CastPermanent { card } => state
                    .card(player, *card)
                    .map(|instance| (instance.def.casting_weight(), action)),
                _ => None,
            })
            // first of equal weights wins
            .fold(None, |best: Option<(u32, &Action)>, (weight, action)| match best {
                Some((top, _)) if top >= weight => best,
                _ => Some((weight, action)),
            })
            .map(|(_, action)| action.clone())
    }

    fn unblocked_assignment(state: &GameState, legal: &[Action]) -> Option<Action> {
        legal
            .iter()
            .find(|action| match action {
                Action::AssignBlocker { attacker, .. } => {
                    state.combat.blockers_of(*attacker).is_empty()
                }
                _ => false,
            })
            .cloned()
    }
}

impl Actor for GreedyActor {
    fn select_action(&mut self, state: &GameState, player: PlayerId, legal: &[Action]) -> Action {
        let find = |wanted: fn(&Action) -> bool| legal.iter().find(|action| wanted(action)).cloned();
        find(|action| matches!(action, Action::PlayLand { .. }))
            .or_else(|| Self::heaviest_permanent(state, player, legal))
            .or_else(|| find(|action| matches!(action, Action::DeclareAttacker { .. })))
            .or_else(|| find(|action| matches!(action, Action::FinishAttackers)))
            .or_else(|| Self::unblocked_assignment(state, legal))
            .or_else(|| find(|action| matches!(action, Action::FinishBlocking)))
            .or_else(|| find(|action| matches!(action, Action::BeginCombat)))
            .unwrap_or(Action::PassTurn)
    }
}

pub fn actor_for(strategy: Strategy, seed: u64) -> Box<dyn Actor> {
    match strategy {
        Strategy::Random => Box::new(RandomActor::new(seed)),
        Strategy::Greedy => Box::new(GreedyActor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tapout_core::{
        CardDef, CardId, CardInstance, CardType, CombatMap, DeckBuilder, DeckRules, EventBus,
        GameConfig, ManaCost, Phase,
    };

    fn instance(id: u32, owner: PlayerId, slug: &str, cost: &str, kind: CardType) -> CardInstance {
        let def = CardDef::new(slug, slug, ManaCost::parse(cost).expect("cost"), vec![kind]);
        CardInstance::new(CardId(id), owner, Arc::new(def))
    }

    fn empty_state() -> GameState {
        let rules = DeckRules {
            min_size: 0,
            max_size: 99,
            copy_limit: 4,
        };
        let decks = (0..2)
            .map(|owner| DeckBuilder::new(owner, rules).finish().expect("empty deck"))
            .collect();
        let mut rng = RngState::from_seed(1);
        let mut events = EventBus::default();
        let config = GameConfig {
            opening_hand_size: 0,
            ..GameConfig::default()
        };
        let mut state = GameState::new(decks, 0, config, &mut rng, &mut events).expect("state");
        state.begin_turn(&mut events).expect("begin");
        state
    }

    #[test]
    fn greedy_prefers_land_then_heaviest_permanent() {
        let mut state = empty_state();
        state.players[0].hand.cards = vec![
            instance(1, 0, "lions", "W", CardType::Creature),
            instance(2, 0, "knight", "WW", CardType::Creature),
            instance(3, 0, "plains", "", CardType::Land),
        ];
        let legal = vec![
            Action::PassTurn,
            Action::CastPermanent { card: CardId(1) },
            Action::CastPermanent { card: CardId(2) },
        ];
        let mut actor = GreedyActor;
        assert_eq!(
            actor.select_action(&state, 0, &legal),
            Action::CastPermanent { card: CardId(2) }
        );
        let mut with_land = legal.clone();
        with_land.push(Action::PlayLand { card: CardId(3) });
        assert_eq!(
            actor.select_action(&state, 0, &with_land),
            Action::PlayLand { card: CardId(3) }
        );
    }

    #[test]
    fn greedy_blocks_each_attacker_once() {
        let mut state = empty_state();
        state.phase = Phase::DeclareBlockers;
        state.combat = CombatMap::from_attackers(&[CardId(10), CardId(11)]);
        state.combat.assign(CardId(10), CardId(20));
        let legal = vec![
            Action::PassTurn,
            Action::AssignBlocker {
                blocker: CardId(21),
                attacker: CardId(10),
            },
            Action::AssignBlocker {
                blocker: CardId(21),
                attacker: CardId(11),
            },
            Action::FinishBlocking,
        ];
        assert_eq!(
            GreedyActor.select_action(&state, 1, &legal),
            Action::AssignBlocker {
                blocker: CardId(21),
                attacker: CardId(11),
            }
        );
        let done = vec![Action::PassTurn, legal[1].clone(), Action::FinishBlocking];
        assert_eq!(GreedyActor.select_action(&state, 1, &done), Action::FinishBlocking);
    }

    #[test]
    fn greedy_passes_when_nothing_else_is_offered() {
        let state = empty_state();
        assert_eq!(
            GreedyActor.select_action(&state, 0, &[Action::PassTurn]),
            Action::PassTurn
        );
    }

    #[test]
    fn random_actor_is_reproducible() {
        let state = empty_state();
        let legal = vec![
            Action::PassTurn,
            Action::BeginCombat,
            Action::FinishAttackers,
            Action::FinishBlocking,
        ];
        let picks = |seed| {
            let mut actor = RandomActor::new(seed);
            (0..16)
                .map(|_| actor.select_action(&state, 0, &legal))
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(5), picks(5));
        assert!(picks(5).iter().all(|action| legal.contains(action)));
    }
}
