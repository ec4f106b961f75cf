use crate::{can_pay, Action, GameState, Phase, PlayerId};

/// Actions `player` may submit right now. Passing the turn is always offered
/// first; everything else depends on the phase and on who holds the decision.
/// Does not mutate state and is deterministic for a given state.
pub fn legal_actions(state: &GameState, player: PlayerId) -> Vec<Action> {
    let mut actions = vec![Action::PassTurn];
    if player >= state.player_count() || player != state.action_on {
        return actions;
    }
    let turn_holder = player == state.turn_holder;
    match state.phase {
        Phase::Cast if turn_holder => cast_actions(state, player, &mut actions),
        Phase::DeclareAttackers if turn_holder => attacker_actions(state, player, &mut actions),
        Phase::DeclareBlockers if !turn_holder => blocker_actions(state, player, &mut actions),
        _ => {}
    }
    actions
}

fn cast_actions(state: &GameState, player: PlayerId, actions: &mut Vec<Action>) {
    let zones = state.zones(player);
    if !state.land_played {
        actions.extend(
            zones
                .hand
                .cards
                .iter()
                .filter(|card| card.def.is_land())
                .map(|card| Action::PlayLand { card: card.id }),
        );
    }

    let opponent_board = &state.zones(state.opponent(player)).board;
    for card in &zones.hand.cards {
        if card.def.is_land() || !can_pay(&zones.board, &card.def.casting_cost) {
            continue;
        }
        if card.def.is_permanent() {
            actions.push(Action::CastPermanent { card: card.id });
        } else {
            // target legality is left to the card's own rules
            let targets = opponent_board.cards.iter().map(|target| target.id).collect();
            actions.push(Action::CastSpell {
                card: card.id,
                targets,
            });
        }
    }

    if zones.board.ready_attackers().next().is_some() {
        actions.push(Action::BeginCombat);
    }
}

fn attacker_actions(state: &GameState, player: PlayerId, actions: &mut Vec<Action>) {
    let board = &state.zones(player).board;
    actions.extend(
        board
            .ready_attackers()
            .filter(|card| !board.is_attacking(card.id))
            .map(|card| Action::DeclareAttacker { card: card.id }),
    );
    if !board.attackers.is_empty() {
        actions.push(Action::FinishAttackers);
    }
}

/// Full cross product of unassigned blockers and current attackers.
fn blocker_actions(state: &GameState, player: PlayerId, actions: &mut Vec<Action>) {
    let board = &state.zones(player).board;
    for blocker in board
        .available_blockers()
        .filter(|card| !state.combat.is_assigned(card.id))
    {
        for attacker in state.combat.attackers() {
            actions.push(Action::AssignBlocker {
                blocker: blocker.id,
                attacker,
            });
        }
    }
    actions.push(Action::FinishBlocking);
}

impl GameState {
    pub fn legal_actions(&self, player: PlayerId) -> Vec<Action> {
        legal_actions(self, player)
    }
}
