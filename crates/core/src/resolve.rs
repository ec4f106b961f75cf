use crate::{
    can_pay, pay_cost, Action, CardId, CardInstance, Event, EventBus, GameState, HistoryEntry,
    PendingSpell, Phase, PlayerId, Zone,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Rules this engine deliberately does not implement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleGap {
    NonBasicLand { slug: String },
}

impl fmt::Display for RuleGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonBasicLand { slug } => write!(f, "non-basic land '{slug}'"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RuleGap,
    StateConsistency,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("not supported yet: {0}")]
    Unsupported(RuleGap),
    #[error("card {card} of player {owner} is not in {zone:?}")]
    CardNotFound {
        owner: PlayerId,
        card: CardId,
        zone: Zone,
    },
    #[error("cannot {action} during {phase}")]
    WrongPhase { phase: Phase, action: String },
    #[error("player {0} does not hold the decision")]
    NotYourDecision(PlayerId),
    #[error("insufficient mana: need {needed}, have {available}")]
    InsufficientMana { needed: u32, available: u32 },
    #[error("illegal action: {0}")]
    IllegalAction(String),
}

impl RuleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unsupported(_) => ErrorKind::RuleGap,
            _ => ErrorKind::StateConsistency,
        }
    }
}

impl GameState {
    /// Resolves one action for `player` and appends it to the history.
    /// Every precondition is checked before anything is mutated, so a
    /// failed action leaves the state untouched.
    pub fn apply(
        &mut self,
        player: PlayerId,
        action: &Action,
        events: &mut EventBus,
    ) -> Result<(), RuleError> {
        if player >= self.player_count() {
            return Err(RuleError::NotYourDecision(player));
        }
        // passing is accepted from anyone; everything else needs the decision
        if *action != Action::PassTurn && player != self.action_on {
            return Err(RuleError::NotYourDecision(player));
        }
        match action {
            Action::PassTurn => self.pass_turn(events),
            Action::PlayLand { card } => self.play_land(player, *card, events)?,
            Action::CastPermanent { card } => self.cast_permanent(player, *card, events)?,
            Action::CastSpell { card, targets } => {
                self.cast_spell(player, *card, targets, events)?
            }
            Action::BeginCombat => self.begin_combat(player, events)?,
            Action::DeclareAttacker { card } => self.declare_attacker(player, *card, events)?,
            Action::FinishAttackers => self.finish_attackers(player, events)?,
            Action::AssignBlocker { blocker, attacker } => {
                self.assign_blocker(player, *blocker, *attacker, events)?
            }
            Action::FinishBlocking => self.finish_blocking(player, events)?,
        }
        self.history.push(HistoryEntry {
            turn: self.turn_number,
            player,
            action: action.clone(),
        });
        Ok(())
    }

    fn require_phase(&self, phase: Phase, action: &str) -> Result<(), RuleError> {
        if self.phase != phase {
            return Err(RuleError::WrongPhase {
                phase: self.phase,
                action: action.to_string(),
            });
        }
        Ok(())
    }

    fn require_turn_holder(&self, player: PlayerId) -> Result<(), RuleError> {
        if player != self.turn_holder {
            return Err(RuleError::NotYourDecision(player));
        }
        Ok(())
    }

    fn hand_card(&self, player: PlayerId, card: CardId) -> Result<&CardInstance, RuleError> {
        self.players[player]
            .hand
            .get(card)
            .ok_or(RuleError::CardNotFound {
                owner: player,
                card,
                zone: Zone::Hand,
            })
    }

    fn board_card(&self, player: PlayerId, card: CardId) -> Result<&CardInstance, RuleError> {
        self.players[player]
            .board
            .get(card)
            .ok_or(RuleError::CardNotFound {
                owner: player,
                card,
                zone: Zone::Board,
            })
    }

    /// Moves a hand card to its owner's board. Callers have already
    /// confirmed the card is in hand.
    fn move_hand_to_board(&mut self, player: PlayerId, card: CardId) -> Result<(), RuleError> {
        let zones = &mut self.players[player];
        let mut instance = zones.hand.take(card).ok_or(RuleError::CardNotFound {
            owner: player,
            card,
            zone: Zone::Hand,
        })?;
        instance.tapped = false;
        instance.summoning_sick = !instance.def.has_keyword("haste");
        zones.board.put(instance);
        Ok(())
    }

    fn pass_turn(&mut self, events: &mut EventBus) {
        let from = self.turn_holder;
        let to = self.opponent(from);
        self.turn_holder = to;
        self.action_on = to;
        self.land_played = false;
        self.set_phase(Phase::Untap, events);
        events.push(Event::TurnPassed { from, to });
    }

    fn play_land(
        &mut self,
        player: PlayerId,
        card: CardId,
        events: &mut EventBus,
    ) -> Result<(), RuleError> {
        self.require_phase(Phase::Cast, "play a land")?;
        self.require_turn_holder(player)?;
        if self.land_played {
            return Err(RuleError::IllegalAction(
                "a land was already played this turn".to_string(),
            ));
        }
        let instance = self.hand_card(player, card)?;
        if !instance.def.is_land() {
            return Err(RuleError::IllegalAction(format!(
                "{} is not a land",
                instance.name()
            )));
        }
        if instance.def.basic_land().is_none() {
            return Err(RuleError::Unsupported(RuleGap::NonBasicLand {
                slug: instance.slug().to_string(),
            }));
        }
        self.move_hand_to_board(player, card)?;
        self.land_played = true;
        events.push(Event::LandPlayed { player, card });
        Ok(())
    }

    fn castable(&self, player: PlayerId, card: CardId) -> Result<&CardInstance, RuleError> {
        self.require_phase(Phase::Cast, "cast a card")?;
        self.require_turn_holder(player)?;
        let instance = self.hand_card(player, card)?;
        if instance.def.is_land() {
            return Err(RuleError::IllegalAction(format!(
                "{} is a land and must be played, not cast",
                instance.name()
            )));
        }
        let board = &self.players[player].board;
        let cost = &instance.def.casting_cost;
        if !can_pay(board, cost) {
            return Err(RuleError::InsufficientMana {
                needed: cost.weight(),
                available: board.untapped_lands().count() as u32,
            });
        }
        Ok(instance)
    }

    fn cast_permanent(
        &mut self,
        player: PlayerId,
        card: CardId,
        events: &mut EventBus,
    ) -> Result<(), RuleError> {
        let instance = self.castable(player, card)?;
        if !instance.def.is_permanent() {
            return Err(RuleError::IllegalAction(format!(
                "{} is not a permanent",
                instance.name()
            )));
        }
        let cost = instance.def.casting_cost.clone();
        let tapped = pay_cost(&mut self.players[player].board, &cost)?;
        self.move_hand_to_board(player, card)?;
        events.push(Event::PermanentCast {
            player,
            card,
            tapped,
        });
        Ok(())
    }

    fn cast_spell(
        &mut self,
        player: PlayerId,
        card: CardId,
        targets: &[CardId],
        events: &mut EventBus,
    ) -> Result<(), RuleError> {
        let instance = self.castable(player, card)?;
        if instance.def.is_permanent() {
            return Err(RuleError::IllegalAction(format!(
                "{} is a permanent and goes to the board",
                instance.name()
            )));
        }
        let cost = instance.def.casting_cost.clone();
        let opponent = self.opponent(player);
        for target in targets {
            self.board_card(opponent, *target)?;
        }

        let tapped = pay_cost(&mut self.players[player].board, &cost)?;
        let instance = self.players[player]
            .hand
            .take(card)
            .ok_or(RuleError::CardNotFound {
                owner: player,
                card,
                zone: Zone::Hand,
            })?;
        self.stack.push(PendingSpell {
            controller: player,
            card: instance,
            targets: targets.to_vec(),
        });
        events.push(Event::SpellCast {
            player,
            card,
            targets: targets.to_vec(),
            tapped,
        });
        Ok(())
    }

    fn begin_combat(&mut self, player: PlayerId, events: &mut EventBus) -> Result<(), RuleError> {
        self.require_phase(Phase::Cast, "begin combat")?;
        self.require_turn_holder(player)?;
        if self.players[player].board.ready_attackers().next().is_none() {
            return Err(RuleError::IllegalAction(
                "no creature is able to attack".to_string(),
            ));
        }
        self.advance_phase(events);
        Ok(())
    }

    fn declare_attacker(
        &mut self,
        player: PlayerId,
        card: CardId,
        events: &mut EventBus,
    ) -> Result<(), RuleError> {
        self.require_phase(Phase::DeclareAttackers, "declare an attacker")?;
        self.require_turn_holder(player)?;
        let instance = self.board_card(player, card)?;
        let board = &self.players[player].board;
        if board.is_attacking(card) || !instance.can_declare_attack() {
            return Err(RuleError::IllegalAction(format!(
                "{} cannot attack",
                instance.name()
            )));
        }
        let board = &mut self.players[player].board;
        if let Some(attacker) = board.get_mut(card) {
            attacker.tap();
        }
        board.attackers.push(card);
        events.push(Event::AttackerDeclared { player, card });
        Ok(())
    }

    fn finish_attackers(
        &mut self,
        player: PlayerId,
        events: &mut EventBus,
    ) -> Result<(), RuleError> {
        self.require_phase(Phase::DeclareAttackers, "finish declaring attackers")?;
        self.require_turn_holder(player)?;
        let attackers = &self.players[player].board.attackers;
        if attackers.is_empty() {
            return Err(RuleError::IllegalAction(
                "no attackers were declared".to_string(),
            ));
        }
        self.combat = crate::CombatMap::from_attackers(attackers);
        let defender = self.opponent(player);
        self.action_on = defender;
        self.advance_phase(events);
        events.push(Event::CombatOpened {
            attackers: self.combat.entries().len(),
            defender,
        });
        Ok(())
    }

    fn assign_blocker(
        &mut self,
        player: PlayerId,
        blocker: CardId,
        attacker: CardId,
        events: &mut EventBus,
    ) -> Result<(), RuleError> {
        self.require_phase(Phase::DeclareBlockers, "assign a blocker")?;
        if player == self.turn_holder {
            return Err(RuleError::NotYourDecision(player));
        }
        let instance = self.board_card(player, blocker)?;
        if !instance.def.is_creature() || !instance.can_declare_block() {
            return Err(RuleError::IllegalAction(format!(
                "{} cannot block",
                instance.name()
            )));
        }
        if self.combat.is_assigned(blocker) {
            return Err(RuleError::IllegalAction(format!(
                "{} is already blocking",
                instance.name()
            )));
        }
        if !self.combat.assign(attacker, blocker) {
            return Err(RuleError::IllegalAction(format!(
                "card {attacker} is not attacking"
            )));
        }
        events.push(Event::BlockerAssigned {
            player,
            blocker,
            attacker,
        });
        Ok(())
    }

    fn finish_blocking(&mut self, player: PlayerId, events: &mut EventBus) -> Result<(), RuleError> {
        self.require_phase(Phase::DeclareBlockers, "finish blocking")?;
        if player == self.turn_holder {
            return Err(RuleError::NotYourDecision(player));
        }
        let blocks = self
            .combat
            .entries()
            .iter()
            .map(|entry| entry.blockers.len())
            .sum();
        self.action_on = self.turn_holder;
        self.advance_phase(events);
        events.push(Event::BlockingFinished { blocks });
        Ok(())
    }
}
