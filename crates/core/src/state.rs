use crate::{
    Action, CardId, CardInstance, CombatMap, Deck, Event, EventBus, GameConfig, Hand, Library,
    Phase, PlayerId, PlayerZones, RngState, RuleError, SortOrder, Zone,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PLAYER_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("expected 2 decks, got {0}")]
    PlayerCount(usize),
    #[error("first player {0} is out of range")]
    InvalidFirstPlayer(PlayerId),
    #[error("deck {index} belongs to player {owner}")]
    DeckOwner { index: usize, owner: PlayerId },
}

/// A spell waiting on the pending stack; it never resolves in this engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingSpell {
    pub controller: PlayerId,
    pub card: CardInstance,
    pub targets: Vec<CardId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub turn: u32,
    pub player: PlayerId,
    pub action: Action,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameState {
    pub config: GameConfig,
    pub players: Vec<PlayerZones>,
    pub turn_holder: PlayerId,
    pub action_on: PlayerId,
    pub phase: Phase,
    pub land_played: bool,
    pub turn_number: u32,
    pub history: Vec<HistoryEntry>,
    pub combat: CombatMap,
    pub stack: Vec<PendingSpell>,
}

impl GameState {
    /// Shuffles every library and deals opening hands. The game sits at
    /// `Untap` until the first call to [`GameState::begin_turn`].
    pub fn new(
        decks: Vec<Deck>,
        first: PlayerId,
        config: GameConfig,
        rng: &mut RngState,
        events: &mut EventBus,
    ) -> Result<Self, SetupError> {
        if decks.len() != PLAYER_COUNT {
            return Err(SetupError::PlayerCount(decks.len()));
        }
        if first >= decks.len() {
            return Err(SetupError::InvalidFirstPlayer(first));
        }
        if let Some((index, deck)) = decks
            .iter()
            .enumerate()
            .find(|(index, deck)| deck.owner() != *index)
        {
            return Err(SetupError::DeckOwner {
                index,
                owner: deck.owner(),
            });
        }

        let mut players = Vec::with_capacity(decks.len());
        for deck in decks {
            let mut zones = PlayerZones {
                library: Library::new(deck.into_cards()),
                hand: Hand::new(SortOrder::Ascending),
                ..PlayerZones::default()
            };
            zones.library.shuffle(rng);
            zones.draw(config.opening_hand_size);
            zones.hand.sort();
            players.push(zones);
        }
        events.push(Event::GameStarted {
            players: players.len(),
            first,
            opening_hand: config.opening_hand_size,
        });

        Ok(Self {
            config,
            players,
            turn_holder: first,
            action_on: first,
            phase: Phase::Untap,
            land_played: false,
            turn_number: 0,
            history: Vec::new(),
            combat: CombatMap::default(),
            stack: Vec::new(),
        })
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn opponent(&self, player: PlayerId) -> PlayerId {
        (player + 1) % self.players.len()
    }

    pub fn zones(&self, player: PlayerId) -> &PlayerZones {
        &self.players[player]
    }

    pub(crate) fn set_phase(&mut self, to: Phase, events: &mut EventBus) {
        let from = self.phase;
        self.phase = to;
        events.push(Event::PhaseChanged { from, to });
    }

    pub(crate) fn advance_phase(&mut self, events: &mut EventBus) {
        self.set_phase(self.phase.next(), events);
    }

    /// True between turns once `max_turns` turns have been played.
    pub fn turn_limit_reached(&self, max_turns: u32) -> bool {
        self.phase == Phase::Untap && self.turn_number >= max_turns
    }

    /// Runs the automatic opening of a turn: untap, upkeep, draw, then
    /// hands control to the turn-holder in `Cast`.
    pub fn begin_turn(&mut self, events: &mut EventBus) -> Result<(), RuleError> {
        if self.phase != Phase::Untap {
            return Err(RuleError::WrongPhase {
                phase: self.phase,
                action: "begin turn".to_string(),
            });
        }
        self.turn_number += 1;
        self.land_played = false;
        self.action_on = self.turn_holder;
        events.push(Event::TurnStarted {
            turn: self.turn_number,
            player: self.turn_holder,
        });

        self.combat.clear();
        for zones in &mut self.players {
            zones.board.attackers.clear();
        }
        for card in &mut self.players[self.turn_holder].board.cards {
            card.untap();
            card.summoning_sick = false;
        }

        self.advance_phase(events);
        self.advance_phase(events);
        let skip_draw = self.turn_number == 1 && !self.config.first_player_draws;
        if !skip_draw {
            let player = self.turn_holder;
            let count = self.players[player].draw(1);
            events.push(Event::CardsDrawn { player, count });
        }
        self.advance_phase(events);
        Ok(())
    }

    /// Zone of one of `owner`'s cards, including the pending stack. Card ids
    /// are only unique within one player's deck.
    pub fn locate(&self, owner: PlayerId, id: CardId) -> Option<Zone> {
        let zones = self.players.get(owner)?;
        zones.locate(id).or_else(|| {
            self.stack
                .iter()
                .any(|spell| spell.card.owner == owner && spell.card.id == id)
                .then_some(Zone::Stack)
        })
    }

    /// Looks a card up in every zone that holds instances.
    pub fn card(&self, owner: PlayerId, id: CardId) -> Option<&CardInstance> {
        let zones = self.players.get(owner)?;
        zones
            .hand
            .get(id)
            .or_else(|| zones.board.get(id))
            .or_else(|| zones.graveyard.get(id))
            .or_else(|| zones.library.cards.iter().find(|card| card.id == id))
            .or_else(|| {
                self.stack
                    .iter()
                    .map(|spell| &spell.card)
                    .find(|card| card.owner == owner && card.id == id)
            })
    }

    /// Cards in every zone plus the pending stack.
    pub fn total_cards(&self) -> usize {
        self.players.iter().map(PlayerZones::card_count).sum::<usize>() + self.stack.len()
    }

    /// Readable description of an action taken by `player`.
    pub fn describe_action(&self, player: PlayerId, action: &Action) -> String {
        let opponent = self.opponent(player);
        let name = |owner: PlayerId, id: CardId| {
            self.card(owner, id)
                .map(|card| card.name().to_string())
                .unwrap_or_else(|| format!("card {id}"))
        };
        match action {
            Action::PassTurn => "Pass the turn".to_string(),
            Action::PlayLand { card } => format!("Play {} land to board", name(player, *card)),
            Action::CastPermanent { card } => {
                format!("Play {} to board", name(player, *card))
            }
            Action::CastSpell { card, targets } => {
                if targets.is_empty() {
                    format!("Play {} as sorcery/instant", name(player, *card))
                } else {
                    let targets: Vec<String> =
                        targets.iter().map(|id| name(opponent, *id)).collect();
                    format!(
                        "Play {} as sorcery/instant, targeting {}",
                        name(player, *card),
                        targets.join(", ")
                    )
                }
            }
            Action::BeginCombat => "Begin combat".to_string(),
            Action::DeclareAttacker { card } => {
                format!("Add {} to attack", name(player, *card))
            }
            Action::FinishAttackers => "Done declaring attackers".to_string(),
            Action::AssignBlocker { blocker, attacker } => format!(
                "Block {} with {}",
                name(opponent, *attacker),
                name(player, *blocker)
            ),
            Action::FinishBlocking => "Finish blocks".to_string(),
        }
    }
}
