use crate::{CardId, Phase, PlayerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    GameStarted {
        players: usize,
        first: PlayerId,
        opening_hand: usize,
    },
    TurnStarted { turn: u32, player: PlayerId },
    PhaseChanged { from: Phase, to: Phase },
    CardsDrawn { player: PlayerId, count: usize },
    LandPlayed { player: PlayerId, card: CardId },
    PermanentCast {
        player: PlayerId,
        card: CardId,
        tapped: Vec<CardId>,
    },
    SpellCast {
        player: PlayerId,
        card: CardId,
        targets: Vec<CardId>,
        tapped: Vec<CardId>,
    },
    AttackerDeclared { player: PlayerId, card: CardId },
    CombatOpened { attackers: usize, defender: PlayerId },
    BlockerAssigned {
        player: PlayerId,
        blocker: CardId,
        attacker: CardId,
    },
    BlockingFinished { blocks: usize },
    TurnPassed { from: PlayerId, to: PlayerId },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
