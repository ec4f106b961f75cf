use crate::{CardId, CardInstance, RngState};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Zone {
    Library,
    Hand,
    Board,
    Graveyard,
    Stack,
}

fn find(cards: &[CardInstance], id: CardId) -> Option<&CardInstance> {
    cards.iter().find(|card| card.id == id)
}

fn take(cards: &mut Vec<CardInstance>, id: CardId) -> Option<CardInstance> {
    let pos = cards.iter().position(|card| card.id == id)?;
    Some(cards.remove(pos))
}

/// Draw pile. The last element is the top card.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Library {
    pub cards: Vec<CardInstance>,
}

impl Library {
    pub fn new(cards: Vec<CardInstance>) -> Self {
        Self { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.cards);
    }

    /// Draws up to `count` cards from the top; fewer when the pile runs out.
    pub fn draw(&mut self, count: usize) -> Vec<CardInstance> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            match self.cards.pop() {
                Some(card) => drawn.push(card),
                None => break,
            }
        }
        drawn
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Hand {
    pub cards: Vec<CardInstance>,
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl Hand {
    pub fn new(sort_order: SortOrder) -> Self {
        Self {
            cards: Vec::new(),
            sort_order,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: CardId) -> Option<&CardInstance> {
        find(&self.cards, id)
    }

    pub fn take(&mut self, id: CardId) -> Option<CardInstance> {
        take(&mut self.cards, id)
    }

    pub fn extend(&mut self, cards: Vec<CardInstance>) {
        self.cards.extend(cards);
    }

    /// Stable sort by casting weight in the preferred direction.
    pub fn sort(&mut self) {
        match self.sort_order {
            SortOrder::Ascending => self.cards.sort_by_key(|card| card.def.casting_weight()),
            SortOrder::Descending => self
                .cards
                .sort_by_key(|card| std::cmp::Reverse(card.def.casting_weight())),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Board {
    pub cards: Vec<CardInstance>,
    /// Attackers declared this combat, in declaration order.
    pub attackers: Vec<CardId>,
}

impl Board {
    pub fn get(&self, id: CardId) -> Option<&CardInstance> {
        find(&self.cards, id)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut CardInstance> {
        self.cards.iter_mut().find(|card| card.id == id)
    }

    pub fn put(&mut self, card: CardInstance) {
        self.cards.push(card);
    }

    pub fn is_attacking(&self, id: CardId) -> bool {
        self.attackers.contains(&id)
    }

    pub fn untapped_lands(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards
            .iter()
            .filter(|card| card.def.is_land() && !card.tapped)
    }

    /// Untapped creatures whose block flag is set.
    pub fn available_blockers(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards
            .iter()
            .filter(|card| card.def.is_creature() && card.can_declare_block())
    }

    pub fn ready_attackers(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.iter().filter(|card| card.can_declare_attack())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Graveyard {
    pub cards: Vec<CardInstance>,
}

impl Graveyard {
    pub fn put(&mut self, card: CardInstance) {
        self.cards.push(card);
    }

    pub fn get(&self, id: CardId) -> Option<&CardInstance> {
        find(&self.cards, id)
    }
}

/// Every zone one player owns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerZones {
    pub library: Library,
    pub hand: Hand,
    pub board: Board,
    pub graveyard: Graveyard,
}

impl PlayerZones {
    pub fn locate(&self, id: CardId) -> Option<Zone> {
        if find(&self.library.cards, id).is_some() {
            Some(Zone::Library)
        } else if self.hand.get(id).is_some() {
            Some(Zone::Hand)
        } else if self.board.get(id).is_some() {
            Some(Zone::Board)
        } else if self.graveyard.get(id).is_some() {
            Some(Zone::Graveyard)
        } else {
            None
        }
    }

    pub fn card_count(&self) -> usize {
        self.library.len() + self.hand.len() + self.board.cards.len() + self.graveyard.cards.len()
    }

    pub fn draw(&mut self, count: usize) -> usize {
        let drawn = self.library.draw(count);
        let n = drawn.len();
        self.hand.extend(drawn);
        n
    }
}
