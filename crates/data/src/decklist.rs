use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckEntry {
    pub slug: String,
    pub count: usize,
}

/// A named list of `(slug, count)` entries, in the order they are added to
/// the deck.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckList {
    pub name: String,
    #[serde(default)]
    pub player_name: Option<String>,
    pub cards: Vec<DeckEntry>,
}

impl DeckList {
    pub fn entries(&self) -> Vec<(String, usize)> {
        self.cards
            .iter()
            .map(|entry| (entry.slug.clone(), entry.count))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.cards.iter().map(|entry| entry.count).sum()
    }
}
