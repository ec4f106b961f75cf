use crate::CardDef;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown card '{0}'")]
    NotFound(String),
    #[error("duplicate card '{0}' in catalog")]
    Duplicate(String),
}

/// Read-only source of card definitions keyed by slug.
pub trait CardCatalog {
    fn lookup(&self, slug: &str) -> Result<Arc<CardDef>, CatalogError>;

    fn all_definitions(&self) -> Box<dyn Iterator<Item = &Arc<CardDef>> + '_>;
}

/// In-memory catalog; keeps insertion order for listings.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cards: Vec<Arc<CardDef>>,
    by_slug: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_defs(defs: impl IntoIterator<Item = CardDef>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for def in defs {
            catalog.insert(def)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, def: CardDef) -> Result<(), CatalogError> {
        if self.by_slug.contains_key(&def.slug) {
            return Err(CatalogError::Duplicate(def.slug));
        }
        self.by_slug.insert(def.slug.clone(), self.cards.len());
        self.cards.push(Arc::new(def));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.by_slug.contains_key(slug)
    }

    pub fn all_card_types(&self) -> Vec<crate::CardType> {
        let set: BTreeSet<_> = self
            .cards
            .iter()
            .flat_map(|card| card.card_types.iter().copied())
            .collect();
        set.into_iter().collect()
    }

    pub fn all_sub_types(&self) -> Vec<String> {
        sorted_unique(self.cards.iter().flat_map(|card| card.sub_types.iter()))
    }

    pub fn all_super_types(&self) -> Vec<String> {
        sorted_unique(self.cards.iter().flat_map(|card| card.super_types.iter()))
    }
}

impl CardCatalog for Catalog {
    fn lookup(&self, slug: &str) -> Result<Arc<CardDef>, CatalogError> {
        self.by_slug
            .get(slug)
            .and_then(|idx| self.cards.get(*idx))
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(slug.to_string()))
    }

    fn all_definitions(&self) -> Box<dyn Iterator<Item = &Arc<CardDef>> + '_> {
        Box::new(self.cards.iter())
    }
}

fn sorted_unique<'a>(items: impl Iterator<Item = &'a String>) -> Vec<String> {
    let set: BTreeSet<&String> = items.collect();
    set.into_iter().cloned().collect()
}
