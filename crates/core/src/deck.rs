use crate::{
    BasicLand, CardCatalog, CardDef, CardId, CardInstance, CatalogError, DeckRules, PlayerId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("copy limit reached: at most {limit} copies of '{slug}' are allowed")]
    CopyLimit { slug: String, limit: usize },
    #[error("deck has {size} cards but must have between {min} and {max}")]
    DeckSize { size: usize, min: usize, max: usize },
    #[error("card {0} is not in this deck")]
    MissingCard(CardId),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl DeckError {
    /// Construction errors can be fixed by the caller and retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::CopyLimit { .. } | Self::DeckSize { .. })
    }
}

/// A validated deck, in construction order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deck {
    owner: PlayerId,
    cards: Vec<CardInstance>,
}

impl Deck {
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn cards(&self) -> &[CardInstance] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn count_of(&self, slug: &str) -> usize {
        self.cards.iter().filter(|card| card.slug() == slug).count()
    }

    pub(crate) fn into_cards(self) -> Vec<CardInstance> {
        self.cards
    }
}

#[derive(Debug, Clone)]
pub struct DeckBuilder {
    owner: PlayerId,
    rules: DeckRules,
    cards: Vec<CardInstance>,
}

impl DeckBuilder {
    pub fn new(owner: PlayerId, rules: DeckRules) -> Self {
        Self {
            owner,
            rules,
            cards: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[CardInstance] {
        &self.cards
    }

    pub fn count_of(&self, slug: &str) -> usize {
        self.cards.iter().filter(|card| card.slug() == slug).count()
    }

    fn next_card_id(&self) -> CardId {
        let max = self.cards.iter().map(|card| card.id.0).max().unwrap_or(0);
        CardId(max + 1)
    }

    pub fn add(&mut self, def: Arc<CardDef>) -> Result<CardId, DeckError> {
        if BasicLand::from_slug(&def.slug).is_none()
            && self.count_of(&def.slug) >= self.rules.copy_limit
        {
            return Err(DeckError::CopyLimit {
                slug: def.slug.clone(),
                limit: self.rules.copy_limit,
            });
        }
        let id = self.next_card_id();
        self.cards.push(CardInstance::new(id, self.owner, def));
        Ok(id)
    }

    pub fn add_by_slug(
        &mut self,
        catalog: &dyn CardCatalog,
        slug: &str,
    ) -> Result<CardId, DeckError> {
        let def = catalog.lookup(slug)?;
        self.add(def)
    }

    /// Adds `quantity` copies of each listed slug, stopping at the first violation.
    pub fn add_many(
        &mut self,
        catalog: &dyn CardCatalog,
        entries: &[(String, usize)],
    ) -> Result<(), DeckError> {
        for (slug, quantity) in entries {
            let def = catalog.lookup(slug)?;
            for _ in 0..*quantity {
                self.add(Arc::clone(&def))?;
            }
        }
        Ok(())
    }

    pub fn remove(&mut self, id: CardId) -> Result<CardInstance, DeckError> {
        let pos = self
            .cards
            .iter()
            .position(|card| card.id == id)
            .ok_or(DeckError::MissingCard(id))?;
        Ok(self.cards.remove(pos))
    }

    /// One representative per slug, sorted by slug.
    pub fn unique_cards_sorted(&self) -> Vec<&CardInstance> {
        let mut unique: BTreeMap<&str, &CardInstance> = BTreeMap::new();
        for card in &self.cards {
            unique.entry(card.slug()).or_insert(card);
        }
        unique.into_values().collect()
    }

    /// Applies a printing to every copy of `slug` already in the deck.
    pub fn set_printing(&mut self, slug: &str, set_code: &str) {
        for card in self.cards.iter_mut().filter(|card| card.slug() == slug) {
            card.set_printing(set_code);
        }
    }

    pub fn finish(self) -> Result<Deck, DeckError> {
        let size = self.cards.len();
        if size < self.rules.min_size || size > self.rules.max_size {
            return Err(DeckError::DeckSize {
                size,
                min: self.rules.min_size,
                max: self.rules.max_size,
            });
        }
        Ok(Deck {
            owner: self.owner,
            cards: self.cards,
        })
    }
}

/// Builds a deck from `(slug, quantity)` pairs.
pub fn build_deck(
    catalog: &dyn CardCatalog,
    owner: PlayerId,
    rules: DeckRules,
    entries: &[(String, usize)],
) -> Result<Deck, DeckError> {
    let mut builder = DeckBuilder::new(owner, rules);
    builder.add_many(catalog, entries)?;
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardType, Catalog, ManaCost};

    fn catalog() -> Catalog {
        let mut defs = vec![CardDef::new(
            "plains",
            "Plains",
            ManaCost::default(),
            vec![CardType::Land],
        )];
        for slug in ["serra-angel", "savannah-lions", "white-knight", "tundra-wolves", "wrath-of-god", "swords-to-plowshares"] {
            defs.push(CardDef::new(
                slug,
                slug,
                ManaCost::parse("1W").expect("cost"),
                vec![CardType::Creature],
            ));
        }
        Catalog::from_defs(defs).expect("catalog")
    }

    fn entries(items: &[(&str, usize)]) -> Vec<(String, usize)> {
        items.iter().map(|(slug, qty)| (slug.to_string(), *qty)).collect()
    }

    #[test]
    fn ids_are_assigned_monotonically() {
        let catalog = catalog();
        let mut builder = DeckBuilder::new(0, DeckRules::default());
        let first = builder.add_by_slug(&catalog, "plains").expect("add");
        let second = builder.add_by_slug(&catalog, "plains").expect("add");
        assert_eq!(first, CardId(1));
        assert_eq!(second, CardId(2));
        builder.remove(first).expect("remove");
        let third = builder.add_by_slug(&catalog, "serra-angel").expect("add");
        assert_eq!(third, CardId(3));
    }

    #[test]
    fn basic_lands_ignore_copy_limit() {
        let catalog = catalog();
        let mut builder = DeckBuilder::new(0, DeckRules::default());
        builder
            .add_many(&catalog, &entries(&[("plains", 30)]))
            .expect("basic lands are exempt");
        assert_eq!(builder.count_of("plains"), 30);
    }

    #[test]
    fn unknown_slug_is_a_catalog_error() {
        let catalog = catalog();
        let mut builder = DeckBuilder::new(0, DeckRules::default());
        let err = builder.add_by_slug(&catalog, "black-lotus").expect_err("unknown");
        assert_eq!(err, DeckError::Catalog(CatalogError::NotFound("black-lotus".to_string())));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn finish_rejects_oversized_deck() {
        let catalog = catalog();
        let rules = DeckRules {
            min_size: 1,
            max_size: 3,
            copy_limit: 4,
        };
        let err = build_deck(&catalog, 0, rules, &entries(&[("plains", 4)])).expect_err("too big");
        assert_eq!(err, DeckError::DeckSize { size: 4, min: 1, max: 3 });
        assert!(err.is_recoverable());
    }

    #[test]
    fn remove_missing_card_fails() {
        let mut builder = DeckBuilder::new(0, DeckRules::default());
        assert_eq!(
            builder.remove(CardId(9)).expect_err("missing"),
            DeckError::MissingCard(CardId(9))
        );
    }

    #[test]
    fn unique_cards_are_sorted_by_slug() {
        let catalog = catalog();
        let mut builder = DeckBuilder::new(1, DeckRules::default());
        builder
            .add_many(
                &catalog,
                &entries(&[("white-knight", 2), ("plains", 3), ("serra-angel", 1)]),
            )
            .expect("add");
        let slugs: Vec<&str> = builder
            .unique_cards_sorted()
            .into_iter()
            .map(CardInstance::slug)
            .collect();
        assert_eq!(slugs, vec!["plains", "serra-angel", "white-knight"]);
        assert!(builder.cards().iter().all(|card| card.owner == 1));
    }
}
