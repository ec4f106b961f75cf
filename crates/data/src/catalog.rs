use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use tapout_core::{CardDef, CardType, Catalog, ManaCost};

/// Card database as stored on disk: set code, then card slug.
pub type CardDatabase = BTreeMap<String, BTreeMap<String, RawCardRecord>>;

/// One card printing in one set, as scraped.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCardRecord {
    pub name: String,
    #[serde(default)]
    pub casting_cost: String,
    #[serde(default)]
    pub card_types: Vec<CardType>,
    #[serde(default)]
    pub card_sub_types: Vec<String>,
    #[serde(default)]
    pub card_super_types: Vec<String>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub rules_text: String,
    #[serde(default)]
    pub oracle_rules_text: String,
    #[serde(default)]
    pub power: Option<StatText>,
    #[serde(default)]
    pub toughness: Option<StatText>,
    #[serde(default, alias = "keyword_abilities")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub img_url: Option<String>,
}

/// Power and toughness show up both as numbers and as text like `"*"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StatText {
    Number(i32),
    Text(String),
}

impl StatText {
    /// Empty text means the card has no such stat; other non-numbers count as 0.
    pub fn value(&self) -> Option<i32> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) if text.trim().is_empty() => None,
            Self::Text(text) => Some(text.trim().parse().unwrap_or(0)),
        }
    }
}

#[derive(Debug, Default)]
struct Printings {
    sets: Vec<String>,
    images: BTreeMap<String, String>,
}

fn collect_printings(database: &CardDatabase) -> BTreeMap<&str, Printings> {
    let mut printings: BTreeMap<&str, Printings> = BTreeMap::new();
    for (set_code, cards) in database {
        for (slug, record) in cards {
            let entry = printings.entry(slug.as_str()).or_default();
            entry.sets.push(set_code.clone());
            if let Some(url) = &record.img_url {
                entry.images.insert(set_code.clone(), url.clone());
            }
        }
    }
    printings
}

fn to_definition(slug: &str, record: &RawCardRecord, printings: Option<&Printings>) -> anyhow::Result<CardDef> {
    let casting_cost = ManaCost::parse(&record.casting_cost)
        .with_context(|| format!("casting cost of '{slug}'"))?;
    let mut def = CardDef::new(slug, &record.name, casting_cost, record.card_types.clone());
    def.sub_types = record.card_sub_types.clone();
    def.super_types = record.card_super_types.clone();
    def.rarity = record.rarity.clone();
    def.rules_text = record.rules_text.clone();
    def.oracle_text = record.oracle_rules_text.clone();
    def.power = record.power.as_ref().and_then(StatText::value);
    def.toughness = record.toughness.as_ref().and_then(StatText::value);
    def.keywords = record.keywords.clone();
    if let Some(printings) = printings {
        def.set_codes = printings.sets.clone();
        def.images = printings.images.clone();
    }
    Ok(def)
}

/// Builds a catalog from the sets named in `set_codes`, in that order. A slug
/// printed in several selected sets keeps its first selected printing, while
/// set codes and images cover every set in the database.
pub fn catalog_from_database(database: &CardDatabase, set_codes: &[&str]) -> anyhow::Result<Catalog> {
    let printings = collect_printings(database);
    let mut seen = HashSet::new();
    let mut catalog = Catalog::new();
    for code in set_codes {
        let Some(cards) = database.get(*code) else {
            bail!("unknown set code '{code}'");
        };
        for (slug, record) in cards {
            if !seen.insert(slug.as_str()) {
                continue;
            }
            let def = to_definition(slug, record, printings.get(slug.as_str()))
                .with_context(|| format!("card '{slug}' in set {code}"))?;
            catalog.insert(def)?;
        }
    }
    Ok(catalog)
}

pub fn parse_catalog(raw: &str, set_codes: &[&str]) -> anyhow::Result<Catalog> {
    let database: CardDatabase = serde_json::from_str(raw).context("parse card database")?;
    catalog_from_database(&database, set_codes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapout_core::CardCatalog;

    const DATABASE: &str = r#"{
        "4E": {
            "plains": {"name": "Plains", "card_types": ["Land"], "card_super_types": ["Basic"], "img_url": "4e/plains.webp"},
            "serra-angel": {"name": "Serra Angel", "casting_cost": "3WW", "card_types": ["Creature"],
                            "card_sub_types": ["Angel"], "power": "4", "toughness": "4",
                            "keywords": ["Flying"], "img_url": "4e/serra.webp"},
            "plague-rats": {"name": "Plague Rats", "casting_cost": "2B", "card_types": ["Creature"],
                            "power": "*", "toughness": "*"}
        },
        "5E": {
            "serra-angel": {"name": "Serra Angel (5E)", "casting_cost": "3WW", "card_types": ["Creature"],
                            "img_url": "5e/serra.webp"},
            "swamp": {"name": "Swamp", "card_types": ["Land"]}
        }
    }"#;

    #[test]
    fn only_selected_sets_contribute_cards() {
        let catalog = parse_catalog(DATABASE, &["4E"]).expect("catalog");
        assert_eq!(catalog.len(), 3);
        assert!(!catalog.contains("swamp"));
    }

    #[test]
    fn printings_aggregate_across_all_sets() {
        let catalog = parse_catalog(DATABASE, &["4E"]).expect("catalog");
        let angel = catalog.lookup("serra-angel").expect("angel");
        assert_eq!(angel.set_codes, vec!["4E".to_string(), "5E".to_string()]);
        assert_eq!(angel.images.len(), 2);
        assert_eq!(angel.default_image(), Some("4e/serra.webp"));
    }

    #[test]
    fn first_selected_set_wins() {
        let catalog = parse_catalog(DATABASE, &["5E", "4E"]).expect("catalog");
        let angel = catalog.lookup("serra-angel").expect("angel");
        assert_eq!(angel.name, "Serra Angel (5E)");
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn stats_are_parsed_and_stars_become_zero() {
        let catalog = parse_catalog(DATABASE, &["4E"]).expect("catalog");
        let angel = catalog.lookup("serra-angel").expect("angel");
        assert_eq!((angel.power, angel.toughness), (Some(4), Some(4)));
        let rats = catalog.lookup("plague-rats").expect("rats");
        assert_eq!((rats.power, rats.toughness), (Some(0), Some(0)));
        let plains = catalog.lookup("plains").expect("plains");
        assert_eq!(plains.power, None);
        assert_eq!(catalog.all_super_types(), vec!["Basic".to_string()]);
    }

    #[test]
    fn bad_casting_cost_fails_the_load() {
        let raw = r#"{"4E": {"odd": {"name": "Odd", "casting_cost": "2Q"}}}"#;
        let err = parse_catalog(raw, &["4E"]).expect_err("bad cost");
        assert!(format!("{err:#}").contains("odd"));
    }

    #[test]
    fn unknown_set_code_is_an_error() {
        let err = parse_catalog(DATABASE, &["9E"]).expect_err("unknown set");
        assert!(err.to_string().contains("9E"));
    }
}
