use crate::{catalog_from_database, CardDatabase, DeckList};
use anyhow::Context;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tapout_core::{build_deck, CardCatalog, Catalog, Deck, DeckRules, GameConfig, PlayerId};

const RULES_FILE: &str = "rules.json";

pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

pub fn load_catalog(path: &Path, set_codes: &[&str]) -> anyhow::Result<Catalog> {
    let database: CardDatabase = load_json(path)?;
    catalog_from_database(&database, set_codes)
        .with_context(|| format!("build catalog from {}", path.display()))
}

pub fn load_decklist(path: &Path) -> anyhow::Result<DeckList> {
    load_json(path)
}

/// Reads `rules.json` from `dir`; a missing file means default rules.
pub fn load_game_config(dir: &Path) -> anyhow::Result<GameConfig> {
    let path = dir.join(RULES_FILE);
    if !path.exists() {
        return Ok(GameConfig::default());
    }
    load_json(path)
}

pub fn load_deck(
    catalog: &dyn CardCatalog,
    owner: PlayerId,
    rules: DeckRules,
    path: &Path,
) -> anyhow::Result<Deck> {
    let list = load_decklist(path)?;
    let deck = build_deck(catalog, owner, rules, &list.entries())
        .with_context(|| format!("build deck '{}' from {}", list.name, path.display()))?;
    Ok(deck)
}
