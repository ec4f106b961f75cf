use std::path::PathBuf;
use tapout_core::{CardCatalog, CardType, EventBus, GameState, RngState};
use tapout_data::{load_catalog, load_deck, load_decklist, load_game_config};

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

#[test]
fn bundled_catalog_loads_fourth_edition() {
    let catalog = load_catalog(&assets_root().join("catalog.json"), &["4E"]).expect("catalog");
    assert_eq!(catalog.len(), 14);
    let angel = catalog.lookup("serra-angel").expect("angel");
    assert_eq!(angel.casting_weight(), 5);
    assert!(angel.has_keyword("flying"));
    assert_eq!(angel.set_codes, vec!["4E".to_string(), "5E".to_string()]);
    let counterspell = catalog.lookup("counterspell").expect("counterspell");
    assert!(counterspell.has_type(CardType::Interrupt));
    assert!(!counterspell.is_permanent());
}

#[test]
fn bundled_rules_match_defaults() {
    let config = load_game_config(&assets_root()).expect("rules");
    assert_eq!(config.opening_hand_size, 7);
    assert_eq!(config.deck.copy_limit, 4);
}

#[test]
fn bundled_decks_are_legal_and_start_a_game() {
    let root = assets_root();
    let catalog = load_catalog(&root.join("catalog.json"), &["4E"]).expect("catalog");
    let config = load_game_config(&root).expect("rules");
    let mut decks = Vec::new();
    for (owner, name) in ["white.json", "blue.json"].iter().enumerate() {
        let path = root.join("decks").join(name);
        let list = load_decklist(&path).expect("deck list");
        assert_eq!(list.total(), 40);
        decks.push(load_deck(&catalog, owner, config.deck, &path).expect("deck"));
    }
    let mut rng = RngState::from_seed(9);
    let mut events = EventBus::default();
    let state = GameState::new(decks, 0, config, &mut rng, &mut events).expect("state");
    assert_eq!(state.total_cards(), 80);
}
