use crate::CardDef;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub type PlayerId = usize;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A physical copy of a card definition with its own play state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardInstance {
    pub id: CardId,
    pub owner: PlayerId,
    pub def: Arc<CardDef>,
    pub tapped: bool,
    pub can_attack: bool,
    pub can_block: bool,
    pub summoning_sick: bool,
    #[serde(default)]
    pub image: Option<String>,
}

impl CardInstance {
    pub fn new(id: CardId, owner: PlayerId, def: Arc<CardDef>) -> Self {
        let can_attack = def.is_creature();
        let summoning_sick = !def.has_keyword("haste");
        let image = def.default_image().map(str::to_string);
        Self {
            id,
            owner,
            def,
            tapped: false,
            can_attack,
            can_block: true,
            summoning_sick,
            image,
        }
    }

    pub fn slug(&self) -> &str {
        &self.def.slug
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn untap(&mut self) {
        self.tapped = false;
    }

    pub fn can_declare_attack(&self) -> bool {
        self.can_attack && !self.summoning_sick && !self.tapped
    }

    pub fn can_declare_block(&self) -> bool {
        self.can_block && !self.tapped
    }

    /// Switch to another printing; unknown set codes keep the current image.
    pub fn set_printing(&mut self, set_code: &str) {
        if let Some(url) = self.def.images.get(set_code) {
            self.image = Some(url.clone());
        }
    }
}

impl fmt::Display for CardInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match (self.def.is_creature(), self.def.power, self.def.toughness) {
            (true, Some(power), Some(toughness)) => {
                format!("{} ({power}/{toughness})", self.def.name)
            }
            _ => self.def.name.clone(),
        };
        // untapped cards render upper-case, tapped lower-case
        if self.tapped {
            write!(f, "{}", text.to_lowercase())
        } else {
            write!(f, "{}", text.to_uppercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardType, ManaCost};

    fn creature(slug: &str, keywords: &[&str]) -> Arc<CardDef> {
        let mut def = CardDef::new(
            slug,
            "Savannah Lions",
            ManaCost::parse("W").expect("cost"),
            vec![CardType::Creature],
        );
        def.power = Some(2);
        def.toughness = Some(1);
        def.keywords = keywords.iter().map(|k| k.to_string()).collect();
        def.images.insert("4E".to_string(), "lions-4e.webp".to_string());
        def.images.insert("5E".to_string(), "lions-5e.webp".to_string());
        def.set_codes = vec!["4E".to_string(), "5E".to_string()];
        Arc::new(def)
    }

    #[test]
    fn creatures_start_sick_unless_hasty() {
        let plain = CardInstance::new(CardId(1), 0, creature("savannah-lions", &[]));
        assert!(plain.can_attack);
        assert!(plain.summoning_sick);
        assert!(!plain.can_declare_attack());

        let hasty = CardInstance::new(CardId(2), 0, creature("raging-goblin", &["Haste"]));
        assert!(!hasty.summoning_sick);
        assert!(hasty.can_declare_attack());
    }

    #[test]
    fn lands_cannot_attack_but_can_block_flag_defaults_true() {
        let land = CardInstance::new(
            CardId(3),
            1,
            Arc::new(CardDef::new("plains", "Plains", ManaCost::default(), vec![CardType::Land])),
        );
        assert!(!land.can_attack);
        assert!(land.can_block);
    }

    #[test]
    fn display_reflects_tap_state() {
        let mut card = CardInstance::new(CardId(1), 0, creature("savannah-lions", &[]));
        assert_eq!(card.to_string(), "SAVANNAH LIONS (2/1)");
        card.tap();
        assert_eq!(card.to_string(), "savannah lions (2/1)");
        assert!(!card.can_declare_block());
    }

    #[test]
    fn set_printing_ignores_unknown_sets() {
        let mut card = CardInstance::new(CardId(1), 0, creature("savannah-lions", &[]));
        assert_eq!(card.image.as_deref(), Some("lions-4e.webp"));
        card.set_printing("5E");
        assert_eq!(card.image.as_deref(), Some("lions-5e.webp"));
        card.set_printing("LEA");
        assert_eq!(card.image.as_deref(), Some("lions-5e.webp"));
    }
}
