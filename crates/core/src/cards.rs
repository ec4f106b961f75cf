use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'W' => Some(Self::White),
            'U' => Some(Self::Blue),
            'B' => Some(Self::Black),
            'R' => Some(Self::Red),
            'G' => Some(Self::Green),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Blue => 1,
            Self::Black => 2,
            Self::Red => 3,
            Self::Green => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CostError {
    #[error("casting cost '{cost}' contains unsupported symbol '{symbol}'")]
    InvalidSymbol { cost: String, symbol: char },
    #[error("casting cost '{0}' is too large")]
    Overflow(String),
}

/// A casting cost tallied into five colored buckets plus a generic bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ManaCost {
    text: String,
    generic: u32,
    colored: [u32; 5],
    weight: u32,
}

impl ManaCost {
    pub fn parse(text: &str) -> Result<Self, CostError> {
        let overflow = || CostError::Overflow(text.to_string());
        let mut generic = 0u32;
        let mut colored = [0u32; 5];
        let mut weight = 0u32;
        for symbol in text.chars() {
            if let Some(value) = symbol.to_digit(10) {
                generic = generic.checked_add(value).ok_or_else(overflow)?;
                weight = weight.checked_add(value).ok_or_else(overflow)?;
                continue;
            }
            let color = Color::from_symbol(symbol).ok_or_else(|| CostError::InvalidSymbol {
                cost: text.to_string(),
                symbol,
            })?;
            weight = weight.checked_add(1).ok_or_else(overflow)?;
            colored[color.index()] += 1;
        }
        Ok(Self {
            text: text.to_string(),
            generic,
            colored,
            weight,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn generic(&self) -> u32 {
        self.generic
    }

    pub fn colored(&self, color: Color) -> u32 {
        self.colored[color.index()]
    }

    /// Casting weight: generic amount plus one per colored symbol.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn colors(&self) -> Vec<Color> {
        Color::ALL
            .into_iter()
            .filter(|color| self.colored(*color) > 0)
            .collect()
    }
}

impl TryFrom<String> for ManaCost {
    type Error = CostError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ManaCost> for String {
    fn from(value: ManaCost) -> Self {
        value.text
    }
}

impl fmt::Display for ManaCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardType {
    Artifact,
    Creature,
    Enchantment,
    Land,
    Instant,
    Sorcery,
    Interrupt,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BasicLand {
    Plains,
    Island,
    Swamp,
    Mountain,
    Forest,
}

impl BasicLand {
    pub const ALL: [BasicLand; 5] = [
        BasicLand::Plains,
        BasicLand::Island,
        BasicLand::Swamp,
        BasicLand::Mountain,
        BasicLand::Forest,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::Plains => "plains",
            Self::Island => "island",
            Self::Swamp => "swamp",
            Self::Mountain => "mountain",
            Self::Forest => "forest",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Plains => Color::White,
            Self::Island => Color::Blue,
            Self::Swamp => Color::Black,
            Self::Mountain => Color::Red,
            Self::Forest => Color::Green,
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|land| land.slug() == slug)
    }
}

/// Immutable card definition as published by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardDef {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub casting_cost: ManaCost,
    #[serde(default)]
    pub card_types: Vec<CardType>,
    #[serde(default)]
    pub sub_types: Vec<String>,
    #[serde(default)]
    pub super_types: Vec<String>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub rules_text: String,
    #[serde(default)]
    pub oracle_text: String,
    #[serde(default)]
    pub power: Option<i32>,
    #[serde(default)]
    pub toughness: Option<i32>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub set_codes: Vec<String>,
    #[serde(default)]
    pub images: BTreeMap<String, String>,
}

impl CardDef {
    /// Minimal definition; the remaining fields start empty.
    pub fn new(slug: &str, name: &str, casting_cost: ManaCost, card_types: Vec<CardType>) -> Self {
        Self {
            slug: slug.to_string(),
            name: name.to_string(),
            casting_cost,
            card_types,
            sub_types: Vec::new(),
            super_types: Vec::new(),
            rarity: String::new(),
            rules_text: String::new(),
            oracle_text: String::new(),
            power: None,
            toughness: None,
            keywords: Vec::new(),
            set_codes: Vec::new(),
            images: BTreeMap::new(),
        }
    }

    pub fn has_type(&self, kind: CardType) -> bool {
        self.card_types.contains(&kind)
    }

    pub fn is_land(&self) -> bool {
        self.has_type(CardType::Land)
    }

    pub fn is_creature(&self) -> bool {
        self.has_type(CardType::Creature)
    }

    pub fn is_permanent(&self) -> bool {
        self.card_types.iter().any(|kind| {
            matches!(
                kind,
                CardType::Artifact | CardType::Creature | CardType::Enchantment | CardType::Land
            )
        })
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keywords
            .iter()
            .any(|item| item.eq_ignore_ascii_case(keyword))
    }

    pub fn basic_land(&self) -> Option<BasicLand> {
        BasicLand::from_slug(&self.slug)
    }

    pub fn casting_weight(&self) -> u32 {
        self.casting_cost.weight()
    }

    /// Colors named by the casting cost; empty means colorless.
    pub fn colors(&self) -> Vec<Color> {
        self.casting_cost.colors()
    }

    /// Image of the earliest printing, ordered by `set_codes`.
    pub fn default_image(&self) -> Option<&str> {
        self.set_codes
            .iter()
            .find_map(|code| self.images.get(code))
            .or_else(|| self.images.values().next())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! cost_case {
        ($name:ident, $text:expr, $generic:expr, $white:expr, $weight:expr) => {
            #[test]
            fn $name() {
                let cost = ManaCost::parse($text).expect("parse cost");
                assert_eq!(cost.generic(), $generic);
                assert_eq!(cost.colored(Color::White), $white);
                assert_eq!(cost.weight(), $weight);
            }
        };
    }

    cost_case!(cost_empty, "", 0, 0, 0);
    cost_case!(cost_single_white, "W", 0, 1, 1);
    cost_case!(cost_two_white, "2W", 2, 1, 3);
    cost_case!(cost_serra_angel, "3WW", 3, 2, 5);
    cost_case!(cost_generic_only, "4", 4, 0, 4);
    cost_case!(cost_digits_add_face_value, "10", 1, 0, 1);
    cost_case!(cost_digit_run, "12W", 3, 1, 4);
    cost_case!(cost_split_digits, "1W1", 2, 1, 3);

    #[test]
    fn rejects_unknown_symbol() {
        let err = ManaCost::parse("XR").expect_err("X is not supported");
        assert_eq!(
            err,
            CostError::InvalidSymbol {
                cost: "XR".to_string(),
                symbol: 'X'
            }
        );
    }

    #[test]
    fn long_digit_runs_stay_payable() {
        let cost = ManaCost::parse("4294967295W").expect("parse cost");
        assert_eq!(cost.generic(), 57);
        assert_eq!(cost.weight(), 58);
        let board = crate::Board::default();
        assert!(!crate::can_pay(&board, &cost));
    }

    #[test]
    fn counts_each_color_bucket() {
        let cost = ManaCost::parse("1UUBRG").expect("parse cost");
        assert_eq!(cost.colored(Color::Blue), 2);
        assert_eq!(cost.colored(Color::Black), 1);
        assert_eq!(cost.colored(Color::Red), 1);
        assert_eq!(cost.colored(Color::Green), 1);
        assert_eq!(
            cost.colors(),
            vec![Color::Blue, Color::Black, Color::Red, Color::Green]
        );
    }

    #[test]
    fn basic_land_slugs_map_to_colors() {
        assert_eq!(BasicLand::from_slug("plains"), Some(BasicLand::Plains));
        assert_eq!(BasicLand::from_slug("island").map(BasicLand::color), Some(Color::Blue));
        assert_eq!(BasicLand::from_slug("city-of-brass"), None);
    }

    #[test]
    fn permanent_classification() {
        let wall = CardDef::new(
            "wall-of-stone",
            "Wall of Stone",
            ManaCost::parse("1RR").expect("cost"),
            vec![CardType::Creature],
        );
        let bolt = CardDef::new(
            "lightning-bolt",
            "Lightning Bolt",
            ManaCost::parse("R").expect("cost"),
            vec![CardType::Instant],
        );
        assert!(wall.is_permanent());
        assert!(wall.is_creature());
        assert!(!bolt.is_permanent());
        assert!(!bolt.is_land());
    }

    #[test]
    fn card_json_with_bad_cost_is_rejected() {
        let ok = r#"{"slug": "jump", "name": "Jump", "casting_cost": "U", "card_types": ["Instant"]}"#;
        let def: CardDef = serde_json::from_str(ok).expect("valid card");
        assert_eq!(def.casting_weight(), 1);
        assert_eq!(serde_json::to_value(&def.casting_cost).expect("cost"), "U");

        let bad = r#"{"slug": "fireball", "name": "Fireball", "casting_cost": "XR"}"#;
        assert!(serde_json::from_str::<CardDef>(bad).is_err());
    }

    #[test]
    fn default_image_prefers_first_listed_set() {
        let mut def = CardDef::new("plains", "Plains", ManaCost::default(), vec![CardType::Land]);
        def.set_codes = vec!["4E".to_string(), "5E".to_string()];
        def.images.insert("5E".to_string(), "five.webp".to_string());
        def.images.insert("4E".to_string(), "four.webp".to_string());
        assert_eq!(def.default_image(), Some("four.webp"));
    }
}
