use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeckRules {
    pub min_size: usize,
    pub max_size: usize,
    /// Maximum copies of any card that is not a basic land.
    pub copy_limit: usize,
}

impl Default for DeckRules {
    fn default() -> Self {
        Self {
            min_size: 40,
            max_size: 99,
            copy_limit: 4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameConfig {
    #[serde(default = "default_opening_hand_size")]
    pub opening_hand_size: usize,
    #[serde(default)]
    pub first_player_draws: bool,
    #[serde(default)]
    pub deck: DeckRules,
}

fn default_opening_hand_size() -> usize {
    7
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            opening_hand_size: default_opening_hand_size(),
            first_player_draws: false,
            deck: DeckRules::default(),
        }
    }
}
