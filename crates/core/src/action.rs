use crate::CardId;
use serde::{Deserialize, Serialize};

/// Every decision a player can submit to the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Action {
    PassTurn,
    PlayLand { card: CardId },
    CastPermanent { card: CardId },
    CastSpell { card: CardId, targets: Vec<CardId> },
    BeginCombat,
    DeclareAttacker { card: CardId },
    FinishAttackers,
    AssignBlocker { blocker: CardId, attacker: CardId },
    FinishBlocking,
}

impl Action {
    pub fn stable_key(&self) -> String {
        match self {
            Self::PassTurn => "pass_turn".to_string(),
            Self::PlayLand { card } => format!("play_land:{}", card.0),
            Self::CastPermanent { card } => format!("cast_permanent:{}", card.0),
            Self::CastSpell { card, targets } => {
                let targets: Vec<u32> = targets.iter().map(|t| t.0).collect();
                format!("cast_spell:{}:{targets:?}", card.0)
            }
            Self::BeginCombat => "begin_combat".to_string(),
            Self::DeclareAttacker { card } => format!("declare_attacker:{}", card.0),
            Self::FinishAttackers => "finish_attackers".to_string(),
            Self::AssignBlocker { blocker, attacker } => {
                format!("assign_blocker:{}:{}", blocker.0, attacker.0)
            }
            Self::FinishBlocking => "finish_blocking".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_keys_distinguish_targets() {
        let a = Action::CastSpell {
            card: CardId(4),
            targets: vec![CardId(9)],
        };
        let b = Action::CastSpell {
            card: CardId(4),
            targets: Vec::new(),
        };
        assert_eq!(a.stable_key(), "cast_spell:4:[9]");
        assert_ne!(a.stable_key(), b.stable_key());
        assert_eq!(Action::PassTurn.stable_key(), "pass_turn");
    }
}
