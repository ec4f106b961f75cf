use serde::{Deserialize, Serialize};
use std::fmt;

/// Turn phases in the order they are visited.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Untap,
    Upkeep,
    Draw,
    Cast,
    DeclareAttackers,
    DeclareBlockers,
    AttackAndBlockWindow,
    FirstStrikeDamage,
    CombatDamage,
    CombatEnd,
    EndStep,
    Discard,
    CreaturesHeal,
    EndTurnEffects,
}

impl Phase {
    pub const ALL: [Phase; 14] = [
        Phase::Untap,
        Phase::Upkeep,
        Phase::Draw,
        Phase::Cast,
        Phase::DeclareAttackers,
        Phase::DeclareBlockers,
        Phase::AttackAndBlockWindow,
        Phase::FirstStrikeDamage,
        Phase::CombatDamage,
        Phase::CombatEnd,
        Phase::EndStep,
        Phase::Discard,
        Phase::CreaturesHeal,
        Phase::EndTurnEffects,
    ];

    /// Following phase; the last phase wraps to `Untap` of the next turn.
    pub fn next(self) -> Phase {
        match self {
            Self::Untap => Self::Upkeep,
            Self::Upkeep => Self::Draw,
            Self::Draw => Self::Cast,
            Self::Cast => Self::DeclareAttackers,
            Self::DeclareAttackers => Self::DeclareBlockers,
            Self::DeclareBlockers => Self::AttackAndBlockWindow,
            Self::AttackAndBlockWindow => Self::FirstStrikeDamage,
            Self::FirstStrikeDamage => Self::CombatDamage,
            Self::CombatDamage => Self::CombatEnd,
            Self::CombatEnd => Self::EndStep,
            Self::EndStep => Self::Discard,
            Self::Discard => Self::CreaturesHeal,
            Self::CreaturesHeal => Self::EndTurnEffects,
            Self::EndTurnEffects => Self::Untap,
        }
    }

    /// Reachable phases with no rules of their own yet; only passing is offered.
    pub fn is_stub(self) -> bool {
        matches!(
            self,
            Self::AttackAndBlockWindow
                | Self::FirstStrikeDamage
                | Self::CombatDamage
                | Self::CombatEnd
                | Self::EndStep
                | Self::Discard
                | Self::CreaturesHeal
                | Self::EndTurnEffects
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Untap => "untap",
            Self::Upkeep => "upkeep",
            Self::Draw => "draw",
            Self::Cast => "cast",
            Self::DeclareAttackers => "declare attackers",
            Self::DeclareBlockers => "declare blockers",
            Self::AttackAndBlockWindow => "attack and block window",
            Self::FirstStrikeDamage => "first strike damage",
            Self::CombatDamage => "combat damage",
            Self::CombatEnd => "combat end",
            Self::EndStep => "end step",
            Self::Discard => "discard",
            Self::CreaturesHeal => "creatures heal",
            Self::EndTurnEffects => "end of turn effects",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_follows_declared_order_and_wraps() {
        for pair in Phase::ALL.windows(2) {
            assert_eq!(pair[0].next(), pair[1]);
        }
        assert_eq!(Phase::EndTurnEffects.next(), Phase::Untap);
    }

    #[test]
    fn only_combat_tail_and_ending_phases_are_stubs() {
        assert!(!Phase::Cast.is_stub());
        assert!(!Phase::DeclareBlockers.is_stub());
        assert!(Phase::AttackAndBlockWindow.is_stub());
        assert!(Phase::EndTurnEffects.is_stub());
    }
}
