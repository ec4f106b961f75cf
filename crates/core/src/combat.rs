use crate::CardId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CombatEntry {
    pub attacker: CardId,
    pub blockers: Vec<CardId>,
}

/// Blocker assignments for the current combat, keyed by attacker in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CombatMap {
    entries: Vec<CombatEntry>,
}

impl CombatMap {
    /// Duplicate attackers collapse to their first occurrence.
    pub fn from_attackers(attackers: &[CardId]) -> Self {
        let mut map = Self::default();
        for attacker in attackers {
            if map.entry(*attacker).is_none() {
                map.entries.push(CombatEntry {
                    attacker: *attacker,
                    blockers: Vec::new(),
                });
            }
        }
        map
    }

    pub fn entries(&self) -> &[CombatEntry] {
        &self.entries
    }

    pub fn attackers(&self) -> impl Iterator<Item = CardId> + '_ {
        self.entries.iter().map(|entry| entry.attacker)
    }

    pub fn entry(&self, attacker: CardId) -> Option<&CombatEntry> {
        self.entries.iter().find(|entry| entry.attacker == attacker)
    }

    pub fn blockers_of(&self, attacker: CardId) -> &[CardId] {
        self.entry(attacker)
            .map(|entry| entry.blockers.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_assigned(&self, blocker: CardId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.blockers.contains(&blocker))
    }

    /// Appends `blocker` under `attacker`; false when the attacker is not in combat.
    pub fn assign(&mut self, attacker: CardId, blocker: CardId) -> bool {
        match self.entries.iter_mut().find(|entry| entry.attacker == attacker) {
            Some(entry) => {
                entry.blockers.push(blocker);
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
