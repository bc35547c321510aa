//! Component definitions for characters.

use serde::{Deserialize, Serialize};

use crate::mechanics::Artifact;

/// Number of artifact slots every character carries.
pub const ARTIFACT_SLOTS: usize = 4;

/// The five stat dimensions of a cosmic character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatType {
    QuantumCharisma,
    AbsurdityResistance,
    SarcasmLevel,
    TimeWarping,
    CosmicLuck,
}

impl StatType {
    /// Every stat dimension, in display order.
    pub const ALL: [StatType; 5] = [
        StatType::QuantumCharisma,
        StatType::AbsurdityResistance,
        StatType::SarcasmLevel,
        StatType::TimeWarping,
        StatType::CosmicLuck,
    ];

    /// Human-readable name for notices and character sheets.
    pub fn label(&self) -> &'static str {
        match self {
            StatType::QuantumCharisma => "Quantum Charisma",
            StatType::AbsurdityResistance => "Absurdity Resistance",
            StatType::SarcasmLevel => "Sarcasm Level",
            StatType::TimeWarping => "Time Warping",
            StatType::CosmicLuck => "Cosmic Luck",
        }
    }

    /// The key used in content files.
    pub fn key(&self) -> &'static str {
        match self {
            StatType::QuantumCharisma => "quantumCharisma",
            StatType::AbsurdityResistance => "absurdityResistance",
            StatType::SarcasmLevel => "sarcasmLevel",
            StatType::TimeWarping => "timeWarping",
            StatType::CosmicLuck => "cosmicLuck",
        }
    }
}

impl std::fmt::Display for StatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Stat profile of a character.
///
/// Values have no structural upper bound, but scoring caps additions at
/// [`StatVector::SOFT_CAP`] and display code treats it as full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatVector {
    pub quantum_charisma: u32,
    pub absurdity_resistance: u32,
    pub sarcasm_level: u32,
    pub time_warping: u32,
    pub cosmic_luck: u32,
}

impl Default for StatVector {
    fn default() -> Self {
        Self::baseline()
    }
}

impl StatVector {
    /// Starting value of every dimension before any quiz answer.
    pub const BASELINE: u32 = 20;

    /// Ceiling applied by scoring and used by display code.
    pub const SOFT_CAP: u32 = 100;

    /// A vector with every dimension at [`StatVector::BASELINE`].
    pub fn baseline() -> Self {
        Self::uniform(Self::BASELINE)
    }

    /// A vector with every dimension set to `value`.
    pub fn uniform(value: u32) -> Self {
        Self {
            quantum_charisma: value,
            absurdity_resistance: value,
            sarcasm_level: value,
            time_warping: value,
            cosmic_luck: value,
        }
    }

    /// Get the value of a stat.
    pub fn get(&self, stat: StatType) -> u32 {
        match stat {
            StatType::QuantumCharisma => self.quantum_charisma,
            StatType::AbsurdityResistance => self.absurdity_resistance,
            StatType::SarcasmLevel => self.sarcasm_level,
            StatType::TimeWarping => self.time_warping,
            StatType::CosmicLuck => self.cosmic_luck,
        }
    }

    fn get_mut(&mut self, stat: StatType) -> &mut u32 {
        match stat {
            StatType::QuantumCharisma => &mut self.quantum_charisma,
            StatType::AbsurdityResistance => &mut self.absurdity_resistance,
            StatType::SarcasmLevel => &mut self.sarcasm_level,
            StatType::TimeWarping => &mut self.time_warping,
            StatType::CosmicLuck => &mut self.cosmic_luck,
        }
    }

    /// Set the value of a stat.
    pub fn set(&mut self, stat: StatType, value: u32) {
        *self.get_mut(stat) = value;
    }

    /// Add points to a stat, capping the result at [`StatVector::SOFT_CAP`].
    ///
    /// The value never decreases, even if it was already above the cap.
    /// Returns the new value.
    pub fn add_capped(&mut self, stat: StatType, points: u32) -> u32 {
        let value = self.get_mut(stat);
        let old = *value;
        *value = old.saturating_add(points).min(Self::SOFT_CAP).max(old);
        *value
    }

    /// Display level of a stat: one level per 10 points.
    pub fn level(&self, stat: StatType) -> u32 {
        self.get(stat) / 10
    }

    /// Iterate over all stats in display order.
    pub fn iter(&self) -> impl Iterator<Item = (StatType, u32)> + '_ {
        StatType::ALL.iter().map(move |stat| (*stat, self.get(*stat)))
    }
}

/// Fixed-capacity artifact inventory.
///
/// Always holds exactly [`ARTIFACT_SLOTS`] slots; empty slots stay in place
/// and are never compacted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArtifactInventory {
    pub(crate) slots: [Option<Artifact>; ARTIFACT_SLOTS],
}

impl ArtifactInventory {
    /// Create an inventory with every slot empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inventory from explicit slot contents.
    pub fn from_slots(slots: [Option<Artifact>; ARTIFACT_SLOTS]) -> Self {
        Self { slots }
    }

    /// All slots, empty ones included.
    pub fn slots(&self) -> &[Option<Artifact>] {
        &self.slots
    }

    /// The artifact in a slot, if the slot exists and is occupied.
    pub fn get(&self, slot: usize) -> Option<&Artifact> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Occupied slots with their indices.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Artifact)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, artifact)| artifact.as_ref().map(|a| (slot, a)))
    }

    /// Number of empty slots.
    pub fn free_slots(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    pub fn is_full(&self) -> bool {
        self.free_slots() == 0
    }

    pub fn is_empty(&self) -> bool {
        self.free_slots() == ARTIFACT_SLOTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_stats() {
        let stats = StatVector::default();
        for (_, value) in stats.iter() {
            assert_eq!(value, StatVector::BASELINE);
        }
        assert_eq!(stats.iter().count(), 5);
    }

    #[test]
    fn test_stat_level() {
        let stats = StatVector {
            quantum_charisma: 85,
            absurdity_resistance: 70,
            sarcasm_level: 92,
            time_warping: 9,
            cosmic_luck: 100,
        };

        assert_eq!(stats.level(StatType::QuantumCharisma), 8);
        assert_eq!(stats.level(StatType::AbsurdityResistance), 7);
        assert_eq!(stats.level(StatType::SarcasmLevel), 9);
        assert_eq!(stats.level(StatType::TimeWarping), 0);
        assert_eq!(stats.level(StatType::CosmicLuck), 10);
    }

    #[test]
    fn test_add_capped() {
        let mut stats = StatVector::baseline();

        assert_eq!(stats.add_capped(StatType::CosmicLuck, 60), 80);
        assert_eq!(stats.add_capped(StatType::CosmicLuck, 60), 100);
        assert_eq!(stats.get(StatType::SarcasmLevel), 20);
    }

    #[test]
    fn test_add_capped_never_decreases() {
        let mut stats = StatVector::baseline();
        stats.set(StatType::TimeWarping, 130);

        assert_eq!(stats.add_capped(StatType::TimeWarping, 20), 130);
    }

    #[test]
    fn test_stat_keys_match_serde() {
        for stat in StatType::ALL {
            let encoded = toml::Value::try_from(stat);
            assert!(matches!(encoded, Ok(toml::Value::String(s)) if s == stat.key()));
        }
    }

    #[test]
    fn test_empty_inventory() {
        let inventory = ArtifactInventory::new();
        assert_eq!(inventory.slots().len(), ARTIFACT_SLOTS);
        assert!(inventory.is_empty());
        assert!(!inventory.is_full());
        assert!(inventory.get(0).is_none());
        assert!(inventory.get(7).is_none());
    }
}
