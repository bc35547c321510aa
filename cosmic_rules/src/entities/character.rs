//! Character definitions.

use serde::{Deserialize, Serialize};

use super::{ArtifactInventory, CharacterId, StatType, StatVector};
use crate::error::ArtifactError;
use crate::mechanics::{Artifact, ToggleOutcome};

/// A generated cosmic character.
///
/// Identity and stats are fixed at creation. The artifact inventory is the
/// only mutable part and changes only through the artifact operations below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    name: String,
    class: String,
    image_ref: String,
    stats: StatVector,
    artifacts: ArtifactInventory,
}

impl Character {
    /// Create a character with an empty artifact inventory.
    pub fn new(
        stats: StatVector,
        name: impl Into<String>,
        class: impl Into<String>,
        image_ref: impl Into<String>,
    ) -> Self {
        let character = Self {
            id: CharacterId::new(),
            name: name.into(),
            class: class.into(),
            image_ref: image_ref.into(),
            stats,
            artifacts: ArtifactInventory::new(),
        };
        tracing::info!(
            character_id = %character.id,
            name = %character.name,
            class = %character.class,
            "Character created"
        );
        character
    }

    /// Replace the starting inventory. Used for pre-built catalog characters.
    pub fn with_artifacts(mut self, artifacts: ArtifactInventory) -> Self {
        self.artifacts = artifacts;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    pub fn stats(&self) -> &StatVector {
        &self.stats
    }

    pub fn artifacts(&self) -> &ArtifactInventory {
        &self.artifacts
    }

    /// Grant a copy of `artifact` into the first empty slot.
    pub fn grant_artifact(&mut self, artifact: &Artifact) -> Result<usize, ArtifactError> {
        let result = self.artifacts.grant(artifact.clone());
        match &result {
            Ok(slot) => tracing::info!(
                character_id = %self.id,
                artifact = %artifact.id,
                slot,
                "Artifact granted"
            ),
            Err(e) => tracing::warn!(
                character_id = %self.id,
                artifact = %artifact.id,
                error = %e,
                "Artifact reward dropped"
            ),
        }
        result
    }

    /// Flip the activation state of the artifact in `slot`.
    pub fn toggle_artifact(&mut self, slot: usize) -> Result<ToggleOutcome, ArtifactError> {
        let outcome = self.artifacts.toggle(slot)?;
        tracing::debug!(
            character_id = %self.id,
            slot,
            is_active = outcome.is_active,
            "Artifact toggled"
        );
        Ok(outcome)
    }

    /// Sum of active artifact bonuses for `stat`.
    pub fn effective_bonus(&self, stat: StatType) -> u32 {
        self.artifacts.effective_bonus(stat)
    }

    /// Base stat plus active artifact bonuses, for display only.
    pub fn effective_stat(&self, stat: StatType) -> u32 {
        self.stats.get(stat).saturating_add(self.effective_bonus(stat))
    }

    /// Age active artifacts by one completed adventure.
    ///
    /// Returns the artifacts that expired and were removed from their slots.
    pub fn complete_adventure(&mut self) -> Vec<Artifact> {
        let expired = self.artifacts.complete_adventure();
        for artifact in &expired {
            tracing::info!(
                character_id = %self.id,
                artifact = %artifact.id,
                "Artifact expired"
            );
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanics::ArtifactEffect;

    fn coffee_mug() -> Artifact {
        Artifact::new(
            "art-2",
            "Infinite Coffee Mug",
            "Never runs dry.",
            ArtifactEffect::new(StatType::QuantumCharisma, 15, 2),
        )
    }

    #[test]
    fn test_new_character() {
        let character = Character::new(StatVector::baseline(), "Zortblob", "Quantum Waiter", "img");
        assert_eq!(character.name(), "Zortblob");
        assert_eq!(character.class(), "Quantum Waiter");
        assert_eq!(character.image_ref(), "img");
        assert_eq!(character.artifacts().slots().len(), 4);
        assert!(character.artifacts().is_empty());
    }

    #[test]
    fn test_effective_stat_does_not_touch_base() {
        let mut character = Character::new(StatVector::baseline(), "Blipzoid", "Paradox Psychologist", "img");
        let slot = character.grant_artifact(&coffee_mug());
        assert_eq!(slot, Ok(0));

        assert!(character.toggle_artifact(0).is_ok());

        assert_eq!(character.effective_bonus(StatType::QuantumCharisma), 15);
        assert_eq!(character.effective_stat(StatType::QuantumCharisma), 35);
        assert_eq!(character.stats().get(StatType::QuantumCharisma), 20);
    }

    #[test]
    fn test_effective_stat_saturates() {
        let mut character = Character::new(StatVector::baseline(), "Quirkton", "Black Hole Diver", "img");
        let relic = Artifact::new(
            "relic",
            "Overclocked Relic",
            "Too much luck.",
            ArtifactEffect::new(StatType::CosmicLuck, u32::MAX, 1),
        );
        assert_eq!(character.grant_artifact(&relic), Ok(0));
        assert!(character.toggle_artifact(0).is_ok());

        assert_eq!(character.effective_stat(StatType::CosmicLuck), u32::MAX);
    }

    #[test]
    fn test_grant_stores_a_copy() {
        let mut character = Character::new(StatVector::baseline(), "Quirkton", "Black Hole Diver", "img");
        let mut mug = coffee_mug();
        mug.is_active = true;

        assert_eq!(character.grant_artifact(&mug), Ok(0));

        assert!(mug.is_active);
        assert!(character.artifacts().get(0).is_some_and(|a| !a.is_active));
    }
}
