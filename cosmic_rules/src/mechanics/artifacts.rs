//! Artifact inventory operations: grant, activation, bonuses and decay.

use serde::{Deserialize, Serialize};

use super::{Artifact, EffectSummary};
use crate::entities::{ArtifactInventory, StatType};
use crate::error::ArtifactError;

/// Result of a successful activation toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOutcome {
    pub slot: usize,
    pub is_active: bool,
    pub summary: EffectSummary,
}

impl ToggleOutcome {
    /// Notification text for the toggle.
    pub fn notice(&self) -> String {
        if self.is_active {
            format!("Artifact activated: {}", self.summary)
        } else {
            format!("Artifact deactivated: {}", self.summary.name)
        }
    }
}

impl ArtifactInventory {
    /// Store `artifact` in the first empty slot, scanning from slot 0.
    ///
    /// The stored copy starts inactive with its full duration. A full
    /// inventory is left untouched.
    pub fn grant(&mut self, mut artifact: Artifact) -> Result<usize, ArtifactError> {
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(ArtifactError::NoCapacity)?;

        artifact.is_active = false;
        artifact.remaining_adventures = artifact.effect.duration_in_adventures;
        self.slots[slot] = Some(artifact);
        Ok(slot)
    }

    /// Flip `is_active` on the artifact in `slot`.
    pub fn toggle(&mut self, slot: usize) -> Result<ToggleOutcome, ArtifactError> {
        let artifact = self
            .slots
            .get_mut(slot)
            .and_then(Option::as_mut)
            .ok_or(ArtifactError::InvalidSlot(slot))?;

        artifact.is_active = !artifact.is_active;
        Ok(ToggleOutcome {
            slot,
            is_active: artifact.is_active,
            summary: artifact.summary(),
        })
    }

    /// Sum of bonuses over active artifacts affecting `stat`.
    ///
    /// Artifacts on the same stat stack.
    pub fn effective_bonus(&self, stat: StatType) -> u32 {
        self.occupied()
            .filter(|(_, a)| a.is_active && a.effect.stat == stat)
            .fold(0u32, |total, (_, a)| total.saturating_add(a.effect.bonus))
    }

    /// Number of active artifacts.
    pub fn active_count(&self) -> usize {
        self.occupied().filter(|(_, a)| a.is_active).count()
    }

    /// Count one completed adventure against every active artifact.
    ///
    /// Artifacts whose remaining duration reaches zero are removed, freeing
    /// their slot. Inactive artifacts do not age.
    pub fn complete_adventure(&mut self) -> Vec<Artifact> {
        let mut expired = Vec::new();

        for slot in self.slots.iter_mut() {
            let wore_out = match slot {
                Some(artifact) if artifact.is_active => {
                    artifact.remaining_adventures = artifact.remaining_adventures.saturating_sub(1);
                    artifact.remaining_adventures == 0
                }
                _ => false,
            };

            if wore_out {
                if let Some(artifact) = slot.take() {
                    expired.push(artifact);
                }
            }
        }

        expired
    }
}
