//! Game mechanics: artifacts and quiz scoring.

mod artifacts;
mod scoring;

pub use artifacts::*;
pub use scoring::*;

use serde::{Deserialize, Serialize};

use crate::entities::StatType;

/// Catalog identifier of an artifact (e.g. `art-1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactId(pub String);

impl ArtifactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What an active artifact does for its holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactEffect {
    pub stat: StatType,
    pub bonus: u32,
    pub duration_in_adventures: u32,
}

impl ArtifactEffect {
    pub fn new(stat: StatType, bonus: u32, duration_in_adventures: u32) -> Self {
        Self {
            stat,
            bonus,
            duration_in_adventures,
        }
    }
}

/// A collectible stat modifier occupying one inventory slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: ArtifactId,
    pub name: String,
    pub description: String,
    pub effect: ArtifactEffect,
    pub is_active: bool,
    /// Adventures left before the artifact wears out. Only counts down
    /// while the artifact is active.
    pub remaining_adventures: u32,
}

impl Artifact {
    /// Create an inactive artifact with its full duration remaining.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        effect: ArtifactEffect,
    ) -> Self {
        Self {
            id: ArtifactId::new(id),
            name: name.into(),
            description: description.into(),
            remaining_adventures: effect.duration_in_adventures,
            effect,
            is_active: false,
        }
    }

    /// Summary of the effect for notifications.
    pub fn summary(&self) -> EffectSummary {
        EffectSummary {
            name: self.name.clone(),
            stat: self.effect.stat,
            bonus: self.effect.bonus,
            duration_in_adventures: self.effect.duration_in_adventures,
        }
    }
}

/// Human-readable description of an artifact effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSummary {
    pub name: String,
    pub stat: StatType,
    pub bonus: u32,
    pub duration_in_adventures: u32,
}

impl std::fmt::Display for EffectSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} +{} for {} adventures",
            self.name, self.stat, self.bonus, self.duration_in_adventures
        )
    }
}
