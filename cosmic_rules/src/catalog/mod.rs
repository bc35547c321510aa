//! Static content: quiz questions, artifacts, identity pools and featured
//! characters, loaded from TOML.

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::entities::{ArtifactInventory, Character, StatType, StatVector, ARTIFACT_SLOTS};
use crate::error::CatalogError;
use crate::generation::CharacterGenerator;
use crate::mechanics::{Artifact, ArtifactEffect, Question, WEIGHT_RANGE};

const REFERENCE_CATALOG: &str = include_str!("../../content/catalog.toml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    identity: IdentityDef,
    questions: Vec<Question>,
    artifacts: Vec<ArtifactDef>,
    #[serde(default)]
    featured: Vec<FeaturedDef>,
}

#[derive(Debug, Deserialize)]
struct IdentityDef {
    first_names: Vec<String>,
    name_suffixes: Vec<String>,
    classes: Vec<String>,
    images: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ArtifactDef {
    id: String,
    name: String,
    description: String,
    stat: StatType,
    bonus: u32,
    duration: u32,
}

#[derive(Debug, Deserialize)]
struct FeaturedDef {
    name: String,
    class: String,
    image: String,
    stats: StatVector,
    #[serde(default)]
    artifacts: Vec<FeaturedSlotDef>,
}

#[derive(Debug, Deserialize)]
struct FeaturedSlotDef {
    slot: usize,
    artifact: String,
    #[serde(default)]
    active: bool,
}

/// Validated static content.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Question>,
    artifacts: Vec<Artifact>,
    generator: CharacterGenerator,
    featured: Vec<Character>,
}

impl Catalog {
    /// The built-in reference content.
    pub fn reference() -> Result<Self, CatalogError> {
        Self::from_toml_str(REFERENCE_CATALOG)
    }

    /// Load a catalog from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Parse and validate a catalog from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(raw)?;

        validate_questions(&file.questions)?;

        let artifacts = build_artifacts(file.artifacts)?;

        let generator = CharacterGenerator::new(
            file.identity.first_names,
            file.identity.name_suffixes,
            file.identity.classes,
            file.identity.images,
        )?;

        let featured = file
            .featured
            .into_iter()
            .map(|def| build_featured(def, &artifacts))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            questions = file.questions.len(),
            artifacts = artifacts.len(),
            featured = featured.len(),
            "Catalog loaded"
        );

        Ok(Self {
            questions: file.questions,
            artifacts,
            generator,
            featured,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Look up an artifact by catalog id.
    pub fn artifact(&self, id: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id.0 == id)
    }

    pub fn generator(&self) -> &CharacterGenerator {
        &self.generator
    }

    /// Pre-built characters shipped with the catalog.
    pub fn featured(&self) -> &[Character] {
        &self.featured
    }
}

fn validate_questions(questions: &[Question]) -> Result<(), CatalogError> {
    if questions.is_empty() {
        return Err(CatalogError::EmptySection("questions"));
    }

    for (question_index, question) in questions.iter().enumerate() {
        if question.options.is_empty() {
            return Err(CatalogError::NoOptions {
                question: question_index,
            });
        }
        for (option_index, option) in question.options.iter().enumerate() {
            if !WEIGHT_RANGE.contains(&option.weight) {
                return Err(CatalogError::InvalidWeight {
                    question: question_index,
                    option: option_index,
                    weight: option.weight,
                });
            }
        }
    }

    Ok(())
}

fn build_artifacts(defs: Vec<ArtifactDef>) -> Result<Vec<Artifact>, CatalogError> {
    let mut seen = HashSet::new();
    let mut artifacts = Vec::with_capacity(defs.len());

    for def in defs {
        if def.bonus == 0 || def.duration == 0 {
            return Err(CatalogError::InvalidArtifact(def.id));
        }
        if !seen.insert(def.id.clone()) {
            return Err(CatalogError::DuplicateArtifact(def.id));
        }
        artifacts.push(Artifact::new(
            def.id,
            def.name,
            def.description,
            ArtifactEffect::new(def.stat, def.bonus, def.duration),
        ));
    }

    Ok(artifacts)
}

fn build_featured(def: FeaturedDef, artifacts: &[Artifact]) -> Result<Character, CatalogError> {
    let mut slots: [Option<Artifact>; ARTIFACT_SLOTS] = Default::default();

    for slot_def in def.artifacts {
        let target = slots
            .get_mut(slot_def.slot)
            .ok_or_else(|| CatalogError::InvalidSlot {
                name: def.name.clone(),
                slot: slot_def.slot,
            })?;
        let mut artifact = artifacts
            .iter()
            .find(|a| a.id.0 == slot_def.artifact)
            .cloned()
            .ok_or(CatalogError::UnknownArtifact(slot_def.artifact))?;
        artifact.is_active = slot_def.active;
        *target = Some(artifact);
    }

    Ok(Character::new(def.stats, def.name, def.class, def.image)
        .with_artifacts(ArtifactInventory::from_slots(slots)))
}
