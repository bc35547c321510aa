//! Story definitions - the branching step graph an adventure walks through.

use cosmic_rules::{Artifact, Catalog, Character};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::StoryError;

const REFERENCE_STORY: &str = include_str!("../../content/restaurant.toml");

/// Where an option leads once its outcome has been revealed.
///
/// Content files encode this as an integer: any negative value ends the
/// story, anything else is a step index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum NextStep {
    Step(usize),
    End,
}

impl From<i64> for NextStep {
    fn from(value: i64) -> Self {
        match usize::try_from(value) {
            Ok(step) => NextStep::Step(step),
            Err(_) => NextStep::End,
        }
    }
}

impl From<NextStep> for i64 {
    fn from(next: NextStep) -> Self {
        match next {
            NextStep::Step(step) => i64::try_from(step).unwrap_or(i64::MAX),
            NextStep::End => -1,
        }
    }
}

/// A choice offered at a story step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryOption {
    pub label: String,
    pub icon: Option<String>,
    /// Shown during the reveal window. May contain `{name}` and `{class}`.
    pub outcome_text: String,
    pub next_step: NextStep,
    pub artifact_reward: Option<Artifact>,
}

impl StoryOption {
    pub fn new(label: impl Into<String>, outcome_text: impl Into<String>, next_step: NextStep) -> Self {
        Self {
            label: label.into(),
            icon: None,
            outcome_text: outcome_text.into(),
            next_step,
            artifact_reward: None,
        }
    }

    /// Attach an artifact granted when this option is chosen.
    pub fn with_reward(mut self, artifact: Artifact) -> Self {
        self.artifact_reward = Some(artifact);
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// One narrated step with its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryStep {
    /// May contain `{name}` and `{class}`.
    pub narrative_text: String,
    pub options: Vec<StoryOption>,
}

impl StoryStep {
    pub fn new(narrative_text: impl Into<String>, options: Vec<StoryOption>) -> Self {
        Self {
            narrative_text: narrative_text.into(),
            options,
        }
    }
}

/// A validated story graph.
///
/// Every step has at least one option and every non-terminal option points
/// at an existing step. Steps may be revisited or converged on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Story {
    title: String,
    steps: Vec<StoryStep>,
}

impl Story {
    /// Build a story, checking the step graph.
    pub fn new(title: impl Into<String>, steps: Vec<StoryStep>) -> Result<Self, StoryError> {
        if steps.is_empty() {
            return Err(StoryError::Empty);
        }

        for (step_index, step) in steps.iter().enumerate() {
            if step.options.is_empty() {
                return Err(StoryError::NoOptions { step: step_index });
            }
            for (option_index, option) in step.options.iter().enumerate() {
                if let NextStep::Step(target) = option.next_step {
                    if target >= steps.len() {
                        return Err(StoryError::DanglingStep {
                            step: step_index,
                            option: option_index,
                            target,
                        });
                    }
                }
            }
        }

        Ok(Self {
            title: title.into(),
            steps,
        })
    }

    /// The built-in reference adventure, with rewards drawn from `catalog`.
    pub fn reference(catalog: &Catalog) -> Result<Self, StoryError> {
        Self::from_toml_str(REFERENCE_STORY, catalog)
    }

    /// Load a story from a TOML file.
    pub fn load(path: impl AsRef<Path>, catalog: &Catalog) -> Result<Self, StoryError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw, catalog)
    }

    /// Parse a story from TOML, resolving reward ids against `catalog`.
    pub fn from_toml_str(raw: &str, catalog: &Catalog) -> Result<Self, StoryError> {
        let file: StoryFile = toml::from_str(raw)?;

        let steps = file
            .steps
            .into_iter()
            .enumerate()
            .map(|(step_index, step)| {
                let options = step
                    .options
                    .into_iter()
                    .enumerate()
                    .map(|(option_index, option)| {
                        let artifact_reward = match option.reward {
                            Some(id) => Some(catalog.artifact(&id).cloned().ok_or(
                                StoryError::UnknownArtifact {
                                    step: step_index,
                                    option: option_index,
                                    artifact: id,
                                },
                            )?),
                            None => None,
                        };
                        Ok(StoryOption {
                            label: option.label,
                            icon: option.icon,
                            outcome_text: option.outcome,
                            next_step: option.next_step,
                            artifact_reward,
                        })
                    })
                    .collect::<Result<Vec<_>, StoryError>>()?;
                Ok(StoryStep::new(step.narrative, options))
            })
            .collect::<Result<Vec<_>, StoryError>>()?;

        Self::new(file.title, steps)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn steps(&self) -> &[StoryStep] {
        &self.steps
    }

    pub fn step(&self, index: usize) -> Option<&StoryStep> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a constructed story.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct StoryFile {
    title: String,
    steps: Vec<StepDef>,
}

#[derive(Debug, Deserialize)]
struct StepDef {
    narrative: String,
    options: Vec<OptionDef>,
}

#[derive(Debug, Deserialize)]
struct OptionDef {
    label: String,
    #[serde(default)]
    icon: Option<String>,
    outcome: String,
    next_step: NextStep,
    #[serde(default)]
    reward: Option<String>,
}

/// Replace `{name}` and `{class}` with the character's identity.
pub fn interpolate(text: &str, character: &Character) -> String {
    text.replace("{name}", character.name())
        .replace("{class}", character.class())
}
