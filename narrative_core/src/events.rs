//! Session events - what a front end shows or records after each operation.

use cosmic_rules::{gain_notice, ArtifactId, CharacterId, EffectSummary, StatType, ToggleOutcome};
use serde::{Deserialize, Serialize};

use crate::engine::artifact_found_notice;
use crate::reveal::RevealTicket;

/// Something that happened during a quiz or adventure session.
///
/// Sessions queue these in order; drain them with
/// [`crate::AdventureSession::drain_events`] or
/// [`crate::QuizSession::drain_events`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NarrativeEvent {
    /// A quiz answer was accepted and its feedback is being revealed.
    AnswerRecorded {
        question: usize,
        stat: StatType,
        points: u32,
    },
    /// The quiz finished and produced a character.
    CharacterCreated {
        character_id: CharacterId,
        name: String,
        class: String,
    },
    OptionChosen {
        step: usize,
        option: usize,
        ticket: RevealTicket,
    },
    ArtifactGranted { slot: usize, summary: EffectSummary },
    /// The inventory was full; the story proceeds without the reward.
    RewardDropped { artifact: ArtifactId },
    StepEntered { step: usize },
    StoryCompleted { title: String },
    ArtifactToggled(ToggleOutcome),
    ArtifactExpired { artifact: ArtifactId, name: String },
    /// Placeholder for the on-chain mint; nothing is minted.
    MintRequested { character_id: CharacterId },
}

impl NarrativeEvent {
    /// Notice text for the player, if this event shows one.
    pub fn notice(&self) -> Option<String> {
        match self {
            NarrativeEvent::AnswerRecorded { stat, points, .. } => {
                Some(gain_notice(*stat, *points))
            }
            NarrativeEvent::CharacterCreated { name, class, .. } => {
                Some(format!("{} the {} is ready for adventure", name, class))
            }
            NarrativeEvent::ArtifactGranted { summary, .. } => {
                Some(artifact_found_notice(summary))
            }
            NarrativeEvent::StoryCompleted { title } => Some(format!("{} is complete", title)),
            NarrativeEvent::ArtifactToggled(outcome) => Some(outcome.notice()),
            NarrativeEvent::ArtifactExpired { name, .. } => {
                Some(format!("{} has run out of power", name))
            }
            NarrativeEvent::MintRequested { .. } => {
                Some("Minting is not available yet".to_string())
            }
            NarrativeEvent::OptionChosen { .. }
            | NarrativeEvent::RewardDropped { .. }
            | NarrativeEvent::StepEntered { .. } => None,
        }
    }
}
