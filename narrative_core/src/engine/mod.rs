//! Narrative Engine - the state machine that walks a character through a
//! story.
//!
//! A choice moves the engine into a reveal window: the outcome text replaces
//! the step narrative and further choices are rejected. When the reveal
//! timer fires, [`NarrativeEngine::finish_reveal`] applies the transition:
//!
//! 1. **Choose**: grant any artifact reward, store the outcome text
//! 2. **Reveal**: expose the outcome until the timer delivers its ticket
//! 3. **Advance**: move to the next step, or complete the story

use cosmic_rules::{ArtifactError, ArtifactId, Character, EffectSummary};
use serde::{Deserialize, Serialize};

use crate::error::NarrativeError;
use crate::reveal::{RevealTicket, TicketCounter};
use crate::story::{interpolate, NextStep, Story};

/// What happened to an option's artifact reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardOutcome {
    Granted { slot: usize, summary: EffectSummary },
    Dropped { artifact: ArtifactId, reason: ArtifactError },
}

impl RewardOutcome {
    /// Notice shown alongside the outcome text. Dropped rewards show nothing.
    pub fn notice(&self) -> Option<String> {
        match self {
            RewardOutcome::Granted { summary, .. } => Some(artifact_found_notice(summary)),
            RewardOutcome::Dropped { .. } => None,
        }
    }
}

/// Announcement for a granted artifact reward.
pub fn artifact_found_notice(summary: &EffectSummary) -> String {
    format!("You found an artifact: {}", summary)
}

/// Result of an accepted choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOutcome {
    pub ticket: RevealTicket,
    pub step: usize,
    pub option: usize,
    pub outcome_text: String,
    pub reward: Option<RewardOutcome>,
    pub next_step: NextStep,
}

/// Transition applied when a reveal window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Advanced { step: usize },
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PendingReveal {
    ticket: RevealTicket,
    outcome_text: String,
    next_step: NextStep,
}

/// Position of one character in one story.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativeEngine {
    current_step: usize,
    pending: Option<PendingReveal>,
    completed: bool,
    tickets: TicketCounter,
}

impl NarrativeEngine {
    /// Start at step 0 with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick option `option_index` of the current step.
    ///
    /// Rejected without any change while a reveal is pending, after
    /// completion, or when the index is out of range. An artifact reward is
    /// granted into `character` immediately; a full inventory drops it and
    /// the story still proceeds.
    pub fn choose_option(
        &mut self,
        story: &Story,
        character: &mut Character,
        option_index: usize,
    ) -> Result<ChoiceOutcome, NarrativeError> {
        if self.completed {
            return Err(NarrativeError::AlreadyCompleted);
        }
        if self.pending.is_some() {
            return Err(NarrativeError::RevealInProgress);
        }

        let step = story
            .step(self.current_step)
            .ok_or(NarrativeError::InvalidStep(self.current_step))?;
        let option = step
            .options
            .get(option_index)
            .ok_or(NarrativeError::OutOfRangeSelection {
                index: option_index,
                available: step.options.len(),
            })?;

        let reward = option
            .artifact_reward
            .as_ref()
            .map(|artifact| match character.grant_artifact(artifact) {
                Ok(slot) => RewardOutcome::Granted {
                    slot,
                    summary: artifact.summary(),
                },
                Err(reason) => RewardOutcome::Dropped {
                    artifact: artifact.id.clone(),
                    reason,
                },
            });

        let outcome_text = interpolate(&option.outcome_text, character);
        let ticket = self.tickets.issue();
        self.pending = Some(PendingReveal {
            ticket,
            outcome_text: outcome_text.clone(),
            next_step: option.next_step,
        });

        tracing::debug!(
            step = self.current_step,
            option = option_index,
            %ticket,
            "Option chosen"
        );

        Ok(ChoiceOutcome {
            ticket,
            step: self.current_step,
            option: option_index,
            outcome_text,
            reward,
            next_step: option.next_step,
        })
    }

    /// Close the reveal window identified by `ticket` and apply its
    /// transition.
    pub fn finish_reveal(&mut self, ticket: RevealTicket) -> Result<Transition, NarrativeError> {
        let pending = self.pending.as_ref().ok_or(NarrativeError::NoPendingReveal)?;
        if pending.ticket != ticket {
            return Err(NarrativeError::StaleReveal(ticket.0));
        }

        let next_step = pending.next_step;
        self.pending = None;

        let transition = match next_step {
            NextStep::Step(step) => {
                self.current_step = step;
                tracing::debug!(step, "Step entered");
                Transition::Advanced { step }
            }
            NextStep::End => {
                self.completed = true;
                tracing::info!(step = self.current_step, "Story completed");
                Transition::Completed
            }
        };

        Ok(transition)
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Outcome text of the open reveal window, if any.
    pub fn pending_outcome_text(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.outcome_text.as_str())
    }

    /// Ticket of the open reveal window, if any.
    pub fn pending_ticket(&self) -> Option<RevealTicket> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    /// Text to display right now: the pending outcome during a reveal,
    /// otherwise the current step's narrative. `None` once complete.
    pub fn current_narrative_text(&self, story: &Story, character: &Character) -> Option<String> {
        if let Some(outcome) = self.pending_outcome_text() {
            return Some(outcome.to_string());
        }
        if self.completed {
            return None;
        }
        story
            .step(self.current_step)
            .map(|step| interpolate(&step.narrative_text, character))
    }

    /// Fraction of the story covered, from 0.0 at the first step to 1.0.
    pub fn progress(&self, story: &Story) -> f32 {
        if self.completed {
            return 1.0;
        }
        match story.len() {
            0 | 1 => 0.0,
            len => (self.current_step as f32 / (len - 1) as f32).min(1.0),
        }
    }
}
