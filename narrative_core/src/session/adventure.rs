//! Adventure sessions - one character walking one story with timed reveals.

use cosmic_rules::{Character, ToggleOutcome};

use super::await_reveal;
use crate::config::SessionConfig;
use crate::engine::{ChoiceOutcome, NarrativeEngine, RewardOutcome, Transition};
use crate::error::SessionError;
use crate::events::NarrativeEvent;
use crate::reveal::{current_runtime, ScheduledReveal};
use crate::story::{Story, StoryStep};

/// Builder for [`AdventureSession`].
#[derive(Debug, Default)]
pub struct AdventureSessionBuilder {
    character: Option<Character>,
    story: Option<Story>,
    config: SessionConfig,
}

impl AdventureSessionBuilder {
    pub fn with_character(mut self, character: Character) -> Self {
        self.character = Some(character);
        self
    }

    pub fn with_story(mut self, story: Story) -> Self {
        self.story = Some(story);
        self
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Start the adventure at step 0.
    ///
    /// Without a character the session cannot start; the caller should
    /// send the player to character creation.
    pub fn build(self) -> Result<AdventureSession, SessionError> {
        let character = self.character.ok_or(SessionError::MissingCharacter)?;
        let story = self.story.ok_or(SessionError::MissingStory)?;

        tracing::info!(
            character_id = %character.id,
            story = %story.title(),
            "Adventure started"
        );

        Ok(AdventureSession {
            config: self.config,
            character,
            story,
            engine: NarrativeEngine::new(),
            timer: None,
            events: Vec::new(),
        })
    }
}

/// An adventure in progress.
///
/// Owns the character for its duration. Each accepted choice schedules one
/// reveal timer; [`AdventureSession::end`] cancels it and hands the
/// character back.
#[derive(Debug)]
pub struct AdventureSession {
    config: SessionConfig,
    character: Character,
    story: Story,
    engine: NarrativeEngine,
    timer: Option<ScheduledReveal>,
    events: Vec<NarrativeEvent>,
}

impl AdventureSession {
    pub fn builder() -> AdventureSessionBuilder {
        AdventureSessionBuilder::default()
    }

    /// Choose an option of the current step and start its reveal timer.
    ///
    /// Must be called inside a tokio runtime. Nothing changes if the choice
    /// is rejected.
    pub fn choose(&mut self, option_index: usize) -> Result<ChoiceOutcome, SessionError> {
        let runtime = current_runtime()?;
        let outcome = self
            .engine
            .choose_option(&self.story, &mut self.character, option_index)?;

        self.events.push(NarrativeEvent::OptionChosen {
            step: outcome.step,
            option: outcome.option,
            ticket: outcome.ticket,
        });
        match &outcome.reward {
            Some(RewardOutcome::Granted { slot, summary }) => {
                self.events.push(NarrativeEvent::ArtifactGranted {
                    slot: *slot,
                    summary: summary.clone(),
                });
            }
            Some(RewardOutcome::Dropped { artifact, .. }) => {
                self.events.push(NarrativeEvent::RewardDropped {
                    artifact: artifact.clone(),
                });
            }
            None => {}
        }

        self.timer = Some(ScheduledReveal::schedule(
            &runtime,
            outcome.ticket,
            self.config.adventure_reveal(),
        ));
        Ok(outcome)
    }

    /// Wait for the pending reveal to elapse, then apply its transition.
    ///
    /// Completing the story ages the character's active artifacts. Dropping
    /// the returned future before it resolves leaves the reveal pending. If
    /// the timer was aborted this returns `RevealCancelled` and the next call
    /// waits on a new timer.
    pub async fn reveal_elapsed(&mut self) -> Result<Transition, SessionError> {
        let ticket = await_reveal(
            &mut self.timer,
            self.engine.pending_ticket(),
            self.config.adventure_reveal(),
        )
        .await?;
        let transition = self.engine.finish_reveal(ticket)?;

        match transition {
            Transition::Advanced { step } => {
                self.events.push(NarrativeEvent::StepEntered { step });
            }
            Transition::Completed => {
                self.events.push(NarrativeEvent::StoryCompleted {
                    title: self.story.title().to_string(),
                });
                for artifact in self.character.complete_adventure() {
                    self.events.push(NarrativeEvent::ArtifactExpired {
                        artifact: artifact.id,
                        name: artifact.name,
                    });
                }
            }
        }
        Ok(transition)
    }

    /// Activate or deactivate the artifact in `slot`.
    pub fn toggle_artifact(&mut self, slot: usize) -> Result<ToggleOutcome, SessionError> {
        let outcome = self.character.toggle_artifact(slot)?;
        self.events
            .push(NarrativeEvent::ArtifactToggled(outcome.clone()));
        Ok(outcome)
    }

    /// Ask to mint the character once the story is complete. Only records
    /// the request.
    pub fn mint_request(&mut self) -> Result<(), SessionError> {
        if !self.engine.is_complete() {
            return Err(SessionError::StoryNotComplete);
        }
        tracing::info!(character_id = %self.character.id, "Mint requested");
        self.events.push(NarrativeEvent::MintRequested {
            character_id: self.character.id,
        });
        Ok(())
    }

    /// Take all events recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<NarrativeEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn engine(&self) -> &NarrativeEngine {
        &self.engine
    }

    pub fn is_complete(&self) -> bool {
        self.engine.is_complete()
    }

    pub fn is_revealing(&self) -> bool {
        self.engine.pending_ticket().is_some()
    }

    pub fn pending_outcome_text(&self) -> Option<&str> {
        self.engine.pending_outcome_text()
    }

    /// The current step, or `None` once the story is complete.
    pub fn current_step(&self) -> Option<&StoryStep> {
        if self.engine.is_complete() {
            return None;
        }
        self.story.step(self.engine.current_step_index())
    }

    pub fn current_narrative_text(&self) -> Option<String> {
        self.engine
            .current_narrative_text(&self.story, &self.character)
    }

    pub fn progress(&self) -> f32 {
        self.engine.progress(&self.story)
    }

    /// Tear the session down. A pending reveal is cancelled and never
    /// applied.
    pub fn end(mut self) -> Character {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        tracing::debug!(character_id = %self.character.id, "Adventure ended");
        self.character
    }
}
