//! Quiz sessions - the personality test with timed feedback, ending in a
//! freshly generated character.

use cosmic_rules::{Character, CharacterGenerator, Question, StatVector};
use rand::Rng;

use super::await_reveal;
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::events::NarrativeEvent;
use crate::quiz::{AnswerOutcome, BackNavigation, QuizRunner, QuizTransition};
use crate::reveal::{current_runtime, ScheduledReveal};

#[derive(Debug)]
pub struct QuizSession {
    config: SessionConfig,
    questions: Vec<Question>,
    runner: QuizRunner,
    stats: Option<StatVector>,
    character_created: bool,
    timer: Option<ScheduledReveal>,
    events: Vec<NarrativeEvent>,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>, config: SessionConfig) -> Self {
        Self {
            config,
            questions,
            runner: QuizRunner::new(),
            stats: None,
            character_created: false,
            timer: None,
            events: Vec::new(),
        }
    }

    /// Answer the current question and start its feedback timer.
    pub fn answer(&mut self, option_index: usize) -> Result<AnswerOutcome, SessionError> {
        let runtime = current_runtime()?;
        let outcome = self.runner.choose_answer(&self.questions, option_index)?;

        self.events.push(NarrativeEvent::AnswerRecorded {
            question: outcome.question,
            stat: outcome.stat,
            points: outcome.points,
        });
        self.timer = Some(ScheduledReveal::schedule(
            &runtime,
            outcome.ticket,
            self.config.quiz_reveal(),
        ));
        Ok(outcome)
    }

    /// Wait for the feedback reveal, then move to the next question or
    /// score the quiz.
    pub async fn reveal_elapsed(&mut self) -> Result<QuizTransition, SessionError> {
        let ticket = await_reveal(
            &mut self.timer,
            self.runner.pending_ticket(),
            self.config.quiz_reveal(),
        )
        .await?;
        let transition = self.runner.finish_reveal(&self.questions, ticket)?;
        if let QuizTransition::Finished(stats) = transition {
            self.stats = Some(stats);
        }
        Ok(transition)
    }

    pub fn go_back(&mut self) -> Result<BackNavigation, SessionError> {
        Ok(self.runner.go_back()?)
    }

    /// Generate the character for this quiz result. A finished quiz yields
    /// exactly one character.
    pub fn create_character<R: Rng + ?Sized>(
        &mut self,
        generator: &CharacterGenerator,
        rng: &mut R,
    ) -> Result<Character, SessionError> {
        let stats = self.stats.ok_or(SessionError::QuizNotFinished)?;
        if self.character_created {
            return Err(SessionError::CharacterAlreadyCreated);
        }
        let character = generator.generate(stats, rng);
        self.character_created = true;
        self.events.push(NarrativeEvent::CharacterCreated {
            character_id: character.id,
            name: character.name().to_string(),
            class: character.class().to_string(),
        });
        Ok(character)
    }

    pub fn drain_events(&mut self) -> Vec<NarrativeEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn runner(&self) -> &QuizRunner {
        &self.runner
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.runner.is_finished() {
            return None;
        }
        self.questions.get(self.runner.current_question())
    }

    /// Feedback during a reveal, otherwise the current prompt.
    pub fn current_text(&self) -> Option<&str> {
        self.runner.current_text(&self.questions)
    }

    /// Scored stats, once the last feedback reveal has elapsed.
    pub fn stats(&self) -> Option<&StatVector> {
        self.stats.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.runner.is_finished()
    }

    /// Leave the quiz. Pending feedback is cancelled.
    pub fn end(mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NarrativeError;
    use crate::reveal::live_task_count;
    use cosmic_rules::{score_traits, Catalog};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;
    use tokio::time::Instant;

    fn catalog() -> Catalog {
        Catalog::reference().expect("reference catalog is valid")
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiz_creates_character() {
        let catalog = catalog();
        let mut session = QuizSession::new(catalog.questions().to_vec(), SessionConfig::default());
        let selections = [3, 0, 1, 2];
        let start = Instant::now();

        for (index, &option) in selections.iter().enumerate() {
            assert_eq!(session.current_question(), catalog.questions().get(index));
            session.answer(option).expect("answer accepted");
            session.reveal_elapsed().await.expect("reveal");
        }

        assert!(start.elapsed() >= Duration::from_millis(4 * 3000));
        assert!(session.is_finished());
        let expected = score_traits(catalog.questions(), &selections);
        assert_eq!(session.stats(), Some(&expected));

        let mut rng = StdRng::seed_from_u64(11);
        let character = session
            .create_character(catalog.generator(), &mut rng)
            .expect("quiz finished");
        assert_eq!(character.stats(), &expected);
        assert!(character.artifacts().is_empty());

        let events = session.drain_events();
        assert_eq!(events.len(), 5);
        assert!(matches!(events.last(), Some(NarrativeEvent::CharacterCreated { .. })));

        assert!(matches!(
            session.create_character(catalog.generator(), &mut rng),
            Err(SessionError::CharacterAlreadyCreated)
        ));
        assert!(session.drain_events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_character_before_finish() {
        let catalog = catalog();
        let mut session = QuizSession::new(catalog.questions().to_vec(), SessionConfig::default());
        session.answer(0).expect("answer accepted");

        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            session.create_character(catalog.generator(), &mut rng),
            Err(SessionError::QuizNotFinished)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_answer_rejected_during_feedback() {
        let mut session = QuizSession::new(catalog().questions().to_vec(), SessionConfig::default());
        let outcome = session.answer(1).expect("answer accepted");

        assert_eq!(session.current_text(), Some(outcome.feedback.as_str()));
        assert!(matches!(
            session.answer(2),
            Err(SessionError::Narrative(NarrativeError::RevealInProgress))
        ));
        assert!(matches!(
            session.go_back(),
            Err(SessionError::Narrative(NarrativeError::RevealInProgress))
        ));

        assert_eq!(
            session.reveal_elapsed().await.expect("reveal"),
            QuizTransition::NextQuestion(1)
        );
        assert_eq!(session.go_back().expect("back"), BackNavigation::Question(0));
        assert_eq!(session.go_back().expect("back"), BackNavigation::AtStart);
    }

    #[tokio::test]
    async fn test_end_cancels_feedback() {
        let mut session = QuizSession::new(catalog().questions().to_vec(), SessionConfig::default());
        session.answer(0).expect("answer accepted");
        assert_eq!(live_task_count().await, 1);

        session.end();

        assert_eq!(live_task_count().await, 0);
    }

    #[test]
    fn test_aborted_feedback_timer_is_rescheduled() {
        let mut session = QuizSession::new(catalog().questions().to_vec(), SessionConfig::default());

        let first_runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("runtime builds");
        {
            let _guard = first_runtime.enter();
            session.answer(2).expect("answer accepted");
        }
        drop(first_runtime);

        let second_runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .expect("runtime builds");
        second_runtime.block_on(async {
            assert!(matches!(
                session.reveal_elapsed().await,
                Err(SessionError::RevealCancelled)
            ));
            assert!(session.runner().pending_ticket().is_some());

            assert_eq!(
                session.reveal_elapsed().await.expect("reveal"),
                QuizTransition::NextQuestion(1)
            );
            assert_eq!(session.runner().answers(), &[2]);
            session.answer(0).expect("answer accepted");
        });
    }
}
