//! Quiz runner - the personality test, walked question by question with a
//! feedback reveal after every answer.

use cosmic_rules::{score_traits, Question, StatType, StatVector};
use serde::{Deserialize, Serialize};

use crate::error::NarrativeError;
use crate::reveal::{RevealTicket, TicketCounter};

/// Result of an accepted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub ticket: RevealTicket,
    pub question: usize,
    pub option: usize,
    pub feedback: String,
    pub stat: StatType,
    pub points: u32,
    /// Short gain announcement, e.g. `+60 Cosmic Luck!`.
    pub notice: String,
}

/// Transition applied when a feedback reveal closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizTransition {
    NextQuestion(usize),
    /// All questions answered; the stats for character creation.
    Finished(StatVector),
}

/// Result of stepping back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackNavigation {
    Question(usize),
    /// Already at the first question; the caller leaves the quiz.
    AtStart,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PendingFeedback {
    ticket: RevealTicket,
    feedback: String,
}

/// Progress through one quiz.
///
/// `answers` holds one selection per question before the current one, plus
/// the current one while its feedback is pending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizRunner {
    current_question: usize,
    answers: Vec<usize>,
    pending: Option<PendingFeedback>,
    finished: bool,
    tickets: TicketCounter,
}

impl QuizRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer for the current question and open its feedback
    /// reveal.
    pub fn choose_answer(
        &mut self,
        questions: &[Question],
        option_index: usize,
    ) -> Result<AnswerOutcome, NarrativeError> {
        if self.finished {
            return Err(NarrativeError::AlreadyCompleted);
        }
        if self.pending.is_some() {
            return Err(NarrativeError::RevealInProgress);
        }

        let question = questions
            .get(self.current_question)
            .ok_or(NarrativeError::InvalidStep(self.current_question))?;
        let option = question
            .options
            .get(option_index)
            .ok_or(NarrativeError::OutOfRangeSelection {
                index: option_index,
                available: question.options.len(),
            })?;

        self.answers.truncate(self.current_question);
        self.answers.push(option_index);

        let ticket = self.tickets.issue();
        self.pending = Some(PendingFeedback {
            ticket,
            feedback: option.feedback.clone(),
        });

        tracing::debug!(
            question = self.current_question,
            option = option_index,
            stat = %option.stat,
            points = option.points(),
            "Quiz answer recorded"
        );

        Ok(AnswerOutcome {
            ticket,
            question: self.current_question,
            option: option_index,
            feedback: option.feedback.clone(),
            stat: option.stat,
            points: option.points(),
            notice: option.notice(),
        })
    }

    /// Close the feedback reveal identified by `ticket`. After the last
    /// question the recorded answers are scored.
    pub fn finish_reveal(
        &mut self,
        questions: &[Question],
        ticket: RevealTicket,
    ) -> Result<QuizTransition, NarrativeError> {
        let pending = self.pending.as_ref().ok_or(NarrativeError::NoPendingReveal)?;
        if pending.ticket != ticket {
            return Err(NarrativeError::StaleReveal(ticket.0));
        }
        self.pending = None;

        if self.current_question + 1 < questions.len() {
            self.current_question += 1;
            return Ok(QuizTransition::NextQuestion(self.current_question));
        }

        self.finished = true;
        let stats = score_traits(questions, &self.answers);
        tracing::info!(answers = ?self.answers, "Quiz finished");
        Ok(QuizTransition::Finished(stats))
    }

    /// Return to the previous question. The earlier answer is replaced when
    /// that question is answered again.
    pub fn go_back(&mut self) -> Result<BackNavigation, NarrativeError> {
        if self.finished {
            return Err(NarrativeError::AlreadyCompleted);
        }
        if self.pending.is_some() {
            return Err(NarrativeError::RevealInProgress);
        }
        if self.current_question == 0 {
            return Ok(BackNavigation::AtStart);
        }
        self.current_question -= 1;
        Ok(BackNavigation::Question(self.current_question))
    }

    pub fn current_question(&self) -> usize {
        self.current_question
    }

    pub fn answers(&self) -> &[usize] {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn pending_feedback(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.feedback.as_str())
    }

    pub fn pending_ticket(&self) -> Option<RevealTicket> {
        self.pending.as_ref().map(|p| p.ticket)
    }

    /// Feedback during a reveal, otherwise the current prompt.
    pub fn current_text<'a>(&'a self, questions: &'a [Question]) -> Option<&'a str> {
        if let Some(feedback) = self.pending_feedback() {
            return Some(feedback);
        }
        if self.finished {
            return None;
        }
        questions
            .get(self.current_question)
            .map(|q| q.prompt.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmic_rules::{AnswerOption, Catalog};

    fn questions() -> Vec<Question> {
        Catalog::reference()
            .expect("reference catalog is valid")
            .questions()
            .to_vec()
    }

    fn answer_and_reveal(
        runner: &mut QuizRunner,
        questions: &[Question],
        option: usize,
    ) -> QuizTransition {
        let outcome = runner
            .choose_answer(questions, option)
            .expect("answer accepted");
        runner
            .finish_reveal(questions, outcome.ticket)
            .expect("reveal accepted")
    }

    #[test]
    fn test_full_quiz_scores_every_answer() {
        let questions = questions();
        let mut runner = QuizRunner::new();

        // sarcasm 3, cosmic luck 4, absurdity 4, time warping 4
        assert_eq!(answer_and_reveal(&mut runner, &questions, 2), QuizTransition::NextQuestion(1));
        assert_eq!(answer_and_reveal(&mut runner, &questions, 2), QuizTransition::NextQuestion(2));
        assert_eq!(answer_and_reveal(&mut runner, &questions, 0), QuizTransition::NextQuestion(3));
        let last = answer_and_reveal(&mut runner, &questions, 2);

        let QuizTransition::Finished(stats) = last else {
            panic!("expected the quiz to finish, got {:?}", last);
        };
        assert_eq!(stats.sarcasm_level, 80);
        assert_eq!(stats.cosmic_luck, 100);
        assert_eq!(stats.absurdity_resistance, 100);
        assert_eq!(stats.time_warping, 100);
        assert_eq!(stats.quantum_charisma, 20);
        assert!(runner.is_finished());
        assert_eq!(runner.answers(), &[2, 2, 0, 2]);
    }

    #[test]
    fn test_feedback_shown_during_reveal() {
        let questions = questions();
        let mut runner = QuizRunner::new();

        assert_eq!(runner.current_text(&questions), Some(questions[0].prompt.as_str()));

        let outcome = runner.choose_answer(&questions, 3).expect("answer accepted");
        assert_eq!(outcome.points, 80);
        assert_eq!(outcome.notice, "+80 Cosmic Luck!");
        assert_eq!(runner.current_text(&questions), Some(questions[0].options[3].feedback.as_str()));

        assert_eq!(
            runner.choose_answer(&questions, 0),
            Err(NarrativeError::RevealInProgress)
        );
        assert_eq!(runner.answers(), &[3]);
    }

    #[test]
    fn test_out_of_range_answer_rejected() {
        let questions = questions();
        let mut runner = QuizRunner::new();

        assert_eq!(
            runner.choose_answer(&questions, 4),
            Err(NarrativeError::OutOfRangeSelection { index: 4, available: 4 })
        );
        assert!(runner.answers().is_empty());
        assert!(runner.pending_ticket().is_none());
    }

    #[test]
    fn test_go_back_replaces_answer() {
        let questions = questions();
        let mut runner = QuizRunner::new();

        assert_eq!(runner.go_back(), Ok(BackNavigation::AtStart));

        answer_and_reveal(&mut runner, &questions, 0);
        assert_eq!(runner.go_back(), Ok(BackNavigation::Question(0)));

        answer_and_reveal(&mut runner, &questions, 3);
        assert_eq!(runner.answers(), &[3]);
        assert_eq!(runner.current_question(), 1);
    }

    #[test]
    fn test_go_back_rejected_during_reveal() {
        let questions = questions();
        let mut runner = QuizRunner::new();

        answer_and_reveal(&mut runner, &questions, 0);
        runner.choose_answer(&questions, 1).expect("answer accepted");

        assert_eq!(runner.go_back(), Err(NarrativeError::RevealInProgress));
        assert_eq!(runner.current_question(), 1);
    }

    #[test]
    fn test_finished_quiz_rejects_input() {
        let questions = vec![Question {
            prompt: "Only one".to_string(),
            options: vec![AnswerOption {
                label: "Yes".to_string(),
                icon: None,
                stat: StatType::TimeWarping,
                weight: 1,
                feedback: "Done.".to_string(),
            }],
        }];
        let mut runner = QuizRunner::new();

        assert_eq!(
            answer_and_reveal(&mut runner, &questions, 0),
            QuizTransition::Finished(StatVector {
                time_warping: 40,
                ..StatVector::baseline()
            })
        );
        assert_eq!(
            runner.choose_answer(&questions, 0),
            Err(NarrativeError::AlreadyCompleted)
        );
        assert_eq!(runner.go_back(), Err(NarrativeError::AlreadyCompleted));
        assert!(runner.current_text(&questions).is_none());
    }

    #[test]
    fn test_stale_ticket_rejected() {
        let questions = questions();
        let mut runner = QuizRunner::new();
        let outcome = runner.choose_answer(&questions, 0).expect("answer accepted");

        assert_eq!(
            runner.finish_reveal(&questions, RevealTicket(outcome.ticket.0 + 5)),
            Err(NarrativeError::StaleReveal(outcome.ticket.0 + 5))
        );
        assert_eq!(runner.current_question(), 0);
    }
}
