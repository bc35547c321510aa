//! Personality quiz definitions and trait scoring.

use serde::{Deserialize, Serialize};

use crate::entities::{StatType, StatVector};

/// Points awarded per unit of answer weight.
pub const POINTS_PER_WEIGHT: u32 = 20;

/// Allowed answer weights.
pub const WEIGHT_RANGE: std::ops::RangeInclusive<u32> = 1..=4;

/// One quiz prompt with its ordered answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<AnswerOption>,
}

/// A selectable quiz answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub stat: StatType,
    pub weight: u32,
    /// Shown during the reveal window after the answer is picked.
    pub feedback: String,
}

impl AnswerOption {
    /// Points this answer adds to its stat.
    pub fn points(&self) -> u32 {
        self.weight.saturating_mul(POINTS_PER_WEIGHT)
    }

    /// Notification text announcing the gain.
    pub fn notice(&self) -> String {
        gain_notice(self.stat, self.points())
    }
}

/// Announcement for `points` added to `stat`, e.g. `+60 Cosmic Luck!`.
pub fn gain_notice(stat: StatType, points: u32) -> String {
    format!("+{} {}!", points, stat)
}

/// Turn quiz selections into a stat vector.
///
/// Every dimension starts at [`StatVector::BASELINE`]. Each selection adds
/// `weight * 20` to its stat, capped at [`StatVector::SOFT_CAP`].
/// Selections are matched to questions by position; an index outside its
/// question's options is skipped.
pub fn score_traits(questions: &[Question], selections: &[usize]) -> StatVector {
    let mut stats = StatVector::baseline();

    for (question_index, (question, &selection)) in questions.iter().zip(selections).enumerate() {
        match question.options.get(selection) {
            Some(option) => {
                stats.add_capped(option.stat, option.points());
            }
            None => {
                tracing::warn!(
                    question = question_index,
                    selection,
                    options = question.options.len(),
                    "Skipping out-of-range quiz selection"
                );
            }
        }
    }

    stats
}
