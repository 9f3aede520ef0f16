use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExamStateError {
    #[error("an exam needs at least one question")]
    NoQuestions,

    #[error("question index {index} out of range for {len} questions")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("already at the last question")]
    AtLastQuestion,
}

/// Structured lesson generated for one answered question. All fields are
/// Markdown text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonData {
    pub explanation: String,
    pub key_concepts: Vec<String>,
    pub example: String,
    pub summary: String,
}

/// One exam question and everything the user produced for it so far.
///
/// `answer`, `scoring`, `comment` and `lesson` are filled progressively as the
/// user completes each step, never out of order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamQuestion {
    pub question_number: u32,
    pub technology: String,
    pub level: u8,
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub scoring: Option<u8>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub lesson: Option<LessonData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamMetadata {
    pub timestamp: DateTime<Utc>,
    pub total_questions: usize,
}

/// The full state of one in-progress exam.
///
/// Owned by the exam runner for the duration of one exam, persisted on every
/// mutation, discarded on completion or abandonment. The question list is
/// fixed-length once created; only per-question result fields and the current
/// index mutate. Serialized camelCase so persisted payloads match the
/// original client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamState {
    pub questions: Vec<ExamQuestion>,
    pub current_question_index: usize,
    pub metadata: ExamMetadata,
}

impl ExamState {
    /// Builds the state for a fresh exam positioned at the first question.
    ///
    /// # Errors
    ///
    /// Returns `ExamStateError::NoQuestions` for an empty question list.
    pub fn new(questions: Vec<ExamQuestion>, now: DateTime<Utc>) -> Result<Self, ExamStateError> {
        if questions.is_empty() {
            return Err(ExamStateError::NoQuestions);
        }
        let total_questions = questions.len();
        Ok(Self {
            questions,
            current_question_index: 0,
            metadata: ExamMetadata {
                timestamp: now,
                total_questions,
            },
        })
    }

    /// Checks the index invariant after restoring from storage.
    ///
    /// # Errors
    ///
    /// Returns `ExamStateError` if the restored payload violates it.
    pub fn validate(&self) -> Result<(), ExamStateError> {
        if self.questions.is_empty() {
            return Err(ExamStateError::NoQuestions);
        }
        if self.current_question_index >= self.questions.len() {
            return Err(ExamStateError::IndexOutOfRange {
                index: self.current_question_index,
                len: self.questions.len(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_question(&self) -> &ExamQuestion {
        &self.questions[self.current_question_index]
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_question_index + 1 == self.questions.len()
    }

    /// Moves to the next question.
    ///
    /// # Errors
    ///
    /// Returns `ExamStateError::AtLastQuestion` when there is no next question;
    /// callers decide completion via [`Self::is_last_question`] first.
    pub fn advance(&mut self) -> Result<(), ExamStateError> {
        if self.is_last_question() {
            return Err(ExamStateError::AtLastQuestion);
        }
        self.current_question_index += 1;
        Ok(())
    }

    /// Records the graded answer on the current question.
    pub fn record_result(&mut self, answer: String, scoring: u8, comment: String) {
        let question = &mut self.questions[self.current_question_index];
        question.answer = Some(answer);
        question.scoring = Some(scoring);
        question.comment = Some(comment);
    }

    /// Records the generated lesson on the current question.
    pub fn record_lesson(&mut self, lesson: LessonData) {
        self.questions[self.current_question_index].lesson = Some(lesson);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn question(number: u32) -> ExamQuestion {
        ExamQuestion {
            question_number: number,
            technology: "Python".into(),
            level: 2,
            question: format!("Question {number}?"),
            answer: None,
            scoring: None,
            comment: None,
            lesson: None,
        }
    }

    #[test]
    fn fresh_state_starts_at_first_question() {
        let state = ExamState::new(vec![question(1), question(2)], fixed_now()).unwrap();
        assert_eq!(state.current_question_index, 0);
        assert_eq!(state.metadata.total_questions, 2);
        assert!(!state.is_last_question());
    }

    #[test]
    fn empty_question_list_is_rejected() {
        assert_eq!(
            ExamState::new(Vec::new(), fixed_now()).unwrap_err(),
            ExamStateError::NoQuestions
        );
    }

    #[test]
    fn advance_stops_at_last_question() {
        let mut state = ExamState::new(vec![question(1), question(2)], fixed_now()).unwrap();
        state.advance().unwrap();
        assert!(state.is_last_question());
        assert_eq!(state.advance().unwrap_err(), ExamStateError::AtLastQuestion);
        assert_eq!(state.current_question_index, 1);
    }

    #[test]
    fn record_result_fills_current_question() {
        let mut state = ExamState::new(vec![question(1)], fixed_now()).unwrap();
        state.record_result("x".into(), 7, "ok".into());
        let current = state.current_question();
        assert_eq!(current.answer.as_deref(), Some("x"));
        assert_eq!(current.scoring, Some(7));
        assert_eq!(current.comment.as_deref(), Some("ok"));
        assert!(current.lesson.is_none());
    }

    #[test]
    fn validate_catches_out_of_range_index() {
        let mut state = ExamState::new(vec![question(1)], fixed_now()).unwrap();
        state.current_question_index = 3;
        assert_eq!(
            state.validate().unwrap_err(),
            ExamStateError::IndexOutOfRange { index: 3, len: 1 }
        );
    }

    #[test]
    fn persisted_payload_uses_camel_case() {
        let state = ExamState::new(vec![question(1)], fixed_now()).unwrap();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["currentQuestionIndex"], 0);
        assert_eq!(json["metadata"]["totalQuestions"], 1);
        assert_eq!(json["questions"][0]["question_number"], 1);
    }
}
