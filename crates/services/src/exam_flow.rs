use std::sync::Arc;

use exam_core::model::{ExamConfig, ExamPhase, ExamQuestion, ExamState, ExamSummary};
use exam_core::Clock;
use storage::ExamSession;

use crate::api::{
    CheckRequest, ExamApi, GuardianRequest, LessonRequest, SummaryQuestion, SummaryRequest,
    WelcomeRequest,
};
use crate::error::ExamFlowError;

/// Result of advancing past a checked or lesson phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    NextQuestion,
    Completed,
}

/// The exam runner's state machine.
///
/// Owns the exam state, the current phase and the in-progress answer; every
/// mutation is persisted through [`ExamSession`] so a reload resumes exactly
/// where the user left off. All operations are single-flight per user action;
/// the UI disables the triggering controls while one is outstanding.
pub struct ExamFlow {
    api: Arc<dyn ExamApi>,
    session: ExamSession,
    state: ExamState,
    phase: ExamPhase,
    answer: String,
    summary: Option<ExamSummary>,
}

impl std::fmt::Debug for ExamFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExamFlow")
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("answer", &self.answer)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

impl ExamFlow {
    /// Restores a previously persisted exam, bypassing the welcome request.
    ///
    /// Returns `None` when no resumable state exists (or it is corrupt, which
    /// restores as absent). The persisted phase is normalized so restored
    /// phase/data combinations stay legal.
    #[must_use]
    pub fn resume(api: Arc<dyn ExamApi>, session: ExamSession) -> Option<Self> {
        let state = session.load_state()?;
        let phase = normalize_restored_phase(&state, session.load_phase());
        let answer = session.load_answer();
        Some(Self {
            api,
            session,
            state,
            phase,
            answer,
            summary: None,
        })
    }

    /// Starts a fresh exam from a staged configuration via the welcome call.
    ///
    /// # Errors
    ///
    /// Returns `ExamFlowError::NoQuestions` when the backend returns an empty
    /// question list, or the underlying API/persistence error.
    pub async fn start(
        api: Arc<dyn ExamApi>,
        session: ExamSession,
        config: ExamConfig,
        clock: Clock,
    ) -> Result<Self, ExamFlowError> {
        let response = api
            .welcome(&WelcomeRequest {
                technologies: config.technologies,
                question_count: config.question_count,
            })
            .await?;
        if response.questions.is_empty() {
            return Err(ExamFlowError::NoQuestions);
        }

        let state = ExamState::new(response.questions, clock.now())?;
        session.save_state(&state)?;
        session.save_phase(ExamPhase::Question);
        session.save_answer("");

        Ok(Self {
            api,
            session,
            state,
            phase: ExamPhase::Question,
            answer: String::new(),
            summary: None,
        })
    }

    #[must_use]
    pub fn phase(&self) -> ExamPhase {
        self.phase
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn summary(&self) -> Option<&ExamSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn current_question(&self) -> &ExamQuestion {
        self.state.current_question()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.current_question_index
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.state.total_questions()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.state.is_last_question()
    }

    /// Updates the in-progress answer text and persists it.
    pub fn set_answer(&mut self, text: String) {
        self.answer = text;
        self.session.save_answer(&self.answer);
    }

    /// Validates and scores the current answer: guardian first, then check.
    ///
    /// # Errors
    ///
    /// Returns `ExamFlowError::EmptyAnswer` for a blank answer and
    /// `ExamFlowError::AnswerRejected` when the validator declines it; in both
    /// cases the phase stays `question` and no scoring call is spent. API
    /// failures also leave the phase and question untouched.
    pub async fn submit_answer(&mut self) -> Result<(), ExamFlowError> {
        if self.phase != ExamPhase::Question {
            return Err(ExamFlowError::PhaseMismatch);
        }
        if self.answer.trim().is_empty() {
            return Err(ExamFlowError::EmptyAnswer);
        }

        let question = self.state.current_question().question.clone();
        let verdict = self
            .api
            .guardian(&GuardianRequest {
                question: question.clone(),
                answer: self.answer.clone(),
            })
            .await?;
        if !verdict.valid {
            return Err(ExamFlowError::AnswerRejected {
                explanation: verdict.explanation,
            });
        }

        let graded = self
            .api
            .check(&CheckRequest {
                question,
                answer: self.answer.clone(),
            })
            .await?;

        self.state
            .record_result(self.answer.clone(), graded.scoring, graded.comment);
        self.session.save_state(&self.state)?;
        self.set_phase(ExamPhase::Checked);
        Ok(())
    }

    /// Requests a lesson for the current graded question.
    ///
    /// # Errors
    ///
    /// On failure the phase stays `checked` and the question is untouched.
    pub async fn load_lesson(&mut self) -> Result<(), ExamFlowError> {
        if self.phase != ExamPhase::Checked {
            return Err(ExamFlowError::PhaseMismatch);
        }

        let question = self.state.current_question();
        let lesson = self
            .api
            .lesson(&LessonRequest {
                question: question.question.clone(),
                answer: question.answer.clone().unwrap_or_default(),
                scoring: question.scoring.unwrap_or(0),
                comment: question.comment.clone().unwrap_or_default(),
            })
            .await?;

        self.state.record_lesson(lesson);
        self.session.save_state(&self.state)?;
        self.set_phase(ExamPhase::Lesson);
        Ok(())
    }

    /// Advances past the current question, from `checked` or `lesson` alike.
    ///
    /// On the last question this requests the summary instead; success reaches
    /// the terminal `summary` phase and clears every persisted exam key. On
    /// failure the phase is unchanged and retry is a repeated `advance`.
    /// Exclusive access keeps each call single-flight; the UI additionally
    /// disables the triggering button while one is outstanding.
    ///
    /// # Errors
    ///
    /// Returns the underlying API or persistence error.
    pub async fn advance(&mut self) -> Result<AdvanceOutcome, ExamFlowError> {
        if !matches!(self.phase, ExamPhase::Checked | ExamPhase::Lesson) {
            return Err(ExamFlowError::PhaseMismatch);
        }

        if self.state.is_last_question() {
            return self.finish().await;
        }

        self.state.advance()?;
        self.session.save_state(&self.state)?;
        self.set_answer(String::new());
        self.set_phase(ExamPhase::Question);
        Ok(AdvanceOutcome::NextQuestion)
    }

    /// Drops the exam and clears every persisted key (explicit abandonment).
    pub fn abandon(&self) {
        self.session.clear_exam();
    }

    async fn finish(&mut self) -> Result<AdvanceOutcome, ExamFlowError> {
        let request = SummaryRequest {
            questions: self
                .state
                .questions
                .iter()
                .map(|q| SummaryQuestion {
                    question: q.question.clone(),
                    comment: q.comment.clone().unwrap_or_default(),
                    scoring: q.scoring.unwrap_or(0),
                })
                .collect(),
        };
        let summary = match self.api.summary(&request).await {
            Ok(summary) => summary,
            Err(err) => {
                log::warn!("summary generation failed, exam kept for retry: {err}");
                return Err(err.into());
            }
        };
        self.summary = Some(summary);
        self.phase = ExamPhase::Summary;
        self.session.clear_exam();
        Ok(AdvanceOutcome::Completed)
    }

    fn set_phase(&mut self, phase: ExamPhase) {
        self.phase = phase;
        self.session.save_phase(phase);
    }
}

/// Persisted phases can disagree with the restored data (a cleared legacy
/// lesson, a summary that was never persisted). Fall back to the closest
/// phase the data can support.
fn normalize_restored_phase(state: &ExamState, phase: ExamPhase) -> ExamPhase {
    let current = state.current_question();
    match phase {
        ExamPhase::Welcome => ExamPhase::Question,
        ExamPhase::Question => ExamPhase::Question,
        ExamPhase::Checked | ExamPhase::Summary => {
            if current.scoring.is_some() {
                ExamPhase::Checked
            } else {
                ExamPhase::Question
            }
        }
        ExamPhase::Lesson => {
            if current.lesson.is_some() {
                ExamPhase::Lesson
            } else if current.scoring.is_some() {
                ExamPhase::Checked
            } else {
                ExamPhase::Question
            }
        }
    }
}
