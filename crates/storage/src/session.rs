use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use exam_core::model::{ExamConfig, ExamPhase, ExamState};

use crate::store::SessionStore;

/// Storage keys shared with the original client. State and config are JSON;
/// phase and answer are raw strings.
pub mod keys {
    pub const EXAM_STATE: &str = "examState";
    pub const EXAM_PHASE: &str = "examPhase";
    pub const USER_ANSWER: &str = "userAnswer";
    pub const EXAM_CONFIG: &str = "examConfig";
}

/// Errors surfaced by the typed session layer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("staged exam configuration is corrupt: {0}")]
    CorruptConfig(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Typed access to the four persisted exam keys.
///
/// Every exam mutation goes through here so reloads can resume mid-exam; the
/// store itself stays a dumb string map.
#[derive(Clone)]
pub struct ExamSession {
    store: Arc<dyn SessionStore>,
}

impl ExamSession {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// Returns `SessionError::Serialization` if the state cannot be encoded.
    pub fn save_state(&self, state: &ExamState) -> Result<(), SessionError> {
        let json = serde_json::to_string(state)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;
        self.store.set(keys::EXAM_STATE, &json);
        Ok(())
    }

    /// Restores a persisted exam state, or `None` when absent or corrupt.
    ///
    /// Applies the legacy-lesson migration: a question whose `lesson` field is
    /// a bare string predates the structured record and is normalized to
    /// absent before deserializing.
    #[must_use]
    pub fn load_state(&self) -> Option<ExamState> {
        let raw = self.store.get(keys::EXAM_STATE)?;
        let mut value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("discarding corrupt exam state: {err}");
                return None;
            }
        };
        migrate_legacy_lessons(&mut value);
        let state: ExamState = match serde_json::from_value(value) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("discarding unreadable exam state: {err}");
                return None;
            }
        };
        if let Err(err) = state.validate() {
            log::warn!("discarding invalid exam state: {err}");
            return None;
        }
        Some(state)
    }

    pub fn save_phase(&self, phase: ExamPhase) {
        self.store.set(keys::EXAM_PHASE, phase.as_str());
    }

    /// Restores the persisted phase, defaulting to `Welcome`.
    #[must_use]
    pub fn load_phase(&self) -> ExamPhase {
        self.store
            .get(keys::EXAM_PHASE)
            .and_then(|raw| ExamPhase::parse(&raw))
            .unwrap_or(ExamPhase::Welcome)
    }

    pub fn save_answer(&self, answer: &str) {
        self.store.set(keys::USER_ANSWER, answer);
    }

    #[must_use]
    pub fn load_answer(&self) -> String {
        self.store.get(keys::USER_ANSWER).unwrap_or_default()
    }

    /// # Errors
    ///
    /// Returns `SessionError::Serialization` if the config cannot be encoded.
    pub fn stage_config(&self, config: &ExamConfig) -> Result<(), SessionError> {
        let json = serde_json::to_string(config)
            .map_err(|e| SessionError::Serialization(e.to_string()))?;
        self.store.set(keys::EXAM_CONFIG, &json);
        Ok(())
    }

    /// Consumes the staged configuration: the key is removed whether or not it
    /// parses, so a config is only ever used once.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::CorruptConfig` when a staged value exists but is
    /// not valid JSON for an `ExamConfig`.
    pub fn take_config(&self) -> Result<Option<ExamConfig>, SessionError> {
        let Some(raw) = self.store.get(keys::EXAM_CONFIG) else {
            return Ok(None);
        };
        self.store.remove(keys::EXAM_CONFIG);
        match serde_json::from_str(&raw) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                log::warn!("discarding corrupt staged config: {err}");
                Err(SessionError::CorruptConfig(err.to_string()))
            }
        }
    }

    /// Removes all four persisted exam keys.
    pub fn clear_exam(&self) {
        self.store.remove(keys::EXAM_STATE);
        self.store.remove(keys::EXAM_PHASE);
        self.store.remove(keys::USER_ANSWER);
        self.store.remove(keys::EXAM_CONFIG);
    }
}

/// Older clients persisted `lesson` as one Markdown string; the contract is a
/// structured record, so bare strings restore as absent.
fn migrate_legacy_lessons(state: &mut Value) {
    let Some(questions) = state.get_mut("questions").and_then(Value::as_array_mut) else {
        return;
    };
    for question in questions {
        if question.get("lesson").is_some_and(Value::is_string) {
            question["lesson"] = Value::Null;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use exam_core::model::{ExamPhase, ExamQuestion, ExamState};
    use exam_core::time::fixed_now;

    use super::{keys, ExamSession, SessionError};
    use crate::store::{InMemoryStore, SessionStore};

    fn session() -> (ExamSession, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        (ExamSession::new(store.clone()), store)
    }

    fn question(number: u32) -> ExamQuestion {
        ExamQuestion {
            question_number: number,
            technology: "SQL".into(),
            level: 1,
            question: "What is a join?".into(),
            answer: None,
            scoring: None,
            comment: None,
            lesson: None,
        }
    }

    #[test]
    fn state_round_trips() {
        let (session, _) = session();
        let state = ExamState::new(vec![question(1)], fixed_now()).unwrap();
        session.save_state(&state).unwrap();
        assert_eq!(session.load_state().unwrap(), state);
    }

    #[test]
    fn corrupt_state_restores_as_absent() {
        let (session, store) = session();
        store.set(keys::EXAM_STATE, "{not json");
        assert!(session.load_state().is_none());
    }

    #[test]
    fn out_of_range_index_restores_as_absent() {
        let (session, store) = session();
        let mut state = ExamState::new(vec![question(1)], fixed_now()).unwrap();
        state.current_question_index = 9;
        store.set(keys::EXAM_STATE, &serde_json::to_string(&state).unwrap());
        assert!(session.load_state().is_none());
    }

    #[test]
    fn legacy_string_lesson_is_normalized_to_absent() {
        let (session, store) = session();
        let mut json =
            serde_json::to_value(ExamState::new(vec![question(1)], fixed_now()).unwrap()).unwrap();
        json["questions"][0]["lesson"] = serde_json::Value::String("old markdown blob".into());
        store.set(keys::EXAM_STATE, &json.to_string());

        let restored = session.load_state().unwrap();
        assert!(restored.questions[0].lesson.is_none());
    }

    #[test]
    fn structured_lesson_passes_through_unchanged() {
        let (session, store) = session();
        let mut state = ExamState::new(vec![question(1)], fixed_now()).unwrap();
        state.record_lesson(exam_core::model::LessonData {
            explanation: "e".into(),
            key_concepts: vec!["k".into()],
            example: "x".into(),
            summary: "s".into(),
        });
        store.set(keys::EXAM_STATE, &serde_json::to_string(&state).unwrap());

        let restored = session.load_state().unwrap();
        assert_eq!(restored.questions[0].lesson, state.questions[0].lesson);
    }

    #[test]
    fn phase_defaults_to_welcome() {
        let (session, store) = session();
        assert_eq!(session.load_phase(), ExamPhase::Welcome);
        store.set(keys::EXAM_PHASE, "checked");
        assert_eq!(session.load_phase(), ExamPhase::Checked);
        store.set(keys::EXAM_PHASE, "garbage");
        assert_eq!(session.load_phase(), ExamPhase::Welcome);
    }

    #[test]
    fn take_config_consumes_the_key() {
        let (session, store) = session();
        let config = exam_core::model::ExamConfig::new(
            vec![exam_core::model::TechnologyLevel::new("Python", 2).unwrap()],
            1,
        )
        .unwrap();
        session.stage_config(&config).unwrap();
        assert_eq!(session.take_config().unwrap(), Some(config));
        assert_eq!(session.take_config().unwrap(), None);
        assert!(store.get(keys::EXAM_CONFIG).is_none());
    }

    #[test]
    fn corrupt_config_errors_and_is_removed() {
        let (session, store) = session();
        store.set(keys::EXAM_CONFIG, "{oops");
        assert!(matches!(
            session.take_config(),
            Err(SessionError::CorruptConfig(_))
        ));
        assert!(store.get(keys::EXAM_CONFIG).is_none());
    }

    #[test]
    fn clear_exam_removes_all_keys() {
        let (session, store) = session();
        store.set(keys::EXAM_STATE, "{}");
        store.set(keys::EXAM_PHASE, "question");
        store.set(keys::USER_ANSWER, "draft");
        store.set(keys::EXAM_CONFIG, "{}");
        session.clear_exam();
        for key in [
            keys::EXAM_STATE,
            keys::EXAM_PHASE,
            keys::USER_ANSWER,
            keys::EXAM_CONFIG,
        ] {
            assert!(store.get(key).is_none(), "{key} should be cleared");
        }
    }
}
