use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Technologies offered on the selector page.
pub const TECHNOLOGIES: [&str; 10] = [
    "Python",
    "SQL",
    "Pandas",
    "Machine Learning",
    "Data Preprocessing",
    "Exploratory Data Analysis",
    "Prompt Engineering",
    "Docker",
    "Git and GitHub",
    "Model Deployment",
];

/// Difficulty levels a technology can be taken at.
pub const LEVELS: [u8; 3] = [1, 2, 3];

/// Question counts the selector offers.
pub const QUESTION_COUNT_OPTIONS: [u32; 5] = [1, 2, 3, 4, 5];

/// Default question count preselected on the selector.
pub const DEFAULT_QUESTION_COUNT: u32 = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("level must be between 1 and 3, got {0}")]
    InvalidLevel(u8),

    #[error("at least one technology must be selected")]
    EmptySelection,

    #[error("question count {0} is not offered")]
    InvalidQuestionCount(u32),
}

/// One technology/level pair chosen on the selector. Immutable once staged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnologyLevel {
    pub technology: String,
    pub level: u8,
}

impl TechnologyLevel {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidLevel` if the level is outside 1–3.
    pub fn new(technology: impl Into<String>, level: u8) -> Result<Self, ConfigError> {
        if !LEVELS.contains(&level) {
            return Err(ConfigError::InvalidLevel(level));
        }
        Ok(Self {
            technology: technology.into(),
            level,
        })
    }
}

/// Staged exam configuration, created by the selector and consumed exactly
/// once by the exam runner.
///
/// Serialized camelCase so the staged payload matches the original client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamConfig {
    pub technologies: Vec<TechnologyLevel>,
    pub question_count: u32,
}

impl ExamConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::EmptySelection` if no technologies were chosen and
    /// `ConfigError::InvalidQuestionCount` for a count outside the offered set.
    pub fn new(
        technologies: Vec<TechnologyLevel>,
        question_count: u32,
    ) -> Result<Self, ConfigError> {
        if technologies.is_empty() {
            return Err(ConfigError::EmptySelection);
        }
        if !QUESTION_COUNT_OPTIONS.contains(&question_count) {
            return Err(ConfigError::InvalidQuestionCount(question_count));
        }
        Ok(Self {
            technologies,
            question_count,
        })
    }
}
