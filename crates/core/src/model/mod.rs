pub mod config;
pub mod exam;
pub mod phase;
pub mod summary;

pub use config::{
    ConfigError, ExamConfig, TechnologyLevel, DEFAULT_QUESTION_COUNT, LEVELS,
    QUESTION_COUNT_OPTIONS, TECHNOLOGIES,
};
pub use exam::{ExamMetadata, ExamQuestion, ExamState, ExamStateError, LessonData};
pub use phase::ExamPhase;
pub use summary::ExamSummary;
