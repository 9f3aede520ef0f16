#![forbid(unsafe_code)]

pub mod api;
pub mod error;
pub mod exam_flow;

pub use exam_core::Clock;

pub use api::{
    CheckRequest, CheckResponse, ExamApi, GuardianRequest, GuardianResponse, HttpExamApi,
    LessonRequest, SummaryQuestion, SummaryRequest, WelcomeRequest, WelcomeResponse, API_TIMEOUT,
};
pub use error::{ApiError, ExamFlowError};
pub use exam_flow::{AdvanceOutcome, ExamFlow};
