use serde::{Deserialize, Serialize};

/// Narrative summary generated once at exam completion.
///
/// Display-only: never persisted, lost on navigating away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamSummary {
    pub summary: String,
    pub average_score: f64,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub recommendations: Vec<String>,
}
