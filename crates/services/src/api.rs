use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use exam_core::model::{ExamQuestion, ExamSummary, LessonData, TechnologyLevel};

use crate::error::ApiError;

/// Every in-flight call is cancelled and reported as a timeout after this.
pub const API_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Serialize)]
pub struct WelcomeRequest {
    pub technologies: Vec<TechnologyLevel>,
    pub question_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WelcomeResponse {
    pub questions: Vec<ExamQuestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuardianRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuardianResponse {
    pub valid: bool,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckResponse {
    pub scoring: u8,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LessonRequest {
    pub question: String,
    pub answer: String,
    pub scoring: u8,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryQuestion {
    pub question: String,
    pub comment: String,
    pub scoring: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryRequest {
    pub questions: Vec<SummaryQuestion>,
}

/// The backend exam API: question generation, answer validation, scoring,
/// lesson and summary generation. One request/response turn per operation.
///
/// Behind a trait so the exam flow can be exercised against a scripted
/// backend in tests.
#[async_trait]
pub trait ExamApi: Send + Sync {
    async fn welcome(&self, request: &WelcomeRequest) -> Result<WelcomeResponse, ApiError>;
    async fn guardian(&self, request: &GuardianRequest) -> Result<GuardianResponse, ApiError>;
    async fn check(&self, request: &CheckRequest) -> Result<CheckResponse, ApiError>;
    async fn lesson(&self, request: &LessonRequest) -> Result<LessonData, ApiError>;
    async fn summary(&self, request: &SummaryRequest) -> Result<ExamSummary, ApiError>;
}

/// HTTP/JSON client for the exam backend. All calls are POST with a fixed
/// per-request timeout; non-2xx responses fail with the body as detail.
#[derive(Clone)]
pub struct HttpExamApi {
    client: Client,
    base_url: String,
}

impl HttpExamApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn post<Req, Res>(&self, path: &str, body: &Req) -> Result<Res, ApiError>
    where
        Req: Serialize + Sync,
        Res: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(url)
            .timeout(API_TIMEOUT)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ExamApi for HttpExamApi {
    async fn welcome(&self, request: &WelcomeRequest) -> Result<WelcomeResponse, ApiError> {
        self.post("/api/exam/welcome", request).await
    }

    async fn guardian(&self, request: &GuardianRequest) -> Result<GuardianResponse, ApiError> {
        self.post("/api/exam/guardian", request).await
    }

    async fn check(&self, request: &CheckRequest) -> Result<CheckResponse, ApiError> {
        self.post("/api/exam/check", request).await
    }

    async fn lesson(&self, request: &LessonRequest) -> Result<LessonData, ApiError> {
        self.post("/api/exam/lesson", request).await
    }

    async fn summary(&self, request: &SummaryRequest) -> Result<ExamSummary, ApiError> {
        self.post("/api/exam/summary", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let api = HttpExamApi::new("http://localhost:8000/");
        assert_eq!(api.base_url, "http://localhost:8000");
    }

    #[test]
    fn guardian_response_tolerates_missing_explanation() {
        let response: GuardianResponse = serde_json::from_str(r#"{"valid": true}"#).unwrap();
        assert!(response.valid);
        assert!(response.explanation.is_none());
    }

    #[test]
    fn welcome_questions_parse_without_result_fields() {
        let response: WelcomeResponse = serde_json::from_str(
            r#"{"questions": [{
                "question_number": 1,
                "technology": "Python",
                "level": 2,
                "question": "What is a generator?"
            }]}"#,
        )
        .unwrap();
        assert_eq!(response.questions.len(), 1);
        assert!(response.questions[0].answer.is_none());
        assert!(response.questions[0].lesson.is_none());
    }
}
