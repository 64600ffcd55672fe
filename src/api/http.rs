//! reqwestによるバックエンド実装

use super::{Backend, UploadOutcome};
use crate::error::{Result, WorkflowError};
use async_trait::async_trait;
use biz_match_common::{
    parse_envelope, AnalyzePayload, CleanupPayload, MatchAnalysis, MatchResult, ResultsPayload,
    SessionId, SessionRequest, UploadPayload, UploadRequest,
};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use tracing::debug;

pub const UPLOAD_PATH: &str = "/api/upload_and_match";
pub const ANALYZE_PATH: &str = "/api/analyze_matching";
pub const RESULTS_PATH: &str = "/api/matching_results";
pub const CLEANUP_PATH: &str = "/api/cleanup_session";

/// HTTPバックエンド
///
/// タイムアウトは設定しない。応答が返らない限りフェーズは進まない。
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_session<T: DeserializeOwned>(&self, path: &str, session: &SessionId) -> Result<T> {
        let url = self.endpoint(path);
        debug!(%url, %session, "POST");

        let response = self
            .client
            .post(&url)
            .json(&SessionRequest { session_id: session })
            .send()
            .await
            .map_err(transport)?;

        decode(response).await
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn upload_and_match(&self, request: &UploadRequest) -> Result<UploadOutcome> {
        let url = self.endpoint(UPLOAD_PATH);
        debug!(%url, file = %request.file.name, bytes = request.file.size(), "POST multipart");

        let file_part = Part::bytes(request.file.bytes.clone())
            .file_name(request.file.name.clone())
            .mime_str("text/csv")
            .map_err(transport)?;

        let form = Form::new()
            .part("file", file_part)
            .text("target_company_name", request.target_company_name.clone())
            .text("target_industry", request.target_industry.clone())
            .text(
                "target_business_description",
                request.target_business_description.clone(),
            );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        let payload: UploadPayload = decode(response).await?;
        Ok(UploadOutcome {
            session_id: payload.session_id,
            summary: payload.data,
        })
    }

    async fn analyze_matching(&self, session: &SessionId) -> Result<MatchAnalysis> {
        let payload: AnalyzePayload = self.post_session(ANALYZE_PATH, session).await?;
        Ok(payload.data)
    }

    async fn matching_results(&self, session: &SessionId) -> Result<MatchResult> {
        let payload: ResultsPayload = self.post_session(RESULTS_PATH, session).await?;
        Ok(payload.results)
    }

    async fn cleanup_session(&self, session: &SessionId) -> Result<String> {
        let payload: CleanupPayload = self.post_session(CLEANUP_PATH, session).await?;
        Ok(payload.message)
    }
}

fn transport(e: reqwest::Error) -> WorkflowError {
    WorkflowError::Transport(e.to_string())
}

/// HTTPステータスに関係なく本文を封筒としてデコード
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    debug!(%status, bytes = body.len(), "レスポンス受信");

    let envelope =
        parse_envelope::<T>(&body).map_err(|e| WorkflowError::Transport(e.to_string()))?;

    envelope.into_result().map_err(|message| match message {
        Some(message) => WorkflowError::Backend(message),
        None => WorkflowError::Transport(format!("エラーメッセージのない応答 (HTTP {})", status)),
    })
}
