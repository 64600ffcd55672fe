//! バックエンドAPI
//!
//! マッチング計算そのものは外部バックエンドが行う。
//! コントローラはこのトレイト越しに3つのエンドポイントだけを呼ぶ。

mod http;

pub use http::HttpBackend;

use crate::error::Result;
use async_trait::async_trait;
use biz_match_common::{CompanySummary, MatchAnalysis, MatchResult, SessionId, UploadRequest};

/// アップロード成功時の戻り値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub session_id: SessionId,
    pub summary: CompanySummary,
}

/// マッチングバックエンド
///
/// 失敗は `WorkflowError::Backend`（`status: "error"`）か
/// `WorkflowError::Transport`（通信失敗・不正なレスポンス）で返す。
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST /api/upload_and_match`
    async fn upload_and_match(&self, request: &UploadRequest) -> Result<UploadOutcome>;

    /// `POST /api/analyze_matching`
    async fn analyze_matching(&self, session: &SessionId) -> Result<MatchAnalysis>;

    /// `POST /api/matching_results`
    async fn matching_results(&self, session: &SessionId) -> Result<MatchResult>;

    /// `POST /api/cleanup_session`
    async fn cleanup_session(&self, session: &SessionId) -> Result<String>;
}
