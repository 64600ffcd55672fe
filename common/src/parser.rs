//! APIレスポンスパーサー
//!
//! バックエンドは全エンドポイントで `status` フィールド付きの封筒を返す:
//! - `{"status": "success", ...}` 成功時のペイロード
//! - `{"status": "error", "message": "..."}` 失敗時
//!
//! HTTPステータスに関係なく本文を封筒としてパースする

use crate::error::{Error, Result};
use crate::types::{CompanySummary, MatchAnalysis, MatchResult, SessionId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// レスポンス封筒
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success(T),
    Error {
        #[serde(default)]
        message: Option<String>,
    },
}

impl<T> Envelope<T> {
    /// 成功ならペイロード、失敗ならバックエンドのメッセージ（無い場合はNone）
    pub fn into_result(self) -> std::result::Result<T, Option<String>> {
        match self {
            Envelope::Success(payload) => Ok(payload),
            Envelope::Error { message } => Err(message.filter(|m| !m.is_empty())),
        }
    }
}

/// `POST /api/upload_and_match` の成功ペイロード
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadPayload {
    pub session_id: SessionId,
    #[serde(default)]
    pub data: CompanySummary,
}

/// `POST /api/analyze_matching` の成功ペイロード
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyzePayload {
    #[serde(default)]
    pub data: MatchAnalysis,
}

/// `POST /api/matching_results` の成功ペイロード
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultsPayload {
    #[serde(default)]
    pub results: MatchResult,
}

/// `POST /api/cleanup_session` の成功ペイロード
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CleanupPayload {
    #[serde(default)]
    pub message: String,
}

/// セッションIDだけを送るJSONリクエスト本文
#[derive(Debug, Clone, Serialize)]
pub struct SessionRequest<'a> {
    pub session_id: &'a SessionId,
}

/// レスポンス本文を封筒としてパース
///
/// # Arguments
/// * `body` - レスポンス本文
///
/// # Returns
/// * `Ok(Envelope<T>)` - `status` が success/error のいずれか
/// * `Err` - JSONでない、`status` が不明、または成功ペイロードの形が不正
///
/// # Examples
/// ```
/// use biz_match_common::{parse_envelope, AnalyzePayload, Envelope};
///
/// let body = r#"{"status": "error", "message": "セッションが無効です。"}"#;
/// let envelope: Envelope<AnalyzePayload> = parse_envelope(body).unwrap();
/// assert!(matches!(envelope, Envelope::Error { .. }));
/// ```
pub fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<Envelope<T>> {
    serde_json::from_str(body.trim())
        .map_err(|e| Error::Parse(format!("レスポンスJSONパースエラー: {}", e)))
}
