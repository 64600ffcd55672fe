use crate::workflow::Phase;
use biz_match_common::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("バックエンドエラー: {0}")]
    Backend(String),

    #[error("通信エラー: {0}")]
    Transport(String),

    #[error("フェーズ順序エラー: {expected} を期待しましたが現在は {actual} です")]
    PhaseOrder { expected: Phase, actual: Phase },

    #[error("セッションがありません。ファイルをアップロードしてください")]
    NoSession,

    #[error("リセットにより処理が破棄されました")]
    Superseded,

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("タスク実行エラー: {0}")]
    Task(String),
}

impl WorkflowError {
    /// エラーバナーに表示する文言
    ///
    /// 検証エラーとバックエンドのメッセージはそのまま、
    /// 通信エラーは呼び出し側のフェーズ別の定型文を使う
    pub fn banner_message(&self, fallback: &str) -> String {
        match self {
            WorkflowError::Validation(e) => e.to_string(),
            WorkflowError::Backend(message) => message.clone(),
            WorkflowError::Transport(_) => fallback.to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkflowError>;
