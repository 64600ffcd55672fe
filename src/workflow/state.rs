use biz_match_common::SessionId;
use std::fmt;
use std::time::Duration;
use tokio::task::AbortHandle;

/// ワークフローのフェーズ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    AwaitingAnalysis,
    AnalysisInProgress,
    ResultsReady,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "Idle"),
            Phase::Uploading => write!(f, "Uploading"),
            Phase::AwaitingAnalysis => write!(f, "AwaitingAnalysis"),
            Phase::AnalysisInProgress => write!(f, "AnalysisInProgress"),
            Phase::ResultsReady => write!(f, "ResultsReady"),
        }
    }
}

/// タイマー設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// 進捗1%ごとの間隔
    pub tick: Duration,
    /// 100%到達から結果取得までの待ち
    pub results_delay: Duration,
    /// エラー時にアップロード欄を強調する時間
    pub highlight: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
            results_delay: Duration::from_millis(1000),
            highlight: Duration::from_millis(3000),
        }
    }
}

/// コントローラと2つのタスクが共有する状態
///
/// `generation` はリセットと分析失敗時のロールバックで進む。
/// 取り込んだ世代が現在と異なるタスクは何も書き込まない。
#[derive(Debug, Default)]
pub(super) struct WorkflowState {
    pub(super) phase: Phase,
    pub(super) session: Option<SessionId>,
    pub(super) generation: u64,
    pub(super) highlight_epoch: u64,
    pub(super) last_error: Option<String>,
    pub(super) animation: Option<AbortHandle>,
}

impl WorkflowState {
    pub(super) fn cancel_animation(&mut self) {
        if let Some(handle) = self.animation.take() {
            handle.abort();
        }
    }
}

/// 状態のスナップショット
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSnapshot {
    pub phase: Phase,
    pub session: Option<SessionId>,
    pub last_error: Option<String>,
}

impl From<&WorkflowState> for WorkflowSnapshot {
    fn from(state: &WorkflowState) -> Self {
        Self {
            phase: state.phase,
            session: state.session.clone(),
            last_error: state.last_error.clone(),
        }
    }
}
