//! マッチングワークフローのコントローラ
//!
//! `Idle → Uploading → AwaitingAnalysis → AnalysisInProgress → ResultsReady`
//!
//! - アップロード成功で分析を自動開始する
//! - 分析中は進捗アニメーションと分析リクエストが独立したタスクとして走る
//! - 進捗100%の後に結果を取得する
//! - 分析の失敗だけが初期画面へのロールバックを伴う

mod banner;
mod progress;
mod state;

pub use state::{Phase, Timing, WorkflowSnapshot};

use crate::api::Backend;
use crate::error::{Result, WorkflowError};
use crate::view::{CaseSlot, CompanySlot, MatchView, Screen};
use biz_match_common::{AnalysisPanel, MatchResult, SessionId};
use state::WorkflowState;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::{JoinError, JoinHandle};
use tracing::{info, warn};

pub const UPLOAD_FALLBACK: &str =
    "ファイルのアップロード中にエラーが発生しました。もう一度お試しください。";
pub const ANALYSIS_FALLBACK: &str =
    "分析プロセス中にエラーが発生しました。もう一度お試しください。";
pub const RESULTS_FALLBACK: &str =
    "結果の取得中にエラーが発生しました。もう一度お試しください。";

#[derive(Clone)]
pub struct WorkflowController {
    backend: Arc<dyn Backend>,
    view: Arc<dyn MatchView>,
    state: Arc<Mutex<WorkflowState>>,
    timing: Timing,
}

impl WorkflowController {
    pub fn new(backend: Arc<dyn Backend>, view: Arc<dyn MatchView>, timing: Timing) -> Self {
        Self {
            backend,
            view,
            state: Arc::new(Mutex::new(WorkflowState::default())),
            timing,
        }
    }

    fn state(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state().generation == generation
    }

    pub fn snapshot(&self) -> WorkflowSnapshot {
        WorkflowSnapshot::from(&*self.state())
    }

    /// ファイル選択: エラー表示を消してファイル名を表示
    pub fn select_file(&self, name: &str) {
        self.hide_error();
        self.view.show_selected_file(Some(name));
    }

    pub fn clear_file(&self) {
        self.view.show_selected_file(None);
    }

    /// フォームを検証してアップロードし、成功したら分析を開始する
    pub async fn submit_upload(&self) -> Result<AnalysisRun> {
        let phase = self.state().phase;
        if phase != Phase::Idle {
            return Err(WorkflowError::PhaseOrder {
                expected: Phase::Idle,
                actual: phase,
            });
        }

        let request = match self.view.read_form().validate() {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "入力検証エラー");
                self.show_error(&e.to_string());
                return Err(e.into());
            }
        };

        let generation = {
            let mut state = self.state();
            if state.phase != Phase::Idle {
                return Err(WorkflowError::PhaseOrder {
                    expected: Phase::Idle,
                    actual: state.phase,
                });
            }
            state.phase = Phase::Uploading;
            state.generation
        };
        info!(file = %request.file.name, "アップロード開始");

        let outcome = self.backend.upload_and_match(&request).await;

        {
            let mut state = self.state();
            if state.generation != generation {
                return Err(WorkflowError::Superseded);
            }
            match &outcome {
                Ok(outcome) => {
                    state.session = Some(outcome.session_id.clone());
                    state.phase = Phase::AwaitingAnalysis;
                }
                Err(_) => state.phase = Phase::Idle,
            }
        }

        match outcome {
            Ok(outcome) => {
                info!(session = %outcome.session_id, "アップロード完了");
                self.hide_error();
                self.view.set_company_summary(&outcome.summary);
                self.view.show_screen(Screen::Analysis);
                Ok(self.start_analysis(outcome.session_id, generation))
            }
            Err(e) => {
                warn!(error = %e, "アップロード失敗");
                self.show_error(&e.banner_message(UPLOAD_FALLBACK));
                Err(e)
            }
        }
    }

    /// 進捗アニメーションと分析リクエストを別タスクで開始
    fn start_analysis(&self, session: SessionId, generation: u64) -> AnalysisRun {
        self.state().phase = Phase::AnalysisInProgress;
        self.view.set_progress(0);

        let animation = tokio::spawn(self.clone().run_progress(generation));
        self.state().animation = Some(animation.abort_handle());
        let analysis = tokio::spawn(self.clone().run_analysis(session, generation));

        AnalysisRun {
            animation,
            analysis,
        }
    }

    async fn run_analysis(self, session: SessionId, generation: u64) -> Result<()> {
        let outcome = self.backend.analyze_matching(&session).await;

        match outcome {
            Ok(analysis) => {
                if !self.is_current(generation) {
                    return Ok(());
                }
                // パネルの表示状態とは無関係に本文を書き込む
                for panel in AnalysisPanel::ALL {
                    self.view.set_panel_text(panel, analysis.text(panel));
                }
                info!(%session, "分析結果を受信");
                Ok(())
            }
            Err(e) => {
                {
                    let mut state = self.state();
                    if state.generation != generation {
                        return Ok(());
                    }
                    state.cancel_animation();
                    state.generation += 1;
                    state.phase = Phase::Idle;
                    state.session = None;
                }
                warn!(error = %e, %session, "分析失敗、初期画面に戻ります");
                self.show_error(&e.banner_message(ANALYSIS_FALLBACK));
                self.view.show_screen(Screen::Upload);
                Err(e)
            }
        }
    }

    /// 結果を取得して表示する
    ///
    /// 失敗しても画面とフェーズはそのまま（分析失敗時と異なりロールバックしない）
    pub async fn fetch_results(&self) -> Result<MatchResult> {
        let (session, generation) = {
            let state = self.state();
            match state.phase {
                Phase::AnalysisInProgress | Phase::ResultsReady => {}
                actual => {
                    return Err(WorkflowError::PhaseOrder {
                        expected: Phase::AnalysisInProgress,
                        actual,
                    })
                }
            }
            let session = state.session.clone().ok_or(WorkflowError::NoSession)?;
            (session, state.generation)
        };

        let outcome = self.backend.matching_results(&session).await;

        {
            let mut state = self.state();
            if state.generation != generation {
                return Err(WorkflowError::Superseded);
            }
            if outcome.is_ok() {
                state.phase = Phase::ResultsReady;
            }
        }

        match outcome {
            Ok(result) => {
                info!(%session, score = %result.matching_score, "マッチング結果を表示");
                self.render_results(&result);
                Ok(result)
            }
            Err(e) => {
                warn!(error = %e, %session, "結果取得失敗");
                self.show_error(&e.banner_message(RESULTS_FALLBACK));
                Err(e)
            }
        }
    }

    fn render_results(&self, result: &MatchResult) {
        self.view.show_screen(Screen::Results);

        self.view.set_company(CompanySlot::A, &result.company_a);
        self.view.set_company(CompanySlot::B, &result.company_b);

        self.view.set_matching_score(&result.matching_score.to_string());
        self.view.set_matching_details(&result.matching_details);

        // 3件目以降は表示枠がない。nullの枠は触らない
        for (slot, case) in CaseSlot::ALL.into_iter().zip(&result.past_cases) {
            if let Some(case) = case {
                self.view.set_past_case(slot, case);
            }
        }

        self.view.clear_strategies();
        for strategy in &result.strategies {
            self.view.append_strategy(strategy);
        }
    }

    /// 初期状態に戻す（セッションと表示内容をすべて破棄）
    pub fn reset(&self) {
        {
            let mut state = self.state();
            state.cancel_animation();
            let generation = state.generation + 1;
            let highlight_epoch = state.highlight_epoch;
            *state = WorkflowState {
                generation,
                highlight_epoch,
                ..WorkflowState::default()
            };
        }
        info!("ワークフローをリセット");
        self.view.reset();
    }
}

/// 分析フェーズで起動した2つのタスク
pub struct AnalysisRun {
    animation: JoinHandle<Result<()>>,
    analysis: JoinHandle<Result<()>>,
}

impl AnalysisRun {
    /// 両タスクの完了を待つ
    ///
    /// 分析リクエストが応答しない限り戻らない。
    /// 中断されたアニメーションは成功扱い。
    pub async fn wait(self) -> Result<()> {
        let analysis = join_outcome(self.analysis.await);
        let animation = join_outcome(self.animation.await);
        analysis.and(animation)
    }
}

fn join_outcome(joined: std::result::Result<Result<()>, JoinError>) -> Result<()> {
    match joined {
        Ok(result) => result,
        Err(e) if e.is_cancelled() => Ok(()),
        Err(e) => Err(WorkflowError::Task(e.to_string())),
    }
}
