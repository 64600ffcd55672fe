//! 進捗アニメーション
//!
//! 一定間隔で0%から100%まで1ずつ進め、しきい値でパネルを表示する。
//! 分析リクエストの完了は待たない。100%到達後、一定時間おいて結果を取得する。

use super::WorkflowController;
use crate::error::{Result, WorkflowError};
use biz_match_common::AnalysisPanel;
use tracing::debug;

impl WorkflowController {
    pub(super) async fn run_progress(self, generation: u64) -> Result<()> {
        let mut ticker = tokio::time::interval(self.timing.tick);
        // 最初のtickは即時
        ticker.tick().await;

        for percent in 1..=100u8 {
            ticker.tick().await;
            if !self.is_current(generation) {
                return Ok(());
            }

            self.view.set_progress(percent);
            if let Some(panel) = AnalysisPanel::revealed_at(percent) {
                debug!(panel = panel.label(), percent, "パネル表示");
                self.view.reveal_panel(panel);
            }
        }

        debug!("進捗100%、結果取得を予約");
        tokio::time::sleep(self.timing.results_delay).await;
        if !self.is_current(generation) {
            return Ok(());
        }

        match self.fetch_results().await {
            Ok(_) | Err(WorkflowError::Superseded) => Ok(()),
            Err(e) => Err(e),
        }
    }
}
