//! 共有エラーバナー
//!
//! 新しいエラーは前のメッセージを置き換える。表示と同時にアップロード欄を
//! 一定時間強調し、スクロールして見える位置に出す。強調の解除は最後に
//! 出たエラーのタイマーだけが行う。

use super::WorkflowController;

impl WorkflowController {
    pub(super) fn show_error(&self, message: &str) {
        let epoch = {
            let mut state = self.state();
            state.highlight_epoch += 1;
            state.last_error = Some(message.to_string());
            state.highlight_epoch
        };

        self.view.set_error(Some(message));
        self.view.set_upload_highlight(true);
        self.view.scroll_error_into_view();

        let this = self.clone();
        let window = self.timing.highlight;
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let latest = this.state().highlight_epoch == epoch;
            if latest {
                this.view.set_upload_highlight(false);
            }
        });
    }

    pub(super) fn hide_error(&self) {
        self.state().last_error = None;
        self.view.set_error(None);
        self.view.set_upload_highlight(false);
    }
}
