//! 画面バインディング
//!
//! コントローラは表示先を直接触らず、このトレイトの名前付きセッター/ゲッターだけを使う。
//! 実装は `&self` で受けるため内部可変性で状態を持つ。

mod terminal;

pub use terminal::TerminalView;

use biz_match_common::{AnalysisPanel, CompanyProfile, CompanySummary, PastCase, UploadForm};
use std::fmt;

/// 画面（同時に表示されるのは1つ）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Upload,
    Analysis,
    Results,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Upload => write!(f, "upload"),
            Screen::Analysis => write!(f, "analysis"),
            Screen::Results => write!(f, "results"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanySlot {
    A,
    B,
}

/// 過去事例の表示枠（2枠）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseSlot {
    First,
    Second,
}

impl CaseSlot {
    pub const ALL: [CaseSlot; 2] = [CaseSlot::First, CaseSlot::Second];
}

pub trait MatchView: Send + Sync {
    /// 入力中のフォームを読み取る
    fn read_form(&self) -> UploadForm;

    fn show_screen(&self, screen: Screen);
    fn show_selected_file(&self, name: Option<&str>);

    fn set_company_summary(&self, summary: &CompanySummary);

    fn set_progress(&self, percent: u8);
    fn reveal_panel(&self, panel: AnalysisPanel);
    fn set_panel_text(&self, panel: AnalysisPanel, text: &str);

    fn set_company(&self, slot: CompanySlot, company: &CompanyProfile);
    fn set_matching_score(&self, score: &str);
    fn set_matching_details(&self, details: &str);
    fn set_past_case(&self, slot: CaseSlot, case: &PastCase);
    fn clear_strategies(&self);
    fn append_strategy(&self, strategy: &str);

    /// エラーバナー（Noneで非表示）
    fn set_error(&self, message: Option<&str>);
    fn set_upload_highlight(&self, on: bool);
    fn scroll_error_into_view(&self);

    /// 全表示を初期状態に戻し、アップロード画面を表示する
    fn reset(&self);
}
