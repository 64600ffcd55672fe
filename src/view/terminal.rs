//! ターミナル表示
//!
//! 分析画面はindicatifのプログレスバー、それ以外は標準出力に順に書き出す。

use super::{CaseSlot, CompanySlot, MatchView, Screen};
use biz_match_common::{AnalysisPanel, CompanyProfile, CompanySummary, PastCase, UploadForm};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct TerminalState {
    progress: Option<ProgressBar>,
    revealed: HashSet<AnalysisPanel>,
    panel_texts: HashMap<AnalysisPanel, String>,
    strategy_count: usize,
}

pub struct TerminalView {
    form: UploadForm,
    state: Mutex<TerminalState>,
}

impl TerminalView {
    pub fn new(form: UploadForm) -> Self {
        Self {
            form,
            state: Mutex::new(TerminalState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, TerminalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// プログレスバー表示中はその上に出力する
    fn line(&self, text: &str) {
        let state = self.state();
        match &state.progress {
            Some(bar) => bar.println(text),
            None => println!("{}", text),
        }
    }
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("  {bar:40.cyan/blue} {pos:>3}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
}

impl MatchView for TerminalView {
    fn read_form(&self) -> UploadForm {
        self.form.clone()
    }

    fn show_screen(&self, screen: Screen) {
        let mut state = self.state();
        if let Some(bar) = state.progress.take() {
            bar.finish_and_clear();
        }

        match screen {
            Screen::Upload => println!("\n[1/3] アップロード"),
            Screen::Analysis => {
                println!("\n[2/3] マッチング分析中...");
                let bar = ProgressBar::new(100);
                bar.set_style(progress_style());
                state.progress = Some(bar);
            }
            Screen::Results => println!("\n[3/3] マッチング結果"),
        }
    }

    fn show_selected_file(&self, name: Option<&str>) {
        if let Some(name) = name {
            self.line(&format!("📄 {}", name));
        }
    }

    fn set_company_summary(&self, summary: &CompanySummary) {
        self.line(&format!(
            "✔ {} ({}) × {} ({})",
            summary.company_a_name,
            summary.company_a_industry,
            summary.company_b_name,
            summary.company_b_industry
        ));
    }

    fn set_progress(&self, percent: u8) {
        if let Some(bar) = &self.state().progress {
            bar.set_position(u64::from(percent));
        }
    }

    fn reveal_panel(&self, panel: AnalysisPanel) {
        let text = {
            let mut state = self.state();
            state.revealed.insert(panel);
            if let Some(bar) = &state.progress {
                bar.set_message(panel.label());
            }
            state.panel_texts.get(&panel).cloned()
        };

        match text {
            Some(text) => self.line(&format!("▶ {}: {}", panel.label(), text)),
            None => self.line(&format!("▶ {}", panel.label())),
        }
    }

    fn set_panel_text(&self, panel: AnalysisPanel, text: &str) {
        let revealed = {
            let mut state = self.state();
            state.panel_texts.insert(panel, text.to_string());
            state.revealed.contains(&panel)
        };

        // 未表示のパネルは表示時にまとめて出す
        if revealed {
            self.line(&format!("  {}: {}", panel.label(), text));
        }
    }

    fn set_company(&self, slot: CompanySlot, company: &CompanyProfile) {
        let label = match slot {
            CompanySlot::A => "企業A",
            CompanySlot::B => "企業B",
        };
        self.line(&format!("{}: {}（{}）", label, company.name, company.industry));
        if !company.description.is_empty() {
            self.line(&format!("  {}", company.description));
        }
    }

    fn set_matching_score(&self, score: &str) {
        self.line(&format!("マッチングスコア: {}", score));
    }

    fn set_matching_details(&self, details: &str) {
        self.line(&format!("  {}", details));
    }

    fn set_past_case(&self, slot: CaseSlot, case: &PastCase) {
        let number = match slot {
            CaseSlot::First => 1,
            CaseSlot::Second => 2,
        };
        self.line(&format!("過去の成功事例{}: {}（{}）", number, case.title, case.date));
        self.line(&format!("  {}", case.description));
        self.line(&format!("  {}", case.roi_label()));
    }

    fn clear_strategies(&self) {
        self.state().strategy_count = 0;
        self.line("戦略提案:");
    }

    fn append_strategy(&self, strategy: &str) {
        let number = {
            let mut state = self.state();
            state.strategy_count += 1;
            state.strategy_count
        };
        self.line(&format!("  💡 {}. {}", number, strategy));
    }

    fn set_error(&self, message: Option<&str>) {
        if let Some(message) = message {
            let state = self.state();
            match &state.progress {
                Some(bar) => bar.suspend(|| eprintln!("✖ {}", message)),
                None => eprintln!("✖ {}", message),
            }
        }
    }

    fn set_upload_highlight(&self, on: bool) {
        tracing::debug!(on, "アップロード欄の強調表示");
    }

    fn scroll_error_into_view(&self) {}

    fn reset(&self) {
        let mut state = self.state();
        if let Some(bar) = state.progress.take() {
            bar.finish_and_clear();
        }
        *state = TerminalState::default();
    }
}
