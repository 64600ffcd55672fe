//! テスト用のバックエンドと画面
//!
//! どちらも同じタイムラインに記録するので、リクエストと表示の順序を検証できる。

#![allow(dead_code)]

use async_trait::async_trait;
use biz_match_agent::api::{Backend, UploadOutcome};
use biz_match_agent::error::{Result, WorkflowError};
use biz_match_agent::view::{CaseSlot, CompanySlot, MatchView, Screen};
use biz_match_agent::workflow::{Timing, WorkflowController};
use biz_match_common::{
    AnalysisPanel, CompanyProfile, CompanySummary, MatchAnalysis, MatchResult, MatchingScore,
    PastCase, SelectedFile, SessionId, UploadForm, UploadRequest,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    UploadRequest(UploadRequest),
    AnalyzeRequest(SessionId),
    ResultsRequest(SessionId),
    Screen(Screen),
    Progress(u8),
    Reveal(AnalysisPanel),
    PanelText(AnalysisPanel),
    Strategy(String),
    ClearStrategies,
    Error(Option<String>),
    Highlight(bool),
    Reset,
}

pub type Timeline = Arc<Mutex<Vec<Event>>>;

fn push(timeline: &Timeline, event: Event) {
    timeline.lock().unwrap().push(event);
}

/// バックエンドの応答
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Success(T),
    BackendError(String),
    TransportError,
    /// 応答しない
    Hang,
}

async fn respond<T>(reply: Reply<T>, delay: Duration) -> Result<T> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    match reply {
        Reply::Success(value) => Ok(value),
        Reply::BackendError(message) => Err(WorkflowError::Backend(message)),
        Reply::TransportError => Err(WorkflowError::Transport("connection refused".into())),
        Reply::Hang => std::future::pending::<Result<T>>().await,
    }
}

pub struct MockBackend {
    timeline: Timeline,
    pub upload: Mutex<Reply<UploadOutcome>>,
    pub analyze: Mutex<Reply<MatchAnalysis>>,
    pub analyze_delay: Mutex<Duration>,
    pub results: Mutex<Reply<MatchResult>>,
}

impl MockBackend {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            timeline,
            upload: Mutex::new(Reply::Success(sample_upload())),
            analyze: Mutex::new(Reply::Success(sample_analysis())),
            analyze_delay: Mutex::new(Duration::from_millis(500)),
            results: Mutex::new(Reply::Success(sample_result())),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn upload_and_match(&self, request: &UploadRequest) -> Result<UploadOutcome> {
        push(&self.timeline, Event::UploadRequest(request.clone()));
        let reply = self.upload.lock().unwrap().clone();
        respond(reply, Duration::from_millis(200)).await
    }

    async fn analyze_matching(&self, session: &SessionId) -> Result<MatchAnalysis> {
        push(&self.timeline, Event::AnalyzeRequest(session.clone()));
        let reply = self.analyze.lock().unwrap().clone();
        let delay = *self.analyze_delay.lock().unwrap();
        respond(reply, delay).await
    }

    async fn matching_results(&self, session: &SessionId) -> Result<MatchResult> {
        push(&self.timeline, Event::ResultsRequest(session.clone()));
        let reply = self.results.lock().unwrap().clone();
        respond(reply, Duration::from_millis(300)).await
    }

    async fn cleanup_session(&self, _session: &SessionId) -> Result<String> {
        Ok("セッションデータがクリーンアップされました。".into())
    }
}

/// 画面の現在の表示内容
#[derive(Debug, Clone, Default)]
pub struct Display {
    pub screen: Option<Screen>,
    pub selected_file: Option<String>,
    pub summary: Option<CompanySummary>,
    pub progress: Option<u8>,
    pub revealed: Vec<AnalysisPanel>,
    pub panel_texts: HashMap<AnalysisPanel, String>,
    pub company_a: Option<CompanyProfile>,
    pub company_b: Option<CompanyProfile>,
    pub score: Option<String>,
    pub details: Option<String>,
    pub cases: [Option<PastCase>; 2],
    pub strategies: Vec<String>,
    pub error: Option<String>,
    pub highlight: bool,
    pub scrolls: usize,
    pub resets: usize,
}

pub struct RecordingView {
    timeline: Timeline,
    form: Mutex<UploadForm>,
    display: Mutex<Display>,
}

impl RecordingView {
    pub fn new(timeline: Timeline, form: UploadForm) -> Self {
        Self {
            timeline,
            form: Mutex::new(form),
            display: Mutex::new(Display::default()),
        }
    }

    pub fn display(&self) -> Display {
        self.display.lock().unwrap().clone()
    }

    pub fn set_form(&self, form: UploadForm) {
        *self.form.lock().unwrap() = form;
    }

    fn update(&self, event: Option<Event>, f: impl FnOnce(&mut Display)) {
        f(&mut self.display.lock().unwrap());
        if let Some(event) = event {
            push(&self.timeline, event);
        }
    }
}

impl MatchView for RecordingView {
    fn read_form(&self) -> UploadForm {
        self.form.lock().unwrap().clone()
    }

    fn show_screen(&self, screen: Screen) {
        self.update(Some(Event::Screen(screen)), |d| d.screen = Some(screen));
    }

    fn show_selected_file(&self, name: Option<&str>) {
        self.update(None, |d| d.selected_file = name.map(str::to_string));
    }

    fn set_company_summary(&self, summary: &CompanySummary) {
        self.update(None, |d| d.summary = Some(summary.clone()));
    }

    fn set_progress(&self, percent: u8) {
        self.update(Some(Event::Progress(percent)), |d| d.progress = Some(percent));
    }

    fn reveal_panel(&self, panel: AnalysisPanel) {
        self.update(Some(Event::Reveal(panel)), |d| d.revealed.push(panel));
    }

    fn set_panel_text(&self, panel: AnalysisPanel, text: &str) {
        self.update(Some(Event::PanelText(panel)), |d| {
            d.panel_texts.insert(panel, text.to_string());
        });
    }

    fn set_company(&self, slot: CompanySlot, company: &CompanyProfile) {
        self.update(None, |d| match slot {
            CompanySlot::A => d.company_a = Some(company.clone()),
            CompanySlot::B => d.company_b = Some(company.clone()),
        });
    }

    fn set_matching_score(&self, score: &str) {
        self.update(None, |d| d.score = Some(score.to_string()));
    }

    fn set_matching_details(&self, details: &str) {
        self.update(None, |d| d.details = Some(details.to_string()));
    }

    fn set_past_case(&self, slot: CaseSlot, case: &PastCase) {
        let index = match slot {
            CaseSlot::First => 0,
            CaseSlot::Second => 1,
        };
        self.update(None, |d| d.cases[index] = Some(case.clone()));
    }

    fn clear_strategies(&self) {
        self.update(Some(Event::ClearStrategies), |d| d.strategies.clear());
    }

    fn append_strategy(&self, strategy: &str) {
        self.update(Some(Event::Strategy(strategy.to_string())), |d| {
            d.strategies.push(strategy.to_string())
        });
    }

    fn set_error(&self, message: Option<&str>) {
        let message = message.map(str::to_string);
        self.update(Some(Event::Error(message.clone())), |d| d.error = message);
    }

    fn set_upload_highlight(&self, on: bool) {
        self.update(Some(Event::Highlight(on)), |d| d.highlight = on);
    }

    fn scroll_error_into_view(&self) {
        self.update(None, |d| d.scrolls += 1);
    }

    fn reset(&self) {
        self.update(Some(Event::Reset), |d| {
            let resets = d.resets + 1;
            *d = Display {
                screen: Some(Screen::Upload),
                resets,
                ..Display::default()
            };
        });
    }
}

pub struct Harness {
    pub controller: WorkflowController,
    pub backend: Arc<MockBackend>,
    pub view: Arc<RecordingView>,
    pub timeline: Timeline,
}

impl Harness {
    pub fn new(form: UploadForm) -> Self {
        let timeline: Timeline = Arc::new(Mutex::new(Vec::new()));
        let backend = Arc::new(MockBackend::new(timeline.clone()));
        let view = Arc::new(RecordingView::new(timeline.clone(), form));
        let controller = WorkflowController::new(backend.clone(), view.clone(), Timing::default());
        Self {
            controller,
            backend,
            view,
            timeline,
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.timeline.lock().unwrap().clone()
    }

    pub fn requests(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| {
                matches!(
                    e,
                    Event::UploadRequest(_) | Event::AnalyzeRequest(_) | Event::ResultsRequest(_)
                )
            })
            .collect()
    }

    pub fn progress_values(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Progress(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn position(&self, event: &Event) -> Option<usize> {
        self.events().iter().position(|e| e == event)
    }
}

pub fn valid_form() -> UploadForm {
    UploadForm {
        file: Some(SelectedFile::new(
            "companies.csv",
            "company_name,industry,business_description\nA社,養蜂業,国産はちみつの生産・卸売\n"
                .as_bytes()
                .to_vec(),
        )),
        target_company_name: "札幌コスメティック".into(),
        target_industry: "化粧品メーカー".into(),
        target_business_description: "天然素材を使用した製品開発に強み".into(),
    }
}

pub fn sample_upload() -> UploadOutcome {
    UploadOutcome {
        session_id: SessionId::new("abc123"),
        summary: CompanySummary {
            company_a_name: "A社".into(),
            company_a_industry: "養蜂業".into(),
            company_b_name: "札幌コスメティック".into(),
            company_b_industry: "化粧品メーカー".into(),
        },
    }
}

pub fn sample_analysis() -> MatchAnalysis {
    MatchAnalysis {
        search_query: "養蜂業と化粧品メーカーの協業可能性".into(),
        industry_analysis: "業界特性を比較し相互補完性を分析".into(),
        case_reference: "類似業種間の成功事例を参照".into(),
        data_analysis: "両社のビジネスデータを分析".into(),
        matching_patterns: "協業パターンを検出".into(),
        candidate_selection: "HyDEとRAGでマッチング度合いを評価".into(),
    }
}

pub fn sample_case(title: &str, roi: &str) -> PastCase {
    PastCase {
        title: title.into(),
        date: "2023年4月".into(),
        description: "異業種間の戦略的提携".into(),
        roi: roi.into(),
    }
}

pub fn sample_result() -> MatchResult {
    MatchResult {
        company_a: CompanyProfile {
            name: "A社".into(),
            industry: "養蜂業".into(),
            description: "国産はちみつの生産・卸売".into(),
        },
        company_b: CompanyProfile {
            name: "札幌コスメティック".into(),
            industry: "化粧品メーカー".into(),
            description: "蜂蜜エキスを含む化粧品ラインが人気".into(),
        },
        matching_score: MatchingScore::Number(87.into()),
        matching_details: "原材料供給と製品開発で相互補完".into(),
        past_cases: vec![
            Some(sample_case("異業種間の戦略的提携による新商品開発", "150%")),
            Some(sample_case("地域企業間の協業による観光振興", "130%")),
        ],
        strategies: vec![
            "はちみつ配合の共同ブランド化粧品を開発".into(),
            "直販ルートの相互活用".into(),
            "地域観光と連動した体験型販売".into(),
        ],
    }
}
