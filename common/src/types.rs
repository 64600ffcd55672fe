//! マッチングワークフローの型定義
//!
//! バックエンドとの送受信で使う型:
//! - SessionId: アップロード成功時に払い出されるセッション識別子
//! - UploadRequest: 検証済みのアップロード内容
//! - CompanySummary: アップロード直後に表示する2社の概要
//! - MatchAnalysis: 分析フェーズの6項目
//! - MatchResult: 最終結果（企業情報・スコア・過去事例・戦略）

use serde::{Deserialize, Serialize};
use std::fmt;

/// セッション識別子（中身は解釈しない）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 選択されたファイル
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// 最後の `.` 以降を小文字化した拡張子（`.` が無ければ名前全体）
    pub fn extension(&self) -> String {
        self.name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// 検証済みアップロード内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: SelectedFile,
    pub target_company_name: String,
    pub target_industry: String,
    pub target_business_description: String,
}

/// アップロード成功時の企業概要
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanySummary {
    pub company_a_name: String,
    pub company_a_industry: String,
    pub company_b_name: String,
    pub company_b_industry: String,
}

/// 分析パネル
///
/// 進捗率がしきい値に達した時点で表示される。並び順は表示順。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisPanel {
    SearchQuery,
    IndustryAnalysis,
    CaseReference,
    DataAnalysis,
    MatchingPatterns,
    CandidateSelection,
}

impl AnalysisPanel {
    pub const ALL: [AnalysisPanel; 6] = [
        AnalysisPanel::SearchQuery,
        AnalysisPanel::IndustryAnalysis,
        AnalysisPanel::CaseReference,
        AnalysisPanel::DataAnalysis,
        AnalysisPanel::MatchingPatterns,
        AnalysisPanel::CandidateSelection,
    ];

    /// 表示される進捗率（%）
    pub fn reveal_threshold(&self) -> u8 {
        match self {
            AnalysisPanel::SearchQuery => 20,
            AnalysisPanel::IndustryAnalysis => 35,
            AnalysisPanel::CaseReference => 50,
            AnalysisPanel::DataAnalysis => 65,
            AnalysisPanel::MatchingPatterns => 80,
            AnalysisPanel::CandidateSelection => 90,
        }
    }

    /// 指定した進捗率で表示されるパネル
    pub fn revealed_at(percent: u8) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|panel| panel.reveal_threshold() == percent)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisPanel::SearchQuery => "検索クエリ生成",
            AnalysisPanel::IndustryAnalysis => "業界分析",
            AnalysisPanel::CaseReference => "過去事例参照",
            AnalysisPanel::DataAnalysis => "データ分析",
            AnalysisPanel::MatchingPatterns => "マッチングパターン検出",
            AnalysisPanel::CandidateSelection => "候補選定",
        }
    }
}

/// 分析フェーズの結果（6項目、内容は解釈しない）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchAnalysis {
    pub search_query: String,
    pub industry_analysis: String,
    pub case_reference: String,
    pub data_analysis: String,
    pub matching_patterns: String,
    pub candidate_selection: String,
}

impl MatchAnalysis {
    pub fn text(&self, panel: AnalysisPanel) -> &str {
        match panel {
            AnalysisPanel::SearchQuery => &self.search_query,
            AnalysisPanel::IndustryAnalysis => &self.industry_analysis,
            AnalysisPanel::CaseReference => &self.case_reference,
            AnalysisPanel::DataAnalysis => &self.data_analysis,
            AnalysisPanel::MatchingPatterns => &self.matching_patterns,
            AnalysisPanel::CandidateSelection => &self.candidate_selection,
        }
    }
}

/// 結果画面の企業情報
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub name: String,
    pub industry: String,
    pub description: String,
}

/// マッチングスコア（数値・文字列のどちらも受け付ける）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchingScore {
    Number(serde_json::Number),
    Text(String),
}

impl Default for MatchingScore {
    fn default() -> Self {
        MatchingScore::Text(String::new())
    }
}

impl fmt::Display for MatchingScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchingScore::Number(n) => write!(f, "{}", n),
            MatchingScore::Text(s) => f.write_str(s),
        }
    }
}

/// 過去の成功事例
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PastCase {
    pub title: String,
    pub date: String,
    pub description: String,
    pub roi: String,
}

impl PastCase {
    pub fn roi_label(&self) -> String {
        format!("ROI: {}", self.roi)
    }
}

/// マッチング結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchResult {
    pub company_a: CompanyProfile,
    pub company_b: CompanyProfile,
    pub matching_score: MatchingScore,
    pub matching_details: String,
    /// `null` 要素はスキップされる
    pub past_cases: Vec<Option<PastCase>>,
    pub strategies: Vec<String>,
}
