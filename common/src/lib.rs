//! Business Matching Common Library
//!
//! CLIと将来のWebフロントエンドで共有される型とユーティリティ

pub mod types;
pub mod error;
pub mod parser;
pub mod validation;

pub use types::{
    AnalysisPanel, CompanyProfile, CompanySummary, MatchAnalysis, MatchResult, MatchingScore,
    PastCase, SelectedFile, SessionId, UploadRequest,
};
pub use error::{Error, Result};
pub use parser::{
    parse_envelope, AnalyzePayload, CleanupPayload, Envelope, ResultsPayload, SessionRequest,
    UploadPayload,
};
pub use validation::{UploadForm, ValidationError};
