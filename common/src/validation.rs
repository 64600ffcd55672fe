//! アップロードフォームの検証
//!
//! ネットワーク呼び出し前にクライアント側で行うチェック。
//! 最初に失敗した項目のメッセージだけを返す。

use crate::types::{SelectedFile, UploadRequest};
use thiserror::Error;

/// クライアント側検証エラー
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("CSVファイルを選択してください。")]
    MissingFile,

    #[error("マッチング先企業名を入力してください。")]
    MissingCompanyName,

    #[error("マッチング先企業の業種を入力してください。")]
    MissingIndustry,

    #[error("マッチング先企業の事業内容を入力してください。")]
    MissingBusinessDescription,

    #[error("CSVファイル形式のみ対応しています。別のファイルを選択してください。")]
    NotCsv,

    #[error("ファイルが空です。有効なCSVファイルを選択してください。")]
    EmptyFile,
}

/// 画面から読み取った未検証のフォーム
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub file: Option<SelectedFile>,
    pub target_company_name: String,
    pub target_industry: String,
    pub target_business_description: String,
}

impl UploadForm {
    /// フォームを検証し、トリム済みのリクエストを作る
    ///
    /// 判定順: ファイル選択 → 企業名 → 業種 → 事業内容 → 拡張子 → サイズ
    pub fn validate(&self) -> Result<UploadRequest, ValidationError> {
        let file = self.file.as_ref().ok_or(ValidationError::MissingFile)?;

        let name = required(&self.target_company_name, ValidationError::MissingCompanyName)?;
        let industry = required(&self.target_industry, ValidationError::MissingIndustry)?;
        let description = required(
            &self.target_business_description,
            ValidationError::MissingBusinessDescription,
        )?;

        if file.extension() != "csv" {
            return Err(ValidationError::NotCsv);
        }

        if file.size() == 0 {
            return Err(ValidationError::EmptyFile);
        }

        Ok(UploadRequest {
            file: file.clone(),
            target_company_name: name.to_string(),
            target_industry: industry.to_string(),
            target_business_description: description.to_string(),
        })
    }
}

fn required(value: &str, missing: ValidationError) -> Result<&str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(missing)
    } else {
        Ok(trimmed)
    }
}
