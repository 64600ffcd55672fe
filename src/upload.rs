//! アップロードするCSVファイルの読み込み

use crate::error::{Result, WorkflowError};
use biz_match_common::SelectedFile;
use std::path::Path;

/// ファイルを読み込み、ファイル名をアップロード名にする
///
/// 拡張子やサイズはここでは見ない（フォーム検証で判定する）
pub fn load_file(path: &Path) -> Result<SelectedFile> {
    if !path.is_file() {
        return Err(WorkflowError::FileNotFound(path.display().to_string()));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let bytes = std::fs::read(path)?;

    Ok(SelectedFile::new(name, bytes))
}
