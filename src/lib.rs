//! AIビジネスマッチング ワークフロークライアント
//!
//! アップロード → 分析 → 結果表示 の3フェーズを外部バックエンドに対して進める。

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod upload;
pub mod view;
pub mod workflow;
