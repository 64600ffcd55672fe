use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "biz-match")]
#[command(about = "AIビジネスマッチング ワークフロークライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// バックエンドのURL（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// CSVをアップロードして分析から結果表示まで実行
    Run {
        /// 企業データCSVファイル
        #[arg(required = true)]
        file: PathBuf,

        /// マッチング先企業名（省略時は対話入力）
        #[arg(long)]
        company_name: Option<String>,

        /// マッチング先企業の業種（省略時は対話入力）
        #[arg(long)]
        industry: Option<String>,

        /// マッチング先企業の事業内容（省略時は対話入力）
        #[arg(long)]
        description: Option<String>,
    },

    /// バックエンドのセッションデータを削除
    Cleanup {
        /// セッションID
        #[arg(required = true)]
        session_id: String,
    },

    /// 設定を表示/編集
    Config {
        /// バックエンドのURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
