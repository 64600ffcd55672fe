use biz_match_agent::{api, cli, config, error, upload, view, workflow};
use api::{Backend, HttpBackend};
use biz_match_common::{SessionId, UploadForm};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use dialoguer::Input;
use error::{Result, WorkflowError};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use view::TerminalView;
use workflow::WorkflowController;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load()?;
    if let Some(server) = &cli.server {
        config.server_url = server.trim_end_matches('/').to_string();
    }

    match cli.command {
        Commands::Run { file, company_name, industry, description } => {
            println!("🤝 biz-match - ビジネスマッチング\n");

            let selected = upload::load_file(&file)?;
            let file_name = selected.name.clone();

            let form = UploadForm {
                file: Some(selected),
                target_company_name: value_or_prompt(company_name, "マッチング先企業名")?,
                target_industry: value_or_prompt(industry, "マッチング先企業の業種")?,
                target_business_description: value_or_prompt(description, "マッチング先企業の事業内容")?,
            };

            let backend = Arc::new(HttpBackend::new(config.server_url.as_str()));
            let view = Arc::new(TerminalView::new(form));
            let controller = WorkflowController::new(backend, view, config.timing());

            controller.select_file(&file_name);
            let run = controller.submit_upload().await?;
            run.wait().await?;

            match controller.snapshot().session {
                Some(session) => println!("\n✅ 完了（セッションID: {}）", session),
                None => println!("\n✅ 完了"),
            }
        }

        Commands::Cleanup { session_id } => {
            let backend = HttpBackend::new(config.server_url.as_str());
            let message = backend.cleanup_session(&SessionId::new(session_id)).await?;
            println!("✔ {}", message);
        }

        Commands::Config { set_server, show } => {
            let mut config = config;

            if let Some(url) = set_server {
                config.set_server_url(url)?;
                println!("✔ サーバーURLを設定しました");
            }

            if show {
                println!("設定:");
                println!("  サーバーURL: {}", config.server_url);
                println!("  進捗間隔: {}ms", config.tick_interval_ms);
                println!("  結果取得までの待ち: {}ms", config.results_delay_ms);
                println!("  エラー強調表示: {}ms", config.highlight_ms);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// 引数で渡されなかった項目は対話入力（空でも受け付け、検証はフォーム側）
fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| WorkflowError::Prompt(e.to_string()))
}
