use crate::error::{Result, WorkflowError};
use crate::workflow::Timing;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const SERVER_ENV: &str = "BIZ_MATCH_SERVER";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub tick_interval_ms: u64,
    pub results_delay_ms: u64,
    pub highlight_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            tick_interval_ms: 100,   // 1%あたり
            results_delay_ms: 1000,  // 100%到達から結果取得まで
            highlight_ms: 3000,      // エラー時の強調表示
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            serde_json::from_str::<Config>(&content)?
        } else {
            Self::default()
        };

        // 環境変数を優先
        if let Ok(url) = std::env::var(SERVER_ENV) {
            if !url.trim().is_empty() {
                config.server_url = url.trim().to_string();
            }
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| WorkflowError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("biz-match").join("config.json"))
    }

    pub fn set_server_url(&mut self, url: String) -> Result<()> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(WorkflowError::Config(format!(
                "サーバーURLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.server_url = url.trim_end_matches('/').to_string();
        self.save()
    }

    pub fn timing(&self) -> Timing {
        Timing {
            tick: Duration::from_millis(self.tick_interval_ms.max(1)),
            results_delay: Duration::from_millis(self.results_delay_ms),
            highlight: Duration::from_millis(self.highlight_ms),
        }
    }
}
