pub mod error;

pub use error::*;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 設定ファイルを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "STACKFLOW_CONFIG_PATH";
/// スタック名を上書きする環境変数
pub const STACK_NAME_ENV: &str = "STACKFLOW_STACK_NAME";
/// リージョンを上書きする環境変数
pub const REGION_ENV: &str = "STACKFLOW_REGION";

const CANDIDATES: [&str; 2] = ["stackflow.yaml", ".stackflow.yaml"];

/// StackFlow の設定
///
/// すべての項目は任意。未指定の項目は CLI フラグか組み込みの既定値で埋まる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StackflowConfig {
    pub stack_name: Option<String>,
    pub region: Option<String>,
    pub poll_interval_secs: Option<u64>,
}

impl StackflowConfig {
    /// 設定ファイルを探して読み込み、環境変数の上書きを適用する
    ///
    /// 設定ファイルが見つからない場合は既定値を返す。
    pub fn load() -> Result<Self> {
        let config = match find_config_file()? {
            Some(path) => Self::load_from_path(&path)?,
            None => {
                tracing::debug!("No config file found, using defaults");
                Self::default()
            }
        };
        Ok(config.with_env_overrides())
    }

    /// 指定パスの YAML を読み込む (環境変数は適用しない)
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // 空ファイルはすべて未指定として扱う
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == Some(0) {
            return Err(ConfigError::InvalidPollInterval);
        }
        Ok(())
    }

    /// `STACKFLOW_STACK_NAME` / `STACKFLOW_REGION` で上書きする
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(name) = non_empty_env(STACK_NAME_ENV) {
            self.stack_name = Some(name);
        }
        if let Some(region) = non_empty_env(REGION_ENV) {
            self.region = Some(region);
        }
        self
    }

    pub fn poll_interval(&self) -> Option<Duration> {
        self.poll_interval_secs.map(Duration::from_secs)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// 設定ファイルを探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 STACKFLOW_CONFIG_PATH (直接パス指定。存在しなければエラー)
/// 2. カレントディレクトリ: stackflow.yaml, .stackflow.yaml
/// 3. ~/.config/stackflow/config.yaml (グローバル設定)
pub fn find_config_file() -> Result<Option<PathBuf>> {
    if let Some(config_path) = non_empty_env(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.is_file() {
            return Ok(Some(path));
        }
        return Err(ConfigError::NotFound(path));
    }

    let current_dir = std::env::current_dir()?;
    Ok(search(&current_dir, dirs::config_dir().as_deref()))
}

fn search(current_dir: &Path, config_dir: Option<&Path>) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|filename| current_dir.join(filename))
        .chain(config_dir.map(|dir| dir.join("stackflow").join("config.yaml")))
        .find(|path| path.is_file())
}
