// コマンド共通コンテキスト
//
// 設定ファイル読み込みとCLIフラグのマージをCLI層で集約する。

use crate::core::config::{resolve_config, ConfigFile, ConfigOverrides, DiffConfig};
use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use tracing::debug;

/// CLIコマンド共通の実行コンテキスト
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub project_path: PathBuf,
    /// 読み込んだ設定ファイル（存在しない場合は None）
    pub config_path: Option<PathBuf>,
    pub config: DiffConfig,
}

impl CommandContext {
    /// カレントディレクトリを基準にコンテキストを作成
    ///
    /// 設定ファイルが明示された場合は必須、それ以外は既定パスにあれば読み込む。
    pub fn load(
        project_path: PathBuf,
        custom_config_path: Option<PathBuf>,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let config_path = match custom_config_path {
            Some(path) => {
                let path = if path.is_absolute() {
                    path
                } else {
                    project_path.join(path)
                };
                if !path.exists() {
                    return Err(anyhow!("Config file not found: {:?}", path));
                }
                Some(path)
            }
            None => {
                let default_path = project_path.join(ConfigFile::DEFAULT_CONFIG_PATH);
                default_path.exists().then_some(default_path)
            }
        };

        let file = match &config_path {
            Some(path) => {
                debug!(config = %path.display(), "Loading config file");
                Some(ConfigFile::from_file(path).with_context(|| "Failed to read config file")?)
            }
            None => None,
        };

        let config = resolve_config(&project_path, file.as_ref(), overrides)?;
        debug!(?config, "Resolved configuration");

        Ok(Self {
            project_path,
            config_path,
            config,
        })
    }
}
