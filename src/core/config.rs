// 設定管理
//
// 設定ファイル（YAML形式）の読み込みと、CLIフラグとのマージを行います。
// 実行ごとに一度だけ構築される不変の DiffConfig を提供します。

use crate::core::error::{ConfigError, IoError};
use crate::core::naming;
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

/// 比較対象のインターフェース名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceNames {
    /// 属性宣言側の比較元（InterfaceA）
    pub interface_a: String,
    /// 属性宣言側の比較先（InterfaceB）
    pub interface_b: String,
    /// エンティティ側の基底型
    pub base_entity: String,
    /// エンティティ側の派生型
    pub derived_entity: String,
}

impl Default for InterfaceNames {
    fn default() -> Self {
        Self {
            interface_a: naming::DEFAULT_INTERFACE_A.to_string(),
            interface_b: naming::DEFAULT_INTERFACE_B.to_string(),
            base_entity: naming::DEFAULT_BASE_ENTITY.to_string(),
            derived_entity: naming::DEFAULT_DERIVED_ENTITY.to_string(),
        }
    }
}

impl InterfaceNames {
    /// 各名前が識別子として妥当か検証
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("interface_a", &self.interface_a),
            ("interface_b", &self.interface_b),
            ("base_entity", &self.base_entity),
            ("derived_entity", &self.derived_entity),
        ] {
            if !is_identifier(value) {
                return Err(ConfigError::InvalidInterfaceName {
                    field: field.to_string(),
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

/// 実行設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffConfig {
    /// InterfaceA / InterfaceB を含む宣言ファイル
    pub attributes_path: PathBuf,
    /// BaseEntity / DerivedEntity を含む宣言ファイル
    pub entities_path: PathBuf,
    pub names: InterfaceNames,
    /// 中間集合をソート済みリストとして出力するか
    pub detail: bool,
}

impl DiffConfig {
    /// 既定値で作成（相対パスは base_dir 基準）
    pub fn with_defaults(base_dir: &Path) -> Self {
        Self {
            attributes_path: base_dir.join(naming::DEFAULT_ATTRIBUTES_PATH),
            entities_path: base_dir.join(naming::DEFAULT_ENTITIES_PATH),
            names: InterfaceNames::default(),
            detail: false,
        }
    }
}

/// 設定ファイルの内容（すべて省略可能）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub attributes_path: Option<PathBuf>,
    pub entities_path: Option<PathBuf>,
    pub interface_a: Option<String>,
    pub interface_b: Option<String>,
    pub base_entity: Option<String>,
    pub derived_entity: Option<String>,
    pub detail: Option<bool>,
}

impl ConfigFile {
    /// デフォルトの設定ファイルパス
    pub const DEFAULT_CONFIG_PATH: &'static str = naming::CONFIG_FILE;

    /// ファイルから読み込む
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = fs::read_to_string(path).map_err(|e| IoError::FileRead {
            path: path.display().to_string(),
            cause: e.to_string(),
        })?;

        content
            .parse()
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

/// std::str::FromStrトレイトの実装
impl FromStr for ConfigFile {
    type Err = anyhow::Error;

    fn from_str(yaml: &str) -> Result<Self, Self::Err> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_saphyr::from_str(yaml).with_context(|| "Failed to parse config file")
    }
}

/// CLIから指定された上書き値
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub attributes_path: Option<PathBuf>,
    pub entities_path: Option<PathBuf>,
    pub interface_a: Option<String>,
    pub interface_b: Option<String>,
    pub base_entity: Option<String>,
    pub derived_entity: Option<String>,
    pub detail: bool,
}

/// 設定を解決する
///
/// 優先順位: CLIフラグ > 設定ファイル > 既定値。
/// 相対パスは base_dir を基準に解決します。
pub fn resolve_config(
    base_dir: &Path,
    file: Option<&ConfigFile>,
    overrides: &ConfigOverrides,
) -> Result<DiffConfig> {
    let defaults = DiffConfig::with_defaults(base_dir);
    let empty = ConfigFile::default();
    let file = file.unwrap_or(&empty);

    let pick_path = |cli: &Option<PathBuf>, from_file: &Option<PathBuf>, fallback: PathBuf| {
        cli.clone()
            .or_else(|| from_file.clone())
            .map(|p| absolutize(base_dir, p))
            .unwrap_or(fallback)
    };
    let pick_name = |cli: &Option<String>, from_file: &Option<String>, fallback: &str| {
        cli.clone()
            .or_else(|| from_file.clone())
            .unwrap_or_else(|| fallback.to_string())
    };

    let names = InterfaceNames {
        interface_a: pick_name(
            &overrides.interface_a,
            &file.interface_a,
            defaults.names.interface_a.as_str(),
        ),
        interface_b: pick_name(
            &overrides.interface_b,
            &file.interface_b,
            defaults.names.interface_b.as_str(),
        ),
        base_entity: pick_name(
            &overrides.base_entity,
            &file.base_entity,
            defaults.names.base_entity.as_str(),
        ),
        derived_entity: pick_name(
            &overrides.derived_entity,
            &file.derived_entity,
            defaults.names.derived_entity.as_str(),
        ),
    };
    names.validate()?;

    Ok(DiffConfig {
        attributes_path: pick_path(
            &overrides.attributes_path,
            &file.attributes_path,
            defaults.attributes_path,
        ),
        entities_path: pick_path(
            &overrides.entities_path,
            &file.entities_path,
            defaults.entities_path,
        ),
        names,
        detail: overrides.detail || file.detail.unwrap_or(false),
    })
}

fn absolutize(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

fn is_identifier(value: &str) -> bool {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER
        .get_or_init(|| {
            Regex::new(r"^[\p{L}_$][\p{L}\p{N}_$]*$").expect("identifier pattern is valid")
        })
        .is_match(value)
}
