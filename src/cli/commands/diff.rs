// diffコマンドハンドラー
//
// 属性集合差分機能を実装します。
// - 設定の解決（CLIフラグ > 設定ファイル > 既定値）
// - 2つの宣言ファイルの読み込みと解析
// - 差分レポートのJSON出力

use crate::cli::command_context::CommandContext;
use crate::cli::commands::render_json;
use crate::core::config::ConfigOverrides;
use crate::services::attribute_diff::AttributeDiffService;
use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

/// diffコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct DiffCommand {
    /// 相対パスの基準ディレクトリ
    pub project_path: PathBuf,
    /// カスタム設定ファイルパス
    pub config_path: Option<PathBuf>,
    /// CLIフラグによる上書き値
    pub overrides: ConfigOverrides,
    /// JSONを1行で出力するか
    pub compact: bool,
}

/// diffコマンドハンドラー
#[derive(Debug, Clone, Default)]
pub struct DiffCommandHandler {
    service: AttributeDiffService,
}

impl DiffCommandHandler {
    /// 新しいDiffCommandHandlerを作成
    pub fn new() -> Self {
        Self {
            service: AttributeDiffService::new(),
        }
    }

    /// diffコマンドを実行
    ///
    /// # Returns
    ///
    /// 成功時はJSONドキュメント、失敗時はエラー
    pub fn execute(&self, command: &DiffCommand) -> Result<String> {
        let context = CommandContext::load(
            command.project_path.clone(),
            command.config_path.clone(),
            &command.overrides,
        )?;

        let report = self.service.run(&context.config)?;
        debug!(counts = ?report.counts, "Diff completed");

        render_json(&report, command.compact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_fixtures(dir: &std::path::Path) {
        fs::write(
            dir.join("attrs.d.ts"),
            "interface A { x: string; Y: string; z: string }\ninterface B { z: string }\n",
        )
        .unwrap();
        fs::write(
            dir.join("entities.d.ts"),
            "interface Base { x: string }\ninterface Derived extends Base { y: string }\n",
        )
        .unwrap();
    }

    fn command(dir: &std::path::Path, detail: bool, compact: bool) -> DiffCommand {
        DiffCommand {
            project_path: dir.to_path_buf(),
            config_path: None,
            overrides: ConfigOverrides {
                attributes_path: Some(PathBuf::from("attrs.d.ts")),
                entities_path: Some(PathBuf::from("entities.d.ts")),
                interface_a: Some("A".to_string()),
                interface_b: Some("B".to_string()),
                base_entity: Some("Base".to_string()),
                derived_entity: Some("Derived".to_string()),
                detail,
            },
            compact,
        }
    }

    #[test]
    fn test_new_handler() {
        let handler = DiffCommandHandler::new();
        assert!(format!("{:?}", handler).contains("DiffCommandHandler"));
    }

    #[test]
    fn test_execute_outputs_json_report() {
        let temp_dir = TempDir::new().unwrap();
        write_fixtures(temp_dir.path());

        let output = DiffCommandHandler::new()
            .execute(&command(temp_dir.path(), false, false))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["counts"]["onlyInA"], 2);
        assert_eq!(value["elementPropsTarget"], serde_json::json!(["x"]));
        assert_eq!(value["svgElementPropsTarget"], serde_json::json!(["x", "Y"]));
        assert!(value.get("detail").is_none());
    }

    #[test]
    fn test_compact_output_is_single_line() {
        let temp_dir = TempDir::new().unwrap();
        write_fixtures(temp_dir.path());

        let output = DiffCommandHandler::new()
            .execute(&command(temp_dir.path(), true, true))
            .unwrap();

        assert!(!output.contains('\n'));
        assert!(output.contains("\"detail\""));
    }
}
