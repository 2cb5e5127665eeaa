// コマンドハンドラー層
// CLIコマンドの実装

pub mod diff;

use anyhow::{Context, Result};
use serde::Serialize;

/// 出力をJSON文字列に変換する
pub(crate) fn render_json<T: Serialize>(output: &T, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(output)
    } else {
        serde_json::to_string_pretty(output)
    };
    rendered.with_context(|| "Failed to serialize output to JSON")
}
