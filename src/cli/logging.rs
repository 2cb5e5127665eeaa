// ログ初期化
//
// tracing のサブスクライバーを標準エラー出力に設定します。
// 標準出力はJSONドキュメント専用です。

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// 既定のフィルタ（RUST_LOG が未設定の場合に使用）
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "propdiff=debug"
    } else {
        "propdiff=warn"
    }
}

/// ロギングを初期化する（2回目以降の呼び出しは何もしない）
pub fn init(verbose: bool) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "propdiff=warn");
        assert_eq!(default_filter(true), "propdiff=debug");
    }

    #[test]
    fn test_init_idempotent() {
        init(false);
        init(true);
    }
}
