// Propdiffライブラリのエントリーポイント
//
// モジュール構造:
// - cli: CLIレイヤー（ユーザー入力の受付とコマンド実行）
// - core: コアドメイン（宣言ツリー、属性集合、差分レポート、設定、エラー）
// - services: 宣言ファイルの解析、インターフェース検索、型解決、差分計算

pub mod cli;
pub mod core;
pub mod services;
