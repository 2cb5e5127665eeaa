// エラー型定義
//
// アプリケーション全体で使用されるカスタムエラー型を提供します。
// thiserrorを使用して、DeclarationError, IoError, ConfigError を定義します。

use thiserror::Error;

/// 宣言ファイル解析・検索エラー
///
/// 型宣言ファイルの字句解析、構文解析、インターフェース検索時に発生するエラーを表現します。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeclarationError {
    /// Interface not found
    #[error("Interface '{interface}' not found in {file}")]
    NotFound {
        /// インターフェース名
        interface: String,
        /// 検索対象のファイル
        file: String,
    },

    /// Syntax error
    #[error("Syntax error: {message}{}", format_location_opt(.location))]
    Syntax {
        /// エラーメッセージ
        message: String,
        /// エラー発生位置
        location: Option<ErrorLocation>,
    },
}

impl DeclarationError {
    /// NotFoundエラーを作成
    pub fn not_found(interface: impl Into<String>, file: impl Into<String>) -> Self {
        DeclarationError::NotFound {
            interface: interface.into(),
            file: file.into(),
        }
    }

    /// 行番号付きの構文エラーを作成
    pub fn syntax_at(message: impl Into<String>, line: usize) -> Self {
        DeclarationError::Syntax {
            message: message.into(),
            location: Some(ErrorLocation::at_line(line)),
        }
    }

    /// 構文エラーの位置に、解析中だったインターフェース名を付与する
    pub fn in_interface(self, interface: &str) -> Self {
        match self {
            DeclarationError::Syntax { message, location } => DeclarationError::Syntax {
                message,
                location: Some(location.unwrap_or_default().with_interface(interface)),
            },
            other => other,
        }
    }

    /// インターフェースが見つからないエラーかどうか
    pub fn is_not_found(&self) -> bool {
        matches!(self, DeclarationError::NotFound { .. })
    }

    /// 構文エラーかどうか
    pub fn is_syntax(&self) -> bool {
        matches!(self, DeclarationError::Syntax { .. })
    }

    /// エラー発生位置を取得
    pub fn location(&self) -> Option<&ErrorLocation> {
        match self {
            DeclarationError::Syntax { location, .. } => location.as_ref(),
            DeclarationError::NotFound { .. } => None,
        }
    }
}

/// エラー発生位置
///
/// 宣言ファイル内のエラー発生位置を表現します。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorLocation {
    /// インターフェース名
    pub interface: Option<String>,
    /// 行番号
    pub line: Option<usize>,
}

impl ErrorLocation {
    /// 行番号を指定してエラー位置を作成
    pub fn at_line(line: usize) -> Self {
        Self {
            interface: None,
            line: Some(line),
        }
    }

    /// インターフェース名を付与
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    /// 位置情報をフォーマット
    pub fn format(&self) -> String {
        let mut parts = Vec::new();

        if let Some(interface) = &self.interface {
            parts.push(format!("interface: {}", interface));
        }
        if let Some(line) = self.line {
            parts.push(format!("line: {}", line));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!(" ({})", parts.join(", "))
        }
    }
}

/// 位置情報をフォーマットするヘルパー関数
fn format_location_opt(location: &Option<ErrorLocation>) -> String {
    location.as_ref().map_or(String::new(), |loc| loc.format())
}

/// I/Oエラー
///
/// ファイル操作時に発生するエラーを表現します。
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// ファイルパス
        path: String,
    },

    /// File read error
    #[error("Failed to read file: {path} (cause: {cause})")]
    FileRead {
        /// ファイルパス
        path: String,
        /// エラー原因
        cause: String,
    },
}

impl IoError {
    /// ファイルが見つからないエラーかどうか
    pub fn is_file_not_found(&self) -> bool {
        matches!(self, IoError::FileNotFound { .. })
    }

    /// ファイル読み込みエラーかどうか
    pub fn is_file_read(&self) -> bool {
        matches!(self, IoError::FileRead { .. })
    }
}

/// 設定エラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Invalid interface name
    #[error("Invalid interface name for {field}: '{value}'")]
    InvalidInterfaceName {
        /// 設定項目名
        field: String,
        /// 指定された値
        value: String,
    },
}
